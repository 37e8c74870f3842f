//! Build-time configuration and layout constants

/// Width of the watch display in pixels.
pub const WATCH_WIDTH_PX: u32 = 144;

/// Height of the watch display in pixels.
pub const WATCH_HEIGHT_PX: u32 = 168;

/// Horizontal inset of the text region on each side of the surface.
pub const TEXT_MARGIN_PX: u32 = 5;

/// Capacity of the on-screen text, in bytes.
pub const DISPLAY_TEXT_CAPACITY: usize = 128;

/// Number of samples delivered per accelerometer batch.
pub const SAMPLES_PER_UPDATE: usize = 3;

/// Text shown before the first sensor event arrives.
pub const PLACEHOLDER_TEXT: &str = "No data yet.";

/// Bounded string holding whatever the text layer shows.
pub type DisplayText = heapless::String<DISPLAY_TEXT_CAPACITY>;

/// Which accelerometer subscription drives the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Periodic batches of raw samples plus their average
    Data,
    /// Discrete tap events rendered as a direction message
    Tap,
}

impl Mode {
    /// Mode selected by the `tap-mode` cargo feature.
    pub const fn from_build() -> Self {
        if cfg!(feature = "tap-mode") {
            Self::Tap
        } else {
            Self::Data
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Tap => "tap",
        }
    }
}

/// Accelerometer sampling rates supported by the host service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingRate {
    Hz10,
    Hz25,
    Hz50,
    Hz100,
}

impl SamplingRate {
    pub const fn hz(self) -> u32 {
        match self {
            Self::Hz10 => 10,
            Self::Hz25 => 25,
            Self::Hz50 => 50,
            Self::Hz100 => 100,
        }
    }

    /// Time it takes the sensor to fill a batch of `samples` readings.
    pub const fn batch_period_ms(self, samples: u32) -> u32 {
        samples * 1000 / self.hz()
    }
}

/// Application configuration, read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: Mode,
    pub sampling_rate: SamplingRate,
}

impl AppConfig {
    /// Configuration baked in at build time.
    pub const fn from_build() -> Self {
        Self {
            mode: Mode::from_build(),
            sampling_rate: SamplingRate::Hz25,
        }
    }

    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_period_at_25hz() {
        assert_eq!(
            SamplingRate::Hz25.batch_period_ms(SAMPLES_PER_UPDATE as u32),
            120
        );
    }

    #[test]
    fn test_build_config_uses_25hz() {
        let config = AppConfig::from_build();
        assert_eq!(config.sampling_rate, SamplingRate::Hz25);
        assert_eq!(config.mode, Mode::from_build());
    }

    #[test]
    fn test_with_mode_overrides_build_mode() {
        let config = AppConfig::from_build().with_mode(Mode::Tap);
        assert_eq!(config.mode, Mode::Tap);
        assert_eq!(config.with_mode(Mode::Data).mode, Mode::Data);
    }
}
