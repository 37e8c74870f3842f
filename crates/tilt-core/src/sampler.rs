// src/sampler.rs
//! Strategies that turn sensor events into display text.
//!
//! # SensorStrategy
//!
//! [`SensorStrategy`] is the common contract: a strategy names the host
//! subscription it needs and renders the events that subscription delivers.
//! Two strategies exist:
//!
//! - [`SampleStrategy`] formats each 3-sample batch together with its
//!   per-axis average into a reusable scratch buffer.
//! - [`TapStrategy`] maps a tap's axis and direction to a fixed message.
//!
//! # Sampler
//!
//! [`Sampler`] is an enum holding exactly one strategy, chosen from the
//! configured [`Mode`] at startup. It delegates every call to the inner
//! strategy without trait objects.

use log::{debug, warn};

use crate::config::{AppConfig, DisplayText, Mode, SAMPLES_PER_UPDATE, SamplingRate};
use crate::format::write_sample_report;
use crate::host::Subscription;
use crate::sampling::{average, vibrating_samples};
use crate::sensors::{AccelSample, Axis, SensorEvent, TapEvent};

// ---------------------------------------------------------------------------
// SensorStrategy trait
// ---------------------------------------------------------------------------

/// Produces display text from sensor events.
pub trait SensorStrategy {
    /// The host subscription this strategy consumes.
    fn subscription(&self) -> Subscription;

    /// Render an event, or `None` if it produces no text.
    ///
    /// Events of the kind this strategy does not subscribe to are ignored.
    fn render(&mut self, event: &SensorEvent<'_>) -> Option<&str>;
}

// ---------------------------------------------------------------------------
// SampleStrategy
// ---------------------------------------------------------------------------

/// Renders raw sample batches and their average.
pub struct SampleStrategy {
    rate: SamplingRate,
    scratch: DisplayText,
    last_timestamp_ms: Option<u64>,
}

impl SampleStrategy {
    pub fn new(rate: SamplingRate) -> Self {
        Self {
            rate,
            scratch: DisplayText::new(),
            last_timestamp_ms: None,
        }
    }

    /// Host timestamp of the newest sample rendered so far.
    pub fn last_timestamp_ms(&self) -> Option<u64> {
        self.last_timestamp_ms
    }

    /// Format a batch into the scratch buffer and return it.
    ///
    /// Only the first [`SAMPLES_PER_UPDATE`] samples are used; shorter
    /// batches produce no text.
    pub fn on_samples(&mut self, batch: &[AccelSample], count: u32) -> Option<&str> {
        if count as usize != batch.len() {
            debug!(
                "Sample count {} differs from batch length {}",
                count,
                batch.len()
            );
        }

        let Some(batch) = batch.first_chunk::<SAMPLES_PER_UPDATE>() else {
            warn!(
                "Dropping short batch of {} samples, need {}",
                batch.len(),
                SAMPLES_PER_UPDATE
            );
            return None;
        };

        let vibrating = vibrating_samples(batch);
        if vibrating > 0 {
            debug!("{} of {} samples taken while vibrating", vibrating, batch.len());
        }
        self.last_timestamp_ms = batch.last().map(|s| s.timestamp_ms);

        let avg = average(batch);
        if write_sample_report(&mut self.scratch, batch, &avg) {
            warn!("Sample report truncated to {} bytes", self.scratch.len());
        }

        Some(self.scratch.as_str())
    }
}

impl SensorStrategy for SampleStrategy {
    fn subscription(&self) -> Subscription {
        Subscription::Data {
            samples_per_update: SAMPLES_PER_UPDATE as u32,
            rate: self.rate,
        }
    }

    fn render(&mut self, event: &SensorEvent<'_>) -> Option<&str> {
        match *event {
            SensorEvent::Samples { batch, count } => self.on_samples(batch, count),
            SensorEvent::Tap(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TapStrategy
// ---------------------------------------------------------------------------

/// Message for a tap along `axis`. Positive `direction` is the positive
/// message, anything else the negative one.
pub const fn tap_message(axis: Axis, direction: i32) -> &'static str {
    let positive = direction > 0;
    match (axis, positive) {
        (Axis::X, true) => "X axis positive.",
        (Axis::X, false) => "X axis negative.",
        (Axis::Y, true) => "Y axis positive.",
        (Axis::Y, false) => "Y axis negative.",
        (Axis::Z, true) => "Z axis positive.",
        (Axis::Z, false) => "Z axis negative.",
    }
}

/// Renders tap events as a direction message.
#[derive(Debug, Default, Clone, Copy)]
pub struct TapStrategy;

impl TapStrategy {
    pub const fn new() -> Self {
        Self
    }

    /// Message for a tap, or `None` for an axis id outside X, Y and Z.
    ///
    /// Unknown axes are ignored without signalling an error.
    pub fn on_tap(&self, tap: TapEvent) -> Option<&'static str> {
        match tap.axis() {
            Some(axis) => Some(tap_message(axis, tap.direction)),
            None => {
                debug!("Ignoring tap on unknown axis id {}", tap.axis);
                None
            }
        }
    }
}

impl SensorStrategy for TapStrategy {
    fn subscription(&self) -> Subscription {
        Subscription::Tap
    }

    fn render(&mut self, event: &SensorEvent<'_>) -> Option<&str> {
        match *event {
            SensorEvent::Tap(tap) => self.on_tap(tap),
            SensorEvent::Samples { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

/// The active strategy.
pub enum Sampler {
    Samples(SampleStrategy),
    Tap(TapStrategy),
}

impl Sampler {
    /// Build the strategy for the configured mode.
    pub fn for_config(config: &AppConfig) -> Self {
        match config.mode {
            Mode::Data => Sampler::Samples(SampleStrategy::new(config.sampling_rate)),
            Mode::Tap => Sampler::Tap(TapStrategy::new()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Sampler::Samples(_) => Mode::Data,
            Sampler::Tap(_) => Mode::Tap,
        }
    }
}

impl SensorStrategy for Sampler {
    fn subscription(&self) -> Subscription {
        match self {
            Sampler::Samples(strategy) => strategy.subscription(),
            Sampler::Tap(strategy) => strategy.subscription(),
        }
    }

    fn render(&mut self, event: &SensorEvent<'_>) -> Option<&str> {
        match self {
            Sampler::Samples(strategy) => strategy.render(event),
            Sampler::Tap(strategy) => strategy.render(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_batch() -> [AccelSample; 3] {
        [
            AccelSample::new(100, -50, 0),
            AccelSample::new(103, -49, 1),
            AccelSample::new(101, -51, -1),
        ]
    }

    #[test]
    fn test_sample_strategy_renders_report() {
        let mut strategy = SampleStrategy::new(SamplingRate::Hz25);
        let batch = reference_batch();
        let text = strategy.on_samples(&batch, 3).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert_eq!(text.lines().next(), Some("N X,Y,Z"));
        assert_eq!(text.lines().last(), Some("A 101 -50 0"));
    }

    #[test]
    fn test_sample_strategy_reuses_scratch() {
        let mut strategy = SampleStrategy::new(SamplingRate::Hz25);
        strategy.on_samples(&reference_batch(), 3);

        let zeros = [AccelSample::default(); 3];
        let text = strategy.on_samples(&zeros, 3).unwrap();
        assert_eq!(text, "N X,Y,Z\n0 0,0,0\n1 0,0,0\n2 0,0,0\nA 0 0 0");
    }

    #[test]
    fn test_short_batch_produces_nothing() {
        let mut strategy = SampleStrategy::new(SamplingRate::Hz25);
        let batch = reference_batch();
        assert_eq!(strategy.on_samples(&batch[..2], 2), None);
        assert_eq!(strategy.on_samples(&[], 0), None);
    }

    #[test]
    fn test_long_batch_uses_first_three() {
        let mut strategy = SampleStrategy::new(SamplingRate::Hz25);
        let mut batch = [AccelSample::new(9999, 9999, 9999); 4];
        batch[..3].copy_from_slice(&reference_batch());
        let text = strategy.on_samples(&batch, 4).unwrap();
        assert!(!text.contains("9999"));
        assert_eq!(text.lines().last(), Some("A 101 -50 0"));
    }

    #[test]
    fn test_sample_strategy_tracks_timestamp() {
        let mut strategy = SampleStrategy::new(SamplingRate::Hz25);
        assert_eq!(strategy.last_timestamp_ms(), None);

        let batch = [
            AccelSample::new(1, 2, 3).with_timestamp(1_000),
            AccelSample::new(1, 2, 3).with_timestamp(1_040).with_vibration(true),
            AccelSample::new(1, 2, 3).with_timestamp(1_080),
        ];
        strategy.on_samples(&batch, 3).unwrap();
        assert_eq!(strategy.last_timestamp_ms(), Some(1_080));

        // Short batches leave the last timestamp alone
        strategy.on_samples(&batch[..1], 1);
        assert_eq!(strategy.last_timestamp_ms(), Some(1_080));
    }

    #[test]
    fn test_tap_messages() {
        let tap = TapStrategy::new();
        let cases = [
            (Axis::X, 1, "X axis positive."),
            (Axis::X, -1, "X axis negative."),
            (Axis::Y, 7, "Y axis positive."),
            (Axis::Y, -5, "Y axis negative."),
            (Axis::Z, 3, "Z axis positive."),
            (Axis::Z, i32::MIN, "Z axis negative."),
        ];
        for (axis, direction, expected) in cases {
            assert_eq!(tap.on_tap(TapEvent::new(axis, direction)), Some(expected));
        }
    }

    #[test]
    fn test_zero_direction_is_negative() {
        assert_eq!(tap_message(Axis::X, 0), "X axis negative.");
    }

    #[test]
    fn test_unknown_axis_is_ignored() {
        let tap = TapStrategy::new();
        for raw in [3u8, 4, 200, u8::MAX] {
            assert_eq!(tap.on_tap(TapEvent::from_raw(raw, 1)), None);
            assert_eq!(tap.on_tap(TapEvent::from_raw(raw, -1)), None);
        }
    }

    #[test]
    fn test_sampler_follows_mode() {
        let data = Sampler::for_config(&AppConfig::from_build().with_mode(Mode::Data));
        assert_eq!(data.mode(), Mode::Data);
        assert_eq!(
            data.subscription(),
            Subscription::Data {
                samples_per_update: 3,
                rate: SamplingRate::Hz25
            }
        );

        let tap = Sampler::for_config(&AppConfig::from_build().with_mode(Mode::Tap));
        assert_eq!(tap.mode(), Mode::Tap);
        assert_eq!(tap.subscription(), Subscription::Tap);
    }

    #[test]
    fn test_sampler_ignores_other_event_kind() {
        let batch = reference_batch();
        let samples = SensorEvent::Samples {
            batch: &batch,
            count: 3,
        };
        let tap = SensorEvent::Tap(TapEvent::new(Axis::Y, -5));

        let mut data = Sampler::for_config(&AppConfig::from_build().with_mode(Mode::Data));
        assert_eq!(data.render(&tap), None);
        assert!(data.render(&samples).is_some());

        let mut taps = Sampler::for_config(&AppConfig::from_build().with_mode(Mode::Tap));
        assert_eq!(taps.render(&samples), None);
        assert_eq!(taps.render(&tap), Some("Y axis negative."));
    }
}
