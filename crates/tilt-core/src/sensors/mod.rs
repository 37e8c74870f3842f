//! Accelerometer data delivered by the host sensor service

use core::fmt;

/// A single accelerometer reading in milli-g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    /// The vibration motor was running while this sample was taken
    pub did_vibrate: bool,
    /// Host timestamp in milliseconds
    pub timestamp_ms: u64,
}

impl AccelSample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self {
            x,
            y,
            z,
            did_vibrate: false,
            timestamp_ms: 0,
        }
    }

    pub const fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    pub const fn with_vibration(mut self, did_vibrate: bool) -> Self {
        self.did_vibrate = did_vibrate;
        self
    }
}

impl fmt::Display for AccelSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Measurement axis of the accelerometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Decode the host's axis id. Ids other than 0, 1 and 2 have no axis.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }

    pub const fn to_raw(self) -> u8 {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// A tap detected by the accelerometer.
///
/// The axis is kept as the raw host id so that ids outside X/Y/Z still
/// reach the tap strategy, which ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapEvent {
    pub axis: u8,
    /// Sign gives the direction of the tap along the axis
    pub direction: i32,
}

impl TapEvent {
    pub const fn new(axis: Axis, direction: i32) -> Self {
        Self {
            axis: axis.to_raw(),
            direction,
        }
    }

    pub const fn from_raw(axis: u8, direction: i32) -> Self {
        Self { axis, direction }
    }

    pub const fn axis(&self) -> Option<Axis> {
        Axis::from_raw(self.axis)
    }
}

/// Event handed to the app by the host sensor service.
#[derive(Debug, Clone, Copy)]
pub enum SensorEvent<'a> {
    /// A batch of samples; `count` is the host's reported sample count
    Samples {
        batch: &'a [AccelSample],
        count: u32,
    },
    Tap(TapEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_raw_ids() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert_eq!(Axis::from_raw(axis.to_raw()), Some(axis));
        }
        assert_eq!(Axis::from_raw(3), None);
        assert_eq!(Axis::from_raw(u8::MAX), None);
    }

    #[test]
    fn test_tap_event_keeps_unknown_axis() {
        let tap = TapEvent::from_raw(7, 1);
        assert_eq!(tap.axis, 7);
        assert_eq!(tap.axis(), None);
    }

    #[test]
    fn test_sample_display() {
        let sample = AccelSample::new(-12, 0, 1000);
        assert_eq!(format!("{}", sample), "-12,0,1000");
    }
}
