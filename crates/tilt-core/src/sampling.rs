//! Per-axis averaging of accelerometer batches

use crate::config::SAMPLES_PER_UPDATE;
use crate::sensors::AccelSample;

/// Mean of each axis across one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisAverage {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Average a batch axis by axis.
///
/// Sums are accumulated in `i32`, which holds any three `i16` readings, and
/// divided with truncation toward zero.
pub fn average(batch: &[AccelSample; SAMPLES_PER_UPDATE]) -> AxisAverage {
    let mut sum = [0i32; 3];
    for sample in batch {
        sum[0] += i32::from(sample.x);
        sum[1] += i32::from(sample.y);
        sum[2] += i32::from(sample.z);
    }

    let count = SAMPLES_PER_UPDATE as i32;
    AxisAverage {
        x: sum[0] / count,
        y: sum[1] / count,
        z: sum[2] / count,
    }
}

/// Samples in the batch that were taken while the vibration motor ran.
///
/// Motor vibration shows up in the readings, so these samples are noisier
/// than the rest.
pub fn vibrating_samples(batch: &[AccelSample]) -> usize {
    batch.iter().filter(|s| s.did_vibrate).count()
}
