//! Synthetic accelerometer service for the simulator.

use std::time::{Duration, Instant};

use log::debug;
use tilt_core::config::SamplingRate;
use tilt_core::host::{AccelService, HostError};
use tilt_core::sensors::{AccelSample, Axis, TapEvent};

/// Largest batch the service delivers.
const MAX_SAMPLES_PER_UPDATE: u32 = 25;

/// Gravity in milli-g.
const GRAVITY_MG: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Active {
    Data { samples_per_update: u32 },
    Tap,
}

/// Accelerometer host service backed by a slowly tilting virtual watch.
pub struct SimAccelService {
    active: Option<Active>,
    rate: SamplingRate,
    started: Instant,
    last_batch: Instant,
    batch: Vec<AccelSample>,
}

impl SimAccelService {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            active: None,
            rate: SamplingRate::Hz25,
            started: now,
            last_batch: now,
            batch: Vec::with_capacity(MAX_SAMPLES_PER_UPDATE as usize),
        }
    }

    /// Return the next batch once the sensor has had time to fill it.
    pub fn poll(&mut self) -> Option<&[AccelSample]> {
        let Some(Active::Data { samples_per_update }) = self.active else {
            return None;
        };

        let period = Duration::from_millis(self.rate.batch_period_ms(samples_per_update) as u64);
        if self.last_batch.elapsed() < period {
            return None;
        }
        self.last_batch = Instant::now();

        let sample_interval = 1.0 / self.rate.hz() as f64;
        let end = self.started.elapsed().as_secs_f64();
        let start = end - sample_interval * (samples_per_update - 1) as f64;

        self.batch.clear();
        for i in 0..samples_per_update {
            let t = start + sample_interval * i as f64;
            self.batch.push(synthesize(t, i));
        }
        Some(&self.batch)
    }

    /// Emit a tap if the tap service is subscribed.
    pub fn tap(&self, axis: Axis, direction: i32) -> Option<TapEvent> {
        if self.active != Some(Active::Tap) {
            debug!("Tap on {:?} ignored, tap service not subscribed", axis);
            return None;
        }
        Some(TapEvent::new(axis, direction))
    }
}

impl Default for SimAccelService {
    fn default() -> Self {
        Self::new()
    }
}

/// Gravity vector of a watch rocking around two axes, plus a little jitter.
fn synthesize(t: f64, index: u32) -> AccelSample {
    let roll = 0.6 * (t / 3.0).sin();
    let pitch = 0.4 * (t / 5.0).cos();
    let jitter = 8.0 * ((t * 97.0) + index as f64).sin();

    let x = GRAVITY_MG * roll.sin() + jitter;
    let y = GRAVITY_MG * pitch.sin() * roll.cos() - jitter;
    let z = -GRAVITY_MG * pitch.cos() * roll.cos() + jitter / 2.0;

    AccelSample::new(x as i16, y as i16, z as i16).with_timestamp((t * 1000.0) as u64)
}

impl AccelService for SimAccelService {
    fn data_subscribe(&mut self, samples_per_update: u32) -> Result<(), HostError> {
        if self.active.is_some() || !(1..=MAX_SAMPLES_PER_UPDATE).contains(&samples_per_update) {
            return Err(HostError::SubscriptionRejected);
        }
        self.active = Some(Active::Data { samples_per_update });
        self.last_batch = Instant::now();
        Ok(())
    }

    fn set_sampling_rate(&mut self, rate: SamplingRate) -> Result<(), HostError> {
        self.rate = rate;
        Ok(())
    }

    fn data_unsubscribe(&mut self) -> Result<(), HostError> {
        match self.active {
            Some(Active::Data { .. }) => {
                self.active = None;
                Ok(())
            }
            _ => Err(HostError::NotSubscribed),
        }
    }

    fn tap_subscribe(&mut self) -> Result<(), HostError> {
        if self.active.is_some() {
            return Err(HostError::SubscriptionRejected);
        }
        self.active = Some(Active::Tap);
        Ok(())
    }

    fn tap_unsubscribe(&mut self) -> Result<(), HostError> {
        match self.active {
            Some(Active::Tap) => {
                self.active = None;
                Ok(())
            }
            _ => Err(HostError::NotSubscribed),
        }
    }
}
