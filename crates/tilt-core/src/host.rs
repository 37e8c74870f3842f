//! Services the host platform provides to the app

use thiserror_no_std::Error;

use crate::config::SamplingRate;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    #[error("accelerometer service rejected the subscription")]
    SubscriptionRejected,
    #[error("sampling rate of {0} Hz is not supported")]
    UnsupportedRate(u32),
    #[error("no active accelerometer subscription")]
    NotSubscribed,
}

/// Accelerometer subscription held by the app while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscription {
    /// Batched raw samples at a fixed rate
    Data {
        samples_per_update: u32,
        rate: SamplingRate,
    },
    /// Tap events only
    Tap,
}

/// Host accelerometer service.
///
/// The host delivers the subscribed events to the app serially, one at a
/// time, through [`App::handle_event`](crate::app::App::handle_event).
pub trait AccelService {
    /// Start delivering batches of `samples_per_update` samples.
    fn data_subscribe(&mut self, samples_per_update: u32) -> Result<(), HostError>;

    /// Set the rate at which the sensor is sampled.
    fn set_sampling_rate(&mut self, rate: SamplingRate) -> Result<(), HostError>;

    fn data_unsubscribe(&mut self) -> Result<(), HostError>;

    /// Start delivering tap events.
    fn tap_subscribe(&mut self) -> Result<(), HostError>;

    fn tap_unsubscribe(&mut self) -> Result<(), HostError>;
}
