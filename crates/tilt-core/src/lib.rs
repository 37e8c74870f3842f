//! Hardware-independent core library for tilt-rs
//!
//! This crate contains the platform-agnostic logic of the tilt watch app:
//! accelerometer sample types, batch averaging, bounded text formatting,
//! the sample/tap strategies, the on-screen text layer and the application
//! lifecycle that ties them to the host's sensor and window services.
//!
//! It is `#![no_std]` so it compiles on both watch targets and desktop hosts
//! (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod config;
pub mod format;
pub mod host;
pub mod sampler;
pub mod sampling;
pub mod sensors;
pub mod text_layer;

#[cfg(test)]
mod test_support;

pub use app::{App, AppError, AppRunState};
pub use config::{AppConfig, DisplayText, Mode, SamplingRate};
pub use host::{AccelService, HostError, Subscription};
pub use sampler::{SampleStrategy, Sampler, SensorStrategy, TapStrategy};
pub use sensors::{AccelSample, Axis, SensorEvent, TapEvent};
pub use text_layer::{OverflowMode, SystemFont, TextLayer};
