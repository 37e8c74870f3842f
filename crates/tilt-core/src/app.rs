//! Application state and lifecycle for tilt
//!
//! [`App`] is the single context object of the watch app. It owns the active
//! [`Sampler`] and, while the window is loaded, the [`TextLayer`]. The host
//! drives it in this order:
//!
//! 1. [`App::init`]: subscribe to the accelerometer service for the mode.
//! 2. [`App::on_window_load`]: create the text layer on the surface.
//! 3. [`App::handle_event`] for each delivered event, [`App::draw`] as needed.
//! 4. [`App::on_window_unload`]: drop the text layer.
//! 5. [`App::deinit`]: unsubscribe.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, info};
use thiserror_no_std::Error;

use crate::config::{AppConfig, Mode};
use crate::host::{AccelService, HostError, Subscription};
use crate::sampler::{Sampler, SensorStrategy};
use crate::sensors::SensorEvent;
use crate::text_layer::{OverflowMode, SystemFont, TextLayer, text_bounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRunState {
    Uninitialized,
    Running,
    Stopped,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    #[error("host service error: {0}")]
    Host(HostError),
    #[error("app is already running")]
    AlreadyRunning,
    #[error("app is not running")]
    NotRunning,
}

impl From<HostError> for AppError {
    fn from(value: HostError) -> Self {
        AppError::Host(value)
    }
}

/// Main application context.
pub struct App {
    config: AppConfig,
    sampler: Sampler,
    layer: Option<TextLayer>,
    run_state: AppRunState,
    subscription: Option<Subscription>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            sampler: Sampler::for_config(&config),
            config,
            layer: None,
            run_state: AppRunState::Uninitialized,
            subscription: None,
        }
    }

    /// Subscribe to the accelerometer service the configured mode needs.
    ///
    /// On failure nothing stays subscribed and the app does not run.
    pub fn init<A: AccelService>(&mut self, accel: &mut A) -> Result<(), AppError> {
        if self.run_state == AppRunState::Running {
            return Err(AppError::AlreadyRunning);
        }

        let subscription = self.sampler.subscription();
        match subscription {
            Subscription::Data {
                samples_per_update,
                rate,
            } => {
                accel.data_subscribe(samples_per_update)?;
                if let Err(e) = accel.set_sampling_rate(rate) {
                    accel.data_unsubscribe().ok();
                    return Err(e.into());
                }
            }
            Subscription::Tap => accel.tap_subscribe()?,
        }

        info!(
            "Running in {} mode with {:?}",
            self.config.mode.label(),
            subscription
        );
        self.subscription = Some(subscription);
        self.run_state = AppRunState::Running;
        Ok(())
    }

    /// Drop the accelerometer subscription taken by [`init`](Self::init).
    pub fn deinit<A: AccelService>(&mut self, accel: &mut A) -> Result<(), AppError> {
        let Some(subscription) = self.subscription.take() else {
            return Err(AppError::NotRunning);
        };
        self.run_state = AppRunState::Stopped;

        match subscription {
            Subscription::Data { .. } => accel.data_unsubscribe()?,
            Subscription::Tap => accel.tap_unsubscribe()?,
        }

        info!("Stopped, unsubscribed from {:?}", subscription);
        Ok(())
    }

    /// Create the text layer once the host surface is available.
    pub fn on_window_load(&mut self, surface: Rectangle) {
        // Sample lines reach 22 chars, so the report needs the compact font
        let font = match self.config.mode {
            Mode::Data => SystemFont::Compact,
            Mode::Tap => SystemFont::Medium,
        };
        let layer = TextLayer::new(text_bounds(surface))
            .with_font(font)
            .with_overflow_mode(OverflowMode::WordWrap);
        debug!("Text layer created at {:?}", layer.bounds());
        self.layer = Some(layer);
    }

    /// Destroy the text layer when the host surface goes away.
    pub fn on_window_unload(&mut self) {
        if self.layer.take().is_some() {
            debug!("Text layer destroyed");
        }
    }

    /// Render a sensor event and show the result.
    ///
    /// Returns `true` if the text layer changed and needs a redraw.
    pub fn handle_event(&mut self, event: SensorEvent<'_>) -> bool {
        let Some(text) = self.sampler.render(&event) else {
            return false;
        };

        match self.layer.as_mut() {
            Some(layer) => layer.display(text),
            None => {
                debug!("No text layer loaded, dropping event text");
                false
            }
        }
    }

    /// Draw the text layer if it needs it.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        if let Some(layer) = self.layer.as_mut()
            && layer.is_dirty()
        {
            layer.draw(display)?;
            layer.mark_clean();
        }
        Ok(())
    }

    pub fn needs_redraw(&self) -> bool {
        self.layer.as_ref().is_some_and(TextLayer::is_dirty)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn run_state(&self) -> AppRunState {
        self.run_state
    }

    pub fn subscription(&self) -> Option<Subscription> {
        self.subscription
    }

    pub fn layer(&self) -> Option<&TextLayer> {
        self.layer.as_ref()
    }

    pub fn layer_mut(&mut self) -> Option<&mut TextLayer> {
        self.layer.as_mut()
    }
}
