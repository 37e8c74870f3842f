//! Desktop simulator for the tilt accelerometer watch app.
//!
//! Shows the watch screen in an SDL2 window via `embedded-graphics-simulator`
//! and stands in for the watch's sensor service with [`SimAccelService`].
//! Build with `--features tap-mode` to drive the display from taps instead
//! of sample batches.
//!
//! # Key bindings
//!
//! | Key         | Action                         |
//! |-------------|--------------------------------|
//! | X / Y / Z   | Positive tap on that axis      |
//! | Shift + key | Negative tap on that axis      |
//! | Q / Esc     | Quit                           |

mod accel;

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
    sdl2::{Keycode, Mod},
};
use log::{error, info};

use tilt_core::config::{WATCH_HEIGHT_PX, WATCH_WIDTH_PX};
use tilt_core::{App, AppConfig, Axis, SensorEvent};

use crate::accel::SimAccelService;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 3;

/// Target frame duration (~60 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Map a key to a tap axis.
fn keycode_to_axis(keycode: Keycode) -> Option<Axis> {
    match keycode {
        Keycode::X => Some(Axis::X),
        Keycode::Y => Some(Axis::Y),
        Keycode::Z => Some(Axis::Z),
        _ => None,
    }
}

fn redraw(app: &mut App, display: &mut SimulatorDisplay<Rgb565>) {
    if let Err(e) = app.draw(display) {
        error!("Draw error: {:?}", e);
    }
}

fn main() {
    env_logger::init();

    let config = AppConfig::from_build();
    info!("Starting tilt simulator in {} mode", config.mode.label());
    info!(
        "Display: {}×{} (scale {}×)",
        WATCH_WIDTH_PX, WATCH_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: X/Y/Z=tap  Shift+X/Y/Z=negative tap  Q=Quit");

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(WATCH_WIDTH_PX, WATCH_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Tilt Simulator", &output_settings);

    let mut accel = SimAccelService::new();
    let mut app = App::new(config);

    if let Err(e) = app.init(&mut accel) {
        error!("Failed to start: {}", e);
        return;
    }

    let _ = display.clear(Rgb565::WHITE);
    app.on_window_load(display.bounding_box());
    redraw(&mut app, &mut display);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown {
                    keycode, keymod, ..
                } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }

                    let Some(axis) = keycode_to_axis(keycode) else {
                        continue;
                    };
                    let direction = if keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD) {
                        -1
                    } else {
                        1
                    };
                    if let Some(tap) = accel.tap(axis, direction) {
                        info!("Tap {:?} {}", axis, direction);
                        app.handle_event(SensorEvent::Tap(tap));
                    }
                }

                _ => {}
            }
        }

        if let Some(batch) = accel.poll() {
            app.handle_event(SensorEvent::Samples {
                batch,
                count: batch.len() as u32,
            });
        }

        if app.needs_redraw() {
            redraw(&mut app, &mut display);
        }
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    app.on_window_unload();
    if let Err(e) = app.deinit(&mut accel) {
        error!("Failed to stop cleanly: {}", e);
    }

    info!("Simulator exiting");
}
