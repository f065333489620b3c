//! Shows one variable at a time in a desktop window sized like the 0.96"
//! LCD, backed by the simulated board.
//!
//! A mouse click stands in for a tap on the proximity sensor and advances the
//! page at the next poll. Q or Escape quits.

use std::time::{Duration, Instant};

use anyhow::anyhow;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use enviro_core::framebuffer::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use enviro_core::{DisplayManager, Monitor, Variant};
use enviro_host::args::{Invocation, USAGE, parse_args};
use enviro_host::simulated::SimulatedBoard;
use enviro_host::thermal::HostThermal;
use enviro_host::{resolve_identity, runner};
use log::info;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 4;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = match parse_args(std::env::args().skip(1), Variant::Display)? {
        Invocation::Run(options) => options,
        Invocation::Help => {
            println!("Usage: enviro-display [options]\n\n{}", USAGE);
            return Ok(());
        }
    };

    let identity = resolve_identity(&options);
    info!(
        "Display: {}x{} (scale {}x) for {}",
        DISPLAY_WIDTH_PX,
        DISPLAY_HEIGHT_PX,
        WINDOW_SCALE,
        identity.device_id()
    );
    info!("Click = proximity tap  Q = quit");

    let display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Enviro+ display", &output_settings);

    let mut monitor = Monitor::new(
        SimulatedBoard::new(options.pms),
        HostThermal::from(options.cpu),
        DisplayManager::new(display, &options.config),
        identity,
        &options.config,
    );
    monitor
        .start()
        .map_err(|e| anyhow!("starting display: {}", e))?;

    let interval = Duration::from_millis(options.config.poll_interval_ms);

    // The SDL window is created on the first `update()`, which must come
    // before `events()`.
    runner::run_cycle(&mut monitor, embassy_time::Instant::now());
    let mut completed: u64 = 1;
    let mut last_cycle = Instant::now();
    window.update(monitor.sink().display());

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. }
                    if keycode == Keycode::Q || keycode == Keycode::Escape =>
                {
                    break 'running;
                }
                SimulatorEvent::MouseButtonDown { .. } => monitor.sensors_mut().tap(),
                _ => {}
            }
        }

        if last_cycle.elapsed() >= interval {
            if options.cycles.is_some_and(|limit| completed >= limit) {
                info!("Finished {} cycles", completed);
                break;
            }
            runner::run_cycle(&mut monitor, embassy_time::Instant::now());
            completed += 1;
            last_cycle = Instant::now();
        }

        window.update(monitor.sink().display());

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Display exiting");
    Ok(())
}
