//! Prints one JSON record per poll cycle on stdout.
//!
//! Logs go to stderr; set `RUST_LOG=debug` for per-cycle detail.

use anyhow::anyhow;
use embassy_time::Duration;
use enviro_core::{Monitor, Variant};
use enviro_host::args::{Invocation, USAGE, parse_args};
use enviro_host::json_sink::JsonLineSink;
use enviro_host::simulated::SimulatedBoard;
use enviro_host::thermal::HostThermal;
use enviro_host::{resolve_identity, runner};
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = match parse_args(std::env::args().skip(1), Variant::Logger)? {
        Invocation::Run(options) => options,
        Invocation::Help => {
            println!("Usage: enviro-logger [options]\n\n{}", USAGE);
            return Ok(());
        }
    };

    let identity = resolve_identity(&options);
    info!(
        "Logging as {} every {} ms, CPU source {}",
        identity.device_id(),
        options.config.poll_interval_ms,
        options.cpu
    );

    let mut monitor = Monitor::new(
        SimulatedBoard::new(options.pms),
        HostThermal::from(options.cpu),
        JsonLineSink::stdout(),
        identity,
        &options.config,
    );
    monitor
        .start()
        .map_err(|e| anyhow!("writing startup notice: {}", e))?;

    runner::run(
        &mut monitor,
        Duration::from_millis(options.config.poll_interval_ms),
        options.cycles,
    );
    Ok(())
}
