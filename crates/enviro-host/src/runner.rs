//! Fixed-cadence polling loop.

use std::thread;

use embassy_time::{Duration, Instant};
use enviro_core::{CpuThermalReader, CycleError, Monitor, OutputSink, SensorPort};
use log::{error, info, warn};

/// Run one cycle and log its failure, if any. Returns whether it succeeded.
pub fn run_cycle<S, C, O>(monitor: &mut Monitor<S, C, O>, now: Instant) -> bool
where
    S: SensorPort,
    C: CpuThermalReader,
    O: OutputSink,
{
    match monitor.cycle(now) {
        Ok(_) => true,
        Err(CycleError::Sensor(e)) => {
            warn!("Skipping cycle: {}", e);
            false
        }
        Err(e @ CycleError::Output(_)) => {
            error!("{}", e);
            false
        }
    }
}

/// Poll every `interval`, `cycles` times or forever.
///
/// The loop sleeps after failed cycles as well. Returns the number of
/// successful cycles.
pub fn run<S, C, O>(monitor: &mut Monitor<S, C, O>, interval: Duration, cycles: Option<u64>) -> u64
where
    S: SensorPort,
    C: CpuThermalReader,
    O: OutputSink,
{
    let mut completed = 0;
    let mut succeeded = 0;

    loop {
        if run_cycle(monitor, Instant::now()) {
            succeeded += 1;
        }
        completed += 1;

        if cycles.is_some_and(|limit| completed >= limit) {
            info!("Finished {} cycles ({} succeeded)", completed, succeeded);
            return succeeded;
        }

        thread::sleep(std::time::Duration::from_micros(interval.as_micros()));
    }
}
