//! Linux host side of enviro-rs.
//!
//! Provides what the core library leaves to the platform: CPU temperature
//! sources, the board serial, a simulated sensor board, the JSON-lines sink,
//! command line handling and the polling loop.

pub mod args;
pub mod identity;
pub mod json_sink;
pub mod runner;
pub mod simulated;
pub mod thermal;

use enviro_core::DeviceIdentity;
use log::warn;

use crate::args::Options;
use crate::identity::{UNKNOWN_SERIAL, read_device_identity};

/// Identity from `--serial`, else from cpuinfo, else a placeholder.
pub fn resolve_identity(options: &Options) -> DeviceIdentity {
    if let Some(serial) = &options.serial {
        return DeviceIdentity::new(serial.as_str());
    }
    match read_device_identity(&options.cpuinfo) {
        Ok(identity) => identity,
        Err(e) => {
            warn!("{:#}, using serial {}", e, UNKNOWN_SERIAL);
            DeviceIdentity::new(UNKNOWN_SERIAL)
        }
    }
}
