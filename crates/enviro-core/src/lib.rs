//! Hardware-independent core library for enviro-rs
//!
//! This crate contains all platform-agnostic logic for the enviro sensor
//! board: sensor capability traits, temperature compensation, per-cycle
//! aggregation, display mode control, history buffers, page rendering and
//! log record formatting.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both the
//! board and desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod aggregator;
pub mod compensation;
pub mod config;
pub mod display_manager;
pub mod framebuffer;
pub mod history;
pub mod metrics;
pub mod mode;
pub mod monitor;
pub mod output;
pub mod pages;
pub mod reading;
pub mod record;
pub mod sensors;

pub use aggregator::{ParticulateStatus, ReadingAggregator};
pub use config::{Config, Variant};
pub use display_manager::DisplayManager;
pub use monitor::{CycleError, Monitor};
pub use output::{OutputError, OutputSink};
pub use reading::{DeviceIdentity, Reading, Variable};
pub use sensors::{CpuThermalReader, GasReadings, ParticulateReadings, SensorError, SensorPort};
