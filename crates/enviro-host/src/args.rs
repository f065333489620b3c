//! Command line and configuration file handling shared by both binaries.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use enviro_core::{Config, Variant};

use crate::identity::CPUINFO_PATH;
use crate::simulated::SimulatedPms;
use crate::thermal::CpuSource;

pub const USAGE: &str = "\
Options:
  --config <file.json>      load settings from a JSON file
  --interval-ms <n>         poll interval in milliseconds (default 1000)
  --cycles <n>              stop after n cycles (default: run until killed)
  --cpu <source>            CPU temperature source: vcgencmd, sysfs or simulated
  --cpuinfo <path>          where to read the board serial (default /proc/cpuinfo)
  --serial <serial>         use this serial instead of reading it
  --no-pms                  run without a particulate sensor attached
  -h, --help                show this message";

/// Everything a run needs, after the config file and flags are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub config: Config,
    pub cycles: Option<u64>,
    pub cpu: CpuSource,
    pub cpuinfo: PathBuf,
    pub serial: Option<String>,
    pub pms: SimulatedPms,
}

impl Options {
    fn defaults(variant: Variant) -> Self {
        Self {
            config: Config::for_variant(variant),
            cycles: None,
            cpu: CpuSource::default(),
            cpuinfo: PathBuf::from(CPUINFO_PATH),
            serial: None,
            pms: SimulatedPms::Connected,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Run(Options),
    Help,
}

/// Load a JSON config file. Missing keys keep their defaults.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}

/// Parse the arguments following the program name.
///
/// The binary decides the variant; a `variant` key in the config file is
/// overridden by it.
pub fn parse_args<I>(args: I, variant: Variant) -> anyhow::Result<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::defaults(variant);
    let mut interval_ms = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value =
            |name: &str| args.next().ok_or_else(|| anyhow!("{} requires a value", name));

        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "--config" => options.config = load_config(value("--config")?)?,
            "--interval-ms" => {
                interval_ms = Some(parse_number(&value("--interval-ms")?, "--interval-ms")?)
            }
            "--cycles" => options.cycles = Some(parse_number(&value("--cycles")?, "--cycles")?),
            "--cpu" => options.cpu = value("--cpu")?.parse().map_err(|e: String| anyhow!(e))?,
            "--cpuinfo" => options.cpuinfo = PathBuf::from(value("--cpuinfo")?),
            "--serial" => options.serial = Some(value("--serial")?),
            "--no-pms" => options.pms = SimulatedPms::Missing,
            other => bail!("unknown argument '{}'\n\n{}", other, USAGE),
        }
    }

    // Flags win over the config file regardless of order
    options.config.variant = variant;
    if let Some(interval_ms) = interval_ms {
        options.config.poll_interval_ms = interval_ms;
    }
    if options.config.poll_interval_ms == 0 {
        bail!("poll interval must be greater than zero");
    }

    Ok(Invocation::Run(options))
}

fn parse_number(text: &str, flag: &str) -> anyhow::Result<u64> {
    text.parse()
        .with_context(|| format!("{} expects a whole number, got '{}'", flag, text))
}
