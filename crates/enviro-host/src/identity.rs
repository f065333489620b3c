//! Board identity from `/proc/cpuinfo`.

use std::fs;
use std::path::Path;

use anyhow::{Context, anyhow};
use enviro_core::DeviceIdentity;

pub const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Serial used when the host exposes none, e.g. on a desktop.
pub const UNKNOWN_SERIAL: &str = "0000000000000000";

/// Find the value of the first `Serial` line, e.g. `Serial : 00000000abcd1234`.
pub fn parse_cpuinfo_serial(cpuinfo: &str) -> Option<&str> {
    cpuinfo
        .lines()
        .find(|line| line.starts_with("Serial"))
        .and_then(|line| line.split(':').nth(1))
        .map(str::trim)
        .filter(|serial| !serial.is_empty())
}

pub fn read_device_identity(path: impl AsRef<Path>) -> anyhow::Result<DeviceIdentity> {
    let path = path.as_ref();
    let cpuinfo =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let serial = parse_cpuinfo_serial(&cpuinfo)
        .ok_or_else(|| anyhow!("no Serial line in {}", path.display()))?;
    Ok(DeviceIdentity::new(serial))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PI_CPUINFO: &str = "processor\t: 0\n\
        model name\t: ARMv7 Processor rev 4 (v7l)\n\
        Hardware\t: BCM2835\n\
        Revision\t: a02082\n\
        Serial\t\t: 00000000deadbeef\n\
        Model\t\t: Raspberry Pi 3 Model B Rev 1.2\n";

    #[test]
    fn test_parse_serial() {
        assert_eq!(parse_cpuinfo_serial(PI_CPUINFO), Some("00000000deadbeef"));
    }

    #[test]
    fn test_missing_serial() {
        assert_eq!(parse_cpuinfo_serial("processor\t: 0\nflags\t: fpu\n"), None);
        assert_eq!(parse_cpuinfo_serial("Serial\t:\n"), None);
    }

    #[test]
    fn test_read_identity() {
        let path = std::env::temp_dir().join(format!("enviro-cpuinfo-{}", std::process::id()));
        fs::write(&path, PI_CPUINFO).unwrap();

        let identity = read_device_identity(&path).unwrap();
        assert_eq!(identity.serial(), "00000000deadbeef");
        assert_eq!(identity.device_id(), "raspi-00000000deadbeef");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_identity_missing_file() {
        assert!(read_device_identity("/nonexistent/cpuinfo").is_err());
    }
}
