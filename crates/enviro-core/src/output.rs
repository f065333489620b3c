//! Output sinks: where each cycle's [`Reading`] ends up.

use core::fmt::{self, Write};

use embassy_time::Instant;
use heapless::String;
use thiserror_no_std::Error;

use crate::reading::Reading;

/// Capacity of the bounded error descriptions
pub const ERROR_DESCRIPTION_LEN: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutputError {
    #[error("display error: {0}")]
    Display(String<ERROR_DESCRIPTION_LEN>),
    #[error("write error: {0}")]
    Write(String<ERROR_DESCRIPTION_LEN>),
}

/// Format a value into a bounded string, truncating what does not fit.
pub fn describe(value: impl fmt::Debug) -> String<ERROR_DESCRIPTION_LEN> {
    let mut text = String::new();
    let mut writer = Truncating(&mut text);
    write!(writer, "{:?}", value).ok();
    text
}

struct Truncating<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Destination for the readings produced every cycle.
pub trait OutputSink {
    /// Publish one cycle's reading taken at `now`.
    fn emit(&mut self, reading: &Reading, now: Instant) -> Result<(), OutputError>;

    /// Publish an out-of-band notice such as a missing sensor.
    fn notice(&mut self, _message: &str) -> Result<(), OutputError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_truncates() {
        let long = "x".repeat(200);
        let text = describe(long.as_str());
        assert_eq!(text.len(), ERROR_DESCRIPTION_LEN);
        assert!(text.starts_with("\"xxx"));
    }

    #[test]
    fn test_describe_short() {
        assert_eq!(describe(42).as_str(), "42");
    }
}
