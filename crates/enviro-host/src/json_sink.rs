//! Logger output: one JSON object per line.

use std::io::Write;

use embassy_time::Instant;
use enviro_core::output::describe;
use enviro_core::record::{InfoRecord, LogRecord};
use enviro_core::{OutputError, OutputSink, Reading};
use serde::Serialize;

/// Writes [`LogRecord`] and [`InfoRecord`] lines to any writer, flushing
/// after each one so a reading process sees it straight away.
pub struct JsonLineSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, record: &impl Serialize) -> Result<(), OutputError> {
        serde_json::to_writer(&mut self.writer, record)
            .map_err(|e| OutputError::Write(describe(e)))?;
        writeln!(self.writer).map_err(|e| OutputError::Write(describe(e)))?;
        self.writer
            .flush()
            .map_err(|e| OutputError::Write(describe(e)))
    }
}

impl JsonLineSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> OutputSink for JsonLineSink<W> {
    fn emit(&mut self, reading: &Reading, _now: Instant) -> Result<(), OutputError> {
        self.write_line(&LogRecord::from_reading(reading))
    }

    fn notice(&mut self, message: &str) -> Result<(), OutputError> {
        self.write_line(&InfoRecord { info: message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enviro_core::DeviceIdentity;

    fn lines(sink: JsonLineSink<Vec<u8>>) -> Vec<String> {
        String::from_utf8(sink.into_inner())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_emit_writes_record_line() {
        let mut sink = JsonLineSink::new(Vec::new());
        let reading = Reading {
            temperature: Some(8.89),
            pressure: Some(1013.25),
            humidity: Some(45.2),
            lux: Some(1.0),
            oxidised: Some(12.3),
            reduced: Some(410.7),
            nh3: Some(88.1),
            pm1: Some(3),
            pm2_5: Some(5),
            pm10: Some(6),
            proximity: Some(20),
            device: DeviceIdentity::new("00000000abcd1234"),
        };
        sink.emit(&reading, Instant::from_millis(0)).unwrap();

        assert_eq!(
            lines(sink),
            [
                r#"{"temperature":8,"pressure":101320,"humidity":45,"oxidised":12,"reduced":410,"nh3":88,"lux":1,"pm1":3,"pm25":5,"pm10":6,"serial":"00000000abcd1234"}"#
            ]
        );
    }

    #[test]
    fn test_notice_writes_info_line() {
        let mut sink = JsonLineSink::new(Vec::new());
        sink.notice("no PMS sensor connected").unwrap();
        assert_eq!(lines(sink), [r#"{"info":"no PMS sensor connected"}"#]);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_maps_to_output_error() {
        let mut sink = JsonLineSink::new(Broken);
        assert!(matches!(
            sink.notice("hello"),
            Err(OutputError::Write(_))
        ));
    }
}
