//! Whitespace-separated text signal files.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use sondeo_core::Signal;
use tracing::debug;

use crate::{Error, Result};

/// Load a signal from a flat text file of whitespace-separated samples.
///
/// The file carries no metadata, so the caller supplies the sampling rate
/// and start time the capture was made with. Any whitespace (spaces, tabs,
/// newlines) separates samples.
pub fn load_signal(
    path: impl AsRef<Path>,
    sample_rate: f64,
    start_time: f64,
) -> Result<Signal<f64>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut values = Vec::new();

    for line in reader.lines() {
        for token in line?.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| Error::InvalidSample {
                token: token.to_owned(),
                index: values.len(),
            })?;
            values.push(value);
        }
    }

    debug!(
        path = %path.as_ref().display(),
        samples = values.len(),
        sample_rate,
        "loaded text signal"
    );
    Ok(Signal::new(values, sample_rate, start_time))
}

/// Save a signal as a flat text file, one sample per line.
pub fn save_signal<V: Display>(path: impl AsRef<Path>, signal: &Signal<V>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    for value in &signal.values {
        writeln!(writer, "{value}")?;
    }
    writer.flush()?;

    debug!(
        path = %path.as_ref().display(),
        samples = signal.len(),
        "saved text signal"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.txt");

        let signal = Signal::new(vec![1.0, -0.5, 0.25, 1e-3], 1e6, 0.0);
        save_signal(&path, &signal).unwrap();
        let back = load_signal(&path, 1e6, 0.0).unwrap();

        assert_eq!(back.values, signal.values);
        assert!((back.sample_rate - 1e6).abs() < 1e-9);
    }

    #[test]
    fn test_loads_any_whitespace_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        std::fs::write(&path, "1 2\t3\n4\n\n5 6").unwrap();

        let signal = load_signal(&path, 100.0, 0.5).unwrap();
        assert_eq!(signal.values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!((signal.start_time - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_bad_token_reported_with_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "1.0 2.0 oops 4.0").unwrap();

        match load_signal(&path, 1.0, 0.0) {
            Err(Error::InvalidSample { token, index }) => {
                assert_eq!(token, "oops");
                assert_eq!(index, 2);
            }
            other => panic!("expected InvalidSample, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_signal("/nonexistent/samples.txt", 1.0, 0.0),
            Err(Error::Io(_))
        ));
    }
}
