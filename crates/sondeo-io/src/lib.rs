//! Flat-file I/O for the sondeo ranging toolkit.
//!
//! This crate provides:
//!
//! - **Text signals**: [`load_signal`] and [`save_signal`] for
//!   whitespace-separated numeric dumps, the interchange format of the
//!   measurement rigs
//! - **Binary captures**: [`read_capture_groups`] for raw little-endian
//!   16-bit ADC streams, split into per-shot groups at the marker
//!   threshold
//! - **Companion scripts**: [`ScriptBuilder`] collects every file written
//!   during an experiment and emits a load-script for the external
//!   numeric tool

mod capture;
mod script;
mod text;

pub use capture::{CAPTURE_GROUP_LIMIT, CAPTURE_MARKER, read_capture_groups};
pub use script::ScriptBuilder;
pub use text::{load_signal, save_signal};

/// Error types for signal file I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying filesystem error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A token in a text signal file did not parse as a number.
    #[error("invalid sample {token:?} at token {index}")]
    InvalidSample {
        /// The offending token.
        token: String,
        /// Zero-based token position in the file.
        index: usize,
    },

    /// A binary capture had an odd byte count.
    #[error("truncated capture: {0} bytes is not a whole number of samples")]
    TruncatedCapture(u64),
}

/// Result alias for signal file I/O.
pub type Result<T> = std::result::Result<T, Error>;
