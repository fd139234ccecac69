//! Sondeo Core - spectral transforms for acoustic time-of-flight ranging
//!
//! This crate is the computational core of the toolkit: everything needed
//! to turn an excitation waveform and a received echo into a delay
//! estimate, with no I/O and no randomness.
//!
//! # Building Blocks
//!
//! - [`Signal`] - a sample sequence bound to a sampling rate and start time
//! - [`Complex`] / [`Sample`] - complex algebra over f32, f64 and a
//!   fixed-point i64 for simulating embedded receivers
//! - [`fft`] / [`ifft`] / [`Fft`] - in-place radix-2 transform, with an
//!   optional twiddle-cache engine
//! - [`frft`] - fractional Fourier transform with chirp-matched
//!   compression (`best_order`)
//!
//! # Spectral Operators
//!
//! - [`convolve`] - fast linear convolution
//! - [`correlate`] - cross-correlation with [`CorrelationMode`] weighting
//! - [`resample`] - spectral rate conversion
//! - [`hilbert`] - analytic signal / instantaneous envelope
//! - [`rceps`] - real cepstrum
//! - [`bandpass`] - spectral band masking
//! - [`add`] / [`subtract`] / [`multiply`] - arithmetic aligned by
//!   absolute time
//!
//! # Example
//!
//! ```rust
//! use sondeo_core::{CorrelationMode, Signal, chirp, correlate, convolve};
//!
//! // Reference chirp and a received copy delayed by 100 samples.
//! let fs = 1e6;
//! let reference = Signal::sample(1000, fs, 0.0, chirp(39e3, 61e3, 1e-3));
//! let mut received = Signal::zeros(4096, fs, 0.0);
//! received.values[100..1100].copy_from_slice(&reference.values);
//!
//! let corr = correlate(&reference, &received, CorrelationMode::Basic, 0).unwrap();
//! let peak = corr
//!     .values
//!     .iter()
//!     .enumerate()
//!     .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
//!     .map(|(i, _)| i)
//!     .unwrap();
//! assert_eq!(peak, reference.len() - 1 + 100);
//! # let _ = convolve(&reference, &received, 0);
//! ```
//!
//! # no_std Support
//!
//! The crate is `no_std` compatible (with `alloc`) for running the same
//! correlation pipeline on an embedded receiver. Disable the default `std`
//! feature and use the fixed-point `i64` sample type.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod complex;
pub mod fft;
pub mod frft;
pub mod ops;
pub mod signal;
pub mod stats;

pub use complex::{Complex, Sample, TRIG_SCALE};
pub use fft::{Direction, Fft, PadWith, ceil_power_of_two, fft, ifft, pad_to_power_of_two};
pub use frft::{best_order, frft, frft_with_tolerance};
pub use ops::{
    CorrelationMode, add, bandpass, convolve, correlate, hilbert, multiply, rceps, resample,
    spectrum, subtract, time_domain,
};
pub use signal::{Signal, chirp, sine};
pub use stats::{Db, energy, sigma_for_snr};

/// Failures of the spectral operators.
///
/// These are data-dependent conditions reported to the caller; violations
/// of programming contracts (a non-power-of-two transform buffer) panic at
/// the call site instead.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SignalError {
    /// The two signals have different sampling rates.
    #[error("sampling rates differ: {0} Hz vs {1} Hz")]
    SampleRateMismatch(f64, f64),

    /// The resampling stride rounded to zero; raise `times`.
    #[error("processing factor too small for the target rate")]
    ResampleFactorTooSmall,

    /// The band's lower bound is not below its upper bound.
    #[error("empty frequency band: {0} Hz .. {1} Hz")]
    EmptyBand(f64, f64),

    /// An operation that needs samples received none.
    #[error("signal is empty")]
    EmptySignal,
}
