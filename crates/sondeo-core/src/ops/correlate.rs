//! Frequency-domain cross-correlation with selectable spectral weighting.
//!
//! Correlating a reference against a delayed copy of itself produces a peak
//! whose index encodes the delay — the delay-estimation primitive of the
//! whole toolkit. The three weightings trade robustness differently:
//! `Basic` is the plain correlation, `Phat` whitens both spectra down to
//! phase (sharp peaks, noise-sensitive), `NoiseReduction` normalizes by the
//! target's magnitude only.

use alloc::vec::Vec;

use super::check_rates;
use crate::SignalError;
use crate::complex::{Complex, Sample};
use crate::fft::{PadWith, ceil_power_of_two, fft, ifft, pad_to_power_of_two};
use crate::signal::Signal;

/// Spectral weighting applied to the cross-spectrum `conj(R) * S`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CorrelationMode {
    /// Plain cross-correlation.
    #[default]
    Basic,
    /// Phase transform: normalize the cross-spectrum to unit magnitude.
    Phat,
    /// Normalize by the magnitude of the target spectrum.
    NoiseReduction,
}

impl CorrelationMode {
    /// Weighted cross-spectrum bin. Both inputs are nonzero; a product that
    /// still underflows to zero magnitude short-circuits to zero rather
    /// than dividing by it.
    fn weigh<V: Sample>(self, r: Complex<V>, s: Complex<V>) -> Complex<V> {
        match self {
            CorrelationMode::Basic => r.conj() * s,
            CorrelationMode::Phat => {
                let p = r.conj() * s;
                let m = p.norm();
                if m == 0.0 {
                    Complex::zero()
                } else {
                    p.map_f64(|x| x / m)
                }
            }
            CorrelationMode::NoiseReduction => {
                let m = s.norm();
                if m == 0.0 {
                    Complex::zero()
                } else {
                    (r.conj() * s).map_f64(|x| x / m)
                }
            }
        }
    }
}

/// Cross-correlation of `signal` against `reference`.
///
/// The result has length `len(reference) + len(signal) - 1`; index `i`
/// holds the correlation at lag `i - (len(reference) - 1)` applied to the
/// target, so a copy of the reference delayed by `d` samples peaks at index
/// `len(reference) - 1 + d`. The transform size is the next power of two
/// above the natural length (and above `size`; pass 0 for the automatic
/// default). A zero bin in either spectrum propagates as zero.
///
/// The result's `start_time` places lag zero at time zero:
/// `signal.start_time - reference.start_time - (len(reference) - 1) / fs`,
/// so `time_of(peak_index)` reads out the estimated delay directly.
///
/// Empty inputs are degenerate for correlation and rejected as
/// [`SignalError::EmptySignal`].
pub fn correlate<V: Sample>(
    reference: &Signal<V>,
    signal: &Signal<V>,
    mode: CorrelationMode,
    size: usize,
) -> Result<Signal<V>, SignalError> {
    check_rates(reference, signal)?;
    if reference.is_empty() || signal.is_empty() {
        return Err(SignalError::EmptySignal);
    }

    let lr = reference.len();
    let ls = signal.len();
    let size = ceil_power_of_two((lr + ls - 1).max(size));

    let mut r: Vec<Complex<V>> = reference.values.iter().map(|&x| Complex::from_re(x)).collect();
    let mut s: Vec<Complex<V>> = signal.values.iter().map(|&x| Complex::from_re(x)).collect();
    pad_to_power_of_two(&mut r, size, PadWith::Zero);
    pad_to_power_of_two(&mut s, size, PadWith::Zero);

    fft(&mut r);
    fft(&mut s);
    for (p, q) in s.iter_mut().zip(r.iter()) {
        if q.is_zero() {
            *p = Complex::zero();
        } else if !p.is_zero() {
            *p = mode.weigh(*q, *p);
        }
    }
    ifft(&mut s);

    // Reassemble: negative lags live at the tail of the circular buffer,
    // non-negative lags at the head.
    let mut values = Vec::with_capacity(lr + ls - 1);
    values.extend(s[(size - lr + 1)..].iter().map(|z| z.re));
    values.extend(s[..ls].iter().map(|z| z.re));

    let fs = reference.sample_rate;
    Ok(Signal::new(
        values,
        fs,
        signal.start_time - reference.start_time - (lr - 1) as f64 / fs,
    ))
}
