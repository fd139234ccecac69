//! Band masking: zeroing spectral bins outside a frequency interval.

use crate::SignalError;
use crate::complex::{Complex, Sample};
use crate::signal::Signal;

/// Zero every bin of `spectrum` outside `[low, high)` hertz, in place.
///
/// Operates on a spectrum (the output of
/// [`spectrum`](crate::ops::spectrum)), not a time signal. Bin boundaries
/// are `round(N * low / fs)` and `round(N * high / fs)`; mirror
/// negative-frequency bins are zeroed symmetrically. The Nyquist bin is
/// always cleared, and DC is cleared whenever the lower bound excludes it.
/// Only `values` is touched — the rate and start time stay as they are.
pub fn bandpass<V: Sample>(
    spectrum: &mut Signal<Complex<V>>,
    low: f64,
    high: f64,
) -> Result<(), SignalError> {
    if low >= high {
        return Err(SignalError::EmptyBand(low, high));
    }
    let n = spectrum.len();
    if n == 0 {
        return Ok(());
    }

    let fs = spectrum.sample_rate;
    let n_min = libm::round(n as f64 * low / fs) as usize;
    let n_max = libm::round(n as f64 * high / fs) as usize;
    let zero = Complex::zero();
    let values = &mut spectrum.values;

    values[n / 2] = zero;
    if n_min != 0 {
        values[0] = zero;
    }
    if n_min >= n / 2 {
        return Ok(());
    }

    for v in &mut values[..n_min] {
        *v = zero;
    }
    if n_min > 0 {
        for v in &mut values[(n - n_min + 1)..] {
            *v = zero;
        }
    }
    if n_max < n / 2 {
        let hi_end = (n - n_max + 1).min(n);
        for v in &mut values[n_max..hi_end] {
            *v = zero;
        }
    }
    Ok(())
}
