//! Sampling-rate conversion via spectral zero-stuffing.

use alloc::vec::Vec;

use crate::SignalError;
use crate::complex::{Complex, Sample};
use crate::fft::{PadWith, ceil_power_of_two, fft, ifft, pad_to_power_of_two};
use crate::signal::Signal;

/// Change the sampling rate of a signal.
///
/// `times` trades compute for interpolation accuracy (must be >= 1): the
/// signal is first upsampled by a power-of-two factor derived from `times`,
/// then strided down to the target rate. The effective stride
/// `round(old_rate * factor / new_rate)` must be nonzero, otherwise the
/// requested accuracy is too low for the target rate and
/// [`SignalError::ResampleFactorTooSmall`] is returned.
///
/// Upsampling zero-stuffs the spectrum (padding the signal to a power of
/// two first) and takes the enlarged inverse transform, preserving
/// amplitude; pure downsampling strides directly over the time-domain
/// samples. A signal already at the target rate is returned unchanged —
/// resampling to the same rate is the identity for any `times`.
pub fn resample<V: Sample>(
    signal: &Signal<V>,
    new_rate: f64,
    times: usize,
) -> Result<Signal<V>, SignalError> {
    assert!(times >= 1, "processing factor must be >= 1");

    let old_rate = signal.sample_rate;
    let relative = libm::fabs(old_rate - new_rate);
    if relative <= 1e-9 * if old_rate > new_rate { old_rate } else { new_rate } {
        return Ok(signal.clone());
    }

    let n = signal.len();
    if n == 0 {
        return Ok(Signal::new(Vec::new(), new_rate, signal.start_time));
    }

    // Power-of-two effective factor, so the enlarged spectrum stays radix-2.
    let factor = ceil_power_of_two(n * times) / ceil_power_of_two(n);
    let interval = libm::round(old_rate * factor as f64 / new_rate) as usize;
    if interval == 0 {
        return Err(SignalError::ResampleFactorTooSmall);
    }

    let values = if factor > 1 {
        // Spectral upsample: zero-stuff between the spectrum halves, then
        // stride the enlarged time series down to the target rate.
        let mut spec: Vec<Complex<V>> =
            signal.values.iter().map(|&x| Complex::from_re(x)).collect();
        pad_to_power_of_two(&mut spec, 0, PadWith::Zero);
        let size = spec.len();
        fft(&mut spec);

        let up_len = size * factor;
        spec.resize(up_len, Complex::zero());
        for k in 0..size / 2 {
            spec[up_len - size / 2 + k] = spec[size / 2 + k];
            spec[size / 2 + k] = Complex::zero();
        }
        ifft(&mut spec);

        let count = (up_len + interval - 1)
            .div_euclid(interval)
            .min(n * times / interval);
        // The enlarged inverse transform divides by the new length, which
        // attenuates by `factor`; restore the amplitude while extracting.
        (0..count)
            .map(|j| V::from_f64(spec[j * interval].re.to_f64() * factor as f64))
            .collect()
    } else {
        // Pure downsample: stride directly over the original samples.
        let count = (n + interval - 1).div_euclid(interval);
        (0..count).map(|j| signal.values[j * interval]).collect()
    };

    Ok(Signal::new(values, new_rate, signal.start_time))
}
