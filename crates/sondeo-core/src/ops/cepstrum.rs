//! Real cepstrum: the inverse transform of the log-magnitude spectrum.

use alloc::vec::Vec;

use crate::complex::{Complex, Sample};
use crate::fft::{PadWith, fft, ifft, pad_to_power_of_two};
use crate::signal::Signal;

/// Real cepstrum of a signal: `IFFT(log |FFT(x)|)`.
///
/// The input is zero-padded to a power of two, and the result keeps the
/// padded length (cepstral echo-detection scans the tail beyond the input
/// length). Zero-magnitude bins are left at zero instead of taking the
/// logarithm, so a sparse spectrum never poisons the output with
/// infinities. Log-magnitude values are inherently floating, so the output
/// sample type is `f64` regardless of the input's.
pub fn rceps<V: Sample>(signal: &Signal<V>) -> Signal<f64> {
    let mut buf: Vec<Complex<f64>> = signal
        .values
        .iter()
        .map(|&x| Complex::from_re(x.to_f64()))
        .collect();
    if buf.is_empty() {
        return Signal::new(Vec::new(), signal.sample_rate, signal.start_time);
    }
    pad_to_power_of_two(&mut buf, 0, PadWith::Zero);

    fft(&mut buf);
    for z in buf.iter_mut() {
        let m = z.norm();
        *z = Complex::from_re(if m == 0.0 { 0.0 } else { libm::log(m) });
    }
    ifft(&mut buf);

    Signal::new(
        buf.into_iter().map(|z| z.re).collect(),
        signal.sample_rate,
        signal.start_time,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_impulse_has_flat_spectrum() {
        // A unit impulse has |X| = 1 everywhere: log is 0, so the cepstrum
        // is identically zero.
        let mut values = vec![0.0; 64];
        values[0] = 1.0;
        let c = rceps(&Signal::new(values, 1000.0, 0.0));
        for (i, &v) in c.values.iter().enumerate() {
            assert!(v.abs() < 1e-12, "cepstrum of impulse must vanish, index {i}: {v}");
        }
    }

    #[test]
    fn test_echo_appears_at_echo_lag() {
        // x[n] = d[n] + 0.5 d[n - 32]: the cepstrum shows a spike at the
        // echo lag (the classical echo-detection property).
        let mut values = vec![0.0; 256];
        values[0] = 1.0;
        values[32] = 0.5;
        let c = rceps(&Signal::new(values, 1000.0, 0.0));

        let at_echo = c.values[32].abs();
        let background: f64 = c.values[1..32].iter().map(|v| v.abs()).fold(0.0, f64::max);
        assert!(
            at_echo > 2.0 * background,
            "echo spike {at_echo} not above background {background}"
        );
    }

    #[test]
    fn test_zero_signal_stays_zero() {
        let c = rceps(&Signal::<f64>::zeros(32, 1.0, 0.0));
        assert!(c.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_output_keeps_padded_length() {
        let c = rceps(&Signal::new(vec![1.0; 5], 1.0, 0.0));
        assert_eq!(c.len(), 8);
    }
}
