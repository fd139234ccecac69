//! Hilbert transform: quadrature generation via spectral phase rotation.

use alloc::vec::Vec;

use crate::complex::{Complex, Sample};
use crate::fft::{PadWith, fft, ifft, pad_to_power_of_two};
use crate::signal::Signal;

/// Analytic signal of a real input.
///
/// The spectrum of the zero-padded input is rotated by -90 degrees on the
/// positive-frequency bins and +90 degrees on the negative-frequency bins
/// (DC and Nyquist untouched); the inverse transform of that is the
/// quadrature component. The result pairs each original sample with its
/// quadrature: `re` is the input itself, `im` the transformed part, so
/// `norm()` of each sample reads out the instantaneous envelope.
pub fn hilbert<V: Sample>(signal: &Signal<V>) -> Signal<Complex<V>> {
    let n = signal.len();
    let mut buf: Vec<Complex<V>> = signal.values.iter().map(|&x| Complex::from_re(x)).collect();
    if n == 0 {
        return Signal::new(buf, signal.sample_rate, signal.start_time);
    }
    pad_to_power_of_two(&mut buf, 0, PadWith::Zero);
    let size = buf.len();

    fft(&mut buf);
    for k in 1..size / 2 {
        let z = buf[k];
        buf[k] = Complex::new(z.im, -z.re);
    }
    for k in (size / 2 + 1)..size {
        let z = buf[k];
        buf[k] = Complex::new(-z.im, z.re);
    }
    ifft(&mut buf);

    let values = signal
        .values
        .iter()
        .zip(buf.iter())
        .map(|(&x, h)| Complex::new(x, h.re))
        .collect();
    Signal::new(values, signal.sample_rate, signal.start_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    #[test]
    fn test_quadrature_of_sine_is_minus_cosine() {
        let fs = 1000.0;
        let n = 512;
        let s = Signal::sample(n, fs, 0.0, |t| libm::sin(2.0 * PI * 50.0 * t));
        let analytic = hilbert(&s);

        // Away from the block edges the quadrature of sin is -cos.
        for i in (n / 4)..(3 * n / 4) {
            let t = i as f64 / fs;
            let z = analytic.values[i];
            assert!((z.re - s.values[i]).abs() < 1e-12, "real part must be the input");
            assert!(
                (z.im + libm::cos(2.0 * PI * 50.0 * t)).abs() < 0.05,
                "sample {i}: quadrature {} vs {}",
                z.im,
                -libm::cos(2.0 * PI * 50.0 * t)
            );
        }
    }

    #[test]
    fn test_envelope_of_tone_is_flat() {
        let fs = 1000.0;
        let n = 512;
        let s = Signal::sample(n, fs, 0.0, |t| libm::sin(2.0 * PI * 40.0 * t));
        let analytic = hilbert(&s);

        for i in (n / 4)..(3 * n / 4) {
            let env = analytic.values[i].norm();
            assert!(
                (env - 1.0).abs() < 0.05,
                "envelope at {i} should be ~1, got {env}"
            );
        }
    }

    #[test]
    fn test_empty_signal() {
        let s = Signal::new(Vec::<f64>::new(), 1.0, 0.0);
        assert!(hilbert(&s).is_empty());
    }
}
