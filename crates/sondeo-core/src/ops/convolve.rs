//! Fast linear convolution through the frequency domain.

use alloc::vec::Vec;

use super::check_rates;
use crate::SignalError;
use crate::complex::{Complex, Sample};
use crate::fft::{PadWith, ceil_power_of_two, fft, ifft, pad_to_power_of_two};
use crate::signal::Signal;

/// Linear convolution of two signals sharing a sampling rate.
///
/// Both inputs are zero-padded to a power of two at least as large as the
/// natural length `len(a) + len(b) - 1` (and at least `size`; pass 0 for
/// the automatic default), transformed, multiplied bin-wise and inverse
/// transformed. The result is truncated to the natural length and starts at
/// `a.start_time + b.start_time` — convolving with an impulse response
/// measured from its own time origin delays the signal accordingly.
///
/// An empty input yields an empty result.
pub fn convolve<V: Sample>(
    a: &Signal<V>,
    b: &Signal<V>,
    size: usize,
) -> Result<Signal<V>, SignalError> {
    check_rates(a, b)?;

    let start_time = a.start_time + b.start_time;
    if a.is_empty() || b.is_empty() {
        return Ok(Signal::new(Vec::new(), a.sample_rate, start_time));
    }

    let natural = a.len() + b.len() - 1;
    let size = ceil_power_of_two(natural.max(size));

    let mut big_a: Vec<Complex<V>> = a.values.iter().map(|&x| Complex::from_re(x)).collect();
    let mut big_b: Vec<Complex<V>> = b.values.iter().map(|&x| Complex::from_re(x)).collect();
    pad_to_power_of_two(&mut big_a, size, PadWith::Zero);
    pad_to_power_of_two(&mut big_b, size, PadWith::Zero);

    fft(&mut big_a);
    fft(&mut big_b);
    for (p, q) in big_a.iter_mut().zip(big_b.iter()) {
        *p = *p * *q;
    }
    ifft(&mut big_a);

    Ok(Signal::new(
        big_a.into_iter().take(natural).map(|z| z.re).collect(),
        a.sample_rate,
        start_time,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_matches_direct_convolution() {
        let a = Signal::new(vec![1.0f64, 2.0, 3.0], 1000.0, 0.0);
        let b = Signal::new(vec![0.0, 1.0, 0.5], 1000.0, 0.0);
        let c = convolve(&a, &b, 0).unwrap();

        let expected = [0.0, 1.0, 2.5, 4.0, 1.5];
        assert_eq!(c.len(), expected.len());
        for (i, (&got, &want)) in c.values.iter().zip(expected.iter()).enumerate() {
            assert!(
                (got - want).abs() < 1e-9,
                "sample {i}: got {got}, expected {want}"
            );
        }
    }

    #[test]
    fn test_brute_force_reference() {
        let a = Signal::new(vec![0.5f64, -1.0, 2.0, 0.25, 1.0], 1.0, 0.0);
        let b = Signal::new(vec![1.0, 0.0, -0.5, 0.75], 1.0, 0.0);
        let c = convolve(&a, &b, 0).unwrap();

        let mut expected = vec![0.0; a.len() + b.len() - 1];
        for (i, &x) in a.values.iter().enumerate() {
            for (j, &y) in b.values.iter().enumerate() {
                expected[i + j] += x * y;
            }
        }
        for (i, (&got, &want)) in c.values.iter().zip(expected.iter()).enumerate() {
            assert!(
                (got - want).abs() < 1e-9,
                "sample {i}: got {got}, expected {want}"
            );
        }
    }

    #[test]
    fn test_start_times_add() {
        let a = Signal::new(vec![1.0], 10.0, 0.5);
        let b = Signal::new(vec![1.0], 10.0, 0.25);
        assert!((convolve(&a, &b, 0).unwrap().start_time - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_rate_mismatch_rejected() {
        let a = Signal::new(vec![1.0], 10.0, 0.0);
        let b = Signal::new(vec![1.0], 20.0, 0.0);
        assert!(matches!(
            convolve(&a, &b, 0),
            Err(SignalError::SampleRateMismatch(_, _))
        ));
    }

    #[test]
    fn test_empty_input_propagates() {
        let a = Signal::new(Vec::<f64>::new(), 10.0, 0.0);
        let b = Signal::new(vec![1.0, 2.0], 10.0, 0.0);
        assert!(convolve(&a, &b, 0).unwrap().is_empty());
    }
}
