//! Conversions between real time signals and complex spectra.

use alloc::vec::Vec;

use crate::complex::{Complex, Sample};
use crate::fft::{PadWith, fft, ifft, pad_to_power_of_two};
use crate::signal::Signal;

/// Spectrum of a real signal, zero-padded to at least `min_size` (pass 0
/// for the natural power-of-two size).
///
/// The rate and start time carry over unchanged so that the spectrum can be
/// masked in place and converted back.
pub fn spectrum<V: Sample>(signal: &Signal<V>, min_size: usize) -> Signal<Complex<V>> {
    let mut buf: Vec<Complex<V>> = signal.values.iter().map(|&x| Complex::from_re(x)).collect();
    pad_to_power_of_two(&mut buf, min_size, PadWith::Zero);
    fft(&mut buf);
    Signal::new(buf, signal.sample_rate, signal.start_time)
}

/// Real time signal of a spectrum (inverse transform, real parts).
///
/// # Panics
///
/// Panics if the spectrum length is not a power of two — spectra produced
/// by [`spectrum`] always are.
pub fn time_domain<V: Sample>(spectrum: &Signal<Complex<V>>) -> Signal<V> {
    let mut buf = spectrum.values.clone();
    ifft(&mut buf);
    Signal::new(
        buf.into_iter().map(|z| z.re).collect(),
        spectrum.sample_rate,
        spectrum.start_time,
    )
}
