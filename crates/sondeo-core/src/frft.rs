//! Fractional Fourier transform.
//!
//! [`frft`] generalizes the FFT to any real order: order 0 is the identity,
//! 1 the (centered, unitary) Fourier transform, 2 time reversal, 3 the
//! inverse transform, and the behavior is periodic mod 4. Non-integer
//! orders interpolate continuously between those domains, which is what
//! makes the transform useful for compressing linear chirps: a chirp that
//! sweeps through time-frequency space becomes a narrow pulse in the
//! fractional domain of matching order (see [`best_order`]).
//!
//! Integer orders are dispatched to exact special cases. General orders are
//! folded into `[0.5, 1.5)` using those same special cases and then
//! computed by the three-chirp decomposition: the signal is interpolated
//! 2x, multiplied by a quadratic-phase chirp, convolved (in the FFT domain)
//! with a second chirp, and multiplied by the first chirp again, with a
//! closed-form amplitude/phase correction.

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::PI;

use crate::complex::Complex;
use crate::fft::{ceil_power_of_two, fft, ifft};

type C = Complex<f64>;

/// Default ULP factor for snapping an order to the integer special cases.
pub const DEFAULT_ORDER_ULPS: f64 = 256.0;

/// Fractional Fourier transform of `signal` at the given `order`.
///
/// Orders within [`DEFAULT_ORDER_ULPS`] machine epsilons of an integer use
/// the exact special case; see [`frft_with_tolerance`] to tune that.
///
/// # Panics
///
/// Panics if the signal length is not a power of two.
pub fn frft(signal: &[C], order: f64) -> Vec<C> {
    frft_with_tolerance(signal, order, DEFAULT_ORDER_ULPS)
}

/// [`frft`] with an explicit ULP factor for the integer-order snap.
pub fn frft_with_tolerance(signal: &[C], order: f64, ulps: f64) -> Vec<C> {
    let n = signal.len();
    assert!(
        n.is_power_of_two(),
        "fractional transform length {n} is not a power of two"
    );

    let mut a = order % 4.0;
    if a < 0.0 {
        a += 4.0;
    }
    let mut f = signal.to_vec();

    // Exact rotations.
    if near_integer(a, 0.0, ulps) || near_integer(a, 4.0, ulps) {
        return f;
    }
    if near_integer(a, 2.0, ulps) {
        f.reverse();
        return f;
    }
    if near_integer(a, 1.0, ulps) {
        centered_fft(&mut f);
        return f;
    }
    if near_integer(a, 3.0, ulps) {
        centered_ifft(&mut f);
        return f;
    }

    // Fold the order into [0.5, 1.5) by peeling off exact rotations.
    if a > 2.0 {
        a -= 2.0;
        f.reverse();
    }
    if a >= 1.5 {
        a -= 1.0;
        centered_fft(&mut f);
    }
    if a < 0.5 {
        a += 1.0;
        centered_ifft(&mut f);
    }

    decompose(&f, a)
}

/// Order maximizing the fractional-domain compression of a chirp spanning
/// `duration` seconds at `sample_rate`, targeting a pulse of
/// `target_duration` seconds and `target_bandwidth` hertz.
///
/// Heuristic, not an exact inverse: `atan2(tl/x, -df*x) / (pi/2)` with
/// `x = sqrt(duration / sample_rate)`.
pub fn best_order(
    duration: f64,
    sample_rate: f64,
    target_duration: f64,
    target_bandwidth: f64,
) -> f64 {
    let x = libm::sqrt(duration / sample_rate);
    libm::atan2(target_duration / x, -target_bandwidth * x) / (PI / 2.0)
}

/// Relative comparison scaled by `ulps` machine epsilons.
fn near_integer(a: f64, b: f64, ulps: f64) -> bool {
    let magnitude = if libm::fabs(a) > libm::fabs(b) {
        libm::fabs(a)
    } else {
        libm::fabs(b)
    };
    libm::fabs(a - b) <= ulps * f64::EPSILON * magnitude.max(1.0)
}

/// Centered unitary DFT: shift, transform, shift, scale by 1/sqrt(N).
fn centered_fft(f: &mut [C]) {
    let n = f.len();
    f.rotate_left(n / 2);
    fft(f);
    f.rotate_left(n / 2);
    let k = 1.0 / libm::sqrt(n as f64);
    for z in f.iter_mut() {
        *z = z.scale(k);
    }
}

/// Centered unitary inverse DFT: shift, inverse transform, shift, scale by
/// sqrt(N) (undoing the 1/N of [`ifft`] down to 1/sqrt(N) overall).
fn centered_ifft(f: &mut [C]) {
    let n = f.len();
    f.rotate_left(n / 2);
    ifft(f);
    f.rotate_left(n / 2);
    let k = libm::sqrt(n as f64);
    for z in f.iter_mut() {
        *z = z.scale(k);
    }
}

/// Three-chirp decomposition for orders strictly inside (0.5, 1.5).
fn decompose(f: &[C], a: f64) -> Vec<C> {
    let n = f.len();
    let alpha = a * PI / 2.0;
    let tan_half = libm::tan(alpha / 2.0);
    let sin_a = libm::sin(alpha);

    // 2x interpolation onto the half-sample grid, embedded in zeros so the
    // chirp convolution below sees the full support. Centered index k runs
    // over [-(2n-2), 2n-2].
    let up = interpolate2(f);
    let len = 4 * n - 3;
    let mut g = vec![C::zero(); len];
    g[(n - 1)..(n - 1 + 2 * n - 1)].copy_from_slice(&up[..(2 * n - 1)]);

    // First chirp multiply: exp(i c1 k^2), c1 = -(pi/4N) tan(alpha/2).
    let c1 = -PI / (4.0 * n as f64) * tan_half;
    let center = (2 * n - 2) as f64;
    for (i, z) in g.iter_mut().enumerate() {
        let k = i as f64 - center;
        *z = *z * C::expi(c1 * k * k);
    }

    // Convolution with the second chirp: exp(i c2 k^2), c2 = (pi/4N)/sin(alpha).
    let c2 = PI / (4.0 * n as f64) / sin_a;
    let kernel_center = (4 * n - 4) as f64;
    let kernel: Vec<C> = (0..(8 * n - 7))
        .map(|i| {
            let k = i as f64 - kernel_center;
            C::expi(c2 * k * k)
        })
        .collect();
    let conv = fft_convolve(&kernel, &g);

    // Central window, amplitude correction 1/(2 sqrt(N sin(alpha))).
    let amp = libm::sqrt(c2 / PI);
    let mut h: Vec<C> = (0..len).map(|i| conv[4 * n - 4 + i].scale(amp)).collect();

    // Second multiply by the same chirp.
    for (i, z) in h.iter_mut().enumerate() {
        let k = i as f64 - center;
        *z = *z * C::expi(c1 * k * k);
    }

    // Decimate the central window back to N samples; the residual phase
    // exp(i (alpha/2 - pi/4)) completes the correction factor.
    let phase = C::expi(alpha / 2.0 - PI / 4.0);
    (0..n).map(|i| h[n - 1 + 2 * i] * phase).collect()
}

/// Sinc-interpolate 2x by spectral zero-stuffing. `out[2i] == f[i]` exactly.
fn interpolate2(f: &[C]) -> Vec<C> {
    let n = f.len();
    if n == 1 {
        return vec![f[0], f[0]];
    }
    let mut spec = f.to_vec();
    fft(&mut spec);

    let mut up = vec![C::zero(); 2 * n];
    up[..n / 2].copy_from_slice(&spec[..n / 2]);
    up[(2 * n - n / 2)..].copy_from_slice(&spec[n / 2..]);
    ifft(&mut up);

    // The length-2N inverse halves the amplitude; restore it.
    for z in up.iter_mut() {
        *z = z.scale(2.0);
    }
    up
}

/// Linear convolution via zero-padded transforms.
fn fft_convolve(x: &[C], y: &[C]) -> Vec<C> {
    let out_len = x.len() + y.len() - 1;
    let size = ceil_power_of_two(out_len);

    let mut a = x.to_vec();
    a.resize(size, C::zero());
    let mut b = y.to_vec();
    b.resize(size, C::zero());

    fft(&mut a);
    fft(&mut b);
    for (p, q) in a.iter_mut().zip(b.iter()) {
        *p = *p * *q;
    }
    ifft(&mut a);
    a.truncate(out_len);
    a
}
