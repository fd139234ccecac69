//! In-place radix-2 FFT/IFFT over [`Complex`] buffers.
//!
//! The transform is the standard decimation-in-time Cooley-Tukey algorithm:
//! a bit-reversal permutation followed by log2(N) butterfly passes. Buffers
//! must have power-of-two length; callers enlarge them first with
//! [`pad_to_power_of_two`], stating the fill policy explicitly.
//!
//! Two entry points are provided:
//!
//! - the free functions [`fft`] / [`ifft`] compute twiddle factors directly
//!   from cosine/sine — no state, works for every [`Sample`] type including
//!   the fixed-point one;
//! - the [`Fft`] engine owns a quarter-wave twiddle table that is folded by
//!   quadrant symmetry and grown on demand, amortizing the transcendental
//!   calls across repeated transforms. The table only ever grows: the
//!   twiddle angles of a smaller transform are a subset of a larger one's.
//!
//! The forward transform uses `e^{-2 pi i k / N}`; the inverse uses the
//! conjugate twiddles and divides by N.

use alloc::vec::Vec;
use core::f64::consts::PI;

use crate::complex::{Complex, Sample};

/// Transform direction, dispatched at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Time domain to frequency domain.
    Forward,
    /// Frequency domain to time domain (normalized by 1/N).
    Inverse,
}

impl Direction {
    /// Twiddle angle for index `k` of an `n`-point transform.
    fn theta(self, k: usize, n: usize) -> f64 {
        let base = 2.0 * PI * k as f64 / n as f64;
        match self {
            Direction::Forward => -base,
            Direction::Inverse => base,
        }
    }
}

/// Fill policy when enlarging a buffer to a power-of-two length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PadWith {
    /// Append zeros (the default).
    #[default]
    Zero,
    /// Repeat the last sample.
    RepeatLast,
}

/// Round `n` up to the next power of two (`5 -> 8`, `8 -> 8`, `1 -> 1`).
///
/// Zero rounds up to one, the smallest valid transform length.
pub fn ceil_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Enlarge `values` to `ceil_power_of_two(max(len, min_size))` using the
/// given fill policy.
pub fn pad_to_power_of_two<T: Sample>(
    values: &mut Vec<Complex<T>>,
    min_size: usize,
    pad: PadWith,
) {
    let target = ceil_power_of_two(values.len().max(min_size));
    let fill = match pad {
        PadWith::Zero => Complex::zero(),
        PadWith::RepeatLast => values.last().copied().unwrap_or_else(Complex::zero),
    };
    values.resize(target, fill);
}

/// Bit-reversal reordering of `values` (length must be a power of two).
fn permute<T: Sample>(values: &mut [Complex<T>]) {
    let n = values.len();
    let mut j = 0;
    for i in 0..n {
        if i > j {
            values.swap(i, j);
        }
        let mut l = n >> 1;
        loop {
            j ^= l;
            if j >= l {
                break;
            }
            l >>= 1;
        }
    }
}

/// Butterfly passes over a permuted buffer.
///
/// `omega(k, n)` supplies the twiddle `e^{+-2 pi i k / n}`, possibly in
/// fixed-point encoding; the product is descaled before recombination. A
/// zero upper element short-circuits to a copy, which skips the entire
/// multiply for the zero-padded tail of enlarged buffers.
fn butterflies<T: Sample>(
    values: &mut [Complex<T>],
    omega: impl Fn(usize, usize) -> Complex<T>,
) {
    let n = values.len();
    let mut m = 1;
    while m < n {
        let s = n / (2 * m);
        for g in 0..s {
            let base = 2 * g * m;
            for j in 0..m {
                let (a, b) = (base + j, base + j + m);
                if values[b].is_zero() {
                    values[b] = values[a];
                } else {
                    let c = (values[b] * omega(s * j, n)).descale();
                    values[b] = values[a] - c;
                    values[a] = values[a] + c;
                }
            }
        }
        m <<= 1;
    }
}

/// In-place transform with direct twiddle computation.
///
/// # Panics
///
/// Panics if the buffer length is not a power of two.
pub fn transform_in_place<T: Sample>(values: &mut [Complex<T>], direction: Direction) {
    let n = values.len();
    assert!(n.is_power_of_two(), "transform length {n} is not a power of two");

    permute(values);
    butterflies(values, |k, len| Complex::expi(direction.theta(k, len)));

    if direction == Direction::Inverse {
        for z in values.iter_mut() {
            *z = z.div_len(n);
        }
    }
}

/// Forward FFT, in place.
pub fn fft<T: Sample>(values: &mut [Complex<T>]) {
    transform_in_place(values, Direction::Forward);
}

/// Inverse FFT, in place, normalized by 1/N.
pub fn ifft<T: Sample>(values: &mut [Complex<T>]) {
    transform_in_place(values, Direction::Inverse);
}

/// FFT engine with a cached quarter-wave twiddle table.
///
/// The table stores `cos(2 pi k / N)` for `k in [0, N/4]` at the largest
/// size seen so far; other angles fold onto it by quadrant reflection, and
/// smaller transforms index it with a power-of-two stride. The cache is
/// plain owned state — share an engine by `&mut` reference, or give each
/// thread its own.
#[derive(Debug, Default)]
pub struct Fft {
    quarter: Vec<f64>,
    size: usize,
}

impl Fft {
    /// Engine with an empty table (grown on first use).
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine pre-sized for `n`-point transforms.
    pub fn with_size(n: usize) -> Self {
        let mut engine = Self::new();
        engine.ensure(ceil_power_of_two(n));
        engine
    }

    /// Largest transform size the current table covers.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Grow the table to cover `n`-point transforms. Never shrinks.
    pub fn ensure(&mut self, n: usize) {
        debug_assert!(n.is_power_of_two());
        if n > self.size && n >= 4 {
            self.quarter = (0..=n / 4)
                .map(|k| libm::cos(2.0 * PI * k as f64 / n as f64))
                .collect();
            self.size = n;
        }
    }

    /// `cos(2 pi k / size)` by quadrant folding, `k` already reduced mod size.
    fn cos_at(&self, k: usize) -> f64 {
        let q = self.size / 4;
        match k / q {
            0 => self.quarter[k],
            1 => -self.quarter[2 * q - k],
            2 => -self.quarter[k - 2 * q],
            _ => self.quarter[4 * q - k],
        }
    }

    /// Cached twiddle `e^{+-2 pi i k / n}`; falls back to direct
    /// computation for the trivial sizes below the table granularity.
    fn omega<T: Sample>(&self, direction: Direction, k: usize, n: usize) -> Complex<T> {
        if n < 4 {
            return Complex::expi(direction.theta(k, n));
        }
        let stride = self.size / n;
        let k = (k * stride) % self.size;
        let cos = self.cos_at(k);
        let sin = self.cos_at((k + 3 * self.size / 4) % self.size);
        match direction {
            Direction::Forward => Complex::new(T::from_trig(cos), T::from_trig(-sin)),
            Direction::Inverse => Complex::new(T::from_trig(cos), T::from_trig(sin)),
        }
    }

    /// In-place transform served from the cached table.
    ///
    /// # Panics
    ///
    /// Panics if the buffer length is not a power of two.
    pub fn transform<T: Sample>(&mut self, values: &mut [Complex<T>], direction: Direction) {
        let n = values.len();
        assert!(n.is_power_of_two(), "transform length {n} is not a power of two");
        self.ensure(n);

        permute(values);
        butterflies(values, |k, len| self.omega(direction, k, len));

        if direction == Direction::Inverse {
            for z in values.iter_mut() {
                *z = z.div_len(n);
            }
        }
    }

    /// Forward FFT through the cache.
    pub fn forward<T: Sample>(&mut self, values: &mut [Complex<T>]) {
        self.transform(values, Direction::Forward);
    }

    /// Inverse FFT through the cache, normalized by 1/N.
    pub fn inverse<T: Sample>(&mut self, values: &mut [Complex<T>]) {
        self.transform(values, Direction::Inverse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn tone(n: usize, cycles: f64) -> Vec<Complex<f64>> {
        (0..n)
            .map(|i| Complex::from_re(libm::sin(2.0 * PI * cycles * i as f64 / n as f64)))
            .collect()
    }

    #[test]
    fn test_ceil_power_of_two() {
        assert_eq!(ceil_power_of_two(5), 8);
        assert_eq!(ceil_power_of_two(8), 8);
        assert_eq!(ceil_power_of_two(1), 1);
        assert_eq!(ceil_power_of_two(0), 1);
        assert_eq!(ceil_power_of_two(1025), 2048);
    }

    #[test]
    fn test_pad_policies() {
        let mut zeros = vec![Complex::from_re(1.0f64); 5];
        pad_to_power_of_two(&mut zeros, 0, PadWith::Zero);
        assert_eq!(zeros.len(), 8);
        assert!(zeros[7].is_zero());

        let mut tail = vec![Complex::from_re(1.0f64); 5];
        pad_to_power_of_two(&mut tail, 0, PadWith::RepeatLast);
        assert_eq!(tail[7], Complex::from_re(1.0));

        let mut sized = vec![Complex::from_re(1.0f64); 5];
        pad_to_power_of_two(&mut sized, 100, PadWith::Zero);
        assert_eq!(sized.len(), 128);
    }

    #[test]
    fn test_fft_matches_direct_dft() {
        let n = 32;
        let x = tone(n, 3.0);
        let mut y = x.clone();
        fft(&mut y);

        for (k, got) in y.iter().enumerate() {
            let mut expect = Complex::zero();
            for (i, xi) in x.iter().enumerate() {
                expect = expect + *xi * Complex::expi(-2.0 * PI * (k * i) as f64 / n as f64);
            }
            assert!(
                (got.re - expect.re).abs() < 1e-9 && (got.im - expect.im).abs() < 1e-9,
                "bin {k}: got {got:?}, expected {expect:?}"
            );
        }
    }

    #[test]
    fn test_roundtrip() {
        let x = tone(256, 17.0);
        let mut y = x.clone();
        fft(&mut y);
        ifft(&mut y);
        for (a, b) in x.iter().zip(y.iter()) {
            assert!((a.re - b.re).abs() < 1e-10 && (a.im - b.im).abs() < 1e-10);
        }
    }

    #[test]
    fn test_cached_engine_matches_direct() {
        let mut direct = tone(128, 5.0);
        let mut cached = direct.clone();

        let mut engine = Fft::new();
        fft(&mut direct);
        engine.forward(&mut cached);

        for (a, b) in direct.iter().zip(cached.iter()) {
            assert!((a.re - b.re).abs() < 1e-10 && (a.im - b.im).abs() < 1e-10);
        }
    }

    #[test]
    fn test_cache_reuse_after_growth() {
        // Run a large transform first, then a small one served by stride
        // indexing into the same table.
        let mut engine = Fft::new();
        let mut big = tone(512, 9.0);
        engine.forward(&mut big);
        assert_eq!(engine.size(), 512);

        let mut small = tone(16, 2.0);
        let mut reference = small.clone();
        engine.forward(&mut small);
        assert_eq!(engine.size(), 512, "cache must not shrink");
        fft(&mut reference);

        for (a, b) in small.iter().zip(reference.iter()) {
            assert!((a.re - b.re).abs() < 1e-10 && (a.im - b.im).abs() < 1e-10);
        }
    }

    #[test]
    fn test_quantized_roundtrip() {
        // Fixed-point transform of a 12-bit-scale ramp: the round trip must
        // come back within a few integer steps.
        let x: Vec<Complex<i64>> = (0..64)
            .map(|i| Complex::from_re(((i % 16) * 100) as i64))
            .collect();
        let mut y = x.clone();
        fft(&mut y);
        ifft(&mut y);
        for (a, b) in x.iter().zip(y.iter()) {
            assert!(
                (a.re - b.re).abs() <= 16,
                "fixed-point roundtrip drifted: {} vs {}",
                a.re,
                b.re
            );
        }
    }

    #[test]
    fn test_trivial_lengths() {
        let mut one = vec![Complex::from_re(3.0f64)];
        fft(&mut one);
        assert_eq!(one[0], Complex::from_re(3.0));

        let mut two = vec![Complex::from_re(1.0f64), Complex::from_re(2.0)];
        fft(&mut two);
        assert!((two[0].re - 3.0).abs() < 1e-12);
        assert!((two[1].re + 1.0).abs() < 1e-12);
    }
}
