//! Complex arithmetic over the sample scalar types used by the transforms.
//!
//! The spectral engine works on [`Complex<T>`] where `T` implements
//! [`Sample`]. Floating-point samples behave exactly as expected; the `i64`
//! implementation is a fixed-point variant for simulating embedded
//! receivers: unit-magnitude trigonometric values (twiddle factors, chirp
//! phases) are pre-scaled by [`TRIG_SCALE`] and the factor is divided back
//! out after each product, so butterflies stay in integer arithmetic
//! without losing the fractional twiddles.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// Fixed-point scale applied to unit-magnitude trigonometric values for
/// integer samples.
///
/// `1 << 20` keeps quantization error below the LSB of a 12-bit capture
/// while leaving about 43 bits of headroom for sample-times-twiddle
/// products and butterfly accumulation in an `i64`.
pub const TRIG_SCALE: i64 = 1 << 20;

/// Scalar sample type usable in the spectral transforms.
///
/// Implemented for `f32`, `f64` and (fixed-point) `i64`.
pub trait Sample:
    Copy
    + PartialEq
    + Default
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Encode a unit-magnitude trigonometric value as a twiddle component.
    fn from_trig(value: f64) -> Self;

    /// Undo the twiddle encoding after a product.
    ///
    /// Identity for floating-point samples; divides [`TRIG_SCALE`] back out
    /// for integer samples.
    fn descale(self) -> Self;

    /// Lossy conversion from `f64` (rounds for integer samples).
    fn from_f64(value: f64) -> Self;

    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// Divide by a buffer length (inverse-transform normalization).
    fn div_len(self, n: usize) -> Self;
}

impl Sample for f32 {
    fn from_trig(value: f64) -> Self {
        value as f32
    }

    fn descale(self) -> Self {
        self
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn div_len(self, n: usize) -> Self {
        self / n as f32
    }
}

impl Sample for f64 {
    fn from_trig(value: f64) -> Self {
        value
    }

    fn descale(self) -> Self {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn div_len(self, n: usize) -> Self {
        self / n as f64
    }
}

impl Sample for i64 {
    fn from_trig(value: f64) -> Self {
        libm::round(value * TRIG_SCALE as f64) as i64
    }

    fn descale(self) -> Self {
        self / TRIG_SCALE
    }

    fn from_f64(value: f64) -> Self {
        libm::round(value) as i64
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn div_len(self, n: usize) -> Self {
        self / n as i64
    }
}

/// A complex number over a [`Sample`] scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex<T> {
    /// Real part.
    pub re: T,
    /// Imaginary part.
    pub im: T,
}

impl<T: Sample> Complex<T> {
    /// Build a complex value from its parts.
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }

    /// Additive identity.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Embed a real sample as `re + 0i`.
    pub fn from_re(re: T) -> Self {
        Self {
            re,
            im: T::default(),
        }
    }

    /// True when both parts are exactly zero.
    pub fn is_zero(self) -> bool {
        self.re == T::default() && self.im == T::default()
    }

    /// Complex conjugate.
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Magnitude, computed in `f64`.
    pub fn norm(self) -> f64 {
        libm::hypot(self.re.to_f64(), self.im.to_f64())
    }

    /// Phase angle in radians, computed in `f64`.
    pub fn arg(self) -> f64 {
        libm::atan2(self.im.to_f64(), self.re.to_f64())
    }

    /// Unit exponential `e^{i theta}`.
    ///
    /// For integer samples the components come back pre-scaled by
    /// [`TRIG_SCALE`], i.e. ready to be used as twiddle factors.
    pub fn expi(theta: f64) -> Self {
        Self {
            re: T::from_trig(libm::cos(theta)),
            im: T::from_trig(libm::sin(theta)),
        }
    }

    /// Apply [`Sample::descale`] to both parts (after a twiddle product).
    pub fn descale(self) -> Self {
        Self {
            re: self.re.descale(),
            im: self.im.descale(),
        }
    }

    /// Divide both parts by a buffer length.
    pub fn div_len(self, n: usize) -> Self {
        Self {
            re: self.re.div_len(n),
            im: self.im.div_len(n),
        }
    }

    /// Scale both parts by an `f64` factor.
    pub fn scale(self, k: f64) -> Self {
        self.map_f64(|x| x * k)
    }

    /// Map both parts through an `f64` function.
    pub fn map_f64(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            re: T::from_f64(f(self.re.to_f64())),
            im: T::from_f64(f(self.im.to_f64())),
        }
    }
}

impl<T: Sample> Add for Complex<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl<T: Sample> Sub for Complex<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl<T: Sample> Neg for Complex<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Sample> Mul for Complex<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl<T: Sample> Div for Complex<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let k = rhs.re * rhs.re + rhs.im * rhs.im;
        Self {
            re: (self.re * rhs.re + self.im * rhs.im) / k,
            im: (self.im * rhs.re - self.re * rhs.im) / k,
        }
    }
}
