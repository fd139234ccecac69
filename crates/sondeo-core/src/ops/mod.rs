//! Spectral-domain operators over [`Signal`](crate::signal::Signal).
//!
//! Every binary operator requires the two signals to share a sampling rate
//! (after unit conversion at the boundary); a mismatch is reported as
//! [`SignalError::SampleRateMismatch`](crate::SignalError), never coerced.

mod arith;
mod bandpass;
mod cepstrum;
mod convolve;
mod correlate;
mod hilbert;
mod resample;
mod spectrum;

pub use arith::{add, multiply, subtract};
pub use bandpass::bandpass;
pub use cepstrum::rceps;
pub use convolve::convolve;
pub use correlate::{CorrelationMode, correlate};
pub use hilbert::hilbert;
pub use resample::resample;
pub use spectrum::{spectrum, time_domain};

use crate::SignalError;
use crate::signal::Signal;

/// Relative tolerance for treating two sampling rates as equal.
const RATE_EPSILON: f64 = 1e-9;

/// Check that two signals may be combined.
fn check_rates<A, B>(a: &Signal<A>, b: &Signal<B>) -> Result<(), SignalError> {
    let (fa, fb) = (a.sample_rate, b.sample_rate);
    let scale = if fa > fb { fa } else { fb };
    if libm::fabs(fa - fb) > RATE_EPSILON * scale {
        return Err(SignalError::SampleRateMismatch(fa, fb));
    }
    Ok(())
}
