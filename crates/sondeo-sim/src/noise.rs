//! Gaussian white-noise injection.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use sondeo_core::{Db, Signal, sigma_for_snr};

/// Add i.i.d. Gaussian noise with standard deviation `sigma` to every
/// sample, drawing from `rng`.
///
/// A zero (or non-positive, or NaN) sigma leaves the signal untouched.
pub fn add_noise<R: Rng>(signal: &mut Signal<f64>, sigma: f64, rng: &mut R) {
    if sigma <= 0.0 || sigma.is_nan() {
        return;
    }
    let normal = Normal::new(0.0, sigma).expect("sigma is positive and finite");
    for value in &mut signal.values {
        *value += normal.sample(rng);
    }
}

/// Add Gaussian noise scaled so the signal's own energy sits `snr` above
/// the noise floor.
pub fn add_noise_measured<R: Rng>(signal: &mut Signal<f64>, snr: Db, rng: &mut R) {
    let sigma = sigma_for_snr(signal, snr);
    add_noise(signal, sigma, rng);
}
