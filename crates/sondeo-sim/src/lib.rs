//! Simulation collaborators for the sondeo ranging toolkit.
//!
//! The transform core is pure computation; this crate owns everything an
//! experiment needs around it:
//!
//! - [`noise`] - Gaussian noise injection at a given sigma or measured SNR
//! - [`propagation`] - speed of sound and distance/delay conversion
//! - [`batch`] - fan-out of one correlation per capture slice onto worker
//!   threads

pub mod batch;
pub mod noise;
pub mod propagation;

pub use batch::{SliceResult, correlate_slices, correlate_slices_with};
pub use noise::{add_noise, add_noise_measured};
pub use propagation::{delay_for_distance, speed_of_sound};
