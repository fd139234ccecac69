//! CLI subcommands.

pub mod batch;
pub mod generate;
pub mod simulate;

use sondeo_core::{Signal, chirp};

use crate::config::ExperimentConfig;

/// Excitation chirp at the main sampling rate.
pub fn excitation(config: &ExperimentConfig) -> Signal<f64> {
    Signal::sample(
        config.excitation_len(),
        config.sample_rate,
        0.0,
        chirp(config.chirp.start_hz, config.chirp.end_hz, config.chirp.duration),
    )
}

/// Synthetic transceiver impulse response used when no measured one is
/// supplied: a decaying resonance at the middle of the sweep band.
pub fn synthetic_channel(config: &ExperimentConfig) -> Signal<f64> {
    let resonance = (config.chirp.start_hz + config.chirp.end_hz) / 2.0;
    Signal::sample(2048, config.sample_rate, 0.0, move |t| {
        (-t * 8000.0).exp() * (2.0 * std::f64::consts::PI * resonance * t).sin()
    })
}
