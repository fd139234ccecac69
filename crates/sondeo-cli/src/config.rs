//! Experiment configuration.
//!
//! Every knob the reference rigs hard-coded lives here instead, with the
//! rig's values as defaults, so an experiment is reproducible from its
//! config file alone.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Top-level experiment configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Main sampling rate in Hz (transmit side).
    pub sample_rate: f64,
    /// Excitation chirp parameters.
    pub chirp: ChirpConfig,
    /// Propagation scenario.
    pub scene: SceneConfig,
    /// Simulated embedded receiver.
    pub receiver: ReceiverConfig,
}

/// Excitation chirp sweep.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChirpConfig {
    /// Sweep start frequency in Hz.
    pub start_hz: f64,
    /// Sweep end frequency in Hz.
    pub end_hz: f64,
    /// Sweep duration in seconds.
    pub duration: f64,
}

/// Propagation scenario for the simulation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Target distance in meters.
    pub distance: f64,
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    /// SNR of the received echo in dB.
    pub snr_db: f64,
    /// Capture buffer length in samples at the main rate.
    pub capture_len: usize,
}

/// Embedded receiver model: lower rate, fixed-point samples.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReceiverConfig {
    /// Receiver sampling rate in Hz.
    pub sample_rate: f64,
    /// Resampling accuracy factor (cost/precision trade-off).
    pub times: usize,
    /// Full-scale magnitude of the quantized samples (12-bit rig: 1600).
    pub full_scale: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            sample_rate: 1e6,
            chirp: ChirpConfig::default(),
            scene: SceneConfig::default(),
            receiver: ReceiverConfig::default(),
        }
    }
}

impl Default for ChirpConfig {
    fn default() -> Self {
        Self {
            start_hz: 39e3,
            end_hz: 61e3,
            duration: 1e-3,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            distance: 4.0,
            temperature: 20.0,
            snr_db: -5.0,
            capture_len: 30_000,
        }
    }
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            sample_rate: 600e3,
            times: 6,
            full_scale: 1600.0,
        }
    }
}

impl ExperimentConfig {
    /// Load a TOML config, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Number of excitation samples at the main rate.
    pub fn excitation_len(&self) -> usize {
        (self.chirp.duration * self.sample_rate).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_rig() {
        let config = ExperimentConfig::default();
        assert!((config.sample_rate - 1e6).abs() < 1e-9);
        assert_eq!(config.excitation_len(), 1000);
        assert!((config.receiver.full_scale - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: ExperimentConfig = toml::from_str(
            r#"
            [scene]
            distance = 12.5
            snr_db = 0.0
            "#,
        )
        .unwrap();
        assert!((config.scene.distance - 12.5).abs() < 1e-9);
        assert!((config.scene.temperature - 20.0).abs() < 1e-9, "default kept");
        assert!((config.chirp.start_hz - 39e3).abs() < 1e-9, "default kept");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = toml::from_str::<ExperimentConfig>("unknown_knob = 1\n");
        assert!(result.is_err());
    }
}
