//! Full ranging-chain simulation.
//!
//! Mirrors the bench experiment: excite, pass through the transceiver,
//! delay by the configured distance, bury in noise, resample into the
//! embedded receiver's rate and precision, correlate and read the distance
//! back off the peak.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use sondeo_core::{
    CorrelationMode, Db, Signal, add, convolve, correlate, resample, sigma_for_snr,
};
use sondeo_io::{ScriptBuilder, load_signal, save_signal};
use sondeo_sim::{add_noise, delay_for_distance, speed_of_sound};

use crate::config::ExperimentConfig;

#[derive(Args)]
pub struct SimulateArgs {
    /// Output directory for the run's data files
    #[arg(value_name = "OUTDIR")]
    outdir: PathBuf,

    /// Experiment config (defaults to the reference rig's values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Measured transceiver impulse response (text); synthesized if absent
    #[arg(long)]
    transceiver: Option<PathBuf>,

    /// Correlation weighting
    #[arg(long, value_enum, default_value_t = Mode::NoiseReduction)]
    mode: Mode,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Mode {
    Basic,
    Phat,
    NoiseReduction,
}

impl From<Mode> for CorrelationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Basic => CorrelationMode::Basic,
            Mode::Phat => CorrelationMode::Phat,
            Mode::NoiseReduction => CorrelationMode::NoiseReduction,
        }
    }
}

pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let config = ExperimentConfig::load(args.config.as_deref())?;
    let mut script = ScriptBuilder::new(&args.outdir)?;
    let mut rng = rand::thread_rng();

    // Source and channel.
    let excitation = super::excitation(&config);
    let channel = match &args.transceiver {
        Some(path) => load_signal(path, config.sample_rate, 0.0)
            .with_context(|| format!("loading transceiver {}", path.display()))?,
        None => super::synthetic_channel(&config),
    };
    let reference = convolve(&channel, &excitation, 0)?;
    save_signal(script.file("excitation"), &excitation)?;
    save_signal(script.file("reference"), &reference)?;

    // Propagation: the echo arrives after the configured flight time.
    let delay = delay_for_distance(config.scene.distance, config.scene.temperature);
    let echo = Signal::new(reference.values.clone(), config.sample_rate, delay);
    let mut received = add(
        &Signal::zeros(config.scene.capture_len, config.sample_rate, 0.0),
        &echo,
    )?;
    add_noise(
        &mut received,
        sigma_for_snr(&echo, Db(config.scene.snr_db)),
        &mut rng,
    );
    save_signal(script.file("received"), &received)?;

    // Embedded receiver: lower rate, then 12-bit fixed point.
    let sampled = resample(&received, config.receiver.sample_rate, config.receiver.times)?;
    let reference_rx = resample(&reference, config.receiver.sample_rate, config.receiver.times)?;
    let peak_abs = sampled
        .values
        .iter()
        .fold(0.0f64, |acc, &v| acc.max(v.abs()))
        .max(1e-12);
    let quantize = |signal: &Signal<f64>| -> Signal<i64> {
        let mut scaled = signal.clone();
        for v in &mut scaled.values {
            *v = *v / peak_abs * config.receiver.full_scale;
        }
        scaled.cast::<i64>()
    };
    let sampled_q = quantize(&sampled);
    let reference_q = quantize(&reference_rx);

    // Delay recovery, floating and fixed-point.
    let mode = CorrelationMode::from(args.mode);
    let correlation = correlate(&reference_rx, &sampled, mode, 0)?;
    let correlation_q = correlate(&reference_q, &sampled_q, mode, 0)?;
    save_signal(script.file("correlation"), &correlation)?;

    let speed = speed_of_sound(config.scene.temperature);
    let report = |label: &str, lag: f64| {
        println!(
            "{label}: lag {:.3} ms -> {:.3} m (target {:.3} m)",
            lag * 1e3,
            lag * speed,
            config.scene.distance
        );
    };

    let lag = correlation.time_of(peak_index(&correlation.values));
    let lag_q = correlation_q.time_of(peak_index_i64(&correlation_q.values));
    info!(lag, lag_q, delay, "correlation peaks located");
    report("float receiver", lag);
    report("fixed-point receiver", lag_q);

    script.write_script()?;
    println!("data written to {}", args.outdir.display());
    Ok(())
}

fn peak_index(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
        .map_or(0, |(i, _)| i)
}

fn peak_index_i64(values: &[i64]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by_key(|(_, v)| v.abs())
        .map_or(0, |(i, _)| i)
}
