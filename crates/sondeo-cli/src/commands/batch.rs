//! Parallel processing of a binary capture file.
//!
//! Loads a raw capture, splits it into per-shot slices, builds the
//! reference from the excitation and the measured transceiver, and runs
//! one correlation per slice on worker threads. Each slice's correlation
//! is dumped alongside a result table of peak positions and derived
//! distances.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use sondeo_core::{CorrelationMode, convolve};
use sondeo_io::{ScriptBuilder, load_signal, read_capture_groups, save_signal};
use sondeo_sim::{correlate_slices_with, speed_of_sound};

use crate::config::ExperimentConfig;

#[derive(Args)]
pub struct BatchArgs {
    /// Raw little-endian 16-bit capture file
    #[arg(value_name = "CAPTURE")]
    capture: PathBuf,

    /// Measured transceiver impulse response (text); synthesized if absent
    #[arg(long)]
    transceiver: Option<PathBuf>,

    /// Output directory for per-slice correlations and the result table
    #[arg(long, default_value = "data")]
    outdir: PathBuf,

    /// Experiment config (defaults to the reference rig's values)
    #[arg(long)]
    config: Option<PathBuf>,
}

pub fn run(args: BatchArgs) -> anyhow::Result<()> {
    let config = ExperimentConfig::load(args.config.as_deref())?;
    let mut script = ScriptBuilder::new(&args.outdir)?;

    let slices = read_capture_groups(&args.capture)
        .with_context(|| format!("reading capture {}", args.capture.display()))?;
    anyhow::ensure!(!slices.is_empty(), "capture holds no slices");
    info!(slices = slices.len(), "capture parsed");

    let excitation = super::excitation(&config);
    let channel = match &args.transceiver {
        Some(path) => load_signal(path, config.sample_rate, 0.0)
            .with_context(|| format!("loading transceiver {}", path.display()))?,
        None => super::synthetic_channel(&config),
    };
    let reference = convolve(&channel, &excitation, 0)?;

    let bar = ProgressBar::new(slices.len() as u64).with_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} slices {elapsed}")
            .expect("static template"),
    );
    let results = correlate_slices_with(&reference, &slices, CorrelationMode::NoiseReduction, || {
        bar.inc(1);
    });
    bar.finish();

    // Lag zero sits at index len(reference) - 1; everything after is
    // flight time.
    let zero_lag = reference.len() - 1;
    let speed = speed_of_sound(config.scene.temperature);

    let mut table = std::fs::File::create(script.file("result"))?;
    for result in &results {
        let flight = result.peak.saturating_sub(zero_lag) as f64 / config.sample_rate;
        writeln!(
            table,
            "{}\t{}\t{:.4}",
            result.index,
            result.peak,
            flight * speed
        )?;
        save_signal(
            script.file(&format!("group{}", result.index)),
            &result.correlation,
        )?;
    }

    script.write_script()?;
    println!(
        "{} of {} slices correlated; results in {}",
        results.len(),
        slices.len(),
        args.outdir.display()
    );
    Ok(())
}
