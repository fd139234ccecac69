//! Excitation waveform generation.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use sondeo_core::{Db, Signal};
use sondeo_io::save_signal;
use sondeo_sim::add_noise_measured;

use crate::config::ExperimentConfig;

#[derive(Args)]
pub struct GenerateArgs {
    /// Output text file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Experiment config (defaults to the reference rig's values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Inject measurement noise at this SNR in dB
    #[arg(long)]
    noise_db: Option<f64>,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let config = ExperimentConfig::load(args.config.as_deref())?;
    let mut excitation: Signal<f64> = super::excitation(&config);

    if let Some(snr) = args.noise_db {
        add_noise_measured(&mut excitation, Db(snr), &mut rand::thread_rng());
    }

    save_signal(&args.output, &excitation)?;
    info!(
        output = %args.output.display(),
        samples = excitation.len(),
        f0 = config.chirp.start_hz,
        f1 = config.chirp.end_hz,
        "excitation written"
    );
    println!(
        "wrote {} samples ({} kHz .. {} kHz over {} ms) to {}",
        excitation.len(),
        config.chirp.start_hz / 1e3,
        config.chirp.end_hz / 1e3,
        config.chirp.duration * 1e3,
        args.output.display()
    );
    Ok(())
}
