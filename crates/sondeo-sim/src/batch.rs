//! Parallel correlation of independent capture slices.
//!
//! Each capture group is an independent shot, so the batch is
//! embarrassingly parallel: one worker per slice, results appended to a
//! shared list under a single mutex, everything joined before returning.
//! Workers finish in any order; the results carry their slice index.

use std::sync::Mutex;
use std::thread;

use sondeo_core::{CorrelationMode, Signal, SignalError, correlate};
use tracing::{debug, warn};

/// Correlation output of one capture slice.
#[derive(Debug)]
pub struct SliceResult {
    /// Index of the slice in the input order.
    pub index: usize,
    /// Full cross-correlation against the reference.
    pub correlation: Signal<f64>,
    /// Sample index of the strongest correlation peak.
    pub peak: usize,
}

/// Correlate every capture slice against `reference` on worker threads.
///
/// Slices are raw ADC samples at the reference's sampling rate. Slices
/// that fail to correlate (e.g. empty groups) are logged and skipped; the
/// returned results are sorted back into slice order.
pub fn correlate_slices(
    reference: &Signal<f64>,
    slices: &[Vec<u16>],
    mode: CorrelationMode,
) -> Vec<SliceResult> {
    correlate_slices_with(reference, slices, mode, || {})
}

/// [`correlate_slices`] with a per-slice completion hook (progress
/// reporting); the hook is called from the worker threads.
pub fn correlate_slices_with(
    reference: &Signal<f64>,
    slices: &[Vec<u16>],
    mode: CorrelationMode,
    on_slice: impl Fn() + Sync,
) -> Vec<SliceResult> {
    let results = Mutex::new(Vec::with_capacity(slices.len()));

    thread::scope(|scope| {
        for (index, slice) in slices.iter().enumerate() {
            let results = &results;
            let reference = &reference;
            let on_slice = &on_slice;
            scope.spawn(move || {
                match correlate_slice(reference, slice, mode) {
                    Ok((correlation, peak)) => {
                        debug!(index, peak, "slice correlated");
                        results.lock().expect("no poisoned workers").push(SliceResult {
                            index,
                            correlation,
                            peak,
                        });
                    }
                    Err(error) => warn!(index, %error, "slice skipped"),
                }
                on_slice();
            });
        }
    });

    let mut results = results.into_inner().expect("all workers joined");
    results.sort_by_key(|r| r.index);
    results
}

fn correlate_slice(
    reference: &Signal<f64>,
    slice: &[u16],
    mode: CorrelationMode,
) -> Result<(Signal<f64>, usize), SignalError> {
    let received = Signal::new(
        slice.iter().map(|&s| f64::from(s)).collect(),
        reference.sample_rate,
        0.0,
    );
    let correlation = correlate(reference, &received, mode, 0)?;
    let peak = correlation
        .values
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
        .map_or(0, |(i, _)| i);
    Ok((correlation, peak))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sondeo_core::chirp;

    fn reference(fs: f64) -> Signal<f64> {
        let mut r = Signal::sample(256, fs, 0.0, chirp(5e3, 15e3, 256.0 / fs));
        for v in &mut r.values {
            *v *= 1000.0;
        }
        r
    }

    /// Embed the reference in an ADC-style slice: pedestal at mid-range,
    /// chirp riding on top.
    fn slice_with_delay(reference: &Signal<f64>, delay: usize, total: usize) -> Vec<u16> {
        let mut slice = vec![2048u16; total];
        for (i, &v) in reference.values.iter().enumerate() {
            slice[delay + i] = (v + 2048.0) as u16;
        }
        slice
    }

    #[test]
    fn test_all_slices_processed_in_order() {
        let fs = 1e5;
        let r = reference(fs);
        let slices: Vec<Vec<u16>> = (0..8)
            .map(|i| slice_with_delay(&r, 100 + 50 * i, 2000))
            .collect();

        let results = correlate_slices(&r, &slices, CorrelationMode::NoiseReduction);
        assert_eq!(results.len(), slices.len());
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.index, i, "results must come back in slice order");
            let expected = r.len() - 1 + 100 + 50 * i;
            assert!(
                result.peak.abs_diff(expected) <= 2,
                "slice {i}: peak {} expected {expected}",
                result.peak
            );
        }
    }

    #[test]
    fn test_empty_slice_skipped() {
        let fs = 1e5;
        let r = reference(fs);
        let slices = vec![slice_with_delay(&r, 50, 1000), Vec::new()];

        let results = correlate_slices(&r, &slices, CorrelationMode::Basic);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 0);
    }
}
