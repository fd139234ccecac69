//! Raw binary captures from the acquisition rig.
//!
//! The rig streams unsigned little-endian 16-bit samples. A value above
//! [`CAPTURE_MARKER`] starts a new capture group; the marker offset is
//! subtracted from that first sample. Groups are capped at
//! [`CAPTURE_GROUP_LIMIT`] samples so a missing end marker cannot swallow
//! the rest of the stream.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::{Error, Result};

/// Sample value that delimits successive capture groups.
pub const CAPTURE_MARKER: u16 = 4096;

/// Maximum samples per group; the rest is discarded until the next marker.
pub const CAPTURE_GROUP_LIMIT: usize = 100_000;

/// Read a binary capture file and split it into per-shot sample groups.
///
/// Samples before the first marker are discarded. The marker sample itself
/// opens its group with the marker offset removed.
pub fn read_capture_groups(path: impl AsRef<Path>) -> Result<Vec<Vec<u16>>> {
    let bytes = fs::read(path.as_ref())?;
    if bytes.len() % 2 != 0 {
        return Err(Error::TruncatedCapture(bytes.len() as u64));
    }

    let mut groups: Vec<Vec<u16>> = Vec::new();
    for pair in bytes.chunks_exact(2) {
        let sample = u16::from_le_bytes([pair[0], pair[1]]);
        if sample > CAPTURE_MARKER {
            groups.push(vec![sample - CAPTURE_MARKER]);
        } else if let Some(group) = groups.last_mut()
            && group.len() < CAPTURE_GROUP_LIMIT
        {
            group.push(sample);
        }
    }

    info!(
        path = %path.as_ref().display(),
        groups = groups.len(),
        "parsed capture groups"
    );
    Ok(groups)
}
