//! Stream-level concatenation of an ordered set of tracks into one mix.
//!
//! The engine never re-encodes: the merge collaborator copies compressed
//! frames in playback order, so the inputs must share one encoding
//! profile. Offset bookkeeping happens here, next to the merge, so the
//! stamps always describe exactly the file that was written.

mod merge;

pub use merge::{FfmpegMerge, Merge, MergeError};


use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};

use crate::error::{PipelineError, Result};
use crate::library::Track;
use crate::order::PlayOrder;

/// Offsets of one track inside a finished mix.
#[derive(Clone, Debug)]
pub struct Stamp<'a> {
    pub track: &'a Track,
    pub start: Duration,
    pub end: Duration,
}

/// Everything known about a finished mix. Created once per invocation and
/// never mutated afterwards.
#[derive(Debug)]
pub struct MixResult<'a> {
    pub path: PathBuf,
    pub total: Duration,
    pub stamps: Vec<Stamp<'a>>,
}

/// Merge the ordered tracks into `dest` and compute per-track offsets.
///
/// The merge writes to a `.part` scratch name that is renamed into place
/// only on success, so a failed run never leaves a truncated file under
/// the final name. Given the same ordered inputs the output bytes and all
/// offsets are reproducible; nothing here reads the clock.
pub fn concatenate<'a>(
    order: &PlayOrder<'a>,
    merge: &dyn Merge,
    dest: &Path,
) -> Result<MixResult<'a>> {
    if order.is_empty() {
        return Err(PipelineError::EmptyOrder);
    }

    // A stream copy of mismatched codecs or sample rates would produce a
    // file that plays garbage past the first splice point.
    let expected = &order.tracks()[0].profile;
    for track in order.tracks() {
        if &track.profile != expected {
            return Err(PipelineError::IncompatibleProfile {
                path: track.path.clone(),
                expected: expected.clone(),
                found: track.profile.clone(),
            });
        }
    }

    let stamps = stamp_tracks(order.tracks());
    let total = stamps.last().map(|s| s.end).unwrap_or_default();

    let scratch = scratch_path(dest);
    let inputs: Vec<&Path> = order.tracks().iter().map(|t| t.path.as_path()).collect();

    let mut outcome = merge.merge(&inputs, &scratch);
    if let Err(err) = &outcome {
        warn!("merge into {} failed ({err}), retrying once", dest.display());
        outcome = merge.merge(&inputs, &scratch);
    }
    if let Err(err) = outcome {
        let _ = fs::remove_file(&scratch);
        return Err(PipelineError::MergeFailed {
            dest: dest.to_path_buf(),
            reason: err.to_string(),
        });
    }
    fs::rename(&scratch, dest)?;

    info!(
        "wrote {:?} mix {} ({} tracks, {}s)",
        order.mode,
        dest.display(),
        order.len(),
        total.as_secs()
    );

    Ok(MixResult {
        path: dest.to_path_buf(),
        total,
        stamps,
    })
}

/// Cumulative start/end offsets in playback order, starting at zero.
/// `stamps[i].end == stamps[i + 1].start` by construction.
fn stamp_tracks<'a>(tracks: &[&'a Track]) -> Vec<Stamp<'a>> {
    let mut cursor = Duration::ZERO;
    let mut stamps = Vec::with_capacity(tracks.len());
    for &track in tracks {
        let end = cursor + track.duration;
        stamps.push(Stamp {
            track,
            start: cursor,
            end,
        });
        cursor = end;
    }
    stamps
}

/// `mix.mp3` -> `mix.mp3.part`.
fn scratch_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}
