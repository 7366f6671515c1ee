//! Pipeline error taxonomy.
//!
//! Every fatal validation error carries the offending path or sequence
//! number so the CLI can point at the exact file that stopped the run.
//! Per-item download/tag failures are not represented here; they are
//! logged and skipped before the inventory is validated.

use std::path::PathBuf;

use thiserror::Error;

use crate::library::EncodingProfile;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No numbered track files matched in the scanned directory.
    #[error("no numbered track files found in {}", .dir.display())]
    NoTracksFound { dir: PathBuf },

    /// A sequence number in 1..=N is absent, duplicated or unreadable.
    /// Gaps indicate a corrupted earlier download and must stop the run
    /// instead of being silently renumbered away.
    #[error("track {seq} is missing, duplicated or unreadable in {}", .dir.display())]
    MissingTrack { seq: u32, dir: PathBuf },

    /// Duration probing failed for a file, after one retry.
    #[error("failed to probe {}: {reason}", .path.display())]
    ProbeFailed { path: PathBuf, reason: String },

    /// The playback order handed to the concatenation engine was empty.
    #[error("nothing to concatenate: playback order is empty")]
    EmptyOrder,

    /// An input's encoding profile differs from the first track's.
    #[error("{} is encoded as {found}, expected {expected}", .path.display())]
    IncompatibleProfile {
        path: PathBuf,
        expected: EncodingProfile,
        found: EncodingProfile,
    },

    /// The external merge step failed, after one retry.
    #[error("failed to merge tracks into {}: {reason}", .dest.display())]
    MergeFailed { dest: PathBuf, reason: String },

    /// A date-stamped artifact with this name already exists. Every
    /// randomized mix on disk is the only record of that particular
    /// shuffle, so it is never clobbered without an explicit override.
    #[error("{} already exists; pass --force to overwrite it", .path.display())]
    ArtifactExists { path: PathBuf },

    /// Playlist metadata could not be fetched or parsed.
    #[error("failed to fetch playlist metadata: {0}")]
    PlaylistFetch(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
