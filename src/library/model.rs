use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Codec family and sample rate. Every input of a mix must share one
/// profile for the stream copy to splice cleanly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingProfile {
    pub codec: String,
    pub sample_rate: u32,
}

impl fmt::Display for EncodingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} Hz", self.codec, self.sample_rate)
    }
}

/// One playlist item on disk, validated and probed. Immutable once built.
#[derive(Clone, Debug)]
pub struct Track {
    /// Canonical 1-based position, parsed from the numbered filename prefix.
    pub seq: u32,
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub duration: Duration,
    pub profile: EncodingProfile,
}

/// Ordered, non-empty set of tracks. Insertion order is the canonical
/// playlist order; `seq` values are unique and contiguous from 1.
#[derive(Debug)]
pub struct TrackList {
    tracks: Vec<Track>,
}

impl TrackList {
    /// Invariants (non-empty, contiguous `seq`) are the loader's
    /// responsibility; see `scan::load_tracks`.
    pub(crate) fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn total_duration(&self) -> Duration {
        self.tracks.iter().map(|t| t.duration).sum()
    }
}
