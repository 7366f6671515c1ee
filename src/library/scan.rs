use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use lofty::{ItemKey, TaggedFileExt};
use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{PipelineError, Result};

use super::model::{Track, TrackList};
use super::probe::MediaProbe;

/// Parse the `"<NN>-<title>"` stem convention: a zero-padded numeric prefix
/// of at least two digits, a `-` separator, then the human-readable title.
/// The two-digit floor keeps ordinary songs like `3-am` out of the
/// inventory.
fn parse_numbered_stem(stem: &str) -> Option<(u32, &str)> {
    let digits = stem.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits < 2 {
        return None;
    }
    let title = stem[digits..].strip_prefix('-')?;
    let seq: u32 = stem[..digits].parse().ok()?;
    if seq == 0 {
        return None;
    }
    Some((seq, title))
}

fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .any(|e| e == ext)
        })
        .unwrap_or(false)
}

/// Discover, validate and probe the numbered track files in `dir`.
///
/// Fails when nothing matches the naming convention, when the numeric
/// prefixes do not form a contiguous 1..=N range (a gap means an earlier
/// download is corrupted; renumbering would silently reorder the playlist),
/// or when any file cannot be opened or probed. Probing gets one
/// parameter-identical retry before the failure is treated as fatal —
/// downstream offset bookkeeping cannot work with approximate durations.
pub fn load_tracks(dir: &Path, extensions: &[String], probe: &dyn MediaProbe) -> Result<TrackList> {
    let mut numbered: BTreeMap<u32, (PathBuf, String)> = BTreeMap::new();
    let mut duplicate: Option<u32> = None;

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, extensions) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some((seq, stem_title)) = parse_numbered_stem(stem) else {
            debug!("ignoring non-inventory file {}", path.display());
            continue;
        };
        if numbered
            .insert(seq, (path.to_path_buf(), stem_title.to_string()))
            .is_some()
        {
            duplicate.get_or_insert(seq);
        }
    }

    if numbered.is_empty() {
        return Err(PipelineError::NoTracksFound {
            dir: dir.to_path_buf(),
        });
    }
    if let Some(seq) = duplicate {
        return Err(PipelineError::MissingTrack {
            seq,
            dir: dir.to_path_buf(),
        });
    }

    // Contiguity: the highest prefix defines the expected range.
    let last = *numbered.keys().next_back().unwrap_or(&0);
    for seq in 1..=last {
        if !numbered.contains_key(&seq) {
            return Err(PipelineError::MissingTrack {
                seq,
                dir: dir.to_path_buf(),
            });
        }
    }

    let mut tracks = Vec::with_capacity(numbered.len());
    for (seq, (path, stem_title)) in numbered {
        if File::open(&path).is_err() {
            return Err(PipelineError::MissingTrack {
                seq,
                dir: dir.to_path_buf(),
            });
        }

        let report = probe.probe(&path).or_else(|err| {
            warn!("probe failed for {} ({err}), retrying once", path.display());
            probe.probe(&path)
        });
        let report = match report {
            Ok(report) => report,
            Err(err) => {
                return Err(PipelineError::ProbeFailed {
                    path,
                    reason: err.to_string(),
                });
            }
        };

        let (title, artist) = read_titles(&path, stem_title);
        tracks.push(Track {
            seq,
            path,
            title,
            artist,
            duration: report.duration,
            profile: report.profile,
        });
    }

    Ok(TrackList::new(tracks))
}

/// Title and artist from the file's tags, falling back to the filename
/// remainder when no usable tag is present.
fn read_titles(path: &Path, stem_title: String) -> (String, Option<String>) {
    let mut title = stem_title;
    let mut artist = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                let v = v.trim();
                if !v.is_empty() {
                    artist = Some(v.to_string());
                }
            }
        }
    }

    (title, artist)
}
