//! Artifact naming and the collision policy for derived mixes.
//!
//! The sequential mix is fully determined by canonical order, so its name
//! is stable and each run overwrites it. A randomized mix is the only
//! record of that particular shuffle: its name carries the run date, and
//! an existing file under that name stops the run unless the caller
//! explicitly overrides.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{PipelineError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixKind {
    Sequential,
    Randomized,
}

impl MixKind {
    /// Variant label used in listing headers and log lines.
    pub fn label(self) -> &'static str {
        match self {
            MixKind::Sequential => "sequential",
            MixKind::Randomized => "randomized",
        }
    }
}

fn stem(kind: MixKind, base: &str, date: NaiveDate) -> String {
    match kind {
        MixKind::Sequential => format!("{base}_complete"),
        MixKind::Randomized => format!("{base}_randomized_{}", date.format("%Y-%m-%d")),
    }
}

/// Resolve the output path for a mix audio file.
pub fn mix_path(
    dir: &Path,
    kind: MixKind,
    base: &str,
    date: NaiveDate,
    overwrite: bool,
) -> Result<PathBuf> {
    check_collision(kind, dir.join(format!("{}.mp3", stem(kind, base, date))), overwrite)
}

/// Resolve the output path for a mix's track listing document.
pub fn listing_path(
    dir: &Path,
    kind: MixKind,
    base: &str,
    date: NaiveDate,
    overwrite: bool,
) -> Result<PathBuf> {
    check_collision(
        kind,
        dir.join(format!("{}_tracklist.txt", stem(kind, base, date))),
        overwrite,
    )
}

fn check_collision(kind: MixKind, path: PathBuf, overwrite: bool) -> Result<PathBuf> {
    if kind == MixKind::Randomized && !overwrite && path.exists() {
        return Err(PipelineError::ArtifactExists { path });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn sequential_name_is_stable_and_undated() {
        let dir = tempdir().unwrap();
        let d = date("2024-03-01");
        let path = mix_path(dir.path(), MixKind::Sequential, "Mix", d, false).unwrap();
        assert_eq!(path, dir.path().join("Mix_complete.mp3"));

        // Overwritten by design: an existing file is not a collision.
        fs::write(&path, b"old").unwrap();
        assert!(mix_path(dir.path(), MixKind::Sequential, "Mix", d, false).is_ok());
    }

    #[test]
    fn randomized_name_carries_the_date() {
        let dir = tempdir().unwrap();
        let path =
            mix_path(dir.path(), MixKind::Randomized, "Mix", date("2024-03-01"), false).unwrap();
        assert_eq!(path, dir.path().join("Mix_randomized_2024-03-01.mp3"));
        let txt =
            listing_path(dir.path(), MixKind::Randomized, "Mix", date("2024-03-01"), false)
                .unwrap();
        assert_eq!(txt, dir.path().join("Mix_randomized_2024-03-01_tracklist.txt"));
    }

    #[test]
    fn same_day_shuffle_collides_without_override() {
        let dir = tempdir().unwrap();
        let d = date("2024-03-01");
        let path = mix_path(dir.path(), MixKind::Randomized, "Mix", d, false).unwrap();
        fs::write(&path, b"yesterday's shuffle").unwrap();

        let err = mix_path(dir.path(), MixKind::Randomized, "Mix", d, false).unwrap_err();
        assert!(matches!(err, PipelineError::ArtifactExists { .. }));

        // Explicit override or a different day both succeed.
        assert!(mix_path(dir.path(), MixKind::Randomized, "Mix", d, true).is_ok());
        let next = mix_path(dir.path(), MixKind::Randomized, "Mix", date("2024-03-02"), false)
            .unwrap();
        assert_ne!(next, path);
    }
}
