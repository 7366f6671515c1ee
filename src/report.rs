//! Plain-text run report written next to the downloaded files.
//!
//! Unlike the track listings, the report describes one run (it carries the
//! run date and the mix files that run produced), so it is regenerated
//! rather than compared across runs.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;

use crate::library::Track;
use crate::listing::format_hms;

/// One produced mix, for the report's summary section.
#[derive(Debug)]
pub struct MixNote {
    pub label: String,
    pub path: PathBuf,
    pub total: Duration,
}

pub struct ReportInput<'a> {
    pub playlist_title: &'a str,
    pub source_url: &'a str,
    pub date: NaiveDate,
    pub tracks: &'a [Track],
    pub mixes: &'a [MixNote],
}

pub fn write_report(path: &Path, input: &ReportInput<'_>) -> io::Result<()> {
    let bar = "=".repeat(64);
    let total: Duration = input.tracks.iter().map(|t| t.duration).sum();

    let mut out = String::new();
    out.push_str(&format!("{bar}\nPLAYLIST INFO\n{bar}\n\n"));
    out.push_str(&format!("Playlist: {}\n", input.playlist_title));
    out.push_str(&format!("Source: {}\n", input.source_url));
    out.push_str(&format!("Date: {}\n", input.date.format("%Y-%m-%d")));
    out.push_str(&format!("Tracks: {}\n", input.tracks.len()));
    out.push_str(&format!("Total duration: {}\n\n", format_hms(total)));

    for track in input.tracks {
        let artist = track.artist.as_deref().unwrap_or("Unknown");
        out.push_str(&format!(
            "{:02}. {} ({}) [{}]\n",
            track.seq,
            track.title,
            artist,
            format_hms(track.duration)
        ));
    }

    if !input.mixes.is_empty() {
        out.push('\n');
        out.push_str("Mixes:\n");
        for mix in input.mixes {
            let name = mix
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            out.push_str(&format!(
                "  {}: {} [{}]\n",
                mix.label,
                name,
                format_hms(mix.total)
            ));
        }
    }

    std::fs::write(path, out)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::tempdir;

    use crate::library::EncodingProfile;

    use super::*;

    #[test]
    fn report_lists_tracks_and_mixes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("playlist_info.txt");
        let tracks = vec![Track {
            seq: 1,
            path: PathBuf::from("01-One.mp3"),
            title: "One".to_string(),
            artist: Some("Ann".to_string()),
            duration: Duration::from_secs(61),
            profile: EncodingProfile {
                codec: "mp3".to_string(),
                sample_rate: 44_100,
            },
        }];
        let mixes = vec![MixNote {
            label: "sequential".to_string(),
            path: PathBuf::from("/out/Mix_complete.mp3"),
            total: Duration::from_secs(61),
        }];

        write_report(
            &path,
            &ReportInput {
                playlist_title: "My Mix",
                source_url: "https://example.com/playlist",
                date: NaiveDate::parse_from_str("2024-03-01", "%Y-%m-%d").unwrap(),
                tracks: &tracks,
                mixes: &mixes,
            },
        )
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Playlist: My Mix"));
        assert!(text.contains("Date: 2024-03-01"));
        assert!(text.contains("01. One (Ann) [00:01:01]"));
        assert!(text.contains("sequential: Mix_complete.mp3 [00:01:01]"));
    }
}
