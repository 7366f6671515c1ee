//! Playlist download via yt-dlp.
//!
//! Everything here is deliberately lenient: an item that fails to download
//! or convert is logged and skipped, and sequence numbers come from a
//! success counter, so the files on disk always form a contiguous 1..N
//! range by the time the strict inventory loader sees them.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::{info, warn};
use serde::Deserialize;

use crate::error::{PipelineError, Result};
use crate::util::{format_track_number, sanitize_filename};

/// Playlist metadata as reported by `yt-dlp --dump-single-json`.
#[derive(Debug, Deserialize)]
pub struct PlaylistInfo {
    pub title: String,
    /// Delisted or private items show up as explicit nulls.
    #[serde(default)]
    pub entries: Vec<Option<PlaylistEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistEntry {
    pub id: String,
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub channel: Option<String>,
    pub webpage_url: Option<String>,
    pub url: Option<String>,
}

impl PlaylistEntry {
    pub fn video_url(&self) -> String {
        self.webpage_url
            .clone()
            .or_else(|| self.url.clone())
            .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", self.id))
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }

    pub fn artist(&self) -> &str {
        self.uploader
            .as_deref()
            .or(self.channel.as_deref())
            .unwrap_or("Unknown")
    }
}

/// One successfully downloaded and converted item.
#[derive(Debug)]
pub struct DownloadedTrack {
    pub path: PathBuf,
    pub seq: u32,
    pub title: String,
    pub artist: String,
    pub url: String,
}

/// Fetch playlist metadata without downloading anything.
pub fn fetch_playlist(url: &str) -> Result<PlaylistInfo> {
    info!("fetching playlist metadata for {url}");
    let output = Command::new("yt-dlp")
        .args(["--dump-single-json", "--no-warnings"])
        .arg(url)
        .output()
        .map_err(|e| PipelineError::PlaylistFetch(format!("failed to run yt-dlp: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.lines().last().unwrap_or("no output").to_string();
        return Err(PipelineError::PlaylistFetch(format!(
            "yt-dlp exited with {}: {detail}",
            output.status
        )));
    }

    serde_json::from_slice(&output.stdout)
        .map_err(|e| PipelineError::PlaylistFetch(format!("unexpected yt-dlp output: {e}")))
}

/// Download one entry as `"<NN>-<title>.mp3"` into `dir`. Returns `None`
/// on failure so the caller can skip and continue.
pub fn download_entry(
    entry: &PlaylistEntry,
    dir: &Path,
    seq: u32,
    width: usize,
    quality: u32,
) -> Option<DownloadedTrack> {
    let title = entry.display_title();
    let number = format_track_number(seq, width);
    let safe_title = sanitize_filename(title, 80);
    let dest = dir.join(format!("{number}-{safe_title}.mp3"));
    let template = dir.join(format!("{number}-{safe_title}.%(ext)s"));
    let url = entry.video_url();

    info!("downloading {seq}: {title}");
    let status = Command::new("yt-dlp")
        .args([
            "--format",
            "bestaudio/best",
            "--extract-audio",
            "--audio-format",
            "mp3",
            "--audio-quality",
        ])
        .arg(format!("{quality}K"))
        .args(["--embed-metadata", "--embed-thumbnail", "--no-warnings", "--output"])
        .arg(&template)
        .arg(&url)
        .status();

    match status {
        Ok(code) if code.success() && dest.is_file() => Some(DownloadedTrack {
            path: dest,
            seq,
            title: title.to_string(),
            artist: entry.artist().to_string(),
            url,
        }),
        Ok(code) => {
            warn!("skipping '{title}': yt-dlp exited with {code}");
            None
        }
        Err(err) => {
            warn!("skipping '{title}': failed to run yt-dlp: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_json_parses_with_null_entries() {
        let json = r#"{
            "title": "My Mix",
            "entries": [
                {"id": "abc", "title": "One", "uploader": "Ann", "duration": 61.4,
                 "webpage_url": "https://example.com/v/abc"},
                null,
                {"id": "def", "channel": "Bob's Channel"}
            ]
        }"#;
        let info: PlaylistInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.title, "My Mix");
        assert_eq!(info.entries.len(), 3);
        assert!(info.entries[1].is_none());

        let first = info.entries[0].as_ref().unwrap();
        assert_eq!(first.display_title(), "One");
        assert_eq!(first.artist(), "Ann");
        assert_eq!(first.video_url(), "https://example.com/v/abc");

        let last = info.entries[2].as_ref().unwrap();
        assert_eq!(last.display_title(), "Unknown");
        assert_eq!(last.artist(), "Bob's Channel");
        assert_eq!(last.video_url(), "https://www.youtube.com/watch?v=def");
    }

    #[test]
    fn entries_default_to_empty_when_absent() {
        let info: PlaylistInfo = serde_json::from_str(r#"{"title": "Solo"}"#).unwrap();
        assert!(info.entries.is_empty());
    }
}
