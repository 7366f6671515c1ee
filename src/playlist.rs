//! `.m3u` playlist generation.

use std::io;
use std::path::Path;

use crate::library::Track;

/// Write an extended m3u playlist next to the tracks. Entries use bare
/// filenames so the playlist keeps working when the directory moves.
pub fn write_m3u(path: &Path, tracks: &[Track]) -> io::Result<()> {
    let mut lines = String::from("#EXTM3U\n");
    for track in tracks {
        let display = match &track.artist {
            Some(artist) => format!("{artist} - {}", track.title),
            None => track.title.clone(),
        };
        lines.push_str(&format!("#EXTINF:{},{display}\n", track.duration.as_secs()));
        let name = track
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        lines.push_str(name);
        lines.push('\n');
    }
    std::fs::write(path, lines)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use tempfile::tempdir;

    use crate::library::EncodingProfile;

    use super::*;

    fn track(seq: u32, title: &str, artist: Option<&str>, secs: u64) -> Track {
        Track {
            seq,
            path: PathBuf::from(format!("/music/{seq:02}-{title}.mp3")),
            title: title.to_string(),
            artist: artist.map(str::to_string),
            duration: Duration::from_secs(secs),
            profile: EncodingProfile {
                codec: "mp3".to_string(),
                sample_rate: 44_100,
            },
        }
    }

    #[test]
    fn m3u_has_header_extinf_and_bare_filenames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("playlist.m3u");
        let tracks = vec![
            track(1, "One", Some("Ann"), 61),
            track(2, "Two", None, 30),
        ];

        write_m3u(&path, &tracks).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        assert_eq!(
            text,
            "#EXTM3U\n\
             #EXTINF:61,Ann - One\n\
             01-One.mp3\n\
             #EXTINF:30,Two\n\
             02-Two.mp3\n"
        );
    }
}
