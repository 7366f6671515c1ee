use std::path::Path;
use std::time::Duration;

use lofty::{AudioFile, FileType, TaggedFileExt};
use thiserror::Error;

use super::model::EncodingProfile;

/// What a probe learns about one file.
#[derive(Clone, Debug)]
pub struct ProbeReport {
    pub duration: Duration,
    pub profile: EncodingProfile,
}

/// Why a probe failed. The loader attaches the offending path when it
/// converts this into a fatal validation error.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ProbeError(String);

impl ProbeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Media-introspection contract: exact duration and encoding profile for
/// one file. Implementations must behave as a pure function of the path so
/// a retry with unchanged parameters is meaningful.
pub trait MediaProbe {
    fn probe(&self, path: &Path) -> Result<ProbeReport, ProbeError>;
}

/// Production probe backed by lofty's container parsing.
pub struct LoftyProbe;

impl MediaProbe for LoftyProbe {
    fn probe(&self, path: &Path) -> Result<ProbeReport, ProbeError> {
        let tagged = lofty::read_from_path(path).map_err(|e| ProbeError::new(e.to_string()))?;
        let properties = tagged.properties();
        let sample_rate = properties
            .sample_rate()
            .ok_or_else(|| ProbeError::new("stream does not advertise a sample rate"))?;

        Ok(ProbeReport {
            duration: properties.duration(),
            profile: EncodingProfile {
                codec: codec_name(tagged.file_type()).to_string(),
                sample_rate,
            },
        })
    }
}

fn codec_name(file_type: FileType) -> &'static str {
    match file_type {
        FileType::Mpeg => "mp3",
        FileType::Flac => "flac",
        FileType::Vorbis => "ogg",
        FileType::Opus => "opus",
        FileType::Wav => "wav",
        FileType::Mp4 => "m4a",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_names_cover_the_formats_we_download() {
        assert_eq!(codec_name(FileType::Mpeg), "mp3");
        assert_eq!(codec_name(FileType::Flac), "flac");
        assert_eq!(codec_name(FileType::Ape), "unknown");
    }

    #[test]
    fn probing_a_non_audio_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01-fake.mp3");
        std::fs::write(&path, b"not a real mp3").unwrap();
        assert!(LoftyProbe.probe(&path).is_err());
    }
}
