use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use log::debug;
use thiserror::Error;

/// Failure reported by a [`Merge`] implementation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct MergeError(String);

impl MergeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// External merge collaborator: splice `inputs`, in order, into `dest`,
/// preserving the input encoding profile.
pub trait Merge {
    fn merge(&self, inputs: &[&Path], dest: &Path) -> Result<(), MergeError>;
}

/// ffmpeg's concat demuxer with stream copy (`-c copy`). Compressed frames
/// are copied verbatim, so splice points keep their encoder frame
/// boundaries and nothing is re-encoded.
pub struct FfmpegMerge;

impl FfmpegMerge {
    /// Concat-demuxer input list: one `file '<path>'` line per input,
    /// absolute paths, single quotes escaped as `'\''`.
    fn write_concat_list(inputs: &[&Path], list_path: &Path) -> io::Result<()> {
        let mut lines = String::new();
        for input in inputs {
            let absolute = fs::canonicalize(input)?;
            let escaped = absolute.display().to_string().replace('\'', "'\\''");
            lines.push_str("file '");
            lines.push_str(&escaped);
            lines.push_str("'\n");
        }
        fs::write(list_path, lines)
    }
}

impl Merge for FfmpegMerge {
    fn merge(&self, inputs: &[&Path], dest: &Path) -> Result<(), MergeError> {
        let list_path = dest
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("concat_list.txt");
        Self::write_concat_list(inputs, &list_path)
            .map_err(|e| MergeError::new(format!("failed to write concat list: {e}")))?;

        debug!(
            "merging {} inputs into {} via ffmpeg",
            inputs.len(),
            dest.display()
        );
        let output = Command::new("ffmpeg")
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(&list_path)
            .args(["-c", "copy", "-y"])
            .arg(dest)
            .output();
        let _ = fs::remove_file(&list_path);

        let output =
            output.map_err(|e| MergeError::new(format!("failed to run ffmpeg: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.lines().last().unwrap_or("no output").to_string();
            return Err(MergeError::new(format!(
                "ffmpeg exited with {}: {detail}",
                output.status
            )));
        }
        Ok(())
    }
}
