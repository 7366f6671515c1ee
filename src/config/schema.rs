use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tracksmith/config.toml` or
/// `~/.config/tracksmith/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TRACKSMITH__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
///
/// Command-line flags override the loaded values per invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub download: DownloadSettings,
    pub library: LibrarySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            download: DownloadSettings::default(),
            library: LibrarySettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadSettings {
    /// Base directory for downloaded playlists.
    pub output_dir: String,
    /// MP3 bitrate in kbps. One of 128, 192, 320.
    pub quality: u32,
    /// Rewrite ID3 tags after download.
    pub update_tags: bool,
    /// Build the combined sequential mix.
    pub concatenate: bool,
    /// Also build the randomized mix variant.
    pub randomize: bool,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            output_dir: "files".to_string(),
            quality: 192,
            update_tags: true,
            concatenate: true,
            randomize: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Extensions the inventory scan accepts (without the dot).
    pub extensions: Vec<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".to_string()],
        }
    }
}
