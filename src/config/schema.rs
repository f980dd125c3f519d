use std::path::PathBuf;

use clap::ValueEnum;
use serde::Deserialize;

use crate::split::{MAX_TRACKS, MIN_TRACKS};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mp3split/config.toml` or `~/.config/mp3split/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags
/// 2) Environment variables (prefix `MP3SPLIT__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tools: ToolSettings,
    pub probe: ProbeSettings,
    pub split: SplitSettings,
    pub extract: ExtractSettings,
    pub output: OutputSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Prober binary, a bare name looked up on `PATH` or a full path.
    pub ffprobe: String,
    /// Transcoder binary, a bare name looked up on `PATH` or a full path.
    pub ffmpeg: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffprobe: "ffprobe".to_string(),
            ffmpeg: "ffmpeg".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub backend: ProbeBackend,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeBackend {
    /// Run the external prober.
    #[default]
    Ffprobe,
    /// Read stream properties in-process.
    #[serde(alias = "native", alias = "in-process")]
    Lofty,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    /// Tracks per file when neither the command line nor a manifest says otherwise.
    pub default_tracks: u32,
    /// Optional cap on the number of input files per run.
    pub max_files: Option<usize>,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            default_tracks: 10,
            max_files: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtractSettings {
    /// Read every written track back and check its tags.
    pub verify_tags: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory the archive is written to.
    pub directory: PathBuf,
    /// File name of the archive.
    pub archive_name: String,
    /// Replace an existing archive of the same name.
    pub overwrite: bool,
    /// Where the run's scratch directory is created. Defaults to the system temp dir.
    pub scratch_dir: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            archive_name: "split_tracks.zip".to_string(),
            overwrite: false,
            scratch_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as inputs when walking directories (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while walking.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

/// Whether an archive name can be written as a single flat file.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

impl SplitSettings {
    pub fn default_tracks_in_range(&self) -> bool {
        (MIN_TRACKS..=MAX_TRACKS).contains(&self.default_tracks)
    }
}
