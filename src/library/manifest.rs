use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::scan::InputError;

/// A TOML file listing inputs with per-file metadata.
///
/// ```toml
/// [[file]]
/// path = "side-a.mp3"
/// artist = "Someone"
/// album = "Live"
/// tracks = 12
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, rename = "file")]
    pub files: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub path: PathBuf,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub tracks: Option<u32>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read a manifest; relative entry paths are resolved against its directory.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let text = fs::read_to_string(path).map_err(|source| InputError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest = Self::parse(&text).map_err(|source| InputError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for entry in &mut manifest.files {
            if entry.path.is_relative() {
                entry.path = base.join(&entry.path);
            }
        }
        Ok(manifest)
    }
}
