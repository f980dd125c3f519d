use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("no input files found")]
    NoInputs,
    #[error("{count} input files given, at most {max} allowed")]
    TooMany { count: usize, max: usize },
    #[error("unable to read manifest {}: {source}", path.display())]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("archive name must be a plain file name, got {0:?}")]
    InvalidArchiveName(String),
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Audio files below `dir`, sorted case-insensitively by path.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            files.push(path.to_path_buf());
        }
    }

    files.sort_by_key(|p| p.to_string_lossy().to_lowercase());
    files
}

/// Expand command-line inputs into files, keeping the order they were given in.
///
/// Files are taken as-is; directories are replaced by the audio files found
/// inside them.
pub fn collect_inputs(paths: &[PathBuf], settings: &LibrarySettings) -> Result<Vec<PathBuf>, InputError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(scan(path, settings));
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(InputError::NotFound(path.clone()));
        }
    }
    Ok(files)
}
