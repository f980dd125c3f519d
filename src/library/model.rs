use std::path::{Path, PathBuf};

/// One input file and the metadata it should be split with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJob {
    pub path: PathBuf,
    pub artist: String,
    pub album: String,
    pub track_count: u32,
}

impl FileJob {
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }

    /// Promote the job to a probed source once its duration is known.
    pub fn into_source(self, duration_secs: f64) -> SourceTrack {
        SourceTrack {
            file_name: self.file_name(),
            path: self.path,
            duration_secs,
            artist: self.artist.trim().to_string(),
            album: self.album.trim().to_string(),
            track_count: self.track_count,
        }
    }
}

/// A file whose duration has been probed. Immutable from here on.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTrack {
    pub path: PathBuf,
    pub file_name: String,
    pub duration_secs: f64,
    pub artist: String,
    pub album: String,
    pub track_count: u32,
}

impl SourceTrack {
    pub fn base_name(&self) -> String {
        base_name_of(&self.path)
    }
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// File name without its extension: `"/music/song.mp3"` -> `"song"`.
pub fn base_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}
