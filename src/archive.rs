//! Flat zip archive of the produced tracks.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;
use thiserror::Error;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("{} already exists (use --overwrite to replace it)", .0.display())]
    Exists(PathBuf),
    #[error("{} has no usable file name", .0.display())]
    InvalidEntry(PathBuf),
    #[error("duplicate archive entry {0:?}")]
    DuplicateEntry(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Zip(#[from] ZipError),
}

/// What ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entries: Vec<String>,
}

fn entry_name(path: &Path) -> Result<String, ArchiveError> {
    path.file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ArchiveError::InvalidEntry(path.to_path_buf()))
}

/// Write `files` into a zip at `dest`, each stored under its bare file name.
///
/// The archive is assembled in a temporary file next to `dest` and moved into
/// place once complete, so a failed run never leaves a truncated archive. An
/// empty `files` list still produces a valid, empty archive.
pub fn write_archive(dest: &Path, files: &[PathBuf], overwrite: bool) -> Result<ArchiveSummary, ArchiveError> {
    if !overwrite && dest.exists() {
        return Err(ArchiveError::Exists(dest.to_path_buf()));
    }

    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut tmp = NamedTempFile::new_in(&parent)?;
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mut entries: Vec<String> = Vec::with_capacity(files.len());
    {
        let mut zip = ZipWriter::new(tmp.as_file_mut());
        for path in files {
            let name = entry_name(path)?;
            if entries.contains(&name) {
                return Err(ArchiveError::DuplicateEntry(name));
            }
            zip.start_file(name.as_str(), options)?;
            io::copy(&mut File::open(path)?, &mut zip)?;
            entries.push(name);
        }
        zip.finish()?;
    }

    if overwrite {
        tmp.persist(dest).map_err(|e| e.error)?;
    } else {
        tmp.persist_noclobber(dest).map_err(|e| e.error)?;
    }

    info!("wrote {} ({} tracks)", dest.display(), entries.len());
    Ok(ArchiveSummary {
        path: dest.to_path_buf(),
        entries,
    })
}
