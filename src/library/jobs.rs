use std::path::PathBuf;

use crate::config::LibrarySettings;

use super::manifest::Manifest;
use super::model::FileJob;
use super::scan::{InputError, collect_inputs};

/// Metadata applied to every input that does not carry its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDefaults {
    pub artist: String,
    pub album: String,
    pub track_count: u32,
}

impl JobDefaults {
    fn job(&self, path: PathBuf) -> FileJob {
        FileJob {
            path,
            artist: self.artist.clone(),
            album: self.album.clone(),
            track_count: self.track_count,
        }
    }
}

/// Turn positional inputs and manifest entries into jobs, in that order.
///
/// Metadata is not validated here: a job with a blank artist is still a job,
/// it is skipped later without affecting the others.
pub fn build_jobs(
    inputs: &[PathBuf],
    manifest: Option<&Manifest>,
    defaults: &JobDefaults,
    settings: &LibrarySettings,
    max_files: Option<usize>,
) -> Result<Vec<FileJob>, InputError> {
    let mut jobs: Vec<FileJob> = collect_inputs(inputs, settings)?
        .into_iter()
        .map(|path| defaults.job(path))
        .collect();

    for entry in manifest.map(|m| m.files.as_slice()).unwrap_or_default() {
        let entry_defaults = JobDefaults {
            artist: entry.artist.clone().unwrap_or_else(|| defaults.artist.clone()),
            album: entry.album.clone().unwrap_or_else(|| defaults.album.clone()),
            track_count: entry.tracks.unwrap_or(defaults.track_count),
        };
        for path in collect_inputs(std::slice::from_ref(&entry.path), settings)? {
            jobs.push(entry_defaults.job(path));
        }
    }

    if jobs.is_empty() {
        return Err(InputError::NoInputs);
    }
    if let Some(max) = max_files {
        if jobs.len() > max {
            return Err(InputError::TooMany {
                count: jobs.len(),
                max,
            });
        }
    }
    Ok(jobs)
}
