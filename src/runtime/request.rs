use std::path::PathBuf;

use clap::ArgMatches;

use crate::config::{ProbeBackend, Settings, is_plain_file_name};
use crate::library::{FileJob, InputError, JobDefaults, Manifest, build_jobs};

/// Everything a run needs, settled before any file is touched.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub jobs: Vec<FileJob>,
    pub output_dir: PathBuf,
    pub archive_name: String,
    pub overwrite: bool,
    pub keep_segments: Option<PathBuf>,
    pub scratch_dir: Option<PathBuf>,
    pub probe: ProbeBackend,
    pub verify_tags: bool,
    pub dry_run: bool,
    pub strict: bool,
}

impl RunRequest {
    /// Merge command-line flags over loaded settings.
    pub fn from_matches(matches: &ArgMatches, settings: &Settings) -> Result<Self, InputError> {
        let defaults = JobDefaults {
            artist: matches.get_one::<String>("artist").cloned().unwrap_or_default(),
            album: matches.get_one::<String>("album").cloned().unwrap_or_default(),
            track_count: matches
                .get_one::<u32>("tracks")
                .copied()
                .unwrap_or(settings.split.default_tracks),
        };

        let manifest = matches
            .get_one::<PathBuf>("manifest")
            .map(|p| Manifest::load(p))
            .transpose()?;

        let inputs: Vec<PathBuf> = matches
            .get_many::<PathBuf>("inputs")
            .map(|v| v.cloned().collect())
            .unwrap_or_default();

        let jobs = build_jobs(
            &inputs,
            manifest.as_ref(),
            &defaults,
            &settings.library,
            settings.split.max_files,
        )?;

        let archive_name = matches
            .get_one::<String>("archive-name")
            .cloned()
            .unwrap_or_else(|| settings.output.archive_name.clone());
        if !is_plain_file_name(&archive_name) {
            return Err(InputError::InvalidArchiveName(archive_name));
        }

        let probe = matches
            .get_one::<ProbeBackend>("probe")
            .copied()
            .unwrap_or(settings.probe.backend);

        Ok(Self {
            jobs,
            output_dir: matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| settings.output.directory.clone()),
            archive_name,
            overwrite: matches.get_flag("overwrite") || settings.output.overwrite,
            keep_segments: matches.get_one::<PathBuf>("keep-segments").cloned(),
            scratch_dir: settings.output.scratch_dir.clone(),
            probe,
            verify_tags: settings.extract.verify_tags,
            dry_run: matches.get_flag("dry-run"),
            strict: matches.get_flag("strict"),
        })
    }

    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(&self.archive_name)
    }
}
