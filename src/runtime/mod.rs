use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use log::{info, warn};

use crate::archive::write_archive;
use crate::config::{ProbeBackend, ToolSettings};
use crate::media::{DurationProbe, Extractor, FfmpegExtractor, FfprobeProbe, LoftyProbe, check_tool};

mod batch;
mod report;
mod request;
mod settings;

pub use batch::{FileOutcome, SegmentOutcome, extract_all, prepare, produced_files};
pub use report::{RunReport, write_plan, write_report};
pub use request::RunRequest;


pub fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let settings = settings::load_settings();
    let request = RunRequest::from_matches(matches, &settings)?;

    preflight(&settings.tools, &request)?;
    let probe = build_probe(&settings.tools, request.probe);

    if request.dry_run {
        let plan = prepare(&request.jobs, probe.as_ref());
        write_plan(&mut io::stdout().lock(), &plan, &request.archive_path())?;
        return Ok(ExitCode::SUCCESS);
    }

    let extractor = FfmpegExtractor::new(settings.tools.ffmpeg.as_str());
    let report = execute(&request, probe.as_ref(), &extractor)?;
    write_report(&mut io::stdout().lock(), &report)?;

    if request.strict && report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn build_probe(tools: &ToolSettings, backend: ProbeBackend) -> Box<dyn DurationProbe> {
    match backend {
        ProbeBackend::Ffprobe => Box::new(FfprobeProbe::new(tools.ffprobe.as_str())),
        ProbeBackend::Lofty => Box::new(LoftyProbe),
    }
}

/// Fail fast when a tool the run depends on cannot be executed at all.
fn preflight(tools: &ToolSettings, request: &RunRequest) -> Result<()> {
    if request.probe == ProbeBackend::Ffprobe {
        check_tool(&tools.ffprobe)?;
    }
    if !request.dry_run {
        check_tool(&tools.ffmpeg)?;
    }
    Ok(())
}

/// Probe, split and archive every job of `request`.
///
/// Per-file and per-track failures end up in the report; only failing to set
/// up the scratch directory or to write the archive is an error. The scratch
/// directory is removed on every path out of this function.
pub fn execute(
    request: &RunRequest,
    probe: &dyn DurationProbe,
    extractor: &dyn Extractor,
) -> Result<RunReport> {
    let archive_path = request.archive_path();
    if !request.overwrite && archive_path.exists() {
        bail!(
            "{} already exists (use --overwrite to replace it)",
            archive_path.display()
        );
    }

    let scratch = match &request.scratch_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("unable to create {}", dir.display()))?;
            tempfile::Builder::new().prefix("mp3split-").tempdir_in(dir)
        }
        None => tempfile::Builder::new().prefix("mp3split-").tempdir(),
    }
    .context("unable to create scratch directory")?;

    let plan = prepare(&request.jobs, probe);
    info!(
        "{} of {} file(s) ready, {} track(s) planned",
        plan.planned().count(),
        request.jobs.len(),
        plan.total_tracks()
    );

    let files = extract_all(plan, extractor, scratch.path(), request.verify_tags);
    let produced = produced_files(&files);

    let archive = write_archive(&archive_path, &produced, request.overwrite)
        .with_context(|| format!("unable to write {}", archive_path.display()))?;

    // The archive is already written; a failed copy must not lose the report.
    if let Some(dir) = &request.keep_segments
        && let Err(e) = copy_tracks(&produced, dir)
    {
        warn!("unable to copy tracks to {}: {e}", dir.display());
    }

    if let Err(e) = scratch.close() {
        warn!("unable to remove scratch directory: {e}");
    }

    Ok(RunReport { files, archive })
}

fn copy_tracks(files: &[PathBuf], dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for path in files {
        if let Some(name) = path.file_name() {
            fs::copy(path, dir.join(name))?;
        }
    }
    Ok(())
}
