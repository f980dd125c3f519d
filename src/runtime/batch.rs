use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::library::{FileJob, SourceTrack};
use crate::media::{
    DurationProbe, ExtractError, ExtractRequest, Extractor, TrackTags, verify_tags,
};
use crate::split::{PlanEntry, RunPlan, Segment, SkippedFile, check_job, plan_run};

#[derive(Debug)]
pub struct SegmentOutcome {
    pub segment: Segment,
    /// Path of the written track inside the scratch directory.
    pub result: Result<PathBuf, ExtractError>,
}

#[derive(Debug)]
pub enum FileOutcome {
    Skipped(SkippedFile),
    Processed {
        source: SourceTrack,
        segments: Vec<SegmentOutcome>,
    },
}

impl FileOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            FileOutcome::Skipped(s) => &s.file_name,
            FileOutcome::Processed { source, .. } => &source.file_name,
        }
    }
}

/// Validate and probe every job in order, then lay out the segments.
pub fn prepare(jobs: &[FileJob], probe: &dyn DurationProbe) -> RunPlan {
    plan_run(jobs.iter().cloned().map(|job| prepare_job(job, probe)))
}

fn prepare_job(job: FileJob, probe: &dyn DurationProbe) -> Result<SourceTrack, SkippedFile> {
    let name = job.file_name();
    if let Err(reason) = check_job(&job) {
        warn!("{name}: skipped, {reason}");
        return Err(SkippedFile::new(job.path, reason));
    }

    match probe.probe(&job.path) {
        Ok(duration) => {
            info!("{name}: {duration:.1}s, {} tracks", job.track_count);
            Ok(job.into_source(duration))
        }
        Err(err) => {
            warn!("{name}: skipped, could not read duration: {err}");
            Err(SkippedFile::new(job.path, err.into()))
        }
    }
}

/// Extract every planned segment, one at a time, into `out_dir`.
///
/// A failed segment is recorded and the run moves on; its track number is not
/// reused.
pub fn extract_all(
    plan: RunPlan,
    extractor: &dyn Extractor,
    out_dir: &Path,
    verify: bool,
) -> Vec<FileOutcome> {
    let total = plan.total_tracks();

    plan.entries
        .into_iter()
        .map(|entry| match entry {
            PlanEntry::Skipped(skipped) => FileOutcome::Skipped(skipped),
            PlanEntry::Planned(planned) => {
                let segments = planned
                    .segments
                    .into_iter()
                    .map(|segment| {
                        let result = extract_segment(
                            &planned.source,
                            &segment,
                            total,
                            extractor,
                            out_dir,
                            verify,
                        );
                        match &result {
                            Ok(_) => info!("wrote {}", segment.file_name()),
                            Err(err) => error!("{}: {err}", segment.file_name()),
                        }
                        SegmentOutcome { segment, result }
                    })
                    .collect();
                FileOutcome::Processed {
                    source: planned.source,
                    segments,
                }
            }
        })
        .collect()
}

fn extract_segment(
    source: &SourceTrack,
    segment: &Segment,
    track_total: u32,
    extractor: &dyn Extractor,
    out_dir: &Path,
    verify: bool,
) -> Result<PathBuf, ExtractError> {
    let output = out_dir.join(segment.file_name());
    let request = ExtractRequest {
        source: &source.path,
        output: &output,
        start_secs: segment.start_secs,
        length_secs: segment.length_secs,
        tags: TrackTags {
            artist: &source.artist,
            album: &source.album,
            title: &segment.title,
            track_number: segment.track_number,
            track_total,
        },
    };

    extractor.extract(&request)?;
    if verify {
        verify_tags(&output, &request.tags)?;
    }
    Ok(output)
}

/// Written tracks in global track order.
pub fn produced_files(outcomes: &[FileOutcome]) -> Vec<PathBuf> {
    outcomes
        .iter()
        .filter_map(|o| match o {
            FileOutcome::Processed { segments, .. } => Some(segments),
            FileOutcome::Skipped(_) => None,
        })
        .flatten()
        .filter_map(|s| s.result.as_ref().ok().cloned())
        .collect()
}
