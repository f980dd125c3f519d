use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::library::{FileJob, SourceTrack, file_name_of};
use crate::media::ProbeError;

use super::segment::{Segment, SplitError, check_track_count, compute_segments};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Artist,
    Album,
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataField::Artist => f.write_str("artist"),
            MetadataField::Album => f.write_str("album"),
        }
    }
}

/// Why a whole input file was left out of a run.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("{0} is blank")]
    MissingMetadata(MetadataField),
    #[error("could not read duration: {0}")]
    Probe(#[from] ProbeError),
    #[error(transparent)]
    Split(#[from] SplitError),
}

#[derive(Debug)]
pub struct PlannedFile {
    pub source: SourceTrack,
    pub segments: Vec<Segment>,
}

#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub reason: SkipReason,
}

impl SkippedFile {
    pub fn new(path: PathBuf, reason: SkipReason) -> Self {
        Self {
            file_name: file_name_of(&path),
            path,
            reason,
        }
    }
}

#[derive(Debug)]
pub enum PlanEntry {
    Planned(PlannedFile),
    Skipped(SkippedFile),
}

/// Every input file of a run, in input order, with its segments or the reason
/// it was skipped.
#[derive(Debug, Default)]
pub struct RunPlan {
    pub entries: Vec<PlanEntry>,
}

impl RunPlan {
    pub fn planned(&self) -> impl Iterator<Item = &PlannedFile> {
        self.entries.iter().filter_map(|e| match e {
            PlanEntry::Planned(p) => Some(p),
            PlanEntry::Skipped(_) => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SkippedFile> {
        self.entries.iter().filter_map(|e| match e {
            PlanEntry::Skipped(s) => Some(s),
            PlanEntry::Planned(_) => None,
        })
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.planned().flat_map(|p| p.segments.iter())
    }

    /// Number of tracks the run produces; the denominator of the track tag.
    pub fn total_tracks(&self) -> u32 {
        self.segments().count() as u32
    }
}

/// Check the metadata a job needs before anything is spent on probing it.
pub fn check_job(job: &FileJob) -> Result<(), SkipReason> {
    if job.artist.trim().is_empty() {
        return Err(SkipReason::MissingMetadata(MetadataField::Artist));
    }
    if job.album.trim().is_empty() {
        return Err(SkipReason::MissingMetadata(MetadataField::Album));
    }
    check_track_count(job.track_count)?;
    Ok(())
}

/// Lay out the segments of every file in order.
///
/// The next global track number is carried from one file to the next, so
/// numbering is contiguous across the run. Skipped inputs keep their place in
/// the plan but do not consume track numbers.
pub fn plan_run<I>(inputs: I) -> RunPlan
where
    I: IntoIterator<Item = Result<SourceTrack, SkippedFile>>,
{
    let (plan, _next) = inputs.into_iter().fold(
        (RunPlan::default(), 1u32),
        |(mut plan, next_track), input| {
            let next_track = match input {
                Ok(source) => match compute_segments(
                    source.duration_secs,
                    source.track_count,
                    &source.base_name(),
                    next_track,
                ) {
                    Ok(segments) => {
                        let advanced = next_track + segments.len() as u32;
                        plan.entries
                            .push(PlanEntry::Planned(PlannedFile { source, segments }));
                        advanced
                    }
                    Err(err) => {
                        plan.entries
                            .push(PlanEntry::Skipped(SkippedFile::new(source.path, err.into())));
                        next_track
                    }
                },
                Err(skipped) => {
                    plan.entries.push(PlanEntry::Skipped(skipped));
                    next_track
                }
            };
            (plan, next_track)
        },
    );
    plan
}
