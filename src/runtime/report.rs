use std::io::{self, Write};
use std::path::Path;

use crate::archive::ArchiveSummary;
use crate::split::{PlanEntry, RunPlan};

use super::batch::FileOutcome;

/// Outcome of a whole run.
#[derive(Debug)]
pub struct RunReport {
    pub files: Vec<FileOutcome>,
    pub archive: ArchiveSummary,
}

impl RunReport {
    pub fn skipped_files(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f, FileOutcome::Skipped(_)))
            .count()
    }

    pub fn failed_tracks(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f {
                FileOutcome::Processed { segments, .. } => {
                    segments.iter().filter(|s| s.result.is_err()).count()
                }
                FileOutcome::Skipped(_) => 0,
            })
            .sum()
    }

    pub fn has_failures(&self) -> bool {
        self.skipped_files() > 0 || self.failed_tracks() > 0
    }
}

fn dropped_secs(duration: f64, track_count: u32, length_secs: u64) -> f64 {
    duration - (u64::from(track_count) * length_secs) as f64
}

pub fn write_plan(out: &mut impl Write, plan: &RunPlan, archive: &Path) -> io::Result<()> {
    let total = plan.total_tracks();
    if total == 0 {
        writeln!(out, "Dry run: no tracks would be written.")?;
    } else {
        writeln!(
            out,
            "Dry run: would write {total} track(s) to {}",
            archive.display()
        )?;
    }

    for entry in &plan.entries {
        match entry {
            PlanEntry::Skipped(s) => writeln!(out, "{}: skipped ({})", s.file_name, s.reason)?,
            PlanEntry::Planned(p) => {
                let length = p.segments.first().map(|s| s.length_secs).unwrap_or(0);
                write!(
                    out,
                    "{} ({:.1}s, {} x {length}s",
                    p.source.file_name, p.source.duration_secs, p.source.track_count
                )?;
                let dropped = dropped_secs(p.source.duration_secs, p.source.track_count, length);
                if dropped >= 0.05 {
                    write!(out, ", last {dropped:.1}s dropped")?;
                }
                writeln!(out, ")")?;
                for s in &p.segments {
                    writeln!(
                        out,
                        "  {}  [{}s-{}s]",
                        s.file_name(),
                        s.start_secs,
                        s.end_secs()
                    )?;
                }
            }
        }
    }
    Ok(())
}

pub fn write_report(out: &mut impl Write, report: &RunReport) -> io::Result<()> {
    for file in &report.files {
        match file {
            FileOutcome::Skipped(s) => writeln!(out, "{}: skipped ({})", s.file_name, s.reason)?,
            FileOutcome::Processed { segments, .. } => {
                let written = segments.iter().filter(|s| s.result.is_ok()).count();
                writeln!(
                    out,
                    "{}: {written} of {} track(s) written",
                    file.file_name(),
                    segments.len()
                )?;
                for s in segments {
                    if let Err(err) = &s.result {
                        writeln!(out, "  failed {}: {err}", s.segment.file_name())?;
                    }
                }
            }
        }
    }
    writeln!(
        out,
        "Archive: {} ({} track(s))",
        report.archive.path.display(),
        report.archive.entries.len()
    )
}
