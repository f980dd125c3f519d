use thiserror::Error;

/// Smallest track count a file may be split into.
pub const MIN_TRACKS: u32 = 1;
/// Largest track count a file may be split into.
pub const MAX_TRACKS: u32 = 50;

/// One time slice of a source file, destined to become one output track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Global 1-based track number, continuing across files of the same run.
    pub track_number: u32,
    /// Offset of the slice from the start of the source, in whole seconds.
    pub start_secs: u64,
    /// Length of the slice in whole seconds. May be zero for very short sources.
    pub length_secs: u64,
    /// `"NN - <base name>"`.
    pub title: String,
}

impl Segment {
    /// Name of the file this segment is written to (and archived as).
    pub fn file_name(&self) -> String {
        format!("{}.mp3", self.title)
    }

    /// Offset just past the last second of the slice.
    pub fn end_secs(&self) -> u64 {
        self.start_secs + self.length_secs
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error("duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),
    #[error("track count must be between {min} and {max}, got {0}", min = MIN_TRACKS, max = MAX_TRACKS)]
    TrackCountOutOfRange(u32),
    #[error("track numbers start at 1")]
    InvalidStartingNumber,
}

/// Check a requested track count against the allowed range.
pub fn check_track_count(track_count: u32) -> Result<(), SplitError> {
    if (MIN_TRACKS..=MAX_TRACKS).contains(&track_count) {
        Ok(())
    } else {
        Err(SplitError::TrackCountOutOfRange(track_count))
    }
}

/// Title of a track: the global number padded to two digits, then the base name.
pub fn track_title(track_number: u32, base_name: &str) -> String {
    format!("{track_number:02} - {base_name}")
}

/// Cut `duration` seconds into `track_count` equal slices of whole seconds.
///
/// Every slice is `floor(duration / track_count)` seconds long and slices are
/// laid end to end from zero, so up to `track_count - 1` seconds (plus the
/// fractional part) at the end of the source are left out. A source shorter
/// than `track_count` seconds yields zero-length slices.
pub fn compute_segments(
    duration: f64,
    track_count: u32,
    base_name: &str,
    starting_track_number: u32,
) -> Result<Vec<Segment>, SplitError> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(SplitError::InvalidDuration(duration));
    }
    check_track_count(track_count)?;
    if starting_track_number == 0 {
        return Err(SplitError::InvalidStartingNumber);
    }

    let length_secs = (duration / f64::from(track_count)).floor() as u64;

    let segments = (0..track_count)
        .map(|i| {
            let track_number = starting_track_number + i;
            Segment {
                track_number,
                start_secs: u64::from(i) * length_secs,
                length_secs,
                title: track_title(track_number, base_name),
            }
        })
        .collect();

    Ok(segments)
}
