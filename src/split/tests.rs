use std::path::PathBuf;

use super::*;
use crate::library::{FileJob, SourceTrack};
use crate::media::ProbeError;

fn source(name: &str, duration_secs: f64, track_count: u32) -> SourceTrack {
    SourceTrack {
        path: PathBuf::from(format!("/in/{name}.mp3")),
        file_name: format!("{name}.mp3"),
        duration_secs,
        artist: "Artist".into(),
        album: "Album".into(),
        track_count,
    }
}

fn job(artist: &str, album: &str, track_count: u32) -> FileJob {
    FileJob {
        path: PathBuf::from("/in/a.mp3"),
        artist: artist.into(),
        album: album.into(),
        track_count,
    }
}

#[test]
fn compute_segments_splits_into_equal_whole_seconds() {
    let segments = compute_segments(605.7, 10, "song", 1).unwrap();
    assert_eq!(segments.len(), 10);
    for (i, s) in segments.iter().enumerate() {
        assert_eq!(s.length_secs, 60);
        assert_eq!(s.start_secs, i as u64 * 60);
        assert_eq!(s.track_number, i as u32 + 1);
    }
    // Remainder (5.7s) is dropped, not folded into the last track.
    assert_eq!(segments.last().unwrap().end_secs(), 600);
}

#[test]
fn compute_segments_starts_are_strictly_increasing_and_disjoint() {
    for count in [1u32, 2, 3, 7, 13, 50] {
        let segments = compute_segments(3_601.0, count, "x", 1).unwrap();
        assert_eq!(segments.len(), count as usize);
        for pair in segments.windows(2) {
            assert!(pair[0].start_secs < pair[1].start_secs);
            assert!(pair[0].end_secs() <= pair[1].start_secs);
        }
    }
}

#[test]
fn compute_segments_title_is_padded_number_and_base_name() {
    let segments = compute_segments(70.0, 1, "song", 7).unwrap();
    assert_eq!(segments[0].title, "07 - song");
    assert_eq!(segments[0].file_name(), "07 - song.mp3");
    assert_eq!(track_title(123, "long"), "123 - long");
}

#[test]
fn compute_segments_short_source_yields_zero_length_tracks() {
    let segments = compute_segments(5.0, 10, "tiny", 1).unwrap();
    assert_eq!(segments.len(), 10);
    assert!(segments.iter().all(|s| s.length_secs == 0 && s.start_secs == 0));
    assert_eq!(segments[9].title, "10 - tiny");
}

#[test]
fn compute_segments_rejects_bad_preconditions() {
    assert_eq!(
        compute_segments(0.0, 10, "x", 1),
        Err(SplitError::InvalidDuration(0.0))
    );
    assert!(matches!(
        compute_segments(f64::NAN, 10, "x", 1),
        Err(SplitError::InvalidDuration(_))
    ));
    assert_eq!(
        compute_segments(100.0, 0, "x", 1),
        Err(SplitError::TrackCountOutOfRange(0))
    );
    assert_eq!(
        compute_segments(100.0, 51, "x", 1),
        Err(SplitError::TrackCountOutOfRange(51))
    );
    assert_eq!(
        compute_segments(100.0, 5, "x", 0),
        Err(SplitError::InvalidStartingNumber)
    );
    assert!(compute_segments(100.0, 50, "x", 1).is_ok());
    assert_eq!(
        SplitError::TrackCountOutOfRange(51).to_string(),
        format!("track count must be between {MIN_TRACKS} and {MAX_TRACKS}, got 51")
    );
}

#[test]
fn plan_run_numbers_tracks_contiguously_across_files() {
    let plan = plan_run(vec![Ok(source("a", 90.0, 3)), Ok(source("b", 40.0, 2))]);

    let numbers: Vec<u32> = plan.segments().map(|s| s.track_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(plan.total_tracks(), 5);

    let titles: Vec<&str> = plan.segments().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["01 - a", "02 - a", "03 - a", "04 - b", "05 - b"]);
}

#[test]
fn plan_run_skipped_inputs_keep_their_place_without_consuming_numbers() {
    let skipped = SkippedFile::new(
        PathBuf::from("/in/broken.mp3"),
        SkipReason::Probe(ProbeError::Unparseable("N/A".into())),
    );
    let plan = plan_run(vec![
        Ok(source("a", 20.0, 2)),
        Err(skipped),
        Ok(source("c", 20.0, 2)),
    ]);

    assert_eq!(plan.entries.len(), 3);
    assert!(matches!(plan.entries[1], PlanEntry::Skipped(ref s) if s.file_name == "broken.mp3"));
    let numbers: Vec<u32> = plan.segments().map(|s| s.track_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[test]
fn plan_run_turns_unsplittable_sources_into_skips() {
    let plan = plan_run(vec![Ok(source("zero", 0.0, 2)), Ok(source("ok", 10.0, 2))]);
    assert_eq!(plan.skipped().count(), 1);
    assert!(matches!(
        plan.skipped().next().unwrap().reason,
        SkipReason::Split(SplitError::InvalidDuration(_))
    ));
    assert_eq!(plan.segments().next().unwrap().track_number, 1);
}

#[test]
fn check_job_requires_artist_album_and_track_count() {
    assert!(check_job(&job("Artist", "Album", 10)).is_ok());
    assert!(matches!(
        check_job(&job("  ", "Album", 10)),
        Err(SkipReason::MissingMetadata(MetadataField::Artist))
    ));
    assert!(matches!(
        check_job(&job("Artist", "", 10)),
        Err(SkipReason::MissingMetadata(MetadataField::Album))
    ));
    assert!(matches!(
        check_job(&job("Artist", "Album", 51)),
        Err(SkipReason::Split(SplitError::TrackCountOutOfRange(51)))
    ));
    assert_eq!(
        SkipReason::MissingMetadata(MetadataField::Album).to_string(),
        "album is blank"
    );
}
