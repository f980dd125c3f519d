use std::path::Path;

use lofty::prelude::*;

use super::extract::{ExtractError, TrackTags};

/// Tags as read back from a written track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenTags {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub track_number: Option<u32>,
    pub track_total: Option<u32>,
}

pub fn read_tags(path: &Path) -> Result<WrittenTags, ExtractError> {
    let tagged = lofty::read_from_path(path)?;
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return Ok(WrittenTags::default());
    };

    Ok(WrittenTags {
        artist: tag.artist().map(|v| v.into_owned()),
        album: tag.album().map(|v| v.into_owned()),
        title: tag.title().map(|v| v.into_owned()),
        track_number: tag.track(),
        track_total: tag.track_total(),
    })
}

/// Compare what was read back against what was asked for.
pub fn compare_tags(expected: &TrackTags<'_>, found: &WrittenTags) -> Result<(), ExtractError> {
    let text_fields = [
        ("artist", expected.artist, &found.artist),
        ("album", expected.album, &found.album),
        ("title", expected.title, &found.title),
    ];
    for (field, want, got) in text_fields {
        if got.as_deref() != Some(want) {
            return Err(ExtractError::TagMismatch {
                field,
                expected: want.to_string(),
                found: got.clone(),
            });
        }
    }

    if found.track_number != Some(expected.track_number) {
        return Err(ExtractError::TagMismatch {
            field: "track",
            expected: expected.track_number.to_string(),
            found: found.track_number.map(|n| n.to_string()),
        });
    }
    Ok(())
}

/// Read the tags of a written track and check them.
pub fn verify_tags(path: &Path, expected: &TrackTags<'_>) -> Result<(), ExtractError> {
    compare_tags(expected, &read_tags(path)?)
}
