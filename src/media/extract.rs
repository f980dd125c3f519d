use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use lofty::error::LoftyError;
use log::debug;
use thiserror::Error;

use super::process::{command_line, configure_command, sanitize_cmd_error};

/// Tag values written into one output track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags<'a> {
    pub artist: &'a str,
    pub album: &'a str,
    pub title: &'a str,
    pub track_number: u32,
    pub track_total: u32,
}

impl TrackTags<'_> {
    /// `track` frame value, `"<n>/<total>"`.
    pub fn track_field(&self) -> String {
        format!("{}/{}", self.track_number, self.track_total)
    }
}

/// Everything needed to cut one segment out of a source file.
#[derive(Debug, Clone)]
pub struct ExtractRequest<'a> {
    pub source: &'a Path,
    pub output: &'a Path,
    pub start_secs: u64,
    pub length_secs: u64,
    pub tags: TrackTags<'a>,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unable to execute {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },
    #[error("{tool} failed ({status}): {detail}")]
    Failed {
        tool: String,
        status: ExitStatus,
        detail: String,
    },
    #[error("no output was written to {}", .0.display())]
    MissingOutput(PathBuf),
    #[error("unable to read back tags: {0}")]
    TagRead(#[from] LoftyError),
    #[error("tag {field} is {found:?}, expected {expected:?}")]
    TagMismatch {
        field: &'static str,
        expected: String,
        found: Option<String>,
    },
}

/// Writes one tagged segment file.
pub trait Extractor {
    fn extract(&self, request: &ExtractRequest<'_>) -> Result<(), ExtractError>;
}

/// Arguments for a stream-copy cut with ID3v2.3 tags.
pub fn ffmpeg_args(request: &ExtractRequest<'_>) -> Vec<OsString> {
    let tags = &request.tags;
    let mut args: Vec<OsString> = [
        "-hide_banner",
        "-loglevel",
        "error",
        "-y",
        "-ss",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();

    args.push(request.start_secs.to_string().into());
    args.push("-t".into());
    args.push(request.length_secs.to_string().into());
    args.push("-i".into());
    args.push(request.source.as_os_str().to_owned());
    args.push("-id3v2_version".into());
    args.push("3".into());
    for (key, value) in [
        ("artist", tags.artist.to_string()),
        ("album", tags.album.to_string()),
        ("track", tags.track_field()),
        ("title", tags.title.to_string()),
    ] {
        args.push("-metadata".into());
        args.push(format!("{key}={value}").into());
    }
    args.push("-c".into());
    args.push("copy".into());
    args.push(request.output.as_os_str().to_owned());
    args
}

/// Extract through an external `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    binary: String,
}

impl FfmpegExtractor {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Extractor for FfmpegExtractor {
    fn extract(&self, request: &ExtractRequest<'_>) -> Result<(), ExtractError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(ffmpeg_args(request));
        configure_command(&mut cmd);
        debug!("extract: {}", command_line(&cmd));

        let output = cmd.output().map_err(|source| ExtractError::Spawn {
            tool: self.binary.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(ExtractError::Failed {
                tool: self.binary.clone(),
                status: output.status,
                detail: sanitize_cmd_error(&output),
            });
        }
        if !request.output.is_file() {
            return Err(ExtractError::MissingOutput(request.output.to_path_buf()));
        }
        Ok(())
    }
}
