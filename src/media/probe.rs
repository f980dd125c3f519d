use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use lofty::error::LoftyError;
use lofty::prelude::*;
use log::debug;
use thiserror::Error;

use super::process::{command_line, configure_command, sanitize_cmd_error};

#[derive(Debug, Error)]
pub enum ProbeError {
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
    #[error("unable to parse a duration from {0:?}")]
    Unparseable(String),
    #[error("duration is not a positive number of seconds ({0})")]
    NonPositive(f64),
    #[error("unable to read audio properties: {0}")]
    Unreadable(#[from] LoftyError),
}

/// Reports the total duration of a media file in seconds.
pub trait DurationProbe {
    fn probe(&self, path: &Path) -> Result<f64, ProbeError>;
}

/// Parse the single number `ffprobe` prints for `format=duration`.
pub fn parse_duration_output(stdout: &str) -> Result<f64, ProbeError> {
    let line = stdout.trim();
    let seconds: f64 = line
        .parse()
        .map_err(|_| ProbeError::Unparseable(line.to_string()))?;
    check_duration(seconds)
}

fn check_duration(seconds: f64) -> Result<f64, ProbeError> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(ProbeError::NonPositive(seconds))
    }
}

/// Probe through an external `ffprobe` binary.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    binary: String,
}

impl FfprobeProbe {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path);
        configure_command(&mut cmd);
        cmd
    }
}

impl DurationProbe for FfprobeProbe {
    fn probe(&self, path: &Path) -> Result<f64, ProbeError> {
        let mut cmd = self.command(path);
        debug!("probe: {}", command_line(&cmd));

        let output = cmd.output().map_err(|source| ProbeError::Spawn {
            tool: self.binary.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(ProbeError::Failed {
                tool: self.binary.clone(),
                status: output.status,
                detail: sanitize_cmd_error(&output),
            });
        }

        parse_duration_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Probe by reading the stream properties in-process, without `ffprobe`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyProbe;

impl DurationProbe for LoftyProbe {
    fn probe(&self, path: &Path) -> Result<f64, ProbeError> {
        let tagged = lofty::read_from_path(path)?;
        check_duration(tagged.properties().duration().as_secs_f64())
    }
}
