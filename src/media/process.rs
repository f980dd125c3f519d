use std::ffi::OsStr;
use std::io::ErrorKind;
use std::process::{Command, Output};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{tool} was not found; install it or set its path in the config")]
    NotFound { tool: String },
    #[error("{tool} could not be executed: {detail}")]
    NotExecutable { tool: String, detail: String },
    #[error("{tool} -version failed: {detail}")]
    Failed { tool: String, detail: String },
}

/// Keep child processes from opening a console window on Windows.
pub(crate) fn configure_command(cmd: &mut Command) {
    #[cfg(target_os = "windows")]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    #[cfg(not(target_os = "windows"))]
    let _ = cmd;
}

/// Most useful line(s) of a failed process: stderr if any, stdout otherwise.
pub(crate) fn sanitize_cmd_error(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Render a command the way it would be typed, for debug logs.
pub(crate) fn command_line(cmd: &Command) -> String {
    let mut parts = vec![quote(cmd.get_program())];
    parts.extend(cmd.get_args().map(quote));
    parts.join(" ")
}

fn quote(arg: &OsStr) -> String {
    let s = arg.to_string_lossy();
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("'{}'", s.replace('\'', "'\\''"))
    } else {
        s.into_owned()
    }
}

fn first_non_empty_line(text: &str) -> String {
    text.lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}

/// Run `<tool> -version` and report whether the tool is usable.
pub fn check_tool(tool: &str) -> Result<(), ToolError> {
    let mut cmd = Command::new(tool);
    cmd.arg("-version");
    configure_command(&mut cmd);

    match cmd.output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(output) => {
            let detail = first_non_empty_line(&sanitize_cmd_error(&output));
            Err(ToolError::Failed {
                tool: tool.to_string(),
                detail: if detail.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    detail
                },
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ToolError::NotFound {
            tool: tool.to_string(),
        }),
        Err(e) => Err(ToolError::NotExecutable {
            tool: tool.to_string(),
            detail: e.to_string(),
        }),
    }
}
