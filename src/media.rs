//! External media tools.
//!
//! Duration probing and segment extraction sit behind the [`DurationProbe`]
//! and [`Extractor`] traits. The production implementations shell out to
//! `ffprobe` / `ffmpeg`; probing can also be done in-process with `lofty`.
//! Every invocation returns an explicit result, exit codes included.

mod extract;
mod probe;
mod process;
mod tags;

pub use extract::*;
pub use probe::*;
pub use process::{ToolError, check_tool};
pub use tags::*;
