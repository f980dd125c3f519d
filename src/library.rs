//! Inputs of a run: which files to split and with what metadata.

mod jobs;
mod manifest;
mod model;
mod scan;

pub use jobs::{JobDefaults, build_jobs};
pub use manifest::{Manifest, ManifestEntry};
pub use model::{FileJob, SourceTrack, base_name_of, file_name_of};
pub use scan::{InputError, collect_inputs, scan};
