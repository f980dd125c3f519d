//! Segmentation: how a probed file is cut into equal-length tracks.
//!
//! `segment` holds the pure per-file computation; `plan` threads the global
//! track number through every file of a run.

mod plan;
mod segment;

pub use plan::*;
pub use segment::*;

#[cfg(test)]
mod tests;
