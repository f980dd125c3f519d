//! Configuration loader and schema types.
//!
//! Settings cover tool locations, split defaults and where the archive goes.
//! Command-line flags override whatever is loaded here.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;
