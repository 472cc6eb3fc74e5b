//! Handles the per-project settings for this tool.
//!
//! Includes:
//! - `Selection`: which hooks are active for a run, resolved from CLI flags
//!   and the settings file.
//! - `SettingsFile`: reading, writing and validating the `.precommit-gen.yaml`
//!   settings file.

mod file;
mod selection;

pub use file::*;
pub use selection::*;
