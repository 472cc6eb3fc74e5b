//! Generation of the pre-commit configuration and hook config files.
//!
//! Includes rendering `.pre-commit-config.yaml` from the hook registry,
//! writing the standalone hook config files, and keeping `.gitignore` in
//! sync with the generated file names.

mod generator;

pub use generator::*;
