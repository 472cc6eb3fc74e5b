//! Defines the pre-commit hooks managed by this tool.
//!
//! The central piece is the hook registry: a static table enumerating every
//! hook, its inclusion policy and the files it contributes.

mod registry;

pub use registry::*;
