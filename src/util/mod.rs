//! Shared filesystem and path-resolution utilities.

pub mod fs;
pub mod glob;
