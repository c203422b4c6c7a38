//! Unique path resolution.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Expands a glob that must match exactly one path.
///
/// Packaging invariants are expressed with this: the packaged bundle has
/// exactly one native-module slot and exactly one resource archive. Zero
/// matches means the bundle is malformed; multiple matches mean the pattern
/// is ambiguous. Both are fatal, with the mismatch named in the error.
pub fn resolve_unique(pattern: &str) -> Result<PathBuf> {
    let mut matches = glob::glob(pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(Error::ZeroMatches {
            pattern: pattern.to_string(),
        }),
        _ => Err(Error::MultipleMatches {
            pattern: pattern.to_string(),
            matches,
        }),
    }
}
