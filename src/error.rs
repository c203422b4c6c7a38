//! Error types for the build pipeline.
//!
//! Every stage is all-or-nothing: external tool failures, glob cardinality
//! violations and missing resources are all fatal and abort the enclosing
//! pipeline stage together with its dependents.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all pipeline operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON manifest errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Semantic version parse errors
    #[error("invalid version: {0}")]
    Semver(#[from] semver::Error),

    /// Glob pattern syntax errors
    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Glob traversal errors
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// Directory walk errors
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Archive creation errors
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Filesystem watcher errors
    #[error("watch error: {0}")]
    Notify(#[from] notify::Error),

    /// An external tool exited unsuccessfully. The tool's stderr is carried
    /// verbatim.
    #[error("`{tool}` failed ({status})\n{stderr}")]
    ToolFailed {
        /// Tool that failed
        tool: String,
        /// Exit status reported by the OS
        status: ExitStatus,
        /// Captured standard error output
        stderr: String,
    },

    /// A required external tool is not installed
    #[error("`{tool}` not found on PATH")]
    ToolMissing {
        /// Tool that could not be located
        tool: String,
    },

    /// A glob that must resolve to exactly one path matched nothing
    #[error("expected exactly one match for `{pattern}`, found none")]
    ZeroMatches {
        /// Pattern that failed to match
        pattern: String,
    },

    /// A glob that must resolve to exactly one path matched several
    #[error(
        "expected exactly one match for `{pattern}`, found {}: {}",
        .matches.len(),
        display_paths(.matches)
    )]
    MultipleMatches {
        /// Pattern that matched ambiguously
        pattern: String,
        /// Every path the pattern matched
        matches: Vec<PathBuf>,
    },

    /// A dependency's entry point could not be resolved from its manifest
    #[error("cannot resolve entry point for dependency `{0}`")]
    EntryPoint(String),

    /// A required manifest field is absent
    #[error("{path}: missing `{field}`")]
    MissingField {
        /// Manifest the field was expected in
        path: PathBuf,
        /// Dotted field name
        field: String,
    },

    /// HTML build-block parse errors
    #[error("{file}: {reason}")]
    HtmlParse {
        /// HTML file being resolved
        file: PathBuf,
        /// What was malformed
        reason: String,
    },

    /// Two tasks were registered under the same name
    #[error("duplicate task `{0}`")]
    DuplicateTask(String),

    /// A dependency edge referenced an unregistered task
    #[error("unknown task `{0}`")]
    UnknownTask(String),

    /// The task graph is not a DAG
    #[error("task graph contains a dependency cycle")]
    TaskCycle,

    /// A task panicked instead of returning
    #[error("task panicked: {0}")]
    TaskPanicked(String),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
