//! Build and distribution pipeline for the IRKit Updater desktop app.
//!
//! The pipeline stages:
//! - build: populate the platform-agnostic Build Tree (stylesheets, HTML
//!   with resolved asset references, scripts, bundled dependencies, static
//!   assets)
//! - dist: package the Build Tree per platform target, post-process each
//!   bundle (native module, driver, locale stubs, acknowledgements) and zip
//!   it
//!
//! Stages are modeled as an explicit task graph ([`tasks::TaskGraph`]) with
//! dependencies as data. It can be used both as a CLI tool and as a library
//! dependency.

pub mod build;
pub mod cli;
pub mod config;
pub mod dist;
pub mod error;
pub mod l10n;
pub mod manifest;
pub mod notifier;
pub mod process;
pub mod tasks;
pub mod util;
pub mod version;
pub mod watch;

// Re-export commonly used types
pub use config::ProjectConfig;
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use tasks::TaskGraph;
