//! Version bumping.
//!
//! Increments the manifest's semantic version, persists it, then commits
//! and tags the change with the external `git`. Any git failure is fatal
//! and propagated verbatim.

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::process;
use clap::ValueEnum;
use semver::Version;

/// Which semantic version field to increment.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum BumpLevel {
    /// x.y.Z
    Patch,
    /// x.Y.0
    Minor,
    /// X.0.0
    Major,
}

/// Increments a version, clearing pre-release and build metadata.
pub fn increment(version: &Version, level: BumpLevel) -> Version {
    let mut next = version.clone();
    next.pre = semver::Prerelease::EMPTY;
    next.build = semver::BuildMetadata::EMPTY;
    match level {
        BumpLevel::Patch => next.patch += 1,
        BumpLevel::Minor => {
            next.minor += 1;
            next.patch = 0;
        }
        BumpLevel::Major => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
        }
    }
    next
}

/// Bumps the manifest version, commits the manifest and tags `v{version}`.
pub async fn bump(config: &ProjectConfig, level: BumpLevel) -> Result<Version> {
    let manifest_path = config.manifest_path();
    let mut manifest = Manifest::load(&manifest_path)?;
    let next = increment(&manifest.semver()?, level);
    manifest.version = next.to_string();
    manifest.save(&manifest_path)?;
    log::info!("version is now {next}");

    process::run(
        "git",
        ["commit", "-m", "Version++", "package.json"],
        Some(&config.root),
    )
    .await?;
    process::run(
        "git",
        ["tag".to_string(), format!("v{next}")],
        Some(&config.root),
    )
    .await?;

    Ok(next)
}
