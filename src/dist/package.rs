//! Application packaging.
//!
//! Invokes the external `electron-packager` on the Build Tree. The bundle
//! lands at a deterministic path derived from the target, so downstream
//! post-processing needs no data handed across tasks.

use crate::config::ProjectConfig;
use crate::dist::target::PlatformTarget;
use crate::error::Result;
use crate::process;
use std::path::PathBuf;

/// Deterministic path of the packaged application bundle for a target.
pub fn bundle_path(config: &ProjectConfig, target: &PlatformTarget) -> PathBuf {
    config
        .dist_path()
        .join(target.os.as_str())
        .join(target.bundle_dir_name(&config.app_name))
}

/// Packages the Build Tree into a platform application bundle.
///
/// Fatal on packager error; the packager's diagnostics propagate verbatim.
pub async fn package_app(
    config: &ProjectConfig,
    target: &PlatformTarget,
    app_version: &str,
) -> Result<()> {
    let out = config.dist_path().join(target.os.as_str());

    let args = [
        config.build_dir.to_string_lossy().into_owned(),
        config.app_name.clone(),
        format!("--platform={}", target.os.as_str()),
        format!("--arch={}", target.arch.as_str()),
        format!("--version={}", config.electron_version),
        format!("--out={}", out.display()),
        format!("--icon={}", config.icon.display()),
        format!("--app-bundle-id={}", config.bundle_id),
        format!("--app-version={app_version}"),
        format!("--version-string.CompanyName={}", config.company_name),
        format!("--version-string.FileDescription={}", config.app_name),
        format!("--version-string.FileVersion={app_version}"),
        format!("--version-string.ProductVersion={app_version}"),
        format!("--version-string.ProductName={}", config.app_name),
    ];

    process::run("electron-packager", args, Some(&config.root)).await
}
