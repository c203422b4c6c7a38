//! Localization directory stubs.
//!
//! macOS surfaces an application's supported languages from `<locale>.lproj`
//! directories beside the resource archive; empty stubs are enough for the
//! system language switcher.

use crate::config::ProjectConfig;
use crate::dist::StepOutcome;
use crate::dist::target::{Os, PlatformTarget};
use crate::error::Result;
use crate::util::glob::resolve_unique;
use std::path::Path;
use tokio::fs;

/// Creates one empty `<locale>.lproj` directory per supported locale beside
/// the packaged resource archive. Applies to macOS targets only; other
/// platforms are reported as skipped and no files are touched.
pub async fn make_lproj_stubs(
    config: &ProjectConfig,
    target: &PlatformTarget,
    bundle: &Path,
) -> Result<StepOutcome> {
    if target.os != Os::Darwin {
        return Ok(StepOutcome::Skipped);
    }

    let pattern = format!("{}/**/atom.asar", bundle.display());
    let asar = resolve_unique(&pattern)?;
    let resources = asar.parent().expect("resource archive has a parent");

    for locale in &config.locales {
        fs::create_dir_all(resources.join(format!("{locale}.lproj"))).await?;
    }
    Ok(StepOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::target::Arch;
    use crate::error::Error;
    use std::fs as stdfs;

    fn fixture() -> (tempfile::TempDir, ProjectConfig) {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = ProjectConfig::default();
        config.root = dir.path().to_path_buf();
        (dir, config)
    }

    #[tokio::test]
    async fn creates_stub_per_locale_beside_the_archive() {
        let (dir, config) = fixture();
        let resources = dir.path().join("bundle/IRKit Updater.app/Contents/Resources");
        stdfs::create_dir_all(&resources).expect("mkdir");
        stdfs::write(resources.join("atom.asar"), "asar").expect("write");
        let target = PlatformTarget {
            os: Os::Darwin,
            arch: Arch::X64,
        };

        let outcome = make_lproj_stubs(&config, &target, &dir.path().join("bundle"))
            .await
            .expect("stubs");
        assert_eq!(outcome, StepOutcome::Completed);
        assert!(resources.join("ja.lproj").is_dir());
    }

    #[tokio::test]
    async fn skips_windows_without_touching_the_bundle() {
        let (dir, config) = fixture();
        let bundle = dir.path().join("bundle");
        stdfs::create_dir_all(&bundle).expect("mkdir");
        let target = PlatformTarget {
            os: Os::Win32,
            arch: Arch::X64,
        };

        let outcome = make_lproj_stubs(&config, &target, &bundle)
            .await
            .expect("stubs");
        assert_eq!(outcome, StepOutcome::Skipped);
        assert_eq!(stdfs::read_dir(&bundle).expect("dir").count(), 0);
    }

    #[tokio::test]
    async fn missing_resource_archive_is_fatal() {
        let (dir, config) = fixture();
        let bundle = dir.path().join("bundle");
        stdfs::create_dir_all(&bundle).expect("mkdir");
        let target = PlatformTarget {
            os: Os::Darwin,
            arch: Arch::X64,
        };

        let err = make_lproj_stubs(&config, &target, &bundle).await.unwrap_err();
        assert!(matches!(err, Error::ZeroMatches { .. }));
    }
}
