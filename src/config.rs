//! Project configuration.
//!
//! [`ProjectConfig`] describes the source layout and packaging identity of
//! the application being built. Every field has a default matching the IRKit
//! Updater project; an optional `irkit-build.toml` at the project root
//! overrides individual fields.

use crate::dist::target::PlatformTarget;
use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional override file at the project root.
pub const CONFIG_FILE: &str = "irkit-build.toml";

/// Project layout and packaging configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project root; everything else is resolved against it. Not read from
    /// the override file.
    #[serde(skip)]
    pub root: PathBuf,

    /// Product name shown to users and embedded in artifact names.
    pub app_name: String,

    /// macOS bundle identifier.
    pub bundle_id: String,

    /// Company name for the Windows version resource.
    pub company_name: String,

    /// Electron runtime version handed to the packager.
    pub electron_version: String,

    /// Build Tree directory (platform-agnostic staging area).
    pub build_dir: PathBuf,

    /// Per-platform distribution output directory.
    pub dist_dir: PathBuf,

    /// Stylesheet source tree.
    pub sass_dir: PathBuf,

    /// Script source tree.
    pub javascripts_dir: PathBuf,

    /// Localization catalog directory.
    pub po_dir: PathBuf,

    /// Application icon for the packager.
    pub icon: PathBuf,

    /// Supported locales; one `<locale>.lproj` stub per entry on macOS.
    pub locales: Vec<String>,

    /// Host-provided modules excluded from dependency bundles so they
    /// resolve at runtime instead of being inlined.
    pub host_modules: Vec<String>,

    /// The native binary module, also excluded from bundles.
    pub native_module: String,

    /// npm package carrying the prebuilt native module.
    pub native_module_package: String,

    /// Windows driver definition placed at the bundle top level.
    pub driver_file: PathBuf,

    /// Glob patterns of static assets copied verbatim into the Build Tree.
    pub asset_globs: Vec<String>,

    /// Platform targets to package for.
    pub targets: Vec<PlatformTarget>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            root: PathBuf::from("."),
            app_name: "IRKit Updater".into(),
            bundle_id: "jp.maaash.irkitupdater".into(),
            company_name: "maaash.jp".into(),
            electron_version: "0.30.4".into(),
            build_dir: "build".into(),
            dist_dir: "dist".into(),
            sass_dir: "sass".into(),
            javascripts_dir: "javascripts".into(),
            po_dir: "po".into(),
            icon: "images/AppIcon.icns".into(),
            locales: vec!["ja".into()],
            host_modules: [
                "assert",
                "buffer",
                "console",
                "constants",
                "crypto",
                "domain",
                "events",
                "fs",
                "http",
                "https",
                "os",
                "path",
                "punycode",
                "querystring",
                "stream",
                "string_decoder",
                "timers",
                "tty",
                "url",
                "util",
                "vm",
                "zlib",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            native_module: "./serialport.node".into(),
            native_module_package: "serialport-electron".into(),
            driver_file: "windows-driver/IRKit.inf".into(),
            asset_globs: [
                "etc/**",
                "bin/**",
                "fonts/**",
                "images/**",
                "package.json",
                "po/**",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            targets: PlatformTarget::ALL.to_vec(),
        }
    }
}

impl ProjectConfig {
    /// Loads configuration for a project root, applying `irkit-build.toml`
    /// overrides when the file exists.
    pub fn load(root: &Path) -> Result<Self> {
        let override_path = root.join(CONFIG_FILE);
        let mut config = if override_path.is_file() {
            let text = std::fs::read_to_string(&override_path)?;
            toml::from_str(&text)?
        } else {
            ProjectConfig::default()
        };
        config.root = root.to_path_buf();
        Ok(config)
    }

    /// Absolute Build Tree path.
    pub fn build_path(&self) -> PathBuf {
        self.root.join(&self.build_dir)
    }

    /// Absolute distribution output path.
    pub fn dist_path(&self) -> PathBuf {
        self.root.join(&self.dist_dir)
    }

    /// Absolute path of the project manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("package.json")
    }

    /// Absolute path of the installed dependency tree.
    pub fn node_modules_path(&self) -> PathBuf {
        self.root.join("node_modules")
    }
}
