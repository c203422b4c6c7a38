//! Runtime dependency bundling.
//!
//! Each declared dependency is bundled into a single-file artifact with the
//! external `browserify` bundler. Host-provided modules and the native
//! binary module are excluded so they resolve at runtime instead of being
//! inlined. The dependency's own manifest is copied alongside so runtime
//! resolution still finds its entry point.

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::manifest::{self, Manifest};
use crate::process;
use crate::util::fs::copy_file;
use tokio::fs;

/// Bundles every declared dependency into the Build Tree.
///
/// An unresolvable entry point fails the whole task; there is no
/// skip-and-continue.
pub async fn bundle_modules(config: &ProjectConfig, manifest: &Manifest) -> Result<()> {
    let node_modules = config.node_modules_path();
    let out_root = config.build_path().join("node_modules");

    for dependency in manifest.dependency_names() {
        let entry = manifest::entry_point(&node_modules, dependency)?;
        let entry_str = entry.to_string_lossy().into_owned();
        let source = node_modules.join(dependency).join(&entry);
        let out_dir = out_root.join(dependency);
        let out_file = out_dir.join(&entry);
        if let Some(parent) = out_file.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut args = vec![
            source.to_string_lossy().into_owned(),
            "--no-detect-globals".into(),
            "--standalone".into(),
            entry_str,
        ];
        for module in &config.host_modules {
            args.push("--exclude".into());
            args.push(module.clone());
        }
        args.push("--exclude".into());
        args.push(config.native_module.clone());
        args.push("--outfile".into());
        args.push(out_file.to_string_lossy().into_owned());

        log::info!("bundling dependency `{dependency}`");
        process::run("browserify", args, Some(&config.root)).await?;

        copy_file(
            &node_modules.join(dependency).join("package.json"),
            &out_dir.join("package.json"),
        )
        .await?;
    }

    // The prebuilt native module travels with the Build Tree unchanged.
    let native = node_modules
        .join(&config.native_module_package)
        .join("serialport.node");
    let native_dest = out_root
        .join(&config.native_module_package)
        .join("serialport.node");
    copy_file(&native, &native_dest).await?;

    Ok(())
}
