//! Distribution pipeline.
//!
//! One parameterized pipeline per platform target, generated from the
//! configured target list: package the Build Tree, post-process the bundle
//! (four independent steps), then archive. The distribution orchestrator
//! sequences clean → build → every target pipeline in parallel → notify.

pub mod archive;
pub mod driver;
pub mod licenses;
pub mod lproj;
pub mod native;
pub mod package;
pub mod target;

use crate::build;
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::notifier;
use crate::tasks::TaskGraph;
use crate::util::fs::remove_path;
use std::sync::Arc;
use target::PlatformTarget;

/// How a post-processing step concluded.
///
/// Distinguishes "this platform doesn't need the step" from "the step ran";
/// a skipped step is guaranteed to have touched no files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    /// The step ran and mutated the bundle.
    Completed,
    /// The step does not apply to this target; nothing was touched.
    Skipped,
}

/// Removes the Build Tree and prior distribution artifacts.
pub async fn clean(config: &ProjectConfig) -> Result<()> {
    remove_path(&config.build_path()).await?;
    remove_path(&config.dist_path()).await?;
    Ok(())
}

/// Registers one target's pipeline on the graph and returns the name of its
/// terminal (archive) task.
///
/// Graph shape per target: `package` precedes all four post-processing
/// steps, each of which precedes `zip`. The fan-out members are mutually
/// unordered; they mutate disjoint parts of the bundle.
pub fn add_target_pipeline(
    graph: &mut TaskGraph,
    config: Arc<ProjectConfig>,
    manifest: Arc<Manifest>,
    target: PlatformTarget,
) -> Result<String> {
    let prefix = target.task_prefix();
    let bundle = package::bundle_path(&config, &target);
    let app_version = manifest.version.clone();

    let package_task = format!("{prefix}:packager");
    {
        let config = config.clone();
        let app_version = app_version.clone();
        graph.add(&package_task, async move {
            package::package_app(&config, &target, &app_version).await
        })?;
    }

    let native_task = format!("{prefix}:copyserialnode");
    {
        let config = config.clone();
        let bundle = bundle.clone();
        graph.add(&native_task, async move {
            let outcome = native::substitute_native_module(&config, &target, &bundle).await?;
            log_outcome("native module substitution", &target, outcome);
            Ok(())
        })?;
    }

    let driver_task = format!("{prefix}:copydriver");
    {
        let config = config.clone();
        let bundle = bundle.clone();
        graph.add(&driver_task, async move {
            let outcome = driver::place_driver(&config, &target, &bundle).await?;
            log_outcome("driver placement", &target, outcome);
            Ok(())
        })?;
    }

    let lproj_task = format!("{prefix}:makelproj");
    {
        let config = config.clone();
        let bundle = bundle.clone();
        graph.add(&lproj_task, async move {
            let outcome = lproj::make_lproj_stubs(&config, &target, &bundle).await?;
            log_outcome("lproj stubs", &target, outcome);
            Ok(())
        })?;
    }

    let license_task = format!("{prefix}:copylicense");
    {
        let config = config.clone();
        let bundle = bundle.clone();
        graph.add(&license_task, async move {
            licenses::aggregate_licenses(&config, &manifest, &bundle).await
        })?;
    }

    let zip_task = format!("{prefix}:zip");
    {
        let archive_path = config
            .dist_path()
            .join(target.os.as_str())
            .join(target.archive_name(&config.app_name, &app_version));
        graph.add(&zip_task, async move {
            archive::archive_bundle(&bundle, &archive_path).await
        })?;
    }

    for step in [&native_task, &driver_task, &lproj_task, &license_task] {
        graph.depend(step, &package_task)?;
        graph.depend(&zip_task, step)?;
    }
    Ok(zip_task)
}

/// Runs the full distribution pipeline for every configured target.
///
/// Any stage failure aborts the remaining stages; there is no retry and no
/// cleanup of partially written artifacts. The completion notification is
/// the one advisory step and cannot fail the pipeline.
pub async fn run(config: Arc<ProjectConfig>, manifest: Arc<Manifest>) -> Result<()> {
    let mut graph = TaskGraph::new();

    {
        let config = config.clone();
        graph.add("clean", async move { clean(&config).await })?;
    }
    {
        let config = config.clone();
        let manifest = manifest.clone();
        graph.add("build", async move {
            build::run(config, manifest, None).await
        })?;
    }
    graph.depend("build", "clean")?;

    {
        let app_name = config.app_name.clone();
        graph.add("notify", async move {
            notifier::notify_done(&app_name, "distribution complete").await;
            Ok(())
        })?;
    }

    for target in config.targets.clone() {
        let zip_task = add_target_pipeline(&mut graph, config.clone(), manifest.clone(), target)?;
        let package_task = format!("{}:packager", target.task_prefix());
        graph.depend(&package_task, "build")?;
        graph.depend("notify", &zip_task)?;
    }

    graph.run().await
}

fn log_outcome(step: &str, target: &PlatformTarget, outcome: StepOutcome) {
    match outcome {
        StepOutcome::Completed => log::debug!("{step} completed for {target}"),
        StepOutcome::Skipped => log::info!("{step} skipped (not applicable to {target})"),
    }
}
