//! Native module substitution.
//!
//! The bundler inlines JavaScript only; the platform's prebuilt native
//! binary module must replace the placeholder inside the packaged bundle.
//! The destination slot is resolved by glob and must match exactly one
//! path; ambiguity is a packaging invariant violation.

use crate::config::ProjectConfig;
use crate::dist::StepOutcome;
use crate::dist::target::PlatformTarget;
use crate::error::Result;
use crate::util::fs::copy_file;
use crate::util::glob::resolve_unique;
use std::path::Path;

/// Substitutes the target's prebuilt `serialport.node` into the packaged
/// bundle's single native-module slot.
pub async fn substitute_native_module(
    config: &ProjectConfig,
    target: &PlatformTarget,
    bundle: &Path,
) -> Result<StepOutcome> {
    let source = config.root.join("etc").join(format!(
        "serialport.node.{}",
        target.native_module_suffix()
    ));

    let pattern = format!(
        "{}/**/{}/serialport.node",
        bundle.display(),
        config.native_module_package
    );
    let destination = resolve_unique(&pattern)?;

    copy_file(&source, &destination).await?;
    Ok(StepOutcome::Completed)
}
