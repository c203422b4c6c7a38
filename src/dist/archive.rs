//! Distribution archiving.
//!
//! Zips a packaged bundle directory, hidden files included, keeping the
//! bundle directory name as the top-level prefix inside the archive. The
//! bundle directory itself is left in place.

use crate::error::{Error, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Recursively zips `bundle` into `archive`.
pub async fn archive_bundle(bundle: &Path, archive: &Path) -> Result<()> {
    let bundle = bundle.to_path_buf();
    let archive = archive.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let base = bundle
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        if let Some(parent) = archive.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&archive)?;
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in walkdir::WalkDir::new(&bundle) {
            let entry = entry?;
            let name = entry
                .path()
                .strip_prefix(&base)
                .expect("walked path is under the bundle parent")
                .to_string_lossy()
                .replace('\\', "/");

            if entry.file_type().is_dir() {
                writer.add_directory(name, options)?;
            } else {
                writer.start_file(name, options)?;
                let mut source = File::open(entry.path())?;
                io::copy(&mut source, &mut writer)?;
            }
        }

        writer.finish()?;
        Ok(())
    })
    .await
    .map_err(|e| Error::TaskPanicked(e.to_string()))?
}
