//! Manifest (`package.json`) reading and writing.
//!
//! The manifest is the single structured record shared across the pipeline:
//! the version bumper mutates it, the dependency bundler and license
//! aggregator iterate its dependencies. Dependency declaration order is
//! preserved (serde_json's `preserve_order`) because the acknowledgements
//! document must list dependencies in declared order.

use crate::error::{Error, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// The project manifest.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Manifest {
    /// Package name
    pub name: String,

    /// Semantic version string
    pub version: String,

    /// Runtime dependencies, in declaration order
    #[serde(default)]
    pub dependencies: Map<String, Value>,

    /// Fields this tool does not interpret, carried through write-back
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Manifest {
    /// Reads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Writes the manifest back to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Dependency names in declaration order.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    /// Parses the version field.
    pub fn semver(&self) -> Result<Version> {
        Ok(Version::parse(&self.version)?)
    }
}

/// Resolves a dependency's entry-point file from its own manifest.
///
/// Reads `node_modules/<dep>/package.json` and returns the `main` field as a
/// path relative to the dependency root. An entry point declared without an
/// extension gets `.js` appended (some packages declare `"main": "serialport"`
/// for `serialport.js`).
///
/// # Errors
///
/// [`Error::EntryPoint`] when the dependency manifest is unreadable or has
/// no usable `main` field. There is no skip-and-continue: the caller's whole
/// task fails.
pub fn entry_point(node_modules: &Path, dependency: &str) -> Result<PathBuf> {
    let manifest_path = node_modules.join(dependency).join("package.json");
    let value = read_json(&manifest_path)
        .map_err(|_| Error::EntryPoint(dependency.to_string()))?;

    let main = value
        .get("main")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::EntryPoint(dependency.to_string()))?;

    let mut entry = PathBuf::from(main);
    if entry.extension().is_none() {
        entry.set_extension("js");
    }
    Ok(entry)
}

/// Reads a dependency's source-repository URL for acknowledgements.
///
/// npm allows `repository` to be either a bare URL string or an object with
/// a `url` key; both forms occur in practice.
pub fn repository_url(node_modules: &Path, dependency: &str) -> Result<String> {
    let manifest_path = node_modules.join(dependency).join("package.json");
    let value = read_json(&manifest_path)?;

    let url = match value.get("repository") {
        Some(Value::String(url)) => Some(url.clone()),
        Some(Value::Object(repo)) => repo
            .get("url")
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    };

    url.ok_or_else(|| Error::MissingField {
        path: manifest_path,
        field: "repository.url".into(),
    })
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dep_manifest(node_modules: &Path, dep: &str, body: &str) {
        let dir = node_modules.join(dep);
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(dir.join("package.json"), body).expect("write");
    }

    #[test]
    fn dependencies_keep_declaration_order() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "name": "irkit-updater",
                "version": "1.2.3",
                "dependencies": { "zeta": "^1.0.0", "alpha": "^2.0.0" }
            }"#,
        )
        .expect("parse");

        let names: Vec<_> = manifest.dependency_names().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn save_round_trips_unknown_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("package.json");
        fs::write(
            &path,
            r#"{"name":"app","version":"0.1.0","scripts":{"start":"electron ."}}"#,
        )
        .expect("write");

        let manifest = Manifest::load(&path).expect("load");
        manifest.save(&path).expect("save");

        let reloaded: Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
        assert_eq!(reloaded["scripts"]["start"], "electron .");
    }

    #[test]
    fn entry_point_appends_js_when_extension_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_dep_manifest(dir.path(), "serialport-electron", r#"{"main": "serialport"}"#);

        let entry = entry_point(dir.path(), "serialport-electron").expect("resolve");
        assert_eq!(entry, PathBuf::from("serialport.js"));
    }

    #[test]
    fn entry_point_keeps_existing_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_dep_manifest(dir.path(), "dep", r#"{"main": "lib/index.js"}"#);

        let entry = entry_point(dir.path(), "dep").expect("resolve");
        assert_eq!(entry, PathBuf::from("lib/index.js"));
    }

    #[test]
    fn unresolvable_entry_point_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_dep_manifest(dir.path(), "broken", r#"{"name": "broken"}"#);

        let err = entry_point(dir.path(), "broken").unwrap_err();
        assert!(matches!(err, Error::EntryPoint(ref dep) if dep == "broken"));

        let err = entry_point(dir.path(), "absent").unwrap_err();
        assert!(matches!(err, Error::EntryPoint(_)));
    }

    #[test]
    fn repository_url_accepts_both_npm_forms() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_dep_manifest(
            dir.path(),
            "obj",
            r#"{"repository": {"type": "git", "url": "https://example.com/obj.git"}}"#,
        );
        write_dep_manifest(
            dir.path(),
            "str",
            r#"{"repository": "https://example.com/str.git"}"#,
        );

        assert_eq!(
            repository_url(dir.path(), "obj").expect("obj"),
            "https://example.com/obj.git"
        );
        assert_eq!(
            repository_url(dir.path(), "str").expect("str"),
            "https://example.com/str.git"
        );
    }
}
