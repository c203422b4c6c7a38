//! Localization catalog extraction and conversion.
//!
//! Two sequential stages per locale: scan every script file for
//! translatable strings into a PO catalog, then convert the catalog into
//! the JSON mapping the packaged application reads at runtime.

use crate::config::ProjectConfig;
use crate::error::Result;
use regex::Regex;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::LazyLock;
use tokio::fs;
use walkdir::WalkDir;

static CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\bgettext|\b_)\(\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#)
        .expect("valid call pattern")
});

/// Runs both stages for every configured locale.
pub async fn run(config: &ProjectConfig) -> Result<()> {
    for locale in &config.locales {
        let catalog = extract(config, locale).await?;
        let json = convert(config, locale).await?;
        log::info!(
            "locale `{locale}`: {} -> {}",
            catalog.display(),
            json.display()
        );
    }
    Ok(())
}

/// Scans the script tree for translatable strings and writes the locale's
/// PO catalog. Returns the catalog path.
///
/// Message order is first occurrence in a lexicographic walk of the script
/// tree, so repeated extraction is deterministic.
pub async fn extract(config: &ProjectConfig, locale: &str) -> Result<PathBuf> {
    let scripts = config.root.join(&config.javascripts_dir);
    let mut messages: Vec<String> = Vec::new();

    let mut files: Vec<PathBuf> = WalkDir::new(&scripts)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "js")
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();

    for file in files {
        let source = fs::read_to_string(&file).await?;
        for captures in CALL.captures_iter(&source) {
            let raw = captures
                .get(1)
                .or_else(|| captures.get(2))
                .expect("one quoting alternative matched")
                .as_str();
            let message = unescape(raw);
            if !message.is_empty() && !messages.contains(&message) {
                messages.push(message);
            }
        }
    }

    let mut catalog = String::from(
        "msgid \"\"\nmsgstr \"\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n",
    );
    for message in &messages {
        catalog.push('\n');
        catalog.push_str(&format!("msgid \"{}\"\nmsgstr \"\"\n", escape_po(message)));
    }

    let po_dir = config.root.join(&config.po_dir);
    fs::create_dir_all(&po_dir).await?;
    let path = po_dir.join(format!("{locale}.po"));
    fs::write(&path, catalog).await?;
    Ok(path)
}

/// Converts the locale's PO catalog into a JSON mapping of msgid to msgstr.
/// Returns the JSON path.
pub async fn convert(config: &ProjectConfig, locale: &str) -> Result<PathBuf> {
    let po_dir = config.root.join(&config.po_dir);
    let catalog = fs::read_to_string(po_dir.join(format!("{locale}.po"))).await?;

    let mut mapping: Map<String, Value> = Map::new();
    let mut msgid: Option<String> = None;
    let mut msgstr: Option<String> = None;
    let mut current: Option<Field> = None;

    for line in catalog.lines().chain(std::iter::once("")) {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("msgid ") {
            flush(&mut mapping, &mut msgid, &mut msgstr);
            msgid = Some(unescape_po(rest));
            current = Some(Field::Id);
        } else if let Some(rest) = line.strip_prefix("msgstr ") {
            msgstr = Some(unescape_po(rest));
            current = Some(Field::Str);
        } else if line.starts_with('"') {
            // continuation of the preceding field
            let text = unescape_po(line);
            match current {
                Some(Field::Id) => {
                    if let Some(id) = &mut msgid {
                        id.push_str(&text);
                    }
                }
                Some(Field::Str) => {
                    if let Some(s) = &mut msgstr {
                        s.push_str(&text);
                    }
                }
                None => {}
            }
        } else if line.is_empty() {
            flush(&mut mapping, &mut msgid, &mut msgstr);
            current = None;
        }
    }

    let path = po_dir.join(format!("{locale}.json"));
    let mut text = serde_json::to_string_pretty(&Value::Object(mapping))?;
    text.push('\n');
    fs::write(&path, text).await?;
    Ok(path)
}

enum Field {
    Id,
    Str,
}

fn flush(mapping: &mut Map<String, Value>, msgid: &mut Option<String>, msgstr: &mut Option<String>) {
    if let (Some(id), Some(s)) = (msgid.take(), msgstr.take()) {
        // the header entry has an empty msgid
        if !id.is_empty() {
            mapping.insert(id, Value::String(s));
        }
    }
}

fn escape_po(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Resolves backslash escapes shared by JS string literals and PO fields.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn unescape_po(field: &str) -> String {
    let inner = field.trim();
    let inner = inner.strip_prefix('"').unwrap_or(inner);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    unescape(inner)
}
