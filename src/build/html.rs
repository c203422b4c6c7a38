//! HTML asset-reference resolution.
//!
//! Top-level HTML files declare asset groups with block comments:
//!
//! ```html
//! <!-- build:js javascripts/app.js -->
//! <script src="javascripts/a.js"></script>
//! <script src="javascripts/b.js"></script>
//! <!-- endbuild -->
//! ```
//!
//! Each block is replaced by a single reference to a concatenated asset
//! written under the Build Tree. Malformed or unterminated markers are a
//! fatal parse error; there is no defined recovery.

use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;

static BLOCK_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s*build:(\w+)\s+(\S+)\s*-->").expect("valid start pattern")
});
static BLOCK_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*endbuild\s*-->").expect("valid end pattern"));
static ASSET_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:src|href)\s*=\s*["']([^"']+)["']"#).expect("valid ref pattern")
});

/// Resolves build blocks in every top-level HTML file, writing rewritten
/// HTML and concatenated assets into the Build Tree.
pub async fn build_html(config: &ProjectConfig) -> Result<()> {
    let pattern = config.root.join("*.html");
    let pattern = pattern.to_string_lossy();

    for entry in glob::glob(&pattern)? {
        let html_path = entry?;
        resolve_file(config, &html_path).await?;
    }
    Ok(())
}

async fn resolve_file(config: &ProjectConfig, html_path: &Path) -> Result<()> {
    let source = fs::read_to_string(html_path).await?;
    let resolved = rewrite(config, html_path, &source).await?;

    let file_name = html_path
        .file_name()
        .expect("glob only yields named files");
    let dest = config.build_path().join(file_name);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(dest, resolved).await?;
    Ok(())
}

async fn rewrite(config: &ProjectConfig, html_path: &Path, source: &str) -> Result<String> {
    let mut output = String::with_capacity(source.len());
    let mut block: Option<BlockState> = None;

    for line in source.lines() {
        if let Some(captures) = BLOCK_START.captures(line) {
            if block.is_some() {
                return Err(parse_error(html_path, "nested build block"));
            }
            let kind = captures[1].to_string();
            if kind != "js" && kind != "css" {
                return Err(parse_error(
                    html_path,
                    &format!("unknown build block type `{kind}`"),
                ));
            }
            block = Some(BlockState {
                kind,
                target: captures[2].to_string(),
                refs: Vec::new(),
            });
            continue;
        }

        if BLOCK_END.is_match(line) {
            let Some(state) = block.take() else {
                return Err(parse_error(html_path, "endbuild without build marker"));
            };
            if state.refs.is_empty() {
                return Err(parse_error(
                    html_path,
                    &format!("build block `{}` references no assets", state.target),
                ));
            }
            concatenate(config, &state).await?;
            output.push_str(&state.replacement_tag());
            output.push('\n');
            continue;
        }

        match &mut block {
            Some(state) => {
                for captures in ASSET_REF.captures_iter(line) {
                    state.refs.push(captures[1].to_string());
                }
            }
            None => {
                output.push_str(line);
                output.push('\n');
            }
        }
    }

    if let Some(state) = block {
        return Err(parse_error(
            html_path,
            &format!("unterminated build block `{}`", state.target),
        ));
    }
    Ok(output)
}

struct BlockState {
    kind: String,
    target: String,
    refs: Vec<String>,
}

impl BlockState {
    fn replacement_tag(&self) -> String {
        match self.kind.as_str() {
            "js" => format!(r#"<script src="{}"></script>"#, self.target),
            _ => format!(r#"<link rel="stylesheet" href="{}">"#, self.target),
        }
    }
}

/// Concatenates a block's referenced assets into its target path under the
/// Build Tree. A missing asset is fatal.
async fn concatenate(config: &ProjectConfig, block: &BlockState) -> Result<()> {
    let mut combined = String::new();
    for reference in &block.refs {
        let asset = config.root.join(reference);
        combined.push_str(&fs::read_to_string(&asset).await?);
        if !combined.ends_with('\n') {
            combined.push('\n');
        }
    }

    let dest = config.build_path().join(&block.target);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(dest, combined).await?;
    Ok(())
}

fn parse_error(file: &Path, reason: &str) -> Error {
    Error::HtmlParse {
        file: file.to_path_buf(),
        reason: reason.to_string(),
    }
}
