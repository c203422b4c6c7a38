//! Build Tree population with the tool-free sub-builders.
//!
//! The sass and browserify steps need external compilers and are covered by
//! their invocation paths; the copy-based sub-builders are exercised end to
//! end here, including the idempotence property: two runs over unchanged
//! sources yield byte-identical trees.

use irkit_build::build::{assets, html, scripts};
use irkit_build::{ProjectConfig, TaskGraph};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn fixture() -> (tempfile::TempDir, Arc<ProjectConfig>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    let mut config = ProjectConfig::default();
    config.root = root.to_path_buf();

    fs::create_dir_all(root.join("javascripts/lib")).expect("mkdir");
    fs::write(root.join("javascripts/app.js"), "var app;\n").expect("write");
    fs::write(root.join("javascripts/lib/util.js"), "var util;\n").expect("write");

    fs::create_dir_all(root.join("fonts")).expect("mkdir");
    fs::write(root.join("fonts/ui.woff"), "font").expect("write");
    fs::create_dir_all(root.join("etc")).expect("mkdir");
    fs::write(root.join("etc/serialport.node.win32_x64"), "native").expect("write");
    fs::write(root.join("package.json"), "{\"name\":\"app\",\"version\":\"1.2.3\"}")
        .expect("write");

    fs::write(
        root.join("index.html"),
        concat!(
            "<html>\n",
            "<!-- build:js javascripts/app.bundle.js -->\n",
            "<script src=\"javascripts/app.js\"></script>\n",
            "<script src=\"javascripts/lib/util.js\"></script>\n",
            "<!-- endbuild -->\n",
            "</html>\n",
        ),
    )
    .expect("write");

    (dir, Arc::new(config))
}

async fn populate(config: &Arc<ProjectConfig>) {
    let mut graph = TaskGraph::new();
    {
        let config = config.clone();
        graph
            .add("build:html", async move { html::build_html(&config).await })
            .expect("add");
    }
    {
        let config = config.clone();
        graph
            .add("build:scripts", async move {
                scripts::copy_scripts(&config).await
            })
            .expect("add");
    }
    {
        let config = config.clone();
        graph
            .add("build:etc", async move { assets::copy_assets(&config).await })
            .expect("add");
    }
    graph.run().await.expect("build");
}

fn tree_contents(root: &Path) -> BTreeMap<String, Vec<u8>> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let rel = entry
                .path()
                .strip_prefix(root)
                .expect("under root")
                .to_string_lossy()
                .into_owned();
            (rel, fs::read(entry.path()).expect("readable"))
        })
        .collect()
}

#[tokio::test]
async fn sub_builders_populate_disjoint_subtrees() {
    let (_dir, config) = fixture();
    populate(&config).await;

    let build = config.build_path();
    assert!(build.join("javascripts/app.js").is_file());
    assert!(build.join("javascripts/lib/util.js").is_file());
    assert!(build.join("fonts/ui.woff").is_file());
    assert!(build.join("etc/serialport.node.win32_x64").is_file());
    assert!(build.join("package.json").is_file());

    let html = fs::read_to_string(build.join("index.html")).expect("read html");
    assert!(html.contains(r#"<script src="javascripts/app.bundle.js"></script>"#));
    let bundle =
        fs::read_to_string(build.join("javascripts/app.bundle.js")).expect("read bundle");
    assert_eq!(bundle, "var app;\nvar util;\n");
}

#[tokio::test]
async fn repeated_builds_produce_identical_trees() {
    let (_dir, config) = fixture();
    populate(&config).await;
    let first = tree_contents(&config.build_path());
    populate(&config).await;
    let second = tree_contents(&config.build_path());
    assert_eq!(first, second);
}
