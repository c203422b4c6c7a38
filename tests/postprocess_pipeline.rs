//! Post-processing and archiving against a fake packaged bundle.
//!
//! Exercises the per-target pipeline from the point where the packager has
//! produced a bundle: the four post-processing steps run as a parallel
//! group, the archive step runs after all of them, and the zip contents
//! prove the barrier held.

use irkit_build::dist::target::{Arch, Os, PlatformTarget};
use irkit_build::dist::{archive, driver, licenses, lproj, native};
use irkit_build::{Manifest, ProjectConfig, TaskGraph};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn add_dependency(root: &Path, name: &str, license: &str) {
    let dir = root.join("node_modules").join(name);
    fs::create_dir_all(&dir).expect("mkdir dependency");
    fs::write(
        dir.join("package.json"),
        format!(r#"{{"repository": {{"url": "https://github.com/x/{name}"}}}}"#),
    )
    .expect("write dependency manifest");
    fs::write(dir.join("LICENSE"), license).expect("write dependency license");
}

struct Fixture {
    _dir: tempfile::TempDir,
    config: Arc<ProjectConfig>,
    manifest: Arc<Manifest>,
    bundle: PathBuf,
}

fn fixture(target: PlatformTarget) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().to_path_buf();

    let mut config = ProjectConfig::default();
    config.root = root.clone();
    config.targets = vec![target];

    fs::write(root.join("LICENSE"), "OUR LICENSE").expect("write project license");
    add_dependency(&root, "a", "LICENSE A");
    add_dependency(&root, "b", "LICENSE B");

    fs::create_dir_all(root.join("etc")).expect("mkdir etc");
    fs::write(
        root.join("etc").join(format!(
            "serialport.node.{}",
            target.native_module_suffix()
        )),
        b"prebuilt-native",
    )
    .expect("write native module");

    fs::create_dir_all(root.join("windows-driver")).expect("mkdir driver");
    fs::write(root.join("windows-driver/IRKit.inf"), "[Version]").expect("write driver");

    // what electron-packager would have produced
    let bundle = root
        .join("dist")
        .join(target.os.as_str())
        .join(target.bundle_dir_name("IRKit Updater"));
    let resources = bundle.join("resources");
    let slot = resources.join("app/node_modules/serialport-electron");
    fs::create_dir_all(&slot).expect("mkdir bundle");
    fs::write(bundle.join("LICENSE"), "ELECTRON LICENSE TEXT").expect("write runtime license");
    fs::write(slot.join("serialport.node"), b"placeholder").expect("write placeholder");
    fs::write(resources.join("atom.asar"), "asar").expect("write asar");

    let manifest: Manifest = serde_json::from_str(
        r#"{
            "name": "irkit-updater",
            "version": "1.2.3",
            "dependencies": { "a": "^1.0.0", "b": "^1.0.0" }
        }"#,
    )
    .expect("parse manifest");

    Fixture {
        _dir: dir,
        config: Arc::new(config),
        manifest: Arc::new(manifest),
        bundle,
    }
}

/// Wires post-process and archive tasks the way the dist pipeline does and
/// runs the graph.
async fn run_post_and_zip(fixture: &Fixture, target: PlatformTarget) -> PathBuf {
    let mut graph = TaskGraph::new();

    {
        let config = fixture.config.clone();
        let bundle = fixture.bundle.clone();
        graph
            .add("copyserialnode", async move {
                native::substitute_native_module(&config, &target, &bundle).await?;
                Ok(())
            })
            .expect("add");
    }
    {
        let config = fixture.config.clone();
        let bundle = fixture.bundle.clone();
        graph
            .add("copydriver", async move {
                driver::place_driver(&config, &target, &bundle).await?;
                Ok(())
            })
            .expect("add");
    }
    {
        let config = fixture.config.clone();
        let bundle = fixture.bundle.clone();
        graph
            .add("makelproj", async move {
                lproj::make_lproj_stubs(&config, &target, &bundle).await?;
                Ok(())
            })
            .expect("add");
    }
    {
        let config = fixture.config.clone();
        let manifest = fixture.manifest.clone();
        let bundle = fixture.bundle.clone();
        graph
            .add("copylicense", async move {
                licenses::aggregate_licenses(&config, &manifest, &bundle).await
            })
            .expect("add");
    }

    let archive_path = fixture
        .config
        .dist_path()
        .join(target.os.as_str())
        .join(target.archive_name("IRKit Updater", "1.2.3"));
    {
        let bundle = fixture.bundle.clone();
        let archive_path = archive_path.clone();
        graph
            .add("zip", async move {
                archive::archive_bundle(&bundle, &archive_path).await
            })
            .expect("add");
    }
    for step in ["copyserialnode", "copydriver", "makelproj", "copylicense"] {
        graph.depend("zip", step).expect("edge");
    }

    graph.run().await.expect("pipeline");
    archive_path
}

fn zip_entries(path: &Path) -> Vec<String> {
    let file = fs::File::open(path).expect("open zip");
    let mut zip = zip::ZipArchive::new(file).expect("read zip");
    (0..zip.len())
        .map(|i| zip.by_index(i).expect("entry").name().to_string())
        .collect()
}

fn zip_entry_text(path: &Path, name: &str) -> String {
    let file = fs::File::open(path).expect("open zip");
    let mut zip = zip::ZipArchive::new(file).expect("read zip");
    let mut entry = zip.by_name(name).expect("named entry");
    let mut text = String::new();
    entry.read_to_string(&mut text).expect("read entry");
    text
}

#[tokio::test]
async fn win32_pipeline_produces_complete_versioned_zip() {
    let target = PlatformTarget {
        os: Os::Win32,
        arch: Arch::X64,
    };
    let fixture = fixture(target);
    let archive_path = run_post_and_zip(&fixture, target).await;

    assert_eq!(
        archive_path.file_name().and_then(|n| n.to_str()),
        Some("IRKit Updater-win32-x64-1.2.3.zip")
    );

    let entries = zip_entries(&archive_path);
    let prefix = "IRKit Updater-win32-x64";
    assert!(entries.contains(&format!("{prefix}/IRKit.inf")), "driver placed");
    assert!(
        !entries.iter().any(|name| name.contains(".lproj")),
        "no locale stubs on windows"
    );

    // native module substituted before archiving
    let native = zip_entry_text(
        &archive_path,
        &format!("{prefix}/resources/app/node_modules/serialport-electron/serialport.node"),
    );
    assert_eq!(native, "prebuilt-native");

    // acknowledgements: runtime first, then dependencies in manifest order
    let doc = zip_entry_text(&archive_path, &format!("{prefix}/ACKNOWLEDGEMENTS"));
    let runtime = doc.find("ELECTRON LICENSE TEXT").expect("runtime block");
    let dep_a = doc.find("LICENSE A").expect("a block");
    let dep_b = doc.find("LICENSE B").expect("b block");
    assert!(runtime < dep_a && dep_a < dep_b);

    // project license replaced the runtime copy
    let license = zip_entry_text(&archive_path, &format!("{prefix}/LICENSE"));
    assert_eq!(license, "OUR LICENSE");
}

#[tokio::test]
async fn darwin_pipeline_stubs_locales_and_skips_driver() {
    let target = PlatformTarget {
        os: Os::Darwin,
        arch: Arch::X64,
    };
    let fixture = fixture(target);
    let archive_path = run_post_and_zip(&fixture, target).await;

    assert_eq!(
        archive_path.file_name().and_then(|n| n.to_str()),
        Some("IRKit Updater-darwin-x64-1.2.3.zip")
    );

    let entries = zip_entries(&archive_path);
    let prefix = "IRKit Updater-darwin-x64";
    assert!(
        entries.contains(&format!("{prefix}/resources/ja.lproj/")),
        "ja.lproj created beside the resource archive"
    );
    assert!(
        !entries.iter().any(|name| name.ends_with("IRKit.inf")),
        "driver skipped on macOS"
    );
}

#[tokio::test]
async fn failed_postprocess_step_prevents_archiving() {
    let target = PlatformTarget {
        os: Os::Win32,
        arch: Arch::Ia32,
    };
    let fixture = fixture(target);

    // break the native module slot: two candidates make the glob ambiguous
    let second = fixture.bundle.join("other/serialport-electron");
    fs::create_dir_all(&second).expect("mkdir");
    fs::write(second.join("serialport.node"), b"dup").expect("write");

    let mut graph = TaskGraph::new();
    {
        let config = fixture.config.clone();
        let bundle = fixture.bundle.clone();
        graph
            .add("copyserialnode", async move {
                native::substitute_native_module(&config, &target, &bundle).await?;
                Ok(())
            })
            .expect("add");
    }
    let archive_path = fixture
        .config
        .dist_path()
        .join(target.os.as_str())
        .join(target.archive_name("IRKit Updater", "1.2.3"));
    {
        let bundle = fixture.bundle.clone();
        let archive_path = archive_path.clone();
        graph
            .add("zip", async move {
                archive::archive_bundle(&bundle, &archive_path).await
            })
            .expect("add");
    }
    graph.depend("zip", "copyserialnode").expect("edge");

    let error = graph.run().await.unwrap_err();
    assert!(error.to_string().contains("exactly one match"));
    assert!(!archive_path.exists(), "zip must not be created");
}
