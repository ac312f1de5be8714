//! Tests for loading package manifests from disk.

use rollgen::{Error, PackageDescriptor, TargetGenerator};
use std::fs;
use tempfile::TempDir;

#[test]
fn discovers_package_json_in_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
  "name": "acme-widgets",
  "version": "2.1.0",
  "peerDependencies": { "core-lib": "^2.0.0", "react": ">=17" },
  "unpkg": "dist/acme-widgets.min.js"
}"#,
    )
    .unwrap();

    let package = PackageDescriptor::discover(dir.path()).unwrap();
    assert_eq!(package.name, "acme-widgets");
    assert!(package.browser_targets_enabled());

    let external = package.external_set();
    assert_eq!(external.iter().collect::<Vec<_>>(), vec!["core-lib", "react"]);
}

#[test]
fn generator_discovers_package() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), r#"{ "name": "acme-core" }"#).unwrap();

    let generator = TargetGenerator::discover(dir.path()).unwrap();
    assert_eq!(generator.package().name, "acme-core");
    assert_eq!(generator.targets().len(), 2);
}

#[test]
fn missing_manifest_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = PackageDescriptor::discover(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn invalid_json_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("package.json");
    fs::write(&path, "{ \"name\": ").unwrap();

    let err = PackageDescriptor::load(&path).unwrap_err();
    match err {
        Error::InvalidManifest { origin, hint } => {
            assert_eq!(origin, path.display().to_string());
            assert!(hint.starts_with("Invalid JSON"));
        }
        other => panic!("expected InvalidManifest, got {other:?}"),
    }
}

#[test]
fn manifest_without_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), r#"{ "version": "1.0.0" }"#).unwrap();

    let err = PackageDescriptor::discover(dir.path()).unwrap_err();
    assert!(matches!(err, Error::MissingName));
}

#[test]
fn falsy_unpkg_in_manifest_disables_browser_targets() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "name": "acme-core", "unpkg": false }"#,
    )
    .unwrap();

    let generator = TargetGenerator::discover(dir.path()).unwrap();
    assert_eq!(generator.targets().len(), 2);
}
