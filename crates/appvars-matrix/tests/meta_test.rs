use appvars_core::{AppVars, Error, ExecutionContext};
use appvars_matrix::meta::{get_app_meta, get_apps_meta};
use serde_json::json;
use tempfile::TempDir;

fn ctx(tmp: &TempDir) -> ExecutionContext {
    ExecutionContext {
        workspace: tmp.path().to_path_buf(),
        ..Default::default()
    }
}

fn app(value: serde_json::Value) -> AppVars {
    AppVars::from_value(value, "test").unwrap()
}

fn write(tmp: &TempDir, path: &str, content: &str) {
    let full = tmp.path().join(path);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(full, content).unwrap();
}

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <artifactId>api</artifactId>
  <description>Orders API</description>
  <properties>
    <java.version>21</java.version>
  </properties>
</project>
"#;

#[test]
fn spring_boot_metadata_from_pom() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "api/pom.xml", POM);

    let out = get_app_meta(
        &ctx(&tmp),
        app(json!({
            "application-name": "api",
            "application-type": "spring-boot",
            "application-source-path": "api"
        })),
    )
    .unwrap();

    assert_eq!(out.get_str("application-description"), Some("Orders API"));
    assert_eq!(out.get_str("java-version"), Some("21"));
    assert_eq!(out.get("nodejs-e2e-enabled"), Some(&json!(false)));
}

#[test]
fn existing_values_are_not_overridden() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "api/pom.xml", POM);

    let out = get_app_meta(
        &ctx(&tmp),
        app(json!({
            "application-name": "api",
            "application-type": "spring-boot",
            "application-source-path": "api",
            "application-description": "Custom",
            "java-version": "17"
        })),
    )
    .unwrap();

    assert_eq!(out.get_str("application-description"), Some("Custom"));
    assert_eq!(out.get_str("java-version"), Some("17"));
}

#[test]
fn missing_java_version_fails() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        "pom.xml",
        "<project><description>lib</description><properties/></project>",
    );

    let err = get_app_meta(
        &ctx(&tmp),
        app(json!({ "application-name": "lib", "application-type": "maven-library" })),
    )
    .unwrap_err();

    assert!(matches!(err, Error::MissingJavaVersion { .. }));
    assert!(err.to_string().contains("java.version"));
}

#[test]
fn vue_metadata_and_playwright_flag() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        "web/package.json",
        r#"{ "name": "web", "description": "Storefront", "engines": { "node": ">=20" } }"#,
    );
    write(&tmp, "web/Dockerfile.playwright", "FROM mcr.microsoft.com/playwright");

    let out = get_app_meta(
        &ctx(&tmp),
        app(json!({
            "application-name": "web",
            "application-type": "vue",
            "application-source-path": "web"
        })),
    )
    .unwrap();

    assert_eq!(out.get_str("application-description"), Some("Storefront"));
    assert_eq!(out.get_str("nodejs-version"), Some(">=20"));
    assert_eq!(out.get("nodejs-e2e-enabled"), Some(&json!(true)));
}

#[test]
fn python_metadata_and_dependencies() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        "etl/pyproject.toml",
        r#"
[project]
name = "etl"
description = "Nightly jobs"
requires-python = ">=3.12"
dependencies = ["pandas>=2.0,<3", "ruff"]
"#,
    );

    let out = get_app_meta(
        &ctx(&tmp),
        app(json!({
            "application-name": "etl",
            "application-type": "python",
            "application-source-path": "etl/"
        })),
    )
    .unwrap();

    assert_eq!(out.get_str("application-description"), Some("Nightly jobs"));
    assert_eq!(out.get_str("python-version"), Some(">=3.12"));
    assert_eq!(
        out.get("application-dependencies"),
        Some(&json!([
            { "name": "pandas", "operator": ">=", "version": "2.0" },
            { "name": "pandas", "operator": "<", "version": "3" },
            { "name": "ruff", "operator": "", "version": "" }
        ]))
    );
}

#[test]
fn source_path_may_name_the_manifest() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "svc/custom-pom.xml", POM);

    let out = get_app_meta(
        &ctx(&tmp),
        app(json!({
            "application-name": "svc",
            "application-type": "spring-boot",
            "application-source-path": "svc/custom-pom.xml"
        })),
    )
    .unwrap();

    assert_eq!(out.get_str("java-version"), Some("21"));
}

#[test]
fn empty_manifest_fails() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "web/package.json", "");

    let err = get_app_meta(
        &ctx(&tmp),
        app(json!({
            "application-name": "web",
            "application-type": "vue",
            "application-source-path": "web"
        })),
    )
    .unwrap_err();

    assert!(matches!(err, Error::ManifestEmpty { .. }));
}

#[test]
fn missing_manifest_leaves_record_for_validation() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "etl/requirements.txt", "requests==2.32.0\n");

    let out = get_app_meta(
        &ctx(&tmp),
        app(json!({
            "application-name": "etl",
            "application-type": "python",
            "application-source-path": "etl"
        })),
    )
    .unwrap();

    assert_eq!(out.get("nodejs-e2e-enabled"), Some(&json!(false)));
    assert!(!out.contains("application-description"));
    assert!(!out.contains("python-version"));
}

#[test]
fn unknown_type_names_the_app() {
    let tmp = TempDir::new().unwrap();
    let err = get_app_meta(
        &ctx(&tmp),
        app(json!({ "application-name": "builder", "application-type": "gradle" })),
    )
    .unwrap_err();

    assert!(matches!(err, Error::InvalidApplication { ref app, .. } if app == "builder"));
    assert!(err.to_string().contains("gradle"));
}

#[test]
fn missing_type_fails() {
    let tmp = TempDir::new().unwrap();
    let err = get_app_meta(&ctx(&tmp), app(json!({ "application-name": "x" }))).unwrap_err();
    assert!(matches!(err, Error::MissingApplicationType { .. }));
}

#[test]
fn empty_list_fails() {
    let tmp = TempDir::new().unwrap();
    assert!(matches!(
        get_apps_meta(&ctx(&tmp), Vec::new()).unwrap_err(),
        Error::EmptySpecification { .. }
    ));
}
