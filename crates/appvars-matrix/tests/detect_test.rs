use appvars_core::{AppVars, Error, ExecutionContext};
use appvars_matrix::detect::detect_types;
use appvars_matrix::validate::validate_result;
use serde_json::json;
use tempfile::TempDir;

fn ctx(tmp: &TempDir) -> ExecutionContext {
    ExecutionContext {
        workspace: tmp.path().to_path_buf(),
        ..Default::default()
    }
}

fn apps(value: serde_json::Value) -> Vec<AppVars> {
    AppVars::list_from_value(value, "test").unwrap()
}

fn touch(tmp: &TempDir, path: &str) {
    let full = tmp.path().join(path);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(full, "").unwrap();
}

#[test]
fn marker_files_decide_in_order() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp, "api/pom.xml");
    touch(&tmp, "api/package.json");
    touch(&tmp, "web/package.json");
    touch(&tmp, "etl/requirements.txt");
    touch(&tmp, "ml/pyproject.toml");

    let out = detect_types(
        &ctx(&tmp),
        apps(json!([
            { "application-name": "api", "application-source-path": "api" },
            { "application-name": "web", "application-source-path": "./web/" },
            { "application-name": "etl", "application-source-path": "etl" },
            { "application-name": "ml", "application-source-path": "ml" }
        ])),
    )
    .unwrap();

    let types: Vec<_> = out.iter().map(|a| a.get_str("application-type").unwrap()).collect();
    assert_eq!(types, ["spring-boot", "vue", "python", "python"]);
}

#[test]
fn explicit_type_is_kept() {
    let tmp = TempDir::new().unwrap();
    let out = detect_types(
        &ctx(&tmp),
        apps(json!([{ "application-name": "lib", "application-type": "maven-library" }])),
    )
    .unwrap();

    assert_eq!(out[0].get_str("application-type"), Some("maven-library"));
    assert!(!out[0].contains("application-source-path"));
}

#[test]
fn defaults_source_path_to_root() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp, "package.json");

    let out = detect_types(&ctx(&tmp), apps(json!([{ "application-name": "web" }]))).unwrap();

    assert_eq!(out[0].get_str("application-source-path"), Some("./"));
    assert_eq!(out[0].get_str("application-type"), Some("vue"));
}

#[test]
fn unresolvable_type_names_directory() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp, "docs/README.md");

    let err = detect_types(
        &ctx(&tmp),
        apps(json!([{ "application-name": "docs", "application-source-path": "docs" }])),
    )
    .unwrap_err();

    assert!(matches!(err, Error::UnresolvableType { .. }));
    assert!(err.to_string().contains("docs"));
}

#[test]
fn missing_source_path_fails() {
    let tmp = TempDir::new().unwrap();
    let err = detect_types(
        &ctx(&tmp),
        apps(json!([{ "application-name": "x", "application-source-path": "nope" }])),
    )
    .unwrap_err();

    assert!(matches!(err, Error::SourcePathMissing { .. }));
}

#[test]
fn unknown_type_is_left_for_validation() {
    let tmp = TempDir::new().unwrap();
    let out = detect_types(
        &ctx(&tmp),
        apps(json!([{ "application-name": "builder", "application-type": "gradle" }])),
    )
    .unwrap();

    assert_eq!(out[0].get_str("application-type"), Some("gradle"));
    let err = validate_result(&out).unwrap_err().to_string();
    assert!(err.contains("'builder'"), "{err}");
    assert!(err.contains("gradle"), "{err}");
}
