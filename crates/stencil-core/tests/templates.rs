//! Renders the sample templates under `templates/` end-to-end.

use std::path::PathBuf;

use stencil_core::context::Context;
use stencil_core::error::TemplateError;
use stencil_core::processor::TemplateProcessor;

fn template(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../templates")
        .join(relative)
}

fn render(relative: &str, pairs: &[(&str, &str)]) -> String {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("rendered");
    let processor = TemplateProcessor::new(&Context::from_pairs(pairs.iter().copied()));
    processor.process_file(&template(relative), &output).unwrap();
    std::fs::read_to_string(output).unwrap()
}

#[test]
fn test_go_mod_without_postgres() {
    let out = render(
        "go/go.mod.tmpl",
        &[
            ("GITHUB_ORG", "acme"),
            ("PROJECT_NAME_KEBAB", "widget"),
            ("GO_VERSION", "1.23.4"),
        ],
    );
    assert_eq!(out, "module github.com/acme/widget\n\ngo 1.23\n");
}

#[test]
fn test_go_mod_with_postgres() {
    let out = render(
        "go/go.mod.tmpl",
        &[("INCLUDE_POSTGRES", "true")],
    );
    assert_eq!(
        out,
        "module github.com/myorg/my-project\n\ngo 1.22\n\n\nrequire github.com/jackc/pgx/v5 v5.5.5\n"
    );
}

#[test]
fn test_pyproject_quality_and_coverage() {
    let out = render(
        "python/pyproject.toml.tmpl",
        &[
            ("PROJECT_NAME_KEBAB", "widget"),
            ("PYTHON_VERSION", "3.11"),
            ("INCLUDE_QUALITY_CHECKS", "true"),
            ("COVERAGE_THRESHOLD", "90"),
        ],
    );
    assert!(out.contains("name = \"widget\"\n"));
    assert!(out.contains("requires-python = \">=3.11\"\n"));
    assert!(out.contains("target-version = \"py311\"\n"));
    assert!(out.contains("[tool.ruff.lint]\n"));
    assert!(out.ends_with("[tool.coverage.report]\nfail_under = 90\n"));
    assert!(!out.contains("{{"));
}

#[test]
fn test_pyproject_coverage_disabled() {
    let out = render("python/pyproject.toml.tmpl", &[("COVERAGE_THRESHOLD", "0")]);
    assert!(!out.contains("[tool.coverage.report]"));
    assert!(!out.contains("[tool.ruff.lint]"));
    assert!(out.ends_with("line-length = 100\n"));
}

#[test]
fn test_compose_services() {
    let out = render(
        "devcontainer/docker-compose.yml.tmpl",
        &[("INCLUDE_POSTGRES", "true"), ("POSTGRES_VERSION", "17")],
    );
    assert!(out.contains("    depends_on:\n"));
    assert!(out.contains("      - postgres\n"));
    assert!(!out.contains("- redis"));
    assert!(out.contains("image: postgres:17\n"));
    assert!(out.contains("POSTGRES_DB: app_dev\n"));
    assert!(!out.contains("redis:"));
}

#[test]
fn test_compose_without_services() {
    let out = render("devcontainer/docker-compose.yml.tmpl", &[]);
    assert_eq!(
        out,
        "services:\n  app:\n    build: .\n    command: sleep infinity\n"
    );
}

#[test]
fn test_ci_workflow_keeps_expressions() {
    let out = render(
        "devcontainer/ci.yml.tmpl",
        &[("INCLUDE_PYTHON", "true"), ("INCLUDE_RUST", "false")],
    );
    assert!(out.contains("python-version: \"3.12\"\n"));
    assert!(out.contains("echo \"ref ${{ github.ref }}\""));
    assert!(out.contains("# no rust toolchain selected"));
    assert!(!out.contains("rust-toolchain"));
}

#[test]
fn test_ci_workflow_rust_msrv() {
    let out = render(
        "devcontainer/ci.yml.tmpl",
        &[("INCLUDE_RUST", "true"), ("RUST_VERSION", "nightly")],
    );
    assert!(out.contains("dtolnay/rust-toolchain@nightly\n"));
    assert!(out.contains("cargo +1.75 check\n"));
}

#[test]
fn test_every_sample_template_parses() {
    let processor = TemplateProcessor::new(&Context::new());
    for relative in [
        "go/go.mod.tmpl",
        "python/pyproject.toml.tmpl",
        "devcontainer/docker-compose.yml.tmpl",
        "devcontainer/ci.yml.tmpl",
    ] {
        let unregistered = processor.check_file(&template(relative)).unwrap();
        assert!(unregistered.is_empty(), "{relative}: {unregistered:?}");
    }
}

#[test]
fn test_missing_template() {
    let processor = TemplateProcessor::new(&Context::new());
    let err = processor
        .check_file(&template("does/not/exist.tmpl"))
        .unwrap_err();
    assert!(matches!(err, TemplateError::NotFound { .. }));
}
