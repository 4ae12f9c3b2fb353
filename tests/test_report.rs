// Copyright (C) Brian G. Milnes 2025

//! Tests for the JSON report and its schema

mod common;
use common::fixtures_dir;

use anyhow::{anyhow, Result};
use assertlint::report::report::{render_text, Report};
use assertlint::{find_source_files, lint_files, NestingPolicy, Severity};
use serde_json::Value;

fn schema_errors(instance: &Value) -> Result<Vec<String>> {
    let schema_text = std::fs::read_to_string(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas/report.schema.json"),
    )?;
    let schema: Value = serde_json::from_str(&schema_text)?;
    let validator = jsonschema::validator_for(&schema).map_err(|e| anyhow!("bad schema: {e}"))?;
    Ok(validator.iter_errors(instance).map(|e| e.to_string()).collect())
}

#[test]
fn test_json_report_matches_schema() -> Result<()> {
    let base = fixtures_dir().join("project");
    let run = lint_files(&find_source_files(&[base.clone()], false), NestingPolicy::SingleSlot);
    let json: Value = serde_json::from_str(&Report::new(&run, &base, Severity::Error).to_json()?)?;

    let errors = schema_errors(&json)?;
    assert!(errors.is_empty(), "schema errors: {errors:?}");

    assert_eq!(json["rule"]["id"], "require-assertion");
    assert_eq!(json["rule"]["type"], "problem");
    assert_eq!(json["severity"], "error");
    assert_eq!(json["total_violations"], 3);
    assert_eq!(json["findings"][0]["path"], "tests/api/issue.spec.ts");
    assert_eq!(json["findings"][0]["kind"], "missingAssertion");
    Ok(())
}

#[test]
fn test_schema_rejects_wrong_kind() -> Result<()> {
    let base = fixtures_dir().join("project");
    let run = lint_files(&find_source_files(&[base.clone()], false), NestingPolicy::SingleSlot);
    let mut json: Value = serde_json::from_str(&Report::new(&run, &base, Severity::Warn).to_json()?)?;
    json["findings"][0]["kind"] = Value::from("somethingElse");
    assert!(!schema_errors(&json)?.is_empty());
    Ok(())
}

#[test]
fn test_text_report_lists_findings_in_path_order() {
    let base = fixtures_dir().join("project");
    let run = lint_files(&find_source_files(&[base.clone()], false), NestingPolicy::SingleSlot);
    let lines = render_text(&run, &base, Severity::Warn);

    assert_eq!(lines[0], "✗ Found 3 test(s) without assertions:");
    assert!(lines[2].starts_with("tests/api/issue.spec.ts:10:3: warning: Test has no assertions."));
    assert!(lines[3].starts_with("tests/e2e/profile.spec.ts:3:1: warning: "));
    assert!(lines[4].starts_with("tests/e2e/redeem.spec.ts:21:1: warning: "));
    assert!(lines[4].ends_with("[require-assertion]"));
}
