// Copyright (C) Brian G. Milnes 2025

//! Tests for file discovery and the parallel linter driver

mod common;
use common::fixtures_dir;

use anyhow::Result;
use assertlint::{find_source_files, lint_files, lint_source, DiagnosticKind, NestingPolicy, RULE_ID};
use std::path::{Path, PathBuf};

fn relative_names(files: &[PathBuf], base: &Path) -> Vec<String> {
    files
        .iter()
        .map(|f| f.strip_prefix(base).unwrap_or(f).display().to_string())
        .collect()
}

#[test]
fn test_discovery_keeps_only_spec_files() {
    let base = fixtures_dir().join("project");
    let files = find_source_files(&[base.clone()], false);
    assert_eq!(relative_names(&files, &base), [
        "tests/api/issue.spec.ts",
        "tests/e2e/profile.spec.ts",
        "tests/e2e/redeem.spec.ts",
    ]);
}

#[test]
fn test_discovery_all_sources_still_skips_ignored_dirs() {
    let base = fixtures_dir().join("project");
    let files = find_source_files(&[base.clone()], true);
    let names = relative_names(&files, &base);
    assert!(names.contains(&"tests/support/pages/home-page.ts".to_string()));
    assert!(!names.iter().any(|n| n.contains("node_modules")));
    assert!(!names.iter().any(|n| n.contains(".cache")));
    assert_eq!(names.len(), 4);
}

#[test]
fn test_explicit_file_is_taken_even_if_not_a_spec() {
    let file = fixtures_dir().join("project/tests/support/pages/home-page.ts");
    let files = find_source_files(&[file.clone(), file.clone()], false);
    assert_eq!(files, [file]);
}

#[test]
fn test_lint_project_fixture() {
    let base = fixtures_dir().join("project");
    let files = find_source_files(&[base.clone()], false);
    let run = lint_files(&files, NestingPolicy::SingleSlot);

    assert!(run.failures.is_empty());
    assert_eq!(run.files_checked(), 3);
    assert_eq!(run.files_with_violations(), 3);
    assert_eq!(run.total_violations(), 3);

    let located: Vec<(String, usize, usize)> = run
        .findings()
        .map(|f| (f.path.strip_prefix(&base).unwrap_or(&f.path).display().to_string(), f.line, f.column))
        .collect();
    assert_eq!(located, [
        ("tests/api/issue.spec.ts".to_string(), 10, 3),
        ("tests/e2e/profile.spec.ts".to_string(), 3, 1),
        ("tests/e2e/redeem.spec.ts".to_string(), 21, 1),
    ]);

    for finding in run.findings() {
        assert_eq!(finding.rule, RULE_ID);
        assert_eq!(finding.kind, DiagnosticKind::MissingAssertion);
        assert!(finding.message.starts_with("Test has no assertions."));
    }
}

#[test]
fn test_lint_clean_fixture() {
    let base = fixtures_dir().join("clean");
    let run = lint_files(&find_source_files(&[base], false), NestingPolicy::SingleSlot);
    assert_eq!(run.files_checked(), 1);
    assert_eq!(run.total_violations(), 0);
}

#[test]
fn test_failures_do_not_stop_the_run() {
    let base = fixtures_dir().join("clean");
    let mut files = find_source_files(&[base], false);
    files.insert(0, fixtures_dir().join("clean/tests/e2e/gone.spec.ts"));
    let run = lint_files(&files, NestingPolicy::SingleSlot);

    assert_eq!(run.files_checked(), 1);
    assert_eq!(run.failures.len(), 1);
    assert!(run.failures[0].error.contains("Failed to read"), "{}", run.failures[0].error);
}

#[test]
fn test_lint_source_reports_recovered_syntax_errors() -> Result<()> {
    let report = lint_source(Path::new("broken.spec.js"), "test('a', () => { click(; });", NestingPolicy::SingleSlot)?;
    assert!(report.parse_errors > 0);
    Ok(())
}

#[test]
fn test_lint_source_rejects_unknown_extension() {
    assert!(lint_source(Path::new("a.py"), "test()", NestingPolicy::SingleSlot).is_err());
}

#[test]
fn test_deeply_nested_source_on_small_stack() {
    let depth = 100_000;
    let source = format!(
        "test('a', () => {{ x = {}expect(1){}; }});",
        "[".repeat(depth),
        "]".repeat(depth)
    );
    let handle = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || {
            lint_source(Path::new("deep.spec.js"), &source, NestingPolicy::SingleSlot)
                .map(|report| report.findings.len())
        })
        .expect("spawn");
    let findings = handle.join().expect("lint thread panicked").expect("lint failed");
    assert_eq!(findings, 0);
}
