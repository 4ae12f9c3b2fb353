// Copyright (C) Brian G. Milnes 2025

//! Common test utilities for integration tests

#![allow(dead_code)]

use anyhow::{Context, Result};
use assertlint::{analyze_with, parse_source, Diagnostic, NestingPolicy, SourceLanguage, SyntaxNode};
use std::path::PathBuf;
use std::process::{Command, Output};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn parse_ts(source: &str) -> Result<SyntaxNode> {
    Ok(parse_source(source, SourceLanguage::TypeScript)?.root)
}

/// Analyze TypeScript source, returning the 1-indexed start line of each diagnostic
pub fn diagnostic_lines(source: &str, policy: NestingPolicy) -> Result<Vec<usize>> {
    Ok(diagnostics(source, policy)?
        .iter()
        .map(|d| d.span.start_line)
        .collect())
}

pub fn diagnostics(source: &str, policy: NestingPolicy) -> Result<Vec<Diagnostic>> {
    let root = parse_ts(source)?;
    Ok(analyze_with(&root, policy))
}

/// Run a built binary inside a fixture directory
pub fn run_in(binary: &str, fixture: &str, args: &[&str]) -> Result<Output> {
    Command::new(binary)
        .args(args)
        .current_dir(fixtures_dir().join(fixture))
        .output()
        .with_context(|| format!("Failed to run {binary}"))
}

/// Pull the three counts out of "Summary: X files checked, Y files with violations, Z total violations"
pub fn summary_counts(stdout: &str) -> Result<(usize, usize, usize)> {
    let line = stdout
        .lines()
        .find(|line| line.starts_with("Summary:"))
        .context("Summary line not found")?;
    let numbers: Vec<usize> = line
        .split(',')
        .map(|part| {
            part.trim_start_matches("Summary:")
                .split_whitespace()
                .next()
                .context("empty summary part")
                .and_then(assertlint::parse_number)
        })
        .collect::<Result<_>>()?;
    match numbers.as_slice() {
        [files, with_violations, total] => Ok((*files, *with_violations, *total)),
        _ => Err(anyhow::anyhow!("Expected 3 parts in summary line: {line}")),
    }
}
