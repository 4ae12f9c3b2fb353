// Copyright (C) Brian G. Milnes 2025

//! Linter driver: source files in, per-file findings out
//!
//! Every file gets its own analyzer, so files are checked in parallel.

pub mod linter {
    use std::path::{Path, PathBuf};

    use anyhow::{anyhow, Context, Result};
    use rayon::prelude::*;
    use serde::Serialize;

    use crate::analyzer::analyzer::{analyze_with, Diagnostic, DiagnosticKind, NestingPolicy};
    use crate::parser::parser::{parse_source, SourceLanguage};
    use crate::report::report::RULE_ID;

    /// One diagnostic mapped to a file position
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct Finding {
        pub path: PathBuf,
        pub line: usize,
        pub column: usize,
        pub end_line: usize,
        pub end_column: usize,
        pub rule: &'static str,
        pub kind: DiagnosticKind,
        pub message: &'static str,
    }

    impl Finding {
        fn from_diagnostic(path: &Path, diagnostic: &Diagnostic) -> Self {
            Finding {
                path: path.to_path_buf(),
                line: diagnostic.span.start_line,
                column: diagnostic.span.start_column,
                end_line: diagnostic.span.end_line,
                end_column: diagnostic.span.end_column,
                rule: RULE_ID,
                kind: diagnostic.kind,
                message: diagnostic.kind.message(),
            }
        }
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct FileReport {
        pub path: PathBuf,
        pub findings: Vec<Finding>,
        /// Syntax errors tree-sitter recovered from
        pub parse_errors: usize,
    }

    /// A file that could not be checked at all
    #[derive(Debug, Clone, Serialize)]
    pub struct FileFailure {
        pub path: PathBuf,
        pub error: String,
    }

    #[derive(Debug, Default, Serialize)]
    pub struct LintRun {
        pub reports: Vec<FileReport>,
        pub failures: Vec<FileFailure>,
    }

    impl LintRun {
        pub fn files_checked(&self) -> usize {
            self.reports.len()
        }

        pub fn files_with_violations(&self) -> usize {
            self.reports.iter().filter(|r| !r.findings.is_empty()).count()
        }

        pub fn total_violations(&self) -> usize {
            self.reports.iter().map(|r| r.findings.len()).sum()
        }

        pub fn findings(&self) -> impl Iterator<Item = &Finding> {
            self.reports.iter().flat_map(|r| r.findings.iter())
        }
    }

    pub fn lint_source(path: &Path, source: &str, policy: NestingPolicy) -> Result<FileReport> {
        let language = SourceLanguage::from_path(path)
            .ok_or_else(|| anyhow!("Unsupported file type: {}", path.display()))?;
        let parsed = parse_source(source, language)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let findings = analyze_with(&parsed.root, policy)
            .iter()
            .map(|d| Finding::from_diagnostic(path, d))
            .collect();

        Ok(FileReport {
            path: path.to_path_buf(),
            findings,
            parse_errors: parsed.error_count,
        })
    }

    pub fn lint_file(path: &Path, policy: NestingPolicy) -> Result<FileReport> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        lint_source(path, &source, policy)
    }

    /// Check `files` in parallel. Results keep the input order; a file that
    /// fails becomes a `FileFailure` and the rest still run.
    pub fn lint_files(files: &[PathBuf], policy: NestingPolicy) -> LintRun {
        let results: Vec<(PathBuf, Result<FileReport>)> = files
            .par_iter()
            .map(|file| (file.clone(), lint_file(file, policy)))
            .collect();

        let mut run = LintRun::default();
        for (path, result) in results {
            match result {
                Ok(report) => run.reports.push(report),
                Err(e) => run.failures.push(FileFailure {
                    path,
                    error: format!("{e:#}"),
                }),
            }
        }
        run
    }
}
