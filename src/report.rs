// Copyright (C) Brian G. Milnes 2025

//! Reporting: rule metadata, severity, and text / JSON rendering of a lint run

pub mod report {
    use std::fmt;
    use std::path::{Path, PathBuf};

    use anyhow::Result;
    use clap::ValueEnum;
    use serde::Serialize;

    use crate::args::args::format_number;
    use crate::linter::linter::{FileFailure, Finding, LintRun};

    pub const RULE_ID: &str = "require-assertion";

    #[derive(Debug, Clone, Serialize)]
    pub struct RuleMeta {
        pub id: &'static str,
        #[serde(rename = "type")]
        pub rule_type: &'static str,
        pub description: &'static str,
        pub message_id: &'static str,
        pub recommended: bool,
    }

    pub static REQUIRE_ASSERTION: RuleMeta = RuleMeta {
        id: RULE_ID,
        rule_type: "problem",
        description: "Ensure test has at least one assertion-like call (expect, verify*, assert*, check*, waitFor*)",
        message_id: "missingAssertion",
        recommended: true,
    };

    /// How the host treats findings. `Error` fails the run.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Severity {
        #[default]
        Error,
        #[value(alias = "warning")]
        Warn,
    }

    impl Severity {
        pub fn fails_run(self) -> bool {
            self == Severity::Error
        }
    }

    impl fmt::Display for Severity {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Severity::Error => f.write_str("error"),
                Severity::Warn => f.write_str("warning"),
            }
        }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
    pub enum OutputFormat {
        #[default]
        Text,
        Json,
    }

    /// JSON document for one run
    #[derive(Debug, Serialize)]
    pub struct Report<'a> {
        pub rule: &'static RuleMeta,
        pub severity: Severity,
        pub files_checked: usize,
        pub files_with_violations: usize,
        pub total_violations: usize,
        pub findings: Vec<Finding>,
        pub failures: &'a [FileFailure],
    }

    impl<'a> Report<'a> {
        /// Paths in findings are made relative to `base_dir` where possible
        pub fn new(run: &'a LintRun, base_dir: &Path, severity: Severity) -> Self {
            let findings = run
                .findings()
                .map(|f| Finding { path: relative(&f.path, base_dir), ..f.clone() })
                .collect();
            Report {
                rule: &REQUIRE_ASSERTION,
                severity,
                files_checked: run.files_checked(),
                files_with_violations: run.files_with_violations(),
                total_violations: run.total_violations(),
                findings,
                failures: &run.failures,
            }
        }

        pub fn to_json(&self) -> Result<String> {
            Ok(serde_json::to_string_pretty(self)?)
        }
    }

    pub fn relative(path: &Path, base_dir: &Path) -> PathBuf {
        path.strip_prefix(base_dir).unwrap_or(path).to_path_buf()
    }

    /// `path:line:col: severity: message [rule]`, the form compile-mode jumps to
    pub fn format_finding(finding: &Finding, base_dir: &Path, severity: Severity) -> String {
        format!(
            "{}:{}:{}: {}: {} [{}]",
            relative(&finding.path, base_dir).display(),
            finding.line,
            finding.column,
            severity,
            finding.message,
            finding.rule,
        )
    }

    /// Text report body, one line per entry, without the summary line
    pub fn render_text(run: &LintRun, base_dir: &Path, severity: Severity) -> Vec<String> {
        let mut lines = Vec::new();

        for failure in &run.failures {
            lines.push(format!(
                "Warning: could not check {}: {}",
                relative(&failure.path, base_dir).display(),
                failure.error
            ));
        }
        for report in run.reports.iter().filter(|r| r.parse_errors > 0) {
            lines.push(format!(
                "Warning: {} has {} syntax error(s); results may be incomplete",
                relative(&report.path, base_dir).display(),
                report.parse_errors
            ));
        }

        let total = run.total_violations();
        if total == 0 {
            lines.push("✓ No tests without assertions found".to_string());
        } else {
            lines.push(format!("✗ Found {} test(s) without assertions:", format_number(total)));
            lines.push(String::new());
            lines.extend(run.findings().map(|f| format_finding(f, base_dir, severity)));
        }
        lines
    }

    pub fn summary_line(run: &LintRun) -> String {
        format!(
            "Summary: {} files checked, {} files with violations, {} total violations",
            format_number(run.files_checked()),
            format_number(run.files_with_violations()),
            format_number(run.total_violations()),
        )
    }

}
