// Copyright (C) Brian G. Milnes 2025

//! Review: every test must assert something
//!
//! Binary: assertlint-review-require-assertion
//!
//! Parses JavaScript/TypeScript test files with tree-sitter and reports each
//! `test(...)` block that never calls anything named like expect, verify,
//! assert, check or waitFor.

use anyhow::Result;
use assertlint::args::args::{find_source_files, StandardArgs};
use assertlint::linter::linter::lint_files;
use assertlint::report::report::{render_text, summary_line, OutputFormat, Report};
use assertlint::tool_runner::tool_runner::{run_tool, ToolConfig, ToolOutcome};
use std::process::ExitCode;

const TOOL_NAME: &str = "review-require-assertion";

fn main() -> Result<ExitCode> {
    let args = StandardArgs::from_env()?;
    let base_dir = args.base_dir();

    let config = ToolConfig::new(TOOL_NAME, base_dir.clone())
        .with_logging(args.log)
        .quiet(args.format == OutputFormat::Json);

    run_tool(config, |logger| {
        let files = find_source_files(&args.get_search_dirs(), args.all_sources);
        let run = lint_files(&files, args.nesting_policy());

        match args.format {
            OutputFormat::Json => {
                let report = Report::new(&run, &base_dir, args.severity);
                logger.log(&report.to_json()?);
            }
            OutputFormat::Text => {
                for line in render_text(&run, &base_dir, args.severity) {
                    logger.log(&line);
                }
            }
        }

        // Exit code: 1 only when findings exist and are errors
        Ok(ToolOutcome {
            summary: summary_line(&run),
            success: run.total_violations() == 0 || !args.severity.fails_run(),
        })
    })
}
