// Copyright (C) Brian G. Milnes 2025

//! assertlint - AST-based check that every test asserts something
//!
//! Parses JavaScript/TypeScript test sources with tree-sitter and reports
//! each `test(...)` block that makes no assertion-like call (a call whose
//! name contains expect, verify, assert, check or waitFor).

pub mod syntax;
pub mod parser;
pub mod visitor;
pub mod analyzer;
pub mod linter;
pub mod report;
pub mod args;
pub mod logging;
pub mod tool_runner;

use anyhow::Result;
use std::path::Path;

// Re-export commonly used items
pub use syntax::syntax::{Callee, NodeId, NodeKind, Span, SyntaxNode, WalkEvent};
pub use parser::parser::{parse_file, parse_source, ParsedSource, SourceLanguage};
pub use visitor::visitor::{walk, CallTrace, CallVisitor};
pub use analyzer::analyzer::{
    analyze, analyze_with, is_assertion_name, is_test_block_call, AnalyzerState,
    AssertionPresenceAnalyzer, Diagnostic, DiagnosticKind, NestingPolicy,
};
pub use linter::linter::{lint_file, lint_files, lint_source, FileFailure, FileReport, Finding, LintRun};
pub use report::report::{OutputFormat, Report, Severity, REQUIRE_ASSERTION, RULE_ID};
pub use args::args::{find_source_files, format_number, parse_number, StandardArgs};

/// Parse a file and print the lowered tree the analyzer sees
pub fn parse(file: &Path, format: &str) -> Result<()> {
    let parsed = parse_file(file)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&parsed)?),
        "debug" => println!("{:#?}", parsed.root),
        "calls" => {
            let mut trace = CallTrace::new();
            walk(&parsed.root, &mut trace);
            for event in trace.events {
                println!("{event}");
            }
        }
        _ => print_tree(&parsed.root),
    }
    if parsed.error_count > 0 {
        eprintln!("{} syntax error(s) recovered", parsed.error_count);
    }

    Ok(())
}

fn print_tree(root: &SyntaxNode) {
    let mut depth = 0usize;
    for event in root.preorder() {
        match event {
            WalkEvent::Enter(node) => {
                let indent = "  ".repeat(depth);
                let line = node.span.start_line;
                match (&node.kind, node.callee()) {
                    (NodeKind::CallExpression, Some(callee)) => {
                        let mark = if is_test_block_call(node) {
                            " [test]"
                        } else if is_assertion_name(callee.resolved_name()) {
                            " [assertion]"
                        } else {
                            ""
                        };
                        println!("{indent}call {:?} @{line}{mark}", callee.resolved_name());
                    }
                    (NodeKind::CallExpression, None) => println!("{indent}call <unresolved> @{line}"),
                    (NodeKind::Other(kind), _) => println!("{indent}{kind} @{line}"),
                }
                depth += 1;
            }
            WalkEvent::Leave(_) => depth = depth.saturating_sub(1),
        }
    }
}
