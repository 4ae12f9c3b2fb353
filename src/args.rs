// Copyright (C) Brian G. Milnes 2025

//! Command-line arguments and source discovery shared by the review tools

pub mod args {
    use std::collections::BTreeSet;
    use std::path::{Path, PathBuf};
    use std::sync::OnceLock;

    use anyhow::{bail, Context, Result};
    use clap::Parser;
    use regex::Regex;
    use walkdir::{DirEntry, WalkDir};

    use crate::analyzer::analyzer::NestingPolicy;
    use crate::parser::parser::SourceLanguage;
    use crate::report::report::{OutputFormat, Severity};

    /// Directories never descended into. Mirrors the lint ignore list of the
    /// test suites this tool targets.
    pub const IGNORED_DIRS: &[&str] = &[
        "node_modules",
        "test-results",
        "playwright-report",
        "blob-report",
        ".auth",
        "dist",
        "build",
        "eslint-rules",
        ".git",
        "target",
    ];

    #[derive(Parser, Debug, Clone, Default)]
    #[command(name = "assertlint-review-require-assertion")]
    #[command(about = "Report JavaScript/TypeScript tests that contain no assertion-like call", long_about = None)]
    pub struct StandardArgs {
        /// Files or directories to check
        pub paths: Vec<PathBuf>,

        /// Directories to check
        #[arg(short = 'd', long = "dir", num_args = 1..)]
        pub dirs: Vec<PathBuf>,

        /// A single file to check
        #[arg(short = 'f', long = "file")]
        pub files: Vec<PathBuf>,

        /// Check the tests/ directory of the current project
        #[arg(short, long)]
        pub codebase: bool,

        /// Check every JS/TS source, not only *.spec.* / *.test.* files
        #[arg(long)]
        pub all_sources: bool,

        #[arg(long, value_enum, default_value_t)]
        pub format: OutputFormat,

        /// `error` exits 1 when tests lack assertions; `warn` only reports
        #[arg(long, value_enum, default_value_t)]
        pub severity: Severity,

        /// Track nested test blocks with a stack instead of a single slot.
        /// Changes results for nested test() calls.
        #[arg(long)]
        pub nested_scopes: bool,

        /// Also write the run to logs/<tool>/<date>/run-<time>.log
        #[arg(long)]
        pub log: bool,
    }

    impl StandardArgs {
        /// Parse the process arguments and check the named paths exist
        pub fn from_env() -> Result<Self> {
            let args = Self::parse();
            args.validate()?;
            Ok(args)
        }

        pub fn validate(&self) -> Result<()> {
            for path in self.paths.iter().chain(&self.dirs).chain(&self.files) {
                if !path.exists() {
                    bail!("Path does not exist: {}", path.display());
                }
            }
            Ok(())
        }

        pub fn base_dir(&self) -> PathBuf {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }

        pub fn nesting_policy(&self) -> NestingPolicy {
            if self.nested_scopes {
                NestingPolicy::Stack
            } else {
                NestingPolicy::SingleSlot
            }
        }

        /// Roots to search; the base directory when nothing was named
        pub fn get_search_dirs(&self) -> Vec<PathBuf> {
            let base_dir = self.base_dir();
            let mut dirs: Vec<PathBuf> = self
                .paths
                .iter()
                .chain(&self.dirs)
                .chain(&self.files)
                .map(|p| if p.is_absolute() { p.clone() } else { base_dir.join(p) })
                .collect();

            if self.codebase {
                let tests = base_dir.join("tests");
                dirs.push(if tests.is_dir() { tests } else { base_dir.clone() });
            }
            if dirs.is_empty() {
                dirs.push(base_dir);
            }
            dirs
        }
    }

    fn test_file_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r"\.(spec|test)\.(ts|tsx|mts|cts|js|jsx|mjs|cjs)$").expect("test file pattern is valid")
        })
    }

    /// `*.spec.ts`, `*.test.js` and friends
    pub fn is_test_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| test_file_regex().is_match(name))
    }

    pub fn is_ignored_dir(entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() || entry.depth() == 0 {
            return false;
        }
        let Some(name) = entry.file_name().to_str() else {
            return false;
        };
        if IGNORED_DIRS.contains(&name) {
            return true;
        }
        // playwright/.cache
        name == ".cache"
            && entry
                .path()
                .parent()
                .and_then(|p| p.file_name())
                .is_some_and(|p| p == "playwright")
    }

    /// Collect source files under `roots`, sorted and deduplicated.
    ///
    /// Files named explicitly are taken as long as their extension is
    /// supported; files found by walking must also look like test files
    /// unless `all_sources` is set.
    pub fn find_source_files(roots: &[PathBuf], all_sources: bool) -> Vec<PathBuf> {
        let mut found = BTreeSet::new();

        for root in roots {
            if root.is_file() {
                if SourceLanguage::from_path(root).is_some() {
                    found.insert(root.clone());
                }
                continue;
            }
            let walker = WalkDir::new(root)
                .follow_links(false)
                .into_iter()
                .filter_entry(|e| !is_ignored_dir(e));
            for entry in walker.filter_map(|e| e.ok()) {
                let path = entry.path();
                if !entry.file_type().is_file() || SourceLanguage::from_path(path).is_none() {
                    continue;
                }
                if all_sources || is_test_file(path) {
                    found.insert(path.to_path_buf());
                }
            }
        }

        found.into_iter().collect()
    }

    /// Format a count with thousands separators: 1234567 -> "1,234,567"
    pub fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    /// Inverse of `format_number`
    pub fn parse_number(s: &str) -> Result<usize> {
        s.replace(',', "")
            .parse::<usize>()
            .with_context(|| format!("Failed to parse number: {s}"))
    }

}
