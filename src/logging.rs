// Copyright (C) Brian G. Milnes 2025

//! Run logs for the review tools
//!
//! Every line a tool prints can be mirrored to
//! `<log root>/<tool-name>/<YYYY-MM-DD>/run-<HH-MM-SS>.log`. The default log
//! root is `logs/` under the working directory.

pub mod logging {
    use std::fs;
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use chrono::{DateTime, Local};

    pub const DEFAULT_LOG_ROOT: &str = "logs";

    pub struct ToolLogger {
        sink: Option<BufWriter<fs::File>>,
        log_path: Option<PathBuf>,
        started: DateTime<Local>,
    }

    impl ToolLogger {
        /// Stdout only
        pub fn disabled() -> Self {
            ToolLogger {
                sink: None,
                log_path: None,
                started: Local::now(),
            }
        }

        /// Log under `logs/`. Falls back to stdout only if the file cannot be made.
        pub fn new(tool_name: &str) -> Self {
            Self::in_dir(Path::new(DEFAULT_LOG_ROOT), tool_name)
        }

        pub fn in_dir(root: &Path, tool_name: &str) -> Self {
            let started = Local::now();
            match Self::open(root, tool_name, &started) {
                Ok((file, path)) => ToolLogger {
                    sink: Some(BufWriter::new(file)),
                    log_path: Some(path),
                    started,
                },
                Err(e) => {
                    eprintln!("Warning: Could not create log file: {e:#}");
                    eprintln!("Continuing without logging...");
                    ToolLogger { sink: None, log_path: None, started }
                }
            }
        }

        fn open(root: &Path, tool_name: &str, started: &DateTime<Local>) -> Result<(fs::File, PathBuf)> {
            let dir = root
                .join(tool_name)
                .join(started.format("%Y-%m-%d").to_string());
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;

            let path = dir.join(format!("run-{}.log", started.format("%H-%M-%S")));
            let file = fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok((file, path))
        }

        pub fn is_enabled(&self) -> bool {
            self.sink.is_some()
        }

        pub fn log_path(&self) -> Option<&Path> {
            self.log_path.as_deref()
        }

        /// Stdout and the log file
        pub fn log(&mut self, message: &str) {
            println!("{message}");
            self.log_silent(message);
        }

        /// Stderr and the log file
        pub fn warn(&mut self, message: &str) {
            eprintln!("{message}");
            self.log_silent(message);
        }

        /// Log file only
        pub fn log_silent(&mut self, message: &str) {
            if let Some(sink) = self.sink.as_mut() {
                let _ = writeln!(sink, "{message}");
            }
        }

        /// Append the run summary and timing to the log file
        pub fn finalize(&mut self, summary: &str) {
            if !self.is_enabled() {
                return;
            }
            let ended = Local::now();
            let elapsed = ended.signed_duration_since(self.started);

            self.log_silent("");
            self.log_silent("=== Run Summary ===");
            self.log_silent(summary);
            self.log_silent(&format!("Started: {}", self.started.format("%Y-%m-%d %H:%M:%S")));
            self.log_silent(&format!("Ended: {}", ended.format("%Y-%m-%d %H:%M:%S")));
            self.log_silent(&format!("Duration: {}ms", elapsed.num_milliseconds()));
            if let Some(path) = self.log_path.clone() {
                self.warn(&format!("Log saved to: {}", path.display()));
            }
            if let Some(sink) = self.sink.as_mut() {
                let _ = sink.flush();
            }
        }
    }

    impl Drop for ToolLogger {
        fn drop(&mut self) {
            if let Some(sink) = self.sink.as_mut() {
                let _ = sink.flush();
            }
        }
    }

}
