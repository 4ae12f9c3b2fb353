// Copyright (C) Brian G. Milnes 2025

//! Tool runner infrastructure for the review binaries
//!
//! Wraps a tool body with the `Entering directory` header compile mode
//! needs, timing, optional file logging, and the exit status.

pub mod tool_runner {
    use std::path::PathBuf;
    use std::process::ExitCode;
    use std::time::Instant;

    use anyhow::Result;

    use crate::logging::logging::ToolLogger;

    pub struct ToolConfig {
        /// Name of the tool (log directory name)
        pub tool_name: String,
        /// Directory shown in "Entering directory"
        pub base_dir: PathBuf,
        pub enable_logging: bool,
        /// Print the header and timing lines. Off for machine-readable output.
        pub chatty: bool,
    }

    impl ToolConfig {
        pub fn new(tool_name: &str, base_dir: PathBuf) -> Self {
            ToolConfig {
                tool_name: tool_name.to_string(),
                base_dir,
                enable_logging: false,
                chatty: true,
            }
        }

        pub fn with_logging(mut self, enable: bool) -> Self {
            self.enable_logging = enable;
            self
        }

        pub fn quiet(mut self, quiet: bool) -> Self {
            self.chatty = !quiet;
            self
        }
    }

    /// What a tool body hands back to the runner
    pub struct ToolOutcome {
        pub summary: String,
        pub success: bool,
    }

    /// Run a tool with the standard header, timing and optional logging.
    /// Returns exit code 1 when the tool reports failure.
    pub fn run_tool<F>(config: ToolConfig, tool_fn: F) -> Result<ExitCode>
    where
        F: FnOnce(&mut ToolLogger) -> Result<ToolOutcome>,
    {
        let start = Instant::now();

        let mut logger = if config.enable_logging {
            ToolLogger::new(&config.tool_name)
        } else {
            ToolLogger::disabled()
        };

        if config.chatty {
            logger.log(&format!("Entering directory '{}'", config.base_dir.display()));
            logger.log("");
        }

        let outcome = tool_fn(&mut logger)?;

        if config.chatty {
            logger.log("");
            logger.log(&outcome.summary);
            logger.log(&format!("Completed in {}ms", start.elapsed().as_millis()));
        }
        logger.finalize(&outcome.summary);

        Ok(if outcome.success { ExitCode::SUCCESS } else { ExitCode::from(1) })
    }
}
