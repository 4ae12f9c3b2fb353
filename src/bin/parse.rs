// Copyright (C) Brian G. Milnes 2025

//! Parse a JavaScript/TypeScript file and display the tree the analyzer sees
//!
//! Binary: assertlint-parse

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "assertlint-parse")]
#[command(about = "Parse and display the lowered syntax tree of a JS/TS file", long_about = None)]
struct Args {
    /// Path to the source file to parse
    #[arg(short, long)]
    path: PathBuf,

    /// Output format (tree, calls, json, debug)
    #[arg(short, long, default_value = "tree")]
    format: String,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();
    let chatty = args.format != "json";

    if chatty {
        let parent_dir = args.path.parent()
            .unwrap_or_else(|| std::path::Path::new("."));
        println!("Entering directory '{}'", parent_dir.display());
        println!();
        println!("Parsing file: {}", args.path.display());
        println!();
    }

    assertlint::parse(&args.path, &args.format)?;

    if chatty {
        println!();
        println!("Completed in {}ms", start.elapsed().as_millis());
    }

    Ok(())
}
