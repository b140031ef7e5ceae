// src/main.rs
use anyhow::Result;
use clap::Parser;

use sapfigures::cli::{init_logging, run, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);
    run(&args)
}
