// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

use anyhow::{Context, Result};
use log::info;

use crate::config::DemoConfig;
use crate::core::sample_image::load_grayscale;
use crate::core::visualization::Style;
use crate::demos::run_demo;

pub use args::{Args, Command};
pub use output::{format_json, format_summary, print_json, print_summary};

/// Initialise env_logger; `RUST_LOG` overrides the verbosity flag
pub fn init_logging(args: &Args) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .format_timestamp(None)
        .init();
}

/// Run the CLI
pub fn run(args: &Args) -> Result<()> {
    let config = DemoConfig::default();

    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", args.output_dir.display())
    })?;

    let style = Style::load(args.font.as_deref());
    let image = args
        .image
        .as_deref()
        .map(load_grayscale)
        .transpose()?;

    let mut outputs = Vec::new();
    for kind in args.demos() {
        info!("Rendering {}", kind);
        let output = run_demo(kind, &config, &style, &args.output_dir, image.as_ref())
            .with_context(|| format!("Demo '{}' failed", kind))?;
        outputs.push(output);
    }

    if args.json {
        print_json(&outputs)?;
    } else {
        print_summary(&outputs);
    }
    Ok(())
}
