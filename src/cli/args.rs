//! CLI argument parsing

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DemoKind;
use crate::core::visualization::FONT_ENV;

#[derive(Parser, Debug)]
#[command(name = "sapfigures", version)]
#[command(about = "Render the signal and image processing demo figures")]
pub struct Args {
    /// Demo to render; all of them when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory the figures are written to
    #[arg(short, long, default_value = ".", global = true)]
    pub output_dir: PathBuf,

    /// TTF/OTF font for figure text
    #[arg(long, env = FONT_ENV, global = true)]
    pub font: Option<PathBuf>,

    /// Image file to use instead of the built-in sample in the grayscale demo
    #[arg(long, global = true)]
    pub image: Option<PathBuf>,

    /// Print a JSON summary instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the demo constants as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Grayscale image with zoomed crop and colorbar
    Grayscale,
    /// Autocorrelation of a pulse train
    Autocorrelation,
    /// FFT, power spectrum, periodogram and Welch estimate of noisy sines
    Fft,
    /// Every demo
    All,
}

impl Args {
    /// Demos selected on the command line
    pub fn demos(&self) -> Vec<DemoKind> {
        match self.command {
            Some(Command::Grayscale) => vec![DemoKind::Grayscale],
            Some(Command::Autocorrelation) => vec![DemoKind::Autocorrelation],
            Some(Command::Fft) => vec![DemoKind::FftSines],
            Some(Command::All) | None => DemoKind::all(),
        }
    }

    /// Log filter for the verbosity flag
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_runs_everything() {
        let args = Args::try_parse_from(["sapfigures"]).unwrap();
        assert_eq!(args.demos(), DemoKind::all());
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn test_subcommands_match_demo_names() {
        for kind in DemoKind::all() {
            let args = Args::try_parse_from(["sapfigures", kind.name()]).unwrap();
            assert_eq!(args.demos(), vec![kind]);
        }
    }

    #[test]
    fn test_subcommand_and_flags() {
        let args =
            Args::try_parse_from(["sapfigures", "fft", "-vv", "--output-dir", "figs"]).unwrap();
        assert_eq!(args.demos(), vec![DemoKind::FftSines]);
        assert_eq!(args.output_dir, PathBuf::from("figs"));
        assert_eq!(args.log_level(), "debug");
    }
}
