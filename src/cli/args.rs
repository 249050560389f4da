//! CLI argument parsing using clap.
//!
//! Defines the command-line interface for the `layerlens` binary.

use clap::Parser;
use std::path::PathBuf;

/// layerlens - Walk a prompt through the layers of an LLM system
#[derive(Parser, Debug, Clone)]
#[command(name = "layerlens")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Run a single prompt through the pipeline and exit
    #[arg(short = 'e', long, conflicts_with = "file")]
    pub execute: Option<String>,

    /// Run prompts from a file (one per line) and exit
    #[arg(short = 'f', long, conflicts_with = "execute")]
    pub file: Option<PathBuf>,

    /// Hide a layer (1-10) from the breakdown; may be repeated
    #[arg(
        short = 'd',
        long = "disable",
        value_name = "LAYER",
        value_parser = clap::value_parser!(u8).range(1..=10)
    )]
    pub disable: Vec<u8>,

    /// Write each visible layer's export document into DIR
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Show a line diff against the curated Tokyo answer
    #[arg(long)]
    pub compare: bool,

    /// Settings file (default: ~/.layerlens/settings.toml)
    #[arg(long, env = "LAYERLENS_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Output one JSON object per prompt (for scripting/parsing)
    #[arg(long)]
    pub json: bool,

    /// Only output the final response
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Show verbose output (debug information)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["layerlens"]);
        assert!(args.execute.is_none());
        assert!(args.disable.is_empty());
        assert!(args.export.is_none());
        assert!(!args.compare);
        assert!(!args.json);
        assert!(!args.quiet);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_execute_flag() {
        let args = Args::parse_from(["layerlens", "-e", "Explain black holes"]);
        assert_eq!(args.execute, Some("Explain black holes".to_string()));
    }

    #[test]
    fn test_args_execute_conflicts_with_file() {
        let result = Args::try_parse_from(["layerlens", "-e", "hi", "-f", "prompts.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_disable_repeatable() {
        let args = Args::parse_from(["layerlens", "--disable", "3", "-d", "7"]);
        assert_eq!(args.disable, vec![3, 7]);
    }

    #[test]
    fn test_args_disable_out_of_range() {
        assert!(Args::try_parse_from(["layerlens", "--disable", "0"]).is_err());
        assert!(Args::try_parse_from(["layerlens", "--disable", "11"]).is_err());
    }

    #[test]
    fn test_args_export_and_compare() {
        let args = Args::parse_from(["layerlens", "--export", "out", "--compare"]);
        assert_eq!(args.export, Some(PathBuf::from("out")));
        assert!(args.compare);
    }

    #[test]
    fn test_args_output_modes() {
        let args = Args::parse_from(["layerlens", "--json", "--quiet"]);
        assert!(args.json);
        assert!(args.quiet);
    }
}
