//! Command-line interface implementation for sourcegen.
//! Provides argument parsing and help text formatting using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for sourcegen.
#[derive(Parser, Debug)]
#[command(author, version, about = "sourcegen: per-variant Kotlin and Android resource generator", long_about = None)]
pub struct Args {
    /// Module directory holding the sourcegen descriptor
    #[arg(value_name = "PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Path to the descriptor, instead of looking it up in PROJECT_DIR
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Build directory, overriding the descriptor's output.buildDir
    #[arg(short = 'o', long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Only generate for this variant. May be repeated.
    #[arg(long = "variant", value_name = "NAME")]
    pub variants: Vec<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}
