use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::outline::DEFAULT_MAX_VALIDATION_ITERATIONS;

#[derive(Parser, Debug)]
#[command(
    name = "specconv",
    version,
    about = "Specification outline extraction and consistency repair"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Extract(ExtractArgs),
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub template_levels: Option<PathBuf>,

    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    #[arg(long, default_value_t = DEFAULT_MAX_VALIDATION_ITERATIONS)]
    pub max_validation_iterations: usize,

    #[arg(long, default_value_t = false)]
    pub no_auto_correct: bool,

    #[arg(long, default_value_t = false)]
    pub modular: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_MAX_VALIDATION_ITERATIONS)]
    pub max_validation_iterations: usize,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}
