//! Command-line parsing for the `quote` binary.
//!
//! Argument parsing and engine construction stay separate: this module only
//! describes the surface, `app` turns it into an `EngineConfig` and dispatches.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Complexity, ExperienceLevel, JobFeatures, RegressorKind};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "quote", version, about = "Freelance job pricing estimator")]
pub struct Cli {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// More log output on stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate a price range for a job.
    Predict(PredictArgs),
    /// Append completed jobs to the training set (JSON file or `-` for stdin).
    Record(RecordArgs),
    /// Refit the learned model from the stored training set.
    Train(OutputArgs),
    /// Print the effective base-rate table.
    Rates(OutputArgs),
    /// List known industries and locations.
    Catalog(OutputArgs),
    /// Training set and model summary.
    Stats(OutputArgs),
}

/// Storage locations and learning knobs shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct EngineArgs {
    /// Directory holding `training_data.json`.
    #[arg(long, env = "QUOTE_DATA_DIR", default_value = "./data", global = true)]
    pub data_dir: PathBuf,

    /// Learned model artifact.
    #[arg(
        long,
        env = "QUOTE_MODEL_PATH",
        default_value = "./models/pricing_model.json",
        global = true
    )]
    pub model_path: PathBuf,

    /// Regressor used when (re)training.
    #[arg(long, value_enum, default_value_t = RegressorKind::Forest, global = true)]
    pub regressor: RegressorKind,

    /// Trees in the forest regressor.
    #[arg(long, default_value_t = 100, global = true)]
    pub trees: usize,

    /// Seed for the forest bootstrap.
    #[arg(long, default_value_t = 42, global = true)]
    pub seed: u64,

    /// Do not refit the learned model after `record`.
    #[arg(long, global = true)]
    pub no_auto_retrain: bool,
}

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    /// Industry id, e.g. `graphic_design`.
    #[arg(short, long)]
    pub industry: String,

    /// Location id, e.g. `gauteng` (case-insensitive).
    #[arg(short, long)]
    pub location: String,

    #[arg(short = 'e', long = "level", value_enum)]
    pub experience_level: ExperienceLevel,

    #[arg(short, long, value_enum, default_value_t = Complexity::Standard)]
    pub complexity: Complexity,

    /// Estimated duration in hours.
    #[arg(long, allow_negative_numbers = true)]
    pub hours: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl PredictArgs {
    pub fn features(&self) -> JobFeatures {
        JobFeatures {
            industry: self.industry.clone(),
            location: self.location.clone(),
            experience_level: self.experience_level,
            complexity: self.complexity,
            duration_hours: self.hours,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct RecordArgs {
    /// JSON array of training examples (or a single example); `-` reads stdin.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}
