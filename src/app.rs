//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging
//! - opens the engine over the file store
//! - dispatches the subcommand and prints text or JSON

use clap::Parser;
use serde::Serialize;

use crate::cli::{Cli, Command, EngineArgs, OutputArgs, PredictArgs, RecordArgs};
use crate::domain::{EngineConfig, ExperienceLevel, ForestParams};
use crate::engine::Engine;
use crate::error::AppError;
use crate::io::{FileStore, read_batch};
use crate::rates;
use crate::report;

/// Entry point for the `quote` binary.
pub fn run() -> Result<(), AppError> {
    // Env fallbacks for --data-dir/--model-path may come from .env.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Catalog(out) => handle_catalog(&out),
        command => {
            let engine = open_engine(&cli.engine);
            match command {
                Command::Predict(args) => handle_predict(&engine, &args),
                Command::Record(args) => handle_record(&engine, &args),
                Command::Train(out) => handle_train(&engine, &out),
                Command::Rates(out) => handle_rates(&engine, &out),
                Command::Stats(out) => handle_stats(&engine, &out),
                Command::Catalog(out) => handle_catalog(&out),
            }
        }
    }
}

pub fn engine_config_from_args(args: &EngineArgs) -> EngineConfig {
    EngineConfig {
        regressor: args.regressor,
        forest: ForestParams {
            n_trees: args.trees,
            seed: args.seed,
            ..ForestParams::default()
        },
        auto_retrain: !args.no_auto_retrain,
        ..EngineConfig::default()
    }
}

fn open_engine(args: &EngineArgs) -> Engine {
    let store = FileStore::new(&args.data_dir, args.model_path.clone());
    Engine::open(store, engine_config_from_args(args))
}

fn handle_predict(engine: &Engine, args: &PredictArgs) -> Result<(), AppError> {
    if !args.hours.is_finite() {
        return Err(AppError::new(2, "--hours must be a finite number."));
    }
    let features = args.features();
    let result = engine.predict(&features);

    if args.output.json {
        print_json(&result)
    } else {
        print!("{}", report::format_prediction(&features, &result));
        Ok(())
    }
}

fn handle_record(engine: &Engine, args: &RecordArgs) -> Result<(), AppError> {
    let batch = read_batch(&args.input)?;
    let summary = engine.record(batch)?;

    if args.output.json {
        print_json(&summary)
    } else {
        print!("{}", report::format_record_summary(&summary));
        Ok(())
    }
}

fn handle_train(engine: &Engine, out: &OutputArgs) -> Result<(), AppError> {
    if !engine.retrain()? {
        return Err(AppError::new(
            3,
            "No training examples stored; run `quote record` first.",
        ));
    }
    let stats = engine.stats();

    if out.json {
        print_json(&stats)
    } else {
        print!("{}", report::format_stats(&stats));
        Ok(())
    }
}

#[derive(Serialize)]
struct RateRow<'a> {
    industry: &'a str,
    experience_level: ExperienceLevel,
    rate: f64,
}

fn handle_rates(engine: &Engine, out: &OutputArgs) -> Result<(), AppError> {
    let table = engine.rates();

    if out.json {
        let rows: Vec<RateRow<'_>> = table
            .iter()
            .map(|(industry, experience_level, rate)| RateRow {
                industry,
                experience_level,
                rate,
            })
            .collect();
        print_json(&serde_json::json!({
            "default_rate": table.default_rate(),
            "rates": rows,
        }))
    } else {
        print!("{}", report::format_rates(&table));
        Ok(())
    }
}

fn handle_catalog(out: &OutputArgs) -> Result<(), AppError> {
    if out.json {
        print_json(&serde_json::json!({
            "industries": rates::industries(),
            "locations": rates::locations(),
        }))
    } else {
        print!(
            "{}",
            report::format_catalog(rates::industries(), rates::locations())
        );
        Ok(())
    }
}

fn handle_stats(engine: &Engine, out: &OutputArgs) -> Result<(), AppError> {
    let stats = engine.stats();

    if out.json {
        print_json(&stats)
    } else {
        print!("{}", report::format_stats(&stats));
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(4, format!("Failed to serialize output: {e}")))?;
    println!("{text}");
    Ok(())
}
