//! Read a batch of training examples for `quote record`.
//!
//! Accepts either a JSON array of examples or a single example object.
//! `-` reads from stdin.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;

use crate::domain::TrainingExample;
use crate::error::AppError;

#[derive(Deserialize)]
#[serde(untagged)]
enum Batch {
    Many(Vec<TrainingExample>),
    One(TrainingExample),
}

/// Read a batch from a file path (or `-` for stdin).
pub fn read_batch(path: &Path) -> Result<Vec<TrainingExample>, AppError> {
    let mut text = String::new();
    if path == Path::new("-") {
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| AppError::new(2, format!("Failed to read examples from stdin: {e}")))?;
    } else {
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut text))
            .map_err(|e| AppError::new(2, format!("Failed to open examples '{}': {e}", path.display())))?;
    }
    parse_batch(&text)
}

pub fn parse_batch(text: &str) -> Result<Vec<TrainingExample>, AppError> {
    let batch: Batch = serde_json::from_str(text)
        .map_err(|e| AppError::new(2, format!("Invalid training examples JSON: {e}")))?;
    Ok(match batch {
        Batch::Many(examples) => examples,
        Batch::One(example) => vec![example],
    })
}
