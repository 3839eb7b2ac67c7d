//! File-backed store.
//!
//! Layout:
//! - `<data_dir>/training_data.json`: pretty-printed JSON array of examples
//! - `<model_path>`: JSON model artifact (regressor + encoders)
//!
//! Writes go to a sibling `*.tmp` file that is then renamed over the target,
//! so a crash mid-write leaves the previous file intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::TrainingExample;
use crate::error::StoreError;
use crate::io::store::TrainingStore;
use crate::models::{LearnedModel, MODEL_FORMAT_VERSION};

pub const TRAINING_DATA_FILE: &str = "training_data.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    examples_path: PathBuf,
    model_path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl AsRef<Path>, model_path: impl Into<PathBuf>) -> Self {
        Self {
            examples_path: data_dir.as_ref().join(TRAINING_DATA_FILE),
            model_path: model_path.into(),
        }
    }

    pub fn examples_path(&self) -> &Path {
        &self.examples_path
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl TrainingStore for FileStore {
    fn load_examples(&self) -> Result<Vec<TrainingExample>, StoreError> {
        Ok(read_json(&self.examples_path)?.unwrap_or_default())
    }

    fn save_examples(&self, examples: &[TrainingExample]) -> Result<(), StoreError> {
        write_json_atomic(&self.examples_path, examples)
    }

    fn load_model(&self) -> Result<Option<LearnedModel>, StoreError> {
        let Some(model) = read_json::<LearnedModel>(&self.model_path)? else {
            return Ok(None);
        };
        if model.format_version != MODEL_FORMAT_VERSION {
            return Err(StoreError::Version {
                path: self.model_path.clone(),
                found: model.format_version,
                expected: MODEL_FORMAT_VERSION,
            });
        }
        Ok(Some(model))
    }

    fn save_model(&self, model: &LearnedModel) -> Result<(), StoreError> {
        write_json_atomic(&self.model_path, model)
    }
}

/// Read JSON from `path`; a missing file is `Ok(None)`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let file = File::create(&tmp).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)?;
    drop(writer);

    fs::rename(&tmp, path).map_err(io_err)
}
