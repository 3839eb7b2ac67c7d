//! Error types.
//!
//! Library code returns the `thiserror` enums below. The `quote` binary folds
//! them into `AppError`, which carries the process exit code:
//!
//! - 2: bad input / usage
//! - 3: no usable data
//! - 4: I/O or internal failure

use std::path::PathBuf;

use thiserror::Error;

use crate::fit::Feature;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Why the learned estimator could not serve a call.
///
/// Every variant is recoverable: the orchestrator falls back to the rule table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("no learned model has been trained")]
    ModelAbsent,
    #[error("{feature} value '{value}' was not seen when the model was trained")]
    UnseenCategory { feature: Feature, value: String },
    #[error("regressor produced a non-finite estimate ({0})")]
    NonFinite(f64),
}

/// Why a fit produced no model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainError {
    #[error("no training examples")]
    NoExamples,
    #[error("{0} regressor could not be fitted to the training set")]
    Degenerate(&'static str),
}

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model artifact '{}' has format version {found}, expected {expected}", path.display())]
    Version {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
}

/// Failures surfaced by engine write operations (`record`, `retrain`).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Train(#[from] TrainError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::new(4, err.to_string())
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Store(e) => e.into(),
            EngineError::Train(e @ TrainError::NoExamples) => AppError::new(3, e.to_string()),
            EngineError::Train(e) => AppError::new(4, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_exit_codes() {
        let no_data: AppError = EngineError::Train(TrainError::NoExamples).into();
        assert_eq!(no_data.exit_code(), 3);

        let io: AppError = EngineError::Store(StoreError::Io {
            path: PathBuf::from("/nope/training_data.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        })
        .into();
        assert_eq!(io.exit_code(), 4);
        assert!(io.to_string().contains("/nope/training_data.json"));
    }

    #[test]
    fn unseen_category_message_names_the_feature() {
        let err = EstimateError::UnseenCategory {
            feature: Feature::Location,
            value: "limpopo".into(),
        };
        assert_eq!(
            err.to_string(),
            "location value 'limpopo' was not seen when the model was trained"
        );
    }
}
