//! Prediction orchestrator and training entry point.
//!
//! `Engine` keeps the rate table, the training set and the learned model as
//! immutable snapshots behind `ArcSwap` cells. `predict` only loads snapshots,
//! so it never waits on a refit or on persistence. Writers serialize on a
//! mutex per artifact, build the replacement off to the side and swap it in.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::{ArcSwap, ArcSwapOption};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    EngineConfig, JobFeatures, PredictionResult, PredictionSource, PriceRange, RegressorKind,
    TrainingExample,
};
use crate::engine::updater::{BucketUpdate, refresh_rates};
use crate::error::{EngineError, EstimateError, TrainError};
use crate::fit::train_model;
use crate::io::TrainingStore;
use crate::math::round2;
use crate::models::{LearnedModel, RuleEstimator, confidence, estimate_with};
use crate::rates::{ComplexityMultipliers, LocationMultipliers, RateTable};

/// Acknowledgement returned by [`Engine::record`].
#[derive(Debug, Clone, Serialize)]
pub struct RecordSummary {
    pub added: usize,
    pub total: usize,
    pub updated_buckets: Vec<BucketUpdate>,
    pub retrained: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub kind: RegressorKind,
    pub n_examples: usize,
    pub trained_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub examples: usize,
    pub rate_entries: usize,
    /// Regressor used by the next retrain.
    pub regressor: RegressorKind,
    pub model: Option<ModelInfo>,
}

pub struct Engine {
    config: EngineConfig,
    locations: LocationMultipliers,
    complexity: ComplexityMultipliers,
    rates: ArcSwap<RateTable>,
    examples: ArcSwap<Vec<TrainingExample>>,
    model: ArcSwapOption<LearnedModel>,
    store: Box<dyn TrainingStore>,
    /// Held while the training set and rate table are replaced.
    record_lock: Mutex<()>,
    model_lock: Mutex<()>,
}

impl Engine {
    /// Load persisted state and build the initial snapshots.
    ///
    /// Unreadable training data or model artifacts are logged and treated as
    /// absent; the engine always comes up.
    pub fn open(store: impl TrainingStore + 'static, config: EngineConfig) -> Self {
        let examples = store.load_examples().unwrap_or_else(|err| {
            warn!(error = %err, "could not load training data, starting empty");
            Vec::new()
        });
        let model = store.load_model().unwrap_or_else(|err| {
            warn!(error = %err, "could not load learned model, using rule table only");
            None
        });

        let defaults = RateTable::standard(config.default_base_rate);
        let (rates, updates) = refresh_rates(&defaults, &examples, config.min_bucket_samples);
        info!(
            examples = examples.len(),
            observed_buckets = updates.len(),
            model = model.is_some(),
            "engine ready"
        );

        Self {
            locations: LocationMultipliers::default(),
            complexity: ComplexityMultipliers::default(),
            rates: ArcSwap::from_pointee(rates),
            examples: ArcSwap::from_pointee(examples),
            model: ArcSwapOption::from(model.map(Arc::new)),
            store: Box::new(store),
            record_lock: Mutex::new(()),
            model_lock: Mutex::new(()),
            config,
        }
    }

    pub fn with_locations(mut self, locations: LocationMultipliers) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_complexity(mut self, complexity: ComplexityMultipliers) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current rate table snapshot.
    pub fn rates(&self) -> Arc<RateTable> {
        self.rates.load_full()
    }

    pub fn examples(&self) -> Arc<Vec<TrainingExample>> {
        self.examples.load_full()
    }

    pub fn model(&self) -> Option<Arc<LearnedModel>> {
        self.model.load_full()
    }

    /// Price interval, confidence and rationale for a job. Never fails.
    pub fn predict(&self, features: &JobFeatures) -> PredictionResult {
        let rates = self.rates.load();
        let training_len = self.examples.load().len();
        let model = self.model.load_full();

        let rules = RuleEstimator {
            rates: &rates,
            locations: &self.locations,
            complexity: &self.complexity,
            config: &self.config,
        };

        let (range, source) = match estimate_with(model.as_deref(), features) {
            Ok(point) => (
                PriceRange::band_around(point, self.config.learned_band),
                PredictionSource::Learned,
            ),
            Err(EstimateError::ModelAbsent) => {
                (rules.estimate(features, training_len), PredictionSource::Rules)
            }
            Err(err) => {
                debug!(error = %err, "learned estimate unavailable, using rule table");
                (rules.estimate(features, training_len), PredictionSource::RulesFallback)
            }
        };

        PredictionResult {
            min_price: round2(range.min),
            max_price: round2(range.max),
            confidence: confidence(&self.config.confidence, source, training_len),
            rationale: rationale(features),
            source,
        }
    }

    /// Append `batch` to the training set, persist it and refresh the rate table.
    ///
    /// The in-memory snapshots are replaced even when persisting fails; the
    /// save error is still returned. With `auto_retrain` set, a non-empty batch
    /// also refits the learned model.
    pub fn record(&self, batch: Vec<TrainingExample>) -> Result<RecordSummary, EngineError> {
        let added = batch.len();
        let (total, updated_buckets, saved) = {
            let _guard = lock(&self.record_lock);

            let mut all = Vec::clone(&self.examples.load());
            all.extend(batch);
            let saved = self.store.save_examples(&all);

            let (table, updates) =
                refresh_rates(&self.rates.load(), &all, self.config.min_bucket_samples);
            let total = all.len();
            self.examples.store(Arc::new(all));
            self.rates.store(Arc::new(table));
            (total, updates, saved)
        };

        let changed = updated_buckets.iter().filter(|u| u.changed()).count();
        info!(added, total, buckets_changed = changed, "recorded training examples");
        for update in updated_buckets.iter().filter(|u| u.changed()) {
            debug!(
                industry = %update.industry,
                level = %update.level,
                samples = update.samples,
                rate = update.rate,
                previous = ?update.previous,
                "rate bucket updated"
            );
        }

        let retrained = if self.config.auto_retrain && added > 0 {
            match self.retrain() {
                Ok(done) => done,
                Err(err) => {
                    warn!(error = %err, "automatic retrain failed");
                    false
                }
            }
        } else {
            false
        };

        saved?;
        Ok(RecordSummary {
            added,
            total,
            updated_buckets,
            retrained,
        })
    }

    /// Refit the learned model from the full training set.
    ///
    /// Returns `Ok(false)` when there is nothing to train on; the current
    /// model (if any) is left in place.
    pub fn retrain(&self) -> Result<bool, EngineError> {
        let _guard = lock(&self.model_lock);
        let examples = self.examples.load_full();

        let model = match train_model(&examples, &self.config) {
            Ok(model) => Arc::new(model),
            Err(TrainError::NoExamples) => {
                debug!("no training examples, skipping retrain");
                return Ok(false);
            }
            Err(err) => return Err(err.into()),
        };

        self.model.store(Some(Arc::clone(&model)));
        info!(
            examples = model.n_examples,
            regressor = model.kind().display_name(),
            "learned model retrained"
        );
        self.store.save_model(&model)?;
        Ok(true)
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            examples: self.examples.load().len(),
            rate_entries: self.rates.load().len(),
            regressor: self.config.regressor,
            model: self.model.load_full().map(|m| ModelInfo {
                kind: m.kind(),
                n_examples: m.n_examples,
                trained_at: m.trained_at,
            }),
        }
    }
}

fn rationale(features: &JobFeatures) -> String {
    format!(
        "Based on {} level {} work in {} with {} complexity",
        features.experience_level, features.industry, features.location, features.complexity
    )
}

fn lock(mutex: &Mutex<()>) -> MutexGuard<'_, ()> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
