//! Persistence seam for training data and the learned model.
//!
//! "Nothing stored yet" is a normal state: `load_examples` returns an empty
//! list and `load_model` returns `Ok(None)`. Errors mean the data exists but
//! could not be read or parsed.

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::TrainingExample;
use crate::error::StoreError;
use crate::models::LearnedModel;

pub trait TrainingStore: Send + Sync {
    fn load_examples(&self) -> Result<Vec<TrainingExample>, StoreError>;
    fn save_examples(&self, examples: &[TrainingExample]) -> Result<(), StoreError>;
    fn load_model(&self) -> Result<Option<LearnedModel>, StoreError>;
    fn save_model(&self, model: &LearnedModel) -> Result<(), StoreError>;
}

impl<T: TrainingStore + ?Sized> TrainingStore for Arc<T> {
    fn load_examples(&self) -> Result<Vec<TrainingExample>, StoreError> {
        (**self).load_examples()
    }

    fn save_examples(&self, examples: &[TrainingExample]) -> Result<(), StoreError> {
        (**self).save_examples(examples)
    }

    fn load_model(&self) -> Result<Option<LearnedModel>, StoreError> {
        (**self).load_model()
    }

    fn save_model(&self, model: &LearnedModel) -> Result<(), StoreError> {
        (**self).save_model(model)
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    examples: Vec<TrainingExample>,
    model: Option<LearnedModel>,
    example_saves: usize,
    model_saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_examples(examples: Vec<TrainingExample>) -> Self {
        let store = Self::default();
        store.lock().examples = examples;
        store
    }

    pub fn with_model(self, model: LearnedModel) -> Self {
        self.lock().model = Some(model);
        self
    }

    /// Snapshot of what has been persisted.
    pub fn examples(&self) -> Vec<TrainingExample> {
        self.lock().examples.clone()
    }

    pub fn model(&self) -> Option<LearnedModel> {
        self.lock().model.clone()
    }

    /// Number of `save_examples` calls so far.
    pub fn example_saves(&self) -> usize {
        self.lock().example_saves
    }

    pub fn model_saves(&self) -> usize {
        self.lock().model_saves
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TrainingStore for MemoryStore {
    fn load_examples(&self) -> Result<Vec<TrainingExample>, StoreError> {
        Ok(self.examples())
    }

    fn save_examples(&self, examples: &[TrainingExample]) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.examples = examples.to_vec();
        state.example_saves += 1;
        Ok(())
    }

    fn load_model(&self) -> Result<Option<LearnedModel>, StoreError> {
        Ok(self.model())
    }

    fn save_model(&self, model: &LearnedModel) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.model = Some(model.clone());
        state.model_saves += 1;
        Ok(())
    }
}
