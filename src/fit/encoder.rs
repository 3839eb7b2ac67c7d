//! Categorical feature encoding.
//!
//! Each categorical feature gets an immutable category → integer code map,
//! built once per fit from every training example. Codes are assigned in
//! sorted category order so a refit over the same data yields the same codes.
//!
//! Looking up a category that was not seen at fit time is an expected, typed
//! failure (`EstimateError::UnseenCategory`); the map never grows on its own.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{JobFeatures, TrainingExample};
use crate::error::EstimateError;
use crate::rates::normalize_location;

/// Number of columns in an encoded feature row (four codes plus duration).
pub const FEATURE_COUNT: usize = 5;

/// Categorical inputs of the learned estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Industry,
    Location,
    ExperienceLevel,
    Complexity,
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::Industry => "industry",
            Feature::Location => "location",
            Feature::ExperienceLevel => "experience_level",
            Feature::Complexity => "complexity",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category → code map for one feature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryEncoder {
    codes: BTreeMap<String, u32>,
}

impl CategoryEncoder {
    pub fn fit<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        let codes = distinct
            .into_iter()
            .enumerate()
            .map(|(code, value)| (value.to_string(), code as u32))
            .collect();
        Self { codes }
    }

    pub fn code(&self, value: &str) -> Option<u32> {
        self.codes.get(value).copied()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.codes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// One encoder per categorical feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureEncoders {
    pub industry: CategoryEncoder,
    pub location: CategoryEncoder,
    pub experience_level: CategoryEncoder,
    pub complexity: CategoryEncoder,
}

impl FeatureEncoders {
    /// Fit encoders over the full example set.
    pub fn fit(examples: &[TrainingExample]) -> Self {
        let locations: Vec<String> = examples
            .iter()
            .map(|e| normalize_location(&e.location))
            .collect();
        Self {
            industry: CategoryEncoder::fit(examples.iter().map(|e| e.industry.as_str())),
            location: CategoryEncoder::fit(locations.iter().map(String::as_str)),
            experience_level: CategoryEncoder::fit(
                examples.iter().map(|e| e.experience_level.as_str()),
            ),
            complexity: CategoryEncoder::fit(examples.iter().map(|e| e.complexity.as_str())),
        }
    }

    /// Encode a feature record as `[industry, location, level, complexity, hours]`.
    pub fn encode(&self, features: &JobFeatures) -> Result<[f64; FEATURE_COUNT], EstimateError> {
        let location = normalize_location(&features.location);
        Ok([
            lookup(&self.industry, Feature::Industry, &features.industry)?,
            lookup(&self.location, Feature::Location, &location)?,
            lookup(
                &self.experience_level,
                Feature::ExperienceLevel,
                features.experience_level.as_str(),
            )?,
            lookup(&self.complexity, Feature::Complexity, features.complexity.as_str())?,
            features.duration_hours,
        ])
    }
}

fn lookup(encoder: &CategoryEncoder, feature: Feature, value: &str) -> Result<f64, EstimateError> {
    encoder
        .code(value)
        .map(f64::from)
        .ok_or_else(|| EstimateError::UnseenCategory {
            feature,
            value: value.to_string(),
        })
}
