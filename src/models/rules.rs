//! Rule-based estimator.
//!
//! ```text
//! adjusted = base(industry, level) × location(lowercase) × complexity × hours
//! range    = adjusted × (1 ∓ spread)
//! ```
//!
//! `spread` is wider while the training set is empty. Durations are not
//! validated here: zero hours gives a zero-width range at 0 and negative hours
//! give non-positive bounds.

use crate::domain::{EngineConfig, JobFeatures, PriceRange};
use crate::rates::{ComplexityMultipliers, LocationMultipliers, RateTable};

pub struct RuleEstimator<'a> {
    pub rates: &'a RateTable,
    pub locations: &'a LocationMultipliers,
    pub complexity: &'a ComplexityMultipliers,
    pub config: &'a EngineConfig,
}

impl RuleEstimator<'_> {
    /// Point price before the spread is applied.
    pub fn adjusted_price(&self, features: &JobFeatures) -> f64 {
        let base = self
            .rates
            .base_rate(&features.industry, features.experience_level);
        base * self.locations.get(&features.location)
            * self.complexity.get(features.complexity)
            * features.duration_hours
    }

    /// Fractional spread for a training set of `training_len` examples.
    pub fn spread(&self, training_len: usize) -> f64 {
        if training_len == 0 {
            self.config.cold_spread
        } else {
            self.config.warm_spread
        }
    }

    pub fn estimate(&self, features: &JobFeatures, training_len: usize) -> PriceRange {
        PriceRange::spread_around(self.adjusted_price(features), self.spread(training_len))
    }
}
