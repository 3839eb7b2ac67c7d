//! Rate table refresh from observed hourly rates.
//!
//! Always a full recompute over the whole training set: for every
//! (industry, level) bucket with at least `min_samples` examples of positive
//! duration, the bucket's base rate becomes the mean of
//! `final_price / duration_hours`, rounded to 2 decimals. Buckets below the
//! threshold keep whatever rate they had.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{ExperienceLevel, TrainingExample};
use crate::math::round2;
use crate::rates::{BucketKey, RateTable};

/// A bucket whose base rate was overwritten by a refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketUpdate {
    pub industry: String,
    pub level: ExperienceLevel,
    /// Qualifying examples that went into the average.
    pub samples: usize,
    pub rate: f64,
    /// Explicit entry before the refresh; `None` if the bucket used the default.
    pub previous: Option<f64>,
}

impl BucketUpdate {
    pub fn changed(&self) -> bool {
        self.previous != Some(self.rate)
    }
}

/// Average hourly rate per bucket, for buckets with enough samples.
pub fn observed_rates(examples: &[TrainingExample], min_samples: usize) -> Vec<(BucketKey, usize, f64)> {
    let mut buckets: BTreeMap<BucketKey, (usize, f64)> = BTreeMap::new();
    for example in examples {
        let Some(rate) = example.hourly_rate() else {
            continue;
        };
        let entry = buckets
            .entry((example.industry.clone(), example.experience_level))
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += rate;
    }

    buckets
        .into_iter()
        .filter(|(_, (n, _))| *n >= min_samples.max(1))
        .map(|(key, (n, sum))| (key, n, round2(sum / n as f64)))
        .collect()
}

/// Apply observed rates on top of `current`.
pub fn refresh_rates(
    current: &RateTable,
    examples: &[TrainingExample],
    min_samples: usize,
) -> (RateTable, Vec<BucketUpdate>) {
    let observed = observed_rates(examples, min_samples);
    let updates: Vec<BucketUpdate> = observed
        .iter()
        .map(|((industry, level), samples, rate)| BucketUpdate {
            industry: industry.clone(),
            level: *level,
            samples: *samples,
            rate: *rate,
            previous: current.get(industry, *level),
        })
        .collect();
    let table = current.with_rates(observed.into_iter().map(|(key, _, rate)| (key, rate)));
    (table, updates)
}
