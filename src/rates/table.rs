//! Base rate table keyed by (industry, experience level).
//!
//! A `RateTable` is an immutable snapshot. The incremental updater builds a new
//! table with `with_rates` and the engine swaps it in whole, so readers never
//! observe a partially updated table.

use std::collections::BTreeMap;

use crate::domain::ExperienceLevel;

/// Hour-equivalent rate used when a pair has no entry.
pub const DEFAULT_BASE_RATE: f64 = 200.0;

/// Built-in base rates: `(industry, [junior, mid, senior])`.
const STANDARD_RATES: [(&str, [f64; 3]); 8] = [
    ("graphic_design", [150.0, 250.0, 400.0]),
    ("web_development", [200.0, 350.0, 600.0]),
    ("copywriting", [100.0, 180.0, 300.0]),
    ("photography", [120.0, 200.0, 350.0]),
    ("plumbing", [180.0, 250.0, 400.0]),
    ("electrical", [200.0, 300.0, 500.0]),
    ("consulting", [300.0, 500.0, 800.0]),
    ("marketing", [120.0, 200.0, 350.0]),
];

/// Composite key for a rate bucket.
pub type BucketKey = (String, ExperienceLevel);

#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<BucketKey, f64>,
    default_rate: f64,
}

impl RateTable {
    /// Empty table; every lookup resolves to `default_rate`.
    pub fn empty(default_rate: f64) -> Self {
        Self {
            rates: BTreeMap::new(),
            default_rate,
        }
    }

    /// The built-in table with the given fallback rate.
    pub fn standard(default_rate: f64) -> Self {
        let mut rates = BTreeMap::new();
        for (industry, by_level) in STANDARD_RATES {
            for (level, rate) in ExperienceLevel::ALL.into_iter().zip(by_level) {
                rates.insert((industry.to_string(), level), rate);
            }
        }
        Self {
            rates,
            default_rate,
        }
    }

    /// Base rate for the pair, falling back to the table default.
    ///
    /// Industry matching is case-sensitive.
    pub fn base_rate(&self, industry: &str, level: ExperienceLevel) -> f64 {
        self.get(industry, level).unwrap_or(self.default_rate)
    }

    /// Explicit entry for the pair, if any.
    pub fn get(&self, industry: &str, level: ExperienceLevel) -> Option<f64> {
        // Tuple keys can't be probed with a borrowed (&str, _), so this allocates.
        self.rates.get(&(industry.to_string(), level)).copied()
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    /// A new table with `updates` applied on top of this one.
    pub fn with_rates(&self, updates: impl IntoIterator<Item = (BucketKey, f64)>) -> Self {
        let mut next = self.clone();
        next.rates.extend(updates);
        next
    }

    /// Entries in (industry, level) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ExperienceLevel, f64)> + '_ {
        self.rates
            .iter()
            .map(|((industry, level), rate)| (industry.as_str(), *level, *rate))
    }

    /// Distinct industries with at least one entry, sorted.
    pub fn industries(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.rates.keys().map(|(i, _)| i.as_str()).collect();
        out.dedup();
        out
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard(DEFAULT_BASE_RATE)
    }
}
