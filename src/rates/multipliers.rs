//! Location and complexity multipliers.
//!
//! Both tables are static after construction. Unknown keys resolve to `1.0`.

use std::collections::HashMap;

use crate::domain::Complexity;

const STANDARD_LOCATIONS: [(&str, f64); 9] = [
    ("gauteng", 1.2),
    ("western_cape", 1.1),
    ("kwazulu_natal", 1.0),
    ("eastern_cape", 0.9),
    ("free_state", 0.85),
    ("mpumalanga", 0.8),
    ("limpopo", 0.8),
    ("north_west", 0.85),
    ("northern_cape", 0.8),
];

const STANDARD_COMPLEXITY: [(Complexity, f64); 4] = [
    (Complexity::Simple, 0.8),
    (Complexity::Standard, 1.0),
    (Complexity::Complex, 1.5),
    (Complexity::Expert, 2.0),
];

/// Normalize a location key for lookup and encoding.
pub fn normalize_location(location: &str) -> String {
    location.to_lowercase()
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationMultipliers {
    by_key: HashMap<String, f64>,
}

impl LocationMultipliers {
    /// Build from arbitrary `(key, multiplier)` pairs; keys are lower-cased.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            by_key: pairs
                .into_iter()
                .map(|(k, v)| (normalize_location(k), v))
                .collect(),
        }
    }

    /// Multiplier for `location` (case-insensitive), `1.0` when unknown.
    pub fn get(&self, location: &str) -> f64 {
        self.by_key
            .get(&normalize_location(location))
            .copied()
            .unwrap_or(1.0)
    }
}

impl Default for LocationMultipliers {
    fn default() -> Self {
        Self::from_pairs(STANDARD_LOCATIONS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityMultipliers {
    by_tier: HashMap<Complexity, f64>,
}

impl ComplexityMultipliers {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Complexity, f64)>) -> Self {
        Self {
            by_tier: pairs.into_iter().collect(),
        }
    }

    /// Multiplier for the tier, `1.0` when the table has no entry.
    pub fn get(&self, complexity: Complexity) -> f64 {
        self.by_tier.get(&complexity).copied().unwrap_or(1.0)
    }
}

impl Default for ComplexityMultipliers {
    fn default() -> Self {
        Self::from_pairs(STANDARD_COMPLEXITY)
    }
}
