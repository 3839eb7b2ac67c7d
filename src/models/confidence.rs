//! Confidence model.
//!
//! Confidence depends only on which path produced the numbers and, on the
//! plain rule path, on how many training examples exist. It never looks at
//! regression residuals.

use crate::domain::{ConfidenceParams, PredictionSource};
use crate::math::round2;

pub fn confidence(params: &ConfidenceParams, source: PredictionSource, training_len: usize) -> f64 {
    let raw = match source {
        PredictionSource::Learned => params.learned,
        PredictionSource::RulesFallback => params.fallback,
        PredictionSource::Rules => {
            (params.base + params.per_example * training_len as f64).min(params.cap)
        }
    };
    round2(raw.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_confidence_scales_with_data_volume() {
        let p = ConfidenceParams::default();
        assert_eq!(confidence(&p, PredictionSource::Rules, 0), 0.7);
        assert_eq!(confidence(&p, PredictionSource::Rules, 5), 0.75);
        assert_eq!(confidence(&p, PredictionSource::Rules, 20), 0.9);
        assert_eq!(confidence(&p, PredictionSource::Rules, 10_000), 0.9);
    }

    #[test]
    fn rule_confidence_is_non_decreasing() {
        let p = ConfidenceParams::default();
        let mut last = 0.0;
        for n in 0..100 {
            let c = confidence(&p, PredictionSource::Rules, n);
            assert!(c >= last, "confidence dropped at n={n}");
            assert!(c <= 0.9);
            last = c;
        }
    }

    #[test]
    fn learned_and_fallback_paths_ignore_volume() {
        let p = ConfidenceParams::default();
        for n in [0, 3, 500] {
            assert_eq!(confidence(&p, PredictionSource::Learned, n), 0.85);
            assert_eq!(confidence(&p, PredictionSource::RulesFallback, n), 0.7);
        }
    }
}
