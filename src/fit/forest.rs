//! Bagged regression trees ("random forest").
//!
//! Each tree is grown on a bootstrap resample of the training rows with
//! variance-reduction (SSE) splits. Trees are grown in parallel, each from its
//! own `StdRng` derived from `(seed, tree index)`, so the forest is identical
//! for identical inputs regardless of thread scheduling.
//!
//! The prediction is the mean of the tree outputs.

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::ForestParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        /// Rows with `x[feature] <= threshold` go left.
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = row.get(*feature).copied().unwrap_or(f64::NAN);
                    node = if x <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    trees: Vec<Node>,
}

impl Forest {
    /// Grow a forest over `rows`/`y`.
    ///
    /// Returns `None` for empty, ragged, or non-finite input, or `n_trees == 0`.
    pub fn fit(rows: &[Vec<f64>], y: &[f64], params: &ForestParams) -> Option<Self> {
        if rows.is_empty() || rows.len() != y.len() || params.n_trees == 0 {
            return None;
        }
        let width = rows[0].len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        if rows.iter().flatten().chain(y).any(|v| !v.is_finite()) {
            return None;
        }

        let builder = TreeBuilder {
            rows,
            y,
            params,
            width,
        };

        // Trees are independent; collect() keeps them in index order.
        let trees = (0..params.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(tree_seed(params.seed, i));
                let n = rows.len();
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                builder.grow(bootstrap, 0, &mut rng)
            })
            .collect();

        Some(Self { trees })
    }

    /// Mean of the tree predictions (`NaN` for an empty forest).
    pub fn predict(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return f64::NAN;
        }
        let total: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
        total / self.trees.len() as f64
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(Node::depth).max().unwrap_or(0)
    }
}

/// SplitMix64 step so neighbouring tree indices get unrelated streams.
fn tree_seed(seed: u64, index: usize) -> u64 {
    let mut z = seed.wrapping_add((index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    /// Sum of child SSEs (lower is better).
    score: f64,
}

struct TreeBuilder<'a> {
    rows: &'a [Vec<f64>],
    y: &'a [f64],
    params: &'a ForestParams,
    width: usize,
}

impl TreeBuilder<'_> {
    fn grow(&self, idx: Vec<usize>, depth: usize, rng: &mut StdRng) -> Node {
        let mean = idx.iter().map(|&i| self.y[i]).sum::<f64>() / idx.len() as f64;
        let min_leaf = self.params.min_samples_leaf.max(1);

        let first = self.y[idx[0]];
        let pure = idx.iter().all(|&i| self.y[i] == first);
        if pure || depth >= self.params.max_depth || idx.len() < 2 * min_leaf {
            return Node::Leaf { value: mean };
        }

        let Some(split) = self.best_split(&idx, min_leaf, rng) else {
            return Node::Leaf { value: mean };
        };

        let (left, right): (Vec<usize>, Vec<usize>) = idx
            .into_iter()
            .partition(|&i| self.rows[i][split.feature] <= split.threshold);

        Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(self.grow(left, depth + 1, rng)),
            right: Box::new(self.grow(right, depth + 1, rng)),
        }
    }

    fn best_split(&self, idx: &[usize], min_leaf: usize, rng: &mut StdRng) -> Option<Split> {
        let features: Vec<usize> = match self.params.max_features {
            Some(k) if k > 0 && k < self.width => {
                let mut picked = sample(rng, self.width, k).into_vec();
                picked.sort_unstable();
                picked
            }
            _ => (0..self.width).collect(),
        };

        let n = idx.len();
        let total_sum: f64 = idx.iter().map(|&i| self.y[i]).sum();
        let total_sq: f64 = idx.iter().map(|&i| self.y[i] * self.y[i]).sum();

        let mut sorted = idx.to_vec();
        let mut best: Option<Split> = None;

        for feature in features {
            sorted.sort_by(|&a, &b| self.rows[a][feature].total_cmp(&self.rows[b][feature]));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for k in 0..n - 1 {
                let yi = self.y[sorted[k]];
                left_sum += yi;
                left_sq += yi * yi;

                let left_n = k + 1;
                let right_n = n - left_n;
                if left_n < min_leaf || right_n < min_leaf {
                    continue;
                }

                let x_here = self.rows[sorted[k]][feature];
                let x_next = self.rows[sorted[k + 1]][feature];
                if x_here == x_next {
                    continue;
                }

                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let score = (left_sq - left_sum * left_sum / left_n as f64)
                    + (right_sq - right_sum * right_sum / right_n as f64);

                // Strict `<` keeps the first (lowest feature, lowest threshold) on ties.
                let better = match best {
                    Some(b) => score < b.score,
                    None => true,
                };
                if better {
                    best = Some(Split {
                        feature,
                        threshold: 0.5 * (x_here + x_next),
                        score,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(n_trees: usize) -> ForestParams {
        ForestParams {
            n_trees,
            ..ForestParams::default()
        }
    }

    fn step_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let rows: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, 0.0]).collect();
        let y = (0..20).map(|i| if i < 10 { 100.0 } else { 500.0 }).collect();
        (rows, y)
    }

    #[test]
    fn forest_recovers_a_step_function() {
        let (rows, y) = step_data();
        let forest = Forest::fit(&rows, &y, &params(25)).unwrap();
        assert_eq!(forest.n_trees(), 25);
        assert!((forest.predict(&[3.0, 0.0]) - 100.0).abs() < 1e-9);
        assert!((forest.predict(&[16.0, 0.0]) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn forest_is_deterministic_for_a_fixed_seed() {
        let rows: Vec<Vec<f64>> = (0..30).map(|i| vec![(i % 7) as f64, i as f64 * 0.5]).collect();
        let y: Vec<f64> = (0..30).map(|i| 50.0 + (i * i % 13) as f64 * 10.0).collect();

        let a = Forest::fit(&rows, &y, &params(16)).unwrap();
        let b = Forest::fit(&rows, &y, &params(16)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn constant_targets_grow_single_leaf_trees() {
        let rows: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64]).collect();
        let y = vec![1000.0; 6];
        let forest = Forest::fit(&rows, &y, &params(8)).unwrap();
        assert_eq!(forest.max_depth(), 0);
        assert_eq!(forest.predict(&[42.0]), 1000.0);
    }

    #[test]
    fn max_depth_is_respected() {
        let (rows, y) = step_data();
        let shallow = ForestParams {
            n_trees: 4,
            max_depth: 1,
            ..ForestParams::default()
        };
        let forest = Forest::fit(&rows, &y, &shallow).unwrap();
        assert!(forest.max_depth() <= 1);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(Forest::fit(&[], &[], &params(4)).is_none());
        assert!(Forest::fit(&[vec![1.0]], &[1.0], &params(0)).is_none());
        assert!(Forest::fit(&[vec![1.0]], &[f64::INFINITY], &params(4)).is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let (rows, y) = step_data();
        let forest = Forest::fit(&rows, &y, &params(3)).unwrap();
        let json = serde_json::to_string(&forest).unwrap();
        let back: Forest = serde_json::from_str(&json).unwrap();
        assert_eq!(forest.predict(&[12.0, 0.0]), back.predict(&[12.0, 0.0]));
    }
}
