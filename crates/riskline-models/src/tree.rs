//! Variance-reduction regression trees.
//!
//! One tree implementation backs both ensembles: the forest grows trees on
//! raw 0/1 labels (leaf means are class fractions), boosting grows them on
//! log-loss gradients. Splits minimize the summed squared error of the two
//! sides, which on binary targets is equivalent to gini-gain splitting.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Minimum SSE improvement for a split to be kept.
const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

#[derive(Debug, Clone)]
pub struct TreeParams {
    pub max_depth: u32,
    pub min_samples_split: usize,
    /// Features considered per split; `None` means all of them.
    pub mtry: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    root: TreeNode,
}

impl RegressionTree {
    /// Grow a tree on the rows selected by `sample` (indices into `x`,
    /// repeats allowed for bootstrap samples).
    ///
    /// The caller guarantees `x` is rectangular and `targets` is aligned;
    /// `rng` is only consulted when `params.mtry` asks for feature
    /// subsampling.
    pub fn fit(
        x: &[Vec<f64>],
        targets: &[f64],
        sample: &[usize],
        params: &TreeParams,
        mut rng: Option<&mut StdRng>,
    ) -> Self {
        let root = build(x, targets, sample, 0, params, &mut rng);
        Self { root }
    }

    #[must_use]
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split { feature, threshold, left, right } => {
                    node = if features[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

fn mean(targets: &[f64], sample: &[usize]) -> f64 {
    sample.iter().map(|i| targets[*i]).sum::<f64>() / sample.len() as f64
}

fn build(
    x: &[Vec<f64>],
    targets: &[f64],
    sample: &[usize],
    depth: u32,
    params: &TreeParams,
    rng: &mut Option<&mut StdRng>,
) -> TreeNode {
    let leaf_value = mean(targets, sample);
    if depth >= params.max_depth || sample.len() < params.min_samples_split {
        return TreeNode::Leaf { value: leaf_value };
    }

    let n_features = x[0].len();
    let candidates: Vec<usize> = match (params.mtry, rng.as_deref_mut()) {
        (Some(m), Some(rng)) if m < n_features => {
            let mut all: Vec<usize> = (0..n_features).collect();
            all.shuffle(rng);
            all.truncate(m);
            all
        }
        _ => (0..n_features).collect(),
    };

    let Some((feature, threshold)) = best_split(x, targets, sample, &candidates) else {
        return TreeNode::Leaf { value: leaf_value };
    };

    let (left, right): (Vec<usize>, Vec<usize>) =
        sample.iter().copied().partition(|&i| x[i][feature] <= threshold);
    if left.is_empty() || right.is_empty() {
        return TreeNode::Leaf { value: leaf_value };
    }

    TreeNode::Split {
        feature,
        threshold,
        left: Box::new(build(x, targets, &left, depth + 1, params, rng)),
        right: Box::new(build(x, targets, &right, depth + 1, params, rng)),
    }
}

/// Exhaustive best split over the candidate features.
///
/// For each feature the sample is sorted once and every boundary between
/// distinct values is scored by the summed squared error of both sides,
/// computed from running sums.
fn best_split(
    x: &[Vec<f64>],
    targets: &[f64],
    sample: &[usize],
    candidates: &[usize],
) -> Option<(usize, f64)> {
    let n = sample.len() as f64;
    let total: f64 = sample.iter().map(|i| targets[*i]).sum();
    let total_sq: f64 = sample.iter().map(|i| targets[*i] * targets[*i]).sum();
    let parent_sse = total_sq - total * total / n;

    let mut best: Option<(usize, f64, f64)> = None;

    for &feature in candidates {
        let mut order: Vec<usize> = sample.to_vec();
        order.sort_by(|a, b| {
            x[*a][feature].partial_cmp(&x[*b][feature]).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for (k, &idx) in order.iter().enumerate().take(order.len() - 1) {
            let t = targets[idx];
            left_sum += t;
            left_sq += t * t;

            let here = x[idx][feature];
            let next = x[order[k + 1]][feature];
            if here == next {
                continue;
            }

            let left_n = (k + 1) as f64;
            let right_n = n - left_n;
            let right_sum = total - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);
            let gain = parent_sse - sse;

            if gain > MIN_GAIN && best.map_or(true, |(_, _, g)| gain > g) {
                best = Some((feature, (here + next) / 2.0, gain));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}
