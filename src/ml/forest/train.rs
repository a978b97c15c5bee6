use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::model::{DecisionTree, Node, RandomForestModel};

/// Forest hyperparameters.
#[derive(Debug, Clone)]
pub struct ForestOptions {
    /// Number of trees in the ensemble.
    pub n_estimators: usize,
    /// Maximum number of splits on any root-to-leaf path.
    pub max_depth: usize,
    /// Smallest node that may still be split.
    pub min_samples_split: usize,
    /// Seed for bootstrap draws and per-split feature sampling.
    pub seed: u64,
}

impl Default for ForestOptions {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 8,
            min_samples_split: 2,
            seed: 1,
        }
    }
}

/// In-memory dataset used for training and evaluation.
#[derive(Debug, Clone)]
pub struct TrainDataset {
    /// Number of classes; labels are `0..n_classes`.
    pub n_classes: usize,
    /// Feature matrix, row-major.
    pub x: Vec<Vec<f32>>,
    /// Class indices aligned with `x`.
    pub y: Vec<usize>,
}

impl TrainDataset {
    /// Subset of rows, in the given order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            n_classes: self.n_classes,
            x: indices.iter().map(|&i| self.x[i].clone()).collect(),
            y: indices.iter().map(|&i| self.y[i]).collect(),
        }
    }
}

/// Fit a random forest of Gini-split trees on bootstrap samples.
///
/// Each split considers `max(1, floor(sqrt(d)))` randomly chosen features that
/// are not constant within the node.
pub fn train_random_forest(
    dataset: &TrainDataset,
    options: &ForestOptions,
) -> Result<RandomForestModel, String> {
    if dataset.x.len() != dataset.y.len() {
        return Err("Mismatched X/Y lengths".to_string());
    }
    if dataset.x.is_empty() {
        return Err("Empty dataset".to_string());
    }
    if dataset.n_classes < 2 {
        return Err("Need at least 2 classes".to_string());
    }
    if let Some(&label) = dataset.y.iter().find(|&&label| label >= dataset.n_classes) {
        return Err(format!(
            "Label {label} is outside 0..{}",
            dataset.n_classes
        ));
    }
    if options.n_estimators == 0 {
        return Err("n_estimators must be at least 1".to_string());
    }
    let feature_len = dataset.x[0].len();
    if dataset.x.iter().any(|row| row.len() != feature_len) {
        return Err("Inconsistent feature row length".to_string());
    }

    let max_features = ((feature_len as f64).sqrt().floor() as usize).clamp(1, feature_len.max(1));
    let mut seeds = StdRng::seed_from_u64(options.seed);
    let n = dataset.x.len();
    let trees = (0..options.n_estimators)
        .map(|_| {
            let mut rng = StdRng::seed_from_u64(seeds.random::<u64>());
            let sample: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
            let mut builder = TreeBuilder {
                x: &dataset.x,
                y: &dataset.y,
                n_classes: dataset.n_classes,
                feature_len,
                max_features,
                max_depth: options.max_depth,
                min_samples_split: options.min_samples_split.max(2),
                rng,
                nodes: Vec::new(),
            };
            builder.grow(sample, 0);
            DecisionTree {
                nodes: builder.nodes,
            }
        })
        .collect();

    Ok(RandomForestModel {
        n_classes: dataset.n_classes,
        feature_len,
        trees,
    })
}

struct TreeBuilder<'a> {
    x: &'a [Vec<f32>],
    y: &'a [usize],
    n_classes: usize,
    feature_len: usize,
    max_features: usize,
    max_depth: usize,
    min_samples_split: usize,
    rng: StdRng,
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy)]
struct BestSplit {
    feature: usize,
    threshold: f32,
    impurity: f64,
}

impl TreeBuilder<'_> {
    /// Grow the subtree for `rows` and return its node index.
    fn grow(&mut self, rows: Vec<usize>, depth: usize) -> usize {
        let counts = self.class_counts(&rows);
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let split = if pure || depth >= self.max_depth || rows.len() < self.min_samples_split {
            None
        } else {
            self.best_split(&rows, &counts)
        };

        let Some(split) = split else {
            return self.push(Node::Leaf {
                proba: leaf_distribution(&counts),
            });
        };

        let idx = self.push(Node::Leaf { proba: Vec::new() });
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&row| self.x[row][split.feature] <= split.threshold);
        let left = self.grow(left_rows, depth + 1);
        let right = self.grow(right_rows, depth + 1);
        self.nodes[idx] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        idx
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn class_counts(&self, rows: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &row in rows {
            counts[self.y[row]] += 1;
        }
        counts
    }

    fn best_split(&mut self, rows: &[usize], counts: &[usize]) -> Option<BestSplit> {
        let mut features: Vec<usize> = (0..self.feature_len).collect();
        features.shuffle(&mut self.rng);

        // Constant features do not count toward `max_features`.
        let mut evaluated = 0usize;
        let mut best: Option<BestSplit> = None;
        for feature in features {
            if evaluated == self.max_features {
                break;
            }
            let Some(candidate) = self.best_split_for_feature(rows, counts, feature) else {
                continue;
            };
            evaluated += 1;
            if best.is_none_or(|b| candidate.impurity < b.impurity) {
                best = Some(candidate);
            }
        }
        best
    }

    /// Lowest weighted Gini impurity over thresholds between distinct values.
    fn best_split_for_feature(
        &self,
        rows: &[usize],
        counts: &[usize],
        feature: usize,
    ) -> Option<BestSplit> {
        let mut ordered: Vec<(f32, usize)> = rows
            .iter()
            .map(|&row| (self.x[row][feature], self.y[row]))
            .collect();
        ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n = ordered.len();
        let mut left = vec![0usize; self.n_classes];
        let mut right = counts.to_vec();
        let mut best: Option<BestSplit> = None;
        for i in 0..n.saturating_sub(1) {
            let (value, label) = ordered[i];
            left[label] += 1;
            right[label] -= 1;
            let next = ordered[i + 1].0;
            if value >= next {
                continue;
            }
            let n_left = i + 1;
            let n_right = n - n_left;
            let impurity = (n_left as f64 * gini(&left, n_left)
                + n_right as f64 * gini(&right, n_right))
                / n as f64;
            if best.is_none_or(|b| impurity < b.impurity) {
                best = Some(BestSplit {
                    feature,
                    threshold: midpoint(value, next),
                    impurity,
                });
            }
        }
        best
    }
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Threshold strictly below `upper`, falling back to `lower` when the float
/// midpoint rounds up to it.
fn midpoint(lower: f32, upper: f32) -> f32 {
    let mid = lower + (upper - lower) / 2.0;
    if mid >= upper || !mid.is_finite() { lower } else { mid }
}

fn leaf_distribution(counts: &[usize]) -> Vec<f32> {
    let total = counts.iter().sum::<usize>().max(1) as f32;
    counts.iter().map(|&c| c as f32 / total).collect()
}
