/// Node of a fitted decision tree, stored in a flat arena.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Terminal node holding class probabilities.
    Leaf { proba: Vec<f32> },
    /// `feature <= threshold` goes to `left`, everything else to `right`.
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
}

/// Binary decision tree; node `0` is the root.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    /// Class probabilities of the leaf reached by `features`.
    pub fn predict_proba(&self, features: &[f32]) -> &[f32] {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { proba } => return proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    idx = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Longest root-to-leaf path, counted in splits.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match &nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }
}

/// Bagged ensemble of decision trees.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForestModel {
    /// Number of classes each leaf distribution covers.
    pub n_classes: usize,
    /// Width of the feature vectors seen at training time.
    pub feature_len: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForestModel {
    /// Mean of the per-tree leaf distributions.
    pub fn predict_proba(&self, features: &[f32]) -> Vec<f32> {
        let mut sum = vec![0.0f32; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in sum.iter_mut().zip(tree.predict_proba(features)) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len().max(1) as f32;
        sum.iter_mut().for_each(|p| *p /= n_trees);
        sum
    }

    /// Most probable class; ties go to the lowest class index.
    pub fn predict_class_index(&self, features: &[f32]) -> usize {
        argmax(&self.predict_proba(features))
    }

    /// Predict every row, keeping row order.
    pub fn predict(&self, rows: &[Vec<f32>]) -> Result<Vec<usize>, String> {
        rows.iter()
            .map(|row| {
                if row.len() != self.feature_len {
                    return Err(format!(
                        "Feature length mismatch: expected {}, got {}",
                        self.feature_len,
                        row.len()
                    ));
                }
                Ok(self.predict_class_index(row))
            })
            .collect()
    }
}

fn argmax(values: &[f32]) -> usize {
    let mut best_idx = 0usize;
    let mut best_val = f32::NEG_INFINITY;
    for (idx, &v) in values.iter().enumerate() {
        if v > best_val {
            best_val = v;
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(threshold: f32, left: [f32; 2], right: [f32; 2]) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold,
                    left: 1,
                    right: 2,
                },
                Node::Leaf {
                    proba: left.to_vec(),
                },
                Node::Leaf {
                    proba: right.to_vec(),
                },
            ],
        }
    }

    #[test]
    fn tree_routes_on_threshold() {
        let tree = stump(0.5, [1.0, 0.0], [0.0, 1.0]);
        assert_eq!(tree.predict_proba(&[0.5]), &[1.0, 0.0]);
        assert_eq!(tree.predict_proba(&[0.6]), &[0.0, 1.0]);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn forest_averages_trees_and_breaks_ties_low() {
        let model = RandomForestModel {
            n_classes: 2,
            feature_len: 1,
            trees: vec![
                stump(0.5, [1.0, 0.0], [0.0, 1.0]),
                stump(1.5, [1.0, 0.0], [0.0, 1.0]),
            ],
        };
        assert_eq!(model.predict_proba(&[1.0]), vec![0.5, 0.5]);
        assert_eq!(model.predict_class_index(&[1.0]), 0);
        assert_eq!(model.predict(&[vec![0.0], vec![2.0]]).unwrap(), vec![0, 1]);
    }

    #[test]
    fn predict_rejects_rows_of_the_wrong_width() {
        let model = RandomForestModel {
            n_classes: 2,
            feature_len: 1,
            trees: vec![stump(0.5, [1.0, 0.0], [0.0, 1.0])],
        };
        let err = model.predict(&[vec![0.0], vec![1.0, 2.0]]).unwrap_err();
        assert!(err.contains("expected 1, got 2"), "{err}");
    }
}
