//! Deterministic random-forest classifier.
//!
//! Bagged CART trees grown on bootstrap samples with Gini impurity splits and
//! per-split feature subsampling. Probabilities are averaged across trees.
//! The model lives only for the current run and is never written to disk.

mod model;
mod train;

pub use model::{DecisionTree, Node, RandomForestModel};
pub use train::{ForestOptions, TrainDataset, train_random_forest};
