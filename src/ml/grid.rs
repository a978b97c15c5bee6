//! Exhaustive hyperparameter search on a single validation split.

use tracing::info;

use super::forest::{ForestOptions, TrainDataset, train_random_forest};
use super::metrics::{ConfusionMatrix, accuracy};
use super::split::train_test_split;

/// One forest configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hyperparams {
    pub n_estimators: usize,
    pub max_depth: usize,
}

impl Hyperparams {
    /// Forest settings for this configuration, trained with `seed`.
    pub fn forest_options(&self, seed: u64) -> ForestOptions {
        ForestOptions {
            n_estimators: self.n_estimators,
            max_depth: self.max_depth,
            seed,
            ..ForestOptions::default()
        }
    }
}

/// Search space and the seeds that make the search reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSearchOptions {
    pub n_estimators: Vec<usize>,
    pub max_depth: Vec<usize>,
    /// Share of rows held out for validation.
    pub validation_fraction: f64,
    /// Seed of the train/validation shuffle.
    pub split_seed: u64,
    /// Seed handed to every forest, candidates and final refit alike.
    pub forest_seed: u64,
}

impl Default for GridSearchOptions {
    fn default() -> Self {
        Self {
            n_estimators: vec![100, 160, 200, 250],
            max_depth: vec![6, 8, 10, 12],
            validation_fraction: 0.2,
            split_seed: 42,
            forest_seed: 1,
        }
    }
}

impl GridSearchOptions {
    /// Cartesian product, `n_estimators` in the outer loop.
    pub fn candidates(&self) -> Vec<Hyperparams> {
        self.n_estimators
            .iter()
            .flat_map(|&n_estimators| {
                self.max_depth.iter().map(move |&max_depth| Hyperparams {
                    n_estimators,
                    max_depth,
                })
            })
            .collect()
    }
}

/// Validation accuracy of one evaluated configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridEntry {
    pub params: Hyperparams,
    pub accuracy: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridSearchOutcome {
    pub best: Hyperparams,
    pub best_accuracy: f32,
    /// Validation confusion matrix of the winning configuration.
    pub best_confusion: ConfusionMatrix,
    /// Every configuration, in evaluation order.
    pub entries: Vec<GridEntry>,
}

/// Evaluate every candidate and keep the strictly best validation accuracy.
///
/// Ties keep the configuration seen first. The first candidate is kept even
/// when it scores zero.
pub fn grid_search(
    dataset: &TrainDataset,
    options: &GridSearchOptions,
) -> Result<GridSearchOutcome, String> {
    let candidates = options.candidates();
    if candidates.is_empty() {
        return Err("Hyperparameter grid is empty".to_string());
    }
    let split = train_test_split(
        dataset.x.len(),
        options.validation_fraction,
        options.split_seed,
    )?;
    let train = dataset.subset(&split.train);
    let validation = dataset.subset(&split.validation);

    let mut entries = Vec::with_capacity(candidates.len());
    let mut best: Option<(Hyperparams, f32, ConfusionMatrix)> = None;
    for params in candidates {
        let model = train_random_forest(&train, &params.forest_options(options.forest_seed))?;
        let predicted = model.predict(&validation.x)?;
        let cm = ConfusionMatrix::from_predictions(dataset.n_classes, &validation.y, &predicted);
        let score = accuracy(&cm);
        info!(
            "n_estimators={}, max_depth={}, accuracy={score:.4}",
            params.n_estimators, params.max_depth
        );
        entries.push(GridEntry {
            params,
            accuracy: score,
        });
        if best.as_ref().is_none_or(|(_, best_score, _)| score > *best_score) {
            best = Some((params, score, cm));
        }
    }

    let (best, best_accuracy, best_confusion) =
        best.ok_or_else(|| "No configuration was evaluated".to_string())?;
    Ok(GridSearchOutcome {
        best,
        best_accuracy,
        best_confusion,
        entries,
    })
}
