//! Load → transform → reconcile → select → refit → predict → write.

use thiserror::Error;
use tracing::info;

use crate::config::PipelineConfig;
use crate::dataset::summary::{preview, survival_by_sex};
use crate::dataset::{
    DatasetError, PassengerRecord, Prediction, load_labeled_passengers, load_passengers,
    write_submission,
};
use crate::features::{FrameError, engineer, model_feature_names, reconcile};
use crate::ml::forest::{TrainDataset, train_random_forest};
use crate::ml::grid::{GridSearchOptions, GridSearchOutcome, grid_search};
use crate::ml::metrics::precision_recall_by_class;

/// Survival is a yes/no label.
pub const N_CLASSES: usize = 2;
const CLASS_NAMES: [&str; N_CLASSES] = ["died", "survived"];

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("Training failed: {0}")]
    Training(String),
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Columns fed to the classifier, in matrix order.
    pub features: Vec<String>,
    pub search: GridSearchOutcome,
    /// One prediction per test row, in input order.
    pub predictions: Vec<Prediction>,
}

/// Run the whole pipeline from the configured files and write the submission.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let train = load_labeled_passengers(&config.train)?;
    let test = load_passengers(&config.test)?;
    info!(
        "Loaded {} training and {} test passengers",
        train.len(),
        test.len()
    );
    log_exploration(&train, &test);

    let report = predict_survival(&train, &test, &config.search.grid_options())?;
    write_submission(&config.output, &report.predictions)?;
    info!(
        "Wrote {} predictions to {}",
        report.predictions.len(),
        config.output.display()
    );
    Ok(report)
}

/// In-memory core of [`run`]: engineer both tables, pick hyperparameters on a
/// validation split, refit on all training rows and label every test row.
pub fn predict_survival(
    train: &[PassengerRecord],
    test: &[PassengerRecord],
    grid: &GridSearchOptions,
) -> Result<PipelineReport, PipelineError> {
    let train_frame = engineer(train);
    let test_frame = reconcile(&train_frame, &engineer(test));
    let features = model_feature_names(&train_frame);
    info!("Model features: {}", features.join(", "));

    let dataset = TrainDataset {
        n_classes: N_CLASSES,
        x: train_frame.select(&features)?,
        y: train_frame.labels()?,
    };
    let search = grid_search(&dataset, grid).map_err(PipelineError::Training)?;
    info!(
        "Best: n_estimators={}, max_depth={}, accuracy={:.4}",
        search.best.n_estimators, search.best.max_depth, search.best_accuracy
    );
    for (class, stats) in CLASS_NAMES
        .iter()
        .zip(precision_recall_by_class(&search.best_confusion))
    {
        info!(
            "  {class:<8} precision={:.3} recall={:.3} support={}",
            stats.precision, stats.recall, stats.support
        );
    }

    let model = train_random_forest(&dataset, &search.best.forest_options(grid.forest_seed))
        .map_err(PipelineError::Training)?;
    let labels = model
        .predict(&test_frame.select(&features)?)
        .map_err(PipelineError::Training)?;
    let predictions = test
        .iter()
        .zip(labels)
        .map(|(record, label)| Prediction {
            passenger_id: record.passenger_id,
            survived: u8::from(label == 1),
        })
        .collect();

    Ok(PipelineReport {
        features,
        search,
        predictions,
    })
}

fn log_exploration(train: &[PassengerRecord], test: &[PassengerRecord]) {
    info!("Training data:");
    preview(train).iter().for_each(|line| info!("  {line}"));
    info!("Test data:");
    preview(test).iter().for_each(|line| info!("  {line}"));

    let rates = survival_by_sex(train);
    if let Some(rate) = rates.female {
        info!("Women who survived: {:.2}", rate);
    }
    if let Some(rate) = rates.male {
        info!("Men who survived: {:.2}", rate);
    }
}
