//! Passenger survival prediction: feature engineering, random-forest grid
//! search and submission output.

/// Per-user application directories.
pub mod app_dirs;
/// Run configuration.
pub mod config;
/// Passenger CSV input and submission output.
pub mod dataset;
/// Engineered feature tables.
pub mod features;
/// Tracing setup.
pub mod logging;
/// Forest training, grid search and metrics.
pub mod ml;
/// End-to-end run.
pub mod pipeline;
