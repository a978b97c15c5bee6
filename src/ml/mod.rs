//! Model training, selection and evaluation.
//!
//! Everything here is in-crate: the forest, the seeded validation split, the
//! hyperparameter grid and the metrics used to rank configurations.

pub mod forest;
pub mod grid;
pub mod metrics;
pub mod split;
