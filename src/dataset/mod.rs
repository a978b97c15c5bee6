//! Passenger tables: CSV loading, exploration summaries and submission output.

pub mod loader;
pub mod summary;
pub mod writer;

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

pub use loader::{load_labeled_passengers, load_passengers, read_passengers};
pub use writer::{Prediction, write_predictions, write_submission};

/// Errors raised while reading or writing passenger tables.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid passenger CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    /// The table has a header but no passenger rows.
    #[error("Passenger table {path} has no rows")]
    Empty { path: PathBuf },
    /// A training row lacks the `Survived` label.
    #[error("Passenger {passenger_id} in {path} has no Survived label")]
    MissingLabel { path: PathBuf, passenger_id: i64 },
}

/// One row of the passenger CSV.
///
/// Empty fields deserialize to `None`; `Survived` is only present in the
/// training table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PassengerRecord {
    #[serde(rename = "PassengerId")]
    pub passenger_id: i64,
    #[serde(rename = "Survived", default)]
    pub survived: Option<u8>,
    #[serde(rename = "Pclass")]
    pub pclass: u8,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Age", default)]
    pub age: Option<f32>,
    #[serde(rename = "SibSp")]
    pub sib_sp: u32,
    #[serde(rename = "Parch")]
    pub parch: u32,
    #[serde(rename = "Ticket", default)]
    pub ticket: String,
    #[serde(rename = "Fare", default)]
    pub fare: Option<f32>,
    #[serde(rename = "Cabin", default)]
    pub cabin: Option<String>,
    #[serde(rename = "Embarked", default)]
    pub embarked: Option<String>,
}

impl PassengerRecord {
    /// `true` for rows whose `Sex` column reads `female`.
    pub fn is_female(&self) -> bool {
        self.sex.trim().eq_ignore_ascii_case("female")
    }
}
