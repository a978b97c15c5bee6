//! Submission output: one `PassengerId,Survived` row per test passenger.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::DatasetError;

/// Predicted label for one passenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prediction {
    #[serde(rename = "PassengerId")]
    pub passenger_id: i64,
    #[serde(rename = "Survived")]
    pub survived: u8,
}

/// Write predictions to `path`, creating parent directories first.
pub fn write_submission(path: &Path, predictions: &[Prediction]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DatasetError::Create {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| DatasetError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_predictions(file, path, predictions)
}

/// Serialize predictions as CSV into any writer. `origin` is only used in errors.
pub fn write_predictions<W: Write>(
    writer: W,
    origin: &Path,
    predictions: &[Prediction],
) -> Result<(), DatasetError> {
    let csv_error = |source| DatasetError::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_writer(writer);
    for prediction in predictions {
        writer.serialize(prediction).map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|source| csv_error(csv::Error::from(source)))
}
