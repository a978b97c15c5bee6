//! CSV loader for passenger tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use super::{DatasetError, PassengerRecord};

/// Load every passenger row from a CSV file with a header line.
pub fn load_passengers(path: &Path) -> Result<Vec<PassengerRecord>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_passengers(file, path)?;
    debug!("Loaded {} passengers from {}", records.len(), path.display());
    Ok(records)
}

/// Load the training table and require a `Survived` label on every row.
pub fn load_labeled_passengers(path: &Path) -> Result<Vec<PassengerRecord>, DatasetError> {
    let records = load_passengers(path)?;
    if let Some(unlabeled) = records.iter().find(|record| record.survived.is_none()) {
        return Err(DatasetError::MissingLabel {
            path: path.to_path_buf(),
            passenger_id: unlabeled.passenger_id,
        });
    }
    Ok(records)
}

/// Parse passenger rows from any reader. `origin` is only used in errors.
pub fn read_passengers<R: Read>(
    reader: R,
    origin: &Path,
) -> Result<Vec<PassengerRecord>, DatasetError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for row in reader.deserialize::<PassengerRecord>() {
        let record = row.map_err(|source| DatasetError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;
        records.push(record);
    }
    if records.is_empty() {
        return Err(DatasetError::Empty {
            path: origin.to_path_buf(),
        });
    }
    Ok(records)
}
