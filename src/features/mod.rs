//! Engineered feature tables.
//!
//! [`engineer`] turns raw passenger rows into a [`FeatureFrame`] of named
//! numeric columns, [`reconcile`] aligns the test frame with the training
//! frame, and [`model_feature_names`] lists the columns the classifier reads.

pub mod engineer;
pub mod reconcile;
pub mod stats;
pub mod title;

use thiserror::Error;

pub use engineer::engineer;
pub use reconcile::reconcile;

/// Passenger identifier column, carried for row alignment but never modeled.
/// Output identifiers are read from the records, not from this lossy `f32` copy.
pub const ID_COLUMN: &str = "PassengerId";
/// Binary survival label, present only on labeled frames.
pub const LABEL_COLUMN: &str = "Survived";
/// Prefix of the one-hot embarkation indicator columns.
pub const EMBARKED_PREFIX: &str = "Emb_";

/// Columns always fed to the classifier, ahead of the `Emb_*` indicators.
pub const BASE_FEATURES: [&str; 14] = [
    "Pclass",
    "Sex",
    "Age",
    "Fare",
    "FamilySize",
    "IsAlone",
    "IsChild",
    "IsMother",
    "Title",
    "Deck",
    "FarePerPerson",
    "ClassFareInteraction",
    "AgeBin",
    "FareBin",
];

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("Column {0} is not present in the feature table")]
    MissingColumn(String),
    #[error("Column {column} holds {value} at row {row}, expected a 0/1 label")]
    InvalidLabel { column: String, row: usize, value: f32 },
    #[error("Row has {actual} values but the table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },
}

/// Row-major table of named `f32` columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureFrame {
    columns: Vec<String>,
    rows: Vec<Vec<f32>>,
}

impl FeatureFrame {
    /// Empty frame with the given column order.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Assemble a frame from equally long named columns.
    pub fn from_columns(columns: Vec<(String, Vec<f32>)>) -> Result<Self, FrameError> {
        let n_rows = columns.first().map_or(0, |(_, values)| values.len());
        let mut rows = vec![Vec::with_capacity(columns.len()); n_rows];
        let mut names = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            if values.len() != n_rows {
                return Err(FrameError::RowWidth {
                    expected: n_rows,
                    actual: values.len(),
                });
            }
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
            names.push(name);
        }
        Ok(Self {
            columns: names,
            rows,
        })
    }

    /// Append one row; its width must match the column count.
    pub fn push_row(&mut self, row: Vec<f32>) -> Result<(), FrameError> {
        if row.len() != self.columns.len() {
            return Err(FrameError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in storage order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, each in column order.
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` among the columns.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Copy one column out of the frame.
    pub fn column(&self, name: &str) -> Result<Vec<f32>, FrameError> {
        let idx = self.require(name)?;
        Ok(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Project the named columns, in the given order, into a feature matrix.
    pub fn select(&self, names: &[String]) -> Result<Vec<Vec<f32>>, FrameError> {
        let indices = names
            .iter()
            .map(|name| self.require(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&idx| row[idx]).collect())
            .collect())
    }

    /// Read the `Survived` column as class indices.
    pub fn labels(&self) -> Result<Vec<usize>, FrameError> {
        self.column(LABEL_COLUMN)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                v if v == 0.0 => Ok(0),
                v if v == 1.0 => Ok(1),
                value => Err(FrameError::InvalidLabel {
                    column: LABEL_COLUMN.to_string(),
                    row,
                    value,
                }),
            })
            .collect()
    }

    fn require(&self, name: &str) -> Result<usize, FrameError> {
        self.column_index(name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))
    }
}

/// Columns read by the classifier: [`BASE_FEATURES`] plus every `Emb_*`
/// column of the training frame, in frame order.
pub fn model_feature_names(train: &FeatureFrame) -> Vec<String> {
    BASE_FEATURES
        .iter()
        .map(|name| name.to_string())
        .chain(
            train
                .columns()
                .iter()
                .filter(|column| column.starts_with(EMBARKED_PREFIX))
                .cloned(),
        )
        .collect()
}
