//! Column alignment between the training and test frames.

use super::{FeatureFrame, LABEL_COLUMN};

/// Reindex `test` to the training frame's columns, label excluded.
///
/// Columns the test frame lacks are filled with `0`; test-only columns are
/// dropped. Rows keep their count and order.
pub fn reconcile(train: &FeatureFrame, test: &FeatureFrame) -> FeatureFrame {
    let columns: Vec<String> = train
        .columns()
        .iter()
        .filter(|column| column.as_str() != LABEL_COLUMN)
        .cloned()
        .collect();
    let sources: Vec<Option<usize>> = columns
        .iter()
        .map(|column| test.column_index(column))
        .collect();

    let missing: Vec<&str> = columns
        .iter()
        .zip(&sources)
        .filter(|(_, source)| source.is_none())
        .map(|(column, _)| column.as_str())
        .collect();
    if !missing.is_empty() {
        tracing::debug!("Filling test columns absent after transform: {}", missing.join(", "));
    }

    let mut out = FeatureFrame::new(columns);
    for row in test.rows() {
        let aligned = sources
            .iter()
            .map(|source| source.map_or(0.0, |idx| row[idx]))
            .collect();
        out.push_row(aligned)
            .expect("aligned rows match the reconciled column count");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(columns: &[(&str, [f32; 2])]) -> FeatureFrame {
        FeatureFrame::from_columns(
            columns
                .iter()
                .map(|(name, values)| (name.to_string(), values.to_vec()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn follows_train_order_and_fills_missing_indicators() {
        let train = frame(&[
            ("PassengerId", [1.0, 2.0]),
            ("Survived", [0.0, 1.0]),
            ("Age", [22.0, 38.0]),
            ("Emb_C", [0.0, 1.0]),
            ("Emb_S", [1.0, 0.0]),
        ]);
        let test = frame(&[
            ("PassengerId", [892.0, 893.0]),
            ("Emb_S", [1.0, 1.0]),
            ("Age", [34.5, 47.0]),
            ("Emb_X", [0.0, 0.0]),
        ]);

        let reconciled = reconcile(&train, &test);
        assert_eq!(reconciled.columns(), ["PassengerId", "Age", "Emb_C", "Emb_S"]);
        assert_eq!(
            reconciled.rows(),
            [vec![892.0, 34.5, 0.0, 1.0], vec![893.0, 47.0, 0.0, 1.0]]
        );
    }

    #[test]
    fn keeps_row_count() {
        let train = frame(&[("Age", [1.0, 2.0])]);
        let test = frame(&[("Fare", [3.0, 4.0])]);
        let reconciled = reconcile(&train, &test);
        assert_eq!(reconciled.len(), test.len());
        assert_eq!(reconciled.column("Age").unwrap(), vec![0.0, 0.0]);
    }
}
