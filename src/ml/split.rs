//! Seeded shuffle split into training and validation rows.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Row indices of a train/validation split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

/// Shuffle `0..n_rows` with `seed` and hold out `ceil(n_rows * validation_fraction)`
/// rows for validation.
///
/// At least one row stays on each side, so `n_rows` must be two or more.
pub fn train_test_split(
    n_rows: usize,
    validation_fraction: f64,
    seed: u64,
) -> Result<SplitIndices, String> {
    if n_rows < 2 {
        return Err(format!("Need at least 2 rows to split, got {n_rows}"));
    }
    if !(validation_fraction > 0.0 && validation_fraction < 1.0) {
        return Err(format!(
            "Validation fraction must be in (0, 1), got {validation_fraction}"
        ));
    }
    let n_validation = ((n_rows as f64) * validation_fraction)
        .ceil()
        .clamp(1.0, (n_rows - 1) as f64) as usize;

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let train = indices.split_off(n_validation);
    Ok(SplitIndices {
        train,
        validation: indices,
    })
}
