//! Column statistics and discretization helpers.

/// Edges of the age bins `(0,12] (12,20] (20,40] (40,60] (60,80]`.
pub const AGE_BIN_EDGES: [f32; 6] = [0.0, 12.0, 20.0, 40.0, 60.0, 80.0];
/// Number of equal-frequency fare bins.
pub const FARE_QUANTILE_BINS: usize = 4;

/// Median of the finite values, or `None` when there are none.
///
/// Even counts average the two middle values.
pub fn median(values: impl IntoIterator<Item = f32>) -> Option<f32> {
    let sorted = finite_sorted(values);
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Linearly interpolated quantile of pre-sorted values, `q` in `[0, 1]`.
pub fn quantile_sorted(sorted: &[f32], q: f32) -> Option<f32> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f32;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(last);
    let frac = pos - lo as f32;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Edges of `bins` equal-frequency bins over the finite values.
///
/// Returns `bins + 1` edges from the minimum to the maximum, or an empty
/// vector when no value is finite.
pub fn quantile_edges(values: impl IntoIterator<Item = f32>, bins: usize) -> Vec<f32> {
    let sorted = finite_sorted(values);
    if sorted.is_empty() || bins == 0 {
        return Vec::new();
    }
    (0..=bins)
        .filter_map(|step| quantile_sorted(&sorted, step as f32 / bins as f32))
        .collect()
}

/// Index of the right-inclusive bin holding `value`.
///
/// Values at or below the first edge land in bin `0`; values above the last
/// edge land in the last bin.
pub fn bin_index(value: f32, edges: &[f32]) -> usize {
    if edges.len() < 2 {
        return 0;
    }
    edges[1..edges.len() - 1]
        .iter()
        .filter(|&&edge| value > edge)
        .count()
}

/// Age bin code `0..=4` over [`AGE_BIN_EDGES`].
pub fn age_bin(age: f32) -> usize {
    bin_index(age, &AGE_BIN_EDGES)
}

fn finite_sorted(values: impl IntoIterator<Item = f32>) -> Vec<f32> {
    let mut sorted: Vec<f32> = values.into_iter().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f32::total_cmp);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_handles_odd_even_and_empty() {
        assert_eq!(median([3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median([4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median([f32::NAN, 5.0]), Some(5.0));
        assert_eq!(median(std::iter::empty()), None);
    }

    #[test]
    fn quartile_edges_interpolate() {
        let edges = quantile_edges([1.0, 2.0, 3.0, 4.0, 5.0], 4);
        assert_eq!(edges, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let edges = quantile_edges([0.0, 10.0], 4);
        assert_eq!(edges, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn bins_are_right_inclusive() {
        let edges = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(bin_index(1.0, &edges), 0);
        assert_eq!(bin_index(2.0, &edges), 0);
        assert_eq!(bin_index(2.5, &edges), 1);
        assert_eq!(bin_index(5.0, &edges), 3);
    }

    #[test]
    fn age_bins_clamp_out_of_range_ages() {
        assert_eq!(age_bin(0.0), 0);
        assert_eq!(age_bin(12.0), 0);
        assert_eq!(age_bin(12.5), 1);
        assert_eq!(age_bin(40.0), 2);
        assert_eq!(age_bin(61.0), 4);
        assert_eq!(age_bin(95.0), 4);
    }
}
