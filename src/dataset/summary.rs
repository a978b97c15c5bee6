//! Quick looks at a raw passenger table before feature engineering.

use super::PassengerRecord;

/// Rows shown by [`preview`].
pub const PREVIEW_ROWS: usize = 5;

/// Survival rate per sex over a labeled table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurvivalBySex {
    /// Fraction of labeled women who survived, `None` without women.
    pub female: Option<f32>,
    /// Fraction of labeled men who survived, `None` without men.
    pub male: Option<f32>,
}

/// Compute survival rates by sex, ignoring unlabeled rows.
pub fn survival_by_sex(records: &[PassengerRecord]) -> SurvivalBySex {
    let mut female = (0u32, 0u32);
    let mut male = (0u32, 0u32);
    for record in records {
        let Some(label) = record.survived else {
            continue;
        };
        let bucket = if record.is_female() {
            &mut female
        } else if record.sex.trim().eq_ignore_ascii_case("male") {
            &mut male
        } else {
            continue;
        };
        bucket.0 += u32::from(label == 1);
        bucket.1 += 1;
    }
    SurvivalBySex {
        female: rate(female),
        male: rate(male),
    }
}

fn rate((survived, total): (u32, u32)) -> Option<f32> {
    (total > 0).then(|| survived as f32 / total as f32)
}

/// One formatted line per leading row, for logging.
pub fn preview(records: &[PassengerRecord]) -> Vec<String> {
    records
        .iter()
        .take(PREVIEW_ROWS)
        .map(|r| {
            format!(
                "{:>5} {:>2} {:<6} age={:<5} fare={:<8} sibsp={} parch={} cabin={:<6} emb={} {}",
                r.passenger_id,
                r.pclass,
                r.sex,
                fmt_opt(r.age),
                fmt_opt(r.fare),
                r.sib_sp,
                r.parch,
                r.cabin.as_deref().unwrap_or("-"),
                r.embarked.as_deref().unwrap_or("-"),
                r.name
            )
        })
        .collect()
}

fn fmt_opt(value: Option<f32>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.2}"))
}
