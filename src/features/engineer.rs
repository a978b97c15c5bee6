//! Raw passenger rows to engineered numeric columns.

use std::collections::BTreeSet;

use super::stats::{FARE_QUANTILE_BINS, age_bin, bin_index, median, quantile_edges};
use super::title::{MRS_TITLE_CODE, title_code};
use super::{EMBARKED_PREFIX, FeatureFrame, ID_COLUMN, LABEL_COLUMN};
use crate::dataset::PassengerRecord;

/// Port assumed for passengers without an embarkation record.
pub const DEFAULT_PORT: &str = "S";
/// Deck letters in code order; `U` marks an unknown cabin.
pub const DECK_LETTERS: [char; 9] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'T', 'U'];
const UNKNOWN_DECK: char = 'U';
const CHILD_AGE: f32 = 12.0;
const ADULT_AGE: f32 = 18.0;

/// Build the engineered frame for one passenger table.
///
/// Age and fare gaps are filled with this table's own medians, so train and
/// test are transformed independently. The `Survived` column is only emitted
/// when every row carries a label.
pub fn engineer(records: &[PassengerRecord]) -> FeatureFrame {
    let age_fill = median(records.iter().filter_map(|r| r.age)).unwrap_or(0.0);
    let fare_fill = median(records.iter().filter_map(|r| r.fare)).unwrap_or(0.0);
    let ages: Vec<f32> = records
        .iter()
        .map(|r| r.age.filter(|a| a.is_finite()).unwrap_or(age_fill))
        .collect();
    let fares: Vec<f32> = records
        .iter()
        .map(|r| r.fare.filter(|f| f.is_finite()).unwrap_or(fare_fill))
        .collect();
    let fare_edges = quantile_edges(fares.iter().copied(), FARE_QUANTILE_BINS);
    let ports: Vec<String> = records.iter().map(embarked_port).collect();

    let mut columns: Vec<(String, Vec<f32>)> = Vec::new();
    let mut push = |name: &str, values: Vec<f32>| columns.push((name.to_string(), values));

    push(ID_COLUMN, records.iter().map(|r| r.passenger_id as f32).collect());
    if let Some(labels) = records
        .iter()
        .map(|r| r.survived.map(f32::from))
        .collect::<Option<Vec<f32>>>()
    {
        push(LABEL_COLUMN, labels);
    }

    let sex: Vec<f32> = records.iter().map(|r| sex_code(r) as f32).collect();
    let family: Vec<f32> = records
        .iter()
        .map(|r| (r.sib_sp + r.parch + 1) as f32)
        .collect();
    let titles: Vec<f32> = records.iter().map(|r| title_code(&r.name) as f32).collect();

    push("Pclass", records.iter().map(|r| f32::from(r.pclass)).collect());
    push("Sex", sex.clone());
    push("Age", ages.clone());
    push("SibSp", records.iter().map(|r| r.sib_sp as f32).collect());
    push("Parch", records.iter().map(|r| r.parch as f32).collect());
    push("Fare", fares.clone());
    push("FamilySize", family.clone());
    push("IsAlone", family.iter().map(|&size| flag(size == 1.0)).collect());
    push("Title", titles.clone());
    push(
        "Deck",
        records
            .iter()
            .map(|r| deck_code(r.cabin.as_deref()) as f32)
            .collect(),
    );
    push("IsChild", ages.iter().map(|&age| flag(age < CHILD_AGE)).collect());
    push(
        "IsMother",
        (0..records.len())
            .map(|i| {
                flag(
                    sex[i] == 1.0
                        && records[i].parch > 0
                        && ages[i] > ADULT_AGE
                        && titles[i] == f32::from(MRS_TITLE_CODE),
                )
            })
            .collect(),
    );
    push(
        "FarePerPerson",
        fares.iter().zip(&family).map(|(fare, size)| fare / size).collect(),
    );
    push(
        "ClassFareInteraction",
        records
            .iter()
            .zip(&fares)
            .map(|(r, fare)| f32::from(r.pclass) * fare)
            .collect(),
    );
    push("AgeBin", ages.iter().map(|&age| age_bin(age) as f32).collect());
    push(
        "FareBin",
        fares
            .iter()
            .map(|&fare| bin_index(fare, &fare_edges) as f32)
            .collect(),
    );

    let present: BTreeSet<&str> = ports.iter().map(String::as_str).collect();
    for port in present {
        push(
            &format!("{EMBARKED_PREFIX}{port}"),
            ports.iter().map(|p| flag(p == port)).collect(),
        );
    }

    FeatureFrame::from_columns(columns).expect("engineered columns share one row count")
}

/// `1` for female passengers, `0` otherwise.
pub fn sex_code(record: &PassengerRecord) -> u8 {
    u8::from(record.is_female())
}

/// Deck code from the first cabin letter; missing or unrecognized cabins
/// map to the unknown deck.
pub fn deck_code(cabin: Option<&str>) -> usize {
    let letter = cabin
        .and_then(|c| c.trim().chars().next())
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| DECK_LETTERS.contains(c))
        .unwrap_or(UNKNOWN_DECK);
    DECK_LETTERS
        .iter()
        .position(|&known| known == letter)
        .unwrap_or(DECK_LETTERS.len() - 1)
}

fn embarked_port(record: &PassengerRecord) -> String {
    record
        .embarked
        .as_deref()
        .map(str::trim)
        .filter(|port| !port.is_empty())
        .unwrap_or(DEFAULT_PORT)
        .to_string()
}

fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(id: i64, name: &str, sex: &str, age: Option<f32>) -> PassengerRecord {
        PassengerRecord {
            passenger_id: id,
            survived: Some(0),
            pclass: 3,
            name: name.to_string(),
            sex: sex.to_string(),
            age,
            sib_sp: 0,
            parch: 0,
            ticket: "A/5 21171".to_string(),
            fare: Some(7.25),
            cabin: None,
            embarked: Some("S".to_string()),
        }
    }

    fn value(frame: &FeatureFrame, row: usize, column: &str) -> f32 {
        frame.column(column).unwrap()[row]
    }

    #[test]
    fn fills_missing_age_and_fare_with_table_median() {
        let mut records = vec![
            passenger(1, "A, Mr. One", "male", Some(20.0)),
            passenger(2, "B, Mr. Two", "male", Some(40.0)),
            passenger(3, "C, Mr. Three", "male", None),
        ];
        records[0].fare = Some(10.0);
        records[1].fare = Some(30.0);
        records[2].fare = None;
        let frame = engineer(&records);
        assert_eq!(value(&frame, 2, "Age"), 30.0);
        assert_eq!(value(&frame, 2, "Fare"), 20.0);
    }

    #[test]
    fn derives_family_and_mother_flags() {
        let mut mother = passenger(1, "Smith, Mrs. Jane", "female", Some(35.0));
        mother.parch = 2;
        mother.sib_sp = 1;
        mother.fare = Some(40.0);
        mother.pclass = 2;
        let child = passenger(2, "Smith, Master. John", "male", Some(4.0));
        let frame = engineer(&[mother, child]);

        assert_eq!(value(&frame, 0, "FamilySize"), 4.0);
        assert_eq!(value(&frame, 0, "IsAlone"), 0.0);
        assert_eq!(value(&frame, 0, "IsMother"), 1.0);
        assert_eq!(value(&frame, 0, "FarePerPerson"), 10.0);
        assert_eq!(value(&frame, 0, "ClassFareInteraction"), 80.0);
        assert_eq!(value(&frame, 1, "IsAlone"), 1.0);
        assert_eq!(value(&frame, 1, "IsChild"), 1.0);
        assert_eq!(value(&frame, 1, "IsMother"), 0.0);
        assert_eq!(value(&frame, 1, "Title"), 3.0);
    }

    #[test]
    fn one_hot_columns_follow_present_ports() {
        let mut a = passenger(1, "A, Mr. One", "male", Some(20.0));
        a.embarked = Some("Q".to_string());
        let mut b = passenger(2, "B, Miss. Two", "female", Some(20.0));
        b.embarked = None;
        let frame = engineer(&[a, b]);
        assert!(frame.has_column("Emb_Q"));
        assert!(frame.has_column("Emb_S"));
        assert!(!frame.has_column("Emb_C"));
        assert_eq!(frame.column("Emb_S").unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn deck_codes_use_fixed_alphabet() {
        assert_eq!(deck_code(Some("C85")), 2);
        assert_eq!(deck_code(Some("T")), 7);
        assert_eq!(deck_code(None), 8);
        assert_eq!(deck_code(Some("Z12")), 8);
        assert_eq!(deck_code(Some("")), 8);
    }

    #[test]
    fn label_column_requires_every_row_labeled() {
        let mut unlabeled = passenger(2, "B, Mr. Two", "male", Some(30.0));
        unlabeled.survived = None;
        let frame = engineer(&[passenger(1, "A, Mr. One", "male", Some(20.0)), unlabeled]);
        assert!(!frame.has_column(LABEL_COLUMN));
    }

    #[test]
    fn all_missing_ages_still_produce_finite_values() {
        let records = vec![
            passenger(1, "A, Mr. One", "male", None),
            passenger(2, "B, Mr. Two", "male", None),
        ];
        let frame = engineer(&records);
        assert!(frame.rows().iter().flatten().all(|v| v.is_finite()));
        assert_eq!(value(&frame, 0, "Age"), 0.0);
        assert_eq!(value(&frame, 0, "AgeBin"), 0.0);
    }
}
