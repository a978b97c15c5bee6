//! Honorific extraction from passenger names.

use std::sync::OnceLock;

use regex::Regex;

/// Code for titles missing from [`TITLE_CODES`], including names without one.
pub const UNKNOWN_TITLE_CODE: u8 = 11;
/// Code shared by `Mrs` and its French form.
pub const MRS_TITLE_CODE: u8 = 2;

/// Known titles. Rare noble and military titles share buckets.
pub const TITLE_CODES: [(&str, u8); 17] = [
    ("Mr", 0),
    ("Miss", 1),
    ("Mrs", MRS_TITLE_CODE),
    ("Master", 3),
    ("Dr", 4),
    ("Rev", 5),
    ("Col", 6),
    ("Major", 7),
    ("Mlle", 1),
    ("Ms", 1),
    ("Mme", MRS_TITLE_CODE),
    ("Countess", 9),
    ("Lady", 9),
    ("Jonkheer", 10),
    ("Don", 10),
    ("Dona", 10),
    ("Capt", 10),
];

fn title_regex() -> &'static Regex {
    static TITLE: OnceLock<Regex> = OnceLock::new();
    TITLE.get_or_init(|| Regex::new(r" ([A-Za-z]+)\.").expect("title regex must compile"))
}

/// First ` Word.` token of a name, e.g. `Mr` in `"Braund, Mr. Owen Harris"`.
pub fn extract_title(name: &str) -> Option<&str> {
    title_regex()
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Numeric title code for a full passenger name.
pub fn title_code(name: &str) -> u8 {
    extract_title(name)
        .and_then(|title| {
            TITLE_CODES
                .iter()
                .find(|(known, _)| *known == title)
                .map(|&(_, code)| code)
        })
        .unwrap_or(UNKNOWN_TITLE_CODE)
}
