use lazy_static::lazy_static;
use regex::Regex;

use super::dto::DishList;

lazy_static! {
    static ref LINE_BREAK_RE: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    // allergy codes, e.g. "5.6.16."
    static ref ALLERGY_CODE_RE: Regex = Regex::new(r"[0-9]+\.").unwrap();
}

/// Split a raw dish field into clean dish names.
///
/// Splits on `<br/>`; when the field has none, falls back to commas. A dish
/// name with a comma in a field without line breaks is therefore split too.
pub fn tokenize(dish_field: &str) -> DishList {
    if dish_field.is_empty() {
        return Vec::new();
    }

    let mut segments: Vec<&str> = LINE_BREAK_RE.split(dish_field).collect();
    if segments.len() == 1 {
        segments = dish_field.split(',').collect();
    }

    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| ALLERGY_CODE_RE.replace_all(s, "").trim().to_string())
        .collect()
}

/// Split a `<br/>`-separated field (nutrition facts) into non-empty lines.
pub fn split_lines(field: &str) -> Vec<String> {
    LINE_BREAK_RE
        .split(field)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
