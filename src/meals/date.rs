use time::{macros::format_description, Date, OffsetDateTime, UtcOffset};

use crate::error::MealError;

const WEEKDAYS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Accepts `YYYY-MM-DD` and the compact `YYYYMMDD` form.
pub fn parse_iso_date(input: &str) -> Result<Date, MealError> {
    let input = input.trim();
    let dashed;
    let text = if input.len() == 8 && input.bytes().all(|b| b.is_ascii_digit()) {
        dashed = format!("{}-{}-{}", &input[..4], &input[4..6], &input[6..]);
        dashed.as_str()
    } else {
        input
    };

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|e| MealError::InvalidDate(format!("{input:?}: {e}")))
}

/// `YYYYMMDD`, as the API expects in `MLSV_YMD`.
pub fn to_ymd(date: Date) -> String {
    format!("{:04}{:02}{:02}", date.year(), u8::from(date.month()), date.day())
}

/// `YYYY-MM-DD`, as a date input holds it.
pub fn to_iso(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// e.g. `2024년 1월 1일 (월)`
pub fn display_date(date: Date) -> String {
    let weekday = WEEKDAYS[date.weekday().number_days_from_sunday() as usize];
    format!(
        "{}년 {}월 {}일 ({})",
        date.year(),
        u8::from(date.month()),
        date.day(),
        weekday
    )
}

pub fn format_display_date(iso: &str) -> Result<String, MealError> {
    parse_iso_date(iso).map(display_date)
}

pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}
