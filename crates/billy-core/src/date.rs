//! # Thai Calendar Dates
//!
//! Documents print dates twice: Thai month name with the Buddhist-era year,
//! then the Western `DD-MM-YYYY` form.
//!
//! ```text
//! 2025-01-31  →  "31 มกราคม 2568 / 31-01-2025"
//! ```

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// Offset between the Buddhist era and the Common era.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Thai month names, January first.
pub const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Thai name of a month, `month` in 1..=12.
pub fn thai_month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    THAI_MONTHS.get(index).copied()
}

/// Gregorian year → Buddhist-era year.
#[inline]
pub const fn buddhist_year(gregorian_year: i32) -> i32 {
    gregorian_year + BUDDHIST_ERA_OFFSET
}

/// Formats a date as `"<d> <Thai month> <BE year> / <dd>-<mm>-<yyyy>"`.
///
/// ## Example
/// ```rust
/// use billy_core::date::format_thai_date;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// assert_eq!(format_thai_date(date), "31 มกราคม 2568 / 31-01-2025");
/// ```
pub fn format_thai_date(date: NaiveDate) -> String {
    // NaiveDate guarantees 1..=12
    let month = THAI_MONTHS[date.month0() as usize];
    format!(
        "{} {} {} / {}",
        date.day(),
        month,
        buddhist_year(date.year()),
        date.format("%d-%m-%Y")
    )
}

/// Formats an ISO `YYYY-MM-DD` date held in a loosely-typed value.
///
/// ## Errors
/// `CoreError::NotADate` for non-strings and for strings that are not a
/// real calendar date.
pub fn format_thai_date_value(value: &Value) -> CoreResult<String> {
    let date = value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or_else(|| CoreError::NotADate {
            field: "date".to_string(),
        })?;
    Ok(format_thai_date(date))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_thai_date() {
        assert_eq!(format_thai_date(ymd(2025, 1, 31)), "31 มกราคม 2568 / 31-01-2025");
        assert_eq!(format_thai_date(ymd(2024, 2, 29)), "29 กุมภาพันธ์ 2567 / 29-02-2024");
        assert_eq!(format_thai_date(ymd(2023, 12, 5)), "5 ธันวาคม 2566 / 05-12-2023");
    }

    #[test]
    fn test_thai_month_name() {
        assert_eq!(thai_month_name(1), Some("มกราคม"));
        assert_eq!(thai_month_name(10), Some("ตุลาคม"));
        assert_eq!(thai_month_name(0), None);
        assert_eq!(thai_month_name(13), None);
    }

    #[test]
    fn test_value_entry_point() {
        assert_eq!(
            format_thai_date_value(&json!("2025-04-13")).unwrap(),
            "13 เมษายน 2568 / 13-04-2025"
        );
    }

    #[test]
    fn test_rejects_non_dates() {
        for value in [
            json!(20250131),
            json!(null),
            json!("31/01/2025"),
            json!("2025-02-30"),
            json!("not a date"),
        ] {
            let err = format_thai_date_value(&value).unwrap_err();
            assert!(err.is_type_error(), "{value} should be a type error");
        }
    }

    proptest! {
        #[test]
        fn buddhist_year_and_western_segment(days in 0i64..80_000) {
            let date = ymd(1900, 1, 1) + chrono::Duration::days(days);
            let text = format_thai_date(date);
            let (thai, western) = text.split_once(" / ").unwrap();

            let be_year: i32 = thai.rsplit(' ').next().unwrap().parse().unwrap();
            prop_assert_eq!(be_year, date.year() + 543);
            prop_assert_eq!(western.to_string(), date.format("%d-%m-%Y").to_string());
        }
    }
}
