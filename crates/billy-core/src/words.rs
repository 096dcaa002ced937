//! # Baht Amounts in Thai Words
//!
//! Thai legal documents repeat the grand total in words, e.g.
//! `117,700.00` → `หนึ่งแสนหนึ่งหมื่นเจ็ดพันเจ็ดร้อยบาทถ้วน`.
//!
//! ## Reading Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  position:   5      4      3     2     1     0                          │
//! │  unit:      แสน   หมื่น   พัน   ร้อย   สิบ   (none)                       │
//! │                                                                         │
//! │  digit 1 in tens  → สิบ          (not หนึ่งสิบ)                             │
//! │  digit 2 in tens  → ยี่สิบ        (not สองสิบ)                              │
//! │  anything else    → digit word + unit word, no separator                │
//! │                                                                         │
//! │  every further 6 digits → ... + ล้าน + next group                        │
//! │                                                                         │
//! │  <baht>บาทถ้วน              Satang == 0                                  │
//! │  <baht>บาท<satang>สตางค์     Satang  > 0                                  │
//! │  <satang>สตางค์              Baht    == 0                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A trailing one is always read หนึ่ง (21 → ยี่สิบหนึ่ง); the เอ็ด form is
//! not used.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

const DIGITS: [&str; 10] = [
    "", "หนึ่ง", "สอง", "สาม", "สี่", "ห้า", "หก", "เจ็ด", "แปด", "เก้า",
];
const UNITS: [&str; 6] = ["", "สิบ", "ร้อย", "พัน", "หมื่น", "แสน"];

const MILLION: &str = "ล้าน";
const BAHT: &str = "บาท";
const SATANG: &str = "สตางค์";
const EVEN: &str = "ถ้วน";
const TWENTY: &str = "ยี่สิบ";

/// The fixed reading of zero: "zero Baht even".
pub const ZERO_BAHT: &str = "ศูนย์บาทถ้วน";

const GROUP_SIZE: u128 = 1_000_000;

/// Converts a non-negative Baht amount into Thai words.
///
/// The amount is first quantized to Satang, so a value that rounds up to
/// a full Baht (e.g. `99.999`) is read as `หนึ่งร้อยบาทถ้วน`.
///
/// ## Errors
/// `CoreError::NegativeAmount` when `amount < 0`.
///
/// ## Example
/// ```rust
/// use billy_core::words::amount_to_words;
/// use rust_decimal::Decimal;
///
/// assert_eq!(amount_to_words(Decimal::from(100)).unwrap(), "หนึ่งร้อยบาทถ้วน");
/// assert_eq!(
///     amount_to_words(Decimal::new(12350, 2)).unwrap(),
///     "หนึ่งร้อยยี่สิบสามบาทห้าสิบสตางค์"
/// );
/// ```
pub fn amount_to_words(amount: Decimal) -> CoreResult<String> {
    let money = Money::new(amount)?;
    Ok(money_to_words(money))
}

/// Same as [`amount_to_words`] for an already-validated [`Money`].
pub fn money_to_words(money: Money) -> String {
    if money.is_zero() {
        return ZERO_BAHT.to_string();
    }

    let baht = money.baht();
    let satang = money.satang();

    let mut text = String::new();
    if baht > 0 {
        text.push_str(&integer_words(baht));
        text.push_str(BAHT);
    }

    if satang > 0 {
        text.push_str(&group_words(satang as u128));
        text.push_str(SATANG);
    } else {
        text.push_str(EVEN);
    }

    text
}

/// Converts a loosely-typed value, as found in template data.
///
/// ## Errors
/// - `CoreError::NotNumeric` for anything but a JSON number
/// - `CoreError::NegativeAmount` for a negative number
pub fn amount_to_words_value(value: &Value) -> CoreResult<String> {
    let amount = decimal_from_value(value).ok_or_else(|| CoreError::NotNumeric {
        field: "Amount".to_string(),
    })?;
    amount_to_words(amount)
}

/// Reads a JSON number as an exact decimal.
///
/// Booleans are not numbers here.
pub(crate) fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    let text = n.to_string();
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Whole Baht, one six-digit group at a time, joined by ล้าน.
fn integer_words(n: u128) -> String {
    if n < GROUP_SIZE {
        return group_words(n);
    }
    let mut text = integer_words(n / GROUP_SIZE);
    text.push_str(MILLION);
    text.push_str(&group_words(n % GROUP_SIZE));
    text
}

/// Reads `n < 1_000_000` with the positional units. Zero reads as "".
fn group_words(n: u128) -> String {
    debug_assert!(n < GROUP_SIZE);

    let mut parts: Vec<String> = Vec::with_capacity(UNITS.len());
    let mut rest = n;
    let mut position = 0;
    while rest > 0 {
        let digit = (rest % 10) as usize;
        if digit > 0 {
            let part = match (position, digit) {
                (1, 1) => UNITS[1].to_string(),
                (1, 2) => TWENTY.to_string(),
                _ => format!("{}{}", DIGITS[digit], UNITS[position]),
            };
            parts.push(part);
        }
        rest /= 10;
        position += 1;
    }

    parts.reverse();
    parts.concat()
}

// =============================================================================
// Unit Tests
// =============================================================================
