//! # Validation Module
//!
//! Thai business-data validation for document requests.
//!
//! ## Two API Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Shapes                                  │
//! │                                                                         │
//! │  Single field (fail fast)                                               │
//! │  ├── validate_tax_id          13 digits + check digit                   │
//! │  ├── validate_phone           mobile / landline shapes                  │
//! │  ├── validate_business_name   length + business vocabulary              │
//! │  └── validate_thai_text       ≥ 30% Thai script                         │
//! │           │  Err(ValidationError) on the first broken rule              │
//! │           ▼                                                             │
//! │  Whole document (fail soft)                                             │
//! │  └── validate_document_standards                                        │
//! │           Vec<String>, every problem in one pass, never fails           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billy_core::validation::{validate_tax_id, validate_document_standards};
//! use serde_json::json;
//!
//! assert!(validate_tax_id("1234567890120").is_ok());
//!
//! let doc = json!({ "customer_name": "บริษัท ทดสอบ จำกัด", "document_type": "invoice" });
//! assert!(validate_document_standards(doc.as_object().unwrap()).is_empty());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::words::decimal_from_value;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a business name, in characters.
pub const MAX_BUSINESS_NAME_LEN: usize = 200;

/// Minimum share of Thai script in free text, as a fraction `NUM / DEN`.
const THAI_RATIO_NUM: usize = 3;
const THAI_RATIO_DEN: usize = 10;

const TAX_ID_LEN: usize = 13;

/// English business terms and their Thai equivalents.
///
/// The keys double as the vocabulary `validate_business_name` looks for.
pub const BUSINESS_TERMS: [(&str, &str); 21] = [
    ("invoice", "ใบแจ้งหนี้"),
    ("receipt", "ใบเสร็จรับเงิน"),
    ("quotation", "ใบเสนอราคา"),
    ("tax", "ภาษี"),
    ("vat", "ภาษีมูลค่าเพิ่ม"),
    ("company", "บริษัท"),
    ("limited", "จำกัด"),
    ("corporation", "มหาชน"),
    ("address", "ที่อยู่"),
    ("telephone", "โทรศัพท์"),
    ("email", "อีเมล"),
    ("customer", "ลูกค้า"),
    ("supplier", "ผู้จัดจำหน่าย"),
    ("payment", "การชำระเงิน"),
    ("bank", "ธนาคาร"),
    ("account", "บัญชี"),
    ("amount", "จำนวนเงิน"),
    ("total", "รวมทั้งสิ้น"),
    ("subtotal", "รวมเงิน"),
    ("discount", "ส่วนลด"),
    ("tax_id", "เลขประจำตัวผู้เสียภาษี"),
];

/// Accepted phone shapes, matched against the number with whitespace,
/// hyphens and parentheses removed.
/// The dashed shape therefore never matches.
static PHONE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^0[0-9]{8}$").expect("mobile pattern"),
        Regex::new(r"^0[0-9]{7}$").expect("landline pattern"),
        Regex::new(r"^[0-9]{2}-[0-9]{3}-[0-9]{4}$").expect("dashed pattern"),
    ]
});

// =============================================================================
// Business Terms
// =============================================================================

/// Thai translation of an English business term, or the term unchanged.
///
/// ## Example
/// ```rust
/// use billy_core::validation::business_term;
///
/// assert_eq!(business_term("VAT"), "ภาษีมูลค่าเพิ่ม");
/// assert_eq!(business_term("widget"), "widget");
/// ```
pub fn business_term(english: &str) -> &str {
    let key = english.to_lowercase();
    BUSINESS_TERMS
        .iter()
        .find(|(en, _)| *en == key)
        .map(|(_, th)| *th)
        .unwrap_or(english)
}

// =============================================================================
// Single-Field Validators
// =============================================================================

/// Validates a Thai tax identification number.
///
/// ## Rules
/// - exactly 13 ASCII digits
/// - `sum = Σ (i + 1) × d[i]` for i in 0..12, `check = (11 − sum mod 11) mod 10`
/// - the 13th digit equals `check`
pub fn validate_tax_id(tax_id: &str) -> ValidationResult<()> {
    if tax_id.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: "Tax ID".to_string(),
        });
    }

    let digits: Vec<u32> = tax_id.chars().filter_map(|c| c.to_digit(10)).collect();
    if tax_id.len() != TAX_ID_LEN
        || digits.len() != TAX_ID_LEN
        || !tax_id.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ValidationError::TaxIdFormat);
    }

    if digits[TAX_ID_LEN - 1] != tax_id_check_digit(&digits[..TAX_ID_LEN - 1]) {
        return Err(ValidationError::TaxIdChecksum);
    }

    Ok(())
}

/// Check digit for the first twelve digits of a tax ID.
fn tax_id_check_digit(first_twelve: &[u32]) -> u32 {
    let sum: u32 = first_twelve
        .iter()
        .enumerate()
        .map(|(i, d)| (i as u32 + 1) * d)
        .sum();
    (11 - sum % 11) % 10
}

/// Validates a Thai phone number.
///
/// ## Returns
/// - `Ok(false)` for an empty number (the field is optional)
/// - `Ok(true)` when the cleaned number is `0` + 8 digits (mobile) or
///   `0` + 7 digits (landline)
///
/// `02-123-4567` and `(02) 123 4567` both clean to `021234567`.
pub fn validate_phone(phone: &str) -> ValidationResult<bool> {
    if phone.trim().is_empty() {
        return Ok(false);
    }

    let cleaned: String = phone
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
        .collect();

    if PHONE_PATTERNS.iter().any(|p| p.is_match(&cleaned)) {
        Ok(true)
    } else {
        Err(ValidationError::PhoneFormat)
    }
}

/// Validates a business name.
///
/// ## Rules
/// - not empty, at most 200 characters
/// - contains one of the [`BUSINESS_TERMS`] keys, case-insensitively
///   (`"ABC Company Limited"` passes, a Thai-only name does not)
pub fn validate_business_name(name: &str) -> ValidationResult<()> {
    const FIELD: &str = "Business name";

    if name.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: FIELD.to_string(),
        });
    }

    if name.chars().count() > MAX_BUSINESS_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: FIELD.to_string(),
            max: MAX_BUSINESS_NAME_LEN,
        });
    }

    let lower = name.to_lowercase();
    if !BUSINESS_TERMS.iter().any(|(term, _)| lower.contains(term)) {
        return Err(ValidationError::MissingBusinessTerm);
    }

    Ok(())
}

/// Validates free text that must be mostly Thai (customer names etc.).
///
/// ## Rules
/// - not empty or whitespace only
/// - at least 30% of the trimmed text's characters are in U+0E00..=U+0E7F
pub fn validate_thai_text(text: &str, field: &str) -> ValidationResult<()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }

    let total = trimmed.chars().count();
    let thai = trimmed.chars().filter(|c| is_thai_char(*c)).count();
    if thai * THAI_RATIO_DEN < total * THAI_RATIO_NUM {
        return Err(ValidationError::NotThaiText {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Loosely-Typed Entry Points
// =============================================================================
//
// Same rules as above for values taken straight from a request. A value of
// the wrong JSON type is a `CoreError` type error, a bad string is
// `CoreError::Validation`.

/// [`validate_tax_id`] for a loosely-typed value.
pub fn validate_tax_id_value(value: &Value) -> CoreResult<()> {
    validate_tax_id(expect_str(value, "Tax ID")?)?;
    Ok(())
}

/// [`validate_phone`] for a loosely-typed value.
pub fn validate_phone_value(value: &Value) -> CoreResult<bool> {
    Ok(validate_phone(expect_str(value, "Phone number")?)?)
}

/// [`validate_business_name`] for a loosely-typed value.
pub fn validate_business_name_value(value: &Value) -> CoreResult<()> {
    validate_business_name(expect_str(value, "Business name")?)?;
    Ok(())
}

/// [`validate_thai_text`] for a loosely-typed value.
///
/// ## Errors
/// `CoreError::NotAString` when `value` is not a string.
pub fn validate_thai_text_value(value: &Value, field: &str) -> CoreResult<()> {
    validate_thai_text(expect_str(value, field)?, field)?;
    Ok(())
}

#[inline]
fn is_thai_char(c: char) -> bool {
    ('\u{0E00}'..='\u{0E7F}').contains(&c)
}

// =============================================================================
// Document Validator
// =============================================================================

/// Checks a raw document mapping against Thai document standards.
///
/// Collects every problem instead of stopping at the first one:
/// - `customer_name` and `document_type` must be present and non-empty
/// - `customer_name` must be mostly Thai text
/// - each `line_amounts` entry must be a positive number; JSON booleans
///   are not numbers, so `true` and `false` both report `got boolean`
///   rather than reading as 1 and 0
/// - `tax_id`, `phone`, `business_name` are checked when present
///
/// A value of the wrong JSON type is reported as
/// `"Validation error: …"` and ends the pass.
///
/// ## Returns
/// The error messages, empty when the document is valid.
pub fn validate_document_standards(document: &Map<String, Value>) -> Vec<String> {
    let mut errors = Vec::new();
    if let Err(err) = check_document(document, &mut errors) {
        errors.push(format!("Validation error: {err}"));
    }
    errors
}

fn check_document(document: &Map<String, Value>, errors: &mut Vec<String>) -> CoreResult<()> {
    for field in ["customer_name", "document_type"] {
        if !document.get(field).is_some_and(is_truthy) {
            errors.push(
                ValidationError::MissingField {
                    field: field.to_string(),
                }
                .to_string(),
            );
        }
    }

    if let Some(name) = document.get("customer_name") {
        collect(errors, validate_thai_text_value(name, "customer_name"))?;
    }

    if let Some(amounts) = document.get("line_amounts") {
        let amounts = amounts.as_array().ok_or_else(|| CoreError::NotAList {
            field: "line_amounts".to_string(),
        })?;
        for (i, amount) in amounts.iter().enumerate() {
            let index = i + 1;
            match decimal_from_value(amount) {
                None => errors.push(
                    ValidationError::LineAmountNotNumeric {
                        index,
                        kind: json_kind(amount),
                    }
                    .to_string(),
                ),
                Some(value) if value <= Decimal::ZERO => errors.push(
                    ValidationError::LineAmountNotPositive { index }.to_string(),
                ),
                Some(_) => {}
            }
        }
    }

    if let Some(tax_id) = present(document, "tax_id") {
        collect(errors, validate_tax_id_value(tax_id))?;
    }

    if let Some(phone) = present(document, "phone") {
        collect(errors, validate_phone_value(phone))?;
    }

    if let Some(name) = present(document, "business_name") {
        collect(errors, validate_business_name_value(name))?;
    }

    Ok(())
}

/// Records a value error and keeps going; a type error ends the pass.
fn collect<T>(errors: &mut Vec<String>, result: CoreResult<T>) -> CoreResult<()> {
    match result {
        Err(err) if err.is_type_error() => Err(err),
        Err(err) => {
            errors.push(err.to_string());
            Ok(())
        }
        Ok(_) => Ok(()),
    }
}

/// The field's value when it is present and non-empty.
fn present<'a>(document: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    document.get(field).filter(|v| is_truthy(v))
}

fn expect_str<'a>(value: &'a Value, field: &str) -> CoreResult<&'a str> {
    value.as_str().ok_or_else(|| CoreError::NotAString {
        field: field.to_string(),
    })
}

/// Empty strings, zero, false, null and empty containers count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
