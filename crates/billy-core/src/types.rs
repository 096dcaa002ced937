//! # Domain Types
//!
//! Core domain types shared by the engine and its callers.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DocumentType   │   │    TaxPolicy    │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Quotation  QT  │   │  rate (0.07)    │   │  description    │       │
//! │  │  Invoice   INV  │   │  mode           │   │  quantity       │       │
//! │  │  Receipt   REC  │   │                 │   │  unit_price     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Totals      │   │    TaxMode      │   │ CompanySnapshot │       │
//! │  │  subtotal       │   │  Exclusive      │   │  name, tax_id   │       │
//! │  │  tax, total     │   │  Inclusive      │   │  address, tel   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::THAI_BAHT_CURRENCY;

// =============================================================================
// Document Type
// =============================================================================

/// The kind of business document being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// ใบเสนอราคา
    Quotation,
    /// ใบแจ้งหนี้
    Invoice,
    /// ใบเสร็จรับเงิน
    Receipt,
}

impl DocumentType {
    /// Wire name, as accepted in requests.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Quotation => "quotation",
            DocumentType::Invoice => "invoice",
            DocumentType::Receipt => "receipt",
        }
    }

    /// Title printed at the top of the document.
    pub const fn thai_title(&self) -> &'static str {
        match self {
            DocumentType::Quotation => "ใบเสนอราคา",
            DocumentType::Invoice => "ใบแจ้งหนี้",
            DocumentType::Receipt => "ใบเสร็จรับเงิน",
        }
    }

    /// Prefix of the document number, e.g. `INV-1a2b3c4d`.
    pub const fn number_prefix(&self) -> &'static str {
        match self {
            DocumentType::Quotation => "QT",
            DocumentType::Invoice => "INV",
            DocumentType::Receipt => "REC",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Language
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Th,
    En,
}

// =============================================================================
// Tax
// =============================================================================

/// Whether stated prices already contain tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Tax is added on top of the subtotal.
    #[default]
    Exclusive,
    /// The subtotal already contains tax; it is backed out.
    Inclusive,
}

/// Tax rate and mode for one document.
///
/// Built once per request and never mutated. `rate` is a fraction
/// (`0.07` is Thai VAT), `None` meaning no tax at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxPolicy {
    #[ts(type = "string | null")]
    pub rate: Option<Decimal>,
    pub mode: TaxMode,
}

impl TaxPolicy {
    /// ## Errors
    /// `CoreError::NegativeTaxRate` when `rate < 0`.
    pub fn new(rate: Option<Decimal>, inclusive: bool) -> Result<Self, CoreError> {
        if matches!(rate, Some(r) if r.is_sign_negative() && !r.is_zero()) {
            return Err(CoreError::NegativeTaxRate);
        }
        Ok(TaxPolicy {
            rate,
            mode: if inclusive {
                TaxMode::Inclusive
            } else {
                TaxMode::Exclusive
            },
        })
    }

    /// No tax.
    pub const fn none() -> Self {
        TaxPolicy {
            rate: None,
            mode: TaxMode::Exclusive,
        }
    }

    /// The effective rate, `None` when absent or zero.
    pub fn effective_rate(&self) -> Option<Decimal> {
        self.rate.filter(|r| !r.is_zero())
    }

    #[inline]
    pub fn is_inclusive(&self) -> bool {
        self.mode == TaxMode::Inclusive
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One billable line: quantity × unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    #[ts(type = "string")]
    pub quantity: Decimal,
    #[ts(type = "string")]
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// Exact, unrounded `quantity × unit_price`.
    ///
    /// ## Errors
    /// `CoreError::AmountOverflow` when the product leaves the decimal range.
    #[inline]
    pub fn line_total(&self) -> CoreResult<Decimal> {
        self.quantity
            .checked_mul(self.unit_price)
            .ok_or(CoreError::AmountOverflow)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Subtotal, tax and grand total of a document, each quantized to Satang.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Totals {
    pub currency: String,
    #[ts(type = "string")]
    pub subtotal: Money,
    #[ts(type = "string")]
    pub tax: Money,
    #[ts(type = "string")]
    pub total: Money,
}

impl Totals {
    pub fn new(subtotal: Money, tax: Money, total: Money) -> Self {
        Totals {
            currency: THAI_BAHT_CURRENCY.to_string(),
            subtotal,
            tax,
            total,
        }
    }
}

// =============================================================================
// Company Snapshot
// =============================================================================

/// Issuing company details frozen onto each document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanySnapshot {
    pub name: String,
    pub address_1: String,
    pub address_2: String,
    pub tel: String,
    pub tax_id: String,
    pub bank_account: String,
}

impl Default for CompanySnapshot {
    /// Demo company used when nothing is configured.
    fn default() -> Self {
        CompanySnapshot {
            name: "บริษัท บิลลี่ ด็อก จำกัด".to_string(),
            address_1: "123 ถนนสุขุมวิท".to_string(),
            address_2: "แขวงคลองเตย เขตคลองเตย กรุงเทพฯ 10110".to_string(),
            tel: "02-123-4567".to_string(),
            tax_id: "0123456789010".to_string(),
            bank_account: "123-4-56789-0".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_document_type_wire_names() {
        let parsed: DocumentType = serde_json::from_str("\"receipt\"").unwrap();
        assert_eq!(parsed, DocumentType::Receipt);
        assert!(serde_json::from_str::<DocumentType>("\"Invoice\"").is_err());
        assert_eq!(
            serde_json::to_string(&DocumentType::Quotation).unwrap(),
            "\"quotation\""
        );
    }

    #[test]
    fn test_document_type_labels() {
        assert_eq!(DocumentType::Quotation.number_prefix(), "QT");
        assert_eq!(DocumentType::Invoice.thai_title(), "ใบแจ้งหนี้");
        assert_eq!(DocumentType::Receipt.to_string(), "receipt");
    }

    #[test]
    fn test_tax_policy() {
        let policy = TaxPolicy::new(Some(dec!(0.07)), true).unwrap();
        assert!(policy.is_inclusive());
        assert_eq!(policy.effective_rate(), Some(dec!(0.07)));

        let zero = TaxPolicy::new(Some(dec!(0)), false).unwrap();
        assert_eq!(zero.effective_rate(), None);
        assert_eq!(TaxPolicy::none().effective_rate(), None);

        assert_eq!(
            TaxPolicy::new(Some(dec!(-0.07)), false),
            Err(CoreError::NegativeTaxRate)
        );
    }

    #[test]
    fn test_tax_mode_default() {
        assert_eq!(TaxMode::default(), TaxMode::Exclusive);
    }

    #[test]
    fn test_line_total_is_exact() {
        let line = LineItem::new("ค่าบริการ", dec!(1.5), dec!(33.333));
        assert_eq!(line.line_total(), Ok(dec!(49.9995)));
    }

    #[test]
    fn test_line_total_overflow() {
        let line = LineItem::new("", Decimal::MAX, dec!(2));
        assert_eq!(line.line_total(), Err(CoreError::AmountOverflow));
    }

    #[test]
    fn test_default_company_tax_id_is_valid() {
        let company = CompanySnapshot::default();
        assert!(crate::validation::validate_tax_id(&company.tax_id).is_ok());
        assert!(crate::validation::validate_phone(&company.tel).unwrap());
    }
}
