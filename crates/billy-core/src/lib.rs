//! # billy-core: Thai Business Document Engine
//!
//! This crate computes and localizes everything that must appear,
//! byte-correct, on a Thai quotation, invoice or receipt. It contains pure
//! functions only, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Document Generation Flow                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Request handling (HTTP / CLI)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw JSON request                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ billy-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   words   │  │   date    │  │validation │  │  totals   │  │   │
//! │  │   │ 100 →     │  │ พ.ศ. year │  │ tax ID    │  │ subtotal  │  │   │
//! │  │   │ หนึ่งร้อย... │  │ Thai month│  │ phone     │  │ VAT 7%    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                  document: assembles the template context       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RENDERING • NO STORAGE • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ DocumentContext                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          HTML templates → PDF → storage (external)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`words`] - Baht amounts in Thai words
//! - [`date`] - Buddhist-era date formatting
//! - [`validation`] - Tax ID, phone, business name, Thai text, whole documents
//! - [`totals`] - Subtotal / tax / total, tax-inclusive or exclusive
//! - [`money`] - Non-negative Baht amounts quantized to Satang
//! - [`types`] - Domain types (DocumentType, TaxPolicy, LineItem, Totals)
//! - [`document`] - Request → template context
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, safe on any thread
//! 2. **No I/O**: rendering, storage and network access live elsewhere
//! 3. **Decimal Money**: no floating point in any amount
//! 4. **Explicit Errors**: single-field checks fail fast with typed errors;
//!    document checks collect every problem
//!
//! ## Example Usage
//!
//! ```rust
//! use billy_core::{compute_totals, amount_to_words, LineItem, TaxPolicy};
//! use rust_decimal::Decimal;
//!
//! let lines = [LineItem::new("ค่าบริการ", Decimal::ONE, Decimal::from(75000))];
//! let policy = TaxPolicy::new(Some(Decimal::new(7, 2)), false).unwrap();
//!
//! let totals = compute_totals(&lines, policy).unwrap();
//! assert_eq!(totals.total.amount().to_string(), "80250.00");
//! assert_eq!(
//!     amount_to_words(totals.total.amount()).unwrap(),
//!     "แปดหมื่นสองร้อยห้าสิบบาทถ้วน"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod date;
pub mod document;
pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;
pub mod words;

use rust_decimal::Decimal;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use date::{format_thai_date, format_thai_date_value};
pub use document::{assemble_document, DocumentContext, DocumentRequest};
pub use error::{AssemblyError, CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use totals::compute_totals;
pub use types::*;
pub use validation::{
    business_term, validate_business_name, validate_business_name_value,
    validate_document_standards, validate_phone, validate_phone_value, validate_tax_id,
    validate_tax_id_value, validate_thai_text, validate_thai_text_value,
};
pub use words::{amount_to_words, amount_to_words_value};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// ISO 4217 code of the only currency documents are issued in.
pub const THAI_BAHT_CURRENCY: &str = "THB";

/// Standard Thai VAT rate, 7%.
pub const DEFAULT_VAT_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

// =============================================================================
// Unit Tests
// =============================================================================
