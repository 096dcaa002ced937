//! # Error Types
//!
//! Domain-specific error types for billy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError            - wrong argument shape (type-kind) and the        │
//! │  │                      fail-fast failures of words/dates/totals        │
//! │  └── ValidationError  - semantically invalid field values (value-kind)  │
//! │                                                                         │
//! │  AssemblyError        - document assembly (see `document`)              │
//! │                                                                         │
//! │  Single-field validators RAISE these.                                   │
//! │  validate_document_standards ACCUMULATES them as strings.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Messages are the exact strings shown to the end user
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the leaf computations and the single-field validators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A value that must be a number was something else.
    #[error("{field} must be numeric")]
    NotNumeric { field: String },

    /// A value that must be a string was something else.
    #[error("{field} must be string type")]
    NotAString { field: String },

    /// A value that must be a calendar date was something else.
    ///
    /// Raised for non-string JSON values as well as for strings that are
    /// not a real `YYYY-MM-DD` date (e.g. `2025-02-30`).
    #[error("{field} must be a date")]
    NotADate { field: String },

    /// A value that must be a list was something else.
    #[error("{field} must be a list")]
    NotAList { field: String },

    /// Amount passed to the words converter is below zero.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// A document line carries a negative quantity or unit price.
    #[error("Line item {index} {field} cannot be negative")]
    NegativeLineValue { index: usize, field: &'static str },

    /// Tax rate below zero.
    #[error("Tax rate cannot be negative")]
    NegativeTaxRate,

    /// A line total, the subtotal or the tax exceeds the decimal range.
    #[error("Amount is too large")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for failures caused by the wrong argument shape rather than
    /// a bad value of the right shape.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            CoreError::NotNumeric { .. }
                | CoreError::NotAString { .. }
                | CoreError::NotADate { .. }
                | CoreError::NotAList { .. }
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation failures for Thai business data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is empty or whitespace only.
    #[error("{field} cannot be empty")]
    Empty { field: String },

    /// Field value is too long.
    #[error("{field} too long (max {max} characters)")]
    TooLong { field: String, max: usize },

    /// Tax ID is not 13 ASCII digits.
    #[error("Tax ID must be exactly 13 digits")]
    TaxIdFormat,

    /// Tax ID check digit does not match.
    #[error("Invalid tax ID checksum")]
    TaxIdChecksum,

    /// Phone number matches none of the accepted shapes.
    #[error("Invalid Thai phone number format")]
    PhoneFormat,

    /// Business name contains none of the known business terms.
    #[error("Business name should contain Thai business terminology")]
    MissingBusinessTerm,

    /// Less than 30% of the text is Thai script.
    #[error("{field} should contain Thai characters")]
    NotThaiText { field: String },

    /// Required document field absent or empty.
    #[error("Required field '{field}' is missing")]
    MissingField { field: String },

    /// A line amount is not a number.
    #[error("Line item {index} amount must be numeric, got {kind}")]
    LineAmountNotNumeric { index: usize, kind: &'static str },

    /// A line amount is zero or negative.
    #[error("Line item {index} amount must be positive")]
    LineAmountNotPositive { index: usize },
}

// =============================================================================
// Assembly Error
// =============================================================================

/// Failures of the document assembly flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// The request broke one or more Thai document standards.
    #[error("Validation errors: {}", .0.join("; "))]
    Rejected(Vec<String>),

    /// The request does not have the expected shape.
    #[error("Invalid document request: {0}")]
    Malformed(String),

    /// The request has no line items.
    #[error("At least one item is required")]
    NoItems,

    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
