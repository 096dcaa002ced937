//! # Totals
//!
//! Subtotal, VAT and grand total for a document.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = round( Σ quantity × unit_price )        exact sum, 1 round  │
//! │                                                                         │
//! │  no rate / rate 0:  tax   = 0.00                                        │
//! │                     total = subtotal                                    │
//! │                                                                         │
//! │  exclusive:         tax   = round(subtotal × rate)                      │
//! │                     total = round(subtotal + tax)                       │
//! │                                                                         │
//! │  inclusive:         tax   = round(subtotal − subtotal / (1 + rate))     │
//! │                     total = subtotal                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `round` is [`round_money`](crate::money::round_money): two places, ties
//! to even.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, TaxPolicy, Totals};

/// Computes document totals.
///
/// ## Errors
/// - `CoreError::NegativeLineValue` for a negative quantity or unit price
///   (lines are numbered from 1)
/// - `CoreError::NegativeTaxRate` for a negative rate
/// - `CoreError::AmountOverflow` when a line total, the subtotal or the
///   tax leaves the decimal range
///
/// ## Example
/// ```rust
/// use billy_core::totals::compute_totals;
/// use billy_core::types::{LineItem, TaxPolicy};
/// use rust_decimal::Decimal;
///
/// let lines = [LineItem::new("ค่าที่ปรึกษา", Decimal::ONE, Decimal::from(30000))];
/// let policy = TaxPolicy::new(Some(Decimal::new(7, 2)), false).unwrap();
///
/// let totals = compute_totals(&lines, policy).unwrap();
/// assert_eq!(totals.tax.amount().to_string(), "2100.00");
/// assert_eq!(totals.total.amount().to_string(), "32100.00");
/// ```
pub fn compute_totals(lines: &[LineItem], policy: TaxPolicy) -> CoreResult<Totals> {
    if matches!(policy.rate, Some(r) if r < Decimal::ZERO) {
        return Err(CoreError::NegativeTaxRate);
    }

    let mut exact_subtotal = Decimal::ZERO;
    for (i, line) in lines.iter().enumerate() {
        let index = i + 1;
        if line.quantity < Decimal::ZERO {
            return Err(CoreError::NegativeLineValue {
                index,
                field: "quantity",
            });
        }
        if line.unit_price < Decimal::ZERO {
            return Err(CoreError::NegativeLineValue {
                index,
                field: "unit price",
            });
        }
        exact_subtotal = exact_subtotal
            .checked_add(line.line_total()?)
            .ok_or(CoreError::AmountOverflow)?;
    }

    let subtotal = Money::new(exact_subtotal)?;

    let Some(rate) = policy.effective_rate() else {
        return Ok(Totals::new(subtotal, Money::zero(), subtotal));
    };

    let totals = if policy.is_inclusive() {
        let gross = subtotal.amount();
        let net = Decimal::ONE
            .checked_add(rate)
            .and_then(|divisor| gross.checked_div(divisor))
            .ok_or(CoreError::AmountOverflow)?;
        let tax = Money::new(gross - net)?;
        Totals::new(subtotal, tax, subtotal)
    } else {
        let tax = subtotal
            .amount()
            .checked_mul(rate)
            .ok_or(CoreError::AmountOverflow)?;
        let tax = Money::new(tax)?;
        let total = subtotal
            .checked_add(tax)
            .ok_or(CoreError::AmountOverflow)?;
        Totals::new(subtotal, tax, total)
    };

    Ok(totals)
}

// =============================================================================
// Unit Tests
// =============================================================================
