//! # Document Assembly
//!
//! Turns a raw document request into the context a quotation, invoice or
//! receipt template is rendered from.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    assemble_document                                    │
//! │                                                                         │
//! │  raw JSON ──► validate_document_standards ──► errors? ──► Rejected      │
//! │                     │ (line_amounts = qty × price per item)             │
//! │                     ▼                                                   │
//! │               DocumentRequest (serde)                                   │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │               compute_totals(lines, policy)                             │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  DocumentContext: number, Thai title, lines, totals,                    │
//! │                   total in Thai words, Buddhist-era issue date          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The id and the fallback issue date come from the caller, so assembly
//! stays a pure function of its inputs.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::date::format_thai_date;
use crate::error::{AssemblyError, CoreError, CoreResult};
use crate::money::Money;
use crate::totals::compute_totals;
use crate::types::{CompanySnapshot, DocumentType, Language, LineItem, TaxPolicy, Totals};
use crate::validation::validate_document_standards;
use crate::words::{decimal_from_value, money_to_words};

// =============================================================================
// Request
// =============================================================================

/// A document generation request as sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentRequest {
    pub document_type: DocumentType,
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_address: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    pub items: Vec<RequestItem>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub language: Language,
    /// Defaults to the date the caller assembles on.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub issue_date: Option<NaiveDate>,
}

/// One requested line; `qty` defaults to 1 and `price` to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RequestItem {
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_qty")]
    #[ts(type = "string | number")]
    pub qty: Decimal,
    #[serde(default)]
    #[ts(type = "string | number")]
    pub price: Decimal,
}

fn default_qty() -> Decimal {
    Decimal::ONE
}

impl From<&RequestItem> for LineItem {
    fn from(item: &RequestItem) -> Self {
        LineItem::new(item.description.clone(), item.qty, item.price)
    }
}

// =============================================================================
// Context
// =============================================================================

/// Customer block of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerInfo {
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
}

/// A printed line with its rounded total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContextLine {
    pub description: String,
    #[ts(type = "string")]
    pub quantity: Decimal,
    #[ts(type = "string")]
    pub unit_price: Decimal,
    #[ts(type = "string")]
    pub line_total: Money,
}

/// Everything a document template needs, already localized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentContext {
    #[ts(as = "String")]
    pub id: Uuid,
    pub document_no: String,
    pub document_type: DocumentType,
    pub title: String,
    pub language: Language,
    pub customer: CustomerInfo,
    pub lines: Vec<ContextLine>,
    pub totals: Totals,
    /// Grand total in Thai words.
    pub amount_in_words: String,
    #[ts(as = "String")]
    pub issue_date: NaiveDate,
    /// `"31 มกราคม 2568 / 31-01-2025"`
    pub issue_date_display: String,
    pub company: CompanySnapshot,
    pub note: Option<String>,
}

/// `INV-1a2b3c4d` style number: type prefix plus the first 8 hex digits of
/// the id.
pub fn document_number(document_type: DocumentType, id: Uuid) -> String {
    let hex = id.simple().to_string();
    format!("{}-{}", document_type.number_prefix(), &hex[..8])
}

// =============================================================================
// Assembly
// =============================================================================

/// Validates a raw request and builds its template context.
///
/// ## Errors
/// - `AssemblyError::Rejected` with every standards violation found
/// - `AssemblyError::Malformed` when the request does not deserialize
/// - `AssemblyError::NoItems` for an empty item list
/// - `AssemblyError::Core` when totals cannot be computed
pub fn assemble_document(
    raw: &Value,
    policy: TaxPolicy,
    company: &CompanySnapshot,
    today: NaiveDate,
    id: Uuid,
) -> Result<DocumentContext, AssemblyError> {
    let fields = raw
        .as_object()
        .ok_or_else(|| AssemblyError::Malformed("request must be a JSON object".to_string()))?;

    let errors = validate_document_standards(&with_line_amounts(fields)?);
    if !errors.is_empty() {
        warn!(errors = errors.len(), "document request rejected");
        return Err(AssemblyError::Rejected(errors));
    }

    let request: DocumentRequest = serde_json::from_value(raw.clone())
        .map_err(|e| AssemblyError::Malformed(e.to_string()))?;
    if request.items.is_empty() {
        return Err(AssemblyError::NoItems);
    }

    let line_items: Vec<LineItem> = request.items.iter().map(LineItem::from).collect();
    let totals = compute_totals(&line_items, policy)?;
    debug!(
        subtotal = %totals.subtotal,
        tax = %totals.tax,
        total = %totals.total,
        inclusive = policy.is_inclusive(),
        "totals computed"
    );

    let lines = line_items
        .into_iter()
        .map(|line| {
            Ok(ContextLine {
                line_total: Money::new(line.line_total()?)?,
                description: line.description,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
        })
        .collect::<Result<Vec<_>, AssemblyError>>()?;

    let issue_date = request.issue_date.unwrap_or(today);
    let document_no = document_number(request.document_type, id);
    info!(%document_no, document_type = %request.document_type, "document assembled");

    Ok(DocumentContext {
        id,
        document_no,
        document_type: request.document_type,
        title: request.document_type.thai_title().to_string(),
        language: request.language,
        customer: CustomerInfo {
            name: request.customer_name,
            email: request.customer_email,
            address: request.customer_address,
            tax_id: request.tax_id,
            phone: request.phone,
        },
        lines,
        amount_in_words: money_to_words(totals.total),
        totals,
        issue_date,
        issue_date_display: format_thai_date(issue_date),
        company: company.clone(),
        note: request.note,
    })
}

/// Sets `line_amounts` to qty × price of each item, replacing any
/// `line_amounts` the request sent.
///
/// A non-numeric qty or price is passed through as-is so the validator
/// can name its type.
fn with_line_amounts(fields: &Map<String, Value>) -> CoreResult<Map<String, Value>> {
    let mut fields = fields.clone();
    let Some(items) = fields.get("items").and_then(Value::as_array) else {
        fields.remove("line_amounts");
        return Ok(fields);
    };

    let amounts = items
        .iter()
        .map(line_amount)
        .collect::<CoreResult<Vec<Value>>>()?;
    fields.insert("line_amounts".to_string(), Value::Array(amounts));
    Ok(fields)
}

fn line_amount(item: &Value) -> CoreResult<Value> {
    let one = Value::from(1);
    let zero = Value::from(0);
    let qty = item.get("qty").unwrap_or(&one);
    let price = item.get("price").unwrap_or(&zero);

    let amount = match (decimal_from_value(qty), decimal_from_value(price)) {
        (Some(q), Some(p)) => q
            .checked_mul(p)
            .ok_or(CoreError::AmountOverflow)?
            .to_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
        (None, _) => qty.clone(),
        (Some(_), None) => price.clone(),
    };
    Ok(amount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    fn id() -> Uuid {
        Uuid::parse_str("1a2b3c4d-0000-4000-8000-000000000000").unwrap()
    }

    fn vat() -> TaxPolicy {
        TaxPolicy::new(Some(dec!(0.07)), false).unwrap()
    }

    fn assemble(raw: Value) -> Result<DocumentContext, AssemblyError> {
        assemble_document(&raw, vat(), &CompanySnapshot::default(), today(), id())
    }

    fn invoice_request() -> Value {
        json!({
            "document_type": "invoice",
            "customer_name": "บริษัท ลูกค้า จำกัด",
            "customer_email": "billing@example.co.th",
            "tax_id": "1234567890120",
            "items": [
                { "description": "ค่าพัฒนาระบบ", "qty": 1, "price": 10000 },
                { "description": "ค่าดูแลรายเดือน", "qty": 12, "price": 5000 }
            ]
        })
    }

    #[test]
    fn test_assemble_invoice() {
        let ctx = assemble(invoice_request()).unwrap();

        assert_eq!(ctx.document_no, "INV-1a2b3c4d");
        assert_eq!(ctx.title, "ใบแจ้งหนี้");
        assert_eq!(ctx.language, Language::Th);
        assert_eq!(ctx.totals.subtotal.amount(), dec!(110000.00));
        assert_eq!(ctx.totals.tax.amount(), dec!(7700.00));
        assert_eq!(ctx.totals.total.amount(), dec!(117700.00));
        assert_eq!(ctx.amount_in_words, "หนึ่งแสนหนึ่งหมื่นเจ็ดพันเจ็ดร้อยบาทถ้วน");
        assert_eq!(ctx.issue_date_display, "31 มกราคม 2568 / 31-01-2025");
        assert_eq!(ctx.lines.len(), 2);
        assert_eq!(ctx.lines[1].line_total.amount(), dec!(60000.00));
        assert_eq!(ctx.customer.tax_id.as_deref(), Some("1234567890120"));
    }

    #[test]
    fn test_explicit_issue_date_wins() {
        let mut raw = invoice_request();
        raw["issue_date"] = json!("2024-12-25");
        let ctx = assemble(raw).unwrap();
        assert_eq!(ctx.issue_date_display, "25 ธันวาคม 2567 / 25-12-2024");
    }

    #[test]
    fn test_document_numbers_by_type() {
        for (kind, number) in [
            ("quotation", "QT-1a2b3c4d"),
            ("invoice", "INV-1a2b3c4d"),
            ("receipt", "REC-1a2b3c4d"),
        ] {
            let mut raw = invoice_request();
            raw["document_type"] = json!(kind);
            assert_eq!(assemble(raw).unwrap().document_no, number);
        }
    }

    #[test]
    fn test_rejects_standards_violations() {
        let raw = json!({
            "document_type": "invoice",
            "customer_name": "John Smith",
            "items": [{ "qty": 1, "price": 0 }, { "qty": "two", "price": 10 }]
        });
        assert_eq!(
            assemble(raw).unwrap_err(),
            AssemblyError::Rejected(vec![
                "customer_name should contain Thai characters".to_string(),
                "Line item 1 amount must be positive".to_string(),
                "Line item 2 amount must be numeric, got string".to_string(),
            ])
        );
    }

    #[test]
    fn test_rejects_missing_fields() {
        let err = assemble(json!({ "items": [] })).unwrap_err();
        let AssemblyError::Rejected(errors) = err else {
            panic!("expected rejection");
        };
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_rejects_unknown_document_type() {
        let mut raw = invoice_request();
        raw["document_type"] = json!("bill");
        assert!(matches!(assemble(raw), Err(AssemblyError::Malformed(_))));
    }

    #[test]
    fn test_rejects_empty_items() {
        let mut raw = invoice_request();
        raw["items"] = json!([]);
        assert_eq!(assemble(raw).unwrap_err(), AssemblyError::NoItems);
    }

    #[test]
    fn test_negative_quantity_is_rejected_before_totals() {
        let mut raw = invoice_request();
        raw["items"] = json!([{ "qty": -1, "price": 100 }]);
        assert_eq!(
            assemble(raw).unwrap_err(),
            AssemblyError::Rejected(vec!["Line item 1 amount must be positive".to_string()])
        );
    }

    #[test]
    fn test_line_amounts_are_always_derived_from_items() {
        let mut raw = invoice_request();
        raw["line_amounts"] = json!([5]);
        raw["items"] = json!([{ "description": "ฟรี", "qty": 0, "price": 0 }]);
        assert_eq!(
            assemble(raw).unwrap_err(),
            AssemblyError::Rejected(vec!["Line item 1 amount must be positive".to_string()])
        );

        // stray line_amounts without items are dropped, not validated
        let mut raw = invoice_request();
        raw["line_amounts"] = json!(["bogus"]);
        raw.as_object_mut().unwrap().remove("items");
        assert!(matches!(assemble(raw), Err(AssemblyError::Malformed(_))));
    }

    #[test]
    fn test_oversized_line_is_an_error() {
        let mut raw = invoice_request();
        raw["items"] = json!([{ "description": "ค่าบริการ", "qty": 1e20, "price": 1e20 }]);
        assert_eq!(
            assemble(raw).unwrap_err(),
            AssemblyError::Core(CoreError::AmountOverflow)
        );
    }

    #[test]
    fn test_negative_price_with_negative_qty_reaches_totals() {
        // the product is positive, so the standards pass; totals refuse it
        let mut raw = invoice_request();
        raw["items"] = json!([{ "qty": -2, "price": -50 }]);
        assert_eq!(
            assemble(raw).unwrap_err(),
            AssemblyError::Core(CoreError::NegativeLineValue {
                index: 1,
                field: "quantity"
            })
        );
    }

    #[test]
    fn test_item_defaults() {
        let mut raw = invoice_request();
        raw["items"] = json!([{ "description": "ค่าจัดส่ง", "price": 250.50 }]);
        let ctx = assemble(raw).unwrap();
        assert_eq!(ctx.lines[0].quantity, Decimal::ONE);
        assert_eq!(ctx.totals.subtotal.amount(), dec!(250.50));
        assert_eq!(ctx.totals.total.amount(), dec!(268.04));
    }

    #[test]
    fn test_non_object_request() {
        assert!(matches!(
            assemble(json!(["invoice"])),
            Err(AssemblyError::Malformed(_))
        ));
    }

    #[test]
    fn test_context_serializes_money_as_strings() {
        let ctx = assemble(invoice_request()).unwrap();
        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["totals"]["total"], json!("117700.00"));
        assert_eq!(value["document_type"], json!("invoice"));
    }
}
