use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency;

/// Invoice identifier.
///
/// Opaque string; the empty string marks an unsaved draft. The store assigns
/// a fresh id on first save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
    /// Draft marker (empty id).
    pub fn draft() -> Self {
        Self(String::new())
    }

    /// Generate a fresh identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing ids explicitly in tests
    /// for determinism.
    pub fn fresh() -> Self {
        Self(format!("inv-{}", Uuid::now_v7().simple()))
    }

    pub fn is_draft(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for InvoiceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for InvoiceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One billable row.
///
/// Invariant: `amount == quantity * rate` at rest. The mutators below keep
/// it; code that pokes the fields directly owns the recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: String,
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    /// Derived, never edited independently.
    pub amount: f64,
}

impl InvoiceItem {
    pub fn new(description: impl Into<String>, quantity: f64, rate: f64) -> Self {
        Self {
            id: Uuid::now_v7().simple().to_string(),
            description: description.into(),
            quantity,
            rate,
            amount: quantity * rate,
        }
    }

    /// Blank row as the form presents it: one unit at rate zero.
    pub fn empty() -> Self {
        Self::new("", 1.0, 0.0)
    }

    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
        self.amount = self.quantity * self.rate;
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
        self.amount = self.quantity * self.rate;
    }
}

/// Sparse payment details, keyed by method-specific fields.
///
/// Only fields of the currently selected payment methods are expected to be
/// populated; deselecting a method removes its fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bkash_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nagad_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<String>,
}

impl PaymentDetails {
    /// Drop the fields belonging to a deselected payment method.
    ///
    /// Unknown methods (and "Cash", which carries no fields) are a no-op.
    pub fn clear_for_method(&mut self, method: &str) {
        match method {
            "Bank Transfer" => {
                self.bank_name = None;
                self.account_number = None;
                self.routing_number = None;
            }
            "PayPal" => self.paypal_email = None,
            "UPI" => self.upi_id = None,
            "bKash" => self.bkash_number = None,
            "Nagad" => self.nagad_number = None,
            "Payment Link" => self.payment_link = None,
            _ => {}
        }
    }
}

/// Invoice record (aggregate root).
///
/// Serialized camelCase; this is the shape persisted by the store. Field
/// order and item order are display-significant and preserved as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub from_company: String,
    pub from_address: String,
    pub from_email: String,
    /// Embedded image payload (data URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_logo: Option<String>,
    pub to_company: String,
    pub to_address: String,
    pub to_email: String,
    pub items: Vec<InvoiceItem>,
    /// Percentage of subtotal, 0-100.
    pub tax_rate: f64,
    /// Percentage of subtotal, 0-100.
    pub discount_rate: f64,
    /// Flat monetary addend.
    #[serde(default)]
    pub shipping_fee: f64,
    pub notes: String,
    /// Selected method names; order is display-significant.
    pub payment_methods: Vec<String>,
    #[serde(default)]
    pub payment_details: PaymentDetails,
    pub currency: String,
    /// Authoritative currency identity.
    pub currency_code: String,
    /// Display cache; `set_currency` keeps it consistent with the code.
    pub currency_symbol: String,
    /// Assigned by the store at first save; never user-edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Invoice {
    /// New unsaved draft: today's issue date, net-30 due date, one blank
    /// line item, USD with its default payment methods.
    pub fn draft(invoice_number: impl Into<String>) -> Self {
        let today = Utc::now().date_naive();
        let code = "USD";
        Self {
            id: InvoiceId::draft(),
            invoice_number: invoice_number.into(),
            issue_date: today,
            due_date: today.checked_add_days(Days::new(30)).unwrap_or(today),
            from_company: String::new(),
            from_address: String::new(),
            from_email: String::new(),
            from_logo: None,
            to_company: String::new(),
            to_address: String::new(),
            to_email: String::new(),
            items: vec![InvoiceItem::empty()],
            tax_rate: 0.0,
            discount_rate: 0.0,
            shipping_fee: 0.0,
            notes: String::new(),
            payment_methods: currency::default_payment_methods(code)
                .iter()
                .map(|m| m.to_string())
                .collect(),
            payment_details: PaymentDetails::default(),
            currency: code.to_string(),
            currency_code: code.to_string(),
            currency_symbol: currency::symbol_for(code).unwrap_or("$").to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Switch currency, keeping code, denormalized name, and symbol in
    /// lockstep. Unknown codes are ignored.
    pub fn set_currency(&mut self, code: &str) {
        if let Some(symbol) = currency::symbol_for(code) {
            self.currency = code.to_string();
            self.currency_code = code.to_string();
            self.currency_symbol = symbol.to_string();
        }
    }

    /// Add a payment method (idempotent, order of first selection kept).
    pub fn select_payment_method(&mut self, method: &str) {
        if !self.payment_methods.iter().any(|m| m == method) {
            self.payment_methods.push(method.to_string());
        }
    }

    /// Remove a payment method and its detail fields.
    pub fn deselect_payment_method(&mut self, method: &str) {
        self.payment_methods.retain(|m| m != method);
        self.payment_details.clear_for_method(method);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_amount_tracks_quantity_and_rate() {
        let mut item = InvoiceItem::new("design work", 2.0, 50.0);
        assert_eq!(item.amount, 100.0);

        item.set_quantity(3.0);
        assert_eq!(item.amount, 150.0);

        item.set_rate(10.0);
        assert_eq!(item.amount, 30.0);
    }

    #[test]
    fn empty_item_is_one_unit_at_zero() {
        let item = InvoiceItem::empty();
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.rate, 0.0);
        assert_eq!(item.amount, 0.0);
        assert!(!item.id.is_empty());
    }

    #[test]
    fn draft_has_empty_id_and_one_item() {
        let invoice = Invoice::draft("INV-001");
        assert!(invoice.id.is_draft());
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.currency_code, "USD");
        assert_eq!(invoice.currency_symbol, "$");
        assert!(invoice.created_at.is_none());
        assert_eq!(invoice.due_date, invoice.issue_date + Days::new(30));
    }

    #[test]
    fn set_currency_keeps_symbol_consistent() {
        let mut invoice = Invoice::draft("INV-001");
        invoice.set_currency("INR");
        assert_eq!(invoice.currency_code, "INR");
        assert_eq!(invoice.currency, "INR");
        assert_eq!(
            Some(invoice.currency_symbol.as_str()),
            currency::symbol_for(&invoice.currency_code)
        );

        // Unknown code leaves everything untouched.
        invoice.set_currency("XXX");
        assert_eq!(invoice.currency_code, "INR");
        assert_eq!(invoice.currency_symbol, "₹");
    }

    #[test]
    fn deselecting_method_clears_its_details() {
        let mut invoice = Invoice::draft("INV-001");
        invoice.select_payment_method("UPI");
        invoice.payment_details.upi_id = Some("dev@upi".to_string());
        invoice.payment_details.paypal_email = Some("dev@example.com".to_string());

        invoice.deselect_payment_method("UPI");
        assert!(!invoice.payment_methods.iter().any(|m| m == "UPI"));
        assert_eq!(invoice.payment_details.upi_id, None);
        // Other methods' fields survive.
        assert!(invoice.payment_details.paypal_email.is_some());
    }

    #[test]
    fn select_payment_method_is_idempotent() {
        let mut invoice = Invoice::draft("INV-001");
        let before = invoice.payment_methods.len();
        invoice.select_payment_method("Cash");
        invoice.select_payment_method("Cash");
        assert_eq!(invoice.payment_methods.len(), before + 1);
    }

    #[test]
    fn serializes_camel_case() {
        let invoice = Invoice::draft("INV-042");
        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["invoiceNumber"], "INV-042");
        assert!(json.get("issueDate").is_some());
        assert!(json.get("paymentMethods").is_some());
        assert!(json.get("currencyCode").is_some());
        // Draft timestamps and absent logo are omitted, not null.
        assert!(json.get("createdAt").is_none());
        assert!(json.get("fromLogo").is_none());
    }

    #[test]
    fn deserializes_without_optional_fields() {
        // shippingFee/paymentDetails/timestamps absent, as in early records.
        let json = r#"{
            "id": "inv-1",
            "invoiceNumber": "INV-001",
            "issueDate": "2025-01-15",
            "dueDate": "2025-02-14",
            "fromCompany": "Acme",
            "fromAddress": "",
            "fromEmail": "",
            "toCompany": "Client",
            "toAddress": "",
            "toEmail": "",
            "items": [],
            "taxRate": 0,
            "discountRate": 0,
            "notes": "",
            "paymentMethods": [],
            "currency": "USD",
            "currencyCode": "USD",
            "currencySymbol": "$"
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.shipping_fee, 0.0);
        assert_eq!(invoice.payment_details, PaymentDetails::default());
        assert!(invoice.created_at.is_none());
    }
}
