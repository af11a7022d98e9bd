//! Totals engine.
//!
//! Pure derivation of the financial summary from an invoice. No rounding is
//! applied here; display and export round to 2 decimals at the edge, so
//! repeated calls compose without drift.

use serde::Serialize;

use crate::invoice::Invoice;

/// Derived financial summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub shipping_fee: f64,
    pub total: f64,
}

/// Compute the totals for an invoice.
///
/// Tax and discount are both taken from the pre-tax, pre-discount subtotal
/// (not compounded). Negative rates or quantities propagate arithmetically;
/// validation is the caller's concern.
pub fn compute_totals(invoice: &Invoice) -> Totals {
    let subtotal: f64 = invoice.items.iter().map(|item| item.amount).sum();
    let tax_amount = subtotal * invoice.tax_rate / 100.0;
    let discount_amount = subtotal * invoice.discount_rate / 100.0;
    let shipping_fee = invoice.shipping_fee;

    Totals {
        subtotal,
        tax_amount,
        discount_amount,
        shipping_fee,
        total: subtotal + tax_amount - discount_amount + shipping_fee,
    }
}
