//! `billcraft-invoicing` — invoice domain model.
//!
//! This crate contains the invoice record types, the totals engine, the
//! currency table, and the numbering helpers, implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod currency;
pub mod invoice;
pub mod numbering;
pub mod totals;

pub use currency::{default_payment_methods, symbol_for, CurrencyInfo, CURRENCIES};
pub use invoice::{Invoice, InvoiceId, InvoiceItem, PaymentDetails};
pub use numbering::{next_number, NUMBER_PREFIX};
pub use totals::{compute_totals, Totals};
