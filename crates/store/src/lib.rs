//! `billcraft-store` — durable invoice collection.
//!
//! The store owns CRUD access to the invoice collection and persists it as
//! one serialized blob through an injected key-value [`Substrate`]. It is
//! single-writer, synchronous, and deliberately forgiving on reads: a
//! corrupt or missing blob is an empty collection, not an error.

pub mod store;
pub mod substrate;

pub use store::{InvoiceStore, StoreError, STORAGE_KEY};
pub use substrate::{FileSubstrate, MemorySubstrate, Substrate, SubstrateError};
