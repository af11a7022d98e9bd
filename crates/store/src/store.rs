//! Invoice collection store.
//!
//! Upsert/delete/list over one serialized blob. Every mutation is a
//! read-modify-write of the whole collection; with concurrent writers
//! sharing a substrate the last writer wins, which is accepted for the
//! single-user, single-device target.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use billcraft_invoicing::{numbering, Invoice, InvoiceId};

use crate::substrate::{Substrate, SubstrateError};

/// Fixed namespace key for the serialized collection.
pub const STORAGE_KEY: &str = "invoices";

const SCHEMA_VERSION: u32 = 1;

/// Persisted envelope. Version 0 (the bare array without an envelope) is
/// still accepted on read and upgraded on the next write.
#[derive(Debug, Deserialize)]
struct Collection {
    #[allow(dead_code)]
    schema: u32,
    invoices: Vec<Invoice>,
}

#[derive(Debug, Serialize)]
struct CollectionRef<'a> {
    schema: u32,
    invoices: &'a [Invoice],
}

/// Store failure, named after the operation that could not persist.
///
/// Reads never produce these: lookup misses are `None` and corrupt data is
/// recovered as an empty collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to save invoice")]
    Save(#[source] SubstrateError),

    #[error("failed to delete invoice")]
    Delete(#[source] SubstrateError),

    #[error("failed to clear invoices")]
    Clear(#[source] SubstrateError),
}

/// Durable invoice collection over an injected substrate.
///
/// Single-writer, synchronous. Most-recently-saved records come first in
/// [`InvoiceStore::list_all`].
#[derive(Debug)]
pub struct InvoiceStore<S: Substrate> {
    substrate: S,
    key: String,
}

impl<S: Substrate> InvoiceStore<S> {
    pub fn new(substrate: S) -> Self {
        Self::with_key(substrate, STORAGE_KEY)
    }

    /// Store under a custom key (test isolation, side-by-side collections).
    pub fn with_key(substrate: S, key: impl Into<String>) -> Self {
        Self {
            substrate,
            key: key.into(),
        }
    }

    pub fn substrate(&self) -> &S {
        &self.substrate
    }

    /// All invoices, most-recently-saved first.
    ///
    /// Fails soft: a missing, unreadable, or corrupt blob yields an empty
    /// collection. The data is a local copy, not a system of record.
    pub fn list_all(&self) -> Vec<Invoice> {
        self.load()
    }

    /// Upsert by id.
    ///
    /// Drafts are assigned a fresh id and `created_at`; records with a known
    /// id are replaced in place with `updated_at` refreshed and the original
    /// `created_at` preserved; unknown ids are prepended as new records.
    pub fn save(&mut self, invoice: Invoice) -> Result<Invoice, StoreError> {
        let mut invoices = self.load();
        let now = Utc::now();

        let mut record = invoice;
        if record.id.is_draft() {
            record.id = InvoiceId::fresh();
        }

        if let Some(existing) = invoices.iter_mut().find(|inv| inv.id == record.id) {
            record.created_at = existing.created_at;
            record.updated_at = Some(now);
            *existing = record.clone();
        } else {
            record.created_at = Some(now);
            record.updated_at = Some(now);
            invoices.insert(0, record.clone());
        }

        self.persist(&invoices).map_err(StoreError::Save)?;
        tracing::debug!(id = %record.id, number = %record.invoice_number, "invoice saved");
        Ok(record)
    }

    /// Linear lookup by exact id. A miss is `None`, not an error.
    pub fn get_by_id(&self, id: &InvoiceId) -> Option<Invoice> {
        self.load().into_iter().find(|inv| &inv.id == id)
    }

    /// Remove a record if present; absent ids are a no-op.
    pub fn delete_by_id(&mut self, id: &InvoiceId) -> Result<(), StoreError> {
        let mut invoices = self.load();
        invoices.retain(|inv| &inv.id != id);
        self.persist(&invoices).map_err(StoreError::Delete)
    }

    /// Drop the whole collection from the substrate.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.substrate.remove(&self.key).map_err(StoreError::Clear)
    }

    /// Next number in the `INV-` sequence over the stored invoices.
    ///
    /// Advisory only; see [`billcraft_invoicing::numbering`].
    pub fn next_invoice_number(&self) -> String {
        let invoices = self.load();
        numbering::next_number(invoices.iter().map(|inv| inv.invoice_number.as_str()))
    }

    fn load(&self) -> Vec<Invoice> {
        let blob = match self.substrate.read(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "substrate read failed; treating collection as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Collection>(&blob) {
            Ok(collection) => collection.invoices,
            // Version 0: bare array, no envelope.
            Err(_) => match serde_json::from_str::<Vec<Invoice>>(&blob) {
                Ok(invoices) => {
                    tracing::debug!(key = %self.key, "read version-0 invoice collection");
                    invoices
                }
                Err(err) => {
                    tracing::warn!(key = %self.key, error = %err, "corrupt invoice collection; treating as empty");
                    Vec::new()
                }
            },
        }
    }

    fn persist(&mut self, invoices: &[Invoice]) -> Result<(), SubstrateError> {
        let blob = serde_json::to_string(&CollectionRef {
            schema: SCHEMA_VERSION,
            invoices,
        })
        .map_err(|err| SubstrateError::Backend(err.to_string()))?;
        self.substrate.write(&self.key, &blob)
    }
}
