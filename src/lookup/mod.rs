//! Contract for registry lookups triggered from form fields.
//!
//! The crate performs no network I/O. Callers inject a [`LookupService`]
//! (CNPJ registry, CEP service) and, with the `lookup` feature, drive it
//! through a `LookupCoordinator` that validates keys, deduplicates resolved
//! keys, debounces typing and discards responses that arrive after a newer
//! request was issued.

#[cfg(feature = "lookup")]
mod coordinator;
mod sequence;

#[cfg(feature = "lookup")]
pub use coordinator::LookupCoordinator;
pub use sequence::{RequestSequence, Ticket};

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ValidationResult, validate_cep, validate_cnpj};

/// Registry data for a company, keyed by CNPJ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub cnpj: String,
    /// Razão social.
    pub legal_name: String,
    /// Nome fantasia.
    pub trade_name: Option<String>,
    /// Registration status, e.g. "ATIVA".
    pub status: String,
    pub address: Option<AddressRecord>,
}

/// Postal address data, keyed by CEP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub cep: String,
    pub street: String,
    pub district: String,
    pub city: String,
    pub uf: String,
    /// 7-digit IBGE municipality code.
    pub ibge_code: Option<String>,
}

/// Failure reported by a lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LookupError {
    #[error("no record found for '{0}'")]
    NotFound(String),

    #[error("lookup service unavailable: {0}")]
    Unavailable(String),

    #[error("lookup timed out")]
    Timeout,
}

/// An external registry the form layer can query.
pub trait LookupService: Send + Sync {
    type Record: Clone + Send + Sync;

    /// Fetch the record for a key that has already been validated and
    /// reduced to digits.
    fn fetch(&self, key: &str) -> impl Future<Output = Result<Self::Record, LookupError>> + Send;
}

/// Which identifier a coordinator looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupKind {
    Cnpj,
    Cep,
}

impl LookupKind {
    /// Keys that fail this check never reach the service.
    pub fn validate(self, raw: &str) -> ValidationResult {
        match self {
            LookupKind::Cnpj => validate_cnpj(raw),
            LookupKind::Cep => validate_cep(raw),
        }
    }
}

/// What the form layer should do with a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<R> {
    /// Fresh response for the latest request.
    Resolved(R),
    /// Key already resolved in this session; the service was not called.
    Cached(R),
    /// A newer request was issued; ignore this one.
    Superseded,
    /// The key is invalid; the message is the validator's.
    Rejected(String),
    /// The service failed; let the user fill the fields by hand.
    ManualEntry(LookupError),
}

impl<R> LookupOutcome<R> {
    /// The record, if this outcome carries one.
    pub fn record(&self) -> Option<&R> {
        match self {
            LookupOutcome::Resolved(r) | LookupOutcome::Cached(r) => Some(r),
            _ => None,
        }
    }
}
