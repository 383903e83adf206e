//! # tributa
//!
//! Tax engine for Brazilian fiscal invoice documents (NF-e / NFC-e):
//! per-item ICMS, PIS/COFINS, IPI and IBS/CBS/IS breakdowns under Simples
//! Nacional, Lucro Presumido, Lucro Real, Substituição Tributária and the
//! 2026 reform-preparation regime, plus the CPF/CNPJ/NCM/CFOP/GTIN
//! validators and legal disclosure text those documents need.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! The crate performs no I/O: XML, signing and SEFAZ transmission belong to
//! the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use tributa::Uf;
//! use tributa::tributos::{DocumentBuilder, LineItemBuilder, TaxRegime};
//!
//! let document = DocumentBuilder::new(
//!     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
//!     TaxRegime::LucroPresumido { uf: Uf::SP },
//! )
//! .add_item(
//!     LineItemBuilder::new("P-001", "Refrigerante lata 350ml", dec!(200), dec!(5))
//!         .ncm("2202.10.00")
//!         .cfop("5102")
//!         .gtin("7891000315507"),
//! )
//! .build()
//! .unwrap();
//!
//! assert_eq!(document.totals.products, dec!(1000.00));
//! assert_eq!(document.totals.taxes, dec!(216.50));
//! assert!(tributa::validate_cnpj("11.222.333/0001-81").valid);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Validators, formatters, regime calculator, builders, legal text |
//! | `config` | `TaxRegime::from_json` for regime configuration files |
//! | `lookup` | `LookupCoordinator` (debounce, dedupe, latest-wins) on tokio |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod tributos;

#[cfg(feature = "core")]
pub mod legal;

#[cfg(feature = "core")]
pub mod lookup;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
