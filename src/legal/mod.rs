//! Mandatory disclosure text for the document's additional-information
//! field (infCpl).
//!
//! ```
//! use tributa::Uf;
//! use tributa::legal::{REFORM_READINESS_NOTICE, legal_observations};
//! use tributa::tributos::TaxRegime;
//!
//! let lines = legal_observations(&TaxRegime::LucroPresumido { uf: Uf::SP });
//! assert_eq!(lines[0], "Empresa optante pelo Lucro Presumido.");
//! assert!(lines.ends_with(&REFORM_READINESS_NOTICE.map(String::from)));
//! ```

mod observations;
mod transparency;

pub use observations::{REFORM_READINESS_NOTICE, legal_observations, legal_observations_on};
pub use transparency::transparency_notice;
