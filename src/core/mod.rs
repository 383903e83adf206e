//! Core fiscal types, field validators and formatting helpers.
//!
//! Every validator here is pure and returns a [`ValidationResult`] instead of
//! failing, so the form layer can call them on each keystroke or blur.

mod codes;
mod documents;
mod error;
pub mod format;
mod states;
mod types;
mod validation;

pub use codes::*;
pub use documents::*;
pub use error::*;
pub use format::{
    format_brl, format_cep, format_cfop, format_cnpj, format_cpf, format_cpf_cnpj, format_gtin,
    format_ncm, strip_formatting,
};
pub use states::Uf;
pub use types::*;
pub use validation::*;
