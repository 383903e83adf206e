//! Postal, product classification, operation and barcode code validation.

use serde::{Deserialize, Serialize};

use super::error::ValidationResult;
use super::format::digits_only;
use super::types::Requirement;

/// NF-e marker for items without a barcode.
pub const SEM_GTIN: &str = "SEM GTIN";

/// GTIN-8, GTIN-12 (UPC-A), GTIN-13 (EAN-13) and GTIN-14.
const GTIN_LENGTHS: [usize; 4] = [8, 12, 13, 14];

/// Tobacco chapter, subject to Imposto Seletivo.
pub const NCM_TOBACCO_PREFIX: &str = "24";

/// Strip the separators users typically type (`.`, `-`, spaces) but keep
/// anything else, so stray letters still fail the digit check.
fn strip_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '.' | '-' | ' ' | '/'))
        .collect()
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a CEP (postal code): exactly 8 digits.
pub fn validate_cep(raw: &str) -> ValidationResult {
    let cleaned = strip_separators(raw.trim());
    if cleaned.is_empty() {
        return ValidationResult::invalid("CEP é obrigatório");
    }
    if cleaned.len() != 8 || !is_all_digits(&cleaned) {
        return ValidationResult::invalid("CEP deve conter 8 dígitos numéricos");
    }
    ValidationResult::ok()
}

/// Validate an NCM code: 8 digits, chapter 01..=97.
pub fn validate_ncm(raw: &str) -> ValidationResult {
    let cleaned = strip_separators(raw.trim());
    if cleaned.is_empty() {
        return ValidationResult::invalid("NCM é obrigatório");
    }
    if cleaned.len() != 8 || !is_all_digits(&cleaned) {
        return ValidationResult::invalid("NCM deve conter 8 dígitos numéricos");
    }

    let chapter: u8 = cleaned[..2].parse().unwrap_or(0);
    if !(1..=97).contains(&chapter) {
        return ValidationResult::invalid(format!(
            "NCM com capítulo {} inexistente (válidos: 01 a 97)",
            &cleaned[..2]
        ));
    }
    ValidationResult::ok()
}

/// Whether goods enter or leave the issuer's establishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flow {
    Entrada,
    Saida,
}

/// Geographic scope of the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Within the same state.
    Estadual,
    /// Between states.
    Interestadual,
    /// Import or export.
    Exterior,
}

/// Operation direction encoded by the first CFOP digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfopDirection {
    pub flow: Flow,
    pub scope: Scope,
}

impl CfopDirection {
    /// Decode the leading digit. Only 1, 2, 3, 5, 6 and 7 are assigned.
    pub fn from_leading_digit(digit: u8) -> Option<Self> {
        let (flow, scope) = match digit {
            1 => (Flow::Entrada, Scope::Estadual),
            2 => (Flow::Entrada, Scope::Interestadual),
            3 => (Flow::Entrada, Scope::Exterior),
            5 => (Flow::Saida, Scope::Estadual),
            6 => (Flow::Saida, Scope::Interestadual),
            7 => (Flow::Saida, Scope::Exterior),
            _ => return None,
        };
        Some(Self { flow, scope })
    }

    /// pt-BR description shown to the user.
    pub fn description(self) -> &'static str {
        match (self.flow, self.scope) {
            (Flow::Entrada, Scope::Estadual) => "Entrada — Compra dentro do estado",
            (Flow::Entrada, Scope::Interestadual) => "Entrada — Compra de outros estados",
            (Flow::Entrada, Scope::Exterior) => "Entrada — Importação",
            (Flow::Saida, Scope::Estadual) => "Saída — Venda dentro do estado",
            (Flow::Saida, Scope::Interestadual) => "Saída — Venda para outros estados",
            (Flow::Saida, Scope::Exterior) => "Saída — Exportação",
        }
    }
}

/// Decode the direction of a CFOP without validating the rest of it.
pub fn cfop_direction(raw: &str) -> Option<CfopDirection> {
    let cleaned = strip_separators(raw.trim());
    let first = cleaned.bytes().next()?;
    if !first.is_ascii_digit() {
        return None;
    }
    CfopDirection::from_leading_digit(first - b'0')
}

/// Validate a CFOP: 4 digits with an assigned leading digit.
///
/// A valid result carries the operation direction as its `warning`.
pub fn validate_cfop(raw: &str) -> ValidationResult {
    let cleaned = strip_separators(raw.trim());
    if cleaned.is_empty() {
        return ValidationResult::invalid("CFOP é obrigatório");
    }
    if cleaned.len() != 4 || !is_all_digits(&cleaned) {
        return ValidationResult::invalid("CFOP deve conter 4 dígitos numéricos");
    }

    match cfop_direction(&cleaned) {
        Some(direction) => ValidationResult::ok().with_warning(direction.description()),
        None => ValidationResult::invalid(format!(
            "CFOP iniciado por {} é inválido (use 1, 2, 3, 5, 6 ou 7)",
            &cleaned[..1]
        )),
    }
}

/// Compute the GS1 check digit for a GTIN body (every digit except the last).
///
/// Weights alternate 3, 1, 3, ... starting from the rightmost body digit.
pub fn gtin_check_digit(body: &str) -> Option<u8> {
    if !is_all_digits(body) {
        return None;
    }
    let sum: u32 = body
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 0 { d * 3 } else { d }
        })
        .sum();
    Some(((10 - sum % 10) % 10) as u8)
}

/// Validate a GTIN barcode.
///
/// Empty input is an error when `requirement` is [`Requirement::Required`]
/// and accepted otherwise. The literal [`SEM_GTIN`] is accepted with a
/// warning, since NF-e uses it for items that have no barcode.
pub fn validate_gtin(raw: &str, requirement: Requirement) -> ValidationResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return if requirement.is_required() {
            ValidationResult::invalid("GTIN é obrigatório")
        } else {
            ValidationResult::ok()
        };
    }

    if trimmed.eq_ignore_ascii_case(SEM_GTIN) {
        return ValidationResult::ok().with_warning("Item informado sem código de barras (SEM GTIN)");
    }

    let cleaned = strip_separators(trimmed);
    if !is_all_digits(&cleaned) {
        return ValidationResult::invalid("GTIN deve conter apenas dígitos");
    }
    if !GTIN_LENGTHS.contains(&cleaned.len()) {
        return ValidationResult::invalid(format!(
            "GTIN deve ter 8, 12, 13 ou 14 dígitos, informado {}",
            cleaned.len()
        ));
    }

    let (body, check) = cleaned.split_at(cleaned.len() - 1);
    let expected = gtin_check_digit(body);
    let actual = check.bytes().next().map(|b| b - b'0');
    if expected.is_none() || expected != actual {
        return ValidationResult::invalid("GTIN inválido: dígito verificador não confere");
    }

    ValidationResult::ok()
}

/// Whether an NCM falls under the tobacco chapter.
pub fn is_tobacco_ncm(ncm: &str) -> bool {
    digits_only(ncm).starts_with(NCM_TOBACCO_PREFIX)
}
