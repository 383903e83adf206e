//! CPF and CNPJ taxpayer identifier validation.
//!
//! Both identifiers end in two mod-11 check digits. The first digit is
//! computed over the base, the second over the base plus the first digit.
//! A remainder below 2 yields 0, otherwise the digit is `11 - remainder`.

use super::error::ValidationResult;
use super::format::digits_only;

const CPF_LEN: usize = 11;
const CNPJ_LEN: usize = 14;

const CNPJ_WEIGHTS_FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_WEIGHTS_SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

fn mod11_digit(digits: &[u8], weights: impl IntoIterator<Item = u32>) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(&d, w)| u32::from(d) * w)
        .sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { (11 - remainder) as u8 }
}

fn cpf_check_digits(base: &[u8]) -> (u8, u8) {
    let first = mod11_digit(&base[..9], (2..=10).rev());
    let mut extended = base[..9].to_vec();
    extended.push(first);
    let second = mod11_digit(&extended, (2..=11).rev());
    (first, second)
}

fn cnpj_check_digits(base: &[u8]) -> (u8, u8) {
    let first = mod11_digit(&base[..12], CNPJ_WEIGHTS_FIRST);
    let mut extended = base[..12].to_vec();
    extended.push(first);
    let second = mod11_digit(&extended, CNPJ_WEIGHTS_SECOND);
    (first, second)
}

fn to_digits(s: &str) -> Vec<u8> {
    s.bytes().map(|b| b - b'0').collect()
}

fn all_same(digits: &[u8]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// Validate a CPF (individual taxpayer id). Separators are ignored.
pub fn validate_cpf(raw: &str) -> ValidationResult {
    let cleaned = digits_only(raw);
    if cleaned.is_empty() {
        return ValidationResult::invalid("CPF é obrigatório");
    }
    if cleaned.len() != CPF_LEN {
        return ValidationResult::invalid(format!(
            "CPF deve ter 11 dígitos, informado {}",
            cleaned.len()
        ));
    }

    let digits = to_digits(&cleaned);
    if all_same(&digits) {
        return ValidationResult::invalid("CPF inválido: dígitos repetidos");
    }

    let (first, second) = cpf_check_digits(&digits);
    if digits[9] != first || digits[10] != second {
        return ValidationResult::invalid("CPF inválido: dígitos verificadores não conferem");
    }

    ValidationResult::ok()
}

/// Validate a CNPJ (company taxpayer id). Separators are ignored.
pub fn validate_cnpj(raw: &str) -> ValidationResult {
    let cleaned = digits_only(raw);
    if cleaned.is_empty() {
        return ValidationResult::invalid("CNPJ é obrigatório");
    }
    if cleaned.len() != CNPJ_LEN {
        return ValidationResult::invalid(format!(
            "CNPJ deve ter 14 dígitos, informado {}",
            cleaned.len()
        ));
    }

    let digits = to_digits(&cleaned);
    if all_same(&digits) {
        return ValidationResult::invalid("CNPJ inválido: dígitos repetidos");
    }

    let (first, second) = cnpj_check_digits(&digits);
    if digits[12] != first || digits[13] != second {
        return ValidationResult::invalid("CNPJ inválido: dígitos verificadores não conferem");
    }

    ValidationResult::ok()
}

/// Validate either identifier, dispatching on the digit count.
pub fn validate_cpf_cnpj(raw: &str) -> ValidationResult {
    let cleaned = digits_only(raw);
    match cleaned.len() {
        0 => ValidationResult::invalid("CPF/CNPJ é obrigatório"),
        CPF_LEN => validate_cpf(&cleaned),
        CNPJ_LEN => validate_cnpj(&cleaned),
        n => ValidationResult::invalid(format!(
            "CPF/CNPJ deve ter 11 ou 14 dígitos, informado {n}"
        )),
    }
}

/// Append both check digits to a 9-digit CPF base.
///
/// Returns `None` unless `base` is exactly 9 ASCII digits.
pub fn complete_cpf(base: &str) -> Option<String> {
    if base.len() != 9 || !base.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (first, second) = cpf_check_digits(&to_digits(base));
    Some(format!("{base}{first}{second}"))
}

/// Append both check digits to a 12-digit CNPJ base (root + branch).
pub fn complete_cnpj(base: &str) -> Option<String> {
    if base.len() != 12 || !base.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (first, second) = cnpj_check_digits(&to_digits(base));
    Some(format!("{base}{first}{second}"))
}
