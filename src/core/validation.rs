use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::error::ValidationResult;
use super::types::Requirement;

/// Largest accepted monetary amount.
pub const MAX_MONETARY_AMOUNT: Decimal = dec!(999_999_999.99);

/// Largest accepted quantity (NF-e `qCom`: 11 integer + 4 fractional digits).
pub const MAX_QUANTITY: Decimal = dec!(99_999_999_999.9999);

/// Absolute tolerance between `quantity * unit_price` and the declared total.
pub const TOTALS_TOLERANCE: Decimal = dec!(0.01);

const MAX_EMAIL_LEN: usize = 254;

/// Round a Decimal to 2 places using half-up (commercial rounding).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse a user-typed decimal.
///
/// Accepts both `1234.56` and the Brazilian `1.234,56`. When a comma is
/// present it is the decimal separator and dots are thousands separators.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim().trim_start_matches("R$").trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };
    normalized.parse::<Decimal>().ok()
}

/// Number of significant decimal places (trailing zeros ignored).
fn decimal_places(value: Decimal) -> u32 {
    value.normalize().scale()
}

/// Validate a typed monetary amount.
pub fn check_monetary_amount(value: Decimal, requirement: Requirement) -> ValidationResult {
    if value.is_sign_negative() && !value.is_zero() {
        return ValidationResult::invalid("Valor não pode ser negativo");
    }
    if value.is_zero() && requirement.is_required() {
        return ValidationResult::invalid("Valor deve ser maior que zero");
    }
    if decimal_places(value) > 2 {
        return ValidationResult::invalid("Valor deve ter no máximo 2 casas decimais");
    }
    if value > MAX_MONETARY_AMOUNT {
        return ValidationResult::invalid(format!(
            "Valor excede o limite de {MAX_MONETARY_AMOUNT}"
        ));
    }
    ValidationResult::ok()
}

/// Validate a raw monetary input.
///
/// Unparsable input is rejected. Empty input is an error only for
/// [`Requirement::Required`].
pub fn validate_monetary_amount(raw: &str, requirement: Requirement) -> ValidationResult {
    if raw.trim().is_empty() {
        return if requirement.is_required() {
            ValidationResult::invalid("Valor é obrigatório")
        } else {
            ValidationResult::ok()
        };
    }
    match parse_decimal(raw) {
        Some(value) => check_monetary_amount(value, requirement),
        None => ValidationResult::invalid("Valor não é um número válido"),
    }
}

/// Validate a typed quantity.
pub fn check_quantity(value: Decimal) -> ValidationResult {
    if value <= Decimal::ZERO {
        return ValidationResult::invalid("Quantidade deve ser maior que zero");
    }
    if decimal_places(value) > 4 {
        return ValidationResult::invalid("Quantidade deve ter no máximo 4 casas decimais");
    }
    if value > MAX_QUANTITY {
        return ValidationResult::invalid(format!("Quantidade excede o limite de {MAX_QUANTITY}"));
    }
    ValidationResult::ok()
}

/// Validate a raw quantity input.
pub fn validate_quantity(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::invalid("Quantidade é obrigatória");
    }
    match parse_decimal(raw) {
        Some(value) => check_quantity(value),
        None => ValidationResult::invalid("Quantidade não é um número válido"),
    }
}

/// Check that `declared_total` matches `quantity * unit_price` within
/// [`TOTALS_TOLERANCE`]. The product is rounded half-up to 2 places first.
pub fn validate_totals_consistency(
    quantity: Decimal,
    unit_price: Decimal,
    declared_total: Decimal,
) -> ValidationResult {
    let computed = round_money(quantity * unit_price);
    if (computed - declared_total).abs() <= TOTALS_TOLERANCE {
        return ValidationResult::ok();
    }
    ValidationResult::invalid(format!(
        "Valor total inconsistente: calculado {:.2}, informado {:.2}",
        computed, declared_total
    ))
}

/// Validate an email address: one `@`, non-empty local part, dotted domain
/// with non-empty labels, no whitespace, at most 254 characters.
pub fn validate_email(raw: &str) -> ValidationResult {
    let email = raw.trim();
    if email.is_empty() {
        return ValidationResult::invalid("E-mail é obrigatório");
    }
    if email.len() > MAX_EMAIL_LEN {
        return ValidationResult::invalid("E-mail excede 254 caracteres");
    }
    if email.chars().any(char::is_whitespace) {
        return ValidationResult::invalid("E-mail não pode conter espaços");
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return ValidationResult::invalid("E-mail deve conter exatamente um @");
    };

    if local.is_empty() {
        return ValidationResult::invalid("E-mail sem usuário antes do @");
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return ValidationResult::invalid("E-mail com domínio inválido");
    }

    ValidationResult::ok()
}
