//! Display masks for identifiers and codes.
//!
//! Every formatter strips existing punctuation before masking, so applying it
//! to an already-formatted value gives the same result as applying it to the
//! bare digits. Partial input is masked up to the digits present (useful
//! while the user is still typing); digits beyond the mask are dropped.

use rust_decimal::{Decimal, RoundingStrategy};

const CPF_MASK: &str = "###.###.###-##";
const CNPJ_MASK: &str = "##.###.###/####-##";
const CEP_MASK: &str = "#####-###";
const NCM_MASK: &str = "####.##.##";
const CFOP_MASK: &str = "#.###";

pub(crate) fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Remove every non-digit character.
pub fn strip_formatting(raw: &str) -> String {
    digits_only(raw)
}

fn apply_mask(raw: &str, mask: &str) -> String {
    let digits = digits_only(raw);
    let mut remaining = digits.chars().peekable();
    let mut out = String::with_capacity(mask.len());

    for slot in mask.chars() {
        if remaining.peek().is_none() {
            break;
        }
        if slot == '#' {
            if let Some(d) = remaining.next() {
                out.push(d);
            }
        } else {
            out.push(slot);
        }
    }
    out
}

/// `000.000.000-00`
pub fn format_cpf(raw: &str) -> String {
    apply_mask(raw, CPF_MASK)
}

/// `00.000.000/0000-00`
pub fn format_cnpj(raw: &str) -> String {
    apply_mask(raw, CNPJ_MASK)
}

/// CPF mask up to 11 digits, CNPJ mask beyond.
pub fn format_cpf_cnpj(raw: &str) -> String {
    if digits_only(raw).len() <= 11 {
        format_cpf(raw)
    } else {
        format_cnpj(raw)
    }
}

/// `00000-000`
pub fn format_cep(raw: &str) -> String {
    apply_mask(raw, CEP_MASK)
}

/// `0000.00.00`
pub fn format_ncm(raw: &str) -> String {
    apply_mask(raw, NCM_MASK)
}

/// `0.000`
pub fn format_cfop(raw: &str) -> String {
    apply_mask(raw, CFOP_MASK)
}

/// Normalize a barcode to its digits. Empty input stays empty.
pub fn format_gtin(raw: &str) -> String {
    digits_only(raw)
}

/// Render an amount as Brazilian currency, e.g. `R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cpf_full() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
    }

    #[test]
    fn cpf_partial() {
        assert_eq!(format_cpf("5299"), "529.9");
        assert_eq!(format_cpf("529"), "529");
        assert_eq!(format_cpf(""), "");
    }

    #[test]
    fn cnpj_full() {
        assert_eq!(format_cnpj("11222333000181"), "11.222.333/0001-81");
    }

    #[test]
    fn cnpj_already_formatted() {
        assert_eq!(format_cnpj("11.222.333/0001-81"), "11.222.333/0001-81");
    }

    #[test]
    fn cnpj_excess_digits_dropped() {
        assert_eq!(format_cnpj("1122233300018199"), "11.222.333/0001-81");
    }

    #[test]
    fn cpf_cnpj_switches_on_length() {
        assert_eq!(format_cpf_cnpj("52998224725"), "529.982.247-25");
        assert_eq!(format_cpf_cnpj("112223330001"), "11.222.333/0001");
    }

    #[test]
    fn cep_and_cfop() {
        assert_eq!(format_cep("01310100"), "01310-100");
        assert_eq!(format_cep("01310-100"), "01310-100");
        assert_eq!(format_cfop("5102"), "5.102");
    }

    #[test]
    fn ncm_mixed_separators() {
        assert_eq!(format_ncm("2202.10-00"), "2202.10.00");
        assert_eq!(format_ncm("22021000"), "2202.10.00");
    }

    #[test]
    fn gtin_pass_through() {
        assert_eq!(format_gtin(""), "");
        assert_eq!(format_gtin("789 1234 56789 5"), "7891234567895");
    }

    #[test]
    fn strip_removes_everything_but_digits() {
        assert_eq!(strip_formatting("11.222.333/0001-81"), "11222333000181");
        assert_eq!(strip_formatting("abc"), "");
    }

    #[test]
    fn brl_grouping() {
        assert_eq!(format_brl(dec!(0)), "R$ 0,00");
        assert_eq!(format_brl(dec!(6.5)), "R$ 6,50");
        assert_eq!(format_brl(dec!(999.999)), "R$ 1.000,00");
        assert_eq!(format_brl(dec!(1234567.891)), "R$ 1.234.567,89");
        assert_eq!(format_brl(dec!(-216.5)), "-R$ 216,50");
    }
}
