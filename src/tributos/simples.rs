//! Simples Nacional (LC 123/2006, as amended by LC 155/2016).
//!
//! The DAS collects several taxes at one effective rate. This module derives
//! that rate per anexo and revenue bracket from the official six-tier tables:
//!
//! ```text
//! effective = (RBT12 * nominal - deduction) / RBT12
//! ```
//!
//! evaluated at each bracket's revenue ceiling. The rate is then split into
//! ICMS (34%), PIS (8%) and COFINS (37%). Those shares add up to 79% of the
//! effective rate; the remainder (IRPJ, CSLL, CPP and IPI/ISS, depending on
//! the anexo) is collected through the DAS and is not itemized per line.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::regime::{Anexo, Faixa};
use super::{ORIGEM_NACIONAL, component, round_rate};
use crate::core::TaxBreakdown;

/// Share of the effective rate attributed to ICMS.
pub const ICMS_SHARE: Decimal = dec!(0.34);
/// Share of the effective rate attributed to PIS.
pub const PIS_SHARE: Decimal = dec!(0.08);
/// Share of the effective rate attributed to COFINS.
pub const COFINS_SHARE: Decimal = dec!(0.37);

/// CSOSN 102: taxed by the Simples Nacional without credit permission.
pub const CSOSN_SEM_CREDITO: &str = "102";
/// PIS/COFINS CST 99: other operations.
pub const CST_PIS_COFINS_OUTRAS: &str = "99";

/// Revenue ceilings of the six statutory tiers.
const TIER_CEILINGS: [Decimal; 6] = [
    dec!(180_000),
    dec!(360_000),
    dec!(720_000),
    dec!(1_800_000),
    dec!(3_600_000),
    dec!(4_800_000),
];

/// `(nominal rate %, deduction R$)` per tier, per anexo.
const TIERS: [[(Decimal, Decimal); 6]; 5] = [
    // Anexo I: commerce
    [
        (dec!(4.00), dec!(0)),
        (dec!(7.30), dec!(5_940)),
        (dec!(9.50), dec!(13_860)),
        (dec!(10.70), dec!(22_500)),
        (dec!(14.30), dec!(87_300)),
        (dec!(19.00), dec!(378_000)),
    ],
    // Anexo II: industry
    [
        (dec!(4.50), dec!(0)),
        (dec!(7.80), dec!(5_940)),
        (dec!(10.00), dec!(13_860)),
        (dec!(11.20), dec!(22_500)),
        (dec!(14.70), dec!(85_500)),
        (dec!(30.00), dec!(720_000)),
    ],
    // Anexo III
    [
        (dec!(6.00), dec!(0)),
        (dec!(11.20), dec!(9_360)),
        (dec!(13.50), dec!(17_640)),
        (dec!(16.00), dec!(35_640)),
        (dec!(21.00), dec!(125_640)),
        (dec!(33.00), dec!(648_000)),
    ],
    // Anexo IV
    [
        (dec!(4.50), dec!(0)),
        (dec!(9.00), dec!(8_100)),
        (dec!(10.20), dec!(12_420)),
        (dec!(14.00), dec!(39_780)),
        (dec!(22.00), dec!(183_780)),
        (dec!(33.00), dec!(828_000)),
    ],
    // Anexo V
    [
        (dec!(15.50), dec!(0)),
        (dec!(18.00), dec!(4_500)),
        (dec!(19.50), dec!(9_900)),
        (dec!(20.50), dec!(17_100)),
        (dec!(23.00), dec!(62_100)),
        (dec!(30.50), dec!(540_000)),
    ],
];

/// Effective rates (percent), `[anexo][faixa]`. Built once, read-only.
static EFFECTIVE_RATES: LazyLock<[[Decimal; Faixa::COUNT]; 5]> = LazyLock::new(|| {
    std::array::from_fn(|anexo| {
        std::array::from_fn(|faixa| {
            let rbt12 = dec!(240_000) * Decimal::from(faixa + 1);
            effective_rate_at(anexo, rbt12)
        })
    })
});

fn effective_rate_at(anexo: usize, rbt12: Decimal) -> Decimal {
    let tier = TIER_CEILINGS
        .iter()
        .position(|ceiling| rbt12 <= *ceiling)
        .unwrap_or(TIER_CEILINGS.len() - 1);
    let (nominal, deduction) = TIERS[anexo][tier];
    let due = rbt12 * nominal / dec!(100) - deduction;
    round_rate(due / rbt12 * dec!(100))
}

/// Effective DAS rate (percent) for an anexo and revenue bracket.
pub fn effective_rate(anexo: Anexo, faixa: Faixa) -> Decimal {
    EFFECTIVE_RATES[anexo.index()][faixa.index()]
}

pub(crate) fn calculate(total: Decimal, anexo: Anexo, faixa: Faixa) -> TaxBreakdown {
    let rate = effective_rate(anexo, faixa);

    let icms = component(total, round_rate(rate * ICMS_SHARE), CSOSN_SEM_CREDITO)
        .with_origin(ORIGEM_NACIONAL);
    let pis = component(total, round_rate(rate * PIS_SHARE), CST_PIS_COFINS_OUTRAS);
    let cofins = component(total, round_rate(rate * COFINS_SHARE), CST_PIS_COFINS_OUTRAS);

    super::breakdown(icms, pis, cofins)
}

/// The itemized share of the effective rate (ICMS + PIS + COFINS).
pub fn itemized_share() -> Decimal {
    ICMS_SHARE + PIS_SHARE + COFINS_SHARE
}
