//! ICMS Substituição Tributária.
//!
//! The issuer withholds ICMS for the whole downstream chain, so the base is
//! the product value marked up by the MVA (margem de valor agregado).

use rust_decimal::Decimal;

use super::{ORIGEM_NACIONAL, component};
use crate::core::{TaxBreakdown, TaxComponent, Uf, round_money};

const CST_ICMS_ST: &str = "10";
/// PIS/COFINS CST 05: taxed by substitution.
const CST_PIS_COFINS_ST: &str = "05";

/// ST calculation base: `total * (1 + mva / 100)`, rounded to centavos.
pub fn st_base(total: Decimal, mva: Decimal) -> Decimal {
    round_money(total * (Decimal::ONE + mva / Decimal::ONE_HUNDRED))
}

pub(crate) fn calculate(total: Decimal, uf: Uf, mva: Decimal) -> TaxBreakdown {
    let icms = component(st_base(total, mva), uf.icms_rate(), CST_ICMS_ST)
        .with_origin(ORIGEM_NACIONAL);
    super::breakdown(
        icms,
        TaxComponent::zeroed(CST_PIS_COFINS_ST),
        TaxComponent::zeroed(CST_PIS_COFINS_ST),
    )
}
