//! Per-item tax calculation under the five supported regimes.
//!
//! [`calculate_taxes`] dispatches on the closed [`TaxRegime`] enum and
//! always returns the same [`TaxBreakdown`] shape, so callers never branch
//! on the regime to read results. Amounts are rounded half-up to centavos;
//! rates are percentages rounded to 4 places.
//!
//! # Example
//!
//! ```
//! use tributa::Uf;
//! use tributa::tributos::{TaxRegime, calculate_taxes};
//! use rust_decimal_macros::dec;
//!
//! let taxes = calculate_taxes(dec!(1000), &TaxRegime::LucroPresumido { uf: Uf::SP });
//! assert_eq!(taxes.icms.amount, dec!(180.00));
//! assert_eq!(taxes.total, dec!(216.50));
//! ```

mod builder;
mod lucro;
mod reforma;
mod regime;
pub mod simples;
mod st;
mod totals;

pub use builder::{DocumentBuilder, FiscalDocument, LineItemBuilder, MAX_ITEMS};
pub use lucro::{
    COFINS_CUMULATIVO, COFINS_NAO_CUMULATIVO, PIS_CUMULATIVO, PIS_NAO_CUMULATIVO,
};
pub use reforma::{CBS_RATE, CREDIT_SHARE, IBS_RATE, IS_TOBACCO_RATE, ReformPhase};
pub use regime::{Anexo, Faixa, TaxRegime};
pub use simples::effective_rate;
pub use st::st_base;
pub use totals::{DocumentTotals, summarize, tax_burden_percent};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{TaxBreakdown, TaxComponent, round_money};

/// ICMS `orig` 0: domestic merchandise.
pub(crate) const ORIGEM_NACIONAL: &str = "0";

/// Round a percentage rate to 4 places, half-up.
pub(crate) fn round_rate(rate: Decimal) -> Decimal {
    rate.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// A component taxed at `rate` percent over `base`.
pub(crate) fn component(base: Decimal, rate: Decimal, cst: &str) -> TaxComponent {
    let base = round_money(base);
    TaxComponent {
        base,
        rate,
        amount: round_money(base * rate / Decimal::ONE_HUNDRED),
        cst: cst.to_string(),
        origin: None,
    }
}

/// A breakdown with only the three legacy taxes, total recomputed.
pub(crate) fn breakdown(icms: TaxComponent, pis: TaxComponent, cofins: TaxComponent) -> TaxBreakdown {
    let mut b = TaxBreakdown {
        icms,
        pis,
        cofins,
        ipi: None,
        ibs: None,
        cbs: None,
        selective: None,
        credits: Decimal::ZERO,
        total: Decimal::ZERO,
    };
    b.recompute_total();
    b
}

/// Compute the tax breakdown of one line item.
///
/// `total` is the line's product value (vProd) and is expected to be
/// validated already. Regime parameters (UF, MVA, NCM) travel inside the
/// variant.
pub fn calculate_taxes(total: Decimal, regime: &TaxRegime) -> TaxBreakdown {
    let breakdown = match regime {
        TaxRegime::SimplesNacional { anexo, faixa } => simples::calculate(total, *anexo, *faixa),
        TaxRegime::LucroPresumido { uf } => lucro::presumido(total, *uf),
        TaxRegime::LucroReal { uf, tem_credito } => lucro::real(total, *uf, *tem_credito),
        TaxRegime::SubstituicaoTributaria { uf, mva } => st::calculate(total, *uf, *mva),
        TaxRegime::Reforma2026 { ncm, tem_credito } => reforma::calculate(total, ncm, *tem_credito),
    };

    tracing::debug!(
        regime = regime.tag(),
        %total,
        taxes = %breakdown.total,
        "taxes calculated"
    );
    breakdown
}
