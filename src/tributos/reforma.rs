//! Preparation for the consumption-tax reform (EC 132/2023, LC 214/2025).
//!
//! IBS (state/municipal) and CBS (federal) replace ICMS and PIS/COFINS, and
//! the Imposto Seletivo applies to goods such as tobacco. Under this regime
//! the legacy taxes are declared with zero amounts while the new ones are
//! computed at the reference rates.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{ORIGEM_NACIONAL, component};
use crate::core::{TaxBreakdown, TaxComponent, is_tobacco_ncm, round_money};

/// IBS reference rate (%).
pub const IBS_RATE: Decimal = dec!(8.8);
/// CBS reference rate (%).
pub const CBS_RATE: Decimal = dec!(8.8);
/// Imposto Seletivo on tobacco (%).
pub const IS_TOBACCO_RATE: Decimal = dec!(1.0);
/// Share of IBS + CBS recoverable as credit.
pub const CREDIT_SHARE: Decimal = dec!(0.9);

const CST_ICMS_NAO_TRIBUTADA: &str = "41";
const CST_PIS_COFINS_ISENTA: &str = "07";
const CST_IBS_CBS_TRIBUTADA: &str = "000";

pub(crate) fn calculate(total: Decimal, ncm: &str, tem_credito: bool) -> TaxBreakdown {
    let ibs = component(total, IBS_RATE, CST_IBS_CBS_TRIBUTADA);
    let cbs = component(total, CBS_RATE, CST_IBS_CBS_TRIBUTADA);
    let selective =
        is_tobacco_ncm(ncm).then(|| component(total, IS_TOBACCO_RATE, CST_IBS_CBS_TRIBUTADA));
    let credits = if tem_credito {
        round_money((ibs.amount + cbs.amount) * CREDIT_SHARE)
    } else {
        Decimal::ZERO
    };

    let mut b = super::breakdown(
        TaxComponent::zeroed(CST_ICMS_NAO_TRIBUTADA).with_origin(ORIGEM_NACIONAL),
        TaxComponent::zeroed(CST_PIS_COFINS_ISENTA),
        TaxComponent::zeroed(CST_PIS_COFINS_ISENTA),
    );
    b.ibs = Some(ibs);
    b.cbs = Some(cbs);
    b.selective = selective;
    b.credits = credits;
    b.recompute_total();
    b
}

/// Stage of the reform timeline a date falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReformPhase {
    /// Before 2026: ICMS, PIS and COFINS only.
    Legacy,
    /// 2026: IBS 0.1% and CBS 0.9% informed on documents, offset against
    /// PIS/COFINS.
    Test,
    /// 2027-2028: CBS replaces PIS/COFINS; IS in force.
    CbsInForce,
    /// 2029-2032: ICMS reduced progressively while IBS grows.
    Transition {
        /// Percentage by which ICMS rates are reduced (10, 20, 30 or 40).
        icms_reduction: u8,
    },
    /// 2033 onwards: ICMS extinct, IBS/CBS at full rates.
    Full,
}

impl ReformPhase {
    pub fn for_date(date: NaiveDate) -> Self {
        match date.year() {
            ..=2025 => ReformPhase::Legacy,
            2026 => ReformPhase::Test,
            2027 | 2028 => ReformPhase::CbsInForce,
            year @ 2029..=2032 => ReformPhase::Transition {
                // year - 2028 is 1..=4 here
                icms_reduction: ((year - 2028) * 10) as u8,
            },
            _ => ReformPhase::Full,
        }
    }

    /// pt-BR description used in document observations.
    pub fn description(self) -> String {
        match self {
            ReformPhase::Legacy => "regime atual (ICMS, PIS e COFINS)".to_string(),
            ReformPhase::Test => {
                "ano de teste (IBS 0,1% e CBS 0,9% informativos, compensáveis com PIS/COFINS)"
                    .to_string()
            }
            ReformPhase::CbsInForce => {
                "CBS em vigor em substituição ao PIS/COFINS; Imposto Seletivo instituído"
                    .to_string()
            }
            ReformPhase::Transition { icms_reduction } => {
                format!("transição com redução de {icms_reduction}% nas alíquotas de ICMS")
            }
            ReformPhase::Full => "modelo pleno IBS/CBS (ICMS extinto)".to_string(),
        }
    }
}

impl fmt::Display for ReformPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tobacco_with_credit() {
        let b = calculate(dec!(1000), "24022000", true);
        assert_eq!(b.ibs.as_ref().unwrap().amount, dec!(88.00));
        assert_eq!(b.cbs.as_ref().unwrap().amount, dec!(88.00));
        assert_eq!(b.selective.as_ref().unwrap().amount, dec!(10.00));
        assert_eq!(b.credits, dec!(158.40));
        assert_eq!(b.total, dec!(27.60));
    }

    #[test]
    fn non_tobacco_without_credit() {
        let b = calculate(dec!(1000), "22021000", false);
        assert!(b.selective.is_none());
        assert_eq!(b.credits, Decimal::ZERO);
        assert_eq!(b.total, dec!(176.00));
    }

    #[test]
    fn legacy_taxes_zeroed() {
        let b = calculate(dec!(1000), "22021000", false);
        assert_eq!(b.icms.amount, Decimal::ZERO);
        assert_eq!(b.icms.cst, "41");
        assert_eq!(b.pis.cst, "07");
        assert_eq!(b.cofins.cst, "07");
        assert_eq!(b.ibs.as_ref().unwrap().cst, "000");
    }

    #[test]
    fn phase_boundaries() {
        assert_eq!(ReformPhase::for_date(ymd(2025, 12, 31)), ReformPhase::Legacy);
        assert_eq!(ReformPhase::for_date(ymd(2026, 1, 1)), ReformPhase::Test);
        assert_eq!(ReformPhase::for_date(ymd(2027, 6, 1)), ReformPhase::CbsInForce);
        assert_eq!(ReformPhase::for_date(ymd(2028, 12, 31)), ReformPhase::CbsInForce);
        assert_eq!(
            ReformPhase::for_date(ymd(2029, 1, 1)),
            ReformPhase::Transition { icms_reduction: 10 }
        );
        assert_eq!(
            ReformPhase::for_date(ymd(2032, 7, 1)),
            ReformPhase::Transition { icms_reduction: 40 }
        );
        assert_eq!(ReformPhase::for_date(ymd(2033, 1, 1)), ReformPhase::Full);
    }

    #[test]
    fn transition_description() {
        let phase = ReformPhase::Transition { icms_reduction: 30 };
        assert_eq!(
            phase.to_string(),
            "transição com redução de 30% nas alíquotas de ICMS"
        );
    }
}
