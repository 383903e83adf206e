//! Lucro Presumido and Lucro Real.
//!
//! Both charge the state's internal ICMS rate on the product value. They
//! differ in PIS/COFINS: presumed profit uses the cumulative rates
//! (Lei 9.718/1998), actual profit the non-cumulative ones
//! (Leis 10.637/2002 and 10.833/2003).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{ORIGEM_NACIONAL, component};
use crate::core::{TaxBreakdown, TaxComponent, Uf};

/// Cumulative PIS rate (%).
pub const PIS_CUMULATIVO: Decimal = dec!(0.65);
/// Cumulative COFINS rate (%).
pub const COFINS_CUMULATIVO: Decimal = dec!(3.00);
/// Non-cumulative PIS rate (%).
pub const PIS_NAO_CUMULATIVO: Decimal = dec!(1.65);
/// Non-cumulative COFINS rate (%).
pub const COFINS_NAO_CUMULATIVO: Decimal = dec!(7.60);

const CST_ICMS_TRIBUTADA: &str = "00";
const CST_PIS_COFINS_TRIBUTAVEL: &str = "01";
const CST_PIS_COFINS_OUTRAS_SAIDAS: &str = "49";

fn icms_own(total: Decimal, uf: Uf) -> TaxComponent {
    component(total, uf.icms_rate(), CST_ICMS_TRIBUTADA).with_origin(ORIGEM_NACIONAL)
}

pub(crate) fn presumido(total: Decimal, uf: Uf) -> TaxBreakdown {
    super::breakdown(
        icms_own(total, uf),
        component(total, PIS_CUMULATIVO, CST_PIS_COFINS_TRIBUTAVEL),
        component(total, COFINS_CUMULATIVO, CST_PIS_COFINS_TRIBUTAVEL),
    )
}

/// Without a credit-eligible operation the PIS/COFINS lines still carry the
/// non-cumulative rates but are declared under CST 49.
pub(crate) fn real(total: Decimal, uf: Uf, tem_credito: bool) -> TaxBreakdown {
    let cst = if tem_credito {
        CST_PIS_COFINS_TRIBUTAVEL
    } else {
        CST_PIS_COFINS_OUTRAS_SAIDAS
    };
    super::breakdown(
        icms_own(total, uf),
        component(total, PIS_NAO_CUMULATIVO, cst),
        component(total, COFINS_NAO_CUMULATIVO, cst),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presumido_sp() {
        let b = presumido(dec!(1000), Uf::SP);
        assert_eq!(b.icms.amount, dec!(180.00));
        assert_eq!(b.icms.cst, "00");
        assert_eq!(b.pis.amount, dec!(6.50));
        assert_eq!(b.cofins.amount, dec!(30.00));
        assert_eq!(b.pis.cst, "01");
        assert_eq!(b.total, dec!(216.50));
    }

    #[test]
    fn presumido_uses_state_rate() {
        let b = presumido(dec!(1000), Uf::RJ);
        assert_eq!(b.icms.rate, dec!(22));
        assert_eq!(b.icms.amount, dec!(220.00));
    }

    #[test]
    fn real_with_credit() {
        let b = real(dec!(1000), Uf::SP, true);
        assert_eq!(b.pis.amount, dec!(16.50));
        assert_eq!(b.cofins.amount, dec!(76.00));
        assert_eq!(b.pis.cst, "01");
        assert_eq!(b.cofins.cst, "01");
        assert_eq!(b.total, dec!(272.50));
    }

    #[test]
    fn real_without_credit_declares_cst_49() {
        let b = real(dec!(1000), Uf::SP, false);
        assert_eq!(b.pis.cst, "49");
        assert_eq!(b.cofins.cst, "49");
        assert_eq!(b.pis.amount, dec!(16.50));
    }

    #[test]
    fn rounding_on_fractional_total() {
        // 0.65% of 99.99 = 0.649935
        let b = presumido(dec!(99.99), Uf::SP);
        assert_eq!(b.pis.amount, dec!(0.65));
        assert_eq!(b.icms.amount, dec!(18.00));
    }
}
