use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::{LineItem, TaxComponent};

/// Document-level sums over every line item (the NF-e `ICMSTot` group).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Sum of line totals (vProd).
    pub products: Decimal,
    pub icms: Decimal,
    pub pis: Decimal,
    pub cofins: Decimal,
    pub ipi: Decimal,
    pub ibs: Decimal,
    pub cbs: Decimal,
    /// Imposto Seletivo.
    #[serde(rename = "is")]
    pub selective: Decimal,
    pub credits: Decimal,
    /// Sum of every item's tax total (credits already deducted).
    pub taxes: Decimal,
    pub item_count: usize,
}

/// `taxes` as a percentage of `products`, rounded half-up to 2 places.
/// Zero when there are no products.
pub fn tax_burden_percent(taxes: Decimal, products: Decimal) -> Decimal {
    if products.is_zero() {
        return Decimal::ZERO;
    }
    (taxes / products * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl DocumentTotals {
    /// Approximate tax burden of the whole document, see [`tax_burden_percent`].
    pub fn tax_burden_percent(&self) -> Decimal {
        tax_burden_percent(self.taxes, self.products)
    }
}

fn amount(component: Option<&TaxComponent>) -> Decimal {
    component.map_or(Decimal::ZERO, |c| c.amount)
}

/// Sum products and taxes across items.
pub fn summarize(items: &[LineItem]) -> DocumentTotals {
    items.iter().fold(
        DocumentTotals {
            item_count: items.len(),
            ..DocumentTotals::default()
        },
        |mut acc, item| {
            let t = &item.taxes;
            acc.products += item.total;
            acc.icms += t.icms.amount;
            acc.pis += t.pis.amount;
            acc.cofins += t.cofins.amount;
            acc.ipi += amount(t.ipi.as_ref());
            acc.ibs += amount(t.ibs.as_ref());
            acc.cbs += amount(t.cbs.as_ref());
            acc.selective += amount(t.selective.as_ref());
            acc.credits += t.credits;
            acc.taxes += t.total;
            acc
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Uf;
    use crate::tributos::{TaxRegime, calculate_taxes};
    use rust_decimal_macros::dec;

    fn item(total: Decimal, regime: &TaxRegime) -> LineItem {
        LineItem {
            code: "P1".into(),
            description: "Produto".into(),
            ncm: "22021000".into(),
            cfop: "5102".into(),
            gtin: None,
            unit: "UN".into(),
            quantity: Decimal::ONE,
            unit_price: total,
            total,
            taxes: calculate_taxes(total, regime),
        }
    }

    #[test]
    fn empty_document() {
        let totals = summarize(&[]);
        assert_eq!(totals, DocumentTotals::default());
        assert_eq!(totals.tax_burden_percent(), Decimal::ZERO);
    }

    #[test]
    fn sums_across_items() {
        let regime = TaxRegime::LucroPresumido { uf: Uf::SP };
        let items = [item(dec!(1000), &regime), item(dec!(500), &regime)];
        let totals = summarize(&items);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.products, dec!(1500));
        assert_eq!(totals.icms, dec!(270.00));
        assert_eq!(totals.pis, dec!(9.75));
        assert_eq!(totals.cofins, dec!(45.00));
        assert_eq!(totals.taxes, dec!(324.75));
        assert_eq!(totals.tax_burden_percent(), dec!(21.65));
    }

    #[test]
    fn burden_rounds_half_up() {
        assert_eq!(tax_burden_percent(dec!(1), dec!(8)), dec!(12.50));
        assert_eq!(tax_burden_percent(dec!(0.045), dec!(1)), dec!(4.50));
        assert_eq!(tax_burden_percent(dec!(10), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn reform_credits_are_summed() {
        let regime = TaxRegime::Reforma2026 {
            ncm: "24022000".into(),
            tem_credito: true,
        };
        let totals = summarize(&[item(dec!(1000), &regime)]);
        assert_eq!(totals.ibs, dec!(88.00));
        assert_eq!(totals.selective, dec!(10.00));
        assert_eq!(totals.credits, dec!(158.40));
        assert_eq!(totals.taxes, dec!(27.60));
    }
}
