use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether an empty input is acceptable for a field.
///
/// The same validator is used both for mandatory document fields (e.g. GTIN
/// on line-item submission, mandatory since 2025) and for optional helpers,
/// so callers state which one they mean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    /// Empty input is an error; for amounts, zero is an error too.
    #[default]
    Required,
    /// Empty input is accepted as "nothing to check".
    Optional,
}

impl Requirement {
    pub fn is_required(self) -> bool {
        self == Self::Required
    }
}

/// One tax line of a breakdown (ICMS, PIS, COFINS, IPI, IBS, CBS or IS).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComponent {
    /// Calculation base (vBC).
    pub base: Decimal,
    /// Rate in percent (e.g. 18 for 18%).
    pub rate: Decimal,
    /// Tax amount (vICMS, vPIS, ...).
    pub amount: Decimal,
    /// CST, or CSOSN for ICMS under Simples Nacional.
    pub cst: String,
    /// Merchandise origin code (orig), ICMS only.
    pub origin: Option<String>,
}

impl TaxComponent {
    /// A component with zero base, rate and amount, declaring only its CST.
    pub fn zeroed(cst: impl Into<String>) -> Self {
        Self {
            base: Decimal::ZERO,
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
            cst: cst.into(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Per-line-item tax breakdown produced by [`crate::tributos::calculate_taxes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub icms: TaxComponent,
    pub pis: TaxComponent,
    pub cofins: TaxComponent,
    pub ipi: Option<TaxComponent>,
    pub ibs: Option<TaxComponent>,
    pub cbs: Option<TaxComponent>,
    /// Imposto Seletivo.
    #[serde(rename = "is")]
    pub selective: Option<TaxComponent>,
    /// Declared credits offset against the computed amounts.
    pub credits: Decimal,
    /// Sum of every component amount minus `credits`.
    pub total: Decimal,
}

impl TaxBreakdown {
    /// Iterate over every present component.
    pub fn components(&self) -> impl Iterator<Item = &TaxComponent> {
        [&self.icms, &self.pis, &self.cofins]
            .into_iter()
            .chain(self.ipi.as_ref())
            .chain(self.ibs.as_ref())
            .chain(self.cbs.as_ref())
            .chain(self.selective.as_ref())
    }

    /// Recompute `total` from the components and `credits`.
    pub fn recompute_total(&mut self) {
        let gross: Decimal = self.components().map(|c| c.amount).sum();
        self.total = gross - self.credits;
    }
}

/// A fiscal document line item with its computed taxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Seller's product code (cProd).
    pub code: String,
    /// Product description (xProd).
    pub description: String,
    /// 8-digit Mercosul classification, stored without separators.
    pub ncm: String,
    /// 4-digit operation code, stored without separators.
    pub cfop: String,
    /// Barcode (cEAN), `None` when the item has none.
    pub gtin: Option<String>,
    /// Commercial unit (uCom), e.g. "UN", "KG".
    pub unit: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Line total (vProd).
    pub total: Decimal,
    pub taxes: TaxBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn component(amount: Decimal) -> TaxComponent {
        TaxComponent {
            base: dec!(100),
            rate: dec!(1),
            amount,
            cst: "00".into(),
            origin: None,
        }
    }

    #[test]
    fn recompute_total_subtracts_credits() {
        let mut b = TaxBreakdown {
            icms: component(dec!(10)),
            pis: component(dec!(1)),
            cofins: component(dec!(2)),
            ipi: None,
            ibs: Some(component(dec!(5))),
            cbs: Some(component(dec!(5))),
            selective: None,
            credits: dec!(9),
            total: Decimal::ZERO,
        };
        b.recompute_total();
        assert_eq!(b.total, dec!(14));
        assert_eq!(b.components().count(), 5);
    }

    #[test]
    fn requirement_defaults_to_required() {
        assert!(Requirement::default().is_required());
        assert!(!Requirement::Optional.is_required());
    }

    #[test]
    fn selective_serializes_as_is() {
        let b = TaxBreakdown {
            icms: TaxComponent::zeroed("41"),
            pis: TaxComponent::zeroed("07"),
            cofins: TaxComponent::zeroed("07"),
            ipi: None,
            ibs: None,
            cbs: None,
            selective: Some(component(dec!(1))),
            credits: Decimal::ZERO,
            total: dec!(1),
        };
        let json = serde_json::to_string(&b).unwrap();
        assert!(json.contains("\"is\":"));
    }
}
