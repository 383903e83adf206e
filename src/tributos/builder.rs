use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::totals::{DocumentTotals, summarize};
use super::{TaxRegime, calculate_taxes, component};
use crate::core::format::digits_only;
use crate::core::{
    FiscalError, LineItem, MAX_MONETARY_AMOUNT, Requirement, SEM_GTIN, ValidationError,
    check_monetary_amount, check_quantity, is_tobacco_ncm, round_money, validate_cfop,
    validate_gtin, validate_ncm, validate_totals_consistency,
};
use crate::legal::{legal_observations_on, transparency_notice};

/// NF-e accepts at most 990 `det` items per document.
pub const MAX_ITEMS: usize = 990;

const MAX_CODE_LEN: usize = 60;
const MAX_DESCRIPTION_LEN: usize = 120;
const MAX_NOTES: usize = 100;
const CST_IPI_TRIBUTADA: &str = "50";

/// Builder for a validated, taxed [`LineItem`].
///
/// ```
/// use tributa::Uf;
/// use tributa::tributos::{LineItemBuilder, TaxRegime};
/// use rust_decimal_macros::dec;
///
/// let item = LineItemBuilder::new("P-001", "Refrigerante lata 350ml", dec!(12), dec!(4.50))
///     .ncm("2202.10.00")
///     .cfop("5102")
///     .gtin("7891000315507")
///     .build(&TaxRegime::LucroPresumido { uf: Uf::SP })
///     .unwrap();
///
/// assert_eq!(item.total, dec!(54.00));
/// assert_eq!(item.ncm, "22021000");
/// ```
#[derive(Debug, Clone)]
pub struct LineItemBuilder {
    code: String,
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
    ncm: String,
    cfop: String,
    gtin: String,
    gtin_requirement: Requirement,
    unit: String,
    declared_total: Option<Decimal>,
    ipi_rate: Option<Decimal>,
}

impl LineItemBuilder {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            quantity,
            unit_price,
            ncm: String::new(),
            cfop: String::new(),
            gtin: String::new(),
            gtin_requirement: Requirement::Required,
            unit: "UN".to_string(),
            declared_total: None,
            ipi_rate: None,
        }
    }

    pub fn ncm(mut self, ncm: impl Into<String>) -> Self {
        self.ncm = ncm.into();
        self
    }

    pub fn cfop(mut self, cfop: impl Into<String>) -> Self {
        self.cfop = cfop.into();
        self
    }

    /// Barcode, or [`SEM_GTIN`] for items without one.
    pub fn gtin(mut self, gtin: impl Into<String>) -> Self {
        self.gtin = gtin.into();
        self
    }

    /// GTIN is required by default (mandatory on NF-e items since 2025).
    pub fn gtin_requirement(mut self, requirement: Requirement) -> Self {
        self.gtin_requirement = requirement;
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Total as typed by the user; checked against `quantity * unit_price`.
    pub fn declared_total(mut self, total: Decimal) -> Self {
        self.declared_total = Some(total);
        self
    }

    /// IPI rate in percent, from the TIPI table.
    pub fn ipi_rate(mut self, rate: Decimal) -> Self {
        self.ipi_rate = Some(rate);
        self
    }

    /// Every field error, not just the first.
    fn field_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.code.trim().is_empty() {
            errors.push(ValidationError::new("code", "Código do produto é obrigatório"));
        } else if self.code.chars().count() > MAX_CODE_LEN {
            errors.push(ValidationError::new(
                "code",
                format!("Código do produto excede {MAX_CODE_LEN} caracteres"),
            ));
        }
        if self.description.trim().is_empty() {
            errors.push(ValidationError::new("description", "Descrição é obrigatória"));
        } else if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(ValidationError::new(
                "description",
                format!("Descrição excede {MAX_DESCRIPTION_LEN} caracteres"),
            ));
        }

        let quantity_error = check_quantity(self.quantity).into_error("quantity");
        let amounts_valid = quantity_error.is_none()
            && self.unit_price > Decimal::ZERO
            && self.unit_price <= MAX_MONETARY_AMOUNT;
        errors.extend(quantity_error);

        // Unit prices may carry up to 10 decimal places on NF-e (vUnCom),
        // so only sign and bound are checked here.
        if self.unit_price <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "unit_price",
                "Valor unitário deve ser maior que zero",
            ));
        } else if self.unit_price > MAX_MONETARY_AMOUNT {
            errors.push(ValidationError::new(
                "unit_price",
                format!("Valor unitário excede o limite de {MAX_MONETARY_AMOUNT}"),
            ));
        }

        errors.extend(validate_ncm(&self.ncm).into_error("ncm"));
        errors.extend(validate_cfop(&self.cfop).into_error("cfop"));
        errors.extend(validate_gtin(&self.gtin, self.gtin_requirement).into_error("gtin"));

        if let Some(declared) = self.declared_total {
            match check_monetary_amount(declared, Requirement::Required).into_error("total") {
                Some(err) => errors.push(err),
                None if amounts_valid => errors.extend(
                    validate_totals_consistency(self.quantity, self.unit_price, declared)
                        .into_error("total"),
                ),
                None => {}
            }
        } else if amounts_valid {
            let computed = round_money(self.quantity * self.unit_price);
            errors.extend(
                check_monetary_amount(computed, Requirement::Required).into_error("total"),
            );
        }

        if let Some(rate) = self.ipi_rate {
            if rate.is_sign_negative() || rate > Decimal::ONE_HUNDRED {
                errors.push(ValidationError::new(
                    "ipi_rate",
                    format!("Alíquota de IPI inválida: {rate}"),
                ));
            }
        }

        errors
    }

    fn normalized_gtin(&self) -> Option<String> {
        let trimmed = self.gtin.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.eq_ignore_ascii_case(SEM_GTIN) {
            Some(SEM_GTIN.to_string())
        } else {
            Some(digits_only(trimmed))
        }
    }

    /// Compute totals and taxes. Fields must have been validated.
    fn assemble(self, regime: &TaxRegime) -> Result<LineItem, FiscalError> {
        let ncm = digits_only(&self.ncm);
        let regime = regime.for_item(&ncm);
        regime.validate()?;

        let total = self
            .declared_total
            .unwrap_or_else(|| round_money(self.quantity * self.unit_price));

        let mut taxes = calculate_taxes(total, &regime);
        if let Some(rate) = self.ipi_rate {
            taxes.ipi = Some(component(total, rate, CST_IPI_TRIBUTADA));
            taxes.recompute_total();
        }

        Ok(LineItem {
            gtin: self.normalized_gtin(),
            code: self.code.trim().to_string(),
            description: self.description.trim().to_string(),
            cfop: digits_only(&self.cfop),
            ncm,
            unit: self.unit,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total,
            taxes,
        })
    }

    /// Validate every field, then compute the item's taxes under `regime`.
    ///
    /// All field errors are reported together, joined by `"; "`.
    pub fn build(self, regime: &TaxRegime) -> Result<LineItem, FiscalError> {
        let errors = self.field_errors();
        if !errors.is_empty() {
            return Err(FiscalError::Validation(join(&errors)));
        }
        self.assemble(regime)
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// An assembled fiscal document, ready for the transmission layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalDocument {
    pub issue_date: NaiveDate,
    pub regime: TaxRegime,
    pub items: Vec<LineItem>,
    pub totals: DocumentTotals,
    /// Additional information (infCpl): legal notices, caller notes and the
    /// approximate-tax disclosure, in that order.
    pub observations: Vec<String>,
}

/// Builder for a [`FiscalDocument`] under a single regime.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    issue_date: NaiveDate,
    regime: TaxRegime,
    items: Vec<LineItemBuilder>,
    notes: Vec<String>,
}

impl DocumentBuilder {
    pub fn new(issue_date: NaiveDate, regime: TaxRegime) -> Self {
        Self {
            issue_date,
            regime,
            items: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn add_item(mut self, item: LineItemBuilder) -> Self {
        self.items.push(item);
        self
    }

    /// Free-form note appended after the legal observations.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Validate every item, compute taxes and totals, and generate the
    /// observations.
    ///
    /// Field errors from all items are reported together, each prefixed with
    /// its position (e.g. `items[2].ncm: ...`).
    pub fn build(self) -> Result<FiscalDocument, FiscalError> {
        if self.items.is_empty() {
            return Err(FiscalError::Builder(
                "at least one line item is required".into(),
            ));
        }
        if self.items.len() > MAX_ITEMS {
            return Err(FiscalError::Builder(format!(
                "document cannot have more than {MAX_ITEMS} line items"
            )));
        }
        if self.notes.len() > MAX_NOTES {
            return Err(FiscalError::Builder(format!(
                "document cannot have more than {MAX_NOTES} notes"
            )));
        }

        let errors: Vec<ValidationError> = self
            .items
            .iter()
            .enumerate()
            .flat_map(|(i, item)| {
                item.field_errors().into_iter().map(move |e| {
                    ValidationError::new(format!("items[{i}].{}", e.field), e.message)
                })
            })
            .collect();
        if !errors.is_empty() {
            return Err(FiscalError::Validation(join(&errors)));
        }

        let items = self
            .items
            .into_iter()
            .map(|item| item.assemble(&self.regime))
            .collect::<Result<Vec<_>, _>>()?;
        let totals = summarize(&items);

        // Reform notices depend on the NCM; disclose for tobacco if any item is.
        let disclosed = items
            .iter()
            .find(|item| is_tobacco_ncm(&item.ncm))
            .or_else(|| items.first())
            .map_or_else(|| self.regime.clone(), |item| self.regime.for_item(&item.ncm));

        let mut observations = legal_observations_on(&disclosed, self.issue_date);
        observations.extend(self.notes);
        observations.push(transparency_notice(totals.taxes, totals.products));

        tracing::debug!(
            regime = self.regime.tag(),
            items = totals.item_count,
            products = %totals.products,
            taxes = %totals.taxes,
            "document assembled"
        );

        Ok(FiscalDocument {
            issue_date: self.issue_date,
            regime: self.regime,
            items,
            totals,
            observations,
        })
    }
}
