use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::format::digits_only;
use crate::core::{FiscalError, Uf, validate_ncm};

/// Simples Nacional annex (LC 123/2006), which selects the rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anexo {
    /// Commerce.
    I,
    /// Industry.
    II,
    /// Services (general).
    III,
    /// Services with separate CPP (construction, cleaning, law).
    IV,
    /// Services subject to the payroll factor.
    V,
}

impl Anexo {
    pub const ALL: [Anexo; 5] = [Anexo::I, Anexo::II, Anexo::III, Anexo::IV, Anexo::V];

    pub(crate) fn index(self) -> usize {
        match self {
            Anexo::I => 0,
            Anexo::II => 1,
            Anexo::III => 2,
            Anexo::IV => 3,
            Anexo::V => 4,
        }
    }

    pub fn roman(self) -> &'static str {
        match self {
            Anexo::I => "I",
            Anexo::II => "II",
            Anexo::III => "III",
            Anexo::IV => "IV",
            Anexo::V => "V",
        }
    }
}

impl fmt::Display for Anexo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.roman())
    }
}

impl FromStr for Anexo {
    type Err = FiscalError;

    /// Accepts roman (`"III"`) or arabic (`"3"`) numerals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "I" | "1" => Ok(Anexo::I),
            "II" | "2" => Ok(Anexo::II),
            "III" | "3" => Ok(Anexo::III),
            "IV" | "4" => Ok(Anexo::IV),
            "V" | "5" => Ok(Anexo::V),
            _ => Err(FiscalError::InvalidAnexo(s.trim().to_string())),
        }
    }
}

/// Revenue bracket index, 0..=19.
///
/// Bracket `n` covers trailing twelve-month revenue (RBT12) up to
/// `240,000 * (n + 1)`, so the twenty brackets tile the R$ 4.8M ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Faixa(u8);

impl Faixa {
    pub const COUNT: usize = 20;
    const WIDTH: Decimal = dec!(240_000);

    pub fn new(index: u8) -> Result<Self, FiscalError> {
        if usize::from(index) < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(FiscalError::InvalidBracket(index))
        }
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Upper RBT12 bound of this bracket.
    pub fn revenue_ceiling(self) -> Decimal {
        Self::WIDTH * Decimal::from(self.0 + 1)
    }

    /// The bracket that contains a given RBT12.
    pub fn for_revenue(rbt12: Decimal) -> Result<Self, FiscalError> {
        if rbt12.is_sign_negative() {
            return Err(FiscalError::Config(format!("negative revenue {rbt12}")));
        }
        let index = ((rbt12 / Self::WIDTH).ceil() - Decimal::ONE).max(Decimal::ZERO);
        match index.to_u8() {
            Some(i) if usize::from(i) < Self::COUNT => Ok(Self(i)),
            _ => Err(FiscalError::Config(format!(
                "revenue {rbt12} exceeds the Simples Nacional ceiling"
            ))),
        }
    }
}

impl TryFrom<u8> for Faixa {
    type Error = FiscalError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Faixa> for u8 {
    fn from(faixa: Faixa) -> Self {
        faixa.0
    }
}

/// The tax regime a line item is computed under.
///
/// Closed set: every calculation matches on it exhaustively, and an
/// unknown tag in configuration is rejected rather than defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "regime")]
pub enum TaxRegime {
    /// Simplified regime for micro and small companies (ME/EPP).
    #[serde(rename = "simples")]
    SimplesNacional { anexo: Anexo, faixa: Faixa },

    /// Presumed profit; cumulative PIS/COFINS.
    #[serde(rename = "presumido")]
    LucroPresumido { uf: Uf },

    /// Actual profit; non-cumulative PIS/COFINS.
    #[serde(rename = "real")]
    LucroReal {
        uf: Uf,
        #[serde(default)]
        tem_credito: bool,
    },

    /// ICMS withheld by substitution; `mva` is the markup in percent.
    #[serde(rename = "st")]
    SubstituicaoTributaria { uf: Uf, mva: Decimal },

    /// Preparation for the IBS/CBS/IS model.
    #[serde(rename = "reforma2026")]
    Reforma2026 {
        ncm: String,
        #[serde(default)]
        tem_credito: bool,
    },
}

impl TaxRegime {
    /// Configuration tags, in declaration order.
    pub const TAGS: [&'static str; 5] = ["simples", "presumido", "real", "st", "reforma2026"];

    /// Upper bound accepted for the ST markup, in percent.
    pub const MAX_MVA: Decimal = dec!(1000);

    pub fn tag(&self) -> &'static str {
        match self {
            TaxRegime::SimplesNacional { .. } => "simples",
            TaxRegime::LucroPresumido { .. } => "presumido",
            TaxRegime::LucroReal { .. } => "real",
            TaxRegime::SubstituicaoTributaria { .. } => "st",
            TaxRegime::Reforma2026 { .. } => "reforma2026",
        }
    }

    /// Check the values serde cannot (MVA range, NCM shape).
    pub fn validate(&self) -> Result<(), FiscalError> {
        match self {
            TaxRegime::SubstituicaoTributaria { mva, .. } if mva.is_sign_negative() => Err(
                FiscalError::Config(format!("MVA must not be negative, got {mva}")),
            ),
            TaxRegime::SubstituicaoTributaria { mva, .. } if *mva > Self::MAX_MVA => Err(
                FiscalError::Config(format!("MVA must be at most {}%, got {mva}", Self::MAX_MVA)),
            ),
            TaxRegime::Reforma2026 { ncm, .. } => {
                let check = validate_ncm(ncm);
                if check.valid {
                    Ok(())
                } else {
                    Err(FiscalError::Config(check.error.unwrap_or_default()))
                }
            }
            _ => Ok(()),
        }
    }

    /// The regime to apply to an item with the given NCM.
    ///
    /// Only the reform-preparation regime depends on the NCM, so it is the
    /// only variant rebound.
    pub fn for_item(&self, ncm: &str) -> TaxRegime {
        match self {
            TaxRegime::Reforma2026 { tem_credito, .. } => TaxRegime::Reforma2026 {
                ncm: digits_only(ncm),
                tem_credito: *tem_credito,
            },
            other => other.clone(),
        }
    }

    /// Parse a JSON regime configuration such as
    /// `{"regime": "st", "uf": "SP", "mva": "30"}`.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> Result<Self, FiscalError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| FiscalError::Config(e.to_string()))?;
        let tag = value
            .get("regime")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| FiscalError::Config("missing 'regime' tag".into()))?;
        if !Self::TAGS.contains(&tag) {
            return Err(FiscalError::UnknownRegime(tag.to_string()));
        }

        let regime: TaxRegime =
            serde_json::from_value(value).map_err(|e| FiscalError::Config(e.to_string()))?;
        regime.validate()?;
        Ok(regime)
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxRegime::SimplesNacional { anexo, faixa } => {
                write!(f, "Simples Nacional (Anexo {anexo}, faixa {})", faixa.index())
            }
            TaxRegime::LucroPresumido { uf } => write!(f, "Lucro Presumido ({uf})"),
            TaxRegime::LucroReal { uf, .. } => write!(f, "Lucro Real ({uf})"),
            TaxRegime::SubstituicaoTributaria { uf, mva } => {
                write!(f, "Substituição Tributária ({uf}, MVA {mva}%)")
            }
            TaxRegime::Reforma2026 { ncm, .. } => write!(f, "Reforma Tributária 2026 (NCM {ncm})"),
        }
    }
}
