//! Brazilian federative units (UF) and their internal ICMS rates.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::FiscalError;

/// One of the 26 states or the Federal District.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Uf {
    AC,
    AL,
    AM,
    AP,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MG,
    MS,
    MT,
    PA,
    PB,
    PE,
    PI,
    PR,
    RJ,
    RN,
    RO,
    RR,
    RS,
    SC,
    SE,
    SP,
    TO,
}

impl Uf {
    /// Every unit, sorted by code.
    pub const ALL: [Uf; 27] = [
        Uf::AC,
        Uf::AL,
        Uf::AM,
        Uf::AP,
        Uf::BA,
        Uf::CE,
        Uf::DF,
        Uf::ES,
        Uf::GO,
        Uf::MA,
        Uf::MG,
        Uf::MS,
        Uf::MT,
        Uf::PA,
        Uf::PB,
        Uf::PE,
        Uf::PI,
        Uf::PR,
        Uf::RJ,
        Uf::RN,
        Uf::RO,
        Uf::RR,
        Uf::RS,
        Uf::SC,
        Uf::SE,
        Uf::SP,
        Uf::TO,
    ];

    /// Two-letter code.
    pub fn code(self) -> &'static str {
        match self {
            Uf::AC => "AC",
            Uf::AL => "AL",
            Uf::AM => "AM",
            Uf::AP => "AP",
            Uf::BA => "BA",
            Uf::CE => "CE",
            Uf::DF => "DF",
            Uf::ES => "ES",
            Uf::GO => "GO",
            Uf::MA => "MA",
            Uf::MG => "MG",
            Uf::MS => "MS",
            Uf::MT => "MT",
            Uf::PA => "PA",
            Uf::PB => "PB",
            Uf::PE => "PE",
            Uf::PI => "PI",
            Uf::PR => "PR",
            Uf::RJ => "RJ",
            Uf::RN => "RN",
            Uf::RO => "RO",
            Uf::RR => "RR",
            Uf::RS => "RS",
            Uf::SC => "SC",
            Uf::SE => "SE",
            Uf::SP => "SP",
            Uf::TO => "TO",
        }
    }

    /// Internal (intrastate) ICMS modal rate in percent.
    pub fn icms_rate(self) -> Decimal {
        match self {
            Uf::AC => dec!(19),
            Uf::AL => dec!(19),
            Uf::AM => dec!(20),
            Uf::AP => dec!(18),
            Uf::BA => dec!(20.5),
            Uf::CE => dec!(20),
            Uf::DF => dec!(20),
            Uf::ES => dec!(17),
            Uf::GO => dec!(19),
            Uf::MA => dec!(22),
            Uf::MG => dec!(18),
            Uf::MS => dec!(17),
            Uf::MT => dec!(17),
            Uf::PA => dec!(19),
            Uf::PB => dec!(20),
            Uf::PE => dec!(20.5),
            Uf::PI => dec!(21),
            Uf::PR => dec!(19.5),
            Uf::RJ => dec!(22),
            Uf::RN => dec!(18),
            Uf::RO => dec!(19.5),
            Uf::RR => dec!(20),
            Uf::RS => dec!(17),
            Uf::SC => dec!(17),
            Uf::SE => dec!(19),
            Uf::SP => dec!(18),
            Uf::TO => dec!(20),
        }
    }
}

impl fmt::Display for Uf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Uf {
    type Err = FiscalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Uf::ALL
            .binary_search_by(|uf| uf.code().cmp(code.as_str()))
            .map(|i| Uf::ALL[i])
            .map_err(|_| FiscalError::UnknownState(s.trim().to_string()))
    }
}

impl TryFrom<String> for Uf {
    type Error = FiscalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Uf> for String {
    fn from(uf: Uf) -> Self {
        uf.code().to_string()
    }
}
