use rust_decimal_macros::dec;
use tributa::FiscalError;
use tributa::tributos::{TaxRegime, calculate_taxes};

const CONFIGS: [&str; 6] = [
    r#"{"regime": "simples", "anexo": "III", "faixa": 4}"#,
    r#"{"regime": "presumido", "uf": "SP"}"#,
    r#"{"regime": "real", "uf": "RJ", "tem_credito": true}"#,
    r#"{"regime": "st", "uf": "SP", "mva": "30"}"#,
    r#"{"regime": "reforma2026", "ncm": "2402.20.00", "tem_credito": true}"#,
    r#"{"regime": "mei"}"#,
];

fn main() {
    for json in CONFIGS {
        match TaxRegime::from_json(json) {
            Ok(regime) => {
                let taxes = calculate_taxes(dec!(1000), &regime);
                println!("{regime}: tributos sobre R$ 1000 = {}", taxes.total);
            }
            Err(FiscalError::UnknownRegime(tag)) => {
                println!("regime '{tag}' não suportado");
            }
            Err(e) => println!("configuração inválida: {e}"),
        }
    }
}
