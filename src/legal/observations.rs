use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{format_brl, format_ncm, is_tobacco_ncm};
use crate::tributos::{
    Anexo, CBS_RATE, COFINS_CUMULATIVO, CREDIT_SHARE, Faixa, IBS_RATE, IS_TOBACCO_RATE,
    PIS_CUMULATIVO, ReformPhase, TaxRegime, effective_rate,
};
use crate::tributos::simples::itemized_share;

/// Appended to every set of observations, whatever the regime.
pub const REFORM_READINESS_NOTICE: [&str; 2] = [
    "Sistema preparado para a Reforma Tributária do consumo (EC 132/2023): IBS, CBS e Imposto Seletivo.",
    "IBS e CBS serão exigidos conforme o cronograma de transição de 2026 a 2033.",
];

/// Percentage in pt-BR notation without trailing zeros (`8,8`, `4,825`, `18`).
fn percent_br(value: Decimal) -> String {
    value.normalize().to_string().replace('.', ",")
}

fn simples(anexo: Anexo, faixa: Faixa) -> Vec<String> {
    vec![
        "Documento emitido por ME ou EPP optante pelo Simples Nacional.".into(),
        "Não gera direito a crédito fiscal de IPI.".into(),
        "Não gera direito a crédito fiscal de ICMS.".into(),
        format!(
            "Tributação pelo Anexo {anexo} da LC 123/2006, receita bruta em 12 meses até {}, alíquota efetiva de {}%.",
            format_brl(faixa.revenue_ceiling()),
            percent_br(effective_rate(anexo, faixa)),
        ),
        format!(
            "ICMS, PIS e COFINS destacados correspondem a {}% da alíquota efetiva; os demais tributos são recolhidos no DAS.",
            percent_br(itemized_share() * Decimal::ONE_HUNDRED),
        ),
    ]
}

fn reforma(ncm: &str, tem_credito: bool) -> Vec<String> {
    let mut lines = vec![
        "Documento emitido em preparação para a Reforma Tributária (EC 132/2023 e LC 214/2025)."
            .to_string(),
        format!(
            "IBS e CBS destacados às alíquotas de referência de {}% e {}%, em caráter informativo.",
            percent_br(IBS_RATE),
            percent_br(CBS_RATE),
        ),
    ];
    if tem_credito {
        lines.push(format!(
            "Operação com direito a crédito de {}% do IBS e da CBS destacados.",
            percent_br(CREDIT_SHARE * Decimal::ONE_HUNDRED),
        ));
    }
    if is_tobacco_ncm(ncm) {
        lines.push(format!(
            "Incidência de Imposto Seletivo de {}% sobre produto fumígeno (NCM {}).",
            percent_br(IS_TOBACCO_RATE),
            format_ncm(ncm),
        ));
    }
    lines
}

/// Mandatory disclosure lines for a regime, followed by
/// [`REFORM_READINESS_NOTICE`].
///
/// Lines are pt-BR and deterministic; the order is the order in which they
/// are printed on the document.
pub fn legal_observations(regime: &TaxRegime) -> Vec<String> {
    let mut lines = match regime {
        TaxRegime::SimplesNacional { anexo, faixa } => simples(*anexo, *faixa),
        TaxRegime::LucroPresumido { uf } => vec![
            "Empresa optante pelo Lucro Presumido.".into(),
            format!(
                "PIS e COFINS apurados no regime cumulativo (Lei 9.718/1998), alíquotas de {}% e {}%.",
                percent_br(PIS_CUMULATIVO),
                percent_br(COFINS_CUMULATIVO),
            ),
            format!(
                "ICMS calculado à alíquota interna de {}% ({uf}).",
                percent_br(uf.icms_rate())
            ),
        ],
        TaxRegime::LucroReal { uf, tem_credito } => vec![
            "Empresa optante pelo Lucro Real.".into(),
            if *tem_credito {
                "Operação com direito a crédito de PIS e COFINS no regime não cumulativo (Leis 10.637/2002 e 10.833/2003).".into()
            } else {
                "Operação sem direito a crédito de PIS e COFINS.".into()
            },
            format!(
                "ICMS calculado à alíquota interna de {}% ({uf}).",
                percent_br(uf.icms_rate())
            ),
        ],
        TaxRegime::SubstituicaoTributaria { uf, mva } => vec![
            "ICMS retido por Substituição Tributária nos termos do art. 150, § 7º, da Constituição Federal e da LC 87/1996.".into(),
            format!(
                "MVA aplicada de {}% sobre o valor da operação, alíquota interna de {}% ({uf}).",
                percent_br(*mva),
                percent_br(uf.icms_rate()),
            ),
            "PIS e COFINS tributados por substituição tributária (CST 05).".into(),
        ],
        TaxRegime::Reforma2026 { ncm, tem_credito } => reforma(ncm, *tem_credito),
    };

    lines.extend(REFORM_READINESS_NOTICE.iter().map(|s| s.to_string()));
    lines
}

/// [`legal_observations`] plus the reform phase in force on `date`.
pub fn legal_observations_on(regime: &TaxRegime, date: NaiveDate) -> Vec<String> {
    let mut lines = legal_observations(regime);
    lines.push(format!(
        "Fase da Reforma Tributária em {}: {}.",
        date.format("%d/%m/%Y"),
        ReformPhase::for_date(date),
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Uf;
    use rust_decimal_macros::dec;

    #[test]
    fn percent_formatting() {
        assert_eq!(percent_br(dec!(8.8)), "8,8");
        assert_eq!(percent_br(dec!(18.00)), "18");
        assert_eq!(percent_br(dec!(4.825)), "4,825");
    }

    #[test]
    fn every_regime_ends_with_readiness_block() {
        let regimes = [
            TaxRegime::SimplesNacional {
                anexo: Anexo::I,
                faixa: Faixa::new(0).unwrap(),
            },
            TaxRegime::LucroPresumido { uf: Uf::SP },
            TaxRegime::LucroReal {
                uf: Uf::SP,
                tem_credito: false,
            },
            TaxRegime::SubstituicaoTributaria {
                uf: Uf::SP,
                mva: dec!(30),
            },
            TaxRegime::Reforma2026 {
                ncm: "22021000".into(),
                tem_credito: false,
            },
        ];
        for regime in &regimes {
            let lines = legal_observations(regime);
            assert!(lines.len() > REFORM_READINESS_NOTICE.len());
            assert_eq!(&lines[lines.len() - 2..], &REFORM_READINESS_NOTICE, "{regime}");
        }
    }

    #[test]
    fn simples_shows_effective_rate() {
        let lines = legal_observations(&TaxRegime::SimplesNacional {
            anexo: Anexo::I,
            faixa: Faixa::new(0).unwrap(),
        });
        assert!(lines[3].contains("R$ 240.000,00"));
        assert!(lines[3].contains("4,825%"));
        assert!(lines[4].starts_with("ICMS, PIS e COFINS destacados correspondem a 79%"));
    }

    #[test]
    fn reforma_credit_and_tobacco_lines() {
        let with = legal_observations(&TaxRegime::Reforma2026 {
            ncm: "24022000".into(),
            tem_credito: true,
        });
        assert!(with.iter().any(|l| l.contains("crédito de 90%")));
        assert!(with.iter().any(|l| l.contains("NCM 2402.20.00")));

        let without = legal_observations(&TaxRegime::Reforma2026 {
            ncm: "22021000".into(),
            tem_credito: false,
        });
        assert_eq!(without.len(), 4);
    }

    #[test]
    fn phase_line_appended() {
        let date = NaiveDate::from_ymd_opt(2030, 5, 2).unwrap();
        let lines = legal_observations_on(&TaxRegime::LucroPresumido { uf: Uf::RJ }, date);
        assert_eq!(
            lines.last().unwrap(),
            "Fase da Reforma Tributária em 02/05/2030: transição com redução de 20% nas alíquotas de ICMS."
        );
    }
}
