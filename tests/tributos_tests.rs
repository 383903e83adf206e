//! Regime calculator and builder tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tributa::Uf;
use tributa::tributos::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn faixa(n: u8) -> Faixa {
    Faixa::new(n).unwrap()
}

fn item(code: &str, quantity: Decimal, price: Decimal, ncm: &str) -> LineItemBuilder {
    LineItemBuilder::new(code, format!("Produto {code}"), quantity, price)
        .ncm(ncm)
        .cfop("5102")
        .gtin("SEM GTIN")
}

// ── Regimes ──────────────────────────────────────────────────────────────────

#[test]
fn lucro_presumido_sp() {
    let b = calculate_taxes(dec!(1000), &TaxRegime::LucroPresumido { uf: Uf::SP });
    assert_eq!(b.icms.amount, dec!(180.00));
    assert_eq!(b.pis.amount, dec!(6.50));
    assert_eq!(b.cofins.amount, dec!(30.00));
    assert_eq!(b.total, dec!(216.50));
    assert!(b.ipi.is_none());
}

#[test]
fn substituicao_sp_mva_30() {
    let b = calculate_taxes(
        dec!(1000),
        &TaxRegime::SubstituicaoTributaria {
            uf: Uf::SP,
            mva: dec!(30),
        },
    );
    assert_eq!(b.icms.base, dec!(1300));
    assert_eq!(b.icms.amount, dec!(234.00));
    assert_eq!(b.pis.amount, Decimal::ZERO);
    assert_eq!(b.cofins.amount, Decimal::ZERO);
}

#[test]
fn lucro_real_credit_flag_changes_cst_only() {
    let with = calculate_taxes(
        dec!(1000),
        &TaxRegime::LucroReal {
            uf: Uf::RS,
            tem_credito: true,
        },
    );
    let without = calculate_taxes(
        dec!(1000),
        &TaxRegime::LucroReal {
            uf: Uf::RS,
            tem_credito: false,
        },
    );
    assert_eq!(with.total, without.total);
    assert_eq!(with.icms.amount, dec!(170.00));
    assert_eq!(with.pis.cst, "01");
    assert_eq!(without.pis.cst, "49");
}

#[test]
fn simples_anexo_i_first_bracket() {
    let b = calculate_taxes(
        dec!(1000),
        &TaxRegime::SimplesNacional {
            anexo: Anexo::I,
            faixa: faixa(0),
        },
    );
    assert_eq!(b.icms.cst, "102");
    assert_eq!(b.icms.amount, dec!(16.41));
    assert_eq!(b.pis.amount, dec!(3.86));
    assert_eq!(b.cofins.amount, dec!(17.85));
    assert_eq!(b.total, dec!(38.12));
}

#[test]
fn simples_table_anchor_values() {
    assert_eq!(effective_rate(Anexo::I, faixa(0)), dec!(4.825));
    assert_eq!(effective_rate(Anexo::I, faixa(19)), dec!(11.125));
    assert_eq!(effective_rate(Anexo::III, faixa(4)), dec!(13.03));
    assert_eq!(effective_rate(Anexo::V, faixa(0)), dec!(16.125));
}

#[test]
fn simples_rates_below_nominal_cap() {
    for anexo in Anexo::ALL {
        for n in 0..20 {
            let rate = effective_rate(anexo, faixa(n));
            assert!(rate > Decimal::ZERO && rate < dec!(33), "{anexo}/{n}: {rate}");
        }
    }
}

#[test]
fn reforma_tobacco_with_credit() {
    let b = calculate_taxes(
        dec!(1000),
        &TaxRegime::Reforma2026 {
            ncm: "24022000".into(),
            tem_credito: true,
        },
    );
    assert_eq!(b.icms.amount, Decimal::ZERO);
    assert_eq!(b.ibs.unwrap().amount, dec!(88.00));
    assert_eq!(b.cbs.unwrap().amount, dec!(88.00));
    assert_eq!(b.selective.unwrap().amount, dec!(10.00));
    assert_eq!(b.credits, dec!(158.40));
    assert_eq!(b.total, dec!(27.60));
}

#[test]
fn reform_phase_timeline() {
    assert_eq!(ReformPhase::for_date(date(2024, 1, 1)), ReformPhase::Legacy);
    assert_eq!(ReformPhase::for_date(date(2026, 10, 16)), ReformPhase::Test);
    assert_eq!(
        ReformPhase::for_date(date(2031, 1, 1)),
        ReformPhase::Transition { icms_reduction: 30 }
    );
    assert_eq!(ReformPhase::for_date(date(2040, 1, 1)), ReformPhase::Full);
}

#[test]
fn st_base_helper() {
    assert_eq!(st_base(dec!(1000), dec!(30)), dec!(1300.00));
}

// ── Builders ─────────────────────────────────────────────────────────────────

#[test]
fn line_item_total_is_rounded_product() {
    let line = item("A", dec!(3), dec!(10.005), "73181500")
        .build(&TaxRegime::LucroPresumido { uf: Uf::SP })
        .unwrap();
    assert_eq!(line.total, dec!(30.02));
    assert_eq!(line.cfop, "5102");
}

#[test]
fn line_item_strips_code_separators() {
    let line = item("A", dec!(1), dec!(10), "7318.15.00")
        .cfop("5.102")
        .build(&TaxRegime::LucroPresumido { uf: Uf::SP })
        .unwrap();
    assert_eq!(line.ncm, "73181500");
    assert_eq!(line.cfop, "5102");
}

#[test]
fn document_mixed_ncm_under_reforma() {
    let doc = DocumentBuilder::new(
        date(2026, 3, 2),
        TaxRegime::Reforma2026 {
            ncm: "22021000".into(),
            tem_credito: false,
        },
    )
    .add_item(item("BEB", dec!(10), dec!(100), "22021000"))
    .add_item(item("FUMO", dec!(1), dec!(1000), "24022000"))
    .build()
    .unwrap();

    assert!(doc.items[0].taxes.selective.is_none());
    assert!(doc.items[1].taxes.selective.is_some());
    assert_eq!(doc.totals.products, dec!(2000));
    assert_eq!(doc.totals.ibs, dec!(176.00));
    assert_eq!(doc.totals.selective, dec!(10.00));
    assert_eq!(doc.totals.taxes, dec!(362.00));
    assert!(doc.observations.iter().any(|o| o.contains("Imposto Seletivo de 1%")));
    assert!(doc.observations.iter().any(|o| o.contains("ano de teste")));
}

#[test]
fn document_rejects_too_many_items() {
    let mut builder = DocumentBuilder::new(date(2026, 1, 5), TaxRegime::LucroPresumido { uf: Uf::SP });
    for i in 0..=MAX_ITEMS {
        builder = builder.add_item(item(&i.to_string(), dec!(1), dec!(1), "22021000"));
    }
    let err = builder.build().unwrap_err();
    assert!(err.to_string().contains("990"));
}

#[test]
fn document_reports_every_invalid_item() {
    let err = DocumentBuilder::new(date(2026, 1, 5), TaxRegime::LucroPresumido { uf: Uf::SP })
        .add_item(item("A", dec!(0), dec!(10), "22021000"))
        .add_item(item("B", dec!(1), dec!(10), "22021000"))
        .add_item(item("C", dec!(1), dec!(10), "22021000").cfop("9999"))
        .build()
        .unwrap_err()
        .to_string();
    assert!(err.contains("items[0].quantity"), "{err}");
    assert!(err.contains("items[2].cfop"), "{err}");
    assert!(!err.contains("items[1]"), "{err}");
}

#[test]
fn document_serializes_to_json() {
    let doc = DocumentBuilder::new(date(2026, 1, 5), TaxRegime::LucroPresumido { uf: Uf::SP })
        .add_item(item("A", dec!(2), dec!(500), "22021000"))
        .build()
        .unwrap();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["regime"]["regime"], "presumido");
    assert_eq!(json["regime"]["uf"], "SP");
    let taxes: Decimal = json["totals"]["taxes"].as_str().unwrap().parse().unwrap();
    assert_eq!(taxes, dec!(216.50));
    assert_eq!(json["items"][0]["taxes"]["icms"]["cst"], "00");
}
