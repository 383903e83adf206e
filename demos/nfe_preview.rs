use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;
use tributa::tributos::*;
use tributa::*;

fn main() {
    // RUST_LOG=tributa=debug shows each calculation
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let buyer = "11.222.333/0001-81";
    println!("Destinatário: {} ({})", format_cnpj(buyer), if validate_cnpj(buyer).valid { "válido" } else { "inválido" });

    let regime = TaxRegime::SimplesNacional {
        anexo: Anexo::I,
        faixa: Faixa::for_revenue(dec!(350_000)).unwrap(),
    };

    let document = DocumentBuilder::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), regime)
        .add_item(
            LineItemBuilder::new("REF-350", "Refrigerante lata 350ml", dec!(24), dec!(4.50))
                .ncm("2202.10.00")
                .cfop("5102")
                .gtin("7891000315507"),
        )
        .add_item(
            LineItemBuilder::new("CAF-500", "Café torrado 500g", dec!(6), dec!(18.90))
                .ncm("0901.21.00")
                .cfop("5102")
                .gtin("SEM GTIN"),
        )
        .note("Pedido 2026/0417")
        .build();

    let document = match document {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Erro: {e}");
            std::process::exit(1);
        }
    };

    println!("Regime: {}", document.regime);
    for item in &document.items {
        println!(
            "{:<8} NCM {} CFOP {} {:>12}  ICMS {:>10} (CSOSN {})",
            item.code,
            format_ncm(&item.ncm),
            format_cfop(&item.cfop),
            format_brl(item.total),
            format_brl(item.taxes.icms.amount),
            item.taxes.icms.cst,
        );
    }
    println!("Produtos: {}", format_brl(document.totals.products));
    println!("Tributos: {}", format_brl(document.totals.taxes));
    println!();
    for line in &document.observations {
        println!("{line}");
    }
}
