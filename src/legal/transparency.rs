use rust_decimal::Decimal;

use crate::core::format_brl;
use crate::tributos::tax_burden_percent;

/// Approximate-tax disclosure required on consumer sales by Lei 12.741/2012
/// ("De Olho no Imposto").
///
/// The percentage is relative to `products` and rendered with two decimal
/// places; zero products gives 0,00%.
pub fn transparency_notice(taxes: Decimal, products: Decimal) -> String {
    let percent = format!("{:.2}", tax_burden_percent(taxes, products)).replace('.', ",");
    format!(
        "Valor aproximado dos tributos: {} ({percent}%). Fonte: Lei 12.741/2012.",
        format_brl(taxes),
    )
}
