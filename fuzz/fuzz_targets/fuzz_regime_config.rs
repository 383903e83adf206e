#![no_main]

use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;
use tributa::tributos::{TaxRegime, calculate_taxes};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Any accepted configuration must be computable.
        if let Ok(regime) = TaxRegime::from_json(s) {
            let taxes = calculate_taxes(Decimal::ONE_HUNDRED, &regime);
            assert_eq!(taxes.total, {
                let gross: Decimal = taxes.components().map(|c| c.amount).sum();
                gross - taxes.credits
            });
        }
    }
});
