#![no_main]

use libfuzzer_sys::fuzz_target;
use tributa::*;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Validators report invalid input through ValidationResult, never a panic.
        let _ = validate_cpf_cnpj(s);
        let _ = validate_cep(s);
        let _ = validate_ncm(s);
        let _ = validate_cfop(s);
        let _ = validate_gtin(s, Requirement::Required);
        let _ = validate_email(s);
        let _ = validate_monetary_amount(s, Requirement::Optional);
        let _ = validate_quantity(s);

        let formatted = format_cnpj(s);
        assert_eq!(format_cnpj(&formatted), formatted);
    }
});
