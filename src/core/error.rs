use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while configuring a regime or building fiscal documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FiscalError {
    /// One or more field validations failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// A regime tag did not match any supported tax regime.
    #[error("unknown tax regime '{0}'")]
    UnknownRegime(String),

    /// A state code is not one of the 27 federative units.
    #[error("unknown federative unit '{0}'")]
    UnknownState(String),

    /// Simples Nacional anexo outside I..V.
    #[error("invalid Simples Nacional anexo '{0}' (expected I, II, III, IV or V)")]
    InvalidAnexo(String),

    /// Simples Nacional revenue bracket outside 0..=19.
    #[error("invalid Simples Nacional revenue bracket {0} (expected 0..=19)")]
    InvalidBracket(u8),

    /// Malformed regime configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A single field validation failure collected by the builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items[0].ncm").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a single field validator.
///
/// Expected-invalid input (empty, wrong length, checksum mismatch) is reported
/// here rather than through `Err` or a panic. A valid result may still carry
/// a `warning` for the form layer to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// Why the value was rejected (pt-BR, user facing).
    pub error: Option<String>,
    /// Informational message that does not invalidate the value.
    pub warning: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            warning: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Convert into a builder-level [`ValidationError`] for `field`, if invalid.
    pub fn into_error(self, field: impl Into<String>) -> Option<ValidationError> {
        if self.valid {
            return None;
        }
        let message = self.error.unwrap_or_else(|| "valor inválido".to_string());
        Some(ValidationError::new(field, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_has_no_messages() {
        let r = ValidationResult::ok();
        assert!(r.is_valid());
        assert!(r.error.is_none());
        assert!(r.warning.is_none());
    }

    #[test]
    fn warning_keeps_validity() {
        let r = ValidationResult::ok().with_warning("atenção");
        assert!(r.valid);
        assert_eq!(r.warning.as_deref(), Some("atenção"));
    }

    #[test]
    fn invalid_converts_to_field_error() {
        let err = ValidationResult::invalid("NCM deve ter 8 dígitos")
            .into_error("items[0].ncm")
            .unwrap();
        assert_eq!(err.to_string(), "items[0].ncm: NCM deve ter 8 dígitos");
    }

    #[test]
    fn valid_converts_to_none() {
        assert!(ValidationResult::ok().into_error("cep").is_none());
    }
}
