//! Validation error types with user-facing messages.
//!
//! Validation never throws across the form seam: errors are data, collected
//! per field in a [`FieldErrors`] report so the presentation layer can render
//! them inline.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// The kind of validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required field was empty.
    Required,
    /// Input exceeded the maximum allowed length.
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length of input.
        actual: usize,
    },
    /// Input was not a well-formed http/https URL.
    InvalidUrl,
    /// Input was not a well-formed hostname.
    InvalidHost,
    /// Input was not a number in the valid port range.
    PortOutOfRange,
    /// Input was not a well-formed email address.
    InvalidEmail {
        /// The offending address.
        address: String,
    },
    /// Input was not a well-formed AWS ARN.
    InvalidArn,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required field cannot be empty"),
            Self::TooLong { max, actual } => {
                write!(f, "input exceeds {max} characters ({actual} given)")
            }
            Self::InvalidUrl => write!(f, "expected a valid http or https URL"),
            Self::InvalidHost => write!(f, "expected a valid hostname"),
            Self::PortOutOfRange => {
                write!(f, "port must be a number between 0 and 65535")
            }
            Self::InvalidEmail { address } => {
                write!(f, "'{address}' is not a valid email address")
            }
            Self::InvalidArn => write!(f, "expected a valid ARN"),
        }
    }
}

/// A single validation failure attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for '{field}': {kind}")]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// The kind of failure.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Creates a "required" error.
    #[must_use]
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::Required)
    }

    /// Creates a "too long" error.
    #[must_use]
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::new(field, ValidationErrorKind::TooLong { max, actual })
    }

    /// Creates an "invalid URL" error.
    #[must_use]
    pub fn invalid_url(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::InvalidUrl)
    }

    /// Creates an "invalid host" error.
    #[must_use]
    pub fn invalid_host(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::InvalidHost)
    }

    /// Creates a "port out of range" error.
    #[must_use]
    pub fn port_out_of_range(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::PortOutOfRange)
    }

    /// Creates an "invalid email" error.
    #[must_use]
    pub fn invalid_email(field: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(
            field,
            ValidationErrorKind::InvalidEmail {
                address: address.into(),
            },
        )
    }

    /// Creates an "invalid ARN" error.
    #[must_use]
    pub fn invalid_arn(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::InvalidArn)
    }

    /// Returns the user-facing message without the field prefix.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Check if this is a "required" error.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::Required)
    }
}

/// Per-field validation report for a whole form.
///
/// Each field's error list is replaced wholesale on every validation pass,
/// never appended to, so reports are never partially stale. Iteration is in
/// field-key order for deterministic rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<ValidationError>>,
}

impl FieldErrors {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the error list for a field.
    pub fn replace(&mut self, field: &str, errors: Vec<ValidationError>) {
        self.errors.insert(field.to_string(), errors);
    }

    /// Returns the errors recorded for a field (empty slice = valid).
    #[must_use]
    pub fn errors_for(&self, field: &str) -> &[ValidationError] {
        self.errors.get(field).map_or(&[], Vec::as_slice)
    }

    /// Returns true when no field has any error.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// Returns the number of fields with at least one error.
    #[must_use]
    pub fn invalid_field_count(&self) -> usize {
        self.errors.values().filter(|e| !e.is_empty()).count()
    }

    /// Iterates over fields with at least one error, in key order.
    pub fn iter_invalid(&self) -> impl Iterator<Item = (&str, &[ValidationError])> {
        self.errors
            .iter()
            .filter(|(_, errors)| !errors.is_empty())
            .map(|(field, errors)| (field.as_str(), errors.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_error_message() {
        let err = ValidationError::required("name");
        assert!(err.is_required());
        assert!(err.message().contains("required"));
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn port_error_names_the_range() {
        let err = ValidationError::port_out_of_range("port");
        let msg = err.message();
        assert!(msg.contains("port"));
        assert!(msg.contains("65535"));
    }

    #[test]
    fn email_error_includes_address() {
        let err = ValidationError::invalid_email("emails", "not-an-email");
        assert!(err.message().contains("not-an-email"));
    }

    #[test]
    fn report_replace_is_wholesale() {
        let mut report = FieldErrors::new();
        report.replace("name", vec![ValidationError::required("name")]);
        assert_eq!(report.errors_for("name").len(), 1);
        assert!(!report.is_clean());

        report.replace("name", vec![]);
        assert!(report.errors_for("name").is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn report_counts_invalid_fields_only() {
        let mut report = FieldErrors::new();
        report.replace("name", vec![ValidationError::required("name")]);
        report.replace("host", vec![]);
        report.replace("port", vec![ValidationError::port_out_of_range("port")]);

        assert_eq!(report.invalid_field_count(), 2);
        let invalid: Vec<&str> = report.iter_invalid().map(|(field, _)| field).collect();
        assert_eq!(invalid, vec!["name", "port"]);
    }
}
