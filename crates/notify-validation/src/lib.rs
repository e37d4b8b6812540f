//! Field validation registry for OpenNotify channel configurations.
//!
//! Validation is data, not control flow: rules map raw input to ordered
//! error lists, the per-kind registry decides which rules apply to which
//! field, and a whole-form pass produces a [`FieldErrors`] report the
//! presentation layer renders inline. Nothing here performs I/O.
//!
//! # Example
//!
//! ```
//! use notify_model::{ConfigKind, FieldValues, keys};
//! use notify_validation::validate_fields;
//!
//! let mut values = FieldValues::new();
//! values.set_text(keys::NAME, "ops-alerts");
//! values.set_text(keys::WEBHOOK_URL, "https://hooks.slack.com/services/T0/B0/XX");
//!
//! let report = validate_fields(ConfigKind::Slack, &values);
//! assert!(report.is_clean());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod registry;
pub mod rules;

pub use error::{FieldErrors, ValidationError, ValidationErrorKind};
pub use registry::{FieldSpec, Requirement, fields_for, fields_for_name, validate_field, validate_fields};
pub use rules::Check;

/// Maximum length for configuration names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

#[cfg(test)]
mod tests {
    use super::*;
    use notify_model::{ConfigKind, FieldValues, keys};

    #[test]
    fn slack_form_happy_path() {
        let mut values = FieldValues::new();
        values.set_text(keys::NAME, "Test slack channel");
        values.set_text(
            keys::WEBHOOK_URL,
            "https://hooks.slack.com/services/A123456/B1234567/A1B2C3D4",
        );
        assert!(validate_fields(ConfigKind::Slack, &values).is_clean());
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let report = validate_fields(ConfigKind::Slack, &FieldValues::new());
        assert_eq!(report.invalid_field_count(), 2); // name, webhook_url
    }

    #[test]
    fn validation_is_repeatable() {
        let mut values = FieldValues::new();
        values.set_text(keys::NAME, "x");
        let first = validate_fields(ConfigKind::Sns, &values);
        let second = validate_fields(ConfigKind::Sns, &values);
        assert_eq!(first, second);
    }
}
