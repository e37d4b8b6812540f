//! Pure field validation rules.
//!
//! Every rule maps a raw field value to an ordered list of errors; an empty
//! list means the value passed. Rules are deterministic, perform no I/O, and
//! never mutate anything, so calling them twice with the same input yields
//! identical results.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};

/// Regex for valid hostnames (RFC 1123).
static HOSTNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?)*$")
        .unwrap_or_else(|_| unreachable!())
});

/// Regex for http/https URLs with a plausible host part.
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap_or_else(|_| unreachable!())
});

/// Regex for email addresses. Intentionally permissive; the backend is the
/// final arbiter of deliverability.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|_| unreachable!()));

/// Regex for AWS ARNs: `arn:partition:service:region:account:resource`,
/// where region and account may be empty.
static ARN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^arn:[a-z0-9-]+:[a-z0-9-]+:[a-z0-9-]*:[0-9]*:.+$")
        .unwrap_or_else(|_| unreachable!())
});

/// One validation concern attached to a field.
///
/// Requiredness is not a check; the registry decides it from the field's
/// requirement so that an optional field with an empty value short-circuits
/// to valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Name length cap.
    Name,
    /// Description length cap.
    Description,
    /// http/https URL well-formedness.
    Url,
    /// RFC 1123 hostname syntax.
    Host,
    /// Numeric port in 0-65535.
    Port,
    /// Email address syntax.
    Email,
    /// AWS ARN pattern.
    Arn,
    /// Every list entry is an email address.
    EmailList,
}

/// Validates a name against the length cap.
#[must_use]
pub fn check_name(field: &str, raw: &str) -> Vec<ValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return vec![ValidationError::too_long(
            field,
            MAX_NAME_LENGTH,
            trimmed.chars().count(),
        )];
    }
    Vec::new()
}

/// Validates a description against the length cap.
#[must_use]
pub fn check_description(field: &str, raw: &str) -> Vec<ValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
        return vec![ValidationError::too_long(
            field,
            MAX_DESCRIPTION_LENGTH,
            trimmed.chars().count(),
        )];
    }
    Vec::new()
}

/// Validates an http/https URL.
#[must_use]
pub fn check_url(field: &str, raw: &str) -> Vec<ValidationError> {
    if URL_REGEX.is_match(raw.trim()) {
        Vec::new()
    } else {
        vec![ValidationError::invalid_url(field)]
    }
}

/// Validates a hostname.
#[must_use]
pub fn check_host(field: &str, raw: &str) -> Vec<ValidationError> {
    let trimmed = raw.trim();
    if trimmed.len() <= 253 && HOSTNAME_REGEX.is_match(trimmed) {
        Vec::new()
    } else {
        vec![ValidationError::invalid_host(field)]
    }
}

/// Validates a port entered as text.
///
/// The form keeps the port as a string until the builder coerces it; any
/// value that does not parse into 0-65535 is out of range.
#[must_use]
pub fn check_port(field: &str, raw: &str) -> Vec<ValidationError> {
    if raw.trim().parse::<u16>().is_ok() {
        Vec::new()
    } else {
        vec![ValidationError::port_out_of_range(field)]
    }
}

/// Validates an email address.
#[must_use]
pub fn check_email(field: &str, raw: &str) -> Vec<ValidationError> {
    let trimmed = raw.trim();
    if EMAIL_REGEX.is_match(trimmed) {
        Vec::new()
    } else {
        vec![ValidationError::invalid_email(field, trimmed)]
    }
}

/// Validates an AWS ARN.
#[must_use]
pub fn check_arn(field: &str, raw: &str) -> Vec<ValidationError> {
    if ARN_REGEX.is_match(raw.trim()) {
        Vec::new()
    } else {
        vec![ValidationError::invalid_arn(field)]
    }
}

/// Validates every entry of an email list, one error per bad entry.
#[must_use]
pub fn check_email_list(field: &str, entries: &[String]) -> Vec<ValidationError> {
    entries
        .iter()
        .flat_map(|entry| check_email(field, entry))
        .collect()
}

impl Check {
    /// Runs this check against a raw text value.
    ///
    /// [`Check::EmailList`] operates on list fields and is dispatched by the
    /// registry; running it here against raw text checks the single entry.
    #[must_use]
    pub fn run(self, field: &str, raw: &str) -> Vec<ValidationError> {
        match self {
            Self::Name => check_name(field, raw),
            Self::Description => check_description(field, raw),
            Self::Url => check_url(field, raw),
            Self::Host => check_host(field, raw),
            Self::Port => check_port(field, raw),
            Self::Email | Self::EmailList => check_email(field, raw),
            Self::Arn => check_arn(field, raw),
        }
    }
}
