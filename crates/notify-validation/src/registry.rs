//! Static per-kind field registry.
//!
//! Every configuration kind has a fixed, reviewable table of field specs.
//! The tables are consts, not runtime-mutable state, so the validation
//! contract for a kind can be read in one place.

use notify_model::{ConfigKind, EndpointEntry, FieldValues, SenderKind, UnknownConfigKind, keys};

use crate::error::{FieldErrors, ValidationError};
use crate::rules::Check;

/// When a field participates in a form and whether it is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Always present and required.
    Always,
    /// Always present, never required.
    Optional,
    /// Required only when the webhook endpoint entry mode matches.
    WhenEntry(EndpointEntry),
    /// Required only when the email sender kind matches.
    WhenSender(SenderKind),
}

impl Requirement {
    /// Returns true when the field is required given the current mode tags.
    #[must_use]
    pub fn is_required(self, values: &FieldValues) -> bool {
        match self {
            Self::Always => true,
            Self::Optional => false,
            Self::WhenEntry(mode) => values.endpoint_entry() == mode,
            Self::WhenSender(kind) => values.sender_kind() == kind,
        }
    }

    /// Returns true when the field participates in validation at all given
    /// the current mode tags. A mode-gated field in the other mode is
    /// skipped entirely, not just made optional.
    #[must_use]
    pub fn is_active(self, values: &FieldValues) -> bool {
        match self {
            Self::Always | Self::Optional => true,
            Self::WhenEntry(mode) => values.endpoint_entry() == mode,
            Self::WhenSender(kind) => values.sender_kind() == kind,
        }
    }
}

/// The validation contract of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field key (one of [`notify_model::keys`]).
    pub key: &'static str,
    /// When the field is required.
    pub requirement: Requirement,
    /// Format checks, in order from most fundamental to most specific.
    pub checks: &'static [Check],
}

impl FieldSpec {
    const fn new(key: &'static str, requirement: Requirement, checks: &'static [Check]) -> Self {
        Self {
            key,
            requirement,
            checks,
        }
    }
}

const NAME: FieldSpec = FieldSpec::new(keys::NAME, Requirement::Always, &[Check::Name]);
const DESCRIPTION: FieldSpec =
    FieldSpec::new(keys::DESCRIPTION, Requirement::Optional, &[Check::Description]);

const SLACK_FIELDS: &[FieldSpec] = &[
    NAME,
    DESCRIPTION,
    FieldSpec::new(keys::WEBHOOK_URL, Requirement::Always, &[Check::Url]),
];

const WEBHOOK_FIELDS: &[FieldSpec] = &[
    NAME,
    DESCRIPTION,
    FieldSpec::new(keys::ENDPOINT_ENTRY, Requirement::Optional, &[]),
    FieldSpec::new(keys::METHOD, Requirement::Optional, &[]),
    FieldSpec::new(
        keys::WEBHOOK_URL,
        Requirement::WhenEntry(EndpointEntry::WebhookUrl),
        &[Check::Url],
    ),
    FieldSpec::new(keys::SCHEME, Requirement::Optional, &[]),
    FieldSpec::new(
        keys::HOST,
        Requirement::WhenEntry(EndpointEntry::CustomUrl),
        &[Check::Host],
    ),
    FieldSpec::new(keys::PORT, Requirement::Optional, &[Check::Port]),
    FieldSpec::new(keys::PATH, Requirement::Optional, &[]),
    FieldSpec::new(keys::QUERY_PARAMS, Requirement::Optional, &[]),
    FieldSpec::new(keys::HEADERS, Requirement::Optional, &[]),
];

const EMAIL_FIELDS: &[FieldSpec] = &[
    NAME,
    DESCRIPTION,
    FieldSpec::new(keys::SENDER_KIND, Requirement::Optional, &[]),
    FieldSpec::new(keys::SENDER_ID, Requirement::Always, &[]),
    FieldSpec::new(keys::RECIPIENT_GROUPS, Requirement::Always, &[]),
];

const SMTP_SENDER_FIELDS: &[FieldSpec] = &[
    NAME,
    FieldSpec::new(keys::FROM_ADDRESS, Requirement::Always, &[Check::Email]),
    FieldSpec::new(keys::HOST, Requirement::Always, &[Check::Host]),
    FieldSpec::new(keys::PORT, Requirement::Always, &[Check::Port]),
    FieldSpec::new(keys::ENCRYPTION, Requirement::Optional, &[]),
];

const SES_SENDER_FIELDS: &[FieldSpec] = &[
    NAME,
    FieldSpec::new(keys::FROM_ADDRESS, Requirement::Always, &[Check::Email]),
    FieldSpec::new(keys::ROLE_ARN, Requirement::Always, &[Check::Arn]),
    FieldSpec::new(keys::REGION, Requirement::Always, &[]),
];

const SNS_FIELDS: &[FieldSpec] = &[
    NAME,
    DESCRIPTION,
    FieldSpec::new(keys::TOPIC_ARN, Requirement::Always, &[Check::Arn]),
    FieldSpec::new(keys::ROLE_ARN, Requirement::Optional, &[Check::Arn]),
];

const RECIPIENT_GROUP_FIELDS: &[FieldSpec] = &[
    NAME,
    DESCRIPTION,
    FieldSpec::new(keys::EMAILS, Requirement::Always, &[Check::EmailList]),
];

/// Returns the ordered field specs for a configuration kind.
#[must_use]
pub const fn fields_for(kind: ConfigKind) -> &'static [FieldSpec] {
    match kind {
        ConfigKind::Slack | ConfigKind::Chime | ConfigKind::MicrosoftTeams => SLACK_FIELDS,
        ConfigKind::CustomWebhook => WEBHOOK_FIELDS,
        ConfigKind::Email => EMAIL_FIELDS,
        ConfigKind::SmtpSender => SMTP_SENDER_FIELDS,
        ConfigKind::SesSenderAccount => SES_SENDER_FIELDS,
        ConfigKind::Sns => SNS_FIELDS,
        ConfigKind::RecipientGroup => RECIPIENT_GROUP_FIELDS,
    }
}

/// Resolves a wire kind name and returns its field specs.
///
/// # Errors
///
/// Returns [`UnknownConfigKind`] when the name does not resolve.
pub fn fields_for_name(name: &str) -> Result<&'static [FieldSpec], UnknownConfigKind> {
    let kind: ConfigKind = name.parse()?;
    Ok(fields_for(kind))
}

/// Validates one field of a form against its spec.
///
/// The "required" check always orders before format checks; an empty
/// optional field short-circuits to valid without running format checks.
#[must_use]
pub fn validate_field(spec: &FieldSpec, values: &FieldValues) -> Vec<ValidationError> {
    if !spec.requirement.is_active(values) {
        return Vec::new();
    }

    if values.is_empty_value(spec.key) {
        if spec.requirement.is_required(values) {
            return vec![ValidationError::required(spec.key)];
        }
        return Vec::new();
    }

    let mut errors = Vec::new();
    for check in spec.checks {
        if *check == Check::EmailList {
            errors.extend(crate::rules::check_email_list(spec.key, values.list(spec.key)));
        } else {
            errors.extend(check.run(spec.key, values.text(spec.key)));
        }
    }
    errors
}

/// Validates every field of a form, wholesale-replacing each field's error
/// list in the returned report.
#[must_use]
pub fn validate_fields(kind: ConfigKind, values: &FieldValues) -> FieldErrors {
    let mut report = FieldErrors::new();
    for spec in fields_for(kind) {
        report.replace(spec.key, validate_field(spec, values));
    }
    report
}
