//! The closed enumeration of configuration kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a wire string does not name a known configuration kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown config kind: '{name}'")]
pub struct UnknownConfigKind {
    /// The unrecognized kind string.
    pub name: String,
}

impl UnknownConfigKind {
    /// Creates a new error for the given wire string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A kind of persisted configuration.
///
/// Each kind has a fixed field schema and a fixed set of validators; the
/// registry in `notify-validation` is keyed by this enum. Wire names match
/// the backend's `config_type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKind {
    /// Slack incoming-webhook channel.
    Slack,
    /// Amazon Chime incoming-webhook channel.
    Chime,
    /// Microsoft Teams incoming-webhook channel.
    MicrosoftTeams,
    /// Custom webhook channel (literal URL or assembled from parts).
    #[serde(rename = "webhook")]
    CustomWebhook,
    /// Email channel referencing a sender and recipient groups.
    Email,
    /// Amazon SES sender identity.
    #[serde(rename = "ses_account")]
    SesSenderAccount,
    /// SMTP sender identity.
    #[serde(rename = "smtp_account")]
    SmtpSender,
    /// Amazon SNS topic channel.
    Sns,
    /// Named, reusable list of email recipients.
    #[serde(rename = "email_group")]
    RecipientGroup,
}

impl ConfigKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 9] = [
        Self::Slack,
        Self::Chime,
        Self::MicrosoftTeams,
        Self::CustomWebhook,
        Self::Email,
        Self::SesSenderAccount,
        Self::SmtpSender,
        Self::Sns,
        Self::RecipientGroup,
    ];

    /// Returns the wire name used by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slack => "slack",
            Self::Chime => "chime",
            Self::MicrosoftTeams => "microsoft_teams",
            Self::CustomWebhook => "webhook",
            Self::Email => "email",
            Self::SesSenderAccount => "ses_account",
            Self::SmtpSender => "smtp_account",
            Self::Sns => "sns",
            Self::RecipientGroup => "email_group",
        }
    }

    /// Returns the human-readable label shown in list views.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Slack => "Slack",
            Self::Chime => "Chime",
            Self::MicrosoftTeams => "Microsoft Teams",
            Self::CustomWebhook => "Custom webhook",
            Self::Email => "Email",
            Self::SesSenderAccount => "SES sender",
            Self::SmtpSender => "SMTP sender",
            Self::Sns => "Amazon SNS",
            Self::RecipientGroup => "Recipient group",
        }
    }

    /// Returns true for kinds that describe a deliverable channel, as
    /// opposed to sender identities and recipient groups.
    #[must_use]
    pub const fn is_channel(self) -> bool {
        matches!(
            self,
            Self::Slack
                | Self::Chime
                | Self::MicrosoftTeams
                | Self::CustomWebhook
                | Self::Email
                | Self::Sns
        )
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKind {
    type Err = UnknownConfigKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownConfigKind::new(s))
    }
}
