//! Canonical configuration payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::field::{EncryptionMethod, HeaderPair, HttpMethod, SenderKind};
use crate::kind::ConfigKind;

/// The kind-specific portion of a configuration payload.
///
/// Serialized internally tagged so the `type` discriminator matches the
/// backend's `config_type` wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelSpec {
    /// Slack incoming webhook.
    Slack {
        /// Webhook URL.
        url: String,
    },
    /// Amazon Chime incoming webhook.
    Chime {
        /// Webhook URL.
        url: String,
    },
    /// Microsoft Teams incoming webhook.
    #[serde(rename = "microsoft_teams")]
    MicrosoftTeams {
        /// Webhook URL.
        url: String,
    },
    /// Custom webhook endpoint.
    #[serde(rename = "webhook")]
    Webhook {
        /// Full delivery URL (literal or assembled).
        url: String,
        /// HTTP method used for delivery.
        method: HttpMethod,
        /// Request headers sent with each delivery.
        headers: Vec<HeaderPair>,
    },
    /// Email channel referencing a sender and recipient groups.
    Email {
        /// Which kind of sender identity is referenced.
        sender_kind: SenderKind,
        /// Backend id of the sender configuration.
        sender_id: String,
        /// Backend ids of the recipient group configurations.
        recipient_group_ids: Vec<String>,
    },
    /// SMTP sender identity.
    #[serde(rename = "smtp_account")]
    SmtpSender {
        /// "From" address.
        from_address: String,
        /// SMTP host.
        host: String,
        /// SMTP port.
        port: u16,
        /// Connection encryption.
        encryption: EncryptionMethod,
    },
    /// Amazon SES sender identity.
    #[serde(rename = "ses_account")]
    SesSender {
        /// "From" address.
        from_address: String,
        /// IAM role ARN used to send.
        role_arn: String,
        /// AWS region of the SES account.
        region: String,
    },
    /// Amazon SNS topic.
    Sns {
        /// Topic ARN.
        topic_arn: String,
        /// Optional IAM role ARN for cross-account publish.
        role_arn: Option<String>,
    },
    /// Named recipient group.
    #[serde(rename = "email_group")]
    RecipientGroup {
        /// Member email addresses.
        emails: Vec<String>,
        /// Optional description.
        description: Option<String>,
    },
}

impl ChannelSpec {
    /// Returns the configuration kind of this spec.
    #[must_use]
    pub const fn kind(&self) -> ConfigKind {
        match self {
            Self::Slack { .. } => ConfigKind::Slack,
            Self::Chime { .. } => ConfigKind::Chime,
            Self::MicrosoftTeams { .. } => ConfigKind::MicrosoftTeams,
            Self::Webhook { .. } => ConfigKind::CustomWebhook,
            Self::Email { .. } => ConfigKind::Email,
            Self::SmtpSender { .. } => ConfigKind::SmtpSender,
            Self::SesSender { .. } => ConfigKind::SesSenderAccount,
            Self::Sns { .. } => ConfigKind::Sns,
            Self::RecipientGroup { .. } => ConfigKind::RecipientGroup,
        }
    }
}

/// The canonical, backend-shaped configuration payload.
///
/// Built fresh per submit attempt from validated field values and never
/// mutated afterwards; the builder-style methods return a new payload. The
/// backend-assigned id lives outside the payload (see [`ConfigItem`]) since
/// it is absent before creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigPayload {
    /// Display name of the configuration.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether delivery is enabled; `false` means muted.
    pub enabled: bool,
    /// Kind-specific settings.
    #[serde(flatten)]
    pub spec: ChannelSpec,
}

impl ConfigPayload {
    /// Creates a new, enabled payload.
    #[must_use]
    pub fn new(name: impl Into<String>, spec: ChannelSpec) -> Self {
        Self {
            name: name.into(),
            description: None,
            enabled: true,
            spec,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns a copy with the enabled flag set; everything else unchanged.
    ///
    /// This is the mute/unmute partial update.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns the configuration kind.
    #[must_use]
    pub const fn kind(&self) -> ConfigKind {
        self.spec.kind()
    }
}

/// A persisted configuration: payload plus backend-assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    /// Opaque backend-assigned id.
    pub id: String,
    /// The configuration payload.
    #[serde(flatten)]
    pub payload: ConfigPayload,
    /// When the configuration was created.
    pub created_at: DateTime<Utc>,
    /// When the configuration was last updated.
    pub last_updated: DateTime<Utc>,
}

impl ConfigItem {
    /// Creates an item with both timestamps set to now.
    #[must_use]
    pub fn new(id: impl Into<String>, payload: ConfigPayload) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            payload,
            created_at: now,
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slack_payload() -> ConfigPayload {
        ConfigPayload::new(
            "ops-alerts",
            ChannelSpec::Slack {
                url: "https://hooks.slack.com/services/T000/B000/XXXX".to_string(),
            },
        )
    }

    #[test]
    fn new_payload_is_enabled() {
        let payload = slack_payload();
        assert!(payload.enabled);
        assert_eq!(payload.kind(), ConfigKind::Slack);
        assert!(payload.description.is_none());
    }

    #[test]
    fn with_enabled_only_toggles_the_flag() {
        let payload = slack_payload().with_description("ops channel");
        let muted = payload.clone().with_enabled(false);

        assert!(!muted.enabled);
        assert_eq!(muted.name, payload.name);
        assert_eq!(muted.description, payload.description);
        assert_eq!(muted.spec, payload.spec);
    }

    #[test]
    fn spec_kind_matches_serde_tag() {
        let spec = ChannelSpec::Webhook {
            url: "https://example.com/hook".to_string(),
            method: HttpMethod::Post,
            headers: vec![],
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["type"], spec.kind().as_str());
    }

    #[test]
    fn payload_serializes_flattened() {
        let payload = slack_payload();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "slack");
        assert_eq!(json["name"], "ops-alerts");
        assert_eq!(json["enabled"], true);
        // absent description is omitted from the wire shape
        assert!(json.get("description").is_none());
    }

    #[test]
    fn payload_round_trips() {
        let payload = ConfigPayload::new(
            "smtp-main",
            ChannelSpec::SmtpSender {
                from_address: "no-reply@example.com".to_string(),
                host: "smtp.example.com".to_string(),
                port: 587,
                encryption: EncryptionMethod::StartTls,
            },
        );
        let json = serde_json::to_string(&payload).unwrap();
        let back: ConfigPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn item_timestamps_start_equal() {
        let item = ConfigItem::new("cfg-1", slack_payload());
        assert_eq!(item.created_at, item.last_updated);
        assert_eq!(item.id, "cfg-1");
    }
}
