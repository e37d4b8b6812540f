//! Builds canonical payloads from validated field values.
//!
//! Building is only legal once every field for the kind validates clean;
//! the builder re-checks and fails fast rather than silently assembling a
//! partial payload.

use notify_model::{
    ChannelSpec, ConfigKind, ConfigPayload, EndpointEntry, FieldValues, HeaderPair, keys,
};
use notify_validation::validate_fields;

use crate::error::{Result, SubmitError};

/// Builds the canonical payload for a kind from validated field values.
///
/// # Errors
///
/// Returns [`SubmitError::PreconditionViolated`] when any field still has a
/// validation error; calling this before a clean validation pass is a
/// caller bug.
pub fn build_payload(kind: ConfigKind, values: &FieldValues) -> Result<ConfigPayload> {
    let report = validate_fields(kind, values);
    if !report.is_clean() {
        return Err(SubmitError::precondition(format!(
            "cannot build {kind} payload: {} field(s) failed validation",
            report.invalid_field_count()
        )));
    }

    let spec = match kind {
        ConfigKind::Slack => ChannelSpec::Slack {
            url: text(values, keys::WEBHOOK_URL),
        },
        ConfigKind::Chime => ChannelSpec::Chime {
            url: text(values, keys::WEBHOOK_URL),
        },
        ConfigKind::MicrosoftTeams => ChannelSpec::MicrosoftTeams {
            url: text(values, keys::WEBHOOK_URL),
        },
        ConfigKind::CustomWebhook => ChannelSpec::Webhook {
            url: webhook_url(values)?,
            method: values.method(),
            headers: values.pairs(keys::HEADERS).to_vec(),
        },
        ConfigKind::Email => ChannelSpec::Email {
            sender_kind: values.sender_kind(),
            sender_id: text(values, keys::SENDER_ID),
            recipient_group_ids: values.list(keys::RECIPIENT_GROUPS).to_vec(),
        },
        ConfigKind::SmtpSender => ChannelSpec::SmtpSender {
            from_address: text(values, keys::FROM_ADDRESS),
            host: text(values, keys::HOST),
            port: parse_port(values.text(keys::PORT))?,
            encryption: values.encryption(),
        },
        ConfigKind::SesSenderAccount => ChannelSpec::SesSender {
            from_address: text(values, keys::FROM_ADDRESS),
            role_arn: text(values, keys::ROLE_ARN),
            region: text(values, keys::REGION),
        },
        ConfigKind::Sns => ChannelSpec::Sns {
            topic_arn: text(values, keys::TOPIC_ARN),
            role_arn: optional_text(values, keys::ROLE_ARN),
        },
        ConfigKind::RecipientGroup => ChannelSpec::RecipientGroup {
            emails: values.list(keys::EMAILS).to_vec(),
            description: optional_text(values, keys::DESCRIPTION),
        },
    };

    let mut payload = ConfigPayload::new(text(values, keys::NAME), spec);
    if kind != ConfigKind::RecipientGroup {
        if let Some(description) = optional_text(values, keys::DESCRIPTION) {
            payload = payload.with_description(description);
        }
    }
    Ok(payload)
}

fn text(values: &FieldValues, key: &str) -> String {
    values.text(key).trim().to_string()
}

fn optional_text(values: &FieldValues, key: &str) -> Option<String> {
    let trimmed = values.text(key).trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse()
        .map_err(|_| SubmitError::precondition(format!("port '{raw}' is not a number")))
}

/// Resolves the webhook delivery URL for the selected entry mode.
///
/// Exactly one branch runs, chosen by the explicit mode tag. In custom-URL
/// mode the URL is assembled as `scheme://host[:port][/path][?k=v&...]`.
fn webhook_url(values: &FieldValues) -> Result<String> {
    match values.endpoint_entry() {
        EndpointEntry::WebhookUrl => Ok(text(values, keys::WEBHOOK_URL)),
        EndpointEntry::CustomUrl => {
            let mut url = format!("{}://{}", values.scheme(), values.text(keys::HOST).trim());

            let port = values.text(keys::PORT).trim();
            if !port.is_empty() {
                // validated already; re-parse to keep the invariant local
                let port: u16 = parse_port(port)?;
                url.push_str(&format!(":{port}"));
            }

            let path = values.text(keys::PATH).trim().trim_start_matches('/');
            if !path.is_empty() {
                url.push('/');
                url.push_str(path);
            }

            let query = query_string(values.pairs(keys::QUERY_PARAMS));
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }

            Ok(url)
        }
    }
}

fn query_string(pairs: &[HeaderPair]) -> String {
    pairs
        .iter()
        .filter(|pair| !pair.key.trim().is_empty())
        .map(|pair| format!("{}={}", pair.key.trim(), pair.value.trim()))
        .collect::<Vec<_>>()
        .join("&")
}
