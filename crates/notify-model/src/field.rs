//! Typed field values collected by a form session.
//!
//! A form session owns a [`FieldValues`] map for the duration of the session
//! (created on open, destroyed on close). Free-text inputs stay raw strings
//! until the builder coerces them; select inputs carry explicit enum tags so
//! mutually exclusive modes are never inferred from which fields happen to
//! be non-empty.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known field keys, shared between the registry and the builder.
pub mod keys {
    /// Configuration name.
    pub const NAME: &str = "name";
    /// Optional description.
    pub const DESCRIPTION: &str = "description";
    /// Literal webhook URL.
    pub const WEBHOOK_URL: &str = "webhook_url";
    /// Webhook endpoint entry mode (literal URL vs. assembled parts).
    pub const ENDPOINT_ENTRY: &str = "endpoint_entry";
    /// Webhook host (custom-URL mode).
    pub const HOST: &str = "host";
    /// Webhook port (custom-URL mode, optional).
    pub const PORT: &str = "port";
    /// Webhook path (custom-URL mode, optional).
    pub const PATH: &str = "path";
    /// Webhook HTTP method.
    pub const METHOD: &str = "method";
    /// Webhook scheme (custom-URL mode).
    pub const SCHEME: &str = "scheme";
    /// Webhook query parameters (custom-URL mode).
    pub const QUERY_PARAMS: &str = "query_params";
    /// Webhook request headers.
    pub const HEADERS: &str = "headers";
    /// Email sender kind (SMTP vs. SES).
    pub const SENDER_KIND: &str = "sender_kind";
    /// Selected sender id for an email channel.
    pub const SENDER_ID: &str = "sender_id";
    /// Selected recipient group ids for an email channel.
    pub const RECIPIENT_GROUPS: &str = "recipient_groups";
    /// Sender "from" address.
    pub const FROM_ADDRESS: &str = "from_address";
    /// SMTP encryption method.
    pub const ENCRYPTION: &str = "encryption";
    /// IAM role ARN (SES sender, SNS).
    pub const ROLE_ARN: &str = "role_arn";
    /// AWS region (SES sender).
    pub const REGION: &str = "region";
    /// SNS topic ARN.
    pub const TOPIC_ARN: &str = "topic_arn";
    /// Recipient group email addresses.
    pub const EMAILS: &str = "emails";
}

/// HTTP method for custom webhook delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// POST (default).
    #[default]
    Post,
    /// PUT.
    Put,
    /// PATCH.
    Patch,
}

impl HttpMethod {
    /// Returns the method as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL scheme for custom-URL webhook assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookScheme {
    /// HTTPS (default).
    #[default]
    Https,
    /// HTTP.
    Http,
}

impl WebhookScheme {
    /// Returns the lowercase scheme for URL assembly.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for WebhookScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encryption method for an SMTP sender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncryptionMethod {
    /// SSL/TLS (default).
    #[default]
    Ssl,
    /// STARTTLS.
    StartTls,
    /// No encryption.
    None,
}

/// How the endpoint of a custom webhook is defined.
///
/// The two entry modes are mutually exclusive sub-variants of the same
/// configuration kind; the builder picks exactly one based on this tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointEntry {
    /// A single literal webhook URL (default).
    #[default]
    WebhookUrl,
    /// Discrete scheme/host/port/path/query fields assembled into a URL.
    CustomUrl,
}

/// Which kind of sender identity an email channel uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderKind {
    /// SMTP sender (default).
    #[default]
    Smtp,
    /// Amazon SES sender.
    SesAccount,
}

/// A single header or query-parameter entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderPair {
    /// Header/parameter name.
    pub key: String,
    /// Header/parameter value.
    pub value: String,
}

impl HeaderPair {
    /// Creates a new pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A single piece of user input, tagged by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text (also numbers-as-text, e.g. the port field).
    Text(String),
    /// HTTP method select.
    Method(HttpMethod),
    /// URL scheme select.
    Scheme(WebhookScheme),
    /// Encryption select.
    Encryption(EncryptionMethod),
    /// Endpoint entry mode radio.
    Entry(EndpointEntry),
    /// Sender kind radio.
    Sender(SenderKind),
    /// List input (recipient emails, selected group ids).
    List(Vec<String>),
    /// Key/value pair rows (headers, query parameters).
    Pairs(Vec<HeaderPair>),
}

impl FieldValue {
    /// Returns true when the value is empty for requiredness purposes.
    ///
    /// Enum tags always count as present; a select input cannot be blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Pairs(pairs) => pairs.is_empty(),
            _ => false,
        }
    }
}

/// The named field values of one form session.
///
/// Keys are the constants in [`keys`]; iteration order is stable so error
/// reports are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValues {
    values: BTreeMap<String, FieldValue>,
}

impl FieldValues {
    /// Creates an empty value map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, replacing any previous value.
    pub fn set(&mut self, key: &str, value: FieldValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Sets a free-text field.
    pub fn set_text(&mut self, key: &str, text: impl Into<String>) {
        self.set(key, FieldValue::Text(text.into()));
    }

    /// Sets a list field.
    pub fn set_list(&mut self, key: &str, items: Vec<String>) {
        self.set(key, FieldValue::List(items));
    }

    /// Sets a key/value pair field.
    pub fn set_pairs(&mut self, key: &str, pairs: Vec<HeaderPair>) {
        self.set(key, FieldValue::Pairs(pairs));
    }

    /// Returns the value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Returns the raw text of a field, or `""` when absent or not text.
    #[must_use]
    pub fn text(&self, key: &str) -> &str {
        match self.values.get(key) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Returns the list entries of a field, or an empty slice.
    #[must_use]
    pub fn list(&self, key: &str) -> &[String] {
        match self.values.get(key) {
            Some(FieldValue::List(items)) => items,
            _ => &[],
        }
    }

    /// Returns the key/value pairs of a field, or an empty slice.
    #[must_use]
    pub fn pairs(&self, key: &str) -> &[HeaderPair] {
        match self.values.get(key) {
            Some(FieldValue::Pairs(pairs)) => pairs,
            _ => &[],
        }
    }

    /// Returns true when the field is absent or holds an empty value.
    #[must_use]
    pub fn is_empty_value(&self, key: &str) -> bool {
        self.values.get(key).is_none_or(FieldValue::is_empty)
    }

    /// Returns the webhook endpoint entry mode, defaulting to the literal
    /// URL mode when unset.
    #[must_use]
    pub fn endpoint_entry(&self) -> EndpointEntry {
        match self.values.get(keys::ENDPOINT_ENTRY) {
            Some(FieldValue::Entry(mode)) => *mode,
            _ => EndpointEntry::default(),
        }
    }

    /// Returns the email sender kind, defaulting to SMTP when unset.
    #[must_use]
    pub fn sender_kind(&self) -> SenderKind {
        match self.values.get(keys::SENDER_KIND) {
            Some(FieldValue::Sender(kind)) => *kind,
            _ => SenderKind::default(),
        }
    }

    /// Returns the HTTP method, defaulting to POST when unset.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        match self.values.get(keys::METHOD) {
            Some(FieldValue::Method(method)) => *method,
            _ => HttpMethod::default(),
        }
    }

    /// Returns the URL scheme, defaulting to HTTPS when unset.
    #[must_use]
    pub fn scheme(&self) -> WebhookScheme {
        match self.values.get(keys::SCHEME) {
            Some(FieldValue::Scheme(scheme)) => *scheme,
            _ => WebhookScheme::default(),
        }
    }

    /// Returns the SMTP encryption method, defaulting to SSL when unset.
    #[must_use]
    pub fn encryption(&self) -> EncryptionMethod {
        match self.values.get(keys::ENCRYPTION) {
            Some(FieldValue::Encryption(method)) => *method,
            _ => EncryptionMethod::default(),
        }
    }

    /// Clears every field, for a programmatic form reset.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Iterates over `(key, value)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
