//! Data model for OpenNotify channel configurations.
//!
//! This crate defines the shared vocabulary of the configuration pipeline:
//! the closed set of configuration kinds, the typed field values a form
//! session collects, and the canonical payload shape the backend persists.
//!
//! # Example
//!
//! ```
//! use notify_model::{ChannelSpec, ConfigKind, ConfigPayload};
//!
//! let payload = ConfigPayload::new(
//!     "ops-alerts",
//!     ChannelSpec::Slack {
//!         url: "https://hooks.slack.com/services/T000/B000/XXXX".to_string(),
//!     },
//! );
//!
//! assert_eq!(payload.kind(), ConfigKind::Slack);
//! assert!(payload.enabled);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod field;
pub mod kind;
pub mod payload;

pub use field::{
    EncryptionMethod, EndpointEntry, FieldValue, FieldValues, HeaderPair, HttpMethod, SenderKind,
    WebhookScheme, keys,
};
pub use kind::{ConfigKind, UnknownConfigKind};
pub use payload::{ChannelSpec, ConfigItem, ConfigPayload};
