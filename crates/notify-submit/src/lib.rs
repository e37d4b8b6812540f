//! Submission pipeline for notification channel configurations.
//!
//! Sits between a configuration form and the notifications backend: it
//! validates every field through `notify-validation`, assembles the
//! canonical payload, drives the backend call through the [`ConfigClient`]
//! seam, and reports outcomes and user-visible notices as data.
//!
//! The pipeline is deliberately conservative about side effects:
//!
//! - the backend is never called while any field is invalid;
//! - one submission at a time, a concurrent request is rejected, not queued;
//! - nothing retries automatically, every backend call is one user action;
//! - deletion sits behind a typed confirmation gate;
//! - a closed session suppresses notices from late-settling calls.
//!
//! ```
//! use notify_model::{ConfigKind, FieldValues, keys};
//! use notify_submit::build_payload;
//!
//! let mut values = FieldValues::new();
//! values.set_text(keys::NAME, "ops-alerts");
//! values.set_text(keys::WEBHOOK_URL, "https://hooks.slack.com/services/T0/B0/XX");
//!
//! let payload = build_payload(ConfigKind::Slack, &values)?;
//! assert_eq!(payload.name, "ops-alerts");
//! # Ok::<(), notify_submit::SubmitError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod client;
mod confirm;
mod controller;
mod error;

pub use builder::build_payload;
pub use client::{BackendError, ConfigClient, ListQuery};
pub use confirm::{
    ActionOutcome, ConfirmState, DELETE_CONFIRM_TEXT, DeleteController, MuteController, Selection,
};
pub use controller::{
    INVALID_FIELDS_MESSAGE, Notice, SERVER_SETTLE_DELAY, SessionHandle, SubmissionController,
    SubmissionOutcome, SubmitState, entity_noun, settle,
};
pub use error::{Result, SubmitError};
