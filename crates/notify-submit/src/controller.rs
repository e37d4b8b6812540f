//! Submission orchestration.
//!
//! The controller owns the "validate everything, build the payload, call
//! the backend, reconcile" sequence for one form session. One submission at
//! a time: a second submit while one is in flight is rejected, never queued.
//! There is no automatic retry; every backend call is one explicit user
//! action.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use notify_model::{ConfigKind, FieldValues};
use notify_validation::{FieldErrors, validate_fields};

use crate::builder::build_payload;
use crate::client::ConfigClient;
use crate::error::{Result, SubmitError};

/// How long the caller should wait before re-querying list views after a
/// successful mutation, to let the backend's index refresh propagate.
pub const SERVER_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Aggregate notice shown when any field fails validation on submit.
pub const INVALID_FIELDS_MESSAGE: &str =
    "Some fields are invalid. Fix all highlighted error(s) before continuing.";

/// Sleeps for the fixed settling delay.
///
/// Callers refresh list views after this so a just-completed mutation is
/// visible in the next query.
pub async fn settle() {
    tokio::time::sleep(SERVER_SETTLE_DELAY).await;
}

/// States of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    /// No submission in flight; the form accepts edits.
    Idle,
    /// Running validators over every field.
    Validating,
    /// At least one field failed validation; terminal for this attempt.
    Invalid,
    /// Backend call in flight.
    Submitting,
    /// Backend acknowledged the mutation.
    Succeeded,
    /// Backend rejected the mutation.
    Failed,
}

/// The result of one submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The backend persisted the payload.
    Saved {
        /// Backend-assigned id (existing id on update).
        id: String,
        /// Name of the saved configuration.
        name: String,
    },
    /// Validation failed; the backend was not called.
    Invalid {
        /// Per-field validation report.
        errors: FieldErrors,
    },
    /// The backend rejected the call.
    BackendRejected {
        /// The backend's error body, verbatim.
        message: String,
    },
}

/// A user-visible notice derived from an outcome.
///
/// The pipeline returns notices as data; the presentation layer decides how
/// to render them (toast, banner, inline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A success confirmation.
    Success(String),
    /// A warning about invalid input.
    Danger(String),
    /// A backend failure with a user-inspectable detail.
    Error {
        /// Short title, e.g. "Failed to create channel.".
        title: String,
        /// The backend error body.
        detail: String,
    },
}

/// Shared handle marking whether a form session is still alive.
///
/// Closing the session does not cancel in-flight backend calls, but it
/// suppresses their UI-visible side effects: no notice is produced for an
/// outcome that settles after teardown.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    closed: Arc<AtomicBool>,
}

impl SessionHandle {
    /// Creates an open session handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the session as torn down.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Returns true once the session has been torn down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// Returns the entity noun used in notices for a kind.
#[must_use]
pub const fn entity_noun(kind: ConfigKind) -> &'static str {
    match kind {
        ConfigKind::SmtpSender | ConfigKind::SesSenderAccount => "Sender",
        ConfigKind::RecipientGroup => "Recipient group",
        _ => "Channel",
    }
}

/// Orchestrates validation, payload construction, and backend persistence
/// for one form session.
#[derive(Debug)]
pub struct SubmissionController<C> {
    client: C,
    state: Mutex<SubmitState>,
    session: SessionHandle,
}

impl<C: ConfigClient> SubmissionController<C> {
    /// Creates a controller around a backend client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: Mutex::new(SubmitState::Idle),
            session: SessionHandle::new(),
        }
    }

    /// Returns a clone of the session handle, for the owner of the form to
    /// close on teardown.
    #[must_use]
    pub fn session(&self) -> SessionHandle {
        self.session.clone()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SubmitState {
        *self.state.lock()
    }

    fn transition(&self, next: SubmitState) {
        let mut state = self.state.lock();
        debug!(from = ?*state, to = ?next, "submit state transition");
        *state = next;
    }

    /// Runs one submission attempt: validate every field, build the
    /// payload, then create (no id) or update (existing id).
    ///
    /// Field values are borrowed, never consumed or cleared; on any failure
    /// the user's in-progress edits survive for a manual retry.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InFlight`] when a submission is already
    /// running for this session; the second request is a no-op.
    pub async fn submit(
        &self,
        kind: ConfigKind,
        values: &FieldValues,
        existing_id: Option<&str>,
    ) -> Result<SubmissionOutcome> {
        {
            let mut state = self.state.lock();
            if !matches!(*state, SubmitState::Idle) {
                debug!(state = ?*state, "submit rejected: already in flight");
                return Err(SubmitError::InFlight);
            }
            *state = SubmitState::Validating;
        }

        let report = validate_fields(kind, values);
        if !report.is_clean() {
            debug!(
                kind = %kind,
                invalid_fields = report.invalid_field_count(),
                "submit rejected by validation"
            );
            self.transition(SubmitState::Invalid);
            self.transition(SubmitState::Idle);
            return Ok(SubmissionOutcome::Invalid { errors: report });
        }

        let payload = match build_payload(kind, values) {
            Ok(payload) => payload,
            Err(err) => {
                self.transition(SubmitState::Idle);
                return Err(err);
            }
        };
        let name = payload.name.clone();

        self.transition(SubmitState::Submitting);
        let result = match existing_id {
            Some(id) => self.client.update(id, &payload).await,
            None => self.client.create(&payload).await,
        };

        match result {
            Ok(id) => {
                info!(kind = %kind, id = %id, name = %name, "configuration saved");
                self.transition(SubmitState::Succeeded);
                self.transition(SubmitState::Idle);
                Ok(SubmissionOutcome::Saved { id, name })
            }
            Err(err) => {
                warn!(kind = %kind, name = %name, error = %err, "backend rejected configuration");
                self.transition(SubmitState::Failed);
                self.transition(SubmitState::Idle);
                Ok(SubmissionOutcome::BackendRejected {
                    message: err.message,
                })
            }
        }
    }

    /// Derives the user-visible notice for an outcome.
    ///
    /// Returns `None` once the session has been torn down: the outcome of a
    /// call that settles after close has no UI-visible side effects.
    #[must_use]
    pub fn notice_for(
        &self,
        kind: ConfigKind,
        outcome: &SubmissionOutcome,
        editing: bool,
    ) -> Option<Notice> {
        if self.session.is_closed() {
            return None;
        }

        let noun = entity_noun(kind);
        let verb = if editing { "updated" } else { "created" };
        Some(match outcome {
            SubmissionOutcome::Saved { name, .. } => {
                Notice::Success(format!("{noun} {name} successfully {verb}."))
            }
            SubmissionOutcome::Invalid { .. } => Notice::Danger(INVALID_FIELDS_MESSAGE.to_string()),
            SubmissionOutcome::BackendRejected { message } => Notice::Error {
                title: format!(
                    "Failed to {} {}.",
                    if editing { "update" } else { "create" },
                    noun.to_lowercase()
                ),
                detail: message.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{BackendError, ListQuery};
    use notify_model::{ConfigItem, ConfigPayload, keys};
    use parking_lot::Mutex as PlMutex;
    use tokio::sync::Semaphore;

    /// In-memory test double in place of the HTTP-backed client.
    #[derive(Debug, Default)]
    struct MockClient {
        created: PlMutex<Vec<ConfigPayload>>,
        updated: PlMutex<Vec<(String, ConfigPayload)>>,
        fail_with: Option<String>,
        /// When set, `create` blocks until a permit is added.
        gate: Option<Semaphore>,
    }

    impl MockClient {
        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::default()
            }
        }

        fn gated() -> Self {
            Self {
                gate: Some(Semaphore::new(0)),
                ..Self::default()
            }
        }
    }

    impl ConfigClient for MockClient {
        async fn create(&self, payload: &ConfigPayload) -> Result2<String> {
            if let Some(gate) = &self.gate {
                let _permit = gate.acquire().await.map_err(|_| BackendError::new("closed"))?;
            }
            if let Some(message) = &self.fail_with {
                return Err(BackendError::new(message.clone()));
            }
            self.created.lock().push(payload.clone());
            Ok(format!("cfg-{}", self.created.lock().len()))
        }

        async fn update(&self, id: &str, payload: &ConfigPayload) -> Result2<String> {
            if let Some(message) = &self.fail_with {
                return Err(BackendError::new(message.clone()));
            }
            self.updated.lock().push((id.to_string(), payload.clone()));
            Ok(id.to_string())
        }

        async fn delete(&self, _ids: &[String]) -> Result2<()> {
            Ok(())
        }

        async fn list(&self, _query: &ListQuery) -> Result2<Vec<ConfigItem>> {
            Ok(Vec::new())
        }
    }

    type Result2<T> = std::result::Result<T, BackendError>;

    fn slack_values() -> FieldValues {
        let mut values = FieldValues::new();
        values.set_text(keys::NAME, "Test slack channel");
        values.set_text(keys::WEBHOOK_URL, "https://hooks.slack.com/services/T0/B0/XX");
        values
    }

    #[tokio::test]
    async fn create_happy_path() {
        let controller = SubmissionController::new(MockClient::default());
        let outcome = controller
            .submit(ConfigKind::Slack, &slack_values(), None)
            .await
            .unwrap();

        match outcome {
            SubmissionOutcome::Saved { id, name } => {
                assert_eq!(id, "cfg-1");
                assert_eq!(name, "Test slack channel");
            }
            other => panic!("expected saved, got {other:?}"),
        }
        assert_eq!(controller.state(), SubmitState::Idle);
        assert_eq!(controller.client.created.lock().len(), 1);
    }

    #[tokio::test]
    async fn existing_id_routes_to_update() {
        let controller = SubmissionController::new(MockClient::default());
        let outcome = controller
            .submit(ConfigKind::Slack, &slack_values(), Some("cfg-9"))
            .await
            .unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Saved { ref id, .. } if id == "cfg-9"));
        assert!(controller.client.created.lock().is_empty());
        assert_eq!(controller.client.updated.lock().len(), 1);
    }

    #[tokio::test]
    async fn invalid_fields_never_reach_the_backend() {
        let controller = SubmissionController::new(MockClient::default());
        let outcome = controller
            .submit(ConfigKind::Slack, &FieldValues::new(), None)
            .await
            .unwrap();

        match outcome {
            SubmissionOutcome::Invalid { errors } => {
                assert!(!errors.is_clean());
                assert!(errors.errors_for(keys::NAME)[0].is_required());
            }
            other => panic!("expected invalid, got {other:?}"),
        }
        assert!(controller.client.created.lock().is_empty());
        assert_eq!(controller.state(), SubmitState::Idle);
    }

    #[tokio::test]
    async fn backend_failure_surfaces_verbatim_and_keeps_edits() {
        let controller = SubmissionController::new(MockClient::failing("host denied"));
        let values = slack_values();
        let before = values.clone();

        let outcome = controller
            .submit(ConfigKind::Slack, &values, None)
            .await
            .unwrap();

        assert!(
            matches!(outcome, SubmissionOutcome::BackendRejected { ref message } if message == "host denied")
        );
        // user input untouched, ready for a manual retry
        assert_eq!(values, before);
        assert_eq!(controller.state(), SubmitState::Idle);
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_is_rejected() {
        let client = Arc::new(MockClient::gated());
        let controller = Arc::new(SubmissionController::new(Arc::clone(&client)));

        let racing = Arc::clone(&controller);
        let first = tokio::spawn(async move {
            racing.submit(ConfigKind::Slack, &slack_values(), None).await
        });

        // wait until the first attempt parks inside the gated create call
        while controller.state() != SubmitState::Submitting {
            tokio::task::yield_now().await;
        }

        let second = controller
            .submit(ConfigKind::Slack, &slack_values(), None)
            .await;
        assert!(matches!(second, Err(SubmitError::InFlight)));

        if let Some(gate) = &client.gate {
            gate.add_permits(1);
        }
        let first = first.await.unwrap().unwrap();
        assert!(matches!(first, SubmissionOutcome::Saved { .. }));
        assert_eq!(client.created.lock().len(), 1);
    }

    #[tokio::test]
    async fn notices_follow_the_outcome() {
        let controller = SubmissionController::new(MockClient::default());
        let saved = SubmissionOutcome::Saved {
            id: "cfg-1".to_string(),
            name: "ops".to_string(),
        };
        assert_eq!(
            controller.notice_for(ConfigKind::Slack, &saved, false),
            Some(Notice::Success("Channel ops successfully created.".to_string()))
        );
        assert_eq!(
            controller.notice_for(ConfigKind::SmtpSender, &saved, true),
            Some(Notice::Success("Sender ops successfully updated.".to_string()))
        );

        let rejected = SubmissionOutcome::BackendRejected {
            message: "Host of url is denied".to_string(),
        };
        match controller.notice_for(ConfigKind::Slack, &rejected, false) {
            Some(Notice::Error { title, detail }) => {
                assert_eq!(title, "Failed to create channel.");
                assert_eq!(detail, "Host of url is denied");
            }
            other => panic!("expected error notice, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn closed_session_suppresses_notices() {
        let controller = SubmissionController::new(MockClient::default());
        let outcome = controller
            .submit(ConfigKind::Slack, &slack_values(), None)
            .await
            .unwrap();

        controller.session().close();
        assert_eq!(controller.notice_for(ConfigKind::Slack, &outcome, false), None);
    }

    #[test]
    fn entity_nouns() {
        assert_eq!(entity_noun(ConfigKind::Slack), "Channel");
        assert_eq!(entity_noun(ConfigKind::Sns), "Channel");
        assert_eq!(entity_noun(ConfigKind::SesSenderAccount), "Sender");
        assert_eq!(entity_noun(ConfigKind::RecipientGroup), "Recipient group");
    }

    #[tokio::test(start_paused = true)]
    async fn settle_waits_the_fixed_delay() {
        let start = tokio::time::Instant::now();
        settle().await;
        assert_eq!(start.elapsed(), SERVER_SETTLE_DELAY);
    }
}
