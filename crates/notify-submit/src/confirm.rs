//! Destructive and toggle actions behind explicit confirmation.
//!
//! Deletion is irreversible, so it sits behind a typed confirmation gate:
//! the backend call is only legal once the user has typed the exact
//! confirmation phrase. Muting is a reversible partial update and needs no
//! gate.

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use notify_model::ConfigPayload;

use crate::client::ConfigClient;
use crate::controller::{Notice, SessionHandle};
use crate::error::{Result, SubmitError};

/// The phrase a user must type, exactly, to arm deletion.
pub const DELETE_CONFIRM_TEXT: &str = "delete";

/// States of a confirmed destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    /// Waiting for the user to arm and trigger the action.
    Confirming,
    /// Backend call in flight.
    Submitting,
    /// Backend acknowledged the action.
    Succeeded,
    /// Backend rejected the action.
    Failed,
}

/// One configuration targeted by a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Backend id of the configuration.
    pub id: String,
    /// Display name, used in notices.
    pub name: String,
}

impl Selection {
    /// Creates a selection from an id and display name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The result of one confirmed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend applied the action.
    Done,
    /// The backend rejected the action.
    BackendRejected {
        /// The backend's error body, verbatim.
        message: String,
    },
}

/// Drives deletion of one or more channel configurations behind the typed
/// confirmation gate.
#[derive(Debug)]
pub struct DeleteController<C> {
    client: C,
    state: Mutex<ConfirmState>,
    confirm_text: Mutex<String>,
    session: SessionHandle,
}

impl<C: ConfigClient> DeleteController<C> {
    /// Creates an unarmed delete controller.
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: Mutex::new(ConfirmState::Confirming),
            confirm_text: Mutex::new(String::new()),
            session: SessionHandle::new(),
        }
    }

    /// Returns a clone of the session handle.
    #[must_use]
    pub fn session(&self) -> SessionHandle {
        self.session.clone()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> ConfirmState {
        *self.state.lock()
    }

    /// Records the confirmation text as the user types it.
    pub fn set_confirm_text(&self, text: impl Into<String>) {
        *self.confirm_text.lock() = text.into();
    }

    /// Returns true once the typed text matches [`DELETE_CONFIRM_TEXT`]
    /// exactly. Prefixes and case variants never arm.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        *self.confirm_text.lock() == DELETE_CONFIRM_TEXT
    }

    /// Deletes the selected configurations.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::PreconditionViolated`] when the confirmation
    /// gate is not armed or the selection is empty, and
    /// [`SubmitError::InFlight`] when a delete is already running.
    pub async fn submit(&self, selections: &[Selection]) -> Result<ActionOutcome> {
        if !self.is_armed() {
            return Err(SubmitError::precondition(
                "delete requested without typed confirmation",
            ));
        }
        if selections.is_empty() {
            return Err(SubmitError::precondition("delete requested with no selection"));
        }

        {
            let mut state = self.state.lock();
            if matches!(*state, ConfirmState::Submitting) {
                debug!("delete rejected: already in flight");
                return Err(SubmitError::InFlight);
            }
            *state = ConfirmState::Submitting;
        }

        let ids: Vec<String> = selections.iter().map(|s| s.id.clone()).collect();
        match self.client.delete(&ids).await {
            Ok(()) => {
                info!(count = ids.len(), "configurations deleted");
                *self.state.lock() = ConfirmState::Succeeded;
                Ok(ActionOutcome::Done)
            }
            Err(err) => {
                warn!(count = ids.len(), error = %err, "delete rejected by backend");
                *self.state.lock() = ConfirmState::Failed;
                Ok(ActionOutcome::BackendRejected {
                    message: err.message,
                })
            }
        }
    }

    /// Derives the user-visible notice for a delete outcome, or `None`
    /// after session teardown.
    #[must_use]
    pub fn notice_for(&self, selections: &[Selection], outcome: &ActionOutcome) -> Option<Notice> {
        if self.session.is_closed() {
            return None;
        }
        Some(match outcome {
            ActionOutcome::Done => Notice::Success(match selections {
                [only] => format!("Channel {} successfully deleted.", only.name),
                many => format!("{} channels successfully deleted.", many.len()),
            }),
            ActionOutcome::BackendRejected { message } => Notice::Error {
                title: "Failed to delete one or more channels.".to_string(),
                detail: message.clone(),
            },
        })
    }
}

/// Toggles a channel's enabled flag via a partial update.
///
/// Muting keeps the stored configuration intact and only flips `enabled`;
/// the channel's routing details survive an unmute unchanged.
#[derive(Debug)]
pub struct MuteController<C> {
    client: C,
    session: SessionHandle,
}

impl<C: ConfigClient> MuteController<C> {
    /// Creates a mute controller around a backend client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            session: SessionHandle::new(),
        }
    }

    /// Returns a clone of the session handle.
    #[must_use]
    pub fn session(&self) -> SessionHandle {
        self.session.clone()
    }

    /// Sets the muted flag on a stored channel.
    ///
    /// `current` is the channel's persisted payload; everything except the
    /// enabled flag is written back as-is.
    ///
    /// # Errors
    ///
    /// This call has no preconditions; backend failures are returned as
    /// [`ActionOutcome::BackendRejected`] data, so the error path is
    /// currently unreachable.
    pub async fn set_muted(
        &self,
        id: &str,
        current: &ConfigPayload,
        muted: bool,
    ) -> Result<ActionOutcome> {
        let updated = current.clone().with_enabled(!muted);
        match self.client.update(id, &updated).await {
            Ok(_) => {
                info!(id = %id, muted, "channel mute state changed");
                Ok(ActionOutcome::Done)
            }
            Err(err) => {
                warn!(id = %id, muted, error = %err, "mute update rejected by backend");
                Ok(ActionOutcome::BackendRejected {
                    message: err.message,
                })
            }
        }
    }

    /// Derives the user-visible notice for a mute outcome, or `None` after
    /// session teardown.
    #[must_use]
    pub fn notice_for(&self, name: &str, muted: bool, outcome: &ActionOutcome) -> Option<Notice> {
        if self.session.is_closed() {
            return None;
        }
        let verb = if muted { "muted" } else { "unmuted" };
        Some(match outcome {
            ActionOutcome::Done => {
                Notice::Success(format!("Channel {name} successfully {verb}."))
            }
            ActionOutcome::BackendRejected { message } => Notice::Error {
                title: format!("Failed to {} channel.", if muted { "mute" } else { "unmute" }),
                detail: message.clone(),
            },
        })
    }
}
