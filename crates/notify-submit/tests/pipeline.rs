//! End-to-end pipeline tests: form values in, backend calls out.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Semaphore;

use notify_model::{
    ChannelSpec, ConfigItem, ConfigKind, ConfigPayload, EndpointEntry, FieldValue, FieldValues,
    keys,
};
use notify_submit::{
    BackendError, ConfigClient, DeleteController, ListQuery, MuteController, Notice, Selection,
    SubmissionController, SubmissionOutcome, SubmitError, SubmitState,
};

type BackendResult<T> = Result<T, BackendError>;

/// In-memory backend double recording every call.
#[derive(Debug, Default)]
struct RecordingBackend {
    created: Mutex<Vec<ConfigPayload>>,
    updated: Mutex<Vec<(String, ConfigPayload)>>,
    deleted: Mutex<Vec<Vec<String>>>,
    reject_with: Option<String>,
    create_gate: Option<Semaphore>,
}

impl RecordingBackend {
    fn rejecting(message: &str) -> Self {
        Self {
            reject_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn gated() -> Self {
        Self {
            create_gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    fn call_count(&self) -> usize {
        self.created.lock().len() + self.updated.lock().len() + self.deleted.lock().len()
    }
}

impl ConfigClient for RecordingBackend {
    async fn create(&self, payload: &ConfigPayload) -> BackendResult<String> {
        if let Some(gate) = &self.create_gate {
            let _permit = gate
                .acquire()
                .await
                .map_err(|_| BackendError::new("gate closed"))?;
        }
        if let Some(message) = &self.reject_with {
            return Err(BackendError::new(message.clone()));
        }
        let mut created = self.created.lock();
        created.push(payload.clone());
        Ok(format!("cfg-{}", created.len()))
    }

    async fn update(&self, id: &str, payload: &ConfigPayload) -> BackendResult<String> {
        if let Some(message) = &self.reject_with {
            return Err(BackendError::new(message.clone()));
        }
        self.updated.lock().push((id.to_string(), payload.clone()));
        Ok(id.to_string())
    }

    async fn delete(&self, ids: &[String]) -> BackendResult<()> {
        if let Some(message) = &self.reject_with {
            return Err(BackendError::new(message.clone()));
        }
        self.deleted.lock().push(ids.to_vec());
        Ok(())
    }

    async fn list(&self, _query: &ListQuery) -> BackendResult<Vec<ConfigItem>> {
        Ok(Vec::new())
    }
}

fn webhook_form() -> FieldValues {
    let mut values = FieldValues::new();
    values.set_text(keys::NAME, "Test webhook channel");
    values.set(
        keys::ENDPOINT_ENTRY,
        FieldValue::Entry(EndpointEntry::WebhookUrl),
    );
    values.set_text(keys::WEBHOOK_URL, "https://custom-webhook-test-url.com/hook");
    values
}

#[tokio::test]
async fn webhook_create_round_trip() {
    let backend = Arc::new(RecordingBackend::default());
    let controller = SubmissionController::new(Arc::clone(&backend));

    let outcome = controller
        .submit(ConfigKind::CustomWebhook, &webhook_form(), None)
        .await
        .unwrap();

    match &outcome {
        SubmissionOutcome::Saved { id, name } => {
            assert_eq!(id, "cfg-1");
            assert_eq!(name, "Test webhook channel");
        }
        other => panic!("expected saved, got {other:?}"),
    }

    let created = backend.created.lock();
    assert_eq!(created.len(), 1);
    match &created[0].spec {
        ChannelSpec::Webhook { url, .. } => {
            assert_eq!(url, "https://custom-webhook-test-url.com/hook");
        }
        other => panic!("expected webhook spec, got {other:?}"),
    }

    assert_eq!(
        controller.notice_for(ConfigKind::CustomWebhook, &outcome, false),
        Some(Notice::Success(
            "Channel Test webhook channel successfully created.".to_string()
        ))
    );
}

#[tokio::test]
async fn invalid_port_stops_before_the_backend() {
    let backend = Arc::new(RecordingBackend::default());
    let controller = SubmissionController::new(Arc::clone(&backend));

    let mut values = webhook_form();
    values.set(
        keys::ENDPOINT_ENTRY,
        FieldValue::Entry(EndpointEntry::CustomUrl),
    );
    values.set_text(keys::HOST, "name.example.com");
    values.set_text(keys::PORT, "not-a-port");

    let outcome = controller
        .submit(ConfigKind::CustomWebhook, &values, None)
        .await
        .unwrap();

    match &outcome {
        SubmissionOutcome::Invalid { errors } => {
            assert_eq!(
                errors.errors_for(keys::PORT)[0].message(),
                "port must be a number between 0 and 65535"
            );
        }
        other => panic!("expected invalid, got {other:?}"),
    }
    assert_eq!(backend.call_count(), 0, "backend must not see invalid forms");

    match controller.notice_for(ConfigKind::CustomWebhook, &outcome, false) {
        Some(Notice::Danger(message)) => {
            assert_eq!(
                message,
                "Some fields are invalid. Fix all highlighted error(s) before continuing."
            );
        }
        other => panic!("expected danger notice, got {other:?}"),
    }
}

#[tokio::test]
async fn backend_rejection_preserves_the_form() {
    let backend = Arc::new(RecordingBackend::rejecting("Host of url is denied"));
    let controller = SubmissionController::new(Arc::clone(&backend));
    let values = webhook_form();
    let before = values.clone();

    let outcome = controller
        .submit(ConfigKind::CustomWebhook, &values, None)
        .await
        .unwrap();

    assert!(
        matches!(&outcome, SubmissionOutcome::BackendRejected { message } if message == "Host of url is denied")
    );
    assert_eq!(values, before, "edits must survive a backend rejection");
    assert_eq!(controller.state(), SubmitState::Idle, "a retry stays possible");
}

#[tokio::test]
async fn concurrent_submit_produces_one_create() {
    let backend = Arc::new(RecordingBackend::gated());
    let controller = Arc::new(SubmissionController::new(Arc::clone(&backend)));

    let racing = Arc::clone(&controller);
    let first = tokio::spawn(async move {
        racing
            .submit(ConfigKind::CustomWebhook, &webhook_form(), None)
            .await
    });

    while controller.state() != SubmitState::Submitting {
        tokio::task::yield_now().await;
    }

    let second = controller
        .submit(ConfigKind::CustomWebhook, &webhook_form(), None)
        .await;
    assert!(matches!(second, Err(SubmitError::InFlight)));

    if let Some(gate) = &backend.create_gate {
        gate.add_permits(1);
    }
    let first = first.await.unwrap().unwrap();
    assert!(matches!(first, SubmissionOutcome::Saved { .. }));
    assert_eq!(backend.created.lock().len(), 1);
}

#[tokio::test]
async fn delete_flow_requires_the_typed_phrase() {
    let backend = Arc::new(RecordingBackend::default());
    let controller = DeleteController::new(Arc::clone(&backend));
    let selections = vec![Selection::new("cfg-1", "Test webhook channel")];

    controller.set_confirm_text("del");
    assert!(!controller.is_armed());
    let err = controller.submit(&selections).await.unwrap_err();
    assert!(matches!(err, SubmitError::PreconditionViolated { .. }));
    assert_eq!(backend.call_count(), 0);

    controller.set_confirm_text("delete");
    let outcome = controller.submit(&selections).await.unwrap();
    assert_eq!(
        controller.notice_for(&selections, &outcome),
        Some(Notice::Success(
            "Channel Test webhook channel successfully deleted.".to_string()
        ))
    );
    assert_eq!(backend.deleted.lock()[0], vec!["cfg-1".to_string()]);
}

#[tokio::test]
async fn mute_then_unmute_round_trip() {
    let backend = Arc::new(RecordingBackend::default());
    let controller = MuteController::new(Arc::clone(&backend));
    let payload = ConfigPayload::new(
        "ops-alerts",
        ChannelSpec::Slack {
            url: "https://hooks.slack.com/services/T0/B0/XX".to_string(),
        },
    );

    controller.set_muted("cfg-1", &payload, true).await.unwrap();
    let muted = backend.updated.lock()[0].1.clone();
    assert!(!muted.enabled);
    assert_eq!(muted.spec, payload.spec);

    controller.set_muted("cfg-1", &muted, false).await.unwrap();
    let unmuted = backend.updated.lock()[1].1.clone();
    assert!(unmuted.enabled);
    assert_eq!(unmuted.spec, payload.spec);
}

#[tokio::test]
async fn closed_session_swallows_late_notices() {
    let backend = Arc::new(RecordingBackend::default());
    let controller = SubmissionController::new(Arc::clone(&backend));

    let outcome = controller
        .submit(ConfigKind::CustomWebhook, &webhook_form(), None)
        .await
        .unwrap();
    // backend call still happened
    assert_eq!(backend.created.lock().len(), 1);

    controller.session().close();
    assert_eq!(
        controller.notice_for(ConfigKind::CustomWebhook, &outcome, false),
        None
    );
}
