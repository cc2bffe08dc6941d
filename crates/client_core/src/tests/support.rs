use std::{
    collections::VecDeque,
    sync::{Arc, Mutex as StdMutex},
};

use async_trait::async_trait;
use shared::{
    domain::Role,
    protocol::{RegistrationRequest, RegistrationResponse},
};
use tokio::sync::{Notify, Semaphore};

use crate::{
    api::RegistrationApi,
    error::ApiCallError,
    feedback::{NavigationMode, Navigator, Notification, Notifier},
    form::{FormConfig, FormFields, RegistrationForm},
    scheduler::Scheduler,
};

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    seen: StdMutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(crate) fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().expect("notifier lock").clone()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|notification| notification.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().expect("notifier lock").push(notification);
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    visits: StdMutex<Vec<(String, NavigationMode)>>,
}

impl RecordingNavigator {
    pub(crate) fn visits(&self) -> Vec<(String, NavigationMode)> {
        self.visits.lock().expect("navigator lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str, mode: NavigationMode) {
        self.visits
            .lock()
            .expect("navigator lock")
            .push((path.to_string(), mode));
    }
}

/// In-memory registration endpoint. Replies are consumed in order; once the queue
/// is empty every call succeeds. With a gate, each call parks until released.
#[derive(Default)]
pub(crate) struct StubRegistrationApi {
    replies: StdMutex<VecDeque<Result<RegistrationResponse, ApiCallError>>>,
    calls: StdMutex<Vec<RegistrationRequest>>,
    gate: Option<Semaphore>,
    pub(crate) call_started: Notify,
}

impl StubRegistrationApi {
    pub(crate) fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    pub(crate) fn reply(self, reply: Result<RegistrationResponse, ApiCallError>) -> Self {
        self.replies.lock().expect("replies lock").push_back(reply);
        self
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub(crate) fn calls(&self) -> Vec<RegistrationRequest> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl RegistrationApi for StubRegistrationApi {
    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResponse, ApiCallError> {
        self.calls.lock().expect("calls lock").push(request.clone());
        self.call_started.notify_one();
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate open").forget();
        }
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| Ok(RegistrationResponse::succeeded()))
    }
}

pub(crate) struct Harness {
    pub(crate) api: Arc<StubRegistrationApi>,
    pub(crate) notifier: Arc<RecordingNotifier>,
    pub(crate) navigator: Arc<RecordingNavigator>,
    pub(crate) form: Arc<RegistrationForm>,
}

impl Harness {
    pub(crate) fn new(api: StubRegistrationApi) -> Self {
        Self::with_config(api, FormConfig::default())
    }

    pub(crate) fn with_config(api: StubRegistrationApi, config: FormConfig) -> Self {
        let api = Arc::new(api);
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let form = RegistrationForm::with_config(
            api.clone(),
            notifier.clone(),
            navigator.clone(),
            Scheduler::from_current().expect("inside tokio runtime"),
            config,
        );
        Self {
            api,
            notifier,
            navigator,
            form,
        }
    }
}

pub(crate) fn jane() -> FormFields {
    FormFields {
        name: "Jane".into(),
        email: "jane@x.com".into(),
        password: "pw".into(),
        role: Some(Role::Individual),
        terms_accepted: false,
    }
}
