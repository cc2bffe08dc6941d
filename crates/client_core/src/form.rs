//! Registration form controller: local field state, validation, a single
//! in-flight dispatch, and outcome feedback.
//!
//! ```text
//! Idle    --submit(valid)--> Pending --success--> Succeeded (terminal)
//! Pending --failure--> Failed --submit(valid)--> Pending
//! Idle/Failed --submit(invalid)--> unchanged
//! ```

use std::{sync::Arc, time::Duration};

use shared::{domain::Role, protocol::RegistrationRequest};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    api::RegistrationApi,
    error::{SubmitError, ValidationError},
    feedback::{
        NavigationMode, Navigator, Notification, Notifier, DEFAULT_NOTIFICATION_DURATION,
    },
    scheduler::{ScheduledTask, Scheduler},
};

pub const SUCCESS_MESSAGE: &str = "Please verify your email!";
pub const SUBMIT_LABEL: &str = "Register";
pub const SUBMITTING_LABEL: &str = "Registering...";
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
    pub terms_accepted: bool,
}

/// Whether the terms checkbox gates submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TermsPolicy {
    #[default]
    Optional,
    Required,
}

#[derive(Debug, Clone)]
pub struct FormConfig {
    pub terms: TermsPolicy,
    pub success_path: String,
    pub redirect_delay: Duration,
    pub notification_duration: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            terms: TermsPolicy::Optional,
            success_path: "/".into(),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Preconditions failed; no request was sent.
    Invalid(ValidationError),
    /// A request is in flight or the form already succeeded; nothing was sent.
    Busy,
    /// The form was torn down; nothing was sent.
    Closed,
    Succeeded,
    Failed(SubmitError),
}

/// Checks the preconditions and builds the payload to dispatch.
pub fn validate(
    fields: &FormFields,
    terms: TermsPolicy,
) -> Result<RegistrationRequest, ValidationError> {
    let missing_value = [&fields.name, &fields.email, &fields.password]
        .into_iter()
        .any(|value| value.trim().is_empty());

    let role = match (fields.role, terms) {
        (Some(role), TermsPolicy::Optional) if !missing_value => role,
        (Some(role), TermsPolicy::Required) if !missing_value && fields.terms_accepted => role,
        (_, TermsPolicy::Optional) => return Err(ValidationError::MissingFields),
        (_, TermsPolicy::Required) => return Err(ValidationError::MissingFieldsOrTerms),
    };

    if !is_email_shaped(&fields.email) {
        return Err(ValidationError::InvalidEmail);
    }

    // Password goes out verbatim.
    Ok(RegistrationRequest {
        name: fields.name.trim().to_string(),
        email: fields.email.trim().to_string(),
        password: fields.password.clone(),
        role,
    })
}

/// `local@domain.tld` with no whitespace and a dot strictly inside the domain.
pub fn is_email_shaped(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

struct FormState {
    fields: FormFields,
    submission: SubmissionState,
    last_error: Option<SubmitError>,
    redirect: Option<ScheduledTask>,
    torn_down: bool,
}

pub struct RegistrationForm {
    api: Arc<dyn RegistrationApi>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    scheduler: Scheduler,
    config: FormConfig,
    inner: Mutex<FormState>,
}

impl RegistrationForm {
    pub fn new(
        api: Arc<dyn RegistrationApi>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        scheduler: Scheduler,
    ) -> Arc<Self> {
        Self::with_config(api, notifier, navigator, scheduler, FormConfig::default())
    }

    pub fn with_config(
        api: Arc<dyn RegistrationApi>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        scheduler: Scheduler,
        config: FormConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            notifier,
            navigator,
            scheduler,
            config,
            inner: Mutex::new(FormState {
                fields: FormFields::default(),
                submission: SubmissionState::Idle,
                last_error: None,
                redirect: None,
                torn_down: false,
            }),
        })
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub(crate) fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    pub(crate) fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.navigator)
    }

    pub(crate) fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub async fn set_fields(&self, fields: FormFields) {
        self.inner.lock().await.fields = fields;
    }

    pub async fn update_fields(&self, edit: impl FnOnce(&mut FormFields)) {
        edit(&mut self.inner.lock().await.fields);
    }

    pub async fn fields(&self) -> FormFields {
        self.inner.lock().await.fields.clone()
    }

    pub async fn state(&self) -> SubmissionState {
        self.inner.lock().await.submission
    }

    pub async fn last_error(&self) -> Option<SubmitError> {
        self.inner.lock().await.last_error.clone()
    }

    pub async fn can_submit(&self) -> bool {
        let guard = self.inner.lock().await;
        !guard.torn_down
            && matches!(
                guard.submission,
                SubmissionState::Idle | SubmissionState::Failed
            )
    }

    pub async fn submit_label(&self) -> &'static str {
        match self.state().await {
            SubmissionState::Pending => SUBMITTING_LABEL,
            _ => SUBMIT_LABEL,
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let attempt_id = Uuid::new_v4();
        let request = {
            let mut guard = self.inner.lock().await;
            if guard.torn_down {
                return SubmitOutcome::Closed;
            }
            if matches!(
                guard.submission,
                SubmissionState::Pending | SubmissionState::Succeeded
            ) {
                debug!(%attempt_id, state = ?guard.submission, "ignoring submit");
                return SubmitOutcome::Busy;
            }
            match validate(&guard.fields, self.config.terms) {
                Ok(request) => {
                    guard.submission = SubmissionState::Pending;
                    guard.last_error = None;
                    request
                }
                Err(err) => {
                    drop(guard);
                    debug!(%attempt_id, "registration form rejected locally: {err}");
                    self.notifier.notify(Notification::error(
                        err.to_string(),
                        self.config.notification_duration,
                    ));
                    return SubmitOutcome::Invalid(err);
                }
            }
        };

        info!(%attempt_id, role = %request.role, "dispatching registration");
        let result = match self.api.register(&request).await {
            Ok(response) if response.success => Ok(()),
            Ok(response) => Err(SubmitError::Application {
                status: None,
                message: response.message,
            }),
            Err(err) => Err(SubmitError::from(err)),
        };

        let mut guard = self.inner.lock().await;
        match result {
            Ok(()) => {
                guard.submission = SubmissionState::Succeeded;
                if !guard.torn_down {
                    let navigator = Arc::clone(&self.navigator);
                    let path = self.config.success_path.clone();
                    guard.redirect = Some(self.scheduler.once(
                        "registration-redirect",
                        self.config.redirect_delay,
                        move || navigator.navigate(&path, NavigationMode::Push),
                    ));
                }
                drop(guard);
                info!(%attempt_id, "registration accepted");
                self.notifier.notify(Notification::success(
                    SUCCESS_MESSAGE,
                    self.config.notification_duration,
                ));
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                guard.submission = SubmissionState::Failed;
                guard.last_error = Some(err.clone());
                drop(guard);
                warn!(%attempt_id, "registration failed: {err:?}");
                self.notifier.notify(Notification::error(
                    err.user_message(),
                    self.config.notification_duration,
                ));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Waits for a scheduled post-success redirect, if any, to run or be cancelled
    /// by [`RegistrationForm::teardown`].
    pub async fn settle(&self) {
        let completion = self
            .inner
            .lock()
            .await
            .redirect
            .as_ref()
            .map(ScheduledTask::completion);
        if let Some(completion) = completion {
            completion.await;
        }
    }

    /// Cancels the pending redirect and refuses further submissions.
    pub async fn teardown(&self) {
        let mut guard = self.inner.lock().await;
        guard.torn_down = true;
        if let Some(redirect) = guard.redirect.take() {
            redirect.cancel();
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
