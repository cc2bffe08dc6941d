//! Client-side logic behind the OriginHash onboarding screens: the registration
//! form controller and its HTTP endpoint, screen timers, and the course dashboard.

pub mod api;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod feedback;
pub mod form;
pub mod scheduler;
pub mod screen;

pub use api::{HttpRegistrationApi, RegistrationApi};
pub use dashboard::{CourseCard, Dashboard, DashboardView};
pub use error::{ApiCallError, SubmitError, ValidationError};
pub use feedback::{NavigationMode, Navigator, Notification, NotificationLevel, Notifier};
pub use form::{
    FormConfig, FormFields, RegistrationForm, SubmissionState, SubmitOutcome, TermsPolicy,
};
pub use scheduler::{ScheduledTask, Scheduler};
pub use screen::RegistrationScreen;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod api_tests;

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod scheduler_tests;
