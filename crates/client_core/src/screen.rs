//! Registration screen: wraps the form controller with the screen's timers and
//! navigation actions.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use tracing::{debug, info};
use url::form_urlencoded;

use crate::{
    feedback::{NavigationMode, Navigator, Notification, Notifier},
    form::{RegistrationForm, SubmitOutcome},
    scheduler::{ScheduledTask, Scheduler},
};

pub const HOME_PATH: &str = "/";
pub const NOT_REGISTERED_ERROR: &str = "not_registered";
pub const NOT_REGISTERED_MESSAGE: &str = "You need to register first before using Google login";
pub const NOT_REGISTERED_NOTICE_DURATION: Duration = Duration::from_millis(5000);
pub const QUERY_CLEANUP_DELAY: Duration = Duration::from_millis(100);
pub const SLIDE_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub id: usize,
    pub image_ref: &'static str,
}

pub const SLIDES: [Slide; 3] = [
    Slide {
        id: 0,
        image_ref: "assets/desert.png",
    },
    Slide {
        id: 1,
        image_ref: "assets/stars.png",
    },
    Slide {
        id: 2,
        image_ref: "assets/mountains.png",
    },
];

/// Rotating background slides; advances on a fixed period until stopped.
pub struct Slideshow {
    slides: Vec<Slide>,
    current: Arc<AtomicUsize>,
    ticker: Option<ScheduledTask>,
}

impl Slideshow {
    pub fn start(scheduler: &Scheduler, slides: Vec<Slide>, period: Duration) -> Self {
        let current = Arc::new(AtomicUsize::new(0));
        let count = slides.len();
        let ticker = (count > 1).then(|| {
            let current = Arc::clone(&current);
            scheduler.every("slideshow", period, move || {
                let _ = current.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |index| {
                    Some((index + 1) % count)
                });
            })
        });
        Self {
            slides,
            current,
            ticker,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.current_index())
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

pub struct RegistrationScreen {
    form: Arc<RegistrationForm>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    scheduler: Scheduler,
    slideshow: Slideshow,
    query_cleanup: Option<ScheduledTask>,
}

impl RegistrationScreen {
    /// Starts the slideshow and reacts to the query string the screen was opened with.
    pub fn mount(form: Arc<RegistrationForm>, query: &str) -> Self {
        let scheduler = form.scheduler().clone();
        let slideshow = Slideshow::start(&scheduler, SLIDES.to_vec(), SLIDE_INTERVAL);
        let mut screen = Self {
            notifier: form.notifier(),
            navigator: form.navigator(),
            form,
            scheduler,
            slideshow,
            query_cleanup: None,
        };
        screen.apply_query(query);
        screen
    }

    pub fn form(&self) -> &Arc<RegistrationForm> {
        &self.form
    }

    pub fn slideshow(&self) -> &Slideshow {
        &self.slideshow
    }

    /// Handles `?error=not_registered`: tells the user why they landed here, then
    /// drops the parameter from the location without adding a history entry.
    pub fn apply_query(&mut self, query: &str) {
        let pairs: Vec<(String, String)> =
            form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
                .into_owned()
                .collect();
        let not_registered = pairs
            .iter()
            .any(|(key, value)| key == "error" && value == NOT_REGISTERED_ERROR);
        if !not_registered {
            return;
        }

        info!("registration screen opened after unregistered social login");
        self.notifier.notify(Notification::info(
            NOT_REGISTERED_MESSAGE,
            NOT_REGISTERED_NOTICE_DURATION,
        ));

        let remaining = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs.iter().filter(|(key, _)| key != "error"))
            .finish();
        let target = format!("?{remaining}");
        let navigator = Arc::clone(&self.navigator);
        self.query_cleanup = Some(self.scheduler.once(
            "query-cleanup",
            QUERY_CLEANUP_DELAY,
            move || navigator.navigate(&target, NavigationMode::Replace),
        ));
    }

    pub async fn submit(&self) -> SubmitOutcome {
        self.form.submit().await
    }

    pub fn back_to_website(&self) {
        self.navigator.navigate(HOME_PATH, NavigationMode::Push);
    }

    pub fn go_to_login(&self) {
        self.navigator.navigate(HOME_PATH, NavigationMode::Push);
    }

    /// Lets deferred navigations (query cleanup, post-success redirect) run to completion.
    pub async fn settle(&mut self) {
        if let Some(cleanup) = self.query_cleanup.take() {
            cleanup.join().await;
        }
        self.form.settle().await;
    }

    pub async fn teardown(&mut self) {
        debug!("tearing down registration screen");
        self.slideshow.stop();
        if let Some(cleanup) = self.query_cleanup.take() {
            cleanup.cancel();
        }
        self.form.teardown().await;
    }
}

#[cfg(test)]
#[path = "tests/screen_tests.rs"]
mod tests;
