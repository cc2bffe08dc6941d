use std::{sync::Arc, time::Duration};

use shared::domain::{Course, CourseId};
use tokio::sync::watch;
use tracing::debug;

use crate::{
    catalog::{fixture_courses, CategoryFilter, CourseFilter},
    scheduler::{ScheduledTask, Scheduler},
};

pub const LOAD_DELAY: Duration = Duration::from_millis(1500);
pub const SKELETON_COUNT: usize = 6;
pub const EMPTY_MESSAGE: &str = "No courses found for selected filters.";
const STAR: char = '★';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCard {
    pub id: CourseId,
    pub title: String,
    pub thumbnail_ref: String,
    pub creator: String,
    pub category: String,
    pub stars: String,
    pub reviews: String,
}

impl From<&Course> for CourseCard {
    fn from(course: &Course) -> Self {
        let whole_stars = course.rating.max(0.0).floor() as usize;
        Self {
            id: course.id,
            title: course.title.clone(),
            thumbnail_ref: course.thumbnail_ref.clone(),
            creator: course.creator.clone(),
            category: course.category.label().to_string(),
            stars: std::iter::repeat(STAR).take(whole_stars).collect(),
            reviews: format!("({})", course.review_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    Loading { placeholders: usize },
    Courses(Vec<CourseCard>),
    Empty(&'static str),
}

pub struct Dashboard {
    courses: watch::Receiver<Option<Arc<Vec<Course>>>>,
    filter: CourseFilter,
    loader: Option<ScheduledTask>,
}

impl Dashboard {
    /// Starts loading the fixture list after [`LOAD_DELAY`].
    pub fn mount(scheduler: &Scheduler) -> Self {
        Self::mount_with(scheduler, fixture_courses(), LOAD_DELAY)
    }

    pub fn mount_with(scheduler: &Scheduler, courses: Vec<Course>, delay: Duration) -> Self {
        let (tx, rx) = watch::channel(None);
        let loader = scheduler.once("dashboard-load", delay, move || {
            debug!(count = courses.len(), "dashboard courses loaded");
            tx.send_replace(Some(Arc::new(courses)));
        });
        Self {
            courses: rx,
            filter: CourseFilter::default(),
            loader: Some(loader),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.courses.borrow().is_none()
    }

    pub fn filter(&self) -> &CourseFilter {
        &self.filter
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.set_category(category);
    }

    pub fn set_min_rating(&mut self, min_rating: f32) {
        self.filter.set_min_rating(min_rating);
    }

    pub fn view(&self) -> DashboardView {
        let courses = self.courses.borrow();
        let Some(courses) = courses.as_ref() else {
            return DashboardView::Loading {
                placeholders: SKELETON_COUNT,
            };
        };

        let cards: Vec<CourseCard> = self
            .filter
            .apply(courses)
            .into_iter()
            .map(CourseCard::from)
            .collect();
        if cards.is_empty() {
            DashboardView::Empty(EMPTY_MESSAGE)
        } else {
            DashboardView::Courses(cards)
        }
    }

    /// Resolves once the courses are in. Returns `false` if loading was cancelled first.
    pub async fn loaded(&mut self) -> bool {
        self.courses
            .wait_for(|courses| courses.is_some())
            .await
            .is_ok()
    }

    pub fn teardown(&mut self) {
        if let Some(loader) = self.loader.take() {
            loader.cancel();
        }
    }
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
