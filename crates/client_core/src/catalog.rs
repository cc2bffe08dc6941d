//! Course fixture list and the dashboard filter over it.

use std::{fmt, str::FromStr};

use shared::{
    domain::{Category, Course, CourseId},
    error::ParseError,
};

pub const MAX_RATING: f32 = 5.0;

/// Category picker value: everything, or one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Picker options in display order.
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CourseFilter {
    category: CategoryFilter,
    min_rating: f32,
}

impl CourseFilter {
    pub fn new(category: CategoryFilter, min_rating: f32) -> Self {
        Self {
            category,
            min_rating: clamp_rating(min_rating),
        }
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn min_rating(&self) -> f32 {
        self.min_rating
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn set_min_rating(&mut self, min_rating: f32) {
        self.min_rating = clamp_rating(min_rating);
    }

    pub fn matches(&self, course: &Course) -> bool {
        self.category.matches(course.category) && course.rating >= self.min_rating
    }

    /// Matching courses, in input order.
    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        courses.iter().filter(|course| self.matches(course)).collect()
    }
}

fn clamp_rating(rating: f32) -> f32 {
    if rating.is_finite() {
        rating.clamp(0.0, MAX_RATING)
    } else {
        0.0
    }
}

/// Reads the minimum-rating input box. Blank input means no minimum.
pub fn parse_min_rating(raw: &str) -> Result<f32, std::num::ParseFloatError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f32>().map(clamp_rating)
}

pub fn fixture_courses() -> Vec<Course> {
    let course = |id: i64,
                  title: &str,
                  thumbnail: &str,
                  category: Category,
                  rating: f32,
                  review_count: u32| Course {
        id: CourseId(id),
        title: title.to_string(),
        thumbnail_ref: thumbnail.to_string(),
        creator: "Dr. Angela Yu".to_string(),
        category,
        rating,
        review_count,
    };

    vec![
        course(
            1,
            "Complete JavaScript",
            "assets/courses/javascript.jpg",
            Category::Frontend,
            4.8,
            1234,
        ),
        course(
            2,
            "Complete ReactJS",
            "assets/courses/react.jpg",
            Category::Frontend,
            4.9,
            987,
        ),
        course(
            3,
            "Complete SQL",
            "assets/courses/sql.jpg",
            Category::Database,
            4.7,
            2341,
        ),
        course(
            4,
            "Complete Kotlin",
            "assets/courses/kotlin.jpg",
            Category::Mobile,
            4.9,
            1567,
        ),
    ]
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
