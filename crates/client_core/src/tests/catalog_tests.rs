use super::*;

fn titles(courses: &[&Course]) -> Vec<String> {
    courses.iter().map(|course| course.title.clone()).collect()
}

#[test]
fn all_category_with_zero_rating_keeps_fixture_order() {
    let courses = fixture_courses();
    let visible = CourseFilter::default().apply(&courses);

    assert_eq!(
        titles(&visible),
        vec![
            "Complete JavaScript",
            "Complete ReactJS",
            "Complete SQL",
            "Complete Kotlin"
        ]
    );
}

#[test]
fn filters_by_category_and_minimum_rating() {
    let courses = fixture_courses();

    let frontend = CourseFilter::new(CategoryFilter::Only(Category::Frontend), 0.0);
    assert_eq!(
        titles(&frontend.apply(&courses)),
        vec!["Complete JavaScript", "Complete ReactJS"]
    );

    let top_rated = CourseFilter::new(CategoryFilter::All, 4.9);
    assert_eq!(
        titles(&top_rated.apply(&courses)),
        vec!["Complete ReactJS", "Complete Kotlin"]
    );

    let backend = CourseFilter::new(CategoryFilter::Only(Category::Backend), 0.0);
    assert!(backend.apply(&courses).is_empty());
}

#[test]
fn minimum_rating_is_clamped() {
    let mut filter = CourseFilter::default();

    filter.set_min_rating(7.5);
    assert_eq!(filter.min_rating(), 5.0);
    filter.set_min_rating(-1.0);
    assert_eq!(filter.min_rating(), 0.0);
    filter.set_min_rating(f32::NAN);
    assert_eq!(filter.min_rating(), 0.0);

    assert_eq!(parse_min_rating(""), Ok(0.0));
    assert_eq!(parse_min_rating(" 4.5 "), Ok(4.5));
    assert_eq!(parse_min_rating("9"), Ok(5.0));
    assert!(parse_min_rating("four").is_err());
}

#[test]
fn category_options_and_parsing() {
    let labels: Vec<String> = CategoryFilter::options()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        labels,
        vec!["All", "Frontend", "Backend", "Mobile", "Database"]
    );

    assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
    assert_eq!(
        "Mobile".parse::<CategoryFilter>(),
        Ok(CategoryFilter::Only(Category::Mobile))
    );
    assert!("Games".parse::<CategoryFilter>().is_err());
}
