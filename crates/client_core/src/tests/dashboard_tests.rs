use shared::domain::Category;

use super::*;

fn scheduler() -> Scheduler {
    Scheduler::from_current().expect("runtime")
}

#[tokio::test(start_paused = true)]
async fn shows_skeletons_until_fixture_loads() {
    let mut dashboard = Dashboard::mount(&scheduler());

    assert!(dashboard.is_loading());
    assert_eq!(
        dashboard.view(),
        DashboardView::Loading {
            placeholders: SKELETON_COUNT
        }
    );

    tokio::time::sleep(Duration::from_millis(1400)).await;
    assert!(dashboard.is_loading());

    assert!(dashboard.loaded().await);
    let DashboardView::Courses(cards) = dashboard.view() else {
        panic!("expected course cards");
    };
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[0].title, "Complete JavaScript");
    assert_eq!(cards[0].stars, "★★★★");
    assert_eq!(cards[0].reviews, "(1234)");
    assert_eq!(cards[0].category, "Frontend");
    assert_eq!(cards[0].creator, "Dr. Angela Yu");
}

#[tokio::test(start_paused = true)]
async fn filter_changes_are_reflected_in_view() {
    let mut dashboard = Dashboard::mount_with(&scheduler(), fixture_courses(), Duration::ZERO);
    assert!(dashboard.loaded().await);

    dashboard.set_category(CategoryFilter::Only(Category::Database));
    let DashboardView::Courses(cards) = dashboard.view() else {
        panic!("expected course cards");
    };
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Complete SQL");

    dashboard.set_category(CategoryFilter::Only(Category::Backend));
    assert_eq!(dashboard.view(), DashboardView::Empty(EMPTY_MESSAGE));

    dashboard.set_category(CategoryFilter::All);
    dashboard.set_min_rating(4.85);
    let DashboardView::Courses(cards) = dashboard.view() else {
        panic!("expected course cards");
    };
    let titles: Vec<&str> = cards.iter().map(|card| card.title.as_str()).collect();
    assert_eq!(titles, vec!["Complete ReactJS", "Complete Kotlin"]);
}

#[tokio::test(start_paused = true)]
async fn teardown_before_load_cancels_it() {
    let mut dashboard = Dashboard::mount(&scheduler());

    dashboard.teardown();
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert!(dashboard.is_loading());
    assert!(!dashboard.loaded().await);
}

#[test]
fn card_stars_floor_the_rating() {
    let mut course = fixture_courses().remove(1);
    assert_eq!(CourseCard::from(&course).stars, "★★★★");

    course.rating = 5.0;
    assert_eq!(CourseCard::from(&course).stars, "★★★★★");

    course.rating = 0.4;
    assert_eq!(CourseCard::from(&course).stars, "");
}
