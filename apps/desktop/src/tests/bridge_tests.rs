use std::time::Duration;

use super::*;

#[test]
fn notifier_and_navigator_enqueue_events() {
    let (ui, ui_rx) = channel(4);

    ui.notify(Notification::success("Please verify your email!", Duration::from_millis(5000)));
    ui.navigate("/", NavigationMode::Push);

    assert_eq!(
        render_event(&ui_rx.recv().expect("notify event")),
        "[success] Please verify your email! (5000ms)"
    );
    assert_eq!(
        ui_rx.recv().expect("navigate event"),
        UiEvent::Navigate {
            path: "/".into(),
            mode: NavigationMode::Push
        }
    );
}

#[test]
fn full_or_disconnected_queue_drops_without_panicking() {
    let (ui, ui_rx) = channel(1);

    assert!(ui.dispatch(UiEvent::Navigate {
        path: "/".into(),
        mode: NavigationMode::Push
    }));
    assert!(!ui.dispatch(UiEvent::Navigate {
        path: "?ref=ad".into(),
        mode: NavigationMode::Replace
    }));

    drop(ui_rx);
    ui.notify(Notification::error("Registration failed.", Duration::from_millis(5000)));
    assert!(!ui.dispatch(UiEvent::Closed));
}

#[test]
fn renderer_collects_lines_until_closed() {
    let (ui, ui_rx) = channel(8);
    let renderer = spawn_renderer(ui_rx);

    ui.notify(Notification::info(
        "You need to register first before using Google login",
        Duration::from_millis(5000),
    ));
    ui.navigate("?ref=ad", NavigationMode::Replace);
    ui.close();
    ui.navigate("/", NavigationMode::Push);

    let shown = renderer.join().expect("renderer thread");
    assert_eq!(
        shown,
        vec![
            "[info] You need to register first before using Google login (5000ms)".to_string(),
            "-> ?ref=ad (replace)".to_string(),
        ]
    );
}
