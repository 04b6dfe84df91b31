mod common;

use common::{numbered_words, DeviceEvent, DrawOp, RecordingCanvas, RecordingDevice};
use std::sync::Arc;
use wristnote_core::{
    Icon, MemoryNotificationStore, MonospaceWrap, NotificationApp, NotificationRecord,
    NotificationStore, NotifyConfig, PresentationState, StoreError, SwipeDirection, TouchPoint,
    CLEAR_PROMPT,
};

const YES: TouchPoint = TouchPoint::new(60, 160);
const NO: TouchPoint = TouchPoint::new(170, 160);

struct Harness {
    store: MemoryNotificationStore,
    device: Arc<RecordingDevice>,
    app: NotificationApp<MemoryNotificationStore>,
    canvas: RecordingCanvas,
}

fn harness() -> Harness {
    let store = MemoryNotificationStore::new();
    let device = RecordingDevice::new();
    let app = NotificationApp::new(
        store.clone(),
        device.handles(),
        Arc::new(MonospaceWrap::default()),
        NotifyConfig::default(),
    );
    Harness {
        store,
        device,
        app,
        canvas: RecordingCanvas::new(),
    }
}

fn mail(id: i64, body: &str) -> NotificationRecord {
    NotificationRecord::new(id).with_title("Mail").with_body(body)
}

fn incoming_call() -> NotificationRecord {
    NotificationRecord::new(0)
        .with_src("call")
        .with_title("Alice")
        .with_body("+1555")
}

#[test]
fn foreground_pops_oldest_and_draws_generic_layout() {
    let mut h = harness();
    h.store.insert(mail(1, "Hello")).unwrap();
    h.store.insert(mail(2, "Later")).unwrap();

    h.app.foreground(&mut h.canvas).unwrap();

    assert_eq!(h.app.state(), PresentationState::ShowingBody);
    assert_eq!(h.app.current().map(|record| record.id()), Some(1));
    assert_eq!(h.store.ids(), vec![2]);
    assert_eq!(
        h.canvas.texts(),
        vec![
            (String::new(), 10),
            ("Mail".to_string(), 40),
            ("Hello".to_string(), 90),
        ]
    );
    assert!(!h.canvas.ops.iter().any(|op| matches!(op, DrawOp::Blit(..))));
    assert!(!h.app.is_ringing());
}

#[test]
fn call_layout_rings_until_backgrounded() {
    let mut h = harness();
    h.store.insert(incoming_call()).unwrap();

    h.app.foreground(&mut h.canvas).unwrap();

    assert!(h.canvas.ops.contains(&DrawOp::Blit(Icon::Phone, 94, 10)));
    assert_eq!(
        h.canvas.texts(),
        vec![
            ("call".to_string(), 70),
            ("Alice".to_string(), 100),
            ("+1555".to_string(), 150),
        ]
    );
    assert_eq!(h.device.events(), vec![DeviceEvent::RequestTick(1000)]);

    h.app.tick();
    h.app.tick();
    assert_eq!(h.device.count(|event| *event == DeviceEvent::Pulse(500)), 2);

    h.app.background();
    assert_eq!(h.device.events().last(), Some(&DeviceEvent::CancelTick));
    assert!(!h.app.is_ringing());

    h.app.tick();
    assert_eq!(h.device.pulses(), 2);
    assert_eq!(h.app.state(), PresentationState::Idle);
    assert_eq!(h.app.pager().page_count(), 0);
}

#[test]
fn first_page_stops_body_at_bottom_margin() {
    let mut h = harness();
    h.store.insert(mail(1, &numbered_words(150))).unwrap();

    h.app.foreground(&mut h.canvas).unwrap();

    let body_ys: Vec<i32> = h.canvas.texts().iter().skip(2).map(|(_, y)| *y).collect();
    assert_eq!(body_ys, vec![90, 114, 138, 162, 186, 210]);
    assert!(h.app.pager().page_count() >= 1);

    h.canvas.clear();
    h.app.swipe(SwipeDirection::Up, &mut h.canvas);
    assert_eq!(h.app.pager().page(), 1);
    let texts = h.canvas.texts();
    assert_eq!(texts.first().map(|(_, y)| *y), Some(0));
    assert_eq!(
        texts.first().map(|(text, _)| text.as_str()),
        h.app.pager().page_lines(1).first().copied()
    );
}

#[test]
fn every_body_word_is_drawn_on_some_page() {
    let mut h = harness();
    let body = numbered_words(120);
    h.store.insert(mail(1, &body)).unwrap();
    h.app.foreground(&mut h.canvas).unwrap();

    let mut drawn: Vec<String> = h.canvas.texts().into_iter().map(|(text, _)| text).collect();
    for _ in 0..h.app.pager().page_count() {
        h.canvas.clear();
        h.app.swipe(SwipeDirection::Up, &mut h.canvas);
        drawn.extend(h.canvas.texts().into_iter().map(|(text, _)| text));
    }

    let joined = drawn.join(" ");
    for word in body.split_whitespace() {
        assert!(joined.split(' ').any(|drawn_word| drawn_word == word), "missing {word}");
    }

    h.canvas.clear();
    h.app.swipe(SwipeDirection::Up, &mut h.canvas);
    assert_eq!(h.device.events().last(), Some(&DeviceEvent::NavigateBack));
    assert_eq!(h.app.state(), PresentationState::Idle);
    assert!(h.app.current().is_none());
    assert_eq!(h.app.pager().text(), "");
    assert_eq!(h.app.pager().line_count(), 0);
}

#[test]
fn swipe_down_on_first_page_asks_to_clear() {
    let mut h = harness();
    h.store.insert(mail(1, "Hello")).unwrap();
    h.store.insert(mail(2, "Pending")).unwrap();
    h.app.foreground(&mut h.canvas).unwrap();
    h.canvas.clear();

    h.app.swipe(SwipeDirection::Down, &mut h.canvas);

    assert_eq!(h.app.state(), PresentationState::ConfirmingClear);
    assert!(h.canvas.texts().iter().any(|(text, _)| text == CLEAR_PROMPT));
    assert!(h.canvas.has_button("Yes"));
    assert!(h.canvas.has_button("No"));
    assert_eq!(h.device.pulses(), 0);
}

#[test]
fn confirming_yes_clears_store_and_exits() {
    let mut h = harness();
    h.store.insert(mail(1, "Hello")).unwrap();
    h.store.insert(mail(2, "Pending")).unwrap();
    h.app.foreground(&mut h.canvas).unwrap();
    h.app.swipe(SwipeDirection::Down, &mut h.canvas);

    h.app.touch(YES, &mut h.canvas);

    assert!(h.store.is_empty());
    assert_eq!(h.device.events(), vec![DeviceEvent::NavigateBack]);
    assert_eq!(h.app.state(), PresentationState::Idle);
    assert!(h.app.current().is_none());
    assert!(h.app.pager().layout().header().is_none());
}

#[test]
fn answering_no_returns_to_body_without_touching_store() {
    let mut h = harness();
    h.store.insert(mail(1, "Hello")).unwrap();
    h.store.insert(mail(2, "Pending")).unwrap();
    h.app.foreground(&mut h.canvas).unwrap();
    h.app.swipe(SwipeDirection::Down, &mut h.canvas);
    h.canvas.clear();

    h.app.touch(NO, &mut h.canvas);

    assert_eq!(h.app.state(), PresentationState::ShowingBody);
    assert_eq!(h.store.ids(), vec![2]);
    assert!(h.canvas.texts().iter().any(|(text, _)| text == "Hello"));
    assert!(h.device.events().is_empty());
}

#[test]
fn swipe_up_cancels_confirmation() {
    let mut h = harness();
    h.store.insert(mail(1, "Hello")).unwrap();
    h.app.foreground(&mut h.canvas).unwrap();
    h.app.swipe(SwipeDirection::Down, &mut h.canvas);
    h.canvas.clear();

    h.app.swipe(SwipeDirection::Up, &mut h.canvas);

    assert_eq!(h.app.state(), PresentationState::ShowingBody);
    assert!(h.canvas.texts().iter().any(|(text, _)| text == "Hello"));
    assert!(h.device.events().is_empty());

    // The overlay is gone, so a later "yes" touch does nothing.
    h.app.touch(YES, &mut h.canvas);
    assert_eq!(h.app.state(), PresentationState::ShowingBody);
}

#[test]
fn touches_outside_buttons_keep_prompt_open() {
    let mut h = harness();
    h.store.insert(mail(1, "Hello")).unwrap();
    h.store.insert(mail(2, "Pending")).unwrap();
    h.app.foreground(&mut h.canvas).unwrap();
    h.app.swipe(SwipeDirection::Down, &mut h.canvas);

    h.app.touch(TouchPoint::new(120, 20), &mut h.canvas);
    h.app.swipe(SwipeDirection::Down, &mut h.canvas);

    assert_eq!(h.app.state(), PresentationState::ConfirmingClear);
    assert_eq!(h.store.len(), 1);
}

#[test]
fn swipe_down_on_later_page_goes_back_a_page() {
    let mut h = harness();
    h.store.insert(mail(1, &numbered_words(150))).unwrap();
    h.app.foreground(&mut h.canvas).unwrap();
    h.app.swipe(SwipeDirection::Up, &mut h.canvas);

    h.app.swipe(SwipeDirection::Down, &mut h.canvas);

    assert_eq!(h.app.pager().page(), 0);
    assert_eq!(h.app.state(), PresentationState::ShowingBody);
}

#[test]
fn leaving_a_call_by_swiping_cancels_ringing() {
    let mut h = harness();
    h.store.insert(incoming_call()).unwrap();
    h.app.foreground(&mut h.canvas).unwrap();

    h.app.swipe(SwipeDirection::Up, &mut h.canvas);

    assert_eq!(
        h.device.events(),
        vec![
            DeviceEvent::RequestTick(1000),
            DeviceEvent::CancelTick,
            DeviceEvent::NavigateBack,
        ]
    );
    h.app.background();
    assert_eq!(h.device.count(|event| *event == DeviceEvent::CancelTick), 1);
}

#[test]
fn foreground_on_empty_store_is_an_error() {
    let mut h = harness();

    let err = h.app.foreground(&mut h.canvas).unwrap_err();

    assert_eq!(err, StoreError::Empty);
    assert_eq!(h.app.state(), PresentationState::Idle);
    assert!(h.canvas.ops.is_empty());
}

#[test]
fn refreshing_foreground_moves_to_next_notification() {
    let mut h = harness();
    h.store.insert(incoming_call()).unwrap();
    h.store.insert(mail(5, "Next")).unwrap();
    h.app.foreground(&mut h.canvas).unwrap();

    h.app.foreground(&mut h.canvas).unwrap();

    assert_eq!(h.app.current().map(|record| record.id()), Some(5));
    assert!(!h.app.is_ringing());
    assert!(h.device.events().contains(&DeviceEvent::CancelTick));
    assert!(h.store.is_empty());
}
