use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::*;
use crate::camera::Camera;
use crate::config::OptionsError;
use crate::hit::PlanarHitTester;
use crate::scene::PinContainer;
use crate::style::Rgb;
use crate::visual::{Stencil, StencilFactory};

type Log = Rc<RefCell<Vec<String>>>;
type Collection = PinCollection<PlanarHitTester, PinContainer, StencilFactory>;

fn collection() -> Collection {
    let picker = PlanarHitTester::new(Camera::default(), 100.0);
    PinCollection::new(picker, PinContainer::new(), StencilFactory::new())
}

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn record(log: &Log) -> impl FnMut(&PinEvent) + 'static {
    let log = Rc::clone(log);
    move |ev: &PinEvent| {
        let tag = match ev.kind() {
            EventKind::Created => "created",
            EventKind::Warning => "warning",
            EventKind::DoubleClick => "dblclick",
            EventKind::Move => "move",
            EventKind::Leave => "leave",
        };
        log.borrow_mut().push(format!("{tag}:{}", ev.pin_id()));
    }
}

fn at(x: f64) -> Position {
    Position::new(x, 0.0, 0.0)
}

/// Collection with pins "a" and "b" at x = 0 and x = 1000, every pin event
/// recorded into the returned log.
fn collection_ab() -> (Collection, Log) {
    let mut pins = collection();
    let log = new_log();
    for (id, x) in [("a", 0.0), ("b", 1000.0)] {
        pins.add_pin(at(x), PinOptions::new().id(id)).unwrap();
        for kind in [EventKind::Move, EventKind::Leave, EventKind::DoubleClick] {
            assert!(pins.add_callback(id, kind, record(&log)));
        }
    }
    (pins, log)
}

fn pointer(x: f64, t: u64) -> PointerEvent {
    PointerEvent::new(x, 0.0, t)
}

// =============================================================
// add_pin / has / detach
// =============================================================

#[test]
fn add_then_has_then_detach() {
    let mut pins = collection();
    let id = pins.add_pin(at(0.0), PinOptions::new().id("p1")).unwrap();
    assert_eq!(id, "p1");
    assert!(pins.has("p1"));
    assert_eq!(pins.len(), 1);

    pins.detach("p1");
    assert!(!pins.has("p1"));
    assert!(pins.is_empty());
}

#[test]
fn created_event_fires_with_id() {
    let mut pins = collection();
    let log = new_log();
    pins.on_created(record(&log));
    pins.add_pin(at(0.0), PinOptions::new().id("p1")).unwrap();
    assert_eq!(*log.borrow(), vec!["created:p1"]);
}

#[test]
fn duplicate_id_warns_once_and_keeps_original() {
    let mut pins = collection();
    let warnings = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&warnings);
    pins.on_warning(move |ev: &PinEvent| {
        if let PinEvent::Warning { id, message } = ev {
            sink.borrow_mut().push((id.clone(), message.clone()));
        }
    });
    let created = new_log();
    pins.on_created(record(&created));

    pins.add_pin(at(0.0), PinOptions::new().id("p1").color("#ff0000")).unwrap();
    let err = pins
        .add_pin(at(50.0), PinOptions::new().id("p1").color("#00ff00"))
        .unwrap_err();

    assert_eq!(err, PinError::DuplicateId("p1".into()));
    assert_eq!(
        *warnings.borrow(),
        vec![("p1".to_string(), "a pin with id `p1` is already loaded".to_string())]
    );
    assert_eq!(*created.borrow(), vec!["created:p1"]);
    let pin = pins.pin("p1").unwrap();
    assert_eq!(pin.position(), at(0.0));
    assert_eq!(pin.style().color, Rgb::from_u8(255, 0, 0));
}

#[test]
fn duplicate_does_not_register_option_callbacks() {
    let (mut pins, log) = collection_ab();
    let extra = new_log();
    pins.add_pin(at(0.0), PinOptions::new().id("a").on_mouse_move(record(&extra)))
        .unwrap_err();
    pins.pointer_move(&pointer(0.0, 0));
    assert_eq!(*log.borrow(), vec!["move:a"]);
    assert!(extra.borrow().is_empty());
}

#[test]
fn invalid_options_warn_and_add_nothing() {
    let mut pins = collection();
    let log = new_log();
    pins.on_warning(record(&log));

    let err = pins
        .add_pin(at(0.0), PinOptions::new().id("bad").color("not-a-color"))
        .unwrap_err();
    assert!(matches!(err, PinError::InvalidOptions(_)));
    assert_eq!(*log.borrow(), vec!["warning:bad"]);
    assert!(!pins.has("bad"));
    assert!(pins.scene().is_empty());
    assert!(pins.visuals().is_empty());
}

#[test]
fn oversized_star_warns_instead_of_building() {
    let mut pins = collection();
    let log = new_log();
    pins.on_warning(record(&log));

    let err = pins
        .add_pin(at(0.0), PinOptions::new().id("huge").star(u32::MAX / 2 + 1, 0.3))
        .unwrap_err();
    assert!(matches!(err, PinError::InvalidOptions(OptionsError::InvalidSides(_))));
    assert_eq!(*log.borrow(), vec!["warning:huge"]);
    assert!(!pins.has("huge"));
    assert!(pins.visuals().is_empty());
}

#[test]
fn generated_ids_are_distinct() {
    let mut pins = collection();
    let mut seen = HashSet::new();
    for i in 0..10_000 {
        let id = pins.add_pin(at(f64::from(i)), PinOptions::new()).unwrap();
        assert!(seen.insert(id));
    }
    assert_eq!(pins.len(), 10_000);
}

#[test]
fn add_pin_attaches_node_and_visual() {
    let mut pins = collection();
    pins.add_pin(at(5.0), PinOptions::new().id("t").texture_url("pin.png").visible(false))
        .unwrap();

    let node = pins.scene().node("t").unwrap();
    assert_eq!(node.position, at(5.0));
    assert!(!node.visible);
    assert!(!pins.pin("t").unwrap().is_visible());
    assert_eq!(pins.visuals().stencil(node.visual), Some(&Stencil::Image("pin.png".into())));
}

// =============================================================
// Callbacks
// =============================================================

#[test]
fn option_callbacks_receive_their_events() {
    let mut pins = collection();
    let log = new_log();
    pins.add_pin(
        at(0.0),
        PinOptions::new()
            .id("p")
            .on_mouse_move(record(&log))
            .on_leave(record(&log))
            .on_double_click(record(&log)),
    )
    .unwrap();

    pins.pointer_move(&pointer(0.0, 0));
    pins.double_click(&pointer(0.0, 10));
    pins.pointer_move(&pointer(5_000.0, 200));
    assert_eq!(*log.borrow(), vec!["move:p", "dblclick:p", "leave:p"]);
}

#[test]
fn add_callback_rejects_unknown_ids_and_collection_kinds() {
    let (mut pins, _) = collection_ab();
    assert!(!pins.add_callback("ghost", EventKind::Move, |_| {}));
    assert!(!pins.add_callback("a", EventKind::Created, |_| {}));
    assert!(!pins.add_callback("a", EventKind::Warning, |_| {}));
}

#[test]
fn callbacks_run_in_registration_order() {
    let mut pins = collection();
    pins.add_pin(at(0.0), PinOptions::new().id("p")).unwrap();
    let log = new_log();
    for tag in ["first", "second", "third"] {
        let log = Rc::clone(&log);
        pins.add_callback("p", EventKind::Move, move |_| log.borrow_mut().push(tag.to_string()));
    }
    pins.pointer_move(&pointer(0.0, 0));
    assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn events_do_not_leak_between_pins() {
    let mut pins = collection();
    let a_log = new_log();
    let b_log = new_log();
    pins.add_pin(at(0.0), PinOptions::new().id("a").on_mouse_move(record(&a_log)))
        .unwrap();
    pins.add_pin(at(1000.0), PinOptions::new().id("b").on_mouse_move(record(&b_log)))
        .unwrap();

    pins.pointer_move(&pointer(1000.0, 0));
    assert!(a_log.borrow().is_empty());
    assert_eq!(*b_log.borrow(), vec!["move:b"]);
}

// =============================================================
// Pointer routing through the collection
// =============================================================

#[test]
fn leave_is_delivered_before_move() {
    let (mut pins, log) = collection_ab();
    pins.pointer_move(&pointer(0.0, 0));
    pins.pointer_move(&pointer(1000.0, 200));
    assert_eq!(*log.borrow(), vec!["move:a", "leave:a", "move:b"]);
    assert_eq!(pins.hovered(), Some("b"));
}

#[test]
fn throttled_samples_deliver_nothing() {
    let (mut pins, log) = collection_ab();
    for t in [0, 40, 90, 150] {
        pins.pointer_move(&pointer(0.0, t));
    }
    assert_eq!(*log.borrow(), vec!["move:a", "move:a"]);
}

#[test]
fn hidden_pin_is_not_hit_until_shown() {
    let (mut pins, log) = collection_ab();
    pins.hide("a");
    pins.pointer_move(&pointer(0.0, 0));
    pins.double_click(&pointer(0.0, 1));
    assert!(log.borrow().is_empty());

    pins.show("a");
    pins.pointer_move(&pointer(0.0, 200));
    assert_eq!(*log.borrow(), vec!["move:a"]);
}

#[test]
fn show_hide_unknown_ids_are_silent() {
    let (mut pins, log) = collection_ab();
    pins.show("ghost");
    pins.hide("ghost");
    pins.detach("ghost");
    assert!(log.borrow().is_empty());
    assert_eq!(pins.len(), 2);
}

#[test]
fn pick_radius_ignores_pin_size() {
    let mut pins = collection();
    let log = new_log();
    pins.add_pin(at(0.0), PinOptions::new().id("tiny").size(10.0).on_mouse_move(record(&log)))
        .unwrap();
    pins.add_pin(at(1000.0), PinOptions::new().id("huge").size(5000.0).on_mouse_move(record(&log)))
        .unwrap();

    pins.pointer_move(&pointer(1150.0, 0));
    pins.pointer_move(&pointer(150.0, 200));
    assert!(log.borrow().is_empty());

    pins.pointer_move(&pointer(90.0, 400));
    pins.pointer_move(&pointer(1090.0, 600));
    assert_eq!(*log.borrow(), vec!["move:tiny", "move:huge"]);
}

#[test]
fn double_click_on_idle_pin_emits() {
    let (mut pins, log) = collection_ab();
    pins.double_click(&pointer(1000.0, 0));
    assert_eq!(*log.borrow(), vec!["dblclick:b"]);
    assert_eq!(pins.hovered(), None);
}

#[test]
fn double_click_on_empty_space_emits_nothing() {
    let (mut pins, log) = collection_ab();
    pins.double_click(&pointer(500.0, 0));
    assert!(log.borrow().is_empty());
}

// =============================================================
// Scene synchronisation
// =============================================================

#[test]
fn hover_highlight_reaches_scene_and_restores_exactly() {
    let mut pins = collection();
    pins.add_pin(at(0.0), PinOptions::new().id("p").color("#336699"))
        .unwrap();
    let base = pins.scene().node("p").unwrap().color;

    pins.pointer_move(&pointer(0.0, 0));
    let hovered = pins.scene().node("p").unwrap().color;
    assert_eq!(hovered, base.brighten(0.3));

    pins.pointer_move(&pointer(5_000.0, 200));
    assert_eq!(pins.scene().node("p").unwrap().color, base);
    assert_eq!(pins.scene().node("p").unwrap().color.to_hex(), "#336699");
}

#[test]
fn only_one_scene_node_is_highlighted() {
    let mut pins = collection();
    pins.add_pin(at(0.0), PinOptions::new().id("a").color("#000000"))
        .unwrap();
    pins.add_pin(at(1000.0), PinOptions::new().id("b").color("#000000"))
        .unwrap();

    pins.pointer_move(&pointer(0.0, 0));
    pins.pointer_move(&pointer(1000.0, 200));
    let black = Rgb::from_u8(0, 0, 0);
    assert_eq!(pins.scene().node("a").unwrap().color, black);
    assert_ne!(pins.scene().node("b").unwrap().color, black);
    assert_eq!(pins.store().hovered_ids(), vec!["b"]);
}

#[test]
fn hidden_hovered_pin_keeps_highlight_until_next_sample() {
    let mut pins = collection();
    let log = new_log();
    pins.add_pin(at(0.0), PinOptions::new().id("a").color("#336699").on_mouse_move(record(&log)).on_leave(record(&log)))
        .unwrap();
    let base = pins.scene().node("a").unwrap().color;
    pins.pointer_move(&pointer(0.0, 0));

    pins.hide("a");
    pins.show("a");
    assert_eq!(pins.scene().node("a").unwrap().color, base.brighten(0.3));
    assert_eq!(pins.hovered(), Some("a"));

    pins.hide("a");
    pins.pointer_move(&pointer(0.0, 200));
    assert_eq!(*log.borrow(), vec!["move:a", "leave:a"]);
    assert_eq!(pins.scene().node("a").unwrap().color, base);
}

#[test]
fn hide_and_show_update_scene_node() {
    let (mut pins, _) = collection_ab();
    pins.hide("a");
    assert!(!pins.scene().node("a").unwrap().visible);
    pins.show("a");
    assert!(pins.scene().node("a").unwrap().visible);
}

// =============================================================
// detach
// =============================================================

#[test]
fn detach_unlinks_scene_and_drops_callbacks() {
    let (mut pins, log) = collection_ab();
    pins.detach("a");
    assert!(pins.scene().node("a").is_none());
    assert_eq!(pins.scene().len(), 1);

    pins.add_pin(at(0.0), PinOptions::new().id("a")).unwrap();
    pins.pointer_move(&pointer(0.0, 0));
    assert!(log.borrow().is_empty(), "old callbacks must not see the new pin");
}

#[test]
fn detaching_hovered_pin_resets_hover_without_leave() {
    let (mut pins, log) = collection_ab();
    pins.pointer_move(&pointer(0.0, 0));
    pins.detach("a");
    assert_eq!(pins.hovered(), None);

    pins.pointer_move(&pointer(1000.0, 200));
    assert_eq!(*log.borrow(), vec!["move:a", "move:b"]);
}

#[test]
fn with_config_applies_throttle() {
    let cfg = PinsConfig { move_throttle_ms: 0, pick_threshold: 100.0 };
    let picker = PlanarHitTester::new(Camera::default(), cfg.pick_threshold);
    let mut pins = PinCollection::with_config(&cfg, picker, PinContainer::new(), StencilFactory::new());
    let log = new_log();
    pins.add_pin(at(0.0), PinOptions::new().id("p").on_mouse_move(record(&log)))
        .unwrap();
    for t in [0, 1, 2] {
        pins.pointer_move(&pointer(0.0, t));
    }
    assert_eq!(log.borrow().len(), 3);
    assert!((pins.hit_tester().threshold - 100.0).abs() < f64::EPSILON);
}
