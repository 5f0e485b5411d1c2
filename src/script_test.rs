#![allow(clippy::float_cmp)]

use viewport::clock::Clock;
use viewport::config::ViewportConfig;
use viewport::render::MarkupTree;
use viewport::transform::{Transform, Viewport};

use super::*;

fn step(s: &str) -> Step {
    match s.parse::<Step>() {
        Ok(step) => step,
        Err(err) => panic!("`{s}` should parse: {err}"),
    }
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn controller() -> (ViewportController<MarkupTree, ManualClock>, ManualClock) {
    let tree = MarkupTree::with_mount("svg", [("viewBox", "0 0 100 50")], "<rect/>", Viewport::new(800.0, 600.0));
    let clock = ManualClock::new();
    (ViewportController::new(tree, clock.clone(), ViewportConfig::default()), clock)
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_bare_commands() {
    assert_eq!(step("zoom-in"), Step::ZoomIn);
    assert_eq!(step(" zoom-out "), Step::ZoomOut);
    assert_eq!(step("reset"), Step::Reset);
}

#[test]
fn parse_commands_with_numbers() {
    assert_eq!(step("drag:0,0,10,-5"), Step::Drag { from: Point::new(0.0, 0.0), to: Point::new(10.0, -5.0) });
    assert_eq!(step("wheel:100, 200, -120"), Step::Wheel { at: Point::new(100.0, 200.0), dy: -120.0 });
    assert_eq!(step("dblclick:3,4"), Step::DoubleClick { at: Point::new(3.0, 4.0) });
    assert_eq!(step("resize:1920,1080"), Step::Resize { width: 1920.0, height: 1080.0 });
    assert_eq!(step("wait:150"), Step::Wait { ms: 150.0 });
}

#[test]
fn parse_rejects_wrong_arity() {
    assert_eq!(
        "drag:1,2,3".parse::<Step>(),
        Err(ScriptError::BadArgs { step: "drag", expected: 4, args: "1,2,3".into() })
    );
    assert!(matches!("wait".parse::<Step>(), Err(ScriptError::BadArgs { step: "wait", .. })));
    assert!(matches!("resize:a,b".parse::<Step>(), Err(ScriptError::BadArgs { step: "resize", .. })));
}

#[test]
fn parse_rejects_non_finite_numbers() {
    assert!(matches!("wait:inf".parse::<Step>(), Err(ScriptError::BadArgs { step: "wait", .. })));
    assert!(matches!("drag:nan,0,0,0".parse::<Step>(), Err(ScriptError::BadArgs { step: "drag", .. })));
    assert!(matches!("wheel:0,0,-infinity".parse::<Step>(), Err(ScriptError::BadArgs { step: "wheel", .. })));
    let steps = vec!["zoom-in".to_owned(), "wait:inf".to_owned()];
    assert!(parse(&steps).is_err());
}

#[test]
fn parse_rejects_unknown_step() {
    assert_eq!("spin".parse::<Step>(), Err(ScriptError::UnknownStep("spin".into())));
}

#[test]
fn parse_keys() {
    assert_eq!(step("key:ctrl+="), Step::Key { key: Key::new("="), modifiers: ctrl() });
    assert_eq!(step("key:ctrl++"), Step::Key { key: Key::new("+"), modifiers: ctrl() });
    assert_eq!(step("key:ctrl+-"), Step::Key { key: Key::new("-"), modifiers: ctrl() });
    assert_eq!(
        step("key:cmd+0"),
        Step::Key { key: Key::new("0"), modifiers: Modifiers { meta: true, ..Default::default() } }
    );
    assert_eq!(step("key:0"), Step::Key { key: Key::new("0"), modifiers: Modifiers::default() });
}

#[test]
fn parse_key_errors() {
    assert_eq!("key".parse::<Step>(), Err(ScriptError::MissingKey));
    assert_eq!("key:ctrl+".parse::<Step>(), Err(ScriptError::MissingKey));
    assert!(matches!("key:hyper+0".parse::<Step>(), Err(ScriptError::UnknownStep(_))));
}

#[test]
fn parse_all_stops_at_first_error() {
    let steps = vec!["zoom-in".to_owned(), "bogus".to_owned(), "reset".to_owned()];
    assert_eq!(parse(&steps), Err(ScriptError::UnknownStep("bogus".into())));
}

// =============================================================
// Running
// =============================================================

#[test]
fn run_settles_animations() {
    let (mut c, clock) = controller();
    run(&mut c, &clock, &[Step::ZoomIn, Step::ZoomIn]);
    assert!(!c.is_animating());
    // Second zoom-in supersedes the first at its start, so only one step lands.
    assert_eq!(c.transform().scale, 1.5);
}

#[test]
fn run_with_waits_applies_each_zoom() {
    let (mut c, clock) = controller();
    run(&mut c, &clock, &[Step::ZoomIn, Step::Wait { ms: 400.0 }, Step::ZoomIn, Step::Wait { ms: 400.0 }]);
    assert!((c.transform().scale - 2.25).abs() < 1e-9);
}

#[test]
fn run_drag_then_reset() {
    let (mut c, clock) = controller();
    run(&mut c, &clock, &[Step::Drag { from: Point::new(0.0, 0.0), to: Point::new(25.0, -10.0) }]);
    assert_eq!(c.transform(), Transform::new(25.0, -10.0, 1.0));
    run(&mut c, &clock, &[Step::Reset]);
    assert_eq!(c.transform(), Transform::IDENTITY);
}

#[test]
fn run_resize_keeps_transform() {
    let (mut c, clock) = controller();
    run(&mut c, &clock, &[Step::Wheel { at: Point::new(10.0, 10.0), dy: -100.0 }, Step::Resize { width: 300.0, height: 200.0 }]);
    assert_eq!(c.viewport(), Viewport::new(300.0, 200.0));
    assert!(c.transform().scale > 1.0);
}

#[test]
fn run_key_step() {
    let (mut c, clock) = controller();
    run(&mut c, &clock, &[Step::Key { key: Key::new("="), modifiers: ctrl() }]);
    assert_eq!(c.transform().scale, 1.5);
}

#[test]
fn wait_advances_clock_in_frames() {
    let (mut c, clock) = controller();
    run(&mut c, &clock, &[Step::Wait { ms: 40.0 }]);
    assert_eq!(clock.now_ms(), 40.0);
}
