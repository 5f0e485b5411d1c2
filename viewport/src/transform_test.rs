#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn bounds() -> ScaleBounds {
    ScaleBounds::default()
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_equality() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
}

// --- ScaleBounds ---

#[test]
fn bounds_default_is_tenth_to_twenty() {
    let b = bounds();
    assert_eq!(b.min, 0.1);
    assert_eq!(b.max, 20.0);
}

#[test]
fn bounds_clamp_low_and_high() {
    let b = bounds();
    assert_eq!(b.clamp(0.01), 0.1);
    assert_eq!(b.clamp(50.0), 20.0);
    assert_eq!(b.clamp(3.0), 3.0);
}

#[test]
fn bounds_contains_edges() {
    let b = bounds();
    assert!(b.contains(0.1));
    assert!(b.contains(20.0));
    assert!(!b.contains(20.000_001));
}

// --- Transform defaults ---

#[test]
fn transform_default_is_identity() {
    let t = Transform::default();
    assert_eq!(t, Transform::IDENTITY);
    assert_eq!(t.translate_x, 0.0);
    assert_eq!(t.translate_y, 0.0);
    assert_eq!(t.scale, 1.0);
}

#[test]
fn reset_is_identity_from_anywhere() {
    let t = Transform::new(-340.5, 17.25, 12.0);
    assert_eq!(t.reset(), Transform::IDENTITY);
}

// --- translated ---

#[test]
fn translated_adds_screen_delta_unscaled() {
    let t = Transform::new(10.0, 20.0, 4.0).translated(5.0, -8.0);
    assert_eq!(t.translate_x, 15.0);
    assert_eq!(t.translate_y, 12.0);
    assert_eq!(t.scale, 4.0);
}

// --- scale_at ---

#[test]
fn scale_at_origin_pivot_only_scales() {
    let t = Transform::IDENTITY.scale_at(Point::new(0.0, 0.0), 2.0, &bounds());
    assert_eq!(t, Transform::new(0.0, 0.0, 2.0));
}

#[test]
fn scale_at_preserves_pivot_logical_point() {
    let before = Transform::new(37.0, -12.0, 1.3);
    let pivot = Point::new(400.0, 250.0);
    let logical_before = before.screen_to_logical(pivot);
    let after = before.scale_at(pivot, 1.7, &bounds());
    let logical_after = after.screen_to_logical(pivot);
    assert!(point_approx_eq(logical_before, logical_after));
    assert!(approx_eq(after.scale, 1.3 * 1.7));
}

#[test]
fn scale_at_formula_matches_explicit_translate() {
    let t = Transform::new(10.0, 20.0, 1.0).scale_at(Point::new(100.0, 50.0), 2.0, &bounds());
    // 100 - (100 - 10) * 2 = -80, 50 - (50 - 20) * 2 = -10
    assert!(approx_eq(t.translate_x, -80.0));
    assert!(approx_eq(t.translate_y, -10.0));
}

#[test]
fn scale_at_clamps_to_max() {
    let t = Transform::new(0.0, 0.0, 15.0).scale_at(Point::new(10.0, 10.0), 2.0, &bounds());
    assert_eq!(t.scale, 20.0);
    // ratio is 20/15, not 2
    assert!(approx_eq(t.translate_x, 10.0 - 10.0 * (20.0 / 15.0)));
}

#[test]
fn scale_at_clamps_to_min() {
    let t = Transform::new(0.0, 0.0, 0.15).scale_at(Point::new(0.0, 0.0), 0.1, &bounds());
    assert_eq!(t.scale, 0.1);
}

#[test]
fn scale_at_bound_is_noop_on_whole_transform() {
    let at_max = Transform::new(-55.0, 31.0, 20.0);
    let again = at_max.scale_at(Point::new(300.0, 200.0), 1.5, &bounds());
    assert_eq!(again, at_max);

    let at_min = Transform::new(12.0, 8.0, 0.1);
    let again = at_min.scale_at(Point::new(300.0, 200.0), 1.0 / 1.5, &bounds());
    assert_eq!(again, at_min);
}

#[test]
fn scale_at_ignores_bad_factors() {
    let t = Transform::new(1.0, 2.0, 3.0);
    assert_eq!(t.scale_at(Point::new(0.0, 0.0), -2.0, &bounds()), t);
    assert_eq!(t.scale_at(Point::new(0.0, 0.0), f64::NAN, &bounds()), t);
}

#[test]
fn scale_at_infinite_factor_lands_on_max() {
    let t = Transform::new(10.0, 20.0, 2.0);
    let pivot = Point::new(100.0, 50.0);
    let zoomed = t.scale_at(pivot, f64::INFINITY, &bounds());
    assert_eq!(zoomed.scale, 20.0);
    // ratio 10: pivot - (pivot - translate) * 10
    assert!((zoomed.translate_x - (100.0 - 90.0 * 10.0)).abs() < 1e-9);
    assert!((zoomed.translate_y - (50.0 - 30.0 * 10.0)).abs() < 1e-9);
}

#[test]
fn scale_at_zero_factor_lands_on_min() {
    let t = Transform::new(10.0, 20.0, 2.0);
    let pivot = Point::new(100.0, 50.0);
    let zoomed = t.scale_at(pivot, 0.0, &bounds());
    assert_eq!(zoomed.scale, 0.1);
    assert!((zoomed.translate_x - (100.0 - 90.0 * 0.05)).abs() < 1e-9);
    assert!((zoomed.translate_y - (50.0 - 30.0 * 0.05)).abs() < 1e-9);
}

#[test]
fn scale_at_inverse_factor_round_trips() {
    let start = Transform::new(5.0, 9.0, 1.2);
    let pivot = Point::new(320.0, 240.0);
    let back = start.scale_at(pivot, 1.5, &bounds()).scale_at(pivot, 1.0 / 1.5, &bounds());
    assert!(approx_eq(back.scale, start.scale));
    assert!(approx_eq(back.translate_x, start.translate_x));
    assert!(approx_eq(back.translate_y, start.translate_y));
}

// --- conversions ---

#[test]
fn screen_to_logical_with_pan_and_zoom() {
    let t = Transform::new(20.0, 10.0, 2.0);
    assert!(point_approx_eq(t.screen_to_logical(Point::new(20.0, 10.0)), Point::new(0.0, 0.0)));
    assert!(point_approx_eq(t.screen_to_logical(Point::new(0.0, 0.0)), Point::new(-10.0, -5.0)));
}

#[test]
fn logical_to_screen_with_pan_and_zoom() {
    let t = Transform::new(20.0, 10.0, 3.0);
    // 5*3 + 20 = 35, 5*3 + 10 = 25
    assert!(point_approx_eq(t.logical_to_screen(Point::new(5.0, 5.0)), Point::new(35.0, 25.0)));
}

// --- lerp ---

#[test]
fn lerp_endpoints_and_midpoint() {
    let a = Transform::new(0.0, 0.0, 1.0);
    let b = Transform::new(100.0, -50.0, 3.0);
    assert_eq!(a.lerp(&b, 0.0), a);
    let mid = a.lerp(&b, 0.5);
    assert!(approx_eq(mid.translate_x, 50.0));
    assert!(approx_eq(mid.translate_y, -25.0));
    assert!(approx_eq(mid.scale, 2.0));
}

// --- Display ---

#[test]
fn display_is_svg_transform() {
    let t = Transform::new(12.5, -3.0, 2.0);
    assert_eq!(t.to_string(), "translate(12.5,-3) scale(2)");
}

#[test]
fn display_identity() {
    assert_eq!(Transform::IDENTITY.to_string(), "translate(0,0) scale(1)");
}
