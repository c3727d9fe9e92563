#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn vp(ox: f64, oy: f64, scale: f64) -> Viewport {
    Viewport::new(Point::new(ox, oy), scale)
}

// --- Point ---

#[test]
fn point_add_and_sub() {
    let a = Point::new(3.0, 4.0);
    let b = Point::new(1.0, -2.0);
    assert_eq!(a + b, Point::new(4.0, 2.0));
    assert_eq!(a - b, Point::new(2.0, 6.0));
}

#[test]
fn size_center_is_half_extent() {
    assert_eq!(Size::new(800.0, 600.0).center(), Point::new(400.0, 300.0));
}

// --- Viewport defaults ---

#[test]
fn viewport_default_is_identity() {
    let v = Viewport::default();
    assert_eq!(v.offset, Point::new(0.0, 0.0));
    assert_eq!(v.scale(), 1.0);
}

#[test]
fn viewport_new_clamps_scale() {
    assert_eq!(vp(0.0, 0.0, 10.0).scale(), MAX_SCALE);
    assert_eq!(vp(0.0, 0.0, 0.01).scale(), MIN_SCALE);
    assert_eq!(vp(0.0, 0.0, -4.0).scale(), MIN_SCALE);
}

#[test]
fn clamp_scale_nan_falls_back_to_one() {
    assert_eq!(clamp_scale(f64::NAN), 1.0);
}

// --- screen_to_board ---

#[test]
fn screen_to_board_identity() {
    let v = Viewport::default();
    assert!(point_approx_eq(v.screen_to_board(Point::new(50.0, 75.0)), Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_board_with_scale() {
    let v = vp(0.0, 0.0, 2.0);
    let board = v.screen_to_board(Point::new(40.0, 80.0));
    assert!(point_approx_eq(board, Point::new(20.0, 40.0)));
}

#[test]
fn screen_to_board_with_offset_and_scale() {
    let v = vp(50.0, 30.0, 2.0);
    let board = v.screen_to_board(Point::new(0.0, 0.0));
    assert!(point_approx_eq(board, Point::new(-25.0, -15.0)));
}

// --- board_to_screen ---

#[test]
fn board_to_screen_with_offset_and_scale() {
    let v = vp(20.0, 10.0, 0.5);
    let screen = v.board_to_screen(Point::new(100.0, 40.0));
    assert!(point_approx_eq(screen, Point::new(70.0, 30.0)));
}

#[test]
fn round_trip_holds_across_viewports() {
    let viewports = [vp(0.0, 0.0, 1.0), vp(-120.5, 33.0, 0.3), vp(400.0, -90.0, 3.0), vp(7.25, 7.25, 1.7)];
    let points = [Point::new(0.0, 0.0), Point::new(-300.0, 12.5), Point::new(1e4, -1e4), Point::new(0.1, 0.2)];
    for v in viewports {
        for p in points {
            let back = v.screen_to_board(v.board_to_screen(p));
            assert!((back.x - p.x).abs() < 1e-6 && (back.y - p.y).abs() < 1e-6, "{p:?} via {v:?} -> {back:?}");
        }
    }
}

// --- center_in_board_space ---

#[test]
fn center_in_board_space_default_viewport() {
    let v = Viewport::default();
    let c = v.center_in_board_space(Size::new(1000.0, 800.0));
    assert!(point_approx_eq(c, Point::new(500.0, 400.0)));
}

#[test]
fn center_in_board_space_accounts_for_pan_and_zoom() {
    let v = vp(100.0, 200.0, 2.0);
    let c = v.center_in_board_space(Size::new(1000.0, 800.0));
    assert!(point_approx_eq(c, Point::new(200.0, 100.0)));
}

// --- zoom ---

#[test]
fn zoom_in_steps_scale() {
    let mut v = Viewport::default();
    v.zoom_in(Point::new(0.0, 0.0));
    assert!(approx_eq(v.scale(), 1.1));
}

#[test]
fn zoom_out_steps_scale() {
    let mut v = Viewport::default();
    v.zoom_out(Point::new(0.0, 0.0));
    assert!(approx_eq(v.scale(), 0.9));
}

#[test]
fn repeated_zoom_in_stops_at_max() {
    let mut v = Viewport::default();
    for _ in 0..100 {
        v.zoom_in(Point::new(10.0, 10.0));
    }
    assert_eq!(v.scale(), MAX_SCALE);
}

#[test]
fn repeated_zoom_out_stops_at_min() {
    let mut v = Viewport::default();
    for _ in 0..100 {
        v.zoom_out(Point::new(10.0, 10.0));
    }
    assert_eq!(v.scale(), MIN_SCALE);
}

#[test]
fn wheel_zoom_never_leaves_range() {
    let deltas = [1e9, -1e9, f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 0.0, -250.0, 250.0];
    for dy in deltas {
        let mut v = vp(5.0, 5.0, 1.5);
        v.zoom_by_wheel(dy, Point::new(100.0, 100.0));
        assert!((MIN_SCALE..=MAX_SCALE).contains(&v.scale()), "dy={dy} scale={}", v.scale());
    }
}

#[test]
fn non_finite_wheel_delta_leaves_viewport_alone() {
    for dy in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let mut v = vp(5.0, 5.0, 1.2);
        v.zoom_by_wheel(dy, Point::new(100.0, 100.0));
        assert_eq!(v, vp(5.0, 5.0, 1.2), "dy={dy}");
    }
}

#[test]
fn wheel_scroll_down_zooms_out() {
    let mut v = Viewport::default();
    v.zoom_by_wheel(100.0, Point::new(0.0, 0.0));
    assert!(approx_eq(v.scale(), 0.9));
}

#[test]
fn zoom_keeps_anchor_point_fixed() {
    let mut v = vp(30.0, -20.0, 1.2);
    let anchor = Point::new(320.0, 240.0);
    let before = v.screen_to_board(anchor);
    v.zoom_to(2.4, anchor);
    let after = v.screen_to_board(anchor);
    assert!(point_approx_eq(before, after));
}
