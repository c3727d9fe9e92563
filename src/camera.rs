#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE, WHEEL_ZOOM_SENSITIVITY, ZOOM_STEP};

/// A point in either screen or board space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Size of the visible viewport in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Screen-space center of a viewport of this size.
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Pan/zoom state mapping board space onto the screen.
///
/// `offset` is the board-to-screen translation in screen pixels.
/// `scale` is always within [`MIN_SCALE`, `MAX_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: Point,
    scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset: Point::default(), scale: 1.0 }
    }
}

/// Clamp a requested scale into the allowed range. NaN maps to 1.0.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return 1.0;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

impl Viewport {
    /// Build a viewport, clamping `scale` into range.
    #[must_use]
    pub fn new(offset: Point, scale: f64) -> Self {
        Self { offset, scale: clamp_scale(scale) }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Convert a screen-space point to board coordinates.
    #[must_use]
    pub fn screen_to_board(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset.x) / self.scale,
            y: (screen.y - self.offset.y) / self.scale,
        }
    }

    /// Convert a board-space point to screen coordinates.
    #[must_use]
    pub fn board_to_screen(&self, board: Point) -> Point {
        Point {
            x: board.x * self.scale + self.offset.x,
            y: board.y * self.scale + self.offset.y,
        }
    }

    /// Board-space point shown at the visual center of a viewport of `size`.
    #[must_use]
    pub fn center_in_board_space(&self, size: Size) -> Point {
        self.screen_to_board(size.center())
    }

    /// Step the scale up by [`ZOOM_STEP`], keeping `anchor` (screen space) fixed.
    pub fn zoom_in(&mut self, anchor: Point) {
        self.zoom_to(self.scale + ZOOM_STEP, anchor);
    }

    /// Step the scale down by [`ZOOM_STEP`], keeping `anchor` (screen space) fixed.
    pub fn zoom_out(&mut self, anchor: Point) {
        self.zoom_to(self.scale - ZOOM_STEP, anchor);
    }

    /// Apply a wheel delta. Positive `dy` (scroll down) zooms out; a
    /// non-finite delta is ignored.
    pub fn zoom_by_wheel(&mut self, dy: f64, anchor: Point) {
        if !dy.is_finite() {
            return;
        }
        self.zoom_to(self.scale - dy * WHEEL_ZOOM_SENSITIVITY, anchor);
    }

    /// Set a new (clamped) scale while the board point under `anchor` stays put.
    pub fn zoom_to(&mut self, scale: f64, anchor: Point) {
        let before = self.screen_to_board(anchor);
        self.scale = clamp_scale(scale);
        self.offset = Point::new(anchor.x - before.x * self.scale, anchor.y - before.y * self.scale);
    }
}
