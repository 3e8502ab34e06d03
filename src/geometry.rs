//! Plain 2D value types shared by the layout-aware components.

/// A point in CSS pixels, origin at the top-left of the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width / height pair in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Free room left for an element of `footprint` size, never negative.
    pub fn room_for(&self, footprint: Size) -> Size {
        Size {
            width: (self.width - footprint.width).max(0.0),
            height: (self.height - footprint.height).max(0.0),
        }
    }
}
