use crate::controls::Color;

/// Thickness of a frame around a rectangle (margins, padding).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Thickness {
        Thickness {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same thickness on all sides.
    pub const fn uniform(value: f64) -> Thickness {
        Thickness::new(value, value, value, value)
    }

    pub fn set_left(&mut self, left: f64) {
        self.left = left;
    }

    pub fn set_top(&mut self, top: f64) {
        self.top = top;
    }

    pub fn set_right(&mut self, right: f64) {
        self.right = right;
    }

    pub fn set_bottom(&mut self, bottom: f64) {
        self.bottom = bottom;
    }
}

/// Paints an area with a solid color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolidColorBrush {
    color: Color,
    opacity: f64,
}

impl Default for SolidColorBrush {
    fn default() -> Self {
        SolidColorBrush {
            color: Color::TRANSPARENT,
            opacity: 1.0,
        }
    }
}

impl SolidColorBrush {
    pub fn new(color: Color) -> SolidColorBrush {
        SolidColorBrush { color, opacity: 1.0 }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }
}
