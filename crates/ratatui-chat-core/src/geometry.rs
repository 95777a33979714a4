//! Cell-based geometry used by the list layout.
//!
//! Horizontal quantities are `u16` (a layout width is a terminal width). Vertical quantities
//! are `u32` because a chat history can grow taller than `u16::MAX` rows.

/// Size an item reports for its rendered content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemSize {
    pub width: u16,
    pub height: u32,
}

impl ItemSize {
    pub const fn new(width: u16, height: u32) -> Self {
        Self { width, height }
    }
}

/// A rectangle in content space (row 0 is the top of the history, not of the screen).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutRect {
    pub x: u16,
    pub y: u32,
    pub width: u16,
    pub height: u32,
}

impl LayoutRect {
    pub const fn new(x: u16, y: u32, width: u16, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> u32 {
        self.x as u32 + self.width as u32
    }

    pub fn max_y(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Half-open intersection test. Empty rectangles intersect nothing.
    pub fn intersects(&self, other: &LayoutRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        (self.x as u32) < other.max_x()
            && (other.x as u32) < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }
}

/// Total scrollable extent of the stacked list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContentSize {
    pub width: u16,
    pub height: u32,
}

impl ContentSize {
    pub const ZERO: ContentSize = ContentSize {
        width: 0,
        height: 0,
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HorizontalMargins {
    pub left: u16,
    pub right: u16,
}

impl HorizontalMargins {
    pub const ZERO: HorizontalMargins = HorizontalMargins { left: 0, right: 0 };

    pub const fn new(left: u16, right: u16) -> Self {
        Self { left, right }
    }

    pub const fn symmetric(h: u16) -> Self {
        Self { left: h, right: h }
    }

    pub fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }
}

/// Space above the first item and below the last one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerticalMargins {
    pub top: u32,
    pub bottom: u32,
}

impl Default for VerticalMargins {
    fn default() -> Self {
        Self { top: 1, bottom: 1 }
    }
}

impl VerticalMargins {
    pub const ZERO: VerticalMargins = VerticalMargins { top: 0, bottom: 0 };

    pub const fn new(top: u32, bottom: u32) -> Self {
        Self { top, bottom }
    }
}

/// Padding inside a bubble, on all four sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        left: 0,
        right: 0,
        top: 0,
        bottom: 0,
    };

    pub const fn new(left: u16, right: u16, top: u16, bottom: u16) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub const fn uniform(v: u16) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

impl std::ops::Add for Insets {
    type Output = Insets;

    fn add(self, rhs: Insets) -> Insets {
        Insets {
            left: self.left.saturating_add(rhs.left),
            right: self.right.saturating_add(rhs.right),
            top: self.top.saturating_add(rhs.top),
            bottom: self.bottom.saturating_add(rhs.bottom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = LayoutRect::new(0, 0, 10, 5);
        let below = LayoutRect::new(0, 5, 10, 5);
        assert!(!a.intersects(&below));
        assert!(a.intersects(&LayoutRect::new(9, 4, 1, 1)));
    }

    #[test]
    fn empty_rect_intersects_nothing() {
        let a = LayoutRect::new(0, 0, 10, 5);
        assert!(!a.intersects(&LayoutRect::new(2, 2, 0, 3)));
        assert!(!LayoutRect::new(2, 2, 3, 0).intersects(&a));
    }
}
