use macroquad::prelude::*;

/// Axis-aligned rectangle in tile-grid coordinates.
///
/// `pos` is the top-left cell; `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRect {
    /// Top-left cell.
    pub pos: IVec2,
    /// Extent in cells.
    pub size: IVec2,
}

impl GridRect {
    /// Rectangle from top-left cell and size.
    pub fn new(pos: IVec2, size: IVec2) -> Self {
        GridRect { pos, size }
    }

    /// Leftmost column.
    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    /// Topmost row.
    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    /// One past the rightmost column.
    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    /// One past the bottommost row.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    /// True when the two rectangles share at least one cell.
    pub fn intersects(&self, other: &GridRect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersects_is_exclusive_at_edges() {
        let a = GridRect::new(ivec2(0, 0), ivec2(3, 3));
        let touching = GridRect::new(ivec2(3, 0), ivec2(2, 2));
        let overlapping = GridRect::new(ivec2(2, 2), ivec2(2, 2));
        assert!(!a.intersects(&touching));
        assert!(!touching.intersects(&a));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }
}
