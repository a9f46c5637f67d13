use crate::map::Map;

/// Boolean grid marking which map cells contain a ladder tile.
///
/// Computed once at construction by OR-ing the ladder attribute across both
/// tile layers per cell; the map is assumed static so the grid never needs
/// rebuilding. Out-of-bounds queries answer "no ladder".
#[derive(Debug, Clone)]
pub struct LadderGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl LadderGrid {
    /// Precompute the ladder grid for a map.
    pub fn from_map(map: &Map) -> Self {
        let (width, height) = (map.width(), map.height());
        let mut cells = Vec::with_capacity((width * height) as usize);
        for row in 0..height {
            for col in 0..width {
                let attrs = map.attributes();
                let ladder = attrs.attributes(map.tile_at(0, col, row)).is_ladder()
                    || attrs.attributes(map.tile_at(1, col, row)).is_ladder();
                cells.push(ladder);
            }
        }
        LadderGrid {
            width,
            height,
            cells,
        }
    }

    /// Whether the cell holds a ladder; out-of-bounds cells never do.
    #[inline]
    pub fn is_ladder(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col >= self.width || row >= self.height {
            return false;
        }
        self.cells[(row * self.width + col) as usize]
    }

    /// Scan a row for the leftmost ladder cell within `[col_start, col_end)`.
    pub fn find_in_row(&self, row: i32, col_start: i32, col_end: i32) -> Option<i32> {
        (col_start..col_end).find(|&col| self.is_ladder(col, row))
    }
}
