use macroquad::prelude::*;

/// Visible map area, in tile units, plus the tile size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width of the visible map section, in tiles.
    pub width_tiles: i32,
    /// Height of the visible map section, in tiles.
    pub height_tiles: i32,
    /// Edge length of one tile, in pixels.
    pub tile_size: i32,
}

impl Viewport {
    /// Viewport extent in tiles.
    #[inline]
    pub fn size_tiles(&self) -> IVec2 {
        ivec2(self.width_tiles, self.height_tiles)
    }

    /// Viewport extent in pixels.
    #[inline]
    pub fn size_px(&self) -> IVec2 {
        ivec2(
            self.width_tiles * self.tile_size,
            self.height_tiles * self.tile_size,
        )
    }
}

impl Default for Viewport {
    /// The classic 32x20 map view with 8x8 tiles (256x160 px).
    fn default() -> Self {
        Viewport {
            width_tiles: 32,
            height_tiles: 20,
            tile_size: 8,
        }
    }
}
