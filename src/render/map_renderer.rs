use crate::attributes::TileAttributeDict;
use crate::map::{BackdropScrollMode, Map, LAYER_COUNT};
use crate::render::backend::RenderBackend;
use crate::viewport::Viewport;
use anyhow::Context;
use macroquad::prelude::*;

const ANIM_STATES: u32 = 4;
const FAST_ANIM_FRAME_DELAY: u32 = 1;
const SLOW_ANIM_FRAME_DELAY: u32 = 2;
const PARALLAX_FACTOR: i32 = 4;

/// Tileset atlas: one texture laid out as a regular grid of tiles.
///
/// Animated tiles expect their 4 animation-state graphics contiguously,
/// starting at the base index — a layout contract on the atlas, not
/// something checked at runtime.
pub struct TileSheet<T> {
    /// Atlas texture.
    pub texture: T,
    /// Tiles per atlas row.
    pub columns: i32,
    /// Tile edge length in pixels.
    pub tile_size: i32,
}

impl<T> TileSheet<T> {
    /// Source rectangle of a tile index within the atlas.
    pub fn source_rect(&self, index: u16) -> Rect {
        let col = index as i32 % self.columns;
        let row = index as i32 / self.columns;
        let ts = self.tile_size as f32;
        Rect::new(col as f32 * ts, row as f32 * ts, ts, ts)
    }
}

impl TileSheet<Texture2D> {
    /// Load a tileset atlas from an image file. Column count is derived
    /// from the image width.
    pub async fn load(path: &str, tile_size: i32) -> anyhow::Result<Self> {
        let texture = load_texture(path)
            .await
            .with_context(|| format!("Loading tileset {}", path))?;
        texture.set_filter(FilterMode::Nearest);
        let columns = (texture.width() as i32 / tile_size).max(1);
        Ok(TileSheet {
            texture,
            columns,
            tile_size,
        })
    }
}

/// Backdrop image drawn behind the transparent parts of the tile layers.
pub struct Backdrop<T> {
    /// Backdrop texture.
    pub texture: T,
    /// Image width in pixels.
    pub width_px: i32,
    /// Image height in pixels.
    pub height_px: i32,
}

impl Backdrop<Texture2D> {
    /// Load a backdrop image from a file.
    pub async fn load(path: &str) -> anyhow::Result<Self> {
        let texture = load_texture(path)
            .await
            .with_context(|| format!("Loading backdrop {}", path))?;
        texture.set_filter(FilterMode::Nearest);
        let (width_px, height_px) = (texture.width() as i32, texture.height() as i32);
        Ok(Backdrop {
            texture,
            width_px,
            height_px,
        })
    }
}

/// Draws a map: backdrop (with scroll/parallax modes), the background and
/// foreground tile layers, and single tiles rendered outside the normal
/// section sweep.
///
/// Holds a non-owning reference to the map and owns the graphics
/// resources. Two counters drive timing: `elapsed_frames` feeds tile
/// animation and is advanced by [`MapRenderer::update_animated_map_tiles`],
/// decoupled from draw calls; the auto-scroll counter advances once per
/// [`MapRenderer::render_backdrop`] call and assumes 60 calls per second —
/// a known limitation, not frame-rate independent.
pub struct MapRenderer<'m, T> {
    map: &'m Map,
    sheet: TileSheet<T>,
    backdrop: Backdrop<T>,
    secondary_backdrop: Option<Backdrop<T>>,
    scroll_mode: BackdropScrollMode,
    elapsed_frames: u32,
    backdrop_frames: u32,
}

impl<'m, T> MapRenderer<'m, T> {
    /// Bind a map and take ownership of the graphics resources. The
    /// backdrop scroll mode comes from the map.
    pub fn new(
        map: &'m Map,
        sheet: TileSheet<T>,
        backdrop: Backdrop<T>,
        secondary_backdrop: Option<Backdrop<T>>,
    ) -> Self {
        MapRenderer {
            map,
            sheet,
            backdrop,
            secondary_backdrop,
            scroll_mode: map.scroll_mode(),
            elapsed_frames: 0,
            backdrop_frames: 0,
        }
    }

    /// Swap primary and secondary backdrops in place (area-transition
    /// effect). Warns and does nothing when no secondary backdrop exists.
    pub fn switch_backdrops(&mut self) {
        match self.secondary_backdrop.as_mut() {
            Some(alt) => std::mem::swap(&mut self.backdrop, alt),
            None => warn!("switch_backdrops called on a map without a secondary backdrop"),
        }
    }

    /// Advance the tile animation counter by one tick.
    pub fn update_animated_map_tiles(&mut self) {
        self.elapsed_frames = self.elapsed_frames.wrapping_add(1);
    }

    /// Draw the background-eligible tiles of a map section. `section_start`
    /// and `section_size` are in tile units; cells outside the map are
    /// clipped, not wrapped.
    pub fn render_background<B>(&self, backend: &mut B, section_start: IVec2, section_size: IVec2)
    where
        B: RenderBackend<Texture = T>,
    {
        self.render_map_tiles(backend, section_start, section_size, false);
    }

    /// Draw the foreground tiles of a map section.
    pub fn render_foreground<B>(&self, backend: &mut B, section_start: IVec2, section_size: IVec2)
    where
        B: RenderBackend<Texture = T>,
    {
        self.render_map_tiles(backend, section_start, section_size, true);
    }

    fn render_map_tiles<B>(
        &self,
        backend: &mut B,
        section_start: IVec2,
        section_size: IVec2,
        foreground: bool,
    ) where
        B: RenderBackend<Texture = T>,
    {
        for layer in 0..LAYER_COUNT {
            for y in 0..section_size.y {
                for x in 0..section_size.x {
                    let col = x + section_start.x;
                    let row = y + section_start.y;
                    if col < 0 || row < 0 || col >= self.map.width() || row >= self.map.height() {
                        continue;
                    }

                    let index = self.map.tile_at(layer, col, row);
                    if self.map.attributes().attributes(index).is_foreground() != foreground {
                        continue;
                    }

                    self.render_tile(backend, index, x, y);
                }
            }
        }
    }

    /// Draw one tile at a screen position derived by subtracting the
    /// camera position — for tiles rendered outside the section sweep
    /// (attached/overlay tiles).
    pub fn render_single_tile<B>(&self, backend: &mut B, index: u16, position: IVec2, camera: IVec2)
    where
        B: RenderBackend<Texture = T>,
    {
        let screen = position - camera;
        self.render_tile(backend, index, screen.x, screen.y);
    }

    fn render_tile<B>(&self, backend: &mut B, index: u16, x: i32, y: i32)
    where
        B: RenderBackend<Texture = T>,
    {
        // Tile index 0 represents a transparent tile, i.e. the backdrop
        // should be visible. Don't draw it.
        if index == 0 {
            return;
        }
        let index = animated_tile_index(self.map.attributes(), index, self.elapsed_frames);
        let src = self.sheet.source_rect(index);
        let ts = self.sheet.tile_size as f32;
        let dest = Rect::new(x as f32 * ts, y as f32 * ts, ts, ts);
        backend.draw(&self.sheet.texture, src, dest, false);
    }

    /// Draw the backdrop for the given camera position (tile units) and
    /// viewport, tiled horizontally to cover the full viewport width.
    pub fn render_backdrop<B>(&mut self, backend: &mut B, camera: IVec2, viewport: Viewport)
    where
        B: RenderBackend<Texture = T>,
    {
        let vp_px = viewport.size_px();
        let offset = backdrop_offset(self.scroll_mode, camera, self.backdrop_frames, vp_px);
        self.backdrop_frames = self.backdrop_frames.wrapping_add(1);

        let repetitions = div_ceil(vp_px.x, self.backdrop.width_px);
        let covered_width = (self.backdrop.width_px * repetitions) as f32;
        let src = Rect::new(
            offset.x as f32,
            offset.y as f32,
            covered_width,
            self.backdrop.height_px as f32,
        );
        let dest = Rect::new(0.0, 0.0, covered_width, vp_px.y as f32);
        backend.draw(&self.backdrop.texture, src, dest, true);
    }
}

fn div_ceil(a: i32, b: i32) -> i32 {
    (a + b - 1) / b
}

/// Pixel offset of the backdrop image for the current scroll mode.
///
/// Parallax offsets are wrapped modulo the viewport extent per axis so the
/// offset never exceeds one viewport. Auto-scroll derives its offset from
/// the frame counter: horizontal advances one pixel every two frames,
/// vertical one per frame, mirrored (`height - offset`) to scroll in the
/// conventional direction.
fn backdrop_offset(
    mode: BackdropScrollMode,
    camera: IVec2,
    frames: u32,
    vp_px: IVec2,
) -> IVec2 {
    use BackdropScrollMode::*;

    let parallax = |axis: i32, extent: i32| (axis * PARALLAX_FACTOR).rem_euclid(extent);
    match mode {
        None => IVec2::ZERO,
        ParallaxHorizontal => ivec2(parallax(camera.x, vp_px.x), 0),
        ParallaxVertical => ivec2(0, parallax(camera.y, vp_px.y)),
        ParallaxBoth => ivec2(parallax(camera.x, vp_px.x), parallax(camera.y, vp_px.y)),
        AutoHorizontal => {
            let px = (frames as f64 / 2.0).round() as i32;
            ivec2(px.rem_euclid(vp_px.x), 0)
        }
        AutoVertical => {
            let px = frames as i32;
            ivec2(0, vp_px.y - px.rem_euclid(vp_px.y))
        }
    }
}

/// Animated tiles draw with a cycling index offset: 4 states, advancing
/// every frame for fast tiles and every other frame for slow ones. The
/// offset is added to the base index.
fn animated_tile_index(attributes: &TileAttributeDict, index: u16, elapsed_frames: u32) -> u16 {
    let attrs = attributes.attributes(index);
    if !attrs.is_animated() {
        return index;
    }
    let delay = if attrs.is_fast_animation() {
        FAST_ANIM_FRAME_DELAY
    } else {
        SLOW_ANIM_FRAME_DELAY
    };
    index + ((elapsed_frames / delay) % ANIM_STATES) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::TileAttributes;

    fn anim_dict() -> TileAttributeDict {
        TileAttributeDict::from_entries([
            (10, TileAttributes::new(false, true, true, false)), // fast
            (20, TileAttributes::new(false, true, false, false)), // slow
        ])
    }

    #[test]
    fn fast_tiles_cycle_with_period_four() {
        let dict = anim_dict();
        let indices: Vec<u16> = (0..8)
            .map(|f| animated_tile_index(&dict, 10, f))
            .collect();
        assert_eq!(indices, vec![10, 11, 12, 13, 10, 11, 12, 13]);
    }

    #[test]
    fn slow_tiles_cycle_with_period_eight() {
        let dict = anim_dict();
        let indices: Vec<u16> = (0..8)
            .map(|f| animated_tile_index(&dict, 20, f))
            .collect();
        assert_eq!(indices, vec![20, 20, 21, 21, 22, 22, 23, 23]);
    }

    #[test]
    fn non_animated_tiles_keep_their_index() {
        let dict = anim_dict();
        assert_eq!(animated_tile_index(&dict, 5, 123), 5);
    }

    #[test]
    fn parallax_offset_stays_within_viewport() {
        use BackdropScrollMode::ParallaxBoth;
        let vp = ivec2(256, 160);
        for cam in [-1000, -37, 0, 19, 64, 5000] {
            let offset = backdrop_offset(ParallaxBoth, ivec2(cam, cam), 0, vp);
            assert!(offset.x >= 0 && offset.x < vp.x, "x wrap failed at {}", cam);
            assert!(offset.y >= 0 && offset.y < vp.y, "y wrap failed at {}", cam);
        }
    }

    #[test]
    fn parallax_vertical_ignores_horizontal_camera() {
        let vp = ivec2(256, 160);
        let offset =
            backdrop_offset(BackdropScrollMode::ParallaxVertical, ivec2(99, 10), 0, vp);
        assert_eq!(offset, ivec2(0, 40));
    }

    #[test]
    fn auto_horizontal_matches_half_rate_rounding() {
        let vp = ivec2(256, 160);
        let offset = backdrop_offset(BackdropScrollMode::AutoHorizontal, IVec2::ZERO, 120, vp);
        assert_eq!(offset.x, 60);
        // Wraps modulo the viewport width.
        let offset = backdrop_offset(BackdropScrollMode::AutoHorizontal, IVec2::ZERO, 1024, vp);
        assert_eq!(offset.x, 512 % 256);
    }

    #[test]
    fn auto_vertical_is_mirrored() {
        let vp = ivec2(256, 160);
        let offset = backdrop_offset(BackdropScrollMode::AutoVertical, IVec2::ZERO, 30, vp);
        assert_eq!(offset.y, 160 - 30);
    }
}
