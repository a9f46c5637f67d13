//! Tile map rendering: backdrop, background/foreground tile layers and
//! animated tile substitution.

mod backend;
mod map_renderer;

pub use backend::{DrawRequest, MacroquadBackend, RecordingBackend, RenderBackend};
pub use map_renderer::{Backdrop, MapRenderer, TileSheet};
