use crate::attributes::TileAttributeDict;
use crate::error::MapError;
use crate::loader::json_loader::decode_map_str;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Number of stacked tile layers in every map.
pub(crate) const LAYER_COUNT: usize = 2;

/// How the backdrop image scrolls behind the tile layers. Fixed per map,
/// set at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackdropScrollMode {
    /// Static backdrop.
    #[default]
    None,
    /// Backdrop follows the camera horizontally at a reduced rate.
    ParallaxHorizontal,
    /// Backdrop follows the camera vertically at a reduced rate.
    ParallaxVertical,
    /// Parallax on both axes.
    ParallaxBoth,
    /// Backdrop scrolls horizontally on its own, ignoring the camera.
    AutoHorizontal,
    /// Backdrop scrolls vertically on its own, ignoring the camera.
    AutoVertical,
}

/// Tile map: a width x height grid of cells with two stacked tile layers,
/// the per-index attribute dictionary and the backdrop scroll mode.
///
/// Tile index 0 means "transparent, show backdrop". The map is immutable
/// once built; renderer and control systems hold references into it.
#[derive(Debug)]
pub struct Map {
    width: i32,
    height: i32,
    layers: [Vec<u16>; LAYER_COUNT],
    attributes: TileAttributeDict,
    scroll_mode: BackdropScrollMode,
}

impl Map {
    /// Build a map from raw layer data.
    ///
    /// Both layers must hold exactly `width * height` indices and the
    /// dimensions must be non-zero.
    pub fn new(
        width: i32,
        height: i32,
        layers: [Vec<u16>; LAYER_COUNT],
        attributes: TileAttributeDict,
        scroll_mode: BackdropScrollMode,
    ) -> Result<Self, MapError> {
        let cells = (width.max(0) as usize) * (height.max(0) as usize);
        for (i, layer) in layers.iter().enumerate() {
            if width <= 0 || height <= 0 || layer.len() != cells {
                return Err(MapError::InvalidLayerSize(i));
            }
        }
        Ok(Map {
            width,
            height,
            layers,
            attributes,
            scroll_mode,
        })
    }

    /// Parse a map from its JSON representation.
    pub fn load_from_str(json: &str) -> Result<Self, MapError> {
        decode_map_str(json)
    }

    /// Load a map from a `.json` file on disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            return Err(MapError::UnsupportedFormat(
                path.to_string_lossy().into_owned(),
            ));
        }
        let txt = fs::read_to_string(path)?;
        Self::load_from_str(&txt)
    }

    /// Map width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Map height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Tile index at a cell of one layer; out-of-bounds reads return 0
    /// (transparent).
    ///
    /// `layer` must be 0 or 1 — anything else is a programming error and
    /// panics.
    pub fn tile_at(&self, layer: usize, col: i32, row: i32) -> u16 {
        if col < 0 || row < 0 || col >= self.width || row >= self.height {
            return 0;
        }
        self.layers[layer][(row * self.width + col) as usize]
    }

    /// The per-tile-index attribute dictionary.
    #[inline]
    pub fn attributes(&self) -> &TileAttributeDict {
        &self.attributes
    }

    /// The backdrop scroll mode this map was authored with.
    #[inline]
    pub fn scroll_mode(&self) -> BackdropScrollMode {
        self.scroll_mode
    }
}
