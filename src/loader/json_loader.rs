//! serde decoding of the JSON map format.
//!
//! ```json
//! {
//!   "width": 4, "height": 3,
//!   "scroll_mode": "parallax_horizontal",
//!   "layers": [[...], [...]],
//!   "attributes": [
//!     {"index": 5, "animated": true, "fast_animation": true},
//!     {"index": 9, "ladder": true}
//!   ]
//! }
//! ```

use crate::attributes::{TileAttributeDict, TileAttributes};
use crate::error::MapError;
use crate::map::{BackdropScrollMode, Map, LAYER_COUNT};
use serde::Deserialize;

#[derive(Deserialize)]
struct JsonMap {
    width: i32,
    height: i32,
    #[serde(default)]
    scroll_mode: BackdropScrollMode,
    layers: Vec<Vec<u16>>,
    #[serde(default)]
    attributes: Vec<JsonTileAttributes>,
}

#[derive(Deserialize)]
struct JsonTileAttributes {
    index: u16,
    #[serde(default)]
    foreground: bool,
    #[serde(default)]
    animated: bool,
    #[serde(default)]
    fast_animation: bool,
    #[serde(default)]
    ladder: bool,
}

pub(crate) fn decode_map_str(json: &str) -> Result<Map, MapError> {
    let j: JsonMap = serde_json::from_str(json)?;

    let layers: [Vec<u16>; LAYER_COUNT] = j
        .layers
        .try_into()
        .map_err(|layers: Vec<Vec<u16>>| MapError::LayerCount(layers.len()))?;

    let attributes = TileAttributeDict::from_entries(j.attributes.into_iter().map(|a| {
        (
            a.index,
            TileAttributes::new(a.foreground, a.animated, a.fast_animation, a.ladder),
        )
    }));

    Map::new(j.width, j.height, layers, attributes, j.scroll_mode)
}
