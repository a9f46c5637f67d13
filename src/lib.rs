#![warn(missing_docs)]

//! Tile-map rendering & player control core for Macroquad platformers.
//!
//! The crate covers the two densest subsystems of a classic side scroller:
//! a layered, parallax-scrolling tile-map renderer with animated tile
//! substitution, and the player control state machine (walking, climbing,
//! crouching, jumping) with ladder queries and camera-following logic.
//! Everything else (asset decoding, generic physics integration, audio,
//! windowing) is left to the host game.

mod attributes;
mod error;
mod geom;
mod ladder;
mod loader {
    pub mod json_loader;
}
mod map;
mod player;
mod render;
mod scroll;
mod tick;
mod viewport;

pub use attributes::{TileAttributeDict, TileAttributes};
pub use error::MapError;
pub use geom::GridRect;
pub use ladder::LadderGrid;
pub use map::{BackdropScrollMode, Map};
pub use player::{
    AnimationCycle, InputState, Interactable, InteractionType, Orientation, Physical, Player,
    PlayerControls, PlayerInteraction, PlayerState, SpriteEntry, SpriteTable,
};
pub use render::{
    Backdrop, DrawRequest, MacroquadBackend, MapRenderer, RecordingBackend, RenderBackend,
    TileSheet,
};
pub use scroll::{DeadZones, MapScrollController};
pub use tick::TickStepper;
pub use viewport::Viewport;
