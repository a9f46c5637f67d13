use crate::geom::GridRect;
use crate::map::Map;
use crate::player::{Player, PlayerState};
use crate::tick::TickStepper;
use crate::viewport::Viewport;
use macroquad::prelude::*;

/// Ticks of delay between vertical look nudges.
const LOOK_NUDGE_DELAY_TICKS: u32 = 2;
/// Scroll units the camera nudges per fired look tick.
const LOOK_NUDGE_STEP: i32 = 2;

/// Dead-zone rectangles, in viewport-relative tile units.
///
/// While the player stays inside the active zone the camera does not move.
/// The climbing zone is shorter so the ladder's vertical extent stays
/// visible while climbing.
#[derive(Debug, Clone, Copy)]
pub struct DeadZones {
    /// Zone used for every state except climbing.
    pub default_zone: GridRect,
    /// Zone used while on a ladder.
    pub climbing_zone: GridRect,
}

impl DeadZones {
    /// The classic zones for a given viewport size.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let (w, h) = (viewport.width_tiles, viewport.height_tiles);
        DeadZones {
            default_zone: GridRect::new(ivec2(11, 2), ivec2(w - 23, h - 3)),
            climbing_zone: GridRect::new(ivec2(11, 7), ivec2(w - 23, h - 14)),
        }
    }

    fn for_state(&self, state: PlayerState) -> GridRect {
        match state {
            PlayerState::ClimbingLadder => self.climbing_zone,
            _ => self.default_zone,
        }
    }
}

/// Derives the camera scroll offset from the player's state and position.
///
/// Owns the shared scroll offset; the render pass reads it via
/// [`MapScrollController::offset`] after `update` ran for the frame (the
/// caller guarantees that ordering). The offset never scrolls past the map
/// edges.
pub struct MapScrollController {
    offset: IVec2,
    max_offset: IVec2,
    viewport: Viewport,
    dead_zones: DeadZones,
    stepper: TickStepper,
}

impl MapScrollController {
    /// Controller for a map viewed through `viewport`, with the classic
    /// dead zones.
    pub fn new(map: &Map, viewport: Viewport) -> Self {
        Self::with_dead_zones(map, viewport, DeadZones::for_viewport(viewport))
    }

    /// Controller with custom dead zones.
    pub fn with_dead_zones(map: &Map, viewport: Viewport, dead_zones: DeadZones) -> Self {
        let max_offset =
            (ivec2(map.width(), map.height()) - viewport.size_tiles()).max(IVec2::ZERO);
        MapScrollController {
            offset: IVec2::ZERO,
            max_offset,
            viewport,
            dead_zones,
            stepper: TickStepper::new(),
        }
    }

    /// Current scroll offset in tile units.
    #[inline]
    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Jump the camera so the player is centered, clamped to the map
    /// edges. Used after teleports and level entry.
    pub fn center_on_player(&mut self, player: &Player) {
        let target = player.position - self.viewport.size_tiles() / 2;
        self.offset = target.clamp(IVec2::ZERO, self.max_offset);
    }

    /// Update the scroll offset for this tick: apply vertical look
    /// nudges (gated by the 2-tick delay), push the player's collision box
    /// back inside the dead zone, and clamp to the map edges.
    pub fn update(&mut self, player: &Player, dt: f32) {
        if self.stepper.update_and_check(LOOK_NUDGE_DELAY_TICKS, dt) {
            // No range check needed here; the clamp below bounds the offset.
            if player.looking_down {
                self.offset.y += LOOK_NUDGE_STEP;
            }
            if player.looking_up {
                self.offset.y -= LOOK_NUDGE_STEP;
            }
        }

        let player_box = player.world_bounds();
        let mut dead_zone = self.dead_zones.for_state(player.state);
        dead_zone.pos += self.offset;

        // Per-axis minimal correction, zero when already inside the zone.
        let push_left = (dead_zone.left() - player_box.left()).max(0);
        let push_right = (dead_zone.right() - player_box.right()).min(0);
        let push_top = (dead_zone.top() - player_box.top()).max(0);
        let push_bottom = (dead_zone.bottom() - player_box.bottom()).min(0);

        self.offset += ivec2(-push_left - push_right, -push_top - push_bottom);
        self.offset = self.offset.clamp(IVec2::ZERO, self.max_offset);
    }
}
