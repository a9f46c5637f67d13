use crate::geom::GridRect;
use crate::ladder::LadderGrid;
use crate::map::Map;
use crate::tick::TickStepper;
use macroquad::prelude::*;

/// Vertical launch velocity applied on jump.
const JUMP_VELOCITY: f32 = -3.6;
/// Climbing speed on a ladder, in cells per physics step.
const CLIMB_SPEED: f32 = 1.0;
/// Walking speed, in cells per physics step.
const WALK_SPEED: f32 = 1.0;
/// Ticks of delay before horizontal movement builds up speed.
const ACCELERATION_DELAY_TICKS: u32 = 2;

/// The player's current movement state. States are mutually exclusive and
/// only change inside [`PlayerControls::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// On the ground, not moving.
    Standing,
    /// On the ground, moving horizontally.
    Walking,
    /// In the air (jumping or falling).
    Airborne,
    /// Ducked down; shrinks the collision box.
    Crouching,
    /// Looking up; also the trigger posture for interactions.
    LookingUp,
    /// Attached to a ladder.
    ClimbingLadder,
}

/// Which way the player faces. Changes only when horizontal movement is
/// requested and the player is not climbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Facing left.
    Left,
    /// Facing right.
    Right,
}

/// Directional/action input flags, sampled once per update.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Move left requested.
    pub left: bool,
    /// Move right requested.
    pub right: bool,
    /// Move up / look up / climb requested.
    pub up: bool,
    /// Move down / crouch requested.
    pub down: bool,
    /// Jump requested.
    pub jump: bool,
}

/// The player's physical body, consumed by the host game's movement
/// integrator.
#[derive(Debug, Clone, Copy)]
pub struct Physical {
    /// Collision box extent in cells (position-relative).
    pub collision_size: IVec2,
    /// Velocity in cells per physics step.
    pub velocity: Vec2,
    /// Whether gravity applies; climbing turns it off.
    pub gravity_affected: bool,
}

/// Sprite animation cycle, consumed by the host game's sprite system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCycle {
    /// Frames between animation steps.
    pub delay: u32,
    /// First frame of the cycle.
    pub start: u32,
    /// Last frame of the cycle (inclusive).
    pub end: u32,
}

/// The single player character: state, orientation, position and body.
///
/// `position` is the bottom-left cell of the collision box, in tile
/// units — the classic convention for bottom-anchored actors.
#[derive(Debug, Clone)]
pub struct Player {
    /// Movement state.
    pub state: PlayerState,
    /// Facing direction.
    pub orientation: Orientation,
    /// Bottom-left cell of the collision box.
    pub position: IVec2,
    /// Collision box, velocity and gravity flag.
    pub physical: Physical,
    /// Sprite frame index for the current state and orientation.
    pub frame: u32,
    /// Walking animation cycle, when the state has one.
    pub animation: Option<AnimationCycle>,
    /// Player is in the look-up posture this tick (drives camera nudges).
    pub looking_up: bool,
    /// Player is crouching this tick (drives camera nudges).
    pub looking_down: bool,
    /// An interaction fired and "up" has not been released since.
    pub performed_interaction: bool,
}

impl Player {
    /// Collision box size shared by every non-crouching state.
    pub const DEFAULT_BOX: IVec2 = ivec2(3, 5);

    /// New standing player at `position`, facing `orientation`.
    pub fn new(position: IVec2, orientation: Orientation) -> Self {
        Player {
            state: PlayerState::Standing,
            orientation,
            position,
            physical: Physical {
                collision_size: Self::DEFAULT_BOX,
                velocity: Vec2::ZERO,
                gravity_affected: true,
            },
            frame: match orientation {
                Orientation::Left => 0,
                Orientation::Right => SpriteTable::MIRROR_OFFSET,
            },
            animation: None,
            looking_up: false,
            looking_down: false,
            performed_interaction: false,
        }
    }

    /// World-space collision box. `position` is the bottom-left cell, so
    /// the box extends upwards.
    pub fn world_bounds(&self) -> GridRect {
        let size = self.physical.collision_size;
        GridRect::new(
            ivec2(self.position.x, self.position.y - (size.y - 1)),
            size,
        )
    }
}

/// Tag describing what an interaction with an entity does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionType {
    /// Teleports the player somewhere else.
    Teleporter,
}

/// An entity the player can interact with by looking up while overlapping
/// its bounds. Supplied per update call by the host game's entity storage.
#[derive(Debug, Clone, Copy)]
pub struct Interactable {
    /// Host-side entity handle.
    pub entity: u32,
    /// World-space bounds in tile units.
    pub bounds: GridRect,
    /// What interacting does.
    pub kind: InteractionType,
}

/// Event emitted when the player interacts with an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerInteraction {
    /// Host-side entity handle.
    pub entity: u32,
    /// What the interaction does.
    pub kind: InteractionType,
}

/// Per-state sprite frame and collision box entry.
#[derive(Debug, Clone, Copy)]
pub struct SpriteEntry {
    /// Base frame index (left-facing).
    pub frame: u32,
    /// Collision box for the state.
    pub box_size: IVec2,
    /// Walking-style cycle: offset of the last cycle frame from `frame`.
    pub cycle_end_offset: Option<u32>,
}

/// Table mapping each [`PlayerState`] to its sprite frame and collision
/// box. Immutable configuration owned by [`PlayerControls`]; the defaults
/// match the classic sprite sheet layout.
#[derive(Debug, Clone)]
pub struct SpriteTable {
    /// Frame offset added for right-facing sprites.
    pub mirror_offset: u32,
    /// Frames between walking animation steps.
    pub cycle_delay: u32,
    /// Entry for [`PlayerState::Standing`].
    pub standing: SpriteEntry,
    /// Entry for [`PlayerState::Walking`].
    pub walking: SpriteEntry,
    /// Entry for [`PlayerState::Airborne`].
    pub airborne: SpriteEntry,
    /// Entry for [`PlayerState::Crouching`].
    pub crouching: SpriteEntry,
    /// Entry for [`PlayerState::LookingUp`].
    pub looking_up: SpriteEntry,
    /// Entry for [`PlayerState::ClimbingLadder`].
    pub climbing: SpriteEntry,
}

impl SpriteTable {
    const MIRROR_OFFSET: u32 = 39;

    fn entry(&self, state: PlayerState) -> SpriteEntry {
        match state {
            PlayerState::Standing => self.standing,
            PlayerState::Walking => self.walking,
            PlayerState::Airborne => self.airborne,
            PlayerState::Crouching => self.crouching,
            PlayerState::LookingUp => self.looking_up,
            PlayerState::ClimbingLadder => self.climbing,
        }
    }

    /// Recompute frame, animation cycle and collision box for the
    /// player's current state and orientation.
    pub fn apply(&self, player: &mut Player) {
        let entry = self.entry(player.state);
        let mirror = match player.orientation {
            Orientation::Left => 0,
            Orientation::Right => self.mirror_offset,
        };
        let frame = entry.frame + mirror;
        player.frame = frame;
        player.animation = entry.cycle_end_offset.map(|end| AnimationCycle {
            delay: self.cycle_delay,
            start: frame,
            end: frame + end,
        });
        player.physical.collision_size = entry.box_size;
    }
}

impl Default for SpriteTable {
    fn default() -> Self {
        let plain = |frame| SpriteEntry {
            frame,
            box_size: Player::DEFAULT_BOX,
            cycle_end_offset: None,
        };
        SpriteTable {
            mirror_offset: Self::MIRROR_OFFSET,
            cycle_delay: 4,
            standing: plain(0),
            walking: SpriteEntry {
                frame: 1,
                box_size: Player::DEFAULT_BOX,
                cycle_end_offset: Some(3),
            },
            airborne: plain(8),
            looking_up: plain(16),
            crouching: SpriteEntry {
                frame: 17,
                box_size: ivec2(Player::DEFAULT_BOX.x, 4),
                cycle_end_offset: None,
            },
            climbing: plain(36),
        }
    }
}

/// The player control state machine.
///
/// Owns the precomputed [`LadderGrid`], the sprite/collision table and the
/// fixed-tick accumulator for the walk acceleration delay.
pub struct PlayerControls {
    ladder: LadderGrid,
    sprites: SpriteTable,
    stepper: TickStepper,
}

impl PlayerControls {
    /// Build the control system for a map, precomputing its ladder grid.
    pub fn new(map: &Map) -> Self {
        Self::with_sprites(map, SpriteTable::default())
    }

    /// Like [`PlayerControls::new`] but with a custom sprite table.
    pub fn with_sprites(map: &Map, sprites: SpriteTable) -> Self {
        PlayerControls {
            ladder: LadderGrid::from_map(map),
            sprites,
            stepper: TickStepper::new(),
        }
    }

    /// The ladder grid computed from the map.
    pub fn ladder_grid(&self) -> &LadderGrid {
        &self.ladder
    }

    /// Advance the state machine by one update.
    ///
    /// The steps run in a fixed order because later steps consult and
    /// override the results of earlier ones within the same tick: input
    /// conflict cancelling, ladder attachment, orientation, climbing
    /// motion, look-up/crouch resolution, horizontal movement with its
    /// 2-tick acceleration delay, landing, and finally jump, which
    /// overrides whatever state was decided above.
    ///
    /// `interactables` is re-enumerated on the first look-up frame to
    /// hit-test interaction candidates; matches are pushed to `events`.
    pub fn update<I>(
        &mut self,
        player: &mut Player,
        input: InputState,
        dt: f32,
        interactables: I,
        events: &mut Vec<PlayerInteraction>,
    ) where
        I: IntoIterator<Item = Interactable>,
    {
        let has_ticks = self.stepper.update_and_check(ACCELERATION_DELAY_TICKS, dt);

        let mut left = input.left;
        let mut right = input.right;
        let mut up = input.up;
        let mut down = input.down;

        // Conflicting directional inputs cancel out.
        if left && right {
            left = false;
            right = false;
        }
        if up && down {
            up = false;
            down = false;
        }

        // Interactions can re-trigger only after "up" was released.
        if player.performed_interaction && !up {
            player.performed_interaction = false;
        }

        let old_state = player.state;
        let old_orientation = player.orientation;
        let mut horizontal_wanted = left || right;
        let mut vertical_wanted = up || down;

        // Ladder attachment: grab when moving up with a ladder cell in the
        // row right above the collision box.
        if vertical_wanted && up && player.state != PlayerState::ClimbingLadder {
            let bounds = player.world_bounds();
            if let Some(ladder_col) =
                self.ladder
                    .find_in_row(bounds.top() - 1, bounds.left(), bounds.right())
            {
                player.state = PlayerState::ClimbingLadder;
                player.physical.gravity_affected = false;

                // Snap the anchor column onto the ladder column so the
                // climb animation lines up with the ladder.
                let anchor = match player.orientation {
                    Orientation::Left => 0,
                    Orientation::Right => 1,
                };
                player.position.x += ladder_col - player.position.x - anchor;
            }
        }

        if player.state == PlayerState::ClimbingLadder {
            horizontal_wanted = false;
        }

        if horizontal_wanted {
            player.orientation = if left {
                Orientation::Left
            } else {
                Orientation::Right
            };
        }

        // No mid-air look-up/crouch.
        if player.state == PlayerState::Airborne {
            vertical_wanted = false;
        }

        // Crouching/looking up takes priority over walking in the same tick.
        if vertical_wanted
            && matches!(
                player.state,
                PlayerState::LookingUp
                    | PlayerState::Crouching
                    | PlayerState::Standing
                    | PlayerState::Walking
            )
        {
            horizontal_wanted = false;
        }

        if player.state == PlayerState::ClimbingLadder {
            if up {
                player.physical.velocity.y = if self.can_climb_up(player) {
                    -CLIMB_SPEED
                } else {
                    0.0
                };
            } else if down {
                if self.can_climb_down(player) {
                    player.physical.velocity.y = CLIMB_SPEED;
                } else {
                    // Fell off the bottom of the ladder.
                    player.state = PlayerState::Airborne;
                    player.physical.gravity_affected = true;
                    player.physical.velocity.y = CLIMB_SPEED;
                    vertical_wanted = false;
                }
            } else {
                player.physical.velocity.y = 0.0;
            }
        }

        player.looking_up = false;
        player.looking_down = false;
        if vertical_wanted && player.state != PlayerState::ClimbingLadder {
            if up {
                player.state = PlayerState::LookingUp;
                player.looking_up = true;

                if !player.performed_interaction {
                    let bounds = player.world_bounds();
                    for candidate in interactables {
                        if candidate.bounds.intersects(&bounds) {
                            events.push(PlayerInteraction {
                                entity: candidate.entity,
                                kind: candidate.kind,
                            });
                            player.performed_interaction = true;
                        }
                    }
                }
            } else {
                player.state = PlayerState::Crouching;
                player.looking_down = true;
            }
        }

        // Vertical movement released: start from standing and let the
        // horizontal logic below figure out the rest this same tick.
        if !vertical_wanted
            && matches!(player.state, PlayerState::LookingUp | PlayerState::Crouching)
        {
            player.state = PlayerState::Standing;
        }

        // Horizontal movement. Stopping is instantaneous; starting to walk
        // builds up speed only after the acceleration delay.
        if !horizontal_wanted {
            if player.state == PlayerState::Walking {
                player.state = PlayerState::Standing;
            }
            player.physical.velocity.x = 0.0;
        } else {
            if player.state == PlayerState::Standing {
                player.state = PlayerState::Walking;
            }
            if matches!(player.state, PlayerState::Walking | PlayerState::Airborne)
                && has_ticks
            {
                player.physical.velocity.x = if left { -WALK_SPEED } else { WALK_SPEED };
            }
        }

        // Landed.
        if player.physical.velocity.y == 0.0 && player.state == PlayerState::Airborne {
            player.state = PlayerState::Standing;
        }

        // Jump overrides any state decided above in the same tick.
        if input.jump && player.state != PlayerState::Airborne {
            player.physical.velocity.y = JUMP_VELOCITY;
            player.physical.gravity_affected = true;
            player.state = PlayerState::Airborne;
        }

        if player.state != old_state || player.orientation != old_orientation {
            self.sprites.apply(player);
        }
    }

    /// Is there still ladder above the box's top row?
    fn can_climb_up(&self, player: &Player) -> bool {
        let bounds = player.world_bounds();
        self.ladder
            .find_in_row(bounds.top() - 1, bounds.left(), bounds.right())
            .is_some()
    }

    /// Is there still ladder below the box's bottom row?
    fn can_climb_down(&self, player: &Player) -> bool {
        let bounds = player.world_bounds();
        self.ladder
            .find_in_row(bounds.bottom(), bounds.left(), bounds.right())
            .is_some()
    }
}
