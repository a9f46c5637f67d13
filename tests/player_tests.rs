// tests/player_tests.rs
//
// State machine scenarios driven through the public API, one simulated
// tick (1/60 s) per update call.

use macroquad::prelude::*;
use macroquad_platformer_kit::{
    BackdropScrollMode, GridRect, InputState, Interactable, InteractionType, Map, Orientation,
    Player, PlayerControls, PlayerInteraction, PlayerState, TileAttributeDict, TileAttributes,
};

const DT: f32 = 1.0 / 60.0;

fn plain_map() -> Map {
    Map::new(
        20,
        20,
        [vec![0; 400], vec![0; 400]],
        TileAttributeDict::default(),
        BackdropScrollMode::None,
    )
    .unwrap()
}

/// 10x10 map with a ladder column (tile 9) at col 5, rows 2..=7.
fn ladder_map() -> Map {
    let mut layer0 = vec![0u16; 100];
    for row in 2..=7 {
        layer0[row * 10 + 5] = 9;
    }
    let dict =
        TileAttributeDict::from_entries([(9, TileAttributes::new(false, false, false, true))]);
    Map::new(10, 10, [layer0, vec![0; 100]], dict, BackdropScrollMode::None).unwrap()
}

fn update(
    controls: &mut PlayerControls,
    player: &mut Player,
    input: InputState,
) -> Vec<PlayerInteraction> {
    let mut events = Vec::new();
    controls.update(player, input, DT, vec![], &mut events);
    events
}

#[test]
fn walking_starts_with_two_tick_acceleration_delay() {
    let map = plain_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(10, 15), Orientation::Right);
    let input = InputState {
        left: true,
        ..Default::default()
    };

    update(&mut controls, &mut player, input);
    assert_eq!(player.state, PlayerState::Walking);
    assert_eq!(player.orientation, Orientation::Left);
    assert_eq!(player.physical.velocity.x, 0.0);

    update(&mut controls, &mut player, input);
    assert_eq!(player.physical.velocity.x, -1.0);
}

#[test]
fn stopping_is_instantaneous() {
    let map = plain_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(10, 15), Orientation::Right);
    let right = InputState {
        right: true,
        ..Default::default()
    };

    update(&mut controls, &mut player, right);
    update(&mut controls, &mut player, right);
    assert_eq!(player.physical.velocity.x, 1.0);

    update(&mut controls, &mut player, InputState::default());
    assert_eq!(player.state, PlayerState::Standing);
    assert_eq!(player.physical.velocity.x, 0.0);
}

#[test]
fn walking_state_carries_an_animation_cycle() {
    let map = plain_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(10, 15), Orientation::Left);

    update(
        &mut controls,
        &mut player,
        InputState {
            left: true,
            ..Default::default()
        },
    );
    assert_eq!(player.frame, 1);
    let cycle = player.animation.expect("walking should animate");
    assert_eq!((cycle.start, cycle.end, cycle.delay), (1, 4, 4));

    update(&mut controls, &mut player, InputState::default());
    assert_eq!(player.frame, 0);
    assert!(player.animation.is_none());
}

#[test]
fn conflicting_directions_cancel() {
    let map = plain_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(10, 15), Orientation::Right);
    let input = InputState {
        left: true,
        right: true,
        up: true,
        down: true,
        ..Default::default()
    };

    update(&mut controls, &mut player, input);
    update(&mut controls, &mut player, input);
    assert_eq!(player.state, PlayerState::Standing);
    assert_eq!(player.physical.velocity.x, 0.0);
    assert_eq!(player.orientation, Orientation::Right);
}

#[test]
fn vertical_input_overrides_walking_but_still_turns() {
    let map = plain_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(10, 15), Orientation::Right);

    update(
        &mut controls,
        &mut player,
        InputState {
            left: true,
            up: true,
            ..Default::default()
        },
    );
    assert_eq!(player.state, PlayerState::LookingUp);
    assert!(player.looking_up);
    assert_eq!(player.physical.velocity.x, 0.0);
    // Orientation updates even though the walk was cancelled.
    assert_eq!(player.orientation, Orientation::Left);
}

#[test]
fn crouching_shrinks_the_collision_box() {
    let map = plain_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(10, 15), Orientation::Left);

    update(
        &mut controls,
        &mut player,
        InputState {
            down: true,
            ..Default::default()
        },
    );
    assert_eq!(player.state, PlayerState::Crouching);
    assert!(player.looking_down);
    assert_eq!(player.physical.collision_size, ivec2(3, 4));
    assert_eq!(player.frame, 17);

    update(&mut controls, &mut player, InputState::default());
    assert_eq!(player.state, PlayerState::Standing);
    assert_eq!(player.physical.collision_size, ivec2(3, 5));
}

#[test]
fn jump_overrides_walking_in_the_same_tick() {
    let map = plain_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(10, 15), Orientation::Right);
    let walk = InputState {
        right: true,
        ..Default::default()
    };
    update(&mut controls, &mut player, walk);
    assert_eq!(player.state, PlayerState::Walking);

    update(
        &mut controls,
        &mut player,
        InputState {
            right: true,
            jump: true,
            ..Default::default()
        },
    );
    assert_eq!(player.state, PlayerState::Airborne);
    assert_eq!(player.physical.velocity.y, -3.6);
    assert!(player.physical.gravity_affected);
}

#[test]
fn airborne_with_zero_vertical_velocity_lands() {
    let map = plain_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(10, 15), Orientation::Right);
    player.state = PlayerState::Airborne;
    player.physical.velocity.y = 0.0;

    update(&mut controls, &mut player, InputState::default());
    assert_eq!(player.state, PlayerState::Standing);
}

#[test]
fn ladder_grab_snaps_anchor_column_for_both_orientations() {
    let up = InputState {
        up: true,
        ..Default::default()
    };

    // Right-facing: anchor is column 1 of the box.
    let map = ladder_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(4, 8), Orientation::Right);
    update(&mut controls, &mut player, up);
    assert_eq!(player.state, PlayerState::ClimbingLadder);
    assert!(!player.physical.gravity_affected);
    assert_eq!(player.position.x + 1, 5);
    assert_eq!(player.physical.velocity.y, -1.0);
    assert_eq!(player.frame, 36 + 39);

    // Left-facing: anchor is column 0.
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(5, 8), Orientation::Left);
    update(&mut controls, &mut player, up);
    assert_eq!(player.state, PlayerState::ClimbingLadder);
    assert_eq!(player.position.x, 5);
    assert_eq!(player.frame, 36);
}

#[test]
fn no_grab_without_a_ladder_above() {
    let map = ladder_map();
    let mut controls = PlayerControls::new(&map);
    // Box top row is 4, row above is 3; ladder column is 5 but the player
    // stands too far left to reach it.
    let mut player = Player::new(ivec2(0, 8), Orientation::Right);
    update(
        &mut controls,
        &mut player,
        InputState {
            up: true,
            ..Default::default()
        },
    );
    assert_eq!(player.state, PlayerState::LookingUp);
    assert!(player.physical.gravity_affected);
}

#[test]
fn climbing_ignores_horizontal_input() {
    let map = ladder_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(4, 8), Orientation::Right);
    update(
        &mut controls,
        &mut player,
        InputState {
            up: true,
            ..Default::default()
        },
    );
    assert_eq!(player.state, PlayerState::ClimbingLadder);

    for _ in 0..3 {
        update(
            &mut controls,
            &mut player,
            InputState {
                left: true,
                ..Default::default()
            },
        );
    }
    assert_eq!(player.state, PlayerState::ClimbingLadder);
    assert_eq!(player.physical.velocity.x, 0.0);
    assert_eq!(player.orientation, Orientation::Right);
    // Static grip without vertical input.
    assert_eq!(player.physical.velocity.y, 0.0);
}

#[test]
fn climbing_down_within_the_ladder_descends() {
    let map = ladder_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(4, 6), Orientation::Right);
    player.state = PlayerState::ClimbingLadder;
    player.physical.gravity_affected = false;

    update(
        &mut controls,
        &mut player,
        InputState {
            down: true,
            ..Default::default()
        },
    );
    assert_eq!(player.state, PlayerState::ClimbingLadder);
    assert_eq!(player.physical.velocity.y, 1.0);
}

#[test]
fn climbing_down_past_the_ladder_bottom_falls_off() {
    let map = ladder_map();
    let mut controls = PlayerControls::new(&map);
    // Bottom row 8; the row below (9) has no ladder.
    let mut player = Player::new(ivec2(4, 8), Orientation::Right);
    player.state = PlayerState::ClimbingLadder;
    player.physical.gravity_affected = false;

    update(
        &mut controls,
        &mut player,
        InputState {
            down: true,
            ..Default::default()
        },
    );
    assert_eq!(player.state, PlayerState::Airborne);
    assert!(player.physical.gravity_affected);
    assert_eq!(player.physical.velocity.y, 1.0);
}

#[test]
fn climbing_up_past_the_ladder_top_holds() {
    let map = ladder_map();
    let mut controls = PlayerControls::new(&map);
    // Box top row 2 is the ladder's top cell; the row above (1) is empty.
    let mut player = Player::new(ivec2(4, 6), Orientation::Right);
    player.state = PlayerState::ClimbingLadder;
    player.physical.gravity_affected = false;

    update(
        &mut controls,
        &mut player,
        InputState {
            up: true,
            ..Default::default()
        },
    );
    assert_eq!(player.state, PlayerState::ClimbingLadder);
    assert_eq!(player.physical.velocity.y, 0.0);
}

#[test]
fn interaction_fires_once_until_up_is_released() {
    let map = plain_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(4, 8), Orientation::Right);
    let teleporter = Interactable {
        entity: 42,
        bounds: GridRect::new(ivec2(5, 5), ivec2(2, 2)),
        kind: InteractionType::Teleporter,
    };
    let up = InputState {
        up: true,
        ..Default::default()
    };

    let mut events = Vec::new();
    controls.update(&mut player, up, DT, [teleporter], &mut events);
    assert_eq!(
        events,
        vec![PlayerInteraction {
            entity: 42,
            kind: InteractionType::Teleporter
        }]
    );
    assert!(player.performed_interaction);

    // Holding up does not re-trigger.
    controls.update(&mut player, up, DT, [teleporter], &mut events);
    assert_eq!(events.len(), 1);

    // Releasing up re-arms the interaction.
    controls.update(&mut player, InputState::default(), DT, [teleporter], &mut events);
    assert!(!player.performed_interaction);
    controls.update(&mut player, up, DT, [teleporter], &mut events);
    assert_eq!(events.len(), 2);
}

#[test]
fn interaction_requires_overlap() {
    let map = plain_map();
    let mut controls = PlayerControls::new(&map);
    let mut player = Player::new(ivec2(4, 8), Orientation::Right);
    // Player box covers columns 4..7; this entity starts at column 7.
    let out_of_reach = Interactable {
        entity: 7,
        bounds: GridRect::new(ivec2(7, 5), ivec2(2, 2)),
        kind: InteractionType::Teleporter,
    };

    let mut events = Vec::new();
    controls.update(
        &mut player,
        InputState {
            up: true,
            ..Default::default()
        },
        DT,
        [out_of_reach],
        &mut events,
    );
    assert!(events.is_empty());
    assert!(!player.performed_interaction);
}
