//! Player plugin.
//!
//! Pipeline:
//! - Update: sample the keyboard into the player's `Intent`
//! - FixedUpdate: shared movement/weapon systems consume that intent like
//!   they do for any bot
//!
//! The player is just another composed ship: same `Intent`, both movement
//! axes, an upward-firing `Weapon`, `Health` and `LifeState`. The only thing
//! special about it is who writes the intent.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::colliders::{Health, LifeState};
use crate::plugins::input::Intent;
use crate::plugins::movement::{HorizontalMovement, VerticalMovement};
use crate::plugins::weapons::{BulletKind, Weapon};

#[derive(Component, Debug, Clone, Copy)]
pub struct Player;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_intent.run_if(in_state(GameState::InGame)));
}

pub fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::Enemy, Layer::EnemyBullet]);

    commands.spawn((
        (
            Name::new("Player"),
            Player,
            Intent::NONE,
            LifeState::Active,
            Health {
                hp: tunables.player_hp,
            },
            HorizontalMovement {
                speed: tunables.player_speed,
            },
            VerticalMovement {
                speed: tunables.player_speed,
            },
            Weapon::new(BulletKind::Player, tunables.player_weapon),
        ),
        (
            Sprite {
                color: Color::srgb(0.2, 0.75, 0.9),
                custom_size: Some(Vec2::splat(26.0)),
                ..default()
            },
            Transform::from_xyz(0.0, -tunables.field_half.y + 40.0, 1.0),
            RigidBody::Kinematic,
            Collider::circle(13.0),
            Sensor,
            layers,
            LinearVelocity(Vec2::ZERO),
            DespawnOnExit(GameState::InGame),
        ),
    ));
}

/// Keyboard sampling. Device mapping stays here, at the edge; everything
/// downstream sees only `Intent`.
///
/// `ButtonInput` is optional so headless apps (no input plugin) still tick.
pub fn gather_intent(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut q_player: Query<(&LifeState, &mut Intent), With<Player>>,
) {
    let Some(keys) = keys else {
        return;
    };
    let Ok((life, mut intent)) = q_player.single_mut() else {
        return;
    };

    if !life.is_active() {
        *intent = Intent::NONE;
        return;
    }

    *intent = Intent {
        up: keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp),
        down: keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown),
        left: keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft),
        right: keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight),
        shoot: keys.pressed(KeyCode::Space),
    };
}
