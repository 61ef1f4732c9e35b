//! Cross-cutting bookkeeping for destruction events.
//!
//! The kill itself already happened when these observers run; this module
//! only accumulates score and forwards `ScoreChanged` for anything that
//! renders or reacts to it. Keeping the bookkeeping here, behind the bus,
//! means the collision code never knows the score exists.

use bevy::ecs::prelude::On;
use bevy::prelude::*;

use crate::plugins::events::{EnemyDestroyed, PlayerDamaged, ScoreChanged};

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score(pub u32);

pub fn plugin(app: &mut App) {
    app.init_resource::<Score>();
    app.add_observer(on_enemy_destroyed);
    app.add_observer(on_player_damaged);
}

fn on_enemy_destroyed(ev: On<EnemyDestroyed>, mut score: ResMut<Score>, mut commands: Commands) {
    score.0 += ev.event().score;
    commands.trigger(ScoreChanged { total: score.0 });
}

fn on_player_damaged(ev: On<PlayerDamaged>) {
    let remaining = ev.event().remaining;
    if remaining <= 0 {
        info!("player destroyed");
    } else {
        debug!("player hit, {remaining} hp left");
    }
}
