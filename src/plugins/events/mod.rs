//! Session event bus: the closed set of gameplay lifecycle events.
//!
//! Cross-cutting effects (scoring, spawner bookkeeping, future audio/UI hooks)
//! subscribe to these instead of reaching into the plugin that caused them.
//!
//! # Contract
//! - `on`   = `App::add_observer` / `World::add_observer`
//! - `emit` = `World::trigger` / `Commands::trigger`
//!
//! Dispatch is synchronous and in registration order: `World::trigger` runs
//! every observer for the event on the caller's stack before it returns.
//! `Commands::trigger` defers only until the next command flush, still within
//! the same frame. An observer is unsubscribed by despawning the observer
//! entity returned from `add_observer`.
//!
//! The bus is scoped to the `World`, i.e. to one game session. A fresh `App`
//! starts with no subscribers; teardown discards them with everything else.
//!
//! # Reentrancy
//! An observer that triggers further events recurses (or enqueues, when it
//! only has `Commands`). Observers must not add or remove observers for the
//! event they are currently handling.
//!
//! This enum-per-event shape keeps the event set closed at compile time:
//! there is no stringly-typed channel to subscribe to.

use bevy::prelude::*;

/// An enemy was taken from its spawner pool and activated.
///
/// Fired after the enemy is fully repositioned and reset, so subscribers may
/// inspect its components.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyInit {
    pub enemy: Entity,
}

/// An enemy was destroyed by the player.
///
/// The deactivation already happened before this fires; subscribers only do
/// bookkeeping. Enemies culled for leaving the play field do *not* fire this.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyDestroyed {
    pub enemy: Entity,
    /// Score awarded for this variant.
    pub score: u32,
}

/// The player was hit by an enemy ship or projectile.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDamaged {
    /// Hit points left after the hit. Zero means the player is gone.
    pub remaining: i32,
}

/// The session score changed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChanged {
    pub total: u32,
}
