//! Feature plugins.

use bevy::prelude::*;

pub mod colliders;
pub mod core;
pub mod enemies;
pub mod events;
pub mod input;
pub mod movement;
pub mod physics;
pub mod player;
pub mod scoring;
pub mod weapons;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    input::plugin(app);
    movement::plugin(app);
    weapons::plugin(app);
    colliders::plugin(app);
    enemies::plugin(app);
    player::plugin(app);
    scoring::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
