//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime and time;
//! - `StatesPlugin` backs the game state machine;
//! - `nova_raiders::game::configure_headless` installs the gameplay plugins.
//!
//! `TimeUpdateStrategy::ManualDuration` replaces the wall clock so every
//! `app.update()` advances simulated time by a known amount, which makes the
//! spawn/fire schedules deterministic.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub fn app_headless() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    nova_raiders::game::configure_headless(&mut app);
    // `App::update` does not run plugin `finish`/`cleanup`; the runner
    // normally does. Avian initializes its diagnostics resources there.
    app.finish();
    app.cleanup();
    app
}

/// Headless app whose clock advances by `step` per `update()`.
pub fn app_headless_stepped(step: Duration) -> App {
    let mut app = app_headless();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app
}
