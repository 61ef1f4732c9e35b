//! App composition.
//!
//! Two entry points share the gameplay wiring:
//! - `configure_full`: windowed app with rendering, what `cargo run` gets;
//! - `configure_headless`: gameplay only, for integration tests driving
//!   `app.update()` without a window or GPU.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::plugins;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Windowed configuration: DefaultPlugins, gameplay, render-only plugins.
pub fn configure_full(app: &mut App) {
    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Nova Raiders".into(),
            resolution: WindowResolution::new(560, 760),
            ..default()
        }),
        ..default()
    });

    app.add_plugins(default_plugins);

    configure_game(app);
    plugins::register_render(app);
}

/// Gameplay-only configuration. Callers provide the runner plugins
/// (`MinimalPlugins` + `StatesPlugin` in the test harness); nothing here
/// needs a window, assets, or a GPU.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
