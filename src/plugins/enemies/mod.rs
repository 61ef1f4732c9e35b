//! Enemies: pooled variants and their spawners.
//!
//! Each spawner owns a fixed pool of fully-composed, inactive enemy entities
//! of one variant, pre-spawned at scene start. A spawn is "find an inactive
//! slot round-robin and re-arm it": reset position, health, intent, the
//! scout's oscillation anchor and the fighter's weapon cooldown, then publish
//! `EnemyInit`. A destroy (collision or off-field cull) just parks the slot
//! again. Capacity never changes after construction, so the number of live
//! enemies per spawner is bounded by design.
//!
//! Spawner state machine per slot request:
//! ```text
//! Idle --initial delay--> Scheduled --interval--> Spawned --> Scheduled ...
//!                              |   (pool full: skip, stay Scheduled)
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::{SpawnerTuning, Tunables};
use crate::plugins::colliders::{deactivate_ship, Health, LifeState};
use crate::plugins::events::EnemyInit;
use crate::plugins::input::{self, Intent, ScoutBrain};
use crate::plugins::movement::{HorizontalMovement, VerticalMovement};
use crate::plugins::weapons::components::{BulletKind, Weapon};

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyVariant {
    /// Unarmed, drifts across the field while bouncing inside a vertical band.
    Scout,
    /// Dives straight down and fires on an interval.
    Fighter,
}

impl EnemyVariant {
    pub fn score(self, t: &Tunables) -> u32 {
        match self {
            Self::Scout => t.scout_score,
            Self::Fighter => t.fighter_score,
        }
    }

    fn hp(self, t: &Tunables) -> i32 {
        match self {
            Self::Scout => t.scout_hp,
            Self::Fighter => t.fighter_hp,
        }
    }

    /// Fighters enter from just above the top edge; scouts re-arm inside the
    /// field so their band is on screen.
    fn spawn_height(self, t: &Tunables) -> f32 {
        match self {
            Self::Scout => t.field_half.y - 80.0,
            Self::Fighter => t.field_half.y + 24.0,
        }
    }
}

/// Deterministic xorshift64* jitter for spawn X positions.
#[derive(Debug, Clone, Copy)]
struct SpawnRng(u64);

impl SpawnRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        let unit = ((self.next_u64() >> 40) as u32 as f32) / ((1u32 << 24) as f32);
        lo + (hi - lo) * unit
    }
}

#[derive(Component, Debug)]
pub struct EnemySpawner {
    pub variant: EnemyVariant,
    /// The fixed slot set; entities are parked here, never despawned.
    pool: Vec<Entity>,
    /// Round-robin start for the next slot scan.
    cursor: usize,
    delay: Timer,
    interval: Timer,
    rng: SpawnRng,
}

impl EnemySpawner {
    fn new(variant: EnemyVariant, tuning: &SpawnerTuning, pool: Vec<Entity>, seed: u64) -> Self {
        Self {
            variant,
            pool,
            cursor: 0,
            delay: Timer::from_seconds(tuning.initial_delay, TimerMode::Once),
            interval: Timer::from_seconds(tuning.interval, TimerMode::Repeating),
            rng: SpawnRng::new(seed),
        }
    }

    pub fn pool(&self) -> &[Entity] {
        &self.pool
    }
}

fn active_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [Layer::Player, Layer::PlayerBullet])
}

fn inactive_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_spawners);

    // Activation before steering: a freshly-armed scout is steered the same
    // tick it appears.
    app.add_systems(
        FixedUpdate,
        (
            spawn_enemies.before(input::scout_steer),
            cull_escaped_enemies,
        )
            .run_if(in_state(GameState::InGame)),
    );
}

// -----------------------------------------------------------------------------
// Pool construction
// -----------------------------------------------------------------------------

pub fn spawn_spawners(mut commands: Commands, tunables: Res<Tunables>) {
    spawn_one(&mut commands, &tunables, EnemyVariant::Scout, 0x9E37_79B9_7F4A_7C15);
    spawn_one(&mut commands, &tunables, EnemyVariant::Fighter, 0xD1B5_4A32_D192_ED03);
}

fn spawn_one(commands: &mut Commands, t: &Tunables, variant: EnemyVariant, seed: u64) {
    let tuning = match variant {
        EnemyVariant::Scout => t.scout_spawner,
        EnemyVariant::Fighter => t.fighter_spawner,
    };

    let pool = (0..tuning.capacity)
        .map(|i| spawn_pooled_enemy(commands, t, variant, i))
        .collect();

    commands.spawn((
        Name::new(format!("{variant:?}Spawner")),
        EnemySpawner::new(variant, &tuning, pool, seed),
        DespawnOnExit(GameState::InGame),
    ));
}

fn spawn_pooled_enemy(
    commands: &mut Commands,
    t: &Tunables,
    variant: EnemyVariant,
    slot: usize,
) -> Entity {
    let (color, size) = match variant {
        EnemyVariant::Scout => (Color::srgb(0.4, 0.9, 0.5), 22.0),
        EnemyVariant::Fighter => (Color::srgb(0.9, 0.35, 0.3), 26.0),
    };

    let mut e = commands.spawn((
        (
            Name::new(format!("{variant:?}(Pooled){slot}")),
            Enemy,
            variant,
            Intent::NONE,
            LifeState::Inactive,
            Health { hp: variant.hp(t) },
            Sprite {
                color,
                custom_size: Some(Vec2::splat(size)),
                ..default()
            },
            // Parked well above the field until a spawner re-arms the slot.
            Transform::from_xyz(0.0, t.field_half.y + 200.0, 1.0),
            Visibility::Hidden,
        ),
        (
            RigidBody::Kinematic,
            Collider::circle(size * 0.5),
            Sensor,
            inactive_enemy_layers(),
            LinearVelocity(Vec2::ZERO),
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ),
    ));

    match variant {
        EnemyVariant::Scout => e.insert((
            ScoutBrain::new(t.scout_max_y),
            HorizontalMovement { speed: t.scout_speed_x },
            VerticalMovement { speed: t.scout_speed_y },
        )),
        EnemyVariant::Fighter => e.insert((
            VerticalMovement { speed: t.fighter_speed },
            Weapon::new(BulletKind::Enemy, t.fighter_weapon),
        )),
    };

    e.id()
}

// -----------------------------------------------------------------------------
// Spawn schedule
// -----------------------------------------------------------------------------

type EnemySlot = (
    &'static EnemyVariant,
    &'static mut LifeState,
    &'static mut Health,
    &'static mut Transform,
    &'static mut Visibility,
    &'static mut CollisionLayers,
    &'static mut LinearVelocity,
    &'static mut Intent,
    Option<&'static mut ScoutBrain>,
    Option<&'static mut Weapon>,
);

/// Tick spawn schedules and re-arm one slot per due spawner.
pub fn spawn_enemies(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut q_spawners: Query<&mut EnemySpawner>,
    mut q_pool: Query<EnemySlot, With<Enemy>>,
) {
    for mut spawner in &mut q_spawners {
        spawner.delay.tick(time.delta());
        if !spawner.delay.is_finished() {
            continue;
        }

        // First spawn fires at the end of the initial delay, then the
        // repeating interval takes over.
        let due = if spawner.delay.just_finished() {
            true
        } else {
            spawner.interval.tick(time.delta());
            spawner.interval.just_finished()
        };
        if !due {
            continue;
        }

        try_activate(&mut spawner, &tunables, &mut q_pool, &mut commands);
    }
}

fn try_activate(
    spawner: &mut EnemySpawner,
    tunables: &Tunables,
    q_pool: &mut Query<EnemySlot, With<Enemy>>,
    commands: &mut Commands,
) {
    let len = spawner.pool.len();

    let mut slot = None;
    for i in 0..len {
        let idx = (spawner.cursor + i) % len;
        let e = spawner.pool[idx];
        if q_pool.get(e).is_ok_and(|(_, life, ..)| !life.is_active()) {
            slot = Some((idx, e));
            break;
        }
    }
    // Every slot active: skip this tick silently, retry next interval.
    let Some((idx, enemy)) = slot else {
        return;
    };
    spawner.cursor = (idx + 1) % len;

    let (variant, mut life, mut hp, mut tf, mut vis, mut layers, mut vel, mut intent, brain, weapon) =
        q_pool
            .get_mut(enemy)
            .expect("spawner pool contained an entity missing enemy components");

    let margin = 24.0;
    let x = spawner
        .rng
        .range_f32(-tunables.field_half.x + margin, tunables.field_half.x - margin);
    let y = variant.spawn_height(tunables);

    *life = LifeState::Active;
    hp.hp = variant.hp(tunables);
    tf.translation = Vec3::new(x, y, 1.0);
    *vis = Visibility::Visible;
    *layers = active_enemy_layers();
    vel.0 = Vec2::ZERO;
    *intent = match variant {
        EnemyVariant::Scout => Intent::scout_initial(),
        EnemyVariant::Fighter => Intent::fighter(),
    };

    // Pooled reuse: the previous life's anchor and cooldown must not leak.
    if let Some(mut brain) = brain {
        brain.rebase(y);
    }
    if let Some(mut weapon) = weapon {
        weapon.reset_cooldown();
    }

    debug!("spawned {variant:?} at ({x:.0}, {y:.0})");
    commands.trigger(EnemyInit { enemy });
}

// -----------------------------------------------------------------------------
// Off-field cull
// -----------------------------------------------------------------------------

/// Park enemies that left the play field.
///
/// No event and no score: an escaped enemy is not a kill. Without this the
/// pools would drain to nothing, since slots only free up on deactivation.
pub fn cull_escaped_enemies(
    tunables: Res<Tunables>,
    mut q: Query<
        (
            &Transform,
            &mut LifeState,
            &mut CollisionLayers,
            &mut LinearVelocity,
            &mut Visibility,
        ),
        With<Enemy>,
    >,
) {
    let margin = 40.0;
    let floor = -tunables.field_half.y - margin;
    let side = tunables.field_half.x + margin;

    for (tf, mut life, mut layers, mut vel, mut vis) in &mut q {
        if !life.is_active() {
            continue;
        }
        let p = tf.translation;
        if p.y < floor || p.x.abs() > side {
            deactivate_ship(&mut life, &mut layers, &mut vel, &mut vis);
        }
    }
}
