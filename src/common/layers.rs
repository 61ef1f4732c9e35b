use avian2d::prelude::*;

/// Collision layers.
///
/// Membership never changes over an entity's lifetime; pooled entities are
/// "disabled" by clearing their *filters* instead (see the weapons/enemies
/// pooling code).
#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
}
