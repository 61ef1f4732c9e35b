use bevy::prelude::*;

use crate::common::tunables::WeaponTuning;

/// Which side fired the bullet. Decides collision layers, and thereby who
/// the bullet can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletKind {
    Player,
    Enemy,
}

/// A ship's weapon: fire-rate gate plus an owned pool of pooled bullets.
///
/// The free list is touched by exactly two systems — the fire system pops,
/// the return commit pushes — so pool mutation never needs coordination.
#[derive(Component, Debug)]
pub struct Weapon {
    pub kind: BulletKind,
    pub tuning: WeaponTuning,
    /// Seconds accumulated since the last shot.
    cooldown: f32,
    /// Inactive bullets owned by this weapon.
    free: Vec<Entity>,
}

impl Weapon {
    pub fn new(kind: BulletKind, tuning: WeaponTuning) -> Self {
        Self {
            kind,
            tuning,
            cooldown: 0.0,
            free: Vec::with_capacity(tuning.capacity),
        }
    }

    /// Advance the cooldown clock.
    #[inline]
    pub fn tick(&mut self, dt: f32) {
        self.cooldown += dt;
    }

    /// At least `fire_interval` has elapsed since the last shot.
    #[inline]
    pub fn ready(&self) -> bool {
        self.cooldown >= self.tuning.fire_interval
    }

    /// Restart the interval, on firing or on respawn of the owning ship.
    #[inline]
    pub fn reset_cooldown(&mut self) {
        self.cooldown = 0.0;
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<Entity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, bullet: Entity) {
        debug_assert!(
            self.free.len() < self.tuning.capacity,
            "weapon free list grew past its pool capacity"
        );
        self.free.push(bullet);
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }
}

/// Marker for pool members, carrying the non-owning back-reference to the
/// weapon that owns the slot.
#[derive(Component, Debug, Clone, Copy)]
pub struct PooledBullet {
    pub weapon: Entity,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

impl BulletState {
    /// Take the bullet out of play. The return commit recycles it into its
    /// weapon's free list at the end of the tick.
    #[inline]
    pub fn retire(&mut self) {
        *self = Self::PendingReturn;
    }
}

/// Self-expiry clock, restarted on every activation.
#[derive(Component, Deref, DerefMut)]
pub struct BulletLife(pub Timer);
