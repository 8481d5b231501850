#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Outpost Defence runtime.
//!
//! This crate defines the value types that connect the entity pool, the
//! pure gameplay systems, and the adapters: grid coordinates, stable enemy
//! identifiers, fired projectiles, and the read-only enemy snapshots that
//! systems consume. Nothing in here owns state or performs I/O; the types
//! are plain data handed across crate boundaries.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Outpost Defence.";

/// Location on the console grid expressed as signed x and y coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    x: i32,
    y: i32,
}

impl GridPoint {
    /// Creates a new grid point at the provided coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the point.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate of the point.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between this point and `other`.
    #[must_use]
    pub const fn manhattan_distance(&self, other: GridPoint) -> u64 {
        self.x.abs_diff(other.x) as u64 + self.y.abs_diff(other.y) as u64
    }

    /// Derives the unit step that moves one cell from this point toward
    /// `other`, clamped to -1, 0, or 1 on each axis independently.
    #[must_use]
    pub const fn step_toward(&self, other: GridPoint) -> GridPoint {
        GridPoint {
            x: (other.x as i64 - self.x as i64).signum() as i32,
            y: (other.y as i64 - self.y as i64).signum() as i32,
        }
    }

    /// Returns the point displaced by the provided delta.
    #[must_use]
    pub const fn translated(&self, delta: GridPoint) -> GridPoint {
        GridPoint {
            x: self.x.wrapping_add(delta.x),
            y: self.y.wrapping_add(delta.y),
        }
    }
}

/// Stable identifier naming one slot of enemy storage inside the pool.
///
/// Identifiers are reused after a despawn: the pool hands slots back out in
/// first-in-first-out order, so holding an id past its despawn may observe
/// a later occupant. Pool operations treat stale ids as silent no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Projectile emitted by a tower toward an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bullet {
    /// Cell the bullet starts from, which is the firing tower's position.
    pub origin: GridPoint,
    /// Per-axis unit step the bullet travels along each frame.
    pub heading: GridPoint,
}

impl Bullet {
    /// Creates a bullet launched from `origin` along `heading`.
    #[must_use]
    pub const fn new(origin: GridPoint, heading: GridPoint) -> Self {
        Self { origin, heading }
    }
}

/// Read-only capture of one active enemy's state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier of the captured enemy.
    pub id: EnemyId,
    /// Cell the enemy occupied when the snapshot was taken.
    pub position: GridPoint,
    /// Scalar speed the enemy was travelling at.
    pub velocity: f32,
    /// Cell the enemy was moving toward.
    pub target: GridPoint,
}

/// Read-only view over the active enemies, in spawn order.
///
/// Pure systems consume this instead of borrowing the pool directly, so a
/// system can never mutate pool bookkeeping behind the game loop's back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Builds a view from pre-captured snapshots.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<EnemySnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the view captured no enemies at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
