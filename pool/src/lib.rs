#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Reusable enemy storage for the Outpost Defence runtime.
//!
//! The pool owns a fixed superset of enemy objects across spawn/despawn
//! cycles so the game loop never allocates per spawn once warmed up.
//! Storage lives in a slot arena indexed by [`EnemyId`]; two index
//! collections track which slots are in play and which are waiting for
//! reuse. Recycling is strictly first-in-first-out: the slot despawned
//! longest ago is the next one handed out.
//!
//! The pool carries no internal synchronization. It is owned and driven by
//! the game loop's thread; callers that ever need cross-thread access must
//! serialize it themselves.

use std::collections::VecDeque;

use outpost_defence_core::{EnemyId, GridPoint};

/// Mutable record representing one in-play or recyclable enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    position: GridPoint,
    velocity: f32,
    target: GridPoint,
    active: bool,
}

impl Enemy {
    const fn dormant() -> Self {
        Self {
            position: GridPoint::new(0, 0),
            velocity: 0.0,
            target: GridPoint::new(0, 0),
            active: false,
        }
    }

    /// Cell the enemy currently occupies.
    #[must_use]
    pub const fn position(&self) -> GridPoint {
        self.position
    }

    /// Moves the enemy to the provided cell.
    pub fn set_position(&mut self, position: GridPoint) {
        self.position = position;
    }

    /// Scalar speed the enemy travels at.
    #[must_use]
    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Updates the enemy's scalar speed.
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Cell the enemy is moving toward.
    #[must_use]
    pub const fn target(&self) -> GridPoint {
        self.target
    }

    /// Redirects the enemy toward the provided cell.
    pub fn set_target(&mut self, target: GridPoint) {
        self.target = target;
    }

    /// Whether the enemy is currently in play.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self, position: GridPoint) {
        self.active = true;
        self.position = position;
        self.velocity = 0.0;
        self.target = position;
    }

    fn reset(&mut self) {
        self.active = false;
        self.velocity = 0.0;
        self.target = self.position;
    }
}

/// Pool of enemy slots recycled across spawn/despawn cycles.
///
/// Every slot the pool ever creates stays a member of exactly one of two
/// disjoint index sets: `active` (in play, in spawn order) or `free`
/// (reset and awaiting reuse, in despawn order). Slots are only destroyed
/// when the pool itself is dropped.
#[derive(Debug)]
pub struct EnemyPool {
    slots: Vec<Enemy>,
    active: Vec<EnemyId>,
    free: VecDeque<EnemyId>,
}

impl EnemyPool {
    /// Creates a pool prewarmed with `minimum_pool_size` inactive enemies.
    ///
    /// No enemy is active after construction.
    #[must_use]
    pub fn new(minimum_pool_size: usize) -> Self {
        let mut pool = Self {
            slots: Vec::with_capacity(minimum_pool_size),
            active: Vec::new(),
            free: VecDeque::with_capacity(minimum_pool_size),
        };
        for _ in 0..minimum_pool_size {
            let id = pool.create_slot();
            pool.free.push_back(id);
        }
        pool
    }

    fn create_slot(&mut self) -> EnemyId {
        let id = EnemyId::new(self.slots.len() as u32);
        self.slots.push(Enemy::dormant());
        id
    }

    /// Activates an enemy at `position` and returns its identifier.
    ///
    /// Reuses the front of the free queue when one is available, so slots
    /// come back in the order they were despawned; otherwise the arena
    /// grows by one slot. The spawned enemy starts with zero velocity and
    /// targets its own position. Never fails.
    pub fn spawn(&mut self, position: GridPoint) -> EnemyId {
        let id = match self.free.pop_front() {
            Some(recycled) => recycled,
            None => self.create_slot(),
        };
        self.slots[id.get() as usize].activate(position);
        self.active.push(id);
        id
    }

    /// Deactivates the enemy named by `id` and queues its slot for reuse.
    ///
    /// The membership test is a linear scan of the active set. Ids that
    /// are out of range or not currently active are tolerated as silent
    /// no-ops; despawn never fails and never panics.
    pub fn despawn(&mut self, id: EnemyId) {
        let Some(index) = self.active.iter().position(|active| *active == id) else {
            return;
        };
        let _ = self.active.remove(index);
        self.slots[id.get() as usize].reset();
        self.free.push_back(id);
    }

    /// Resets every active enemy and moves all of them to the free queue.
    ///
    /// Active enemies join the queue in spawn order, behind any slots that
    /// were already waiting; those pre-existing entries are untouched.
    pub fn clear(&mut self) {
        for id in self.active.drain(..) {
            self.slots[id.get() as usize].reset();
            self.free.push_back(id);
        }
    }

    /// Total number of slots owned by the pool, active plus inactive.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }

    /// Number of enemies currently in play.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of reset slots waiting for reuse.
    #[must_use]
    pub fn inactive_count(&self) -> usize {
        self.free.len()
    }

    /// Snapshot of the active identifiers in spawn order.
    ///
    /// The returned vector is a copy; mutating the pool afterwards does
    /// not alter it.
    #[must_use]
    pub fn active_enemies(&self) -> Vec<EnemyId> {
        self.active.clone()
    }

    /// Whether `id` names an enemy that is currently in play.
    #[must_use]
    pub fn is_active(&self, id: EnemyId) -> bool {
        self.slot(id).map(Enemy::is_active).unwrap_or(false)
    }

    /// Borrows the enemy named by `id`, or `None` if it is not in play.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.slot(id).filter(|enemy| enemy.is_active())
    }

    /// Mutably borrows the enemy named by `id`, or `None` if it is not in
    /// play.
    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.slots
            .get_mut(id.get() as usize)
            .filter(|enemy| enemy.is_active())
    }

    fn slot(&self, id: EnemyId) -> Option<&Enemy> {
        self.slots.get(id.get() as usize)
    }
}

/// Query functions that capture read-only views of the pool.
pub mod query {
    use outpost_defence_core::{EnemySnapshot, EnemyView};

    use super::EnemyPool;

    /// Captures a read-only view of the active enemies in spawn order.
    #[must_use]
    pub fn enemy_view(pool: &EnemyPool) -> EnemyView {
        let snapshots = pool
            .active
            .iter()
            .map(|id| {
                let enemy = &pool.slots[id.get() as usize];
                EnemySnapshot {
                    id: *id,
                    position: enemy.position(),
                    velocity: enemy.velocity(),
                    target: enemy.target(),
                }
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_activates_with_cleared_motion_state() {
        let mut pool = EnemyPool::new(1);
        let id = pool.spawn(GridPoint::new(3, 4));

        let enemy = pool.get(id).expect("spawned enemy should be active");
        assert!(enemy.is_active());
        assert_eq!(enemy.position(), GridPoint::new(3, 4));
        assert_eq!(enemy.velocity(), 0.0);
        assert_eq!(enemy.target(), GridPoint::new(3, 4));
    }

    #[test]
    fn despawn_resets_toward_current_position() {
        let mut pool = EnemyPool::new(1);
        let id = pool.spawn(GridPoint::new(0, 0));
        {
            let enemy = pool.get_mut(id).expect("active enemy");
            enemy.set_position(GridPoint::new(7, 2));
            enemy.set_velocity(2.5);
            enemy.set_target(GridPoint::new(9, 9));
        }

        pool.despawn(id);

        assert!(!pool.is_active(id));
        let slot = pool.slot(id).expect("slot storage persists");
        assert_eq!(slot.velocity(), 0.0);
        assert_eq!(slot.target(), GridPoint::new(7, 2));
    }
}
