#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that aims and fires a tower at nearby enemies.
//!
//! The system consumes read-only enemy views and emits [`Bullet`] values
//! into an out-parameter buffer; it never touches pool bookkeeping. All
//! clocks are passed in explicitly so tests control time completely.

use std::time::{Duration, Instant};

use outpost_defence_core::{Bullet, EnemySnapshot, EnemyView, GridPoint};
use outpost_defence_logging::EventLog;

/// Configuration parameters required to construct a tower.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    position: GridPoint,
    range: u64,
    rate_of_fire: Duration,
}

impl Config {
    /// Creates a new configuration from the tower's position, its
    /// inclusive Manhattan firing range, and the minimum delay between
    /// consecutive shots.
    #[must_use]
    pub const fn new(position: GridPoint, range: u64, rate_of_fire: Duration) -> Self {
        Self {
            position,
            range,
            rate_of_fire,
        }
    }
}

/// Tower combat system: rate-limited closest-enemy firing.
#[derive(Debug)]
pub struct TowerCombat {
    config: Config,
    last_fire: Instant,
    auto_fire: bool,
}

impl TowerCombat {
    /// Creates a new tower with auto-fire enabled.
    ///
    /// The cooldown is anchored at `now`, so the tower holds fire for one
    /// full rate-of-fire interval after construction.
    #[must_use]
    pub fn new(config: Config, now: Instant) -> Self {
        Self {
            config,
            last_fire: now,
            auto_fire: true,
        }
    }

    /// Cell the tower occupies.
    #[must_use]
    pub const fn position(&self) -> GridPoint {
        self.config.position
    }

    /// Whether the tower fires on its own during [`TowerCombat::handle`].
    #[must_use]
    pub const fn auto_fire(&self) -> bool {
        self.auto_fire
    }

    /// Enables or disables automatic firing.
    pub fn set_auto_fire(&mut self, auto_fire: bool) {
        self.auto_fire = auto_fire;
    }

    /// Runs one combat frame: when auto-fire is enabled, attempt a shot
    /// at the closest enemy in view.
    pub fn handle(
        &mut self,
        now: Instant,
        enemies: &EnemyView,
        log: &EventLog,
        out: &mut Vec<Bullet>,
    ) {
        if self.auto_fire {
            self.attempt_shot(now, enemies, log, out);
        }
    }

    /// Attempts a single shot regardless of the auto-fire setting.
    ///
    /// The cooldown still applies: manual fire cannot exceed the
    /// configured rate of fire.
    pub fn manual_fire(
        &mut self,
        now: Instant,
        enemies: &EnemyView,
        log: &EventLog,
        out: &mut Vec<Bullet>,
    ) {
        self.attempt_shot(now, enemies, log, out);
    }

    fn attempt_shot(
        &mut self,
        now: Instant,
        enemies: &EnemyView,
        log: &EventLog,
        out: &mut Vec<Bullet>,
    ) {
        if now.duration_since(self.last_fire) < self.config.rate_of_fire {
            return;
        }

        let Some(target) = self.closest_enemy(enemies) else {
            return;
        };

        if self.config.position.manhattan_distance(target.position) > self.config.range {
            return;
        }

        let heading = self.config.position.step_toward(target.position);
        out.push(Bullet::new(self.config.position, heading));
        self.last_fire = now;

        log.log(if self.auto_fire {
            "Auto fired at enemy"
        } else {
            "Manual fired at enemy"
        });
    }

    /// Selects the enemy nearest the tower by Manhattan distance.
    ///
    /// Ties keep the earliest snapshot in view order.
    #[must_use]
    pub fn closest_enemy<'view>(&self, enemies: &'view EnemyView) -> Option<&'view EnemySnapshot> {
        let mut best: Option<(&EnemySnapshot, u64)> = None;
        for candidate in enemies.iter() {
            let distance = self.config.position.manhattan_distance(candidate.position);
            let closer = match best {
                Some((_, best_distance)) => distance < best_distance,
                None => true,
            };
            if closer {
                best = Some((candidate, distance));
            }
        }
        best.map(|(snapshot, _)| snapshot)
    }
}
