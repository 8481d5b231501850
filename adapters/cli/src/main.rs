#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Outpost Defence console experience.
//!
//! Everything here is glue: a fixed tower defends the centre of the grid
//! while waves of enemies march in from the perimeter. The adapter owns
//! the frame loop and the straight-line bullet/enemy arithmetic; the pool
//! and the event log provide the runtime underneath.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use outpost_defence_core::{Bullet, GridPoint, WELCOME_BANNER};
use outpost_defence_logging::EventLog;
use outpost_defence_pool::{query, EnemyPool};
use outpost_defence_system_tower_combat::{Config, TowerCombat};

const TOWER_POSITION: GridPoint = GridPoint::new(10, 10);
const TOWER_RANGE: u64 = 12;
const TOWER_RATE_OF_FIRE: Duration = Duration::from_millis(250);
const ENEMY_SPEED: f32 = 1.0;
const SPAWN_POINTS: [GridPoint; 4] = [
    GridPoint::new(0, 0),
    GridPoint::new(20, 0),
    GridPoint::new(20, 20),
    GridPoint::new(0, 20),
];

/// Command-line arguments controlling the console run.
#[derive(Debug, Parser)]
#[command(name = "outpost-defence")]
struct Args {
    /// Path of the append-only event log produced by the run.
    #[arg(long, default_value = "log.txt")]
    log_file: PathBuf,

    /// Number of enemy slots to prewarm in the pool.
    #[arg(long, default_value_t = 10)]
    pool_size: usize,

    /// Number of frames to simulate before exiting.
    #[arg(long, default_value_t = 240)]
    frames: u32,

    /// Frames between two enemy spawns.
    #[arg(long, default_value_t = 20)]
    spawn_every: u32,

    /// Real-time duration of one frame in milliseconds; zero runs flat out.
    #[arg(long, default_value_t = 16)]
    frame_millis: u64,
}

/// Entry point for the Outpost Defence command-line interface.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    println!("{WELCOME_BANNER}");

    let log = EventLog::create(&args.log_file);
    let mut pool = EnemyPool::new(args.pool_size);
    let mut tower = TowerCombat::new(
        Config::new(TOWER_POSITION, TOWER_RANGE, TOWER_RATE_OF_FIRE),
        Instant::now(),
    );

    let mut bullets: Vec<Bullet> = Vec::new();
    let mut spawned = 0usize;
    let mut downed = 0usize;
    let mut breaches = 0usize;

    log.log("Run started");
    for frame in 0..args.frames {
        if frame % args.spawn_every.max(1) == 0 {
            spawn_enemy(&mut pool, spawned);
            spawned += 1;
        }

        breaches += advance_enemies(&mut pool);
        downed += advance_bullets(&mut bullets, &mut pool);

        tower.handle(Instant::now(), &query::enemy_view(&pool), &log, &mut bullets);

        if frame % 60 == 0 {
            log.log(&format!(
                "Frame {frame}: pool size {} active {} inactive {}",
                pool.pool_size(),
                pool.active_count(),
                pool.inactive_count()
            ));
        }

        if args.frame_millis > 0 {
            thread::sleep(Duration::from_millis(args.frame_millis));
        }
    }

    log.log(&format!(
        "Run finished: {spawned} spawned, {downed} downed, {breaches} breached"
    ));
    log.flush();

    let recorded = fs::read_to_string(&args.log_file)
        .with_context(|| format!("failed to read back {}", args.log_file.display()))?
        .lines()
        .count();
    println!(
        "{} frames simulated: {spawned} enemies spawned, {downed} downed, \
         {breaches} breached, pool size {} ({} recycled slots ready), \
         {recorded} log lines in {}",
        args.frames,
        pool.pool_size(),
        pool.inactive_count(),
        args.log_file.display()
    );

    log.shutdown();
    Ok(())
}

/// Activates one enemy at the next perimeter spawn point, marching on the
/// tower.
fn spawn_enemy(pool: &mut EnemyPool, index: usize) {
    let id = pool.spawn(SPAWN_POINTS[index % SPAWN_POINTS.len()]);
    if let Some(enemy) = pool.get_mut(id) {
        enemy.set_target(TOWER_POSITION);
        enemy.set_velocity(ENEMY_SPEED);
    }
}

/// Steps every moving enemy one cell toward its target; an enemy that
/// reaches the tower cell breaches and leaves play. Returns the number of
/// breaches.
fn advance_enemies(pool: &mut EnemyPool) -> usize {
    let mut breached = Vec::new();
    for id in pool.active_enemies() {
        let Some(enemy) = pool.get_mut(id) else {
            continue;
        };
        if enemy.velocity() <= 0.0 {
            continue;
        }
        let step = enemy.position().step_toward(enemy.target());
        enemy.set_position(enemy.position().translated(step));
        if enemy.position() == TOWER_POSITION {
            breached.push(id);
        }
    }
    let count = breached.len();
    for id in breached {
        pool.despawn(id);
    }
    count
}

/// Flies every bullet one cell along its heading, downing any enemy whose
/// cell it lands on. Bullets leaving the tower's range expire. Returns
/// the number of enemies downed.
fn advance_bullets(bullets: &mut Vec<Bullet>, pool: &mut EnemyPool) -> usize {
    let mut downed = 0usize;
    let mut index = 0;
    while index < bullets.len() {
        let bullet = &mut bullets[index];
        bullet.origin = bullet.origin.translated(bullet.heading);
        let position = bullet.origin;

        let hit = pool
            .active_enemies()
            .into_iter()
            .find(|id| pool.get(*id).map(|enemy| enemy.position()) == Some(position));
        if let Some(id) = hit {
            pool.despawn(id);
            downed += 1;
            let _ = bullets.swap_remove(index);
            continue;
        }

        if TOWER_POSITION.manhattan_distance(position) > TOWER_RANGE {
            let _ = bullets.swap_remove(index);
            continue;
        }

        index += 1;
    }
    downed
}
