use std::fs;
use std::time::{Duration, Instant};

use outpost_defence_core::GridPoint;
use outpost_defence_logging::EventLog;
use outpost_defence_pool::{query, EnemyPool};
use outpost_defence_system_tower_combat::{Config, TowerCombat};

const RATE: Duration = Duration::from_millis(50);

#[test]
fn firing_pipeline_records_shots_through_the_event_log() {
    let path = std::env::temp_dir().join(format!(
        "outpost-defence-tower-combat-{}.log",
        std::process::id()
    ));
    let log = EventLog::create(&path);
    assert!(log.is_enabled());

    let start = Instant::now();
    let mut tower = TowerCombat::new(Config::new(GridPoint::new(10, 10), 15, RATE), start);
    let mut pool = EnemyPool::new(4);
    let near = pool.spawn(GridPoint::new(5, 5));
    let _ = pool.spawn(GridPoint::new(30, 30));

    let mut bullets = Vec::new();
    tower.handle(start + RATE, &query::enemy_view(&pool), &log, &mut bullets);
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].heading, GridPoint::new(-1, -1));

    // The struck enemy leaves play; the far one is out of range, so the
    // next ready frame goes quiet.
    pool.despawn(near);
    tower.handle(
        start + RATE + RATE,
        &query::enemy_view(&pool),
        &log,
        &mut bullets,
    );
    assert_eq!(bullets.len(), 1, "remaining enemy is beyond range 15");

    // Manual fire with auto-fire disabled picks the other message.
    tower.set_auto_fire(false);
    let _ = pool.spawn(GridPoint::new(12, 10));
    tower.manual_fire(
        start + RATE + RATE,
        &query::enemy_view(&pool),
        &log,
        &mut bullets,
    );
    assert_eq!(bullets.len(), 2);

    log.flush();
    let contents = fs::read_to_string(&path).expect("log file");
    let messages: Vec<&str> = contents
        .lines()
        .map(|line| line.split_at(20).1)
        .collect();
    assert_eq!(
        messages,
        vec!["Auto fired at enemy", "Manual fired at enemy"],
        "each successful shot must leave exactly one line"
    );

    log.shutdown();
    let _ = fs::remove_file(&path);
}
