use outpost_defence_core::GridPoint;
use outpost_defence_pool::{query, EnemyPool};

fn assert_counts_consistent(pool: &EnemyPool) {
    assert_eq!(
        pool.pool_size(),
        pool.active_count() + pool.inactive_count(),
        "pool size must equal active plus inactive counts"
    );
    assert_eq!(pool.active_count(), pool.active_enemies().len());
}

#[test]
fn prewarm_creates_only_inactive_enemies() {
    let pool = EnemyPool::new(10);

    assert_eq!(pool.pool_size(), 10);
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.inactive_count(), 10);
    assert!(pool.active_enemies().is_empty());
    assert_counts_consistent(&pool);
}

#[test]
fn spawn_despawn_respawn_reuses_prewarmed_slots() {
    let mut pool = EnemyPool::new(10);

    let first = pool.spawn(GridPoint::new(5, 5));
    let second = pool.spawn(GridPoint::new(10, 10));
    assert_ne!(first, second, "spawns must hand out distinct slots");
    assert_eq!(pool.pool_size(), 10, "prewarmed slots should be reused");
    assert_eq!(pool.active_count(), 2);
    assert_counts_consistent(&pool);

    pool.despawn(first);
    assert_eq!(pool.active_count(), 1);
    assert_counts_consistent(&pool);

    let third = pool.spawn(GridPoint::new(1, 1));
    assert_eq!(pool.active_count(), 2);
    assert_eq!(pool.pool_size(), 10, "respawn must not grow the arena");
    assert!(pool.is_active(third));
    assert_counts_consistent(&pool);
}

#[test]
fn reuse_order_is_first_despawned_first() {
    let mut pool = EnemyPool::new(4);

    let spawned: Vec<_> = (0..4)
        .map(|i| pool.spawn(GridPoint::new(i, 0)))
        .collect();
    assert_eq!(pool.inactive_count(), 0);

    // Despawn the first three in spawn order; the free queue now holds
    // them oldest-first.
    pool.despawn(spawned[0]);
    pool.despawn(spawned[1]);
    pool.despawn(spawned[2]);

    let reused = pool.spawn(GridPoint::new(9, 9));
    assert_eq!(
        reused, spawned[0],
        "spawn must reuse the slot despawned first, not the most recent"
    );
    assert_eq!(pool.spawn(GridPoint::new(9, 9)), spawned[1]);
    assert_eq!(pool.spawn(GridPoint::new(9, 9)), spawned[2]);
    assert_counts_consistent(&pool);
}

#[test]
fn spawn_never_hands_out_a_slot_that_is_still_active() {
    let mut pool = EnemyPool::new(3);
    let mut live = vec![
        pool.spawn(GridPoint::new(0, 0)),
        pool.spawn(GridPoint::new(1, 0)),
        pool.spawn(GridPoint::new(2, 0)),
    ];

    // Churn through despawns and respawns; an id handed out by spawn must
    // never already be present in the active set.
    for step in 0..10 {
        pool.despawn(live.remove(0));
        let before = pool.active_enemies();
        let id = pool.spawn(GridPoint::new(step, step));
        assert!(
            !before.contains(&id),
            "spawn returned an id that was still active: {id:?}"
        );
        live.push(id);
        assert_counts_consistent(&pool);
    }
}

#[test]
fn spawning_past_the_prewarm_grows_by_one_each_time() {
    let mut pool = EnemyPool::new(2);

    let _ = pool.spawn(GridPoint::new(0, 0));
    let _ = pool.spawn(GridPoint::new(1, 0));
    assert_eq!(pool.pool_size(), 2);

    let overflow_a = pool.spawn(GridPoint::new(2, 0));
    assert_eq!(pool.pool_size(), 3, "exhausted pool must allocate one slot");
    let overflow_b = pool.spawn(GridPoint::new(3, 0));
    assert_eq!(pool.pool_size(), 4);
    assert_ne!(overflow_a, overflow_b);
    assert_counts_consistent(&pool);
}

#[test]
fn despawning_inactive_or_unknown_ids_changes_nothing() {
    let mut pool = EnemyPool::new(3);
    let id = pool.spawn(GridPoint::new(0, 0));
    pool.despawn(id);

    let size = pool.pool_size();
    let active = pool.active_count();
    let inactive = pool.inactive_count();

    // Already despawned.
    pool.despawn(id);
    // Never spawned.
    pool.despawn(outpost_defence_core::EnemyId::new(999));

    assert_eq!(pool.pool_size(), size);
    assert_eq!(pool.active_count(), active);
    assert_eq!(pool.inactive_count(), inactive);
    assert_counts_consistent(&pool);
}

#[test]
fn clear_recycles_every_active_enemy() {
    let mut pool = EnemyPool::new(5);
    let kept_inactive = pool.inactive_count();
    let spawned: Vec<_> = (0..3)
        .map(|i| pool.spawn(GridPoint::new(i, i)))
        .collect();
    assert_eq!(pool.inactive_count(), kept_inactive - 3);

    pool.clear();

    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.pool_size(), 5);
    assert_eq!(pool.inactive_count(), 5);
    for id in &spawned {
        assert!(!pool.is_active(*id), "cleared enemies must be inactive");
        assert!(pool.get(*id).is_none());
    }
    assert_counts_consistent(&pool);
}

#[test]
fn active_snapshot_survives_later_mutations() {
    let mut pool = EnemyPool::new(2);
    let first = pool.spawn(GridPoint::new(0, 0));
    let second = pool.spawn(GridPoint::new(1, 1));

    let snapshot = pool.active_enemies();
    assert_eq!(snapshot, vec![first, second]);

    pool.despawn(first);
    pool.clear();

    assert_eq!(
        snapshot,
        vec![first, second],
        "a returned snapshot must not track later pool mutations"
    );
}

#[test]
fn counts_stay_consistent_across_mixed_operations() {
    let mut pool = EnemyPool::new(3);
    let mut live = Vec::new();

    for round in 0..6 {
        for i in 0..4 {
            live.push(pool.spawn(GridPoint::new(round, i)));
            assert_counts_consistent(&pool);
        }
        while live.len() > 2 {
            pool.despawn(live.remove(0));
            assert_counts_consistent(&pool);
        }
        if round % 3 == 2 {
            pool.clear();
            live.clear();
            assert_counts_consistent(&pool);
        }
    }
}

#[test]
fn enemy_view_captures_active_state_in_spawn_order() {
    let mut pool = EnemyPool::new(2);
    let first = pool.spawn(GridPoint::new(4, 4));
    let second = pool.spawn(GridPoint::new(8, 8));
    pool.get_mut(second)
        .expect("active enemy")
        .set_velocity(1.5);

    let view = query::enemy_view(&pool);
    let snapshots: Vec<_> = view.iter().copied().collect();

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].id, first);
    assert_eq!(snapshots[0].position, GridPoint::new(4, 4));
    assert_eq!(snapshots[1].id, second);
    assert_eq!(snapshots[1].velocity, 1.5);

    pool.despawn(first);
    let after = query::enemy_view(&pool);
    assert_eq!(after.len(), 1, "views reflect the pool at capture time");
    assert_eq!(snapshots.len(), 2, "earlier views are unaffected");
}
