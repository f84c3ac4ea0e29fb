use std::cell::Cell;
use std::rc::Rc;

use puffball::boss::{BossController, BossState};
use puffball::config::BossConfig;
use puffball::math::Vec2;
use puffball::store::{GameStore, StoreEvent};
use puffball::terrain::Terrain;

use rand::rngs::StdRng;
use rand::SeedableRng;

const FLOOR_Y: f32 = 560.0;
const DT: f32 = 33.0;

fn make_terrain() -> Terrain {
    Terrain::new(1600.0, FLOOR_Y)
}

fn make_boss(x: f32) -> BossController {
    BossController::new(x, FLOOR_Y - 28.0, BossConfig::default())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Action selection ──────────────────────────────────────────────────────────

#[test]
fn close_target_always_draws_the_hammer() {
    // Inside hammer range the pick is deterministic, RNG seed irrelevant.
    let terrain = make_terrain();
    let mut store = GameStore::new();
    let mut rng = seeded_rng();
    let mut boss = make_boss(500.0);
    let target = Vec2::new(450.0, FLOOR_Y - 22.0);

    // Burn through the 1500 ms idle delay.
    for _ in 0..50 {
        boss.update(target, DT, &mut rng, &terrain, &mut store);
        if boss.state != BossState::Idle {
            break;
        }
    }
    assert_eq!(boss.state, BossState::HammerSwing);
}

#[test]
fn hammer_hitbox_opens_late_in_the_swing() {
    let terrain = make_terrain();
    let mut store = GameStore::new();
    let mut rng = seeded_rng();
    let mut boss = make_boss(500.0);
    let target = Vec2::new(450.0, FLOOR_Y - 22.0);

    for _ in 0..50 {
        boss.update(target, DT, &mut rng, &terrain, &mut store);
        if boss.state == BossState::HammerSwing {
            break;
        }
    }
    assert_eq!(boss.state, BossState::HammerSwing);
    // 600 ms window, hitbox live only in the last 400 ms.
    assert!(boss.hammer_hitbox().is_none());

    for _ in 0..8 {
        boss.update(target, DT, &mut rng, &terrain, &mut store);
    }
    assert_eq!(boss.state, BossState::HammerSwing);
    assert!(boss.hammer_hitbox().is_some());
}

#[test]
fn distant_target_eventually_triggers_jump_and_shockwaves() {
    let terrain = make_terrain();
    let mut store = GameStore::new();
    let mut rng = seeded_rng();
    let mut boss = make_boss(800.0);
    let target = Vec2::new(200.0, FLOOR_Y - 22.0);

    let mut saw_super_jump = false;
    for _ in 0..20_000 {
        boss.update(target, DT, &mut rng, &terrain, &mut store);
        if boss.state == BossState::SuperJump {
            saw_super_jump = true;
        }
        if saw_super_jump && boss.state == BossState::Landing {
            break;
        }
    }
    assert!(saw_super_jump, "weighted pick never chose the jump");
    assert_eq!(boss.state, BossState::Landing);
    // One wave per direction.
    assert_eq!(boss.shockwaves.len(), 2);
}

#[test]
fn shockwaves_travel_outward_and_dissipate() {
    let terrain = make_terrain();
    let mut store = GameStore::new();
    let mut rng = seeded_rng();
    let mut boss = make_boss(800.0);
    let target = Vec2::new(200.0, FLOOR_Y - 22.0);

    for _ in 0..20_000 {
        boss.update(target, DT, &mut rng, &terrain, &mut store);
        if !boss.shockwaves.is_empty() {
            break;
        }
    }
    assert_eq!(boss.shockwaves.len(), 2);

    // 350 px/s capped at 300 px from origin: under 1 s to dissipate.
    for _ in 0..40 {
        boss.update(target, DT, &mut rng, &terrain, &mut store);
    }
    assert!(boss.shockwaves.is_empty());
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn damage_is_clamped_and_defeats_at_zero() {
    let mut store = GameStore::new();
    let mut boss = make_boss(800.0);

    boss.take_damage(150, &mut store);
    assert_eq!(boss.hp, 0);
    assert_eq!(boss.state, BossState::Defeated);
    assert!(!boss.is_alive());
    assert_eq!(store.boss_hp, Some((0, 100)));
}

#[test]
fn hp_zero_if_and_only_if_defeated() {
    let mut store = GameStore::new();
    let mut boss = make_boss(800.0);

    boss.take_damage(98, &mut store);
    assert_eq!(boss.hp, 2);
    assert_ne!(boss.state, BossState::Defeated);
}

#[test]
fn hits_are_rejected_inside_invincibility_window() {
    let terrain = make_terrain();
    let mut store = GameStore::new();
    let mut rng = seeded_rng();
    let mut boss = make_boss(800.0);
    let target = Vec2::new(200.0, FLOOR_Y - 22.0);

    boss.take_damage(2, &mut store);
    boss.take_damage(2, &mut store);
    assert_eq!(boss.hp, 98);

    // 500 ms window: 20 frames at 33 ms is past it.
    for _ in 0..20 {
        boss.update(target, DT, &mut rng, &terrain, &mut store);
    }
    boss.take_damage(2, &mut store);
    assert_eq!(boss.hp, 96);
}

#[test]
fn defeated_boss_ignores_further_damage() {
    let mut store = GameStore::new();
    let mut boss = make_boss(800.0);
    boss.take_damage(150, &mut store);

    // Wait out the post-hit invincibility by constructing the state
    // directly: Defeated alone must reject the hit.
    boss.take_damage(10, &mut store);
    assert_eq!(boss.hp, 0);
    assert_eq!(boss.state, BossState::Defeated);
}

#[test]
fn defeat_notification_fires_after_grace_period() {
    let terrain = make_terrain();
    let mut rng = seeded_rng();
    let mut boss = make_boss(800.0);
    let target = Vec2::new(200.0, FLOOR_Y - 22.0);

    let mut store = GameStore::new();
    let notified = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&notified);
    store.subscribe(move |e| {
        if *e == StoreEvent::BossDefeated {
            counter.set(counter.get() + 1);
        }
    });

    boss.take_damage(150, &mut store);
    assert_eq!(notified.get(), 0);

    // 2000 ms grace, then exactly one notification.
    for _ in 0..80 {
        boss.update(target, DT, &mut rng, &terrain, &mut store);
    }
    assert_eq!(notified.get(), 1);
}

// ── Facing ────────────────────────────────────────────────────────────────────

#[test]
fn boss_faces_the_target_while_idle() {
    let terrain = make_terrain();
    let mut store = GameStore::new();
    let mut rng = seeded_rng();
    let mut boss = make_boss(800.0);

    boss.update(
        Vec2::new(200.0, FLOOR_Y - 22.0),
        DT,
        &mut rng,
        &terrain,
        &mut store,
    );
    assert_eq!(boss.facing, puffball::entities::Facing::Left);

    boss.update(
        Vec2::new(1400.0, FLOOR_Y - 22.0),
        DT,
        &mut rng,
        &terrain,
        &mut store,
    );
    assert_eq!(boss.facing, puffball::entities::Facing::Right);
}
