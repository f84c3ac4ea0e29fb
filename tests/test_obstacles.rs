use puffball::character::CharacterController;
use puffball::config::{InhaleConfig, PhysicsConfig};
use puffball::obstacles::{FoodKind, ObstacleManager, ObstacleRecord, PlatformPath};
use puffball::store::GameStore;

const DT: f32 = 33.0;
const GROUND_Y: f32 = 538.0;

fn make_character(x: f32, y: f32) -> CharacterController {
    CharacterController::new(x, y, PhysicsConfig::default(), InhaleConfig::default())
}

fn far_character() -> CharacterController {
    make_character(-10_000.0, -10_000.0)
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[test]
fn loader_accepts_kind_synonyms() {
    let mut manager = ObstacleManager::new();
    manager.load(&[
        ObstacleRecord {
            kind: "SPIKES".into(),
            x: 100.0,
            y: 550.0,
            ..Default::default()
        },
        ObstacleRecord {
            kind: "movingplatform".into(),
            x: 400.0,
            y: 440.0,
            path: Some("horizontal".into()),
            range: Some(100.0),
            ..Default::default()
        },
        ObstacleRecord {
            kind: "item".into(),
            x: 200.0,
            y: 530.0,
            food: Some("tomato".into()),
            ..Default::default()
        },
    ]);

    assert_eq!(manager.spikes.len(), 1);
    assert_eq!(manager.platforms.len(), 1);
    assert_eq!(manager.foods.len(), 1);
    assert_eq!(manager.foods[0].kind, FoodKind::Tomato);
}

#[test]
fn loader_skips_unknown_kinds() {
    let mut manager = ObstacleManager::new();
    manager.load(&[
        ObstacleRecord {
            kind: "warpstar".into(),
            x: 100.0,
            y: 100.0,
            ..Default::default()
        },
        ObstacleRecord {
            kind: "spike".into(),
            x: 200.0,
            y: 550.0,
            ..Default::default()
        },
    ]);

    assert_eq!(manager.spikes.len(), 1);
    assert_eq!(manager.platforms.len(), 0);
    assert_eq!(manager.foods.len(), 0);
}

// ── Moving platforms ──────────────────────────────────────────────────────────

#[test]
fn horizontal_platform_traverses_waits_and_reverses() {
    let mut manager = ObstacleManager::new();
    manager.add_platform(
        750.0,
        440.0,
        96.0,
        PlatformPath::Horizontal { range: 200.0 },
        80.0,
        500.0,
    );
    let mut character = far_character();
    let mut store = GameStore::new();

    // 200 px at 80 px/s = 2.5 s out; sample during the endpoint wait.
    for _ in 0..80 {
        manager.update(DT, &mut character, &mut store);
        let x = manager.platforms[0].x;
        assert!((749.9..=950.1).contains(&x));
    }
    assert!((manager.platforms[0].x - 950.0).abs() < 0.1);

    // 500 ms wait plus the 2.5 s return leg.
    for _ in 0..100 {
        manager.update(DT, &mut character, &mut store);
    }
    assert!((manager.platforms[0].x - 750.0).abs() < 0.1);
    assert_eq!(manager.platforms[0].y, 440.0);
}

#[test]
fn vertical_platform_accepts_negative_range() {
    let mut manager = ObstacleManager::new();
    manager.add_platform(
        1100.0,
        480.0,
        96.0,
        PlatformPath::Vertical { range: -160.0 },
        80.0,
        500.0,
    );
    let mut character = far_character();
    let mut store = GameStore::new();

    // Full upward leg: 160 px at 80 px/s = 2 s.
    for _ in 0..62 {
        manager.update(DT, &mut character, &mut store);
    }
    assert!((manager.platforms[0].y - 320.0).abs() < 0.1);
    assert_eq!(manager.platforms[0].x, 1100.0);
}

#[test]
fn circular_platform_orbits_its_origin() {
    let mut manager = ObstacleManager::new();
    manager.add_platform(
        600.0,
        400.0,
        64.0,
        PlatformPath::Circular { diameter: 100.0 },
        80.0,
        0.0,
    );
    let mut character = far_character();
    let mut store = GameStore::new();

    for _ in 0..600 {
        manager.update(DT, &mut character, &mut store);
        let p = &manager.platforms[0];
        let dx = p.x - 600.0;
        let dy = p.y - 400.0;
        let r = (dx * dx + dy * dy).sqrt();
        assert!((r - 50.0).abs() < 0.1, "platform left the circle: r={}", r);
    }
}

#[test]
fn riding_character_is_carried_along() {
    let mut manager = ObstacleManager::new();
    manager.add_platform(
        750.0,
        440.0,
        96.0,
        PlatformPath::Horizontal { range: 200.0 },
        80.0,
        500.0,
    );
    // Standing exactly on the platform's top edge.
    let mut character = make_character(750.0, 410.0);
    let mut store = GameStore::new();

    for _ in 0..30 {
        manager.update(DT, &mut character, &mut store);
    }
    let carried = character.position().x - 750.0;
    let platform_travel = manager.platforms[0].x - 750.0;
    assert!(carried > 0.0);
    assert!((carried - platform_travel).abs() < 0.5);
}

#[test]
fn standing_beside_platform_is_not_carried() {
    let mut manager = ObstacleManager::new();
    manager.add_platform(
        750.0,
        440.0,
        96.0,
        PlatformPath::Horizontal { range: 200.0 },
        80.0,
        500.0,
    );
    let mut character = make_character(750.0, GROUND_Y);
    let mut store = GameStore::new();

    for _ in 0..30 {
        manager.update(DT, &mut character, &mut store);
    }
    assert_eq!(character.position().x, 750.0);
}

// ── Spikes ────────────────────────────────────────────────────────────────────

#[test]
fn spike_contact_damages_once_per_window() {
    let mut manager = ObstacleManager::new();
    manager.add_spike(300.0, 550.0, 32.0);
    let mut character = make_character(300.0, GROUND_Y);
    let mut store = GameStore::new();

    manager.update(DT, &mut character, &mut store);
    assert_eq!(store.hp, store.max_hp - 1);

    // Still overlapping, but inside the invincibility window.
    manager.update(DT, &mut character, &mut store);
    assert_eq!(store.hp, store.max_hp - 1);
}

#[test]
fn spike_knockback_pushes_away() {
    let mut manager = ObstacleManager::new();
    manager.add_spike(300.0, 550.0, 32.0);
    // Slightly left of the spike centre.
    let mut character = make_character(290.0, GROUND_Y);
    let mut store = GameStore::new();

    manager.update(DT, &mut character, &mut store);
    assert!(character.state.vx < 0.0);
    assert!(character.state.vy < 0.0);
}

// ── Food ──────────────────────────────────────────────────────────────────────

#[test]
fn apple_heals_one_and_is_consumed() {
    let mut manager = ObstacleManager::new();
    manager.add_food(300.0, GROUND_Y, FoodKind::Apple);
    let mut character = make_character(300.0, GROUND_Y);
    let mut store = GameStore::new();
    store.damage(2);

    manager.update(DT, &mut character, &mut store);
    assert_eq!(store.hp, store.max_hp - 1);
    assert!(manager.foods.is_empty());

    // No double heal on the next frame.
    manager.update(DT, &mut character, &mut store);
    assert_eq!(store.hp, store.max_hp - 1);
}

#[test]
fn maxim_tomato_restores_to_full() {
    let mut manager = ObstacleManager::new();
    manager.add_food(300.0, GROUND_Y, FoodKind::MaximTomato);
    let mut character = make_character(300.0, GROUND_Y);
    let mut store = GameStore::new();
    store.damage(5);
    assert_eq!(store.hp, 1);

    manager.update(DT, &mut character, &mut store);
    assert_eq!(store.hp, store.max_hp);
}
