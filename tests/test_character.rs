use puffball::character::CharacterController;
use puffball::config::{HOVER_BUDGET, InhaleConfig, PhysicsConfig, SCORE_CAPTURE, SCORE_SPIT};
use puffball::entities::{CopyAbility, EnemyKind, EnemyRegistry, MotionState, StarProjectile};
use puffball::input::FrameCommand;
use puffball::store::GameStore;
use puffball::terrain::Terrain;

const FLOOR_Y: f32 = 560.0;
const GROUND_Y: f32 = FLOOR_Y - 22.0;
const DT: f32 = 33.0;

struct Fixture {
    character: CharacterController,
    terrain: Terrain,
    enemies: EnemyRegistry,
    store: GameStore,
    stars: Vec<StarProjectile>,
}

fn fixture() -> Fixture {
    Fixture {
        character: CharacterController::new(
            300.0,
            GROUND_Y,
            PhysicsConfig::default(),
            InhaleConfig::default(),
        ),
        terrain: Terrain::new(1600.0, FLOOR_Y),
        enemies: EnemyRegistry::new(),
        store: GameStore::new(),
        stars: Vec::new(),
    }
}

impl Fixture {
    fn step(&mut self, cmd: FrameCommand) {
        self.character.update(
            &cmd,
            DT,
            &self.terrain,
            &[],
            &mut self.enemies,
            &mut self.store,
            &mut self.stars,
        );
    }
}

fn neutral() -> FrameCommand {
    FrameCommand::default()
}

fn holding_jump() -> FrameCommand {
    FrameCommand {
        jump: true,
        ..neutral()
    }
}

fn pressing_jump() -> FrameCommand {
    FrameCommand {
        jump: true,
        jump_pressed: true,
        ..neutral()
    }
}

fn holding_action() -> FrameCommand {
    FrameCommand {
        action: true,
        ..neutral()
    }
}

fn pressing_action() -> FrameCommand {
    FrameCommand {
        action: true,
        action_pressed: true,
        ..neutral()
    }
}

// ── Movement states ───────────────────────────────────────────────────────────

#[test]
fn walking_and_back_to_idle() {
    let mut f = fixture();
    f.step(FrameCommand {
        move_x: 1.0,
        ..neutral()
    });
    assert_eq!(f.character.state.motion_state, MotionState::Walking);
    assert!(f.character.state.x > 300.0);

    f.step(neutral());
    assert_eq!(f.character.state.motion_state, MotionState::Idle);
}

#[test]
fn facing_follows_move_direction() {
    let mut f = fixture();
    f.step(FrameCommand {
        move_x: -1.0,
        ..neutral()
    });
    assert_eq!(f.character.state.facing, puffball::entities::Facing::Left);
}

#[test]
fn jump_leaves_the_ground() {
    let mut f = fixture();
    f.step(pressing_jump());
    assert_eq!(f.character.state.motion_state, MotionState::Jumping);
    assert!(f.character.state.vy < 0.0);
    assert!(!f.character.state.grounded);
}

#[test]
fn jump_turns_into_fall_at_apex() {
    let mut f = fixture();
    f.step(pressing_jump());
    // Gravity (800 px/s²) erases the -350 launch in well under a second.
    for _ in 0..40 {
        f.step(neutral());
        if f.character.state.motion_state == MotionState::Falling {
            return;
        }
    }
    panic!("never transitioned JUMPING -> FALLING");
}

// ── Hover ─────────────────────────────────────────────────────────────────────

#[test]
fn second_press_in_air_starts_hover() {
    let mut f = fixture();
    f.step(pressing_jump());
    f.step(pressing_jump());
    assert_eq!(f.character.state.motion_state, MotionState::Hovering);
    assert!(f.character.state.vy < 0.0);
}

#[test]
fn hover_budget_never_exceeded_and_forces_fall() {
    let mut f = fixture();
    f.step(pressing_jump());
    f.step(pressing_jump());

    // Hold jump far beyond the 3000 ms budget.
    for _ in 0..150 {
        f.step(holding_jump());
        assert!(f.character.state.hover_elapsed <= HOVER_BUDGET);
    }
    assert_ne!(f.character.state.motion_state, MotionState::Hovering);
    assert_eq!(f.character.state.hover_elapsed, HOVER_BUDGET);
}

#[test]
fn landing_refunds_hover_budget() {
    let mut f = fixture();
    f.step(pressing_jump());
    f.step(pressing_jump());
    for _ in 0..30 {
        f.step(holding_jump());
    }
    assert!(f.character.state.hover_elapsed > 0.0);

    // Release everything and wait for the landing.
    for _ in 0..400 {
        f.step(neutral());
        if f.character.state.grounded {
            break;
        }
    }
    assert!(f.character.state.grounded);
    assert_eq!(f.character.state.motion_state, MotionState::Idle);
    assert_eq!(f.character.state.hover_elapsed, 0.0);
}

// ── Inhale and capture ────────────────────────────────────────────────────────

#[test]
fn inhale_pulls_and_captures_enemy_ahead() {
    let mut f = fixture();
    // Directly ahead of a right-facing character, inside the cone.
    f.enemies.spawn(EnemyKind::Normal, 400.0, GROUND_Y, 0.0);

    f.step(holding_action());
    assert_eq!(f.character.state.motion_state, MotionState::Inhaling);
    let pulled = f.enemies.iter().next().map(|e| (e.x, e.being_inhaled));
    let (x_after, inhaled) = pulled.expect("enemy still present");
    assert!(inhaled);
    assert!(x_after < 400.0);

    for _ in 0..60 {
        f.step(holding_action());
        if f.character.state.motion_state == MotionState::Full {
            break;
        }
    }

    assert_eq!(f.character.state.motion_state, MotionState::Full);
    assert_eq!(f.character.state.swallowed_enemy_kind, Some(EnemyKind::Normal));
    assert!(f.enemies.is_empty());
    assert_eq!(f.store.score, SCORE_CAPTURE);
}

#[test]
fn enemy_behind_is_not_inhaled() {
    let mut f = fixture();
    f.enemies.spawn(EnemyKind::Normal, 200.0, GROUND_Y, 0.0);

    for _ in 0..30 {
        f.step(holding_action());
    }
    let enemy = f.enemies.iter().next().expect("enemy survives");
    assert!(!enemy.being_inhaled);
    assert_eq!(enemy.x, 200.0);
}

#[test]
fn releasing_action_ends_inhale() {
    let mut f = fixture();
    f.enemies.spawn(EnemyKind::Normal, 430.0, GROUND_Y, 0.0);
    f.step(holding_action());
    f.step(neutral());
    assert_eq!(f.character.state.motion_state, MotionState::Idle);
    assert!(!f.enemies.iter().next().expect("present").being_inhaled);
}

#[test]
fn inhale_locks_horizontal_movement() {
    let mut f = fixture();
    f.step(FrameCommand {
        move_x: 1.0,
        action: true,
        ..neutral()
    });
    assert_eq!(f.character.state.motion_state, MotionState::Inhaling);
    assert_eq!(f.character.state.vx, 0.0);
}

// ── FULL state ────────────────────────────────────────────────────────────────

fn swallow_enemy(f: &mut Fixture, kind: EnemyKind) {
    f.enemies.spawn(kind, 340.0, GROUND_Y, 0.0);
    for _ in 0..60 {
        f.step(holding_action());
        if f.character.state.motion_state == MotionState::Full {
            return;
        }
    }
    panic!("capture never happened");
}

#[test]
fn full_state_blocks_jumping() {
    let mut f = fixture();
    swallow_enemy(&mut f, EnemyKind::Normal);
    f.step(neutral());
    f.step(pressing_jump());
    assert_eq!(f.character.state.motion_state, MotionState::Full);
    assert!(f.character.state.grounded);
}

#[test]
fn spit_fires_star_and_clears_full() {
    let mut f = fixture();
    swallow_enemy(&mut f, EnemyKind::Normal);
    f.step(neutral());
    let score_before = f.store.score;

    f.step(pressing_action());
    assert_eq!(f.character.state.motion_state, MotionState::Idle);
    assert_eq!(f.character.state.swallowed_enemy_kind, None);
    assert_eq!(f.stars.len(), 1);
    assert!(f.stars[0].vx > 0.0);
    assert_eq!(f.store.score, score_before + SCORE_SPIT);
}

#[test]
fn swallowing_grants_matching_ability() {
    let mut f = fixture();
    swallow_enemy(&mut f, EnemyKind::Fire);
    f.step(neutral());

    f.step(FrameCommand {
        move_y: 1.0,
        ..neutral()
    });
    assert_eq!(f.character.state.copy_ability, CopyAbility::Fire);
    assert_eq!(f.character.state.motion_state, MotionState::Idle);

    // Next frame the controller builds the instance and mirrors the store.
    f.step(neutral());
    assert_eq!(f.store.ability, CopyAbility::Fire);
}

#[test]
fn swallowing_plain_enemy_grants_nothing() {
    let mut f = fixture();
    swallow_enemy(&mut f, EnemyKind::Normal);
    f.step(neutral());
    f.step(FrameCommand {
        move_y: 1.0,
        ..neutral()
    });
    assert_eq!(f.character.state.copy_ability, CopyAbility::None);
    assert_eq!(f.character.state.swallowed_enemy_kind, None);
}

// ── Ability swaps ─────────────────────────────────────────────────────────────

#[test]
fn none_fire_none_roundtrip_releases_everything() {
    let mut f = fixture();

    f.character.state.copy_ability = CopyAbility::Fire;
    f.step(neutral());
    assert_eq!(f.store.ability, CopyAbility::Fire);

    f.step(pressing_action());
    assert!(f.character.ability_hitbox().is_some());

    f.character.state.copy_ability = CopyAbility::None;
    f.step(neutral());
    assert_eq!(f.store.ability, CopyAbility::None);
    assert!(f.character.ability_hitbox().is_none());
    assert!(!f.character.state.ability_active);

    // A second swap cycle must behave identically.
    f.character.state.copy_ability = CopyAbility::Fire;
    f.step(neutral());
    assert!(f.character.ability_hitbox().is_none());
}

#[test]
fn attack_state_clears_when_window_expires_under_held_button() {
    let mut f = fixture();
    f.character.state.copy_ability = CopyAbility::Fire;
    f.step(neutral());

    f.step(pressing_action());
    assert_eq!(f.character.state.motion_state, MotionState::Attacking);

    // Hold past the 800 ms window so it expires without a release edge.
    for _ in 0..30 {
        f.step(holding_action());
    }
    assert!(!f.character.state.ability_active);

    for _ in 0..5 {
        f.step(neutral());
    }
    assert_eq!(f.character.state.motion_state, MotionState::Idle);
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn hurt_starts_invincibility_window() {
    let mut f = fixture();
    let mut store = GameStore::new();

    f.character.hurt(1, 300.0, -200.0, &mut store);
    assert_eq!(store.hp, store.max_hp - 1);

    f.character.hurt(1, 300.0, -200.0, &mut store);
    assert_eq!(store.hp, store.max_hp - 1);

    // 1500 ms window: 50 frames at 33 ms is past it.
    for _ in 0..50 {
        f.step(neutral());
    }
    f.character.hurt(1, 300.0, -200.0, &mut store);
    assert_eq!(store.hp, store.max_hp - 2);
}
