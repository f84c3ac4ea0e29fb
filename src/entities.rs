/// Core entity types and the enemy registry.

use crate::config::{ENEMY_HALF_H, ENEMY_HALF_W, ENEMY_PATROL_SPEED, HOVER_BUDGET};
use crate::math::Rect;

// ── Character ────────────────────────────────────────────────────────────────

/// The character's motion state. Exactly one is active per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    Idle,
    Walking,
    Jumping,
    Falling,
    Hovering,
    Inhaling,
    Full,
    Copying,
    Attacking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Horizontal sign: +1 facing right, -1 facing left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Heading angle in radians (0 = right, π = left).
    pub fn heading(self) -> f32 {
        match self {
            Facing::Left => std::f32::consts::PI,
            Facing::Right => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyAbility {
    None,
    Fire,
    Ice,
    Sword,
    Beam,
    Spark,
}

/// Per-frame character data, owned by the character controller.
#[derive(Clone, Debug)]
pub struct CharacterState {
    pub motion_state: MotionState,
    pub facing: Facing,
    pub copy_ability: CopyAbility,
    pub grounded: bool,
    /// Hover time consumed so far, ms. Invariant: 0 ≤ elapsed ≤ budget.
    pub hover_elapsed: f32,
    pub hover_budget: f32,
    /// Set while `motion_state == Full`.
    pub swallowed_enemy_kind: Option<EnemyKind>,
    pub ability_active: bool,
    /// 0 = ready, 1 = just started cooling down.
    pub ability_cooldown_fraction: f32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl CharacterState {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            motion_state: MotionState::Idle,
            facing: Facing::Right,
            copy_ability: CopyAbility::None,
            grounded: true,
            hover_elapsed: 0.0,
            hover_budget: HOVER_BUDGET,
            swallowed_enemy_kind: None,
            ability_active: false,
            ability_cooldown_fraction: 0.0,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
        }
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

pub type EnemyId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Normal,
    Fire,
    Ice,
    Sword,
    Beam,
    Spark,
}

impl EnemyKind {
    /// The copy ability swallowing this enemy grants, if any.
    pub fn grants(self) -> Option<CopyAbility> {
        match self {
            EnemyKind::Normal => None,
            EnemyKind::Fire => Some(CopyAbility::Fire),
            EnemyKind::Ice => Some(CopyAbility::Ice),
            EnemyKind::Sword => Some(CopyAbility::Sword),
            EnemyKind::Beam => Some(CopyAbility::Beam),
            EnemyKind::Spark => Some(CopyAbility::Spark),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EnemyEntity {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub being_inhaled: bool,
    /// Frozen by the ice ability; stands still until the delayed kill.
    pub frozen: bool,
    pub health: i32,
    // Patrol state
    pub spawn_x: f32,
    pub patrol_range: f32,
    pub patrol_dir: f32,
}

impl EnemyEntity {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_HALF_W * 2.0, ENEMY_HALF_H * 2.0)
    }
}

/// Owns every live enemy; other components refer to enemies by id only.
#[derive(Default)]
pub struct EnemyRegistry {
    enemies: Vec<EnemyEntity>,
    next_id: EnemyId,
}

impl EnemyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, kind: EnemyKind, x: f32, y: f32, patrol_range: f32) -> EnemyId {
        let id = self.next_id;
        self.next_id += 1;
        self.enemies.push(EnemyEntity {
            id,
            kind,
            x,
            y,
            being_inhaled: false,
            frozen: false,
            health: 1,
            spawn_x: x,
            patrol_range,
            patrol_dir: 1.0,
        });
        log::debug!("spawned {:?} enemy #{} at ({}, {})", kind, id, x, y);
        id
    }

    /// Removes the enemy and returns its kind, or `None` if already gone.
    pub fn remove(&mut self, id: EnemyId) -> Option<EnemyKind> {
        let idx = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.swap_remove(idx).kind)
    }

    pub fn get(&self, id: EnemyId) -> Option<&EnemyEntity> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut EnemyEntity> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyEntity> {
        self.enemies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EnemyEntity> {
        self.enemies.iter_mut()
    }

    pub fn ids(&self) -> Vec<EnemyId> {
        self.enemies.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
    }

    /// Walks each enemy back and forth around its spawn point. Enemies
    /// being inhaled or frozen stand still.
    pub fn update_patrol(&mut self, delta_ms: f32) {
        let dt = delta_ms / 1000.0;
        for e in &mut self.enemies {
            if e.being_inhaled || e.frozen {
                continue;
            }
            if e.x > e.spawn_x + e.patrol_range {
                e.patrol_dir = -1.0;
            } else if e.x < e.spawn_x - e.patrol_range {
                e.patrol_dir = 1.0;
            }
            e.x += e.patrol_dir * ENEMY_PATROL_SPEED * dt;
        }
    }
}

// ── Spit projectile ──────────────────────────────────────────────────────────

/// The star the character spits out of the FULL state.
#[derive(Clone, Debug)]
pub struct StarProjectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    /// Remaining lifetime in ms.
    pub ttl: f32,
}
