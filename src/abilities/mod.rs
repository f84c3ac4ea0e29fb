/// Copy-ability system.
///
/// Every ability shares the same lifecycle: `execute` opens an active
/// window unless on cooldown, `update` ticks timers and tests the hitbox
/// against live enemies, `deactivate` closes the window and starts the
/// cooldown. The variable parts — hitbox shape, per-frame behaviour, hit
/// handling — are delegated through the `Ability` trait, one type per
/// ability.

mod fire;
mod ice;
mod spark;

pub use fire::FireAbility;
pub use ice::IceAbility;
pub use spark::SparkAbility;

use crate::config::SCORE_ABILITY_HIT;
use crate::entities::{CopyAbility, EnemyId, EnemyRegistry, Facing};
use crate::math::{in_cone, Rect, Vec2};
use crate::store::GameStore;

/// Everything an ability needs from the surrounding frame.
pub struct AbilityContext<'a> {
    pub owner: Vec2,
    pub facing: Facing,
    pub enemies: &'a mut EnemyRegistry,
    pub store: &'a mut GameStore,
}

// ── Hitbox shapes ────────────────────────────────────────────────────────────

/// Direction-relative attack region. Offsets are mirrored by facing.
#[derive(Clone, Copy, Debug)]
pub enum HitboxShape {
    /// Forward rectangle centred `offset_x` ahead of the owner.
    Rect { width: f32, height: f32, offset_x: f32 },
    /// Forward cone with its apex `offset_x` ahead of the owner.
    Cone { radius: f32, angle: f32, offset_x: f32 },
    /// Circle centred on the owner, tested by Euclidean distance.
    Circle { radius: f32 },
}

impl HitboxShape {
    /// Tests the shape against a target's bounds. Rects intersect; cone and
    /// circle test the target's centre.
    pub fn overlaps(&self, owner: Vec2, facing: Facing, target: &Rect) -> bool {
        let center = Vec2::new(target.cx, target.cy);
        match *self {
            HitboxShape::Rect { width, height, offset_x } => {
                let zone = Rect::new(owner.x + offset_x * facing.sign(), owner.y, width, height);
                zone.intersects(target)
            }
            HitboxShape::Cone { radius, angle, offset_x } => {
                let apex = Vec2::new(owner.x + offset_x * facing.sign(), owner.y);
                in_cone(apex, facing.heading(), radius, angle, center)
            }
            HitboxShape::Circle { radius } => owner.distance_to(center) < radius,
        }
    }
}

// ── Shared timer bookkeeping ─────────────────────────────────────────────────

/// Cooldown and active-window timers, composed once and shared by every
/// ability instead of re-implemented per variant.
#[derive(Clone, Debug)]
pub struct AbilityTimers {
    cooldown_ms: f32,
    duration_ms: f32,
    pub cooldown_remaining: f32,
    pub active_remaining: f32,
    pub active: bool,
}

impl AbilityTimers {
    pub fn new(cooldown_ms: f32, duration_ms: f32) -> Self {
        Self {
            cooldown_ms,
            duration_ms,
            cooldown_remaining: 0.0,
            active_remaining: 0.0,
            active: false,
        }
    }

    pub fn on_cooldown(&self) -> bool {
        self.cooldown_remaining > 0.0
    }

    /// 0 = ready, 1 = cooldown just started.
    pub fn cooldown_fraction(&self) -> f32 {
        if self.cooldown_ms <= 0.0 {
            0.0
        } else {
            self.cooldown_remaining / self.cooldown_ms
        }
    }
}

// ── The ability trait ────────────────────────────────────────────────────────

pub trait Ability {
    fn kind(&self) -> CopyAbility;
    fn timers(&self) -> &AbilityTimers;
    fn timers_mut(&mut self) -> &mut AbilityTimers;
    fn hitbox(&self) -> HitboxShape;

    /// Activation hook, run when `execute` succeeds.
    fn on_activate(&mut self) {}

    /// Per-frame hook while the active window is open.
    fn on_active_update(&mut self, _ctx: &mut AbilityContext<'_>, _delta_ms: f32) {}

    /// Per-frame hook that runs whether or not the ability is active.
    /// Used for deferred effects that outlive the active window.
    fn on_passive_update(&mut self, _ctx: &mut AbilityContext<'_>, _delta_ms: f32) {}

    /// Teardown hook, run once per deactivation.
    fn on_deactivate(&mut self) {}

    /// Called before the instance is discarded on an ability swap; must
    /// cancel any outstanding effects on entities it touched.
    fn on_destroy(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// Hit handler. The default removes the enemy and awards the flat
    /// ability-hit score.
    fn on_enemy_hit(&mut self, ctx: &mut AbilityContext<'_>, id: EnemyId) {
        default_enemy_hit(ctx, id);
    }

    /// Opens the active window. Returns false (no state change) while on
    /// cooldown or already active.
    fn execute(&mut self) -> bool {
        let timers = self.timers_mut();
        if timers.on_cooldown() || timers.active {
            return false;
        }
        timers.active = true;
        timers.active_remaining = timers.duration_ms;
        self.on_activate();
        log::debug!("{:?} ability activated", self.kind());
        true
    }

    /// Ticks cooldown, advances the active window, and resolves hits.
    fn update(&mut self, ctx: &mut AbilityContext<'_>, delta_ms: f32) {
        {
            let timers = self.timers_mut();
            if timers.cooldown_remaining > 0.0 {
                timers.cooldown_remaining = (timers.cooldown_remaining - delta_ms).max(0.0);
            }
        }

        self.on_passive_update(ctx, delta_ms);

        if !self.timers().active {
            return;
        }

        self.timers_mut().active_remaining -= delta_ms;
        self.on_active_update(ctx, delta_ms);

        // The hitbox tracks the owner every frame, mirrored by facing.
        let hitbox = self.hitbox();
        let hit: Vec<EnemyId> = ctx
            .enemies
            .iter()
            .filter(|e| hitbox.overlaps(ctx.owner, ctx.facing, &e.bounds()))
            .map(|e| e.id)
            .collect();
        for id in hit {
            self.on_enemy_hit(ctx, id);
        }

        if self.timers().active_remaining <= 0.0 {
            self.deactivate();
        }
    }

    /// Idempotent: closing an already-closed window is a no-op, so the
    /// cooldown is never restarted twice.
    fn deactivate(&mut self) {
        let timers = self.timers_mut();
        if !timers.active {
            return;
        }
        timers.active = false;
        timers.active_remaining = 0.0;
        timers.cooldown_remaining = timers.cooldown_ms;
        self.on_deactivate();
        log::debug!("{:?} ability deactivated", self.kind());
    }
}

/// Shared hit resolution: remove the enemy, award the flat score.
pub(crate) fn default_enemy_hit(ctx: &mut AbilityContext<'_>, id: EnemyId) {
    if ctx.enemies.remove(id).is_some() {
        ctx.store.add_score(SCORE_ABILITY_HIT);
        log::debug!("enemy #{} destroyed by ability hit", id);
    }
}

// ── Inert variants ───────────────────────────────────────────────────────────

/// Placeholder for ability kinds that are selectable but have no player
/// behaviour (Sword, Beam). `execute` always reports "not activated".
pub struct InertAbility {
    kind: CopyAbility,
    timers: AbilityTimers,
}

impl InertAbility {
    pub fn new(kind: CopyAbility) -> Self {
        Self {
            kind,
            timers: AbilityTimers::new(0.0, 0.0),
        }
    }
}

impl Ability for InertAbility {
    fn kind(&self) -> CopyAbility {
        self.kind
    }

    fn timers(&self) -> &AbilityTimers {
        &self.timers
    }

    fn timers_mut(&mut self) -> &mut AbilityTimers {
        &mut self.timers
    }

    fn hitbox(&self) -> HitboxShape {
        HitboxShape::Circle { radius: 0.0 }
    }

    fn execute(&mut self) -> bool {
        false
    }
}

// ── Factory ──────────────────────────────────────────────────────────────────

/// Maps an ability kind to a fresh instance. `None` for `CopyAbility::None`.
pub fn create_ability(kind: CopyAbility) -> Option<Box<dyn Ability>> {
    match kind {
        CopyAbility::None => None,
        CopyAbility::Fire => Some(Box::new(FireAbility::new())),
        CopyAbility::Ice => Some(Box::new(IceAbility::new())),
        CopyAbility::Spark => Some(Box::new(SparkAbility::new())),
        CopyAbility::Sword | CopyAbility::Beam => Some(Box::new(InertAbility::new(kind))),
    }
}
