/// Ice — a frost cone that freezes enemies, destroying them after a short
/// delay rather than on contact.

use std::collections::HashSet;

use super::{Ability, AbilityContext, AbilityTimers, HitboxShape};
use crate::config::SCORE_ABILITY_HIT;
use crate::entities::{CopyAbility, EnemyId};

const COOLDOWN_MS: f32 = 600.0;
const DURATION_MS: f32 = 700.0;
/// How long a frozen enemy survives before shattering.
const SHATTER_DELAY_MS: f32 = 500.0;

pub struct IceAbility {
    timers: AbilityTimers,
    /// Enemies already frozen this activation; a second overlap is ignored.
    frozen_enemies: HashSet<EnemyId>,
    /// Countdown list for the delayed kills. Outlives the active window.
    pending_shatters: Vec<(EnemyId, f32)>,
}

impl IceAbility {
    pub fn new() -> Self {
        Self {
            timers: AbilityTimers::new(COOLDOWN_MS, DURATION_MS),
            frozen_enemies: HashSet::new(),
            pending_shatters: Vec::new(),
        }
    }
}

impl Default for IceAbility {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for IceAbility {
    fn kind(&self) -> CopyAbility {
        CopyAbility::Ice
    }

    fn timers(&self) -> &AbilityTimers {
        &self.timers
    }

    fn timers_mut(&mut self) -> &mut AbilityTimers {
        &mut self.timers
    }

    /// A 45° frost cone projected from a point 60 ahead of the character,
    /// reaching another 100 beyond it.
    fn hitbox(&self) -> HitboxShape {
        HitboxShape::Cone {
            radius: 100.0,
            angle: std::f32::consts::FRAC_PI_4,
            offset_x: 60.0,
        }
    }

    fn on_activate(&mut self) {
        self.frozen_enemies.clear();
    }

    /// Ticks the shatter countdowns even after deactivation. Each expiry
    /// re-validates that the enemy still exists; another path may have
    /// destroyed it first.
    fn on_passive_update(&mut self, ctx: &mut AbilityContext<'_>, delta_ms: f32) {
        let mut shattered = Vec::new();
        for (id, remaining) in &mut self.pending_shatters {
            *remaining -= delta_ms;
            if *remaining <= 0.0 {
                shattered.push(*id);
            }
        }
        self.pending_shatters.retain(|(_, remaining)| *remaining > 0.0);

        for id in shattered {
            if ctx.enemies.get(id).is_some() {
                ctx.enemies.remove(id);
                ctx.store.add_score(SCORE_ABILITY_HIT);
                log::debug!("frozen enemy #{} shattered", id);
            }
        }
    }

    fn on_deactivate(&mut self) {
        self.frozen_enemies.clear();
    }

    /// Swapping the ability away cancels the freeze without killing.
    fn on_destroy(&mut self, ctx: &mut AbilityContext<'_>) {
        for (id, _) in self.pending_shatters.drain(..) {
            if let Some(enemy) = ctx.enemies.get_mut(id) {
                enemy.frozen = false;
            }
        }
    }

    /// First overlap freezes the enemy in place; the kill happens
    /// `SHATTER_DELAY_MS` later in `on_passive_update`.
    fn on_enemy_hit(&mut self, ctx: &mut AbilityContext<'_>, id: EnemyId) {
        if !self.frozen_enemies.insert(id) {
            return;
        }
        if let Some(enemy) = ctx.enemies.get_mut(id) {
            enemy.frozen = true;
            self.pending_shatters.push((id, SHATTER_DELAY_MS));
            log::debug!("enemy #{} frozen", id);
        }
    }
}
