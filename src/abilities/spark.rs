/// Spark — an electric field surrounding the character.
///
/// The hit test is a plain Euclidean-distance circle rather than the
/// rectangle intersection the other abilities use. While active it also
/// spawns short-lived lightning bolts on a fixed interval; the bolts are
/// decorative and carry no hitbox of their own.

use super::{Ability, AbilityContext, AbilityTimers, HitboxShape};
use crate::entities::CopyAbility;

const COOLDOWN_MS: f32 = 800.0;
const DURATION_MS: f32 = 600.0;
const FIELD_RADIUS: f32 = 80.0;
/// A new bolt every 50 ms while discharging.
const BOLT_INTERVAL_MS: f32 = 50.0;
const BOLT_LIFETIME_MS: f32 = 150.0;

/// One decorative lightning bolt, radiating at `angle` from the owner.
#[derive(Clone, Copy, Debug)]
pub struct LightningBolt {
    pub angle: f32,
    pub remaining_ms: f32,
}

pub struct SparkAbility {
    timers: AbilityTimers,
    bolts: Vec<LightningBolt>,
    bolt_timer: f32,
    next_angle: f32,
}

impl SparkAbility {
    pub fn new() -> Self {
        Self {
            timers: AbilityTimers::new(COOLDOWN_MS, DURATION_MS),
            bolts: Vec::new(),
            bolt_timer: 0.0,
            next_angle: 0.0,
        }
    }

    pub fn bolts(&self) -> &[LightningBolt] {
        &self.bolts
    }
}

impl Default for SparkAbility {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for SparkAbility {
    fn kind(&self) -> CopyAbility {
        CopyAbility::Spark
    }

    fn timers(&self) -> &AbilityTimers {
        &self.timers
    }

    fn timers_mut(&mut self) -> &mut AbilityTimers {
        &mut self.timers
    }

    fn hitbox(&self) -> HitboxShape {
        HitboxShape::Circle { radius: FIELD_RADIUS }
    }

    fn on_activate(&mut self) {
        self.bolts.clear();
        self.bolt_timer = 0.0;
    }

    fn on_active_update(&mut self, _ctx: &mut AbilityContext<'_>, delta_ms: f32) {
        self.bolt_timer += delta_ms;
        while self.bolt_timer >= BOLT_INTERVAL_MS {
            self.bolt_timer -= BOLT_INTERVAL_MS;
            // Stagger bolt headings around the circle without needing an RNG.
            self.next_angle = (self.next_angle + 2.39996) % std::f32::consts::TAU;
            self.bolts.push(LightningBolt {
                angle: self.next_angle,
                remaining_ms: BOLT_LIFETIME_MS,
            });
        }
    }

    /// Bolts expire on their own clock, even after the field closes.
    fn on_passive_update(&mut self, _ctx: &mut AbilityContext<'_>, delta_ms: f32) {
        for bolt in &mut self.bolts {
            bolt.remaining_ms -= delta_ms;
        }
        self.bolts.retain(|b| b.remaining_ms > 0.0);
    }

    fn on_deactivate(&mut self) {
        self.bolts.clear();
    }
}
