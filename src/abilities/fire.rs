/// Fire — a sustained flame jet ahead of the character.

use super::{Ability, AbilityTimers, HitboxShape};
use crate::entities::CopyAbility;

const COOLDOWN_MS: f32 = 500.0;
const DURATION_MS: f32 = 800.0;

pub struct FireAbility {
    timers: AbilityTimers,
}

impl FireAbility {
    pub fn new() -> Self {
        Self {
            timers: AbilityTimers::new(COOLDOWN_MS, DURATION_MS),
        }
    }
}

impl Default for FireAbility {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for FireAbility {
    fn kind(&self) -> CopyAbility {
        CopyAbility::Fire
    }

    fn timers(&self) -> &AbilityTimers {
        &self.timers
    }

    fn timers_mut(&mut self) -> &mut AbilityTimers {
        &mut self.timers
    }

    /// A wide forward rectangle: 120×40, centred 70 ahead.
    fn hitbox(&self) -> HitboxShape {
        HitboxShape::Rect {
            width: 120.0,
            height: 40.0,
            offset_x: 70.0,
        }
    }
}
