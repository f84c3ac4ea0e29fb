/// Character controller — the 9-state machine driving the player.
///
/// Per frame, in order: refresh the ground contact, route the action
/// button (ability, inhale, or nothing), tick the live ability, resolve
/// horizontal movement, resolve jump/hover, handle the FULL-state actions,
/// then integrate velocity against the terrain.

use crate::abilities::{create_ability, Ability, AbilityContext, HitboxShape};
use crate::config::{
    InhaleConfig, PhysicsConfig, CHARACTER_HALF_H, CHARACTER_HALF_W, SCORE_CAPTURE, SCORE_SPIT,
    STAR_LIFETIME, STAR_SPEED,
};
use crate::entities::{
    CharacterState, CopyAbility, EnemyRegistry, Facing, MotionState, StarProjectile,
};
use crate::input::FrameCommand;
use crate::math::{lerp, wrap_angle, Rect, Vec2};
use crate::store::GameStore;
use crate::terrain::Terrain;

/// Ground snap tolerance, px.
const GROUND_EPSILON: f32 = 4.0;
/// Post-hit invincibility, ms.
const INVINCIBLE_MS: f32 = 1500.0;

pub struct CharacterController {
    pub state: CharacterState,
    ability: Option<Box<dyn Ability>>,
    physics: PhysicsConfig,
    inhale: InhaleConfig,
    invincible_ms: f32,
}

impl CharacterController {
    pub fn new(x: f32, y: f32, physics: PhysicsConfig, inhale: InhaleConfig) -> Self {
        Self {
            state: CharacterState::new(x, y),
            ability: None,
            physics,
            inhale,
            invincible_ms: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.state.x,
            self.state.y,
            CHARACTER_HALF_W * 2.0,
            CHARACTER_HALF_H * 2.0,
        )
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.state.x, self.state.y)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ms > 0.0
    }

    /// The current attack hitbox, present only while an ability's active
    /// window is open. Lets the frame loop test it against the boss.
    pub fn ability_hitbox(&self) -> Option<HitboxShape> {
        match self.ability.as_ref() {
            Some(a) if a.timers().active => Some(a.hitbox()),
            _ => None,
        }
    }

    /// Applies damage with knockback, unless inside the invincibility
    /// window. Starts a fresh window on a successful hit.
    pub fn hurt(&mut self, damage: i32, knockback_x: f32, knockback_y: f32, store: &mut GameStore) {
        if self.is_invincible() {
            return;
        }
        self.state.vx = knockback_x;
        self.state.vy = knockback_y;
        self.invincible_ms = INVINCIBLE_MS;
        store.damage(damage);
        log::debug!("character hurt for {}, hp now {}", damage, store.hp);
    }

    /// Lets the obstacle manager nudge the character along with a ridden
    /// platform.
    pub fn shift(&mut self, dx: f32, dy: f32) {
        self.state.x += dx;
        self.state.y += dy;
    }

    pub fn reset(&mut self, x: f32, y: f32) {
        self.state = CharacterState::new(x, y);
        self.ability = None;
        self.invincible_ms = 0.0;
    }

    // ── Frame update ─────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        cmd: &FrameCommand,
        delta_ms: f32,
        terrain: &Terrain,
        supports: &[Rect],
        enemies: &mut EnemyRegistry,
        store: &mut GameStore,
        stars: &mut Vec<StarProjectile>,
    ) {
        if self.invincible_ms > 0.0 {
            self.invincible_ms = (self.invincible_ms - delta_ms).max(0.0);
        }

        // 1. Ground contact from the collision query.
        self.state.grounded = self.probe_ground(terrain, supports);

        self.sync_ability(enemies, store);

        // 2. Route the action button.
        let full = self.state.motion_state == MotionState::Full;
        if self.state.copy_ability != CopyAbility::None && !full {
            self.handle_ability_action(cmd);
        } else if cmd.action && !full {
            self.handle_inhale(delta_ms, enemies, store);
        } else if self.state.motion_state == MotionState::Inhaling {
            self.end_inhale(enemies);
        }

        // 3. Tick the live ability every frame, active or not.
        self.update_ability(delta_ms, enemies, store);

        // 4. Horizontal movement.
        self.handle_movement(cmd);

        // 5. Jump and hover.
        self.handle_jump_and_hover(cmd, delta_ms);

        // 6. FULL-state actions: spit or swallow.
        if self.state.motion_state == MotionState::Full {
            self.handle_full_state(cmd, stars, store);
        }

        self.integrate(delta_ms, terrain, supports);
    }

    fn probe_ground(&self, terrain: &Terrain, supports: &[Rect]) -> bool {
        if self.state.vy < 0.0 {
            return false;
        }
        terrain
            .support_below(&self.bounds(), supports, GROUND_EPSILON)
            .is_some()
    }

    // ── Ability routing ──────────────────────────────────────────────────────

    /// Rebuilds the ability instance whenever `copy_ability` changed out
    /// from under it (swallow-grant, reset). The old instance gets a
    /// chance to cancel outstanding effects first.
    fn sync_ability(&mut self, enemies: &mut EnemyRegistry, store: &mut GameStore) {
        let wanted = self.state.copy_ability;
        let current = self.ability.as_ref().map(|a| a.kind());
        if current == Some(wanted) || (wanted == CopyAbility::None && current.is_none()) {
            return;
        }
        if let Some(mut old) = self.ability.take() {
            let mut ctx = AbilityContext {
                owner: Vec2::new(self.state.x, self.state.y),
                facing: self.state.facing,
                enemies,
                store,
            };
            old.on_destroy(&mut ctx);
        }
        self.ability = create_ability(wanted);
        self.state.ability_active = false;
        self.state.ability_cooldown_fraction = 0.0;
        self.resolve_attack_stance();
        store.set_ability(wanted);
    }

    fn handle_ability_action(&mut self, cmd: &FrameCommand) {
        let Some(ability) = self.ability.as_mut() else {
            return;
        };

        if cmd.action_pressed && ability.execute() {
            self.state.motion_state = MotionState::Attacking;
            self.state.ability_active = true;
        }

        if !cmd.action && self.state.ability_active {
            ability.deactivate();
            self.state.ability_active = false;
            self.resolve_attack_stance();
        }
    }

    fn update_ability(&mut self, delta_ms: f32, enemies: &mut EnemyRegistry, store: &mut GameStore) {
        let Some(ability) = self.ability.as_mut() else {
            return;
        };
        let mut ctx = AbilityContext {
            owner: Vec2::new(self.state.x, self.state.y),
            facing: self.state.facing,
            enemies,
            store,
        };
        ability.update(&mut ctx, delta_ms);
        self.state.ability_cooldown_fraction = ability.timers().cooldown_fraction();
        if !ability.timers().active {
            // The window can close on its own while the button is still
            // held; resolve the stance here, not just on release.
            self.state.ability_active = false;
            self.resolve_attack_stance();
        }
    }

    /// Leaves ATTACKING once no ability window is open.
    fn resolve_attack_stance(&mut self) {
        if self.state.motion_state == MotionState::Attacking {
            self.state.motion_state = if self.state.grounded {
                MotionState::Idle
            } else {
                MotionState::Falling
            };
        }
    }

    // ── Inhale ───────────────────────────────────────────────────────────────

    fn handle_inhale(&mut self, delta_ms: f32, enemies: &mut EnemyRegistry, store: &mut GameStore) {
        // Entering INHALING while FULL is a no-op; callers filter FULL out.
        if self.state.motion_state != MotionState::Inhaling {
            self.state.motion_state = MotionState::Inhaling;
        }
        self.pull_enemies(delta_ms, enemies, store);
    }

    /// Pulls every enemy inside the cone toward the mouth, faster as it
    /// gets closer; captures on proximity.
    fn pull_enemies(&mut self, delta_ms: f32, enemies: &mut EnemyRegistry, store: &mut GameStore) {
        let heading = self.state.facing.heading();
        let (cx, cy) = (self.state.x, self.state.y);
        let mut captured: Option<(u32, f32, f32)> = None;

        for enemy in enemies.iter_mut() {
            let dx = enemy.x - cx;
            let dy = enemy.y - cy;
            let distance = (dx * dx + dy * dy).sqrt().max(0.001);
            let deviation = wrap_angle(dy.atan2(dx) - heading);
            let in_range =
                distance < self.inhale.radius && deviation.abs() < self.inhale.angle / 2.0;

            if in_range {
                enemy.being_inhaled = true;

                let closeness = 1.0 - distance / self.inhale.radius;
                let pull = self.inhale.pull_force * (1.0 + closeness * 2.0);
                let step = pull * (delta_ms / 1000.0);
                enemy.x -= dx / distance * step;
                enemy.y -= dy / distance * step;

                if distance < self.inhale.capture_distance && captured.is_none() {
                    captured = Some((enemy.id, enemy.x, enemy.y));
                }
            } else if enemy.being_inhaled {
                enemy.being_inhaled = false;
            }
        }

        if let Some((id, ex, ey)) = captured {
            if let Some(kind) = enemies.remove(id) {
                self.state.swallowed_enemy_kind = Some(kind);
                self.state.motion_state = MotionState::Full;
                store.add_score(SCORE_CAPTURE);
                log::debug!("captured {:?} enemy #{} at ({}, {})", kind, id, ex, ey);
            }
        }
    }

    fn end_inhale(&mut self, enemies: &mut EnemyRegistry) {
        for enemy in enemies.iter_mut() {
            enemy.being_inhaled = false;
        }
        self.state.motion_state = if self.state.grounded {
            MotionState::Idle
        } else {
            MotionState::Falling
        };
    }

    // ── Movement ─────────────────────────────────────────────────────────────

    fn handle_movement(&mut self, cmd: &FrameCommand) {
        if self.state.motion_state == MotionState::Inhaling {
            self.state.vx = 0.0;
            return;
        }

        self.state.vx = cmd.move_x * self.physics.walk_speed;

        if cmd.move_x < 0.0 {
            self.state.facing = Facing::Left;
        } else if cmd.move_x > 0.0 {
            self.state.facing = Facing::Right;
        }

        if self.state.grounded && cmd.move_x != 0.0 && self.state.motion_state == MotionState::Idle
        {
            self.state.motion_state = MotionState::Walking;
        } else if self.state.grounded
            && cmd.move_x == 0.0
            && self.state.motion_state == MotionState::Walking
        {
            self.state.motion_state = MotionState::Idle;
        }
    }

    // ── Jump & hover ─────────────────────────────────────────────────────────

    fn handle_jump_and_hover(&mut self, cmd: &FrameCommand, delta_ms: f32) {
        let state = self.state.motion_state;

        if self.state.grounded {
            if cmd.jump_pressed && state != MotionState::Full {
                self.state.vy = self.physics.jump_velocity;
                self.state.motion_state = MotionState::Jumping;
                self.state.hover_elapsed = 0.0;
                self.state.grounded = false;
            }
            return;
        }

        match state {
            MotionState::Hovering => self.process_hover(cmd, delta_ms),
            MotionState::Jumping | MotionState::Falling => {
                let can_hover = self.state.hover_elapsed < self.state.hover_budget;
                if cmd.jump_pressed && can_hover {
                    self.state.motion_state = MotionState::Hovering;
                    self.state.vy = self.physics.hover_velocity;
                } else if self.state.vy > 0.0 && state == MotionState::Jumping {
                    self.state.motion_state = MotionState::Falling;
                }
            }
            _ => {}
        }
    }

    /// While jump is held the upward thrust fades linearly with the spent
    /// budget; once the budget runs out the fall is forced no matter the
    /// input. Releasing jump decays toward the slow hover-fall speed.
    fn process_hover(&mut self, cmd: &FrameCommand, delta_ms: f32) {
        if cmd.jump {
            let progress = self.state.hover_elapsed / self.state.hover_budget;
            self.state.vy = self.physics.hover_velocity * (1.0 - progress * 0.5);

            self.state.hover_elapsed =
                (self.state.hover_elapsed + delta_ms).min(self.state.hover_budget);

            if self.state.hover_elapsed >= self.state.hover_budget {
                self.state.motion_state = MotionState::Falling;
            }
        } else {
            self.state.vy = lerp(self.state.vy, self.physics.hover_fall_speed, 0.1);
        }
    }

    // ── FULL state ───────────────────────────────────────────────────────────

    fn handle_full_state(
        &mut self,
        cmd: &FrameCommand,
        stars: &mut Vec<StarProjectile>,
        store: &mut GameStore,
    ) {
        if cmd.action_pressed {
            self.spit_star(stars);
            self.state.swallowed_enemy_kind = None;
            self.state.motion_state = MotionState::Idle;
            store.add_score(SCORE_SPIT);
        } else if cmd.move_y > 0.5 {
            let swallowed = self.state.swallowed_enemy_kind.take();
            self.state.motion_state = MotionState::Idle;
            if let Some(ability) = swallowed.and_then(|kind| kind.grants()) {
                self.state.copy_ability = ability;
                log::info!("copy ability gained: {:?}", ability);
            }
        }
    }

    fn spit_star(&mut self, stars: &mut Vec<StarProjectile>) {
        let sign = self.state.facing.sign();
        stars.push(StarProjectile {
            x: self.state.x + sign * 40.0,
            y: self.state.y,
            vx: sign * STAR_SPEED,
            ttl: STAR_LIFETIME,
        });
    }

    // ── Physics integration ──────────────────────────────────────────────────

    fn integrate(&mut self, delta_ms: f32, terrain: &Terrain, supports: &[Rect]) {
        let dt = delta_ms / 1000.0;
        let hovering = self.state.motion_state == MotionState::Hovering;

        if !self.state.grounded && !hovering {
            self.state.vy =
                (self.state.vy + self.physics.gravity * dt).min(self.physics.max_fall_speed);
        }

        let was_airborne = matches!(
            self.state.motion_state,
            MotionState::Jumping | MotionState::Falling | MotionState::Hovering
        );

        self.state.x = terrain.clamp_x(self.state.x + self.state.vx * dt, CHARACTER_HALF_W);
        self.state.y += self.state.vy * dt;

        // Resolve against the highest support under foot while moving down.
        if self.state.vy >= 0.0 {
            if let Some(surface) =
                terrain.support_below(&self.bounds(), supports, GROUND_EPSILON + self.state.vy * dt)
            {
                if self.bounds().bottom() >= surface - GROUND_EPSILON {
                    self.state.y = surface - CHARACTER_HALF_H;
                    self.state.vy = 0.0;
                    self.state.grounded = true;
                }
            } else {
                self.state.grounded = false;
            }
        }

        // Landing resolves to FULL (still holding a swallow) or IDLE, and
        // refunds the hover budget.
        if was_airborne && self.state.grounded {
            self.state.motion_state = if self.state.swallowed_enemy_kind.is_some() {
                MotionState::Full
            } else {
                MotionState::Idle
            };
            self.state.hover_elapsed = 0.0;
        }

        if !self.state.grounded
            && matches!(
                self.state.motion_state,
                MotionState::Idle | MotionState::Walking
            )
        {
            self.state.motion_state = MotionState::Falling;
        }
    }
}
