/// Boss controller — an 8-state machine with a distance/HP-driven action
/// policy, a hammer hitbox, and shockwave sub-entities spawned on hard
/// landings.

use rand::Rng;

use crate::config::{BossConfig, ShockWaveConfig};
use crate::entities::Facing;
use crate::math::{Rect, Vec2};
use crate::store::GameStore;
use crate::terrain::Terrain;

const BOSS_HALF_W: f32 = 24.0;
const BOSS_HALF_H: f32 = 28.0;
const GRAVITY: f32 = 800.0;
/// Ascent phase cap, ms.
const SUPER_JUMP_TIMEOUT: f32 = 800.0;
const LANDING_RECOVERY_MS: f32 = 500.0;
const HAMMER_WINDOW_MS: f32 = 600.0;
/// The hammer hitbox is live only in the last stretch of the swing.
const HAMMER_ACTIVE_MS: f32 = 400.0;
const HAMMER_COOLDOWN_MS: f32 = 1500.0;
const SLIDE_TIMEOUT_MS: f32 = 2000.0;
const DAMAGE_INVINCIBLE_MS: f32 = 500.0;
/// Grace period between death and the defeated notification.
const DEFEAT_NOTICE_DELAY_MS: f32 = 2000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossState {
    Idle,
    SuperJump,
    Falling,
    Landing,
    HammerSwing,
    BellySlide,
    Stunned,
    Defeated,
}

// ── Shockwave sub-entity ─────────────────────────────────────────────────────

/// A star wave travelling outward from a landing point, with a small hop.
#[derive(Clone, Debug)]
pub struct ShockWave {
    pub origin_x: f32,
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    config: ShockWaveConfig,
}

impl ShockWave {
    pub fn new(x: f32, y: f32, facing: Facing, config: ShockWaveConfig) -> Self {
        Self {
            origin_x: x,
            x,
            y: y - 16.0,
            vx: facing.sign() * config.speed,
            vy: config.hop_velocity,
            config,
        }
    }

    pub fn update(&mut self, delta_ms: f32, floor_y: f32) {
        let dt = delta_ms / 1000.0;
        self.vy += self.config.gravity * dt;
        self.x += self.vx * dt;
        self.y = (self.y + self.vy * dt).min(floor_y - 12.0);
    }

    /// Done once it has travelled the configured distance from its origin.
    pub fn expired(&self) -> bool {
        (self.x - self.origin_x).abs() >= self.config.max_distance
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, 24.0, 24.0)
    }

    pub fn damage(&self) -> i32 {
        self.config.damage
    }
}

// ── Boss controller ──────────────────────────────────────────────────────────

pub struct BossController {
    pub state: BossState,
    pub hp: i32,
    pub max_hp: i32,
    pub facing: Facing,
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    /// Time remaining in the current state, ms.
    state_timer: f32,
    invincible_timer: f32,
    attack_cooldown: f32,
    /// Target x recorded at the start of a super jump.
    target_jump_x: f32,
    pub shockwaves: Vec<ShockWave>,
    /// Countdown to the delayed defeated notification.
    defeat_notice: Option<f32>,
    config: BossConfig,
    wave_config: ShockWaveConfig,
}

impl BossController {
    pub fn new(x: f32, y: f32, config: BossConfig) -> Self {
        let max_hp = config.max_hp;
        let mut boss = Self {
            state: BossState::Idle,
            hp: max_hp,
            max_hp,
            facing: Facing::Left,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            state_timer: 0.0,
            invincible_timer: 0.0,
            attack_cooldown: 0.0,
            target_jump_x: x,
            shockwaves: Vec::new(),
            defeat_notice: None,
            config,
            wave_config: ShockWaveConfig::default(),
        };
        boss.enter_state(BossState::Idle);
        boss
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BOSS_HALF_W * 2.0, BOSS_HALF_H * 2.0)
    }

    /// Contact damage dealt by the body during a slide or a landing.
    pub fn contact_damage(&self) -> i32 {
        self.config.damage
    }

    /// The hammer's hitbox, present only during the live part of a swing.
    pub fn hammer_hitbox(&self) -> Option<Rect> {
        if self.state == BossState::HammerSwing && self.state_timer < HAMMER_ACTIVE_MS {
            let offset = self.facing.sign() * 60.0;
            Some(Rect::new(self.x + offset, self.y - 40.0, 80.0, 60.0))
        } else {
            None
        }
    }

    /// True while the slide or a falling body slam can hurt on touch.
    pub fn body_is_dangerous(&self) -> bool {
        matches!(self.state, BossState::BellySlide | BossState::Falling)
    }

    // ── Damage ───────────────────────────────────────────────────────────────

    /// Rejected while invincible or defeated. Clamps HP at zero and enters
    /// DEFEATED when it gets there.
    pub fn take_damage(&mut self, amount: i32, store: &mut GameStore) {
        if self.is_invincible() || self.state == BossState::Defeated {
            return;
        }
        self.hp = (self.hp - amount).max(0);
        self.invincible_timer = DAMAGE_INVINCIBLE_MS;
        store.set_boss_hp(self.hp, self.max_hp);

        if self.hp == 0 {
            self.enter_state(BossState::Defeated);
        }
    }

    // ── Frame update ─────────────────────────────────────────────────────────

    pub fn update(
        &mut self,
        target: Vec2,
        delta_ms: f32,
        rng: &mut impl Rng,
        terrain: &Terrain,
        store: &mut GameStore,
    ) {
        let floor_y = terrain.floor_y;
        self.update_shockwaves(delta_ms, floor_y);

        if self.state == BossState::Defeated {
            if let Some(remaining) = self.defeat_notice.as_mut() {
                *remaining -= delta_ms;
                if *remaining <= 0.0 {
                    self.defeat_notice = None;
                    store.notify_boss_defeated();
                    log::info!("boss defeated notification fired");
                }
            }
            return;
        }

        self.state_timer -= delta_ms;
        if self.invincible_timer > 0.0 {
            self.invincible_timer = (self.invincible_timer - delta_ms).max(0.0);
        }
        if self.attack_cooldown > 0.0 {
            self.attack_cooldown = (self.attack_cooldown - delta_ms).max(0.0);
        }

        // Track the target except in committed-direction states.
        if !matches!(self.state, BossState::BellySlide | BossState::SuperJump) {
            self.face_target(target.x);
        }

        match self.state {
            BossState::Idle => {
                if self.state_timer <= 0.0 {
                    self.choose_next_action(target, rng);
                }
            }
            BossState::SuperJump => {
                let dt = delta_ms / 1000.0;
                self.vy += GRAVITY * dt;
                self.y += self.vy * dt;
                if self.vy >= 0.0 || self.state_timer <= 0.0 {
                    self.enter_state(BossState::Falling);
                }
            }
            BossState::Falling => {
                let dt = delta_ms / 1000.0;
                self.x += self.vx * dt;
                self.y += self.vy * dt;
                if self.y + BOSS_HALF_H >= floor_y {
                    self.y = floor_y - BOSS_HALF_H;
                    self.enter_state(BossState::Landing);
                }
            }
            BossState::Landing | BossState::HammerSwing | BossState::Stunned => {
                if self.state_timer <= 0.0 {
                    self.enter_state(BossState::Idle);
                }
            }
            BossState::BellySlide => {
                let dt = delta_ms / 1000.0;
                self.x += self.vx * dt;
                if terrain.touching_wall(&self.bounds()) {
                    self.x = terrain.clamp_x(self.x, BOSS_HALF_W);
                    self.enter_state(BossState::Stunned);
                } else if self.state_timer <= 0.0 {
                    self.enter_state(BossState::Idle);
                }
            }
            BossState::Defeated => {}
        }
    }

    fn update_shockwaves(&mut self, delta_ms: f32, floor_y: f32) {
        for wave in &mut self.shockwaves {
            wave.update(delta_ms, floor_y);
        }
        self.shockwaves.retain(|w| {
            if w.expired() {
                log::debug!("shockwave from x={} dissipated at x={}", w.origin_x, w.x);
                false
            } else {
                true
            }
        });
    }

    // ── State transitions ────────────────────────────────────────────────────

    fn enter_state(&mut self, new_state: BossState) {
        let prev = self.state;
        self.state = new_state;

        match new_state {
            BossState::Idle => {
                self.state_timer = self.config.idle_time;
                self.vx = 0.0;
                self.vy = 0.0;
            }
            BossState::SuperJump => {
                self.vy = -self.config.jump_speed;
                self.state_timer = SUPER_JUMP_TIMEOUT;
            }
            BossState::Falling => {
                // Steer toward where the target stood at takeoff.
                self.vx = (self.target_jump_x - self.x) * 2.0;
                self.vy = self.config.jump_speed * 1.5;
            }
            BossState::Landing => {
                self.state_timer = LANDING_RECOVERY_MS;
                self.vx = 0.0;
                self.vy = 0.0;
                self.spawn_shockwaves();
            }
            BossState::HammerSwing => {
                self.state_timer = HAMMER_WINDOW_MS;
                self.vx = 0.0;
                self.attack_cooldown = HAMMER_COOLDOWN_MS;
            }
            BossState::BellySlide => {
                self.vx = self.facing.sign() * self.config.slide_speed;
                self.state_timer = SLIDE_TIMEOUT_MS;
            }
            BossState::Stunned => {
                self.state_timer = self.config.stun_time;
                self.vx = 0.0;
                self.vy = 0.0;
            }
            BossState::Defeated => {
                self.vx = 0.0;
                self.vy = 0.0;
                self.state_timer = 3000.0;
                self.defeat_notice = Some(DEFEAT_NOTICE_DELAY_MS);
            }
        }

        log::debug!("boss state {:?} -> {:?}", prev, new_state);
    }

    /// Evaluated only from IDLE. Hammer when close and off cooldown,
    /// otherwise a weighted pick that turns aggressive below half HP.
    fn choose_next_action(&mut self, target: Vec2, rng: &mut impl Rng) {
        let distance = Vec2::new(self.x, self.y).distance_to(target);

        if distance < self.config.hammer_range && self.attack_cooldown <= 0.0 {
            self.enter_state(BossState::HammerSwing);
            return;
        }

        self.target_jump_x = target.x;

        let hp_ratio = self.hp as f32 / self.max_hp as f32;
        let r: f32 = rng.gen();

        if hp_ratio > 0.5 {
            if r < 0.4 {
                self.enter_state(BossState::SuperJump);
            } else if r < 0.7 {
                self.enter_state(BossState::BellySlide);
            } else {
                self.enter_state(BossState::Idle);
            }
        } else if r < 0.5 {
            self.enter_state(BossState::SuperJump);
        } else {
            self.enter_state(BossState::BellySlide);
        }
    }

    fn face_target(&mut self, target_x: f32) {
        self.facing = if target_x < self.x {
            Facing::Left
        } else {
            Facing::Right
        };
    }

    /// One wave per horizontal direction.
    fn spawn_shockwaves(&mut self) {
        self.shockwaves.push(ShockWave::new(
            self.x,
            self.y + BOSS_HALF_H,
            Facing::Left,
            self.wave_config.clone(),
        ));
        self.shockwaves.push(ShockWave::new(
            self.x,
            self.y + BOSS_HALF_H,
            Facing::Right,
            self.wave_config.clone(),
        ));
        log::debug!("landing shockwaves spawned at x={}", self.x);
    }
}
