/// Fixed gameplay constants.
///
/// Everything tunable lives here as a plain struct with a `Default` impl,
/// so tests can build variants without touching globals.

/// Movement and gravity parameters for the character.
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Downward acceleration, px/s².
    pub gravity: f32,
    /// Horizontal walk speed, px/s.
    pub walk_speed: f32,
    /// Initial jump velocity, px/s (negative = up).
    pub jump_velocity: f32,
    /// Upward thrust at the start of a hover, px/s.
    pub hover_velocity: f32,
    /// Fall speed the hover decays toward when jump is released, px/s.
    pub hover_fall_speed: f32,
    /// Terminal fall speed, px/s.
    pub max_fall_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 800.0,
            walk_speed: 200.0,
            jump_velocity: -350.0,
            hover_velocity: -150.0,
            hover_fall_speed: 50.0,
            max_fall_speed: 400.0,
        }
    }
}

/// Geometry of the inhale cone ahead of the character.
#[derive(Clone, Debug)]
pub struct InhaleConfig {
    pub radius: f32,
    /// Full cone angle in radians.
    pub angle: f32,
    /// Base pull speed, px/s; scales up as the enemy gets closer.
    pub pull_force: f32,
    /// Distance at which a pulled enemy is captured.
    pub capture_distance: f32,
}

impl Default for InhaleConfig {
    fn default() -> Self {
        Self {
            radius: 150.0,
            angle: std::f32::consts::FRAC_PI_3,
            pull_force: 300.0,
            capture_distance: 30.0,
        }
    }
}

/// Boss tuning. Timers are in milliseconds.
#[derive(Clone, Debug)]
pub struct BossConfig {
    pub max_hp: i32,
    /// Contact / hammer damage dealt to the character.
    pub damage: i32,
    pub jump_speed: f32,
    pub slide_speed: f32,
    pub hammer_range: f32,
    pub idle_time: f32,
    pub stun_time: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_hp: 100,
            damage: 2,
            jump_speed: 600.0,
            slide_speed: 500.0,
            hammer_range: 120.0,
            idle_time: 1500.0,
            stun_time: 1000.0,
        }
    }
}

/// Shockwave sub-entity tuning.
#[derive(Clone, Debug)]
pub struct ShockWaveConfig {
    pub speed: f32,
    pub max_distance: f32,
    pub damage: i32,
    /// Upward hop applied on spawn, px/s.
    pub hop_velocity: f32,
    /// Gravity applied to the hop, px/s².
    pub gravity: f32,
}

impl Default for ShockWaveConfig {
    fn default() -> Self {
        Self {
            speed: 350.0,
            max_distance: 300.0,
            damage: 1,
            hop_velocity: -100.0,
            gravity: 200.0,
        }
    }
}

// ── Score awards ─────────────────────────────────────────────────────────────

/// Capturing an enemy with the inhale.
pub const SCORE_CAPTURE: u32 = 100;
/// Killing an enemy with an ability hitbox.
pub const SCORE_ABILITY_HIT: u32 = 150;
/// Spitting the swallowed enemy back out.
pub const SCORE_SPIT: u32 = 50;
/// A spat star projectile killing an enemy.
pub const SCORE_STAR_KILL: u32 = 200;

// ── Character ────────────────────────────────────────────────────────────────

pub const CHARACTER_MAX_HP: i32 = 6;
/// Hover budget in ms before a forced fall.
pub const HOVER_BUDGET: f32 = 3000.0;
/// Half-extents of the character's collision box.
pub const CHARACTER_HALF_W: f32 = 20.0;
pub const CHARACTER_HALF_H: f32 = 22.0;

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY_PATROL_SPEED: f32 = 60.0;
pub const ENEMY_HALF_W: f32 = 20.0;
pub const ENEMY_HALF_H: f32 = 22.0;

// ── Spit projectile ──────────────────────────────────────────────────────────

pub const STAR_SPEED: f32 = 500.0;
pub const STAR_LIFETIME: f32 = 2000.0;

// ── World bounds ─────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 1600.0;
pub const WORLD_HEIGHT: f32 = 600.0;
