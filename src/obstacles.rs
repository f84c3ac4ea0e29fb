/// Level obstacles — spikes, moving platforms, and food pickups — plus the
/// manager that loads them from level records and runs their per-frame
/// interactions with the character.

use crate::character::CharacterController;
use crate::math::{ease_in_out_quad, Rect, Vec2};
use crate::store::GameStore;

const SPIKE_DAMAGE: i32 = 1;
const SPIKE_KNOCKBACK_X: f32 = 300.0;
const SPIKE_KNOCKBACK_Y: f32 = -200.0;
/// Vertical slack when deciding whether the character rides a platform.
const RIDE_TOLERANCE: f32 = 6.0;

pub type ObstacleId = u32;

// ── Spikes ───────────────────────────────────────────────────────────────────

/// A stationary hazard. Touching it costs one HP and knocks the character
/// away from the spike's centre.
#[derive(Clone, Debug)]
pub struct Spike {
    pub id: ObstacleId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Spike {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Moving platforms ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlatformPath {
    /// Back and forth along x over `range` pixels.
    Horizontal { range: f32 },
    /// Back and forth along y over `range` pixels.
    Vertical { range: f32 },
    /// A full circle whose diameter is `diameter` pixels.
    Circular { diameter: f32 },
}

/// A one-way platform following a fixed path. Progress runs 0..1; linear
/// paths ease at both ends and wait before reversing, circular paths loop.
#[derive(Clone, Debug)]
pub struct MovingPlatform {
    pub id: ObstacleId,
    origin: Vec2,
    path: PlatformPath,
    /// Path speed, px/s, converted to a progress rate per path length.
    speed: f32,
    wait_ms: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    progress: f32,
    forward: bool,
    wait_timer: f32,
}

impl MovingPlatform {
    pub fn new(
        id: ObstacleId,
        x: f32,
        y: f32,
        width: f32,
        path: PlatformPath,
        speed: f32,
        wait_ms: f32,
    ) -> Self {
        Self {
            id,
            origin: Vec2::new(x, y),
            path,
            speed,
            wait_ms,
            x,
            y,
            width,
            height: 16.0,
            progress: 0.0,
            forward: true,
            wait_timer: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn path_length(&self) -> f32 {
        match self.path {
            // Range may be negative (motion toward -x / -y).
            PlatformPath::Horizontal { range } | PlatformPath::Vertical { range } => range.abs(),
            PlatformPath::Circular { diameter } => diameter.abs() * std::f32::consts::PI,
        }
    }

    /// Advances the path and returns how far the surface moved this frame,
    /// so riders can be carried by the same amount.
    pub fn update(&mut self, delta_ms: f32) -> (f32, f32) {
        let (prev_x, prev_y) = (self.x, self.y);

        if self.wait_timer > 0.0 {
            self.wait_timer -= delta_ms;
        } else {
            let length = self.path_length().max(1.0);
            let step = self.speed / length * (delta_ms / 1000.0);

            match self.path {
                PlatformPath::Circular { .. } => {
                    // Loops; no endpoint wait.
                    self.progress = (self.progress + step) % 1.0;
                }
                _ => {
                    if self.forward {
                        self.progress += step;
                        if self.progress >= 1.0 {
                            self.progress = 1.0;
                            self.forward = false;
                            self.wait_timer = self.wait_ms;
                        }
                    } else {
                        self.progress -= step;
                        if self.progress <= 0.0 {
                            self.progress = 0.0;
                            self.forward = true;
                            self.wait_timer = self.wait_ms;
                        }
                    }
                }
            }
        }

        let (x, y) = self.position_at(self.progress);
        self.x = x;
        self.y = y;
        (self.x - prev_x, self.y - prev_y)
    }

    fn position_at(&self, progress: f32) -> (f32, f32) {
        match self.path {
            PlatformPath::Horizontal { range } => {
                let t = ease_in_out_quad(progress);
                (self.origin.x + range * t, self.origin.y)
            }
            PlatformPath::Vertical { range } => {
                let t = ease_in_out_quad(progress);
                (self.origin.x, self.origin.y + range * t)
            }
            PlatformPath::Circular { diameter } => {
                let radius = diameter / 2.0;
                let angle = progress * std::f32::consts::TAU;
                (
                    self.origin.x + radius * angle.cos(),
                    self.origin.y + radius * angle.sin(),
                )
            }
        }
    }
}

// ── Food ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodKind {
    Apple,
    Tomato,
    /// Restores all HP.
    MaximTomato,
}

impl FoodKind {
    fn heal_amount(self, max_hp: i32) -> i32 {
        match self {
            FoodKind::Apple => 1,
            FoodKind::Tomato => 3,
            FoodKind::MaximTomato => max_hp,
        }
    }
}

/// A healing pickup. `collected` is a write-once latch so a pickup heals
/// exactly once even if overlap persists across frames.
#[derive(Clone, Debug)]
pub struct Food {
    pub id: ObstacleId,
    pub kind: FoodKind,
    pub x: f32,
    pub y: f32,
    pub collected: bool,
}

impl Food {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, 24.0, 24.0)
    }
}

// ── Level records ────────────────────────────────────────────────────────────

/// One entry of a level's obstacle layout, as loaded from level data.
/// `kind` is matched loosely; unknown kinds are skipped with a warning.
#[derive(Clone, Debug, Default)]
pub struct ObstacleRecord {
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    /// Platform path: "horizontal", "vertical", or "circular".
    pub path: Option<String>,
    pub range: Option<f32>,
    pub speed: Option<f32>,
    pub wait_ms: Option<f32>,
    /// Food kind: "apple", "tomato", or "maxim".
    pub food: Option<String>,
}

// ── Manager ──────────────────────────────────────────────────────────────────

pub struct ObstacleManager {
    next_id: ObstacleId,
    pub spikes: Vec<Spike>,
    pub platforms: Vec<MovingPlatform>,
    pub foods: Vec<Food>,
}

impl ObstacleManager {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            spikes: Vec::new(),
            platforms: Vec::new(),
            foods: Vec::new(),
        }
    }

    fn alloc_id(&mut self) -> ObstacleId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn clear(&mut self) {
        self.spikes.clear();
        self.platforms.clear();
        self.foods.clear();
    }

    // ── Spawning ─────────────────────────────────────────────────────────────

    pub fn add_spike(&mut self, x: f32, y: f32, width: f32) -> ObstacleId {
        let id = self.alloc_id();
        self.spikes.push(Spike {
            id,
            x,
            y,
            width,
            height: 24.0,
        });
        id
    }

    pub fn add_platform(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        path: PlatformPath,
        speed: f32,
        wait_ms: f32,
    ) -> ObstacleId {
        let id = self.alloc_id();
        self.platforms
            .push(MovingPlatform::new(id, x, y, width, path, speed, wait_ms));
        id
    }

    pub fn add_food(&mut self, x: f32, y: f32, kind: FoodKind) -> ObstacleId {
        let id = self.alloc_id();
        self.foods.push(Food {
            id,
            kind,
            x,
            y,
            collected: false,
        });
        id
    }

    /// Bulk load from level records. Kind strings are normalized so level
    /// data can say "spike" or "spikes", "platform" or "moving_platform".
    pub fn load(&mut self, records: &[ObstacleRecord]) {
        for record in records {
            match record.kind.to_ascii_lowercase().as_str() {
                "spike" | "spikes" => {
                    self.add_spike(record.x, record.y, record.width.unwrap_or(32.0));
                }
                "platform" | "moving_platform" | "movingplatform" => {
                    let path = match record.path.as_deref() {
                        Some("vertical") => PlatformPath::Vertical {
                            range: record.range.unwrap_or(100.0),
                        },
                        Some("circular") => PlatformPath::Circular {
                            diameter: record.range.unwrap_or(100.0),
                        },
                        _ => PlatformPath::Horizontal {
                            range: record.range.unwrap_or(100.0),
                        },
                    };
                    self.add_platform(
                        record.x,
                        record.y,
                        record.width.unwrap_or(96.0),
                        path,
                        record.speed.unwrap_or(80.0),
                        record.wait_ms.unwrap_or(500.0),
                    );
                }
                "food" | "item" => {
                    let kind = match record.food.as_deref() {
                        Some("tomato") => FoodKind::Tomato,
                        Some("maxim") | Some("maxim_tomato") => FoodKind::MaximTomato,
                        _ => FoodKind::Apple,
                    };
                    self.add_food(record.x, record.y, kind);
                }
                other => {
                    log::warn!("unknown obstacle kind {:?}, skipping", other);
                }
            }
        }
        log::info!(
            "obstacles loaded: {} spikes, {} platforms, {} foods",
            self.spikes.len(),
            self.platforms.len(),
            self.foods.len()
        );
    }

    // ── Frame update ─────────────────────────────────────────────────────────

    /// Moves platforms (carrying a riding character), then applies spike
    /// contact damage and food pickups.
    pub fn update(
        &mut self,
        delta_ms: f32,
        character: &mut CharacterController,
        store: &mut GameStore,
    ) {
        let char_bounds = character.bounds();

        for platform in &mut self.platforms {
            let riding = is_riding(&char_bounds, &platform.bounds());
            let (dx, dy) = platform.update(delta_ms);
            if riding && (dx != 0.0 || dy != 0.0) {
                character.shift(dx, dy);
            }
        }

        let char_bounds = character.bounds();

        for spike in &self.spikes {
            if char_bounds.intersects(&spike.bounds()) {
                let away = if character.position().x < spike.x {
                    -SPIKE_KNOCKBACK_X
                } else {
                    SPIKE_KNOCKBACK_X
                };
                character.hurt(SPIKE_DAMAGE, away, SPIKE_KNOCKBACK_Y, store);
            }
        }

        for food in &mut self.foods {
            if !food.collected && char_bounds.intersects(&food.bounds()) {
                food.collected = true;
                store.heal(food.kind.heal_amount(store.max_hp));
                log::debug!("food #{} ({:?}) collected", food.id, food.kind);
            }
        }
        self.foods.retain(|f| !f.collected);
    }

    /// Current platform surfaces, for the ground-support query.
    pub fn support_rects(&self) -> Vec<Rect> {
        self.platforms.iter().map(|p| p.bounds()).collect()
    }
}

impl Default for ObstacleManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Riding means standing on the platform's top edge with x overlap.
fn is_riding(rider: &Rect, platform: &Rect) -> bool {
    let overlaps_x = rider.right() > platform.left() && rider.left() < platform.right();
    let on_top = (rider.bottom() - platform.top()).abs() <= RIDE_TOLERANCE;
    overlaps_x && on_top
}
