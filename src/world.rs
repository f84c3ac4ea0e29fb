/// Frame orchestration: owns every simulation component and runs the fixed
/// data flow — normalized input into the character, obstacles and abilities
/// against the shared store, then the boss and projectiles.

use rand::Rng;

use crate::boss::BossController;
use crate::character::CharacterController;
use crate::config::{
    BossConfig, InhaleConfig, PhysicsConfig, SCORE_STAR_KILL, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::entities::{EnemyKind, EnemyRegistry, StarProjectile};
use crate::input::{AnalogInput, DiscreteInput, InputNormalizer};
use crate::math::Rect;
use crate::obstacles::{ObstacleManager, ObstacleRecord};
use crate::store::GameStore;
use crate::terrain::Terrain;

/// Damage one ability hit (or a spat star) deals to the boss.
const ABILITY_BOSS_DAMAGE: i32 = 10;
const FLOOR_THICKNESS: f32 = 40.0;

pub struct World {
    pub store: GameStore,
    pub character: CharacterController,
    pub enemies: EnemyRegistry,
    pub boss: Option<BossController>,
    pub obstacles: ObstacleManager,
    pub terrain: Terrain,
    pub stars: Vec<StarProjectile>,
    normalizer: InputNormalizer,
    spawn_x: f32,
    spawn_y: f32,
}

impl World {
    /// Builds the default level.
    pub fn new() -> Self {
        let floor_y = WORLD_HEIGHT - FLOOR_THICKNESS;
        let mut terrain = Terrain::new(WORLD_WIDTH, floor_y);
        terrain.add_platform(Rect::new(450.0, 450.0, 120.0, 16.0));
        terrain.add_platform(Rect::new(1250.0, 420.0, 120.0, 16.0));

        let spawn_x = 100.0;
        let spawn_y = floor_y - 22.0;
        let character = CharacterController::new(
            spawn_x,
            spawn_y,
            PhysicsConfig::default(),
            InhaleConfig::default(),
        );

        let mut world = Self {
            store: GameStore::new(),
            character,
            enemies: EnemyRegistry::new(),
            boss: None,
            obstacles: ObstacleManager::new(),
            terrain,
            stars: Vec::new(),
            normalizer: InputNormalizer::new(),
            spawn_x,
            spawn_y,
        };
        world.populate();
        world
    }

    /// Places enemies, obstacles, and the boss for the default level.
    fn populate(&mut self) {
        let floor_y = self.terrain.floor_y;
        let enemy_y = floor_y - 22.0;

        self.enemies.spawn(EnemyKind::Normal, 350.0, enemy_y, 80.0);
        self.enemies.spawn(EnemyKind::Fire, 500.0, enemy_y, 60.0);
        self.enemies.spawn(EnemyKind::Ice, 700.0, enemy_y, 60.0);
        self.enemies.spawn(EnemyKind::Spark, 950.0, enemy_y, 80.0);

        let spike_y = floor_y - 12.0;
        self.obstacles.load(&[
            ObstacleRecord {
                kind: "spike".into(),
                x: 550.0,
                y: spike_y,
                ..Default::default()
            },
            ObstacleRecord {
                kind: "spike".into(),
                x: 582.0,
                y: spike_y,
                ..Default::default()
            },
            ObstacleRecord {
                kind: "spike".into(),
                x: 614.0,
                y: spike_y,
                ..Default::default()
            },
            ObstacleRecord {
                kind: "platform".into(),
                x: 750.0,
                y: 440.0,
                path: Some("horizontal".into()),
                range: Some(200.0),
                speed: Some(80.0),
                wait_ms: Some(500.0),
                ..Default::default()
            },
            ObstacleRecord {
                kind: "platform".into(),
                x: 1100.0,
                y: 480.0,
                path: Some("vertical".into()),
                range: Some(-160.0),
                speed: Some(80.0),
                wait_ms: Some(500.0),
                ..Default::default()
            },
            ObstacleRecord {
                kind: "food".into(),
                x: 400.0,
                y: floor_y - 20.0,
                food: Some("apple".into()),
                ..Default::default()
            },
            ObstacleRecord {
                kind: "food".into(),
                x: 850.0,
                y: 400.0,
                food: Some("tomato".into()),
                ..Default::default()
            },
            ObstacleRecord {
                kind: "food".into(),
                x: 1200.0,
                y: floor_y - 20.0,
                food: Some("maxim".into()),
                ..Default::default()
            },
        ]);

        let boss = BossController::new(1400.0, floor_y - 28.0, BossConfig::default());
        self.store.set_boss_hp(boss.hp, boss.max_hp);
        self.boss = Some(boss);
    }

    // ── Game control ─────────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.store.start();
        log::info!("game started");
    }

    pub fn pause(&mut self) {
        self.store.pause();
    }

    pub fn resume(&mut self) {
        self.store.resume();
    }

    /// Returns the whole world to its initial layout.
    pub fn reset(&mut self) {
        self.store.reset();
        self.character.reset(self.spawn_x, self.spawn_y);
        self.enemies.clear();
        self.obstacles.clear();
        self.stars.clear();
        self.normalizer.reset();
        self.boss = None;
        self.populate();
        log::info!("world reset");
    }

    // ── Frame update ─────────────────────────────────────────────────────────

    pub fn update(
        &mut self,
        analog: &AnalogInput,
        discrete: &DiscreteInput,
        delta_ms: f32,
        rng: &mut impl Rng,
    ) {
        let cmd = self.normalizer.merge(analog, discrete);

        if !self.store.playing || self.store.paused || self.store.game_over {
            return;
        }

        self.enemies.update_patrol(delta_ms);

        let supports = self.obstacles.support_rects();
        self.character.update(
            &cmd,
            delta_ms,
            &self.terrain,
            &supports,
            &mut self.enemies,
            &mut self.store,
            &mut self.stars,
        );

        self.obstacles
            .update(delta_ms, &mut self.character, &mut self.store);

        self.update_stars(delta_ms);
        self.update_boss(delta_ms, rng);
    }

    /// Moves spat stars, killing the first enemy each one touches.
    fn update_stars(&mut self, delta_ms: f32) {
        let dt = delta_ms / 1000.0;
        let width = self.terrain.width;
        let enemies = &mut self.enemies;
        let store = &mut self.store;
        let boss = self.boss.as_mut();

        let mut boss_hits = 0;
        self.stars.retain_mut(|star| {
            star.x += star.vx * dt;
            star.ttl -= delta_ms;
            if star.ttl <= 0.0 || star.x < 0.0 || star.x > width {
                return false;
            }

            let star_bounds = Rect::new(star.x, star.y, 16.0, 16.0);
            let hit = enemies
                .iter()
                .find(|e| star_bounds.intersects(&e.bounds()))
                .map(|e| e.id);
            if let Some(id) = hit {
                enemies.remove(id);
                store.add_score(SCORE_STAR_KILL);
                log::debug!("star projectile destroyed enemy #{}", id);
                return false;
            }

            if let Some(boss) = boss.as_ref() {
                if boss.is_alive() && star_bounds.intersects(&boss.bounds()) {
                    boss_hits += 1;
                    return false;
                }
            }
            true
        });

        if let Some(boss) = boss {
            for _ in 0..boss_hits {
                boss.take_damage(ABILITY_BOSS_DAMAGE, store);
            }
        }
    }

    fn update_boss(&mut self, delta_ms: f32, rng: &mut impl Rng) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };

        boss.update(
            self.character.position(),
            delta_ms,
            rng,
            &self.terrain,
            &mut self.store,
        );

        // Player ability hitting the boss.
        if boss.is_alive() {
            if let Some(shape) = self.character.ability_hitbox() {
                let owner = self.character.position();
                let facing = self.character.state.facing;
                if shape.overlaps(owner, facing, &boss.bounds()) {
                    boss.take_damage(ABILITY_BOSS_DAMAGE, &mut self.store);
                }
            }
        }

        // Boss hitting the player. `hurt` gates repeats behind the
        // character's invincibility window.
        let char_bounds = self.character.bounds();
        let away = if self.character.position().x < boss.x {
            -300.0
        } else {
            300.0
        };

        if let Some(hammer) = boss.hammer_hitbox() {
            if hammer.intersects(&char_bounds) {
                self.character
                    .hurt(boss.contact_damage(), away, -200.0, &mut self.store);
            }
        }

        if boss.body_is_dangerous() && boss.bounds().intersects(&char_bounds) {
            self.character
                .hurt(boss.contact_damage(), away, -200.0, &mut self.store);
        }

        for wave in &boss.shockwaves {
            if wave.bounds().intersects(&char_bounds) {
                let push = if self.character.position().x < wave.x {
                    -300.0
                } else {
                    300.0
                };
                self.character
                    .hurt(wave.damage(), push, -200.0, &mut self.store);
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
