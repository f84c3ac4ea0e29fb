/// Shared game state store — the single source of truth the presentation
/// layer reads between frames.
///
/// Mutation happens only through the narrow action methods below, all of
/// which run inside the frame-update call chain. Consumers that want to
/// re-render on change (score counter, HP bar, ability icon) subscribe to
/// the change feed instead of polling.

use crate::config::CHARACTER_MAX_HP;
use crate::entities::CopyAbility;

/// A change notification pushed to subscribers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoreEvent {
    ScoreChanged(u32),
    HpChanged { hp: i32, max_hp: i32 },
    AbilityChanged(CopyAbility),
    BossHpChanged { hp: i32, max_hp: i32 },
    BossDefeated,
    GameOver,
}

type Subscriber = Box<dyn FnMut(&StoreEvent)>;

pub struct GameStore {
    pub playing: bool,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub ability: CopyAbility,
    pub boss_hp: Option<(i32, i32)>,
    subscribers: Vec<Subscriber>,
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            playing: false,
            paused: false,
            game_over: false,
            score: 0,
            hp: CHARACTER_MAX_HP,
            max_hp: CHARACTER_MAX_HP,
            ability: CopyAbility::None,
            boss_hp: None,
            subscribers: Vec::new(),
        }
    }

    /// Registers a change listener. Fired synchronously from the mutation
    /// that caused the change.
    pub fn subscribe(&mut self, f: impl FnMut(&StoreEvent) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    fn emit(&mut self, event: StoreEvent) {
        for s in &mut self.subscribers {
            s(&event);
        }
    }

    // ── Game control ─────────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.playing = true;
        self.paused = false;
        self.game_over = false;
        self.score = 0;
        self.hp = self.max_hp;
        self.ability = CopyAbility::None;
        self.boss_hp = None;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn reset(&mut self) {
        self.playing = false;
        self.paused = false;
        self.game_over = false;
        self.score = 0;
        self.hp = self.max_hp;
        self.ability = CopyAbility::None;
        self.boss_hp = None;
    }

    // ── Score / HP ───────────────────────────────────────────────────────────

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
        let score = self.score;
        self.emit(StoreEvent::ScoreChanged(score));
    }

    pub fn damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
        let (hp, max_hp) = (self.hp, self.max_hp);
        self.emit(StoreEvent::HpChanged { hp, max_hp });
        if hp == 0 && !self.game_over {
            self.game_over = true;
            self.emit(StoreEvent::GameOver);
        }
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
        let (hp, max_hp) = (self.hp, self.max_hp);
        self.emit(StoreEvent::HpChanged { hp, max_hp });
    }

    // ── Mirrors for the UI ───────────────────────────────────────────────────

    pub fn set_ability(&mut self, ability: CopyAbility) {
        if self.ability != ability {
            self.ability = ability;
            self.emit(StoreEvent::AbilityChanged(ability));
        }
    }

    pub fn set_boss_hp(&mut self, hp: i32, max_hp: i32) {
        if self.boss_hp != Some((hp, max_hp)) {
            self.boss_hp = Some((hp, max_hp));
            self.emit(StoreEvent::BossHpChanged { hp, max_hp });
        }
    }

    pub fn notify_boss_defeated(&mut self) {
        self.emit(StoreEvent::BossDefeated);
    }
}
