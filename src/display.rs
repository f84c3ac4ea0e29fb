/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// world.  No game logic is performed; this module only projects world
/// coordinates onto terminal cells and queues crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use puffball::boss::BossState;
use puffball::config::{WORLD_HEIGHT, WORLD_WIDTH};
use puffball::entities::{CopyAbility, EnemyKind, MotionState};
use puffball::obstacles::FoodKind;
use puffball::world::World;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HP: Color = Color::Red;
const C_PLAYER: Color = Color::Magenta;
const C_PLAYER_FULL: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_ENEMY_FROZEN: Color = Color::Cyan;
const C_BOSS: Color = Color::Red;
const C_SPIKE: Color = Color::DarkGrey;
const C_PLATFORM: Color = Color::DarkYellow;
const C_FOOD: Color = Color::Green;
const C_STAR: Color = Color::Yellow;
const C_WAVE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Projects a world point onto a terminal cell inside the playfield.
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let inner_w = self.width.saturating_sub(2) as f32;
        let inner_h = self.height.saturating_sub(4) as f32;
        let col = 1.0 + (x / WORLD_WIDTH).clamp(0.0, 1.0) * (inner_w - 1.0);
        let row = 2.0 + (y / WORLD_HEIGHT).clamp(0.0, 1.0) * (inner_h - 1.0);
        (col as u16, row as u16)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport { width, height };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, world, &view)?;

    for spike in &world.obstacles.spikes {
        let (col, row) = view.cell(spike.x, spike.y);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_SPIKE))?;
        out.queue(Print("▲"))?;
    }

    for platform in &world.terrain.platforms {
        draw_platform(out, &view, platform.cx, platform.cy, platform.w)?;
    }
    for platform in &world.obstacles.platforms {
        draw_platform(out, &view, platform.x, platform.y, platform.width)?;
    }

    for food in &world.obstacles.foods {
        let (col, row) = view.cell(food.x, food.y);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_FOOD))?;
        let symbol = match food.kind {
            FoodKind::Apple => "a",
            FoodKind::Tomato => "t",
            FoodKind::MaximTomato => "T",
        };
        out.queue(Print(symbol))?;
    }

    for enemy in world.enemies.iter() {
        let (col, row) = view.cell(enemy.x, enemy.y);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(if enemy.frozen {
            C_ENEMY_FROZEN
        } else {
            C_ENEMY
        }))?;
        out.queue(Print(enemy_symbol(enemy.kind)))?;
    }

    for star in &world.stars {
        let (col, row) = view.cell(star.x, star.y);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_STAR))?;
        out.queue(Print("✦"))?;
    }

    if let Some(boss) = world.boss.as_ref() {
        draw_boss(out, world, &view)?;
        for wave in &boss.shockwaves {
            let (col, row) = view.cell(wave.x, wave.y);
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_WAVE))?;
            out.queue(Print("∿"))?;
        }
    }

    draw_player(out, world, &view)?;
    draw_controls_hint(out, &view)?;

    if world.store.game_over {
        draw_game_over(out, world, &view)?;
    } else if world.store.paused {
        draw_paused(out, &view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let store = &world.store;

    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", store.score)))?;

    // Ability tag — centre
    let ability_str = match store.ability {
        CopyAbility::None => String::new(),
        other => format!("[ {:?} ]", other).to_uppercase(),
    };
    if !ability_str.is_empty() {
        let cx = (view.width / 2).saturating_sub(ability_str.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(cx, 0))?;
        out.queue(style::SetForegroundColor(Color::Cyan))?;
        out.queue(Print(&ability_str))?;
    }

    // Boss HP bar — centre-right
    if let Some((hp, max_hp)) = store.boss_hp {
        let filled = if max_hp > 0 {
            (hp * 10 / max_hp).clamp(0, 10) as usize
        } else {
            0
        };
        let bar = format!("BOSS [{}{}]", "█".repeat(filled), "░".repeat(10 - filled));
        let bx = view
            .width
            .saturating_sub(bar.chars().count() as u16 + 14);
        out.queue(cursor::MoveTo(bx, 0))?;
        out.queue(style::SetForegroundColor(C_BOSS))?;
        out.queue(Print(&bar))?;
    }

    // HP hearts — right
    let hearts: String = "♥".repeat(store.hp.max(0) as usize);
    let hp_str = format!("HP:{}", hearts);
    let rx = view
        .width
        .saturating_sub(hp_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(&hp_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn enemy_symbol(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Normal => "ω",
        EnemyKind::Fire => "f",
        EnemyKind::Ice => "i",
        EnemyKind::Sword => "s",
        EnemyKind::Beam => "b",
        EnemyKind::Spark => "z",
    }
}

fn draw_player<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let state = &world.character.state;
    let (col, row) = view.cell(state.x, state.y);

    let (symbol, color) = match state.motion_state {
        MotionState::Full => ("●", C_PLAYER_FULL),
        MotionState::Inhaling => ("◖", C_PLAYER),
        MotionState::Hovering => ("◍", C_PLAYER),
        MotionState::Attacking => ("◉", Color::Yellow),
        _ => ("◉", C_PLAYER),
    };

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(symbol))?;
    Ok(())
}

fn draw_boss<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let Some(boss) = world.boss.as_ref() else {
        return Ok(());
    };
    let (col, row) = view.cell(boss.x, boss.y);

    let symbol = match boss.state {
        BossState::Defeated => "╳",
        BossState::HammerSwing => "Ɔ",
        BossState::BellySlide => "⊃",
        BossState::Stunned => "@",
        _ => "Ω",
    };

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_BOSS))?;
    out.queue(Print(symbol))?;
    Ok(())
}

fn draw_platform<W: Write>(
    out: &mut W,
    view: &Viewport,
    cx: f32,
    cy: f32,
    w: f32,
) -> std::io::Result<()> {
    let (col_l, row) = view.cell(cx - w / 2.0, cy);
    let (col_r, _) = view.cell(cx + w / 2.0, cy);
    let span = (col_r.saturating_sub(col_l) + 1) as usize;
    out.queue(cursor::MoveTo(col_l, row))?;
    out.queue(style::SetForegroundColor(C_PLATFORM))?;
    out.queue(Print("═".repeat(span)))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → : Move   ↓ : Swallow   SPACE : Jump/Hover   X : Inhale/Attack   P : Pause   Q : Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_paused<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let msg = "║  PAUSED — P to resume  ║";
    let col = (view.width / 2).saturating_sub(msg.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, view.height / 2))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(msg))?;
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let score_line = format!("Final Score: {:>6}", world.store.score);
    let hint = "R - Play Again  Q - Quit";

    let cx = view.width / 2;
    let total_rows = lines.len() + 2;
    let start_row = (view.height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let hint_row = score_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
