//! Interactive terminal session for one minigame.
//!
//! Raw-mode alternate-screen loop: non-blocking input polling, wall-clock
//! deltas fed into the session's fixed-step ticker, and a guaranteed
//! terminal restore on the way out. The session is closed on every exit
//! path, whatever state the game is in.

use std::io::{stdout, Stdout, Write};
use std::str::FromStr;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use valweek_core::config::Config;
use valweek_core::days::{self, DayKey};
use valweek_core::games::{Choice, GameInput, GameView};
use valweek_core::session::GameSession;
use valweek_core::storage::{self, JsonProgressStore, PhotoDb};
use valweek_core::{unlock, Event};

use super::{short_date, UnlockArgs};

const FRAME: Duration = Duration::from_millis(33);

/// Field dimensions the coordinate games play on.
const FIELD_W: f32 = 360.0;
const FIELD_H: f32 = 420.0;
/// Terminal cells that field maps onto.
const GRID_W: usize = 60;
const GRID_H: usize = 21;

/// Signature capture box (matches the card renderer).
const SIG_W: f32 = 720.0;
const SIG_H: f32 = 300.0;

pub fn run(args: &UnlockArgs, day_raw: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let progress = Box::new(JsonProgressStore::open_default()?);

    let mut session = match DayKey::from_str(day_raw) {
        Ok(day) => {
            let desc = days::descriptor(day);
            if !unlock::is_unlocked(args.today(), desc.unlock_date, args.dev) {
                println!(
                    "{} is locked. It unlocks {}.",
                    desc.title,
                    short_date(desc.unlock_date)
                );
                return Ok(());
            }
            let photos = PhotoDb::open_default()?;
            let card_dir = storage::data_dir()?;
            let seed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| u64::from(d.subsec_nanos()))
                .unwrap_or(7);
            let (session, _) = GameSession::open(day, &config, progress, &photos, card_dir, seed);
            session
        }
        Err(_) => GameSession::open_unknown(day_raw, progress),
    };

    let mut term = Term::begin()?;
    let result = event_loop(&mut term, &mut session);
    // Teardown runs on every path: cancel the ticker, restore the terminal.
    session.close();
    term.end()?;
    result
}

struct Term {
    out: Stdout,
}

impl Term {
    fn begin() -> Result<Self, Box<dyn std::error::Error>> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { out })
    }

    fn end(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        execute!(self.out, cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

#[derive(Default)]
struct UiState {
    /// Cursor in field coordinates for the tap games.
    cursor: (f32, f32),
    /// Hold toggle for hug/kiss.
    holding: bool,
    /// Tray position and target cell for the jigsaw.
    tray_pos: usize,
    cell_cursor: (usize, usize),
    /// Signature pen for the pledge.
    pen_down: bool,
    sig_cursor: (f32, f32),
    current_stroke: Vec<(f32, f32)>,
    /// Overlay and status lines.
    celebration: Option<String>,
    note: Option<String>,
}

impl UiState {
    fn new() -> Self {
        Self {
            cursor: (FIELD_W / 2.0, FIELD_H / 2.0),
            sig_cursor: (SIG_W / 2.0, SIG_H / 2.0),
            ..Self::default()
        }
    }

    fn absorb(&mut self, events: Vec<Event>) {
        for event in events {
            match event {
                Event::GameWon { message, .. } => self.celebration = Some(message),
                Event::RetryPrompt { message, .. } => self.note = Some(message),
                Event::CardSaved { path, .. } => self.note = Some(format!("Saved {path}")),
                Event::CardFailed { message, .. } => {
                    self.note = Some(format!("Could not save card: {message}"))
                }
                _ => {}
            }
        }
    }
}

fn event_loop(
    term: &mut Term,
    session: &mut GameSession,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ui = UiState::new();
    let mut last = Instant::now();

    loop {
        while event::poll(Duration::from_millis(1))? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
                    continue;
                }
                if handle_key(key.code, session, &mut ui) {
                    return Ok(());
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_millis() as u64;
        last = now;
        let events = session.advance(dt);
        ui.absorb(events);

        draw(term, session, &ui)?;
        std::thread::sleep(FRAME);
    }
}

/// Returns true when the loop should exit.
fn handle_key(code: KeyCode, session: &mut GameSession, ui: &mut UiState) -> bool {
    if matches!(code, KeyCode::Esc | KeyCode::Char('q')) {
        return true;
    }
    if ui.celebration.is_some() {
        if code == KeyCode::Enter {
            ui.celebration = None;
        }
        return false;
    }

    let step_x = FIELD_W / GRID_W as f32;
    let step_y = FIELD_H / GRID_H as f32;

    match session.view() {
        GameView::Petals(_) | GameView::Hide(_) => match code {
            KeyCode::Left => ui.cursor.0 = (ui.cursor.0 - step_x).max(0.0),
            KeyCode::Right => ui.cursor.0 = (ui.cursor.0 + step_x).min(FIELD_W),
            KeyCode::Up => ui.cursor.1 = (ui.cursor.1 - step_y).max(0.0),
            KeyCode::Down => ui.cursor.1 = (ui.cursor.1 + step_y).min(FIELD_H),
            KeyCode::Char(' ') => {
                let events = session.input(GameInput::Tap {
                    x: ui.cursor.0,
                    y: ui.cursor.1,
                });
                ui.absorb(events);
            }
            KeyCode::Char('r') => {
                ui.absorb(session.input(GameInput::Restart));
            }
            _ => {}
        },
        GameView::Stack(_) => {
            if matches!(code, KeyCode::Char(' ') | KeyCode::Enter) {
                let events = session.input(GameInput::Drop);
                ui.absorb(events);
            }
        }
        GameView::Hug(_) | GameView::Kiss(_) => {
            if code == KeyCode::Char(' ') {
                ui.holding = !ui.holding;
                let input = if ui.holding {
                    GameInput::Press
                } else {
                    GameInput::Release
                };
                let events = session.input(input);
                ui.absorb(events);
            }
        }
        GameView::Jigsaw(view) => match code {
            KeyCode::Tab => {
                if !view.tray.is_empty() {
                    ui.tray_pos = (ui.tray_pos + 1) % view.tray.len();
                }
            }
            KeyCode::Left => ui.cell_cursor.1 = ui.cell_cursor.1.saturating_sub(1),
            KeyCode::Right => {
                ui.cell_cursor.1 = (ui.cell_cursor.1 + 1).min(view.cols as usize - 1)
            }
            KeyCode::Up => ui.cell_cursor.0 = ui.cell_cursor.0.saturating_sub(1),
            KeyCode::Down => ui.cell_cursor.0 = (ui.cell_cursor.0 + 1).min(view.rows as usize - 1),
            KeyCode::Enter => {
                if let Some(&tile) = view.tray.get(ui.tray_pos.min(view.tray.len().saturating_sub(1))) {
                    let x = (ui.cell_cursor.1 as f32 + 0.5) * view.tile_w;
                    let y = (ui.cell_cursor.0 as f32 + 0.5) * view.tile_h;
                    ui.tray_pos = 0;
                    let events = session.input(GameInput::PlaceTile { tile, x, y });
                    ui.absorb(events);
                }
            }
            KeyCode::Char('g') => {
                let (rows, cols) = if view.rows == 2 { (3, 3) } else { (2, 3) };
                ui.absorb(session.input(GameInput::SetGrid { rows, cols }));
            }
            KeyCode::Char('r') => {
                ui.absorb(session.input(GameInput::Restart));
            }
            _ => {}
        },
        GameView::Memory(_) => match code {
            KeyCode::Char('a') => ui.absorb(session.input(GameInput::Answer(Choice::A))),
            KeyCode::Char('b') => ui.absorb(session.input(GameInput::Answer(Choice::B))),
            _ => {}
        },
        GameView::Pledge(view) => match code {
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if idx < view.pledges.len() {
                    ui.absorb(session.input(GameInput::SelectPledge(idx)));
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                let (dx, dy) = match code {
                    KeyCode::Left => (-12.0, 0.0),
                    KeyCode::Right => (12.0, 0.0),
                    KeyCode::Up => (0.0, -12.0),
                    _ => (0.0, 12.0),
                };
                ui.sig_cursor.0 = (ui.sig_cursor.0 + dx).clamp(0.0, SIG_W);
                ui.sig_cursor.1 = (ui.sig_cursor.1 + dy).clamp(0.0, SIG_H);
                if ui.pen_down {
                    ui.current_stroke.push(ui.sig_cursor);
                }
            }
            KeyCode::Char(' ') => {
                ui.pen_down = !ui.pen_down;
                if ui.pen_down {
                    ui.current_stroke.push(ui.sig_cursor);
                } else if !ui.current_stroke.is_empty() {
                    let stroke = std::mem::take(&mut ui.current_stroke);
                    ui.absorb(session.input(GameInput::Stroke(stroke)));
                }
            }
            KeyCode::Char('c') => {
                ui.current_stroke.clear();
                ui.pen_down = false;
                ui.absorb(session.input(GameInput::ClearSignature));
            }
            KeyCode::Char('s') => {
                // Flush an in-flight stroke before saving.
                if !ui.current_stroke.is_empty() {
                    let stroke = std::mem::take(&mut ui.current_stroke);
                    ui.absorb(session.input(GameInput::Stroke(stroke)));
                }
                ui.pen_down = false;
                ui.absorb(session.input(GameInput::SaveCard));
            }
            _ => {}
        },
        GameView::Placeholder { .. } => {}
    }
    false
}

fn field_cell(x: f32, y: f32) -> (usize, usize) {
    let col = ((x / FIELD_W) * GRID_W as f32) as usize;
    let row = ((y / FIELD_H) * GRID_H as f32) as usize;
    (col.min(GRID_W - 1), row.min(GRID_H - 1))
}

fn blank_grid() -> Vec<Vec<char>> {
    vec![vec![' '; GRID_W]; GRID_H]
}

fn grid_lines(grid: &[Vec<char>]) -> Vec<String> {
    let mut lines = vec![format!("+{}+", "-".repeat(GRID_W))];
    for row in grid {
        lines.push(format!("|{}|", row.iter().collect::<String>()));
    }
    lines.push(format!("+{}+", "-".repeat(GRID_W)));
    lines
}

fn meter(fraction: f32, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0)) * width as f32) as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn view_lines(session: &GameSession, ui: &UiState) -> Vec<String> {
    match session.view() {
        GameView::Petals(view) => {
            let mut grid = blank_grid();
            for petal in &view.petals {
                if petal.y >= 0.0 && petal.y <= FIELD_H {
                    let (col, row) = field_cell(petal.x, petal.y);
                    grid[row][col] = '*';
                }
            }
            let (col, row) = field_cell(ui.cursor.0, ui.cursor.1);
            grid[row][col] = '+';
            let mut lines = grid_lines(&grid);
            lines.push(format!("Petals: {} / {}", view.collected, view.target));
            lines.push("arrows move · space tap · r restart".to_string());
            lines
        }
        GameView::Hide(view) => {
            let mut grid = blank_grid();
            let (hcol, hrow) = field_cell(view.hint.0, view.hint.1);
            grid[hrow][hcol] = if view.found { '@' } else { '~' };
            for ripple in &view.ripples {
                let (col, row) = field_cell(ripple.x, ripple.y);
                grid[row][col] = 'o';
            }
            let (col, row) = field_cell(ui.cursor.0, ui.cursor.1);
            grid[row][col] = '+';
            let mut lines = grid_lines(&grid);
            lines.push("He hides behind things; only an ear peeks out.".to_string());
            lines.push("arrows move · space probe".to_string());
            lines
        }
        GameView::Stack(view) => {
            let mut grid = blank_grid();
            for bar in &view.bars {
                let (ccol, crow) = field_cell(bar.x, bar.y);
                let half = ((bar.w / FIELD_W) * GRID_W as f32 / 2.0) as usize;
                let lo = ccol.saturating_sub(half);
                let hi = (ccol + half).min(GRID_W - 1);
                for col in lo..=hi {
                    grid[crow][col] = if bar.settled { '=' } else { '#' };
                }
            }
            let mut lines = grid_lines(&grid);
            lines.push(format!("Bars: {} / {}", view.dropped, view.target));
            lines.push("space drop".to_string());
            lines
        }
        GameView::Hug(view) => {
            let state = if view.holding { "Holding..." } else { "Hold to hug" };
            vec![
                String::new(),
                format!("  {state}"),
                format!("  {} {:.1}s", meter(view.warmth, 40), view.charge_ms as f32 / 1000.0),
                String::new(),
                "  space toggles the hold".to_string(),
            ]
        }
        GameView::Kiss(view) => {
            let width = 50usize;
            let mut bar: Vec<char> = meter(view.pct / 100.0, width).chars().collect();
            for pct in view.band {
                let idx = 1 + ((pct / 100.0) * width as f32) as usize;
                if idx < bar.len() - 1 {
                    bar[idx] = '|';
                }
            }
            vec![
                String::new(),
                "  Release inside the band for the perfect kiss.".to_string(),
                format!("  {} {:.0}%", bar.iter().collect::<String>(), view.pct),
                String::new(),
                "  space press/release".to_string(),
            ]
        }
        GameView::Jigsaw(view) => {
            let mut lines = vec![String::new()];
            if let Some(note) = view.note {
                lines.push(format!("  {note}"));
                return lines;
            }
            for row in 0..view.rows as usize {
                let mut line = String::from("  ");
                for col in 0..view.cols as usize {
                    let cell = row * view.cols as usize + col;
                    let here = ui.cell_cursor == (row, col);
                    let mark = if view.locked[cell] { '#' } else { '.' };
                    line.push(if here { '[' } else { ' ' });
                    line.push(mark);
                    line.push(if here { ']' } else { ' ' });
                }
                lines.push(line);
            }
            let selected = view.tray.get(ui.tray_pos.min(view.tray.len().saturating_sub(1)));
            lines.push(format!(
                "  tray: {:?} · holding tile {:?} · {} left",
                view.tray, selected, view.remaining
            ));
            lines.push("  tab pick tile · arrows choose cell · enter place · g grid".to_string());
            lines
        }
        GameView::Memory(view) => {
            let mut lines = vec![String::new()];
            match view.current {
                Some(round) => {
                    lines.push(format!("  Memory {} / {}", view.round + 1, view.total));
                    let photo = if round.photo_available {
                        format!("[photo {}]", round.photo_id)
                    } else {
                        "[image not found]".to_string()
                    };
                    lines.push(format!("  {photo}"));
                    lines.push(format!("  a) {}", round.caption_a));
                    lines.push(format!("  b) {}", round.caption_b));
                }
                None => {
                    if let Some(letter) = view.letter {
                        lines.push("  For You ❤️".to_string());
                        for raw in letter.lines() {
                            lines.push(format!("  {raw}"));
                        }
                    }
                }
            }
            lines
        }
        GameView::Pledge(view) => {
            let mut lines = vec![String::new()];
            for (idx, pledge) in view.pledges.iter().enumerate() {
                let mark = if idx == view.selected { '>' } else { ' ' };
                lines.push(format!("  {mark} {}. {pledge}", idx + 1));
            }
            lines.push(String::new());
            let pen = if ui.pen_down { "pen down" } else { "pen up" };
            lines.push(format!(
                "  signature: {} strokes · {pen} at ({:.0},{:.0})",
                view.stroke_count, ui.sig_cursor.0, ui.sig_cursor.1
            ));
            lines.push("  1-4 choose · arrows draw · space pen · c clear · s save".to_string());
            lines
        }
        GameView::Placeholder { note } => vec![String::new(), format!("  {note}")],
    }
}

fn draw(
    term: &mut Term,
    session: &GameSession,
    ui: &UiState,
) -> Result<(), Box<dyn std::error::Error>> {
    let title = session
        .day()
        .map(|day| days::descriptor(day).title)
        .unwrap_or("Valweek");

    queue!(term.out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    let mut row = 0u16;
    let put = |out: &mut Stdout, text: &str, row: &mut u16| -> std::io::Result<()> {
        queue!(out, cursor::MoveTo(0, *row), Print(text))?;
        *row += 1;
        Ok(())
    };

    put(&mut term.out, &format!("{title}  (esc/q closes)"), &mut row)?;
    for line in view_lines(session, ui) {
        put(&mut term.out, &line, &mut row)?;
    }
    if let Some(note) = &ui.note {
        put(&mut term.out, "", &mut row)?;
        put(&mut term.out, &format!("  {note}"), &mut row)?;
    }
    if let Some(message) = &ui.celebration {
        put(&mut term.out, "", &mut row)?;
        put(&mut term.out, "  ============================", &mut row)?;
        for raw in message.lines() {
            put(&mut term.out, &format!("  | {raw}"), &mut row)?;
        }
        put(&mut term.out, "  | Accept 🥺  (enter)", &mut row)?;
        put(&mut term.out, "  ============================", &mut row)?;
    }
    term.out.flush()?;
    Ok(())
}
