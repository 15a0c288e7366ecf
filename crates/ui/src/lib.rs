//! Banner rendering: maze frame, overlays and on-screen controls.

use bracket_lib::prelude::{to_cp437, BTerm, BLACK, CYAN, GRAY, MAGENTA, RED, RGB, WHITE, YELLOW};
use common::{Direction, GameResult, Point};
use maze::CellKind;

/// Screen position of the maze's top-left cell.
pub const MAZE_X: i32 = 2;
pub const MAZE_Y: i32 = 2;

const PANEL_X: i32 = 17;
const STATUS_Y: i32 = 12;
const LOG_Y: i32 = 16;
const LOG_WINDOW: usize = 3;

/// Which overlay the current engine state asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    /// Waiting for the first directional input.
    Ready,
    /// Game running, no overlay.
    Playing,
    /// Player was caught; session resets shortly.
    Caught,
    /// Goal reached; banner closes shortly.
    Won,
}

/// Read-only data needed to draw one frame.
///
/// Produced by the engine once per state change; nothing here can mutate
/// engine state.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    pub width: u32,
    pub height: u32,
    pub cells: &'a [CellKind],
    pub player: Point,
    pub facing: Option<Direction>,
    pub mouth_open: bool,
    /// Ghost id and position; the id only selects a color.
    pub ghosts: Vec<(u8, Point)>,
    pub goal: Point,
    pub score: i32,
    pub overlay: Overlay,
}

/// Color palette for maze and entity rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPalette {
    pub wall: RGB,
    pub crumb: RGB,
    pub goal: RGB,
    pub player: RGB,
    pub ghost_a: RGB,
    pub ghost_b: RGB,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            wall: RGB::named(GRAY),
            crumb: RGB::named(WHITE),
            goal: RGB::named(CYAN),
            player: RGB::named(YELLOW),
            ghost_a: RGB::named(RED),
            ghost_b: RGB::named(MAGENTA),
        }
    }
}

impl ColorPalette {
    /// Returns a high contrast palette suitable for colorblind players.
    pub fn colorblind() -> Self {
        Self {
            wall: RGB::named(GRAY),
            crumb: RGB::named(YELLOW),
            goal: RGB::named(WHITE),
            player: RGB::named(WHITE),
            ghost_a: RGB::named(CYAN),
            ghost_b: RGB::named(MAGENTA),
        }
    }

    /// Color for the ghost with the given id.
    pub fn ghost(&self, id: u8) -> RGB {
        if id % 2 == 0 {
            self.ghost_a
        } else {
            self.ghost_b
        }
    }
}

/// On-screen banner controls that bypass the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerButton {
    Accept,
    Decline,
}

struct Rect {
    x: i32,
    y: i32,
    w: i32,
}

impl Rect {
    fn contains(&self, px: i32, py: i32) -> bool {
        py == self.y && px >= self.x && px < self.x + self.w
    }
}

const ACCEPT_RECT: Rect = Rect { x: PANEL_X, y: 5, w: 11 };
const DECLINE_RECT: Rect = Rect { x: PANEL_X, y: 7, w: 11 };
const PAD_UP: Rect = Rect { x: 21, y: 11, w: 3 };
const PAD_LEFT: Rect = Rect { x: 18, y: 12, w: 3 };
const PAD_DOWN: Rect = Rect { x: 21, y: 13, w: 3 };
const PAD_RIGHT: Rect = Rect { x: 24, y: 12, w: 3 };

/// Maps a mouse/tap position to one of the four direction buttons.
pub fn pad_hit(px: i32, py: i32) -> Option<Direction> {
    if PAD_UP.contains(px, py) {
        Some(Direction::Up)
    } else if PAD_DOWN.contains(px, py) {
        Some(Direction::Down)
    } else if PAD_LEFT.contains(px, py) {
        Some(Direction::Left)
    } else if PAD_RIGHT.contains(px, py) {
        Some(Direction::Right)
    } else {
        None
    }
}

/// Maps a mouse/tap position to the explicit consent buttons.
pub fn banner_hit(px: i32, py: i32) -> Option<BannerButton> {
    if ACCEPT_RECT.contains(px, py) {
        Some(BannerButton::Accept)
    } else if DECLINE_RECT.contains(px, py) {
        Some(BannerButton::Decline)
    } else {
        None
    }
}

/// Message log shown under the maze.
#[derive(Default)]
pub struct UIContext {
    logs: Vec<String>,
}

impl UIContext {
    /// Adds a message to the log queue.
    pub fn add_log(&mut self, msg: &str) -> GameResult<()> {
        self.logs.push(msg.to_string());
        Ok(())
    }

    /// Draws the last few log lines.
    pub fn draw_logs(&self, ctx: &mut BTerm) -> GameResult<()> {
        let start = self.logs.len().saturating_sub(LOG_WINDOW);
        for (i, line) in self.logs[start..].iter().enumerate() {
            ctx.print(MAZE_X, LOG_Y + i as i32, line);
        }
        Ok(())
    }
}

/// Draws one engine frame: maze, entities, score and overlay.
pub fn draw_frame(ctx: &mut BTerm, frame: &Frame, palette: &ColorPalette) {
    let bg = RGB::named(BLACK);
    for y in 0..frame.height as i32 {
        for x in 0..frame.width as i32 {
            let pt = Point::new(x, y);
            let idx = (y as usize) * frame.width as usize + x as usize;
            let (glyph, color) = if pt == frame.goal {
                ('*', palette.goal)
            } else {
                match frame.cells[idx] {
                    CellKind::Wall => ('#', palette.wall),
                    CellKind::Crumb => ('.', palette.crumb),
                    CellKind::Open => (' ', bg),
                }
            };
            ctx.set(MAZE_X + x, MAZE_Y + y, color, bg, to_cp437(glyph));
        }
    }
    for (id, pos) in &frame.ghosts {
        ctx.set(
            MAZE_X + pos.x,
            MAZE_Y + pos.y,
            palette.ghost(*id),
            bg,
            to_cp437('G'),
        );
    }
    ctx.set(
        MAZE_X + frame.player.x,
        MAZE_Y + frame.player.y,
        palette.player,
        bg,
        to_cp437(player_glyph(frame.facing, frame.mouth_open)),
    );

    let crumbs = frame
        .cells
        .iter()
        .filter(|c| **c == CellKind::Crumb)
        .count();
    ctx.print(PANEL_X, 2, format!("Score: {}", frame.score));
    ctx.print(PANEL_X, 3, format!("Crumbs: {}", crumbs));
    if let Some(line) = overlay_string(frame.overlay) {
        ctx.print(MAZE_X, STATUS_Y, line);
    }
}

/// Draws the consent buttons and the touch pad.
pub fn draw_controls(ctx: &mut BTerm) {
    ctx.print(ACCEPT_RECT.x, ACCEPT_RECT.y, "[ Accept  ]");
    ctx.print(DECLINE_RECT.x, DECLINE_RECT.y, "[ Decline ]");
    ctx.print(PAD_UP.x, PAD_UP.y, "[^]");
    ctx.print(PAD_LEFT.x, PAD_LEFT.y, "[<]");
    ctx.print(PAD_DOWN.x, PAD_DOWN.y, "[v]");
    ctx.print(PAD_RIGHT.x, PAD_RIGHT.y, "[>]");
}

/// Draws the initial banner screen.
pub fn draw_prompt(ctx: &mut BTerm) {
    ctx.print_centered(3, "This site uses cookies.");
    ctx.print_centered(5, "A: accept   D: decline");
    ctx.print_centered(7, "...or play for it: move with arrows / WASD,");
    ctx.print_centered(8, "dodge the ghosts and reach the * to accept.");
    ctx.print_centered(10, "Press an arrow key or Space to start.");
}

/// Draws the confirmation screen after the decision is stored.
pub fn draw_closed(ctx: &mut BTerm, accepted: bool) {
    let line = if accepted {
        "Cookies accepted. Thanks for playing!"
    } else {
        "Cookies declined."
    };
    ctx.print_centered(9, line);
    ctx.print_centered(11, "Press Q to close.");
}

fn player_glyph(facing: Option<Direction>, mouth_open: bool) -> char {
    if !mouth_open {
        return 'O';
    }
    match facing {
        Some(Direction::Up) => '^',
        Some(Direction::Down) => 'v',
        Some(Direction::Left) => '<',
        Some(Direction::Right) => '>',
        None => 'C',
    }
}

fn overlay_string(overlay: Overlay) -> Option<&'static str> {
    match overlay {
        Overlay::Ready => Some("Make a move to start."),
        Overlay::Playing => None,
        Overlay::Caught => Some("Caught! Have another go..."),
        Overlay::Won => Some("You made it! Cookies accepted."),
    }
}
