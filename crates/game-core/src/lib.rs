//! Maze-chase engine for the cookie banner.
//!
//! One session owns the maze, the player and both ghosts. All mutation
//! funnels through the session so move legality stays single-sourced in
//! [`maze::Maze::resolve`].

mod ai;
mod app;
mod input;
mod types;

use bracket_lib::prelude::*;

use common::{Direction, GameResult, Point};
use maze::Maze;
use ui::{ColorPalette, Frame, Overlay, UIContext};

const GHOST_TICK_MS: f32 = 400.0;
const ANIM_TICK_MS: f32 = 150.0;
const CATCH_PAUSE_MS: f32 = 1500.0;
const WIN_LINGER_MS: f32 = 2500.0;
const CRUMB_POINTS: i32 = 10;
const GOAL_BONUS: i32 = 100;
const CONFIG_PATH: &str = "banner.toml";
/// Simple console font size; converts cell coordinates to swipe units.
const CELL_PX: f32 = 8.0;

pub use app::BannerApp;
pub use types::{Ghost, Player};
use input::{InputConfig, SwipeTracker};

/// Session phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GamePhase {
    /// Idle until the first directional input; also entered after a reset.
    Ready,
    Playing,
    /// A ghost reached the player; counts down to a fresh session.
    Caught { remaining_ms: f32 },
    /// Goal reached; counts down until the banner may close.
    Won { remaining_ms: f32 },
}

/// One cookie-banner game session.
pub struct ChaseGame {
    maze: Maze,
    initial: Maze,
    player: Player,
    ghosts: Vec<Ghost>,
    phase: GamePhase,
    ghost_timer_ms: f32,
    anim_timer_ms: f32,
    finished: bool,
    rng: RandomNumberGenerator,
    input: InputConfig,
    swipe: SwipeTracker,
    mouse_was_down: bool,
    ui: UIContext,
    palette: ColorPalette,
}

impl ChaseGame {
    /// Creates a fresh session on the fixed banner maze.
    pub fn new(seed: u64) -> GameResult<Self> {
        let maze = Maze::banner()?;
        let input = InputConfig::load(CONFIG_PATH)?;
        let palette = if input.colorblind {
            ColorPalette::colorblind()
        } else {
            ColorPalette::default()
        };
        let player = Player::at(maze.player_spawn);
        let ghosts = spawn_ghosts(&maze);
        Ok(Self {
            initial: maze.clone(),
            maze,
            player,
            ghosts,
            phase: GamePhase::Ready,
            ghost_timer_ms: 0.0,
            anim_timer_ms: 0.0,
            finished: false,
            rng: RandomNumberGenerator::seeded(seed),
            input,
            swipe: SwipeTracker::default(),
            mouse_was_down: false,
            ui: UIContext::default(),
            palette,
        })
    }

    pub(crate) fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether the session ended in a win.
    pub fn won(&self) -> bool {
        matches!(self.phase, GamePhase::Won { .. })
    }

    /// Whether the win display delay has elapsed and the banner may close.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Feeds one key press. Returns whether it carried a directional intent.
    pub fn key(&mut self, key: VirtualKeyCode) -> bool {
        if let Some(dir) = self.input.direction_for(key) {
            self.apply_direction(dir);
            true
        } else {
            false
        }
    }

    /// Applies a directional intent from any input modality.
    ///
    /// The first intent of a session starts the clocks; intents during the
    /// catch pause or the win display are dropped.
    pub fn apply_direction(&mut self, dir: Direction) {
        match self.phase {
            GamePhase::Ready => {
                self.phase = GamePhase::Playing;
                self.step_player(dir);
            }
            GamePhase::Playing => self.step_player(dir),
            GamePhase::Caught { .. } | GamePhase::Won { .. } => {}
        }
    }

    fn step_player(&mut self, dir: Direction) {
        self.player.facing = Some(dir);
        let next = self.maze.resolve(self.player.pos, dir);
        if next == self.player.pos {
            // Blocked moves are no-ops; no pickup or collision checks fire.
            return;
        }
        self.player.pos = next;
        if self.maze.eat_crumb(next) {
            self.player.score += CRUMB_POINTS;
        }
        if next == self.maze.goal {
            self.win();
            return;
        }
        self.check_collision();
    }

    fn win(&mut self) {
        self.player.score += GOAL_BONUS;
        self.stop_clocks();
        self.phase = GamePhase::Won {
            remaining_ms: WIN_LINGER_MS,
        };
        self.ui.add_log("Goal reached! Cookies accepted.").ok();
    }

    /// One collision check per position update; fires at most one catch
    /// even when both ghosts sit on the player.
    fn check_collision(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.ghosts.iter().any(|g| g.pos == self.player.pos) {
            self.stop_clocks();
            self.phase = GamePhase::Caught {
                remaining_ms: CATCH_PAUSE_MS,
            };
            self.ui.add_log("A ghost got you!").ok();
        }
    }

    fn advance_ghosts(&mut self) {
        for i in 0..self.ghosts.len() {
            let from = self.ghosts[i].pos;
            if let Some(dir) = ai::next_dir(&self.maze, from, self.player.pos, &mut self.rng) {
                self.ghosts[i].pos = self.maze.resolve(from, dir);
            }
        }
        self.check_collision();
    }

    /// Both clocks stop whenever the session leaves `Playing`.
    fn stop_clocks(&mut self) {
        self.ghost_timer_ms = 0.0;
        self.anim_timer_ms = 0.0;
    }

    fn reset_session(&mut self) {
        self.maze = self.initial.clone();
        self.player = Player::at(self.maze.player_spawn);
        self.ghosts = spawn_ghosts(&self.maze);
        self.stop_clocks();
        self.phase = GamePhase::Ready;
    }

    /// Advances the two periodic clocks and any pending phase countdown.
    pub fn update(&mut self, dt_ms: f32) {
        match self.phase {
            GamePhase::Playing => {
                self.anim_timer_ms += dt_ms;
                while self.anim_timer_ms >= ANIM_TICK_MS {
                    self.anim_timer_ms -= ANIM_TICK_MS;
                    self.player.mouth_open = !self.player.mouth_open;
                }
                self.ghost_timer_ms += dt_ms;
                while self.ghost_timer_ms >= GHOST_TICK_MS {
                    self.ghost_timer_ms -= GHOST_TICK_MS;
                    self.advance_ghosts();
                }
            }
            GamePhase::Caught { remaining_ms } => {
                let left = remaining_ms - dt_ms;
                if left <= 0.0 {
                    self.reset_session();
                } else {
                    self.phase = GamePhase::Caught { remaining_ms: left };
                }
            }
            GamePhase::Won { remaining_ms } => {
                let left = remaining_ms - dt_ms;
                if left <= 0.0 {
                    self.finished = true;
                } else {
                    self.phase = GamePhase::Won { remaining_ms: left };
                }
            }
            GamePhase::Ready => {}
        }
    }

    /// Read-only data for drawing one frame.
    pub fn snapshot(&self) -> Frame<'_> {
        Frame {
            width: self.maze.width,
            height: self.maze.height,
            cells: &self.maze.cells,
            player: self.player.pos,
            facing: self.player.facing,
            mouth_open: self.player.mouth_open,
            ghosts: self.ghosts.iter().map(|g| (g.id, g.pos)).collect(),
            goal: self.maze.goal,
            score: self.player.score,
            overlay: match self.phase {
                GamePhase::Ready => Overlay::Ready,
                GamePhase::Playing => Overlay::Playing,
                GamePhase::Caught { .. } => Overlay::Caught,
                GamePhase::Won { .. } => Overlay::Won,
            },
        }
    }

    /// Handles keyboard and mouse/touch input for this frame.
    fn handle_input(&mut self, ctx: &mut BTerm) {
        if let Some(key) = ctx.key {
            self.key(key);
        }

        let pressed = ctx.left_click;
        let (mx, my) = ctx.mouse_pos;
        if pressed && !self.mouse_was_down {
            if let Some(dir) = ui::pad_hit(mx, my) {
                self.swipe.cancel();
                self.apply_direction(dir);
            } else {
                self.swipe.begin(mx as f32 * CELL_PX, my as f32 * CELL_PX);
            }
        } else if !pressed && self.mouse_was_down {
            if let Some(dir) = self.swipe.end(mx as f32 * CELL_PX, my as f32 * CELL_PX) {
                self.apply_direction(dir);
            }
        }
        self.mouse_was_down = pressed;
    }

    fn draw(&self, ctx: &mut BTerm) {
        ctx.cls();
        let frame = self.snapshot();
        ui::draw_frame(ctx, &frame, &self.palette);
        ui::draw_controls(ctx);
        self.ui.draw_logs(ctx).ok();
    }

    /// One host frame: input, clocks, draw.
    pub fn tick(&mut self, ctx: &mut BTerm) {
        self.handle_input(ctx);
        self.update(ctx.frame_time_ms);
        self.draw(ctx);
    }
}

fn spawn_ghosts(maze: &Maze) -> Vec<Ghost> {
    maze.ghost_spawns
        .iter()
        .enumerate()
        .map(|(i, pos)| Ghost {
            id: i as u8,
            pos: *pos,
        })
        .collect()
}

/// Runs the banner using [`bracket-lib`].
pub fn run() -> BError {
    let context = BTermBuilder::simple(40, 20)?
        .with_title("Cookie Banner")
        .build()?;
    main_loop(context, BannerApp::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_lib::prelude::{BTerm, VirtualKeyCode, RGB};

    fn game() -> ChaseGame {
        ChaseGame::new(0).expect("game")
    }

    fn dummy_ctx(key: Option<VirtualKeyCode>) -> BTerm {
        BTerm {
            width_pixels: 0,
            height_pixels: 0,
            original_height_pixels: 0,
            original_width_pixels: 0,
            fps: 0.0,
            frame_time_ms: 0.0,
            active_console: 0,
            key,
            mouse_pos: (0, 0),
            left_click: false,
            shift: false,
            control: false,
            alt: false,
            web_button: None,
            quitting: false,
            post_scanlines: false,
            post_screenburn: false,
            screen_burn_color: RGB::from_f32(0.0, 0.0, 0.0),
            mouse_visible: true,
        }
    }

    #[test]
    fn new_session_matches_layout() {
        let game = game();
        assert_eq!(game.player.pos, Point::new(1, 1));
        assert_eq!(game.player.score, 0);
        assert_eq!(game.player.facing, None);
        assert_eq!(game.ghosts.len(), 2);
        assert_eq!(game.ghosts[0].pos, Point::new(5, 3));
        assert_eq!(game.ghosts[1].pos, Point::new(6, 5));
        assert_eq!(game.phase, GamePhase::Ready);
        assert_eq!(game.maze.crumbs_left(), 45);
    }

    #[test]
    fn first_move_starts_the_session() {
        let mut game = game();
        game.apply_direction(Direction::Right);
        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.player.pos, Point::new(2, 1));
        assert_eq!(game.player.score, CRUMB_POINTS);
        assert_eq!(game.player.facing, Some(Direction::Right));
    }

    #[test]
    fn blocked_first_move_still_starts() {
        let mut game = game();
        game.apply_direction(Direction::Up);
        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.player.pos, Point::new(1, 1));
        assert_eq!(game.player.score, 0);
        assert_eq!(game.player.facing, Some(Direction::Up));
    }

    #[test]
    fn crumbs_are_collected_once() {
        let mut game = game();
        game.apply_direction(Direction::Right);
        game.apply_direction(Direction::Left);
        game.apply_direction(Direction::Right);
        assert_eq!(game.player.score, CRUMB_POINTS);
        assert_eq!(game.maze.crumbs_left(), 44);
    }

    #[test]
    fn reaching_the_goal_wins_with_full_crumb_set() {
        let mut game = game();
        game.phase = GamePhase::Playing;
        game.player.pos = Point::new(9, 7);
        game.apply_direction(Direction::Right);
        assert!(game.won());
        assert_eq!(game.player.score, GOAL_BONUS);
    }

    #[test]
    fn reaching_the_goal_wins_with_empty_crumb_set() {
        let mut game = game();
        for y in 0..game.maze.height as i32 {
            for x in 0..game.maze.width as i32 {
                game.maze.eat_crumb(Point::new(x, y));
            }
        }
        game.phase = GamePhase::Playing;
        game.player.pos = Point::new(9, 7);
        game.apply_direction(Direction::Right);
        assert!(game.won());
    }

    #[test]
    fn corridor_run_reaches_the_goal() {
        use Direction::*;
        let moves = [
            Right, Right, Right, Down, Down, Left, Down, Down, Left, Left, Down, Down, Right,
            Right, Right, Right, Right, Right, Right, Right, Right,
        ];
        let mut game = game();
        for dir in moves {
            game.apply_direction(dir);
            assert!(!matches!(game.phase, GamePhase::Caught { .. }));
        }
        assert!(game.won());
        assert_eq!(game.player.pos, Point::new(10, 7));
        assert_eq!(game.player.score, 20 * CRUMB_POINTS + GOAL_BONUS);
    }

    #[test]
    fn catch_fires_once_for_simultaneous_ghosts() {
        let mut game = game();
        game.phase = GamePhase::Playing;
        game.ghosts[0].pos = game.player.pos;
        game.ghosts[1].pos = game.player.pos;
        game.check_collision();
        assert!(matches!(
            game.phase,
            GamePhase::Caught {
                remaining_ms
            } if remaining_ms == CATCH_PAUSE_MS
        ));
        // A second check while already caught changes nothing.
        game.check_collision();
        assert!(matches!(
            game.phase,
            GamePhase::Caught {
                remaining_ms
            } if remaining_ms == CATCH_PAUSE_MS
        ));
    }

    #[test]
    fn player_walking_into_a_ghost_is_caught() {
        let mut game = game();
        game.phase = GamePhase::Playing;
        game.ghosts[0].pos = Point::new(2, 1);
        game.apply_direction(Direction::Right);
        assert!(matches!(game.phase, GamePhase::Caught { .. }));
    }

    #[test]
    fn catch_reset_restores_session_start_state() {
        let mut game = game();
        let maze0 = game.maze.clone();
        let player0 = game.player.clone();
        let ghosts0 = game.ghosts.clone();

        game.apply_direction(Direction::Right);
        game.update(350.0);
        game.ghosts[0].pos = game.player.pos;
        game.check_collision();
        assert!(matches!(game.phase, GamePhase::Caught { .. }));

        game.update(CATCH_PAUSE_MS);
        assert_eq!(game.phase, GamePhase::Ready);
        assert_eq!(game.maze, maze0);
        assert_eq!(game.player, player0);
        assert_eq!(game.ghosts, ghosts0);
    }

    #[test]
    fn catch_pause_counts_down_across_updates() {
        let mut game = game();
        game.phase = GamePhase::Playing;
        game.ghosts[0].pos = game.player.pos;
        game.check_collision();
        game.update(1000.0);
        assert!(matches!(game.phase, GamePhase::Caught { .. }));
        game.update(500.0);
        assert_eq!(game.phase, GamePhase::Ready);
    }

    #[test]
    fn ghost_clock_period_is_respected() {
        let mut game = game();
        game.apply_direction(Direction::Right);
        game.update(GHOST_TICK_MS - 1.0);
        assert_eq!(game.ghosts[0].pos, Point::new(5, 3));
        assert_eq!(game.ghosts[1].pos, Point::new(6, 5));
        game.update(1.0);
        assert_ne!(game.ghosts[0].pos, Point::new(5, 3));
        assert_ne!(game.ghosts[1].pos, Point::new(6, 5));
        for ghost in &game.ghosts {
            assert!(game.maze.is_open(ghost.pos));
        }
    }

    #[test]
    fn clocks_do_not_run_before_the_first_move() {
        let mut game = game();
        game.update(10_000.0);
        assert_eq!(game.ghosts[0].pos, Point::new(5, 3));
        assert_eq!(game.ghosts[1].pos, Point::new(6, 5));
        assert!(!game.player.mouth_open);
    }

    #[test]
    fn clock_accumulation_is_dropped_on_catch() {
        let mut game = game();
        game.apply_direction(Direction::Right);
        game.update(GHOST_TICK_MS - 1.0);
        game.ghosts[0].pos = game.player.pos;
        game.check_collision();
        game.update(CATCH_PAUSE_MS);
        assert_eq!(game.phase, GamePhase::Ready);

        // The new session's ghost clock starts from zero.
        game.apply_direction(Direction::Right);
        game.update(GHOST_TICK_MS - 1.0);
        assert_eq!(game.ghosts[0].pos, Point::new(5, 3));
        assert_eq!(game.ghosts[1].pos, Point::new(6, 5));
    }

    #[test]
    fn mouth_toggles_on_the_animation_clock() {
        let mut game = game();
        game.apply_direction(Direction::Up);
        assert!(!game.player.mouth_open);
        game.update(ANIM_TICK_MS);
        assert!(game.player.mouth_open);
        game.update(ANIM_TICK_MS);
        assert!(!game.player.mouth_open);
    }

    #[test]
    fn win_linger_then_finished() {
        let mut game = game();
        game.phase = GamePhase::Playing;
        game.player.pos = Point::new(9, 7);
        game.apply_direction(Direction::Right);
        game.update(WIN_LINGER_MS - 1.0);
        assert!(!game.finished());
        game.update(1.0);
        assert!(game.finished());
    }

    #[test]
    fn snapshot_reflects_the_session() {
        let mut game = game();
        let frame = game.snapshot();
        assert_eq!(frame.overlay, ui::Overlay::Ready);
        assert_eq!(frame.player, Point::new(1, 1));
        assert_eq!(frame.ghosts, vec![(0, Point::new(5, 3)), (1, Point::new(6, 5))]);
        assert_eq!(frame.goal, Point::new(10, 7));
        assert_eq!(frame.score, 0);

        game.apply_direction(Direction::Right);
        let frame = game.snapshot();
        assert_eq!(frame.overlay, ui::Overlay::Playing);
        assert_eq!(frame.score, CRUMB_POINTS);
        assert_eq!(frame.facing, Some(Direction::Right));
    }

    #[test]
    fn keyboard_input_moves_the_player() {
        let mut game = game();
        let mut ctx = dummy_ctx(Some(VirtualKeyCode::Right));
        game.handle_input(&mut ctx);
        assert_eq!(game.player.pos, Point::new(2, 1));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut game = game();
        let mut ctx = dummy_ctx(Some(VirtualKeyCode::X));
        game.handle_input(&mut ctx);
        assert_eq!(game.phase, GamePhase::Ready);
        assert_eq!(game.player.pos, Point::new(1, 1));
    }

    #[test]
    fn pad_tap_moves_the_player() {
        let mut game = game();
        let mut ctx = dummy_ctx(None);
        ctx.left_click = true;
        ctx.mouse_pos = (24, 12);
        game.handle_input(&mut ctx);
        assert_eq!(game.player.pos, Point::new(2, 1));

        // Releasing over the pad does not double-fire.
        let mut ctx = dummy_ctx(None);
        ctx.mouse_pos = (24, 12);
        game.handle_input(&mut ctx);
        assert_eq!(game.player.pos, Point::new(2, 1));
    }

    #[test]
    fn swipe_gesture_moves_the_player() {
        let mut game = game();
        let mut ctx = dummy_ctx(None);
        ctx.left_click = true;
        ctx.mouse_pos = (5, 5);
        game.handle_input(&mut ctx);

        let mut ctx = dummy_ctx(None);
        ctx.mouse_pos = (10, 5);
        game.handle_input(&mut ctx);
        assert_eq!(game.player.pos, Point::new(2, 1));
        assert_eq!(game.player.facing, Some(Direction::Right));
    }

    #[test]
    fn intents_are_dropped_while_caught() {
        let mut game = game();
        game.phase = GamePhase::Playing;
        game.ghosts[0].pos = game.player.pos;
        game.check_collision();
        game.apply_direction(Direction::Right);
        assert_eq!(game.player.pos, Point::new(1, 1));
    }
}
