use super::ChaseGame;
use bracket_lib::prelude::*;
use consent::{ConsentStore, Decision};
use std::time::{SystemTime, UNIX_EPOCH};
use ui::BannerButton;

const CONSENT_PATH: &str = "consent.json";

pub enum AppState {
    /// Banner face: explicit buttons, or any move starts the chase.
    Prompt,
    Running(Box<ChaseGame>),
    Closed(Decision),
}

/// Hosts the mini-game inside the consent banner and owns the store the
/// decision is written to.
pub struct BannerApp {
    state: AppState,
    store: ConsentStore,
    win_recorded: bool,
    mouse_was_down: bool,
}

impl BannerApp {
    pub fn new() -> Self {
        Self::with_store(ConsentStore::new(CONSENT_PATH))
    }

    /// Creates the banner against a specific store.
    pub fn with_store(store: ConsentStore) -> Self {
        Self {
            state: AppState::Prompt,
            store,
            win_recorded: false,
            mouse_was_down: false,
        }
    }

    fn decide(&mut self, decision: Decision) {
        self.store.record(decision, unix_now()).ok();
        self.state = AppState::Closed(decision);
    }

    fn start_game(key: VirtualKeyCode) -> Option<AppState> {
        match ChaseGame::new(unix_now()) {
            Ok(mut game) => {
                if game.key(key) || key == VirtualKeyCode::Space {
                    Some(AppState::Running(Box::new(game)))
                } else {
                    None
                }
            }
            Err(e) => {
                eprintln!("banner error: {}", e);
                None
            }
        }
    }

    /// Records the win decision once and closes after the display delay.
    fn sync_consent(&mut self) {
        if let AppState::Running(game) = &self.state {
            if game.won() && !self.win_recorded {
                self.win_recorded = true;
                self.store.record(Decision::Accepted, unix_now()).ok();
            }
            if game.finished() {
                self.state = AppState::Closed(Decision::Accepted);
            }
        }
    }

    fn update_state(&mut self, ctx: &mut BTerm) -> bool {
        let pressed = ctx.left_click;
        let (mx, my) = ctx.mouse_pos;
        let clicked = pressed && !self.mouse_was_down;
        self.mouse_was_down = pressed;
        let banner_click = if clicked {
            ui::banner_hit(mx, my)
        } else {
            None
        };

        match &mut self.state {
            AppState::Prompt => {
                match banner_click {
                    Some(BannerButton::Accept) => {
                        self.decide(Decision::Accepted);
                        return false;
                    }
                    Some(BannerButton::Decline) => {
                        self.decide(Decision::Declined);
                        return false;
                    }
                    None => {}
                }
                match ctx.key {
                    Some(VirtualKeyCode::A) => self.decide(Decision::Accepted),
                    Some(VirtualKeyCode::D) => self.decide(Decision::Declined),
                    Some(VirtualKeyCode::Q) => return true,
                    Some(key) => {
                        if let Some(state) = Self::start_game(key) {
                            self.state = state;
                        }
                    }
                    None => {}
                }
                false
            }
            AppState::Running(game) => {
                game.tick(ctx);
                match banner_click {
                    Some(BannerButton::Accept) => self.decide(Decision::Accepted),
                    Some(BannerButton::Decline) => self.decide(Decision::Declined),
                    None => self.sync_consent(),
                }
                false
            }
            AppState::Closed(_) => matches!(
                ctx.key,
                Some(VirtualKeyCode::Q) | Some(VirtualKeyCode::Return)
            ),
        }
    }
}

impl Default for BannerApp {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for BannerApp {
    fn tick(&mut self, ctx: &mut BTerm) {
        let quit = self.update_state(ctx);
        if quit {
            ctx.quit();
            return;
        }
        match &self.state {
            AppState::Prompt => {
                ctx.cls();
                ui::draw_prompt(ctx);
                ui::draw_controls(ctx);
            }
            AppState::Running(_) => {
                // game.tick already rendered
            }
            AppState::Closed(decision) => {
                ctx.cls();
                ui::draw_closed(ctx, *decision == Decision::Accepted);
            }
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
