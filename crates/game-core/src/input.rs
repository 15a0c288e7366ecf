use bracket_lib::prelude::VirtualKeyCode;
use common::{Direction, GameResult};

/// Minimum vertical displacement before a gesture counts as a swipe.
const SWIPE_MIN_DELTA: f32 = 10.0;

/// Configuration for keyboard controls.
///
/// Arrow keys always work; the letter bindings default to WASD and can be
/// remapped from the config file.
#[derive(Clone, Debug)]
pub struct InputConfig {
    pub up: VirtualKeyCode,
    pub down: VirtualKeyCode,
    pub left: VirtualKeyCode,
    pub right: VirtualKeyCode,
    pub colorblind: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        use VirtualKeyCode::*;
        Self {
            up: W,
            down: S,
            left: A,
            right: D,
            colorblind: false,
        }
    }
}

impl InputConfig {
    /// Loads configuration from a file if it exists.
    pub fn load(path: &str) -> GameResult<Self> {
        let mut cfg = Self::default();
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(cfg),
            Err(e) => return Err(e.into()),
        };
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, val) = match line.split_once('=') {
                Some(v) => v,
                None => continue,
            };
            let val = val.trim().trim_matches('"');
            match key.trim() {
                "up" => {
                    if let Some(kc) = parse_key(val) {
                        cfg.up = kc;
                    }
                }
                "down" => {
                    if let Some(kc) = parse_key(val) {
                        cfg.down = kc;
                    }
                }
                "left" => {
                    if let Some(kc) = parse_key(val) {
                        cfg.left = kc;
                    }
                }
                "right" => {
                    if let Some(kc) = parse_key(val) {
                        cfg.right = kc;
                    }
                }
                "colorblind" => cfg.colorblind = matches!(val, "true" | "1"),
                _ => {}
            }
        }
        Ok(cfg)
    }

    /// Maps a key press to a directional intent. Unknown keys are ignored.
    pub fn direction_for(&self, key: VirtualKeyCode) -> Option<Direction> {
        use VirtualKeyCode::*;
        match key {
            k if k == Up || k == self.up => Some(Direction::Up),
            k if k == Down || k == self.down => Some(Direction::Down),
            k if k == Left || k == self.left => Some(Direction::Left),
            k if k == Right || k == self.right => Some(Direction::Right),
            _ => None,
        }
    }
}

fn parse_key(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    match name.to_ascii_lowercase().as_str() {
        "up" => Some(Up),
        "down" => Some(Down),
        "left" => Some(Left),
        "right" => Some(Right),
        "w" => Some(W),
        "a" => Some(A),
        "s" => Some(S),
        "d" => Some(D),
        "h" => Some(H),
        "j" => Some(J),
        "k" => Some(K),
        "l" => Some(L),
        _ => None,
    }
}

/// Turns press/release coordinate pairs into directional intents.
///
/// A release with no recorded press (a malformed touch event) resolves to
/// nothing rather than an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeTracker {
    origin: Option<(f32, f32)>,
}

impl SwipeTracker {
    /// Records the start of a gesture.
    pub fn begin(&mut self, x: f32, y: f32) {
        self.origin = Some((x, y));
    }

    /// Drops any in-flight gesture.
    pub fn cancel(&mut self) {
        self.origin = None;
    }

    /// Ends the gesture and resolves it to a direction, if any.
    pub fn end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (ox, oy) = self.origin.take()?;
        resolve_swipe(x - ox, y - oy)
    }
}

/// Resolves a gesture displacement.
///
/// Horizontal movement wins whenever its magnitude exceeds the vertical
/// one; vertical swipes additionally need to clear a minimum distance.
pub fn resolve_swipe(dx: f32, dy: f32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if dy.abs() > SWIPE_MIN_DELTA {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    } else {
        None
    }
}
