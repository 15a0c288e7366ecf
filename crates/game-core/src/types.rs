use common::{Direction, Point};

/// The cookie muncher steered by the visitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Point,
    /// Last requested direction, kept only to orient the sprite.
    pub facing: Option<Direction>,
    /// Toggled by the animation clock; never read by gameplay logic.
    pub mouth_open: bool,
    /// Collected score for this session.
    pub score: i32,
}

impl Player {
    /// Creates an idle player at `spawn`.
    pub fn at(spawn: Point) -> Self {
        Self {
            pos: spawn,
            facing: None,
            mouth_open: false,
            score: 0,
        }
    }
}

/// A pursuing ghost. The id only selects a render color; ghosts keep no
/// direction memory between ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ghost {
    pub id: u8,
    pub pos: Point,
}
