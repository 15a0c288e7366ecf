//! Maze model and shared move legality check.

use common::{Direction, GameError, GameResult, Point};

/// Kind of a cell on the banner maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// Impassable cell.
    Wall,
    /// Walkable cell with nothing on it.
    Open,
    /// Walkable cell holding a cookie crumb.
    Crumb,
}

/// Fixed maze with spawn points and the goal cell.
///
/// The grid is immutable after parsing except that a [`CellKind::Crumb`]
/// cell flips to [`CellKind::Open`] when its crumb is eaten.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<CellKind>,
    pub player_spawn: Point,
    pub ghost_spawns: Vec<Point>,
    pub goal: Point,
}

/// Reference banner layout. `#` wall, `.` crumb, space open, `P` player
/// spawn, `g` ghost spawn, `*` goal.
const BANNER_ROWS: [&str; 9] = [
    "############",
    "#P...#.....#",
    "#.##.#.###.#",
    "#.#..g...#.#",
    "#.#.##.##..#",
    "#.....g..#.#",
    "#.##.###.#.#",
    "#.........*#",
    "############",
];

impl Maze {
    /// Parses a maze from ASCII rows.
    ///
    /// Rows must be non-empty and of equal width, with exactly one `P`,
    /// exactly one `*` and at least one `g`.
    pub fn parse(rows: &[&str]) -> GameResult<Self> {
        let height = rows.len();
        if height == 0 {
            return Err(GameError::Parse("empty layout".into()));
        }
        let width = rows[0].chars().count();
        if width == 0 {
            return Err(GameError::Parse("empty row".into()));
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut player_spawn = None;
        let mut ghost_spawns = Vec::new();
        let mut goal = None;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(GameError::Parse(format!("ragged row {}", y)));
            }
            for (x, ch) in row.chars().enumerate() {
                let pt = Point::new(x as i32, y as i32);
                let kind = match ch {
                    '#' => CellKind::Wall,
                    '.' => CellKind::Crumb,
                    ' ' => CellKind::Open,
                    'P' => {
                        if player_spawn.replace(pt).is_some() {
                            return Err(GameError::Parse("duplicate player spawn".into()));
                        }
                        CellKind::Open
                    }
                    'g' => {
                        ghost_spawns.push(pt);
                        CellKind::Open
                    }
                    '*' => {
                        if goal.replace(pt).is_some() {
                            return Err(GameError::Parse("duplicate goal".into()));
                        }
                        CellKind::Open
                    }
                    other => {
                        return Err(GameError::Parse(format!("unknown cell '{}'", other)));
                    }
                };
                cells.push(kind);
            }
        }

        let player_spawn =
            player_spawn.ok_or_else(|| GameError::Parse("missing player spawn".into()))?;
        let goal = goal.ok_or_else(|| GameError::Parse("missing goal".into()))?;
        if ghost_spawns.is_empty() {
            return Err(GameError::Parse("missing ghost spawns".into()));
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            cells,
            player_spawn,
            ghost_spawns,
            goal,
        })
    }

    /// Builds the fixed banner maze.
    pub fn banner() -> GameResult<Self> {
        Self::parse(&BANNER_ROWS)
    }

    /// Returns the cell index for in-bounds coordinates.
    pub fn idx(&self, pt: Point) -> usize {
        (pt.y as usize) * self.width as usize + pt.x as usize
    }

    fn in_bounds(&self, pt: Point) -> bool {
        pt.x >= 0 && pt.y >= 0 && pt.x < self.width as i32 && pt.y < self.height as i32
    }

    /// Returns the cell kind, or `None` outside the grid.
    pub fn cell(&self, pt: Point) -> Option<CellKind> {
        if self.in_bounds(pt) {
            Some(self.cells[self.idx(pt)])
        } else {
            None
        }
    }

    /// Whether an entity may stand on `pt`. Out-of-bounds counts as closed,
    /// never as an error.
    pub fn is_open(&self, pt: Point) -> bool {
        matches!(self.cell(pt), Some(CellKind::Open) | Some(CellKind::Crumb))
    }

    /// Resolves a requested move.
    ///
    /// Returns the neighboring cell in `dir` when it is open, otherwise the
    /// original position unchanged. Shared by player and ghost movement so
    /// the legality rule lives in one place.
    pub fn resolve(&self, from: Point, dir: Direction) -> Point {
        let candidate = from + dir.delta();
        if self.is_open(candidate) {
            candidate
        } else {
            from
        }
    }

    /// Removes the crumb at `pt` if there is one, flipping the cell to
    /// [`CellKind::Open`]. Returns whether a crumb was eaten.
    pub fn eat_crumb(&mut self, pt: Point) -> bool {
        if self.cell(pt) == Some(CellKind::Crumb) {
            let idx = self.idx(pt);
            self.cells[idx] = CellKind::Open;
            true
        } else {
            false
        }
    }

    /// Number of crumbs still on the grid.
    pub fn crumbs_left(&self) -> usize {
        self.cells.iter().filter(|c| **c == CellKind::Crumb).count()
    }
}
