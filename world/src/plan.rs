//! ASCII floor plan of a generated maze, north at the top.

use chamber_crawl_core::{Direction, Location};

use crate::{chamber::Chamber, Maze};

const EMPTY: char = ' ';
const ROOM: char = '#';
const ENTRANCE: char = '@';
const OCCUPIED: char = 'M';
const PICKUP: char = '*';
const DOOR_EAST_WEST: char = '-';
const DOOR_NORTH_SOUTH: char = '|';

impl<O> Maze<O> {
    /// Renders the chamber graph as a character grid.
    ///
    /// Rooms sit on odd cells and doors on the cells between them. The
    /// entrance is `@`, rooms holding a pickup `*`, occupied rooms `M` and
    /// empty rooms `#`.
    #[must_use]
    pub fn render_plan(&self) -> String {
        let Some(bounds) = Bounds::of(self.order.iter().copied()) else {
            return String::new();
        };

        let width = bounds.width() * 2 + 1;
        let height = bounds.height() * 2 + 1;
        let mut grid = vec![vec![EMPTY; width]; height];

        for chamber in self.chambers.values() {
            let (x, y) = bounds.cell(chamber.location());
            grid[y][x] = glyph(chamber);
            for direction in chamber.walls().doors() {
                let (door_x, door_y, door) = match direction {
                    Direction::North => (x, y - 1, DOOR_NORTH_SOUTH),
                    Direction::South => (x, y + 1, DOOR_NORTH_SOUTH),
                    Direction::East => (x + 1, y, DOOR_EAST_WEST),
                    Direction::West => (x - 1, y, DOOR_EAST_WEST),
                };
                grid[door_y][door_x] = door;
            }
        }

        let mut plan = String::with_capacity(width * height + height);
        for row in grid {
            let line: String = row.into_iter().collect();
            plan.push_str(line.trim_end());
            plan.push('\n');
        }
        plan
    }
}

fn glyph(chamber: &Chamber) -> char {
    if chamber.is_origin() {
        ENTRANCE
    } else if chamber.pickup().is_some() {
        PICKUP
    } else if chamber.has_occupant() {
        OCCUPIED
    } else {
        ROOM
    }
}

struct Bounds {
    min_column: i32,
    max_column: i32,
    min_row: i32,
    max_row: i32,
}

impl Bounds {
    fn of(mut locations: impl Iterator<Item = Location>) -> Option<Self> {
        let first = locations.next()?;
        let mut bounds = Self {
            min_column: first.column(),
            max_column: first.column(),
            min_row: first.row(),
            max_row: first.row(),
        };
        for location in locations {
            bounds.min_column = bounds.min_column.min(location.column());
            bounds.max_column = bounds.max_column.max(location.column());
            bounds.min_row = bounds.min_row.min(location.row());
            bounds.max_row = bounds.max_row.max(location.row());
        }
        Some(bounds)
    }

    fn width(&self) -> usize {
        self.max_column.abs_diff(self.min_column) as usize + 1
    }

    fn height(&self) -> usize {
        self.max_row.abs_diff(self.min_row) as usize + 1
    }

    /// Grid cell of a room; rows are flipped so north renders upward.
    fn cell(&self, location: Location) -> (usize, usize) {
        let x = location.column().abs_diff(self.min_column) as usize * 2 + 1;
        let y = self.max_row.abs_diff(location.row()) as usize * 2 + 1;
        (x, y)
    }
}
