//! Read-only facades handed to renderers and other consumers that must not
//! see or mutate the whole maze.

use std::collections::BTreeMap;

use chamber_crawl_core::{BattleStrategy, Direction, Location, Occupant, Wall, Walls};

use crate::{chamber::Chamber, query, Maze};

/// Restricted view of a single chamber.
///
/// Pickups are not exposed here; the game driver reads them from the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChamberView {
    location: Location,
    walls: Walls,
    visited: bool,
    occupied: bool,
}

impl ChamberView {
    /// Captures the visible state of a chamber.
    #[must_use]
    pub fn of(chamber: &Chamber) -> Self {
        Self {
            location: chamber.location(),
            walls: chamber.walls(),
            visited: chamber.is_visited(),
            occupied: chamber.has_occupant(),
        }
    }

    /// Location of the chamber.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Reports whether the player has entered the chamber.
    #[must_use]
    pub const fn has_visited(&self) -> bool {
        self.visited
    }

    /// Reports whether a monster lives in the chamber.
    #[must_use]
    pub const fn has_occupant(&self) -> bool {
        self.occupied
    }

    /// Wall facing the provided direction.
    #[must_use]
    pub const fn wall(&self, direction: Direction) -> Wall {
        self.walls.get(direction)
    }

    /// Reports whether the wall facing `direction` is a door.
    #[must_use]
    pub const fn has_door(&self, direction: Direction) -> bool {
        self.walls.has_door(direction)
    }
}

/// Occupant accessors captured alongside a neighbourhood snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OccupantSummary {
    /// Sacks of treasure carried by the occupant.
    pub sacks: u32,
    /// Battle strategy carried by the occupant, if any.
    pub strategy: Option<BattleStrategy>,
}

/// Snapshot of the chambers surrounding a focus location.
///
/// Holds at most nine chambers: the focus, its four orthogonal neighbours and
/// the four diagonals. Slots without a materialized chamber are omitted. The
/// snapshot does not follow later visits; capture a new one whenever the focus
/// moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    focus: Location,
    chambers: BTreeMap<Location, ChamberView>,
    occupants: BTreeMap<Location, OccupantSummary>,
}

impl Neighborhood {
    /// Captures the neighbourhood of `focus` within the maze.
    #[must_use]
    pub fn capture<O: Occupant>(maze: &Maze<O>, focus: Location) -> Self {
        let mut chambers = BTreeMap::new();
        let mut occupants = BTreeMap::new();

        for location in window(focus) {
            let Some(chamber) = query::chamber(maze, location) else {
                continue;
            };
            let _ = chambers.insert(location, ChamberView::of(chamber));
            if let Some(occupant) = query::occupant(maze, location) {
                let summary = OccupantSummary {
                    sacks: occupant.sacks(),
                    strategy: occupant.strategy(),
                };
                let _ = occupants.insert(location, summary);
            }
        }

        Self {
            focus,
            chambers,
            occupants,
        }
    }

    /// Location the snapshot is centred on.
    #[must_use]
    pub const fn focus(&self) -> Location {
        self.focus
    }

    /// Chamber captured at `location`, if it lies in the window and exists.
    #[must_use]
    pub fn chamber(&self, location: Location) -> Option<&ChamberView> {
        self.chambers.get(&location)
    }

    /// Reports whether a chamber was captured at `location`.
    #[must_use]
    pub fn contains(&self, location: Location) -> bool {
        self.chambers.contains_key(&location)
    }

    /// Captured locations in ascending order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.chambers.keys().copied()
    }

    /// Captured chambers in ascending location order.
    pub fn iter(&self) -> impl Iterator<Item = &ChamberView> {
        self.chambers.values()
    }

    /// Number of captured chambers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chambers.len()
    }

    /// Reports whether no chamber was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chambers.is_empty()
    }

    /// Sacks carried by the occupant at `location`.
    #[must_use]
    pub fn occupant_sacks(&self, location: Location) -> Option<u32> {
        self.occupants.get(&location).map(|summary| summary.sacks)
    }

    /// Strategy carried by the occupant at `location`.
    #[must_use]
    pub fn occupant_strategy(&self, location: Location) -> Option<BattleStrategy> {
        self.occupants
            .get(&location)
            .and_then(|summary| summary.strategy)
    }
}

/// The nine locations a neighbourhood may cover, focus first.
fn window(focus: Location) -> [Location; 9] {
    let north = focus.step(Direction::North);
    let south = focus.step(Direction::South);
    [
        focus,
        north,
        south,
        focus.step(Direction::East),
        focus.step(Direction::West),
        north.step(Direction::East),
        north.step(Direction::West),
        south.step(Direction::East),
        south.step(Direction::West),
    ]
}

#[cfg(test)]
mod tests {
    use super::window;
    use chamber_crawl_core::Location;
    use std::collections::HashSet;

    #[test]
    fn window_covers_the_three_by_three_block() {
        let focus = Location::new(4, -1);
        let cells: HashSet<Location> = window(focus).into_iter().collect();
        assert_eq!(cells.len(), 9);
        for column in 3..=5 {
            for row in -2..=0 {
                assert!(cells.contains(&Location::new(column, row)));
            }
        }
    }
}
