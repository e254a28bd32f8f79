//! Chamber nodes stored by the maze.

use chamber_crawl_core::{
    BattleStrategy, Direction, Location, OccupantId, RandomSource, Wall, Walls,
};

/// Single room of the maze graph.
///
/// Walls, location, occupant and creation index are fixed when the chamber is
/// materialized. Only the visited flag and the pickup change afterwards, and
/// both change together the first time the player enters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chamber {
    location: Location,
    walls: Walls,
    visited: bool,
    occupant: Option<OccupantId>,
    pickup: Option<BattleStrategy>,
    creation_index: u32,
}

impl Chamber {
    /// Builds the entrance at the origin with a single door in a random direction.
    pub(crate) fn entrance(rng: &mut RandomSource) -> Self {
        let count = u32::try_from(Direction::ALL.len()).unwrap_or(u32::MAX);
        let pick = usize::try_from(rng.next_int(count)).unwrap_or(0);
        let walls = Walls::SEALED.with(Direction::ALL[pick], Wall::Door);
        Self {
            location: Location::ORIGIN,
            walls,
            visited: true,
            occupant: None,
            pickup: None,
            creation_index: 0,
        }
    }

    /// Builds an unvisited chamber discovered through the frontier.
    pub(crate) fn generated(
        walls: Walls,
        location: Location,
        occupant: Option<OccupantId>,
        pickup: Option<BattleStrategy>,
        creation_index: u32,
    ) -> Self {
        Self {
            location,
            walls,
            visited: false,
            occupant,
            pickup,
            creation_index,
        }
    }

    /// Location of the chamber.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// All four walls of the chamber.
    #[must_use]
    pub const fn walls(&self) -> Walls {
        self.walls
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

    /// Identifier of the occupant bound to this chamber.
    #[must_use]
    pub const fn occupant(&self) -> Option<OccupantId> {
        self.occupant
    }

    /// Reports whether a monster lives in the chamber.
    #[must_use]
    pub const fn has_occupant(&self) -> bool {
        self.occupant.is_some()
    }

    /// Reports whether the player has entered the chamber.
    #[must_use]
    pub const fn is_visited(&self) -> bool {
        self.visited
    }

    /// Pickup still waiting in the chamber.
    #[must_use]
    pub const fn pickup(&self) -> Option<BattleStrategy> {
        self.pickup
    }

    /// Number of chambers inserted before this one.
    #[must_use]
    pub const fn creation_index(&self) -> u32 {
        self.creation_index
    }

    /// Reports whether this is the entrance.
    #[must_use]
    pub const fn is_origin(&self) -> bool {
        self.location.is_origin()
    }

    /// Marks the chamber visited, returning the pickup consumed on entry.
    pub(crate) fn mark_visited(&mut self) -> Option<BattleStrategy> {
        self.visited = true;
        self.pickup.take()
    }
}
