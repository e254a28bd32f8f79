#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state for Chamber Crawl.
//!
//! A [`Maze`] is generated once, synchronously, by [`Maze::generate`]. After
//! that the graph is frozen: the only mutation is a visit submitted through
//! [`apply`], and every read goes through the [`query`] functions or the
//! facades in [`ChamberView`] and [`Neighborhood`].

use std::{collections::HashMap, fmt};

use chamber_crawl_core::{
    Command, Event, Location, MazeConfig, MazeError, OccupantFactory, RandomSource, VisitError,
};

mod chamber;
mod generation;
mod plan;
mod views;

pub use chamber::Chamber;
pub use generation::PickupSchedule;
pub use views::{ChamberView, Neighborhood, OccupantSummary};

/// Generated chamber graph together with its occupants.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze<O> {
    chambers: HashMap<Location, Chamber>,
    order: Vec<Location>,
    occupants: Vec<O>,
    requested: u32,
    pickups: PickupSchedule,
}

impl<O> Maze<O> {
    /// Generates a maze of at most `config.chambers()` chambers.
    ///
    /// The configuration is validated before any random number is drawn, so a
    /// rejected request leaves `rng` untouched. Occupants are created by
    /// `factory` from the same random stream as the graph.
    pub fn generate<F>(
        config: &MazeConfig,
        rng: &mut RandomSource,
        factory: &mut F,
    ) -> Result<Self, MazeError>
    where
        F: OccupantFactory<Occupant = O>,
    {
        config.validate()?;

        let layout = generation::run(config, rng, factory);
        let maze = Self {
            chambers: layout.chambers,
            order: layout.order,
            occupants: layout.occupants,
            requested: config.chambers(),
            pickups: layout.pickups,
        };

        log::info!(
            "generated maze: {} of {} requested chambers, {} occupants (seed {:#x})",
            maze.order.len(),
            maze.requested,
            maze.occupants.len(),
            rng.seed(),
        );
        log::trace!("finished maze:\n{maze}");
        Ok(maze)
    }
}

/// Applies the provided command to the maze.
pub fn apply<O>(maze: &mut Maze<O>, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::VisitChamber { location } => {
            let Some(chamber) = maze.chambers.get_mut(&location) else {
                log::warn!("visit rejected: no chamber at {location}");
                out_events.push(Event::VisitRejected {
                    location,
                    reason: VisitError::MissingChamber,
                });
                return;
            };

            let first_visit = !chamber.is_visited();
            let pickup = chamber.mark_visited();
            if let Some(pickup) = pickup {
                log::debug!("pickup {pickup} consumed at {location}");
            }
            out_events.push(Event::ChamberVisited {
                location,
                first_visit,
                pickup,
            });
        }
    }
}

impl<O> fmt::Display for Maze<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "chambers: {}/{} requested, occupants: {}",
            self.order.len(),
            self.requested,
            self.occupants.len()
        )?;
        for location in &self.order {
            let Some(chamber) = self.chambers.get(location) else {
                continue;
            };
            write!(f, "#{:<3} {location}", chamber.creation_index())?;
            for (direction, wall) in chamber.walls().iter() {
                write!(f, " {direction}:{wall}")?;
            }
            if let Some(occupant) = chamber.occupant() {
                write!(f, " occupant:{}", occupant.get())?;
            }
            if let Some(pickup) = chamber.pickup() {
                write!(f, " pickup:{pickup}")?;
            }
            if chamber.is_visited() {
                write!(f, " visited")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Query functions that provide read-only access to the maze.
pub mod query {
    use chamber_crawl_core::{
        BattleStrategy, Direction, Location, Occupant, OccupantId, Walls,
    };

    use super::{Chamber, ChamberView, Maze, Neighborhood, PickupSchedule};

    /// Reports whether a chamber was materialized at `location`.
    #[must_use]
    pub fn has_chamber<O>(maze: &Maze<O>, location: Location) -> bool {
        maze.chambers.contains_key(&location)
    }

    /// Chamber at `location`, if any.
    #[must_use]
    pub fn chamber<O>(maze: &Maze<O>, location: Location) -> Option<&Chamber> {
        maze.chambers.get(&location)
    }

    /// Walls of the chamber at `location`.
    #[must_use]
    pub fn walls<O>(maze: &Maze<O>, location: Location) -> Option<Walls> {
        chamber(maze, location).map(Chamber::walls)
    }

    /// Reports whether the chamber at `location` has a door facing `direction`.
    ///
    /// Missing chambers have no doors.
    #[must_use]
    pub fn has_door_at<O>(maze: &Maze<O>, direction: Direction, location: Location) -> bool {
        chamber(maze, location).is_some_and(|chamber| chamber.has_door(direction))
    }

    /// Identifier of the occupant living at `location`.
    #[must_use]
    pub fn occupant_id<O>(maze: &Maze<O>, location: Location) -> Option<OccupantId> {
        chamber(maze, location).and_then(Chamber::occupant)
    }

    /// Occupant living at `location`.
    #[must_use]
    pub fn occupant<O>(maze: &Maze<O>, location: Location) -> Option<&O> {
        occupant_id(maze, location).and_then(|id| maze.occupants.get(id.index()))
    }

    /// Occupant registered under `id`.
    #[must_use]
    pub fn occupant_by_id<O>(maze: &Maze<O>, id: OccupantId) -> Option<&O> {
        maze.occupants.get(id.index())
    }

    /// Every occupant, indexed by [`OccupantId`].
    #[must_use]
    pub fn occupants<O>(maze: &Maze<O>) -> &[O] {
        &maze.occupants
    }

    /// Sacks carried by the occupant at `location`.
    #[must_use]
    pub fn occupant_sacks<O: Occupant>(maze: &Maze<O>, location: Location) -> Option<u32> {
        occupant(maze, location).map(Occupant::sacks)
    }

    /// Strategy carried by the occupant at `location`.
    #[must_use]
    pub fn occupant_strategy<O: Occupant>(
        maze: &Maze<O>,
        location: Location,
    ) -> Option<BattleStrategy> {
        occupant(maze, location).and_then(Occupant::strategy)
    }

    /// Pickup still waiting at `location`.
    #[must_use]
    pub fn pickup<O>(maze: &Maze<O>, location: Location) -> Option<BattleStrategy> {
        chamber(maze, location).and_then(Chamber::pickup)
    }

    /// Number of chambers in the maze.
    #[must_use]
    pub fn total_chambers<O>(maze: &Maze<O>) -> usize {
        maze.order.len()
    }

    /// Number of chambers the player has not entered yet.
    #[must_use]
    pub fn chambers_left<O>(maze: &Maze<O>) -> usize {
        maze.chambers
            .values()
            .filter(|chamber| !chamber.is_visited())
            .count()
    }

    /// Number of chambers the player has entered, the entrance included.
    #[must_use]
    pub fn chambers_discovered<O>(maze: &Maze<O>) -> usize {
        total_chambers(maze) - chambers_left(maze)
    }

    /// Chamber count the maze was generated for.
    #[must_use]
    pub fn requested_chambers<O>(maze: &Maze<O>) -> u32 {
        maze.requested
    }

    /// Locations in the order their chambers were created.
    #[must_use]
    pub fn locations<O>(maze: &Maze<O>) -> &[Location] {
        &maze.order
    }

    /// Creation-order thresholds used to place the pickups.
    #[must_use]
    pub fn pickup_schedule<O>(maze: &Maze<O>) -> PickupSchedule {
        maze.pickups
    }

    /// Restricted view of the chamber at `location`.
    #[must_use]
    pub fn chamber_view<O>(maze: &Maze<O>, location: Location) -> Option<ChamberView> {
        chamber(maze, location).map(ChamberView::of)
    }

    /// Snapshot of the chambers around `focus`.
    #[must_use]
    pub fn neighborhood<O: Occupant>(maze: &Maze<O>, focus: Location) -> Neighborhood {
        Neighborhood::capture(maze, focus)
    }
}
