//! Frontier-driven maze generator.
//!
//! Generation starts from the entrance and repeatedly materializes the most
//! recently discovered location (a LIFO frontier, which yields long corridors
//! rather than breadth-first blobs). Every location on the frontier is already
//! the target of a door, so each chamber is reachable from the entrance the
//! moment it is created.

use std::collections::{HashMap, HashSet};

use chamber_crawl_core::{
    BattleStrategy, Direction, GenerationTuning, Location, MazeConfig, OccupantFactory,
    OccupantId, RandomSource, Wall, Walls,
};

use crate::chamber::Chamber;

/// Creation-order thresholds at which the three pickups are placed.
///
/// A chamber receives a pickup when the number of chambers inserted before it
/// equals one of the thresholds. Thresholds are `n/4`, `n/2` and `3n/4` of the
/// requested chamber count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PickupSchedule {
    thresholds: [u32; 3],
}

impl PickupSchedule {
    /// Computes the thresholds for a maze of `chambers` requested chambers.
    #[must_use]
    pub fn for_chambers(chambers: u32) -> Self {
        let three_quarters = u64::from(chambers) * 3 / 4;
        Self {
            thresholds: [
                chambers / 4,
                chambers / 2,
                u32::try_from(three_quarters).unwrap_or(u32::MAX),
            ],
        }
    }

    /// Thresholds paired with [`BattleStrategy::PICKUPS`].
    #[must_use]
    pub const fn thresholds(&self) -> [u32; 3] {
        self.thresholds
    }

    /// Pickup owed to the chamber inserted after `creation_index` others.
    ///
    /// Index 0 belongs to the entrance and never yields a pickup.
    #[must_use]
    pub fn pickup_at(&self, creation_index: u32) -> Option<BattleStrategy> {
        if creation_index == 0 {
            return None;
        }
        self.thresholds
            .iter()
            .zip(BattleStrategy::PICKUPS)
            .find(|(threshold, _)| **threshold == creation_index)
            .map(|(_, pickup)| pickup)
    }
}

/// Output of a finished generation pass.
#[derive(Debug)]
pub(crate) struct Layout<O> {
    pub(crate) chambers: HashMap<Location, Chamber>,
    pub(crate) order: Vec<Location>,
    pub(crate) occupants: Vec<O>,
    pub(crate) pickups: PickupSchedule,
}

/// Runs the generator to completion.
///
/// The configuration must already be validated.
pub(crate) fn run<F>(
    config: &MazeConfig,
    rng: &mut RandomSource,
    factory: &mut F,
) -> Layout<F::Occupant>
where
    F: OccupantFactory,
{
    let mut generator = Generator::new(config, rng, factory);
    generator.place_entrance();

    while let Some(location) = generator.frontier.pop() {
        let _ = generator.pending.remove(&location);
        let occupant = generator.roll_occupant();
        let walls = generator.carve_walls(location);
        let creation_index = generator.creation_index;
        let pickup = generator.pickups.pickup_at(creation_index);
        generator.insert(Chamber::generated(
            walls,
            location,
            occupant,
            pickup,
            creation_index,
        ));
    }

    generator.finish()
}

/// Upper bound on the storage reserved before generation starts.
const MAX_RESERVED_CHAMBERS: usize = 1 << 16;

/// Storage reserved up front for a request of `chambers`; larger mazes grow on demand.
fn reserved_capacity(chambers: u32) -> usize {
    usize::try_from(chambers)
        .unwrap_or(MAX_RESERVED_CHAMBERS)
        .min(MAX_RESERVED_CHAMBERS)
}

struct Generator<'a, F: OccupantFactory> {
    tuning: GenerationTuning,
    rng: &'a mut RandomSource,
    factory: &'a mut F,
    chambers_left: u32,
    min_forced_left: u32,
    creation_index: u32,
    frontier: Vec<Location>,
    pending: HashSet<Location>,
    pickups: PickupSchedule,
    chambers: HashMap<Location, Chamber>,
    order: Vec<Location>,
    occupants: Vec<F::Occupant>,
}

impl<'a, F: OccupantFactory> Generator<'a, F> {
    fn new(config: &MazeConfig, rng: &'a mut RandomSource, factory: &'a mut F) -> Self {
        let tuning = *config.tuning();
        let capacity = reserved_capacity(config.chambers());
        Self {
            tuning,
            rng,
            factory,
            chambers_left: config.chambers().saturating_sub(1),
            min_forced_left: tuning.min_forced,
            creation_index: 0,
            frontier: Vec::new(),
            pending: HashSet::new(),
            pickups: PickupSchedule::for_chambers(config.chambers()),
            chambers: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            occupants: Vec::new(),
        }
    }

    /// Inserts the entrance and queues the location behind its only door.
    ///
    /// The entrance door consumes chamber budget but never the forced minimum.
    fn place_entrance(&mut self) {
        let entrance = Chamber::entrance(self.rng);
        self.chambers_left = self.chambers_left.saturating_sub(1);
        for direction in entrance.walls().doors() {
            let _ = self.queue(entrance.location().step(direction));
        }
        self.insert(entrance);
    }

    fn roll_occupant(&mut self) -> Option<OccupantId> {
        if self.rng.next_int(self.tuning.occupant_odds) == 0 {
            return None;
        }
        let id = OccupantId::new(u32::try_from(self.occupants.len()).unwrap_or(u32::MAX));
        self.occupants.push(self.factory.create(self.rng));
        Some(id)
    }

    fn carve_walls(&mut self, location: Location) -> Walls {
        let mut walls = Walls::SEALED;
        for direction in Direction::ALL {
            let neighbor = location.step(direction);
            let mirrored = self
                .chambers
                .get(&neighbor)
                .map(|chamber| chamber.wall(direction.opposite()));

            let wall = if let Some(wall) = mirrored {
                wall
            } else if self.chambers_left > 0 && self.roll_door() {
                if self.queue(neighbor) {
                    self.chambers_left -= 1;
                    self.min_forced_left = self.min_forced_left.saturating_sub(1);
                }
                Wall::Door
            } else {
                Wall::Blank
            };
            walls = walls.with(direction, wall);
        }
        walls
    }

    /// The door roll is drawn before the forced minimum is consulted so the
    /// random stream advances identically whether or not the door is forced.
    fn roll_door(&mut self) -> bool {
        self.rng.next_int(self.tuning.door_odds) > 0 || self.min_forced_left > 0
    }

    fn queue(&mut self, location: Location) -> bool {
        if !self.pending.insert(location) {
            return false;
        }
        self.frontier.push(location);
        true
    }

    fn insert(&mut self, chamber: Chamber) {
        let location = chamber.location();
        debug_assert!(
            !self.chambers.contains_key(&location),
            "chamber at {location} materialized twice"
        );
        log::debug!(
            "chamber #{} at {location}: doors {:?}, occupant {:?}, pickup {:?}",
            self.creation_index,
            chamber.walls().doors().collect::<Vec<_>>(),
            chamber.occupant().map(|id| id.get()),
            chamber.pickup(),
        );
        let _ = self.chambers.insert(location, chamber);
        self.order.push(location);
        self.creation_index += 1;
    }

    fn finish(self) -> Layout<F::Occupant> {
        Layout {
            chambers: self.chambers,
            order: self.order,
            occupants: self.occupants,
            pickups: self.pickups,
        }
    }
}
