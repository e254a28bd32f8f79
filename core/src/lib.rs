#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Chamber Crawl engine.
//!
//! This crate defines the value types and the message surface that connect
//! the authoritative maze, the occupant systems, and the adapters. The maze is
//! generated once from a [`MazeConfig`] and a [`RandomSource`]; afterwards the
//! only permitted mutation is submitted as a [`Command`] and acknowledged with
//! [`Event`] values.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod random;

pub use random::RandomSource;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Chamber Crawl.";

/// Smallest chamber count a maze may be asked to generate.
pub const MIN_CHAMBERS: u32 = 5;

/// Commands that express all permissible mutations of a generated maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Marks the chamber at the location as visited, consuming its pickup.
    VisitChamber {
        /// Location of the chamber the player entered.
        location: Location,
    },
}

/// Events broadcast by the maze after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the player entered a chamber.
    ChamberVisited {
        /// Location of the visited chamber.
        location: Location,
        /// Whether this was the first time the chamber was entered.
        first_visit: bool,
        /// Pickup consumed by this visit, if the chamber still carried one.
        pickup: Option<BattleStrategy>,
    },
    /// Reports that a visit could not be applied.
    VisitRejected {
        /// Location provided in the visit request.
        location: Location,
        /// Specific reason the visit failed.
        reason: VisitError,
    },
}

/// Reasons a visit request may be rejected by the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitError {
    /// No chamber was materialized at the requested location.
    MissingChamber,
}

/// Errors raised while validating a maze configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// The requested chamber count is below the configured floor.
    #[error("a maze needs at least {minimum} chambers, {requested} were requested")]
    TooFewChambers {
        /// Chamber count supplied by the caller.
        requested: u32,
        /// Floor enforced by the tuning.
        minimum: u32,
    },
    /// One of the odds denominators was zero.
    #[error("{0} odds must be non-zero")]
    ZeroOdds(&'static str),
}

/// Cardinal compass directions joining neighbouring chambers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward decreasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Next direction clockwise.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Direction pointing back across the same edge.
    #[must_use]
    pub const fn opposite(self) -> Self {
        self.next().next()
    }

    /// Unit offset as `(column, row)` deltas.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    /// Dense index of the direction within [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "North",
            Self::East => "East",
            Self::South => "South",
            Self::West => "West",
        };
        f.write_str(name)
    }
}

/// Location of a chamber slot expressed as column and row coordinates.
///
/// Coordinates are signed: the maze grows in every direction away from the
/// entrance at [`Location::ORIGIN`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    column: i32,
    row: i32,
}

impl Location {
    /// Location of the maze entrance.
    pub const ORIGIN: Location = Location::new(0, 0);

    /// Creates a new location.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Column of the location.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Row of the location.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Location one step away in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (columns, rows) = direction.offset();
        Self::new(self.column + columns, self.row + rows)
    }

    /// Reports whether this is the entrance location.
    #[must_use]
    pub const fn is_origin(&self) -> bool {
        self.column == 0 && self.row == 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// State of the edge between two grid-adjacent chamber slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wall {
    /// Solid wall; no traversal.
    #[default]
    Blank,
    /// Door permitting traversal to the neighbouring chamber.
    Door,
}

impl Wall {
    /// Reports whether the wall is a door.
    #[must_use]
    pub const fn is_door(self) -> bool {
        matches!(self, Self::Door)
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("blank"),
            Self::Door => f.write_str("door"),
        }
    }
}

/// The four walls of a chamber, one entry per [`Direction`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Walls([Wall; 4]);

impl Walls {
    /// Walls with every side blank.
    pub const SEALED: Walls = Walls([Wall::Blank; 4]);

    /// Returns a copy with the wall facing `direction` replaced.
    #[must_use]
    pub fn with(mut self, direction: Direction, wall: Wall) -> Self {
        self.0[direction.index()] = wall;
        self
    }

    /// Wall facing the provided direction.
    #[must_use]
    pub const fn get(&self, direction: Direction) -> Wall {
        self.0[direction.index()]
    }

    /// Reports whether the wall facing `direction` is a door.
    #[must_use]
    pub const fn has_door(&self, direction: Direction) -> bool {
        self.get(direction).is_door()
    }

    /// Iterates over `(direction, wall)` pairs in [`Direction::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Wall)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |direction| (direction, self.get(direction)))
    }

    /// Iterates over the directions that carry a door.
    pub fn doors(&self) -> impl Iterator<Item = Direction> + '_ {
        self.iter()
            .filter(|(_, wall)| wall.is_door())
            .map(|(direction, _)| direction)
    }
}

/// Battle strategies carried by occupants or left in chambers as pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BattleStrategy {
    /// Deflects suffered force some of the time.
    Shield,
    /// Amplifies a poke.
    Cane,
    /// Amplifies a poke strongly.
    Umbrella,
    /// Amplifies a roar.
    Megaphone,
    /// Amplifies a roar strongly.
    Mask,
}

impl BattleStrategy {
    /// Pickups placed by the generator, in placement order.
    pub const PICKUPS: [BattleStrategy; 3] = [
        BattleStrategy::Shield,
        BattleStrategy::Cane,
        BattleStrategy::Umbrella,
    ];

    /// Factor applied to attack forces by the combat layer.
    #[must_use]
    pub const fn attack_multiplier(self) -> f64 {
        match self {
            Self::Shield => 1.0,
            Self::Cane | Self::Megaphone => 1.5,
            Self::Umbrella => 3.0,
            Self::Mask => 2.5,
        }
    }

    /// Probability that a suffered force is deflected entirely.
    #[must_use]
    pub const fn deflect_odds(self) -> f64 {
        match self {
            Self::Shield => 0.3,
            Self::Cane | Self::Umbrella | Self::Megaphone | Self::Mask => 0.0,
        }
    }
}

impl fmt::Display for BattleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Shield => "Shield",
            Self::Cane => "Cane",
            Self::Umbrella => "Umbrella",
            Self::Megaphone => "Megaphone",
            Self::Mask => "Mask",
        };
        f.write_str(name)
    }
}

/// Identifier assigned to an occupant; equal to its index in the occupant list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccupantId(u32);

impl OccupantId {
    /// Creates a new occupant identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Index of the occupant within the dense occupant list.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Accessors the maze passes through for occupants it stores.
pub trait Occupant {
    /// Sacks of treasure carried by the occupant.
    fn sacks(&self) -> u32;

    /// Battle strategy carried by the occupant, if any.
    fn strategy(&self) -> Option<BattleStrategy>;
}

/// Produces occupants on demand while a maze is generated.
///
/// Factories draw from the same [`RandomSource`] as the generator so a seed
/// reproduces occupants together with the chamber graph.
pub trait OccupantFactory {
    /// Occupant type produced by the factory.
    type Occupant: Occupant;

    /// Creates the next occupant.
    fn create(&mut self, rng: &mut RandomSource) -> Self::Occupant;
}

/// Tuning knobs for the maze generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationTuning {
    /// Smallest chamber count accepted by [`MazeConfig::validate`].
    pub min_chambers: u32,
    /// Number of frontier expansions forced regardless of the door roll.
    pub min_forced: u32,
    /// An occupant is placed when `next_int(occupant_odds) > 0`.
    pub occupant_odds: u32,
    /// A new door is opened when `next_int(door_odds) > 0`.
    pub door_odds: u32,
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            min_chambers: MIN_CHAMBERS,
            min_forced: 5,
            occupant_odds: 3,
            door_odds: 3,
        }
    }
}

/// Configuration parameters required to generate a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    chambers: u32,
    tuning: GenerationTuning,
}

impl MazeConfig {
    /// Creates a configuration requesting `chambers` chambers with default tuning.
    #[must_use]
    pub fn new(chambers: u32) -> Self {
        Self {
            chambers,
            tuning: GenerationTuning::default(),
        }
    }

    /// Replaces the generator tuning.
    #[must_use]
    pub fn with_tuning(mut self, tuning: GenerationTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Requested chamber count, including the entrance.
    #[must_use]
    pub const fn chambers(&self) -> u32 {
        self.chambers
    }

    /// Tuning applied by the generator.
    #[must_use]
    pub const fn tuning(&self) -> &GenerationTuning {
        &self.tuning
    }

    /// Rejects configurations the generator cannot honour.
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.chambers < self.tuning.min_chambers {
            return Err(MazeError::TooFewChambers {
                requested: self.chambers,
                minimum: self.tuning.min_chambers,
            });
        }
        if self.tuning.occupant_odds == 0 {
            return Err(MazeError::ZeroOdds("occupant"));
        }
        if self.tuning.door_odds == 0 {
            return Err(MazeError::ZeroOdds("door"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BattleStrategy, Direction, GenerationTuning, Location, MazeConfig, MazeError, Wall, Walls,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn next_cycles_clockwise() {
        assert_eq!(Direction::North.next(), Direction::East);
        assert_eq!(Direction::East.next(), Direction::South);
        assert_eq!(Direction::South.next(), Direction::West);
        assert_eq!(Direction::West.next(), Direction::North);
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in Direction::ALL {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn stepping_there_and_back_returns_home() {
        let start = Location::new(3, -2);
        for direction in Direction::ALL {
            assert_eq!(start.step(direction).step(direction.opposite()), start);
        }
        assert_eq!(Location::ORIGIN.step(Direction::North), Location::new(0, 1));
        assert_eq!(Location::ORIGIN.step(Direction::West), Location::new(-1, 0));
    }

    #[test]
    fn walls_replace_single_entries() {
        let walls = Walls::SEALED.with(Direction::East, Wall::Door);
        assert!(walls.has_door(Direction::East));
        assert!(!walls.has_door(Direction::West));
        assert_eq!(walls.doors().collect::<Vec<_>>(), vec![Direction::East]);
        assert_eq!(walls.iter().count(), 4);
    }

    #[test]
    fn config_below_floor_is_rejected() {
        let error = MazeConfig::new(4).validate().unwrap_err();
        assert_eq!(
            error,
            MazeError::TooFewChambers {
                requested: 4,
                minimum: 5
            }
        );
        assert!(MazeConfig::new(5).validate().is_ok());
    }

    #[test]
    fn config_with_zero_odds_is_rejected() {
        let tuning = GenerationTuning {
            door_odds: 0,
            ..GenerationTuning::default()
        };
        let error = MazeConfig::new(10).with_tuning(tuning).validate();
        assert_eq!(error, Err(MazeError::ZeroOdds("door")));
    }

    #[test]
    fn pickups_are_distinct() {
        let [first, second, third] = BattleStrategy::PICKUPS;
        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_ne!(first, third);
    }

    #[test]
    fn strategy_tables_match_combat_rules() {
        let table = [
            (BattleStrategy::Shield, 1.0, 0.3),
            (BattleStrategy::Cane, 1.5, 0.0),
            (BattleStrategy::Umbrella, 3.0, 0.0),
            (BattleStrategy::Megaphone, 1.5, 0.0),
            (BattleStrategy::Mask, 2.5, 0.0),
        ];
        for (strategy, multiplier, deflect) in table {
            assert!(
                (strategy.attack_multiplier() - multiplier).abs() < f64::EPSILON,
                "{strategy} multiplier"
            );
            assert!(
                (strategy.deflect_odds() - deflect).abs() < f64::EPSILON,
                "{strategy} deflect odds"
            );
        }
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn location_round_trips_through_bincode() {
        assert_round_trip(&Location::new(-7, 12));
    }

    #[test]
    fn walls_round_trip_through_bincode() {
        assert_round_trip(&Walls::SEALED.with(Direction::South, Wall::Door));
    }

    #[test]
    fn battle_strategy_round_trips_through_bincode() {
        assert_round_trip(&BattleStrategy::Umbrella);
    }
}
