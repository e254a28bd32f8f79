#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Occupant factory that stocks generated mazes with Gruman monsters.

use std::time::Duration;

use chamber_crawl_core::{BattleStrategy, Occupant, OccupantFactory, RandomSource};

/// Most sacks of treasure a Gruman may start with.
pub const MAX_SACKS_TO_START: u32 = 10;
/// Upper bound of a freshly rolled health value.
pub const MAX_HEALTH: u32 = 100;
/// Upper bound of a freshly rolled strength value.
pub const MAX_STRENGTH: u32 = 10;

const HEALTH_SCALE: f64 = 100.0;

const ATTACK_DELAY_MS: (u32, u32) = (250, 2_000);
const ATTACK_INTERVAL_MS: (u32, u32) = (125, 1_000);
const HEAL_DELAY_MS: (u32, u32) = (250, 2_000);

/// Strategy table rolled for each Gruman; most carry nothing.
const STRATEGIES: [Option<BattleStrategy>; 8] = [
    None,
    None,
    None,
    None,
    None,
    Some(BattleStrategy::Shield),
    Some(BattleStrategy::Megaphone),
    Some(BattleStrategy::Mask),
];

const NAMES: [&str; 20] = [
    "Inky", "Binky", "Blinky", "Dinky", "Jinky", "Pinky", "Slinky", "Stinky", "Blimpy", "Gimpy",
    "Limpy", "Wimpy", "Dorky", "Beeky", "Geeky", "Gadget", "Didget", "Fidget", "Gidget", "Widget",
];

/// Monster lurking in a chamber, guarding its sacks of treasure.
#[derive(Clone, Debug, PartialEq)]
pub struct Gruman {
    name: String,
    sacks: u32,
    health: u32,
    strength: u32,
    strategy: Option<BattleStrategy>,
    attack_delay: Duration,
    attack_interval: Duration,
    heal_delay: Duration,
}

impl Gruman {
    /// Name drawn from the factory's pool.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Health rolled at creation, in `1..=MAX_HEALTH`.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Strength rolled at creation, in `1..=MAX_STRENGTH`.
    #[must_use]
    pub const fn strength(&self) -> u32 {
        self.strength
    }

    /// Delay before the first attack once the player enters.
    #[must_use]
    pub const fn attack_delay(&self) -> Duration {
        self.attack_delay
    }

    /// Time between consecutive attacks.
    #[must_use]
    pub const fn attack_interval(&self) -> Duration {
        self.attack_interval
    }

    /// Delay before the Gruman starts healing after the player leaves.
    #[must_use]
    pub const fn heal_delay(&self) -> Duration {
        self.heal_delay
    }

    /// Magnitude of the Gruman's roar, amplified by its strategy.
    #[must_use]
    pub fn terror_force(&self) -> f64 {
        let force = f64::from(self.strength) * f64::from(self.health) / HEALTH_SCALE;
        self.strategy
            .map_or(force, |strategy| force * strategy.attack_multiplier())
    }
}

impl Occupant for Gruman {
    fn sacks(&self) -> u32 {
        self.sacks
    }

    fn strategy(&self) -> Option<BattleStrategy> {
        self.strategy
    }
}

/// Creates Grumans with names taken from a pool without replacement.
///
/// The pool refills once every name has been handed out.
#[derive(Clone, Debug)]
pub struct GrumanFactory {
    names: Vec<&'static str>,
    created: u32,
}

impl Default for GrumanFactory {
    fn default() -> Self {
        Self {
            names: NAMES.to_vec(),
            created: 0,
        }
    }
}

impl GrumanFactory {
    /// Number of Grumans created so far.
    #[must_use]
    pub const fn created(&self) -> u32 {
        self.created
    }

    fn take_name(&mut self, rng: &mut RandomSource) -> &'static str {
        if self.names.is_empty() {
            self.names = NAMES.to_vec();
        }
        let index = draw_index(rng, self.names.len());
        self.names.swap_remove(index)
    }
}

impl OccupantFactory for GrumanFactory {
    type Occupant = Gruman;

    fn create(&mut self, rng: &mut RandomSource) -> Gruman {
        let name = self.take_name(rng);
        let sacks = rng.next_int(MAX_SACKS_TO_START + 1);
        let health = 1 + rng.next_int(MAX_HEALTH);
        let strength = 1 + rng.next_int(MAX_STRENGTH);
        let strategy = STRATEGIES[draw_index(rng, STRATEGIES.len())];
        let gruman = Gruman {
            name: name.to_owned(),
            sacks,
            health,
            strength,
            strategy,
            attack_delay: millis_between(rng, ATTACK_DELAY_MS),
            attack_interval: millis_between(rng, ATTACK_INTERVAL_MS),
            heal_delay: millis_between(rng, HEAL_DELAY_MS),
        };

        self.created += 1;
        log::debug!("created gruman #{}: {gruman:?}", self.created);
        gruman
    }
}

/// Uniform index into a non-empty table of `len` entries.
fn draw_index(rng: &mut RandomSource, len: usize) -> usize {
    let bound = u32::try_from(len).unwrap_or(u32::MAX);
    usize::try_from(rng.next_int(bound)).unwrap_or(0)
}

fn millis_between(rng: &mut RandomSource, (lower, upper): (u32, u32)) -> Duration {
    Duration::from_millis(u64::from(rng.next_int_between(lower, upper)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_pool_refills_after_exhaustion() {
        let mut factory = GrumanFactory::default();
        let mut rng = RandomSource::with_seed(1);

        let mut first_round: Vec<&str> = (0..NAMES.len())
            .map(|_| factory.take_name(&mut rng))
            .collect();
        first_round.sort_unstable();
        let mut expected = NAMES.to_vec();
        expected.sort_unstable();
        assert_eq!(first_round, expected, "each name handed out once per round");

        assert!(factory.names.is_empty());
        let _ = factory.take_name(&mut rng);
        assert_eq!(factory.names.len(), NAMES.len() - 1);
    }

    #[test]
    fn terror_force_applies_strategy_multiplier() {
        let mut gruman = Gruman {
            name: "Inky".to_owned(),
            sacks: 2,
            health: 50,
            strength: 4,
            strategy: None,
            attack_delay: Duration::from_millis(250),
            attack_interval: Duration::from_millis(125),
            heal_delay: Duration::from_millis(250),
        };
        assert!((gruman.terror_force() - 2.0).abs() < f64::EPSILON);

        gruman.strategy = Some(BattleStrategy::Mask);
        assert!((gruman.terror_force() - 5.0).abs() < f64::EPSILON);
    }
}
