use std::collections::{HashSet, VecDeque};

use chamber_crawl_core::{
    BattleStrategy, Direction, Location, MazeConfig, Occupant, OccupantFactory, RandomSource,
};
use chamber_crawl_world::{query, Maze};
use proptest::prelude::*;

struct Rat;

impl Occupant for Rat {
    fn sacks(&self) -> u32 {
        1
    }

    fn strategy(&self) -> Option<BattleStrategy> {
        None
    }
}

struct Rats;

impl OccupantFactory for Rats {
    type Occupant = Rat;

    fn create(&mut self, _rng: &mut RandomSource) -> Rat {
        Rat
    }
}

fn reachable(maze: &Maze<Rat>) -> usize {
    let mut seen = HashSet::from([Location::ORIGIN]);
    let mut queue = VecDeque::from([Location::ORIGIN]);
    while let Some(location) = queue.pop_front() {
        for direction in Direction::ALL {
            let next = location.step(direction);
            if query::has_door_at(maze, direction, location)
                && query::has_chamber(maze, next)
                && seen.insert(next)
            {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}

proptest! {
    #[test]
    fn generated_mazes_hold_their_invariants(seed in any::<u64>(), chambers in 5u32..300) {
        let mut rng = RandomSource::with_seed(seed);
        let maze = Maze::generate(&MazeConfig::new(chambers), &mut rng, &mut Rats)
            .expect("valid config");
        let total = query::total_chambers(&maze);

        prop_assert!(total <= chambers as usize);
        prop_assert_eq!(reachable(&maze), total);

        let mut pickups = HashSet::new();
        let mut occupant_ids = Vec::new();
        for &location in query::locations(&maze) {
            let chamber = query::chamber(&maze, location).expect("listed");
            for direction in Direction::ALL {
                let neighbor = location.step(direction);
                if let Some(other) = query::chamber(&maze, neighbor) {
                    prop_assert_eq!(chamber.wall(direction), other.wall(direction.opposite()));
                }
            }
            if let Some(pickup) = chamber.pickup() {
                prop_assert!(pickups.insert(pickup));
                prop_assert!(!chamber.is_origin());
            }
            if let Some(id) = chamber.occupant() {
                occupant_ids.push(id.get());
            }
            prop_assert_eq!(chamber.is_visited(), chamber.is_origin());
        }

        occupant_ids.sort_unstable();
        let expected: Vec<u32> = (0..query::occupants(&maze).len() as u32).collect();
        prop_assert_eq!(occupant_ids, expected);
    }

    #[test]
    fn requests_below_the_floor_are_rejected(seed in any::<u64>(), chambers in 0u32..5) {
        let mut rng = RandomSource::with_seed(seed);
        let result = Maze::generate(&MazeConfig::new(chambers), &mut rng, &mut Rats);
        prop_assert!(result.is_err());
    }
}
