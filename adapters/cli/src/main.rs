#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates a Chamber Crawl maze and dumps it.

use anyhow::{Context, Result};
use chamber_crawl_core::{
    Command, Direction, Event, Location, MazeConfig, RandomSource, WELCOME_BANNER,
};
use chamber_crawl_system_population::GrumanFactory;
use chamber_crawl_world::{self as world, query, Maze, Neighborhood};
use clap::Parser;

/// Generates a maze of chambers and prints its layout.
#[derive(Parser, Debug)]
#[command(name = "chamber-crawl", version, about, long_about = None)]
struct Args {
    /// Number of chambers to request from the generator
    #[arg(short, long, default_value_t = 20)]
    chambers: u32,

    /// Seed for the random source; drawn from OS entropy when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Visit every chamber in creation order and report the pickups found
    #[arg(long)]
    walk: bool,
}

/// Entry point for the Chamber Crawl command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = args
        .seed
        .map_or_else(RandomSource::from_entropy, RandomSource::with_seed);
    let config = MazeConfig::new(args.chambers);
    let mut factory = GrumanFactory::default();
    let mut maze = Maze::generate(&config, &mut rng, &mut factory)
        .with_context(|| format!("cannot generate maze with seed {}", rng.seed()))?;

    println!("{WELCOME_BANNER}");
    println!(
        "seed {}: {} of {} chambers, {} occupied",
        rng.seed(),
        query::total_chambers(&maze),
        query::requested_chambers(&maze),
        query::occupants(&maze).len(),
    );
    println!();
    println!("{}", maze.render_plan());
    print!("{maze}");
    println!();
    print_neighborhood(&query::neighborhood(&maze, Location::ORIGIN));

    if args.walk {
        println!();
        walk(&mut maze);
    }
    Ok(())
}

fn print_neighborhood(neighborhood: &Neighborhood) {
    println!("around the entrance {}:", neighborhood.focus());
    for view in neighborhood.iter() {
        let doors: Vec<String> = Direction::ALL
            .into_iter()
            .filter(|&direction| view.has_door(direction))
            .map(|direction| direction.to_string())
            .collect();
        let occupant = neighborhood
            .occupant_sacks(view.location())
            .map_or_else(String::new, |sacks| format!(", occupant with {sacks} sacks"));
        println!("  {} doors [{}]{occupant}", view.location(), doors.join(" "));
    }
}

fn walk<O>(maze: &mut Maze<O>) {
    let route = query::locations(maze).to_vec();
    let mut events = Vec::new();
    for location in route {
        world::apply(maze, Command::VisitChamber { location }, &mut events);
    }

    for event in &events {
        if let Event::ChamberVisited {
            location,
            pickup: Some(pickup),
            ..
        } = event
        {
            println!("picked up {pickup} at {location}");
        }
    }
    println!(
        "walked {} chambers, {} left unvisited",
        query::chambers_discovered(maze),
        query::chambers_left(maze)
    );
}
