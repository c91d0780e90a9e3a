use std::collections::HashSet;
use std::io;

use anyhow::{Result, ensure};
use clap::Parser;
use levelgen::{
    Algorithm, GenerationConfig, GridMap, Pos, a_star, compute_visibility, flood_fill, generate,
    walkable_through_doors,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    iterations: u32,
}

fn pick<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

fn between(rng: &mut ChaCha8Rng, min: usize, max: usize) -> usize {
    min + rng.next_u64() as usize % (max - min + 1)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    info!(seed = args.seed, iterations = args.iterations, "starting level fuzz");
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for iteration in 0..args.iterations {
        let algorithm = pick(&mut rng, &Algorithm::ALL);
        let width = between(&mut rng, 20, 100);
        let height = between(&mut rng, 16, 60);
        let config = GenerationConfig::new(algorithm, width, height).with_seed(rng.next_u64());
        let map = generate(&config)?;
        check_level(&config, map, &mut rng)
            .map_err(|err| err.context(format!("iteration {iteration}: {config:?}")))?;
        debug!(iteration, algorithm = algorithm.name(), width, height, "level ok");
    }

    info!(iterations = args.iterations, "all invariants held");
    Ok(())
}

fn check_level(config: &GenerationConfig, mut map: GridMap, rng: &mut ChaCha8Rng) -> Result<()> {
    let spawn = map.spawn;
    ensure!(!map.blocks_movement(spawn), "spawn {spawn:?} blocks movement");
    ensure!(
        map.positions().filter(|&pos| !map.is_interior(pos)).all(|pos| map.blocks_movement(pos)),
        "outer border is open"
    );

    let reachable = flood_fill(&map, spawn, walkable_through_doors);
    let reached: HashSet<Pos> = reachable.iter().copied().collect();
    for region in map.regions.iter().filter(|region| region.is_connectivity_anchor()) {
        ensure!(reached.contains(&region.rect.center()), "{:?} is unreachable", region.rect);
    }

    for _ in 0..4 {
        let goal = pick(rng, &reachable);
        let path = a_star(&map, spawn, goal, walkable_through_doors);
        ensure!(path.first() == Some(&spawn), "path to {goal:?} does not start at spawn");
        ensure!(path.last() == Some(&goal), "path to {goal:?} does not end at the goal");
        ensure!(path.len() as u32 > spawn.manhattan(goal), "path to {goal:?} is too short");
        ensure!(
            path.windows(2).all(|step| step[0].manhattan(step[1]) == 1),
            "path to {goal:?} skips cells"
        );
    }

    let replay = generate(config)?;
    ensure!(replay.fingerprint() == map.fingerprint(), "same seed produced a different level");

    compute_visibility(&mut map, spawn, 8);
    ensure!(map.is_visible(spawn) && map.is_explored(spawn), "spawn not visible to itself");
    Ok(())
}
