use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use treemap_core::BPTree;

mod config;

use config::{Config, KeyPattern};

#[derive(Parser)]
#[command(name = "treemap")]
#[command(about = "Seed a B+Tree map and report lookup diagnostics")]
struct Cli {
    /// Upper bound of the seeded key sequence
    #[arg(short, long, default_value_t = 25)]
    keys: usize,

    /// Draw random keys instead of ascending odd keys
    #[arg(short, long)]
    random: bool,

    /// Seed for the random key pattern
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum children per internal node
    #[arg(short, long, default_value_t = treemap_core::DEFAULT_ORDER)]
    order: usize,

    /// Print the tree after seeding
    #[arg(short, long)]
    print: bool,

    /// Print the result of every lookup
    #[arg(long)]
    show_lookups: bool,

    /// Log splits and other debug events
    #[arg(short, long)]
    verbose: bool,
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Config {
            total_keys: cli.keys,
            pattern: if cli.random { KeyPattern::Random } else { KeyPattern::Sequential },
            seed: cli.seed,
            order: cli.order,
            print_tree: cli.print,
            show_lookups: cli.show_lookups,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from(&cli);
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;

    match config.order {
        3 => run::<3>(&config),
        4 => run::<4>(&config),
        5 => run::<5>(&config),
        8 => run::<8>(&config),
        16 => run::<16>(&config),
        32 => run::<32>(&config),
        64 => run::<64>(&config),
        other => anyhow::bail!("Unsupported order: {}", other),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Key/value pairs to seed: one per odd `i <= total_keys`, valued `i * i`.
fn workload(config: &Config) -> Vec<(u64, u64)> {
    let total = config.total_keys as u64;
    let odd = (1..=total).step_by(2);

    match config.pattern {
        KeyPattern::Sequential => odd.map(|i| (i, i * i)).collect(),
        KeyPattern::Random => {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            odd.map(|i| (rng.gen_range(0..2 * total), i * i)).collect()
        }
    }
}

fn run<const ORDER: usize>(config: &Config) -> Result<()> {
    let pairs = workload(config);
    let mut tree = BPTree::<u64, u64, ORDER>::new();

    let started = Instant::now();
    let mut duplicates = 0usize;
    for (key, value) in pairs {
        if tree.put(key, value).is_err() {
            duplicates += 1;
        }
    }
    let elapsed = started.elapsed();

    tracing::info!(
        order = ORDER,
        keys = tree.size(),
        duplicates,
        height = tree.height(),
        ?elapsed,
        "tree seeded"
    );

    tree.check_invariants().context("Tree failed its structural check")?;

    if config.print_tree {
        println!("{}", tree);
    }

    let lookups = config.total_keys as u64 + 1;
    tree.reset_nodes_visited();
    let started = Instant::now();
    let mut found = 0usize;
    for key in 0..lookups {
        let value = tree.get(&key);
        if value.is_some() {
            found += 1;
        }
        if config.show_lookups {
            println!("key = {} value = {:?}", key, value);
        }
    }
    let elapsed = started.elapsed();

    println!("-------------------------------------------");
    println!("Keys stored = {}", tree.size());
    if let (Ok(first), Ok(last)) = (tree.first_key(), tree.last_key()) {
        println!("Key span = [{}, {}]", first, last);
    }
    println!("Lookups = {} ({} found) in {:?}", lookups, found, elapsed);
    println!(
        "Average number of nodes accessed = {}",
        tree.nodes_visited() as f64 / lookups as f64
    );

    Ok(())
}
