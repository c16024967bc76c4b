use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use seedmask::{explore, BinomialTable, BitPlanes, ExploreConfig, ExploreRow, SeedConfig, SeedPlan};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "seedmask", about = "Spaced-seed mask design for approximate-match read indexing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Sensitivity target shared by the subcommands.
#[derive(Args, Debug, Clone, Copy)]
struct Budget {
    /// Bases per read (at most 64).
    #[arg(short = 'r', long, default_value_t = 64)]
    read_length: u32,
    /// Substitutions that must never cause a miss.
    #[arg(short = 's', long, default_value_t = 1)]
    substitutions: u32,
    /// Indels that must never cause a miss (at most the substitution budget).
    #[arg(short = 'i', long, default_value_t = 0)]
    indels: u32,
    /// Longest single indel.
    #[arg(short = 'l', long, default_value_t = 1)]
    indel_length: u32,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a seed plan and print every mask.
    Masks {
        #[command(flatten)]
        budget: Budget,
        /// Minimum window length in bases.
        #[arg(short = 'w', long, default_value_t = 16)]
        window_length: u32,
    },
    /// Print the window keys a read produces under every mask.
    Keys {
        #[command(flatten)]
        budget: Budget,
        /// Minimum window length in bases.
        #[arg(short = 'w', long, default_value_t = 16)]
        window_length: u32,
        /// Read bases (A/C/G/T).
        read: String,
        /// Also list the indel-tolerant keys.
        #[arg(long)]
        indel: bool,
    },
    /// Tabulate cost and miss probability for every window length.
    Explore {
        #[command(flatten)]
        budget: Budget,
        /// Per-base substitution probability.
        #[arg(long, default_value_t = 0.01)]
        error_rate: f64,
        /// Reference length in bases.
        #[arg(long, default_value_t = 3.1e9)]
        genome_size: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let table = Arc::new(BinomialTable::new());

    match cli.command {
        Commands::Masks {
            budget,
            window_length,
        } => run_masks(&table, budget, window_length)?,
        Commands::Keys {
            budget,
            window_length,
            read,
            indel,
        } => run_keys(&table, budget, window_length, &read, indel)?,
        Commands::Explore {
            budget,
            error_rate,
            genome_size,
        } => run_explore(&table, budget, error_rate, genome_size)?,
    }

    Ok(())
}

fn resolve_plan(
    table: &Arc<BinomialTable>,
    budget: Budget,
    window_length: u32,
) -> Result<SeedPlan> {
    let config = SeedConfig::new(
        budget.read_length,
        window_length,
        budget.substitutions,
        budget.indels,
        budget.indel_length,
    );
    let plan = SeedPlan::new(config, Arc::clone(table));
    if let Some(reason) = plan.invalid_reason() {
        bail!("cannot tile {config:?}: {reason}");
    }
    Ok(plan)
}

fn run_masks(table: &Arc<BinomialTable>, budget: Budget, window_length: u32) -> Result<()> {
    let plan = resolve_plan(table, budget, window_length)?;
    println!("{plan}");
    for (idx, mask) in plan.masks().iter().enumerate() {
        println!("mask {}\t{}\tplacements={}", idx + 1, mask, mask.placement_count());
    }
    Ok(())
}

fn run_keys(
    table: &Arc<BinomialTable>,
    budget: Budget,
    window_length: u32,
    read: &str,
    indel: bool,
) -> Result<()> {
    let plan = resolve_plan(table, budget, window_length)?;
    let planes = BitPlanes::encode(read.trim().as_bytes())
        .with_context(|| format!("failed to encode read '{}'", read.trim()))?;
    if (planes.len() as i32) < plan.read_length() {
        bail!(
            "read has {} bases but the plan covers {}",
            planes.len(),
            plan.read_length()
        );
    }

    let width = (plan.window_bits() as usize).div_ceil(4);
    for (idx, mask) in plan.masks().iter().enumerate() {
        print!("mask {}\t{:0width$x}", idx + 1, planes.window_key(mask));
        if indel {
            let mut keys: Vec<u64> = Vec::new();
            planes.indel_keys(mask, &mut keys);
            let rendered: Vec<String> = keys.iter().map(|key| format!("{key:0width$x}")).collect();
            print!("\t{}", rendered.join(","));
        }
        println!();
    }
    Ok(())
}

fn run_explore(
    table: &Arc<BinomialTable>,
    budget: Budget,
    error_rate: f64,
    genome_size: f64,
) -> Result<()> {
    let config = ExploreConfig {
        read_length: budget.read_length,
        substitutions: budget.substitutions,
        indels: budget.indels,
        indel_length: budget.indel_length,
        error_rate,
        genome_size,
    };
    let rows = explore(&config, table).context("exploration failed")?;

    if rows.is_empty() {
        println!(
            "No window length tiles a {}-base read with {} substitutions.",
            budget.read_length, budget.substitutions
        );
        return Ok(());
    }

    println!("w\tw'\tt\tchunks\twindows\tbuild\tsearch\tmiss");
    for row in &rows {
        print_row(row);
    }
    Ok(())
}

fn print_row(row: &ExploreRow) {
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{:.3e}\t{:.3e}",
        row.requested_window,
        row.tiling.window_length,
        row.tiling.chunk_length,
        row.tiling.chunks,
        row.windows,
        row.build_cost,
        row.search_cost,
        row.miss_probability
    );
}
