use std::path::PathBuf;

use mlbattle_engine::{Algorithm, BattleOutcome, BattleResult, BattleRng, BattleSeed, BattleSide, battle};
use tracing::info;

use crate::model::MetricsTable;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Algorithm of the first fighter
    first: Algorithm,
    /// Algorithm of the second fighter
    second: Algorithm,
    /// Number of battles to run
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,
    /// 32-digit hex seed for a reproducible run
    #[arg(long)]
    seed: Option<BattleSeed>,
    /// JSON file with model metrics keyed by algorithm name
    #[arg(long)]
    metrics: Option<PathBuf>,
}

/// Aggregated results of repeated battles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Tally {
    battles: u32,
    first_wins: u32,
    second_wins: u32,
    round_caps: u32,
    total_actions: usize,
    min_actions: Option<usize>,
    max_actions: usize,
}

impl Tally {
    fn record(&mut self, result: &BattleResult) {
        self.battles += 1;
        match result.winner_side {
            BattleSide::First => self.first_wins += 1,
            BattleSide::Second => self.second_wins += 1,
        }
        if result.outcome == BattleOutcome::RoundCap {
            self.round_caps += 1;
        }
        self.total_actions += result.total_actions;
        self.min_actions = Some(
            self.min_actions
                .map_or(result.total_actions, |m| m.min(result.total_actions)),
        );
        self.max_actions = self.max_actions.max(result.total_actions);
    }

    fn win_rate(&self, wins: u32) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        f64::from(wins) / f64::from(self.battles) * 100.0
    }

    #[expect(clippy::cast_precision_loss)]
    fn mean_actions(&self) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        self.total_actions as f64 / f64::from(self.battles)
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let mut rng = arg.seed.map_or_else(BattleRng::new, BattleRng::with_seed);
    let seed = rng.seed();
    let metrics = MetricsTable::load_or_baseline(arg.metrics.as_deref());
    info!(count = arg.count, %seed, "simulating battles");

    let mut tally = Tally::default();
    for _ in 0..arg.count {
        let first = metrics.create_fighter(arg.first, &mut rng)?;
        let second = metrics.create_fighter(arg.second, &mut rng)?;
        tally.record(&battle(&first, &second, &mut rng));
    }

    println!(
        "{} vs {} ({} battles, seed {seed})",
        arg.first, arg.second, tally.battles
    );
    println!(
        "  {:<24} {:>5} wins ({:.1}%)",
        arg.first.name(),
        tally.first_wins,
        tally.win_rate(tally.first_wins)
    );
    println!(
        "  {:<24} {:>5} wins ({:.1}%)",
        arg.second.name(),
        tally.second_wins,
        tally.win_rate(tally.second_wins)
    );
    println!("  decided at round cap: {}", tally.round_caps);
    println!(
        "  actions: mean {:.1}, min {}, max {}",
        tally.mean_actions(),
        tally.min_actions.unwrap_or(0),
        tally.max_actions
    );
    Ok(())
}
