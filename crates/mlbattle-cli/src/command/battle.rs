use std::path::PathBuf;

use chrono::Utc;
use mlbattle_engine::{Algorithm, BattleRng, BattleSeed, BattleSide, battle, messages};
use tracing::info;

use crate::{model::MetricsTable, schema::report::BattleRecord, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BattleArg {
    /// Algorithm of the first fighter
    #[arg(default_value = "Random Forest")]
    first: Algorithm,
    /// Algorithm of the second fighter
    #[arg(default_value = "Neural Network")]
    second: Algorithm,
    /// 32-digit hex seed for a reproducible battle
    #[arg(long)]
    seed: Option<BattleSeed>,
    /// JSON file with model metrics keyed by algorithm name
    #[arg(long)]
    metrics: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the battle narrative to stderr
    #[arg(long)]
    narrate: bool,
}

impl Default for BattleArg {
    fn default() -> Self {
        Self {
            first: Algorithm::RandomForest,
            second: Algorithm::NeuralNetwork,
            seed: None,
            metrics: None,
            output: None,
            narrate: false,
        }
    }
}

pub(crate) fn run(arg: &BattleArg) -> anyhow::Result<()> {
    let mut rng = arg.seed.map_or_else(BattleRng::new, BattleRng::with_seed);
    let metrics = MetricsTable::load_or_baseline(arg.metrics.as_deref());
    let first = metrics.create_fighter(arg.first, &mut rng)?;
    let second = metrics.create_fighter(arg.second, &mut rng)?;
    info!(
        first = first.name(),
        second = second.name(),
        seed = %rng.seed(),
        "starting battle"
    );

    let result = battle(&first, &second, &mut rng);
    info!(
        winner = %result.winner,
        outcome = ?result.outcome,
        actions = result.total_actions,
        "battle finished"
    );

    if arg.narrate {
        for action in &result.actions {
            eprintln!("[round {}] {}", action.round, action.narrative);
        }
        let loser = match result.winner_side {
            BattleSide::First => second.name(),
            BattleSide::Second => first.name(),
        };
        eprintln!("{}", messages::end_battle_message(&result.winner, loser).message);
    }

    let record = BattleRecord {
        seed: rng.seed(),
        generated_at: Utc::now(),
        first,
        second,
        result,
    };
    util::save_json(&record, arg.output.as_deref())
}
