use std::path::PathBuf;

use chrono::Utc;
use mlbattle_ai::{AiLevel, CombatAi, DuelReport, play_duel};
use mlbattle_engine::{Algorithm, BattleRng, BattleSeed, Duel, Side, messages};
use tracing::info;

use crate::{model::MetricsTable, schema::report::DuelRecord, util};

/// Remaining uses at or below which a PP warning is narrated.
const LOW_PP: u32 = 2;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DuelArg {
    /// Algorithm of the player-side fighter
    #[arg(default_value = "Random Forest")]
    player: Algorithm,
    /// Algorithm of the AI-side fighter
    #[arg(default_value = "Neural Network")]
    ai: Algorithm,
    /// Difficulty of the AI playing the player side
    #[arg(long, default_value_t = AiLevel::Normal)]
    player_level: AiLevel,
    /// Difficulty of the AI playing the AI side
    #[arg(long, default_value_t = AiLevel::Hard)]
    ai_level: AiLevel,
    /// 32-digit hex seed for a reproducible duel
    #[arg(long)]
    seed: Option<BattleSeed>,
    /// JSON file with model metrics keyed by algorithm name
    #[arg(long)]
    metrics: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the duel narrative to stderr
    #[arg(long)]
    narrate: bool,
}

pub(crate) fn run(arg: &DuelArg) -> anyhow::Result<()> {
    let mut rng = arg.seed.map_or_else(BattleRng::new, BattleRng::with_seed);
    let seed = rng.seed();
    let metrics = MetricsTable::load_or_baseline(arg.metrics.as_deref());
    let player = metrics.create_fighter(arg.player, &mut rng)?;
    let ai = metrics.create_fighter(arg.ai, &mut rng)?;

    let mut player_ai = CombatAi::with_rng(arg.player_level, rng.fork());
    let mut opponent_ai = CombatAi::with_rng(arg.ai_level, rng.fork());
    info!(level = %arg.player_level, personality = player_ai.personality(), "player side AI");
    info!(level = %arg.ai_level, personality = opponent_ai.personality(), "AI side AI");

    let mut duel = Duel::new(player, ai);
    let report = play_duel(&mut duel, &mut player_ai, &mut opponent_ai, &mut rng)?;
    info!(
        end = ?report.end,
        winner = ?report.winner,
        turns = report.steps.len(),
        "duel finished"
    );
    if arg.narrate {
        narrate(&report);
    }

    let record = DuelRecord {
        seed,
        generated_at: Utc::now(),
        player_level: arg.player_level,
        ai_level: arg.ai_level,
        report,
    };
    util::save_json(&record, arg.output.as_deref())
}

fn print_message(message: &messages::CombatMessage) {
    eprintln!("{}", message.message);
    if let Some(educational) = &message.educational {
        eprintln!("    ({educational})");
    }
}

fn narrate(report: &DuelReport) {
    for step in &report.steps {
        let action = &step.action;
        let (actor, player_turn) = match action.side {
            Side::Player => (report.player.as_str(), true),
            Side::Ai => (report.ai.as_str(), false),
        };
        print_message(&messages::turn_start_message(
            &report.player,
            &report.ai,
            player_turn,
            action.turn,
        ));
        print_message(&messages::ai_reasoning_message(
            actor,
            &step.decision.reasoning,
            step.decision.confidence,
        ));
        eprintln!("    \"{}\"", step.commentary);
        print_message(&action.message);
        if action.remaining_pp <= LOW_PP {
            print_message(&messages::pp_warning(
                action.move_id.name(),
                action.remaining_pp,
            ));
        }
    }

    match report.winner {
        Some(Side::Player) => print_message(&messages::end_battle_message(&report.player, &report.ai)),
        Some(Side::Ai) => print_message(&messages::end_battle_message(&report.ai, &report.player)),
        None => eprintln!("The duel ends in a draw."),
    }
}
