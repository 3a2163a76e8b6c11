use anyhow::Context as _;
use clap::{Parser, Subcommand};

use self::{
    battle::BattleArg, duel::DuelArg, matchups::MatchupsArg, simulate::SimulateArg,
};

mod battle;
mod duel;
mod matchups;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run one automatic battle and print the report as JSON
    Battle(#[clap(flatten)] BattleArg),
    /// Let two AIs fight a turn-based duel with catalog moves
    Duel(#[clap(flatten)] DuelArg),
    /// Run many automatic battles and print win rates
    Simulate(#[clap(flatten)] SimulateArg),
    /// Show the type chart for one or all algorithm types
    Matchups(#[clap(flatten)] MatchupsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    mlbattle_ai::tables::validate_tables().context("AI lookup tables are inconsistent")?;
    match args.mode.unwrap_or(Mode::Battle(BattleArg::default())) {
        Mode::Battle(arg) => battle::run(&arg)?,
        Mode::Duel(arg) => duel::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Matchups(arg) => matchups::run(&arg),
    }
    Ok(())
}
