//! Drives a [`Duel`] with an AI on each side.

use mlbattle_engine::{Duel, DuelEnd, DuelError, DuelTurn, RandomSource, Side};
use serde::Serialize;
use tracing::debug;

use crate::{combat_ai::CombatAi, decision::AiDecision};

/// One applied move together with the decision that chose it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuelStep {
    pub decision: AiDecision,
    /// Flavor line from the deciding AI.
    pub commentary: String,
    pub action: DuelTurn,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuelReport {
    pub player: String,
    pub ai: String,
    pub steps: Vec<DuelStep>,
    pub end: DuelEnd,
    /// `None` on an exact health tie.
    pub winner: Option<Side>,
    pub player_health: u32,
    pub ai_health: u32,
}

/// Plays `duel` to completion.
///
/// `player_ai` decides for [`Side::Player`] from the mirrored state and
/// `opponent_ai` decides for [`Side::Ai`]. `rng` resolves hits and damage.
pub fn play_duel<P, A, R>(
    duel: &mut Duel,
    player_ai: &mut CombatAi<P>,
    opponent_ai: &mut CombatAi<A>,
    rng: &mut R,
) -> Result<DuelReport, DuelError>
where
    P: RandomSource,
    A: RandomSource,
    R: RandomSource + ?Sized,
{
    let mut steps = Vec::new();
    let end = loop {
        if let Some(end) = duel.end() {
            break end;
        }
        let side = duel.side_to_move();
        let state = duel.state_for(side);
        let (decision, commentary) = match side {
            Side::Player => {
                let decision = player_ai.select_move(&state);
                let commentary = player_ai.commentary(&decision);
                (decision, commentary)
            }
            Side::Ai => {
                let decision = opponent_ai.select_move(&state);
                let commentary = opponent_ai.commentary(&decision);
                (decision, commentary)
            }
        };
        let action = duel.apply(side, decision.move_id, rng)?;
        steps.push(DuelStep {
            decision,
            commentary,
            action,
        });
    };

    let winner = duel.winner();
    debug!(?end, ?winner, turns = steps.len(), "duel finished");
    Ok(DuelReport {
        player: duel.fighter(Side::Player).name().to_owned(),
        ai: duel.fighter(Side::Ai).name().to_owned(),
        steps,
        end,
        winner,
        player_health: duel.fighter(Side::Player).health(),
        ai_health: duel.fighter(Side::Ai).health(),
    })
}
