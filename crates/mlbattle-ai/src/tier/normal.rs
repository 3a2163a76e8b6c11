use mlbattle_engine::{MoveId, RandomSource};

use crate::{
    decision::{AiDecision, SelectionError},
    selector::{BattleView, Candidate, MoveSelector, pick_best},
};

/// Number of recent decisions checked for repeated moves.
pub(crate) const REPETITION_WINDOW: usize = 3;

/// Greedy tier scoring power, type matchup, health and repetition.
///
/// Each fired rule adds to the score; the last fired rule that carries a
/// message decides the reasoning text.
#[derive(Debug, Default, Clone, Copy)]
pub struct Normal;

pub(crate) fn score_move(view: &BattleView<'_>, recent: &[MoveId], move_id: MoveId) -> Candidate {
    let data = move_id.data();
    let name = data.name;
    let power = f64::from(data.power);
    let opponent_ty = view.opponent.ty();

    let mut score = power * 0.4;
    let mut reasoning = if view.type_multiplier > 1.0 {
        score += 35.0;
        format!("{name} is super effective against {opponent_ty} algorithms!")
    } else if view.type_multiplier < 1.0 {
        score -= 10.0;
        format!("{name} may be suboptimal against {opponent_ty} algorithms...")
    } else {
        format!("{name} should deal solid damage.")
    };

    if view.own_health < 0.4 && power > 70.0 {
        score += 25.0;
        reasoning = format!("Running low on health - going all in with {name}!");
    }
    if view.opponent_health < 0.3 && power > 60.0 {
        score += 30.0;
        reasoning = format!("Time to finish with {name}!");
    }
    if view.turn() < 4 && view.remaining_ratio(move_id) < 0.4 && power > 80.0 {
        score -= 15.0;
    }
    score += (f64::from(data.accuracy) - 85.0) * 0.2;
    if recent.contains(&move_id) {
        score -= 8.0;
        reasoning = format!("Maybe I should vary my strategy instead of repeating {name}...");
    }

    Candidate {
        move_id,
        score,
        reasoning: Some(reasoning),
    }
}

impl MoveSelector for Normal {
    fn select(
        &self,
        view: &BattleView<'_>,
        recent: &[MoveId],
        _rng: &mut dyn RandomSource,
    ) -> Result<AiDecision, SelectionError> {
        let recent = &recent[recent.len().saturating_sub(REPETITION_WINDOW)..];
        let best = pick_best(
            view.available
                .iter()
                .map(|&move_id| score_move(view, recent, move_id)),
        )?;
        let reasoning = best.reasoning.unwrap_or_else(|| {
            format!("{} seems like a solid tactical choice.", best.move_id)
        });
        Ok(AiDecision {
            move_id: best.move_id,
            reasoning,
            confidence: (best.score / 100.0 + 0.4).clamp(0.4, 0.85),
        })
    }
}
