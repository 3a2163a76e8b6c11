use mlbattle_engine::{MoveCategory, MoveId, RandomSource};

use crate::{
    decision::{AiDecision, SelectionError},
    pattern::{Prediction, predict_opponent},
    selector::{BattleView, Candidate, MoveSelector, pick_best},
    tables,
};

/// Greedy tier that adds opponent prediction, synergy, resource and endgame
/// terms on top of expected damage and type effectiveness.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hard;

fn pp_efficiency(view: &BattleView<'_>, move_id: MoveId) -> f64 {
    let data = move_id.data();
    let power = f64::from(data.power);
    let ratio = view.remaining_ratio(move_id);
    if view.turn() < 4 && ratio < 0.4 && power > 85.0 {
        -8.0
    } else if view.turn() > 8 {
        ratio * 12.0
    } else {
        power / f64::from(data.pp) * 0.5
    }
}

fn endgame(view: &BattleView<'_>, move_id: MoveId) -> f64 {
    let data = move_id.data();
    if view.turn() <= 6 {
        return 0.0;
    }
    if view.opponent_health < 0.25 && data.power > 70 {
        30.0
    } else if view.own_health < 0.3 && data.category.is_status() {
        -15.0
    } else {
        0.0
    }
}

fn utility(view: &BattleView<'_>, move_id: MoveId, expected: f64) -> f64 {
    let category_bonus = match move_id.data().category {
        MoveCategory::Physical if view.own_health >= 0.7 => 3.0,
        MoveCategory::Special if view.own_health < 0.3 => 5.0,
        MoveCategory::Status if view.own_health > view.opponent_health => 4.0,
        _ => 0.0,
    };
    expected * 0.1
        + (view.type_multiplier - 1.0) * 15.0
        + view.remaining_ratio(move_id) * 5.0
        + category_bonus
}

pub(crate) fn score_move(
    view: &BattleView<'_>,
    prediction: &Prediction,
    move_id: MoveId,
) -> Candidate {
    let data = move_id.data();
    let name = data.name;
    let power = f64::from(data.power);
    let mut reasoning = None;

    let expected = power * f64::from(data.accuracy) / 100.0 * 0.5;
    let mut score = expected + (view.type_multiplier - 1.0) * 60.0;

    if let Some(predicted) = prediction.predicted
        && tables::counters(move_id, predicted)
    {
        score += 20.0;
        reasoning = Some(format!(
            "Predicting {predicted} next - countering with {name}!"
        ));
    }

    let health_diff = view.own_health - view.opponent_health;
    if health_diff > 0.25 && data.category.is_status() {
        score += 15.0;
        reasoning = Some(format!("I'm ahead - using {name} to maintain my advantage!"));
    } else if health_diff < -0.25 && power > 80.0 {
        score += 35.0;
        reasoning = Some(format!(
            "Time for an aggressive comeback - I need to turn this around with {name}!"
        ));
    }

    score += pp_efficiency(view, move_id);

    if let Some(previous) = view.state.last_ai_move()
        && tables::has_synergy(previous, move_id)
    {
        score += 18.0;
        reasoning = Some(format!(
            "{name} synergizes perfectly with my previous {previous}!"
        ));
    }

    score += endgame(view, move_id);
    score += utility(view, move_id, expected);

    Candidate {
        move_id,
        score,
        reasoning,
    }
}

impl MoveSelector for Hard {
    fn select(
        &self,
        view: &BattleView<'_>,
        _recent: &[MoveId],
        _rng: &mut dyn RandomSource,
    ) -> Result<AiDecision, SelectionError> {
        let prediction = predict_opponent(view.state);
        let best = pick_best(
            view.available
                .iter()
                .map(|&move_id| score_move(view, &prediction, move_id)),
        )?;
        let confidence = (best.score / 120.0 + 0.6).clamp(0.6, 0.95);
        let reasoning = best.reasoning.unwrap_or_else(|| {
            format!(
                "Optimal decision: {} (EV: {:.1}, {:.0}% confident). Calculated based on type effectiveness, resource management, and strategic positioning.",
                best.move_id,
                best.score,
                confidence * 100.0
            )
        });
        Ok(AiDecision {
            move_id: best.move_id,
            reasoning,
            confidence,
        })
    }
}
