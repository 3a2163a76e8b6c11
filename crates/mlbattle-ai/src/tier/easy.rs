use mlbattle_engine::{MoveId, RandomSource};

use crate::{
    decision::{AiDecision, SelectionError},
    selector::{BattleView, Candidate, MoveSelector, pick_best},
};

const REASONINGS: [&str; 5] = [
    "I'll try this move - it looks interesting!",
    "Random strategy is sometimes the best strategy!",
    "Let's see what this algorithm can do!",
    "Going with my gut feeling on this one!",
    "Time to experiment with different approaches!",
];

/// Noisy tier: each move is weighted by a uniform draw plus `power / 200`.
///
/// Reasoning and confidence are random and say nothing about move quality.
#[derive(Debug, Default, Clone, Copy)]
pub struct Easy;

impl MoveSelector for Easy {
    fn select(
        &self,
        view: &BattleView<'_>,
        _recent: &[MoveId],
        rng: &mut dyn RandomSource,
    ) -> Result<AiDecision, SelectionError> {
        let candidates: Vec<_> = view
            .available
            .iter()
            .map(|&move_id| Candidate {
                move_id,
                score: rng.next_f64() + f64::from(move_id.data().power) / 200.0,
                reasoning: None,
            })
            .collect();
        let best = pick_best(candidates)?;
        let reasoning = REASONINGS[rng.index(REASONINGS.len())];
        let confidence = 0.1 + 0.4 * rng.next_f64();
        Ok(AiDecision {
            move_id: best.move_id,
            reasoning: reasoning.to_owned(),
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use mlbattle_engine::{Algorithm, BattleRng, BattleSeed, ScriptedRandom};

    use super::*;
    use crate::tier::test_util::state;

    #[test]
    fn test_power_breaks_even_draws() {
        let state = state(Algorithm::RandomForest, 90, Algorithm::NeuralNetwork, 90);
        let view = BattleView::new(&state).unwrap();
        // Equal draws: Backpropagation Blast has the highest power.
        let mut rng = ScriptedRandom::constant(0.5);
        let decision = Easy.select(&view, &[], &mut rng).unwrap();
        assert_eq!(decision.move_id, MoveId::BackpropagationBlast);
        assert_eq!(decision.reasoning, REASONINGS[2]);
        assert!((decision.confidence - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_draws_can_override_power() {
        let state = state(Algorithm::RandomForest, 90, Algorithm::NeuralNetwork, 90);
        let view = BattleView::new(&state).unwrap();
        // Dropout Defense (power 0) gets 0.99 while the others get 0.0.
        let mut rng = ScriptedRandom::new([0.0, 0.0, 0.0, 0.99, 0.0, 0.0]);
        let decision = Easy.select(&view, &[], &mut rng).unwrap();
        assert_eq!(decision.move_id, MoveId::DropoutDefense);
        assert_eq!(decision.reasoning, REASONINGS[0]);
        assert_eq!(decision.confidence, 0.1);
    }

    #[test]
    fn test_confidence_bounds() {
        let state = state(Algorithm::GradientBoosting, 90, Algorithm::NaiveBayes, 40);
        let view = BattleView::new(&state).unwrap();
        let mut rng = BattleRng::with_seed(BattleSeed::from_bytes([5; 16]));
        for _ in 0..200 {
            let decision = Easy.select(&view, &[], &mut rng).unwrap();
            assert!((0.1..0.5).contains(&decision.confidence));
            assert!(view.available.contains(&decision.move_id));
        }
    }
}
