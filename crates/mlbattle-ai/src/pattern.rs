//! Opponent move prediction from the battle history.

use arrayvec::ArrayVec;
use mlbattle_engine::{CombatState, MoveId};
use serde::Serialize;

/// Predicted next opponent move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted: Option<MoveId>,
    pub confidence: f64,
}

impl Prediction {
    const NONE: Self = Self {
        predicted: None,
        confidence: 0.0,
    };
}

/// Predicts the opponent's next move from its last moves in `state.history`.
///
/// | opponent moves (oldest → newest) | prediction      | confidence |
/// |----------------------------------|-----------------|------------|
/// | fewer than 2                     | none            | 0.0        |
/// | last four form `A, B, A, B`      | `B` (two back)  | 0.75       |
/// | last two equal `A, A`            | `A`             | 0.6        |
/// | otherwise                        | none            | 0.25       |
#[must_use]
pub fn predict_opponent(state: &CombatState) -> Prediction {
    let mut window = ArrayVec::<MoveId, 4>::new();
    let total = state.opponent_history().count();
    for id in state.opponent_history().skip(total.saturating_sub(4)) {
        window.push(id);
    }

    match window.as_slice() {
        [] | [_] => Prediction::NONE,
        [p3, p2, p1, p0] if p0 == p2 && p1 == p3 => Prediction {
            predicted: Some(*p2),
            confidence: 0.75,
        },
        [.., p1, p0] if p0 == p1 => Prediction {
            predicted: Some(*p0),
            confidence: 0.6,
        },
        _ => Prediction {
            predicted: None,
            confidence: 0.25,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(opponent: &[MoveId]) -> CombatState {
        let history = opponent
            .iter()
            .flat_map(|id| [*id, MoveId::ClusterBomb])
            .collect();
        CombatState {
            history,
            ..Default::default()
        }
    }

    #[test]
    fn test_too_short_history() {
        assert_eq!(predict_opponent(&state(&[])), Prediction::NONE);
        assert_eq!(predict_opponent(&state(&[MoveId::TreeVote])), Prediction::NONE);
    }

    #[test]
    fn test_alternating_pattern() {
        let a = MoveId::TreeVote;
        let b = MoveId::BootstrapAssault;
        // history [A, _, B, _, A, _, B]
        let mut s = state(&[a, b, a, b]);
        s.history.pop();
        assert_eq!(s.history.len(), 7);
        let p = predict_opponent(&s);
        assert_eq!(p.predicted, Some(b));
        assert_eq!(p.confidence, 0.75);
    }

    #[test]
    fn test_repetition() {
        let p = predict_opponent(&state(&[MoveId::KernelTrick, MoveId::TreeVote, MoveId::TreeVote]));
        assert_eq!(p.predicted, Some(MoveId::TreeVote));
        assert_eq!(p.confidence, 0.6);
    }

    #[test]
    fn test_no_pattern() {
        let p = predict_opponent(&state(&[
            MoveId::KernelTrick,
            MoveId::TreeVote,
            MoveId::FeatureBagging,
        ]));
        assert_eq!(p.predicted, None);
        assert_eq!(p.confidence, 0.25);
    }

    #[test]
    fn test_only_last_four_count() {
        let a = MoveId::TreeVote;
        let b = MoveId::FeatureBagging;
        let p = predict_opponent(&state(&[MoveId::KernelTrick, a, b, a, b]));
        assert_eq!(p.predicted, Some(b));
    }
}
