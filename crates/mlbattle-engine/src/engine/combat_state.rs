use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{Fighter, MoveId};

/// One side of a move-based battle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Ai,
            Self::Ai => Self::Player,
        }
    }
}

/// Snapshot of a move-based battle, seen from the AI side.
///
/// `history` interleaves both sides' moves in the order they were used:
/// player moves sit at even indices and AI moves at odd indices.
///
/// Fields are public so that callers can hand any state to a decision engine,
/// including incomplete ones (missing fighters, missing PP entries).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CombatState {
    pub player: Option<Fighter>,
    pub ai: Option<Fighter>,
    pub player_moves: Vec<MoveId>,
    pub ai_moves: Vec<MoveId>,
    pub player_pp: BTreeMap<MoveId, u32>,
    pub ai_pp: BTreeMap<MoveId, u32>,
    /// Starts at 1 and advances by one per action.
    pub turn: u32,
    pub history: Vec<MoveId>,
    pub last_player_move: Option<MoveId>,
}

fn full_pp(moves: &[MoveId]) -> BTreeMap<MoveId, u32> {
    moves.iter().map(|id| (*id, id.data().pp)).collect()
}

impl CombatState {
    /// Builds the opening state: each fighter's catalog moves at full PP, turn 1.
    #[must_use]
    pub fn new(player: Fighter, ai: Fighter) -> Self {
        let player_moves = player.config().moves.to_vec();
        let ai_moves = ai.config().moves.to_vec();
        Self {
            player_pp: full_pp(&player_moves),
            ai_pp: full_pp(&ai_moves),
            player: Some(player),
            ai: Some(ai),
            player_moves,
            ai_moves,
            turn: 1,
            history: vec![],
            last_player_move: None,
        }
    }

    #[must_use]
    pub fn fighter(&self, side: Side) -> Option<&Fighter> {
        match side {
            Side::Player => self.player.as_ref(),
            Side::Ai => self.ai.as_ref(),
        }
    }

    #[must_use]
    pub fn moves(&self, side: Side) -> &[MoveId] {
        match side {
            Side::Player => &self.player_moves,
            Side::Ai => &self.ai_moves,
        }
    }

    #[must_use]
    pub fn pp(&self, side: Side) -> &BTreeMap<MoveId, u32> {
        match side {
            Side::Player => &self.player_pp,
            Side::Ai => &self.ai_pp,
        }
    }

    /// Remaining uses of `id` for `side` (zero when the move has no entry).
    #[must_use]
    pub fn remaining_uses(&self, side: Side, id: MoveId) -> u32 {
        self.pp(side).get(&id).copied().unwrap_or(0)
    }

    /// Remaining uses of `id` as a fraction of its maximum uses.
    #[must_use]
    pub fn remaining_ratio(&self, side: Side, id: MoveId) -> f64 {
        let max = id.data().pp;
        if max == 0 {
            return 0.0;
        }
        f64::from(self.remaining_uses(side, id)) / f64::from(max)
    }

    /// Moves of `side` with at least one use left, in move-list order.
    pub fn available_moves(&self, side: Side) -> impl Iterator<Item = MoveId> + '_ {
        self.moves(side)
            .iter()
            .copied()
            .filter(move |id| self.remaining_uses(side, *id) > 0)
    }

    /// Player moves from the history, oldest first.
    pub fn opponent_history(&self) -> impl Iterator<Item = MoveId> + '_ {
        self.history.iter().step_by(2).copied()
    }

    /// AI moves from the history, oldest first.
    pub fn ai_history(&self) -> impl Iterator<Item = MoveId> + '_ {
        self.history.iter().skip(1).step_by(2).copied()
    }

    /// The AI's most recent move, if any.
    #[must_use]
    pub fn last_ai_move(&self) -> Option<MoveId> {
        self.ai_history().last()
    }

    /// Returns the same battle seen from the player's side.
    ///
    /// Fighters, move lists and PP maps are swapped. The first history entry
    /// is dropped so that the new opponent's moves land on even indices.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let history: Vec<_> = self.history.iter().skip(1).copied().collect();
        Self {
            player: self.ai.clone(),
            ai: self.player.clone(),
            player_moves: self.ai_moves.clone(),
            ai_moves: self.player_moves.clone(),
            player_pp: self.ai_pp.clone(),
            ai_pp: self.player_pp.clone(),
            turn: self.turn,
            last_player_move: self.last_ai_move(),
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Algorithm, FighterStats};

    use super::*;

    fn fighter(algorithm: Algorithm) -> Fighter {
        let stats = FighterStats {
            attack: 80,
            defense: 80,
            speed: 80,
            accuracy: 90,
        };
        Fighter::from_stats(algorithm, stats)
    }

    #[test]
    fn test_new_state_has_full_pp() {
        let state = CombatState::new(
            fighter(Algorithm::RandomForest),
            fighter(Algorithm::GradientBoosting),
        );
        assert_eq!(state.turn, 1);
        assert_eq!(state.ai_moves.len(), 4);
        assert_eq!(state.remaining_uses(Side::Ai, MoveId::XgBoostFinisher), 5);
        assert_eq!(state.remaining_ratio(Side::Ai, MoveId::XgBoostFinisher), 1.0);
        assert_eq!(state.remaining_uses(Side::Ai, MoveId::TreeVote), 0);
        assert_eq!(state.available_moves(Side::Player).count(), 4);
    }

    #[test]
    fn test_history_split_by_side() {
        let state = CombatState {
            history: vec![
                MoveId::TreeVote,
                MoveId::ClusterBomb,
                MoveId::FeatureBagging,
                MoveId::CentroidShift,
                MoveId::TreeVote,
            ],
            ..Default::default()
        };
        let player: Vec<_> = state.opponent_history().collect();
        assert_eq!(
            player,
            [MoveId::TreeVote, MoveId::FeatureBagging, MoveId::TreeVote]
        );
        assert_eq!(state.last_ai_move(), Some(MoveId::CentroidShift));
    }

    #[test]
    fn test_mirrored_swaps_sides() {
        let mut state = CombatState::new(
            fighter(Algorithm::NaiveBayes),
            fighter(Algorithm::KMeansClustering),
        );
        state.history = vec![MoveId::PriorStrike, MoveId::ClusterBomb, MoveId::PosteriorSlam];
        state.ai_pp.insert(MoveId::ClusterBomb, 14);

        let mirrored = state.mirrored();
        assert_eq!(
            mirrored.ai.as_ref().map(Fighter::algorithm),
            Some(Algorithm::NaiveBayes)
        );
        assert_eq!(mirrored.remaining_uses(Side::Player, MoveId::ClusterBomb), 14);
        assert_eq!(
            mirrored.opponent_history().collect::<Vec<_>>(),
            [MoveId::ClusterBomb]
        );
        assert_eq!(mirrored.last_ai_move(), Some(MoveId::PosteriorSlam));
        assert_eq!(mirrored.last_player_move, Some(MoveId::ClusterBomb));
    }
}
