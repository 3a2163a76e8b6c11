//! Move selection seam shared by the difficulty tiers.
//!
//! A [`MoveSelector`] receives a [`BattleView`], the validated view of a
//! [`CombatState`] with the values every tier needs precomputed, and returns
//! an [`AiDecision`] or a [`SelectionError`].

use std::fmt;

use mlbattle_engine::{CombatState, Fighter, MoveId, RandomSource, Side, type_multiplier};

use crate::decision::{AiDecision, SelectionError};

/// Picks a move for the AI side of a battle.
pub trait MoveSelector: fmt::Debug + Send + Sync {
    /// Selects one of `view.available` moves.
    ///
    /// `recent` holds the moves of the most recent decision-log entries,
    /// oldest first.
    fn select(
        &self,
        view: &BattleView<'_>,
        recent: &[MoveId],
        rng: &mut dyn RandomSource,
    ) -> Result<AiDecision, SelectionError>;
}

/// A [`CombatState`] known to have both fighters and at least one usable move.
#[derive(Debug, Clone)]
pub struct BattleView<'a> {
    pub state: &'a CombatState,
    pub own: &'a Fighter,
    pub opponent: &'a Fighter,
    /// Own health fraction.
    pub own_health: f64,
    /// Opponent health fraction.
    pub opponent_health: f64,
    /// Type multiplier of the AI fighter against the opponent fighter.
    pub type_multiplier: f64,
    /// AI moves with uses left, in move-list order.
    pub available: Vec<MoveId>,
}

impl<'a> BattleView<'a> {
    pub fn new(state: &'a CombatState) -> Result<Self, SelectionError> {
        let (Some(own), Some(opponent)) = (state.fighter(Side::Ai), state.fighter(Side::Player))
        else {
            return Err(SelectionError::InvalidState);
        };
        let available: Vec<_> = state.available_moves(Side::Ai).collect();
        if available.is_empty() {
            return Err(SelectionError::NoAvailableMoves);
        }
        Ok(Self {
            state,
            own,
            opponent,
            own_health: own.health_fraction(),
            opponent_health: opponent.health_fraction(),
            type_multiplier: type_multiplier(own.ty(), opponent.ty()),
            available,
        })
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    /// Remaining uses of an AI move as a fraction of its maximum.
    #[must_use]
    pub fn remaining_ratio(&self, id: MoveId) -> f64 {
        self.state.remaining_ratio(Side::Ai, id)
    }
}

/// A scored candidate move.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Candidate {
    pub(crate) move_id: MoveId,
    pub(crate) score: f64,
    pub(crate) reasoning: Option<String>,
}

/// Returns the candidate with the strictly highest score; the first one wins ties.
pub(crate) fn pick_best(
    candidates: impl IntoIterator<Item = Candidate>,
) -> Result<Candidate, SelectionError> {
    let mut best: Option<Candidate> = None;
    for candidate in candidates {
        if !candidate.score.is_finite() {
            return Err(SelectionError::NonFiniteScore);
        }
        if best.as_ref().is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best.ok_or(SelectionError::NoAvailableMoves)
}
