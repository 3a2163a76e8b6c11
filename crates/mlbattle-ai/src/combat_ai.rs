use mlbattle_engine::{BattleRng, CombatState, MoveId, RandomSource, Side};
use tracing::{debug, warn};

use crate::{
    decision::{AiDecision, AiLevel, DecisionLog, DecisionLogEntry, SelectionError},
    selector::{BattleView, MoveSelector},
    tier::{Easy, Hard, Normal},
};

/// Confidence reported for every fallback decision.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Number of previous decisions handed to the tiers.
const RECENT_DECISIONS: usize = 8;

const EASY_COMMENTARY: [&str; 3] = [
    "I'm still learning, but I think this might work!",
    "Let's see what happens with this approach!",
    "Trial and error is part of the learning process!",
];

const NORMAL_COMMENTARY: [&str; 3] = [
    "Based on the data, {move} should be effective here.",
    "My analysis suggests this is the optimal choice.",
    "Considering the type matchup, this seems strategic.",
];

const HARD_COMMENTARY: [&str; 3] = [
    "After calculating expected values and analyzing patterns, {move} maximizes our win probability.",
    "This decision factors in resource management, type effectiveness, and strategic positioning.",
    "My neural network predicts this move has the highest success rate given current game state.",
];

/// Move-selecting opponent with a fixed difficulty tier.
///
/// [`select_move`](Self::select_move) is total: scoring failures are recorded
/// in the decision log and replaced with a low-confidence fallback move.
#[derive(Debug)]
pub struct CombatAi<R = BattleRng> {
    level: AiLevel,
    selector: Box<dyn MoveSelector>,
    default_move: Option<MoveId>,
    log: DecisionLog,
    rng: R,
}

impl CombatAi {
    /// Creates an AI drawing from a freshly seeded [`BattleRng`].
    #[must_use]
    pub fn new(level: AiLevel) -> Self {
        Self::with_rng(level, BattleRng::new())
    }
}

fn selector_for(level: AiLevel) -> Box<dyn MoveSelector> {
    match level {
        AiLevel::Easy => Box::new(Easy),
        AiLevel::Normal => Box::new(Normal),
        AiLevel::Hard => Box::new(Hard),
    }
}

impl<R> CombatAi<R>
where
    R: RandomSource,
{
    pub fn with_rng(level: AiLevel, rng: R) -> Self {
        Self {
            level,
            selector: selector_for(level),
            default_move: None,
            log: DecisionLog::default(),
            rng,
        }
    }

    /// Sets the move used when no decision can be scored.
    ///
    /// The default is skipped when it is not in the deciding side's move list.
    #[must_use]
    pub fn with_default_move(mut self, move_id: MoveId) -> Self {
        self.default_move = Some(move_id);
        self
    }

    #[must_use]
    pub fn level(&self) -> AiLevel {
        self.level
    }

    #[must_use]
    pub fn log(&self) -> &DecisionLog {
        &self.log
    }

    /// Clears the decision log.
    pub fn reset(&mut self) {
        self.log.clear();
    }

    #[must_use]
    pub fn personality(&self) -> &'static str {
        match self.level {
            AiLevel::Easy => "A rookie trainer still learning the basics of ML combat",
            AiLevel::Normal => "An experienced data scientist with solid tactical knowledge",
            AiLevel::Hard => {
                "A legendary ML expert who anticipates every move with mathematical precision"
            }
        }
    }

    /// Picks a flavor line for `decision`.
    pub fn commentary(&mut self, decision: &AiDecision) -> String {
        let lines = match self.level {
            AiLevel::Easy => &EASY_COMMENTARY,
            AiLevel::Normal => &NORMAL_COMMENTARY,
            AiLevel::Hard => &HARD_COMMENTARY,
        };
        lines[self.rng.index(lines.len())].replace("{move}", decision.move_id.name())
    }

    /// Chooses the AI side's next move for `state`.
    pub fn select_move(&mut self, state: &CombatState) -> AiDecision {
        let recent: Vec<_> = self.log.recent_moves(RECENT_DECISIONS).collect();
        let result = BattleView::new(state)
            .and_then(|view| self.selector.select(&view, &recent, &mut self.rng));

        let (decision, fallback) = match result {
            Ok(mut decision) => {
                decision.confidence = decision.confidence.clamp(0.0, 1.0);
                (decision, None)
            }
            Err(cause) => {
                let decision = self.fallback(state, cause);
                warn!(turn = state.turn, level = %self.level, %cause, fallback = %decision.move_id, "move selection fell back");
                (decision, Some(cause))
            }
        };

        debug!(
            turn = state.turn,
            level = %self.level,
            choice = %decision.move_id,
            confidence = decision.confidence,
            "AI decision"
        );
        self.log.push(DecisionLogEntry {
            turn: state.turn,
            level: self.level,
            move_id: decision.move_id,
            confidence: decision.confidence,
            fallback,
        });
        decision
    }

    fn fallback(&self, state: &CombatState, cause: SelectionError) -> AiDecision {
        let move_id = self
            .default_move
            .filter(|id| state.ai_moves.contains(id))
            .or_else(|| state.available_moves(Side::Ai).next())
            .or_else(|| state.ai_moves.first().copied())
            .unwrap_or(MoveId::ALL[0]);
        let reasoning = match cause {
            SelectionError::InvalidState => {
                format!("I can't read the battlefield clearly - falling back to {move_id}.")
            }
            SelectionError::NoAvailableMoves => {
                format!("All my moves are exhausted - falling back to {move_id}.")
            }
            SelectionError::NonFiniteScore => {
                format!("My calculations went haywire - falling back to {move_id}.")
            }
        };
        AiDecision {
            move_id,
            reasoning,
            confidence: FALLBACK_CONFIDENCE,
        }
    }
}
