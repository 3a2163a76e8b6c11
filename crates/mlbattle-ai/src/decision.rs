use mlbattle_engine::MoveId;
use serde::{Deserialize, Serialize};

/// Difficulty tier of a [`CombatAi`](crate::CombatAi).
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::FromStr,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum AiLevel {
    #[display("easy")]
    Easy,
    #[default]
    #[display("normal")]
    Normal,
    #[display("hard")]
    Hard,
}

/// A chosen move with its rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiDecision {
    #[serde(rename = "move")]
    pub move_id: MoveId,
    pub reasoning: String,
    /// Always within `[0, 1]`.
    pub confidence: f64,
}

/// Reasons a tier could not score the state. Always converted into a
/// fallback decision by [`CombatAi::select_move`](crate::CombatAi::select_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum SelectionError {
    #[display("battle state is missing a fighter")]
    InvalidState,
    #[display("no move has uses left")]
    NoAvailableMoves,
    #[display("a candidate move scored a non-finite value")]
    NonFiniteScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionLogEntry {
    pub turn: u32,
    pub level: AiLevel,
    #[serde(rename = "move")]
    pub move_id: MoveId,
    pub confidence: f64,
    /// Set when the decision is a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<SelectionError>,
}

/// Append-only record of every selection attempt.
#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    entries: Vec<DecisionLogEntry>,
}

impl Serialize for SelectionError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl DecisionLog {
    #[must_use]
    pub fn entries(&self) -> &[DecisionLogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves of the last `n` entries, oldest first.
    pub fn recent_moves(&self, n: usize) -> impl Iterator<Item = MoveId> + '_ {
        let start = self.entries.len().saturating_sub(n);
        self.entries[start..].iter().map(|e| e.move_id)
    }

    pub(crate) fn push(&mut self, entry: DecisionLogEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse() {
        assert_eq!("hard".parse::<AiLevel>().unwrap(), AiLevel::Hard);
        assert_eq!("Easy".parse::<AiLevel>().unwrap(), AiLevel::Easy);
        assert!("expert".parse::<AiLevel>().is_err());
        assert_eq!(AiLevel::default().to_string(), "normal");
    }

    #[test]
    fn test_recent_moves() {
        let mut log = DecisionLog::default();
        for (turn, move_id) in [MoveId::TreeVote, MoveId::FeatureBagging, MoveId::TreeVote, MoveId::BootstrapAssault]
            .into_iter()
            .enumerate()
        {
            log.push(DecisionLogEntry {
                turn: u32::try_from(turn).unwrap(),
                level: AiLevel::Normal,
                move_id,
                confidence: 0.5,
                fallback: None,
            });
        }
        let recent: Vec<_> = log.recent_moves(3).collect();
        assert_eq!(
            recent,
            [MoveId::FeatureBagging, MoveId::TreeVote, MoveId::BootstrapAssault]
        );
        assert_eq!(log.recent_moves(10).count(), 4);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_decision_serializes_move_name() {
        let decision = AiDecision {
            move_id: MoveId::KernelTrick,
            reasoning: "test".to_owned(),
            confidence: 0.5,
        };
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["move"], "Kernel Trick");
    }
}
