//! Fixed lookup tables used by the hard tier.
//!
//! - [`SYNERGIES`]: a move that follows a specific predecessor gets a bonus.
//! - [`COUNTERS`]: a move counters a predicted opponent move when one of its
//!   keywords occurs in the predicted move's name or description.
//!
//! Both tables are checked against the move catalog by [`validate_tables`].

use std::collections::HashSet;

use mlbattle_engine::MoveId;

/// Previous AI move → moves that follow it well.
pub const SYNERGIES: &[(MoveId, &[MoveId])] = &[
    (
        MoveId::DropoutDefense,
        &[MoveId::BackpropagationBlast, MoveId::GradientDescent],
    ),
    (
        MoveId::OutOfBagCounter,
        &[MoveId::BootstrapAssault, MoveId::TreeVote],
    ),
    (
        MoveId::CentroidShift,
        &[MoveId::ClusterBomb, MoveId::ConvergenceLock],
    ),
    (
        MoveId::PriorStrike,
        &[MoveId::LikelihoodBlast, MoveId::PosteriorSlam],
    ),
    (
        MoveId::WeakLearnerSwarm,
        &[MoveId::ResidualCorrection, MoveId::AdaBoostCombo],
    ),
];

/// Candidate move → lowercase keywords it counters.
pub const COUNTERS: &[(MoveId, &[&str])] = &[
    (MoveId::DropoutDefense, &["overfitting", "blast", "burst"]),
    (
        MoveId::OutOfBagCounter,
        &["bootstrap", "bagging", "replacement"],
    ),
    (MoveId::KernelTrick, &["linear", "hyperplane"]),
    (MoveId::MarginMaximizer, &["boundary", "linear"]),
    (MoveId::SupportVectorStrike, &["swarm", "multiple"]),
    (MoveId::ResidualCorrection, &["gradient", "descent"]),
    (MoveId::XgBoostFinisher, &["regularization", "overfitting"]),
    (
        MoveId::IndependenceAssumption,
        &["correlation", "evidence"],
    ),
    (MoveId::CentroidShift, &["cluster", "centroid"]),
    (MoveId::ElbowMethod, &["cluster", "grouping"]),
    (MoveId::ConvergenceLock, &["random", "unpredictab"]),
];

/// Whether `candidate` follows `previous` with a synergy bonus.
#[must_use]
pub fn has_synergy(previous: MoveId, candidate: MoveId) -> bool {
    SYNERGIES
        .iter()
        .any(|(prev, next)| *prev == previous && next.contains(&candidate))
}

fn mentions(id: MoveId, keyword: &str) -> bool {
    let data = id.data();
    data.name.to_lowercase().contains(keyword) || data.description.to_lowercase().contains(keyword)
}

/// Whether `candidate` counters the predicted opponent move.
///
/// Keyword matching is case-insensitive.
#[must_use]
pub fn counters(candidate: MoveId, predicted: MoveId) -> bool {
    COUNTERS
        .iter()
        .filter(|(id, _)| *id == candidate)
        .flat_map(|(_, keywords)| keywords.iter())
        .any(|keyword| mentions(predicted, &keyword.to_lowercase()))
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("duplicate move name in catalog: {_0}")]
    DuplicateMoveName(#[error(not(source))] String),
    #[display("counter keyword {keyword:?} of {candidate} matches no catalog move")]
    DeadCounterKeyword {
        candidate: MoveId,
        keyword: &'static str,
    },
    #[display("synergy entry for {_0} is listed twice")]
    DuplicateSynergy(#[error(not(source))] MoveId),
}

/// Checks the lookup tables against the move catalog.
///
/// Returns the first violation found.
pub fn validate_tables() -> Result<(), TableError> {
    let mut names = HashSet::new();
    for id in MoveId::ALL {
        if !names.insert(id.name().to_lowercase()) {
            return Err(TableError::DuplicateMoveName(id.name().to_owned()));
        }
    }

    let mut seen = HashSet::new();
    for (prev, _) in SYNERGIES {
        if !seen.insert(*prev) {
            return Err(TableError::DuplicateSynergy(*prev));
        }
    }

    for (candidate, keywords) in COUNTERS {
        for &keyword in *keywords {
            let lower = keyword.to_lowercase();
            if !MoveId::ALL.into_iter().any(|id| mentions(id, &lower)) {
                return Err(TableError::DeadCounterKeyword {
                    candidate: *candidate,
                    keyword,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_tables_are_valid() {
        assert_eq!(validate_tables(), Ok(()));
    }

    #[test]
    fn test_synergy_is_directional() {
        assert!(has_synergy(MoveId::PriorStrike, MoveId::PosteriorSlam));
        assert!(!has_synergy(MoveId::PosteriorSlam, MoveId::PriorStrike));
        assert!(!has_synergy(MoveId::TreeVote, MoveId::BootstrapAssault));
    }

    #[test]
    fn test_counters_match_name_and_description() {
        // name match
        assert!(counters(MoveId::KernelTrick, MoveId::HyperplaneSlash));
        // description match: "...with replacement..."
        assert!(counters(MoveId::OutOfBagCounter, MoveId::BootstrapAssault));
        // description match: "Randomly selects features..."
        assert!(counters(MoveId::ConvergenceLock, MoveId::FeatureBagging));
        assert!(!counters(MoveId::ConvergenceLock, MoveId::TreeVote));
        // moves without an entry counter nothing
        assert!(!counters(MoveId::TreeVote, MoveId::HyperplaneSlash));
    }
}
