use serde::{Deserialize, Serialize};

/// Algorithm family of a fighter or a move.
///
/// The family plays the role of an elemental type: it is only used to look up
/// damage multipliers in the [type chart](TYPE_CHART).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmType {
    #[display("ensemble")]
    Ensemble,
    #[display("neural")]
    Neural,
    #[display("geometric")]
    Geometric,
    #[display("probabilistic")]
    Probabilistic,
    #[display("clustering")]
    Clustering,
    #[display("boosting")]
    Boosting,
}

impl AlgorithmType {
    /// Number of algorithm types (6).
    pub const LEN: usize = 6;

    pub const ALL: [Self; Self::LEN] = [
        Self::Ensemble,
        Self::Neural,
        Self::Geometric,
        Self::Probabilistic,
        Self::Clustering,
        Self::Boosting,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ensemble => "ensemble",
            Self::Neural => "neural",
            Self::Geometric => "geometric",
            Self::Probabilistic => "probabilistic",
            Self::Clustering => "clustering",
            Self::Boosting => "boosting",
        }
    }

    /// Parses a type from its lowercase name (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use mlbattle_engine::AlgorithmType;
    ///
    /// assert_eq!(AlgorithmType::from_name("Neural"), Some(AlgorithmType::Neural));
    /// assert_eq!(AlgorithmType::from_name("quantum"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// A single entry of the type chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeAdvantage {
    pub attacker: AlgorithmType,
    pub defender: AlgorithmType,
    pub multiplier: f64,
    pub reason: &'static str,
}

const fn entry(
    attacker: AlgorithmType,
    defender: AlgorithmType,
    multiplier: f64,
    reason: &'static str,
) -> TypeAdvantage {
    TypeAdvantage {
        attacker,
        defender,
        multiplier,
        reason,
    }
}

/// Type effectiveness chart.
///
/// The chart is deliberately asymmetric: an entry for `(a, b)` says nothing
/// about `(b, a)`. Pairs that are not listed are neutral (1.0).
pub const TYPE_CHART: [TypeAdvantage; 17] = {
    use AlgorithmType::{Boosting, Clustering, Ensemble, Geometric, Neural, Probabilistic};
    [
        entry(
            Ensemble,
            Neural,
            1.5,
            "Ensemble methods are more robust against the overfitting neural networks are prone to",
        ),
        entry(
            Ensemble,
            Boosting,
            0.8,
            "Both use multiple learners, but sequential boosting beats the parallel ensemble",
        ),
        entry(
            Neural,
            Geometric,
            1.5,
            "Neural networks learn non-linear patterns that margin-based methods struggle with",
        ),
        entry(
            Neural,
            Probabilistic,
            1.3,
            "Deep models capture dependencies that naive independence assumptions miss",
        ),
        entry(
            Neural,
            Clustering,
            1.4,
            "Supervised networks have the upper hand over unsupervised clustering",
        ),
        entry(
            Geometric,
            Neural,
            1.3,
            "SVMs work well on small datasets where neural networks overfit",
        ),
        entry(
            Geometric,
            Clustering,
            1.5,
            "Clear decision boundaries beat soft cluster groupings",
        ),
        entry(
            Geometric,
            Probabilistic,
            0.9,
            "Both handle uncertainty, probabilistic models are slightly more flexible",
        ),
        entry(
            Probabilistic,
            Ensemble,
            1.2,
            "Probabilistic models are faster and need less data than large ensembles",
        ),
        entry(
            Probabilistic,
            Neural,
            1.1,
            "Naive Bayes copes with small datasets where neural networks fail",
        ),
        entry(
            Probabilistic,
            Boosting,
            0.8,
            "Boosting generally outperforms simple probabilistic approaches",
        ),
        entry(
            Clustering,
            Probabilistic,
            1.2,
            "Clustering finds hidden structure without prior class assumptions",
        ),
        entry(
            Clustering,
            Geometric,
            0.9,
            "Supervised SVMs generally outperform unsupervised clustering",
        ),
        entry(
            Boosting,
            Ensemble,
            1.3,
            "Sequential boosting often outperforms parallel ensembles",
        ),
        entry(
            Boosting,
            Probabilistic,
            1.4,
            "Gradient boosting handles complex patterns better than simple probabilistic models",
        ),
        entry(
            Boosting,
            Clustering,
            1.5,
            "Supervised boosting has a clear advantage over unsupervised clustering",
        ),
        entry(
            Boosting,
            Neural,
            0.9,
            "Neural networks can beat boosting on large datasets",
        ),
    ]
};

fn lookup(attacker: AlgorithmType, defender: AlgorithmType) -> Option<&'static TypeAdvantage> {
    TYPE_CHART
        .iter()
        .find(|e| e.attacker == attacker && e.defender == defender)
}

/// Returns the damage multiplier of `attacker` against `defender`.
///
/// Pairs absent from [`TYPE_CHART`] are neutral.
///
/// # Examples
///
/// ```
/// use mlbattle_engine::{AlgorithmType, type_multiplier};
///
/// assert_eq!(type_multiplier(AlgorithmType::Neural, AlgorithmType::Geometric), 1.5);
/// assert_eq!(type_multiplier(AlgorithmType::Ensemble, AlgorithmType::Clustering), 1.0);
/// ```
#[must_use]
pub fn type_multiplier(attacker: AlgorithmType, defender: AlgorithmType) -> f64 {
    lookup(attacker, defender).map_or(1.0, |e| e.multiplier)
}

/// Returns the explanation attached to a chart entry.
#[must_use]
pub fn type_reason(attacker: AlgorithmType, defender: AlgorithmType) -> &'static str {
    lookup(attacker, defender).map_or("No special type interaction", |e| e.reason)
}

/// Returns the battle-log text for a multiplier (empty when unremarkable).
#[must_use]
pub fn effectiveness_text(multiplier: f64) -> &'static str {
    if multiplier >= 1.4 {
        "It's super effective!"
    } else if multiplier >= 1.2 {
        "It's quite effective!"
    } else if multiplier <= 0.6 {
        "It's barely effective..."
    } else if multiplier <= 0.8 {
        "It's not very effective..."
    } else {
        ""
    }
}

/// One side of a matchup listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matchup {
    pub other: AlgorithmType,
    pub multiplier: f64,
    pub reason: &'static str,
}

/// Strengths and weaknesses of a single type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeMatchups {
    /// Types this type hits for more than neutral damage.
    pub strong_against: Vec<Matchup>,
    /// Types this type hits for less than neutral damage.
    pub weak_against: Vec<Matchup>,
    /// Types that hit this type for more than neutral damage.
    pub vulnerable_to: Vec<Matchup>,
    /// Types that hit this type for less than neutral damage.
    pub resistant_to: Vec<Matchup>,
}

/// Collects every chart entry involving `ty`.
#[must_use]
pub fn type_matchups(ty: AlgorithmType) -> TypeMatchups {
    let mut matchups = TypeMatchups::default();
    for e in &TYPE_CHART {
        if e.attacker == ty {
            let m = Matchup {
                other: e.defender,
                multiplier: e.multiplier,
                reason: e.reason,
            };
            if e.multiplier > 1.0 {
                matchups.strong_against.push(m);
            } else if e.multiplier < 1.0 {
                matchups.weak_against.push(m);
            }
        }
        if e.defender == ty {
            let m = Matchup {
                other: e.attacker,
                multiplier: e.multiplier,
                reason: e.reason,
            };
            if e.multiplier > 1.0 {
                matchups.vulnerable_to.push(m);
            } else if e.multiplier < 1.0 {
                matchups.resistant_to.push(m);
            }
        }
    }
    matchups
}
