use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{algorithm_type::AlgorithmType, moves::MoveId};

/// Baseline combat stats of an algorithm before jitter or metric overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub accuracy: u32,
}

/// Registry entry describing one fighter algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmConfig {
    pub name: &'static str,
    /// Short registry key (`"SVM"`, `"K-Means"`, ...), accepted as an alias.
    pub key: &'static str,
    pub ty: AlgorithmType,
    pub base_stats: BaseStats,
    /// Move name used by the automatic resolver for special attacks.
    pub special: &'static str,
    /// Move names used by the automatic resolver for combo attacks.
    pub combos: [&'static str; 4],
    pub moves: [MoveId; 4],
    pub strengths: &'static [&'static str],
    pub weaknesses: &'static [&'static str],
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown algorithm: {name}")]
pub struct AlgorithmParseError {
    #[error(not(source))]
    pub name: String,
}

/// The closed set of fighter algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Algorithm {
    RandomForest,
    NeuralNetwork,
    SupportVectorMachine,
    GradientBoosting,
    KMeansClustering,
    NaiveBayes,
}

impl Algorithm {
    /// Number of registered algorithms (6).
    pub const LEN: usize = 6;

    pub const ALL: [Self; Self::LEN] = [
        Self::RandomForest,
        Self::NeuralNetwork,
        Self::SupportVectorMachine,
        Self::GradientBoosting,
        Self::KMeansClustering,
        Self::NaiveBayes,
    ];

    #[must_use]
    pub fn config(self) -> &'static AlgorithmConfig {
        &CONFIGS[self as usize]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.config().name
    }

    #[must_use]
    pub fn ty(self) -> AlgorithmType {
        self.config().ty
    }

    /// Looks an algorithm up by display name or registry key (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use mlbattle_engine::Algorithm;
    ///
    /// assert_eq!(Algorithm::from_name("svm"), Some(Algorithm::SupportVectorMachine));
    /// assert_eq!(Algorithm::from_name("K-Means Clustering"), Some(Algorithm::KMeansClustering));
    /// assert_eq!(Algorithm::from_name("Linear Regression"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|a| {
            let config = a.config();
            config.name.eq_ignore_ascii_case(name) || config.key.eq_ignore_ascii_case(name)
        })
    }

    /// Damage factor of the automatic resolver's own matchup table.
    ///
    /// This table is independent of the [type chart](crate::TYPE_CHART): 1.25
    /// when `self` is strong against `defender`, 0.8 when `defender` is strong
    /// against `self`, 1.0 otherwise.
    #[must_use]
    pub fn resolver_advantage(self, defender: Self) -> f64 {
        if self.beats(defender) {
            1.25
        } else if defender.beats(self) {
            0.8
        } else {
            1.0
        }
    }

    fn beats(self, other: Self) -> bool {
        use Algorithm::{
            GradientBoosting, KMeansClustering, NaiveBayes, NeuralNetwork, RandomForest,
            SupportVectorMachine,
        };
        matches!(
            (self, other),
            (NeuralNetwork, RandomForest | GradientBoosting)
                | (SupportVectorMachine | NaiveBayes, NeuralNetwork)
                | (RandomForest, SupportVectorMachine | NaiveBayes)
                | (GradientBoosting, KMeansClustering)
                | (KMeansClustering, NaiveBayes)
        )
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = AlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AlgorithmParseError {
            name: s.to_owned(),
        })
    }
}

impl Serialize for Algorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

static CONFIGS: [AlgorithmConfig; Algorithm::LEN] = [
    AlgorithmConfig {
        name: "Random Forest",
        key: "Random Forest",
        ty: AlgorithmType::Ensemble,
        base_stats: BaseStats {
            attack: 85,
            defense: 90,
            speed: 70,
            accuracy: 88,
        },
        special: "Tree Ensemble Fury",
        combos: ["Branch Slam", "Leaf Storm", "Root Bind", "Forest Fire"],
        moves: [
            MoveId::BootstrapAssault,
            MoveId::FeatureBagging,
            MoveId::OutOfBagCounter,
            MoveId::TreeVote,
        ],
        strengths: &[
            "High accuracy",
            "Handles overfitting well",
            "Feature importance",
        ],
        weaknesses: &["Memory intensive", "Black box model"],
    },
    AlgorithmConfig {
        name: "Neural Network",
        key: "Neural Network",
        ty: AlgorithmType::Neural,
        base_stats: BaseStats {
            attack: 95,
            defense: 70,
            speed: 80,
            accuracy: 85,
        },
        special: "Backpropagation Blast",
        combos: [
            "Gradient Descent",
            "Activation Burst",
            "Weight Update",
            "Deep Strike",
        ],
        moves: [
            MoveId::GradientDescent,
            MoveId::BackpropagationBlast,
            MoveId::ActivationBurst,
            MoveId::DropoutDefense,
        ],
        strengths: &[
            "Pattern recognition",
            "Non-linear relationships",
            "Versatile",
        ],
        weaknesses: &["Requires lots of data", "Training time", "Black box"],
    },
    AlgorithmConfig {
        name: "Support Vector Machine",
        key: "SVM",
        ty: AlgorithmType::Geometric,
        base_stats: BaseStats {
            attack: 90,
            defense: 95,
            speed: 65,
            accuracy: 92,
        },
        special: "Kernel Transformation",
        combos: [
            "Margin Maximizer",
            "Support Vector Strike",
            "Kernel Trick",
            "Hyperplane Slash",
        ],
        moves: [
            MoveId::KernelTrick,
            MoveId::MarginMaximizer,
            MoveId::SupportVectorStrike,
            MoveId::HyperplaneSlash,
        ],
        strengths: &[
            "Effective with small datasets",
            "Memory efficient",
            "Versatile kernels",
        ],
        weaknesses: &["Slow on large datasets", "Sensitive to scaling"],
    },
    AlgorithmConfig {
        name: "Gradient Boosting",
        key: "Gradient Boosting",
        ty: AlgorithmType::Boosting,
        base_stats: BaseStats {
            attack: 92,
            defense: 75,
            speed: 60,
            accuracy: 90,
        },
        special: "Sequential Learning",
        combos: [
            "Weak Learner Army",
            "Residual Attack",
            "Boost Combo",
            "Ensemble Explosion",
        ],
        moves: [
            MoveId::WeakLearnerSwarm,
            MoveId::ResidualCorrection,
            MoveId::AdaBoostCombo,
            MoveId::XgBoostFinisher,
        ],
        strengths: &[
            "High predictive power",
            "Handles mixed data types",
            "Feature importance",
        ],
        weaknesses: &["Overfitting risk", "Sensitive to outliers", "Training time"],
    },
    AlgorithmConfig {
        name: "K-Means Clustering",
        key: "K-Means",
        ty: AlgorithmType::Clustering,
        base_stats: BaseStats {
            attack: 70,
            defense: 80,
            speed: 95,
            accuracy: 75,
        },
        special: "Centroid Convergence",
        combos: [
            "Cluster Strike",
            "Centroid Shift",
            "Inertia Blast",
            "K-Formation",
        ],
        moves: [
            MoveId::CentroidShift,
            MoveId::ClusterBomb,
            MoveId::ElbowMethod,
            MoveId::ConvergenceLock,
        ],
        strengths: &[
            "Fast convergence",
            "Simple implementation",
            "Scales well",
        ],
        weaknesses: &[
            "Assumes spherical clusters",
            "Sensitive to initialization",
            "Requires K",
        ],
    },
    AlgorithmConfig {
        name: "Naive Bayes",
        key: "Naive Bayes",
        ty: AlgorithmType::Probabilistic,
        base_stats: BaseStats {
            attack: 75,
            defense: 85,
            speed: 90,
            accuracy: 80,
        },
        special: "Probability Storm",
        combos: [
            "Prior Attack",
            "Likelihood Strike",
            "Posterior Slam",
            "Independence Assumption",
        ],
        moves: [
            MoveId::PriorStrike,
            MoveId::LikelihoodBlast,
            MoveId::IndependenceAssumption,
            MoveId::PosteriorSlam,
        ],
        strengths: &[
            "Fast training and prediction",
            "Works with small datasets",
            "Handles multiple classes",
        ],
        weaknesses: &[
            "Naive independence assumption",
            "Categorical inputs need smoothing",
        ],
    },
];
