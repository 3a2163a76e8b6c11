use std::{collections::HashMap, sync::LazyLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::algorithm_type::AlgorithmType;

/// Damage category of a move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    #[display("physical")]
    Physical,
    #[display("special")]
    Special,
    /// Non-damaging buff or debuff.
    #[display("status")]
    Status,
}

/// Static metadata of a catalog move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveData {
    pub name: &'static str,
    pub ty: AlgorithmType,
    /// Base power; zero for moves that deal no direct damage.
    pub power: u32,
    /// Hit chance in percent.
    pub accuracy: u32,
    /// Maximum number of uses per battle.
    pub pp: u32,
    pub category: MoveCategory,
    pub description: &'static str,
    pub educational_note: &'static str,
    pub effect: Option<&'static str>,
}

/// Identifier of a move in the static catalog.
///
/// Serialized as the move's display name (e.g. `"Kernel Trick"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MoveId {
    BootstrapAssault,
    FeatureBagging,
    OutOfBagCounter,
    TreeVote,
    GradientDescent,
    BackpropagationBlast,
    ActivationBurst,
    DropoutDefense,
    KernelTrick,
    MarginMaximizer,
    SupportVectorStrike,
    HyperplaneSlash,
    WeakLearnerSwarm,
    ResidualCorrection,
    AdaBoostCombo,
    XgBoostFinisher,
    PriorStrike,
    LikelihoodBlast,
    IndependenceAssumption,
    PosteriorSlam,
    CentroidShift,
    ClusterBomb,
    ElbowMethod,
    ConvergenceLock,
}

impl MoveId {
    /// Number of catalog moves (24).
    pub const LEN: usize = 24;

    pub const ALL: [Self; Self::LEN] = [
        Self::BootstrapAssault,
        Self::FeatureBagging,
        Self::OutOfBagCounter,
        Self::TreeVote,
        Self::GradientDescent,
        Self::BackpropagationBlast,
        Self::ActivationBurst,
        Self::DropoutDefense,
        Self::KernelTrick,
        Self::MarginMaximizer,
        Self::SupportVectorStrike,
        Self::HyperplaneSlash,
        Self::WeakLearnerSwarm,
        Self::ResidualCorrection,
        Self::AdaBoostCombo,
        Self::XgBoostFinisher,
        Self::PriorStrike,
        Self::LikelihoodBlast,
        Self::IndependenceAssumption,
        Self::PosteriorSlam,
        Self::CentroidShift,
        Self::ClusterBomb,
        Self::ElbowMethod,
        Self::ConvergenceLock,
    ];

    /// Returns the catalog entry of this move.
    #[must_use]
    pub fn data(self) -> &'static MoveData {
        &MOVES[self as usize]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.data().name
    }

    /// Looks a move up by display name (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use mlbattle_engine::MoveId;
    ///
    /// assert_eq!(MoveId::from_name("kernel trick"), Some(MoveId::KernelTrick));
    /// assert_eq!(MoveId::from_name("Hyper Beam"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        MOVES_BY_NAME.get(&name.trim().to_lowercase()).copied()
    }
}

impl std::fmt::Display for MoveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for MoveId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for MoveId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        MoveId::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown move: {name}")))
    }
}

static MOVES_BY_NAME: LazyLock<HashMap<String, MoveId>> = LazyLock::new(|| {
    MoveId::ALL
        .into_iter()
        .map(|id| (id.name().to_lowercase(), id))
        .collect()
});

#[expect(clippy::too_many_arguments)]
const fn data(
    name: &'static str,
    ty: AlgorithmType,
    power: u32,
    accuracy: u32,
    pp: u32,
    category: MoveCategory,
    description: &'static str,
    educational_note: &'static str,
    effect: &'static str,
) -> MoveData {
    MoveData {
        name,
        ty,
        power,
        accuracy,
        pp,
        category,
        description,
        educational_note,
        effect: Some(effect),
    }
}

/// The move catalog, indexed by [`MoveId`].
static MOVES: [MoveData; MoveId::LEN] = {
    use AlgorithmType::{Boosting, Clustering, Ensemble, Geometric, Neural, Probabilistic};
    use MoveCategory::{Physical, Special, Status};
    [
        data(
            "Bootstrap Assault",
            Ensemble,
            80,
            90,
            15,
            Physical,
            "Creates multiple training samples with replacement for a devastating ensemble attack.",
            "Bootstrap sampling is the foundation of Random Forest: each tree trains on a different sample drawn with replacement.",
            "High accuracy, reduces opponent's variance",
        ),
        data(
            "Feature Bagging",
            Ensemble,
            70,
            85,
            20,
            Special,
            "Randomly selects features for each attack, confusing the opponent with unpredictability.",
            "Random Forest considers only a random subset of features at each split, so no single tree dominates.",
            "Ignores opponent's defensive patterns",
        ),
        data(
            "Out-of-Bag Counter",
            Ensemble,
            0,
            100,
            10,
            Status,
            "Uses unsampled data to validate and counter-attack with precision.",
            "Out-of-bag error validates on the ~37% of rows each bootstrap sample leaves out.",
            "Next attack has 100% accuracy and +50% power",
        ),
        data(
            "Tree Vote",
            Ensemble,
            85,
            95,
            10,
            Special,
            "All trees vote on the final prediction, overwhelming the opponent with consensus.",
            "A forest predicts by majority vote (classification) or averaging (regression) over its trees.",
            "Power increases with number of previous ensemble moves used",
        ),
        data(
            "Gradient Descent",
            Neural,
            75,
            80,
            25,
            Physical,
            "Iteratively improves attack strength by following the steepest descent path.",
            "Gradient descent updates weights in the direction that reduces the loss.",
            "Power increases each turn (learning rate effect)",
        ),
        data(
            "Backpropagation Blast",
            Neural,
            90,
            85,
            15,
            Special,
            "Propagates error backwards through layers, dealing devastating damage.",
            "Backpropagation computes gradients layer by layer from output to input with the chain rule.",
            "Deals extra damage based on opponent's last move power",
        ),
        data(
            "Activation Burst",
            Neural,
            65,
            90,
            20,
            Special,
            "Non-linear activation functions create explosive attack patterns.",
            "Activation functions such as ReLU or tanh let networks model non-linear relationships.",
            "Super effective against linear models",
        ),
        data(
            "Dropout Defense",
            Neural,
            0,
            100,
            15,
            Status,
            "Randomly ignores incoming attacks to prevent overfitting to the opponent's strategy.",
            "Dropout zeroes random neurons during training, which prevents co-adaptation.",
            "Reduces damage from next 3 attacks by 50%",
        ),
        data(
            "Kernel Trick",
            Geometric,
            85,
            90,
            15,
            Special,
            "Transforms the battle space to higher dimensions for optimal separation.",
            "The kernel trick lets an SVM find non-linear boundaries by implicitly mapping data to a higher-dimensional space.",
            "Ignores opponent's defensive positioning",
        ),
        data(
            "Margin Maximizer",
            Geometric,
            80,
            95,
            20,
            Physical,
            "Finds the optimal separation distance for maximum impact.",
            "An SVM picks the hyperplane with the widest margin between classes, which improves generalization.",
            "Critical hit ratio increased",
        ),
        data(
            "Support Vector Strike",
            Geometric,
            95,
            85,
            12,
            Physical,
            "Targets only the most critical data points for maximum efficiency.",
            "Only the support vectors, the points closest to the boundary, determine an SVM.",
            "Always hits weakness, ignores filler moves",
        ),
        data(
            "Hyperplane Slash",
            Geometric,
            100,
            90,
            8,
            Physical,
            "Creates a perfect linear decision boundary that slices through opposition.",
            "An SVM decision boundary is a hyperplane in feature space.",
            "Super effective against clustering algorithms",
        ),
        data(
            "Weak Learner Swarm",
            Boosting,
            60,
            95,
            25,
            Physical,
            "Multiple weak attacks that collectively build unstoppable momentum.",
            "Gradient boosting chains many weak learners, typically shallow trees.",
            "Each use increases power of next boosting move",
        ),
        data(
            "Residual Correction",
            Boosting,
            70,
            90,
            20,
            Special,
            "Learns from previous mistakes to deliver precisely targeted attacks.",
            "Each new tree in gradient boosting is fit to the residuals of the trees before it.",
            "Damage increases based on opponent's remaining HP",
        ),
        data(
            "AdaBoost Combo",
            Boosting,
            80,
            85,
            15,
            Physical,
            "Re-weights attacks based on previous failures for an adaptive strategy.",
            "AdaBoost up-weights misclassified examples so later learners focus on the hard cases.",
            "Power doubles against opponents with high defense",
        ),
        data(
            "XGBoost Finisher",
            Boosting,
            110,
            95,
            5,
            Special,
            "Ultimate optimized boosting attack with built-in regularization.",
            "XGBoost adds regularization terms that curb overfitting without giving up boosting power.",
            "Cannot be countered, prevents opponent status moves next turn",
        ),
        data(
            "Prior Strike",
            Probabilistic,
            70,
            85,
            20,
            Special,
            "Attacks based on prior knowledge of class probabilities.",
            "The prior P(class) is the base rate of each class in the training data.",
            "Power increases against rare opponent types",
        ),
        data(
            "Likelihood Blast",
            Probabilistic,
            75,
            90,
            18,
            Special,
            "Calculates attack probability based on feature evidence.",
            "The likelihood P(features|class) measures how probable the observed features are for each class.",
            "Accuracy increases with more data observed",
        ),
        data(
            "Independence Assumption",
            Probabilistic,
            65,
            100,
            15,
            Status,
            "Ignores feature correlations for simplified but fast attacks.",
            "Naive Bayes assumes features are independent given the class; often wrong, yet it works well in practice.",
            "Moves cost 0 PP next turn (computational efficiency)",
        ),
        data(
            "Posterior Slam",
            Probabilistic,
            85,
            95,
            12,
            Special,
            "Final prediction using Bayes' theorem for maximum probability impact.",
            "The posterior P(class|features) combines likelihood and prior through Bayes' theorem.",
            "Power scales with confidence level of prediction",
        ),
        data(
            "Centroid Shift",
            Clustering,
            0,
            100,
            20,
            Status,
            "Repositions cluster centers for an optimal grouping strategy.",
            "K-means moves each centroid to the mean of the points assigned to it.",
            "Changes battle field positioning, affects accuracy of next moves",
        ),
        data(
            "Cluster Bomb",
            Clustering,
            80,
            85,
            15,
            Physical,
            "Assigns data points to clusters with explosive force.",
            "The assignment step puts each point in the cluster of its nearest centroid.",
            "Hits multiple targets, damage split between them",
        ),
        data(
            "Elbow Method",
            Clustering,
            0,
            100,
            10,
            Status,
            "Analyzes the opponent to find the optimal number of attack clusters.",
            "The elbow method plots within-cluster variance against K to choose the number of clusters.",
            "Reveals opponent's optimal counter-strategy, boosts next attack",
        ),
        data(
            "Convergence Lock",
            Clustering,
            90,
            100,
            8,
            Status,
            "Locks the opponent in place until cluster centers stabilize.",
            "K-means has converged once centroids stop moving between iterations.",
            "Opponent cannot use moves until they take damage",
        ),
    ]
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_catalog_is_indexed_by_id() {
        for (i, id) in MoveId::ALL.into_iter().enumerate() {
            assert_eq!(id as usize, i);
            assert_eq!(MoveId::from_name(id.name()), Some(id));
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = MoveId::ALL.iter().map(|id| id.name()).collect();
        assert_eq!(names.len(), MoveId::LEN);
    }

    #[test]
    fn test_move_metadata() {
        let finisher = MoveId::XgBoostFinisher.data();
        assert_eq!(finisher.power, 110);
        assert_eq!(finisher.pp, 5);
        assert_eq!(finisher.ty, AlgorithmType::Boosting);
        assert!(finisher.category.is_special());

        let shift = MoveId::CentroidShift.data();
        assert_eq!(shift.power, 0);
        assert!(shift.category.is_status());
    }

    #[test]
    fn test_every_move_has_uses_and_valid_accuracy() {
        for id in MoveId::ALL {
            let data = id.data();
            assert!(data.pp > 0, "{id} has no PP");
            assert!(data.accuracy <= 100, "{id} accuracy out of range");
        }
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&MoveId::OutOfBagCounter).unwrap();
        assert_eq!(json, "\"Out-of-Bag Counter\"");
        let id: MoveId = serde_json::from_str("\"out-of-bag counter\"").unwrap();
        assert_eq!(id, MoveId::OutOfBagCounter);

        let err = serde_json::from_str::<MoveId>("\"Splash\"").unwrap_err();
        assert!(err.to_string().contains("unknown move"));
    }
}
