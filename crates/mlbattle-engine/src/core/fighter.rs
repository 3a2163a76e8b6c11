use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::RandomSource;

use super::{
    algorithm::{Algorithm, AlgorithmConfig},
    algorithm_type::AlgorithmType,
};

/// Error returned by [`create_fighter`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FighterError {
    #[display("unknown algorithm category: {_0}")]
    UnknownCategory(#[error(not(source))] String),
}

/// Optional model evaluation metrics used to derive combat stats.
///
/// All fields are fractions in `[0, 1]` except `fit_time`, which is in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMetrics {
    pub accuracy: Option<f64>,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1_score: Option<f64>,
    pub fit_time: Option<f64>,
}

/// Integer combat stats used to build a fighter directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterStats {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub accuracy: u32,
}

/// A battle-ready algorithm.
///
/// Only `health` changes after creation, through [`Fighter::take_damage`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fighter {
    name: String,
    algorithm: Algorithm,
    health: u32,
    max_health: u32,
    attack: u32,
    defense: u32,
    speed: u32,
    accuracy: u32,
    precision: f64,
    recall: f64,
    f1_score: f64,
    training_time: f64,
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_stat(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

impl Fighter {
    /// Builds a fighter from fixed stats, without jitter.
    ///
    /// Raw metrics are derived the same way [`create_fighter`] derives them
    /// when no metrics are supplied, with a training time of zero.
    #[must_use]
    pub fn from_stats(algorithm: Algorithm, stats: FighterStats) -> Self {
        let max_health = round_stat(f64::from(stats.attack + stats.defense + stats.speed) / 3.0);
        let precision = f64::from(stats.attack) / 100.0;
        let recall = f64::from(stats.defense) / 100.0;
        Self {
            name: algorithm.name().to_owned(),
            algorithm,
            health: max_health,
            max_health,
            attack: stats.attack,
            defense: stats.defense,
            speed: stats.speed,
            accuracy: stats.accuracy.min(100),
            precision,
            recall,
            f1_score: harmonic_mean(precision, recall),
            training_time: 0.0,
        }
    }

    /// Returns a copy with current health set to `health`, capped at max health.
    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[must_use]
    pub fn ty(&self) -> AlgorithmType {
        self.algorithm.ty()
    }

    #[must_use]
    pub fn config(&self) -> &'static AlgorithmConfig {
        self.algorithm.config()
    }

    #[must_use]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    #[must_use]
    pub fn attack(&self) -> u32 {
        self.attack
    }

    #[must_use]
    pub fn defense(&self) -> u32 {
        self.defense
    }

    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    #[must_use]
    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    #[must_use]
    pub fn precision(&self) -> f64 {
        self.precision
    }

    #[must_use]
    pub fn recall(&self) -> f64 {
        self.recall
    }

    #[must_use]
    pub fn f1_score(&self) -> f64 {
        self.f1_score
    }

    #[must_use]
    pub fn training_time(&self) -> f64 {
        self.training_time
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Current health as a fraction of max health (`0.0` when max health is zero).
    #[must_use]
    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        f64::from(self.health) / f64::from(self.max_health)
    }

    /// Reduces health by `amount`, flooring at zero. Returns the health lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }
}

fn harmonic_mean(a: f64, b: f64) -> f64 {
    if a + b == 0.0 {
        0.0
    } else {
        2.0 * a * b / (a + b)
    }
}

/// Creates a fighter for the algorithm named `category`.
///
/// Without metrics, every stat is the algorithm's baseline plus uniform jitter
/// in `[-10, 10)`. Each metric that is present overrides one stat:
///
/// | metric      | stat                              |
/// |-------------|-----------------------------------|
/// | `precision` | attack = precision × 100          |
/// | `recall`    | defense = recall × 100            |
/// | `fit_time`  | speed = max(20, 100 − fit_time × 10) |
/// | `accuracy`  | accuracy = accuracy × 100         |
///
/// Max health is the rounded mean of the unrounded attack, defense and speed.
///
/// # Examples
///
/// ```
/// use mlbattle_engine::{PerformanceMetrics, ScriptedRandom, create_fighter};
///
/// let metrics = PerformanceMetrics {
///     precision: Some(0.9),
///     recall: Some(0.8),
///     fit_time: Some(2.0),
///     ..Default::default()
/// };
/// let mut rng = ScriptedRandom::constant(0.5);
/// let fighter = create_fighter("Random Forest", Some(&metrics), &mut rng).unwrap();
/// assert_eq!((fighter.attack(), fighter.defense(), fighter.speed()), (90, 80, 80));
/// ```
pub fn create_fighter<R>(
    category: &str,
    metrics: Option<&PerformanceMetrics>,
    rng: &mut R,
) -> Result<Fighter, FighterError>
where
    R: RandomSource + ?Sized,
{
    let algorithm = Algorithm::from_name(category)
        .ok_or_else(|| FighterError::UnknownCategory(category.to_owned()))?;
    let base = algorithm.config().base_stats;
    let mut jitter = |value: u32| f64::from(value) + rng.range_f64(-10.0, 10.0);

    let base_attack = jitter(base.attack);
    let base_defense = jitter(base.defense);
    let base_speed = jitter(base.speed);
    let base_accuracy = jitter(base.accuracy);

    let metrics = metrics.copied().unwrap_or_default();
    let attack = metrics.precision.map_or(base_attack, |p| p * 100.0);
    let defense = metrics.recall.map_or(base_defense, |r| r * 100.0);
    let speed = metrics
        .fit_time
        .map_or(base_speed, |t| f64::max(20.0, 100.0 - t * 10.0));
    let accuracy = metrics.accuracy.map_or(base_accuracy, |a| a * 100.0);

    let max_health = round_stat((attack + defense + speed) / 3.0);
    let precision = metrics.precision.unwrap_or(attack / 100.0);
    let recall = metrics.recall.unwrap_or(defense / 100.0);
    let f1_score = metrics
        .f1_score
        .unwrap_or_else(|| harmonic_mean(precision, recall));
    let training_time = match metrics.fit_time {
        Some(t) => t,
        None => rng.range_f64(0.0, 5.0),
    };

    let fighter = Fighter {
        name: algorithm.name().to_owned(),
        algorithm,
        health: max_health,
        max_health,
        attack: round_stat(attack),
        defense: round_stat(defense),
        speed: round_stat(speed),
        accuracy: round_stat(accuracy).min(100),
        precision,
        recall,
        f1_score,
        training_time,
    };
    debug!(
        fighter = fighter.name(),
        hp = fighter.max_health,
        atk = fighter.attack,
        def = fighter.defense,
        spd = fighter.speed,
        acc = fighter.accuracy,
        "created fighter"
    );
    Ok(fighter)
}

#[cfg(test)]
mod tests {
    use crate::ScriptedRandom;

    use super::*;

    #[test]
    fn test_unknown_category() {
        let mut rng = ScriptedRandom::constant(0.5);
        let err = create_fighter("Linear Regression", None, &mut rng).unwrap_err();
        assert_eq!(
            err,
            FighterError::UnknownCategory("Linear Regression".to_owned())
        );
    }

    #[test]
    fn test_stats_from_metrics_ignore_jitter() {
        let metrics = PerformanceMetrics {
            precision: Some(0.9),
            recall: Some(0.8),
            fit_time: Some(2.0),
            ..Default::default()
        };
        for draw in [0.0, 0.3, 0.99] {
            let mut rng = ScriptedRandom::constant(draw);
            let f = create_fighter("Random Forest", Some(&metrics), &mut rng).unwrap();
            assert_eq!(f.attack(), 90);
            assert_eq!(f.defense(), 80);
            assert_eq!(f.speed(), 80);
            assert_eq!(f.max_health(), 83);
            assert_eq!(f.health(), f.max_health());
            assert_eq!(f.training_time(), 2.0);
            assert!((f.f1_score() - 2.0 * 0.72 / 1.7).abs() < 1e-9);
        }
    }

    #[test]
    fn test_missing_metric_falls_back_to_jittered_baseline() {
        let metrics = PerformanceMetrics {
            accuracy: Some(0.97),
            ..Default::default()
        };
        // 0.5 maps to zero jitter
        let mut rng = ScriptedRandom::constant(0.5);
        let f = create_fighter("svm", Some(&metrics), &mut rng).unwrap();
        assert_eq!(f.algorithm(), Algorithm::SupportVectorMachine);
        assert_eq!((f.attack(), f.defense(), f.speed()), (90, 95, 65));
        assert_eq!(f.accuracy(), 97);
        assert_eq!(f.training_time(), 2.5);
    }

    #[test]
    fn test_jitter_stays_within_ten_points() {
        for draw in [0.0, 0.25, 0.75, 0.999] {
            let mut rng = ScriptedRandom::constant(draw);
            let f = create_fighter("Neural Network", None, &mut rng).unwrap();
            assert!((85..=105).contains(&f.attack()));
            assert!((60..=80).contains(&f.defense()));
            assert!((70..=90).contains(&f.speed()));
            assert!((75..=95).contains(&f.accuracy()));
            assert!(f.max_health() > 0);
        }
    }

    #[test]
    fn test_slow_training_speed_floor() {
        let metrics = PerformanceMetrics {
            fit_time: Some(30.0),
            ..Default::default()
        };
        let mut rng = ScriptedRandom::constant(0.5);
        let f = create_fighter("K-Means", Some(&metrics), &mut rng).unwrap();
        assert_eq!(f.speed(), 20);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let stats = FighterStats {
            attack: 60,
            defense: 60,
            speed: 60,
            accuracy: 90,
        };
        let mut f = Fighter::from_stats(Algorithm::NaiveBayes, stats);
        assert_eq!(f.max_health(), 60);
        assert_eq!(f.take_damage(25), 25);
        assert_eq!(f.health(), 35);
        assert_eq!(f.take_damage(100), 35);
        assert_eq!(f.health(), 0);
        assert!(!f.is_alive());
        assert_eq!(f.health_fraction(), 0.0);
    }

    #[test]
    fn test_with_health_is_capped() {
        let stats = FighterStats {
            attack: 90,
            defense: 90,
            speed: 90,
            accuracy: 90,
        };
        let f = Fighter::from_stats(Algorithm::RandomForest, stats).with_health(500);
        assert_eq!(f.health(), 90);
        let f = f.with_health(18);
        assert!((f.health_fraction() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_deserialize_with_missing_fields() {
        let m: PerformanceMetrics = serde_json::from_str(r#"{"precision": 0.5}"#).unwrap();
        assert_eq!(m.precision, Some(0.5));
        assert_eq!(m.recall, None);
    }
}
