use serde::Serialize;
use tracing::debug;

use crate::core::Fighter;

use super::RandomSource;

/// Hard cap on the round counter of an automatic battle.
pub const MAX_ROUNDS: u32 = 50;

const BASIC_ATTACK: &str = "Basic Attack";

/// Kind of attack chosen for one action of an automatic battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    Basic,
    Combo,
    Special,
}

impl AttackKind {
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Basic => 1.0,
            Self::Combo => 1.2,
            Self::Special => 1.5,
        }
    }
}

/// Which of the two fighters passed to [`battle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "lowercase")]
pub enum BattleSide {
    First,
    Second,
}

/// How an automatic battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    /// One fighter reached zero health.
    Knockout,
    /// Both fighters were alive when the round cap was reached.
    RoundCap,
}

/// A single action of an automatic battle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRecord {
    pub round: u32,
    pub attacker: String,
    pub defender: String,
    pub move_name: String,
    pub damage: u32,
    pub narrative: String,
    pub special: bool,
    pub combo: bool,
    pub missed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleResult {
    pub winner: String,
    pub winner_side: BattleSide,
    pub outcome: BattleOutcome,
    pub actions: Vec<ActionRecord>,
    pub total_actions: usize,
    pub first_final_health: u32,
    pub second_final_health: u32,
}

/// Runs an automatic battle between copies of `first` and `second`.
///
/// Each round the faster fighter attacks first (equal speed is a coin flip);
/// if the target survives it counter-attacks. The battle stops when a fighter
/// is knocked out or the round counter passes [`MAX_ROUNDS`]. At the cap, the
/// fighter with the higher health fraction wins and `first` wins exact ties.
pub fn battle<R>(first: &Fighter, second: &Fighter, rng: &mut R) -> BattleResult
where
    R: RandomSource + ?Sized,
{
    let mut a = first.clone();
    let mut b = second.clone();
    let mut actions = vec![];
    let mut round = 1;

    while a.is_alive() && b.is_alive() && round <= MAX_ROUNDS {
        let a_first = match a.speed().cmp(&b.speed()) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => rng.chance(0.5),
        };
        let (lead, trail) = if a_first {
            (&mut a, &mut b)
        } else {
            (&mut b, &mut a)
        };

        actions.push(execute_attack(lead, trail, round, rng));
        if trail.is_alive() {
            round += 1;
            actions.push(execute_attack(trail, lead, round, rng));
        }
        round += 1;
    }

    let (winner_side, outcome) = match (a.is_alive(), b.is_alive()) {
        (true, false) => (BattleSide::First, BattleOutcome::Knockout),
        (false, true) => (BattleSide::Second, BattleOutcome::Knockout),
        _ if b.health_fraction() > a.health_fraction() => {
            (BattleSide::Second, BattleOutcome::RoundCap)
        }
        _ => (BattleSide::First, BattleOutcome::RoundCap),
    };
    let winner = match winner_side {
        BattleSide::First => a.name(),
        BattleSide::Second => b.name(),
    };
    debug!(
        winner,
        ?outcome,
        actions = actions.len(),
        "battle finished"
    );

    BattleResult {
        winner: winner.to_owned(),
        winner_side,
        outcome,
        total_actions: actions.len(),
        actions,
        first_final_health: a.health(),
        second_final_health: b.health(),
    }
}

fn choose_attack<R>(attacker: &Fighter, rng: &mut R) -> (AttackKind, String)
where
    R: RandomSource + ?Sized,
{
    let config = attacker.config();
    let special_chance = 0.2 + (1.0 - attacker.health_fraction()) * 0.3;
    if rng.chance(special_chance) {
        (AttackKind::Special, config.special.to_owned())
    } else if rng.chance(0.3) {
        let combo = config.combos[rng.index(config.combos.len())];
        (AttackKind::Combo, combo.to_owned())
    } else {
        (AttackKind::Basic, BASIC_ATTACK.to_owned())
    }
}

/// Base damage before attack-kind and matchup multipliers, or `None` on a miss.
fn base_damage<R>(attacker: &Fighter, defender: &Fighter, rng: &mut R) -> Option<f64>
where
    R: RandomSource + ?Sized,
{
    if !rng.chance(f64::from(attacker.accuracy()) / 100.0) {
        return None;
    }
    let raw = (f64::from(attacker.attack()) - f64::from(defender.defense()) / 2.0)
        * (f64::from(attacker.speed()) / 100.0)
        * rng.range_f64(0.8, 1.2);
    Some(f64::max(1.0, raw).round())
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn execute_attack<R>(
    attacker: &mut Fighter,
    defender: &mut Fighter,
    round: u32,
    rng: &mut R,
) -> ActionRecord
where
    R: RandomSource + ?Sized,
{
    let (kind, move_name) = choose_attack(attacker, rng);
    let advantage = attacker
        .algorithm()
        .resolver_advantage(defender.algorithm());

    let damage = base_damage(attacker, defender, rng)
        .map_or(0, |base| (base * kind.multiplier() * advantage).round() as u32);
    let missed = damage == 0;
    defender.take_damage(damage);

    let narrative = if missed {
        format!("{} uses {move_name} but misses!", attacker.name())
    } else {
        let effect = if advantage > 1.0 {
            " It's super effective!"
        } else if advantage < 1.0 {
            " It's not very effective..."
        } else {
            ""
        };
        let name = attacker.name();
        match kind {
            AttackKind::Special => {
                format!("💥 {name} unleashes {move_name}! Deals {damage} damage!{effect}")
            }
            AttackKind::Combo => {
                format!("⚡ {name} performs {move_name}! Deals {damage} damage!{effect}")
            }
            AttackKind::Basic => {
                format!("{name} attacks with {move_name}! Deals {damage} damage!{effect}")
            }
        }
    };
    debug!(
        round,
        attacker = attacker.name(),
        defender = defender.name(),
        %move_name,
        damage,
        defender_hp = defender.health(),
        "battle action"
    );

    ActionRecord {
        round,
        attacker: attacker.name().to_owned(),
        defender: defender.name().to_owned(),
        move_name,
        damage,
        narrative,
        special: kind.is_special(),
        combo: kind.is_combo(),
        missed,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Algorithm, BattleRng, BattleSeed, FighterStats, ScriptedRandom, create_fighter,
    };

    use super::*;

    fn fighter(algorithm: Algorithm, attack: u32, defense: u32, speed: u32) -> Fighter {
        Fighter::from_stats(
            algorithm,
            FighterStats {
                attack,
                defense,
                speed,
                accuracy: 90,
            },
        )
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let a = fighter(Algorithm::RandomForest, 90, 80, 70);
        let b = fighter(Algorithm::NeuralNetwork, 95, 70, 80);
        let mut rng = BattleRng::with_seed(BattleSeed::from_bytes([1; 16]));
        let _ = battle(&a, &b, &mut rng);
        assert_eq!(a.health(), a.max_health());
        assert_eq!(b.health(), b.max_health());
    }

    #[test]
    fn test_battles_terminate_with_consistent_winner() {
        let mut rng = BattleRng::with_seed(BattleSeed::from_bytes([9; 16]));
        for a_alg in Algorithm::ALL {
            for b_alg in Algorithm::ALL {
                let a = create_fighter(a_alg.name(), None, &mut rng).unwrap();
                let b = create_fighter(b_alg.name(), None, &mut rng).unwrap();
                let result = battle(&a, &b, &mut rng);

                assert!(result.total_actions <= 50);
                assert_eq!(result.total_actions, result.actions.len());
                assert!(result.actions.iter().all(|r| r.round <= MAX_ROUNDS));
                assert!(result.first_final_health <= a.max_health());
                assert!(result.second_final_health <= b.max_health());

                let (winner_hp, loser_hp) = match result.winner_side {
                    BattleSide::First => (result.first_final_health, result.second_final_health),
                    BattleSide::Second => (result.second_final_health, result.first_final_health),
                };
                assert!(winner_hp > 0);
                if result.outcome.is_knockout() {
                    assert_eq!(loser_hp, 0);
                }
            }
        }
    }

    #[test]
    fn test_health_never_leaves_bounds() {
        let a = fighter(Algorithm::GradientBoosting, 120, 60, 90);
        let b = fighter(Algorithm::KMeansClustering, 70, 80, 95);
        let mut rng = BattleRng::with_seed(BattleSeed::from_bytes([3; 16]));
        let result = battle(&a, &b, &mut rng);

        let mut hp_a = a.max_health();
        let mut hp_b = b.max_health();
        for record in &result.actions {
            if record.attacker == a.name() {
                hp_b = hp_b.saturating_sub(record.damage);
            } else {
                hp_a = hp_a.saturating_sub(record.damage);
            }
            assert!(hp_a <= a.max_health() && hp_b <= b.max_health());
        }
        assert_eq!(hp_a, result.first_final_health);
        assert_eq!(hp_b, result.second_final_health);
    }

    #[test]
    fn test_round_cap_goes_to_higher_health_fraction() {
        // Every draw of 0.99 misses, so nobody takes damage.
        let a = fighter(Algorithm::RandomForest, 80, 80, 80);
        let b = fighter(Algorithm::NaiveBayes, 80, 80, 70);
        let mut rng = ScriptedRandom::constant(0.99);
        let result = battle(&a, &b, &mut rng);

        assert_eq!(result.outcome, BattleOutcome::RoundCap);
        assert_eq!(result.winner_side, BattleSide::First);
        assert_eq!(result.winner, "Random Forest");
        assert_eq!(result.total_actions, 50);
        assert!(result.actions.iter().all(|r| r.missed && r.damage == 0));
        assert_eq!(
            result.actions[0].narrative,
            "Random Forest uses Basic Attack but misses!"
        );
    }

    #[test]
    fn test_special_attack_damage_and_narrative() {
        // special roll 0.0 hits, accuracy 0.0 hits, variance 0.5 -> factor 1.0
        let a = fighter(Algorithm::NeuralNetwork, 100, 80, 100);
        let b = fighter(Algorithm::RandomForest, 80, 80, 50);
        let mut rng = ScriptedRandom::new([0.0, 0.0, 0.5]);
        let result = battle(&a, &b, &mut rng);

        let first = &result.actions[0];
        assert!(first.special);
        assert_eq!(first.move_name, "Backpropagation Blast");
        // (100 - 40) * 1.0 * 1.0 = 60, * 1.5 special * 1.25 advantage = 112.5
        assert_eq!(first.damage, 113);
        assert_eq!(
            first.narrative,
            "💥 Neural Network unleashes Backpropagation Blast! Deals 113 damage! It's super effective!"
        );
    }

    #[test]
    fn test_minimum_damage_is_one() {
        let a = fighter(Algorithm::KMeansClustering, 10, 50, 50);
        let b = fighter(Algorithm::SupportVectorMachine, 50, 200, 10);
        // no special (0.9 > 0.2), no combo (0.9 > 0.3), hit (0.0), variance
        let mut rng = ScriptedRandom::new([0.9, 0.9, 0.0, 0.5]);
        let result = battle(&a, &b, &mut rng);
        let first = &result.actions[0];
        assert_eq!(first.move_name, "Basic Attack");
        assert_eq!(first.damage, 1);
        assert!(!first.missed);
    }
}
