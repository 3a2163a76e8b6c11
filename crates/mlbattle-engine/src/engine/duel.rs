use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::core::{Fighter, MoveId, type_multiplier};

use super::{
    RandomSource,
    combat_state::{CombatState, Side},
    messages,
};

/// Maximum number of actions before a duel is stopped.
pub const MAX_DUEL_ACTIONS: u32 = 100;

const CRITICAL_CHANCE: f64 = 1.0 / 16.0;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DuelError {
    #[display("{_0} is not in the move list")]
    MoveNotKnown(#[error(not(source))] MoveId),
    #[display("{_0} has no PP left")]
    OutOfPp(#[error(not(source))] MoveId),
    #[display("duel already finished")]
    DuelFinished,
    #[display("not this side's turn")]
    NotYourTurn,
}

/// Why a duel ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum DuelEnd {
    /// A fighter reached zero health.
    Knockout,
    /// The side to move has no PP left on any move.
    Exhausted,
    ActionCap,
}

/// Result of one applied move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuelTurn {
    pub turn: u32,
    pub side: Side,
    pub move_id: MoveId,
    pub hit: bool,
    pub critical: bool,
    pub damage: u32,
    pub effectiveness: f64,
    pub remaining_pp: u32,
    pub target_health: u32,
    pub message: messages::CombatMessage,
}

/// A turn-based battle in which both sides spend PP on catalog moves.
///
/// The player acts on odd turns and the AI on even turns.
#[derive(Debug, Clone)]
pub struct Duel {
    player: Fighter,
    ai: Fighter,
    player_pp: BTreeMap<MoveId, u32>,
    ai_pp: BTreeMap<MoveId, u32>,
    turn: u32,
    history: Vec<MoveId>,
    last_player_move: Option<MoveId>,
}

impl Duel {
    #[must_use]
    pub fn new(player: Fighter, ai: Fighter) -> Self {
        let pp = |f: &Fighter| -> BTreeMap<MoveId, u32> {
            f.config().moves.iter().map(|id| (*id, id.data().pp)).collect()
        };
        Self {
            player_pp: pp(&player),
            ai_pp: pp(&ai),
            player,
            ai,
            turn: 1,
            history: vec![],
            last_player_move: None,
        }
    }

    #[must_use]
    pub fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn history(&self) -> &[MoveId] {
        &self.history
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        if self.turn % 2 == 1 {
            Side::Player
        } else {
            Side::Ai
        }
    }

    fn pp(&self, side: Side) -> &BTreeMap<MoveId, u32> {
        match side {
            Side::Player => &self.player_pp,
            Side::Ai => &self.ai_pp,
        }
    }

    #[must_use]
    pub fn remaining_uses(&self, side: Side, id: MoveId) -> u32 {
        self.pp(side).get(&id).copied().unwrap_or(0)
    }

    /// The battle as seen by `side`: the AI view for [`Side::Ai`], the
    /// mirrored view for [`Side::Player`].
    #[must_use]
    pub fn state_for(&self, side: Side) -> CombatState {
        let moves = |f: &Fighter| f.config().moves.to_vec();
        let state = CombatState {
            player: Some(self.player.clone()),
            ai: Some(self.ai.clone()),
            player_moves: moves(&self.player),
            ai_moves: moves(&self.ai),
            player_pp: self.player_pp.clone(),
            ai_pp: self.ai_pp.clone(),
            turn: self.turn,
            history: self.history.clone(),
            last_player_move: self.last_player_move,
        };
        match side {
            Side::Ai => state,
            Side::Player => state.mirrored(),
        }
    }

    #[must_use]
    pub fn end(&self) -> Option<DuelEnd> {
        if !self.player.is_alive() || !self.ai.is_alive() {
            Some(DuelEnd::Knockout)
        } else if self.turn > MAX_DUEL_ACTIONS {
            Some(DuelEnd::ActionCap)
        } else if self.pp(self.side_to_move()).values().all(|pp| *pp == 0) {
            Some(DuelEnd::Exhausted)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.end().is_some()
    }

    /// The winning side once the duel is finished.
    ///
    /// Without a knockout the higher health fraction wins; an exact tie has no
    /// winner.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.end()?;
        let player = self.player.health_fraction();
        let ai = self.ai.health_fraction();
        if player > ai {
            Some(Side::Player)
        } else if ai > player {
            Some(Side::Ai)
        } else {
            None
        }
    }

    /// Uses `id` for `side`, spending one PP and advancing the turn.
    pub fn apply<R>(&mut self, side: Side, id: MoveId, rng: &mut R) -> Result<DuelTurn, DuelError>
    where
        R: RandomSource + ?Sized,
    {
        if self.is_finished() {
            return Err(DuelError::DuelFinished);
        }
        if side != self.side_to_move() {
            return Err(DuelError::NotYourTurn);
        }
        let (pp, attacker, defender) = match side {
            Side::Player => (&mut self.player_pp, &self.player, &mut self.ai),
            Side::Ai => (&mut self.ai_pp, &self.ai, &mut self.player),
        };
        let remaining = pp.get_mut(&id).ok_or(DuelError::MoveNotKnown(id))?;
        if *remaining == 0 {
            return Err(DuelError::OutOfPp(id));
        }
        *remaining -= 1;
        let remaining_pp = *remaining;

        let data = id.data();
        let damaging = data.power > 0 && !data.category.is_status();
        let effectiveness = if damaging {
            type_multiplier(data.ty, defender.ty())
        } else {
            1.0
        };
        let hit = !damaging || rng.chance(f64::from(data.accuracy) / 100.0);
        let (damage, critical) = if damaging && hit {
            let critical = rng.chance(CRITICAL_CHANCE);
            let variance = rng.range_f64(0.85, 1.0);
            let damage = move_damage(
                data.power,
                attacker,
                defender,
                effectiveness,
                variance,
                critical,
            );
            (defender.take_damage(damage), critical)
        } else {
            (0, false)
        };

        let message = if damaging {
            messages::attack_message(
                attacker.name(),
                data.name,
                damage,
                effectiveness,
                critical,
                !hit,
            )
        } else {
            messages::status_message(attacker.name(), id)
        };
        let turn = DuelTurn {
            turn: self.turn,
            side,
            move_id: id,
            hit,
            critical,
            damage,
            effectiveness,
            remaining_pp,
            target_health: defender.health(),
            message,
        };
        debug!(
            turn = self.turn,
            ?side,
            %id,
            damage,
            target_hp = turn.target_health,
            "duel action"
        );

        self.history.push(id);
        if side.is_player() {
            self.last_player_move = Some(id);
        }
        self.turn += 1;
        Ok(turn)
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn move_damage(
    power: u32,
    attacker: &Fighter,
    defender: &Fighter,
    effectiveness: f64,
    variance: f64,
    critical: bool,
) -> u32 {
    let ratio = f64::from(attacker.attack()) / f64::from(defender.defense().max(1));
    let crit = if critical { 1.5 } else { 1.0 };
    let damage = f64::from(power) * ratio * 0.4 * effectiveness * variance * crit;
    damage.round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use crate::{Algorithm, FighterStats, ScriptedRandom};

    use super::*;

    fn duel(player: Algorithm, ai: Algorithm) -> Duel {
        let stats = FighterStats {
            attack: 80,
            defense: 80,
            speed: 80,
            accuracy: 90,
        };
        Duel::new(
            Fighter::from_stats(player, stats),
            Fighter::from_stats(ai, stats),
        )
    }

    #[test]
    fn test_turn_order_is_enforced() {
        let mut duel = duel(Algorithm::RandomForest, Algorithm::NeuralNetwork);
        let mut rng = ScriptedRandom::constant(0.5);
        assert_eq!(duel.side_to_move(), Side::Player);
        assert_eq!(
            duel.apply(Side::Ai, MoveId::GradientDescent, &mut rng),
            Err(DuelError::NotYourTurn)
        );
        duel.apply(Side::Player, MoveId::TreeVote, &mut rng).unwrap();
        assert_eq!(duel.side_to_move(), Side::Ai);
        assert_eq!(duel.turn(), 2);
        assert_eq!(duel.history(), [MoveId::TreeVote]);
        assert_eq!(
            duel.state_for(Side::Ai).last_player_move,
            Some(MoveId::TreeVote)
        );
    }

    #[test]
    fn test_unknown_move_is_rejected() {
        let mut duel = duel(Algorithm::RandomForest, Algorithm::NeuralNetwork);
        let mut rng = ScriptedRandom::constant(0.5);
        assert_eq!(
            duel.apply(Side::Player, MoveId::KernelTrick, &mut rng),
            Err(DuelError::MoveNotKnown(MoveId::KernelTrick))
        );
        assert_eq!(duel.turn(), 1);
    }

    #[test]
    fn test_pp_is_spent_and_enforced() {
        let mut duel = duel(Algorithm::GradientBoosting, Algorithm::KMeansClustering);
        // Every draw misses damaging moves, Elbow Method is a status move.
        let mut rng = ScriptedRandom::constant(0.99);
        for i in 0..5 {
            let turn = duel
                .apply(Side::Player, MoveId::XgBoostFinisher, &mut rng)
                .unwrap();
            assert_eq!(turn.remaining_pp, 4 - i);
            assert!(!turn.hit);
            duel.apply(Side::Ai, MoveId::ElbowMethod, &mut rng).unwrap();
        }
        assert_eq!(duel.remaining_uses(Side::Player, MoveId::XgBoostFinisher), 0);
        assert_eq!(
            duel.apply(Side::Player, MoveId::XgBoostFinisher, &mut rng),
            Err(DuelError::OutOfPp(MoveId::XgBoostFinisher))
        );
    }

    #[test]
    fn test_damage_formula() {
        let mut duel = duel(Algorithm::NeuralNetwork, Algorithm::SupportVectorMachine);
        // hit (0.0), critical (0.0), variance 0.85
        let mut rng = ScriptedRandom::new([0.0]);
        let turn = duel
            .apply(Side::Player, MoveId::BackpropagationBlast, &mut rng)
            .unwrap();
        // 90 * 1.0 * 0.4 * 1.5 (neural -> geometric) * 0.85 * 1.5 = 68.85
        assert!(turn.hit && turn.critical);
        assert_eq!(turn.damage, 69);
        assert_eq!(turn.effectiveness, 1.5);
        assert_eq!(duel.fighter(Side::Ai).health(), 11);
    }

    #[test]
    fn test_status_move_is_narrated_as_status() {
        let mut duel = duel(Algorithm::NeuralNetwork, Algorithm::SupportVectorMachine);
        let mut rng = ScriptedRandom::constant(0.0);
        let turn = duel
            .apply(Side::Player, MoveId::DropoutDefense, &mut rng)
            .unwrap();
        assert!(turn.hit);
        assert!(!turn.critical);
        assert_eq!(turn.damage, 0);
        assert_eq!(turn.effectiveness, 1.0);
        assert_eq!(turn.message.kind, messages::MessageKind::Status);
        assert!(
            turn.message
                .message
                .starts_with("Neural Network uses Dropout Defense!")
        );
        assert!(!turn.message.message.contains("effective"));
        assert_eq!(duel.fighter(Side::Ai).health(), 80);
    }

    #[test]
    fn test_knockout_finishes_duel() {
        let mut duel = duel(Algorithm::NeuralNetwork, Algorithm::SupportVectorMachine);
        let mut rng = ScriptedRandom::new([0.0]);
        duel.apply(Side::Player, MoveId::BackpropagationBlast, &mut rng)
            .unwrap();
        duel.apply(Side::Ai, MoveId::MarginMaximizer, &mut rng).unwrap();
        duel.apply(Side::Player, MoveId::BackpropagationBlast, &mut rng)
            .unwrap();
        assert_eq!(duel.end(), Some(DuelEnd::Knockout));
        assert_eq!(duel.winner(), Some(Side::Player));
        assert_eq!(
            duel.apply(Side::Ai, MoveId::KernelTrick, &mut rng),
            Err(DuelError::DuelFinished)
        );
    }

    #[test]
    fn test_mirrored_state_for_player() {
        let mut duel = duel(Algorithm::NaiveBayes, Algorithm::RandomForest);
        let mut rng = ScriptedRandom::constant(0.99);
        duel.apply(Side::Player, MoveId::PriorStrike, &mut rng).unwrap();
        duel.apply(Side::Ai, MoveId::TreeVote, &mut rng).unwrap();
        let view = duel.state_for(Side::Player);
        assert_eq!(view.ai_moves[0], MoveId::PriorStrike);
        assert_eq!(view.history, [MoveId::TreeVote]);
        assert_eq!(view.remaining_uses(Side::Player, MoveId::TreeVote), 9);
    }
}
