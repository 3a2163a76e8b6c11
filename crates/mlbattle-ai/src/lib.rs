//! Move selection for ML algorithm battles.
//!
//! This crate implements a three-tier decision engine:
//!
//! 1. **Easy** ([`Easy`]) - Noisy pick weighted slightly toward move power.
//!
//! 2. **Normal** ([`Normal`]) - Greedy scoring of power, type matchup, health, PP
//!    conservation and repetition of recent decisions.
//!
//! 3. **Hard** ([`Hard`]) - Normal's ideas plus opponent pattern prediction
//!    ([`predict_opponent`]), counter and synergy lookups ([`tables`]), and
//!    endgame terms.
//!
//! # Architecture
//!
//! ```text
//! CombatAi::select_move (total, logs every attempt)
//!     ↓ builds
//! BattleView (validated CombatState)
//!     ↓ passed to
//! MoveSelector (Easy / Normal / Hard)
//! ```
//!
//! Tiers return a [`SelectionError`] instead of panicking. [`CombatAi`] turns
//! every error into a fallback decision with confidence
//! [`FALLBACK_CONFIDENCE`], so a battle never stalls on the AI.
//!
//! [`play_duel`] runs a [`Duel`](mlbattle_engine::Duel) with a `CombatAi` on
//! each side.
//!
//! # Example
//!
//! ```
//! use mlbattle_ai::{AiLevel, CombatAi};
//! use mlbattle_engine::{Algorithm, CombatState, Fighter, FighterStats};
//!
//! let stats = FighterStats { attack: 80, defense: 80, speed: 80, accuracy: 90 };
//! let state = CombatState::new(
//!     Fighter::from_stats(Algorithm::RandomForest, stats),
//!     Fighter::from_stats(Algorithm::NeuralNetwork, stats),
//! );
//! let mut ai = CombatAi::new(AiLevel::Hard);
//! let decision = ai.select_move(&state);
//! assert!(state.ai_moves.contains(&decision.move_id));
//! assert!((0.6..=0.95).contains(&decision.confidence));
//! ```

pub use self::{
    combat_ai::*, decision::*, pattern::*, selector::{BattleView, MoveSelector}, session::*,
    tier::*,
};

mod combat_ai;
mod decision;
mod pattern;
mod selector;
mod session;
pub mod tables;
mod tier;
