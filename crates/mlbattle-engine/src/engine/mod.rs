//! Battle state and resolution.
//!
//! - [`RandomSource`] - injectable uniform draws ([`BattleRng`], [`ScriptedRandom`])
//! - [`battle`] - automatic battle between two fighters, capped at 50 rounds
//! - [`CombatState`] - move-based battle state consumed by decision engines
//! - [`Duel`] - turn-based move battle built on [`CombatState`]
//! - [`messages`] - narration helpers
//!
//! # Example
//!
//! ```
//! use mlbattle_engine::{BattleRng, BattleSeed, battle, create_fighter};
//!
//! let mut rng = BattleRng::with_seed(BattleSeed::from_bytes([42; 16]));
//! let a = create_fighter("Random Forest", None, &mut rng).unwrap();
//! let b = create_fighter("Neural Network", None, &mut rng).unwrap();
//!
//! let result = battle(&a, &b, &mut rng);
//! assert!(result.winner == a.name() || result.winner == b.name());
//! assert_eq!(a.health(), a.max_health());
//! ```

pub use self::{combat_state::*, duel::*, random::*, resolver::*};

mod combat_state;
mod duel;
pub mod messages;
mod random;
mod resolver;
