//! Core rules of the ML algorithm battle game.
//!
//! Fighters are machine-learning algorithms whose combat stats come from
//! baseline values or from model evaluation metrics. Two kinds of battle are
//! supported:
//!
//! - automatic battles ([`battle`]), where each fighter picks between a basic
//!   attack, a combo or its special move at random,
//! - duels ([`Duel`]), where both sides spend PP on catalog moves chosen by a
//!   player or a decision engine.
//!
//! All randomness goes through [`RandomSource`], so every battle can be
//! replayed from a [`BattleSeed`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
