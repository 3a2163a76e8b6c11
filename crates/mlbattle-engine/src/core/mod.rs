//! Static game data and fighter creation.
//!
//! - [`AlgorithmType`] and [`TYPE_CHART`] - type effectiveness table
//! - [`MoveId`] and [`MoveData`] - the move catalog
//! - [`Algorithm`] and [`AlgorithmConfig`] - per-algorithm baselines and flavor
//! - [`Fighter`] and [`create_fighter`] - battle-ready fighters

pub use self::{algorithm::*, algorithm_type::*, fighter::*, moves::*};

mod algorithm;
mod algorithm_type;
mod fighter;
mod moves;
