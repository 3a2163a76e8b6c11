//! Difficulty tiers.
//!
//! | tier     | selection                         | confidence     |
//! |----------|-----------------------------------|----------------|
//! | [`Easy`] | noisy weighted pick               | `[0.1, 0.5)`   |
//! | [`Normal`] | greedy score over the current state | `[0.4, 0.85]` |
//! | [`Hard`] | greedy score with prediction, synergy and resource terms | `[0.6, 0.95]` |

pub use self::{easy::Easy, hard::Hard, normal::Normal};

mod easy;
mod hard;
mod normal;

#[cfg(test)]
pub(crate) mod test_util {
    use mlbattle_engine::{Algorithm, CombatState, Fighter, FighterStats};

    pub(crate) fn fighter(algorithm: Algorithm) -> Fighter {
        let stats = FighterStats {
            attack: 90,
            defense: 90,
            speed: 90,
            accuracy: 90,
        };
        Fighter::from_stats(algorithm, stats)
    }

    /// Opening state with both fighters at the given current health (max 90).
    pub(crate) fn state(
        player: Algorithm,
        player_health: u32,
        ai: Algorithm,
        ai_health: u32,
    ) -> CombatState {
        CombatState::new(
            fighter(player).with_health(player_health),
            fighter(ai).with_health(ai_health),
        )
    }
}
