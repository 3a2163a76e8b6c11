use chrono::{DateTime, Utc};
use mlbattle_ai::{AiLevel, DuelReport};
use mlbattle_engine::{BattleResult, BattleSeed, Fighter};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BattleRecord {
    pub seed: BattleSeed,
    pub generated_at: DateTime<Utc>,
    pub first: Fighter,
    pub second: Fighter,
    pub result: BattleResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuelRecord {
    pub seed: BattleSeed,
    pub generated_at: DateTime<Utc>,
    pub player_level: AiLevel,
    pub ai_level: AiLevel,
    pub report: DuelReport,
}
