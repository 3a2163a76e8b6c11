//! Narration and educational captions for battle events.
//!
//! Every function is a pure mapping from an event to a [`CombatMessage`].

use serde::Serialize;

use crate::core::MoveId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Attack,
    Miss,
    Critical,
    SuperEffective,
    NotEffective,
    Status,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatMessage {
    pub message: String,
    pub educational: Option<String>,
    pub kind: MessageKind,
}

impl CombatMessage {
    fn info(message: String, educational: Option<String>) -> Self {
        Self {
            message,
            educational,
            kind: MessageKind::Info,
        }
    }
}

/// Narrates one attack.
///
/// Effectiveness above 1.2 is reported as super effective and below 0.9 as
/// not very effective; either overrides the critical-hit caption.
#[must_use]
pub fn attack_message(
    attacker: &str,
    move_name: &str,
    damage: u32,
    effectiveness: f64,
    critical: bool,
    missed: bool,
) -> CombatMessage {
    if missed {
        return CombatMessage {
            message: format!("{attacker}'s {move_name} missed!"),
            educational: Some(
                "In ML, this represents poor model accuracy - the algorithm failed to make a correct prediction."
                    .to_owned(),
            ),
            kind: MessageKind::Miss,
        };
    }

    let mut message = format!("{attacker} uses {move_name}!");
    let mut educational = None;
    let mut kind = MessageKind::Attack;

    if critical {
        message.push_str(" Critical hit!");
        educational = Some(
            "Critical hits represent when an algorithm performs exceptionally well, like finding optimal hyperparameters.",
        );
        kind = MessageKind::Critical;
    }
    if effectiveness > 1.2 {
        message.push_str(" It's super effective!");
        educational = Some(
            "Super effectiveness shows when an algorithm is well-suited for the problem type - like using neural networks for image recognition.",
        );
        kind = MessageKind::SuperEffective;
    } else if effectiveness < 0.9 {
        message.push_str(" It's not very effective...");
        educational = Some(
            "Poor effectiveness happens when an algorithm doesn't match the problem - like using linear regression for complex non-linear data.",
        );
        kind = MessageKind::NotEffective;
    }
    message.push_str(&format!(" Deals {damage} damage!"));

    CombatMessage {
        message,
        educational: educational.map(str::to_owned),
        kind,
    }
}

/// Narrates a status move, which deals no damage.
#[must_use]
pub fn status_message(user: &str, id: MoveId) -> CombatMessage {
    let data = id.data();
    let mut message = format!("{user} uses {}!", data.name);
    if let Some(effect) = data.effect {
        message.push_str(&format!(" {effect}."));
    }
    CombatMessage {
        message,
        educational: Some(data.educational_note.to_owned()),
        kind: MessageKind::Status,
    }
}

/// Explains what a move does in ML terms.
#[must_use]
pub fn move_explanation(id: MoveId) -> CombatMessage {
    let curated = match id {
        MoveId::BootstrapAssault => Some((
            "Creates multiple training datasets through resampling!",
            "Bootstrap sampling creates multiple datasets by sampling with replacement, allowing Random Forest to train diverse trees.",
        )),
        MoveId::GradientDescent => Some((
            "Iteratively optimizing towards the global minimum!",
            "Gradient descent follows the steepest slope to minimize the loss function, finding optimal model parameters.",
        )),
        MoveId::KernelTrick => Some((
            "Transforming data to higher dimensions for better separation!",
            "The kernel trick allows SVM to find non-linear decision boundaries by mapping data to higher-dimensional spaces.",
        )),
        MoveId::PriorStrike => Some((
            "Using historical class probabilities for prediction!",
            "Prior probabilities represent the base rates of each class before considering any features.",
        )),
        MoveId::WeakLearnerSwarm => Some((
            "Combining many simple models for collective strength!",
            "Gradient boosting uses many weak learners (like decision stumps) that together form a strong predictor.",
        )),
        MoveId::CentroidShift => Some((
            "Repositioning cluster centers for optimal grouping!",
            "K-means updates centroids to the mean position of assigned points, iteratively improving cluster quality.",
        )),
        _ => None,
    };
    let name = id.name();
    let (message, educational) = match curated {
        Some((message, educational)) => (message.to_owned(), educational.to_owned()),
        None => (
            format!("{name} is executed with precision!"),
            format!("{name} represents a core concept in machine learning algorithms."),
        ),
    };
    CombatMessage::info(message, Some(educational))
}

#[must_use]
pub fn turn_start_message(player: &str, ai: &str, player_turn: bool, turn: u32) -> CombatMessage {
    let current = if player_turn { player } else { ai };
    if turn == 1 {
        return CombatMessage::info(
            format!("⚔️ Battle begins! {current} goes first!"),
            Some(
                "In ML competitions, the order of algorithm evaluation can sometimes affect results due to computational resources or data ordering."
                    .to_owned(),
            ),
        );
    }
    CombatMessage::info(format!("Turn {turn}: {current}'s move!"), None)
}

/// Warns about remaining uses of a move.
#[must_use]
pub fn pp_warning(move_name: &str, remaining: u32) -> CombatMessage {
    match remaining {
        0 => CombatMessage::info(
            format!("{move_name} has no PP left! Cannot use this move!"),
            Some(
                "In ML, this represents computational resource exhaustion - the algorithm has reached its processing limit."
                    .to_owned(),
            ),
        ),
        1..=2 => CombatMessage::info(
            format!("{move_name} is running low! Only {remaining} uses remaining!"),
            Some(
                "Resource management is crucial in ML - algorithms must balance accuracy with computational efficiency."
                    .to_owned(),
            ),
        ),
        _ => CombatMessage::info(format!("{move_name} has {remaining} uses remaining."), None),
    }
}

#[must_use]
pub fn end_battle_message(winner: &str, loser: &str) -> CombatMessage {
    CombatMessage::info(
        format!("🏆 {winner} wins the battle! {loser} has been defeated!"),
        Some(
            "The winning algorithm demonstrated superior performance on this dataset. In real ML, model selection depends on problem type, data size, and computational constraints."
                .to_owned(),
        ),
    )
}

#[must_use]
pub fn confidence_text(confidence: f64) -> &'static str {
    if confidence > 0.8 {
        "very confident"
    } else if confidence > 0.5 {
        "moderately confident"
    } else {
        "uncertain"
    }
}

/// Narrates a decision engine's reasoning.
#[must_use]
pub fn ai_reasoning_message(ai: &str, reasoning: &str, confidence: f64) -> CombatMessage {
    CombatMessage::info(
        format!("🤖 {ai} is {}: \"{reasoning}\"", confidence_text(confidence)),
        Some(
            "AI decision-making in ML involves evaluating multiple factors like data patterns, computational cost, and expected performance."
                .to_owned(),
        ),
    )
}
