use serde::{Deserialize, Serialize};

use crate::llm::ChatMessage;
use crate::validator::ValidationFlag;

/// One follow-up exchange with the Editor-in-Chief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub question: String,
    /// The model's reply as returned, without warnings
    pub answer: String,
    pub flags: Vec<ValidationFlag>,
}

/// Append-only record of a session's dialogue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<DialogueTurn>,
}

impl Transcript {
    pub fn push(&mut self, turn: DialogueTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[DialogueTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&DialogueTurn> {
        self.turns.last()
    }

    /// Prior exchanges as alternating user/assistant messages, oldest first.
    /// Flags are not replayed.
    pub fn to_history(&self) -> Vec<ChatMessage> {
        self.turns
            .iter()
            .flat_map(|turn| {
                [
                    ChatMessage::user(turn.question.clone()),
                    ChatMessage::assistant(turn.answer.clone()),
                ]
            })
            .collect()
    }

    pub fn into_turns(self) -> Vec<DialogueTurn> {
        self.turns
    }
}
