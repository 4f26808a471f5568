//! Model vendors behind one never-failing call path.

pub mod backend;
pub mod perplexity;
pub mod rig_backend;
pub mod team;

pub use backend::{ChatMessage, ChatRole, CompletionRequest, ModelBackend, invoke};
pub use perplexity::PerplexityBackend;
pub use rig_backend::RigBackend;
pub use team::EditorialTeam;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the models on the editorial team.
///
/// Claude doubles as the Editor-in-Chief; it only joins the specialist panel
/// when a review asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialist {
    #[serde(alias = "gpt-4", alias = "gpt-4o", alias = "GPT-4")]
    Gpt,
    #[serde(alias = "Gemini")]
    Gemini,
    #[serde(alias = "Perplexity")]
    Perplexity,
    #[serde(alias = "Claude")]
    Claude,
}

impl Specialist {
    pub const ALL: [Specialist; 4] = [
        Specialist::Gpt,
        Specialist::Gemini,
        Specialist::Perplexity,
        Specialist::Claude,
    ];

    /// Panel used when a review request does not pick specialists.
    pub const DEFAULT_PANEL: [Specialist; 3] =
        [Specialist::Gpt, Specialist::Gemini, Specialist::Perplexity];

    pub fn key(&self) -> &'static str {
        match self {
            Specialist::Gpt => "gpt",
            Specialist::Gemini => "gemini",
            Specialist::Perplexity => "perplexity",
            Specialist::Claude => "claude",
        }
    }

    /// Name used in error strings and prompt headings.
    pub fn vendor_label(&self) -> &'static str {
        match self {
            Specialist::Gpt => "GPT-4",
            Specialist::Gemini => "Gemini",
            Specialist::Perplexity => "Perplexity",
            Specialist::Claude => "Claude",
        }
    }

    /// Company whose API key the specialist needs.
    pub fn provider(&self) -> &'static str {
        match self {
            Specialist::Gpt => "OpenAI",
            Specialist::Gemini => "Google",
            Specialist::Perplexity => "Perplexity",
            Specialist::Claude => "Anthropic",
        }
    }

    pub fn not_configured_message(&self) -> String {
        format!("{} API key not configured", self.provider())
    }

    pub fn missing_feedback_message(&self) -> String {
        format!("No feedback provided from {}.", self.vendor_label())
    }
}

impl fmt::Display for Specialist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
