use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::article::Article;
use crate::llm::Specialist;
use crate::prompts::TemplateVersion;
use crate::synthesis::EditorialSynthesis;
use crate::transcript::DialogueTurn;
use crate::validator::ValidationFlag;

/// Specialist outputs keyed by specialist.
pub type SpecialistResponses = BTreeMap<Specialist, String>;

/// Review settings from the submission form. Every field is optional and
/// blank strings count as missing; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewOptions {
    pub writer_role: Option<String>,
    pub editorial_role: Option<String>,
    pub content_type: Option<String>,
    pub target_audience: Option<String>,
    pub process_stage: Option<String>,
    #[serde(alias = "category_focus")]
    pub category_emphasis: Option<String>,
    pub style_guide: Option<String>,
    pub target_length: Option<String>,
    #[serde(alias = "custom_override")]
    pub custom_context: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ReviewOptions {
    pub fn editorial_role(&self) -> Option<&str> {
        present(&self.editorial_role)
    }

    pub fn content_type(&self) -> Option<&str> {
        present(&self.content_type)
    }

    pub fn target_audience(&self) -> Option<&str> {
        present(&self.target_audience)
    }

    pub fn process_stage(&self) -> Option<&str> {
        present(&self.process_stage)
    }

    pub fn category_emphasis(&self) -> Option<&str> {
        present(&self.category_emphasis)
    }

    pub fn style_guide(&self) -> Option<&str> {
        present(&self.style_guide)
    }

    pub fn target_length(&self) -> Option<&str> {
        present(&self.target_length)
    }

    /// The override text exactly as submitted; blank counts as missing.
    pub fn custom_context(&self) -> Option<&str> {
        self.custom_context
            .as_deref()
            .filter(|v| !v.trim().is_empty())
    }

    pub fn writer_role(&self) -> WriterRole {
        present(&self.writer_role)
            .map(WriterRole::from_label)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterRole {
    Student,
    #[default]
    Professional,
    Other,
}

impl WriterRole {
    /// Accepts the short keys and the form labels; anything else is `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "student" | "student journalist" => WriterRole::Student,
            "professional" | "professional journalist" => WriterRole::Professional,
            _ => WriterRole::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WriterRole::Student => "student",
            WriterRole::Professional => "professional",
            WriterRole::Other => "other",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub headline: Option<String>,
    pub article: String,
    #[serde(default)]
    pub options: ReviewOptions,
    #[serde(default)]
    pub specialists: Option<Vec<Specialist>>,
    #[serde(default)]
    pub template_version: Option<TemplateVersion>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub session_id: String,
    pub status: String,
    pub synthesis: EditorialSynthesis,
    pub specialist_responses: SpecialistResponses,
    pub validation_flags: Vec<ValidationFlag>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub session_id: String,
    /// 1-based position of this exchange in the transcript
    pub turn: usize,
    /// Raw answer followed by any validation warnings
    pub answer: String,
    pub flags: Vec<ValidationFlag>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub models: Option<Vec<Specialist>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub timestamp: String,
    pub responses: SpecialistResponses,
}

/// Everything the service knows about one review session.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub current_task: String,
    pub status_message: Option<String>,
    pub review_complete: bool,
    pub template_version: Option<TemplateVersion>,
    pub article: Option<Article>,
    pub options: Option<ReviewOptions>,
    pub specialists: Vec<Specialist>,
    pub specialist_responses: SpecialistResponses,
    pub synthesis: Option<EditorialSynthesis>,
    pub transcript: Vec<DialogueTurn>,
    pub validation_history: Vec<ValidationFlag>,
}
