use crate::llm::Specialist;

pub mod session_keys {
    pub const ARTICLE: &str = "article";
    pub const OPTIONS: &str = "options";
    pub const TEMPLATE_VERSION: &str = "template_version";
    pub const SELECTED_SPECIALISTS: &str = "selected_specialists";
    pub const SPECIALIST_RESPONSES: &str = "specialist_responses";
    pub const SYNTHESIS: &str = "synthesis";
    pub const SYNTHESIS_FLAGS: &str = "synthesis_flags";
    pub const REVIEW_COMPLETE: &str = "review_complete";
    pub const PENDING_QUESTION: &str = "pending_question";
    pub const TRANSCRIPT: &str = "transcript";
    pub const VALIDATION_HISTORY: &str = "validation_history";
}

/// Context key holding one specialist's raw output while the panel runs.
pub fn specialist_response_key(specialist: Specialist) -> String {
    format!("specialist_response.{}", specialist.key())
}
