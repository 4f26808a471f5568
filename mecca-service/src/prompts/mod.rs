//! Prompt builders for specialists, the Editor-in-Chief synthesis and the
//! follow-up dialogue.
//!
//! Every builder is a pure function of its inputs. Two generations of prompt
//! text are kept side by side and picked with [`TemplateVersion`].

mod context;
mod enhanced;
mod natural;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::article::Article;
use crate::llm::Specialist;
use crate::models::{ReviewOptions, SpecialistResponses, WriterRole};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVersion {
    /// Paragraph-numbered article, short focus notes, plain synthesis
    #[serde(alias = "v1")]
    Natural,
    /// Organized feedback, marker-delimited synthesis, strict transparency
    #[default]
    #[serde(alias = "v2")]
    Enhanced,
}

impl FromStr for TemplateVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "natural" | "v1" => Ok(TemplateVersion::Natural),
            "enhanced" | "v2" => Ok(TemplateVersion::Enhanced),
            other => Err(format!(
                "unknown template version '{other}', expected 'natural' or 'enhanced'"
            )),
        }
    }
}

impl fmt::Display for TemplateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateVersion::Natural => f.write_str("natural"),
            TemplateVersion::Enhanced => f.write_str("enhanced"),
        }
    }
}

/// What the Editor-in-Chief needs to answer follow-up questions.
pub struct DialogueInputs<'a> {
    pub article: &'a Article,
    pub synthesis: &'a str,
    pub responses: &'a SpecialistResponses,
    pub options: &'a ReviewOptions,
}

pub struct PromptTemplate;

impl PromptTemplate {
    /// Review prompt for one specialist. The custom override, when given,
    /// comes first; the article body is embedded verbatim (paragraph-numbered
    /// under `Natural`).
    pub fn specialist(
        version: TemplateVersion,
        specialist: Specialist,
        article: &Article,
        options: &ReviewOptions,
    ) -> String {
        let role = options.writer_role();
        let mut sections: Vec<String> = Vec::new();
        sections.extend(context::override_block(options));

        let headline = context::headline_section(article.headline.as_deref());
        match version {
            TemplateVersion::Natural => {
                sections.push(natural::SPECIALIST_INTRO.to_string());
                sections.push(context::role_context(version, role));
                sections.push(context::editorial_context(options));
                sections.push(format!(
                    "{headline}ARTICLE TO REVIEW:\n{}",
                    article.numbered_paragraphs()
                ));
                sections.push(natural::REVIEW_INSTRUCTIONS.to_string());
                sections.push(natural::special_focus(specialist).to_string());
            }
            TemplateVersion::Enhanced => {
                sections.push(enhanced::SPECIALIST_INTRO.to_string());
                sections.push(context::role_context(version, role));
                sections.push(context::editorial_context(options));
                sections.push(enhanced::ORGANIZATION.to_string());
                sections.push(enhanced::VERIFICATION.to_string());
                sections.push(enhanced::specialization(specialist).to_string());
                sections.push(format!("{headline}ARTICLE TO REVIEW:\n{}", article.body));
                sections.push(enhanced::REQUIREMENTS.to_string());
            }
        }

        sections.join("\n\n")
    }

    /// Editor-in-Chief synthesis prompt. Every specialist's output is
    /// embedded verbatim; specialists without output get a placeholder line.
    pub fn synthesis(
        version: TemplateVersion,
        responses: &SpecialistResponses,
        options: &ReviewOptions,
    ) -> String {
        let role = options.writer_role();
        let mut sections: Vec<String> = Vec::new();
        sections.extend(context::override_block(options));

        sections.push(format!(
            "You are the Editor-in-Chief synthesizing feedback from our editorial team. {}",
            context::synthesis_guidance(version, role)
        ));
        sections.push(context::editorial_context(options));

        let mut team = String::from("EDITORIAL TEAM RESPONSES:");
        for specialist in [
            Specialist::Gpt,
            Specialist::Gemini,
            Specialist::Claude,
            Specialist::Perplexity,
        ] {
            let heading = match version {
                TemplateVersion::Natural => natural::section_heading(specialist),
                TemplateVersion::Enhanced => enhanced::section_heading(specialist),
            };
            let text = responses
                .get(&specialist)
                .cloned()
                .unwrap_or_else(|| specialist.missing_feedback_message());
            team.push_str(&format!("\n\n{heading}\n{text}"));
        }
        sections.push(team);

        sections.push(match version {
            TemplateVersion::Natural => natural::SYNTHESIS_INSTRUCTIONS.to_string(),
            TemplateVersion::Enhanced => enhanced::synthesis_instructions(),
        });

        sections.join("\n\n")
    }

    /// System prompt for one dialogue turn. It is rebuilt on every question
    /// from the session's stored state.
    pub fn dialogue_system(version: TemplateVersion, inputs: &DialogueInputs<'_>) -> String {
        let (intro, rules) = match version {
            TemplateVersion::Natural => (natural::DIALOGUE_INTRO, natural::DIALOGUE_RULES),
            TemplateVersion::Enhanced => (enhanced::DIALOGUE_INTRO, enhanced::DIALOGUE_RULES),
        };

        let mut specialists = String::from("SPECIALIST RESPONSES (for mandatory transparent reference):");
        for specialist in [Specialist::Gpt, Specialist::Gemini, Specialist::Perplexity] {
            let text = inputs
                .responses
                .get(&specialist)
                .map(String::as_str)
                .unwrap_or("Not available");
            specialists.push_str(&format!(
                "\n\n{}\n{}",
                enhanced::section_heading(specialist),
                text
            ));
        }
        if let Some(claude) = inputs.responses.get(&Specialist::Claude) {
            specialists.push_str(&format!(
                "\n\n{}\n{}",
                enhanced::section_heading(Specialist::Claude),
                claude
            ));
        }

        let role: WriterRole = inputs.options.writer_role();
        let session_context = format!(
            "CONTEXT:\n- Content Type: {}\n- Target Audience: {}\n- Writer Role: {}",
            inputs.options.content_type().unwrap_or("article"),
            inputs.options.target_audience().unwrap_or("general readers"),
            role.as_str(),
        );

        [
            intro.to_string(),
            format!("ORIGINAL ARTICLE:\n{}", inputs.article.display_text()),
            format!("YOUR PREVIOUS FEEDBACK:\n{}", inputs.synthesis),
            specialists,
            session_context,
            rules.to_string(),
        ]
        .join("\n\n")
    }

    pub fn display_name(version: TemplateVersion, specialist: Specialist) -> &'static str {
        match version {
            TemplateVersion::Natural => natural::display_name(specialist),
            TemplateVersion::Enhanced => enhanced::display_name(specialist),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "Jane Doe, 45, said the bridge collapsed Tuesday.\nCrews arrived at 9 a.m.";

    fn article() -> Article {
        Article::new(None, BODY)
    }

    #[test]
    fn specialist_prompt_embeds_article_verbatim_with_no_options() {
        for specialist in Specialist::ALL {
            let prompt = PromptTemplate::specialist(
                TemplateVersion::Enhanced,
                specialist,
                &article(),
                &ReviewOptions::default(),
            );
            assert!(prompt.contains(BODY));
            assert!(prompt.contains("CONTENT TYPE: Standard news article"));
        }
    }

    #[test]
    fn natural_prompt_numbers_paragraphs() {
        let prompt = PromptTemplate::specialist(
            TemplateVersion::Natural,
            Specialist::Gemini,
            &article(),
            &ReviewOptions::default(),
        );

        assert!(prompt.contains(
            "Paragraph 1: Jane Doe, 45, said the bridge collapsed Tuesday.\n\nParagraph 2: Crews arrived at 9 a.m."
        ));
        assert!(prompt.contains("SPECIAL FOCUS FOR YOUR REVIEW"));
    }

    #[test]
    fn custom_override_precedes_role_and_specialization() {
        let options = ReviewOptions {
            custom_context: Some("This is an opinion column; ignore AP style.".to_string()),
            writer_role: Some("Student journalist".to_string()),
            ..Default::default()
        };

        for version in [TemplateVersion::Natural, TemplateVersion::Enhanced] {
            let prompt =
                PromptTemplate::specialist(version, Specialist::Perplexity, &article(), &options);
            let override_at = prompt
                .find("This is an opinion column; ignore AP style.")
                .unwrap();
            let role_at = prompt.find("journalism student").unwrap();
            let intro_at = prompt.find("You are acting as a professional editor").unwrap();

            assert!(override_at < intro_at);
            assert!(override_at < role_at);
        }
    }

    #[test]
    fn perplexity_is_kept_to_fact_checking() {
        let prompt = PromptTemplate::specialist(
            TemplateVersion::Enhanced,
            Specialist::Perplexity,
            &article(),
            &ReviewOptions::default(),
        );
        assert!(prompt.contains("FACT-CHECKING ONLY"));
        assert!(!prompt.contains("TYPO HUNT"));
    }

    #[test]
    fn headline_is_evaluated_when_present() {
        let article = Article::new(Some("Bridge down".to_string()), BODY);
        let prompt = PromptTemplate::specialist(
            TemplateVersion::Enhanced,
            Specialist::Gpt,
            &article,
            &ReviewOptions::default(),
        );
        let headline_at = prompt.find("HEADLINE: Bridge down").unwrap();
        assert!(headline_at < prompt.find("ARTICLE TO REVIEW:").unwrap());
    }

    #[test]
    fn synthesis_embeds_outputs_and_pads_missing() {
        let mut responses = SpecialistResponses::new();
        responses.insert(Specialist::Gpt, "GPT says para 1 is weak.".to_string());
        responses.insert(Specialist::Perplexity, "❌ FALSE: Tuesday".to_string());

        let prompt = PromptTemplate::synthesis(
            TemplateVersion::Enhanced,
            &responses,
            &ReviewOptions::default(),
        );

        assert!(prompt.contains("GPT says para 1 is weak."));
        assert!(prompt.contains("❌ FALSE: Tuesday"));
        assert!(prompt.contains("No feedback provided from Gemini."));
        assert!(prompt.contains("No feedback provided from Claude."));
        assert!(prompt.contains("<!-- QUICK_FIXES_START -->"));
    }

    #[test]
    fn dialogue_prompt_carries_session_state() {
        let mut responses = SpecialistResponses::new();
        responses.insert(Specialist::Gemini, "Para 2: typo".to_string());
        let article = Article::new(Some("Bridge down".to_string()), BODY);
        let options = ReviewOptions::default();

        let prompt = PromptTemplate::dialogue_system(
            TemplateVersion::Enhanced,
            &DialogueInputs {
                article: &article,
                synthesis: "Fix the date.",
                responses: &responses,
                options: &options,
            },
        );

        assert!(prompt.contains("HEADLINE: Bridge down"));
        assert!(prompt.contains(BODY));
        assert!(prompt.contains("YOUR PREVIOUS FEEDBACK:\nFix the date."));
        assert!(prompt.contains("Para 2: typo"));
        assert!(prompt.contains("Not available"));
        assert!(prompt.contains("- Content Type: article"));
        assert!(prompt.contains("- Writer Role: professional"));
    }

    #[test]
    fn template_version_parses() {
        assert_eq!("v1".parse::<TemplateVersion>(), Ok(TemplateVersion::Natural));
        assert_eq!(
            " Enhanced ".parse::<TemplateVersion>(),
            Ok(TemplateVersion::Enhanced)
        );
        assert!("v3".parse::<TemplateVersion>().is_err());
    }
}
