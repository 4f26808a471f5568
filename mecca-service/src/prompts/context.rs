//! Context blocks shared by every prompt: writer role, editorial options,
//! the custom override and the headline.

use super::TemplateVersion;
use crate::models::{ReviewOptions, WriterRole};

const RULE: &str = "==================================================";

pub(crate) const DEFAULT_CONTENT_TYPE: &str = "Standard news article";
pub(crate) const DEFAULT_AUDIENCE: &str = "General readers";
const DEFAULT_STAGE: &str = "Draft review";
const DEFAULT_STYLE_GUIDE: &str = "AP";

pub(crate) fn role_context(version: TemplateVersion, role: WriterRole) -> String {
    match role {
        WriterRole::Student => {
            let mut text = String::from(
                "The writer is a journalism student learning the craft. Provide educational explanations \
and teaching moments. Explain WHY things need to be changed, not just WHAT needs changing. \
Use a supportive, instructional tone that helps them understand journalistic principles.",
            );
            if version == TemplateVersion::Enhanced {
                text.push_str(
                    "\n\nIMPORTANT: Always identify 1-2 specific strengths in the writing to encourage the student's development.",
                );
            }
            text
        }
        WriterRole::Professional => "The writer is a professional journalist. Provide concise, direct feedback focused on \
industry standards and efficiency. Flag issues clearly and prioritize based on potential \
impact to credibility and publication standards."
            .to_string(),
        WriterRole::Other => "The writer may have varying experience levels. Provide balanced feedback with helpful \
explanations while remaining concise. Focus on clarity, accuracy, and effective communication."
            .to_string(),
    }
}

/// One-line steer for the Editor-in-Chief's synthesis.
pub(crate) fn synthesis_guidance(version: TemplateVersion, role: WriterRole) -> &'static str {
    match (version, role) {
        (TemplateVersion::Natural, WriterRole::Student) => {
            "Focus on learning opportunities and educational explanations."
        }
        (TemplateVersion::Enhanced, WriterRole::Student) => {
            "Focus on learning opportunities and educational explanations. Include encouragement about what the student is doing well."
        }
        (TemplateVersion::Natural, WriterRole::Professional) => {
            "Focus on efficiency and industry standards."
        }
        (TemplateVersion::Enhanced, WriterRole::Professional) => {
            "Focus on efficiency and industry standards with direct, actionable priorities."
        }
        (_, WriterRole::Other) => "Balance detail with clarity for a general audience.",
    }
}

/// The framed custom-context block, when the writer supplied one.
pub(crate) fn override_block(options: &ReviewOptions) -> Option<String> {
    options.custom_context().map(|custom| {
        format!(
            "{RULE}\n🚨 CRITICAL CONTEXT OVERRIDE - TOP PRIORITY:\n{custom}\n\
CRITICAL: This custom context overrides default role boundaries and editorial approaches. Follow these specific instructions first.\n{RULE}"
        )
    })
}

/// Option lines, each followed by the guidance sentence for recognized values.
pub(crate) fn editorial_context(options: &ReviewOptions) -> String {
    let mut lines = Vec::new();

    let content_type = options.content_type().unwrap_or(DEFAULT_CONTENT_TYPE);
    lines.push(format!("CONTENT TYPE: {content_type}"));
    lines.extend(content_type_note(content_type).map(str::to_string));

    let audience = options.target_audience().unwrap_or(DEFAULT_AUDIENCE);
    lines.push(format!("TARGET AUDIENCE: {audience}"));
    lines.extend(audience_note(audience).map(str::to_string));

    let stage = options.process_stage().unwrap_or(DEFAULT_STAGE);
    lines.push(format!("PROCESS STAGE: {stage}"));
    lines.extend(stage_note(stage).map(str::to_string));

    if let Some(focus) = options
        .category_emphasis()
        .filter(|f| !f.to_lowercase().starts_with("comprehensive"))
    {
        lines.push(format!("FOCUS AREA: {focus}"));
        lines.extend(focus_note(focus).map(str::to_string));
    }

    let style_guide = options.style_guide().unwrap_or(DEFAULT_STYLE_GUIDE);
    lines.push(format!("STYLE GUIDE: {style_guide}"));
    lines.extend(style_guide_note(style_guide).map(str::to_string));

    if let Some(length) = options.target_length() {
        lines.push(format!("TARGET LENGTH: {length}"));
        lines.push(
            "Consider whether the current length serves the content well and suggest adjustments if needed."
                .to_string(),
        );
    }

    if let Some(role) = options.editorial_role() {
        lines.push(format!("EDITORIAL APPROACH: {role}"));
        lines.extend(editorial_role_note(role).map(str::to_string));
    }

    lines.join("\n")
}

pub(crate) fn headline_section(headline: Option<&str>) -> String {
    match headline {
        Some(headline) => format!(
            "HEADLINE: {headline}\n\n\
Please also evaluate the headline for:\n\
- Accuracy and clarity\n\
- Appropriate tone for the content type\n\
- Effectiveness in attracting target audience\n\
- Length and style guide compliance\n\n"
        ),
        None => String::new(),
    }
}

fn content_type_note(value: &str) -> Option<&'static str> {
    match value {
        "Investigation" => Some(
            "Focus on fact-checking, sourcing, and verification standards appropriate for investigative journalism.",
        ),
        "Feature" => Some(
            "Consider narrative flow, character development, and engaging storytelling alongside factual accuracy.",
        ),
        "Essay" => Some(
            "Evaluate argument structure, evidence quality, and persuasive writing techniques.",
        ),
        "Review" => Some("Assess balance, expertise demonstration, and fair evaluation criteria."),
        "Standard news article" | "News Article" => Some(
            "Apply standard news writing principles: lead, supporting facts, balanced reporting, and clear attribution.",
        ),
        _ => None,
    }
}

fn audience_note(value: &str) -> Option<&'static str> {
    match value {
        "Specialists" | "Subject specialists" => {
            Some("Readers will have domain expertise. Technical accuracy and depth are crucial.")
        }
        "Students" => Some("Educational clarity and accessible explanations are important."),
        "General readers" => Some(
            "Clear explanations of technical concepts and accessible language are essential.",
        ),
        _ => None,
    }
}

fn stage_note(value: &str) -> Option<&'static str> {
    match value {
        "Fact-check focus" => Some(
            "Prioritize verification of factual claims, sourcing, and accuracy over style issues.",
        ),
        "Polish/copy edit" => {
            Some("Focus on grammar, style, clarity, and final publication readiness.")
        }
        "Draft review" => Some(
            "Address both structural and detailed issues appropriate for comprehensive revision.",
        ),
        _ => None,
    }
}

fn focus_note(value: &str) -> Option<&'static str> {
    match value {
        "Fact-checking heavy" => {
            Some("Emphasize verification, sourcing, and factual accuracy above other concerns.")
        }
        "Style focus" => {
            Some("Emphasize writing quality, clarity, tone, and adherence to style guidelines.")
        }
        "Structure focus" => {
            Some("Emphasize organization, flow, narrative structure, and logical development.")
        }
        _ => None,
    }
}

fn style_guide_note(value: &str) -> Option<&'static str> {
    match value {
        "AP" => Some("Follow Associated Press style for journalism standards."),
        "Chicago" => Some("Follow Chicago Manual of Style guidelines."),
        "APA" => Some("Follow APA style guidelines appropriate for academic writing."),
        "MLA" => Some("Follow MLA style guidelines for humanities writing."),
        _ => None,
    }
}

fn editorial_role_note(value: &str) -> Option<&'static str> {
    match value {
        "Writing Coach" => {
            Some("Adopt a mentoring perspective focused on skill development and improvement.")
        }
        "Copy Editor" => Some("Focus on grammar, style, accuracy, and publication readiness."),
        "News Desk Editor" => Some(
            "Apply newsroom standards with focus on speed, accuracy, and reader engagement.",
        ),
        "Feature Editor" => {
            Some("Emphasize storytelling, narrative flow, and feature-specific techniques.")
        }
        "Fact-Checker Focus" => Some("Prioritize verification and sourcing above all other concerns."),
        "Style Editor" => Some("Focus primarily on voice, tone, and stylistic consistency."),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_options() {
        let context = editorial_context(&ReviewOptions::default());

        assert!(context.contains("CONTENT TYPE: Standard news article"));
        assert!(context.contains("TARGET AUDIENCE: General readers"));
        assert!(context.contains("PROCESS STAGE: Draft review"));
        assert!(context.contains("STYLE GUIDE: AP"));
        assert!(!context.contains("FOCUS AREA"));
        assert!(!context.contains("EDITORIAL APPROACH"));
    }

    #[test]
    fn recognized_values_add_guidance() {
        let options = ReviewOptions {
            content_type: Some("Investigation".to_string()),
            category_emphasis: Some("Structure focus".to_string()),
            editorial_role: Some("Copy Editor".to_string()),
            target_length: Some("800 words".to_string()),
            ..Default::default()
        };
        let context = editorial_context(&options);

        assert!(context.contains("investigative journalism"));
        assert!(context.contains("FOCUS AREA: Structure focus"));
        assert!(context.contains("EDITORIAL APPROACH: Copy Editor"));
        assert!(context.contains("TARGET LENGTH: 800 words"));
    }

    #[test]
    fn unrecognized_values_are_echoed_without_guidance() {
        let options = ReviewOptions {
            style_guide: Some("House".to_string()),
            ..Default::default()
        };
        let context = editorial_context(&options);

        assert!(context.contains("STYLE GUIDE: House"));
        assert!(!context.contains("Follow"));
    }

    #[test]
    fn override_block_only_when_present() {
        assert!(override_block(&ReviewOptions::default()).is_none());

        let options = ReviewOptions {
            custom_context: Some("Treat this as satire.".to_string()),
            ..Default::default()
        };
        let block = override_block(&options).unwrap();
        assert!(block.contains("CRITICAL CONTEXT OVERRIDE"));
        assert!(block.contains("Treat this as satire."));
    }

    #[test]
    fn override_text_keeps_surrounding_whitespace() {
        let custom = "\n  Wire copy: keep the dateline.  \n";
        let options = ReviewOptions {
            custom_context: Some(custom.to_string()),
            ..Default::default()
        };
        assert!(override_block(&options).unwrap().contains(custom));

        let blank = ReviewOptions {
            custom_context: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(override_block(&blank).is_none());
    }
}
