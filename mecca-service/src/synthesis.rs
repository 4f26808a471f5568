use serde::{Deserialize, Serialize};

pub const QUICK_FIXES_START: &str = "<!-- QUICK_FIXES_START -->";
pub const QUICK_FIXES_END: &str = "<!-- QUICK_FIXES_END -->";
pub const FULL_ANALYSIS_START: &str = "<!-- FULL_ANALYSIS_START -->";
pub const FULL_ANALYSIS_END: &str = "<!-- FULL_ANALYSIS_END -->";

const QUICK_FIXES_HEADING: &str = "🎯 QUICK FIXES NEEDED";
const SECTION_STOPS: [&str; 2] = ["EDITORIAL SUMMARY", "PRIORITY ACTION LIST"];

/// The Editor-in-Chief's reply, split into its two display sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorialSynthesis {
    pub raw: String,
    pub quick_fixes: String,
    pub full_analysis: String,
}

impl EditorialSynthesis {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let quick_fixes = between(&raw, QUICK_FIXES_START, QUICK_FIXES_END)
            .map(str::to_string)
            .or_else(|| quick_fixes_by_heading(&raw))
            .unwrap_or_default();
        let full_analysis = between(&raw, FULL_ANALYSIS_START, FULL_ANALYSIS_END)
            .map(str::to_string)
            .unwrap_or_else(|| raw.trim().to_string());

        Self {
            raw,
            quick_fixes,
            full_analysis,
        }
    }
}

fn between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = text.find(start)? + start.len();
    let to = text[from..].find(end)? + from;
    Some(text[from..to].trim())
}

/// Lines from the quick-fix heading up to the next line that starts with a
/// summary heading.
fn quick_fixes_by_heading(text: &str) -> Option<String> {
    let mut lines = text.lines().skip_while(|line| !line.contains(QUICK_FIXES_HEADING));
    let first = lines.next()?;

    let section: Vec<&str> = std::iter::once(first)
        .chain(lines.take_while(|line| {
            !SECTION_STOPS.iter().any(|stop| line.starts_with(stop))
        }))
        .collect();

    Some(section.join("\n").trim().to_string())
}
