use serde::{Deserialize, Serialize};

/// Article under review. The body is kept exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub headline: Option<String>,
    pub body: String,
}

impl Article {
    /// A blank headline is treated as no headline.
    pub fn new(headline: Option<String>, body: impl Into<String>) -> Self {
        Self {
            headline: headline.filter(|h| !h.trim().is_empty()),
            body: body.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Non-blank lines as `Paragraph N: ...`, separated by blank lines.
    pub fn numbered_paragraphs(&self) -> String {
        if self.is_empty() {
            return self.body.clone();
        }
        self.body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(i, line)| format!("Paragraph {}: {}", i + 1, line))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Headline and body as shown to the Editor-in-Chief during dialogue.
    pub fn display_text(&self) -> String {
        match &self.headline {
            Some(headline) => format!("HEADLINE: {}\n\n{}", headline, self.body),
            None => self.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_non_blank_lines() {
        let article = Article::new(None, "First para.\n\n  \nSecond para.\nThird.");
        assert_eq!(
            article.numbered_paragraphs(),
            "Paragraph 1: First para.\n\nParagraph 2: Second para.\n\nParagraph 3: Third."
        );
    }

    #[test]
    fn display_text_includes_headline() {
        let article = Article::new(Some("Bridge falls".to_string()), "Body.");
        assert_eq!(article.display_text(), "HEADLINE: Bridge falls\n\nBody.");

        let bare = Article::new(Some("   ".to_string()), "Body.");
        assert_eq!(bare.headline, None);
        assert_eq!(bare.display_text(), "Body.");
    }
}
