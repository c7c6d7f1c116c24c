//! Combined roadmap report.

use crate::llm::GenerationResult;
use crate::locale::Locale;

/// The two provider outcomes of one aggregation, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapReport {
    pub primary: GenerationResult,
    pub supplementary: GenerationResult,
    locale: Locale,
}

impl RoadmapReport {
    pub fn new(locale: Locale, primary: GenerationResult, supplementary: GenerationResult) -> Self {
        Self {
            primary,
            supplementary,
            locale,
        }
    }

    /// Primary section body: the roadmap text, or the fallback.
    pub fn primary_text(&self) -> &str {
        self.primary
            .usable_text()
            .unwrap_or(self.locale.messages().primary_fallback)
    }

    /// Supplementary section body: the recommendations, or the fallback.
    pub fn supplementary_text(&self) -> &str {
        self.supplementary
            .usable_text()
            .unwrap_or(self.locale.messages().supplementary_fallback)
    }

    /// How many sections show fallback text.
    pub fn fallback_count(&self) -> usize {
        [&self.primary, &self.supplementary]
            .iter()
            .filter(|r| r.usable_text().is_none())
            .count()
    }

    /// Render the message sent to the user. Primary first, supplementary
    /// second, separated by a blank line.
    pub fn render(&self) -> String {
        let m = self.locale.messages();
        format!(
            "{}\n\n{}\n\n{}\n\n{}",
            m.primary_header,
            self.primary_text(),
            m.supplementary_header,
            self.supplementary_text()
        )
    }
}
