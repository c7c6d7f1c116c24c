//! User-facing text, per locale.
//!
//! Field prompts live in `conversation::prompts`, generation prompts in
//! `llm::prompt`. Everything here is what the bot itself says.

use serde::{Deserialize, Serialize};

/// Language the bot talks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    /// Parse a locale tag such as `en`, `ru` or `ru-RU`.
    pub fn parse(tag: &str) -> Option<Self> {
        let lang = tag.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Self::En),
            "ru" => Some(Self::Ru),
            _ => None,
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Self::En => &EN,
            Self::Ru => &RU,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::En => f.write_str("en"),
            Self::Ru => f.write_str("ru"),
        }
    }
}

/// Fixed bot messages and report labels for one locale.
#[derive(Debug)]
pub struct Messages {
    pub welcome: &'static str,
    pub help: &'static str,
    pub analyzing: &'static str,
    pub done: &'static str,
    pub apology: &'static str,
    pub restart_hint: &'static str,
    pub cancelled: &'static str,
    pub primary_header: &'static str,
    pub supplementary_header: &'static str,
    pub primary_fallback: &'static str,
    pub supplementary_fallback: &'static str,
}

static EN: Messages = Messages {
    welcome: "🌟 Welcome to CareerRoadmapBot!\n\
              I will help you build a personalized career development plan.\n\
              Answer a few questions to get started:",
    help: "Send /start to build a new roadmap, /cancel to drop the current one.",
    analyzing: "🔍 Analyzing your answers... This takes 1-2 minutes",
    done: "✅ Done! Send /start to begin again",
    apology: "⚠️ Something went wrong while generating the roadmap",
    restart_hint: "Send /start to begin building your roadmap.",
    cancelled: "Cancelled. Send /start whenever you want to try again.",
    primary_header: "🚀 *Main roadmap from YandexGPT:*",
    supplementary_header: "🔍 *Additional recommendations from Llama-3:*",
    primary_fallback: "Could not get the main roadmap",
    supplementary_fallback: "Could not get additional recommendations",
};

static RU: Messages = Messages {
    welcome: "🌟 Добро пожаловать в CareerRoadmapBot!\n\
              Я помогу составить персонализированный карьерный план развития.\n\
              Ответьте на несколько вопросов для начала:",
    help: "Отправьте /start, чтобы составить новый роадмап, /cancel — чтобы прервать текущий.",
    analyzing: "🔍 Анализирую данные... Это займет 1-2 минуты",
    done: "✅ Готово! Можете начать заново с /start",
    apology: "⚠️ Произошла ошибка при генерации роадмапа",
    restart_hint: "Отправьте /start, чтобы начать составление роадмапа.",
    cancelled: "Отменено. Отправьте /start, чтобы начать заново.",
    primary_header: "🚀 *Основной роадмап от YandexGPT:*",
    supplementary_header: "🔍 *Дополнительные рекомендации от Llama-3:*",
    primary_fallback: "Не удалось получить основной роадмап",
    supplementary_fallback: "Не удалось получить дополнительные рекомендации",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_region_suffix() {
        assert_eq!(Locale::parse("en"), Some(Locale::En));
        assert_eq!(Locale::parse("RU"), Some(Locale::Ru));
        assert_eq!(Locale::parse("ru-RU"), Some(Locale::Ru));
        assert_eq!(Locale::parse(" en_US "), Some(Locale::En));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(Locale::parse("de"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn fallbacks_differ_per_section() {
        for locale in [Locale::En, Locale::Ru] {
            let m = locale.messages();
            assert_ne!(m.primary_fallback, m.supplementary_fallback);
            assert_ne!(m.primary_header, m.supplementary_header);
        }
    }
}
