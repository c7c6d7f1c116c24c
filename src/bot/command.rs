//! Parses raw chat text into bot commands.

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Begin or restart the questionnaire.
    Start,
    /// Drop the current session.
    Cancel,
    Help,
    /// Anything else is an answer to the current question.
    Answer(String),
}

impl Command {
    pub fn parse(content: &str) -> Self {
        let trimmed = content.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Answer(content.to_string());
        };

        // Telegram appends the bot name in groups: `/start@RoadmapBot`.
        let word = rest
            .split_whitespace()
            .next()
            .unwrap_or("")
            .split('@')
            .next()
            .unwrap_or("")
            .to_lowercase();

        match word.as_str() {
            "start" | "restart" => Self::Start,
            "cancel" | "stop" => Self::Cancel,
            "help" => Self::Help,
            _ => Self::Answer(content.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("  /START  "), Command::Start);
        assert_eq!(Command::parse("/start@RoadmapBot"), Command::Start);
        assert_eq!(Command::parse("/cancel"), Command::Cancel);
        assert_eq!(Command::parse("/help"), Command::Help);
    }

    #[test]
    fn plain_text_is_answer() {
        assert_eq!(
            Command::parse("Engineer"),
            Command::Answer("Engineer".into())
        );
        assert_eq!(Command::parse(""), Command::Answer(String::new()));
    }

    #[test]
    fn unknown_slash_text_is_answer() {
        assert_eq!(
            Command::parse("/dev/null engineer"),
            Command::Answer("/dev/null engineer".into())
        );
        assert_eq!(Command::parse("/"), Command::Answer("/".into()));
    }

    #[test]
    fn answer_keeps_original_text() {
        assert_eq!(
            Command::parse("  Rust, Go  "),
            Command::Answer("  Rust, Go  ".into())
        );
    }
}
