//! ConversationEngine: walks a session through the questionnaire.

use std::sync::Arc;

use crate::error::ConversationError;
use crate::locale::Locale;

use super::prompts::question;
use super::session::{Session, SessionStore};
use super::state::{Answers, Field, Step};

/// What happens after an answer is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Ask the next field.
    NextQuestion { field: Field, prompt: &'static str },
    /// The last field was answered; `answers` holds all five.
    Complete { answers: Answers },
}

/// Drives the fixed question sequence and records answers.
///
/// Concurrent calls for the same session id must be serialized by the
/// caller (see `bot::SessionLocks`).
pub struct ConversationEngine {
    store: Arc<dyn SessionStore>,
    locale: Locale,
}

impl ConversationEngine {
    pub fn new(store: Arc<dyn SessionStore>, locale: Locale) -> Self {
        Self { store, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Begin (or restart) the questionnaire. Any previous session under the
    /// same id is overwritten. Returns the first question.
    pub async fn start(&self, session_id: &str) -> &'static str {
        let mut session = Session::new(session_id);
        session.step = Step::Awaiting(Field::FIRST);
        self.store.put(session).await;
        tracing::debug!(session = session_id, "Questionnaire started");
        question(self.locale, Field::FIRST)
    }

    /// Record an answer for the current field and advance.
    ///
    /// The text is trimmed; an empty answer is still accepted.
    pub async fn submit_answer(
        &self,
        session_id: &str,
        raw_text: &str,
    ) -> Result<AnswerOutcome, ConversationError> {
        let invalid = || ConversationError::InvalidState {
            session_id: session_id.to_string(),
        };

        let mut session = self.store.get(session_id).await.ok_or_else(invalid)?;
        let field = session.step.field().ok_or_else(invalid)?;

        session.answers.insert(field, raw_text.trim());
        session.step = session.step.next().ok_or_else(invalid)?;
        session.touch();

        let outcome = match session.step {
            Step::Awaiting(next) => AnswerOutcome::NextQuestion {
                field: next,
                prompt: question(self.locale, next),
            },
            _ => AnswerOutcome::Complete {
                answers: session.answers.clone(),
            },
        };

        tracing::debug!(
            session = session_id,
            answered = %field,
            step = %session.step,
            "Answer recorded"
        );
        self.store.put(session).await;
        Ok(outcome)
    }

    /// Drop the session entirely.
    pub async fn reset(&self, session_id: &str) {
        self.store.remove(session_id).await;
    }

    pub async fn current_step(&self, session_id: &str) -> Step {
        self.store
            .get(session_id)
            .await
            .map(|s| s.step)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::prompts::field_specs;
    use crate::conversation::session::InMemorySessionStore;

    fn engine() -> ConversationEngine {
        ConversationEngine::new(Arc::new(InMemorySessionStore::new()), Locale::En)
    }

    #[tokio::test]
    async fn full_walk_collects_five_fields_in_order() {
        let engine = engine();
        let first = engine.start("u1").await;
        assert_eq!(first, field_specs(Locale::En)[0].prompt);

        let inputs = ["Engineer", "5 years", "Become a lead", "Rust, SQL", "Remote"];
        for (i, input) in inputs.iter().enumerate() {
            let outcome = engine.submit_answer("u1", input).await.unwrap();
            match outcome {
                AnswerOutcome::NextQuestion { field, prompt } => {
                    assert_eq!(field, Field::ALL[i + 1]);
                    assert_eq!(prompt, field_specs(Locale::En)[i + 1].prompt);
                }
                AnswerOutcome::Complete { answers } => {
                    assert_eq!(i, 4, "completed early");
                    assert!(answers.is_complete());
                    assert_eq!(answers.get(Field::Profession), Some("Engineer"));
                    assert_eq!(answers.get(Field::Experience), Some("5 years"));
                    assert_eq!(answers.get(Field::Preferences), Some("Remote"));
                }
            }
        }
        assert_eq!(engine.current_step("u1").await, Step::Complete);
    }

    #[tokio::test]
    async fn sixth_answer_is_invalid_state() {
        let engine = engine();
        engine.start("u1").await;
        for _ in 0..5 {
            engine.submit_answer("u1", "x").await.unwrap();
        }
        let err = engine.submit_answer("u1", "extra").await.unwrap_err();
        assert_eq!(
            err,
            ConversationError::InvalidState {
                session_id: "u1".into()
            }
        );
    }

    #[tokio::test]
    async fn answer_without_start_is_invalid_state() {
        let engine = engine();
        assert!(matches!(
            engine.submit_answer("ghost", "hello").await,
            Err(ConversationError::InvalidState { .. })
        ));
        assert_eq!(engine.current_step("ghost").await, Step::NotStarted);
    }

    #[tokio::test]
    async fn answers_are_trimmed_and_empty_is_accepted() {
        let engine = engine();
        engine.start("u1").await;
        engine.submit_answer("u1", "  Engineer\n").await.unwrap();
        engine.submit_answer("u1", "   ").await.unwrap();
        for _ in 0..3 {
            engine.submit_answer("u1", "x").await.unwrap();
        }
        let session_answers = match engine.current_step("u1").await {
            Step::Complete => engine.store.get("u1").await.unwrap().answers,
            other => panic!("unexpected step {other}"),
        };
        assert_eq!(session_answers.get(Field::Profession), Some("Engineer"));
        assert_eq!(session_answers.get(Field::Experience), Some(""));
    }

    #[tokio::test]
    async fn content_never_changes_the_order() {
        let engine = engine();
        engine.start("u1").await;
        let tricky = ["/start", "preferences", "", "skip", "goals"];
        let mut seen = vec![Field::FIRST];
        for input in tricky {
            if let AnswerOutcome::NextQuestion { field, .. } =
                engine.submit_answer("u1", input).await.unwrap()
            {
                seen.push(field);
            }
        }
        assert_eq!(seen, Field::ALL);
    }

    #[tokio::test]
    async fn start_overwrites_previous_session() {
        let engine = engine();
        engine.start("u1").await;
        engine.submit_answer("u1", "Engineer").await.unwrap();
        engine.submit_answer("u1", "5 years").await.unwrap();

        engine.start("u1").await;
        assert_eq!(
            engine.current_step("u1").await,
            Step::Awaiting(Field::Profession)
        );
        assert!(engine.store.get("u1").await.unwrap().answers.is_empty());
    }

    #[tokio::test]
    async fn answers_hold_only_fields_before_current_step() {
        let engine = engine();
        engine.start("u1").await;
        engine.submit_answer("u1", "a").await.unwrap();
        engine.submit_answer("u1", "b").await.unwrap();

        let session = engine.store.get("u1").await.unwrap();
        assert_eq!(session.step, Step::Awaiting(Field::Goals));
        let keys: Vec<Field> = session.answers.iter().map(|(f, _)| f).collect();
        assert_eq!(keys, vec![Field::Profession, Field::Experience]);
    }

    #[tokio::test]
    async fn reset_removes_session() {
        let engine = engine();
        engine.start("u1").await;
        engine.reset("u1").await;
        assert!(engine.submit_answer("u1", "x").await.is_err());
    }

    #[tokio::test]
    async fn sessions_do_not_leak_between_ids() {
        let engine = engine();
        engine.start("a").await;
        engine.start("b").await;
        engine.submit_answer("a", "Pilot").await.unwrap();

        assert_eq!(engine.current_step("a").await, Step::Awaiting(Field::Experience));
        assert_eq!(engine.current_step("b").await, Step::Awaiting(Field::Profession));
    }
}
