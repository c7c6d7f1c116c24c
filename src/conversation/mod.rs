//! Conversation: the fixed five-question dialogue that collects a profile.
//!
//! A session starts with `/start`, asks each field in `Field::ALL` order and
//! ends in `Step::Complete` holding every answer. The bot then hands the
//! answers to the roadmap aggregator and resets the session.

pub mod engine;
pub mod prompts;
pub mod session;
pub mod state;

pub use engine::{AnswerOutcome, ConversationEngine};
pub use prompts::{FieldSpec, field_specs, question};
pub use session::{InMemorySessionStore, Session, SessionStore};
pub use state::{Answers, Field, Step};
