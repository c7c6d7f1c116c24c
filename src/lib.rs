//! Career roadmap bot: a five-question profile dialogue whose answers are
//! sent to two LLM backends in parallel and merged into one report.

pub mod bot;
pub mod channels;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod locale;
pub mod roadmap;
