//! Bot dispatcher: routes chat messages into the questionnaire and
//! delivers the generated roadmap.

pub mod command;
pub mod locks;
pub mod runner;

pub use command::Command;
pub use locks::SessionLocks;
pub use runner::RoadmapBot;
