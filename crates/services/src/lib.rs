#![forbid(unsafe_code)]

pub mod ai;
pub mod config;
pub mod error;
pub mod export;
pub mod plan_generator;
pub mod session;

pub use planner_core::Clock;

pub use config::AiSettings;
pub use error::{AiError, ConfigError, ExportError, GenerationError, SessionError};
pub use plan_generator::{PlanGenerator, PlanOutcome, PlanSource};
pub use session::PlannerSession;
