mod flashcard;
mod plan;
mod request;

pub use flashcard::{Flashcard, MAX_CARDS, flashcards};
pub use plan::{Plan, WeekEntry, Weeks, week_label};
pub use request::{MAX_GOAL_CHARS, MAX_WEEKS, MentorStyle, PlanRequest, RequestError};
