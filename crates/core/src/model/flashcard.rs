use serde::{Deserialize, Serialize};

use super::plan::Plan;

/// Most cards drawn from a single week.
pub const MAX_CARDS: usize = 5;

const QUESTION_HEAD_CHARS: usize = 60;

/// A question/answer pair derived from one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(rename = "q")]
    pub question: String,
    #[serde(rename = "a")]
    pub answer: String,
}

impl Flashcard {
    /// Builds a card from a task description.
    ///
    /// The question quotes the task up to its first colon, capped at 60 characters.
    #[must_use]
    pub fn from_task(task: &str) -> Self {
        let head: String = task
            .split(':')
            .next()
            .unwrap_or(task)
            .chars()
            .take(QUESTION_HEAD_CHARS)
            .collect();

        Self {
            question: format!("What is the key action for: {head}?"),
            answer: format!("Do: {task}"),
        }
    }
}

/// Cards for the first `MAX_CARDS` tasks of a week; empty when the week is missing.
#[must_use]
pub fn flashcards(plan: &Plan, week: u32) -> Vec<Flashcard> {
    plan.week(week)
        .map(|entry| {
            entry
                .tasks
                .iter()
                .take(MAX_CARDS)
                .map(|task| Flashcard::from_task(task))
                .collect()
        })
        .unwrap_or_default()
}
