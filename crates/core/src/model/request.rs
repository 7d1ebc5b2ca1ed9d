use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Longest goal accepted; longer input is cut to this many characters.
pub const MAX_GOAL_CHARS: usize = 200;
/// Longest timeframe accepted, in weeks.
pub const MAX_WEEKS: u32 = 52;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RequestError {
    #[error("Please enter a goal to generate a plan.")]
    EmptyGoal,

    #[error("unknown mentor style: {raw}")]
    UnknownMentorStyle { raw: String },
}

//
// ─── MENTOR STYLE ──────────────────────────────────────────────────────────────
//

/// The mentor personas offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MentorStyle {
    #[default]
    Coach,
    ZenMonk,
    TechBro,
}

impl MentorStyle {
    pub const ALL: [MentorStyle; 3] = [MentorStyle::Coach, MentorStyle::ZenMonk, MentorStyle::TechBro];

    /// Display label, also used verbatim inside prompts and fallback tasks.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MentorStyle::Coach => "Coach (tough-love)",
            MentorStyle::ZenMonk => "Zen Monk (calm)",
            MentorStyle::TechBro => "Tech Bro (hype)",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            MentorStyle::Coach => "coach",
            MentorStyle::ZenMonk => "zen-monk",
            MentorStyle::TechBro => "tech-bro",
        }
    }
}

impl fmt::Display for MentorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MentorStyle {
    type Err = RequestError;

    /// Accepts either the slug (`zen-monk`) or the full label, case-insensitively.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim();
        MentorStyle::ALL
            .into_iter()
            .find(|style| {
                style.slug().eq_ignore_ascii_case(needle) || style.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| RequestError::UnknownMentorStyle {
                raw: raw.to_string(),
            })
    }
}

//
// ─── PLAN REQUEST ──────────────────────────────────────────────────────────────
//

/// Validated input for plan generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    goal: String,
    weeks: u32,
    mentor_style: String,
}

impl PlanRequest {
    /// Validate raw user input.
    ///
    /// The week count is clamped to `1..=MAX_WEEKS` and the goal is cut to
    /// `MAX_GOAL_CHARS` characters.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::EmptyGoal` when the goal is empty or whitespace.
    pub fn new(
        goal: impl Into<String>,
        weeks: u32,
        mentor_style: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let goal = goal.into();
        if goal.trim().is_empty() {
            return Err(RequestError::EmptyGoal);
        }
        let goal = goal.chars().take(MAX_GOAL_CHARS).collect();

        Ok(Self {
            goal,
            weeks: weeks.clamp(1, MAX_WEEKS),
            mentor_style: mentor_style.into(),
        })
    }

    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    #[must_use]
    pub fn weeks(&self) -> u32 {
        self.weeks
    }

    #[must_use]
    pub fn mentor_style(&self) -> &str {
        &self.mentor_style
    }
}
