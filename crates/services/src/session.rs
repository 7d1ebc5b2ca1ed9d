use planner_core::model::{Flashcard, Plan, flashcards, week_label};
use planner_core::progress::{CompletionMap, Progress};

use crate::error::SessionError;

/// State of one user's planning session.
///
/// Created when the session starts and dropped when it ends; nothing is shared
/// between sessions. Installing a new plan discards all checkbox state.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    plan: Option<Plan>,
    completion: CompletionMap,
    current_week: u32,
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlannerSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            plan: None,
            completion: CompletionMap::new(),
            current_week: 1,
        }
    }

    /// Replace the active plan and reset completion and the current week.
    pub fn install_plan(&mut self, plan: Plan) {
        self.plan = Some(plan);
        self.completion.clear();
        self.current_week = 1;
    }

    #[must_use]
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    #[must_use]
    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    /// Choose the week flashcards are drawn from.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidWeek` for week 0.
    pub fn set_current_week(&mut self, week: u32) -> Result<(), SessionError> {
        if week == 0 {
            return Err(SessionError::InvalidWeek);
        }
        self.current_week = week;
        Ok(())
    }

    /// Set the flag for a task addressed by its text.
    pub fn set_checked(&mut self, week: &str, task: &str, checked: bool) {
        self.completion.set(week, task, checked);
    }

    #[must_use]
    pub fn is_checked(&self, week: &str, task: &str) -> bool {
        self.completion.is_checked(week, task)
    }

    /// Set the flag for the `task_number`-th (1-based) task of `week`.
    ///
    /// Returns the task text.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if there is no plan or the week/task does not exist.
    pub fn set_task_checked(
        &mut self,
        week: u32,
        task_number: usize,
        checked: bool,
    ) -> Result<String, SessionError> {
        let plan = self.plan.as_ref().ok_or(SessionError::NoPlan)?;
        let label = week_label(week);
        let entry = plan
            .weeks
            .get(&label)
            .ok_or_else(|| SessionError::UnknownWeek {
                label: label.clone(),
            })?;
        let task = task_number
            .checked_sub(1)
            .and_then(|index| entry.tasks.get(index))
            .cloned()
            .ok_or_else(|| SessionError::UnknownTask {
                label: label.clone(),
                number: task_number,
            })?;

        self.completion.set(&label, &task, checked);
        Ok(task)
    }

    /// Progress derived from the current plan and flags.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.plan
            .as_ref()
            .map_or_else(Progress::empty, |plan| Progress::observe(plan, &self.completion))
    }

    /// Flashcards for the current week.
    #[must_use]
    pub fn flashcards(&self) -> Vec<Flashcard> {
        self.plan
            .as_ref()
            .map(|plan| flashcards(plan, self.current_week))
            .unwrap_or_default()
    }

    /// Redistribute the active plan over `remaining_weeks`.
    ///
    /// Flags are kept; those whose week/task pair no longer exists stop counting.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoPlan` before the first plan is installed.
    pub fn recompress(&mut self, remaining_weeks: u32) -> Result<(), SessionError> {
        let plan = self.plan.as_mut().ok_or(SessionError::NoPlan)?;
        plan.recompress(remaining_weeks);
        tracing::debug!(weeks = plan.weeks.len(), "plan recompressed");
        Ok(())
    }
}
