//! Redistributes a plan's tasks over a new number of weeks.
//!
//! Tasks and resources are flattened in week order and cut into contiguous
//! chunks of `max(1, total_tasks / weeks)`. Tasks past the last full chunk are
//! not carried over.

use crate::model::{Plan, WeekEntry, Weeks, week_label};

pub const CATCH_UP_TASK: &str = "Catch-up session: review core concepts";
pub const PLACEHOLDER_RESOURCE: &str = "Docs";
pub const RECOMPRESSED_REFLECTION: &str = "What will you prioritize next week?";
pub const RECOMPRESSED_TIP: &str = "Focus on the highest-impact tasks first.";

/// Returns `plan` with its weeks rebuilt for `remaining_weeks`.
#[must_use]
pub fn recompress(mut plan: Plan, remaining_weeks: u32) -> Plan {
    plan.recompress(remaining_weeks);
    plan
}

impl Plan {
    /// Rebuilds `weeks` in place for `remaining_weeks` (at least one).
    ///
    /// Milestones and mentor notes are left untouched.
    pub fn recompress(&mut self, remaining_weeks: u32) {
        let (tasks, resources): (Vec<&String>, Vec<&String>) = (
            self.weeks.iter().flat_map(|(_, e)| e.tasks.iter()).collect(),
            self.weeks.iter().flat_map(|(_, e)| e.resources.iter()).collect(),
        );

        let rem = remaining_weeks.max(1);
        let per_week = (tasks.len() / rem as usize).max(1);

        let weeks: Vec<(String, WeekEntry)> = (0..rem)
            .map(|i| {
                let start = i as usize * per_week;
                let end = start + per_week;

                let mut week_tasks = chunk(&tasks, start, end);
                if week_tasks.is_empty() {
                    week_tasks.push(CATCH_UP_TASK.to_string());
                }
                let mut week_resources = chunk(&resources, start, end);
                if week_resources.is_empty() {
                    week_resources.push(PLACEHOLDER_RESOURCE.to_string());
                }

                let entry = WeekEntry {
                    tasks: week_tasks,
                    resources: week_resources,
                    reflection: RECOMPRESSED_REFLECTION.to_string(),
                    mentor_tip: RECOMPRESSED_TIP.to_string(),
                };
                (week_label(i + 1), entry)
            })
            .collect();

        self.weeks = Weeks::from_distinct(weeks);
    }
}

fn chunk(items: &[&String], start: usize, end: usize) -> Vec<String> {
    let start = start.min(items.len());
    let end = end.min(items.len());
    items[start..end].iter().map(|s| (*s).clone()).collect()
}
