use std::collections::HashMap;
use std::fmt;

use crate::model::Plan;

/// XP awarded per percentage point of completion.
pub const XP_PER_PERCENT: u32 = 10;

//
// ─── COMPLETION MAP ────────────────────────────────────────────────────────────
//

/// Checked/unchecked state per `(week label, task text)`. Absent keys are unchecked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionMap {
    flags: HashMap<(String, String), bool>,
}

impl CompletionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, week: &str, task: &str, checked: bool) {
        self.flags
            .insert((week.to_string(), task.to_string()), checked);
    }

    #[must_use]
    pub fn is_checked(&self, week: &str, task: &str) -> bool {
        self.flags
            .get(&(week.to_string(), task.to_string()))
            .copied()
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Derived progress for a plan; recomputed on every observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub percent: u32,
    pub xp: u32,
    pub tier: GrowthTier,
}

impl Progress {
    #[must_use]
    pub fn observe(plan: &Plan, completion: &CompletionMap) -> Self {
        let mut total_tasks = 0;
        let mut completed_tasks = 0;
        for (label, entry) in plan.weeks.iter() {
            for task in &entry.tasks {
                total_tasks += 1;
                if completion.is_checked(label, task) {
                    completed_tasks += 1;
                }
            }
        }
        Self::from_counts(total_tasks, completed_tasks)
    }

    /// Progress for raw counts; the percentage truncates toward zero.
    #[must_use]
    pub fn from_counts(total_tasks: usize, completed_tasks: usize) -> Self {
        let percent = if total_tasks == 0 {
            0
        } else {
            let ratio = completed_tasks.min(total_tasks) * 100 / total_tasks;
            u32::try_from(ratio).unwrap_or(100)
        };

        Self {
            total_tasks,
            completed_tasks,
            percent,
            xp: percent * XP_PER_PERCENT,
            tier: GrowthTier::for_percent(percent),
        }
    }

    /// Progress with nothing to observe (no plan yet).
    #[must_use]
    pub fn empty() -> Self {
        Self::from_counts(0, 0)
    }
}

//
// ─── GROWTH TIER ───────────────────────────────────────────────────────────────
//

/// Four-step progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GrowthTier {
    Seed,
    Sprout,
    Sapling,
    Forest,
}

impl GrowthTier {
    #[must_use]
    pub fn for_percent(percent: u32) -> Self {
        match percent {
            0..10 => GrowthTier::Seed,
            10..40 => GrowthTier::Sprout,
            40..70 => GrowthTier::Sapling,
            _ => GrowthTier::Forest,
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            GrowthTier::Seed => "🌱",
            GrowthTier::Sprout => "🌱🌿",
            GrowthTier::Sapling => "🌱🌿🌳",
            GrowthTier::Forest => "🌱🌿🌳🌲",
        }
    }
}

impl fmt::Display for GrowthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.emoji())
    }
}
