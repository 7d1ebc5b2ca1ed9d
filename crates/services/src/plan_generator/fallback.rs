use rand::Rng;

use planner_core::model::{Plan, WeekEntry, Weeks, week_label};

const MILESTONE_TEMPLATES: [&str; 4] = [
    "Foundation",
    "Core Skills",
    "Practice & Projects",
    "Final Project",
];
const POLISH_MILESTONE: &str = "Polish & Review";

const RESOURCES: [&str; 2] = [
    "Official docs / Quick YouTube tutorial",
    "A short project or code-along",
];
const REFLECTION: &str = "What was the biggest challenge this week and one action to fix it?";

pub const TIPS: [&str; 3] = [
    "Consistency beats intensity. Try daily small steps.",
    "Break tasks into 25-minute Pomodoro sprints.",
    "Google errors, read docs, then refactor.",
];

/// Local template plan used when the model is unavailable.
///
/// Deterministic for a given `rng` state; the tip of each week is the only
/// randomized field.
pub fn fallback_plan<R: Rng>(
    goal: &str,
    weeks: u32,
    mentor_style: &str,
    rng: &mut R,
) -> Plan {
    let weeks = weeks.max(1);

    let mut milestones: Vec<String> = MILESTONE_TEMPLATES
        .iter()
        .zip(1..=weeks)
        .map(|(template, week)| format!("{template} - Week {week}"))
        .collect();
    if weeks > 4 {
        milestones.push(POLISH_MILESTONE.to_string());
    }

    let weeks_map: Weeks = (1..=weeks)
        .map(|week| {
            let entry = WeekEntry {
                tasks: vec![
                    format!(
                        "{mentor_style} Task: Spend focused 60-90 minutes on a core topic (week {week})"
                    ),
                    format!("Practice: 30 minutes of hands-on exercises (week {week})"),
                ],
                resources: RESOURCES.iter().map(ToString::to_string).collect(),
                reflection: REFLECTION.to_string(),
                mentor_tip: TIPS[rng.random_range(0..TIPS.len())].to_string(),
            };
            (week_label(week), entry)
        })
        .collect();

    Plan {
        milestones,
        weeks: weeks_map,
        mentor_notes: format!(
            "As {mentor_style}, I'll push you to be consistent. Goal: {goal} in {weeks} weeks."
        ),
    }
}
