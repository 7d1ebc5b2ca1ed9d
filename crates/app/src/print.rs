use std::io::{self, Write};

use planner_core::model::Flashcard;
use planner_core::progress::Progress;
use services::PlannerSession;

pub fn plan<W: Write>(out: &mut W, session: &PlannerSession) -> io::Result<()> {
    let Some(plan) = session.plan() else {
        return writeln!(out, "No plan yet.");
    };

    writeln!(out, "Milestones")?;
    for milestone in &plan.milestones {
        writeln!(out, "  • {milestone}")?;
    }

    for (label, entry) in plan.weeks.iter() {
        writeln!(out)?;
        writeln!(out, "{label}")?;
        for (number, task) in entry.tasks.iter().enumerate() {
            let mark = if session.is_checked(label, task) { 'x' } else { ' ' };
            writeln!(out, "  [{mark}] {}. {task}", number + 1)?;
        }
        if !entry.resources.is_empty() {
            writeln!(out, "  Resources:")?;
            for resource in &entry.resources {
                writeln!(out, "    - {resource}")?;
            }
        }
        if !entry.reflection.is_empty() {
            writeln!(out, "  Reflection prompt: {}", entry.reflection)?;
        }
        if !entry.mentor_tip.is_empty() {
            writeln!(out, "  Mentor tip: {}", entry.mentor_tip)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Mentor Notes")?;
    for line in plan.mentor_notes.lines() {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

pub fn progress<W: Write>(out: &mut W, progress: &Progress) -> io::Result<()> {
    writeln!(
        out,
        "Progress: {}% ({}/{} tasks)  Tree: {}  XP: {}",
        progress.percent, progress.completed_tasks, progress.total_tasks, progress.tier, progress.xp
    )
}

pub fn flashcards<W: Write>(out: &mut W, week: u32, cards: &[Flashcard]) -> io::Result<()> {
    writeln!(out, "Flashcards - Week {week}")?;
    if cards.is_empty() {
        return writeln!(out, "  (no tasks this week)");
    }
    for (i, card) in cards.iter().enumerate() {
        writeln!(out, "Q{}. {}", i + 1, card.question)?;
        writeln!(out, "A{}. {}", i + 1, card.answer)?;
    }
    Ok(())
}
