//! Line-oriented interactive session over a generated plan.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use planner_core::model::MAX_WEEKS;
use services::export::write_exports;
use services::{Clock, PlannerSession};

use crate::print;

const HELP: &str = "\
Commands:
  show                    print the plan with checkboxes
  check <week> <task#>    mark a task done
  uncheck <week> <task#>  mark a task not done
  progress                show completion, tree and XP
  week <n>                choose the flashcard week
  cards                   flashcards for the current week
  recompress <weeks>      spread remaining tasks over fewer weeks
  export [dir]            write agentic_plan.pdf and agentic_plan.json
  help                    this text
  quit                    end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Show,
    Check { week: u32, task: usize, done: bool },
    Progress,
    Week(u32),
    Cards,
    Recompress(u32),
    Export(Option<PathBuf>),
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Err(String::new());
        };
        let args: Vec<&str> = parts.collect();

        let number = |index: usize, what: &str| -> Result<u32, String> {
            args.get(index)
                .ok_or_else(|| format!("{word} needs a {what}"))?
                .parse()
                .map_err(|_| format!("invalid {what}: {}", args[index]))
        };

        match word {
            "show" => Ok(Self::Show),
            "check" | "uncheck" => Ok(Self::Check {
                week: number(0, "week number")?,
                task: number(1, "task number")? as usize,
                done: word == "check",
            }),
            "progress" => Ok(Self::Progress),
            "week" => Ok(Self::Week(number(0, "week number")?)),
            "cards" | "flashcards" => Ok(Self::Cards),
            "recompress" => match number(0, "week count")? {
                weeks @ 1..=MAX_WEEKS => Ok(Self::Recompress(weeks)),
                weeks => Err(format!("week count must be 1-{MAX_WEEKS}, got {weeks}")),
            },
            "export" => Ok(Self::Export(args.first().map(PathBuf::from))),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

/// Run commands from `input` against `session` until `quit` or end of input.
///
/// Command errors are reported on `out` and the loop continues.
pub fn run<R: BufRead, W: Write>(
    session: &mut PlannerSession,
    title: &str,
    clock: Clock,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{HELP}")?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => execute(session, title, clock, command, out)?,
                Err(message) => writeln!(out, "{message}")?,
            }
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

fn execute<W: Write>(
    session: &mut PlannerSession,
    title: &str,
    clock: Clock,
    command: ShellCommand,
    out: &mut W,
) -> io::Result<()> {
    match command {
        ShellCommand::Show => print::plan(out, session)?,
        ShellCommand::Check { week, task, done } => {
            match session.set_task_checked(week, task, done) {
                Ok(text) => {
                    let mark = if done { 'x' } else { ' ' };
                    writeln!(out, "[{mark}] {text}")?;
                    print::progress(out, &session.progress())?;
                }
                Err(err) => writeln!(out, "{err}")?,
            }
        }
        ShellCommand::Progress => print::progress(out, &session.progress())?,
        ShellCommand::Week(week) => match session.set_current_week(week) {
            Ok(()) => writeln!(out, "Flashcards now come from Week {week}.")?,
            Err(err) => writeln!(out, "{err}")?,
        },
        ShellCommand::Cards => {
            print::flashcards(out, session.current_week(), &session.flashcards())?;
        }
        ShellCommand::Recompress(weeks) => match session.recompress(weeks) {
            Ok(()) => print::plan(out, session)?,
            Err(err) => writeln!(out, "{err}")?,
        },
        ShellCommand::Export(dir) => {
            let Some(plan) = session.plan() else {
                return writeln!(out, "no plan generated yet");
            };
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            match write_exports(&dir, plan, title, clock) {
                Ok(paths) => writeln!(
                    out,
                    "Wrote {} and {}",
                    paths.pdf.display(),
                    paths.json.display()
                )?,
                Err(err) => writeln!(out, "{err}")?,
            }
        }
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Quit => {}
    }
    Ok(())
}
