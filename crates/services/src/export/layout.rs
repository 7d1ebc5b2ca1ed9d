//! Places a plan's text lines on fixed-size pages.
//!
//! Pagination is greedy: the cursor moves down by a fixed step per line and a
//! new page starts whenever it drops below a floor. Weeks and long lines are
//! never kept together or wrapped.

use chrono::{DateTime, Utc};

use planner_core::model::Plan;

pub const PAGE_WIDTH: i32 = 612;
pub const PAGE_HEIGHT: i32 = 792;
pub const MARGIN: i32 = 40;

const TOP: i32 = PAGE_HEIGHT - MARGIN;
const LINE_FLOOR: i32 = 60;
const WEEK_FLOOR: i32 = 80;
const RESOURCES_SHOWN: usize = 3;

pub const MILESTONES_HEADER: &str = "Milestones:";
pub const NOTES_HEADER: &str = "Mentor Notes:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// Resource name used in page content streams.
    #[must_use]
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// Standard Type 1 font name.
    #[must_use]
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }
}

/// One line of text anchored at its baseline start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub x: i32,
    pub y: i32,
    pub font: Font,
    pub size: u8,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

struct Cursor {
    pages: Vec<Page>,
    y: i32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: TOP,
        }
    }

    fn draw(&mut self, x: i32, font: Font, size: u8, text: impl Into<String>) {
        let line = PlacedLine {
            x,
            y: self.y,
            font,
            size,
            text: text.into(),
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
    }

    fn down(&mut self, step: i32) {
        self.y -= step;
    }

    fn break_below(&mut self, floor: i32) {
        if self.y < floor {
            self.pages.push(Page::default());
            self.y = TOP;
        }
    }
}

/// Lay out `plan` under `title`, stamped with `generated_at`.
#[must_use]
pub fn layout_plan(plan: &Plan, title: &str, generated_at: DateTime<Utc>) -> Vec<Page> {
    let mut c = Cursor::new();

    c.draw(MARGIN, Font::Bold, 16, title);
    c.down(30);
    c.draw(
        MARGIN,
        Font::Regular,
        11,
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
    );
    c.down(25);

    c.draw(MARGIN, Font::Bold, 12, MILESTONES_HEADER);
    c.down(18);
    for milestone in &plan.milestones {
        c.draw(MARGIN + 10, Font::Regular, 11, format!("- {milestone}"));
        c.down(14);
        c.break_below(LINE_FLOOR);
    }
    c.down(8);

    for (label, entry) in plan.weeks.iter() {
        c.draw(MARGIN, Font::Bold, 12, label);
        c.down(16);
        for task in &entry.tasks {
            c.draw(MARGIN + 8, Font::Regular, 11, format!("• {task}"));
            c.down(12);
            c.break_below(LINE_FLOOR);
        }
        if !entry.resources.is_empty() {
            let shown = entry.resources[..entry.resources.len().min(RESOURCES_SHOWN)].join(", ");
            c.draw(MARGIN + 8, Font::Regular, 11, format!("Resources: {shown}"));
            c.down(14);
        }
        if !entry.reflection.is_empty() {
            c.draw(
                MARGIN + 8,
                Font::Regular,
                11,
                format!("Reflection: {}", entry.reflection),
            );
            c.down(12);
        }
        if !entry.mentor_tip.is_empty() {
            c.draw(MARGIN + 8, Font::Regular, 11, format!("Tip: {}", entry.mentor_tip));
            c.down(18);
        }
        c.break_below(WEEK_FLOOR);
    }

    c.draw(MARGIN, Font::Bold, 12, NOTES_HEADER);
    c.down(16);
    for line in plan.mentor_notes.split('\n') {
        c.draw(MARGIN + 8, Font::Regular, 11, line);
        c.down(12);
        c.break_below(LINE_FLOOR);
    }

    // A break after the final line leaves a blank page behind.
    if c.pages.len() > 1 && c.pages.last().is_some_and(|page| page.lines.is_empty()) {
        c.pages.pop();
    }
    c.pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::model::{WeekEntry, week_label};
    use planner_core::time::fixed_now;

    fn plan(weeks: u32, tasks_per_week: usize) -> Plan {
        Plan {
            milestones: vec!["Foundation - Week 1".into(), "Core Skills - Week 2".into()],
            weeks: (1..=weeks)
                .map(|n| {
                    let entry = WeekEntry {
                        tasks: (1..=tasks_per_week).map(|i| format!("task {i}")).collect(),
                        resources: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                        reflection: "reflect".into(),
                        mentor_tip: "tip".into(),
                    };
                    (week_label(n), entry)
                })
                .collect(),
            mentor_notes: "one\ntwo\nthree".into(),
        }
    }

    fn texts(pages: &[Page]) -> Vec<&str> {
        pages
            .iter()
            .flat_map(|p| p.lines.iter().map(|l| l.text.as_str()))
            .collect()
    }

    #[test]
    fn sections_appear_in_order() {
        let pages = layout_plan(&plan(1, 2), "Plan: Learn Rust", fixed_now());
        let lines = texts(&pages);

        assert_eq!(
            lines,
            vec![
                "Plan: Learn Rust",
                "Generated: 2023-11-14 22:13 UTC",
                "Milestones:",
                "- Foundation - Week 1",
                "- Core Skills - Week 2",
                "Week 1",
                "• task 1",
                "• task 2",
                "Resources: a, b, c",
                "Reflection: reflect",
                "Tip: tip",
                "Mentor Notes:",
                "one",
                "two",
                "three",
            ]
        );
    }

    #[test]
    fn first_page_cursor_steps() {
        let pages = layout_plan(&plan(1, 1), "T", fixed_now());
        let ys: Vec<i32> = pages[0].lines.iter().map(|l| l.y).collect();
        // title, stamp, header, 2 milestones, week, task, resources, reflection, tip, notes header
        assert_eq!(&ys[..11], &[752, 722, 697, 679, 665, 643, 627, 615, 601, 589, 571]);
        assert_eq!(pages[0].lines[0].font, Font::Bold);
        assert_eq!(pages[0].lines[0].size, 16);
    }

    #[test]
    fn notes_lines_follow_header() {
        let pages = layout_plan(&plan(2, 3), "T", fixed_now());
        let lines = texts(&pages);
        let header = lines.iter().position(|l| *l == NOTES_HEADER).unwrap();
        assert_eq!(&lines[header + 1..], &["one", "two", "three"]);
    }

    #[test]
    fn long_plans_paginate_within_bounds() {
        let pages = layout_plan(&plan(6, 12), "T", fixed_now());

        assert!(pages.len() > 1);
        for page in &pages {
            assert!(!page.lines.is_empty());
            assert_eq!(page.lines[0].y, TOP);
            for line in &page.lines {
                assert!(line.y > 0 && line.y <= TOP, "y out of page: {}", line.y);
            }
        }
    }

    fn position(pages: &[Page], text: &str) -> (usize, i32) {
        pages
            .iter()
            .enumerate()
            .find_map(|(n, page)| {
                page.lines
                    .iter()
                    .find(|l| l.text == text)
                    .map(|l| (n, l.y))
            })
            .unwrap()
    }

    #[test]
    fn week_ending_below_week_floor_starts_new_page() {
        // Week 1 header at 671, 48 tasks leave the cursor at 655 - 48 * 12 = 79.
        let mut p = Plan::default();
        p.weeks.insert(
            week_label(1),
            WeekEntry {
                tasks: (1..=48).map(|i| format!("task {i}")).collect(),
                ..WeekEntry::default()
            },
        );
        p.weeks.insert(week_label(2), WeekEntry::default());

        let pages = layout_plan(&p, "T", fixed_now());

        assert_eq!(position(&pages, "Week 1"), (0, 671));
        assert_eq!(position(&pages, "• task 48"), (0, 91));
        assert_eq!(position(&pages, "Week 2"), (1, TOP));
    }

    #[test]
    fn task_lines_only_break_below_line_floor() {
        // The 48th task leaves 79; the 49th still fits at 79 and leaves 67.
        let mut p = Plan::default();
        p.weeks.insert(
            week_label(1),
            WeekEntry {
                tasks: (1..=49).map(|i| format!("task {i}")).collect(),
                ..WeekEntry::default()
            },
        );

        let pages = layout_plan(&p, "T", fixed_now());

        assert_eq!(position(&pages, "• task 49"), (0, 79));
        assert_eq!(position(&pages, NOTES_HEADER), (1, TOP));
    }

    #[test]
    fn milestone_lines_only_break_below_line_floor() {
        // Milestone k sits at 679 - 14 * (k - 1); the 45th leaves 49 and breaks.
        let mut p = Plan::default();
        p.milestones = (1..=45).map(|k| format!("m{k}")).collect();

        let pages = layout_plan(&p, "T", fixed_now());

        assert_eq!(position(&pages, "- m44"), (0, 77));
        assert_eq!(position(&pages, "- m45"), (0, 63));
        assert_eq!(position(&pages, NOTES_HEADER), (1, TOP - 8));
    }

    #[test]
    fn break_after_last_notes_line_leaves_no_blank_page() {
        // Notes header at 671, line j at 655 - 12 * (j - 1); line 50 leaves 55.
        let mut p = Plan::default();
        p.mentor_notes = (1..=50).map(|j| format!("n{j}")).collect::<Vec<_>>().join("\n");

        let pages = layout_plan(&p, "T", fixed_now());

        assert_eq!(pages.len(), 1);
        assert_eq!(position(&pages, "n50"), (0, 67));

        p.mentor_notes.push_str("\nn51");
        let pages = layout_plan(&p, "T", fixed_now());

        assert_eq!(pages.len(), 2);
        assert_eq!(position(&pages, "n51"), (1, TOP));
    }

    #[test]
    fn empty_optional_fields_emit_nothing() {
        let mut p = plan(1, 1);
        if let Some(week) = p.weeks.get_mut("Week 1") {
            week.resources.clear();
            week.reflection.clear();
            week.mentor_tip.clear();
        }
        let pages = layout_plan(&p, "T", fixed_now());
        let lines = texts(&pages);
        assert!(!lines.iter().any(|l| l.starts_with("Resources:")));
        assert!(!lines.iter().any(|l| l.starts_with("Reflection:")));
        assert!(!lines.iter().any(|l| l.starts_with("Tip:")));
    }
}
