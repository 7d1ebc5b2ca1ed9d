use planner_core::model::PlanRequest;
use planner_core::time::fixed_clock;
use services::export::{self, JSON_FILE_NAME, PDF_FILE_NAME, plan_title};
use services::{PlanGenerator, PlannerSession};

#[tokio::test]
async fn generate_track_and_export() {
    let request = PlanRequest::new("Learn Rust", 4, "Coach (tough-love)").unwrap();
    let outcome = PlanGenerator::offline()
        .with_tip_seed(Some(12))
        .generate(&request)
        .await;

    let mut session = PlannerSession::new();
    session.install_plan(outcome.plan);
    assert_eq!(session.progress().total_tasks, 8);

    session.set_task_checked(1, 1, true).unwrap();
    session.set_task_checked(1, 2, true).unwrap();
    session.set_task_checked(2, 1, true).unwrap();
    let progress = session.progress();
    assert_eq!(progress.percent, 37);
    assert_eq!(progress.xp, 370);
    assert_eq!(progress.tier.emoji(), "🌱🌿");

    let cards = session.flashcards();
    assert_eq!(cards.len(), 2);
    assert_eq!(
        cards[0].question,
        "What is the key action for: Coach (tough-love) Task?"
    );

    let dir = tempfile::tempdir().unwrap();
    let plan = session.plan().unwrap();
    let paths = export::write_exports(dir.path(), plan, &plan_title(request.goal()), fixed_clock())
        .unwrap();

    assert_eq!(paths.pdf, dir.path().join(PDF_FILE_NAME));
    assert_eq!(paths.json, dir.path().join(JSON_FILE_NAME));

    let pdf = std::fs::read(&paths.pdf).unwrap();
    let pdf_text = String::from_utf8_lossy(&pdf);
    assert!(pdf_text.contains("(Plan: Learn Rust) Tj"));
    assert!(pdf_text.contains("(Generated: 2023-11-14 22:13 UTC) Tj"));
    assert!(pdf_text.contains("(Mentor Notes:) Tj"));

    let reloaded = export::load_plan(&paths.json).unwrap();
    assert_eq!(&reloaded, plan);
}

#[tokio::test]
async fn shrinking_timeframe_mid_plan() {
    let request = PlanRequest::new("Learn Rust", 5, "Tech Bro (hype)").unwrap();
    let outcome = PlanGenerator::offline()
        .with_tip_seed(Some(4))
        .generate(&request)
        .await;

    let mut session = PlannerSession::new();
    session.install_plan(outcome.plan);
    session.recompress(3).unwrap();

    let plan = session.plan().unwrap();
    let sizes: Vec<usize> = plan.weeks.iter().map(|(_, w)| w.tasks.len()).collect();
    assert_eq!(sizes, vec![3, 3, 3]);
    assert_eq!(plan.milestones.len(), 5);
    assert_eq!(session.progress().total_tasks, 9);
}

#[test]
fn mentor_notes_lines_render_separately() {
    let mut plan = planner_core::model::Plan::default();
    plan.mentor_notes = "Stay curious.\nShip weekly.\nRest on Sundays.".into();

    let pages = export::layout_plan(&plan, "T", planner_core::time::fixed_now());
    let lines: Vec<&str> = pages
        .iter()
        .flat_map(|p| p.lines.iter().map(|l| l.text.as_str()))
        .collect();
    let header = lines
        .iter()
        .position(|l| *l == export::NOTES_HEADER)
        .unwrap();

    assert_eq!(
        &lines[header + 1..],
        &["Stay curious.", "Ship weekly.", "Rest on Sundays."]
    );
}
