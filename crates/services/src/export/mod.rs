//! Plan documents as files: PDF rendering and JSON export.

mod json;
mod layout;
mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use planner_core::Clock;
use planner_core::model::Plan;

use crate::error::ExportError;

pub use json::{plan_from_json, plan_to_json};
pub use layout::{Font, NOTES_HEADER, Page, PlacedLine, layout_plan};
pub use pdf::{render_pdf, write_pdf};

pub const PDF_FILE_NAME: &str = "agentic_plan.pdf";
pub const JSON_FILE_NAME: &str = "agentic_plan.json";

const TITLE_GOAL_CHARS: usize = 60;

/// Document title for a goal: `"Plan: "` plus its first 60 characters.
#[must_use]
pub fn plan_title(goal: &str) -> String {
    let head: String = goal.chars().take(TITLE_GOAL_CHARS).collect();
    format!("Plan: {head}")
}

/// Paths written by `write_exports`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub pdf: PathBuf,
    pub json: PathBuf,
}

/// Write the PDF and JSON documents for `plan` into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns `ExportError` if the directory or either file cannot be written.
pub fn write_exports(
    dir: &Path,
    plan: &Plan,
    title: &str,
    clock: Clock,
) -> Result<ExportPaths, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let pdf = dir.join(PDF_FILE_NAME);
    write_file(&pdf, &render_pdf(plan, title, clock.now()))?;

    let json = dir.join(JSON_FILE_NAME);
    write_file(&json, plan_to_json(plan)?.as_bytes())?;

    tracing::info!(pdf = %pdf.display(), json = %json.display(), "plan exported");
    Ok(ExportPaths { pdf, json })
}

/// Read a plan document from disk.
///
/// # Errors
///
/// Returns `ExportError` if the file cannot be read or parsed.
pub fn load_plan(path: &Path) -> Result<Plan, ExportError> {
    let raw = fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(plan_from_json(&raw)?)
}

/// Write `bytes` to `path`.
///
/// # Errors
///
/// Returns `ExportError::Io` on failure.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
