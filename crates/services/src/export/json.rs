use planner_core::model::Plan;

/// Pretty-printed plan document (2-space indentation).
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn plan_to_json(plan: &Plan) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(plan)
}

/// Parse a plan document; missing fields default to empty.
///
/// # Errors
///
/// Returns `serde_json::Error` on malformed JSON.
pub fn plan_from_json(raw: &str) -> Result<Plan, serde_json::Error> {
    serde_json::from_str(raw)
}
