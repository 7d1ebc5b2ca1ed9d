//! Plan generation: one model attempt, then the local template.

mod fallback;

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use planner_core::model::{Plan, PlanRequest};

use crate::ai::{ChatClient, CompletionModel};
use crate::config::AiSettings;
use crate::error::GenerationError;

pub use fallback::{TIPS, fallback_plan};

const SYSTEM_PROMPT: &str = "You are a helpful planning assistant that returns valid JSON.";

/// Where a plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    Model,
    Fallback,
}

/// A generated plan plus the non-fatal reason for falling back, if any.
#[derive(Debug)]
pub struct PlanOutcome {
    pub plan: Plan,
    pub source: PlanSource,
    pub warning: Option<GenerationError>,
}

/// Produces plans from a model when one is configured, else from the template.
///
/// Exactly one model request is made per call; any failure falls back.
#[derive(Clone)]
pub struct PlanGenerator {
    model: Option<Arc<dyn CompletionModel>>,
    tip_seed: Option<u64>,
}

impl PlanGenerator {
    #[must_use]
    pub fn new(model: Option<Arc<dyn CompletionModel>>) -> Self {
        Self {
            model,
            tip_seed: None,
        }
    }

    /// Generator backed by the chat-completions client when `settings` is present.
    #[must_use]
    pub fn from_settings(settings: Option<AiSettings>) -> Self {
        let model = settings.map(|s| Arc::new(ChatClient::new(s)) as Arc<dyn CompletionModel>);
        Self::new(model)
    }

    /// Generator that always uses the local template.
    #[must_use]
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Seed the fallback tip selection for reproducible output.
    #[must_use]
    pub fn with_tip_seed(mut self, seed: Option<u64>) -> Self {
        self.tip_seed = seed;
        self
    }

    #[must_use]
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub async fn generate(&self, request: &PlanRequest) -> PlanOutcome {
        match self.request_plan(request).await {
            Ok(plan) => {
                tracing::info!(weeks = plan.weeks.len(), "plan generated by model");
                PlanOutcome {
                    plan,
                    source: PlanSource::Model,
                    warning: None,
                }
            }
            Err(err) => {
                if matches!(err, GenerationError::MissingCredential) {
                    tracing::info!("no API key configured, using template plan");
                } else {
                    tracing::warn!(error = %err, "model plan failed, using template plan");
                }
                PlanOutcome {
                    plan: self.fallback(request),
                    source: PlanSource::Fallback,
                    warning: Some(err),
                }
            }
        }
    }

    async fn request_plan(&self, request: &PlanRequest) -> Result<Plan, GenerationError> {
        let model = self
            .model
            .as_ref()
            .ok_or(GenerationError::MissingCredential)?;

        let text = model.complete(SYSTEM_PROMPT, &build_prompt(request)).await?;
        parse_plan(&text)
    }

    fn fallback(&self, request: &PlanRequest) -> Plan {
        let (goal, weeks, style) = (request.goal(), request.weeks(), request.mentor_style());
        match self.tip_seed {
            Some(seed) => fallback_plan(goal, weeks, style, &mut StdRng::seed_from_u64(seed)),
            None => fallback_plan(goal, weeks, style, &mut rand::rng()),
        }
    }
}

/// The instruction sent to the model for `request`.
#[must_use]
pub fn build_prompt(request: &PlanRequest) -> String {
    format!(
        r#"
You are an expert study planner and mentor with the persona: {style}.
User goal: "{goal}". Timeframe: {weeks} weeks.
Output a JSON with keys:
- milestones: [..]
- weeks: {{ "Week 1": {{ "Tasks":[..], "Resources":[..], "Reflection": "...", "Mentor_Tip": "..." }}, ... }}
- mentor_notes: "..."
Return only valid JSON. Keep resources short (title or url if relevant).
"#,
        style = request.mentor_style(),
        goal = request.goal(),
        weeks = request.weeks(),
    )
}

/// Parse model output, tolerating prose around the JSON object.
///
/// # Errors
///
/// Returns `GenerationError::InvalidJson` if the object does not parse and
/// `GenerationError::EmptyPlan` if it has no weeks.
pub fn parse_plan(text: &str) -> Result<Plan, GenerationError> {
    let plan: Plan = serde_json::from_str(extract_json_object(text))?;
    if plan.weeks.is_empty() {
        return Err(GenerationError::EmptyPlan);
    }
    Ok(plan)
}

/// The span from the first `{` to the last `}`, or the whole text if either is missing.
fn extract_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start <= end => &text[start..=end],
        (Some(_), Some(_)) => "",
        _ => text,
    }
}
