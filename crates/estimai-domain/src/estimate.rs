//! Display records of a normalized estimation result
//!
//! The payload is written by a generative service, so every field defaults
//! when absent or `null`, numeric fields also accept numeric strings, and
//! text fields accept numbers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured estimation result consumed by renderers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// Requirements refined into epics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refined_requirements: Option<RefinedRequirements>,

    /// Project-level risk assessment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_analysis: Option<RiskAnalysis>,

    /// Estimated tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,

    /// Phased delivery plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_plan: Option<WorkPlan>,
}

/// Epics produced from the raw requirements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefinedRequirements {
    /// Epic list
    #[serde(default, deserialize_with = "lenient_list")]
    pub epics: Vec<Epic>,
}

/// A large unit of work grouping related tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Epic {
    /// Epic name
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    /// What the epic covers
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    /// Priority label (e.g. "Alta", "High")
    #[serde(deserialize_with = "lenient_text")]
    pub priority: String,
    /// Known risk factors
    #[serde(deserialize_with = "lenient_texts")]
    pub risk_factors: Vec<String>,
}

/// Identified risks and how to handle them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAnalysis {
    /// Risks found in the requirements
    #[serde(deserialize_with = "lenient_texts")]
    pub identified_risks: Vec<String>,
    /// Mitigation for the risks above
    #[serde(deserialize_with = "lenient_texts")]
    pub mitigation_strategies: Vec<String>,
    /// Expected effect on the schedule
    #[serde(deserialize_with = "lenient_text")]
    pub impact_on_timeline: String,
}

/// A single estimated task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Task identifier (e.g. "T001")
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    /// Task name
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    /// What the task involves
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    /// Name of the owning epic
    #[serde(deserialize_with = "lenient_text")]
    pub epic: String,
    /// Story points
    #[serde(deserialize_with = "lenient_number")]
    pub estimated_points: f64,
    /// Complexity label
    #[serde(deserialize_with = "lenient_text")]
    pub complexity: String,
    /// Risk label
    #[serde(deserialize_with = "lenient_text")]
    pub risk_level: String,
    /// Ids of tasks this one depends on
    #[serde(deserialize_with = "lenient_texts")]
    pub dependencies: Vec<String>,
    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_optional_text")]
    pub considerations: Option<String>,
}

/// One phase of the work plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phase {
    /// Phase name
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    /// Task ids scheduled in this phase
    #[serde(deserialize_with = "lenient_texts")]
    pub tasks: Vec<String>,
    /// Duration label
    #[serde(deserialize_with = "lenient_text")]
    pub estimated_duration: String,
    /// Phase outputs
    #[serde(deserialize_with = "lenient_texts")]
    pub deliverables: Vec<String>,
    /// Points needing attention
    #[serde(deserialize_with = "lenient_texts")]
    pub critical_points: Vec<String>,
}

/// A dated checkpoint in the work plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    /// Milestone name
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    /// Date label (e.g. "Semana 4")
    #[serde(deserialize_with = "lenient_text")]
    pub date: String,
    /// What is delivered at this point
    #[serde(deserialize_with = "lenient_text")]
    pub deliverable: String,
}

/// Phased delivery plan with totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkPlan {
    /// Ordered phases
    #[serde(deserialize_with = "lenient_list")]
    pub phases: Vec<Phase>,
    /// Sum of task points
    #[serde(deserialize_with = "lenient_number")]
    pub total_estimated_points: f64,
    /// Overall duration label
    #[serde(deserialize_with = "lenient_text")]
    pub estimated_duration: String,
    /// Safety buffer in percent
    #[serde(deserialize_with = "lenient_number")]
    pub buffer_percentage: f64,
    /// Checkpoints
    #[serde(deserialize_with = "lenient_list")]
    pub milestones: Vec<Milestone>,
}

impl NormalizedResult {
    /// Interpret a document's `result` value as structured records
    ///
    /// Returns `None` when the value is not a mapping or still holds raw text
    /// where records are expected, so callers can fall back to a raw view.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// True when none of the four sections is present
    pub fn is_empty(&self) -> bool {
        self.refined_requirements.is_none()
            && self.risk_analysis.is_none()
            && self.tasks.is_none()
            && self.work_plan.is_none()
    }

    /// Epics, or an empty slice
    pub fn epics(&self) -> &[Epic] {
        self.refined_requirements
            .as_ref()
            .map(|r| r.epics.as_slice())
            .unwrap_or(&[])
    }

    /// Sum of task points
    pub fn task_points(&self) -> f64 {
        self.tasks
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|t| t.estimated_points)
            .sum()
    }
}

/// Text from a scalar; `null` yields `None`
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// A list of labels; a lone scalar becomes a one-element list
fn lenient_texts<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}
