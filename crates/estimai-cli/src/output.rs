//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use estimai_client::{Estimation, FlowProgress, ResultView};
use estimai_domain::{CorrelationId, EstimationRequest, NormalizedResult};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a finished estimation.
    ///
    /// `input` is echoed above the panels when the request was made in this run.
    pub fn format_estimation(&self, estimation: &Estimation, input: Option<&EstimationRequest>) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_estimation_json(estimation),
            OutputFormat::Table => Ok(self.format_estimation_table(estimation, input)),
            OutputFormat::Quiet => Ok(estimation.correlation_id.to_string()),
        }
    }

    fn format_estimation_json(&self, estimation: &Estimation) -> Result<String> {
        let mut output = json!({
            "id": estimation.correlation_id,
            "status": estimation.status,
            "source": estimation.source,
            "attempts_made": estimation.attempts_made,
            "document": estimation.document,
        });
        if estimation.is_fallback() {
            output["fixture_version"] = json!(estimation.fallback.version());
        }
        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn format_estimation_table(&self, estimation: &Estimation, input: Option<&EstimationRequest>) -> String {
        let mut sections = Vec::new();

        let mut title = format!("Estimation {}", estimation.correlation_id);
        if estimation.correlation_id.is_synthetic() {
            title.push_str(" (simulated)");
        }
        sections.push(self.heading(&title));
        if estimation.is_fallback() {
            sections.push(self.warning(&format!(
                "Results unavailable ({}); showing example data",
                estimation.status.as_str()
            )));
        }
        if let Some(request) = input {
            sections.push(self.input_summary(request));
        }

        match estimation.view() {
            ResultView::Structured(result) => sections.push(self.format_result(&result)),
            ResultView::Raw(value) => {
                sections.push(self.info("Result could not be read as structured data"));
                sections.push(raw_text(value));
            }
        }

        sections.join("\n\n")
    }

    /// Render every panel of a structured result.
    pub fn format_result(&self, result: &NormalizedResult) -> String {
        if result.is_empty() {
            return self.colorize("No estimation data.", "yellow");
        }

        let mut panels = Vec::new();

        if !result.epics().is_empty() {
            panels.push(self.epics_panel(result));
        }

        if let Some(risks) = &result.risk_analysis {
            let mut lines = vec![self.heading("Risk analysis")];
            lines.extend(risks.identified_risks.iter().map(|r| format!("  • {}", r)));
            if !risks.mitigation_strategies.is_empty() {
                lines.push("  Mitigation:".to_string());
                lines.extend(risks.mitigation_strategies.iter().map(|s| format!("    - {}", s)));
            }
            if !risks.impact_on_timeline.is_empty() {
                lines.push(format!("  Impact on timeline: {}", risks.impact_on_timeline));
            }
            panels.push(lines.join("\n"));
        }

        if let Some(tasks) = result.tasks.as_deref().filter(|t| !t.is_empty()) {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Task", "Epic", "Points", "Complexity", "Risk", "Depends on"]);
            for task in tasks {
                builder.push_record([
                    task.id.clone(),
                    task.name.clone(),
                    task.epic.clone(),
                    format_points(task.estimated_points),
                    self.level(&task.complexity),
                    self.level(&task.risk_level),
                    task.dependencies.join(", "),
                ]);
            }
            panels.push(format!(
                "{}\n{}\n  Sum of task points: {}",
                self.heading("Tasks"),
                table(builder),
                format_points(result.task_points())
            ));
        }

        if let Some(plan) = &result.work_plan {
            let mut lines = vec![self.heading("Work plan")];
            lines.push(format!(
                "  Total: {} points · Duration: {} · Buffer: {}%",
                format_points(plan.total_estimated_points),
                plan.estimated_duration,
                format_points(plan.buffer_percentage)
            ));

            if !plan.phases.is_empty() {
                let mut builder = Builder::default();
                builder.push_record(["Phase", "Duration", "Tasks", "Deliverables"]);
                for phase in &plan.phases {
                    builder.push_record([
                        phase.name.clone(),
                        phase.estimated_duration.clone(),
                        phase.tasks.join(", "),
                        phase.deliverables.join("; "),
                    ]);
                }
                lines.push(table(builder));
            }

            if !plan.milestones.is_empty() {
                let mut builder = Builder::default();
                builder.push_record(["Milestone", "Date", "Deliverable"]);
                for milestone in &plan.milestones {
                    builder.push_record([
                        milestone.name.clone(),
                        milestone.date.clone(),
                        milestone.deliverable.clone(),
                    ]);
                }
                lines.push(table(builder));
            }
            panels.push(lines.join("\n"));
        }

        panels.join("\n\n")
    }

    fn epics_panel(&self, result: &NormalizedResult) -> String {
        let mut lines = vec![self.heading("Epics")];
        for epic in result.epics() {
            lines.push(format!("  ● {} [{}]", epic.name, self.level(&epic.priority)));
            if !epic.description.is_empty() {
                lines.push(format!("    {}", epic.description));
            }
            if !epic.risk_factors.is_empty() {
                lines.push(format!("    Risk factors: {}", epic.risk_factors.join(", ")));
            }
        }
        lines.join("\n")
    }

    /// Echo of the submitted requirements.
    pub fn input_summary(&self, request: &EstimationRequest) -> String {
        let mut lines = vec![self.heading("Requirements"), indent(request.requirements())];
        if !request.additional_info().is_empty() {
            lines.push(self.heading("Additional information"));
            lines.push(indent(request.additional_info()));
        }
        lines.join("\n")
    }

    /// One status line for a running flow.
    pub fn progress(&self, progress: &FlowProgress) -> String {
        match progress {
            FlowProgress::Submitting => self.info("Submitting requirements..."),
            FlowProgress::Polling(state) if state.status.is_terminal() => self.info(&format!(
                "Estimation {} finished: {}",
                state.correlation_id,
                state.status.as_str()
            )),
            FlowProgress::Polling(state) => self.info(&format!(
                "Processing estimation {}... attempt {}/{}",
                state.correlation_id,
                state.attempts_made,
                state.max_attempts()
            )),
        }
    }

    /// Format a submitted job id.
    pub fn submitted(&self, id: &CorrelationId) -> String {
        match self.format {
            OutputFormat::Quiet => id.to_string(),
            OutputFormat::Json => json!({ "id": id }).to_string(),
            OutputFormat::Table => self.success(&format!("Estimation requested: {}", id)),
        }
    }

    /// Format a share link.
    pub fn share_link(&self, url: &str) -> String {
        match self.format {
            OutputFormat::Json => json!({ "url": url }).to_string(),
            _ => url.to_string(),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn level(&self, label: &str) -> String {
        self.colorize(label, level_color(label))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Color for a priority, complexity or risk label.
///
/// Accepts the Portuguese labels the service emits in both genders, and
/// their English equivalents.
pub fn level_color(label: &str) -> &'static str {
    match label.trim().to_lowercase().as_str() {
        "alta" | "alto" | "high" => "red",
        "média" | "media" | "médio" | "medio" | "medium" => "yellow",
        "baixa" | "baixo" | "low" => "green",
        _ => "",
    }
}

fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.1}", points)
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn indent(text: &str) -> String {
    text.lines().map(|line| format!("  {}", line)).collect::<Vec<_>>().join("\n")
}

fn table(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimai_client::{PollState, PollStatus, ResultSource};
    use estimai_domain::Fixture;

    fn estimation(source: ResultSource, document: Value) -> Estimation {
        Estimation {
            correlation_id: CorrelationId::new("job-9"),
            status: match source {
                ResultSource::Live => PollStatus::Succeeded,
                ResultSource::Fallback => PollStatus::TimedOut,
            },
            attempts_made: 4,
            source,
            document,
            fallback: Fixture::example(),
        }
    }

    #[test]
    fn test_table_renders_fixture_panels() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_estimation(&estimation(ResultSource::Fallback, Fixture::example().document()), None)
            .unwrap();

        assert!(output.contains("Results unavailable (timed_out)"));
        assert!(output.contains("Epics"));
        assert!(output.contains("T001"));
        assert!(output.contains("Total: 39 points"));
        assert!(output.contains("Buffer: 20%"));
        assert!(output.contains("Sum of task points: 39"));
    }

    #[test]
    fn test_table_echoes_input() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let request = EstimationRequest::new("Loja virtual", "2 devs").unwrap();
        let output = formatter
            .format_estimation(&estimation(ResultSource::Live, json!({"result": {"tasks": []}})), Some(&request))
            .unwrap();

        assert!(output.contains("Requirements\n  Loja virtual"));
        assert!(output.contains("Additional information\n  2 devs"));
        assert!(!output.contains("Results unavailable"));
    }

    #[test]
    fn test_unreadable_result_is_shown_raw() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let document = json!({"result": {"refined_requirements": "Plain text answer"}});
        let output = formatter
            .format_estimation(&estimation(ResultSource::Live, document), None)
            .unwrap();

        assert!(output.contains("could not be read as structured data"));
        assert!(output.contains("Plain text answer"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_estimation(&estimation(ResultSource::Live, json!({"result": {}})), None)
            .unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["id"], "job-9");
        assert_eq!(parsed["status"], "succeeded");
        assert_eq!(parsed["source"], "live");
        assert_eq!(parsed["attempts_made"], 4);
        assert_eq!(parsed["document"], json!({"result": {}}));
    }

    #[test]
    fn test_json_format_names_fixture_version() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let estimation = estimation(ResultSource::Fallback, Fixture::example().document());
        let parsed: Value = serde_json::from_str(&formatter.format_estimation(&estimation, None).unwrap()).unwrap();

        assert_eq!(parsed["source"], "fallback");
        assert_eq!(parsed["status"], "timed_out");
        assert_eq!(parsed["fixture_version"], estimai_domain::fallback::EXAMPLE_FIXTURE_VERSION);
    }

    #[test]
    fn test_simulated_id_is_labelled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut estimation = estimation(ResultSource::Live, json!({"result": {}}));
        estimation.correlation_id = CorrelationId::synthesize();

        let output = formatter.format_estimation(&estimation, None).unwrap();
        assert!(output.lines().next().unwrap().ends_with("(simulated)"));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let estimation = estimation(ResultSource::Live, json!({"result": {}}));
        assert_eq!(formatter.format_estimation(&estimation, None).unwrap(), "job-9");
        assert_eq!(formatter.submitted(&CorrelationId::new("job-9")), "job-9");
    }

    #[test]
    fn test_progress_line() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let state = PollState::new(CorrelationId::new("job-9"));
        assert_eq!(
            formatter.progress(&FlowProgress::Polling(state)),
            "ℹ Processing estimation job-9... attempt 0/60"
        );
    }

    #[test]
    fn test_progress_line_when_finished() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let state = PollState {
            correlation_id: CorrelationId::new("job-9"),
            attempts_made: 60,
            status: PollStatus::TimedOut,
        };
        assert_eq!(
            formatter.progress(&FlowProgress::Polling(state)),
            "ℹ Estimation job-9 finished: timed_out"
        );
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(level_color("Alta"), "red");
        assert_eq!(level_color("Médio"), "yellow");
        assert_eq!(level_color("MÉDIA"), "yellow");
        assert_eq!(level_color("baixo"), "green");
        assert_eq!(level_color("Low"), "green");
        assert_eq!(level_color("crítica"), "");
    }

    #[test]
    fn test_task_levels_are_colored() {
        colored::control::set_override(true);
        let formatter = Formatter::new(OutputFormat::Table, true);
        let output = formatter.format_result(&Fixture::example().normalized());
        let expected = ["Baixa".green(), "Baixo".green(), "Médio".yellow(), "Alto".red()].map(|c| c.to_string());
        colored::control::unset_override();

        for colored_label in expected {
            assert!(output.contains(&colored_label), "missing {:?}", colored_label);
        }
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
