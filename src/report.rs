//! Non-interactive evaluation and its report.
//!
//! `run_inputs` drives one calculator session over a list of inputs;
//! `format_report` is pure: (EvalReport, OutputFormat) → String.

use serde::Serialize;
use tracing::info;

use crate::calculator::Calculator;
use crate::types::{HistoryEntry, OutputFormat, ScientificFunction, SessionConfig};

/// Outcome of one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalResult {
    /// The text entered.
    pub input: String,
    /// The display after evaluation.
    pub display: String,
    /// Whether evaluation ended in "Error".
    pub error: bool,
}

/// Outcome of a whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvalReport {
    pub results: Vec<EvalResult>,
    /// The session history, oldest first.
    pub history: Vec<HistoryEntry>,
}

impl EvalReport {
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|r| r.error)
    }
}

/// Evaluate each input in one session, clearing the display between
/// inputs. With `function`, the function is applied to each input
/// instead of pressing "=".
pub fn run_inputs(
    inputs: &[String],
    function: Option<ScientificFunction>,
    config: SessionConfig,
) -> EvalReport {
    let mut calc = Calculator::with_config(config);
    let mut results = Vec::with_capacity(inputs.len());

    for input in inputs {
        calc.clear();
        calc.input_text(input.trim());
        match function {
            Some(f) => calc.apply_function(f),
            None => calc.calculate(),
        }
        results.push(EvalResult {
            input: input.clone(),
            display: calc.display().to_string(),
            error: calc.is_error(),
        });
    }

    info!(
        inputs = inputs.len(),
        recorded = calc.history().len(),
        "eval session finished"
    );

    EvalReport {
        results,
        history: calc.history().to_vec(),
    }
}

/// Format an evaluation report for output.
pub fn format_report(report: &EvalReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(report),
        OutputFormat::Json => format_json(report),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(report: &EvalReport) -> String {
    let mut out = String::new();

    for result in &report.results {
        out.push_str(&format!("{} = {}\n", result.input, result.display));
    }

    if !report.history.is_empty() {
        out.push('\n');
        out.push_str("=== History ===\n");
        for entry in &report.history {
            out.push_str(&format!("{} -> {}\n", entry.expression, entry.result));
        }
    }

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(report: &EvalReport) -> String {
    serde_json::to_string_pretty(report)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize report: {}\"}}", e))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AngleMode;

    fn inputs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_report() -> EvalReport {
        run_inputs(&inputs(&["2+2", "2++", "3**2"]), None, SessionConfig::default())
    }

    // --- Session ---

    #[test]
    fn each_input_is_evaluated_from_a_clear_display() {
        let report = sample_report();
        let displays: Vec<_> = report.results.iter().map(|r| r.display.as_str()).collect();
        assert_eq!(displays, vec!["4", "Error", "9"]);
    }

    #[test]
    fn failed_inputs_are_flagged_and_not_recorded() {
        let report = sample_report();
        assert!(report.has_errors());
        assert!(report.results[1].error);
        assert_eq!(
            report.history,
            vec![HistoryEntry::new("2+2", "4"), HistoryEntry::new("3**2", "9")]
        );
    }

    #[test]
    fn inputs_share_one_session_history() {
        let report = run_inputs(&inputs(&["2+2", "3*3"]), None, SessionConfig::default());
        assert_eq!(report.results[1].display, "9");
        assert_eq!(
            report.history,
            vec![HistoryEntry::new("2+2", "4"), HistoryEntry::new("3*3", "9")]
        );
    }

    #[test]
    fn function_is_applied_instead_of_equals() {
        let config = SessionConfig {
            angle_mode: AngleMode::Degrees,
            ..Default::default()
        };
        let report = run_inputs(&inputs(&["0", "-4"]), Some(ScientificFunction::Cos), config);
        assert_eq!(report.results[0].display, "1");
        assert_eq!(report.history[1].expression, "cos(-4)");
        assert!(!report.has_errors());
    }

    #[test]
    fn empty_input_list_gives_empty_report() {
        let report = run_inputs(&[], None, SessionConfig::default());
        assert_eq!(report, EvalReport::default());
    }

    // --- Human format ---

    #[test]
    fn human_format_lists_results_then_history() {
        let output = format_report(&sample_report(), OutputFormat::Human);
        assert!(output.starts_with("2+2 = 4\n2++ = Error\n3**2 = 9\n"));
        assert!(output.contains("=== History ===\n2+2 -> 4\n3**2 -> 9\n"));
    }

    #[test]
    fn human_format_omits_empty_history() {
        let report = run_inputs(&inputs(&["1/0"]), None, SessionConfig::default());
        let output = format_report(&report, OutputFormat::Human);
        assert_eq!(output, "1/0 = Error\n");
    }

    // --- JSON format ---

    #[test]
    fn json_format_has_expected_fields() {
        let output = format_report(&sample_report(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("Invalid JSON");

        assert!(parsed["results"].is_array());
        assert_eq!(parsed["results"][1]["display"], "Error");
        assert_eq!(parsed["results"][1]["error"], true);
        assert_eq!(parsed["history"][0]["expression"], "2+2");
        assert_eq!(parsed["history"][0]["result"], "4");
    }
}
