// Per-line batch loops behind the apply and validate commands.
//
// One bad line never stops a batch: it is reported, counted, and skipped.
// Only the caller decides whether the final tally is a failure.

use tracing::warn;

use crate::guardrail::invoker::GuardedInvoker;
use crate::output::terminal;
use crate::records::{jsonl, validate};

/// Outcome counts for one apply run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyTally {
    pub succeeded: usize,
    pub failed: usize,
    pub malformed: usize,
}

/// Outcome counts for one validate run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationTally {
    pub checked: usize,
    pub invalid: usize,
}

impl ValidationTally {
    pub fn is_clean(&self) -> bool {
        self.invalid == 0
    }
}

/// Run every record in `text` through the guarded invoker.
pub async fn apply_records(invoker: &GuardedInvoker<'_>, text: &str) -> ApplyTally {
    let mut tally = ApplyTally::default();

    for parsed in jsonl::parse_records(text) {
        let record = match parsed.result {
            Ok(record) => record,
            Err(e) => {
                terminal::display_parse_error(parsed.line_number, &e);
                tally.malformed += 1;
                continue;
            }
        };

        terminal::display_record_header(&record.record_id, &record.model_input.prompt);

        match invoker.invoke_with_guardrail(&record).await {
            Ok(response) => {
                let summary = record.redacted(response.model_response);
                terminal::display_redacted_summary(&summary, &response.assessment);
                tally.succeeded += 1;
            }
            Err(e) => {
                warn!(record_id = record.record_id, error = %e, "Guarded call failed");
                terminal::display_failure(&record.record_id, &e);
                tally.failed += 1;
            }
        }
    }

    tally
}

/// Check every non-blank line of `text` for schema and contact problems.
pub fn validate_lines(text: &str) -> ValidationTally {
    let mut tally = ValidationTally::default();

    for (line_number, line) in jsonl::non_blank_lines(text) {
        tally.checked += 1;
        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                terminal::display_parse_error(line_number, &e);
                tally.invalid += 1;
                continue;
            }
        };

        let issues = validate::validate_record(&value);
        let record_id = value.get("recordId").and_then(serde_json::Value::as_str);
        if !terminal::display_validation(line_number, record_id, &issues) {
            tally.invalid += 1;
        }
    }

    tally
}
