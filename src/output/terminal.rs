// Colored terminal output for the generate, create, apply, and validate commands.
//
// main.rs decides what to show; this module decides how it looks.

use colored::Colorize;

use crate::config::Config;
use crate::guardrail::error::InvokeError;
use crate::guardrail::invoke::response_text;
use crate::guardrail::policy::GuardrailPolicy;
use crate::guardrail::traits::{CreatedGuardrail, GuardrailAction, GuardrailAssessment};
use crate::records::validate::ValidationIssue;
use crate::records::RedactedSummary;

/// Announce the record about to be processed.
pub fn display_record_header(record_id: &str, prompt: &str) {
    println!("\n{}", format!("Processing record ID: {record_id}").bold());
    println!(
        "  {}",
        super::truncate_chars(&super::single_line(prompt), 100).dimmed()
    );
    println!("Applying guardrail and invoking model...");
}

/// Print the redacted record and the model reply as indented JSON.
pub fn display_redacted_summary(summary: &RedactedSummary, assessment: &GuardrailAssessment) {
    println!(
        "\n{}",
        "Guardrail check passed and model response received (sensitive data redacted):".green()
    );
    println!("  Guardrail action: {}", colorize_action(&assessment.action));
    for output in &assessment.outputs {
        println!(
            "  Guardrail output: {}",
            super::truncate_chars(&super::single_line(output), 120).dimmed()
        );
    }

    if let Some(text) = response_text(&summary.model_response) {
        println!(
            "  Reply preview: {}",
            super::truncate_chars(&super::single_line(&text), 120)
        );
    }

    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{json}"),
        Err(e) => println!("  {} could not render summary: {e}", "Warning:".yellow()),
    }
}

/// Report a record whose guarded call failed.
pub fn display_failure(record_id: &str, error: &InvokeError) {
    println!("  {}", error.to_string().red());
    println!(
        "\n{} {}",
        "Process failed for record".red().bold(),
        record_id.red().bold()
    );
}

/// Report a JSONL line that could not be parsed.
pub fn display_parse_error(line_number: usize, error: &serde_json::Error) {
    println!(
        "{}",
        format!("Error parsing JSON line {line_number}: {error}").red()
    );
}

/// Print a guardrail policy as the JSON payload that would be sent.
pub fn display_policy(policy: &GuardrailPolicy) {
    println!("{}", "=== Guardrail Policy (dry run) ===".bold());
    match serde_json::to_string_pretty(policy) {
        Ok(json) => println!("{json}"),
        Err(e) => println!("  {} could not render policy: {e}", "Warning:".yellow()),
    }
}

/// Print the identifiers of a newly created guardrail.
pub fn display_created_guardrail(created: &CreatedGuardrail) {
    println!("{}", "Guardrail created successfully:".green().bold());
    match serde_json::to_string_pretty(created) {
        Ok(json) => println!("{json}"),
        Err(e) => println!("  {} could not render response: {e}", "Warning:".yellow()),
    }
    println!(
        "\n{}",
        format!("Set GUARDRAIL_ID={} in your .env to use it.", created.guardrail_id).dimmed()
    );
}

/// Print the validation result for one line. Returns true if the line is clean.
pub fn display_validation(
    line_number: usize,
    record_id: Option<&str>,
    issues: &[ValidationIssue],
) -> bool {
    let label = match record_id {
        Some(id) => format!("line {line_number} (record {id})"),
        None => format!("line {line_number}"),
    };

    if issues.is_empty() {
        println!("  {} {label}", "✓".green());
        return true;
    }

    println!("  {} {label}", "✗".red());
    for issue in issues {
        println!("      {}", issue.to_string().yellow());
    }
    false
}

/// Show the effective configuration.
pub fn display_config(config: &Config) {
    println!("{}", "=== pizza-guard configuration ===".bold());
    println!(
        "  AWS profile:       {}",
        config.aws_profile.as_deref().unwrap_or("(default chain)")
    );
    println!(
        "  AWS region:        {}",
        config.aws_region.as_deref().unwrap_or("(from profile)")
    );
    if config.guardrail_id.is_empty() {
        println!("  Guardrail ID:      {}", "not set".yellow());
        println!("    Run `pizza-guard create-guardrail`, then set GUARDRAIL_ID");
    } else {
        println!("  Guardrail ID:      {}", config.guardrail_id);
    }
    println!("  Guardrail version: {}", config.guardrail_version);
    println!("  Model:             {}", config.model_id);
    println!(
        "  S3 input:          s3://{}/{}",
        config.input_bucket, config.input_key
    );
}

fn colorize_action(action: &GuardrailAction) -> colored::ColoredString {
    match action {
        GuardrailAction::Passed => action.as_str().green(),
        GuardrailAction::Intervened => action.as_str().yellow().bold(),
        GuardrailAction::Unknown(_) => format!("{} (unrecognized)", action.as_str()).red().bold(),
    }
}
