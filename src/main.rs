use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use pizza_guard::batch;
use pizza_guard::config::Config;
use pizza_guard::guardrail::bedrock::{BedrockAdmin, BedrockRuntime};
use pizza_guard::guardrail::invoker::GuardedInvoker;
use pizza_guard::guardrail::policy::{
    GuardrailPolicy, DEFAULT_GUARDRAIL_DESCRIPTION, DEFAULT_GUARDRAIL_NAME,
};
use pizza_guard::guardrail::traits::GuardrailAdmin;
use pizza_guard::output::terminal;
use pizza_guard::records::generator::RecordGenerator;
use pizza_guard::records::{jsonl, FeedbackRecord};
use pizza_guard::source::RecordSource;

/// pizza-guard: synthetic feedback records and Bedrock guardrail tooling.
///
/// Generate fake customer feedback, provision a PII guardrail, and run
/// records through the guardrail and a hosted model.
#[derive(Parser)]
#[command(name = "pizza-guard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate synthetic feedback records as JSONL
    Generate {
        /// Number of records to generate
        #[arg(long, default_value = "10")]
        count: usize,

        /// Output file
        #[arg(long, default_value = "claude_batch_input.jsonl")]
        output: PathBuf,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Create the PII protection guardrail
    CreateGuardrail {
        #[arg(long, default_value = DEFAULT_GUARDRAIL_NAME)]
        name: String,

        #[arg(long, default_value = DEFAULT_GUARDRAIL_DESCRIPTION)]
        description: String,

        /// Print the policy payload without calling the service
        #[arg(long)]
        dry_run: bool,
    },

    /// Apply the guardrail to each record, then invoke the model
    Apply {
        /// Read records from a local JSONL file instead of S3
        #[arg(long, conflicts_with_all = ["bucket", "key"])]
        input: Option<PathBuf>,

        /// S3 bucket holding the records (default: PIZZA_GUARD_BUCKET)
        #[arg(long)]
        bucket: Option<String>,

        /// S3 object key (default: PIZZA_GUARD_KEY)
        #[arg(long)]
        key: Option<String>,

        /// Guardrail to apply (default: GUARDRAIL_ID)
        #[arg(long)]
        guardrail_id: Option<String>,

        /// Guardrail version (default: GUARDRAIL_VERSION or DRAFT)
        #[arg(long)]
        guardrail_version: Option<String>,

        /// Model to invoke (default: BEDROCK_MODEL_ID)
        #[arg(long)]
        model_id: Option<String>,
    },

    /// Check a JSONL file for missing fields and malformed contact details
    Validate {
        #[arg(long, default_value = "claude_batch_input.jsonl")]
        input: PathBuf,
    },

    /// Show the effective configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pizza_guard=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            count,
            output,
            seed,
        } => {
            let records = match seed {
                Some(seed) => {
                    generate(RecordGenerator::new(StdRng::seed_from_u64(seed)), count)?
                }
                None => generate(RecordGenerator::new(rand::rng()), count)?,
            };

            jsonl::write_records(&output, &records)?;

            println!(
                "Generated {} entries and saved to {}",
                records.len(),
                output.display()
            );
        }

        Commands::CreateGuardrail {
            name,
            description,
            dry_run,
        } => {
            let policy = GuardrailPolicy::pii_protection(name, description);

            if dry_run {
                terminal::display_policy(&policy);
                return Ok(());
            }

            let config = Config::load()?;
            let sdk_config = config.aws_sdk_config().await;
            let admin = BedrockAdmin::new(&sdk_config);

            info!(name = policy.name, "Creating guardrail");
            let created = admin
                .create_guardrail(&policy)
                .await
                .context("Guardrail creation failed")?;

            terminal::display_created_guardrail(&created);
            println!("\n{}", "Guardrail configuration completed successfully".bold());
        }

        Commands::Apply {
            input,
            bucket,
            key,
            guardrail_id,
            guardrail_version,
            model_id,
        } => {
            let mut config = Config::load()?;
            if let Some(id) = guardrail_id {
                config.guardrail_id = id;
            }
            if let Some(version) = guardrail_version {
                config.guardrail_version = version;
            }
            if let Some(model) = model_id {
                config.model_id = model;
            }
            config.require_guardrail_id()?;

            let source = match input {
                Some(path) => RecordSource::File(path),
                None => RecordSource::S3 {
                    bucket: bucket.unwrap_or_else(|| config.input_bucket.clone()),
                    key: key.unwrap_or_else(|| config.input_key.clone()),
                },
            };

            let sdk_config = config.aws_sdk_config().await;
            println!("Reading records from {source}...");
            let text = source
                .load(Some(&sdk_config))
                .await
                .with_context(|| format!("Could not load records from {source}"))?;

            let runtime = BedrockRuntime::new(&sdk_config);
            let invoker = GuardedInvoker::new(
                &runtime,
                &config.guardrail_id,
                &config.guardrail_version,
                &config.model_id,
            );
            info!(
                guardrail_id = invoker.guardrail_id(),
                model_id = invoker.model_id(),
                "Guarded invoker ready"
            );

            let tally = batch::apply_records(&invoker, &text).await;

            println!("\n{}", "Apply complete.".bold());
            println!("  Records processed: {}", tally.succeeded);
            if tally.failed > 0 {
                println!("  Records failed:    {}", tally.failed.to_string().red());
            }
            if tally.malformed > 0 {
                println!("  Malformed lines:   {}", tally.malformed.to_string().yellow());
            }
        }

        Commands::Validate { input } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;

            println!("Validating {}...", input.display());

            let tally = batch::validate_lines(&text);

            println!("\n  Lines checked: {}", tally.checked);
            if !tally.is_clean() {
                anyhow::bail!(
                    "{} of {} lines failed validation",
                    tally.invalid,
                    tally.checked
                );
            }
            println!("  {}", "All records valid.".green());
        }

        Commands::Status => {
            let config = Config::load()?;
            terminal::display_config(&config);
        }
    }

    Ok(())
}

/// Generate `count` records with a progress bar.
fn generate<R: Rng>(
    mut generator: RecordGenerator<R>,
    count: usize,
) -> Result<Vec<FeedbackRecord>> {
    let pb = ProgressBar::new(count as u64);
    pb.set_style(ProgressStyle::default_bar().template("  Records [{bar:30}] {pos}/{len}")?);

    let records = generator.generate_with(count, |_| pb.inc(1));
    pb.finish_and_clear();

    Ok(records)
}
