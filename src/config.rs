use std::env;

use anyhow::Result;
use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::guardrail::invoker::{DEFAULT_GUARDRAIL_VERSION, DEFAULT_MODEL_ID};

pub const DEFAULT_INPUT_BUCKET: &str = "pizzacustomers";
pub const DEFAULT_INPUT_KEY: &str = "pizza_batch_input_ten.jsonl";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override anything set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Named AWS profile (AWS_PROFILE). Unset means the default credential chain.
    pub aws_profile: Option<String>,
    /// Region override (AWS_REGION). Unset means whatever the profile says.
    pub aws_region: Option<String>,
    /// Guardrail to apply (GUARDRAIL_ID). Required for `apply`.
    pub guardrail_id: String,
    pub guardrail_version: String,
    pub model_id: String,
    /// S3 location `apply` reads from when `--input` is not given
    pub input_bucket: String,
    pub input_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            aws_profile: get("AWS_PROFILE"),
            aws_region: get("AWS_REGION"),
            guardrail_id: get("GUARDRAIL_ID").unwrap_or_default(),
            guardrail_version: get("GUARDRAIL_VERSION")
                .unwrap_or_else(|| DEFAULT_GUARDRAIL_VERSION.to_string()),
            model_id: get("BEDROCK_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            input_bucket: get("PIZZA_GUARD_BUCKET")
                .unwrap_or_else(|| DEFAULT_INPUT_BUCKET.to_string()),
            input_key: get("PIZZA_GUARD_KEY").unwrap_or_else(|| DEFAULT_INPUT_KEY.to_string()),
        }
    }

    /// Check that a guardrail ID is configured.
    /// Call this before anything that applies the guardrail.
    pub fn require_guardrail_id(&self) -> Result<()> {
        if self.guardrail_id.is_empty() {
            anyhow::bail!(
                "GUARDRAIL_ID not set. Add it to your .env file or pass --guardrail-id.\n\
                 Run `pizza-guard create-guardrail` to provision one."
            );
        }
        Ok(())
    }

    /// Resolve AWS credentials and region, honoring the profile and region overrides.
    pub async fn aws_sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &self.aws_profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &self.aws_region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader.load().await
    }
}
