//! Process configuration read once at startup from `LEAFCARE_*` variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::enrichment::EnrichmentPolicy;
use crate::error::{PipelineError, Result};

pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_MODEL_PATH: &str = "model/plant_leaf_diseases_model.json";
pub const DEFAULT_IMAGE_SIZE: u32 = 256;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "leafcare=info,warn"
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: String,
    pub model_path: PathBuf,
    /// Side of the square the classifier input is resized to.
    pub image_size: u32,
    pub npk_model_path: Option<PathBuf>,
    pub rules_path: Option<PathBuf>,
    pub llm_command: Option<String>,
    pub llm_timeout: Duration,
    pub enrichment_policy: EnrichmentPolicy,
    pub cors_origin: String,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            addr: DEFAULT_ADDR.to_string(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            image_size: DEFAULT_IMAGE_SIZE,
            npk_model_path: None,
            rules_path: None,
            llm_command: None,
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            enrichment_policy: EnrichmentPolicy::Degrade,
            cors_origin: "*".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn parsed<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| PipelineError::config(format!("{}={:?}: {}", key, v, e))),
    }
}

fn flag(key: &str, raw: Option<String>) -> Result<bool> {
    match raw.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(PipelineError::config(format!("{}={:?} is not a boolean", key, v))),
        },
    }
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let image_size = parsed("LEAFCARE_IMAGE_SIZE", get("LEAFCARE_IMAGE_SIZE"), defaults.image_size)?;
        if image_size == 0 {
            return Err(PipelineError::config("LEAFCARE_IMAGE_SIZE must be positive"));
        }
        let timeout_secs =
            parsed("LEAFCARE_LLM_TIMEOUT_SECS", get("LEAFCARE_LLM_TIMEOUT_SECS"), DEFAULT_LLM_TIMEOUT_SECS)?;
        let strict = flag("LEAFCARE_ENRICHMENT_STRICT", get("LEAFCARE_ENRICHMENT_STRICT"))?;

        Ok(Config {
            addr: get("LEAFCARE_ADDR").unwrap_or(defaults.addr),
            model_path: get("LEAFCARE_MODEL_PATH").map(PathBuf::from).unwrap_or(defaults.model_path),
            image_size,
            npk_model_path: get("LEAFCARE_NPK_MODEL_PATH").map(PathBuf::from),
            rules_path: get("LEAFCARE_RULES_PATH").map(PathBuf::from),
            llm_command: get("LEAFCARE_LLM_COMMAND"),
            llm_timeout: Duration::from_secs(timeout_secs),
            enrichment_policy: if strict { EnrichmentPolicy::Strict } else { EnrichmentPolicy::Degrade },
            cors_origin: get("LEAFCARE_CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            max_upload_bytes: parsed(
                "LEAFCARE_MAX_UPLOAD_BYTES",
                get("LEAFCARE_MAX_UPLOAD_BYTES"),
                defaults.max_upload_bytes,
            )?,
        })
    }
}
