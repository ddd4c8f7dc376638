//! Optional free-text elaboration of a diagnosis by an external
//! text-generation process.

pub mod process;

use serde::Serialize;

use crate::classifier::labels::LABEL_SEPARATOR;
use crate::error::EnrichmentError;

pub use process::ProcessEnricher;

/// Language the enrichment text is requested in. Unknown codes fall back to
/// English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Tamil,
    Gujarati,
}

impl Language {
    pub fn from_code(code: &str) -> Language {
        match code.trim().to_ascii_lowercase().as_str() {
            "hi" => Language::Hindi,
            "ta" => Language::Tamil,
            "gu" => Language::Gujarati,
            _ => Language::English,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Tamil => "Tamil",
            Language::Gujarati => "Gujarati",
        }
    }
}

/// The six enrichment fields. Every field defaults to an empty string so the
/// response shape does not depend on whether enrichment ran.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Enrichment {
    pub disease_type: String,
    pub symptoms: String,
    pub prevention: String,
    pub treatments: String,
    pub fertilizers: String,
    pub expected_yield: String,
}

impl Enrichment {
    pub const KEYS: [&'static str; 6] =
        ["disease_type", "symptoms", "prevention", "treatments", "fertilizers", "expected_yield"];

    /// Builds from a JSON object; strings are taken as-is, string arrays are
    /// joined with `", "`, anything else is rendered as JSON text.
    pub fn from_json_object(obj: &serde_json::Map<String, serde_json::Value>) -> Enrichment {
        let field = |key: &str| -> String {
            match obj.get(key) {
                None | Some(serde_json::Value::Null) => String::new(),
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Array(items)) if items.iter().all(|v| v.is_string()) => items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                Some(other) => other.to_string(),
            }
        };
        Enrichment {
            disease_type: field("disease_type"),
            symptoms: field("symptoms"),
            prevention: field("prevention"),
            treatments: field("treatments"),
            fertilizers: field("fertilizers"),
            expected_yield: field("expected_yield"),
        }
    }
}

/// How enrichment failures reach the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichmentPolicy {
    /// Failures are logged and the fields stay empty.
    #[default]
    Degrade,
    /// Timeouts become 504 and other failures 502.
    Strict,
}

/// Injected capability; shared by every request thread.
pub trait Enricher: Send + Sync {
    fn enrich(&self, label: &str, language: Language) -> Result<Enrichment, EnrichmentError>;

    /// False for the no-op implementation, so callers can skip the call.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Used when no text-generation command is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEnricher;

impl Enricher for NoopEnricher {
    fn enrich(&self, _label: &str, _language: Language) -> Result<Enrichment, EnrichmentError> {
        Ok(Enrichment::default())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

pub fn build_prompt(label: &str, language: Language) -> String {
    let plant = label.split(LABEL_SEPARATOR).next().unwrap_or(label);
    format!(
        "Plant: {}\nDisease: {}\n\n\
         Respond ONLY with a raw JSON object. Do not include explanations or extra text.\n\
         The JSON must have these keys:\n  {}\n\
         Please respond in {}.",
        plant,
        label,
        Enrichment::KEYS.join(", "),
        language.name()
    )
}
