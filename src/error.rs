//! Error taxonomy shared by the pipeline, the rule engine and the HTTP layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that terminate a single request (or startup, for load failures).
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Missing form field, bad JSON, unsupported categorical value.
    #[error("{0}")]
    InvalidInput(String),

    /// Upload could not be decoded, or decoded into something unusable.
    #[error("Invalid image file")]
    InvalidImage(String),

    /// A categorical input has no row in the rule tables.
    #[error("{field} \"{value}\" not supported{context}")]
    UnsupportedCombination {
        field: &'static str,
        value: String,
        context: String,
    },

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Model output length mismatch")]
    ModelOutputMismatch { output_len: usize, num_classes: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Only raised under the strict enrichment policy.
    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl PipelineError {
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unsupported(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnsupportedCombination { field, value: value.into(), context: String::new() }
    }

    /// Like [`PipelineError::unsupported`], with a trailing qualifier such as
    /// `"for Tomato"`.
    pub fn unsupported_for(field: &'static str, value: impl Into<String>, owner: &str) -> Self {
        Self::UnsupportedCombination {
            field,
            value: value.into(),
            context: format!(" for {}", owner),
        }
    }

    pub fn model_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code this error maps to at the outer boundary.
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidInput(_) | Self::InvalidImage(_) | Self::UnsupportedCombination { .. } => 400,
            Self::Json(_) => 400,
            Self::Image(_) => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::Enrichment(EnrichmentError::Timeout(_)) => 504,
            Self::Enrichment(_) => 502,
            Self::ModelUnavailable(_)
            | Self::ModelOutputMismatch { .. }
            | Self::Config(_)
            | Self::Internal(_)
            | Self::Io(_) => 500,
        }
    }

    /// JSON body returned to the client.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::ModelOutputMismatch { output_len, num_classes } => serde_json::json!({
                "error": self.to_string(),
                "output_len": output_len,
                "num_classes": num_classes,
            }),
            Self::Json(e) => serde_json::json!({ "error": format!("Invalid JSON body: {}", e) }),
            Self::Image(_) => serde_json::json!({ "error": "Invalid image file" }),
            _ => serde_json::json!({ "error": self.to_string() }),
        }
    }
}

/// Failure of the optional text-generation collaborator. Never blocks the
/// primary response unless the strict enrichment policy is configured.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnrichmentError {
    #[error("enrichment is not configured")]
    Unavailable,

    #[error("LLM call timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("LLM call failed (exit code {code:?}): {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("Invalid LLM response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_plant_message_names_the_value() {
        let err = PipelineError::unsupported("Plant type", "Kiwi");
        assert_eq!(err.to_string(), "Plant type \"Kiwi\" not supported");
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn unsupported_stage_message_names_the_owner() {
        let err = PipelineError::unsupported_for("Growth stage", "Dormant", "Tomato");
        assert_eq!(err.to_string(), "Growth stage \"Dormant\" not supported for Tomato");
    }

    #[test]
    fn mismatch_body_carries_lengths() {
        let err = PipelineError::ModelOutputMismatch { output_len: 4, num_classes: 15 };
        let body = err.to_json();
        assert_eq!(err.status(), 500);
        assert_eq!(body["error"], "Model output length mismatch");
        assert_eq!(body["output_len"], 4);
        assert_eq!(body["num_classes"], 15);
    }

    #[test]
    fn strict_enrichment_failures_map_to_gateway_codes() {
        let timeout: PipelineError = EnrichmentError::Timeout(std::time::Duration::from_secs(120)).into();
        assert_eq!(timeout.status(), 504);
        let failed: PipelineError = EnrichmentError::Failed { code: Some(1), stderr: "boom".into() }.into();
        assert_eq!(failed.status(), 502);
        assert_eq!(PipelineError::PayloadTooLarge { limit: 10 }.status(), 413);
    }

    #[test]
    fn invalid_image_body_is_fixed_text() {
        let err = PipelineError::InvalidImage("truncated".into());
        assert_eq!(err.to_json(), serde_json::json!({ "error": "Invalid image file" }));
    }
}
