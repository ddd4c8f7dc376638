pub mod math;
pub mod activation;
pub mod layers;
pub mod network;

pub mod agronomy;
pub mod classifier;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod pipeline;
pub mod ranking;
pub mod response;
pub mod server;
pub mod vision;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::{InputType, ModelMetadata};

pub use agronomy::{NpkModel, RuleBook};
pub use classifier::{Classifier, NetworkClassifier};
pub use config::Config;
pub use enrichment::{Enricher, EnrichmentPolicy, NoopEnricher, ProcessEnricher};
pub use error::{EnrichmentError, PipelineError, Result};
pub use pipeline::AppContext;
pub use ranking::{rank, RankedPrediction, ScoreVector};
