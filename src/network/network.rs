use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::layers::dense::Layer;
use crate::network::metadata::ModelMetadata;

/// A pretrained feed-forward network, read-only after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl Network {
    pub fn new(layers: Vec<Layer>, metadata: Option<ModelMetadata>) -> Network {
        Network { layers, metadata }
    }

    /// Fan-in of the first layer.
    pub fn input_size(&self) -> usize {
        self.layers.first().map(|l| l.input_size()).unwrap_or(0)
    }

    /// Width of the last layer.
    pub fn output_size(&self) -> usize {
        self.layers.last().map(|l| l.size).unwrap_or(0)
    }

    /// Verifies every layer is internally consistent and feeds the next.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(PipelineError::model_unavailable("model has no layers"));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if let Some(msg) = layer.shape_error() {
                return Err(PipelineError::model_unavailable(format!("layer {}: {}", i, msg)));
            }
            if i > 0 && self.layers[i - 1].size != layer.input_size() {
                return Err(PipelineError::model_unavailable(format!(
                    "layer {} expects {} inputs but layer {} produces {}",
                    i,
                    layer.input_size(),
                    i - 1,
                    self.layers[i - 1].size
                )));
            }
        }
        Ok(())
    }

    /// Inference pass. Errors (instead of panicking) on a wrong input width.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_size() {
            return Err(PipelineError::internal(format!(
                "model expects {} inputs, got {}",
                self.input_size(),
                input.len()
            )));
        }
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.forward(&current);
        }
        Ok(current)
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a network written by `save_json`.
    /// Any failure is reported as `ModelUnavailable`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PipelineError::model_unavailable(format!(
                "model file not found at {}",
                path.display()
            )));
        }
        let file = std::fs::File::open(path).map_err(|e| {
            PipelineError::model_unavailable(format!("cannot open {}: {}", path.display(), e))
        })?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader).map_err(|e| {
            PipelineError::model_unavailable(format!("cannot parse {}: {}", path.display(), e))
        })?;
        network.validate()?;
        Ok(network)
    }
}
