use std::path::Path;

use tracing::{debug, info};

use crate::classifier::{default_labels, Classifier};
use crate::error::{PipelineError, Result};
use crate::network::{InputType, Network};
use crate::ranking::ScoreVector;
use crate::vision::ImageTensor;

/// [`Classifier`] backed by a JSON-serialized [`Network`].
#[derive(Debug)]
pub struct NetworkClassifier {
    network: Network,
    labels: Vec<String>,
    width: u32,
    height: u32,
}

impl NetworkClassifier {
    /// Loads and validates the model at `path`.
    ///
    /// `expected_side` is the configured square input resolution; the model's
    /// declared `ImageRgb` input must match it.
    pub fn load(path: impl AsRef<Path>, expected_side: u32) -> Result<NetworkClassifier> {
        let path = path.as_ref();
        let network = Network::load_json(path)?;
        let classifier = Self::from_network(network)?;
        if classifier.width != expected_side || classifier.height != expected_side {
            return Err(PipelineError::model_unavailable(format!(
                "model expects {}x{} input, configured image size is {}x{}",
                classifier.width, classifier.height, expected_side, expected_side
            )));
        }
        info!(
            path = %path.display(),
            classes = classifier.labels.len(),
            width = classifier.width,
            height = classifier.height,
            "disease classifier loaded"
        );
        Ok(classifier)
    }

    /// Wraps an already-built network. The metadata must declare an
    /// `ImageRgb` input whose size matches the first layer.
    pub fn from_network(network: Network) -> Result<NetworkClassifier> {
        network.validate()?;
        let metadata = network.metadata.clone().unwrap_or_default();
        let input_type = match metadata.input_type {
            Some(input_type) => input_type,
            None => {
                return Err(PipelineError::model_unavailable(
                    "model does not declare an ImageRgb input type",
                ))
            }
        };
        let InputType::ImageRgb { width, height } = input_type;
        let expected_inputs = input_type.feature_count();
        if network.input_size() != expected_inputs {
            return Err(PipelineError::model_unavailable(format!(
                "model declares {}x{} RGB input ({} values) but its first layer takes {}",
                width,
                height,
                expected_inputs,
                network.input_size()
            )));
        }
        let labels = metadata.output_labels.unwrap_or_else(default_labels);
        Ok(NetworkClassifier { network, labels, width, height })
    }
}

impl Classifier for NetworkClassifier {
    fn input_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn classify(&self, tensor: &ImageTensor) -> Result<ScoreVector> {
        if (tensor.width, tensor.height) != (self.width, self.height) {
            return Err(PipelineError::internal(format!(
                "tensor is {}x{}, classifier expects {}x{}",
                tensor.width, tensor.height, self.width, self.height
            )));
        }
        let scores = self.network.forward(&tensor.data)?;
        debug!(outputs = scores.len(), "classifier forward pass done");
        if scores.len() != self.labels.len() {
            return Err(PipelineError::ModelOutputMismatch {
                output_len: scores.len(),
                num_classes: self.labels.len(),
            });
        }
        Ok(ScoreVector::new(scores))
    }
}
