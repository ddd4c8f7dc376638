pub mod labels;
pub mod network_classifier;

pub use labels::{default_labels, DISEASE_CLASSES};
pub use network_classifier::NetworkClassifier;

use crate::error::Result;
use crate::ranking::ScoreVector;
use crate::vision::ImageTensor;

/// A pretrained, fixed-topology image classifier.
///
/// Implementations are loaded once at startup and only read afterwards, so
/// they are shared across request threads without locking.
pub trait Classifier: Send + Sync {
    /// `(width, height)` the classifier expects its RGB input resized to.
    fn input_size(&self) -> (u32, u32);

    /// Ordered class labels; a score vector must have exactly this many entries.
    fn labels(&self) -> &[String];

    /// Scores for each label. Fails with `ModelOutputMismatch` if the model
    /// produced a vector whose length differs from `labels().len()`.
    fn classify(&self, tensor: &ImageTensor) -> Result<ScoreVector>;
}
