//! HTTP surface over `tiny_http`, one thread per request.

pub mod handlers;
pub mod multipart;
pub mod routes;

use std::sync::Arc;

use tiny_http::Server;

use crate::error::{PipelineError, Result};
use crate::pipeline::AppContext;

pub use routes::{dispatch, handle, ApiRequest, ApiResponse};

pub fn bind(addr: &str) -> Result<Server> {
    Server::http(addr).map_err(|e| PipelineError::config(format!("cannot bind {}: {}", addr, e)))
}

/// Serves until the listener closes. Each request runs on its own thread
/// against the shared, read-only context.
pub fn serve(server: Server, ctx: Arc<AppContext>) {
    for request in server.incoming_requests() {
        let ctx = Arc::clone(&ctx);
        std::thread::spawn(move || {
            routes::dispatch(request, ctx);
        });
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::activation::activation::ActivationFunction;
    use crate::classifier::NetworkClassifier;
    use crate::layers::dense::Layer;
    use crate::math::matrix::Matrix;
    use crate::network::{InputType, ModelMetadata, Network};

    /// 2x2 RGB input, 15 outputs, class 7 (`Tomato_Late_blight`) always wins.
    pub fn tiny_classifier() -> NetworkClassifier {
        let mut biases = vec![0.0; 15];
        biases[7] = 3.0;
        let layer = Layer::new(Matrix::zeros(12, 15), biases, ActivationFunction::Softmax);
        let metadata = ModelMetadata {
            description: Some("test".into()),
            input_type: Some(InputType::ImageRgb { width: 2, height: 2 }),
            output_labels: None,
        };
        NetworkClassifier::from_network(Network::new(vec![layer], Some(metadata)))
            .expect("tiny classifier is well-formed")
    }
}
