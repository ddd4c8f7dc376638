/// leafcare HTTP service
///
/// Leaf disease detection and agronomic advice over a synchronous tiny_http
/// server. All configuration comes from `LEAFCARE_*` environment variables;
/// see `leafcare::config`.
///
/// Run with:
///   LEAFCARE_MODEL_PATH=model/plant_leaf_diseases_model.json cargo run --bin leafcare-server --release
///
/// Routes:
///   GET  /                                 liveness text
///   GET  /health                           loaded collaborators
///   POST /api/detect-disease  /analyze     leaf photo → diagnosis
///   POST /api/fertilizer-recommendation    NPK plan
///   POST /api/recommend-plants             crop list
///   POST /recommend                        soil-only crop shortlist
///   POST /api/detect-soil                  soil type placeholder

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use leafcare::config::{default_log_filter, Config};
use leafcare::server;
use leafcare::AppContext;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_log_filter())))
        .init();

    tracing::info!("leafcare v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Every model and table is loaded here; a bad file stops startup rather
    // than failing requests later.
    let ctx = match AppContext::from_config(&config) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            return ExitCode::FAILURE;
        }
    };

    let listener = match server::bind(&config.addr) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(addr = %config.addr, "listening");

    server::serve(listener, ctx);
    ExitCode::SUCCESS
}
