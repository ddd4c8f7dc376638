use serde::Serialize;

use crate::error::Result;
use crate::pipeline::AppContext;
use crate::server::routes::ApiResponse;

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    model_loaded: bool,
    classes: usize,
    enrichment: bool,
    npk_model: bool,
}

/// GET /health
pub fn handle(ctx: &AppContext) -> Result<ApiResponse> {
    let health = Health {
        status: "ok",
        // The context cannot exist without a loaded classifier.
        model_loaded: true,
        classes: ctx.classifier.labels().len(),
        enrichment: ctx.enricher.is_enabled(),
        npk_model: ctx.npk_model.is_some(),
    };
    Ok(ApiResponse::json(200, &health))
}
