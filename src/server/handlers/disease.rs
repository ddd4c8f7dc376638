use crate::error::{PipelineError, Result};
use crate::pipeline::{AppContext, DEFAULT_LANGUAGE};
use crate::server::routes::{ApiRequest, ApiResponse};

// ---------------------------------------------------------------------------
// POST /api/detect-disease   (image field `leaf`)
// POST /analyze              (image field `file`)
// ---------------------------------------------------------------------------

pub fn detect_disease(req: &ApiRequest, ctx: &AppContext) -> Result<ApiResponse> {
    run(req, ctx, "leaf", "No leaf image uploaded")
}

pub fn analyze(req: &ApiRequest, ctx: &AppContext) -> Result<ApiResponse> {
    run(req, ctx, "file", "No image file uploaded")
}

fn run(req: &ApiRequest, ctx: &AppContext, field: &str, missing: &str) -> Result<ApiResponse> {
    let form = req.multipart()?;
    let image = form.file(field).ok_or_else(|| PipelineError::invalid_input(missing))?;
    let lang = form.text("lang").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let report = ctx.detect_disease(image, &lang)?;
    Ok(ApiResponse::json(200, &report))
}
