use crate::error::Result;
use crate::pipeline::{AppContext, FertilizerRequest};
use crate::server::routes::{ApiRequest, ApiResponse};

/// POST /api/fertilizer-recommendation
pub fn handle(req: &ApiRequest, ctx: &AppContext) -> Result<ApiResponse> {
    let body: FertilizerRequest = req.json()?;
    Ok(ApiResponse::json(200, &ctx.recommend_fertilizer(&body)?))
}
