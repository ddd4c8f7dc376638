use crate::error::Result;
use crate::pipeline::{AppContext, CropRequest, QuickCropRequest};
use crate::server::routes::{ApiRequest, ApiResponse};

/// POST /api/recommend-plants
pub fn handle(req: &ApiRequest, ctx: &AppContext) -> Result<ApiResponse> {
    let body: CropRequest = req.json()?;
    Ok(ApiResponse::json(200, &ctx.recommend_plants(&body)?))
}

/// POST /recommend
pub fn quick(req: &ApiRequest, ctx: &AppContext) -> Result<ApiResponse> {
    let body: QuickCropRequest = req.json()?;
    Ok(ApiResponse::json(200, &ctx.quick_recommend(&body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agronomy::RuleBook;
    use crate::server::test_support::tiny_classifier;
    use tiny_http::Method;

    #[test]
    fn quick_route_ignores_pin_code() {
        let ctx = AppContext::new(Box::new(tiny_classifier()), RuleBook::builtin());
        let req = ApiRequest::new(
            Method::Post,
            "/recommend",
            "application/json",
            br#"{"soil_type":"Sandy","pin_code":"641001"}"#.to_vec(),
        );
        let json = quick(&req, &ctx).unwrap().body_json();
        assert_eq!(json["soil"], "Sandy");
        assert_eq!(json["recommended_crops"], serde_json::json!(["Peanut", "Watermelon", "Potato"]));
        assert_eq!(json["temperature"], 25.0);
    }
}
