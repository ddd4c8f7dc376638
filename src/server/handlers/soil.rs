use crate::error::{PipelineError, Result};
use crate::pipeline::AppContext;
use crate::server::routes::{ApiRequest, ApiResponse};

/// POST /api/detect-soil
///
/// The upload is required but not analysed; see [`AppContext::detect_soil`].
pub fn handle(req: &ApiRequest, ctx: &AppContext) -> Result<ApiResponse> {
    let form = req.multipart()?;
    if form.file("image").is_none() {
        return Err(PipelineError::invalid_input("No soil image uploaded"));
    }
    let report = ctx.detect_soil(&mut rand::thread_rng());
    Ok(ApiResponse::json(200, &report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agronomy::{RuleBook, SoilType};
    use crate::server::multipart::build_body;
    use crate::server::routes::handle;
    use crate::server::test_support::tiny_classifier;
    use tiny_http::Method;

    #[test]
    fn requires_an_image_and_returns_a_known_soil() {
        let ctx = AppContext::new(Box::new(tiny_classifier()), RuleBook::builtin());
        let body = build_body("b", &[("image", Some("soil.jpg"), &b"anything"[..])]);
        let res = handle(&ApiRequest::new(Method::Post, "/api/detect-soil", "multipart/form-data; boundary=b", body), &ctx);
        assert_eq!(res.status, 200);
        let json = res.body_json();
        assert!(SoilType::parse(json["soil_type"].as_str().unwrap()).is_some());
        assert_eq!(json["confidence"], 0.85);

        let empty = build_body("b", &[]);
        let res = handle(&ApiRequest::new(Method::Post, "/api/detect-soil", "multipart/form-data; boundary=b", empty), &ctx);
        assert_eq!(res.status, 400);
    }
}
