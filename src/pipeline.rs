//! Process-wide state built once at startup, and the operations the HTTP
//! layer and the CLI expose.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::{info, warn};

use crate::agronomy::{crops, fertilizer, CropQuery, FertilizerQuery, NpkModel, RuleBook, SoilType};
use crate::classifier::{Classifier, NetworkClassifier};
use crate::config::Config;
use crate::enrichment::{Enricher, Enrichment, EnrichmentPolicy, Language, NoopEnricher, ProcessEnricher};
use crate::error::{PipelineError, Result};
use crate::ranking::rank;
use crate::response::{
    crop_report, disease_report, fertilizer_report, CropReport, DiseaseReport, FertilizerReport, QuickCropReport,
    SoilReport,
};
use crate::vision::normalize_image;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_TEMPERATURE: f64 = 25.0;
pub const SOIL_CONFIDENCE: f64 = 0.85;

/// A JSON number, or a string holding one (form clients often send both).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn value(&self, field: &str) -> Result<f64> {
        match self {
            NumberOrText::Number(n) => Ok(*n),
            NumberOrText::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| PipelineError::invalid_input(format!("{} must be a number, got \"{}\"", field, s))),
        }
    }
}

fn temperature_of(raw: &Option<NumberOrText>) -> Result<f64> {
    raw.as_ref().map_or(Ok(DEFAULT_TEMPERATURE), |t| t.value("temperature"))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FertilizerRequest {
    #[serde(default)]
    pub plant_type: Option<String>,
    #[serde(default)]
    pub growth_stage: Option<String>,
    #[serde(default)]
    pub soil_type: Option<String>,
    #[serde(default)]
    pub temperature: Option<NumberOrText>,
}

impl FertilizerRequest {
    pub fn to_query(&self) -> Result<FertilizerQuery> {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        let (Some(plant), Some(stage), Some(soil)) =
            (present(&self.plant_type), present(&self.growth_stage), present(&self.soil_type))
        else {
            return Err(PipelineError::invalid_input("Missing required fields"));
        };
        FertilizerQuery::parse(&plant, &stage, &soil, temperature_of(&self.temperature)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CropRequest {
    #[serde(default)]
    pub soil_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub temperature: Option<NumberOrText>,
    #[serde(default)]
    pub temperature_range: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
}

impl CropRequest {
    pub fn to_query(&self) -> Result<CropQuery> {
        CropQuery::parse(
            self.soil_type.as_deref().unwrap_or("Loamy"),
            self.location.as_deref().unwrap_or("Unknown"),
            temperature_of(&self.temperature)?,
            self.temperature_range.as_deref().unwrap_or(""),
            self.season.as_deref().unwrap_or(""),
        )
    }
}

/// Body of the quick `/recommend` route. Other keys (`pin_code`) are
/// accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuickCropRequest {
    #[serde(default)]
    pub soil_type: Option<String>,
}

/// Everything a request handler reads. Immutable after construction and
/// shared across request threads behind an `Arc`.
pub struct AppContext {
    pub classifier: Box<dyn Classifier>,
    pub rules: RuleBook,
    /// When present, its predictions replace the table-driven NPK.
    pub npk_model: Option<NpkModel>,
    pub enricher: Box<dyn Enricher>,
    pub enrichment_policy: EnrichmentPolicy,
    pub cors_origin: String,
    pub max_upload_bytes: usize,
}

impl AppContext {
    pub fn new(classifier: Box<dyn Classifier>, rules: RuleBook) -> AppContext {
        let defaults = Config::default();
        AppContext {
            classifier,
            rules,
            npk_model: None,
            enricher: Box::new(NoopEnricher),
            enrichment_policy: EnrichmentPolicy::Degrade,
            cors_origin: defaults.cors_origin,
            max_upload_bytes: defaults.max_upload_bytes,
        }
    }

    pub fn with_enricher(mut self, enricher: Box<dyn Enricher>, policy: EnrichmentPolicy) -> AppContext {
        self.enricher = enricher;
        self.enrichment_policy = policy;
        self
    }

    pub fn with_npk_model(mut self, model: NpkModel) -> AppContext {
        self.npk_model = Some(model);
        self
    }

    /// Loads every configured artefact; any failure here aborts startup.
    pub fn from_config(config: &Config) -> Result<AppContext> {
        let classifier = NetworkClassifier::load(&config.model_path, config.image_size)?;
        let rules = match &config.rules_path {
            Some(path) => {
                let book = RuleBook::load_json(path)?;
                info!(path = %path.display(), "rule book loaded");
                book
            }
            None => RuleBook::builtin(),
        };

        let mut ctx = AppContext::new(Box::new(classifier), rules);
        if let Some(path) = &config.npk_model_path {
            ctx = ctx.with_npk_model(NpkModel::load_json(path)?);
        }
        if let Some(command) = &config.llm_command {
            let enricher = ProcessEnricher::from_command_line(command, config.llm_timeout)?;
            info!(command = %command, timeout = ?config.llm_timeout, policy = ?config.enrichment_policy, "enrichment enabled");
            ctx = ctx.with_enricher(Box::new(enricher), config.enrichment_policy);
        }
        ctx.cors_origin = config.cors_origin.clone();
        ctx.max_upload_bytes = config.max_upload_bytes;
        Ok(ctx)
    }

    /// Image bytes → ranked diagnosis, optionally enriched.
    pub fn detect_disease(&self, image: &[u8], language: &str) -> Result<DiseaseReport> {
        let (width, height) = self.classifier.input_size();
        let tensor = normalize_image(image, width, height)?;
        let scores = self.classifier.classify(&tensor)?;
        let ranked = rank(&scores, self.classifier.labels())
            .ok_or_else(|| PipelineError::internal("classifier returned no scores"))?;
        info!(label = %ranked.label, confidence = ranked.confidence, "classified leaf");

        let language = match language.trim() {
            "" => DEFAULT_LANGUAGE,
            code => code,
        };
        let enrichment = self.enrich(&ranked.label, language)?;
        Ok(disease_report(ranked, language, enrichment))
    }

    fn enrich(&self, label: &str, language: &str) -> Result<Enrichment> {
        if !self.enricher.is_enabled() {
            return Ok(Enrichment::default());
        }
        match self.enricher.enrich(label, Language::from_code(language)) {
            Ok(enrichment) => Ok(enrichment),
            Err(err) => match self.enrichment_policy {
                EnrichmentPolicy::Degrade => {
                    warn!(error = %err, label, "enrichment failed, returning diagnosis without it");
                    Ok(Enrichment::default())
                }
                EnrichmentPolicy::Strict => Err(err.into()),
            },
        }
    }

    pub fn recommend_fertilizer(&self, request: &FertilizerRequest) -> Result<FertilizerReport> {
        let query = request.to_query()?;
        let plan = match &self.npk_model {
            Some(model) => model.recommend(&query)?,
            None => fertilizer::recommend(&self.rules, &query)?,
        };
        info!(
            plant = %plan.plant_type,
            stage = %plan.growth_stage,
            n = plan.npk.n,
            p = plan.npk.p,
            k = plan.npk.k,
            source = %plan.source,
            "fertilizer plan"
        );
        Ok(fertilizer_report(plan))
    }

    pub fn recommend_plants(&self, request: &CropRequest) -> Result<CropReport> {
        let query = request.to_query()?;
        let plan = crops::recommend(&self.rules, &query);
        info!(count = plan.recommendations.len(), zone = %plan.climate_zone, "crop recommendation");
        Ok(crop_report(&query, plan))
    }

    pub fn quick_recommend(&self, request: &QuickCropRequest) -> QuickCropReport {
        let soil = request.soil_type.clone().unwrap_or_else(|| "Unknown".to_string());
        QuickCropReport {
            temperature: crops::QUICK_TEMPERATURE,
            recommended_crops: crops::quick_recommend(&self.rules, &soil),
            soil,
            source: crops::QUICK_SOURCE.to_string(),
        }
    }

    /// Placeholder soil detector: the upload is not inspected.
    pub fn detect_soil<R: Rng + ?Sized>(&self, rng: &mut R) -> SoilReport {
        let soil = SoilType::ALL.choose(rng).copied().unwrap_or(SoilType::Loamy);
        SoilReport {
            soil_type: soil.to_string(),
            confidence: SOIL_CONFIDENCE,
            message: "Soil type detected successfully".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnrichmentError;
    use crate::ranking::ScoreVector;
    use crate::vision::ImageTensor;
    use rand::SeedableRng;
    use std::io::Cursor;
    use std::time::Duration;

    /// Always puts its weight on one class.
    struct FixedClassifier {
        labels: Vec<String>,
        winner: usize,
    }

    impl Classifier for FixedClassifier {
        fn input_size(&self) -> (u32, u32) {
            (8, 8)
        }
        fn labels(&self) -> &[String] {
            &self.labels
        }
        fn classify(&self, _tensor: &ImageTensor) -> Result<ScoreVector> {
            let mut v = vec![0.01; self.labels.len()];
            v[self.winner] = 0.8;
            Ok(ScoreVector::new(v))
        }
    }

    struct FailingEnricher(EnrichmentError);

    impl Enricher for FailingEnricher {
        fn enrich(&self, _label: &str, _language: Language) -> std::result::Result<Enrichment, EnrichmentError> {
            Err(self.0.clone())
        }
    }

    fn context() -> AppContext {
        let classifier = FixedClassifier { labels: crate::classifier::default_labels(), winner: 7 };
        AppContext::new(Box::new(classifier), RuleBook::builtin())
    }

    fn png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(16, 12, image::Rgb([30, 160, 40]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img).write_to(&mut out, image::ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn disease_detection_end_to_end() {
        let report = context().detect_disease(&png(), "").unwrap();
        assert_eq!(report.predicted, "Tomato_Late_blight");
        assert_eq!(report.plant, "Tomato");
        assert_eq!(report.language, "en");
        assert!((report.confidence - 80.0).abs() < 1e-9);
        assert_eq!(report.top3.len(), 3);
    }

    #[test]
    fn corrupt_upload_is_invalid_image() {
        let err = context().detect_disease(b"definitely not a png", "en").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidImage(_)));
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn enrichment_failure_degrades_by_default() {
        let ctx = context().with_enricher(
            Box::new(FailingEnricher(EnrichmentError::Timeout(Duration::from_secs(120)))),
            EnrichmentPolicy::Degrade,
        );
        let report = ctx.detect_disease(&png(), "ta").unwrap();
        assert_eq!(report.enrichment, Enrichment::default());
        assert_eq!(report.language, "ta");
    }

    #[test]
    fn strict_policy_surfaces_timeout() {
        let ctx = context().with_enricher(
            Box::new(FailingEnricher(EnrichmentError::Timeout(Duration::from_secs(120)))),
            EnrichmentPolicy::Strict,
        );
        assert_eq!(ctx.detect_disease(&png(), "en").unwrap_err().status(), 504);
    }

    #[test]
    fn fertilizer_requires_all_three_categories() {
        let req = FertilizerRequest { plant_type: Some("Tomato".into()), growth_stage: Some(" ".into()), ..Default::default() };
        let err = context().recommend_fertilizer(&req).unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields");
    }

    #[test]
    fn fertilizer_accepts_textual_temperature() {
        let req: FertilizerRequest = serde_json::from_str(
            r#"{"plant_type":"Tomato","growth_stage":"Vegetative","soil_type":"Loamy","temperature":"25"}"#,
        )
        .unwrap();
        let report = context().recommend_fertilizer(&req).unwrap();
        assert_eq!((report.npk_ratio.n, report.npk_ratio.p, report.npk_ratio.k), (33, 22, 22));
    }

    /// Regressor emitting `[temperature, plant index, -5]`, trained on two plants.
    fn npk_model() -> NpkModel {
        use crate::activation::activation::ActivationFunction;
        use crate::layers::dense::Layer;
        use crate::math::matrix::Matrix;
        use crate::network::Network;

        let weights = Matrix::from_rows(vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
        ])
        .unwrap();
        NpkModel {
            plants: vec!["Rice".into(), "Tomato".into()],
            stages: vec!["Seedling".into(), "Vegetative".into()],
            soils: vec!["Loamy".into(), "Clay".into()],
            network: Network::new(
                vec![Layer::new(weights, vec![0.0, 0.0, -5.0], ActivationFunction::Identity)],
                None,
            ),
            performance: Default::default(),
        }
    }

    fn fertilizer_request(plant: &str) -> FertilizerRequest {
        serde_json::from_value(serde_json::json!({
            "plant_type": plant,
            "growth_stage": "Vegetative",
            "soil_type": "Loamy",
            "temperature": 25
        }))
        .unwrap()
    }

    #[test]
    fn configured_regressor_replaces_the_rule_table() {
        let ctx = context().with_npk_model(npk_model());
        let report = ctx.recommend_fertilizer(&fertilizer_request("Tomato")).unwrap();
        assert_eq!(report.source, crate::agronomy::npk_model::MODEL_SOURCE);
        assert_eq!((report.npk_ratio.n, report.npk_ratio.p, report.npk_ratio.k), (25, 1, 0));
        assert_eq!(report.application_rate_kg_per_hectare, 65.0);
    }

    #[test]
    fn regressor_miss_does_not_fall_back_to_the_table() {
        // Wheat has a rule-table row but no regressor encoding.
        assert!(context().recommend_fertilizer(&fertilizer_request("Wheat")).is_ok());
        let err = context().with_npk_model(npk_model()).recommend_fertilizer(&fertilizer_request("Wheat")).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedCombination { field: "Plant type", .. }));
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn crop_request_defaults() {
        let report = context().recommend_plants(&CropRequest::default()).unwrap();
        assert_eq!(report.soil_type, "Loamy");
        assert_eq!(report.location, "Unknown");
        assert_eq!(report.temperature, DEFAULT_TEMPERATURE);
        assert!(report.count > 0);
    }

    #[test]
    fn quick_recommend_uses_the_soil_shortlist() {
        let ctx = context();
        let clay = ctx.quick_recommend(&QuickCropRequest { soil_type: Some("Clay".into()) });
        assert_eq!(clay.recommended_crops, vec!["Rice", "Soybean", "Broccoli"]);
        assert_eq!(clay.temperature, 25.0);
        assert_eq!(clay.source, "Generated by CropIQ");

        let other = ctx.quick_recommend(&QuickCropRequest::default());
        assert_eq!(other.soil, "Unknown");
        assert_eq!(other.recommended_crops, vec!["Maize", "Barley"]);
        // Peaty has a full crop table but no shortlist of its own.
        let peaty = ctx.quick_recommend(&QuickCropRequest { soil_type: Some("Peaty".into()) });
        assert_eq!(peaty.recommended_crops, vec!["Maize", "Barley"]);
    }

    #[test]
    fn soil_detection_is_one_of_six() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let report = context().detect_soil(&mut rng);
            assert!(SoilType::parse(&report.soil_type).is_some());
            assert_eq!(report.confidence, SOIL_CONFIDENCE);
        }
    }
}
