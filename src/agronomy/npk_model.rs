//! Learned NPK regressor.
//!
//! The model file bundles three label encoders with a feed-forward network.
//! An encoder maps a category to its index in the list; the network reads
//! `[plant, stage, soil, temperature]` and emits `[N, P, K]`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::agronomy::fertilizer::{soil_advice, FertilizerPlan, FertilizerQuery, Npk};
use crate::error::{PipelineError, Result};
use crate::network::Network;

pub const MODEL_SOURCE: &str = "ML-Powered Fertilizer Recommendation System";

const INPUTS: usize = 4;
const OUTPUTS: usize = 3;
/// kg per hectare per unit of summed NPK.
const RATE_PER_UNIT: f64 = 2.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpkModel {
    pub plants: Vec<String>,
    pub stages: Vec<String>,
    pub soils: Vec<String>,
    pub network: Network,
    #[serde(default)]
    pub performance: BTreeMap<String, f64>,
}

fn encode(values: &[String], value: &str) -> Option<f64> {
    values.iter().position(|v| v.eq_ignore_ascii_case(value.trim())).map(|i| i as f64)
}

impl NpkModel {
    pub fn load_json(path: impl AsRef<Path>) -> Result<NpkModel> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            PipelineError::model_unavailable(format!("cannot open NPK model {}: {}", path.display(), e))
        })?;
        let model: NpkModel = serde_json::from_reader(std::io::BufReader::new(file)).map_err(|e| {
            PipelineError::model_unavailable(format!("cannot parse NPK model {}: {}", path.display(), e))
        })?;
        model.validate()?;
        tracing::info!(
            path = %path.display(),
            plants = model.plants.len(),
            "loaded NPK regressor"
        );
        Ok(model)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;
        if self.network.input_size() != INPUTS || self.network.output_size() != OUTPUTS {
            return Err(PipelineError::model_unavailable(format!(
                "NPK model must map {} inputs to {} outputs, got {} -> {}",
                INPUTS,
                OUTPUTS,
                self.network.input_size(),
                self.network.output_size()
            )));
        }
        if self.plants.is_empty() || self.stages.is_empty() || self.soils.is_empty() {
            return Err(PipelineError::model_unavailable("NPK model has an empty category encoder"));
        }
        Ok(())
    }

    pub fn predict(&self, query: &FertilizerQuery) -> Result<Npk> {
        let plant = encode(&self.plants, &query.plant_type)
            .ok_or_else(|| PipelineError::unsupported("Plant type", query.plant_type.clone()))?;
        let stage = encode(&self.stages, query.growth_stage.as_str()).ok_or_else(|| {
            PipelineError::unsupported_for("Growth stage", query.growth_stage.as_str(), &query.plant_type)
        })?;
        let soil = encode(&self.soils, query.soil_type.as_str())
            .ok_or_else(|| PipelineError::unsupported("Soil type", query.soil_type.as_str()))?;

        let out = self.network.forward(&[plant, stage, soil, query.temperature])?;
        if out.len() != OUTPUTS {
            return Err(PipelineError::internal(format!("NPK model produced {} outputs", out.len())));
        }
        let clamp = |v: f64| if v.is_finite() { v.trunc().max(0.0) as u32 } else { 0 };
        Ok(Npk { n: clamp(out[0]), p: clamp(out[1]), k: clamp(out[2]) })
    }

    /// Full plan in the shape of the table path, with the regressor's NPK.
    pub fn recommend(&self, query: &FertilizerQuery) -> Result<FertilizerPlan> {
        let npk = self.predict(query)?;
        let application_rate = ((npk.n + npk.p + npk.k) as f64 * RATE_PER_UNIT).trunc();

        let mut recommendations = vec![
            format!("ML Model Prediction: N-{}, P-{}, K-{}", npk.n, npk.p, npk.k),
            "Apply fertilizer in early morning or evening".to_string(),
            "Ensure adequate watering after application".to_string(),
        ];
        recommendations.extend(soil_advice(query.soil_type).iter().map(|s| s.to_string()));

        let mut notes = format!(
            "ML-based recommendations for {} in {} stage. Temperature: {}°C, Soil: {}. \
             Application rate: {} kg per hectare.",
            query.plant_type, query.growth_stage, query.temperature, query.soil_type, application_rate
        );
        if !self.performance.is_empty() {
            let summary: Vec<String> =
                self.performance.iter().map(|(k, v)| format!("{}-{:.1}%", k, v * 100.0)).collect();
            notes.push_str(&format!(" Model accuracy: {}", summary.join(", ")));
        }

        Ok(FertilizerPlan {
            plant_type: query.plant_type.clone(),
            growth_stage: query.growth_stage,
            soil_type: query.soil_type,
            temperature: query.temperature,
            npk,
            application_rate,
            recommendations,
            notes,
            source: MODEL_SOURCE.to_string(),
            model_accuracy: self.performance.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::layers::dense::Layer;
    use crate::math::matrix::Matrix;

    /// Output = [temperature, plant, -5]; makes every column easy to check.
    fn model() -> NpkModel {
        let weights = Matrix::from_rows(vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
        ])
        .unwrap();
        let layer = Layer::new(weights, vec![0.0, 0.0, -5.0], ActivationFunction::Identity);
        NpkModel {
            plants: vec!["Rice".into(), "Tomato".into()],
            stages: vec!["Seedling".into(), "Vegetative".into()],
            soils: vec!["Loamy".into(), "Clay".into()],
            network: Network::new(vec![layer], None),
            performance: BTreeMap::from([("N".to_string(), 0.967)]),
        }
    }

    fn query(plant: &str, stage: &str) -> FertilizerQuery {
        FertilizerQuery::parse(plant, stage, "Clay", 24.9).unwrap()
    }

    #[test]
    fn predictions_are_truncated_and_clamped() {
        let npk = model().predict(&query("tomato", "Vegetative")).unwrap();
        assert_eq!(npk, Npk { n: 24, p: 1, k: 0 });
    }

    #[test]
    fn rate_is_truncated_sum_times_two_and_a_half() {
        let plan = model().recommend(&query("Tomato", "Seedling")).unwrap();
        assert_eq!(plan.application_rate, 62.0);
        assert_eq!(plan.source, MODEL_SOURCE);
        assert_eq!(plan.model_accuracy.get("N"), Some(&0.967));
        assert!(plan.recommendations[0].starts_with("ML Model Prediction: N-24"));
        assert!(plan.recommendations.iter().any(|r| r.contains("Clay soil retains")));
    }

    #[test]
    fn categories_outside_the_encoders_are_rejected() {
        let err = model().predict(&query("Mango", "Seedling")).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedCombination { field: "Plant type", .. }));
        let err = model().predict(&query("Rice", "Fruiting")).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedCombination { field: "Growth stage", .. }));
    }

    #[test]
    fn wrong_arity_is_refused_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("npk.json");
        let mut m = model();
        m.network = Network::new(vec![Layer::new(
            Matrix::from_rows(vec![vec![1.0], vec![1.0], vec![1.0], vec![1.0]]).unwrap(),
            vec![0.0],
            ActivationFunction::Identity,
        )], None);
        m.save_json(&path).unwrap();
        assert!(matches!(NpkModel::load_json(&path), Err(PipelineError::ModelUnavailable(_))));

        model().save_json(&path).unwrap();
        assert_eq!(NpkModel::load_json(&path).unwrap(), model());
    }
}
