//! Flat JSON records returned by the HTTP layer and the CLI.
//!
//! Every documented key is always present; optional text defaults to `""`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::agronomy::crops::{CropPlan, CropQuery};
use crate::agronomy::disease::describe_label;
use crate::agronomy::fertilizer::{FertilizerPlan, Npk};
use crate::agronomy::ClimateZone;
use crate::enrichment::Enrichment;
use crate::ranking::{LabelScore, RankedPrediction};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionDetails {
    pub detected_condition: String,
    pub confidence_percentage: f64,
    pub is_healthy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseReport {
    pub disease: String,
    pub predicted: String,
    pub plant: String,
    pub confidence: f64,
    pub message: String,
    pub top3: Vec<LabelScore>,
    pub prediction_details: PredictionDetails,
    pub language: String,
    #[serde(flatten)]
    pub enrichment: Enrichment,
}

pub fn disease_report(ranked: RankedPrediction, language: &str, enrichment: Enrichment) -> DiseaseReport {
    let info = describe_label(&ranked.label);
    DiseaseReport {
        disease: info.status,
        plant: info.plant,
        confidence: ranked.confidence,
        message: info.message,
        top3: ranked.top3,
        prediction_details: PredictionDetails {
            detected_condition: info.display_name,
            confidence_percentage: ranked.confidence,
            is_healthy: info.is_healthy,
        },
        predicted: ranked.label,
        language: language.to_string(),
        enrichment,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerReport {
    pub plant_type: String,
    pub growth_stage: String,
    pub temperature: f64,
    pub soil_type: String,
    pub npk_ratio: Npk,
    /// `"Apply X kg per hectare"`.
    pub application_rate: String,
    pub application_rate_kg_per_hectare: f64,
    pub recommendations: Vec<String>,
    pub notes: String,
    pub source: String,
    pub model_accuracy: BTreeMap<String, f64>,
}

pub fn fertilizer_report(plan: FertilizerPlan) -> FertilizerReport {
    FertilizerReport {
        plant_type: plan.plant_type,
        growth_stage: plan.growth_stage.to_string(),
        temperature: plan.temperature,
        soil_type: plan.soil_type.to_string(),
        npk_ratio: plan.npk,
        application_rate: format!("Apply {:.1} kg per hectare", plan.application_rate),
        application_rate_kg_per_hectare: plan.application_rate,
        recommendations: plan.recommendations,
        notes: plan.notes,
        source: plan.source,
        model_accuracy: plan.model_accuracy,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropReport {
    pub recommendations: Vec<String>,
    pub count: usize,
    pub soil_type: String,
    pub location: String,
    pub climate_zone: ClimateZone,
    pub region: String,
    pub temperature: f64,
    pub temperature_range: String,
    pub season: String,
    pub message: String,
}

pub fn crop_report(query: &CropQuery, plan: CropPlan) -> CropReport {
    CropReport {
        count: plan.recommendations.len(),
        recommendations: plan.recommendations,
        soil_type: query.soil_type.clone(),
        location: query.location.clone(),
        climate_zone: plan.climate_zone,
        region: plan.region,
        temperature: query.temperature,
        temperature_range: query
            .temperature_range
            .map(|r| format!("{}-{}", r.min, r.max))
            .unwrap_or_default(),
        season: query.season.map(|s| s.to_string()).unwrap_or_default(),
        message: plan.message,
    }
}

/// Body of the quick `/recommend` route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickCropReport {
    pub temperature: f64,
    pub soil: String,
    pub recommended_crops: Vec<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilReport {
    pub soil_type: String,
    pub confidence: f64,
    pub message: String,
}
