//! Table-driven NPK recommendation.
//!
//! `final = round(base × temperature factor × soil factor)`, floored at 1.
//! Rounding is half-to-even so table values that land exactly on .5 match
//! the published charts.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::agronomy::categories::{GrowthStage, SoilType};
use crate::agronomy::rulebook::RuleBook;
use crate::error::{PipelineError, Result};

pub const RULE_SOURCE: &str = "Smart Fertilizer Recommendation System";

/// Validated inputs shared by the table path and the regressor path.
#[derive(Debug, Clone, PartialEq)]
pub struct FertilizerQuery {
    pub plant_type: String,
    pub growth_stage: GrowthStage,
    pub soil_type: SoilType,
    pub temperature: f64,
}

impl FertilizerQuery {
    /// Parses stage and soil; the plant is checked by whichever path serves
    /// the request, since the regressor and the table know different plants.
    pub fn parse(plant_type: &str, growth_stage: &str, soil_type: &str, temperature: f64) -> Result<FertilizerQuery> {
        let plant_type = plant_type.trim();
        let stage = GrowthStage::parse(growth_stage)
            .ok_or_else(|| PipelineError::unsupported_for("Growth stage", growth_stage.trim(), plant_type))?;
        let soil = SoilType::parse(soil_type)
            .ok_or_else(|| PipelineError::unsupported("Soil type", soil_type.trim()))?;
        if !temperature.is_finite() {
            return Err(PipelineError::invalid_input("temperature must be a finite number"));
        }
        Ok(FertilizerQuery { plant_type: plant_type.to_string(), growth_stage: stage, soil_type: soil, temperature })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Npk {
    #[serde(rename = "N")]
    pub n: u32,
    #[serde(rename = "P")]
    pub p: u32,
    #[serde(rename = "K")]
    pub k: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerPlan {
    pub plant_type: String,
    pub growth_stage: GrowthStage,
    pub soil_type: SoilType,
    pub temperature: f64,
    pub npk: Npk,
    /// kg per hectare.
    pub application_rate: f64,
    pub recommendations: Vec<String>,
    pub notes: String,
    pub source: String,
    pub model_accuracy: BTreeMap<String, f64>,
}

/// Discrete temperature adjustment, checked in this order:
/// below 10 °C → 0.7, above 35 °C → 0.8, 20–30 °C → 1.1, otherwise 1.0.
pub fn temperature_factor(temperature: f64) -> f64 {
    if temperature < 10.0 {
        0.7
    } else if temperature > 35.0 {
        0.8
    } else if (20.0..=30.0).contains(&temperature) {
        1.1
    } else {
        1.0
    }
}

fn adjust(base: u32, temp_factor: f64, soil_factor: f64) -> u32 {
    let value = (base as f64 * temp_factor * soil_factor).round_ties_even();
    (value.max(0.0) as u32).max(1)
}

/// Computes NPK and application rate from the rule tables.
pub fn recommend(book: &RuleBook, query: &FertilizerQuery) -> Result<FertilizerPlan> {
    let row = match book.fertilizer_row(&query.plant_type, query.growth_stage) {
        Some(row) => row,
        None if book.fertilizer_plants().iter().any(|p| p.eq_ignore_ascii_case(&query.plant_type)) => {
            return Err(PipelineError::unsupported_for(
                "Growth stage",
                query.growth_stage.as_str(),
                &query.plant_type,
            ))
        }
        None => return Err(PipelineError::unsupported("Plant type", query.plant_type.clone())),
    };
    let soil = book
        .soil_factors(query.soil_type)
        .ok_or_else(|| PipelineError::unsupported("Soil type", query.soil_type.as_str()))?;

    let tf = temperature_factor(query.temperature);
    let npk = Npk {
        n: adjust(row.n, tf, soil.n),
        p: adjust(row.p, tf, soil.p),
        k: adjust(row.k, tf, soil.k),
    };
    let application_rate = (row.base_rate * tf * 10.0).round_ties_even() / 10.0;

    let mut recommendations: Vec<String> = Vec::new();
    recommendations.extend(stage_advice(query.growth_stage).iter().map(|s| s.to_string()));
    recommendations.extend(temperature_advice(query.temperature).iter().map(|s| s.to_string()));
    recommendations.extend(soil_advice(query.soil_type).iter().map(|s| s.to_string()));

    let notes = format!(
        "Recommendations for {} in {} stage. Temperature: {}°C, Soil: {}. \
         Application rate: {:.1} kg per hectare. Always conduct soil tests before major \
         fertilizer applications and adjust based on local conditions.",
        row.plant, query.growth_stage, query.temperature, query.soil_type, application_rate
    );

    Ok(FertilizerPlan {
        plant_type: row.plant.clone(),
        growth_stage: query.growth_stage,
        soil_type: query.soil_type,
        temperature: query.temperature,
        npk,
        application_rate,
        recommendations,
        notes,
        source: RULE_SOURCE.to_string(),
        model_accuracy: BTreeMap::new(),
    })
}

pub fn stage_advice(stage: GrowthStage) -> &'static [&'static str] {
    match stage {
        GrowthStage::Seedling => &[
            "Apply fertilizer in small amounts to avoid burning young roots",
            "Use water-soluble fertilizers for better absorption",
        ],
        GrowthStage::Vegetative => &[
            "Focus on nitrogen-rich fertilizers for leaf and stem growth",
            "Apply fertilizer every 2-3 weeks during active growth",
        ],
        GrowthStage::Flowering => &[
            "Increase phosphorus for better flower formation",
            "Reduce nitrogen to prevent excessive vegetative growth",
        ],
        GrowthStage::Fruiting => &[
            "Emphasize potassium for fruit development and quality",
            "Apply fertilizer before fruit set for best results",
        ],
        GrowthStage::Maturity => &[],
    }
}

pub fn temperature_advice(temperature: f64) -> &'static [&'static str] {
    if temperature < 15.0 {
        &["Reduce fertilizer application in cold weather", "Consider using slow-release fertilizers"]
    } else if temperature > 30.0 {
        &[
            "Increase watering frequency to prevent fertilizer burn",
            "Apply fertilizer in early morning or evening",
        ]
    } else {
        &[]
    }
}

pub fn soil_advice(soil: SoilType) -> &'static [&'static str] {
    match soil {
        SoilType::Sandy => &[
            "Apply fertilizer in smaller, more frequent doses",
            "Consider adding organic matter to improve nutrient retention",
        ],
        SoilType::Clay => &[
            "Clay soil retains nutrients well - reduce application frequency",
            "Ensure good drainage to prevent waterlogging",
        ],
        SoilType::Peaty => &[
            "Peaty soils are naturally rich - monitor for over-fertilization",
            "Focus on phosphorus and potassium supplementation",
        ],
        SoilType::Loamy | SoilType::Silty | SoilType::Chalky => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn query(plant: &str, stage: &str, soil: &str, t: f64) -> FertilizerQuery {
        FertilizerQuery::parse(plant, stage, soil, t).unwrap()
    }

    #[test]
    fn temperature_brackets() {
        assert_eq!(temperature_factor(5.0), 0.7);
        assert_eq!(temperature_factor(15.0), 1.0);
        assert_eq!(temperature_factor(20.0), 1.1);
        assert_eq!(temperature_factor(30.0), 1.1);
        assert_eq!(temperature_factor(32.0), 1.0);
        assert_eq!(temperature_factor(36.0), 0.8);
    }

    #[test]
    fn tomato_vegetative_loamy_at_25() {
        let plan = recommend(&RuleBook::builtin(), &query("Tomato", "Vegetative", "Loamy", 25.0)).unwrap();
        let expect = |base: f64| (base * 1.1 * 1.0_f64).round() as u32;
        assert_eq!(plan.npk, Npk { n: expect(30.0), p: expect(20.0), k: expect(20.0) });
        assert_eq!(plan.npk, Npk { n: 33, p: 22, k: 22 });
        assert_relative_eq!(plan.application_rate, 110.0);
        assert_eq!(plan.source, RULE_SOURCE);
        assert!(plan.recommendations[0].contains("nitrogen-rich"));
    }

    #[test]
    fn every_table_row_yields_at_least_one() {
        let book = RuleBook::builtin();
        for plant in book.fertilizer_plants() {
            for stage in GrowthStage::ALL {
                for soil in SoilType::ALL {
                    for t in [0.0, 15.0, 25.0, 40.0] {
                        let q = FertilizerQuery {
                            plant_type: plant.to_string(),
                            growth_stage: stage,
                            soil_type: soil,
                            temperature: t,
                        };
                        let npk = recommend(&book, &q).unwrap().npk;
                        assert!(npk.n >= 1 && npk.p >= 1 && npk.k >= 1, "{} {} {} {}", plant, stage, soil, t);
                    }
                }
            }
        }
    }

    #[test]
    fn wheat_maturity_zeros_are_floored() {
        let plan = recommend(&RuleBook::builtin(), &query("Wheat", "Maturity", "Clay", 25.0)).unwrap();
        assert_eq!(plan.npk, Npk { n: 1, p: 1, k: 1 });
        assert_eq!(plan.application_rate, 0.0);
    }

    #[test]
    fn soil_multipliers_move_in_documented_direction() {
        let book = RuleBook::builtin();
        let at = |soil: &str| recommend(&book, &query("Banana", "Flowering", soil, 25.0)).unwrap().npk;
        let loamy = at("Loamy");
        assert!(at("Sandy").k > loamy.k);
        assert!(at("Sandy").n > loamy.n);
        assert!(at("Clay").k < loamy.k);
        assert!(at("Peaty").p > loamy.p && at("Peaty").n < loamy.n);
        assert!(at("Chalky").p < loamy.p && at("Chalky").k > loamy.k);
        for soil in SoilType::ALL {
            let f = book.soil_factors(soil).unwrap();
            let npk = at(soil.as_str());
            let changed = npk != loamy;
            let neutral = f.n == 1.0 && f.p == 1.0 && f.k == 1.0;
            assert_eq!(changed, !neutral, "{}", soil);
        }
    }

    #[test]
    fn unknown_plant_names_the_field() {
        let err = recommend(&RuleBook::builtin(), &query("Kiwi", "Seedling", "Loamy", 20.0)).unwrap_err();
        match err {
            PipelineError::UnsupportedCombination { field, value, .. } => {
                assert_eq!(field, "Plant type");
                assert_eq!(value, "Kiwi");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_stage_and_soil_are_rejected_at_parse() {
        let err = FertilizerQuery::parse("Tomato", "Dormant", "Loamy", 20.0).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedCombination { field: "Growth stage", .. }));
        let err = FertilizerQuery::parse("Tomato", "Seedling", "Lunar", 20.0).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedCombination { field: "Soil type", .. }));
    }

    #[test]
    fn cold_and_hot_advice() {
        assert_eq!(temperature_advice(5.0).len(), 2);
        assert!(temperature_advice(33.0)[0].contains("watering"));
        assert!(temperature_advice(22.0).is_empty());
    }
}
