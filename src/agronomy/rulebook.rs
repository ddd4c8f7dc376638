//! Static agronomic tables, built in or loaded from JSON once at startup.
//!
//! Every table is a flat list of rows keyed by plain fields so the whole book
//! round-trips through serde and can be replaced without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::agronomy::categories::{ClimateZone, GrowthStage, Season, SoilType, TempBracket};
use crate::error::{PipelineError, Result};

/// Base NPK and application rate for one (plant, stage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerRow {
    pub plant: String,
    pub stage: GrowthStage,
    pub n: u32,
    pub p: u32,
    pub k: u32,
    /// kg per hectare before the temperature adjustment.
    pub base_rate: f64,
}

/// Per-nutrient multipliers for one soil type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilFactors {
    pub soil: SoilType,
    pub n: f64,
    pub p: f64,
    pub k: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateKeywords {
    pub zone: ClimateZone,
    /// Split point between `Above` and `AtOrBelow` crop lists; `None` means
    /// the zone's crop lists do not depend on temperature.
    pub threshold: Option<f64>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionKeywords {
    pub region: String,
    pub keywords: Vec<String>,
}

/// Base crop list. `soil: None` is the fallback row for soils outside the
/// six modelled types; `bracket: None` matches any temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRule {
    pub soil: Option<SoilType>,
    pub zone: Option<ClimateZone>,
    pub bracket: Option<TempBracket>,
    pub crops: Vec<String>,
}

/// Crop list that replaces the base lookup inside a named region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalCropRule {
    pub region: String,
    pub soil: Option<SoilType>,
    pub bracket: Option<TempBracket>,
    pub crops: Vec<String>,
}

/// Tolerable growing temperature band in °C, inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureBand {
    pub crop: String,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonCrops {
    pub season: Season,
    pub crops: Vec<String>,
}

/// Fixed shortlist behind the quick `/recommend` route. The `soil: None` row
/// answers every soil without its own row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickPick {
    pub soil: Option<SoilType>,
    pub crops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBook {
    pub fertilizer: Vec<FertilizerRow>,
    pub soil_factors: Vec<SoilFactors>,
    pub climate: Vec<ClimateKeywords>,
    pub regions: Vec<RegionKeywords>,
    pub crop_rules: Vec<CropRule>,
    pub regional_overrides: Vec<RegionalCropRule>,
    pub tolerances: Vec<TemperatureBand>,
    pub seasons: Vec<SeasonCrops>,
    #[serde(default = "builtin_quick_picks")]
    pub quick_picks: Vec<QuickPick>,
}

impl RuleBook {
    /// Reads a rule book from JSON and validates it.
    pub fn load_json(path: impl AsRef<Path>) -> Result<RuleBook> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| PipelineError::config(format!("cannot open rule book {}: {}", path.display(), e)))?;
        let book: RuleBook = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| PipelineError::config(format!("cannot parse rule book {}: {}", path.display(), e)))?;
        book.validate()?;
        Ok(book)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Checks that every reachable key resolves to a non-empty answer.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(PipelineError::config(format!("rule book: {}", msg)));

        for row in &self.fertilizer {
            let count = self
                .fertilizer
                .iter()
                .filter(|r| r.plant.eq_ignore_ascii_case(&row.plant))
                .count();
            if count != GrowthStage::ALL.len() {
                return fail(format!("plant {} has {} stage rows, expected {}", row.plant, count, GrowthStage::ALL.len()));
            }
        }
        for plant in self.fertilizer_plants() {
            for stage in GrowthStage::ALL {
                if self.fertilizer_row(plant, stage).is_none() {
                    return fail(format!("no fertilizer row for {} / {}", plant, stage));
                }
            }
        }
        for soil in SoilType::ALL {
            if self.soil_factors(soil).is_none() {
                return fail(format!("no soil factors for {}", soil));
            }
        }
        for zone in ClimateZone::ALL {
            let Some(climate) = self.climate(zone) else {
                return fail(format!("no climate entry for {}", zone));
            };
            let brackets: Vec<Option<TempBracket>> = match climate.threshold {
                Some(_) => vec![Some(TempBracket::Above), Some(TempBracket::AtOrBelow)],
                None => vec![None],
            };
            for soil in SoilType::ALL {
                for bracket in &brackets {
                    match self.base_crops(Some(soil), zone, *bracket) {
                        Some(crops) if !crops.is_empty() => {}
                        _ => return fail(format!("no crops for {} / {} / {:?}", soil, zone, bracket)),
                    }
                }
            }
        }
        match self.base_crops(None, ClimateZone::Temperate, None) {
            Some(crops) if !crops.is_empty() => {}
            _ => return fail("no fallback crop row for unlisted soils".into()),
        }
        if let Some(rule) = self.regional_overrides.iter().find(|r| r.crops.is_empty()) {
            return fail(format!("empty regional override for {} / {:?}", rule.region, rule.soil));
        }
        if let Some(band) = self.tolerances.iter().find(|b| b.min > b.max) {
            return fail(format!("tolerance band for {} has min > max", band.crop));
        }
        if self.quick_pick(None).is_empty() {
            return fail("no fallback quick pick row".into());
        }
        Ok(())
    }

    pub fn fertilizer_plants(&self) -> Vec<&str> {
        let mut plants: Vec<&str> = Vec::new();
        for row in &self.fertilizer {
            if !plants.iter().any(|p| p.eq_ignore_ascii_case(&row.plant)) {
                plants.push(&row.plant);
            }
        }
        plants
    }

    pub fn fertilizer_row(&self, plant: &str, stage: GrowthStage) -> Option<&FertilizerRow> {
        self.fertilizer
            .iter()
            .find(|r| r.stage == stage && r.plant.eq_ignore_ascii_case(plant.trim()))
    }

    pub fn soil_factors(&self, soil: SoilType) -> Option<&SoilFactors> {
        self.soil_factors.iter().find(|f| f.soil == soil)
    }

    pub fn climate(&self, zone: ClimateZone) -> Option<&ClimateKeywords> {
        self.climate.iter().find(|c| c.zone == zone)
    }

    /// Base crop list; `soil: None` looks up the fallback row.
    pub fn base_crops(
        &self,
        soil: Option<SoilType>,
        zone: ClimateZone,
        bracket: Option<TempBracket>,
    ) -> Option<&[String]> {
        self.crop_rules
            .iter()
            .find(|r| {
                r.soil == soil
                    && r.zone.map_or(true, |z| z == zone)
                    && r.bracket.map_or(true, |b| Some(b) == bracket)
            })
            .map(|r| r.crops.as_slice())
    }

    pub fn regional_crops(
        &self,
        region: &str,
        soil: Option<SoilType>,
        bracket: Option<TempBracket>,
    ) -> Option<&[String]> {
        self.regional_overrides
            .iter()
            .find(|r| {
                r.region == region && r.soil == soil && r.bracket.map_or(true, |b| Some(b) == bracket)
            })
            .map(|r| r.crops.as_slice())
    }

    pub fn tolerance(&self, crop: &str) -> Option<&TemperatureBand> {
        self.tolerances.iter().find(|b| b.crop == crop)
    }

    pub fn season_crops(&self, season: Season) -> Option<&[String]> {
        self.seasons.iter().find(|s| s.season == season).map(|s| s.crops.as_slice())
    }

    /// Shortlist for `soil`, or the fallback row when the soil is unknown or
    /// has no row of its own.
    pub fn quick_pick(&self, soil: Option<SoilType>) -> &[String] {
        let row = |s: Option<SoilType>| self.quick_picks.iter().find(|q| q.soil == s);
        soil.and_then(|s| row(Some(s)))
            .or_else(|| row(None))
            .map(|q| q.crops.as_slice())
            .unwrap_or_default()
    }

    /// The tables shipped with the service.
    pub fn builtin() -> RuleBook {
        RuleBook {
            fertilizer: builtin_fertilizer(),
            soil_factors: vec![
                soil(SoilType::Sandy, 1.2, 1.1, 1.3),
                soil(SoilType::Loamy, 1.0, 1.0, 1.0),
                soil(SoilType::Clay, 0.9, 0.9, 0.8),
                soil(SoilType::Silty, 1.0, 1.0, 1.0),
                soil(SoilType::Peaty, 0.8, 1.2, 0.9),
                soil(SoilType::Chalky, 1.1, 0.8, 1.1),
            ],
            climate: builtin_climate(),
            regions: vec![RegionKeywords {
                region: TAMIL_NADU.into(),
                keywords: strings(&[
                    "tamil nadu", "tamilnadu", "chennai", "madurai", "coimbatore", "salem", "trichy", "vellore",
                ]),
            }],
            crop_rules: builtin_crop_rules(),
            regional_overrides: builtin_regional_overrides(),
            tolerances: builtin_tolerances(),
            seasons: builtin_seasons(),
            quick_picks: builtin_quick_picks(),
        }
    }
}

pub const TAMIL_NADU: &str = "Tamil Nadu";

impl Default for RuleBook {
    fn default() -> Self {
        RuleBook::builtin()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn soil(soil: SoilType, n: f64, p: f64, k: f64) -> SoilFactors {
    SoilFactors { soil, n, p, k }
}

fn builtin_fertilizer() -> Vec<FertilizerRow> {
    // (plant, [(N, P, K, base_rate); Seedling, Vegetative, Flowering, Fruiting, Maturity])
    const TABLE: &[(&str, [(u32, u32, u32, f64); 5])] = &[
        ("Rice", [(20, 15, 10, 80.0), (30, 20, 15, 120.0), (25, 25, 20, 100.0), (15, 20, 25, 80.0), (10, 20, 30, 60.0)]),
        ("Wheat", [(25, 20, 10, 90.0), (35, 25, 15, 130.0), (20, 30, 25, 110.0), (20, 25, 30, 100.0), (0, 0, 0, 0.0)]),
        ("Maize", [(30, 15, 10, 100.0), (40, 20, 15, 150.0), (20, 25, 20, 120.0), (10, 20, 25, 90.0), (0, 20, 30, 50.0)]),
        ("Tomato", [(20, 25, 15, 60.0), (30, 20, 20, 100.0), (25, 30, 25, 120.0), (20, 25, 30, 140.0), (15, 20, 25, 80.0)]),
        ("Potato", [(25, 20, 15, 80.0), (30, 25, 20, 120.0), (20, 30, 25, 100.0), (15, 25, 30, 90.0), (10, 20, 25, 60.0)]),
        ("Cotton", [(20, 15, 10, 70.0), (35, 20, 15, 130.0), (30, 25, 20, 150.0), (15, 20, 25, 100.0), (0, 15, 30, 50.0)]),
        ("Soybean", [(10, 25, 15, 60.0), (15, 30, 20, 90.0), (20, 25, 25, 100.0), (15, 20, 30, 80.0), (0, 15, 25, 40.0)]),
        ("Peanut", [(15, 20, 15, 50.0), (20, 25, 20, 80.0), (15, 30, 25, 90.0), (10, 25, 30, 70.0), (0, 20, 25, 40.0)]),
        ("Sugarcane", [(25, 15, 10, 100.0), (40, 20, 15, 200.0), (30, 25, 20, 180.0), (20, 20, 25, 150.0), (15, 15, 30, 120.0)]),
        ("Banana", [(30, 20, 25, 120.0), (35, 25, 30, 180.0), (25, 30, 35, 200.0), (20, 25, 40, 160.0), (15, 20, 35, 100.0)]),
        ("Mango", [(25, 20, 20, 100.0), (30, 25, 25, 150.0), (20, 30, 30, 120.0), (25, 25, 35, 180.0), (20, 20, 30, 100.0)]),
        ("Coconut", [(20, 25, 30, 80.0), (25, 30, 35, 120.0), (20, 25, 40, 100.0), (25, 20, 45, 140.0), (20, 15, 40, 100.0)]),
        ("Groundnut", [(10, 20, 15, 40.0), (15, 25, 20, 70.0), (20, 30, 25, 90.0), (15, 25, 30, 80.0), (0, 20, 25, 40.0)]),
        ("Sunflower", [(20, 15, 10, 60.0), (30, 20, 15, 100.0), (25, 25, 20, 120.0), (20, 20, 25, 100.0), (5, 15, 30, 50.0)]),
        ("Mustard", [(25, 20, 15, 70.0), (35, 25, 20, 120.0), (30, 30, 25, 140.0), (20, 25, 30, 100.0), (0, 20, 25, 40.0)]),
        ("Pulses", [(10, 25, 15, 50.0), (15, 30, 20, 80.0), (20, 25, 25, 100.0), (15, 20, 30, 80.0), (0, 15, 25, 40.0)]),
    ];

    TABLE
        .iter()
        .flat_map(|(plant, stages)| {
            GrowthStage::ALL.into_iter().zip(stages.iter()).map(move |(stage, &(n, p, k, base_rate))| {
                FertilizerRow { plant: plant.to_string(), stage, n, p, k, base_rate }
            })
        })
        .collect()
}

fn builtin_climate() -> Vec<ClimateKeywords> {
    vec![
        ClimateKeywords {
            zone: ClimateZone::Tropical,
            threshold: Some(25.0),
            keywords: strings(&[
                "tropical", "india", "tamil nadu", "tamilnadu", "chennai", "madurai", "coimbatore", "salem",
                "trichy", "vellore", "brazil", "thailand", "indonesia", "malaysia", "kerala", "karnataka",
                "andhra pradesh", "telangana", "maharashtra", "gujarat", "rajasthan", "delhi", "punjab",
                "haryana", "uttar pradesh", "bihar", "west bengal", "odisha", "assam", "nagaland", "manipur",
                "mizoram", "tripura", "meghalaya", "arunachal pradesh", "sikkim", "himachal pradesh",
                "uttarakhand", "jharkhand", "chhattisgarh", "madhya pradesh",
            ]),
        },
        ClimateKeywords {
            zone: ClimateZone::Subtropical,
            threshold: Some(20.0),
            keywords: strings(&["subtropical", "florida", "california", "australia", "south africa"]),
        },
        ClimateKeywords {
            zone: ClimateZone::Temperate,
            threshold: Some(15.0),
            keywords: strings(&["temperate", "europe", "north america", "china", "japan"]),
        },
        ClimateKeywords {
            zone: ClimateZone::Cold,
            threshold: None,
            keywords: strings(&["cold", "canada", "russia", "scandinavia", "alaska"]),
        },
    ]
}

fn builtin_crop_rules() -> Vec<CropRule> {
    use ClimateZone::*;
    use SoilType::*;
    use TempBracket::*;

    let rule = |soil: SoilType, zone: ClimateZone, bracket: Option<TempBracket>, crops: &[&str]| CropRule {
        soil: Some(soil),
        zone: Some(zone),
        bracket,
        crops: strings(crops),
    };

    vec![
        rule(Loamy, Tropical, Some(Above), &["Rice", "Sugarcane", "Banana", "Mango", "Papaya", "Coconut"]),
        rule(Loamy, Tropical, Some(AtOrBelow), &["Rice", "Wheat", "Corn", "Soybeans", "Peanuts"]),
        rule(Loamy, Subtropical, Some(Above), &["Cotton", "Sugarcane", "Citrus", "Avocado", "Olives"]),
        rule(Loamy, Subtropical, Some(AtOrBelow), &["Wheat", "Barley", "Oats", "Peas", "Lentils"]),
        rule(Loamy, Temperate, Some(Above), &["Wheat", "Corn", "Soybeans", "Sunflowers", "Potatoes"]),
        rule(Loamy, Temperate, Some(AtOrBelow), &["Wheat", "Barley", "Oats", "Rye", "Peas"]),
        rule(Loamy, Cold, None, &["Barley", "Oats", "Rye", "Potatoes", "Carrots"]),
        rule(Sandy, Tropical, Some(Above), &["Peanuts", "Watermelon", "Sweet Potatoes", "Cassava", "Pineapple"]),
        rule(Sandy, Tropical, Some(AtOrBelow), &["Peanuts", "Potatoes", "Carrots", "Onions", "Garlic"]),
        rule(Sandy, Subtropical, Some(Above), &["Peanuts", "Watermelon", "Cantaloupe", "Sweet Corn", "Tomatoes"]),
        rule(Sandy, Subtropical, Some(AtOrBelow), &["Potatoes", "Carrots", "Radish", "Turnips", "Beets"]),
        rule(Sandy, Temperate, Some(Above), &["Potatoes", "Carrots", "Onions", "Garlic", "Asparagus"]),
        rule(Sandy, Temperate, Some(AtOrBelow), &["Potatoes", "Carrots", "Radish", "Turnips", "Parsnips"]),
        rule(Sandy, Cold, None, &["Potatoes", "Carrots", "Parsnips", "Turnips", "Radish"]),
        rule(Clay, Tropical, Some(Above), &["Rice", "Soybeans", "Cabbage", "Cauliflower", "Broccoli"]),
        rule(Clay, Tropical, Some(AtOrBelow), &["Rice", "Wheat", "Barley", "Mustard", "Rapeseed"]),
        rule(Clay, Subtropical, Some(Above), &["Rice", "Soybeans", "Broccoli", "Cabbage", "Kale"]),
        rule(Clay, Subtropical, Some(AtOrBelow), &["Rice", "Wheat", "Barley", "Mustard", "Spinach"]),
        rule(Clay, Temperate, Some(Above), &["Rice", "Soybeans", "Broccoli", "Cabbage", "Cauliflower"]),
        rule(Clay, Temperate, Some(AtOrBelow), &["Rice", "Wheat", "Barley", "Mustard", "Kale"]),
        rule(Clay, Cold, None, &["Rice", "Wheat", "Barley", "Mustard", "Spinach"]),
        rule(Silty, Tropical, None, &["Corn", "Soybeans", "Wheat", "Alfalfa", "Clover"]),
        rule(Silty, Subtropical, None, &["Corn", "Soybeans", "Wheat", "Alfalfa", "Sunflowers"]),
        rule(Silty, Temperate, None, &["Corn", "Soybeans", "Wheat", "Alfalfa", "Clover"]),
        rule(Silty, Cold, None, &["Wheat", "Barley", "Oats", "Alfalfa", "Clover"]),
        rule(Peaty, Tropical, None, &["Cranberries", "Blueberries", "Potatoes", "Carrots", "Celery"]),
        rule(Peaty, Subtropical, None, &["Blueberries", "Strawberries", "Potatoes", "Carrots", "Lettuce"]),
        rule(Peaty, Temperate, None, &["Cranberries", "Blueberries", "Potatoes", "Carrots", "Celery"]),
        rule(Peaty, Cold, None, &["Cranberries", "Blueberries", "Potatoes", "Carrots", "Parsnips"]),
        rule(Chalky, Tropical, None, &["Lavender", "Rosemary", "Sage", "Thyme", "Oregano"]),
        rule(Chalky, Subtropical, None, &["Lavender", "Rosemary", "Sage", "Thyme", "Basil"]),
        rule(Chalky, Temperate, None, &["Lavender", "Rosemary", "Sage", "Thyme", "Oregano"]),
        rule(Chalky, Cold, None, &["Lavender", "Rosemary", "Sage", "Thyme", "Mint"]),
        CropRule {
            soil: None,
            zone: None,
            bracket: None,
            crops: strings(&["Wheat", "Barley", "Oats", "Corn", "Soybeans"]),
        },
    ]
}

fn builtin_regional_overrides() -> Vec<RegionalCropRule> {
    use SoilType::*;
    use TempBracket::*;

    let rule = |soil: Option<SoilType>, bracket: Option<TempBracket>, crops: &[&str]| RegionalCropRule {
        region: TAMIL_NADU.into(),
        soil,
        bracket,
        crops: strings(crops),
    };

    vec![
        rule(Some(Loamy), Some(Above), &["Rice", "Sugarcane", "Banana", "Mango", "Coconut", "Tapioca", "Groundnut", "Pulses"]),
        rule(Some(Loamy), Some(AtOrBelow), &["Rice", "Wheat", "Maize", "Pulses", "Groundnut", "Sunflower", "Cotton"]),
        rule(Some(Sandy), Some(Above), &["Groundnut", "Tapioca", "Sweet Potato", "Onion", "Garlic", "Chilli", "Tomato"]),
        rule(Some(Sandy), Some(AtOrBelow), &["Groundnut", "Potato", "Onion", "Garlic", "Carrot", "Radish"]),
        rule(Some(Clay), Some(Above), &["Rice", "Sugarcane", "Cotton", "Pulses", "Sunflower", "Groundnut"]),
        rule(Some(Clay), Some(AtOrBelow), &["Rice", "Wheat", "Pulses", "Mustard", "Sunflower"]),
        rule(Some(Silty), None, &["Rice", "Maize", "Pulses", "Groundnut", "Sunflower", "Cotton"]),
        rule(Some(Peaty), None, &["Rice", "Vegetables", "Potato", "Carrot", "Onion", "Garlic"]),
        rule(Some(Chalky), None, &["Millets", "Pulses", "Oilseeds", "Spices", "Medicinal Plants"]),
        rule(None, None, &["Rice", "Wheat", "Maize", "Pulses", "Groundnut", "Sunflower"]),
    ]
}

fn builtin_tolerances() -> Vec<TemperatureBand> {
    const BANDS: &[(&str, f64, f64)] = &[
        ("Rice", 20.0, 35.0), ("Wheat", 10.0, 25.0), ("Maize", 15.0, 30.0), ("Tomato", 18.0, 30.0),
        ("Potato", 15.0, 25.0), ("Cotton", 20.0, 35.0), ("Sugarcane", 20.0, 35.0), ("Banana", 20.0, 35.0),
        ("Mango", 20.0, 35.0), ("Coconut", 20.0, 35.0), ("Groundnut", 20.0, 35.0), ("Pulses", 15.0, 30.0),
        ("Sunflower", 15.0, 30.0), ("Mustard", 10.0, 25.0), ("Chickpea", 15.0, 25.0), ("Soybean", 15.0, 30.0),
        ("Pepper", 20.0, 30.0), ("Onion", 15.0, 25.0), ("Carrot", 10.0, 25.0), ("Broccoli", 10.0, 20.0),
        ("Cabbage", 10.0, 20.0), ("Pea", 10.0, 20.0), ("Spinach", 5.0, 20.0), ("Beetroot", 10.0, 25.0),
        ("Barley", 5.0, 20.0), ("Oats", 5.0, 20.0), ("Rye", 5.0, 20.0), ("Lavender", 15.0, 25.0),
        ("Rosemary", 15.0, 25.0), ("Sage", 15.0, 25.0), ("Thyme", 15.0, 25.0), ("Mint", 10.0, 25.0),
        ("Soybeans", 15.0, 30.0), ("Cauliflower", 10.0, 25.0), ("Peanuts", 20.0, 35.0), ("Watermelon", 20.0, 35.0),
        ("Sweet Potatoes", 20.0, 35.0), ("Cassava", 20.0, 35.0), ("Pineapple", 20.0, 35.0), ("Tapioca", 20.0, 35.0),
        ("Corn", 15.0, 30.0),
    ];
    BANDS
        .iter()
        .map(|&(crop, min, max)| TemperatureBand { crop: crop.into(), min, max })
        .collect()
}

fn builtin_quick_picks() -> Vec<QuickPick> {
    let pick = |soil: Option<SoilType>, crops: &[&str]| QuickPick { soil, crops: strings(crops) };
    vec![
        pick(Some(SoilType::Loamy), &["Wheat", "Sugarcane", "Cotton"]),
        pick(Some(SoilType::Sandy), &["Peanut", "Watermelon", "Potato"]),
        pick(Some(SoilType::Clay), &["Rice", "Soybean", "Broccoli"]),
        pick(None, &["Maize", "Barley"]),
    ]
}

fn builtin_seasons() -> Vec<SeasonCrops> {
    vec![
        SeasonCrops {
            season: Season::Spring,
            crops: strings(&[
                "Rice", "Wheat", "Maize", "Tomato", "Potato", "Pea", "Spinach", "Carrot", "Broccoli", "Cabbage",
                "Cauliflower", "Soybeans", "Soybean", "Peanuts", "Watermelon", "Sweet Potatoes", "Cassava",
                "Pineapple", "Tapioca",
            ]),
        },
        SeasonCrops {
            season: Season::Summer,
            crops: strings(&[
                "Rice", "Maize", "Tomato", "Cotton", "Sugarcane", "Banana", "Mango", "Coconut", "Groundnut",
                "Sunflower", "Mustard", "Pepper", "Soybeans", "Soybean", "Peanuts", "Watermelon",
                "Sweet Potatoes", "Cassava", "Pineapple", "Tapioca",
            ]),
        },
        SeasonCrops {
            season: Season::Autumn,
            crops: strings(&[
                "Wheat", "Barley", "Oats", "Rye", "Potato", "Carrot", "Beetroot", "Spinach", "Rice", "Soybeans",
                "Soybean", "Broccoli", "Cabbage", "Cauliflower", "Peanuts", "Sweet Potatoes", "Cassava", "Tapioca",
            ]),
        },
        SeasonCrops {
            season: Season::Winter,
            crops: strings(&[
                "Wheat", "Barley", "Oats", "Rye", "Spinach", "Broccoli", "Cabbage", "Pea", "Cauliflower", "Carrot",
                "Sweet Potatoes", "Cassava", "Rice", "Maize", "Corn", "Tomato", "Cotton", "Sugarcane", "Banana",
                "Mango", "Coconut", "Groundnut", "Sunflower", "Mustard", "Pepper", "Soybeans", "Soybean",
                "Peanuts", "Watermelon", "Pineapple", "Tapioca",
            ]),
        },
        SeasonCrops {
            season: Season::YearRound,
            crops: strings(&[
                "Rice", "Wheat", "Maize", "Tomato", "Potato", "Cotton", "Sugarcane", "Banana", "Mango", "Coconut",
                "Groundnut", "Pulses", "Sunflower", "Mustard", "Chickpea", "Soybean", "Soybeans", "Pepper", "Onion",
                "Broccoli", "Cabbage", "Cauliflower", "Peanuts", "Watermelon", "Sweet Potatoes", "Cassava",
                "Pineapple", "Tapioca",
            ]),
        },
    ]
}
