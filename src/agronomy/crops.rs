//! Crop recommendation from soil, location and temperature.
//!
//! Resolution order: regional override, then the (soil, zone, bracket) base
//! table, then the fallback row for soils outside the six modelled types.
//! The temperature-range and season filters run after that, in that order.

use serde::Serialize;

use crate::agronomy::categories::{ClimateZone, Season, SoilType, TempBracket};
use crate::agronomy::rulebook::RuleBook;
use crate::error::{PipelineError, Result};

pub const QUICK_SOURCE: &str = "Generated by CropIQ";
/// The quick route does not look temperature up; it reports this value.
pub const QUICK_TEMPERATURE: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl TemperatureRange {
    /// Parses `"min-max"`; a leading minus belongs to `min`. Empty input
    /// means no range was requested.
    pub fn parse(raw: &str) -> Result<Option<TemperatureRange>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let bad = || PipelineError::invalid_input(format!("Invalid temperature range \"{}\", expected min-max", raw));
        let split = raw
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(i, _)| i)
            .ok_or_else(bad)?;
        let min: f64 = raw[..split].trim().parse().map_err(|_| bad())?;
        let max: f64 = raw[split + 1..].trim().parse().map_err(|_| bad())?;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(bad());
        }
        Ok(Some(TemperatureRange { min, max }))
    }

    fn overlaps(&self, min: f64, max: f64) -> bool {
        !(self.max < min || self.min > max)
    }
}

/// Raw soil name is kept so unlisted soils can be echoed back.
#[derive(Debug, Clone, PartialEq)]
pub struct CropQuery {
    pub soil_type: String,
    pub location: String,
    pub temperature: f64,
    pub temperature_range: Option<TemperatureRange>,
    pub season: Option<Season>,
}

impl CropQuery {
    pub fn parse(
        soil_type: &str,
        location: &str,
        temperature: f64,
        temperature_range: &str,
        season: &str,
    ) -> Result<CropQuery> {
        if !temperature.is_finite() {
            return Err(PipelineError::invalid_input("temperature must be a finite number"));
        }
        let season = match season.trim() {
            "" => None,
            s => Some(Season::parse(s).ok_or_else(|| {
                PipelineError::invalid_input(format!(
                    "Unknown season \"{}\", expected Spring, Summer, Autumn, Winter or Year-round",
                    s
                ))
            })?),
        };
        Ok(CropQuery {
            soil_type: soil_type.trim().to_string(),
            location: location.trim().to_string(),
            temperature,
            temperature_range: TemperatureRange::parse(temperature_range)?,
            season,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropPlan {
    pub recommendations: Vec<String>,
    pub climate_zone: ClimateZone,
    /// Empty when no regional table applies.
    pub region: String,
    pub message: String,
}

/// Zone whose longest matching keyword is longest overall; ties keep the
/// earlier zone. No match means temperate.
pub fn climate_zone(book: &RuleBook, location: &str) -> ClimateZone {
    let location = location.to_lowercase();
    let mut best: Option<(usize, ClimateZone)> = None;
    for zone in ClimateZone::ALL {
        let Some(entry) = book.climate(zone) else { continue };
        let longest = entry
            .keywords
            .iter()
            .filter(|k| location.contains(k.to_lowercase().as_str()))
            .map(|k| k.len())
            .max();
        if let Some(len) = longest {
            if best.map_or(true, |(l, _)| len > l) {
                best = Some((len, zone));
            }
        }
    }
    best.map(|(_, z)| z).unwrap_or(ClimateZone::Temperate)
}

pub fn detect_region<'a>(book: &'a RuleBook, location: &str) -> Option<&'a str> {
    let location = location.to_lowercase();
    book.regions
        .iter()
        .find(|r| r.keywords.iter().any(|k| location.contains(k.to_lowercase().as_str())))
        .map(|r| r.region.as_str())
}

fn base_list(book: &RuleBook, soil: Option<SoilType>, zone: ClimateZone, region: Option<&str>, temperature: f64) -> Vec<String> {
    let bracket = book
        .climate(zone)
        .and_then(|c| c.threshold)
        .map(|t| TempBracket::classify(temperature, t));

    if let Some(crops) = region.and_then(|r| book.regional_crops(r, soil, bracket)) {
        return crops.to_vec();
    }
    book.base_crops(soil, zone, bracket)
        .or_else(|| book.base_crops(None, zone, bracket))
        .map(|c| c.to_vec())
        .unwrap_or_default()
}

/// Keeps crops whose tolerance band overlaps `range`; crops with no known
/// band pass through.
pub fn filter_by_temperature_range(book: &RuleBook, crops: Vec<String>, range: &TemperatureRange) -> Vec<String> {
    crops
        .into_iter()
        .filter(|c| book.tolerance(c).map_or(true, |b| range.overlaps(b.min, b.max)))
        .collect()
}

pub fn filter_by_season(book: &RuleBook, crops: Vec<String>, season: Season) -> Vec<String> {
    match book.season_crops(season) {
        Some(allowed) => crops.into_iter().filter(|c| allowed.contains(c)).collect(),
        None => crops,
    }
}

pub fn recommend(book: &RuleBook, query: &CropQuery) -> CropPlan {
    let zone = climate_zone(book, &query.location);
    let region = detect_region(book, &query.location);
    let soil = SoilType::parse(&query.soil_type);

    let mut crops = base_list(book, soil, zone, region, query.temperature);
    if let Some(range) = &query.temperature_range {
        crops = filter_by_temperature_range(book, crops, range);
    }
    if let Some(season) = query.season {
        crops = filter_by_season(book, crops, season);
    }

    let soil_name = soil.map(|s| s.as_str().to_string()).unwrap_or_else(|| query.soil_type.clone());
    let mut message = format!("Recommended {} plants for {} soil in {} climate", crops.len(), soil_name, zone);
    if let Some(range) = &query.temperature_range {
        message.push_str(&format!(", temperature range {}-{}°C", range.min, range.max));
    }
    if let Some(season) = query.season {
        message.push_str(&format!(", season {}", season));
    }
    if crops.is_empty() {
        message.push_str("; no plant matches every filter, try widening the temperature range or season");
    }

    tracing::debug!(zone = %zone, region = ?region, count = crops.len(), "resolved crop list");

    CropPlan {
        recommendations: crops,
        climate_zone: zone,
        region: region.unwrap_or_default().to_string(),
        message,
    }
}

/// Shortlist by soil alone, without climate or filters.
pub fn quick_recommend(book: &RuleBook, soil: &str) -> Vec<String> {
    book.quick_pick(SoilType::parse(soil)).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agronomy::rulebook::TAMIL_NADU;

    fn query(soil: &str, location: &str, t: f64, range: &str, season: &str) -> CropQuery {
        CropQuery::parse(soil, location, t, range, season).unwrap()
    }

    #[test]
    fn zone_from_location_keywords() {
        let book = RuleBook::builtin();
        assert_eq!(climate_zone(&book, "Chennai, India"), ClimateZone::Tropical);
        assert_eq!(climate_zone(&book, "Sacramento, California"), ClimateZone::Subtropical);
        assert_eq!(climate_zone(&book, "Toronto, Canada"), ClimateZone::Cold);
        assert_eq!(climate_zone(&book, "Nowhere"), ClimateZone::Temperate);
    }

    #[test]
    fn longest_keyword_wins_across_zones() {
        let book = RuleBook::builtin();
        assert_eq!(climate_zone(&book, "subtropical highlands"), ClimateZone::Subtropical);
        // "north america" (13) beats "india" (5)
        assert_eq!(climate_zone(&book, "Indiana, North America"), ClimateZone::Temperate);
    }

    #[test]
    fn equal_length_keywords_fall_back_to_zone_order() {
        let book = RuleBook::builtin();
        // "china" and "india" are both five letters; tropical is listed first.
        assert_eq!(climate_zone(&book, "China and India"), ClimateZone::Tropical);
        // "europe" and "alaska": temperate precedes cold.
        assert_eq!(climate_zone(&book, "Alaska via Europe"), ClimateZone::Temperate);
    }

    #[test]
    fn coimbatore_clay_autumn_is_not_empty() {
        let book = RuleBook::builtin();
        let plan = recommend(&book, &query("Clay", "Coimbatore", 28.0, "25-30", "Autumn"));
        assert_eq!(plan.region, TAMIL_NADU);
        assert_eq!(plan.climate_zone, ClimateZone::Tropical);
        assert_eq!(plan.recommendations, vec!["Rice".to_string()]);
        assert_eq!(
            plan.message,
            "Recommended 1 plants for Clay soil in tropical climate, temperature range 25-30°C, season Autumn"
        );
    }

    #[test]
    fn tolerance_overlap_rules() {
        let book = RuleBook::builtin();
        let range = TemperatureRange::parse("25-30").unwrap().unwrap();
        let crops = vec!["Rice".to_string(), "Spinach".to_string(), "Kale".to_string()];
        // Rice (20-35) overlaps; Spinach (5-20) does not; Kale has no band.
        assert_eq!(filter_by_temperature_range(&book, crops, &range), vec!["Rice", "Kale"]);

        let range = TemperatureRange { min: 25.0, max: 30.0 };
        assert!(range.overlaps(20.0, 35.0));
        assert!(!range.overlaps(5.0, 10.0));
    }

    #[test]
    fn temperature_brackets_switch_lists() {
        let book = RuleBook::builtin();
        let hot = recommend(&book, &query("Loamy", "Brazil", 30.0, "", ""));
        let mild = recommend(&book, &query("Loamy", "Brazil", 25.0, "", ""));
        assert!(hot.recommendations.contains(&"Papaya".to_string()));
        assert!(mild.recommendations.contains(&"Peanuts".to_string()));
        assert!(hot.region.is_empty());
    }

    #[test]
    fn unlisted_soil_uses_fallback_rows() {
        let book = RuleBook::builtin();
        let plan = recommend(&book, &query("Red", "Europe", 20.0, "", ""));
        assert_eq!(plan.recommendations, vec!["Wheat", "Barley", "Oats", "Corn", "Soybeans"]);
        assert!(plan.message.contains("Red soil"));
        let plan = recommend(&book, &query("Red", "Madurai", 20.0, "", ""));
        assert_eq!(plan.recommendations[2], "Maize");
    }

    #[test]
    fn empty_result_explains_itself() {
        let book = RuleBook::builtin();
        let plan = recommend(&book, &query("Chalky", "Japan", 10.0, "", "Summer"));
        assert!(plan.recommendations.is_empty());
        assert!(plan.message.starts_with("Recommended 0 plants"));
        assert!(plan.message.ends_with("try widening the temperature range or season"));
    }

    #[test]
    fn range_and_season_parsing() {
        assert_eq!(TemperatureRange::parse("").unwrap(), None);
        assert_eq!(TemperatureRange::parse("-5-10").unwrap(), Some(TemperatureRange { min: -5.0, max: 10.0 }));
        assert_eq!(TemperatureRange::parse("12.5 - 20").unwrap(), Some(TemperatureRange { min: 12.5, max: 20.0 }));
        assert!(TemperatureRange::parse("30-25").is_err());
        assert!(TemperatureRange::parse("warm").is_err());
        assert!(CropQuery::parse("Clay", "x", 20.0, "", "monsoon").is_err());
        assert_eq!(query("Clay", "x", 20.0, "", "autumn").season, Some(Season::Autumn));
    }

    #[test]
    fn every_soil_zone_and_bracket_resolves() {
        let book = RuleBook::builtin();
        for soil in SoilType::ALL {
            for location in ["Kerala", "Florida", "Japan", "Alaska", "Salem"] {
                for t in [0.0, 18.0, 22.0, 40.0] {
                    let plan = recommend(&book, &query(soil.as_str(), location, t, "", ""));
                    assert!(!plan.recommendations.is_empty(), "{} {} {}", soil, location, t);
                }
            }
        }
    }
}
