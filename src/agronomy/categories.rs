//! Closed categorical inputs of the rule engine.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Sandy,
    Loamy,
    Clay,
    Silty,
    Peaty,
    Chalky,
}

impl SoilType {
    pub const ALL: [SoilType; 6] = [
        SoilType::Sandy,
        SoilType::Loamy,
        SoilType::Clay,
        SoilType::Silty,
        SoilType::Peaty,
        SoilType::Chalky,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Sandy => "Sandy",
            SoilType::Loamy => "Loamy",
            SoilType::Clay => "Clay",
            SoilType::Silty => "Silty",
            SoilType::Peaty => "Peaty",
            SoilType::Chalky => "Chalky",
        }
    }

    /// Case-insensitive; `None` for soils outside the six modelled types.
    pub fn parse(s: &str) -> Option<SoilType> {
        let s = s.trim();
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    Seedling,
    Vegetative,
    Flowering,
    Fruiting,
    Maturity,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Seedling,
        GrowthStage::Vegetative,
        GrowthStage::Flowering,
        GrowthStage::Fruiting,
        GrowthStage::Maturity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Seedling => "Seedling",
            GrowthStage::Vegetative => "Vegetative",
            GrowthStage::Flowering => "Flowering",
            GrowthStage::Fruiting => "Fruiting",
            GrowthStage::Maturity => "Maturity",
        }
    }

    pub fn parse(s: &str) -> Option<GrowthStage> {
        let s = s.trim();
        Self::ALL.into_iter().find(|g| g.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimateZone {
    Tropical,
    Subtropical,
    Temperate,
    Cold,
}

impl ClimateZone {
    /// Also the tie-break precedence when keywords of equal length match.
    pub const ALL: [ClimateZone; 4] = [
        ClimateZone::Tropical,
        ClimateZone::Subtropical,
        ClimateZone::Temperate,
        ClimateZone::Cold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateZone::Tropical => "tropical",
            ClimateZone::Subtropical => "subtropical",
            ClimateZone::Temperate => "temperate",
            ClimateZone::Cold => "cold",
        }
    }
}

/// Position of the request temperature relative to a zone's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempBracket {
    Above,
    AtOrBelow,
}

impl TempBracket {
    pub fn classify(temperature: f64, threshold: f64) -> TempBracket {
        if temperature > threshold {
            TempBracket::Above
        } else {
            TempBracket::AtOrBelow
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    #[serde(rename = "Year-round")]
    YearRound,
}

impl Season {
    pub const ALL: [Season; 5] =
        [Season::Spring, Season::Summer, Season::Autumn, Season::Winter, Season::YearRound];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
            Season::YearRound => "Year-round",
        }
    }

    pub fn parse(s: &str) -> Option<Season> {
        let s = s.trim();
        Self::ALL.into_iter().find(|x| x.as_str().eq_ignore_ascii_case(s))
    }
}

macro_rules! display_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(SoilType, GrowthStage, ClimateZone, Season);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_ignores_case_and_padding() {
        assert_eq!(SoilType::parse(" loamy "), Some(SoilType::Loamy));
        assert_eq!(GrowthStage::parse("FRUITING"), Some(GrowthStage::Fruiting));
        assert_eq!(Season::parse("year-round"), Some(Season::YearRound));
        assert_eq!(SoilType::parse("Red Soil"), None);
    }

    #[test]
    fn bracket_threshold_is_exclusive() {
        assert_eq!(TempBracket::classify(25.0, 25.0), TempBracket::AtOrBelow);
        assert_eq!(TempBracket::classify(25.5, 25.0), TempBracket::Above);
    }

    #[test]
    fn season_serializes_with_hyphen() {
        assert_eq!(serde_json::to_string(&Season::YearRound).unwrap(), "\"Year-round\"");
    }
}
