pub mod categories;
pub mod crops;
pub mod disease;
pub mod fertilizer;
pub mod npk_model;
pub mod rulebook;

pub use categories::{ClimateZone, GrowthStage, Season, SoilType, TempBracket};
pub use crops::{CropPlan, CropQuery, TemperatureRange};
pub use disease::{describe_label, DiseaseInfo};
pub use fertilizer::{FertilizerPlan, FertilizerQuery, Npk};
pub use npk_model::NpkModel;
pub use rulebook::RuleBook;
