//! Plant and condition derived from a class label.

use serde::Serialize;

use crate::classifier::labels::LABEL_SEPARATOR;

pub const HEALTHY: &str = "Healthy";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseInfo {
    /// Text before the first separator (`"Tomato"` for `"Tomato_Late_blight"`).
    pub plant: String,
    pub is_healthy: bool,
    /// Separators replaced by spaces, title-cased: `"Tomato Late Blight"`.
    pub display_name: String,
    /// `"Healthy"`, or the display name for a diseased leaf.
    pub status: String,
    pub message: String,
}

pub fn describe_label(label: &str) -> DiseaseInfo {
    let plant = label.split(LABEL_SEPARATOR).next().unwrap_or(label).to_string();
    let is_healthy = label.to_lowercase().contains("healthy");
    let display_name = title_case(&label.replace(LABEL_SEPARATOR, " "));

    let (status, message) = if is_healthy {
        (HEALTHY.to_string(), "No disease detected - Plant appears healthy".to_string())
    } else {
        (display_name.clone(), format!("Disease detected: {}", display_name))
    };

    DiseaseInfo { plant, is_healthy, display_name, status, message }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `"TomatoTarget Spot"` becomes `"Tomatotarget Spot"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
