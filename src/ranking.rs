//! Score vector → top-1 / top-3 ranking.

use serde::Serialize;

/// Raw classifier output, one score per class label. Softmax output and raw
/// logits are both accepted; nothing here assumes the scores sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreVector(Vec<f64>);

impl ScoreVector {
    pub fn new(scores: Vec<f64>) -> ScoreVector {
        ScoreVector(scores)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// One ranked class; `score` is a percentage (raw score × 100, unrounded).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPrediction {
    pub label: String,
    pub confidence: f64,
    pub top3: Vec<LabelScore>,
}

pub const TOP_K: usize = 3;

/// Ranks `scores` against `labels`.
///
/// Indices are stably sorted by descending score, so among equal scores the
/// lower index wins both the top-1 slot and its place in the top-3. Returns
/// `None` only for an empty score vector.
pub fn rank(scores: &ScoreVector, labels: &[String]) -> Option<RankedPrediction> {
    let values = scores.as_slice();
    if values.is_empty() {
        return None;
    }

    let label_for = |i: usize| -> String {
        labels.get(i).cloned().unwrap_or_else(|| i.to_string())
    };

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let top3 = order
        .iter()
        .take(TOP_K)
        .map(|&i| LabelScore { label: label_for(i), score: values[i] * 100.0 })
        .collect();

    let best = order[0];
    Some(RankedPrediction { label: label_for(best), confidence: values[best] * 100.0, top3 })
}
