//! Delta Similarity
//!
//! Lundin & Todd: a two-state machine over z-scored adjacent similarities.
//! Unlike the similarity drop it allows consecutive switches and ignores small
//! dips that are only noise.
//!
//! ```text
//!            (prev - next) > fall_thresh
//!   Cluster ─────────────────────────────► Switch
//!      ▲                                     │
//!      └─────────────────────────────────────┘
//!            (next - prev) > rise_thresh
//! ```
//!
//! The first decision (position 1) compares the z-scored similarity against
//! the subject's median z-score.

use forage_core::{Classification, Item, Similarity, SwitchCode};
use forage_ports::{FluencyInput, SwitchDetector, SwitchResult};

use crate::method::{DELTA, MULTIMODAL_DELTA};
use crate::multimodal::blend;
use crate::validate;

/// State of the delta machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeltaState {
    Cluster,
    Switch,
}

impl DeltaState {
    fn code(self) -> SwitchCode {
        match self {
            DeltaState::Cluster => SwitchCode::NoSwitch,
            DeltaState::Switch => SwitchCode::Switch,
        }
    }
}

/// Population z-score (mean 0, divided by the population standard deviation)
///
/// A constant series has no spread and scores 0 everywhere.
pub fn zscore(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - mean) / std_dev).collect()
}

/// Median; the mean of the two middle values for even lengths
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Delta similarity over the semantic series
pub fn switch_delta(
    items: &[Item],
    semantic: &[Similarity],
    rise_thresh: f64,
    fall_thresh: f64,
) -> SwitchResult<Classification> {
    validate::unit_interval("rise_thresh", rise_thresh)?;
    validate::unit_interval("fall_thresh", fall_thresh)?;
    validate::non_empty(items.len())?;
    validate::same_length("semantic similarity series", semantic, items.len())?;

    Ok(delta_states(semantic, rise_thresh, fall_thresh))
}

/// Delta similarity over the blended semantic/phonological series
pub fn switch_multimodaldelta(
    items: &[Item],
    semantic: &[Similarity],
    phonological: &[Similarity],
    rise_thresh: f64,
    fall_thresh: f64,
    alpha: f64,
) -> SwitchResult<Classification> {
    validate::unit_interval("rise_thresh", rise_thresh)?;
    validate::unit_interval("fall_thresh", fall_thresh)?;
    validate::unit_interval("alpha", alpha)?;
    validate::non_empty(items.len())?;
    validate::same_length("semantic similarity series", semantic, items.len())?;
    validate::same_length("phonological similarity series", phonological, items.len())?;

    let blended = blend(semantic, phonological, alpha);
    Ok(delta_states(&blended, rise_thresh, fall_thresh))
}

/// Run the state machine over a full-length series (position 0 ignored)
fn delta_states(series: &[Similarity], rise_thresh: f64, fall_thresh: f64) -> Classification {
    let mut classification = Classification::with_capacity(series.len());
    classification.push(SwitchCode::Boundary);
    if series.len() < 2 {
        return classification;
    }

    // z[0] corresponds to position 1
    let z = zscore(&series[1..]);
    let Some(threshold) = median(&z) else {
        return classification;
    };

    let mut state = if z[0] < threshold {
        DeltaState::Switch
    } else {
        DeltaState::Cluster
    };
    classification.push(state.code());

    for window in z.windows(2) {
        let (prev, next) = (window[0], window[1]);
        state = match state {
            DeltaState::Cluster if (prev - next) > fall_thresh => DeltaState::Switch,
            DeltaState::Switch if (next - prev) > rise_thresh => DeltaState::Cluster,
            unchanged => unchanged,
        };
        classification.push(state.code());
    }

    classification
}

/// Delta-similarity detector over the semantic series
#[derive(Debug, Clone, Copy)]
pub struct DeltaSimilarity {
    rise_thresh: f64,
    fall_thresh: f64,
}

impl DeltaSimilarity {
    /// Create the detector; both thresholds must be within [0, 1]
    pub fn new(rise_thresh: f64, fall_thresh: f64) -> SwitchResult<Self> {
        validate::unit_interval("rise_thresh", rise_thresh)?;
        validate::unit_interval("fall_thresh", fall_thresh)?;
        Ok(Self {
            rise_thresh,
            fall_thresh,
        })
    }
}

impl SwitchDetector for DeltaSimilarity {
    fn detect(&self, input: &FluencyInput<'_>) -> SwitchResult<Classification> {
        switch_delta(
            input.items,
            input.require_semantic(DELTA)?,
            self.rise_thresh,
            self.fall_thresh,
        )
    }

    fn name(&self) -> &str {
        DELTA
    }
}

/// Delta-similarity detector over the blended series
#[derive(Debug, Clone, Copy)]
pub struct MultimodalDelta {
    rise_thresh: f64,
    fall_thresh: f64,
    alpha: f64,
}

impl MultimodalDelta {
    /// Create the detector; thresholds and `alpha` must be within [0, 1]
    pub fn new(rise_thresh: f64, fall_thresh: f64, alpha: f64) -> SwitchResult<Self> {
        validate::unit_interval("rise_thresh", rise_thresh)?;
        validate::unit_interval("fall_thresh", fall_thresh)?;
        validate::unit_interval("alpha", alpha)?;
        Ok(Self {
            rise_thresh,
            fall_thresh,
            alpha,
        })
    }
}

impl SwitchDetector for MultimodalDelta {
    fn detect(&self, input: &FluencyInput<'_>) -> SwitchResult<Classification> {
        switch_multimodaldelta(
            input.items,
            input.require_semantic(MULTIMODAL_DELTA)?,
            input.require_phonological(MULTIMODAL_DELTA)?,
            self.rise_thresh,
            self.fall_thresh,
            self.alpha,
        )
    }

    fn name(&self) -> &str {
        MULTIMODAL_DELTA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use forage_ports::SwitchError;
    use SwitchCode::*;

    fn items(n: usize) -> Vec<Item> {
        (0..n).map(|i| format!("item{}", i)).collect()
    }

    #[test]
    fn test_zscore_population() {
        let z = zscore(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        // mean 5, population std 2
        assert_relative_eq!(z[0], -1.5);
        assert_relative_eq!(z[7], 2.0);
        assert_relative_eq!(z.iter().sum::<f64>(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zscore_constant_series() {
        assert_eq!(zscore(&[0.3, 0.3, 0.3]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_hand_traced_sequence() {
        // z-scores of [0.9, 0.1, 0.2, 0.8, 0.7]: mean 0.54, std 0.3262
        // z ≈ [1.104, -1.349, -1.042, 0.797, 0.490], median 0.490
        // pos1: 1.104 ≥ median → Cluster
        // pos2: Cluster, fall 2.453 > 0.5 → Switch
        // pos3: Switch, rise 0.307 ≤ 0.5 → Switch
        // pos4: Switch, rise 1.839 > 0.5 → Cluster
        // pos5: Cluster, fall 0.307 ≤ 0.5 → Cluster
        let series = [0.0001, 0.9, 0.1, 0.2, 0.8, 0.7];
        let result = switch_delta(&items(6), &series, 0.5, 0.5).unwrap();
        assert_eq!(result.codes().to_vec(), vec![Boundary, NoSwitch, Switch, Switch, NoSwitch, NoSwitch]);
    }

    #[test]
    fn test_consecutive_switches_allowed() {
        // Steady decline keeps the machine in Switch once it falls
        let series = [0.0, 0.1, 0.95, 0.6, 0.3, 0.05];
        let result = switch_delta(&items(6), &series, 0.0, 0.0).unwrap();
        assert_eq!(result.to_codes(), vec![2, 1, 0, 1, 1, 1]);
    }

    #[test]
    fn test_last_position_is_classified() {
        let series = [0.0, 0.5, 0.4, 0.6];
        let result = switch_delta(&items(4), &series, 0.75, 0.75).unwrap();
        assert_eq!(result.len(), 4);
        assert_ne!(result[3], Boundary);
    }

    #[test]
    fn test_short_lists() {
        assert_eq!(
            switch_delta(&items(1), &[0.0], 0.5, 0.5).unwrap().to_codes(),
            vec![2]
        );
        // Single similarity has z-score 0, equal to the median → Cluster
        assert_eq!(
            switch_delta(&items(2), &[0.0, 0.4], 0.5, 0.5)
                .unwrap()
                .to_codes(),
            vec![2, 0]
        );
    }

    #[test]
    fn test_invalid_thresholds() {
        let list = items(3);
        let series = [0.0, 0.4, 0.5];
        assert_eq!(
            switch_delta(&list, &series, -0.1, 0.5),
            Err(SwitchError::InvalidParameter {
                name: "rise_thresh",
                value: -0.1
            })
        );
        assert!(switch_delta(&list, &series, 0.5, 1.2).is_err());
        assert!(switch_multimodaldelta(&list, &series, &series, 0.5, 0.5, 1.5).is_err());
        assert!(DeltaSimilarity::new(0.5, -1.0).is_err());
        assert!(MultimodalDelta::new(0.5, 0.5, 2.0).is_err());
    }

    #[test]
    fn test_multimodal_alpha_one_matches_semantic() {
        let list = items(6);
        let semantic = [0.0001, 0.9, 0.1, 0.2, 0.8, 0.7];
        let phonological = [0.0001, 0.2, 0.6, 0.1, 0.3, 0.9];
        assert_eq!(
            switch_multimodaldelta(&list, &semantic, &phonological, 0.5, 0.5, 1.0).unwrap(),
            switch_delta(&list, &semantic, 0.5, 0.5).unwrap()
        );
        assert_eq!(
            switch_multimodaldelta(&list, &semantic, &phonological, 0.5, 0.5, 0.0).unwrap(),
            switch_delta(&list, &phonological, 0.5, 0.5).unwrap()
        );
    }
}
