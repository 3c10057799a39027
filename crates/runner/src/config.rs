//! Batch configuration

use forage_core::{Item, ReactionTime};
use forage_switch::SwitchMethod;
use forage_timing::FitConfig;
use serde::{Deserialize, Serialize};

/// Which classifiers to run over every subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Switch methods, run in this order
    pub methods: Vec<SwitchMethod>,
    /// Fit response times when a subject has them
    pub classify_timing: bool,
    /// Curve-fit settings
    pub fit: FitConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            methods: vec![
                SwitchMethod::Simdrop,
                SwitchMethod::Delta {
                    rise_thresh: 0.75,
                    fall_thresh: 0.75,
                },
            ],
            classify_timing: true,
            fit: FitConfig::default(),
        }
    }
}

/// One participant's fluency list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(alias = "ID")]
    pub id: String,
    pub items: Vec<Item>,
    /// Cumulative response times, one per item
    #[serde(default)]
    pub reaction_times: Option<Vec<ReactionTime>>,
}

impl Subject {
    pub fn new(id: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            id: id.into(),
            items,
            reaction_times: None,
        }
    }

    pub fn with_reaction_times(mut self, reaction_times: Vec<ReactionTime>) -> Self {
        self.reaction_times = Some(reaction_times);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_json() {
        let config: RunnerConfig = serde_json::from_str(
            r#"{
                "methods": [
                    {"method": "norms"},
                    {"method": "multimodal", "alpha": 0.6}
                ],
                "fit": {"max_evaluations": 2000}
            }"#,
        )
        .unwrap();

        assert_eq!(config.methods.len(), 2);
        assert_eq!(config.methods[1], SwitchMethod::Multimodal { alpha: 0.6 });
        assert!(config.classify_timing);
        assert_eq!(config.fit.max_evaluations, 2000);
        assert_eq!(config.fit.initial_rate, 0.01);
    }

    #[test]
    fn test_subject_without_times() {
        let subject: Subject =
            serde_json::from_str(r#"{"ID": "s01", "items": ["cat", "dog"]}"#).unwrap();
        assert_eq!(subject.id, "s01");
        assert!(subject.reaction_times.is_none());
    }
}
