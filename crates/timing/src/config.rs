use serde::{Deserialize, Serialize};

/// Configuration for the saturating-exponential fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Initial guess for the rate `m`
    pub initial_rate: f64,
    /// Budget of model evaluations before giving up
    pub max_evaluations: usize,
    /// Stop when the relative cost reduction of an accepted step falls below this
    pub ftol: f64,
    /// Stop when the relative step size falls below this
    pub xtol: f64,
    /// Stop when the projected gradient falls below this, relative to its
    /// starting size
    pub gtol: f64,
    /// Starting Levenberg-Marquardt damping
    pub initial_damping: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            initial_rate: 0.01,
            max_evaluations: 10_000,
            ftol: 1e-8,
            xtol: 1e-8,
            gtol: 1e-8,
            initial_damping: 1e-3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FitConfig = serde_json::from_str(r#"{"max_evaluations": 500}"#).unwrap();
        assert_eq!(config.max_evaluations, 500);
        assert_eq!(config.initial_rate, 0.01);
    }
}
