//! Step classification against the fitted curve

use forage_core::{ReactionTime, TimingClassification, TimingCode};
use forage_ports::FitResult;
use serde::{Deserialize, Serialize};

use crate::curve::{CurveFitter, FittedCurve};

/// Fitted curve plus per-step timing designations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingFit {
    pub curve: FittedCurve,
    pub classification: TimingClassification,
    /// Fitted increment minus observed increment (0 at position 0)
    pub deviations: Vec<f64>,
}

impl TimingFit {
    pub fn len(&self) -> usize {
        self.classification.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classification.is_empty()
    }
}

impl CurveFitter {
    /// Fit the curve and label every step as faster or slower than the model
    pub fn classify(&self, reaction_times: &[ReactionTime]) -> FitResult<TimingFit> {
        let curve = self.fit(reaction_times)?;
        let (classification, deviations) = label_steps(reaction_times, &curve.fitted);
        Ok(TimingFit {
            curve,
            classification,
            deviations,
        })
    }
}

/// Fit with [`FitConfig::default`](crate::FitConfig) and classify
pub fn fit_exponential_curve(reaction_times: &[ReactionTime]) -> FitResult<TimingFit> {
    CurveFitter::default().classify(reaction_times)
}

fn label_steps(observed: &[f64], fitted: &[f64]) -> (TimingClassification, Vec<f64>) {
    let mut codes = Vec::with_capacity(observed.len());
    let mut deviations = Vec::with_capacity(observed.len());

    for i in 0..observed.len() {
        if i == 0 {
            codes.push(TimingCode::Boundary);
            deviations.push(0.0);
            continue;
        }
        let fitted_step = fitted[i] - fitted[i - 1];
        let raw_step = observed[i] - observed[i - 1];
        codes.push(if fitted_step > raw_step {
            TimingCode::FasterThanModel
        } else {
            TimingCode::SlowerThanModel
        });
        deviations.push(fitted_step - raw_step);
    }
    (TimingClassification::new(codes), deviations)
}
