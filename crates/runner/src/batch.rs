//! Batch - parallel classification of many subjects
//!
//! Detectors are built once up front; subjects are then processed in parallel
//! with rayon. A failing subject is recorded in its own outcome and never
//! aborts the others.

use forage_core::Classification;
use forage_lexicon::HistorySeries;
use forage_ports::{CategoryResolver, ClusterMembership, FluencyInput, LexicalResource};
use forage_switch::{SwitchDetector, create_switch_detector};
use forage_timing::{CurveFitter, FitResult, TimingFit};
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::config::{RunnerConfig, Subject};
use crate::error::{RunnerError, RunnerResult};

/// Read-only lookup data shared by every subject
#[derive(Clone, Copy)]
pub struct BatchResources<'a> {
    pub lexicon: &'a dyn LexicalResource,
    pub norms: Option<&'a dyn CategoryResolver>,
    pub clusters: Option<&'a dyn ClusterMembership>,
}

impl<'a> BatchResources<'a> {
    pub fn new(lexicon: &'a dyn LexicalResource) -> Self {
        Self {
            lexicon,
            norms: None,
            clusters: None,
        }
    }

    pub fn with_norms(mut self, norms: &'a dyn CategoryResolver) -> Self {
        self.norms = Some(norms);
        self
    }

    pub fn with_clusters(mut self, clusters: &'a dyn ClusterMembership) -> Self {
        self.clusters = Some(clusters);
        self
    }
}

/// Everything computed for one subject
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectReport {
    pub subject_id: String,
    pub history: HistorySeries,
    /// (method name, classification) in configured order
    pub switches: Vec<(String, Classification)>,
    /// Present when timing is enabled and the subject has response times
    pub timing: Option<FitResult<TimingFit>>,
}

impl SubjectReport {
    /// Classification produced by the named method
    pub fn switches_for(&self, method: &str) -> Option<&Classification> {
        self.switches
            .iter()
            .find(|(name, _)| name == method)
            .map(|(_, classification)| classification)
    }
}

/// Outcome of one subject, success or failure
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectOutcome {
    pub subject_id: String,
    pub result: RunnerResult<SubjectReport>,
}

/// Outcomes for a whole batch, in input order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<SubjectOutcome>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &SubjectReport> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &RunnerError)> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            Ok(_) => None,
            Err(err) => Some((o.subject_id.as_str(), err)),
        })
    }

    pub fn get(&self, subject_id: &str) -> Option<&SubjectOutcome> {
        self.outcomes.iter().find(|o| o.subject_id == subject_id)
    }
}

/// Runs the configured classifiers over subjects
pub struct BatchRunner {
    detectors: Vec<Box<dyn SwitchDetector>>,
    fitter: Option<CurveFitter>,
}

impl BatchRunner {
    /// Build every detector, failing on the first invalid method
    pub fn new(config: RunnerConfig) -> RunnerResult<Self> {
        let detectors = config
            .methods
            .iter()
            .map(create_switch_detector)
            .collect::<Result<Vec<_>, _>>()?;
        let fitter = config
            .classify_timing
            .then(|| CurveFitter::new(config.fit));

        Ok(Self { detectors, fitter })
    }

    /// Names of the detectors, in run order
    pub fn method_names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Classify one subject
    pub fn run_subject(
        &self,
        subject: &Subject,
        resources: &BatchResources<'_>,
    ) -> RunnerResult<SubjectReport> {
        let history = HistorySeries::build(&subject.items, resources.lexicon)?;

        let mut input = FluencyInput::new(&subject.items).with_semantic(&history.semantic);
        if let Some(phonological) = &history.phonological {
            input = input.with_phonological(phonological);
        }
        if let Some(norms) = resources.norms {
            input = input.with_norms(norms);
        }
        if let Some(clusters) = resources.clusters {
            input = input.with_clusters(clusters);
        }

        let switches = self
            .detectors
            .iter()
            .map(|detector| -> RunnerResult<(String, Classification)> {
                Ok((detector.name().to_string(), detector.detect(&input)?))
            })
            .collect::<RunnerResult<Vec<_>>>()?;

        let timing = match (&self.fitter, &subject.reaction_times) {
            (Some(fitter), Some(reaction_times)) => {
                if reaction_times.len() != subject.items.len() {
                    return Err(RunnerError::ReactionTimeMismatch {
                        subject: subject.id.clone(),
                        expected: subject.items.len(),
                        actual: reaction_times.len(),
                    });
                }
                Some(fitter.classify(reaction_times))
            }
            _ => None,
        };

        for (name, classification) in &switches {
            debug!(
                "Subject {} [{}]: switches at {:?}, cluster sizes {:?}",
                subject.id,
                name,
                classification.switch_positions(),
                classification.cluster_sizes()
            );
        }

        Ok(SubjectReport {
            subject_id: subject.id.clone(),
            history,
            switches,
            timing,
        })
    }

    /// Classify all subjects in parallel
    pub fn run(&self, subjects: &[Subject], resources: &BatchResources<'_>) -> BatchReport {
        info!(
            "Starting batch: {} subjects, methods {:?}",
            subjects.len(),
            self.method_names()
        );

        let outcomes: Vec<SubjectOutcome> = subjects
            .par_iter()
            .map(|subject| SubjectOutcome {
                subject_id: subject.id.clone(),
                result: self.run_subject(subject, resources),
            })
            .collect();

        let report = BatchReport { outcomes };
        for (subject_id, err) in report.failed() {
            warn!("Subject {} failed: {}", subject_id, err);
        }
        info!(
            "Batch finished: {} succeeded, {} failed",
            report.succeeded().count(),
            report.failed().count()
        );
        report
    }
}
