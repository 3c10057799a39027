//! Method selection
//!
//! [`SwitchMethod`] names a detector together with its parameters so a run can
//! be configured as data (e.g. deserialized from JSON).

use forage_ports::{SwitchDetector, SwitchResult};
use serde::{Deserialize, Serialize};

use crate::delta::{DeltaSimilarity, MultimodalDelta};
use crate::multimodal::MultimodalSimDrop;
use crate::norms::{CategoricalNorms, TroyerNorms};
use crate::simdrop::SimDrop;
use crate::svd_gtom::SvdGtom;
use crate::validate;

pub const SIMDROP: &str = "simdrop";
pub const NORMS: &str = "norms";
pub const NORMS_CATEGORICAL: &str = "norms_categorical";
pub const MULTIMODAL: &str = "multimodal";
pub const DELTA: &str = "delta";
pub const MULTIMODAL_DELTA: &str = "multimodaldelta";
pub const SVD_GTOM: &str = "svd_gtom";

/// A switch method and its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SwitchMethod {
    Simdrop,
    Norms,
    NormsCategorical,
    Multimodal {
        alpha: f64,
    },
    Delta {
        rise_thresh: f64,
        fall_thresh: f64,
    },
    #[serde(rename = "multimodaldelta")]
    MultimodalDelta {
        rise_thresh: f64,
        fall_thresh: f64,
        alpha: f64,
    },
    SvdGtom {
        threshold: f64,
    },
}

impl SwitchMethod {
    /// Name of the detector this method builds
    pub fn name(&self) -> &'static str {
        match self {
            SwitchMethod::Simdrop => SIMDROP,
            SwitchMethod::Norms => NORMS,
            SwitchMethod::NormsCategorical => NORMS_CATEGORICAL,
            SwitchMethod::Multimodal { .. } => MULTIMODAL,
            SwitchMethod::Delta { .. } => DELTA,
            SwitchMethod::MultimodalDelta { .. } => MULTIMODAL_DELTA,
            SwitchMethod::SvdGtom { .. } => SVD_GTOM,
        }
    }

    /// Range-check every parameter
    pub fn validate(&self) -> SwitchResult<()> {
        match *self {
            SwitchMethod::Multimodal { alpha } => validate::unit_interval("alpha", alpha),
            SwitchMethod::Delta {
                rise_thresh,
                fall_thresh,
            } => {
                validate::unit_interval("rise_thresh", rise_thresh)?;
                validate::unit_interval("fall_thresh", fall_thresh)
            }
            SwitchMethod::MultimodalDelta {
                rise_thresh,
                fall_thresh,
                alpha,
            } => {
                validate::unit_interval("rise_thresh", rise_thresh)?;
                validate::unit_interval("fall_thresh", fall_thresh)?;
                validate::unit_interval("alpha", alpha)
            }
            _ => Ok(()),
        }
    }

    /// Returns true if the detector reads the norms table
    pub fn needs_norms(&self) -> bool {
        matches!(self, SwitchMethod::Norms | SwitchMethod::NormsCategorical)
    }

    /// Returns true if the detector reads the phonological series
    pub fn needs_phonology(&self) -> bool {
        matches!(
            self,
            SwitchMethod::Multimodal { .. } | SwitchMethod::MultimodalDelta { .. }
        )
    }

    /// Build the detector, validating parameters first
    pub fn build(&self) -> SwitchResult<Box<dyn SwitchDetector>> {
        let detector: Box<dyn SwitchDetector> = match *self {
            SwitchMethod::Simdrop => Box::new(SimDrop),
            SwitchMethod::Norms => Box::new(TroyerNorms),
            SwitchMethod::NormsCategorical => Box::new(CategoricalNorms),
            SwitchMethod::Multimodal { alpha } => Box::new(MultimodalSimDrop::new(alpha)?),
            SwitchMethod::Delta {
                rise_thresh,
                fall_thresh,
            } => Box::new(DeltaSimilarity::new(rise_thresh, fall_thresh)?),
            SwitchMethod::MultimodalDelta {
                rise_thresh,
                fall_thresh,
                alpha,
            } => Box::new(MultimodalDelta::new(rise_thresh, fall_thresh, alpha)?),
            SwitchMethod::SvdGtom { threshold } => Box::new(SvdGtom::new(threshold)),
        };
        Ok(detector)
    }
}
