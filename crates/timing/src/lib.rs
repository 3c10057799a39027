//! Forage Response-Time Classifier
//!
//! Fits a saturating exponential to a subject's cumulative response times and
//! labels every step as faster or slower than the fitted model.
//!
//! ```text
//! rt (cumulative)
//!   │                         ______ c
//!   │                 ____----
//!   │          __---·          f(x) = c · (1 - e^(-m·x))
//!   │      _-·   ·  raw
//!   │   /·
//!   │ /
//!   └──────────────────────────────── x = 1..L
//! ```
//!
//! For each step `i > 0` the fitted increment `f(x_i) - f(x_{i-1})` is compared
//! with the observed increment `rt[i] - rt[i-1]`. The result uses
//! [`TimingCode`], kept apart from the switch coding.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forage_timing::{CurveFitter, FitConfig};
//!
//! let fitter = CurveFitter::new(FitConfig::default());
//! let timing = fitter.classify(&reaction_times)?;
//! println!("c = {:.2}, m = {:.4}", timing.curve.c, timing.curve.m);
//! ```

mod classify;
mod config;
mod curve;

pub use classify::{TimingFit, fit_exponential_curve};
pub use config::FitConfig;
pub use curve::{CurveFitter, FittedCurve, exponential_curve};

// Re-export domain types for convenience
pub use forage_core::{TimingClassification, TimingCode};
pub use forage_ports::{FitError, FitResult};
