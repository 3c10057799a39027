//! Saturating Exponential Fit
//!
//! Bounded nonlinear least squares for `f(x) = c · (1 - e^(-m·x))` over the
//! box `c ∈ [0, 2·max(rt)]`, `m ∈ [0, 1]`, using Levenberg-Marquardt steps on
//! the variables that are not held at a bound.

use forage_core::ReactionTime;
use forage_ports::{FitError, FitResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::FitConfig;

const MAX_DAMPING: f64 = 1e16;
const MIN_DAMPING: f64 = 1e-12;
const RATE_UPPER: f64 = 1.0;

/// Saturating exponential model
pub fn exponential_curve(x: f64, c: f64, m: f64) -> f64 {
    c * (1.0 - (-m * x).exp())
}

/// Result of a successful fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedCurve {
    /// Asymptote
    pub c: f64,
    /// Rate
    pub m: f64,
    /// Model value at x = 1..L
    pub fitted: Vec<f64>,
    /// In-sample R-squared
    pub r_squared: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Model evaluations spent
    pub evaluations: usize,
}

/// Box constraints on (c, m), lower bounds are 0
#[derive(Debug, Clone, Copy)]
struct Bounds {
    upper: [f64; 2],
}

impl Bounds {
    fn clamp(&self, p: [f64; 2]) -> [f64; 2] {
        [p[0].clamp(0.0, self.upper[0]), p[1].clamp(0.0, self.upper[1])]
    }

    /// Variables not pinned at a bound by a gradient pointing out of the box
    fn free_variables(&self, p: [f64; 2], g: [f64; 2]) -> [bool; 2] {
        let mut free = [true; 2];
        for (i, is_free) in free.iter_mut().enumerate() {
            let pinned_low = p[i] <= 0.0 && g[i] > 0.0;
            let pinned_high = p[i] >= self.upper[i] && g[i] < 0.0;
            *is_free = !(pinned_low || pinned_high);
        }
        free
    }
}

/// Saturating-exponential curve fitter
pub struct CurveFitter {
    config: FitConfig,
}

impl CurveFitter {
    /// Create new fitter
    pub fn new(config: FitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Fit the model to cumulative response times at x = 1..L
    ///
    /// Each iteration solves the damped normal equations over the free
    /// variables only; a variable sitting on a bound with its gradient
    /// pointing outward keeps a zero step. The fit converges when the
    /// projected gradient vanishes (relative to its starting size), or when an
    /// accepted step no longer reduces cost or moves the parameters and the
    /// projected gradient is already small.
    pub fn fit(&self, reaction_times: &[ReactionTime]) -> FitResult<FittedCurve> {
        if reaction_times.is_empty() {
            return Err(FitError::EmptySeries);
        }
        if let Some(bad) = reaction_times.iter().find(|rt| !rt.is_finite()) {
            return Err(FitError::InvalidReactionTimes(format!(
                "non-finite value {}",
                bad
            )));
        }
        if reaction_times.windows(2).any(|w| w[1] < w[0]) {
            warn!("Reaction times are not cumulative (series decreases)");
        }

        let max_rt = reaction_times.iter().cloned().fold(f64::MIN, f64::max);
        if max_rt <= 0.0 {
            return Err(FitError::DegenerateBounds {
                upper: 2.0 * max_rt,
            });
        }

        let bounds = Bounds {
            upper: [2.0 * max_rt, RATE_UPPER],
        };
        let xs: Vec<f64> = (1..=reaction_times.len()).map(|x| x as f64).collect();
        let cost = |p: [f64; 2]| -> f64 {
            0.5 * xs
                .iter()
                .zip(reaction_times)
                .map(|(x, y)| (exponential_curve(*x, p[0], p[1]) - y).powi(2))
                .sum::<f64>()
        };

        let tight = self.config.gtol;
        let loose = self.config.gtol.sqrt();

        let mut params = bounds.clamp([max_rt, self.config.initial_rate]);
        let mut current = cost(params);
        let mut evaluations = 1;
        let mut damping = self.config.initial_damping;
        let mut gradient_scale: Option<f64> = None;
        let mut small_step = false;

        loop {
            let (jtj, gradient) = normal_equations(&xs, reaction_times, params);
            let free = bounds.free_variables(params, gradient);
            let projected = [
                if free[0] { gradient[0] } else { 0.0 },
                if free[1] { gradient[1] } else { 0.0 },
            ];
            let scale = *gradient_scale.get_or_insert(inf_norm(projected).max(f64::MIN_POSITIVE));
            let stationarity = inf_norm(projected) / scale;

            if stationarity <= tight || (small_step && stationarity <= loose) {
                break;
            }
            if evaluations >= self.config.max_evaluations {
                return Err(non_convergence(evaluations, params));
            }

            let Some(step) = damped_step(jtj, gradient, damping, free) else {
                damping *= 10.0;
                if damping > MAX_DAMPING {
                    if stationarity <= loose {
                        break;
                    }
                    return Err(non_convergence(evaluations, params));
                }
                continue;
            };

            let candidate = bounds.clamp([params[0] + step[0], params[1] + step[1]]);
            let candidate_cost = cost(candidate);
            evaluations += 1;

            if candidate_cost < current {
                let moved = [candidate[0] - params[0], candidate[1] - params[1]];
                let reduction = current - candidate_cost;
                small_step = reduction <= self.config.ftol * current
                    || norm(moved) <= self.config.xtol * (norm(candidate) + self.config.xtol);

                params = candidate;
                current = candidate_cost;
                damping = (damping / 10.0).max(MIN_DAMPING);
            } else {
                damping *= 10.0;
                if damping > MAX_DAMPING {
                    // No descent even along a vanishing step
                    if stationarity <= loose {
                        break;
                    }
                    return Err(non_convergence(evaluations, params));
                }
            }
        }

        let fitted: Vec<f64> = xs
            .iter()
            .map(|x| exponential_curve(*x, params[0], params[1]))
            .collect();
        let (r_squared, rmse) = goodness_of_fit(reaction_times, &fitted);

        debug!(
            "Curve fit converged: c={:.4}, m={:.6}, R²={:.4}, {} evaluations",
            params[0], params[1], r_squared, evaluations
        );

        Ok(FittedCurve {
            c: params[0],
            m: params[1],
            fitted,
            r_squared,
            rmse,
            evaluations,
        })
    }
}

fn non_convergence(evaluations: usize, params: [f64; 2]) -> FitError {
    warn!(
        "Curve fit gave up after {} evaluations (c={:.4}, m={:.6})",
        evaluations, params[0], params[1]
    );
    FitError::NonConvergence { evaluations }
}

impl Default for CurveFitter {
    fn default() -> Self {
        Self::new(FitConfig::default())
    }
}

/// `JᵀJ` and `Jᵀr` at `p`, with `r = f(x) - y`
fn normal_equations(xs: &[f64], ys: &[f64], p: [f64; 2]) -> ([[f64; 2]; 2], [f64; 2]) {
    let [c, m] = p;
    let mut jtj = [[0.0; 2]; 2];
    let mut gradient = [0.0; 2];

    for (x, y) in xs.iter().zip(ys) {
        let decay = (-m * x).exp();
        let residual = c * (1.0 - decay) - y;
        let jacobian = [1.0 - decay, c * x * decay];

        for i in 0..2 {
            gradient[i] += jacobian[i] * residual;
            for j in 0..2 {
                jtj[i][j] += jacobian[i] * jacobian[j];
            }
        }
    }
    (jtj, gradient)
}

/// Solve `(JᵀJ + λ·diag(JᵀJ)) δ = -Jᵀr` over the free variables
///
/// Pinned variables get a zero step and drop out of the system.
fn damped_step(
    jtj: [[f64; 2]; 2],
    gradient: [f64; 2],
    damping: f64,
    free: [bool; 2],
) -> Option<[f64; 2]> {
    let diagonal = |i: usize| jtj[i][i] + damping * jtj[i][i].max(MIN_DAMPING);

    match free {
        [true, true] => {
            let (a, d, b) = (diagonal(0), diagonal(1), jtj[0][1]);
            let det = a * d - b * b;
            if !det.is_finite() || det <= f64::MIN_POSITIVE {
                return None;
            }
            Some([
                (-gradient[0] * d + gradient[1] * b) / det,
                (-gradient[1] * a + gradient[0] * b) / det,
            ])
        }
        [true, false] => Some([single_step(diagonal(0), gradient[0])?, 0.0]),
        [false, true] => Some([0.0, single_step(diagonal(1), gradient[1])?]),
        [false, false] => None,
    }
}

fn single_step(pivot: f64, gradient: f64) -> Option<f64> {
    (pivot.is_finite() && pivot > f64::MIN_POSITIVE).then(|| -gradient / pivot)
}

fn inf_norm(v: [f64; 2]) -> f64 {
    v[0].abs().max(v[1].abs())
}

fn norm(v: [f64; 2]) -> f64 {
    (v[0] * v[0] + v[1] * v[1]).sqrt()
}

fn goodness_of_fit(observed: &[f64], fitted: &[f64]) -> (f64, f64) {
    let n = observed.len() as f64;
    let mean = observed.iter().sum::<f64>() / n;
    let ss_res: f64 = observed
        .iter()
        .zip(fitted)
        .map(|(y, f)| (y - f).powi(2))
        .sum();
    let ss_tot: f64 = observed.iter().map(|y| (y - mean).powi(2)).sum();

    let r_squared = if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else {
        0.0
    };
    (r_squared, (ss_res / n).sqrt())
}
