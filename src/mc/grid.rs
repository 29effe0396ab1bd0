// src/mc/grid.rs
//! Simulated Price Surface
//!
//! # Layout
//!
//! The grid is a `[steps, paths]` array: row `i` is the cross-section of the
//! asset price at discretized time `i * dt` across every simulated universe,
//! row 0 is the spot row (`s0` in every column), and row `steps - 1` holds
//! the prices at expiration. `steps - 1` update steps are applied with
//! `dt = t / steps`.
//!
//! # Sharing Contract
//!
//! The grid is written once here and only read afterwards. All payoff
//! evaluators consume the *same* grid, so vanilla, Asian and barrier values
//! computed side by side refer to the same simulated universe, and consumers
//! classifying paths (e.g. "which paths crossed the barrier") agree with the
//! payoff computation without re-simulating.
//!
//! # Ordering Constraint
//!
//! Each time step depends on the previous row, so steps run in sequence. The
//! per-column update within a step is embarrassingly parallel and runs under
//! rayon; draws are taken sequentially from the owned source *before* the
//! parallel update, so results are identical for any thread count.

use crate::error::{McError, McResult};
use crate::models::gbm::Gbm;
use crate::models::model::SdeModel;
use crate::rng::NormalSource;
use ndarray::{aview1, Array2, ArrayView1, Axis, Zip};

use super::mc_engine::McConfig;

/// Discretization scheme for the step recurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Additive Euler step, `S * (1 + r*dt + sigma*sqrt(dt)*w)`. The
    /// default scheme; may produce negative prices for large
    /// `sigma*sqrt(dt)`.
    Euler,
    /// Multiplicative log-normal step, `S * exp((r - sigma^2/2)dt +
    /// sigma*sqrt(dt)*w)`. Strictly positive; the opt-in alternative for
    /// callers that need non-negative paths.
    Exact,
}

/// The ensemble of simulated price trajectories
///
/// Written once by [`simulate_grid`], immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceGrid {
    data: Array2<f64>,
}

impl PriceGrid {
    /// Number of time steps (rows)
    pub fn steps(&self) -> usize {
        self.data.nrows()
    }

    /// Number of simulated paths (columns)
    pub fn paths(&self) -> usize {
        self.data.ncols()
    }

    /// Cross-section of prices at time step `i`
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.data.row(i)
    }

    /// Prices at expiration (the last row)
    pub fn terminal(&self) -> ArrayView1<'_, f64> {
        self.data.row(self.data.nrows() - 1)
    }

    /// Full trajectory of path `j`
    pub fn column(&self, j: usize) -> ArrayView1<'_, f64> {
        self.data.column(j)
    }

    /// Underlying array, for consumers that render or export the surface
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }
}

/// Simulate the full price grid from the given draw source
///
/// Row 0 is set to `s0`; each later row is derived from the prior row via
/// the configured [`Scheme`]. Returns `NumericalInstability` if any produced
/// value is non-finite (extreme parameter combinations); values are
/// propagated, never clamped or filtered, since filtering would bias the
/// Monte Carlo estimate.
pub fn simulate_grid(cfg: &McConfig, source: &mut NormalSource) -> McResult<PriceGrid> {
    cfg.validate()?;

    let dt = cfg.t / cfg.steps as f64;
    let sqrt_dt = dt.sqrt();
    let model = Gbm::new(cfg.r, cfg.sigma);

    let mut data = Array2::<f64>::zeros((cfg.steps, cfg.paths));
    data.row_mut(0).fill(cfg.s0);

    let mut draws = vec![0.0; cfg.paths];
    for i in 0..cfg.steps - 1 {
        source.fill_draws(&mut draws);
        let t_i = i as f64 * dt;

        let (head, mut tail) = data.view_mut().split_at(Axis(0), i + 1);
        let prev = head.row(i);
        let next = tail.row_mut(0);

        match cfg.scheme {
            Scheme::Euler => {
                Zip::from(next).and(&prev).and(aview1(&draws)).par_for_each(
                    |s_next, &s_prev, &w| {
                        let mut s = s_prev;
                        model.step_with_dw(&mut s, t_i, dt, sqrt_dt * w);
                        *s_next = s;
                    },
                );
            }
            Scheme::Exact => {
                Zip::from(next).and(&prev).and(aview1(&draws)).par_for_each(
                    |s_next, &s_prev, &w| {
                        *s_next = model.exact_step(s_prev, dt, w);
                    },
                );
            }
        }
    }

    if !data.iter().all(|v| v.is_finite()) {
        return Err(McError::NumericalInstability {
            method: "path simulation".to_string(),
            reason: "grid contains non-finite prices".to_string(),
        });
    }

    Ok(PriceGrid { data })
}
