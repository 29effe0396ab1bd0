//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! Each payoff operates on one simulated trajectory (a column of the price
//! grid) and returns that path's undiscounted contribution.
//!
//! ## European Options
//! - **Call**: max(S_T - K, 0) - right to buy at strike K
//! - **Put**: max(K - S_T, 0) - right to sell at strike K
//!
//! ## Path-Dependent Options
//! - **Asian**: arithmetic average price over the whole path in place of S_T
//! - **Barrier**: knocked out if the path's maximum reaches the monitored
//!   barrier; knocked-out paths contribute the rebate
//!
//! # Implementation Notes
//!
//! Payoffs take an `ArrayView1` rather than a slice because grid columns are
//! strided views into the row-major surface.

use ndarray::ArrayView1;
use std::f64;

/// Enumeration of supported option payoff types
///
/// Each variant contains the parameters needed to compute the payoff
/// from a simulated price trajectory.
#[derive(Debug, Clone, Copy)]
pub enum Payoff {
    /// European call option: max(S_T - K, 0)
    EuropeanCall { k: f64 },

    /// European put option: max(K - S_T, 0)
    EuropeanPut { k: f64 },

    /// Asian call option: max(Avg(S_t) - K, 0)
    AsianCall { k: f64 },

    /// Asian put option: max(K - Avg(S_t), 0)
    AsianPut { k: f64 },

    /// Up-and-out barrier call against the monitored (shifted) barrier.
    /// A path survives only while its maximum stays strictly below
    /// `shifted`; touching it exactly knocks out. Knocked-out paths
    /// contribute `rebate`.
    BarrierCallUpAndOut { k: f64, shifted: f64, rebate: f64 },
}

impl Payoff {
    /// Per-path contribution for a simulated trajectory [S_0, ..., S_T]
    pub fn calculate(&self, path: ArrayView1<'_, f64>) -> f64 {
        let terminal = path[path.len() - 1];
        match self {
            Payoff::EuropeanCall { k } => (terminal - k).max(0.0),

            Payoff::EuropeanPut { k } => (k - terminal).max(0.0),

            // A = (1/n) * sum(S_i), all time steps including the spot row
            Payoff::AsianCall { k } => {
                let average_price = path.sum() / path.len() as f64;
                (average_price - k).max(0.0)
            }

            Payoff::AsianPut { k } => {
                let average_price = path.sum() / path.len() as f64;
                (k - average_price).max(0.0)
            }

            Payoff::BarrierCallUpAndOut { k, shifted, rebate } => {
                let running_max = path.fold(f64::NEG_INFINITY, |m, &s| m.max(s));
                if running_max < *shifted {
                    (terminal - k).max(0.0)
                } else {
                    *rebate
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_european_payoffs() {
        let path = array![100.0, 95.0, 110.0];
        assert_eq!(Payoff::EuropeanCall { k: 100.0 }.calculate(path.view()), 10.0);
        assert_eq!(Payoff::EuropeanPut { k: 100.0 }.calculate(path.view()), 0.0);
        assert_eq!(Payoff::EuropeanPut { k: 120.0 }.calculate(path.view()), 10.0);
    }

    #[test]
    fn test_asian_payoffs_use_whole_path_average() {
        // average = (90 + 100 + 110) / 3 = 100
        let path = array![90.0, 100.0, 110.0];
        assert_eq!(Payoff::AsianCall { k: 95.0 }.calculate(path.view()), 5.0);
        assert_eq!(Payoff::AsianPut { k: 105.0 }.calculate(path.view()), 5.0);
        assert_eq!(Payoff::AsianCall { k: 100.0 }.calculate(path.view()), 0.0);
    }

    #[test]
    fn test_barrier_survival_and_knock_out() {
        let survives = array![100.0, 140.0, 120.0];
        let knocked = array![100.0, 151.0, 120.0];
        let payoff = Payoff::BarrierCallUpAndOut {
            k: 100.0,
            shifted: 150.0,
            rebate: 0.0,
        };

        assert_eq!(payoff.calculate(survives.view()), 20.0);
        assert_eq!(payoff.calculate(knocked.view()), 0.0);
    }

    #[test]
    fn test_barrier_touch_is_knock_out() {
        // maximum exactly at the monitored barrier: strict < survival
        let touches = array![100.0, 150.0, 120.0];
        let payoff = Payoff::BarrierCallUpAndOut {
            k: 100.0,
            shifted: 150.0,
            rebate: 3.0,
        };

        assert_eq!(payoff.calculate(touches.view()), 3.0);
    }
}
