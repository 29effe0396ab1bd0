//! # pricegrid: Monte Carlo Option Pricing over a Shared Price Grid
//!
//! A Rust library that prices derivative contracts on a single underlying by
//! simulating its risk-neutral geometric random walk once and evaluating
//! every contract against the same simulated price surface.
//!
//! ## Key Features
//!
//! - **One grid, many contracts**: European vanilla, arithmetic-average
//!   Asian, and up-and-out barrier values all read one `[steps, paths]` grid
//! - **Reproducible**: an owned, seedable draw source; same seed, same grid,
//!   bit for bit
//! - **Parallel**: per-step column updates and payoff reductions run under
//!   Rayon; time steps stay strictly ordered
//! - **Barrier correction**: discrete-monitoring continuity correction with
//!   rebate support
//! - **Robust**: fail-fast parameter validation, non-finite values
//!   propagated as errors rather than silently filtered
//!
//! ## Quick Start
//!
//! ```rust
//! use pricegrid::mc::mc_engine::{BarrierSpec, McConfig, McEngine};
//!
//! let engine = McEngine::new(McConfig {
//!     paths: 10_000,   // Simulated paths
//!     steps: 252,      // Time steps per path
//!     s0: 100.0,       // Spot price
//!     k: 100.0,        // Strike
//!     r: 0.05,         // Risk-free rate
//!     sigma: 0.2,      // Volatility
//!     t: 1.0,          // Time to expiration
//!     ..Default::default()
//! }).expect("Valid configuration");
//!
//! // Simulate once, price everything against the same universe
//! let grid = engine.simulate().expect("Finite grid");
//! let (call, put) = engine.price_european(&grid).expect("Finite estimates");
//! let (asian_call, _) = engine.price_asian(&grid).expect("Finite estimates");
//! let (barrier_value, shifted) = engine
//!     .price_barrier_up_and_out(&grid, &BarrierSpec::default())
//!     .expect("Finite estimates");
//! println!("call {call:.4} put {put:.4} asian {asian_call:.4} barrier {barrier_value:.4} (monitored at {shifted:.2})");
//! ```
//!
//! ## Mathematical Foundation
//!
//! The asset follows risk-neutral GBM discretized with an explicit Euler
//! update; each contract value is the discounted expectation of its payoff
//! over the simulated ensemble, with O(1/√N) statistical error.

// Module declarations
pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod rng;

// Re-export commonly used types for convenience
pub use error::{McError, McResult};
pub use mc::grid::{PriceGrid, Scheme};
pub use mc::mc_engine::{BarrierSpec, ContractSet, McConfig, McEngine, PriceReport};
