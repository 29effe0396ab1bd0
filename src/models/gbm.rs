// src/models/gbm.rs
use super::model::SdeModel;
use std::f64;

/// Risk-neutral geometric Brownian motion, dS = mu*S dt + sigma*S dW
pub struct Gbm {
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Gbm { mu, sigma }
    }

    /// Exact (multiplicative, log-normal) step. Stays strictly positive for
    /// positive input; the alternative to the additive Euler step when large
    /// sigma*sqrt(dt) would otherwise drive paths negative.
    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * ((self.mu - 0.5 * self.sigma * self.sigma) * dt
            + self.sigma * dt.sqrt() * normal_draw)
            .exp()
    }
}

impl SdeModel for Gbm {
    fn drift(&self, s: f64, _t: f64) -> f64 {
        self.mu * s
    }

    fn diffusion(&self, s: f64, _t: f64) -> f64 {
        self.sigma * s
    }

    fn step_with_dw(&self, s_current: &mut f64, t_current: f64, dt: f64, dw: f64) {
        // Additive Euler-Maruyama step: S*(1 + mu*dt) + sigma*S*dW.
        // Can produce negative prices for large sigma*sqrt(dt); that artifact
        // is part of the scheme and is never clipped here.
        *s_current += self.drift(*s_current, t_current) * dt
            + self.diffusion(*s_current, t_current) * dw;
    }
}
