// tests/pricing_test.rs
use pricegrid::analytics::bs_analytic;
use pricegrid::{BarrierSpec, McConfig, McEngine};

fn scenario() -> McConfig {
    McConfig {
        paths: 100_000,
        steps: 252,
        s0: 100.0,
        k: 100.0,
        r: 0.05,
        sigma: 0.2,
        t: 1.0,
        seed: 42,
        ..Default::default()
    }
}

#[test]
fn test_european_mc_vs_analytic() {
    let cfg = scenario();
    let engine = McEngine::new(cfg.clone()).expect("Valid configuration");
    let grid = engine.simulate().expect("Finite grid");

    let (mc_call, mc_put) = engine.price_european(&grid).expect("Finite estimates");
    let analytic_call = bs_analytic::bs_call_price(cfg.s0, cfg.k, cfg.r, cfg.sigma, cfg.t);
    let analytic_put = bs_analytic::bs_put_price(cfg.s0, cfg.k, cfg.r, cfg.sigma, cfg.t);

    println!("\nMC Call: {}  Analytic Call: {}", mc_call, analytic_call);
    println!("MC Put: {}  Analytic Put: {}", mc_put, analytic_put);

    let call_error = (mc_call - analytic_call).abs();
    let put_error = (mc_put - analytic_put).abs();

    println!("Absolute Error (Call): {}", call_error);
    println!("Absolute Error (Put): {}", put_error);

    assert!(
        call_error < 0.25,
        "Call error exceeds MC tolerance at 100k paths: {}",
        call_error
    );
    assert!(
        put_error < 0.25,
        "Put error exceeds MC tolerance at 100k paths: {}",
        put_error
    );
}

#[test]
fn test_put_call_parity() {
    let cfg = scenario();
    let engine = McEngine::new(cfg.clone()).expect("Valid configuration");
    let grid = engine.simulate().expect("Finite grid");

    let (mc_call, mc_put) = engine.price_european(&grid).expect("Finite estimates");
    let parity = cfg.s0 - cfg.k * (-cfg.r * cfg.t).exp();
    let residual = (mc_call - mc_put - parity).abs();

    println!(
        "\ncall - put = {}  S0 - K*exp(-rT) = {}  residual = {}",
        mc_call - mc_put,
        parity,
        residual
    );

    assert!(
        residual < 0.3,
        "Put-call parity residual exceeds simulation error: {}",
        residual
    );
}

#[test]
fn test_asian_call_below_vanilla_call() {
    let cfg = scenario();
    let engine = McEngine::new(cfg).expect("Valid configuration");
    let grid = engine.simulate().expect("Finite grid");

    let (vanilla_call, _) = engine.price_european(&grid).expect("Finite estimates");
    let (asian_call, asian_put) = engine.price_asian(&grid).expect("Finite estimates");

    println!(
        "\nVanilla Call: {}  Asian Call: {}  Asian Put: {}",
        vanilla_call, asian_call, asian_put
    );

    // Averaging dampens volatility, so the at-the-money Asian call is worth
    // well under the vanilla call on the same grid.
    assert!(
        asian_call < vanilla_call,
        "Asian call ({}) not below vanilla call ({})",
        asian_call,
        vanilla_call
    );
    assert!(asian_call > 0.0);
    assert!(asian_put > 0.0);
}

#[test]
fn test_barrier_below_vanilla_on_same_grid() {
    let cfg = scenario();
    let engine = McEngine::new(cfg).expect("Valid configuration");
    let grid = engine.simulate().expect("Finite grid");

    let (vanilla_call, _) = engine.price_european(&grid).expect("Finite estimates");
    let (barrier_value, shifted) = engine
        .price_barrier_up_and_out(
            &grid,
            &BarrierSpec {
                level: 150.0,
                rebate: 0.0,
            },
        )
        .expect("Finite estimates");

    println!(
        "\nVanilla Call: {}  Barrier Call: {}  Shifted Barrier: {}",
        vanilla_call, barrier_value, shifted
    );

    assert!(shifted > 150.0, "Correction must shift the up-barrier out");
    // Knock-out can only remove payoff relative to vanilla on the shared
    // grid, never add it.
    assert!(
        barrier_value < vanilla_call,
        "Barrier value ({}) not below vanilla ({})",
        barrier_value,
        vanilla_call
    );
}

#[test]
fn test_barrier_monotonic_in_level() {
    let cfg = scenario();
    let engine = McEngine::new(cfg).expect("Valid configuration");
    let grid = engine.simulate().expect("Finite grid");

    let levels = [110.0, 130.0, 150.0, 170.0, 200.0];
    let mut values = Vec::with_capacity(levels.len());
    for &level in &levels {
        let (value, _) = engine
            .price_barrier_up_and_out(
                &grid,
                &BarrierSpec {
                    level,
                    rebate: 0.0,
                },
            )
            .expect("Finite estimates");
        values.push(value);
    }

    println!("\nBarrier values by level: {:?}", values);

    // Raising the barrier can only turn knocked-out paths into survivors.
    for i in 0..values.len() - 1 {
        assert!(
            values[i] <= values[i + 1],
            "Value decreased when barrier rose: {} -> {} at level {}",
            values[i],
            values[i + 1],
            levels[i + 1]
        );
    }
}

#[test]
fn test_barrier_rebate_never_reduces_value() {
    let cfg = scenario();
    let engine = McEngine::new(cfg).expect("Valid configuration");
    let grid = engine.simulate().expect("Finite grid");

    let (without_rebate, _) = engine
        .price_barrier_up_and_out(
            &grid,
            &BarrierSpec {
                level: 130.0,
                rebate: 0.0,
            },
        )
        .expect("Finite estimates");
    let (with_rebate, _) = engine
        .price_barrier_up_and_out(
            &grid,
            &BarrierSpec {
                level: 130.0,
                rebate: 5.0,
            },
        )
        .expect("Finite estimates");

    println!(
        "\nBarrier value rebate=0: {}  rebate=5: {}",
        without_rebate, with_rebate
    );

    assert!(
        with_rebate > without_rebate,
        "Rebate did not raise the barrier value: {} vs {}",
        with_rebate,
        without_rebate
    );
}

#[test]
fn test_at_the_money_call_put_symmetry() {
    // With s0 = k the discounted call and put agree only when r = 0; any
    // positive rate separates them by the parity gap s0 - k*exp(-r*t).
    let flat = McConfig {
        r: 0.0,
        ..scenario()
    };
    let engine = McEngine::new(flat).expect("Valid configuration");
    let grid = engine.simulate().expect("Finite grid");
    let (call, put) = engine.price_european(&grid).expect("Finite estimates");

    println!("\nr=0: call {}  put {}", call, put);
    assert!(
        (call - put).abs() < 0.3,
        "At r=0 the ATM call and put must agree within simulation error: {} vs {}",
        call,
        put
    );

    let engine = McEngine::new(scenario()).expect("Valid configuration");
    let grid = engine.simulate().expect("Finite grid");
    let (call, put) = engine.price_european(&grid).expect("Finite estimates");

    println!("r=0.05: call {}  put {}", call, put);
    assert!(
        call - put > 1.0,
        "At r=0.05 the ATM call must exceed the put by the parity gap: {} vs {}",
        call,
        put
    );
}

#[test]
fn test_zero_sigma_is_deterministic() {
    let cfg = McConfig {
        paths: 1_000,
        steps: 252,
        sigma: 0.0,
        seed: 7,
        ..scenario()
    };
    let engine = McEngine::new(cfg.clone()).expect("Valid configuration");
    let grid = engine.simulate().expect("Finite grid");

    // With sigma = 0 every path compounds deterministically:
    // S_T = s0 * (1 + r*dt)^(steps - 1)
    let dt = cfg.t / cfg.steps as f64;
    let terminal = cfg.s0 * (1.0 + cfg.r * dt).powi(cfg.steps as i32 - 1);
    let discount = (-cfg.r * cfg.t).exp();
    let expected_call = discount * (terminal - cfg.k).max(0.0);

    let (mc_call, mc_put) = engine.price_european(&grid).expect("Finite estimates");

    println!("\nDeterministic call: {}  expected: {}", mc_call, expected_call);

    assert!((mc_call - expected_call).abs() < 1e-9);
    assert_eq!(mc_put, 0.0);
    assert!(grid.terminal().iter().all(|&s| (s - terminal).abs() < 1e-9));
}
