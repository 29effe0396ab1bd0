// demos/demo.rs
use pricegrid::analytics::bs_analytic;
use pricegrid::math_utils::Timer;
use pricegrid::output;
use pricegrid::{BarrierSpec, ContractSet, McConfig, McEngine};
use rayon::prelude::*;

fn main() {
    println!("Running pricegrid Monte Carlo Demo\n");

    let cfg = McConfig {
        paths: 100_000,
        steps: 252, // Daily steps for an annual option
        s0: 100.0,
        k: 100.0,
        r: 0.05,
        sigma: 0.2,
        t: 1.0,
        seed: 12345,
        ..Default::default()
    };
    let barrier = BarrierSpec {
        level: 150.0,
        rebate: 0.0,
    };

    let engine = McEngine::new(cfg.clone()).expect("Valid configuration");

    // --- Simulation (the grid is shared by every evaluator below) ---
    let mut timer = Timer::new();
    timer.start();
    let grid = engine.simulate().expect("Finite grid");
    let sim_time = timer.elapsed_ms();
    println!(
        "Simulated {} paths x {} steps in {:.1} ms ({:.0} paths/sec)\n",
        cfg.paths,
        cfg.steps,
        sim_time,
        cfg.paths as f64 / (sim_time / 1000.0)
    );

    timer.start();
    let report = engine
        .price_all(&grid, ContractSet::all(), &barrier)
        .expect("Finite estimates");
    let price_time = timer.elapsed_ms();

    // --- European Vanilla ---
    println!("--- European Vanilla ---");
    let (mc_call, mc_put) = report.european.expect("European requested");
    let analytic_call = bs_analytic::bs_call_price(cfg.s0, cfg.k, cfg.r, cfg.sigma, cfg.t);
    let analytic_put = bs_analytic::bs_put_price(cfg.s0, cfg.k, cfg.r, cfg.sigma, cfg.t);
    println!("MC Call: {:.4}   Analytic: {:.4}   Abs Error: {:.4}", mc_call, analytic_call, (mc_call - analytic_call).abs());
    println!("MC Put:  {:.4}   Analytic: {:.4}   Abs Error: {:.4}", mc_put, analytic_put, (mc_put - analytic_put).abs());
    let parity = cfg.s0 - cfg.k * (-cfg.r * cfg.t).exp();
    println!("Put-call parity residual: {:.4}\n", mc_call - mc_put - parity);

    // --- Asian (arithmetic average) ---
    println!("--- Asian (Arithmetic Average) ---");
    let (asian_call, asian_put) = report.asian.expect("Asian requested");
    println!("MC Asian Call: {:.4}", asian_call);
    println!("MC Asian Put:  {:.4}", asian_put);
    println!("(averaging dampens volatility: Asian call < vanilla call)\n");

    // --- Up-and-Out Barrier Call ---
    println!("--- Up-and-Out Barrier Call ---");
    let (barrier_value, shifted) = report.barrier.expect("Barrier requested");
    println!("Nominal barrier: {:.2}   Monitored (shifted): {:.4}", barrier.level, shifted);
    println!("MC Barrier Call: {:.4}   (vanilla call: {:.4})", barrier_value, mc_call);

    // Classify paths against the SAME shifted level the payoff used
    let knocked_out = (0..grid.paths())
        .into_par_iter()
        .filter(|&j| {
            grid.column(j).fold(f64::NEG_INFINITY, |m, &s| m.max(s)) >= shifted
        })
        .count();
    println!(
        "Knocked-out paths: {} of {} ({:.2}%)\n",
        knocked_out,
        grid.paths(),
        100.0 * knocked_out as f64 / grid.paths() as f64
    );

    println!("Priced all contracts in {:.1} ms\n", price_time);

    // --- CSV Output for presentation consumers ---
    let terminal = grid.terminal();
    let rows: Vec<(f64, f64)> = terminal
        .iter()
        .map(|&s_t| (s_t, (s_t - cfg.k).max(0.0)))
        .collect();

    let paths_csv_filename = "results/terminal_prices.csv";
    match output::write_terminal_prices_to_csv(paths_csv_filename, &rows) {
        Ok(_) => println!("Terminal price data written to {}", paths_csv_filename),
        Err(e) => eprintln!("Error writing terminal price data: {}", e),
    }

    let mc_call_str = mc_call.to_string();
    let mc_put_str = mc_put.to_string();
    let analytic_call_str = analytic_call.to_string();
    let asian_call_str = asian_call.to_string();
    let asian_put_str = asian_put.to_string();
    let barrier_value_str = barrier_value.to_string();
    let shifted_str = shifted.to_string();
    let knocked_out_str = knocked_out.to_string();
    let sim_time_str = sim_time.to_string();

    let summary_data = vec![
        ("metric", "value"),
        ("mc_call_european", mc_call_str.as_str()),
        ("mc_put_european", mc_put_str.as_str()),
        ("analytic_call_european", analytic_call_str.as_str()),
        ("mc_call_asian", asian_call_str.as_str()),
        ("mc_put_asian", asian_put_str.as_str()),
        ("mc_barrier_call_up_and_out", barrier_value_str.as_str()),
        ("shifted_barrier", shifted_str.as_str()),
        ("knocked_out_paths", knocked_out_str.as_str()),
        ("sim_time_ms", sim_time_str.as_str()),
    ];

    let summary_csv_filename = "results/summary.csv";
    match output::write_summary_to_csv(summary_csv_filename, &summary_data) {
        Ok(_) => println!("Summary data written to {}", summary_csv_filename),
        Err(e) => eprintln!("Error writing summary data: {}", e),
    }
}
