// scripts/benchmark.rs
use pricegrid::analytics::bs_analytic;
use pricegrid::math_utils::Timer;
use pricegrid::{BarrierSpec, ContractSet, McConfig, McEngine};
use std::env;
use std::fs::File;
use std::io::Write;
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        let os = env::consts::OS.to_string();
        let cpu_model = Self::get_cpu_model();
        let cpu_cores = num_cpus::get();
        let rust_version = Self::get_rust_version();
        let rustc_flags = env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string());
        let rayon_threads = rayon::current_num_threads();

        Self {
            os,
            cpu_model,
            cpu_cores,
            rust_version,
            rustc_flags,
            rayon_threads,
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(not(target_os = "linux"))]
        {
            "Unknown CPU".to_string()
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    paths: usize,
    time_ms: f64,
    throughput_paths_per_sec: f64,
    value: Option<f64>,
    analytic_value: Option<f64>,
    relative_error: Option<f64>,
}

fn run_pricing_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();

    let paths_configs = [10_000, 100_000, 250_000];

    for &paths in &paths_configs {
        println!("Running benchmarks with {} paths...", paths);

        let cfg = McConfig {
            paths,
            steps: 252,
            s0: 100.0,
            k: 100.0,
            r: 0.05,
            sigma: 0.2,
            t: 1.0,
            seed: 42,
            ..Default::default()
        };
        let engine = McEngine::new(cfg.clone()).expect("Valid configuration");
        let analytic_call = bs_analytic::bs_call_price(cfg.s0, cfg.k, cfg.r, cfg.sigma, cfg.t);

        let mut timer = Timer::new();
        timer.start();
        let grid = engine.simulate().expect("Finite grid");
        let sim_ms = timer.elapsed_ms();
        results.push(BenchmarkResult {
            name: "grid_simulation".to_string(),
            paths,
            time_ms: sim_ms,
            throughput_paths_per_sec: paths as f64 / (sim_ms / 1000.0),
            value: None,
            analytic_value: None,
            relative_error: None,
        });

        timer.start();
        let report = engine
            .price_all(&grid, ContractSet::all(), &BarrierSpec::default())
            .expect("Finite estimates");
        let price_ms = timer.elapsed_ms();

        let (mc_call, _) = report.european.expect("European requested");
        let (asian_call, _) = report.asian.expect("Asian requested");
        let (barrier_value, _) = report.barrier.expect("Barrier requested");

        results.push(BenchmarkResult {
            name: "european_call".to_string(),
            paths,
            time_ms: price_ms,
            throughput_paths_per_sec: paths as f64 / (price_ms / 1000.0),
            value: Some(mc_call),
            analytic_value: Some(analytic_call),
            relative_error: Some((mc_call - analytic_call).abs() / analytic_call),
        });
        results.push(BenchmarkResult {
            name: "asian_call".to_string(),
            paths,
            time_ms: price_ms,
            throughput_paths_per_sec: paths as f64 / (price_ms / 1000.0),
            value: Some(asian_call),
            analytic_value: None,
            relative_error: None,
        });
        results.push(BenchmarkResult {
            name: "barrier_call_up_and_out".to_string(),
            paths,
            time_ms: price_ms,
            throughput_paths_per_sec: paths as f64 / (price_ms / 1000.0),
            value: Some(barrier_value),
            analytic_value: None,
            relative_error: None,
        });
    }

    results
}

fn write_results_csv(info: &SystemInfo, results: &[BenchmarkResult]) -> std::io::Result<String> {
    std::fs::create_dir_all("bench")?;
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("bench/benchmark_{}.csv", timestamp);
    let mut file = File::create(&filename)?;

    writeln!(file, "# pricegrid benchmark")?;
    writeln!(
        file,
        "# {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "# os: {}", info.os)?;
    writeln!(file, "# cpu: {} ({} cores)", info.cpu_model, info.cpu_cores)?;
    writeln!(file, "# rustc: {}", info.rust_version)?;
    writeln!(file, "# rustflags: {}", info.rustc_flags)?;
    writeln!(file, "# rayon threads: {}", info.rayon_threads)?;
    writeln!(
        file,
        "name,paths,time_ms,throughput_paths_per_sec,value,analytic_value,relative_error"
    )?;

    for r in results {
        writeln!(
            file,
            "{},{},{:.3},{:.1},{},{},{}",
            r.name,
            r.paths,
            r.time_ms,
            r.throughput_paths_per_sec,
            r.value.map_or(String::new(), |v| v.to_string()),
            r.analytic_value.map_or(String::new(), |v| v.to_string()),
            r.relative_error.map_or(String::new(), |v| v.to_string()),
        )?;
    }

    Ok(filename)
}

fn main() {
    println!("pricegrid benchmark");
    println!("===================\n");

    let info = SystemInfo::gather();
    println!(
        "{} | {} ({} cores, {} rayon threads)\n{}\n",
        info.os, info.cpu_model, info.cpu_cores, info.rayon_threads, info.rust_version
    );

    let results = run_pricing_benchmarks();

    println!("\nResults:");
    for r in &results {
        match (r.value, r.analytic_value, r.relative_error) {
            (Some(value), Some(analytic), Some(rel)) => println!(
                "  {:<24} {:>9} paths  {:>9.1} ms  value {:.4}  analytic {:.4}  rel err {:.4}%",
                r.name,
                r.paths,
                r.time_ms,
                value,
                analytic,
                rel * 100.0
            ),
            (Some(value), _, _) => println!(
                "  {:<24} {:>9} paths  {:>9.1} ms  value {:.4}",
                r.name, r.paths, r.time_ms, value
            ),
            _ => println!(
                "  {:<24} {:>9} paths  {:>9.1} ms",
                r.name, r.paths, r.time_ms
            ),
        }
    }

    match write_results_csv(&info, &results) {
        Ok(filename) => println!("\nBenchmark results written to {}", filename),
        Err(e) => eprintln!("\nError writing benchmark results: {}", e),
    }
}
