// src/output.rs
use std::fs::File;
use std::io::{self, Write};

/// Per-path terminal price and payoff rows, for histogram / payoff-diagram
/// consumers
pub fn write_terminal_prices_to_csv(filename: &str, rows: &[(f64, f64)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "path_id,s_t,payoff")?;
    for (i, (s_t, payoff)) in rows.iter().enumerate() {
        writeln!(file, "{},{},{}", i, s_t, payoff)?;
    }
    Ok(())
}

pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, &str)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}
