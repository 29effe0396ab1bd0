// demos/error_handling_demo.rs
use pricegrid::{BarrierSpec, McConfig, McEngine, Scheme};

fn main() {
    println!("Error Handling Demo for pricegrid");
    println!("=================================\n");

    // Test 1: Invalid spot price
    println!("1. Testing negative spot price...");

    match McEngine::new(McConfig {
        s0: -100.0,
        ..Default::default()
    }) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Negative volatility
    println!("\n2. Testing negative volatility...");

    match McEngine::new(McConfig {
        sigma: -0.2,
        ..Default::default()
    }) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Zero path count
    println!("\n3. Testing zero simulation count...");

    match McEngine::new(McConfig {
        paths: 0,
        ..Default::default()
    }) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Invalid barrier terms against a valid grid
    println!("\n4. Testing invalid barrier terms...");

    let engine = McEngine::new(McConfig {
        paths: 1_000,
        steps: 16,
        ..Default::default()
    })
    .expect("Valid configuration");
    let grid = engine.simulate().expect("Finite grid");

    match engine.price_barrier_up_and_out(
        &grid,
        &BarrierSpec {
            level: 0.0,
            rebate: 0.0,
        },
    ) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Parameters that overflow the grid
    println!("\n5. Testing overflow-driving parameters...");

    let explosive = McEngine::new(McConfig {
        r: 1.0e308,
        paths: 64,
        steps: 16,
        scheme: Scheme::Euler,
        ..Default::default()
    })
    .expect("Finite parameters pass construction");

    match explosive.simulate() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    println!("\nError handling demo complete.");
}
