#![allow(dead_code)]

use u_line_balance::models::ProcessStep;

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

pub fn step(id: &str, level: u32, duration: f64) -> ProcessStep {
    ProcessStep::new(id)
        .with_name(format!("Step {id}"))
        .with_level(level)
        .with_duration(duration)
}
