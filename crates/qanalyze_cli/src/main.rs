//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `qanalyze_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use qanalyze_core::{validate, AnalysisMode};

fn main() {
    println!("qanalyze_core ping={}", qanalyze_core::ping());
    println!("qanalyze_core version={}", qanalyze_core::core_version());

    // One fixed validation probe so the whole classifier path is linked.
    let outcome = validate("a,b,c\n1,2", AnalysisMode::Quantum);
    println!(
        "qanalyze_core probe message={:?} ranges={}",
        outcome.message,
        outcome.ranges.len()
    );
}
