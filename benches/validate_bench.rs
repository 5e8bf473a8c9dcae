// Performance benchmarks for secgrade validation operations

use secgrade::{
    CachedValidator, ExerciseAnswerSpec, InMemorySpecStore, TechnicalPattern, ValidationEngine,
};
use std::time::Instant;

fn build_engine() -> ValidationEngine {
    let store = InMemorySpecStore::from_specs([ExerciseAnswerSpec::new("bench-01")
        .with_canonical_answers(["sql injection", "blind sql injection"])
        .with_synonym_groups([vec!["injection", "injecting", "injected"]])
        .with_domain_concepts(["query", "input", "sanitize", "parameterize"])
        .with_technical_patterns([
            TechnicalPattern::literal("quote breakout", "'"),
            TechnicalPattern::regex("tautology", r"1=1|'1'='1"),
            TechnicalPattern::regex("union select", r"\bunion\b.*\bselect\b"),
        ])]);
    ValidationEngine::new(Box::new(store))
}

fn main() {
    println!("🏃 SEC-GRADE Performance Benchmarks\n");

    let engine = build_engine();

    // Warmup
    let _ = engine.validate("bench-01", "sql injection");

    bench_exact(&engine);
    bench_tier_fallthrough(&engine);
    bench_filter_reject(&engine);
    bench_cached(build_engine());

    println!("\n✅ Benchmarks completed!");
}

fn bench_exact(engine: &ValidationEngine) {
    println!("📍 EXACT MATCH (tier 1 short-circuit)");
    println!("─────────────────────────────");

    run_case(engine, "sql injection");
    run_case(engine, "blind sql injection");
    println!();
}

fn bench_tier_fallthrough(engine: &ValidationEngine) {
    println!("📍 FULL PIPELINE (all five tiers)");
    println!("─────────────────────────────");

    // None of these stop early, so every tier runs
    run_case(engine, "the query concatenates raw input");
    run_case(engine, "attacker sends ' or 1=1 in the login form");
    run_case(engine, "completely unrelated wrong answer text");
    println!();
}

fn bench_filter_reject(engine: &ValidationEngine) {
    println!("📍 FILTER REJECT (no tier runs)");
    println!("─────────────────────────────");

    run_case(engine, "idk");
    run_case(engine, "aaaaaaaaaa");
    println!();
}

fn bench_cached(engine: ValidationEngine) {
    println!("📍 CACHED VALIDATION (memoized repeat)");
    println!("─────────────────────────────");

    let cached = CachedValidator::new(engine);
    let answer = "attacker sends ' or 1=1 in the login form";

    let start = Instant::now();
    let _ = cached.validate("bench-01", answer);
    let cold = start.elapsed();

    let iterations = 1000;
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = cached.validate("bench-01", answer);
    }
    let warm = start.elapsed();

    println!("  cold       → {:.3}ms", cold.as_secs_f64() * 1000.0);
    println!(
        "  warm ×{}  → {:.3}ms total ({:.4}ms each)",
        iterations,
        warm.as_secs_f64() * 1000.0,
        warm.as_secs_f64() * 1000.0 / iterations as f64
    );
}

fn run_case(engine: &ValidationEngine, answer: &str) {
    let iterations = 1000;
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = engine.validate("bench-01", answer);
    }
    let duration = start.elapsed();

    println!(
        "  {:<45} → {:.4}ms per call",
        format!("\"{}\"", answer),
        duration.as_secs_f64() * 1000.0 / iterations as f64
    );
}
