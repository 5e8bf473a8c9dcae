// SEC-GRADE Grading CLI Tool
// Command-line interface for grading one answer against a spec file

use clap::Parser;
use secgrade::{InMemorySpecStore, ValidationEngine, Verdict};

/// Answer Grading Tool - Validate a free-text answer for one exercise
#[derive(Parser, Debug)]
#[command(name = "grade")]
#[command(about = "Grade a free-text answer against an exercise spec file", long_about = None)]
#[command(version)]
struct Args {
    /// The learner's answer text
    #[arg(value_name = "ANSWER")]
    answer: String,

    /// Path to the JSON spec document
    #[arg(short, long, value_name = "FILE")]
    specs: String,

    /// Exercise id to grade against
    #[arg(short, long, value_name = "ID")]
    exercise: String,

    /// Emit the full result as JSON instead of text
    #[arg(short, long)]
    json: bool,

    /// Show detailed information
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.verbose {
        println!("🔍 Loading spec document: {}", args.specs);
    }

    let doc = std::fs::read_to_string(&args.specs)?;
    let store = InMemorySpecStore::from_json(&doc)?;

    if args.verbose {
        println!("✅ Specs loaded: {} exercise(s)\n", store.len());
        println!("🔎 Grading exercise '{}': {}", args.exercise, args.answer);
        println!("─────────────────────────────────────────────────\n");
    }

    let engine = ValidationEngine::new(Box::new(store));
    let result = engine.validate(&args.exercise, &args.answer)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result.verdict {
        Verdict::Accept => {
            let tier = result
                .matched_tier
                .map(|t| t.to_string())
                .unwrap_or_default();
            println!("✅ ACCEPT ({} tier)", tier);
            println!(
                "   Confidence: {:.0}% {}",
                result.confidence,
                confidence_bar(result.confidence)
            );
            if !result.matched_keywords.is_empty() {
                println!("   Matched: {}", result.matched_keywords.join(", "));
            }
        }
        Verdict::Reject => {
            println!("❌ REJECT");
        }
    }

    println!("   {}", result.feedback);

    if args.verbose {
        println!("\n─────────────────────────────────────────────────");
        println!("✨ Grading completed successfully!");
    }

    Ok(())
}

/// Generate a visual confidence bar (confidence is 0-100)
fn confidence_bar(confidence: f32) -> String {
    let bar_len = 10;
    let filled = ((confidence / 100.0) * bar_len as f32) as usize;
    let mut bar = String::from("[");
    for i in 0..bar_len {
        if i < filled {
            bar.push('█');
        } else {
            bar.push('░');
        }
    }
    bar.push(']');
    bar
}
