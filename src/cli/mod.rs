//! # CLI Module
//!
//! Command-line interface for the sequence signer.
//!
//! ## Usage
//! ```bash
//! # Sign explicit values
//! seq-signer sign 3 1 4
//!
//! # Sign the range 0..100
//! seq-signer sign --count 100
//!
//! # JSON output
//! seq-signer sign --count 100 --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use sequence_signer::core::{Signature, Signer};
use sequence_signer::error::{Result, SignerError};
use sequence_signer::events::{Event, EventChannel, PipelineEvent, StageEvent, StageName};
use std::thread;

/// Sequence Signer - order-independent signatures for integer sequences
#[derive(Parser, Debug)]
#[command(name = "seq-signer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the composite signature of an integer sequence
    Sign {
        /// Integers to sign
        values: Vec<u64>,

        /// Sign the range 0..COUNT instead of explicit values
        #[arg(short, long, conflicts_with = "values")]
        count: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (signature only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    sequence_signer::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sign {
            values,
            count,
            output,
            verbose,
        } => run_sign(values, count, output, verbose),
    }
}

fn run_sign(
    values: Vec<u64>,
    count: Option<u64>,
    output: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let inputs = match count {
        Some(n) => (0..n).collect(),
        None => values,
    };
    if inputs.is_empty() {
        return Err(SignerError::Config(
            "nothing to sign: pass values or --count".to_string(),
        ));
    }

    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Sequence Signer").bold().cyan(),
            style("v0.1.0").dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let signer = Signer::builder().build();

    // Set up event handling
    let (sender, receiver) = EventChannel::new();

    // Progress bar for pretty output
    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Stage(StageEvent::Started { stage }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_message(format!("{stage}"));
                    }
                }
                // The first hashing stage paces the whole run, so the bar
                // tracks its per-item completions.
                Event::Stage(StageEvent::ItemFinished {
                    stage: StageName::SingleHash,
                    completed,
                }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_position(completed as u64);
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. })
                | Event::Pipeline(PipelineEvent::Error { .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    // Run the pipeline
    let result = signer.sign_with_events(&inputs, &sender);

    // Drop sender to signal the event thread to finish
    drop(sender);
    event_thread.join().ok();

    let signature = result?;

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &signature, verbose),
        OutputFormat::Json => print_json_results(&signature),
        OutputFormat::Minimal => print_minimal_results(&signature),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, signature: &Signature, verbose: bool) {
    term.write_line("").ok();
    term.write_line(&format!("{} Signing Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} items signed in {:.1}s",
        style(signature.summary.total_items).cyan(),
        signature.summary.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!(
        "  {} signature bytes",
        style(signature.summary.signature_len).cyan()
    ))
    .ok();
    if verbose {
        term.write_line(&format!(
            "  {} {}",
            style("run id:").dim(),
            style(signature.summary.run_id).dim()
        ))
        .ok();
    }
    term.write_line("").ok();

    // The signature goes to stdout so it can be piped; everything above is
    // stderr decoration.
    println!("{}", signature.value);
}

fn print_json_results(signature: &Signature) {
    let output = serde_json::json!({
        "run_id": signature.summary.run_id,
        "total_items": signature.summary.total_items,
        "signature": signature.value,
        "signature_len": signature.summary.signature_len,
        "duration_ms": signature.summary.duration_ms,
        "finished_at": chrono::Utc::now().to_rfc3339(),
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn print_minimal_results(signature: &Signature) {
    println!("{}", signature.value);
}
