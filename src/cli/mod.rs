//! # CLI Module
//!
//! Command-line interface for the signer pipeline.
//!
//! ## Usage
//! ```bash
//! # Sign the default sequence 0 1 1 2 3 5 8
//! signer run
//!
//! # Sign explicit values
//! signer run 4 8 15 16 23 42
//!
//! # Read values from a file and print every intermediate hash
//! signer run --input values.txt --verbose
//!
//! # JSON output, with the reference cost of the hash primitives
//! signer run --output json --crc32-delay-ms 1000 --md5-delay-ms 10
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use signer_pipeline::core::input::{read_values, DEFAULT_VALUES};
use signer_pipeline::core::signer::{SignerConfig, StandardSigner};
use signer_pipeline::core::stages::{sign_values, Signature};
use signer_pipeline::error::{Result, SignerError};
use signer_pipeline::events::{Event, EventChannel, PipelineEvent, SignEvent, StageEvent};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Signer - sign integers through a concurrent hashing pipeline
#[derive(Parser, Debug)]
#[command(name = "signer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the signing pipeline
    Run {
        /// Values to sign (defaults to 0 1 1 2 3 5 8)
        #[arg(allow_negative_numbers = true, conflicts_with = "input")]
        values: Vec<i64>,

        /// Read values from a file instead
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Print every intermediate hash
        #[arg(short, long)]
        verbose: bool,

        /// Simulated cost of each crc32 call in milliseconds
        #[arg(long, default_value = "0")]
        crc32_delay_ms: u64,

        /// Simulated cost of each md5 call in milliseconds
        #[arg(long, default_value = "0")]
        md5_delay_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// The signature only
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    signer_pipeline::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            values,
            input,
            output,
            verbose,
            crc32_delay_ms,
            md5_delay_ms,
        } => {
            let values = match input {
                Some(path) => read_values(&path)?,
                None if values.is_empty() => DEFAULT_VALUES.to_vec(),
                None => values,
            };
            let signer = SignerConfig::new()
                .crc32_delay(Duration::from_millis(crc32_delay_ms))
                .md5_delay(Duration::from_millis(md5_delay_ms))
                .build();
            run_signing(&values, signer, output, verbose)
        }
    }
}

fn run_signing(
    values: &[i64],
    signer: StandardSigner,
    output: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Signer").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let show_steps = verbose && !matches!(output, OutputFormat::Json);

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        let mut dropped = Vec::new();
        for event in receiver.iter() {
            match event {
                Event::Stage(StageEvent::Started { name, .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_message(format!("running {}", name));
                    }
                }
                Event::Stage(StageEvent::Finished { name, .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_message(format!("{} finished", name));
                    }
                }
                Event::Stage(StageEvent::ItemDropped { reason, .. }) => dropped.push(reason),
                Event::Sign(SignEvent::Step {
                    stage,
                    data,
                    step,
                    value,
                }) if show_steps => {
                    let line = format!("{} {} {} {}", data, stage, step, value);
                    match progress_clone {
                        Some(ref pb) => pb.println(line),
                        None => eprintln!("{}", line),
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
        dropped
    });

    let signature = sign_values(values, Arc::new(signer), &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    let dropped = event_thread
        .join()
        .map_err(|_| SignerError::Output("event reporting thread panicked".to_string()))?;

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, values, &signature, &dropped),
        OutputFormat::Json => print_json_results(values, &signature)?,
        OutputFormat::Minimal => println!("{}", signature.result),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, values: &[i64], signature: &Signature, dropped: &[String]) {
    term.write_line(&format!(
        "{} Signing Complete",
        style("✓").green().bold()
    ))
    .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} values signed through {} stages in {:.3}s",
        style(values.len()).cyan(),
        style(signature.summary.stages).cyan(),
        signature.summary.duration_ms as f64 / 1000.0
    ))
    .ok();

    if !dropped.is_empty() {
        term.write_line(&format!(
            "  {} items dropped",
            style(dropped.len()).yellow()
        ))
        .ok();
        for reason in dropped {
            term.write_line(&format!("    {} {}", style("○").dim(), reason))
                .ok();
        }
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "{}",
        style("Signature:").bold().underlined()
    ))
    .ok();
    println!("{}", signature.result);
}

fn print_json_results(values: &[i64], signature: &Signature) -> Result<()> {
    let output = serde_json::json!({
        "values": values,
        "result": signature.result,
        "run_id": signature.summary.run_id.to_string(),
        "stages": signature.summary.stages,
        "dropped_items": signature.summary.dropped_items,
        "duration_ms": signature.summary.duration_ms,
    });

    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|e| SignerError::Output(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
