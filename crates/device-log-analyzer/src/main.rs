mod bootstrap;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use devlog_core::settings::Settings;
use devlog_runtime::orchestrator::{source_name, AnalysisOrchestrator, RunEvent, SourceOutcome};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level).context("failed to initialise logging")?;

    tracing::info!("Device Log Analyzer v{} starting", env!("CARGO_PKG_VERSION"));

    let orchestrator = AnalysisOrchestrator::new(&settings.logs_dir, settings.report_path());

    // A missing logs directory is the only error that ends the run.
    orchestrator.run(|event| match event {
        RunEvent::Discovered(sources) => print_discovered(&settings.logs_dir, sources),
        RunEvent::Processed(outcome) => print_outcome(orchestrator.report_path(), outcome),
    })?;

    Ok(())
}

fn print_discovered(logs_dir: &Path, sources: &[PathBuf]) {
    if sources.is_empty() {
        println!("No .log files found in {}", logs_dir.display());
        return;
    }

    println!("Found {} log file(s):", sources.len());
    for (i, source) in sources.iter().enumerate() {
        println!("{}. {}", i + 1, source_name(source));
    }
}

fn print_outcome(report_path: &Path, outcome: &SourceOutcome) {
    match outcome {
        SourceOutcome::Reported {
            source,
            devices,
            total_entries,
            ..
        } => {
            println!("Report appended to: {}", report_path.display());
            println!(
                "Analyzed {}: {} unique devices, {} total entries",
                source_name(source),
                devices,
                total_entries
            );
        }
        SourceOutcome::Failed { error, .. } => eprintln!("Error: {}", error),
    }
}
