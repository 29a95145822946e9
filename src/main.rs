//! Motif Mark - Motif Diagram Tool
//!
//! Draws motif occurrences and exon regions of FASTA sequences as an SVG,
//! or opens an interactive viewer with `--gui`.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::MotifMarkApp;
use motif_mark::config::load_params;
use motif_mark::pipeline::{run, RunConfig};
use motif_mark::{MarkParams, MotifMarkError, Result, ThreadCount};

#[derive(Parser, Debug)]
#[command(name = "motif-mark")]
#[command(version, about = "Visualize IUPAC motifs on gene sequences")]
#[command(
    long_about = "Visualize IUPAC motifs on gene sequences.

Exons are marked by uppercase letters in the FASTA input, introns by lowercase.
The diagram is written next to the FASTA file unless -o is given.

Examples:
  motif-mark -f Figure_1.fasta -m Fig_1_motifs.txt
  motif-mark -f genes.fa -m motifs.txt -o genes.svg --json genes.json
  motif-mark --gui"
)]
struct Cli {
    /// FASTA file with sequences (uppercase = exon)
    #[arg(short = 'f', long, required_unless_present = "gui")]
    fasta: Option<PathBuf>,

    /// Motif file, one IUPAC motif per line
    #[arg(short = 'm', long, required_unless_present = "gui")]
    motifs: Option<PathBuf>,

    /// Output SVG (default: FASTA path with .svg extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write scan results as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Number of worker threads (default: all cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Expand U in motifs to T
    #[arg(long)]
    u_as_t: bool,

    /// Log level or filter directive
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Open the interactive viewer
    #[arg(long)]
    gui: bool,
}

fn init_tracing(level: &str) -> std::result::Result<(), String> {
    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

/// Parameters from `--config` with command-line overrides applied
fn load_cli_params(cli: &Cli) -> Result<MarkParams> {
    let mut params = match &cli.config {
        Some(path) => load_params(path)?,
        None => MarkParams::default(),
    };
    if let Some(n) = cli.threads {
        params.scan.thread_count = ThreadCount::Fixed(n);
    }
    if cli.u_as_t {
        params.scan.u_matches_t = true;
    }
    Ok(params)
}

/// Non-interactive run, returning the path of the written diagram
fn run_cli(cli: Cli, params: MarkParams) -> Result<PathBuf> {
    let fasta = cli.fasta.ok_or(MotifMarkError::MissingInput("--fasta"))?;
    let motifs = cli.motifs.ok_or(MotifMarkError::MissingInput("--motifs"))?;
    run(&RunConfig {
        fasta,
        motifs,
        output: cli.output,
        json: cli.json,
        params,
    })
}

/// Log the error and print it on stderr regardless of the log filter
fn report_error(e: &MotifMarkError) -> ExitCode {
    error!("{}", e);
    eprintln!("Error: {}", e);
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let params = match load_cli_params(&cli) {
        Ok(params) => params,
        Err(e) => return report_error(&e),
    };

    if cli.gui {
        return run_gui(params);
    }

    match run_cli(cli, params) {
        Ok(output) => {
            info!(path = %output.display(), "done");
            ExitCode::SUCCESS
        }
        Err(e) => report_error(&e),
    }
}

fn run_gui(params: MarkParams) -> ExitCode {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Motif Mark"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Motif Mark",
        native_options,
        Box::new(move |cc| Ok(Box::new(MotifMarkApp::new(cc, params)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("viewer failed: {}", e);
            eprintln!("Error: viewer failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
