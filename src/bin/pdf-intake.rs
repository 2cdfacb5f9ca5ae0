//! CLI binary for pdf-intake.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `IntakeConfig` and prints the intake report.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_intake::{
    catalog, intake, intake_to_file, IntakeConfig, IntakeProgressCallback, IntakeReport,
    ProgressCallback, ToolId,
};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a bar over the metadata lookups plus one log
/// line per accepted or rejected file.
struct CliProgressCallback {
    bar: ProgressBar,
    rejected: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} files  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Checking");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            rejected: AtomicUsize::new(0),
        })
    }
}

impl IntakeProgressCallback for CliProgressCallback {
    fn on_intake_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
    }

    fn on_file_resolved(&self, _index: usize, _total: usize, name: &str) {
        self.bar.set_message(name.to_string());
        self.bar.inc(1);
    }

    fn on_file_accepted(&self, index: usize, total: usize, name: &str) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}",
            green("✓"),
            index,
            total,
            name
        ));
    }

    fn on_file_rejected(&self, index: usize, total: usize, name: &str, reasons: &[&str]) {
        self.rejected.fetch_add(1, Ordering::SeqCst);
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            red("✗"),
            index,
            total,
            name,
            red(&reasons.join(", ")),
        ));
    }

    fn on_intake_complete(&self, total_files: usize, accepted: usize) {
        self.bar.finish_and_clear();
        let rejected = self.rejected.load(Ordering::SeqCst);
        if rejected == 0 {
            eprintln!(
                "{} {} files accepted",
                green("✔"),
                bold(&accepted.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} files accepted  ({} rejected)",
                if accepted == 0 { red("✘") } else { cyan("⚠") },
                bold(&accepted.to_string()),
                total_files,
                red(&rejected.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Check a batch and see which tools apply
  pdf-intake contract.pdf annex.pdf

  # Stricter size limit
  pdf-intake --max-size-mb 10 scans/*.tiff

  # Ask whether a tool can run on this selection
  pdf-intake --tool merge a.pdf b.pdf

  # Machine-readable report
  pdf-intake --json *.docx > report.json
  pdf-intake -o report.json slides.pptx

  # Show the tool catalog
  pdf-intake --list-tools

ACCEPTED FORMATS:
  pdf                                   pdf
  jpg jpeg png gif bmp webp tiff        image
  doc docx                              document
  ppt pptx                              presentation
  xls xlsx                              spreadsheet

  A batch spanning more than one category is "mixed" and offers no tools.

ENVIRONMENT VARIABLES:
  PDF_INTAKE_MAX_SIZE_MB   Per-file size limit in MiB (default 50)
  PDF_INTAKE_CONCURRENCY   Parallel metadata lookups (default 8)
  RUST_LOG                 Override the log filter
"#;

/// Validate upload candidates and classify the accepted batch.
#[derive(Parser, Debug)]
#[command(
    name = "pdf-intake",
    version,
    about = "Validate upload candidates and find the PDF tools that apply",
    long_about = "Check files against the supported formats and size limit, classify the \
accepted batch (pdf, image, document, presentation, spreadsheet or mixed) and list the \
tools that can run on it. Only file metadata is read.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Files to check, in upload order.
    #[arg(required_unless_present = "list_tools")]
    files: Vec<PathBuf>,

    /// Per-file size limit in MiB.
    #[arg(long, env = "PDF_INTAKE_MAX_SIZE_MB", default_value_t = 50,
          value_parser = clap::value_parser!(u64).range(1..=4096))]
    max_size_mb: u64,

    /// Number of concurrent metadata lookups.
    #[arg(short, long, env = "PDF_INTAKE_CONCURRENCY", default_value_t = 8)]
    concurrency: usize,

    /// Fail unless this tool applies to the accepted files.
    #[arg(long, env = "PDF_INTAKE_TOOL")]
    tool: Option<String>,

    /// Print the tool catalog and exit.
    #[arg(long)]
    list_tools: bool,

    /// Write the JSON report to this file.
    #[arg(short, long, env = "PDF_INTAKE_OUTPUT")]
    output: Option<PathBuf>,

    /// Print the JSON report to stdout instead of a summary.
    #[arg(long, env = "PDF_INTAKE_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "PDF_INTAKE_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF_INTAKE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF_INTAKE_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar already shows per-file outcomes, so library logs are
    // limited to errors while it is active.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.list_tools {
        print_catalog(cli.json)?;
        return Ok(());
    }

    // Parse before doing any work so a typo fails fast.
    let wanted_tool = cli
        .tool
        .as_deref()
        .map(str::parse::<ToolId>)
        .transpose()
        .context("Invalid --tool")?;

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn IntakeProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Run intake ───────────────────────────────────────────────────────
    let report = if let Some(ref output_path) = cli.output {
        intake_to_file(&cli.files, output_path, &config)
            .await
            .with_context(|| format!("Failed to write report to {}", output_path.display()))?
    } else {
        intake(&cli.files, &config).await.context("Intake failed")?
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet {
        print_summary(&report, show_progress);
    }

    if !report.has_accepted() {
        anyhow::bail!("No file was accepted");
    }

    if let Some(tool) = wanted_tool {
        if !report.tools.contains(&tool) {
            anyhow::bail!(
                "Tool '{}' cannot be used with {} {} file(s)",
                tool,
                report.stats.accepted,
                report.category
            );
        }
        if !cli.quiet && !cli.json {
            eprintln!("{} '{}' can run on this selection", green("✔"), tool);
        }
    }

    Ok(())
}

/// Map CLI args to `IntakeConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<IntakeConfig> {
    let mut builder = IntakeConfig::builder()
        .max_file_size_mib(cli.max_size_mb)
        .concurrency(cli.concurrency);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn print_summary(report: &IntakeReport, progress_shown: bool) {
    // With the progress bar off, the per-file lines were never printed.
    if !progress_shown {
        for file in &report.accepted {
            println!("{} {}  {}", green("✓"), file.name(), dim(&format!("{} bytes", file.size())));
        }
        for e in &report.errors {
            println!("{} {}", red("✗"), e);
        }
    }

    println!("Category:     {}", bold(report.category.as_str()));
    println!(
        "Accepted:     {}/{} files, {} bytes",
        report.stats.accepted, report.stats.total_candidates, report.stats.accepted_bytes
    );
    if report.tools.is_empty() {
        println!("Tools:        {}", dim("none"));
    } else {
        let ids: Vec<&str> = report.tools.iter().map(|t| t.as_str()).collect();
        println!("Tools:        {}", ids.join(", "));
    }
}

fn print_catalog(json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(catalog()).context("Failed to serialise catalog")?
        );
        return Ok(());
    }

    for tool in catalog() {
        let categories: Vec<&str> = tool.categories.iter().map(|c| c.as_str()).collect();
        let files = match tool.max_files {
            Some(max) if max == tool.min_files => format!("{max} file"),
            Some(max) => format!("{}-{max} files", tool.min_files),
            None => format!("{}+ files", tool.min_files),
        };
        println!(
            "{:<18} {:<20} {:<12} {:<9} {}",
            tool.id.as_str(),
            tool.name,
            categories.join(","),
            files,
            dim(tool.description)
        );
    }
    Ok(())
}
