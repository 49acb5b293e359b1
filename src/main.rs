use std::{fs, path::Path};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use stride_workbench::{
    config::load_config,
    core::{
        kv::{MemorySnapshots, SnapshotStore, SqliteSnapshots},
        session::Session,
        store::SNAPSHOT_KEY,
        time::now_utc,
    },
    report::{write_report, ReportFormat},
    ui::{app::App, terminal::run_tui},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "stride-workbench",
    about = "STRIDE threat-modeling workbook for connected-vehicle telemetry"
)]
struct Cli {
    /// Path to config file (TOML). Default: config/stride-workbench.toml
    #[arg(long)]
    config: Option<String>,
    /// SQLite path for the mitigation snapshot (overrides config)
    #[arg(long)]
    db_path: Option<String>,
    /// Run without persistence; mitigation state lives only in memory
    #[arg(long)]
    ephemeral: bool,
    /// Discard the saved snapshot and start from the catalog
    #[arg(long)]
    reset: bool,
    /// Run without TUI; write the assessment report and exit
    #[arg(long)]
    no_tui: bool,
    /// Report format for headless runs
    #[arg(long, default_value = "md", value_enum)]
    format: FormatArg,
    /// Report output path (headless). Default: <report_dir>/report-<date>.<ext>
    #[arg(long)]
    output: Option<String>,
    /// Increase verbosity (info, debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Optional log file path (overrides config)
    #[arg(long)]
    log_file: Option<String>,
}

#[derive(ValueEnum, Clone, Debug)]
enum FormatArg {
    Md,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Md => ReportFormat::Markdown,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;

    let log_file = cli.log_file.clone().unwrap_or_else(|| cfg.log_file.clone());
    init_tracing(cli.verbose, &log_file)?;

    let db_path = cli.db_path.clone().unwrap_or_else(|| cfg.db_path.clone());
    let kv: Box<dyn SnapshotStore> = if cli.ephemeral {
        tracing::info!("running ephemeral: snapshot is not persisted");
        Box::new(MemorySnapshots::new())
    } else {
        let mut store = SqliteSnapshots::new(Path::new(&db_path))?;
        if cli.reset {
            store.delete(SNAPSHOT_KEY)?;
            tracing::info!("snapshot reset, starting from catalog");
        }
        Box::new(store)
    };

    let session = Session::new(kv);
    tracing::info!(
        threats = session.threats().len(),
        "workbook session initialized"
    );

    if cli.no_tui {
        let format: ReportFormat = cli.format.into();
        let now = now_utc();
        let ext = match format {
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        };
        let path = match &cli.output {
            Some(path) => std::path::PathBuf::from(path),
            None => Path::new(&cfg.report_dir).join(format!("report-{}.{ext}", now.date_naive())),
        };
        write_report(&session.view_model(), format, now, &path)?;
        println!("Report written to {}", path.display());
        return Ok(());
    }

    let app = App::new(session);
    run_tui(app, Path::new(&cfg.report_dir))
}

fn init_tracing(verbose: u8, log_file: &str) -> Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_path = Path::new(log_file);
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    if log_path.exists() {
        if let Ok(meta) = fs::metadata(log_path) {
            if meta.len() > 1_000_000 {
                let rotated = log_path.with_extension("log.1");
                let _ = fs::rename(log_path, rotated);
            }
        }
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    // Only the file layer while the TUI owns the terminal; stdout would
    // tear the alternate screen.
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing init failed: {e}"))?;
    Ok(())
}
