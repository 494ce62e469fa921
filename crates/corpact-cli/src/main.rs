//! Corpact: upcoming corporate actions report generator.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use corpact::DatasetQuery;
use corpact_cli::cli::{build_cmd, fetch_cmd, output, publish_cmd, render_cmd, run_cmd};
use corpact_cli::config::{today, DateWindow, FetchOverrides, PipelineConfig};
use corpact_cli::resolve_fetch_config;

#[derive(Parser)]
#[command(
    name = "corpact",
    about = "Corpact: fetch, classify, and publish upcoming corporate actions",
    version,
    after_help = "Run 'corpact <command> --help' for details on each command."
)]
struct Cli {
    /// Directory for the CSV, JSON, and HTML files (also CORPACT_OUT_DIR).
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct FetchArgs {
    /// First date of the window (YYYY-MM-DD, default today)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last date of the window (YYYY-MM-DD)
    #[arg(long, conflicts_with = "days")]
    to: Option<NaiveDate>,
    /// Window length in days when --to is not given (default 30)
    #[arg(long)]
    days: Option<u64>,
    /// Market segment to request
    #[arg(long, default_value = corpact::fetch::DEFAULT_SEGMENT)]
    segment: String,
    /// Data source base URL (also CORPACT_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
    /// Attempts at the data request (also CORPACT_MAX_RETRIES)
    #[arg(long)]
    max_retries: Option<u32>,
    /// Skip the human-pacing pauses between requests
    #[arg(long, hide = true)]
    no_pause: bool,
}

impl FetchArgs {
    fn query(&self) -> Result<DatasetQuery> {
        let window = DateWindow::resolve(self.from, self.to, self.days, today())?;
        Ok(DatasetQuery::new(window.from, window.to).with_segment(self.segment.clone()))
    }

    fn overrides(&self) -> FetchOverrides {
        FetchOverrides {
            base_url: self.base_url.clone(),
            max_retries: self.max_retries,
            no_pause: self.no_pause,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Download the raw corporate actions CSV
    Fetch {
        #[command(flatten)]
        args: FetchArgs,
        /// Write the CSV here instead of <out-dir>/corporate_actions_upcoming.csv
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Classify a downloaded CSV and write the JSON and HTML reports
    Build {
        /// CSV to read instead of <out-dir>/corporate_actions_upcoming.csv
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Regenerate the HTML report from an existing JSON document
    Render {
        /// JSON to read instead of <out-dir>/corporate_actions.json
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Fetch, classify, and write the reports in one run
    Run {
        #[command(flatten)]
        args: FetchArgs,
        /// Commit and push the reports afterwards
        #[arg(long)]
        publish: bool,
    },
    /// Commit and push the generated reports with git
    Publish,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet { "warn" } else { cli.log_level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = PipelineConfig::resolve(cli.out_dir.as_deref());
    let quiet = cli.quiet;

    let result = match cli.command {
        Commands::Fetch { args, out } => async {
            let fetch = resolve_fetch_config(&args.overrides())?;
            let path = fetch_cmd::run(&config, fetch, &args.query()?, out).await?;
            if !quiet {
                println!("Saved {}", path.display());
            }
            Ok::<(), anyhow::Error>(())
        }
        .await,
        Commands::Build { input } => build_cmd::run(&config, input.as_deref()).map(|doc| {
            if !quiet {
                println!("Wrote reports: {}", output::summary(&doc));
            }
        }),
        Commands::Render { json } => render_cmd::run(&config, json.as_deref()).map(|_| {
            if !quiet {
                println!("Rendered {}", config.html_path().display());
            }
        }),
        Commands::Run { args, publish } => async {
            let fetch = resolve_fetch_config(&args.overrides())?;
            let doc = run_cmd::run(&config, fetch, &args.query()?, publish).await?;
            if !quiet {
                println!("Wrote reports: {}", output::summary(&doc));
            }
            Ok::<(), anyhow::Error>(())
        }
        .await,
        Commands::Publish => publish_cmd::run(&config),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "corpact", &mut std::io::stdout());
            Ok(())
        }
    };

    // 0 = success, 1 = any error
    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
