use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orgchart::config::Config;
use orgchart::hierarchy::Hierarchy;
use orgchart::parser::{self, ParseOptions};
use orgchart::{query, render};

#[derive(Parser)]
#[command(name = "orgchart", version)]
#[command(about = "Find the shortest reporting path between two employees")]
struct Cli {
    /// Org chart file (pipe-delimited table)
    file: PathBuf,

    /// Name of the first employee
    first: String,

    /// Name of the second employee
    second: String,

    /// Print the whole hierarchy before the paths
    #[arg(long)]
    tree: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Skip malformed record lines instead of rejecting the file
    #[arg(long)]
    skip_malformed: bool,

    /// Config file to use instead of the one in the user config directory
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Initialize tracing with output to stderr so stdout only carries results
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter.clone()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let options = ParseOptions {
        skip_malformed: cli.skip_malformed || config.skip_malformed,
    };

    let employees = parser::parse_file(&cli.file, options)?;
    let hierarchy = Hierarchy::build(&employees)
        .with_context(|| format!("Invalid organisation in {}", cli.file.display()))?;

    if cli.tree || config.tree {
        print!("{}", render::render_tree(&hierarchy));
    }

    let results = query::shortest_paths(&hierarchy, &cli.first, &cli.second)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            println!("{}", result);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let failed = e.use_stderr();
            // Nothing left to report to if stderr itself is gone
            e.print().ok();
            return if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = Config::load(cli.config.as_deref());
    init_tracing(&config);
    tracing::info!("Reading file {}", cli.file.display());

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
