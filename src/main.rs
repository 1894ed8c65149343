use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use pubmed_fetcher::{ClientConfig, Paper, PubMedClient, export, pipeline};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "get-papers-list",
    about = "Fetch PubMed papers for a query and flag industry-affiliated authors",
    long_about = "Searches PubMed, fetches the matching articles, and reports authors with \
                  pharmaceutical or biotech affiliations. Writes CSV with --file, otherwise \
                  prints one record per line."
)]
struct Cli {
    /// PubMed search query
    #[arg(value_name = "QUERY")]
    query: String,

    /// Save results to this CSV file instead of printing them
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Echo the parsed arguments before running
    #[arg(short, long)]
    debug: bool,

    /// Maximum number of papers to fetch
    #[arg(short = 'n', long, default_value_t = pubmed_fetcher::config::DEFAULT_MAX_RESULTS)]
    max_results: usize,

    /// Print records as JSON lines instead of plain text
    #[arg(long, conflicts_with = "file")]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", default_value = "get-papers-list")]
    tool: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// E-utilities base URL
    #[arg(long, env = "PUBMED_BASE_URL", default_value = pubmed_fetcher::config::DEFAULT_BASE_URL)]
    base_url: String,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new()
            .with_base_url(self.base_url.as_str())
            .with_tool(self.tool.as_str())
            .with_timeout(Duration::from_secs(self.timeout))
            .with_max_results(self.max_results);

        if let Some(ref email) = self.email {
            config = config.with_email(email.as_str());
        }

        config
    }

    fn debug_lines(&self) -> Vec<String> {
        vec![
            "Debug mode enabled".to_string(),
            format!("Query: {}", self.query),
            format!(
                "File: {}",
                self.file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "None".to_string())
            ),
            format!("Debug: {}", self.debug),
        ]
    }
}

fn render_papers<W: Write>(papers: &[Paper], json: bool, mut out: W) -> Result<()> {
    for paper in papers {
        if json {
            writeln!(out, "{}", serde_json::to_string(paper)?)?;
        } else {
            writeln!(out, "{}", paper)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout only carries records
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(io::stderr),
        )
        .with(env_filter)
        .init();

    if cli.debug {
        for line in cli.debug_lines() {
            println!("{}", line);
        }
    }

    info!(query = %cli.query, "Fetching papers for query");

    let client = PubMedClient::try_with_config(cli.client_config())?;
    let papers = pipeline::search_and_fetch(&client, &cli.query, None).await?;

    match &cli.file {
        Some(path) => export::save_to_csv(&papers, path)?,
        None => render_papers(&papers, cli.json, io::stdout().lock())?,
    }

    Ok(())
}
