use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use u_consensus::consensus::{ConsensusResult, SearchStrategy};
use u_consensus::settings::EngineSettings;
use u_consensus::{respond, ConsensusRequest, ConsensusResponse};

#[derive(Parser)]
#[command(
    name = "consensus",
    version,
    about = "Compute the consensus ranking of several experts' orderings"
)]
struct Cli {
    /// Request JSON file (reads stdin when omitted)
    #[arg(long)]
    request: Option<PathBuf>,

    /// Path to a TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Method name: kemeny-snell, cook-seiford, minimax or gv-median.
    /// Overrides the method in the request.
    #[arg(long)]
    method: Option<String>,

    /// Stop the search after this many milliseconds and return the best so far
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Score candidates on a single thread
    #[arg(long)]
    sequential: bool,

    /// Search strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Seed for the annealing search
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Exhaustive,
    Annealing,
    Auto,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Exhaustive => SearchStrategy::Exhaustive,
            StrategyArg::Annealing => SearchStrategy::Annealing,
            StrategyArg::Auto => SearchStrategy::Auto,
        }
    }
}

fn read_request(path: Option<&PathBuf>) -> Result<ConsensusRequest> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read request file {}", p.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("request is not valid JSON")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match cli.config {
        Some(ref path) => EngineSettings::load(path)?,
        None => EngineSettings::default(),
    };
    let mut config = settings.to_config()?;
    if let Some(ms) = cli.timeout_ms {
        config.timeout = Some(Duration::from_millis(ms));
    }
    if cli.sequential {
        config.parallel = false;
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy.into();
    }
    if let Some(seed) = cli.seed {
        config.anneal.seed = seed;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    let mut request = read_request(cli.request.as_ref())?;
    if let Some(method) = cli.method.or(settings.default_method) {
        request.method = method;
    }
    debug!(
        items = request.items.len(),
        experts = request.judgments.len(),
        method = %request.method,
        "Request loaded"
    );

    let response = respond(&request, &config, None);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        if !response.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    match response {
        ConsensusResponse::Success(result) => {
            print_table(&result);
            Ok(())
        }
        ConsensusResponse::Failure(body) => bail!("{:?}: {}", body.error_kind, body.message),
    }
}

fn print_table(result: &ConsensusResult) {
    let title_width = result
        .ranking
        .iter()
        .map(|r| r.title.len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!(" # | {:<title_width$} |       Id", "Item");
    println!("---|-{}-|---------", "-".repeat(title_width));
    for item in &result.ranking {
        println!(
            "{:>2} | {:<title_width$} | {:>8}",
            item.rank, item.title, item.item_id
        );
    }

    let method = result
        .method_used
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| format!("{}/{}", result.metric_used, result.criterion_used));
    println!(
        "\n{} items ranked via {} ({} {}): total {}, max {}, avg {:.2}",
        result.valid_items.len(),
        method,
        result.metric_used,
        result.criterion_used,
        result.total_distance,
        result.max_distance,
        result.avg_distance,
    );
    println!(
        "{} of {} candidates explored, {} tied",
        result.candidates_explored, result.total_candidates, result.tie_count
    );

    let name_width = result
        .competence
        .iter()
        .map(|c| c.expert_name.len())
        .max()
        .unwrap_or(6)
        .max(6);
    println!("\n {:<name_width$} | Distance | Competence", "Expert");
    println!("-{}-|----------|-----------", "-".repeat(name_width));
    for c in &result.competence {
        println!(
            " {:<name_width$} | {:>8} | {:>9.1}%",
            c.expert_name,
            c.distance,
            c.weight * 100.0
        );
    }

    if result.ties.len() > 1 {
        println!("\nTied rankings (best secondary criterion first):");
        for tie in result.ties_by_secondary() {
            let ids: Vec<String> = tie.ranking.iter().map(|id| id.to_string()).collect();
            println!("  [{}] sum {} max {}", ids.join(", "), tie.sum, tie.max);
        }
        if result.ties_truncated {
            println!("  ... {} more", result.tie_count - result.ties.len() as u64);
        }
    }

    for w in &result.warnings {
        println!("warning: {w}");
    }
}
