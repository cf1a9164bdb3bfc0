use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use waitrank_api::RestApi;
use waitrank_ranking::RankingConfig;
use waitrank_storage::PopulationStore;

/// Fairness-aware waitlist ranking service
#[derive(Parser, Debug)]
#[command(name = "waitrank")]
#[command(about = "Rank waitlist candidates by likelihood to accept an offer", long_about = None)]
struct Args {
    /// JSON array of candidate records to load at startup
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// JSON ranking configuration (weights, top-K, fairness policy)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP API port
    #[arg(long, default_value_t = 8000)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting waitrank v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP API port: {}", args.http_port);

    let config = match &args.config {
        Some(path) => {
            info!("Ranking config: {:?}", path);
            RankingConfig::from_file(path)?
        }
        None => RankingConfig::default(),
    };

    let store = Arc::new(PopulationStore::new(config));
    match &args.data_file {
        Some(path) => {
            let population = store.load_file(path)?;
            info!("Loaded {} candidates from {:?}", population.len(), path);
        }
        None => warn!("No data file given, waiting for PUT /patients"),
    }

    let store_http = store.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(store_http, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("waitrank started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
