use clap::Parser;
use propx_api::RestApi;
use propx_artifacts::ArtifactStore;
use propx_engine::QueryFacade;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Artifact-backed real-estate valuation and recommendation service
#[derive(Parser, Debug)]
#[command(name = "propx")]
#[command(about = "Real-estate valuation, recommendation, and radius search", long_about = None)]
struct Args {
    /// Path to the artifact directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

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

    info!("Starting propX v{}", env!("CARGO_PKG_VERSION"));
    info!("Artifact directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    let store = Arc::new(ArtifactStore::load(&args.data_dir));
    let availability = store.availability();
    info!(
        "Subsystems: valuation={} recommendation={} location_search={} catalog={}",
        availability.valuation,
        availability.recommendation,
        availability.location_search,
        availability.catalog
    );
    if !availability.valuation {
        warn!("Valuation degraded: predict_price will return 503");
    }
    if !availability.recommendation {
        warn!("Recommendation degraded: recommend will return 503");
    }

    let facade = Arc::new(QueryFacade::new(store));

    let facade_http = facade.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(facade_http, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("propX started successfully");
    info!("HTTP API: http://localhost:{}/api/health", args.http_port);

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
