use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gridiron_stats::{
    cache::SnapshotCache,
    config::Config,
    models::StatKind,
    sources::SourceFactory,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "gridiron-stats")]
#[command(version = "0.1.0")]
#[command(about = "NFL team statistics service with cached sources, rankings and matchup comparison")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("gridiron_stats={},tower_http=trace", cli.log_level)
    } else {
        format!("gridiron_stats={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gridiron-stats v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from specified file
    std::env::set_var("CONFIG_FILE", &cli.config);
    let mut config = Config::load()?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    let source = SourceFactory::create(&config.sources)?;
    info!("Snapshot source initialized: {}", source.name());

    let cache = SnapshotCache::new(config.cache.ttl());
    info!("Snapshot cache initialized (ttl: {}s)", config.cache.ttl_seconds);

    // Optionally fill both tables before accepting traffic. A failure here
    // is not fatal: the cache refills lazily on the first read.
    if config.cache.warm_on_start {
        let (offense, defense) = futures::future::join(
            cache.get(StatKind::Offense, source.as_ref()),
            cache.get(StatKind::Defense, source.as_ref()),
        )
        .await;
        for (kind, result) in [(StatKind::Offense, offense), (StatKind::Defense, defense)] {
            match result {
                Ok(table) => info!("warmed {} table ({} rows)", kind, table.snapshot.rows.len()),
                Err(e) => warn!("could not warm {} table: {}", kind, e),
            }
        }
    }

    let web_server = WebServer::new(config, cache, source)?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
