#![forbid(unsafe_code)]

mod frame_source;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use ndnfwd_lib::{load_from_path, Clock, Router, SystemClock};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use frame_source::FileFrameSource;

#[derive(Parser, Debug)]
#[command(author, version, about = "NDN fast-path forwarding plane")]
struct Cli {
    /// Path to configuration TOML file
    #[arg(short, long, value_name = "FILE", default_value = "config/basic.toml")]
    config: PathBuf,

    /// Optional length-prefixed frame log to replay instead of a live capture
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config = match load_from_path(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(%err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        hash_algorithm = ?config.hash_algorithm,
        observability_port = config.observability_port,
        "configuration loaded"
    );

    let observability_port = config.observability_port;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let shard_count = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let router = Arc::new(Router::new(config, clock, shard_count));

    let observability = match ndnfwd_lib::telemetry::init_metrics() {
        Ok((otel, registry)) => {
            let scrape_router = Arc::clone(&router);
            tokio::spawn(async move {
                let mut last = [0u64; ndnfwd_lib::telemetry::MetricId::COUNT];
                let mut ticker = tokio::time::interval(std::time::Duration::from_secs(10));
                loop {
                    ticker.tick().await;
                    otel.observe(scrape_router.counters(), &mut last);
                }
            });
            Some(tokio::spawn(ndnfwd_lib::telemetry::start_observability_server(
                observability_port,
                registry,
            )))
        }
        Err(err) => {
            warn!(%err, "metrics initialization failed, continuing without /metrics export");
            None
        }
    };

    match cli.replay {
        Some(path) => replay_frames(&router, path),
        None => {
            warn!("no --replay file given and no live capture shim configured; idling");
        }
    }

    if let Some(handle) = observability {
        let _ = handle.await;
    }
}

fn replay_frames(router: &Router, path: PathBuf) {
    let mut source = match FileFrameSource::open(&path) {
        Ok(s) => s,
        Err(err) => {
            error!(%err, path = %path.display(), "failed to open replay file");
            std::process::exit(1);
        }
    };

    let mut processed = 0u64;
    while let Some((frame, ingress_ifindex)) = ndnfwd_lib::FrameSource::next_frame(&mut source) {
        let verdict = router.process_frame(&frame, ingress_ifindex);
        processed += 1;
        info!(?verdict, processed, "frame processed");
    }

    let snapshot = router.metrics_snapshot();
    info!(
        interests = snapshot.get(ndnfwd_lib::telemetry::MetricId::InterestsRecv),
        data = snapshot.get(ndnfwd_lib::telemetry::MetricId::DataRecv),
        cache_hits = snapshot.get(ndnfwd_lib::telemetry::MetricId::CacheHits),
        cache_hit_ratio = snapshot.cache_hit_ratio(),
        "replay finished"
    );
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
