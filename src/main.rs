use leverwatch::datasource::EvmAccountSource;
use leverwatch::{api, config::Config, AccountDataSource, Distributor};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    let source: Arc<dyn AccountDataSource> =
        match EvmAccountSource::new(&config.rpc_url, config.contract_address) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                eprintln!("Failed to initialize RPC provider: {}", e);
                std::process::exit(1);
            }
        };

    let distributor = Arc::new(Distributor::new(source, config.clone()));
    tokio::spawn(distributor.clone().run());

    // Create router
    let app = api::create_router(api::AppState::new(config.clone(), distributor));

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Monitor listening on {}", addr);
    tracing::info!(
        "Watching contract {} (target HF {} \u{b1} {})",
        config.contract_address,
        config.target_hf,
        config.tolerance
    );

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
