use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use teranode_monitor::MonitorConfig;
use teranode_monitor_server::routes;
use teranode_monitor_server::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = MonitorConfig::from_env();
    let bind_host = config.bind_host.clone();
    let bind_port = config.bind_port;

    tracing::info!("Teranode Monitor listening on {bind_host}:{bind_port}");
    tracing::info!("Node RPC endpoint: {}", config.rpc_url());
    tracing::info!("Target height: {}", config.target_height);
    tracing::info!("  GET  http://localhost:{bind_port}/            - web dashboard");
    tracing::info!("  GET  http://localhost:{bind_port}/api/status  - JSON status");
    tracing::info!("  GET  http://localhost:{bind_port}/api/health  - health check");
    tracing::info!("  GET  http://localhost:{bind_port}/metrics     - Prometheus metrics");

    let state = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(routes::index)
            .service(routes::api_status)
            .service(routes::api_health)
            .service(routes::metrics_endpoint)
    })
    .bind((bind_host, bind_port))?
    .run()
    .await
}
