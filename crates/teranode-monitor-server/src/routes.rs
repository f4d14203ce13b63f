use actix_web::{get, web, HttpResponse};
use teranode_monitor::{collect_status, NodeStatus};

use crate::metrics;
use crate::page;
use crate::state::AppState;

/// Run one fresh aggregation and record outcome metrics. Each view triggers
/// its own aggregation; snapshots are never cached or shared.
async fn aggregate(state: &AppState) -> NodeStatus {
    let start = std::time::Instant::now();
    let status = collect_status(&state.rpc, &state.config).await;
    let outcome = if status.online { "online" } else { "offline" };
    metrics::AGGREGATIONS.with_label_values(&[outcome]).inc();
    metrics::AGGREGATION_LATENCY
        .with_label_values(&[outcome])
        .observe(start.elapsed().as_secs_f64());
    status
}

#[get("/")]
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    metrics::STATUS_REQUESTS.with_label_values(&["index"]).inc();
    let status = aggregate(&state).await;
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::render(
            &status,
            &state.config.node_host,
            state.config.node_rpc_port,
        ))
}

#[get("/api/status")]
pub async fn api_status(state: web::Data<AppState>) -> HttpResponse {
    metrics::STATUS_REQUESTS.with_label_values(&["status"]).inc();
    let status = aggregate(&state).await;
    // Node absence is data, not a transport error: always 200.
    HttpResponse::Ok().json(status)
}

#[get("/api/health")]
pub async fn api_health(state: web::Data<AppState>) -> HttpResponse {
    metrics::STATUS_REQUESTS.with_label_values(&["health"]).inc();
    let status = aggregate(&state).await;
    HttpResponse::Ok().json(status.health())
}

#[get("/metrics")]
pub async fn metrics_endpoint() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::metrics_output())
}
