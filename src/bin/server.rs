use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use solar_packer::packer::{Packer, PackingReport};
use solar_packer::types::{Rect, RoofShape};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct PackRequest {
    shape: RoofShape,
    panel: Rect,
    #[serde(default)]
    include_grid: bool,
}

async fn pack(
    Json(req): Json<PackRequest>,
) -> Result<Json<PackingReport>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /pack"
    );

    let packing = Packer::new(req.shape, req.panel)
        .and_then(|packer| packer.pack())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let report = packing.report(req.include_grid);
    tracing::info!(
        panel_count = report.panel_count,
        best_strategy = %report.best_strategy,
        "packed"
    );
    Ok(Json(report))
}

#[tokio::main]
async fn main() {
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/pack", post(pack))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
