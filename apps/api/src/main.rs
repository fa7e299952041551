mod catalog;
mod config;
mod db;
mod embedding;
mod errors;
mod extraction;
mod matching;
mod models;
mod routes;
mod search;
mod state;
mod taxonomy;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::PgJobCatalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::embedding::HttpEmbedder;
use crate::routes::build_router;
use crate::search::EsClient;
use crate::state::AppState;
use crate::taxonomy::HttpTaxonomy;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CVMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (job catalog)
    let db = create_pool(&config.database_url).await?;

    // Initialize the search index client
    let index = EsClient::new(config.elasticsearch_url.clone());
    info!("Search index client initialized ({})", config.elasticsearch_url);

    // Initialize the embedding client
    let embedder = HttpEmbedder::new(config.embedding_url.clone());
    info!(
        "Embedding client initialized (dim: {})",
        embedding::EMBEDDING_DIM
    );

    // Initialize the taxonomy client
    let taxonomy = HttpTaxonomy::new(config.taxonomy_url.clone());
    info!("Taxonomy client initialized");

    // Build app state
    let state = AppState {
        index: Arc::new(index),
        embedder: Arc::new(embedder),
        taxonomy: Arc::new(taxonomy),
        catalog: Arc::new(PgJobCatalog::new(db)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
