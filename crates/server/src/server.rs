use axum::{Router, http::Uri, routing::get};
use engine::FundRepository;

use std::sync::Arc;

use crate::{ServerError, funds};

#[derive(Clone)]
pub struct ServerState {
    pub funds: Arc<dyn FundRepository>,
}

async fn not_found(uri: Uri) -> ServerError {
    ServerError::RouteNotFound(uri.path().to_string())
}

/// Routes of the JSON-API service, backed by `funds`.
pub fn router(funds: Arc<dyn FundRepository>) -> Router {
    let state = ServerState { funds };

    Router::new()
        .route("/v1/fund", get(funds::list).post(funds::create))
        .route("/v1/fund/{id}", get(funds::get).delete(funds::delete))
        .fallback(not_found)
        .with_state(state)
}

pub async fn run_with_listener(
    funds: Arc<dyn FundRepository>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(funds)).await
}
