mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{geocoding, recommendations, routes};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/recommendations", post(recommendations::create))
        .route("/routes", post(routes::create))
        .route("/geocoding", post(geocoding::create))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(%err, "server stopped");
            unexpected_error()
        })
}

async fn health() -> &'static str {
    "ok"
}
