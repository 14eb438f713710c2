//! # Keep-Alive Endpoint
//!
//! A single `GET /` route so hosting platforms see the process as alive.

use anyhow::Result;
use axum::{Router, routing::get};

use crate::strings::{logs, messages};

pub fn router() -> Router {
    Router::new().route("/", get(|| async { messages::HOMEPAGE }))
}

pub async fn serve(port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("{}", logs::http_listening(port));
    axum::serve(listener, router()).await?;
    Ok(())
}
