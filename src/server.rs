//! HTTP skin: the study page plus the read-only collection endpoint.
//!
//! The server keeps no session state. Each browser tab runs its own deck,
//! position and reveal flag in the page script, and only ever asks the
//! server for the full, unfiltered collection.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::Flashcard;
use crate::source::{CardSource, LoadError};

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<CardSource>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("flashcard loader stopped unexpectedly: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Load(LoadError::Missing { .. }) => StatusCode::NOT_FOUND,
            ApiError::Load(LoadError::Malformed { .. }) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/flashcards", get(flashcards))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn flashcards(State(state): State<AppState>) -> Result<Json<Vec<Flashcard>>, ApiError> {
    let source = Arc::clone(&state.source);
    let loaded = tokio::task::spawn_blocking(move || source.load_cached())
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    match loaded {
        Ok(cards) => Ok(Json(cards.to_vec())),
        Err(err) => {
            tracing::warn!(error = %err, "serving flashcards failed");
            Err(err.into())
        }
    }
}

/// Bind `addr` and serve until the process is stopped.
pub async fn run(addr: &str, source: CardSource) -> Result<()> {
    let state = AppState {
        source: Arc::new(source),
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .context("HTTP server stopped")?;
    Ok(())
}
