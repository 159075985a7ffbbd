use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use promo_core::upstream::{fetch_active_promotions, PromotionSource};

pub const PROMOTIONS_ROUTE: &str = "/api/promotions";

const RETRIEVAL_FAILED: &str = "Error retrieving promotions";
const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PromotionSource>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(PROMOTIONS_ROUTE, any(promotions))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn promotions(State(state): State<AppState>, method: Method) -> Response {
    if method != Method::GET {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET")],
            Json(ErrorBody {
                error: METHOD_NOT_ALLOWED,
                details: None,
            }),
        )
            .into_response();
    }

    match fetch_active_promotions(state.source.as_ref()).await {
        Ok(promos) => (StatusCode::OK, Json(promos)).into_response(),
        Err(err) => {
            sentry::capture_error(&err);
            tracing::error!(error = %err, "failed to retrieve promotions");

            let details = err.to_string();
            let details = if details.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                details
            };

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: RETRIEVAL_FAILED,
                    details: Some(details),
                }),
            )
                .into_response()
        }
    }
}
