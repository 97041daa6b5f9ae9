// HTTP layer - axum router over the activity registry

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path as FsPath;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::activities::{Activity, ActivityRegistry};
use crate::error::ActivityError;

/// Landing page, compiled into the binary
pub const INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub registry: ActivityRegistry,
}

impl AppState {
    pub fn new(registry: ActivityRegistry) -> Self {
        Self { registry }
    }
}

/// `?email=...` on signup and unregister
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    /// Presence check only; the address format is not validated.
    /// Surrounding whitespace is stripped so it can't create a second roster entry.
    fn require(self) -> Result<String, ActivityError> {
        match self.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => Ok(email.to_string()),
            _ => Err(ActivityError::MissingEmail),
        }
    }
}

/// Unknown activities are rejected before the email is looked at
fn require_activity(registry: &ActivityRegistry, name: &str) -> Result<(), ActivityError> {
    if registry.exists(name) {
        Ok(())
    } else {
        warn!(activity = %name, "Unknown activity");
        Err(ActivityError::not_found(name))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: String) -> Json<Self> {
        Json(Self { message })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - Serve the landing page
async fn serve_index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// GET /health
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /activities - Every activity keyed by name
async fn list_activities(State(state): State<AppState>) -> Json<BTreeMap<String, Activity>> {
    Json(state.registry.list())
}

/// POST /activities/:activity_name/signup?email=...
async fn signup_for_activity(
    State(state): State<AppState>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<MessageResponse>, ActivityError> {
    require_activity(&state.registry, &activity_name)?;
    let email = query.require()?;

    state
        .registry
        .add_participant(&activity_name, &email)
        .inspect_err(|e| warn!(activity = %activity_name, %email, "Signup rejected: {e}"))?;

    info!(activity = %activity_name, %email, "Signed up");
    Ok(MessageResponse::new(format!(
        "Signed up {email} for {activity_name}"
    )))
}

/// POST /activities/:activity_name/unregister?email=...
async fn unregister_from_activity(
    State(state): State<AppState>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<MessageResponse>, ActivityError> {
    require_activity(&state.registry, &activity_name)?;
    let email = query.require()?;

    state
        .registry
        .remove_participant(&activity_name, &email)
        .inspect_err(|e| warn!(activity = %activity_name, %email, "Unregister rejected: {e}"))?;

    info!(activity = %activity_name, %email, "Unregistered");
    Ok(MessageResponse::new(format!(
        "Unregistered {email} from {activity_name}"
    )))
}

// ============================================================================
// Router
// ============================================================================

/// Build the full application router
pub fn router(state: AppState, static_dir: impl AsRef<FsPath>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/health", get(health_check))
        .route("/activities", get(list_activities))
        .route("/activities/:activity_name/signup", post(signup_for_activity))
        .route(
            "/activities/:activity_name/unregister",
            post(unregister_from_activity),
        )
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// TESTS
// ============================================================================
