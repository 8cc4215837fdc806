use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    app::{AppContext, StateSnapshot},
    input::SearchOutcome,
    models::Coordinate,
};

#[derive(Serialize, Deserialize)]
pub struct ClickRequest {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize, Deserialize)]
pub struct SearchRequest {
    pub place: String,
}

#[derive(Serialize, Deserialize)]
pub struct ThemeRequest {
    pub checked: bool,
}

/// Result of a click or search plus the state the page should now show
#[derive(Serialize)]
pub struct ActionResponse {
    /// "rendered", "aborted", "superseded" or "notice"
    pub outcome: &'static str,
    /// Blocking notice text for the user, if any
    pub notice: Option<&'static str>,
    pub state: StateSnapshot,
}

pub fn router() -> Router<Arc<AppContext>> {
    Router::new()
        .route("/state", get(get_state))
        .route("/click", post(click))
        .route("/search", post(search))
        .route("/theme", post(set_theme))
}

async fn get_state(State(ctx): State<Arc<AppContext>>) -> Json<StateSnapshot> {
    Json(ctx.snapshot().await)
}

async fn click(
    State(ctx): State<Arc<AppContext>>,
    Json(payload): Json<ClickRequest>,
) -> Result<Json<ActionResponse>, StatusCode> {
    let coordinate =
        Coordinate::new(payload.lat, payload.lon).map_err(|_| StatusCode::BAD_REQUEST)?;
    let outcome = ctx.click(coordinate).await;

    Ok(Json(ActionResponse {
        outcome: outcome.as_str(),
        notice: None,
        state: ctx.snapshot().await,
    }))
}

async fn search(
    State(ctx): State<Arc<AppContext>>,
    Json(payload): Json<SearchRequest>,
) -> Json<ActionResponse> {
    let (outcome, notice) = match ctx.search(&payload.place).await {
        SearchOutcome::Located { outcome, .. } => (outcome.as_str(), None),
        SearchOutcome::Notice(notice) => ("notice", Some(notice.message())),
    };

    Json(ActionResponse {
        outcome,
        notice,
        state: ctx.snapshot().await,
    })
}

async fn set_theme(
    State(ctx): State<Arc<AppContext>>,
    Json(payload): Json<ThemeRequest>,
) -> Json<StateSnapshot> {
    ctx.set_theme(payload.checked).await;
    Json(ctx.snapshot().await)
}
