use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use time::{Date, UtcOffset};
use tracing::{instrument, warn};

use super::date::{parse_iso_date, to_iso, today};
use super::dto::{MealInfoResponse, MealQuery};
use super::page;
use super::services::get_meal_info;
use crate::error::{MealError, PICK_DATE_MESSAGE};
use crate::state::AppState;

// --- public routers ---

pub fn page_routes() -> Router<AppState> {
    Router::new().route("/", get(meal_page))
}

pub fn api_routes() -> Router<AppState> {
    Router::new().route("/meals", get(meal_info))
}

/// No `date` means today; an empty `date=` is a request without a date.
fn resolve_date(raw: Option<&str>, offset: UtcOffset) -> Result<Date, MealError> {
    match raw {
        None => Ok(today(offset)),
        Some(s) if s.trim().is_empty() => Err(MealError::InvalidDate(PICK_DATE_MESSAGE.into())),
        Some(s) => parse_iso_date(s),
    }
}

// --- handlers ---

/// GET /?date=YYYY-MM-DD
#[instrument(skip(state))]
pub async fn meal_page(
    State(state): State<AppState>,
    Query(q): Query<MealQuery>,
) -> (StatusCode, Html<String>) {
    let date = match resolve_date(q.date.as_deref(), state.config.utc_offset) {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "rejected meal page request");
            let shown = q.date.as_deref().unwrap_or_default();
            return (e.status(), Html(page::render_error(shown, e.user_message())));
        }
    };

    match get_meal_info(&state, date).await {
        Ok(outcome) => (StatusCode::OK, Html(page::render_outcome(&outcome))),
        Err(e) => (e.status(), Html(page::render_error(&to_iso(date), e.user_message()))),
    }
}

/// GET /api/v1/meals?date=YYYY-MM-DD
#[instrument(skip(state))]
pub async fn meal_info(
    State(state): State<AppState>,
    Query(q): Query<MealQuery>,
) -> Result<Json<MealInfoResponse>, (StatusCode, Json<Value>)> {
    let date = resolve_date(q.date.as_deref(), state.config.utc_offset).map_err(|e| {
        warn!(error = %e, "rejected meal api request");
        api_error(e)
    })?;
    let outcome = get_meal_info(&state, date).await.map_err(api_error)?;
    Ok(Json(outcome.into()))
}

fn api_error(e: MealError) -> (StatusCode, Json<Value>) {
    (e.status(), Json(json!({ "error": e.user_message() })))
}
