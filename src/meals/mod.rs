pub mod date;
pub mod dto;
pub mod handlers;
pub mod menu;
pub mod normalize;
mod page;
pub mod services;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::state::AppState;
use axum::Router;

/// JSON API, nested under `/api/v1`.
pub fn router() -> Router<AppState> {
    handlers::api_routes()
}

pub fn page_router() -> Router<AppState> {
    handlers::page_routes()
}
