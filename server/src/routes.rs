use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use menu::{
    model::Dish,
    session::Profile,
};
use serde::Deserialize;
use tracing::warn;

use crate::{error::AppError, state::State as AppState};

#[derive(Deserialize, Default)]
pub struct MenuParams {
    #[serde(default)]
    q: String,
    category: Option<String>,
}

/// Menu search. The first request of the session triggers the one-shot
/// synchronization; a failed sync is logged and the handler answers from
/// whatever the store already holds.
pub async fn menu_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MenuParams>,
) -> Json<Vec<Dish>> {
    if let Err(e) = state
        .sync
        .ensure(&state.client, &state.config.menu_url, &state.store)
        .await
    {
        warn!("menu sync failed, serving cached snapshot: {e}");
    }

    Json(state.store.query(&params.q, params.category.as_deref()))
}

pub async fn dish_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Dish>, AppError> {
    state
        .store
        .get(id)
        .map(Json)
        .ok_or(AppError::DishNotFound(id))
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<Profile>,
) -> Result<StatusCode, AppError> {
    state.session.register(profile)?;

    Ok(StatusCode::OK)
}

pub async fn profile_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Profile>, AppError> {
    state.session.profile().map(Json).ok_or(AppError::NotLoggedIn)
}

pub async fn logout_handler(State(state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    state.session.logout()?;

    Ok(StatusCode::OK)
}
