use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use menu::{LineItem, Review, ValidationError};
use tracing::info;

use crate::{error::AppError, state::AppState};

pub async fn menu_handler(State(state): State<Arc<AppState>>) -> Response {
    Json(&state.menu).into_response()
}

pub async fn category_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Response, AppError> {
    match state.menu.category(&category) {
        Some(items) => Ok(Json(items).into_response()),
        None => Err(AppError::UnknownCategory(category)),
    }
}

pub async fn customizations_handler(State(state): State<Arc<AppState>>) -> Response {
    Json(&state.catalog).into_response()
}

pub async fn reviews_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Review>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(review) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    review
        .validate()
        .map_err(|e| AppError::MalformedPayload(e.to_string()))?;

    #[cfg(feature = "verbose")]
    info!("Review payload: {:?}", review);

    let count = state.files.append_review(review).await?;
    info!("Stored review #{count}");

    Ok(StatusCode::CREATED)
}

pub async fn orders_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Vec<LineItem>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(items) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    if items.is_empty() {
        return Err(AppError::MalformedPayload(ValidationError::EmptyOrder.to_string()));
    }

    #[cfg(feature = "verbose")]
    info!("Order payload: {:?}", items);

    let total = menu::order_total(&items);
    let count = state.files.append_order(items).await?;
    info!("Stored order #{count} totalling {total}");

    Ok(StatusCode::CREATED)
}
