use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use burrow_core::{ListedLink, ShortCode};

use crate::error::{AppError, Result};
use crate::model::{ListUrlsRequest, MessageResponse, ShortenUrlRequest};
use crate::state::AppState;

pub async fn shorten_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShortenUrlRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(request) = payload?;

    let code = state.shortener().shorten(request.into_params()).await?;

    Ok(Json(MessageResponse::new(
        code.to_url(state.short_url_base()),
    )))
}

pub async fn list_urls_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ListUrlsRequest>, JsonRejection>,
) -> Result<Json<Vec<ListedLink>>> {
    let Json(request) = payload?;

    let links = state.lister().list(&request.oid).await?;

    Ok(Json(links))
}

/// Redirects to the target of `code`. Codes that cannot exist are answered
/// with 404 without a storage lookup.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Redirect> {
    let code = ShortCode::new(code).map_err(|_| AppError::NotFound)?;

    let record = state
        .shortener()
        .resolve(&code)
        .await
        .map_err(AppError::Resolve)?
        .ok_or(AppError::NotFound)?;

    Ok(Redirect::temporary(&record.target_url))
}
