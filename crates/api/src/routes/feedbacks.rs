//! Feedback record endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::{CustomerId, FeedbackId, ProductId};
use domain::{FeedbackDetails, FeedbackInput};
use entity_store::{EntityStore, Feedback, FeedbackQuery};
use serde::Deserialize;

use super::{AppState, parse_id};
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct ListFeedbackParams {
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
}

/// Body for both create and full replace.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub customer_id: String,
    pub product_id: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

impl FeedbackRequest {
    fn into_input(self) -> Result<FeedbackInput, ApiError> {
        Ok(FeedbackInput {
            customer_id: parse_id(&self.customer_id)?,
            product_id: parse_id(&self.product_id)?,
            rating: self.rating,
            comment: self.comment,
        })
    }
}

/// Parses an optional filter id; an empty value counts as absent.
fn filter_id<T: std::str::FromStr<Err = uuid::Error>>(
    value: Option<&str>,
) -> Result<Option<T>, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_id::<T>)
        .transpose()
}

// -- Handlers --

/// POST /feedbacks: record feedback for a customer and product.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: EntityStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FeedbackDetails>), ApiError> {
    let Json(req) = payload?;
    let details = state.feedback.create(req.into_input()?).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

/// GET /feedbacks: list feedback, optionally filtered by customer and product.
#[tracing::instrument(skip(state))]
pub async fn list<S: EntityStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListFeedbackParams>,
) -> Result<Json<Vec<Feedback>>, ApiError> {
    let query = FeedbackQuery {
        customer_id: filter_id::<CustomerId>(params.customer_id.as_deref())?,
        product_id: filter_id::<ProductId>(params.product_id.as_deref())?,
    };
    Ok(Json(state.feedback.list(query).await?))
}

#[tracing::instrument(skip(state))]
pub async fn get<S: EntityStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Feedback>, ApiError> {
    let id: FeedbackId = parse_id(&id)?;
    Ok(Json(state.feedback.get(id).await?))
}

/// PUT /feedbacks/{id}: replace every field of an entry.
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: EntityStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<Feedback>, ApiError> {
    let id: FeedbackId = parse_id(&id)?;
    let Json(req) = payload?;
    Ok(Json(state.feedback.update(id, req.into_input()?).await?))
}

/// DELETE /feedbacks/{id}: soft-delete an entry; always 204 for a well-formed id.
#[tracing::instrument(skip(state))]
pub async fn delete<S: EntityStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: FeedbackId = parse_id(&id)?;
    state.feedback.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
