//! Customer endpoints, including the per-product feedback views.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::CustomerId;
use domain::{CustomerUpdate, CustomerView, NewCustomer};
use entity_store::{Customer, EntityStore};
use serde::{Deserialize, Serialize};

use super::{AppState, parse_id};
use crate::error::ApiError;

// -- Request types --

/// Query string for `GET /customers`.
///
/// `limit` and `offset` are taken as raw strings: anything that is not an
/// integer is treated as absent rather than rejected.
#[derive(Debug, Deserialize)]
pub struct ListCustomersParams {
    pub keyword: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn lenient_int(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

// -- Handlers --

/// GET /customers: list customers with their feedback grouped by product.
#[tracing::instrument(skip(state))]
pub async fn list<S: EntityStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListCustomersParams>,
) -> Result<Json<Vec<CustomerView>>, ApiError> {
    let views = state
        .customers
        .list(
            params.keyword.as_deref(),
            lenient_int(params.limit.as_deref()),
            lenient_int(params.offset.as_deref()),
        )
        .await?;
    Ok(Json(views))
}

/// POST /customers: create a customer.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: EntityStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Json(req) = payload?;

    let mut new = NewCustomer::new(req.name, req.email);
    new.phone = req.phone;

    let customer = state.customers.create(new).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /customers/{id}: one customer with their grouped feedback.
#[tracing::instrument(skip(state))]
pub async fn get<S: EntityStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<CustomerView>, ApiError> {
    let id: CustomerId = parse_id(&id)?;
    Ok(Json(state.customers.get(id).await?))
}

/// PUT /customers/{id}: apply the supplied fields to a customer.
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: EntityStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let id: CustomerId = parse_id(&id)?;
    let Json(req) = payload?;

    let update = CustomerUpdate {
        name: req.name,
        email: req.email,
        phone: req.phone,
    };
    Ok(Json(state.customers.update(id, update).await?))
}

/// DELETE /customers/{id}: soft-delete a customer.
#[tracing::instrument(skip(state))]
pub async fn delete<S: EntityStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: CustomerId = parse_id(&id)?;
    state.customers.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "customer deleted",
    }))
}
