//! HTTP route handlers and the shared state they run against.

pub mod customers;
pub mod feedbacks;
pub mod health;
pub mod metrics;
pub mod products;

use std::str::FromStr;

use domain::{CustomerService, FeedbackService, ProductService};
use entity_store::EntityStore;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: EntityStore + Clone> {
    pub customers: CustomerService<S>,
    pub feedback: FeedbackService<S>,
    pub products: ProductService<S>,
}

impl<S: EntityStore + Clone> AppState<S> {
    /// Builds every service over the same store handle.
    pub fn new(store: S) -> Self {
        Self {
            customers: CustomerService::new(store.clone()),
            feedback: FeedbackService::new(store.clone()),
            products: ProductService::new(store),
        }
    }
}

/// Parses a path or query id into one of the typed entity ids.
pub(crate) fn parse_id<T: FromStr<Err = uuid::Error>>(id: &str) -> Result<T, ApiError> {
    id.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))
}
