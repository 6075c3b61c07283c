//! Customer repository adapter over the entity store.

use chrono::{DateTime, Utc};
use common::{CustomerId, Pagination};
use entity_store::{Customer, CustomerQuery, EntityStore, Feedback, FeedbackQuery};

use crate::error::{DomainError, Result};

/// Translates customer operations into entity store calls.
#[derive(Clone)]
pub struct CustomerRepository<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> CustomerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, customer: &Customer) -> Result<()> {
        Ok(self.store.insert_customer(customer).await?)
    }

    /// Loads a live customer, failing with `NotFound` otherwise.
    pub async fn get(&self, id: CustomerId) -> Result<Customer> {
        self.store
            .get_customer(id)
            .await?
            .ok_or_else(|| DomainError::not_found("customer", id))
    }

    pub async fn update(&self, customer: &Customer) -> Result<()> {
        Ok(self.store.update_customer(customer).await?)
    }

    /// Soft-deletes a customer after checking it is live.
    pub async fn delete(&self, id: CustomerId, at: DateTime<Utc>) -> Result<()> {
        self.get(id).await?;
        Ok(self.store.delete_customer(id, at).await?)
    }

    /// Lists live customers ordered by name, filtered by keyword.
    pub async fn list(&self, keyword: Option<&str>, page: Pagination) -> Result<Vec<Customer>> {
        let mut query = CustomerQuery::new().limit(page.limit).offset(page.offset);
        if let Some(keyword) = keyword {
            query = query.keyword(keyword);
        }
        Ok(self.store.list_customers(query).await?)
    }

    /// Loads a customer's live feedback, oldest first.
    pub async fn feedback(&self, id: CustomerId) -> Result<Vec<Feedback>> {
        Ok(self
            .store
            .list_feedback(FeedbackQuery::for_customer(id))
            .await?)
    }
}
