use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    Customer, CustomerId, CustomerQuery, Feedback, FeedbackId, FeedbackQuery, Interaction,
    Product, ProductId, Result,
};

/// Core trait for entity store implementations.
///
/// Reads never return soft-deleted records. Updates replace the whole
/// record and fail with `NotFound` when no live record has the id; deletes
/// set the soft-delete marker and fail the same way.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Persists a new customer.
    ///
    /// Fails with `UniqueViolation` if a live customer already uses the email.
    async fn insert_customer(&self, customer: &Customer) -> Result<()>;

    /// Retrieves a live customer by id.
    async fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>>;

    /// Replaces a live customer record.
    async fn update_customer(&self, customer: &Customer) -> Result<()>;

    /// Soft-deletes a live customer.
    async fn delete_customer(&self, id: CustomerId, deleted_at: DateTime<Utc>) -> Result<()>;

    /// Lists live customers ordered by name (byte order, ties by id), then
    /// filtered and paginated.
    async fn list_customers(&self, query: CustomerQuery) -> Result<Vec<Customer>>;

    async fn insert_product(&self, product: &Product) -> Result<()>;

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>>;

    async fn update_product(&self, product: &Product) -> Result<()>;

    async fn delete_product(&self, id: ProductId, deleted_at: DateTime<Utc>) -> Result<()>;

    /// Lists live products ordered by name (byte order, ties by id).
    async fn list_products(&self) -> Result<Vec<Product>>;

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<()>;

    async fn get_feedback(&self, id: FeedbackId) -> Result<Option<Feedback>>;

    async fn update_feedback(&self, feedback: &Feedback) -> Result<()>;

    async fn delete_feedback(&self, id: FeedbackId, deleted_at: DateTime<Utc>) -> Result<()>;

    /// Lists live feedback matching the query in insertion order.
    async fn list_feedback(&self, query: FeedbackQuery) -> Result<Vec<Feedback>>;

    /// Records a customer interaction. Interactions are a store-level surface
    /// only: no service or route reads or writes them yet.
    async fn insert_interaction(&self, interaction: &Interaction) -> Result<()>;

    /// Lists a customer's live interactions in insertion order.
    async fn list_interactions(&self, customer_id: CustomerId) -> Result<Vec<Interaction>>;
}
