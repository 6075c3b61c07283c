//! Feedback record service.

use chrono::Utc;
use common::{CustomerId, FeedbackId, ProductId};
use entity_store::{Customer, EntityStore, Feedback, FeedbackQuery, Product, StoreError};
use serde::Serialize;

use crate::error::{DomainError, Result};
use crate::product::{ProductLookup, StoreProductLookup};

/// Caller-supplied feedback fields, used for both create and full replace.
#[derive(Debug, Clone)]
pub struct FeedbackInput {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub rating: i32,
    pub comment: String,
}

/// A feedback entry joined with the customer and product it references.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDetails {
    pub id: FeedbackId,
    pub customer: Customer,
    pub product: Product,
    pub rating: i32,
    pub comment: String,
    pub created_at: chrono::DateTime<Utc>,
}

/// Service for feedback records.
///
/// Writes check that the referenced customer and product are live before
/// anything is stored; a dangling reference is rejected as a validation
/// error instead of surfacing later during aggregation.
pub struct FeedbackService<S: EntityStore + Clone> {
    store: S,
    products: StoreProductLookup<S>,
}

impl<S: EntityStore + Clone> FeedbackService<S> {
    /// Creates a new feedback service with the given store.
    pub fn new(store: S) -> Self {
        Self {
            products: StoreProductLookup::new(store.clone()),
            store,
        }
    }

    async fn resolve_references(&self, input: &FeedbackInput) -> Result<(Customer, Product)> {
        let customer = self
            .store
            .get_customer(input.customer_id)
            .await?
            .ok_or_else(|| {
                DomainError::Validation(format!("customer {} does not exist", input.customer_id))
            })?;

        let product = match self.products.product(input.product_id).await {
            Ok(product) => product,
            Err(DomainError::NotFound { .. }) => {
                return Err(DomainError::Validation(format!(
                    "product {} does not exist",
                    input.product_id
                )));
            }
            Err(other) => return Err(other),
        };

        Ok((customer, product))
    }

    /// Records new feedback and returns it joined with its customer and product.
    #[tracing::instrument(skip(self, input), fields(customer_id = %input.customer_id, product_id = %input.product_id))]
    pub async fn create(&self, input: FeedbackInput) -> Result<FeedbackDetails> {
        let (customer, product) = self.resolve_references(&input).await?;

        let now = Utc::now();
        let feedback = Feedback {
            id: FeedbackId::new(),
            customer_id: customer.id,
            product_id: product.id,
            rating: input.rating,
            comment: input.comment,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.store.insert_feedback(&feedback).await?;
        metrics::counter!("feedback_created_total").increment(1);
        tracing::info!(feedback_id = %feedback.id, "feedback recorded");

        Ok(FeedbackDetails {
            id: feedback.id,
            customer,
            product,
            rating: feedback.rating,
            comment: feedback.comment,
            created_at: feedback.created_at,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: FeedbackId) -> Result<Feedback> {
        self.store
            .get_feedback(id)
            .await?
            .ok_or_else(|| DomainError::not_found("feedback", id))
    }

    /// Replaces every caller-supplied field of an existing entry.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: FeedbackId, input: FeedbackInput) -> Result<Feedback> {
        let mut feedback = self.get(id).await?;
        self.resolve_references(&input).await?;

        feedback.customer_id = input.customer_id;
        feedback.product_id = input.product_id;
        feedback.rating = input.rating;
        feedback.comment = input.comment;
        feedback.updated_at = Utc::now();

        self.store.update_feedback(&feedback).await?;
        Ok(feedback)
    }

    /// Soft-deletes an entry. Deleting an unknown or already deleted entry
    /// succeeds.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: FeedbackId) -> Result<()> {
        match self.store.delete_feedback(id, Utc::now()).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound { .. }) => {
                tracing::debug!(feedback_id = %id, "delete of missing feedback ignored");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Lists live feedback matching the filters, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, query: FeedbackQuery) -> Result<Vec<Feedback>> {
        Ok(self.store.list_feedback(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use entity_store::InMemoryEntityStore;

    use super::*;

    async fn seeded() -> (FeedbackService<InMemoryEntityStore>, Customer, Product) {
        let store = InMemoryEntityStore::new();
        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::new(),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            phone: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let product = Product {
            id: ProductId::new(),
            name: "Widget".to_string(),
            category: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        store.insert_customer(&customer).await.unwrap();
        store.insert_product(&product).await.unwrap();
        (FeedbackService::new(store), customer, product)
    }

    fn input(customer: &Customer, product: &Product, rating: i32) -> FeedbackInput {
        FeedbackInput {
            customer_id: customer.id,
            product_id: product.id,
            rating,
            comment: format!("rated {rating}"),
        }
    }

    #[tokio::test]
    async fn create_joins_customer_and_product() {
        let (service, ann, widget) = seeded().await;

        let details = service.create(input(&ann, &widget, 4)).await.unwrap();
        assert_eq!(details.customer, ann);
        assert_eq!(details.product, widget);
        assert_eq!(details.rating, 4);

        let stored = service.get(details.id).await.unwrap();
        assert_eq!(stored.customer_id, ann.id);
    }

    #[tokio::test]
    async fn create_rejects_dangling_references() {
        let (service, ann, widget) = seeded().await;

        let mut bad_customer = input(&ann, &widget, 3);
        bad_customer.customer_id = CustomerId::new();
        let result = service.create(bad_customer).await;
        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg.contains("customer")));

        let mut bad_product = input(&ann, &widget, 3);
        bad_product.product_id = ProductId::new();
        let result = service.create(bad_product).await;
        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg.contains("product")));

        assert!(service.list(FeedbackQuery::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let (service, ann, widget) = seeded().await;
        let created = service.create(input(&ann, &widget, 1)).await.unwrap();

        let updated = service
            .update(
                created.id,
                FeedbackInput {
                    comment: "better after the patch".to_string(),
                    ..input(&ann, &widget, 5)
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.rating, 5);
        assert_eq!(updated.comment, "better after the patch");
        assert_eq!(service.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_missing_feedback_is_not_found() {
        let (service, ann, widget) = seeded().await;
        let result = service
            .update(FeedbackId::new(), input(&ann, &widget, 2))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::NotFound {
                entity: "feedback",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (service, ann, widget) = seeded().await;
        let created = service.create(input(&ann, &widget, 4)).await.unwrap();

        service.delete(created.id).await.unwrap();
        service.delete(created.id).await.unwrap();
        service.delete(FeedbackId::new()).await.unwrap();

        assert!(matches!(
            service.get(created.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
