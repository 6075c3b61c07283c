use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    Customer, CustomerId, CustomerQuery, Feedback, FeedbackId, FeedbackQuery, Interaction,
    Product, ProductId, Result, StoreError, store::EntityStore,
};

#[derive(Default)]
struct Tables {
    customers: HashMap<CustomerId, Customer>,
    products: HashMap<ProductId, Product>,
    /// Kept in insertion order so listings come back oldest first.
    feedback: Vec<Feedback>,
    interactions: Vec<Interaction>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<CustomerId>) -> bool {
        self.customers.values().any(|c| {
            c.is_live() && Some(c.id) != except && c.email.eq_ignore_ascii_case(email)
        })
    }
}

/// In-memory entity store implementation for testing and local runs.
///
/// This implementation keeps every table in memory and provides
/// the same interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryEntityStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryEntityStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn insert_customer(&self, customer: &Customer) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&customer.email, None) {
            return Err(StoreError::UniqueViolation {
                entity: "customer",
                field: "email",
            });
        }
        tables.customers.insert(customer.id, customer.clone());
        Ok(())
    }

    async fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.get(&id).filter(|c| c.is_live()).cloned())
    }

    async fn update_customer(&self, customer: &Customer) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.customers.get(&customer.id).is_some_and(Customer::is_live) {
            return Err(StoreError::not_found("customer", customer.id));
        }
        if tables.email_taken(&customer.email, Some(customer.id)) {
            return Err(StoreError::UniqueViolation {
                entity: "customer",
                field: "email",
            });
        }
        tables.customers.insert(customer.id, customer.clone());
        Ok(())
    }

    async fn delete_customer(&self, id: CustomerId, deleted_at: DateTime<Utc>) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.customers.get_mut(&id) {
            Some(customer) if customer.is_live() => {
                customer.deleted_at = Some(deleted_at);
                Ok(())
            }
            _ => Err(StoreError::not_found("customer", id)),
        }
    }

    async fn list_customers(&self, query: CustomerQuery) -> Result<Vec<Customer>> {
        let tables = self.tables.read().await;
        let mut customers: Vec<_> = tables
            .customers
            .values()
            .filter(|c| c.is_live() && query.matches(&c.name, &c.email))
            .cloned()
            .collect();

        customers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        // Apply offset and limit
        let offset = query.offset.unwrap_or(0);
        let customers = customers.into_iter().skip(offset);
        let customers = match query.limit {
            Some(limit) => customers.take(limit).collect(),
            None => customers.collect(),
        };

        Ok(customers)
    }

    async fn insert_product(&self, product: &Product) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.products.insert(product.id, product.clone());
        Ok(())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.get(&id).filter(|p| p.is_live()).cloned())
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.products.get_mut(&product.id) {
            Some(existing) if existing.is_live() => {
                *existing = product.clone();
                Ok(())
            }
            _ => Err(StoreError::not_found("product", product.id)),
        }
    }

    async fn delete_product(&self, id: ProductId, deleted_at: DateTime<Utc>) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.products.get_mut(&id) {
            Some(product) if product.is_live() => {
                product.deleted_at = Some(deleted_at);
                Ok(())
            }
            _ => Err(StoreError::not_found("product", id)),
        }
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let tables = self.tables.read().await;
        let mut products: Vec<_> = tables
            .products
            .values()
            .filter(|p| p.is_live())
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(products)
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<()> {
        self.tables.write().await.feedback.push(feedback.clone());
        Ok(())
    }

    async fn get_feedback(&self, id: FeedbackId) -> Result<Option<Feedback>> {
        let tables = self.tables.read().await;
        Ok(tables
            .feedback
            .iter()
            .find(|f| f.id == id && f.is_live())
            .cloned())
    }

    async fn update_feedback(&self, feedback: &Feedback) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables
            .feedback
            .iter_mut()
            .find(|f| f.id == feedback.id && f.is_live())
        {
            Some(existing) => {
                *existing = feedback.clone();
                Ok(())
            }
            None => Err(StoreError::not_found("feedback", feedback.id)),
        }
    }

    async fn delete_feedback(&self, id: FeedbackId, deleted_at: DateTime<Utc>) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.feedback.iter_mut().find(|f| f.id == id && f.is_live()) {
            Some(feedback) => {
                feedback.deleted_at = Some(deleted_at);
                Ok(())
            }
            None => Err(StoreError::not_found("feedback", id)),
        }
    }

    async fn list_feedback(&self, query: FeedbackQuery) -> Result<Vec<Feedback>> {
        let tables = self.tables.read().await;
        Ok(tables
            .feedback
            .iter()
            .filter(|f| f.is_live() && query.matches(f.customer_id, f.product_id))
            .cloned()
            .collect())
    }

    async fn insert_interaction(&self, interaction: &Interaction) -> Result<()> {
        self.tables
            .write()
            .await
            .interactions
            .push(interaction.clone());
        Ok(())
    }

    async fn list_interactions(&self, customer_id: CustomerId) -> Result<Vec<Interaction>> {
        let tables = self.tables.read().await;
        Ok(tables
            .interactions
            .iter()
            .filter(|i| i.is_live() && i.customer_id == customer_id)
            .cloned()
            .collect())
    }
}
