//! Product service providing CRUD over the product catalog.

use chrono::Utc;
use common::ProductId;
use entity_store::{EntityStore, Product};

use crate::error::{DomainError, Result, check_length};

/// Fields for a new product.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: String,
    pub category: Option<String>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Field update set for a product; only present fields are applied.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
}

/// Column limits of the `products` table, in characters.
const MAX_NAME_LEN: usize = 100;
const MAX_CATEGORY_LEN: usize = 50;

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation(
            "product name is required".to_string(),
        ));
    }
    check_length("product name", name, MAX_NAME_LEN)?;
    Ok(name.to_string())
}

fn normalize_category(category: Option<String>) -> Result<Option<String>> {
    let category = category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if let Some(category) = &category {
        check_length("category", category, MAX_CATEGORY_LEN)?;
    }
    Ok(category)
}

/// Service for managing products.
pub struct ProductService<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> ProductService<S> {
    /// Creates a new product service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, new: NewProduct) -> Result<Product> {
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            name: validate_name(&new.name)?,
            category: normalize_category(new.category)?,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.store.insert_product(&product).await?;
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Product> {
        self.store
            .get_product(id)
            .await?
            .ok_or_else(|| DomainError::not_found("product", id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: ProductId, update: ProductUpdate) -> Result<Product> {
        let mut product = self.get(id).await?;

        let name = update.name.as_deref().map(validate_name).transpose()?;
        let category = update
            .category
            .map(|c| normalize_category(Some(c)))
            .transpose()?;

        if let Some(name) = name {
            product.name = name;
        }
        if let Some(category) = category {
            product.category = category;
        }
        product.updated_at = Utc::now();

        self.store.update_product(&product).await?;
        Ok(product)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<()> {
        self.store.delete_product(id, Utc::now()).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.store.list_products().await?)
    }
}

#[cfg(test)]
mod tests {
    use entity_store::InMemoryEntityStore;

    use super::*;

    fn service() -> ProductService<InMemoryEntityStore> {
        ProductService::new(InMemoryEntityStore::new())
    }

    #[tokio::test]
    async fn create_trims_and_requires_name() {
        let service = service();
        let widget = service
            .create(NewProduct::new("  Widget ").category(" "))
            .await
            .unwrap();
        assert_eq!(widget.name, "Widget");
        assert_eq!(widget.category, None);

        let result = service.create(NewProduct::new("   ")).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn over_length_fields_are_rejected() {
        let service = service();

        let result = service
            .create(NewProduct::new("x".repeat(MAX_NAME_LEN + 1)))
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(service.list().await.unwrap().is_empty());

        let widget = service
            .create(NewProduct::new("x".repeat(MAX_NAME_LEN)))
            .await
            .unwrap();
        let result = service
            .update(
                widget.id,
                ProductUpdate {
                    name: Some("Widget".to_string()),
                    category: Some("c".repeat(MAX_CATEGORY_LEN + 1)),
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(service.get(widget.id).await.unwrap(), widget);
    }

    #[tokio::test]
    async fn update_changes_only_present_fields() {
        let service = service();
        let widget = service
            .create(NewProduct::new("Widget").category("tools"))
            .await
            .unwrap();

        let updated = service
            .update(
                widget.id,
                ProductUpdate {
                    name: Some("Widget Pro".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Widget Pro");
        assert_eq!(updated.category.as_deref(), Some("tools"));
    }

    #[tokio::test]
    async fn delete_missing_product_is_not_found() {
        let service = service();
        let result = service.delete(ProductId::new()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let service = service();
        for name in ["Gadget", "Anvil", "Widget"] {
            service.create(NewProduct::new(name)).await.unwrap();
        }

        let names: Vec<_> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Anvil", "Gadget", "Widget"]);
    }
}
