//! Customer query service.

use chrono::Utc;
use common::{CustomerId, Pagination};
use entity_store::{Customer, EntityStore};

use super::model::{
    CustomerUpdate, CustomerView, NewCustomer, normalize_phone, validate_email, validate_name,
};
use super::repository::CustomerRepository;
use crate::error::Result;
use crate::feedback::aggregate;
use crate::product::{CachedProductLookup, ProductLookup, StoreProductLookup};

/// Service for managing customers and building their feedback views.
///
/// Every call runs its store reads sequentially. Listing is all-or-nothing:
/// if the feedback of any customer on the page cannot be aggregated, the
/// whole call fails.
pub struct CustomerService<S: EntityStore + Clone> {
    repository: CustomerRepository<S>,
    products: StoreProductLookup<S>,
}

impl<S: EntityStore + Clone> CustomerService<S> {
    /// Creates a new customer service with the given store.
    pub fn new(store: S) -> Self {
        Self {
            repository: CustomerRepository::new(store.clone()),
            products: StoreProductLookup::new(store),
        }
    }

    async fn view(&self, customer: Customer, lookup: &dyn ProductLookup) -> Result<CustomerView> {
        let entries = self.repository.feedback(customer.id).await?;
        let feedbacks = aggregate(&entries, lookup).await?;
        Ok(CustomerView::new(customer, feedbacks))
    }

    /// Lists customers with their feedback grouped by product.
    ///
    /// A missing or non-positive `limit` means 10; a missing or negative
    /// `offset` means 0.
    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        keyword: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<CustomerView>> {
        let page = Pagination::from_request(limit, offset);
        tracing::debug!(limit = page.limit, offset = page.offset, "listing customers");

        let customers = self.repository.list(keyword, page).await?;
        let lookup = CachedProductLookup::new(&self.products);

        let mut views = Vec::with_capacity(customers.len());
        for customer in customers {
            views.push(self.view(customer, &lookup).await?);
        }
        Ok(views)
    }

    /// Loads one customer with their feedback grouped by product.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: CustomerId) -> Result<CustomerView> {
        let customer = self.repository.get(id).await?;
        let lookup = CachedProductLookup::new(&self.products);
        self.view(customer, &lookup).await
    }

    #[tracing::instrument(skip(self, new))]
    pub async fn create(&self, new: NewCustomer) -> Result<Customer> {
        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::new(),
            name: validate_name(&new.name)?,
            email: validate_email(&new.email)?,
            phone: normalize_phone(new.phone)?,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.repository.create(&customer).await?;
        metrics::counter!("customers_created_total").increment(1);
        tracing::info!(customer_id = %customer.id, "customer created");
        Ok(customer)
    }

    /// Applies the present fields of `update` to a live customer.
    #[tracing::instrument(skip(self, update), fields(fields = ?update.fields()))]
    pub async fn update(&self, id: CustomerId, update: CustomerUpdate) -> Result<Customer> {
        let mut customer = self.repository.get(id).await?;

        update.apply_to(&mut customer)?;
        customer.updated_at = Utc::now();

        self.repository.update(&customer).await?;
        metrics::counter!("customers_updated_total").increment(1);
        Ok(customer)
    }

    /// Soft-deletes a live customer.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: CustomerId) -> Result<()> {
        self.repository.delete(id, Utc::now()).await?;
        metrics::counter!("customers_deleted_total").increment(1);
        tracing::info!(customer_id = %id, "customer deleted");
        Ok(())
    }
}
