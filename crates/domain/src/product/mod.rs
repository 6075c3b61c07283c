//! Product catalog: CRUD service and the lookup adapters used by aggregation.

mod lookup;
mod service;

pub use lookup::{CachedProductLookup, ProductLookup, StoreProductLookup};
pub use service::{NewProduct, ProductService, ProductUpdate};

#[cfg(test)]
pub(crate) use lookup::tests as lookup_tests;
