//! Customers: validation, the repository adapter, and the query service.

mod model;
mod repository;
mod service;

pub use model::{CustomerUpdate, CustomerView, NewCustomer};
pub use repository::CustomerRepository;
pub use service::CustomerService;
