//! Domain layer for the customer feedback service.
//!
//! This crate provides:
//! - Customer query service with keyword search, paging, and partial updates
//! - Feedback aggregation grouping a customer's feedback by product
//! - Product lookup adapters, including a request-scoped cache
//! - Feedback and product record services

pub mod customer;
pub mod error;
pub mod feedback;
pub mod product;

pub use customer::{CustomerRepository, CustomerService, CustomerUpdate, CustomerView, NewCustomer};
pub use error::{DomainError, Result};
pub use feedback::{
    CommentRating, FeedbackByProduct, FeedbackDetails, FeedbackInput, FeedbackService, aggregate,
};
pub use product::{
    CachedProductLookup, NewProduct, ProductLookup, ProductService, ProductUpdate,
    StoreProductLookup,
};
