//! Shared types used across the customer feedback workspace.

pub mod paging;
pub mod types;

pub use paging::{DEFAULT_LIMIT, Pagination};
pub use types::{CustomerId, FeedbackId, InteractionId, ProductId};
