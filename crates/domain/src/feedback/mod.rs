//! Feedback records and per-product aggregation.

mod aggregator;
mod service;

pub use aggregator::{CommentRating, FeedbackByProduct, aggregate};
pub use service::{FeedbackDetails, FeedbackInput, FeedbackService};
