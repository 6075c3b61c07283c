//! Groups one customer's feedback by product.

use std::collections::HashMap;
use std::time::Instant;

use common::ProductId;
use entity_store::Feedback;
use serde::Serialize;

use crate::error::{DomainError, Result};
use crate::product::ProductLookup;

/// A single comment and its rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRating {
    pub comment: String,
    pub rating: i32,
}

/// All of one customer's feedback for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackByProduct {
    pub product_id: ProductId,
    pub product_name: String,
    pub comments: Vec<CommentRating>,
}

/// Groups feedback entries by product, resolving each product's name.
///
/// Groups appear in the order their product was first seen, and each group's
/// comments keep the order of `entries`. Products are resolved one entry at
/// a time; the first failed resolution aborts the whole aggregation.
pub async fn aggregate<L>(entries: &[Feedback], lookup: &L) -> Result<Vec<FeedbackByProduct>>
where
    L: ProductLookup + ?Sized,
{
    let started = Instant::now();
    let mut groups: Vec<FeedbackByProduct> = Vec::new();
    let mut positions: HashMap<ProductId, usize> = HashMap::new();

    for entry in entries {
        let product = lookup
            .product(entry.product_id)
            .await
            .map_err(|err| match err {
                DomainError::NotFound { .. } => DomainError::UnresolvedProduct {
                    feedback_id: entry.id,
                    product_id: entry.product_id,
                },
                other => other,
            })?;

        let comment = CommentRating {
            comment: entry.comment.clone(),
            rating: entry.rating,
        };

        match positions.get(&product.id) {
            Some(&index) => groups[index].comments.push(comment),
            None => {
                positions.insert(product.id, groups.len());
                groups.push(FeedbackByProduct {
                    product_id: product.id,
                    product_name: product.name,
                    comments: vec![comment],
                });
            }
        }
    }

    metrics::counter!("feedback_aggregations_total").increment(1);
    metrics::histogram!("feedback_aggregation_duration_seconds")
        .record(started.elapsed().as_secs_f64());

    Ok(groups)
}
