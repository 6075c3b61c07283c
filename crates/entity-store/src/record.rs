//! Persisted record shapes.
//!
//! Every record carries a `deleted_at` soft-delete marker. A record whose
//! marker is set is retained by the store but never returned by a read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CustomerId, FeedbackId, InteractionId, ProductId};

/// A customer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Returns true unless the record has been soft-deleted.
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// A product that customers can leave feedback on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// A rating and comment left by one customer about one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: FeedbackId,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Feedback {
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// A contact with a customer over some channel (phone, email, chat).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: InteractionId,
    pub customer_id: CustomerId,
    pub channel: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Interaction {
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_serializes_camel_case_without_delete_marker() {
        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::new(),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            phone: None,
            created_at: now,
            updated_at: now,
            deleted_at: Some(now),
        };

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["name"], "Ann");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("deletedAt").is_none());
        assert!(json.get("deleted_at").is_none());
    }

    #[test]
    fn feedback_uses_wire_field_names() {
        let now = Utc::now();
        let feedback = Feedback {
            id: FeedbackId::new(),
            customer_id: CustomerId::new(),
            product_id: ProductId::new(),
            rating: 4,
            comment: "solid".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let json = serde_json::to_value(&feedback).unwrap();
        assert_eq!(
            json["customerId"],
            serde_json::json!(feedback.customer_id.to_string())
        );
        assert_eq!(json["rating"], 4);
    }
}
