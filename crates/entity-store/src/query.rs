use crate::{CustomerId, ProductId};

/// Builder for filtered, paginated customer listings.
///
/// Results are ordered by name ascending. The keyword, when present, matches
/// customers whose name or email contains it, ignoring case.
#[derive(Debug, Clone, Default)]
pub struct CustomerQuery {
    /// Case-insensitive substring matched against name and email.
    pub keyword: Option<String>,

    /// Maximum number of customers to return.
    pub limit: Option<usize>,

    /// Number of customers to skip.
    pub offset: Option<usize>,
}

impl CustomerQuery {
    /// Creates a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by keyword. Blank keywords are ignored.
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        let trimmed = keyword.trim();
        self.keyword = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Limits the number of customers returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips this many customers before returning results.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns true if the customer's name or email contains the keyword.
    pub(crate) fn matches(&self, name: &str, email: &str) -> bool {
        match self.keyword {
            Some(ref keyword) => {
                let needle = keyword.to_lowercase();
                name.to_lowercase().contains(&needle) || email.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    /// Returns the keyword as an `ILIKE` pattern with wildcards escaped.
    pub(crate) fn like_pattern(&self) -> Option<String> {
        self.keyword.as_deref().map(|keyword| {
            let mut escaped = String::with_capacity(keyword.len() + 2);
            escaped.push('%');
            for c in keyword.chars() {
                if matches!(c, '\\' | '%' | '_') {
                    escaped.push('\\');
                }
                escaped.push(c);
            }
            escaped.push('%');
            escaped
        })
    }
}

/// Exact-match filters for feedback listings, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackQuery {
    pub customer_id: Option<CustomerId>,
    pub product_id: Option<ProductId>,
}

impl FeedbackQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for one customer's feedback.
    pub fn for_customer(customer_id: CustomerId) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Default::default()
        }
    }

    pub fn customer_id(mut self, id: CustomerId) -> Self {
        self.customer_id = Some(id);
        self
    }

    pub fn product_id(mut self, id: ProductId) -> Self {
        self.product_id = Some(id);
        self
    }

    pub(crate) fn matches(&self, customer_id: CustomerId, product_id: ProductId) -> bool {
        self.customer_id.is_none_or(|id| id == customer_id)
            && self.product_id.is_none_or(|id| id == product_id)
    }
}
