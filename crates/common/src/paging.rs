/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 10;

/// A normalized limit/offset window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

impl Pagination {
    /// Creates a window with explicit values.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Normalizes raw request values.
    ///
    /// A missing or non-positive limit falls back to [`DEFAULT_LIMIT`];
    /// a missing or negative offset starts at the beginning.
    pub fn from_request(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = match limit {
            Some(l) if l > 0 => l as usize,
            _ => DEFAULT_LIMIT,
        };
        let offset = offset.filter(|o| *o > 0).unwrap_or(0) as usize;
        Self { limit, offset }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_uses_default() {
        assert_eq!(
            Pagination::from_request(Some(0), None),
            Pagination::from_request(Some(10), None)
        );
    }

    #[test]
    fn negative_values_are_normalized() {
        let page = Pagination::from_request(Some(-5), Some(-3));
        assert_eq!(page.limit, DEFAULT_LIMIT);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn explicit_values_are_kept() {
        let page = Pagination::from_request(Some(25), Some(50));
        assert_eq!(page, Pagination::new(25, 50));
    }

    #[test]
    fn missing_values_use_defaults() {
        assert_eq!(Pagination::from_request(None, None), Pagination::default());
    }
}
