//! Customer input types, validation, and the aggregated view.

use common::CustomerId;
use entity_store::Customer;
use serde::Serialize;

use crate::error::{DomainError, Result, check_length};
use crate::feedback::FeedbackByProduct;

/// Fields for a new customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Field update set for a customer.
///
/// Only fields that are `Some` are validated and written; absent fields keep
/// their stored value. An empty phone clears the stored phone.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Names of the fields present in this update.
    pub fn fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("email", self.email.is_some()),
            ("phone", self.phone.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| present.then_some(field))
        .collect()
    }

    /// Validates the present fields and writes them onto `customer`.
    ///
    /// Nothing is written if any present field is invalid.
    pub(crate) fn apply_to(self, customer: &mut Customer) -> Result<()> {
        let name = self.name.as_deref().map(validate_name).transpose()?;
        let email = self.email.as_deref().map(validate_email).transpose()?;
        let phone = self.phone.map(|p| normalize_phone(Some(p))).transpose()?;

        if let Some(name) = name {
            customer.name = name;
        }
        if let Some(email) = email {
            customer.email = email;
        }
        if let Some(phone) = phone {
            customer.phone = phone;
        }
        Ok(())
    }
}

/// A customer's profile together with their feedback grouped by product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerView {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub feedbacks: Vec<FeedbackByProduct>,
}

impl CustomerView {
    pub(crate) fn new(customer: Customer, feedbacks: Vec<FeedbackByProduct>) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            feedbacks,
        }
    }
}

/// Column limits of the `customers` table, in characters.
const MAX_NAME_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 255;
const MAX_PHONE_LEN: usize = 50;

pub(crate) fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("name is required".to_string()));
    }
    check_length("name", name, MAX_NAME_LEN)?;
    Ok(name.to_string())
}

pub(crate) fn validate_email(email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(DomainError::Validation("email is required".to_string()));
    }
    check_length("email", email, MAX_EMAIL_LEN)?;
    if !is_valid_email(email) {
        return Err(DomainError::Validation(format!(
            "email '{email}' is not a valid address"
        )));
    }
    Ok(email.to_string())
}

/// Trims the phone; blank means absent.
pub(crate) fn normalize_phone(phone: Option<String>) -> Result<Option<String>> {
    let phone = phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());
    if let Some(phone) = &phone {
        check_length("phone", phone, MAX_PHONE_LEN)?;
    }
    Ok(phone)
}

/// Syntactic check for `local@domain.tld` addresses.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.len() > 255 {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~.".contains(c));
    if !local_ok {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn ann() -> Customer {
        let now = Utc::now();
        Customer {
            id: CustomerId::new(),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            phone: Some("111".to_string()),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn accepts_ordinary_addresses() {
        for email in [
            "ann@x.com",
            "first.last@example.co.uk",
            "user+tag@sub-domain.example.org",
        ] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "plainaddress",
            "@x.com",
            "ann@",
            "ann@localhost",
            "ann@@x.com",
            "an n@x.com",
            "ann@x..com",
            ".ann@x.com",
            "ann@-x.com",
        ] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn validate_email_trims_and_requires_value() {
        assert_eq!(validate_email("  ann@x.com ").unwrap(), "ann@x.com");
        assert!(matches!(
            validate_email("   "),
            Err(DomainError::Validation(msg)) if msg == "email is required"
        ));
    }

    #[test]
    fn phone_only_update_leaves_name_and_email() {
        let mut customer = ann();
        CustomerUpdate::new()
            .phone("555")
            .apply_to(&mut customer)
            .unwrap();

        assert_eq!(customer.name, "Ann");
        assert_eq!(customer.email, "ann@x.com");
        assert_eq!(customer.phone.as_deref(), Some("555"));
    }

    #[test]
    fn invalid_field_leaves_customer_untouched() {
        let mut customer = ann();
        let before = customer.clone();

        let result = CustomerUpdate::new()
            .name("Annabel")
            .email("not-an-email")
            .apply_to(&mut customer);

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(customer, before);
    }

    #[test]
    fn empty_phone_clears_it() {
        let mut customer = ann();
        CustomerUpdate::new()
            .phone("  ")
            .apply_to(&mut customer)
            .unwrap();
        assert_eq!(customer.phone, None);
    }

    #[test]
    fn over_length_fields_are_validation_errors() {
        let long_name = "n".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            validate_name(&long_name),
            Err(DomainError::Validation(msg)) if msg.contains("at most 255")
        ));
        assert!(validate_name(&"n".repeat(MAX_NAME_LEN)).is_ok());

        let long_email = format!("{}@{}.com", "a".repeat(64), vec!["d".repeat(60); 4].join("."));
        assert!(is_valid_email(&long_email));
        assert!(matches!(
            validate_email(&long_email),
            Err(DomainError::Validation(_))
        ));

        let mut customer = ann();
        let before = customer.clone();
        let result = CustomerUpdate::new()
            .phone("5".repeat(MAX_PHONE_LEN + 1))
            .apply_to(&mut customer);
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(customer, before);
    }

    #[test]
    fn fields_lists_present_fields() {
        let update = CustomerUpdate::new().email("a@b.co").phone("1");
        assert_eq!(update.fields(), ["email", "phone"]);
        assert!(CustomerUpdate::new().fields().is_empty());
    }
}
