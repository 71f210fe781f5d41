//! Structured shipping address with field-level validation.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::shared::DomainError;

static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();
static PINCODE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn phone_pattern() -> &'static Regex {
    PHONE_PATTERN.get_or_init(|| {
        // Loose international format: digits with optional leading +,
        // spaces and hyphens allowed inside, 10-15 characters total.
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^\+?[0-9][0-9 \-]{8,13}[0-9]$").unwrap()
    })
}

fn pincode_pattern() -> &'static Regex {
    PINCODE_PATTERN.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[0-9]{4,10}$").unwrap()
    })
}

/// Where a placed order ships to.
///
/// Validation happens before any write occurs; the first violated field
/// short-circuits with its own message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient name, 1-200 characters.
    pub full_name: String,
    /// Contact phone, loose international digit pattern, 10-15 characters.
    pub phone: String,
    /// Street address, 1-500 characters.
    pub address: String,
    /// City, 1-100 characters.
    pub city: String,
    /// State or region, optional, at most 100 characters.
    pub state: Option<String>,
    /// Postal code, 4-10 digits.
    pub pincode: String,
}

impl ShippingAddress {
    /// Validate all fields, reporting the first violation only.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidValue`] naming the first field that
    /// failed its constraint.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.full_name.is_empty() || self.full_name.chars().count() > 200 {
            return Err(DomainError::invalid_value(
                "full_name",
                "must be between 1 and 200 characters",
            ));
        }
        if !phone_pattern().is_match(&self.phone) {
            return Err(DomainError::invalid_value(
                "phone",
                "must be 10-15 digits, optionally starting with +",
            ));
        }
        if self.address.is_empty() || self.address.chars().count() > 500 {
            return Err(DomainError::invalid_value(
                "address",
                "must be between 1 and 500 characters",
            ));
        }
        if self.city.is_empty() || self.city.chars().count() > 100 {
            return Err(DomainError::invalid_value(
                "city",
                "must be between 1 and 100 characters",
            ));
        }
        if let Some(state) = &self.state {
            if state.chars().count() > 100 {
                return Err(DomainError::invalid_value(
                    "state",
                    "must be at most 100 characters",
                ));
            }
        }
        if !pincode_pattern().is_match(&self.pincode) {
            return Err(DomainError::invalid_value(
                "pincode",
                "must be 4 to 10 digits",
            ));
        }
        Ok(())
    }
}
