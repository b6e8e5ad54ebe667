use core::str::FromStr;

use stockbook_core::{DomainError, DomainResult};

/// A validated, strictly positive stock quantity.
///
/// Quantity input arrives as free text from a form field. Parsing rejects
/// empty, non-numeric, negative and zero input outright, so a zero-quantity
/// transaction can never be recorded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quantity(u64);

impl Quantity {
    pub fn new(value: u64) -> DomainResult<Self> {
        if value == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::validation("quantity is required"));
        }
        let value: u64 = s.parse().map_err(|_| {
            DomainError::validation(format!("quantity is not a whole number: {s:?}"))
        })?;
        Self::new(value)
    }
}
