//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are plain strings on the wire (the persisted layout predates
//! this implementation), wrapped in newtypes so they cannot be mixed up.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a fabric in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FabricId(String);

/// Identifier of an inventory line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

/// Identifier of a recorded stock transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

macro_rules! impl_str_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap an already-known identifier (seed data, persisted state).
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generate a fresh identifier.
            ///
            /// Uses UUIDv7 (time-ordered), so rapid successive calls cannot
            /// collide the way wall-clock strings can.
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            /// Parse untrusted input; empty and all-whitespace input is rejected.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.is_empty() {
                    return Err(DomainError::invalid_id(concat!($name, " cannot be empty")));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_str_id!(FabricId, "FabricId");
impl_str_id!(LineId, "LineId");
impl_str_id!(TransactionId, "TransactionId");
