//! Record identifiers for expenses and budgets
//!
//! Ids are opaque strings on disk so imported data with foreign ids loads
//! unchanged. Freshly generated ids are `<unix-millis>-<8 hex chars>`, which
//! keeps them sortable by creation time and unique within a millisecond.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generate a timestamp-derived unique id string
fn generate() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", millis, &suffix[..8])
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new unique ID
            pub fn new() -> Self {
                Self(generate())
            }

            /// Get the raw id string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

define_id!(ExpenseId);
define_id!(BudgetId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_shape() {
        let id = ExpenseId::new();
        let (millis, suffix) = id.as_str().split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_ids_unique() {
        let ids: std::collections::HashSet<_> = (0..500).map(|_| BudgetId::new()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_foreign_ids_accepted() {
        let id: ExpenseId = serde_json::from_str("\"1705312345678\"").unwrap();
        assert_eq!(id.as_str(), "1705312345678");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1705312345678\"");
    }
}
