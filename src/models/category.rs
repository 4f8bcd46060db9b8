//! Expense categories
//!
//! The category set is closed: twelve labels, each with a display icon. Data
//! written by other tools may carry labels outside the set; those are kept
//! verbatim as [`Category::Custom`] so nothing is lost on a load/save cycle.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Icon shown for labels outside the known set
pub const FALLBACK_ICON: &str = "📦";

/// A classification label for expenses and budgets
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Transportation,
    Bills,
    Entertainment,
    Housing,
    Groceries,
    Health,
    Education,
    PersonalCare,
    Savings,
    Travel,
    Other,
    /// A label outside the known set, loaded from existing data
    Custom(String),
}

impl Category {
    /// All known categories in display order
    pub const ALL: [Category; 12] = [
        Category::Food,
        Category::Transportation,
        Category::Bills,
        Category::Entertainment,
        Category::Housing,
        Category::Groceries,
        Category::Health,
        Category::Education,
        Category::PersonalCare,
        Category::Savings,
        Category::Travel,
        Category::Other,
    ];

    /// The display label
    pub fn label(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Bills => "Bills",
            Self::Entertainment => "Entertainment",
            Self::Housing => "Housing",
            Self::Groceries => "Groceries",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::PersonalCare => "Personal Care",
            Self::Savings => "Savings",
            Self::Travel => "Travel",
            Self::Other => "Other",
            Self::Custom(label) => label,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍽️",
            Self::Transportation => "🚗",
            Self::Bills => "📋",
            Self::Entertainment => "🎬",
            Self::Housing => "🏠",
            Self::Groceries => "🛒",
            Self::Health => "💊",
            Self::Education => "📚",
            Self::PersonalCare => "🧴",
            Self::Savings => "💰",
            Self::Travel => "✈️",
            Self::Other => "📦",
            Self::Custom(_) => FALLBACK_ICON,
        }
    }

    /// Whether this is one of the twelve known categories
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Look up a known category by label, ignoring case and surrounding space
    pub fn known(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .cloned()
    }

    /// Resolve a label, keeping unknown ones verbatim
    pub fn from_label(label: &str) -> Self {
        Self::known(label).unwrap_or_else(|| Self::Custom(label.to_string()))
    }

    /// Map an AI-suggested label onto the known set, falling back to Other
    pub fn from_suggestion(label: &str) -> Self {
        Self::known(label).unwrap_or(Self::Other)
    }

    /// Whether two categories name the same thing
    ///
    /// Custom labels compare trimmed and case-insensitively, so a file
    /// carrying both "pets" and "Pets" yields one budget.
    pub fn same_as(&self, other: &Category) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => a.trim().to_lowercase() == b.trim().to_lowercase(),
            _ => self == other,
        }
    }

    /// Label with its icon prefix, e.g. "🍽️ Food"
    pub fn with_icon(&self) -> String {
        format!("{} {}", self.icon(), self.label())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Parse a user-supplied category; only known labels are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::known(s).ok_or_else(|| {
            let valid: Vec<String> = Self::ALL.iter().map(|c| c.label().to_string()).collect();
            format!(
                "Unknown category '{}'. Valid categories: {}",
                s.trim(),
                valid.join(", ")
            )
        })
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_lookup_is_case_insensitive() {
        assert_eq!(Category::known("personal care"), Some(Category::PersonalCare));
        assert_eq!(Category::known(" FOOD "), Some(Category::Food));
        assert_eq!(Category::known("Pets"), None);
    }

    #[test]
    fn test_custom_label_round_trips() {
        let cat: Category = serde_json::from_str("\"Pets\"").unwrap();
        assert_eq!(cat, Category::Custom("Pets".into()));
        assert_eq!(cat.icon(), FALLBACK_ICON);
        assert_eq!(serde_json::to_string(&cat).unwrap(), "\"Pets\"");
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!("travel".parse::<Category>().unwrap(), Category::Travel);
        let err = "Pets".parse::<Category>().unwrap_err();
        assert!(err.contains("Personal Care"));
    }

    #[test]
    fn test_suggestion_falls_back_to_other() {
        assert_eq!(Category::from_suggestion("Groceries"), Category::Groceries);
        assert_eq!(Category::from_suggestion("Gadgets"), Category::Other);
    }

    #[test]
    fn test_same_as_ignores_custom_case() {
        let pets = Category::Custom("Pets".into());
        assert!(pets.same_as(&Category::Custom("pets".into())));
        assert!(pets.same_as(&Category::Custom(" PETS ".into())));
        assert!(!pets.same_as(&Category::Custom("Pet".into())));
        assert!(Category::Food.same_as(&Category::Food));
        assert!(!Category::Food.same_as(&Category::Custom("Food court".into())));
    }

    #[test]
    fn test_icons() {
        assert_eq!(Category::Food.with_icon(), "🍽️ Food");
        assert_eq!(Category::Travel.icon(), "✈️");
        assert!(Category::ALL.iter().all(|c| c.is_known()));
    }
}
