//! Request and response bodies for the AI backend

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{Budget, Category, Expense};

/// Response of `GET /expenses/categorize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub suggested_category: String,
}

impl CategorySuggestion {
    /// The suggestion mapped onto the known set; unknown labels become Other
    pub fn category(&self) -> Category {
        Category::from_suggestion(&self.suggested_category)
    }
}

/// A prediction or insight produced by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsight {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Nominally 0.0..=1.0; rendered as received
    pub confidence: f64,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl AiInsight {
    /// Confidence as a whole-number percentage
    pub fn confidence_percent(&self) -> i64 {
        (self.confidence * 100.0).round() as i64
    }

    /// `data.category_breakdown` as (label, amount), largest first
    ///
    /// Non-numeric entries are ignored.
    pub fn category_breakdown(&self) -> Option<Vec<(String, f64)>> {
        let breakdown = self.data.as_ref()?.get("category_breakdown")?.as_object()?;
        let mut entries: Vec<(String, f64)> = breakdown
            .iter()
            .filter_map(|(label, value)| value.as_f64().map(|v| (label.clone(), v)))
            .collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Some(entries)
    }
}

/// Body of the POST endpoints that take the expense list
#[derive(Debug, Serialize)]
pub struct ExpenseListRequest<'a> {
    pub expenses: &'a [Expense],
}

/// Body of `POST /budget/alerts`
#[derive(Debug, Serialize)]
pub struct BudgetAlertRequest<'a> {
    pub expenses: &'a [Expense],
    pub budgets: &'a [Budget],
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub ai_service_status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}
