//! Blocking HTTP client for the AI backend
//!
//! One request per call, no retries. Failures are logged and surfaced as
//! `ExpenseError::Api`.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, Expense, Money};
use crate::reports::{BudgetAlert, ExpenseAnalytics};

use super::types::{
    AiInsight, BudgetAlertRequest, CategorySuggestion, ExpenseListRequest, HealthStatus,
};

/// Client for the expense AI backend
pub struct AiClient {
    base_url: String,
    http: Client,
}

impl AiClient {
    /// Create a client for `base_url` (including the `/api` prefix)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ExpenseResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExpenseError::Api(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Create a client from user settings, honouring `EXPENSE_API_URL`
    pub fn from_settings(settings: &Settings) -> ExpenseResult<Self> {
        Self::new(
            settings.effective_api_url(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ask the backend which category fits an expense
    pub fn categorize(&self, name: &str, amount: Money) -> ExpenseResult<CategorySuggestion> {
        let request = self
            .http
            .get(self.url("/expenses/categorize"))
            .query(&[
                ("expense_name", name.to_string()),
                ("amount", amount.as_f64().to_string()),
            ]);
        self.send("categorize", request)
    }

    /// Predict next month's spending
    pub fn predict(&self, expenses: &[Expense]) -> ExpenseResult<AiInsight> {
        require_expenses(expenses, "predictions")?;
        let request = self
            .http
            .post(self.url("/expenses/predict"))
            .json(&ExpenseListRequest { expenses });
        self.send("predict", request)
    }

    /// Natural-language observations about spending
    pub fn insights(&self, expenses: &[Expense]) -> ExpenseResult<Vec<AiInsight>> {
        require_expenses(expenses, "insights")?;
        let request = self
            .http
            .post(self.url("/expenses/insights"))
            .json(&ExpenseListRequest { expenses });
        self.send("insights", request)
    }

    /// Server-side analytics over the expense list
    pub fn analytics(&self, expenses: &[Expense]) -> ExpenseResult<ExpenseAnalytics> {
        let request = self
            .http
            .post(self.url("/expenses/analytics"))
            .json(&ExpenseListRequest { expenses });
        self.send("analytics", request)
    }

    /// Server-side budget alerts for the current month
    pub fn budget_alerts(
        &self,
        expenses: &[Expense],
        budgets: &[Budget],
    ) -> ExpenseResult<Vec<BudgetAlert>> {
        let request = self
            .http
            .post(self.url("/budget/alerts"))
            .json(&BudgetAlertRequest { expenses, budgets });
        self.send("budget alerts", request)
    }

    pub fn health(&self) -> ExpenseResult<HealthStatus> {
        let request = self.http.get(self.url("/health"));
        self.send("health", request)
    }

    fn send<T: DeserializeOwned>(&self, operation: &str, request: RequestBuilder) -> ExpenseResult<T> {
        tracing::debug!(operation, base_url = %self.base_url, "calling AI backend");

        let result = request
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json::<T>());

        result.map_err(|e| {
            tracing::warn!(operation, error = %e, "AI backend request failed");
            ExpenseError::from(e)
        })
    }
}

fn require_expenses(expenses: &[Expense], what: &str) -> ExpenseResult<()> {
    if expenses.is_empty() {
        return Err(ExpenseError::Validation(format!(
            "Add some expenses to get {}",
            what
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_client() -> AiClient {
        // Port 9 (discard) on localhost is closed on test machines
        AiClient::new("http://127.0.0.1:9/api/", Duration::from_millis(500)).unwrap()
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = unreachable_client();
        assert_eq!(client.base_url(), "http://127.0.0.1:9/api");
        assert_eq!(client.url("/health"), "http://127.0.0.1:9/api/health");
    }

    #[test]
    fn test_from_settings_uses_timeout_and_url() {
        let mut settings = Settings::default();
        settings.api_base_url = "http://example.invalid/api".into();
        let client = AiClient::from_settings(&settings).unwrap();
        if std::env::var(crate::config::settings::API_URL_ENV).is_err() {
            assert_eq!(client.base_url(), "http://example.invalid/api");
        }
    }

    #[test]
    fn test_predict_requires_expenses() {
        let client = unreachable_client();
        let err = client.predict(&[]).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: Add some expenses to get predictions"
        );
        assert!(client.insights(&[]).unwrap_err().is_validation());
    }

    #[test]
    fn test_unreachable_backend_is_api_error() {
        let client = unreachable_client();
        let err = client.health().unwrap_err();
        assert!(matches!(err, ExpenseError::Api(_)));
        assert!(err.to_string().starts_with("AI service request failed"));
    }
}
