//! Formatting for AI predictions, insights and backend status

use serde_json::Value;

use crate::ai::{AiInsight, CategorySuggestion, HealthStatus};
use crate::models::{Category, Money};

fn kind_marker(kind: &str) -> &'static str {
    match kind {
        "prediction" => "📈",
        "warning" => "⚠️",
        "recommendation" => "💡",
        "insight" => "🧠",
        _ => "⚡",
    }
}

/// Data keys are shown with underscores replaced by spaces
pub fn format_data_key(key: &str) -> String {
    key.replace('_', " ")
}

/// Numbers under money-like keys are shown as money, everything else verbatim
pub fn format_data_value(key: &str, value: &Value) -> String {
    match value {
        Value::Number(n) => {
            let money_like = key.contains("amount") || key.contains("spending");
            match (money_like, n.as_f64().and_then(Money::from_f64)) {
                (true, Some(money)) => money.to_string(),
                _ => n.to_string(),
            }
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_confidence(insight: &AiInsight) -> String {
    format!("{}%", insight.confidence_percent())
}

/// Format a spending prediction
pub fn format_prediction(prediction: &AiInsight) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} {}\n",
        kind_marker(&prediction.kind),
        prediction.message
    ));

    if let Some(breakdown) = prediction.category_breakdown() {
        output.push_str("\n  Predicted by category:\n");
        for (label, amount) in breakdown {
            let amount = Money::from_f64(amount)
                .map(|m| m.to_string())
                .unwrap_or_else(|| amount.to_string());
            output.push_str(&format!(
                "    {:<24} {:>12}\n",
                Category::from_label(&label).with_icon(),
                amount
            ));
        }
    }

    output.push_str(&format!("\n  Confidence: {}\n", format_confidence(prediction)));
    output
}

/// Format a list of insights
pub fn format_insights(insights: &[AiInsight]) -> String {
    if insights.is_empty() {
        return "No insights available yet.".to_string();
    }

    let mut output = String::new();
    for insight in insights {
        output.push_str(&format!("{} {}\n", kind_marker(&insight.kind), insight.message));
        if let Some(data) = &insight.data {
            for (key, value) in data {
                output.push_str(&format!(
                    "    {}: {}\n",
                    format_data_key(key),
                    format_data_value(key, value)
                ));
            }
        }
        output.push_str(&format!("    AI Confidence: {}\n\n", format_confidence(insight)));
    }
    output
}

pub fn format_suggestion(name: &str, suggestion: &CategorySuggestion) -> String {
    let category = suggestion.category();
    if category.label() == suggestion.suggested_category {
        format!("Suggested category for '{}': {}", name, category.with_icon())
    } else {
        format!(
            "Suggested category for '{}': {} (backend said '{}')",
            name,
            category.with_icon(),
            suggestion.suggested_category
        )
    }
}

pub fn format_health(base_url: &str, health: &HealthStatus) -> String {
    let mut output = format!("AI backend at {}: {}\n", base_url, health.status);
    if let Some(ai) = &health.ai_service_status {
        output.push_str(&format!("  AI service: {}\n", ai));
    }
    if let Some(timestamp) = &health.timestamp {
        output.push_str(&format!("  Checked at: {}\n", timestamp));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn insight(value: Value) -> AiInsight {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_data_formatting() {
        assert_eq!(format_data_key("average_daily_spending"), "average daily spending");
        assert_eq!(format_data_value("total_amount", &json!(1234.5)), "$1,234.50");
        assert_eq!(format_data_value("monthly_spending", &json!(12)), "$12.00");
        assert_eq!(format_data_value("transaction_count", &json!(12)), "12");
        assert_eq!(format_data_value("top_category", &json!("Food")), "Food");
        assert_eq!(format_data_value("flag", &json!(true)), "true");
    }

    #[test]
    fn test_prediction() {
        let prediction = insight(json!({
            "type": "prediction",
            "message": "Next month you will likely spend $1,100",
            "confidence": 0.756,
            "data": {"category_breakdown": {"Food": 300.0, "Housing": 800.0}}
        }));

        let output = format_prediction(&prediction);
        assert!(output.starts_with("📈 Next month"));
        assert!(output.contains("🏠 Housing"));
        assert!(output.contains("$800.00"));
        assert!(output.contains("Confidence: 76%"));
        assert!(output.find("Housing").unwrap() < output.find("Food").unwrap());
    }

    #[test]
    fn test_insights() {
        let insights = vec![insight(json!({
            "type": "warning",
            "message": "Food spending is up",
            "confidence": 0.9,
            "data": {"food_spending": 420, "increase_percent": 35}
        }))];

        let output = format_insights(&insights);
        assert!(output.contains("⚠️ Food spending is up"));
        assert!(output.contains("food spending: $420.00"));
        assert!(output.contains("increase percent: 35"));
        assert!(output.contains("AI Confidence: 90%"));
        assert_eq!(format_insights(&[]), "No insights available yet.");
    }

    #[test]
    fn test_suggestion() {
        let exact = CategorySuggestion {
            suggested_category: "Travel".into(),
        };
        assert_eq!(
            format_suggestion("Flight", &exact),
            "Suggested category for 'Flight': ✈️ Travel"
        );

        let mapped = CategorySuggestion {
            suggested_category: "Snacks".into(),
        };
        assert!(format_suggestion("Chips", &mapped).contains("(backend said 'Snacks')"));
    }
}
