// src/ui/render.rs
use crate::analysis::{AnalysisResult, CategoryTotal, MerchantTotal};
use crate::state::ResultsView;

/// Builds the display text for an analysis. Pure: the same input always
/// produces the same view, and nothing from a previous view is kept.
pub fn render(result: &AnalysisResult) -> ResultsView {
    ResultsView {
        summary: summary_line(result),
        categories: result.spending_categories.iter().map(category_line).collect(),
        category_shares: result
            .spending_categories
            .iter()
            .map(|c| (c.category.clone(), c.percentage))
            .collect(),
        merchants: result.top_merchants.iter().map(merchant_line).collect(),
        insights: result.insights.clone(),
    }
}

pub fn category_line(category: &CategoryTotal) -> String {
    format!(
        "{} — ${:.2} ({:.1}%)",
        category.category, category.total, category.percentage
    )
}

pub fn merchant_line(merchant: &MerchantTotal) -> String {
    format!(
        "{} — ${:.2} ({} transactions)",
        merchant.merchant, merchant.total, merchant.count
    )
}

fn summary_line(result: &AnalysisResult) -> Option<String> {
    if result.transaction_count == 0 {
        return None;
    }
    Some(format!(
        "{} transactions, ${:.2} total",
        result.transaction_count, result.monthly_total
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groceries() -> AnalysisResult {
        AnalysisResult {
            spending_categories: vec![CategoryTotal {
                category: "Groceries".into(),
                total: 123.456,
                percentage: 12.34,
            }],
            top_merchants: vec![MerchantTotal {
                merchant: "Store A".into(),
                total: 50.0,
                count: 3,
            }],
            insights: vec!["Reduce dining out".into()],
            monthly_total: 0.0,
            transaction_count: 0,
        }
    }

    #[test]
    fn formats_money_and_percentages() {
        let view = render(&groceries());
        assert_eq!(view.categories, vec!["Groceries — $123.46 (12.3%)"]);
        assert_eq!(view.merchants, vec!["Store A — $50.00 (3 transactions)"]);
        assert_eq!(view.insights, vec!["Reduce dining out"]);
        assert_eq!(view.summary, None);
    }

    #[test]
    fn rendering_twice_is_identical() {
        let result = groceries();
        let first = render(&result);
        let second = render(&result);
        assert_eq!(first, second);
        assert_eq!(second.categories.len(), 1);
    }

    #[test]
    fn summary_only_for_real_transactions() {
        let mut result = groceries();
        result.transaction_count = 4;
        result.monthly_total = 81.5;
        assert_eq!(
            render(&result).summary.as_deref(),
            Some("4 transactions, $81.50 total")
        );
    }
}
