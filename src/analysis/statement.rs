// src/analysis/statement.rs

use std::collections::BTreeMap;
use std::path::Path;

use crate::analysis::parser::{parse_statement, Transaction};
use crate::analysis::{AnalysisResult, CategoryTotal, MerchantTotal};
use crate::config::AnalysisSettings;
use crate::error::BackendError;

const OTHER: &str = "Other";

// Checked in order, first match wins.
const CATEGORY_KEYWORDS: [(&str, &[&str]); 5] = [
    ("Food & Dining", &["restaurant", "food", "starbucks", "mcdonald", "pizza", "cafe"]),
    (
        "Gas & Transportation",
        &["gas", "fuel", "shell", "chevron", "exxon", "uber", "lyft"],
    ),
    ("Shopping", &["amazon", "target", "walmart", "store"]),
    ("Entertainment", &["netflix", "spotify", "movie", "entertainment"]),
    ("Healthcare", &["pharmacy", "medical", "doctor", "health"]),
];

/// Analyzes the statement at `path`.
///
/// Files that cannot be parsed, or that contain no transactions, produce
/// sample data with a note in the insights instead of an error. Only a
/// missing file is reported as a failure.
pub fn analyze_statement(path: &Path, settings: &AnalysisSettings) -> Result<AnalysisResult, BackendError> {
    if !path.exists() {
        return Err(BackendError::new("File not found"));
    }

    let transactions = match parse_statement(path) {
        Ok(transactions) => transactions,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "statement parsing failed");
            return Ok(sample_analysis(
                path,
                Some("Could not parse file - showing sample data"),
            ));
        }
    };

    if transactions.is_empty() {
        return Ok(sample_analysis(path, Some("No transactions found in file")));
    }

    Ok(analyze_transactions(transactions, path, settings))
}

pub fn analyze_transactions(
    transactions: Vec<Transaction>,
    path: &Path,
    settings: &AnalysisSettings,
) -> AnalysisResult {
    let total: f64 = transactions.iter().map(|t| t.amount).sum();

    let categorized = categorize_transactions(transactions);
    let categories = category_totals(&categorized, total);
    let merchants = top_merchants(&categorized, settings.top_merchants);
    let insights = generate_insights(&categorized, &categories, path, settings);

    AnalysisResult {
        spending_categories: categories,
        top_merchants: merchants,
        insights,
        monthly_total: total,
        transaction_count: categorized.len(),
    }
}

pub fn categorize_description(description: &str) -> &'static str {
    let lowered = description.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(OTHER)
}

fn categorize_transactions(transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions
        .into_iter()
        .map(|mut tx| {
            tx.category = Some(categorize_description(&tx.description).to_string());
            tx
        })
        .collect()
}

fn category_totals(transactions: &[Transaction], total: f64) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in transactions {
        if let Some(category) = &tx.category {
            *totals.entry(category.as_str()).or_insert(0.0) += tx.amount;
        }
    }

    let mut categories: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            total: amount,
            percentage: if total > 0.0 { amount / total * 100.0 } else { 0.0 },
        })
        .collect();

    categories.sort_by(|a, b| b.total.total_cmp(&a.total));
    categories
}

fn top_merchants(transactions: &[Transaction], limit: usize) -> Vec<MerchantTotal> {
    let mut totals: BTreeMap<String, (f64, u32)> = BTreeMap::new();
    for tx in transactions {
        let entry = totals.entry(merchant_name(&tx.description)).or_insert((0.0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let mut merchants: Vec<MerchantTotal> = totals
        .into_iter()
        .map(|(merchant, (total, count))| MerchantTotal {
            merchant,
            total,
            count,
        })
        .collect();

    merchants.sort_by(|a, b| b.total.total_cmp(&a.total));
    merchants.truncate(limit);
    merchants
}

/// First two words of the description, upper-cased.
pub fn merchant_name(description: &str) -> String {
    description
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn generate_insights(
    transactions: &[Transaction],
    categories: &[CategoryTotal],
    path: &Path,
    settings: &AnalysisSettings,
) -> Vec<String> {
    let mut insights = vec![format!(
        "Successfully analyzed {} transactions from {}",
        transactions.len(),
        file_name(path)
    )];

    if let Some(top) = categories.first() {
        insights.push(format!(
            "Your largest spending category is {} at {:.1}% of total spending",
            top.category, top.percentage
        ));
    }

    let first = transactions.iter().filter_map(|t| t.posted).min();
    let last = transactions.iter().filter_map(|t| t.posted).max();
    if let (Some(first), Some(last)) = (first, last) {
        insights.push(format!(
            "Statement covers {} to {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        ));
    }

    let small: Vec<f64> = transactions
        .iter()
        .map(|t| t.amount)
        .filter(|amount| *amount < settings.small_transaction_threshold)
        .collect();
    if small.len() > settings.small_transaction_min_count {
        insights.push(format!(
            "You have {} small transactions (under ${}) totaling ${:.2}",
            small.len(),
            settings.small_transaction_threshold,
            small.iter().sum::<f64>()
        ));
    }

    insights.push("Consider setting up spending alerts for your top categories".to_string());
    insights
}

/// Placeholder analysis shown when a file yields no usable transactions.
pub fn sample_analysis(path: &Path, note: Option<&str>) -> AnalysisResult {
    let mut insights = vec![format!("File: {}", file_name(path))];
    insights.extend(note.map(str::to_string));
    insights.push("Showing sample data for demonstration".to_string());
    insights.push("Upload a CSV with Date, Description, Amount columns for real analysis".to_string());

    AnalysisResult {
        spending_categories: vec![
            CategoryTotal {
                category: "Food & Dining".to_string(),
                total: 250.50,
                percentage: 35.2,
            },
            CategoryTotal {
                category: "Gas & Transportation".to_string(),
                total: 180.25,
                percentage: 25.3,
            },
        ],
        top_merchants: vec![MerchantTotal {
            merchant: "Sample Data".to_string(),
            total: 85.50,
            count: 12,
        }],
        insights,
        monthly_total: 712.45,
        transaction_count: 0,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
