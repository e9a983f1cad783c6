//! Keyword-based transaction categorization
//!
//! Bank narrations often mix merchant and purpose signals ("UPI-BIGBASKET
//! GROCERIES"), so a description may match several labels at once. Every
//! matching label applies: the result is the sorted set of labels joined
//! with '-', and downstream aggregation counts the transaction toward each
//! one. The rule table is injected rather than hidden module state so it can
//! be swapped or tested in isolation.

use std::collections::BTreeSet;

/// Category returned when no keyword matches
pub const FALLBACK_CATEGORY: &str = "Other";

/// A single keyword -> label mapping
#[derive(Debug, Clone)]
pub struct CategoryRule {
    /// Uppercase substring to search for in the description
    pub keyword: &'static str,
    pub label: &'static str,
}

/// Maps free-text descriptions to category labels via substring matching
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Categorize a description.
    ///
    /// Labels are collected as a set (multiple keywords mapping to the same
    /// label collapse), sorted lexicographically, and joined with '-'.
    /// Returns "Other" when nothing matches.
    pub fn categorize(&self, description: &str) -> String {
        let upper = description.to_uppercase();

        let labels: BTreeSet<&str> = self
            .rules
            .iter()
            .filter(|rule| upper.contains(rule.keyword))
            .map(|rule| rule.label)
            .collect();

        if labels.is_empty() {
            FALLBACK_CATEGORY.to_string()
        } else {
            labels.into_iter().collect::<Vec<_>>().join("-")
        }
    }

    /// Distinct labels known to this categorizer, sorted
    pub fn labels(&self) -> Vec<&'static str> {
        let set: BTreeSet<&str> = self.rules.iter().map(|r| r.label).collect();
        set.into_iter().collect()
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(vec![
            CategoryRule { keyword: "SALARY", label: "SALARY" },
            CategoryRule { keyword: "PAYROLL", label: "SALARY" },
            CategoryRule { keyword: "ATM", label: "CASH WITHDRAWAL" },
            CategoryRule { keyword: "CASH WDL", label: "CASH WITHDRAWAL" },
            CategoryRule { keyword: "RENT", label: "RENT" },
            CategoryRule { keyword: "GROCERY", label: "GROCERY SHOPPING" },
            CategoryRule { keyword: "BIGBASKET", label: "GROCERY SHOPPING" },
            CategoryRule { keyword: "SUPERMARKET", label: "GROCERY SHOPPING" },
            CategoryRule { keyword: "RESTAURANT", label: "FOOD" },
            CategoryRule { keyword: "SWIGGY", label: "FOOD" },
            CategoryRule { keyword: "ZOMATO", label: "FOOD" },
            CategoryRule { keyword: "FOOD", label: "FOOD" },
            CategoryRule { keyword: "CAFE", label: "FOOD" },
            CategoryRule { keyword: "UBER", label: "TRAVEL" },
            CategoryRule { keyword: "OLA", label: "TRAVEL" },
            CategoryRule { keyword: "IRCTC", label: "TRAVEL" },
            CategoryRule { keyword: "AIRLINES", label: "TRAVEL" },
            CategoryRule { keyword: "PETROL", label: "FUEL" },
            CategoryRule { keyword: "FUEL", label: "FUEL" },
            CategoryRule { keyword: "ELECTRICITY", label: "UTILITIES" },
            CategoryRule { keyword: "POWER", label: "UTILITIES" },
            CategoryRule { keyword: "WATER BILL", label: "UTILITIES" },
            CategoryRule { keyword: "BROADBAND", label: "UTILITIES" },
            CategoryRule { keyword: "RECHARGE", label: "UTILITIES" },
            CategoryRule { keyword: "NETFLIX", label: "ENTERTAINMENT" },
            CategoryRule { keyword: "SPOTIFY", label: "ENTERTAINMENT" },
            CategoryRule { keyword: "PRIME VIDEO", label: "ENTERTAINMENT" },
            CategoryRule { keyword: "HOTSTAR", label: "ENTERTAINMENT" },
            CategoryRule { keyword: "AMAZON", label: "SHOPPING" },
            CategoryRule { keyword: "FLIPKART", label: "SHOPPING" },
            CategoryRule { keyword: "MYNTRA", label: "SHOPPING" },
            CategoryRule { keyword: "PHARMACY", label: "HEALTH" },
            CategoryRule { keyword: "HOSPITAL", label: "HEALTH" },
            CategoryRule { keyword: "CLINIC", label: "HEALTH" },
            CategoryRule { keyword: "INSURANCE", label: "INSURANCE" },
            CategoryRule { keyword: "PREMIUM", label: "INSURANCE" },
            CategoryRule { keyword: "MUTUAL FUND", label: "INVESTMENT" },
            CategoryRule { keyword: "SIP", label: "INVESTMENT" },
            CategoryRule { keyword: "ZERODHA", label: "INVESTMENT" },
            CategoryRule { keyword: "INTEREST", label: "INTEREST" },
            CategoryRule { keyword: "EMI", label: "LOAN" },
            CategoryRule { keyword: "LOAN", label: "LOAN" },
        ])
    }
}
