//! Data models for the analytics panel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Comprehensive,
    Spending,
    Savings,
    Portfolio,
}

impl AnalysisKind {
    /// Map the request's free-form analysis type onto a kind, defaulting to
    /// comprehensive for anything unrecognized.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "spending" => AnalysisKind::Spending,
            "savings" => AnalysisKind::Savings,
            "portfolio" | "investment" => AnalysisKind::Portfolio,
            _ => AnalysisKind::Comprehensive,
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalysisKind::Comprehensive => "comprehensive",
            AnalysisKind::Spending => "spending",
            AnalysisKind::Savings => "savings",
            AnalysisKind::Portfolio => "portfolio",
        };
        write!(f, "{}", s)
    }
}

//
// ================= Spending =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub confidence_level: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingForecast {
    /// Point estimate for next month's spending
    pub next_month: f64,
    pub interval: ConfidenceInterval,
}

//
// ================= Savings =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsHorizon {
    pub years: u32,
    pub future_value: f64,
    pub total_contributions: f64,
    pub interest_earned: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsProjection {
    pub starting_balance: f64,
    pub monthly_contribution: f64,
    pub annual_return_rate: f64,
    pub horizons: Vec<SavingsHorizon>,
}

//
// ================= Portfolio =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioAllocation {
    pub stocks_pct: u32,
    pub bonds_pct: u32,
    pub cash_pct: u32,
    pub risk_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub market_status: String,
    pub sp500_change: String,
    pub nasdaq_change: String,
    pub treasury_yield: String,
    pub inflation_rate: String,
    pub fed_rate: String,
}

//
// ================= Result =================
//

/// What the analytics panel renders. Sections are populated per kind;
/// a spending-only analysis carries no savings or portfolio data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub kind: AnalysisKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spending: Option<SpendingForecast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<SavingsProjection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation: Option<PortfolioAllocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketSnapshot>,
    pub insights: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analysis_kind() {
        assert_eq!(AnalysisKind::parse("spending"), AnalysisKind::Spending);
        assert_eq!(AnalysisKind::parse("SAVINGS"), AnalysisKind::Savings);
        assert_eq!(AnalysisKind::parse("investment"), AnalysisKind::Portfolio);
        assert_eq!(AnalysisKind::parse("comprehensive"), AnalysisKind::Comprehensive);
        assert_eq!(AnalysisKind::parse("anything else"), AnalysisKind::Comprehensive);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in [
            AnalysisKind::Comprehensive,
            AnalysisKind::Spending,
            AnalysisKind::Savings,
            AnalysisKind::Portfolio,
        ] {
            assert_eq!(AnalysisKind::parse(&kind.to_string()), kind);
        }
    }
}
