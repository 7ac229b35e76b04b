//! Analytics generator
//!
//! Produces the projection objects shown in the dashboard's analysis panel.
//! The production implementation is display-only: every figure comes from a
//! precomputed literal table, and the delay exists purely to drive the
//! panel's loading spinner. No user transaction data is consulted.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

use crate::models::{
    AnalysisKind, AnalysisResult, ConfidenceInterval, MarketSnapshot, PortfolioAllocation,
    SavingsHorizon, SavingsProjection, SpendingForecast,
};
use crate::Result;

/// Simulated computation time before results appear
pub const ANALYSIS_DELAY: Duration = Duration::from_millis(1500);

/// Trait for analysis generation. The seam exists so a real engine could be
/// swapped in without touching the panel or the API layer.
#[async_trait]
pub trait AnalyticsEngine: Send + Sync {
    async fn run_analysis(&self, kind: AnalysisKind) -> Result<AnalysisResult>;
}

//
// ================= Literal tables =================
//

const SPENDING_POINT_ESTIMATE: f64 = 2_340.0;
const SPENDING_INTERVAL: (f64, f64) = (2_150.0, 2_540.0);
const SPENDING_CONFIDENCE_LEVEL: f64 = 0.95;

const SAVINGS_STARTING_BALANCE: f64 = 10_000.0;
const SAVINGS_MONTHLY_CONTRIBUTION: f64 = 500.0;
const SAVINGS_ANNUAL_RETURN: f64 = 0.07;

/// Compound-growth rows for the fixed horizons, precomputed for a $10,000
/// balance with $500/month at 7% annual return.
const SAVINGS_GROWTH_TABLE: &[SavingsHorizon] = &[
    SavingsHorizon {
        years: 1,
        future_value: 16_920.0,
        total_contributions: 6_000.0,
        interest_earned: 920.0,
    },
    SavingsHorizon {
        years: 5,
        future_value: 49_970.0,
        total_contributions: 30_000.0,
        interest_earned: 9_970.0,
    },
];

const INSIGHTS: &[&str] = &[
    "Your projected spending is trending about 2% above last month, driven mostly by dining and subscriptions.",
    "Raising your monthly savings by $150 would put your 5-year goal within reach.",
    "A 60/30/10 stock/bond/cash allocation matches a moderate risk profile; rebalance once a year.",
];

fn spending_forecast() -> SpendingForecast {
    SpendingForecast {
        next_month: SPENDING_POINT_ESTIMATE,
        interval: ConfidenceInterval {
            lower: SPENDING_INTERVAL.0,
            upper: SPENDING_INTERVAL.1,
            confidence_level: SPENDING_CONFIDENCE_LEVEL,
        },
    }
}

fn savings_projection() -> SavingsProjection {
    SavingsProjection {
        starting_balance: SAVINGS_STARTING_BALANCE,
        monthly_contribution: SAVINGS_MONTHLY_CONTRIBUTION,
        annual_return_rate: SAVINGS_ANNUAL_RETURN,
        horizons: SAVINGS_GROWTH_TABLE.to_vec(),
    }
}

fn portfolio_allocation() -> PortfolioAllocation {
    PortfolioAllocation {
        stocks_pct: 60,
        bonds_pct: 30,
        cash_pct: 10,
        risk_level: "moderate".to_string(),
    }
}

fn market_snapshot() -> MarketSnapshot {
    MarketSnapshot {
        market_status: "Bull Market".to_string(),
        sp500_change: "+0.5%".to_string(),
        nasdaq_change: "+0.8%".to_string(),
        treasury_yield: "4.2%".to_string(),
        inflation_rate: "3.1%".to_string(),
        fed_rate: "5.25%".to_string(),
    }
}

//
// ================= Mock engine =================
//

/// Display-only analytics implementation backed by the literal tables
pub struct MockAnalyticsEngine {
    delay: Duration,
}

impl MockAnalyticsEngine {
    pub fn new() -> Self {
        Self {
            delay: ANALYSIS_DELAY,
        }
    }

    /// Override the spinner delay; tests use zero
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockAnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsEngine for MockAnalyticsEngine {
    async fn run_analysis(&self, kind: AnalysisKind) -> Result<AnalysisResult> {
        sleep(self.delay).await;

        let result = match kind {
            AnalysisKind::Comprehensive => AnalysisResult {
                kind,
                spending: Some(spending_forecast()),
                savings: Some(savings_projection()),
                allocation: Some(portfolio_allocation()),
                market: Some(market_snapshot()),
                insights: INSIGHTS.iter().map(|s| s.to_string()).collect(),
                generated_at: Utc::now(),
            },
            AnalysisKind::Spending => AnalysisResult {
                kind,
                spending: Some(spending_forecast()),
                savings: None,
                allocation: None,
                market: None,
                insights: vec![INSIGHTS[0].to_string()],
                generated_at: Utc::now(),
            },
            AnalysisKind::Savings => AnalysisResult {
                kind,
                spending: None,
                savings: Some(savings_projection()),
                allocation: None,
                market: None,
                insights: vec![INSIGHTS[1].to_string()],
                generated_at: Utc::now(),
            },
            AnalysisKind::Portfolio => AnalysisResult {
                kind,
                spending: None,
                savings: None,
                allocation: Some(portfolio_allocation()),
                market: Some(market_snapshot()),
                insights: vec![INSIGHTS[2].to_string()],
                generated_at: Utc::now(),
            },
        };

        info!(kind = %kind, "Analysis generated");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisorError;

    fn instant_engine() -> MockAnalyticsEngine {
        MockAnalyticsEngine::with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_comprehensive_populates_every_section() {
        let result = instant_engine()
            .run_analysis(AnalysisKind::Comprehensive)
            .await
            .expect("mock analysis should succeed");

        assert!(result.spending.is_some());
        assert!(result.savings.is_some());
        assert!(result.allocation.is_some());
        assert!(result.market.is_some());
        assert_eq!(result.insights.len(), INSIGHTS.len());
    }

    #[tokio::test]
    async fn test_spending_kind_is_spending_only() {
        let result = instant_engine()
            .run_analysis(AnalysisKind::Spending)
            .await
            .expect("mock analysis should succeed");

        let spending = result.spending.expect("spending section");
        assert_eq!(spending.next_month, SPENDING_POINT_ESTIMATE);
        assert!(spending.interval.lower < spending.next_month);
        assert!(spending.interval.upper > spending.next_month);
        assert!(result.savings.is_none());
        assert!(result.allocation.is_none());
    }

    #[tokio::test]
    async fn test_savings_table_covers_fixed_horizons() {
        let result = instant_engine()
            .run_analysis(AnalysisKind::Savings)
            .await
            .expect("mock analysis should succeed");

        let savings = result.savings.expect("savings section");
        let years: Vec<u32> = savings.horizons.iter().map(|h| h.years).collect();
        assert_eq!(years, vec![1, 5]);

        for horizon in &savings.horizons {
            assert_eq!(
                horizon.interest_earned,
                horizon.future_value - SAVINGS_STARTING_BALANCE - horizon.total_contributions
            );
        }
    }

    #[tokio::test]
    async fn test_results_are_stable_across_runs() {
        let engine = instant_engine();
        let first = engine
            .run_analysis(AnalysisKind::Portfolio)
            .await
            .expect("mock analysis should succeed");
        let second = engine
            .run_analysis(AnalysisKind::Portfolio)
            .await
            .expect("mock analysis should succeed");

        let a = first.allocation.expect("allocation section");
        let b = second.allocation.expect("allocation section");
        assert_eq!(
            (a.stocks_pct, a.bonds_pct, a.cash_pct),
            (b.stocks_pct, b.bonds_pct, b.cash_pct)
        );
    }

    /// Engine that fails at the simulated-delay step, for the error path
    struct FailingEngine;

    #[async_trait]
    impl AnalyticsEngine for FailingEngine {
        async fn run_analysis(&self, _kind: AnalysisKind) -> Result<AnalysisResult> {
            Err(AdvisorError::AnalysisError(
                "simulated delay failed".to_string(),
            ))
        }
    }

    #[tokio::test]
    async fn test_failures_surface_as_analysis_errors() {
        let err = FailingEngine
            .run_analysis(AnalysisKind::Comprehensive)
            .await
            .expect_err("failing engine should error");
        assert!(err.to_string().contains("Analysis error"));
    }
}
