//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::engine::{FinancialSpec, PaybackVerdict, SystemSpec};
use crate::scenario::ScenarioOutcome;

/// Scenario inputs plus headline results.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// Preset name or scenario file path.
    pub source: String,
    /// Array inputs.
    pub system: SystemSpec,
    /// Financial inputs, with the yearly production actually used.
    pub finance: FinancialSpec,
    /// Mean yearly production over the system horizon (kWh).
    pub mean_production_kwh: f64,
    /// Levelized cost of energy (currency/kWh).
    pub lcoe_per_kwh: f64,
    /// First year with non-negative cumulative cash flow.
    pub breakeven_year: Option<u32>,
    /// Payback classification.
    pub verdict: PaybackVerdict,
    /// Cumulative cash flow at the end of the lifetime.
    pub final_cash_flow: f64,
}

impl StateResponse {
    /// Summarises an outcome under the given source label.
    pub fn new(source: &str, outcome: &ScenarioOutcome) -> Self {
        Self {
            source: source.to_string(),
            system: outcome.system.clone(),
            finance: outcome.finance.clone(),
            mean_production_kwh: outcome.production.mean_kwh,
            lcoe_per_kwh: outcome.roi.lcoe_per_kwh,
            breakeven_year: outcome.roi.breakeven_year,
            verdict: outcome.roi.payback_verdict(),
            final_cash_flow: outcome.roi.final_cash_flow(),
        }
    }
}

/// One year of projected production.
#[derive(Debug, Serialize)]
pub struct ProductionRecord {
    /// Year index, starting at 1.
    pub year: u32,
    /// Energy produced that year (kWh).
    pub production_kwh: f64,
}

/// Optional range query parameters for the ledger endpoint.
#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    /// First year (inclusive).
    pub from: Option<u32>,
    /// Last year (inclusive).
    pub to: Option<u32>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
