//! Year-by-year cash flow, levelized cost of energy, and break-even detection.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::error::{EngineError, ensure_finite, ensure_non_negative, ensure_years};

/// Economic inputs for the ROI projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSpec {
    /// Up-front system cost (currency).
    pub initial_investment: f64,
    /// Grid electricity price in year 1 (currency/kWh).
    pub grid_price_per_kwh: f64,
    /// PV energy produced each year (kWh).
    pub yearly_production_kwh: f64,
    /// Annual grid price inflation as a fraction (0.02 = 2 %).
    pub price_inflation: f64,
    /// Yearly maintenance cost (currency/year).
    pub yearly_maintenance: f64,
    /// System lifetime (years).
    pub lifetime_years: u32,
}

impl FinancialSpec {
    /// Checks every field against its domain.
    ///
    /// Zero production passes here and is reported as
    /// [`EngineError::DivisionByZero`] by [`project_roi`].
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        ensure_non_negative("initial_investment", self.initial_investment)?;
        ensure_non_negative("grid_price_per_kwh", self.grid_price_per_kwh)?;
        ensure_non_negative("yearly_production_kwh", self.yearly_production_kwh)?;
        ensure_finite("price_inflation", self.price_inflation)?;
        if self.price_inflation <= -1.0 {
            return Err(EngineError::invalid(
                "price_inflation",
                format!("must be > -1, got {}", self.price_inflation),
            ));
        }
        ensure_non_negative("yearly_maintenance", self.yearly_maintenance)?;
        ensure_years("lifetime_years", self.lifetime_years)?;
        Ok(())
    }
}

/// One year of the cash-flow ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRow {
    /// Year index, starting at 1.
    pub year: u32,
    /// Inflated grid price for this year (currency/kWh).
    pub grid_price_per_kwh: f64,
    /// Savings versus buying from the grid at LCOE (currency).
    pub yearly_savings: f64,
    /// Cash flow through the end of this year, net of the investment (currency).
    pub cumulative_cash_flow: f64,
}

impl fmt::Display for LedgerRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "year={:>3} | grid={:>7.4}/kWh  savings={:>10.2}  cumulative={:>11.2}",
            self.year, self.grid_price_per_kwh, self.yearly_savings, self.cumulative_cash_flow,
        )
    }
}

/// How quickly the investment pays back relative to the lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackVerdict {
    /// Break-even falls in the first half of the lifetime.
    Strong,
    /// Break-even falls in the second half of the lifetime.
    Slow,
    /// Cumulative cash flow never turns non-negative.
    NotReached,
}

impl fmt::Display for PaybackVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Strong => {
                "strong: the investment is recovered in the first half of the lifetime, \
                 leaving many years of net savings"
            }
            Self::Slow => {
                "slow: the payback period is long, savings accumulate late in the lifetime"
            }
            Self::NotReached => "not reached: the investment is not recovered within the lifetime",
        };
        f.write_str(text)
    }
}

/// Ledger and derived scalars of an ROI projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiResult {
    /// One row per year, in increasing year order.
    pub ledger: Vec<LedgerRow>,
    /// First year with non-negative cumulative cash flow, if any.
    pub breakeven_year: Option<u32>,
    /// Levelized cost of energy over the lifetime (currency/kWh).
    pub lcoe_per_kwh: f64,
}

impl RoiResult {
    /// Cumulative cash flow at the end of the lifetime.
    pub fn final_cash_flow(&self) -> f64 {
        self.ledger.last().map_or(0.0, |r| r.cumulative_cash_flow)
    }

    /// Number of years in the ledger.
    pub fn lifetime_years(&self) -> u32 {
        self.ledger.last().map_or(0, |r| r.year)
    }

    /// Classifies the break-even year against half the lifetime.
    pub fn payback_verdict(&self) -> PaybackVerdict {
        match self.breakeven_year {
            None => PaybackVerdict::NotReached,
            Some(year) if f64::from(year) < f64::from(self.lifetime_years()) / 2.0 => {
                PaybackVerdict::Strong
            }
            Some(_) => PaybackVerdict::Slow,
        }
    }
}

impl fmt::Display for RoiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- ROI Report ---")?;
        writeln!(f, "LCOE:                  {:.4} /kWh", self.lcoe_per_kwh)?;
        match self.breakeven_year {
            Some(year) => writeln!(f, "Break-even year:       {year}")?,
            None => writeln!(f, "Break-even year:       none")?,
        }
        writeln!(f, "Final cash flow:       {:.2}", self.final_cash_flow())?;
        write!(f, "Verdict:               {}", self.payback_verdict())
    }
}

/// One-way latch recording the first year cumulative cash flow is non-negative.
#[derive(Debug, Default)]
struct Breakeven(Option<u32>);

impl Breakeven {
    fn observe(&mut self, year: u32, cumulative_cash_flow: f64) {
        if self.0.is_none() && cumulative_cash_flow >= 0.0 {
            self.0 = Some(year);
        }
    }
}

/// Levelized cost of energy: lifetime cost over lifetime production.
///
/// # Errors
///
/// Returns `EngineError::DivisionByZero` when lifetime production is zero,
/// or `EngineError::InvalidInput` when a lifetime total or the LCOE itself
/// is not finite.
pub fn levelized_cost(spec: &FinancialSpec) -> Result<f64, EngineError> {
    let lifetime = f64::from(spec.lifetime_years);
    let total_production = spec.yearly_production_kwh * lifetime;
    if total_production == 0.0 {
        return Err(EngineError::DivisionByZero {
            field: "yearly_production_kwh",
        });
    }
    ensure_finite("yearly_production_kwh", total_production)?;

    let total_maintenance = spec.yearly_maintenance * lifetime;
    ensure_finite("yearly_maintenance", total_maintenance)?;
    let total_cost = spec.initial_investment + total_maintenance;
    ensure_finite("initial_investment", total_cost)?;

    let lcoe = total_cost / total_production;
    ensure_finite("yearly_production_kwh", lcoe)?;
    Ok(lcoe)
}

/// Projects the cash-flow ledger over the lifetime.
///
/// LCOE is fixed up front and every year's savings compare the inflated grid
/// price against it. Break-even latches on the first non-negative cumulative
/// cash flow and is never revised.
///
/// # Errors
///
/// Returns `EngineError::InvalidInput` if the spec fails validation, or
/// `EngineError::DivisionByZero` if yearly production is zero.
pub fn project_roi(spec: &FinancialSpec) -> Result<RoiResult, EngineError> {
    spec.validate()?;
    let lcoe = levelized_cost(spec)?;

    let mut cumulative = -spec.initial_investment;
    let mut breakeven = Breakeven::default();
    let mut ledger = Vec::with_capacity(spec.lifetime_years as usize);

    for year in 1..=spec.lifetime_years {
        let price = spec.grid_price_per_kwh * (1.0 + spec.price_inflation).powi(year as i32 - 1);
        let savings = (price - lcoe) * spec.yearly_production_kwh;
        cumulative += savings - spec.yearly_maintenance;
        if !cumulative.is_finite() {
            let field = if price.is_finite() {
                "grid_price_per_kwh"
            } else {
                "price_inflation"
            };
            return Err(EngineError::invalid(
                field,
                format!("cash flow overflows in year {year}"),
            ));
        }

        ledger.push(LedgerRow {
            year,
            grid_price_per_kwh: price,
            yearly_savings: savings,
            cumulative_cash_flow: cumulative,
        });
        breakeven.observe(year, cumulative);
    }

    debug!(
        lcoe_per_kwh = lcoe,
        breakeven_year = ?breakeven.0,
        final_cash_flow = cumulative,
        "projected roi"
    );

    Ok(RoiResult {
        ledger,
        breakeven_year: breakeven.0,
        lcoe_per_kwh: lcoe,
    })
}
