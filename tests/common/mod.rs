//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use pv_roi_sim::engine::{FinancialSpec, SystemSpec};

/// Reference array: 15 kWp, optimal tilt, due south, 80 % PR, 0.5 %/yr, 3 years.
pub fn reference_system() -> SystemSpec {
    SystemSpec::new(15.0, 35.0, 0.0, 80.0, 0.5, 3)
}

/// Reference economics: 10000 invested, 0.25/kWh, 5000 kWh/yr, 2 % inflation,
/// 200/yr maintenance over 30 years.
pub fn reference_finance() -> FinancialSpec {
    FinancialSpec {
        initial_investment: 10_000.0,
        grid_price_per_kwh: 0.25,
        yearly_production_kwh: 5_000.0,
        price_inflation: 0.02,
        yearly_maintenance: 200.0,
        lifetime_years: 30,
    }
}

/// Asserts `actual` is within `tol` of `expected`.
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tolerance {tol})"
    );
}
