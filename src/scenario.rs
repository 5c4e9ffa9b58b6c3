//! Runs both projectors for a configured scenario.

use serde::Serialize;
use tracing::info;

use crate::config::{ConfigError, ProductionSource, ScenarioConfig};
use crate::engine::{
    EngineError, FinancialSpec, ProductionProjection, RoiResult, SystemSpec, project_production, project_roi,
};

/// Inputs and results of one scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Array spec fed to the production projector.
    pub system: SystemSpec,
    /// Financial spec fed to the ROI projector.
    pub finance: FinancialSpec,
    /// Production projection.
    pub production: ProductionProjection,
    /// Ledger, LCOE and break-even.
    pub roi: RoiResult,
}

/// Validates `cfg` and runs the production and ROI projections.
///
/// With `production_source = "projected"` the ROI projection uses the mean
/// yearly production of the `[system]` projection; otherwise the configured
/// fixed value.
///
/// # Errors
///
/// Returns every validation error, or the engine failure mapped to its config
/// field path.
pub fn run(cfg: &ScenarioConfig) -> Result<ScenarioOutcome, Vec<ConfigError>> {
    let errors = cfg.validate();
    if !errors.is_empty() {
        return Err(errors);
    }

    let system = cfg.system_spec();
    let production =
        project_production(&system).map_err(|e| vec![ConfigError::from_engine("system", &e)])?;

    let yearly_production_kwh = match cfg.finance.production_source {
        ProductionSource::Fixed => cfg.finance.yearly_production_kwh,
        ProductionSource::Projected => production.mean_kwh,
    };
    let finance = cfg.financial_spec(yearly_production_kwh);
    let roi = project_roi(&finance)
        .map_err(|e| vec![roi_error(cfg.finance.production_source, &e)])?;

    info!(
        mean_kwh = production.mean_kwh,
        lcoe_per_kwh = roi.lcoe_per_kwh,
        breakeven_year = ?roi.breakeven_year,
        "scenario complete"
    );

    Ok(ScenarioOutcome {
        system,
        finance,
        production,
        roi,
    })
}

/// Maps an ROI failure to the config field responsible for it.
///
/// In projected mode zero production comes from `[system]`: capacity and
/// irradiance are validated positive, so only a zero performance ratio can
/// produce it.
fn roi_error(source: ProductionSource, err: &EngineError) -> ConfigError {
    match (source, err) {
        (ProductionSource::Projected, EngineError::DivisionByZero { .. }) => ConfigError {
            field: "system.performance_ratio_pct".to_string(),
            message: "projected production is zero, LCOE is undefined".to_string(),
        },
        _ => ConfigError::from_engine("finance", err),
    }
}
