//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::production::DEFAULT_IRRADIANCE_KWH_M2;
use crate::engine::{EngineError, FinancialSpec, SystemSpec};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// PV array and projection horizon.
    #[serde(default)]
    pub system: SystemConfig,
    /// Investment, prices and costs.
    #[serde(default)]
    pub finance: FinanceConfig,
}

/// PV array parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    /// Installed capacity (kWp, > 0).
    pub capacity_kwp: f64,
    /// Tilt angle (degrees, 0-90).
    pub tilt_deg: f64,
    /// Azimuth angle, 0 = south (degrees, -180 to 180).
    pub azimuth_deg: f64,
    /// Performance ratio (percent, 0-100).
    pub performance_ratio_pct: f64,
    /// Annual degradation (percent per year).
    pub degradation_pct_per_year: f64,
    /// Years of operation to project (> 0).
    pub horizon_years: u32,
    /// Site yearly irradiance (kWh/m²).
    pub irradiance_kwh_m2: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            capacity_kwp: 15.0,
            tilt_deg: 35.0,
            azimuth_deg: 0.0,
            performance_ratio_pct: 80.0,
            degradation_pct_per_year: 0.5,
            horizon_years: 25,
            irradiance_kwh_m2: DEFAULT_IRRADIANCE_KWH_M2,
        }
    }
}

/// Where the ROI projection takes its yearly production from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionSource {
    /// Use `finance.yearly_production_kwh` as given.
    Fixed,
    /// Use the mean of the production projection for `[system]`.
    Projected,
}

/// Economic parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinanceConfig {
    /// Initial investment (currency, >= 0).
    pub initial_investment: f64,
    /// Year-1 grid electricity price (currency/kWh, >= 0).
    pub grid_price_per_kwh: f64,
    /// Selects fixed or projected yearly production.
    pub production_source: ProductionSource,
    /// Yearly PV production when `production_source = "fixed"` (kWh).
    pub yearly_production_kwh: f64,
    /// Grid price inflation per year as a fraction.
    pub price_inflation: f64,
    /// Yearly maintenance cost (currency, >= 0).
    pub yearly_maintenance: f64,
    /// System lifetime (years, > 0).
    pub lifetime_years: u32,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            initial_investment: 10_000.0,
            grid_price_per_kwh: 0.25,
            production_source: ProductionSource::Fixed,
            yearly_production_kwh: 5_000.0,
            price_inflation: 0.02,
            yearly_maintenance: 200.0,
            lifetime_years: 30,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"system.tilt_deg"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    /// Wraps an engine error, prefixing its field with the config section.
    pub fn from_engine(section: &str, err: &EngineError) -> Self {
        let message = match err {
            EngineError::InvalidInput { message, .. } => message.clone(),
            EngineError::DivisionByZero { .. } => {
                "lifetime production is zero, LCOE is undefined".to_string()
            }
        };
        Self {
            field: format!("{section}.{}", err.field()),
            message,
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario (south-facing 15 kWp, fixed 5000 kWh/yr).
    pub fn baseline() -> Self {
        Self {
            system: SystemConfig::default(),
            finance: FinanceConfig::default(),
        }
    }

    /// Returns the east-facing preset: shallow tilt, production taken from the projection.
    pub fn east_facing() -> Self {
        Self {
            system: SystemConfig {
                tilt_deg: 20.0,
                azimuth_deg: -90.0,
                ..SystemConfig::default()
            },
            finance: FinanceConfig {
                initial_investment: 12_000.0,
                production_source: ProductionSource::Projected,
                ..FinanceConfig::default()
            },
        }
    }

    /// Returns the high-inflation preset: costlier system, fast-rising grid prices.
    pub fn high_inflation() -> Self {
        Self {
            system: SystemConfig::default(),
            finance: FinanceConfig {
                initial_investment: 14_000.0,
                price_inflation: 0.06,
                ..FinanceConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "east_facing", "high_inflation"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "east_facing" => Ok(Self::east_facing()),
            "high_inflation" => Ok(Self::high_inflation()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Builds the engine input for the `[system]` section.
    pub fn system_spec(&self) -> SystemSpec {
        let s = &self.system;
        SystemSpec::new(
            s.capacity_kwp,
            s.tilt_deg,
            s.azimuth_deg,
            s.performance_ratio_pct,
            s.degradation_pct_per_year,
            s.horizon_years,
        )
        .with_irradiance(s.irradiance_kwh_m2)
    }

    /// Builds the engine input for the `[finance]` section with the given yearly production.
    pub fn financial_spec(&self, yearly_production_kwh: f64) -> FinancialSpec {
        let f = &self.finance;
        FinancialSpec {
            initial_investment: f.initial_investment,
            grid_price_per_kwh: f.grid_price_per_kwh,
            yearly_production_kwh,
            price_inflation: f.price_inflation,
            yearly_maintenance: f.yearly_maintenance,
            lifetime_years: f.lifetime_years,
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Reports at most one error per section. Returns an empty vector if the
    /// configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.system_spec().validate() {
            errors.push(ConfigError::from_engine("system", &e));
        }

        // Projected production is only known after the run; any positive stand-in
        // lets the remaining finance fields be checked now.
        let production = match self.finance.production_source {
            ProductionSource::Fixed => self.finance.yearly_production_kwh,
            ProductionSource::Projected => 1.0,
        };
        if let Err(e) = self.financial_spec(production).validate() {
            errors.push(ConfigError::from_engine("finance", &e));
        }

        errors
    }
}
