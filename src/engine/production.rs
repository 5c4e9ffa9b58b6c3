//! Multi-year energy production under orientation derating and degradation.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::error::{EngineError, ensure_finite, ensure_in_range, ensure_years};

/// Regional yearly irradiance used when none is configured (kWh/m²).
pub const DEFAULT_IRRADIANCE_KWH_M2: f64 = 1000.0;

/// Tilt angle at which the tilt factor peaks (degrees).
pub const OPTIMAL_TILT_DEG: f64 = 35.0;
/// Tilt factor at the optimal tilt.
pub const TILT_PEAK_FACTOR: f64 = 0.9;
/// Tilt factor lost per degree away from the optimum.
pub const TILT_DERATE_PER_DEG: f64 = 0.005;
/// Lowest tilt factor, however extreme the tilt.
pub const TILT_FACTOR_FLOOR: f64 = 0.7;
/// Azimuth factor lost per degree away from due south.
pub const AZIMUTH_DERATE_PER_DEG: f64 = 0.002;
/// Lowest azimuth factor, however far the array faces from south.
pub const AZIMUTH_FACTOR_FLOOR: f64 = 0.85;

/// Physical description of a PV array and the projection horizon.
///
/// # Examples
///
/// ```
/// use pv_roi_sim::engine::production::{SystemSpec, project_production};
///
/// let spec = SystemSpec::new(15.0, 35.0, 0.0, 80.0, 0.5, 3);
/// let proj = project_production(&spec).unwrap();
/// assert_eq!(proj.yearly_kwh.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSpec {
    /// Installed capacity (kWp).
    pub capacity_kwp: f64,
    /// Panel tilt from horizontal (degrees, 0-90).
    pub tilt_deg: f64,
    /// Panel azimuth, 0 = due south (degrees, -180 to 180).
    pub azimuth_deg: f64,
    /// Performance ratio (percent, 0-100).
    pub performance_ratio_pct: f64,
    /// Annual output degradation (percent per year).
    pub degradation_pct_per_year: f64,
    /// Number of projected years.
    pub horizon_years: u32,
    /// Yearly irradiance at the site (kWh/m²).
    pub irradiance_kwh_m2: f64,
}

impl SystemSpec {
    /// Creates a spec at the default regional irradiance.
    pub fn new(
        capacity_kwp: f64,
        tilt_deg: f64,
        azimuth_deg: f64,
        performance_ratio_pct: f64,
        degradation_pct_per_year: f64,
        horizon_years: u32,
    ) -> Self {
        Self {
            capacity_kwp,
            tilt_deg,
            azimuth_deg,
            performance_ratio_pct,
            degradation_pct_per_year,
            horizon_years,
            irradiance_kwh_m2: DEFAULT_IRRADIANCE_KWH_M2,
        }
    }

    /// Returns a copy with a site-specific irradiance.
    pub fn with_irradiance(mut self, irradiance_kwh_m2: f64) -> Self {
        self.irradiance_kwh_m2 = irradiance_kwh_m2;
        self
    }

    /// Checks every field against its domain.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        ensure_finite("capacity_kwp", self.capacity_kwp)?;
        if self.capacity_kwp <= 0.0 {
            return Err(EngineError::invalid(
                "capacity_kwp",
                format!("must be > 0, got {}", self.capacity_kwp),
            ));
        }
        ensure_in_range("tilt_deg", self.tilt_deg, 0.0, 90.0)?;
        ensure_in_range("azimuth_deg", self.azimuth_deg, -180.0, 180.0)?;
        ensure_in_range(
            "performance_ratio_pct",
            self.performance_ratio_pct,
            0.0,
            100.0,
        )?;
        ensure_in_range(
            "degradation_pct_per_year",
            self.degradation_pct_per_year,
            0.0,
            100.0,
        )?;
        ensure_years("horizon_years", self.horizon_years)?;
        ensure_finite("irradiance_kwh_m2", self.irradiance_kwh_m2)?;
        if self.irradiance_kwh_m2 <= 0.0 {
            return Err(EngineError::invalid(
                "irradiance_kwh_m2",
                format!("must be > 0, got {}", self.irradiance_kwh_m2),
            ));
        }
        Ok(())
    }
}

/// Yearly production sequence derived from a [`SystemSpec`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionProjection {
    /// Energy per year (kWh); index 0 is year 1.
    pub yearly_kwh: Vec<f64>,
    /// Arithmetic mean of `yearly_kwh`.
    pub mean_kwh: f64,
    /// Tilt derating applied.
    pub tilt_factor: f64,
    /// Azimuth derating applied.
    pub azimuth_factor: f64,
    /// First-year production before degradation (kWh).
    pub base_kwh: f64,
}

impl ProductionProjection {
    /// Sum of production over the whole horizon (kWh).
    pub fn total_kwh(&self) -> f64 {
        self.yearly_kwh.iter().sum()
    }

    /// Iterates `(year, kwh)` pairs with 1-indexed years.
    pub fn years(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        (1_u32..).zip(self.yearly_kwh.iter().copied())
    }
}

impl fmt::Display for ProductionProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Production Report ---")?;
        writeln!(f, "Tilt factor:           {:.3}", self.tilt_factor)?;
        writeln!(f, "Azimuth factor:        {:.3}", self.azimuth_factor)?;
        writeln!(f, "First-year production: {:.2} kWh", self.base_kwh)?;
        if let Some(last) = self.yearly_kwh.last() {
            writeln!(
                f,
                "Final-year production: {:.2} kWh (year {})",
                last,
                self.yearly_kwh.len()
            )?;
        }
        writeln!(f, "Total production:      {:.2} kWh", self.total_kwh())?;
        write!(f, "Average production:    {:.2} kWh/yr", self.mean_kwh)
    }
}

/// Tilt derating: peaks at [`OPTIMAL_TILT_DEG`], floored at [`TILT_FACTOR_FLOOR`].
pub fn tilt_factor(tilt_deg: f64) -> f64 {
    (TILT_PEAK_FACTOR - TILT_DERATE_PER_DEG * (tilt_deg - OPTIMAL_TILT_DEG).abs())
        .max(TILT_FACTOR_FLOOR)
}

/// Azimuth derating: 1.0 due south, floored at [`AZIMUTH_FACTOR_FLOOR`].
pub fn azimuth_factor(azimuth_deg: f64) -> f64 {
    (1.0 - AZIMUTH_DERATE_PER_DEG * azimuth_deg.abs()).max(AZIMUTH_FACTOR_FLOOR)
}

/// Projects yearly energy output over the spec's horizon.
///
/// Year 1 is undegraded; each later year is scaled by
/// `(1 - degradation / 100)^(year - 1)`.
///
/// # Errors
///
/// Returns `EngineError::InvalidInput` if the spec fails validation.
pub fn project_production(spec: &SystemSpec) -> Result<ProductionProjection, EngineError> {
    spec.validate()?;

    let tilt = tilt_factor(spec.tilt_deg);
    let azimuth = azimuth_factor(spec.azimuth_deg);
    let base_kwh = spec.capacity_kwp
        * spec.irradiance_kwh_m2
        * (spec.performance_ratio_pct / 100.0)
        * tilt
        * azimuth;
    let retention = 1.0 - spec.degradation_pct_per_year / 100.0;

    let yearly_kwh: Vec<f64> = (0..spec.horizon_years)
        .map(|y| base_kwh * retention.powi(y as i32))
        .collect();
    let mean_kwh = yearly_kwh.iter().sum::<f64>() / f64::from(spec.horizon_years);
    if !mean_kwh.is_finite() {
        return Err(EngineError::invalid(
            "capacity_kwp",
            format!("projected production overflows, got {base_kwh} kWh in year 1"),
        ));
    }

    debug!(
        tilt_factor = tilt,
        azimuth_factor = azimuth,
        base_kwh,
        mean_kwh,
        "projected production"
    );

    Ok(ProductionProjection {
        yearly_kwh,
        mean_kwh,
        tilt_factor: tilt,
        azimuth_factor: azimuth,
        base_kwh,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::MAX_YEARS;

    fn reference_spec() -> SystemSpec {
        SystemSpec::new(15.0, 35.0, 0.0, 80.0, 0.5, 3)
    }

    #[test]
    fn reference_scenario_matches_hand_calculation() {
        let proj = project_production(&reference_spec()).unwrap();
        assert!((proj.base_kwh - 10_800.0).abs() < 1e-9);
        let expected = [10_800.0, 10_746.0, 10_692.27];
        assert_eq!(proj.yearly_kwh.len(), 3);
        for (got, want) in proj.yearly_kwh.iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
        }
        assert!((proj.mean_kwh - 10_746.09).abs() < 1e-6);
    }

    #[test]
    fn tilt_factor_peaks_at_optimum() {
        assert_eq!(tilt_factor(35.0), 0.9);
        assert!(tilt_factor(34.0) < 0.9);
        assert!(tilt_factor(36.0) < 0.9);
    }

    #[test]
    fn tilt_factor_is_floored() {
        // |90 - 35| = 55 deg -> 0.9 - 0.275 = 0.625, floored to 0.7
        assert_eq!(tilt_factor(90.0), TILT_FACTOR_FLOOR);
        assert_eq!(tilt_factor(0.0), 0.9 - 0.005 * 35.0);
    }

    #[test]
    fn tilt_factor_non_increasing_away_from_optimum() {
        let mut prev = tilt_factor(35.0);
        for step in 1..=55 {
            let f = tilt_factor(35.0 + f64::from(step));
            assert!(f <= prev);
            prev = f;
        }
    }

    #[test]
    fn azimuth_factor_peaks_due_south_and_is_floored() {
        assert_eq!(azimuth_factor(0.0), 1.0);
        assert!(azimuth_factor(10.0) < 1.0);
        assert_eq!(azimuth_factor(-10.0), azimuth_factor(10.0));
        assert_eq!(azimuth_factor(180.0), AZIMUTH_FACTOR_FLOOR);
        assert_eq!(azimuth_factor(-90.0), AZIMUTH_FACTOR_FLOOR);
    }

    #[test]
    fn zero_degradation_is_constant() {
        let spec = SystemSpec::new(5.0, 30.0, 20.0, 85.0, 0.0, 10);
        let proj = project_production(&spec).unwrap();
        assert!(proj.yearly_kwh.iter().all(|&v| v == proj.base_kwh));
        assert!((proj.mean_kwh - proj.base_kwh).abs() < 1e-9);
    }

    #[test]
    fn positive_degradation_is_strictly_decreasing() {
        let spec = SystemSpec::new(5.0, 30.0, 20.0, 85.0, 1.5, 25);
        let proj = project_production(&spec).unwrap();
        assert_eq!(proj.yearly_kwh.len(), 25);
        for w in proj.yearly_kwh.windows(2) {
            assert!(w[1] < w[0]);
        }
    }

    #[test]
    fn irradiance_scales_linearly() {
        let base = project_production(&reference_spec()).unwrap();
        let sunny = project_production(&reference_spec().with_irradiance(1500.0)).unwrap();
        assert!((sunny.base_kwh - 1.5 * base.base_kwh).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_positive_capacity() {
        let mut spec = reference_spec();
        spec.capacity_kwp = -2.0;
        let err = project_production(&spec).unwrap_err();
        assert_eq!(err.field(), "capacity_kwp");
    }

    #[test]
    fn rejects_out_of_range_angles() {
        let mut spec = reference_spec();
        spec.tilt_deg = 95.0;
        assert_eq!(spec.validate().unwrap_err().field(), "tilt_deg");

        let mut spec = reference_spec();
        spec.azimuth_deg = -181.0;
        assert_eq!(spec.validate().unwrap_err().field(), "azimuth_deg");
    }

    #[test]
    fn rejects_zero_horizon() {
        let mut spec = reference_spec();
        spec.horizon_years = 0;
        assert_eq!(spec.validate().unwrap_err().field(), "horizon_years");
    }

    #[test]
    fn rejects_horizon_beyond_limit() {
        let mut spec = reference_spec();
        spec.horizon_years = MAX_YEARS + 1;
        assert_eq!(spec.validate().unwrap_err().field(), "horizon_years");
    }

    #[test]
    fn overflowing_production_is_rejected() {
        let mut spec = reference_spec();
        spec.capacity_kwp = 1e306;
        let err = project_production(&spec).unwrap_err();
        assert_eq!(err.field(), "capacity_kwp");
    }

    #[test]
    fn rejects_nan_performance_ratio() {
        let mut spec = reference_spec();
        spec.performance_ratio_pct = f64::NAN;
        assert_eq!(spec.validate().unwrap_err().field(), "performance_ratio_pct");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let spec = SystemSpec::new(9.3, 12.0, -45.0, 77.0, 0.7, 30);
        assert_eq!(
            project_production(&spec).unwrap(),
            project_production(&spec).unwrap()
        );
    }

    #[test]
    fn years_are_one_indexed() {
        let proj = project_production(&reference_spec()).unwrap();
        let years: Vec<u32> = proj.years().map(|(y, _)| y).collect();
        assert_eq!(years, vec![1, 2, 3]);
    }
}
