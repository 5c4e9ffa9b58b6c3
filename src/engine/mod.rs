//! Pure projection engine: production and ROI.

/// Validation and failure types.
pub mod error;
/// Yearly production under orientation derating and degradation.
pub mod production;
pub mod roi;

pub use error::{EngineError, MAX_YEARS};
pub use production::{ProductionProjection, SystemSpec, project_production};
pub use roi::{FinancialSpec, LedgerRow, PaybackVerdict, RoiResult, project_roi};
