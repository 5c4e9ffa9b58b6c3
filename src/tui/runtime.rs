//! Year-by-year replay state for the dashboard.

use std::time::Instant;

use crate::config::ScenarioConfig;
use crate::engine::LedgerRow;
use crate::scenario::{self, ScenarioOutcome};

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 6] = [1000, 500, 250, 100, 50, 20];

/// Default speed index (250 ms).
const DEFAULT_SPEED_IDX: usize = 2;

/// TUI application state.
///
/// Both projections are computed up front; ticking only reveals one more
/// year of each.
pub struct App {
    /// Scenario being replayed; `restart` re-runs it.
    scenario: ScenarioConfig,
    /// Results for the active scenario, or the error lines if it failed.
    outcome: Result<ScenarioOutcome, Vec<String>>,
    /// Number of years revealed so far.
    pub year: u32,
    /// Years until both sequences are fully revealed.
    pub total_years: u32,
    /// Whether the replay is paused.
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last tick was executed.
    pub last_tick: Instant,
    /// Preset name or scenario file of the active scenario.
    pub preset_name: String,
}

impl App {
    /// Creates a new app replaying `scenario`, shown under `label`.
    pub fn new(label: &str, scenario: ScenarioConfig) -> Self {
        let mut app = Self {
            scenario,
            outcome: Err(Vec::new()),
            year: 0,
            total_years: 0,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
            preset_name: label.to_string(),
        };
        app.load();
        app
    }

    fn load(&mut self) {
        self.outcome = scenario::run(&self.scenario)
            .map_err(|errors| errors.iter().map(ToString::to_string).collect());
        self.total_years = self.outcome.as_ref().map_or(0, |o| {
            o.system.horizon_years.max(o.finance.lifetime_years)
        });
        self.year = 0;
        self.paused = false;
    }

    /// Reveals one more year if not finished.
    pub fn tick(&mut self) {
        if self.year < self.total_years {
            self.year += 1;
        }
    }

    /// Jumps to the final year.
    pub fn reveal_all(&mut self) {
        self.year = self.total_years;
    }

    /// Toggles pause/resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Increases replay speed (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases replay speed (longer tick interval).
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    /// Switches to a different preset, restarting the replay.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(scenario) = ScenarioConfig::from_preset(name) else {
            return;
        };
        self.scenario = scenario;
        self.load();
        self.preset_name = name.to_string();
    }

    /// Restarts the current scenario from the first year.
    pub fn restart(&mut self) {
        self.load();
    }

    /// Returns `true` when every year has been revealed.
    pub fn is_finished(&self) -> bool {
        self.year >= self.total_years
    }

    /// The full outcome for the active preset, if it ran.
    pub fn outcome(&self) -> Option<&ScenarioOutcome> {
        self.outcome.as_ref().ok()
    }

    /// Error lines when the active preset failed to run.
    pub fn errors(&self) -> &[String] {
        match &self.outcome {
            Ok(_) => &[],
            Err(errors) => errors,
        }
    }

    /// Production points `(year, kWh)` revealed so far.
    pub fn production_points(&self) -> Vec<(f64, f64)> {
        self.outcome().map_or_else(Vec::new, |o| {
            o.production
                .years()
                .take_while(|&(y, _)| y <= self.year)
                .map(|(y, kwh)| (f64::from(y), kwh))
                .collect()
        })
    }

    /// Ledger rows revealed so far.
    pub fn revealed_ledger(&self) -> &[LedgerRow] {
        let Some(o) = self.outcome() else {
            return &[];
        };
        let n = (self.year as usize).min(o.roi.ledger.len());
        &o.roi.ledger[..n]
    }

    /// Cumulative cash-flow points `(year, value)` revealed so far.
    pub fn cash_flow_points(&self) -> Vec<(f64, f64)> {
        self.revealed_ledger()
            .iter()
            .map(|r| (f64::from(r.year), r.cumulative_cash_flow))
            .collect()
    }

    /// Break-even year once the replay has reached it.
    pub fn revealed_breakeven(&self) -> Option<u32> {
        self.outcome()
            .and_then(|o| o.roi.breakeven_year)
            .filter(|&y| y <= self.year)
    }
}
