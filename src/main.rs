//! pv-roi-sim entry point: CLI wiring, scenario loading, reporting and exports.

mod cli;

use std::process;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use pv_roi_sim::config::ScenarioConfig;
use pv_roi_sim::io::export::{export_ledger_csv, export_production_csv};
use pv_roi_sim::scenario::{self, ScenarioOutcome};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pv_roi_sim=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the scenario: `--scenario` file, then `--preset`, then the baseline.
fn load_scenario(opts: &cli::CliOptions) -> (String, ScenarioConfig) {
    let loaded = if let Some(path) = &opts.scenario {
        ScenarioConfig::from_toml_file(path).map(|cfg| (path.display().to_string(), cfg))
    } else if let Some(name) = &opts.preset {
        ScenarioConfig::from_preset(name).map(|cfg| (name.clone(), cfg))
    } else {
        Ok(("baseline".to_string(), ScenarioConfig::baseline()))
    };

    loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    })
}

fn print_outcome(outcome: &ScenarioOutcome) {
    for row in &outcome.roi.ledger {
        println!("{row}");
    }
    println!("\n{}", outcome.production);
    println!("\n{}", outcome.roi);
}

fn write_exports(opts: &cli::CliOptions, outcome: &ScenarioOutcome) {
    if let Some(path) = &opts.production_out {
        if let Err(e) = export_production_csv(&outcome.production, path) {
            error!(path = %path.display(), "production export failed: {e}");
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Production written to {}", path.display());
    }
    if let Some(path) = &opts.ledger_out {
        if let Err(e) = export_ledger_csv(&outcome.roi.ledger, path) {
            error!(path = %path.display(), "ledger export failed: {e}");
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Ledger written to {}", path.display());
    }
}

fn main() {
    let opts = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });
    if opts.help {
        cli::print_usage();
        return;
    }

    init_tracing();

    let (source, cfg) = load_scenario(&opts);
    debug!(%source, "scenario loaded");

    let outcome = match scenario::run(&cfg) {
        Ok(outcome) => outcome,
        Err(errors) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
    };

    #[cfg(feature = "tui")]
    if opts.tui {
        if let Err(e) = pv_roi_sim::tui::run(&source, cfg) {
            eprintln!("error: TUI failed: {e}");
            process::exit(1);
        }
        return;
    }

    print_outcome(&outcome);
    write_exports(&opts, &outcome);

    #[cfg(feature = "api")]
    if opts.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(pv_roi_sim::api::AppState { source, outcome });
        let addr = SocketAddr::from(([0, 0, 0, 0], opts.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(pv_roi_sim::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
    #[cfg(not(feature = "api"))]
    let _ = source;
}
