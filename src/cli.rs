//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

/// Parsed CLI arguments.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub production_out: Option<PathBuf>,
    pub ledger_out: Option<PathBuf>,
    pub help: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: u16,
    #[cfg(feature = "tui")]
    pub tui: bool,
}

/// Default API port.
#[cfg(feature = "api")]
pub const DEFAULT_PORT: u16 = 3000;

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut opts = CliOptions {
        #[cfg(feature = "api")]
        port: DEFAULT_PORT,
        ..CliOptions::default()
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --preset (expected a preset name)",
                )?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--production-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --production-out (expected a file path)",
                )?;
                opts.production_out = Some(PathBuf::from(path));
            }
            "--ledger-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --ledger-out (expected a file path)",
                )?;
                opts.ledger_out = Some(PathBuf::from(path));
            }
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            #[cfg(feature = "tui")]
            "--tui" => opts.tui = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("pv-roi-sim: photovoltaic production and ROI / break-even simulator");
    eprintln!();
    eprintln!("Usage: pv-roi-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, east_facing, high_inflation)");
    eprintln!("  --production-out <path>  Export yearly production to CSV");
    eprintln!("  --ledger-out <path>      Export the cash-flow ledger to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Serve results over HTTP after the run");
        eprintln!("  --port <u16>             API server port (default: {DEFAULT_PORT})");
    }
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Open the terminal dashboard");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}
