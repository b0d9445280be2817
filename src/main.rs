//! scicalc CLI
//!
//! Scientific calculator: interactive TUI by default, `eval` for scripts.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use scicalc::logging::{self, LogTarget};
use scicalc::report::{format_report, run_inputs};
use scicalc::tui::run::run;
use scicalc::types::{AngleMode, OutputFormat, ScientificFunction, SessionConfig, Theme};

#[derive(Parser)]
#[command(name = "scicalc")]
#[command(about = "Scientific calculator for the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Start with the dark theme
    #[arg(long)]
    dark: bool,

    /// Start in degrees mode for sin/cos/tan
    #[arg(long)]
    degrees: bool,

    /// Start with the history panel visible
    #[arg(long)]
    history: bool,

    /// Log file (default: local data dir)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate expressions without the TUI
    Eval {
        /// Expressions to evaluate in one session, clearing between them
        #[arg(required = true, allow_hyphen_values = true)]
        exprs: Vec<String>,

        /// Interpret trigonometric input as degrees
        #[arg(long)]
        degrees: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Apply a scientific function instead of pressing "="
        #[arg(long, value_enum)]
        function: Option<FunctionArg>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FunctionArg {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Factorial,
}

impl From<FunctionArg> for ScientificFunction {
    fn from(arg: FunctionArg) -> Self {
        match arg {
            FunctionArg::Sin => ScientificFunction::Sin,
            FunctionArg::Cos => ScientificFunction::Cos,
            FunctionArg::Tan => ScientificFunction::Tan,
            FunctionArg::Log => ScientificFunction::Log,
            FunctionArg::Ln => ScientificFunction::Ln,
            FunctionArg::Sqrt => ScientificFunction::Sqrt,
            FunctionArg::Factorial => ScientificFunction::Factorial,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Eval {
            exprs,
            degrees,
            format,
            function,
        }) => cmd_eval(&exprs, degrees, format.into(), function.map(Into::into)),
        None => cmd_tui(cli.dark, cli.degrees, cli.history, cli.log_file),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn angle_mode(degrees: bool) -> AngleMode {
    if degrees {
        AngleMode::Degrees
    } else {
        AngleMode::Radians
    }
}

fn cmd_tui(
    dark: bool,
    degrees: bool,
    history: bool,
    log_file: Option<PathBuf>,
) -> Result<ExitCode, String> {
    let log_path = log_file.unwrap_or_else(logging::default_log_path);
    if let Err(e) = logging::init(&LogTarget::File(log_path.clone())) {
        // Not fatal: the calculator works without a log
        eprintln!("Note: logging disabled ({}): {}", log_path.display(), e);
    }

    let config = SessionConfig {
        theme: if dark { Theme::Dark } else { Theme::Light },
        angle_mode: angle_mode(degrees),
        show_history: history,
    };

    run(config).map_err(|e| e.to_string())?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_eval(
    exprs: &[String],
    degrees: bool,
    format: OutputFormat,
    function: Option<ScientificFunction>,
) -> Result<ExitCode, String> {
    logging::init(&LogTarget::Stderr).map_err(|e| e.to_string())?;

    let config = SessionConfig {
        angle_mode: angle_mode(degrees),
        ..Default::default()
    };

    let report = run_inputs(exprs, function, config);
    print!("{}", format_report(&report, format));

    if report.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

// ============================================================================
// TESTS
// ============================================================================
