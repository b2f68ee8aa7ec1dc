//! `ScamShield` command line front end
//!
//! Drives the page state machines against a live backend: list and search
//! employees, show assessments, trigger a simulated call and poll its status.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use clap::{Parser, Subcommand};
use scamshield_core::{Config, EmployeeId, init_logging};
use scamshield_web::pages::AssessmentsOutcome;
use scamshield_web::{AppState, CallOutcome, Result, WebError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Command line interface for the `ScamShield` dashboard
#[derive(Parser)]
#[command(
    name = "scamshield",
    version = env!("CARGO_PKG_VERSION"),
    about = "Voice phishing awareness training dashboard",
    long_about = "Search employees, review their security assessments and trigger simulated scam calls against the ScamShield backend."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend API base URL (overrides configuration)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// List employees
    Employees {
        /// Filter by name, company or phone number
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show an employee's security assessments
    Assessments {
        /// Employee id
        #[arg(value_name = "EMPLOYEE_ID")]
        employee_id: EmployeeId,
    },

    /// Trigger a simulated scam call
    Simulate {
        /// Employee id
        #[arg(value_name = "EMPLOYEE_ID")]
        employee_id: EmployeeId,

        /// Scenario type (defaults to the configured scenario)
        #[arg(short, long)]
        scenario: Option<String>,
    },

    /// Show the status of a call
    Status {
        /// Call id returned when the call was triggered
        #[arg(value_name = "CALL_ID")]
        call_id: String,
    },

    /// Validate configuration
    Config {
        /// Print the resolved configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = Some(url);
    }
    init_logging(&config.logging)?;

    let state = AppState::new(config)?;

    match cli.command {
        Commands::Employees { query } => list_employees(&state, query).await,
        Commands::Assessments { employee_id } => show_assessments(&state, employee_id).await,
        Commands::Simulate {
            employee_id,
            scenario,
        } => simulate(&state, employee_id, scenario).await,
        Commands::Status { call_id } => {
            let status = state.api_client.get_call_status(&call_id).await?;
            let rendered =
                serde_json::to_string_pretty(&status).map_err(scamshield_core::Error::from)?;
            println!("{rendered}");
            Ok(())
        }
        Commands::Config { show } => {
            if show {
                let rendered = serde_json::to_string_pretty(&state.config)
                    .map_err(scamshield_core::Error::from)?;
                println!("{rendered}");
            } else {
                println!("Configuration is valid");
            }
            Ok(())
        }
    }
}

async fn list_employees(state: &AppState, query: Option<String>) -> Result<()> {
    let page = state.voice_simulations();
    if let Some(message) = page.mount().await.error() {
        return Err(WebError::Command(message.to_string()));
    }
    if let Some(query) = query {
        page.set_query(query);
    }

    for employee in page.filtered() {
        println!(
            "{:>5}  {:<30} {:<18} {}",
            employee.id,
            employee.name,
            employee.display_phone(),
            employee.company.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

async fn show_assessments(state: &AppState, employee_id: EmployeeId) -> Result<()> {
    let page = state.employees();
    if let Some(message) = page.mount().await.error() {
        return Err(WebError::Command(message.to_string()));
    }

    match page.select_by_id(employee_id).await {
        None => Err(WebError::Command(format!("Employee {employee_id} not found"))),
        Some(AssessmentsOutcome::Failed(message)) => Err(WebError::Command(message)),
        Some(AssessmentsOutcome::Loaded(0) | AssessmentsOutcome::Stale) => {
            println!("No security assessments recorded");
            Ok(())
        }
        Some(AssessmentsOutcome::Loaded(_)) => {
            for row in page.assessment_rows() {
                println!(
                    "{}  score {:>3} ({:?})  resistance {:<6}  susceptibility {:<6}  {}",
                    row.date,
                    row.score,
                    row.band,
                    row.resistance,
                    row.susceptibility,
                    row.feedback
                );
                if let Some(explanation) = row.explanation {
                    println!("    {explanation}");
                }
            }
            Ok(())
        }
    }
}

async fn simulate(
    state: &AppState,
    employee_id: EmployeeId,
    scenario: Option<String>,
) -> Result<()> {
    let page = state.voice_simulations();
    if let Some(message) = page.mount().await.error() {
        return Err(WebError::Command(message.to_string()));
    }
    if !page.select_by_id(employee_id) {
        return Err(WebError::Command(format!("Employee {employee_id} not found")));
    }
    if let Some(scenario) = scenario {
        page.set_scenario(scenario);
    }

    match page.trigger_call().await {
        CallOutcome::Rejected(reason) => Err(WebError::Command(reason.to_string())),
        CallOutcome::Completed(notification) if notification.is_success() => {
            println!("{}", notification.message);
            Ok(())
        }
        CallOutcome::Completed(notification) => Err(WebError::Command(notification.message)),
    }
}
