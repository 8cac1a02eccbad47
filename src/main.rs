use clap::Parser;
use coinvend::application::command::Command;
use coinvend::application::machine::VendingMachine;
use coinvend::application::session::Session;
use coinvend::config::MachineConfig;
use coinvend::interfaces::csv::command_reader::CommandReader;
use coinvend::interfaces::csv::outcome_writer::{Outcome, OutcomeWriter, Status};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command script (CSV with columns: action, arg, value, count)
    script: PathBuf,

    /// Machine configuration (JSON). Defaults to the factory stock.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured admin password.
    #[arg(long)]
    admin_password: Option<String>,
}

fn setup_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .compact()
        .init();
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => MachineConfig::from_path(path).into_diagnostic()?,
        None => MachineConfig::default(),
    };
    if let Some(password) = cli.admin_password {
        config.admin_password = password;
    }
    let mut machine = VendingMachine::from_config(&config).into_diagnostic()?;
    let mut session = Session::new(&mut machine);

    let file = File::open(cli.script).into_diagnostic()?;
    let reader = CommandReader::new(file);
    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock()).into_diagnostic()?;

    for (idx, record) in reader.records().enumerate() {
        let line = idx + 1;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(line, error = %e, "Error reading command");
                continue;
            }
        };
        let action = record.action.as_str();
        let result = Command::try_from(record).and_then(|command| session.execute(command));
        let outcome = match result {
            Ok(detail) => Outcome {
                line,
                action,
                status: Status::Ok,
                detail,
            },
            Err(e) if e.is_rejection() => Outcome {
                line,
                action,
                status: Status::Rejected,
                detail: e.to_string(),
            },
            Err(e) => return Err(e).into_diagnostic(),
        };
        writer.write(&outcome).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    let machine = session.machine();
    info!(
        revenue = %machine.accumulated_revenue(),
        vault = %machine.vault_snapshot().total(),
        inserted = %machine.inserted_total(),
        "Script finished"
    );

    Ok(())
}
