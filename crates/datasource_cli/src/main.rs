//! Command-line entry point for the datasource workspace.
//!
//! # Responsibility
//! - Load `.env` overrides, start logging and make the process-wide
//!   repository selection.
//! - Dispatch one command against the selected repository.

use datasource_core::{
    default_log_level, init_logging, init_repository, DataSourceConfig, RecordService,
};
use log::error;
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "usage: datasource [source | list | add <content>]";

enum Command {
    Source,
    List,
    Add(String),
}

fn main() -> ExitCode {
    for warning in load_dotenv(Path::new(".")) {
        eprintln!("warning: {warning}");
    }

    let command = match parse_command(std::env::args().skip(1).collect()) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
    let log_dir = std::env::var("LOG_DIR").ok();
    if let Err(err) = init_logging(&level, log_dir.as_deref()) {
        eprintln!("logging disabled: {err}");
    }

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let config = DataSourceConfig::from_env();
    let service = RecordService::new(init_repository(&config)?);

    match command {
        Command::Source => println!("{}", service.source_kind()),
        Command::List => {
            for record in service.list_records()? {
                println!("{}", serde_json::to_string(&record)?);
            }
        }
        Command::Add(content) => println!("{}", service.add_record(content)?),
    }

    Ok(())
}

fn parse_command(args: Vec<String>) -> Result<Command, String> {
    let mut args = args.into_iter();
    match args.next().as_deref() {
        None | Some("list") => Ok(Command::List),
        Some("source") => Ok(Command::Source),
        Some("add") => {
            let content = args.collect::<Vec<_>>().join(" ");
            if content.trim().is_empty() {
                return Err("add requires record content".to_string());
            }
            Ok(Command::Add(content))
        }
        Some(other) => Err(format!("unknown command `{other}`")),
    }
}

// Local overrides first; dotenvy never replaces variables that are already set.
// Returns one warning per file that exists but could not be loaded.
fn load_dotenv(dir: &Path) -> Vec<String> {
    let mut warnings = Vec::new();
    for filename in [".env.local", ".env"] {
        let path = dir.join(filename);
        if !path.exists() {
            continue;
        }
        if let Err(err) = dotenvy::from_path(&path) {
            warnings.push(format!("ignoring `{}`: {err}", path.display()));
        }
    }
    warnings
}
