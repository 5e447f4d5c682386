mod config;
mod error;
mod manager;
mod process;
mod system;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgAction, ArgGroup, Parser};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::UptimeError;
use manager::report::DisplayStyle;
use manager::Manager;
use process::{ProcRoot, NAME_CAPACITY};

#[derive(Parser, Debug)]
#[command(name = "proc_uptime")]
#[command(about = "Show how long a process has been running")]
#[command(version, disable_help_flag = true)]
#[command(group(ArgGroup::new("target").required(true).args(["pid", "names"])))]
struct Cli {
    /// Show output in hours and minutes instead of seconds
    #[arg(short = 'h')]
    human: bool,

    /// Show uptime for process with given PID
    #[arg(short = 'p', value_name = "PID", allow_hyphen_values = true)]
    pid: Option<String>,

    /// Show uptime for processes with given names
    #[arg(short = 'n', value_name = "NAME", num_args = 1..)]
    names: Vec<String>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn init_logging(config: &Config) {
    let filter = if config.debug_log {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_pid(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|pid| *pid > 0)
}

fn report_pid(manager: &Manager, raw_pid: &str, style: DisplayStyle) -> ExitCode {
    let Some(pid) = parse_pid(raw_pid) else {
        eprintln!("Invalid PID: {}", raw_pid);
        return ExitCode::FAILURE;
    };

    let name = match manager.proc_root().read_name(pid, NAME_CAPACITY) {
        Ok(name) => name,
        Err(e) => {
            tracing::debug!(pid, error = %e, "name lookup failed");
            eprintln!("PID {} not found.", pid);
            return ExitCode::FAILURE;
        }
    };

    match manager.active_time(pid) {
        Ok((_, active)) => {
            println!("Process: {} (PID: {})", name, pid);
            println!("{}", active.render(style));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::warn!(pid, error = %e, "could not derive active time");
            eprintln!("Unable to get process info for PID {}.", pid);
            ExitCode::FAILURE
        }
    }
}

fn report_names(manager: &Manager, names: &[String], style: DisplayStyle) -> ExitCode {
    let mut found_count = 0;

    for name in names {
        let found = match manager.find_by_name(name) {
            Ok(found) => found,
            Err(UptimeError::NotFound { .. }) => {
                eprintln!("Process with name '{}' not found.", name);
                continue;
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "name lookup failed");
                eprintln!("Failed to look up process '{}': {}", name, e);
                continue;
            }
        };

        if found_count > 0 {
            println!();
        }
        println!("Process: {} (PID: {})", found.record.name, found.record.pid);
        println!("{}", found.active.render(style));
        found_count += 1;
    }

    if found_count == 0 {
        eprintln!("No processes found with the given names.");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let config = Config::from_env();
    init_logging(&config);

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let informational = matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
            let _ = e.print();
            return if informational {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    let style = if cli.human {
        DisplayStyle::Human
    } else {
        DisplayStyle::Seconds
    };
    tracing::debug!(root = %config.proc_root.display(), ?style, "starting lookup");
    let manager = Manager::with_system_clock(ProcRoot::new(config.proc_root));

    match cli.pid {
        Some(raw_pid) => report_pid(&manager, &raw_pid, style),
        None => report_names(&manager, &cli.names, style),
    }
}
