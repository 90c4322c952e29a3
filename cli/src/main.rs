//! haltctl CLI - Run a command and stop it gracefully
//!
//! A command-line tool for supervising a process, stopping it with a
//! configurable signal and timeout, and managing the engine defaults.

mod commands;

use clap::{Parser, Subcommand};
use haltctl_core::StopSignal;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "haltctl")]
#[command(author, version, about = "Run a command and stop it gracefully")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command; Ctrl-C stops it, a second Ctrl-C abandons the wait
    Run {
        /// Name to register the process under
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Signal sent first when stopping (default from config)
        #[arg(long)]
        stop_signal: Option<StopSignal>,

        /// Configured stop timeout in seconds; negative never forces
        #[arg(long, allow_negative_numbers = true)]
        stop_timeout: Option<i64>,

        /// Override the stop timeout for this stop only
        #[arg(short = 't', long = "time", allow_negative_numbers = true)]
        time: Option<i64>,

        /// Command and arguments to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Show or change engine defaults
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the default stop timeout in seconds (negative never forces)
    SetTimeout {
        #[arg(allow_negative_numbers = true)]
        seconds: i64,
    },
    /// Set the default stop signal (name or number)
    SetSignal { signal: StopSignal },
    /// Set how long to wait for the exit after SIGKILL
    SetKillWait { seconds: u64 },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            name,
            stop_signal,
            stop_timeout,
            time,
            command,
        } => {
            let args = commands::run::RunArgs {
                name,
                stop_signal,
                stop_timeout,
                time,
                command,
            };
            let code = commands::run::run(args, cli.json).await?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show(cli.json).await?,
            ConfigAction::SetTimeout { seconds } => commands::config::set_timeout(seconds).await?,
            ConfigAction::SetSignal { signal } => commands::config::set_signal(signal).await?,
            ConfigAction::SetKillWait { seconds } => {
                commands::config::set_kill_wait(seconds).await?
            }
        },
    }

    Ok(())
}
