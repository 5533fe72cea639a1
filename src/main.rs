use anyhow::Result;
use clap::{Parser, Subcommand};
use internstud::admin_cli::{handle_admin_command, AdminCommand};
use internstud::core::ConfigManager;
use internstud::interview_cli::{run_interview, InterviewArgs};
use internstud::logging::init_tracing;
use internstud::start_web_server;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "internstud")]
#[command(about = "InternStud backend and interview simulator")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve,
    /// Practice an interview in the terminal
    Interview(InterviewArgs),
    /// Company approval queue and admin rights
    Admin {
        #[command(subcommand)]
        command: AdminCommand,

        /// Overrides the configured database
        #[arg(long)]
        database_path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs, cli.log_file.as_deref())?;

    match cli.command {
        Command::Serve => {
            let config = ConfigManager::load()?;
            info!("Server: http://0.0.0.0:{}", config.port);
            start_web_server(&config).await
        }
        Command::Interview(args) => run_interview(args).await,
        Command::Admin {
            command,
            database_path,
        } => {
            let database_path = match database_path {
                Some(path) => path,
                None => ConfigManager::load()?.database_path,
            };
            handle_admin_command(command, &database_path).await
        }
    }
}
