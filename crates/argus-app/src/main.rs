mod boot;
mod cli;
mod commands;
mod repl;

use std::path::Path;

use argus_ai::Session;
use cli::{Args, Command};

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment
    let dotenv_loaded = argus_config::load_dotenv(Path::new(".env"));

    let args = cli::parse();

    let log_handle =
        boot::init_logging(args.log_level.as_deref().unwrap_or(boot::DEFAULT_LOG_DIRECTIVE));

    tracing::info!("Argus v{} starting...", env!("CARGO_PKG_VERSION"));
    if dotenv_loaded {
        tracing::debug!("Loaded environment from .env");
    }

    if let Err(e) = run(args, &log_handle).await {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args, log_handle: &boot::LogHandle) -> argus_common::Result<()> {
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = boot::load_config(args.config.as_deref())?;

    if args.log_level.is_none() {
        boot::apply_log_level(log_handle, config.logging.level);
    }
    tracing::debug!(?config, "config loaded");

    match args.command {
        Command::Chat { stream } => {
            repl::run(Session::new(boot::session_config(&config.ai)), stream).await
        }
        Command::Ask { message, stream } => {
            let session = Session::new(boot::session_config(&config.ai));
            commands::ask(session, &message, stream).await
        }
        Command::Status => {
            let session = Session::new(boot::session_config(&config.ai));
            commands::status(&session).await
        }
        Command::Navigate { path } => {
            let router = boot::build_router(boot::open_store(&config.storage)?);
            commands::navigate(&router, &path)
        }
        Command::Login => commands::login(&boot::open_store(&config.storage)?),
        Command::Logout => commands::logout(&boot::open_store(&config.storage)?),
    }
}
