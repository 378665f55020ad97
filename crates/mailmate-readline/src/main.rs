mod console;
mod helper;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use mailmate_core::format::COMMAND_GUIDE;
use mailmate_core::gateway::EmailGateway;
use mailmate_core::{BootstrapOutcome, ClientConfig, SessionBootstrap, TurnOutcome};
use mailmate_infrastructure::{ConfigService, LogTarget, init_logging};
use mailmate_interaction::HttpEmailGateway;

use crate::console::ConsoleSink;
use crate::helper::CliHelper;

#[derive(Parser)]
#[command(name = "mailmate")]
#[command(version, about = "Chat with your email inbox", long_about = None)]
struct Cli {
    /// Config file to read instead of ~/.config/mailmate/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file and MAILMATE_BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,

    /// Backend session cookie value (overrides config file and MAILMATE_SESSION)
    #[arg(long)]
    session: Option<String>,

    /// Write logs to stderr instead of the log directory
    #[arg(long)]
    log_stderr: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<ClientConfig> {
        let service = match &self.config {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new(),
        };
        let mut config = service.load().context("Failed to load configuration")?;

        if let Some(url) = &self.backend_url {
            config.backend_url = url.clone();
        }
        if let Some(session) = &self.session {
            config.session_cookie = Some(session.clone());
        }
        Ok(config)
    }
}

/// The mailmate chat REPL.
///
/// 1. Resolves configuration and installs logging
/// 2. Asks the backend who is signed in (or prints the login URL and exits)
/// 3. Reads one utterance at a time and hands it to the conversation controller
/// 4. `/logout` ends the backend session; `quit`, `exit` or Ctrl-D leave
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let target = if cli.log_stderr {
        LogTarget::Stderr
    } else {
        LogTarget::default_file()?
    };
    let _log_guard = init_logging(target)?;

    // ===== Backend Initialization =====
    let config = cli.resolve_config()?;
    tracing::info!("Starting mailmate against {}", config.base_url());
    let gateway: Arc<dyn EmailGateway> = Arc::new(HttpEmailGateway::new(&config)?);

    println!("{}", "Loading your assistant...".bright_black());
    let sink = Arc::new(ConsoleSink::new());
    let mut controller = match SessionBootstrap::new(gateway).run(sink).await {
        Ok(BootstrapOutcome::Ready(controller)) => controller,
        Ok(BootstrapOutcome::LoginRequired { login_url }) => {
            println!("{}", "You are not signed in.".yellow());
            println!("Sign in at {}", login_url.bright_cyan());
            println!(
                "{}",
                "Then set MAILMATE_SESSION (or --session) to your session_id cookie.".bright_black()
            );
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            eprintln!("{}", format!("Could not reach the backend: {}", e).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!(
        "{}",
        format!(
            "=== Email Assistant · Welcome, {} ===",
            controller.session().display_name
        )
        .bright_magenta()
        .bold()
    );
    println!(
        "{}",
        "Try: \"read emails\" • \"reply 1\" • \"delete 2\"  ('/logout' to sign out, 'quit' to exit)"
            .bright_black()
    );
    println!();

    let mut logout_requested = false;

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if trimmed == "/logout" {
                    logout_requested = true;
                    break;
                }
                if trimmed == "/help" {
                    println!("{}", COMMAND_GUIDE.bright_black());
                    continue;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                match controller.submit(&line).await {
                    Ok(TurnOutcome::Busy) => {
                        println!("{}", "Still working on the previous request...".yellow());
                    }
                    Ok(outcome) => tracing::debug!("Turn finished: {:?}", outcome),
                    Err(e) => {
                        tracing::error!("Transcript invariant violated: {}", e);
                        eprintln!("{}", format!("Error: {}", e).red());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    if logout_requested {
        match controller.logout().await {
            Ok(target) => {
                println!("{}", "Signed out.".bright_green());
                println!("{}", format!("Redirect: {}", target).bright_black());
            }
            Err(e) => {
                eprintln!("{}", format!("Logout failed: {}", e).red());
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
