use clap::Parser;
use colored::*;
use std::process;
use std::sync::Arc;

use pdfchat::api::BackendClient;
use pdfchat::cli::{Args, Command};
use pdfchat::config::{Config, FileConfig};
use pdfchat::logging::init_logging;
use pdfchat::models::Session;
use pdfchat::session::{FilesystemKvStore, SessionStore};
use pdfchat::ui::{display_history, display_message, display_session, history_label};
use pdfchat::{ChatController, ChatError, ChatSession, Result};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Command::ConfigInit = args.command {
        match FileConfig::init_default() {
            Ok(path) => println!("{}", format!("Wrote {}", path.display()).green()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red(), e);
                process::exit(1);
            }
        }
        return;
    }

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    init_logging(config.verbose);

    if let Err(e) = run(args.command, config).await {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}

async fn run(command: Command, config: Config) -> Result<()> {
    let user = config.user.clone().ok_or(ChatError::NoIdentity)?;
    let store = SessionStore::new(Arc::new(FilesystemKvStore::new(&config.data_dir)));
    let controller = ChatController::open(store, user);

    match command {
        Command::Ask { question } => {
            let mut chat = ChatSession::new(controller, BackendClient::from_config(&config)?);
            if chat.send(&question.join(" ")).await?.is_some() {
                if let Some(answer) = chat.controller().messages().last() {
                    display_message(answer);
                }
            }
        }
        Command::Upload { path } => {
            let mut chat = ChatSession::new(controller, BackendClient::from_config(&config)?);
            let name = chat.upload(&path).await?;
            println!("{}", format!("PDF processed: {}", name).green());
        }
        Command::ClearPdf => {
            let mut chat = ChatSession::new(controller, BackendClient::from_config(&config)?);
            chat.clear().await?;
            println!("{}", "PDF context cleared.".green());
        }
        Command::History => display_history(&controller.history()),
        Command::Switch { target } => {
            let mut controller = controller;
            let session = resolve_target(&controller, &target)?;
            if controller.switch_to(&session).is_some() {
                println!("{}", "Previous conversation saved to history.".dimmed());
            }
            println!(
                "{}",
                format!("Loaded conversation from {}.", history_label(&session)).green()
            );
            display_session(controller.current());
        }
        Command::Show => display_session(controller.current()),
        Command::Logout => {
            let mut controller = controller;
            if controller.end_session().is_some() {
                println!("{}", "Conversation saved to history.".dimmed());
            }
            println!("{}", "Logged out.".green());
        }
        Command::ConfigInit => unreachable!("handled before configuration is loaded"),
    }

    Ok(())
}

/// Accepts a 1-based index into the history listing or a session id.
fn resolve_target(controller: &ChatController, target: &str) -> Result<Session> {
    if let Ok(index) = target.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| controller.history().into_iter().nth(i))
            .ok_or_else(|| ChatError::Other(format!("No history entry {}", index)));
    }

    controller
        .find(target)
        .ok_or_else(|| ChatError::Other(format!("No session with id '{}'", target)))
}
