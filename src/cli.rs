use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pdfchat")]
#[command(about = "Chat with a PDF through a question-answering backend", long_about = None)]
pub struct Args {
    #[arg(
        short = 'u',
        long = "user",
        global = true,
        help = "User identity (email) that owns the chat history"
    )]
    pub user: Option<String>,

    #[arg(short = 'v', long = "verbose", global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        long = "backend-url",
        global = true,
        help = "Backend base URL (e.g., http://localhost:8000)"
    )]
    pub backend_url: Option<String>,

    #[arg(long = "data-dir", global = true, help = "Directory holding stored sessions")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask a question about the attached document
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Extract a PDF and attach it to the current session
    Upload { path: PathBuf },
    /// Detach the current document
    ClearPdf,
    /// List the current and archived sessions, newest first
    History,
    /// Switch to a session by history index or id
    Switch { target: String },
    /// Print the current conversation
    Show,
    /// Archive the current session and clear it
    Logout,
    /// Write an example config file
    ConfigInit,
}
