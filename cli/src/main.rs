//! `studymate`: terminal front end for the StudyMate backend.
//!
//! Runs the same controller flows as the browser client against a JSON-file
//! credential store. Alerts and navigation go to stderr; any alert makes the
//! command fail.

mod file_store;
mod terminal;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use studymate::api::http::ReqwestTransport;
use studymate::api::{ApiClient, AuthKind, TransportError};
use studymate::config::ApiConfig;
use studymate::controller::{
    AuthOutcome, ChatOutcome, Page, RoadmapOutcome, generate_roadmap, greeting, logout, send_chat,
    submit_credentials,
};
use studymate::wire::{Credentials, PlanRequest};

use crate::file_store::{FileStore, default_store_path};
use crate::terminal::{TerminalChat, TerminalControl, TerminalRoadmap, TerminalShell};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no credential store location; pass --store or set STUDYMATE_HOME or HOME")]
    NoStorePath,
    #[error("http client setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Alert(String),
    #[error("not logged in")]
    NotLoggedIn,
    #[error("plan generation failed: {0}")]
    Plan(String),
    #[error("chat request failed")]
    Chat,
    #[error("stdin read failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "studymate", about = "StudyMate terminal client")]
struct Cli {
    /// Backend base URL. Defaults to `STUDYMATE_BASE_URL`, then `http://127.0.0.1:5000`.
    #[arg(long)]
    base_url: Option<String>,

    /// Credential file path.
    #[arg(long, env = "STUDYMATE_STORE")]
    store: Option<PathBuf>,

    /// Log controller events to stderr.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login(CredentialArgs),
    Signup(CredentialArgs),
    Logout,
    Whoami,
    Plan(PlanArgs),
    /// Send one message, or chat line by line from stdin when none is given.
    Chat { message: Option<String> },
}

#[derive(Args, Debug)]
struct CredentialArgs {
    #[arg(long, short)]
    username: String,

    #[arg(long, short, env = "STUDYMATE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[arg(long)]
    career_goal: String,

    #[arg(long)]
    yearly_goal: String,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = open_store(cli.store)?;
    let shell = TerminalShell::new();
    let base_url = cli.base_url.as_deref();

    match cli.command {
        Command::Logout => {
            logout(&store, &shell);
            Ok(())
        }
        Command::Whoami => {
            println!("{}", greeting(&store, Page::Home).unwrap_or_default());
            Ok(())
        }
        Command::Login(args) => run_auth(&connect(base_url)?, &store, &shell, AuthKind::Login, args).await,
        Command::Signup(args) => run_auth(&connect(base_url)?, &store, &shell, AuthKind::Signup, args).await,
        Command::Plan(args) => run_plan(&connect(base_url)?, &store, &shell, args).await,
        Command::Chat { message: Some(message) } => run_chat_once(&connect(base_url)?, &shell, &message).await,
        Command::Chat { message: None } => run_chat_repl(&connect(base_url)?, &shell).await,
    }
}

fn connect(base_url: Option<&str>) -> Result<ApiClient<ReqwestTransport>, CliError> {
    Ok(ApiClient::new(ReqwestTransport::new(api_config(base_url))?))
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn api_config(base_url: Option<&str>) -> ApiConfig {
    let env = ApiConfig::from_env();
    match base_url {
        Some(url) => ApiConfig { timeouts: env.timeouts, ..ApiConfig::new(url) },
        None => env,
    }
}

fn open_store(explicit: Option<PathBuf>) -> Result<FileStore, CliError> {
    let path = match explicit {
        Some(path) => path,
        None => default_store_path(
            std::env::var("STUDYMATE_HOME").ok().as_deref(),
            std::env::var("HOME").ok().as_deref(),
        )
        .ok_or(CliError::NoStorePath)?,
    };
    let store = FileStore::new(path);
    tracing::debug!(path = %store.path().display(), "credential store");
    Ok(store)
}

fn submit_label(kind: AuthKind) -> &'static str {
    match kind {
        AuthKind::Login => "Login",
        AuthKind::Signup => "Sign Up",
    }
}

async fn run_auth(
    api: &ApiClient<ReqwestTransport>,
    store: &FileStore,
    shell: &TerminalShell,
    kind: AuthKind,
    args: CredentialArgs,
) -> Result<(), CliError> {
    let control = TerminalControl::new(submit_label(kind));
    let credentials = Credentials::new(args.username, args.password);
    match submit_credentials(api, store, shell, &control, kind, &credentials).await {
        AuthOutcome::SignedIn(credential) => {
            tracing::debug!(page = ?shell.last_navigation(), "auth finished");
            println!("Signed in as {}", credential.username);
            Ok(())
        }
        _ => Err(CliError::Alert(shell.last_alert().unwrap_or_default())),
    }
}

async fn run_plan(
    api: &ApiClient<ReqwestTransport>,
    store: &FileStore,
    shell: &TerminalShell,
    args: PlanArgs,
) -> Result<(), CliError> {
    let view = TerminalRoadmap::new();
    let request = PlanRequest { career_goal: args.career_goal, yearly_goal: args.yearly_goal };
    match generate_roadmap(api, store, shell, &view, &request).await {
        RoadmapOutcome::Rendered(count) => {
            tracing::debug!(count, "plan rendered");
            Ok(())
        }
        RoadmapOutcome::Redirected => Err(CliError::NotLoggedIn),
        RoadmapOutcome::Failed(text) => Err(CliError::Plan(text)),
    }
}

async fn run_chat_once(
    api: &ApiClient<ReqwestTransport>,
    shell: &TerminalShell,
    message: &str,
) -> Result<(), CliError> {
    let view = TerminalChat::new();
    let outcome = send_chat(api, shell, &view, message).await;
    print_bot_text(&view);
    match outcome {
        ChatOutcome::Failed | ChatOutcome::Detached => Err(CliError::Chat),
        ChatOutcome::Replied(_) | ChatOutcome::Ignored => Ok(()),
    }
}

async fn run_chat_repl(api: &ApiClient<ReqwestTransport>, shell: &TerminalShell) -> Result<(), CliError> {
    let view = TerminalChat::new();
    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        if matches!(send_chat(api, shell, &view, &line).await, ChatOutcome::Replied(_) | ChatOutcome::Failed) {
            print_bot_text(&view);
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> Result<(), CliError> {
    let mut err = io::stderr();
    write!(err, "> ")?;
    err.flush()?;
    Ok(())
}

fn print_bot_text(view: &TerminalChat) {
    if let Some(text) = view.last_bot_text() {
        println!("{text}");
    }
}
