//! Command line front end.
//!
//! Each subcommand is one screen action. `scan` runs the interactive scanner
//! loop fed by a keyboard-wedge barcode reader.

use std::time::Instant;

use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::auth;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{Product, Session};
use crate::quadrature;
use crate::scan::{bulk_notice, ScanOutcome, ScanWorkflow, Scanner};
use crate::screens::{self, Notice, ProductBoard, Screen, Selection};
use crate::session::SessionStore;

/// Warehouse and driver verification client.
#[derive(Debug, Parser)]
#[command(name = "flopar", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        username: String,
        /// Prompted for when omitted
        #[arg(short, long, env = "FLOPAR_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the home screen for the stored session
    Whoami,
    /// List today's products
    Products {
        /// Filter by name or code
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only products not yet verified by your role
        #[arg(long)]
        pending: bool,
    },
    /// Show one product in full
    Detail { id: i64 },
    /// Verify a product by typing its code
    Verify {
        code: String,
        /// Verify every eligible match without asking
        #[arg(long)]
        all: bool,
    },
    /// Interactive barcode scanning
    Scan,
    /// Confirm the quadrature of your truck
    Confirm,
    /// List staff accounts (administrators)
    Users,
}

/// Run one command to completion.
pub async fn run(cli: Cli, config: &Config) -> Result<(), AppError> {
    let store = SessionStore::new(&config.session_path);
    let api = ApiClient::new(config, store.clone())?;

    match cli.command {
        Command::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => DefaultEditor::new()?.readline("Password: ")?,
            };
            let session = auth::login(&api, &username, &password).await?;
            println!("{}", screens::home(&session));
        }
        Command::Logout => {
            auth::logout(&api).await?;
            println!(
                "{}",
                Notice::info("Logged out", format!("Removed {}", store.path().display()))
            );
        }
        Command::Whoami => {
            let session = store.require().await?;
            println!("{}", screens::home(&session));
        }
        Command::Products { query, pending } => {
            let (session, api) = open_session(api).await?;
            let mut board = ProductBoard::load(&api, &session).await?;
            board.set_query(query);
            board.set_pending_only(pending);
            print_board(&board);
        }
        Command::Detail { id } => {
            let (_, api) = open_session(api).await?;
            let product = api.product_detail(id).await?;
            println!("{}", Notice::info("Product detail", screens::render_detail(&product)));
        }
        Command::Verify { code, all } => {
            let (session, api) = open_session(api).await?;
            let workflow = ScanWorkflow::new(&api, &session);
            match workflow.process_manual(&code).await? {
                ScanOutcome::NeedsSelection(candidates) => {
                    let mut editor = if all { None } else { Some(DefaultEditor::new()?) };
                    choose_and_verify(editor.as_mut(), &workflow, candidates).await?;
                }
                outcome => print_outcome(&outcome),
            }
        }
        Command::Scan => {
            let (session, api) = open_session(api).await?;
            let span = tracing::info_span!("scan_session", id = %Uuid::new_v4());
            scan_loop(&api, &session, config).instrument(span).await?;
        }
        Command::Confirm => {
            let (session, api) = open_session(api).await?;
            if !Screen::for_role(session.role).can_confirm_quadrature() {
                return Err(AppError::Forbidden(format!(
                    "The {} screen cannot confirm a quadrature",
                    session.role
                )));
            }
            let outcome = quadrature::confirm(&api, &session).await?;
            println!("{}", outcome.notice());
        }
        Command::Users => {
            let (session, api) = open_session(api).await?;
            screens::require_admin(&session)?;
            for user in api.list_users().await? {
                let name = format!(
                    "{} {}",
                    user.first_name.unwrap_or_default(),
                    user.last_name.unwrap_or_default()
                );
                println!(
                    "#{} {} ({}) role {} plate {} phone {}{}",
                    user.id,
                    user.username,
                    name.trim(),
                    user.role,
                    user.patent.as_deref().unwrap_or("-"),
                    user.phone.as_deref().unwrap_or("-"),
                    if user.is_active { "" } else { " [disabled]" }
                );
            }
        }
    }

    Ok(())
}

/// Load the stored session and bind its token to the client.
async fn open_session(api: ApiClient) -> Result<(Session, ApiClient), AppError> {
    let session = api.store().require().await?;
    let api = api.with_session(&session);
    Ok((session, api))
}

fn print_board(board: &ProductBoard) {
    let visible = board.visible();
    if visible.is_empty() {
        println!("No products for today.");
        return;
    }

    for product in &visible {
        println!("#{:<6} {}", product.id, screens::render_card(product, board.checkpoint()));
    }
    println!(
        "\n{} shown of {}, {} pending for {} (batch {})",
        visible.len(),
        board.products.len(),
        board.pending_count(),
        board.checkpoint().label(),
        board.batch
    );
}

fn print_outcome(outcome: &ScanOutcome) {
    if let Some(notice) = outcome.notice() {
        println!("{}", notice);
    }
}

/// Let the user pick among several candidates, then verify the picks.
///
/// Without an editor every candidate is picked.
async fn choose_and_verify(
    editor: Option<&mut DefaultEditor>,
    workflow: &ScanWorkflow<'_>,
    candidates: Vec<Product>,
) -> Result<(), AppError> {
    let mut selection = Selection::new(candidates);
    if selection.is_empty() {
        return Ok(());
    }

    match editor {
        None => selection.select_all(),
        Some(editor) => {
            println!("Select the product to verify:");
            for (index, product) in selection.items().iter().enumerate() {
                println!("  {:>2}. {}", index + 1, screens::render_candidate(product));
            }
            loop {
                let line =
                    choice_or_cancel(editor.readline("choice (e.g. 1,3 or all; empty cancels)> "))?;
                match selection.apply_input(&line) {
                    Ok(_) => break,
                    Err(e) => println!("{}", Notice::from_error(&e)),
                }
            }
        }
    }

    if selection.selected_count() == 0 {
        println!("{}", Notice::info("Cancelled", "No product was verified."));
        return Ok(());
    }

    let report = workflow.verify_selected(&selection).await?;
    println!("{}", bulk_notice(&report));
    Ok(())
}

/// Ctrl-C or Ctrl-D at the choice prompt cancels the choice, like a blank line.
fn choice_or_cancel(read: Result<String, ReadlineError>) -> Result<String, AppError> {
    match read {
        Ok(line) => Ok(line),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

/// What one line typed at the scan prompt led to.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanStep {
    Quit,
    /// Arm/cancel control; carries whether the scanner is now armed
    Toggled { armed: bool },
    /// Input while the scanner is off
    Off,
    /// Dropped by the debounce window or the format filter
    Dropped,
    Resolved(ScanOutcome),
}

/// Handle one line from the keyboard-wedge reader.
///
/// Only reads the scanner accepts reach the backend. On error the scanner is
/// back to idle.
pub async fn scan_step(
    scanner: &mut Scanner,
    workflow: &ScanWorkflow<'_>,
    line: &str,
    now: Instant,
) -> Result<ScanStep, AppError> {
    let input = line.trim();
    match input {
        "q" | "quit" => return Ok(ScanStep::Quit),
        "" | "a" => {
            scanner.toggle_arm();
            return Ok(ScanStep::Toggled {
                armed: scanner.is_armed(),
            });
        }
        _ => {}
    }

    if !scanner.is_armed() {
        tracing::debug!(state = ?scanner.state(), "Read while not armed");
        return Ok(ScanStep::Off);
    }

    let Some(code) = scanner.on_read(input, now) else {
        return Ok(ScanStep::Dropped);
    };
    scanner.begin_resolving();

    match workflow.process(&code).await {
        Ok(outcome) => {
            scanner.settle(&outcome);
            Ok(ScanStep::Resolved(outcome))
        }
        Err(e) => {
            scanner.reset();
            Err(e)
        }
    }
}

async fn scan_loop(api: &ApiClient, session: &Session, config: &Config) -> Result<(), AppError> {
    let workflow = ScanWorkflow::new(api, session);
    let mut scanner = Scanner::new(config.scan_debounce);
    let mut editor = DefaultEditor::new()?;

    println!("{}", screens::home(session));
    println!("Empty line or 'a' arms/cancels the scanner, 'q' leaves.");

    loop {
        let prompt = if scanner.is_armed() { "armed> " } else { "idle> " };
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        match scan_step(&mut scanner, &workflow, &line, Instant::now()).await {
            Ok(ScanStep::Quit) => break,
            Ok(ScanStep::Toggled { armed }) => {
                println!("{}", if armed { "Scanner armed" } else { "Scanner off" });
            }
            Ok(ScanStep::Off) => println!("Scanner is off; press Enter to arm it."),
            Ok(ScanStep::Dropped) => {}
            Ok(ScanStep::Resolved(ScanOutcome::NeedsSelection(candidates))) => {
                let result = choose_and_verify(Some(&mut editor), &workflow, candidates).await;
                scanner.reset();
                if let Err(e) = result {
                    if matches!(e, AppError::Unauthorized(_)) {
                        return Err(e);
                    }
                    println!("{}", Notice::from_error(&e));
                }
            }
            Ok(ScanStep::Resolved(outcome)) => print_outcome(&outcome),
            Err(e @ AppError::Unauthorized(_)) => return Err(e),
            Err(e) => println!("{}", Notice::from_error(&e)),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_at_choice_prompt_cancels() {
        assert_eq!(choice_or_cancel(Err(ReadlineError::Interrupted)).unwrap(), "");
        assert_eq!(choice_or_cancel(Err(ReadlineError::Eof)).unwrap(), "");
        assert_eq!(choice_or_cancel(Ok("1,2".to_string())).unwrap(), "1,2");

        let mut selection = Selection::new(vec!["a", "b"]);
        selection.select_all();
        let line = choice_or_cancel(Err(ReadlineError::Interrupted)).unwrap();
        assert_eq!(selection.apply_input(&line).unwrap(), 0);
    }

    #[test]
    fn test_terminal_failure_at_choice_prompt_is_an_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err = choice_or_cancel(Err(ReadlineError::Io(io))).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
