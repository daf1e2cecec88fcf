//! Command-line interface for papertrade
//!
//! The binary takes a few global flags and then runs an interactive
//! menu loop: sign in or sign up against the credential store, then
//! trade inside a per-user session.

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::info;

mod prompt;
mod session;

use crate::auth::{AddUserOutcome, CredentialStore};
use crate::catalog::Catalog;
use crate::config::{self, AppConfig};
use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{init_logging, LogMode, LoggingConfig};
use crate::portfolio::PortfolioStore;
use crate::trade::TradeEngine;

#[derive(Parser)]
#[command(name = "papertrade")]
#[command(version)]
#[command(about = "Console paper-trading desk with per-user portfolios", long_about = None)]
pub struct Cli {
    /// Data directory path (credentials, portfolios, logs)
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Deduct purchases from starting cash instead of total portfolio value
    #[arg(long)]
    pub strict_cash: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Wire everything up and run the top-level menu loop
    pub fn run(self) -> Result<()> {
        let data_paths = DataPaths::new(&self.data_dir);
        data_paths
            .ensure_directories()
            .with_context(|| format!("Failed to prepare data directory {:?}", self.data_dir))?;

        // File-only logging: console output belongs to the menus
        init_logging(LoggingConfig::new(
            LogMode::FileOnly,
            data_paths.clone(),
            self.verbose,
        ))?;

        let app_config = AppConfig::load(&data_paths);
        let strict_cash = config::resolve_strict_cash(self.strict_cash, &app_config);
        let engine = TradeEngine::new(strict_cash);
        info!(strict_cash, "Trade engine configured");

        let (mut credentials, report) = CredentialStore::load(data_paths.credentials_file());
        if let Some(reason) = &report.io_error {
            println!(
                "{}",
                format!("Warning: could not load credentials ({}); starting empty.", reason)
                    .yellow()
            );
        }
        for line_no in &report.skipped_lines {
            println!(
                "{}",
                format!("Warning: skipped malformed credentials record at line {}.", line_no)
                    .yellow()
            );
        }

        let mut catalog = Catalog::with_seed();

        println!("\n{}", "Welcome to the papertrade trading desk".bright_white().bold());
        if engine.strict_cash() {
            println!("{}", "Strict cash mode is on.".bright_blue());
        }

        loop {
            println!();
            println!("1. Sign In");
            println!("2. Sign Up");
            println!("3. Exit");
            match prompt::read_choice("Enter your choice: ")? {
                Some(1) => sign_in(&credentials, &data_paths, &mut catalog, &engine)?,
                Some(2) => sign_up(&mut credentials)?,
                Some(3) => {
                    println!("\n{}", "Exiting...".bright_blue());
                    return Ok(());
                }
                _ => println!("\n{}", "Invalid choice. Please try again.".bright_red()),
            }
        }
    }
}

fn sign_in(
    credentials: &CredentialStore,
    data_paths: &DataPaths,
    catalog: &mut Catalog,
    engine: &TradeEngine,
) -> Result<()> {
    let username = prompt::read_line("Enter username: ")?;
    let password = rpassword::prompt_password("Enter password: ")
        .context("Failed to read password")?;

    if !credentials.authenticate(&username, &password) {
        println!(
            "\n{}",
            "Invalid username or password. Please try again.".bright_red()
        );
        return Ok(());
    }

    println!("{}", "Sign in successful!".bright_green());
    info!("User {} signed in", username);

    let (mut portfolio, report) = PortfolioStore::load(data_paths, &username);
    if let Some(reason) = &report.io_error {
        println!(
            "{}",
            format!("Warning: could not load portfolio ({}); starting empty.", reason).yellow()
        );
    }
    for skipped in &report.skipped {
        println!(
            "{}",
            format!(
                "Warning: skipped malformed portfolio record at line {} ({}).",
                skipped.line_no, skipped.reason
            )
            .yellow()
        );
    }

    session::run(catalog, &mut portfolio, engine)
}

fn sign_up(credentials: &mut CredentialStore) -> Result<()> {
    let username = prompt::read_line("Enter new username: ")?;
    let password = rpassword::prompt_password("Enter password: ")
        .context("Failed to read password")?;

    match credentials.add_user(&username, &password) {
        Ok(AddUserOutcome::Added) => {
            println!(
                "\n{}",
                "Sign up successful! You can now sign in.".bright_green()
            );
        }
        Ok(AddUserOutcome::DuplicateUser) => {
            println!(
                "\n{}",
                "Username already exists. Please try again.".bright_red()
            );
        }
        Ok(AddUserOutcome::InvalidUsername) => {
            println!(
                "\n{}",
                "Username must be non-empty and contain no spaces.".bright_red()
            );
        }
        Ok(AddUserOutcome::PolicyFailed(rules)) => {
            println!("\n{}", "Password does not meet requirements:".bright_red());
            for rule in rules {
                println!("  {} {}", "-".bright_red(), rule);
            }
        }
        Err(e) => {
            println!(
                "\n{}",
                format!("Account created but could not be saved: {}.", e).yellow()
            );
        }
    }
    Ok(())
}
