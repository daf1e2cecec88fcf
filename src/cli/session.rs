//! Signed-in trading session menu

use anyhow::Result;
use owo_colors::OwoColorize;
use tracing::info;

use crate::catalog::{self, Catalog, Instrument};
use crate::cli::prompt;
use crate::payment::{ConsoleGateway, PaymentMethod, PaymentOutcome};
use crate::portfolio::display as portfolio_display;
use crate::portfolio::{PortfolioStore, SortKey};
use crate::trade::{SellDisposition, TradeEngine, TradeError};

/// Run the session loop until the user signs out
pub fn run(catalog: &mut Catalog, portfolio: &mut PortfolioStore, engine: &TradeEngine) -> Result<()> {
    let mut gateway = ConsoleGateway::new();
    info!("Session started for {}", portfolio.username());

    loop {
        print_menu(portfolio.username());
        let choice = prompt::read_choice("Enter your choice: ")?;
        match choice {
            Some(1) => buy_flow(catalog, portfolio, engine, &mut gateway)?,
            Some(2) => sell_flow(portfolio, engine)?,
            Some(3) => portfolio_display::print_portfolio(portfolio),
            Some(4) => most_profitable(portfolio),
            Some(5) => sort_flow(portfolio)?,
            Some(6) => add_instrument_flow(catalog)?,
            Some(7) => {
                println!("\n{}", "Signing out...".bright_blue());
                info!("Session ended for {}", portfolio.username());
                return Ok(());
            }
            _ => println!("\n{}", "Invalid choice. Please try again.".bright_red()),
        }
    }
}

fn print_menu(username: &str) {
    println!();
    println!("{}", "╔══════════════════════════════════════╗".bright_blue());
    println!(
        "{}{}{}",
        "║ ".bright_blue(),
        format!("{:^36}", format!("Main Menu ({})", username)).bright_yellow(),
        " ║".bright_blue()
    );
    println!("{}", "╠══════════════════════════════════════╣".bright_blue());
    for item in [
        "[1] Buy Stock",
        "[2] Sell Stock",
        "[3] View Portfolio",
        "[4] Most Profitable Share",
        "[5] Sort Portfolio",
        "[6] Add New Stock",
        "[7] Sign Out",
    ] {
        println!(
            "{}{}{}",
            "║ ".bright_blue(),
            format!("{:<36}", item).bright_yellow(),
            " ║".bright_blue()
        );
    }
    println!("{}", "╚══════════════════════════════════════╝".bright_blue());
}

fn buy_flow(
    catalog: &Catalog,
    portfolio: &mut PortfolioStore,
    engine: &TradeEngine,
    gateway: &mut ConsoleGateway,
) -> Result<()> {
    catalog::print_catalog(catalog);
    println!(
        "Available funds: {}",
        format!("${:.2}", engine.available_funds(portfolio)).bright_green()
    );

    let input = prompt::read_line("\nEnter symbol and quantity to buy separated by a space: ")?;
    let (symbol, quantity) = match prompt::parse_order(&input) {
        Ok(order) => order,
        Err(reason) => {
            println!("\n{}", format!("Invalid input: {}.", reason).bright_red());
            return Ok(());
        }
    };

    let Some(method) = choose_payment_method()? else {
        println!("\n{}", "Invalid choice! Purchase cancelled.".bright_red());
        return Ok(());
    };

    match engine.buy(catalog, portfolio, gateway, &symbol, quantity, method) {
        Ok(receipt) => {
            println!(
                "\n{}",
                format!(
                    "Bought {} shares of {} ({}) at ${:.2} each.",
                    receipt.quantity, receipt.name, receipt.symbol, receipt.unit_price
                )
                .bright_green()
            );
            println!("Total cost: {}", format!("${:.2}", receipt.total_cost).bright_green());
            if receipt.payment == PaymentOutcome::Declined {
                println!(
                    "{}",
                    "Payment was declined; the shares remain recorded in your portfolio."
                        .yellow()
                );
            }
        }
        Err(e) => print_trade_error(&e),
    }
    Ok(())
}

fn choose_payment_method() -> Result<Option<PaymentMethod>> {
    println!("\nChoose payment method:");
    println!("1. Cash Payment");
    println!("2. Credit Card Payment");
    println!("3. Debit Card Payment");
    println!("4. UPI Payment");
    let method = match prompt::read_choice("Enter your choice: ")? {
        Some(1) => Some(PaymentMethod::Cash),
        Some(2) => Some(PaymentMethod::CreditCard),
        Some(3) => Some(PaymentMethod::DebitCard),
        Some(4) => Some(PaymentMethod::Upi),
        _ => None,
    };
    Ok(method)
}

fn sell_flow(portfolio: &mut PortfolioStore, engine: &TradeEngine) -> Result<()> {
    portfolio_display::print_portfolio(portfolio);
    if portfolio.is_empty() {
        return Ok(());
    }

    let input = prompt::read_line("\nEnter symbol and quantity to sell separated by a space: ")?;
    let (symbol, quantity) = match prompt::parse_order(&input) {
        Ok(order) => order,
        Err(reason) => {
            println!("\n{}", format!("Invalid input: {}.", reason).bright_red());
            return Ok(());
        }
    };

    match engine.sell(portfolio, &symbol, quantity) {
        Ok(receipt) => {
            println!(
                "\n{}",
                format!(
                    "Sold {} shares of {} ({}) at ${:.2} each.",
                    receipt.quantity, receipt.name, receipt.symbol, receipt.unit_price
                )
                .bright_green()
            );
            println!(
                "Total amount received: {}",
                format!("${:.2}", receipt.proceeds).bright_green()
            );
            if receipt.disposition == SellDisposition::Closed {
                println!("{}", "Position closed.".bright_blue());
            }
        }
        Err(e) => print_trade_error(&e),
    }
    Ok(())
}

fn most_profitable(portfolio: &PortfolioStore) {
    match portfolio.most_profitable() {
        Some(position) => {
            println!("\n{}", "MOST PROFITABLE SHARE".bright_yellow());
            println!("{}", "─".repeat(40).bright_black());
            portfolio_display::print_position(position);
        }
        None => println!("\n{}", "No shares in the portfolio.".bright_black().italic()),
    }
}

fn sort_flow(portfolio: &mut PortfolioStore) -> Result<()> {
    println!("\nSort Portfolio By:");
    println!("1. Symbol");
    println!("2. Price");
    println!("3. Quantity");
    let key = match prompt::read_choice("Enter your choice: ")? {
        Some(1) => SortKey::Symbol,
        Some(2) => SortKey::Price,
        Some(3) => SortKey::Quantity,
        _ => {
            println!("\n{}", "Invalid choice!".bright_red());
            return Ok(());
        }
    };

    match portfolio.sort_by(key) {
        Ok(()) => {
            println!("\n{}", "Portfolio sorted successfully.".bright_green());
            portfolio_display::print_portfolio(portfolio);
        }
        Err(e) => println!("\n{}", format!("Warning: {}", e).yellow()),
    }
    Ok(())
}

fn add_instrument_flow(catalog: &mut Catalog) -> Result<()> {
    let symbol = prompt::read_line("Enter symbol: ")?;
    let name = prompt::read_line("Enter name: ")?;

    let price = match prompt::parse_price(&prompt::read_line("Enter price: ")?) {
        Ok(price) => price,
        Err(reason) => {
            println!("\n{}", format!("Invalid input: {}.", reason).bright_red());
            return Ok(());
        }
    };
    let quantity = match prompt::parse_quantity(&prompt::read_line("Enter quantity: ")?) {
        Ok(quantity) => quantity,
        Err(reason) => {
            println!("\n{}", format!("Invalid input: {}.", reason).bright_red());
            return Ok(());
        }
    };

    match Instrument::new(symbol, name, price, quantity) {
        Ok(instrument) => {
            info!("Added instrument {} to the catalog", instrument.symbol);
            catalog.add(instrument);
            println!("\n{}", "New stock added successfully.".bright_green());
        }
        Err(e) => println!("\n{}", format!("Invalid input: {}.", e).bright_red()),
    }
    Ok(())
}

fn print_trade_error(error: &TradeError) {
    match error {
        TradeError::UnknownSymbol(_) => {
            println!("\n{}", "Stock not found.".bright_red());
        }
        TradeError::InvalidQuantity => {
            println!("\n{}", "Quantity must be at least 1.".bright_red());
        }
        TradeError::InsufficientFunds { needed, available } => {
            println!(
                "\n{}",
                format!(
                    "Insufficient funds to buy: need ${:.2}, available ${:.2}.",
                    needed, available
                )
                .bright_red()
            );
        }
        TradeError::NotHeld(_) => {
            println!("\n{}", "Stock not found in portfolio.".bright_red());
        }
        TradeError::InsufficientQuantity { .. } => {
            println!("\n{}", "Insufficient quantity to sell.".bright_red());
        }
        TradeError::Gateway(reason) => {
            println!("\n{}", format!("Payment failed: {}.", reason).bright_red());
        }
        TradeError::Persistence(e) => {
            println!("\n{}", format!("Warning: {}", e).yellow());
        }
    }
}
