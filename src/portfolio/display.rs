//! Portfolio rendering for the session menus

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::portfolio::store::PortfolioStore;
use crate::portfolio::types::Position;

/// Print the holdings table and total portfolio value
pub fn print_portfolio(store: &PortfolioStore) {
    println!("\n{}", "PORTFOLIO".bright_yellow());
    println!("{}", "─".repeat(60).bright_black());

    if store.is_empty() {
        println!("{}", "Portfolio is empty.".bright_black().italic());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Symbol", "Name", "Price", "Quantity", "Value"]);

    for position in store.list() {
        table.add_row(vec![
            position.symbol.clone(),
            position.name.clone(),
            format!("${:.2}", position.unit_price),
            position.quantity.to_string(),
            format!("${:.2}", position.value()),
        ]);
    }

    println!("{}", table);
    println!(
        "Total Portfolio Value: {}",
        format!("${:.2}", store.total_value()).bright_green()
    );
}

/// Print one holding in card form (used for the most-profitable view)
pub fn print_position(position: &Position) {
    println!("Symbol:   {}", position.symbol.bright_cyan());
    println!("Name:     {}", position.name);
    println!("Price:    ${:.2}", position.unit_price);
    println!("Quantity: {}", position.quantity);
    println!(
        "Value:    {}",
        format!("${:.2}", position.value()).bright_green()
    );
}
