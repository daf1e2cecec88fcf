//! Catalog rendering for the buy menu

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::catalog::Catalog;

/// Print the "Available Stocks" table
pub fn print_catalog(catalog: &Catalog) {
    println!("\n{}", "AVAILABLE STOCKS".bright_yellow());
    println!("{}", "─".repeat(60).bright_black());

    if catalog.is_empty() {
        println!("{}", "The catalog is empty.".bright_black().italic());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Symbol", "Name", "Price", "Quantity"]);

    for instrument in catalog.list() {
        table.add_row(vec![
            instrument.symbol.clone(),
            instrument.name.clone(),
            format!("${:.2}", instrument.price),
            instrument.listed_qty.to_string(),
        ]);
    }

    println!("{}", table);
}
