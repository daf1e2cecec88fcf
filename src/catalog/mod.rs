//! In-memory catalog of tradable instruments
//!
//! Seeded at startup with a fixed list; instruments added during a
//! session are not persisted across runs.

mod display;

pub use display::print_catalog;

use rust_decimal::Decimal;
use std::collections::HashMap;

/// Immutable descriptor of a tradable symbol
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    pub name: String,
    /// Listed price, used as the unit price at purchase time
    pub price: Decimal,
    /// Quantity shown in the catalog listing
    pub listed_qty: u32,
}

/// Instrument validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstrumentError {
    #[error("symbol must be non-empty, without whitespace or ';'")]
    InvalidSymbol,
    #[error("name must not contain ';'")]
    InvalidName,
    #[error("price must not be negative")]
    NegativePrice,
}

impl Instrument {
    /// Build a validated instrument. Symbols and names must be
    /// representable in the `;`-separated portfolio file format.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        listed_qty: u32,
    ) -> Result<Self, InstrumentError> {
        let symbol = symbol.into();
        let name = name.into();

        if symbol.is_empty() || symbol.chars().any(char::is_whitespace) || symbol.contains(';') {
            return Err(InstrumentError::InvalidSymbol);
        }
        if name.contains(';') {
            return Err(InstrumentError::InvalidName);
        }
        if price.is_sign_negative() {
            return Err(InstrumentError::NegativePrice);
        }

        Ok(Self {
            symbol,
            name,
            price,
            listed_qty,
        })
    }
}

/// Mapping from symbol to instrument
#[derive(Debug, Default)]
pub struct Catalog {
    instruments: HashMap<String, Instrument>,
}

/// The fixed startup listing: symbol, name, price in cents, listed quantity
const SEED: &[(&str, &str, i64, u32)] = &[
    ("AAPL", "Apple Inc.", 13500, 100),
    ("GOOGL", "Alphabet Inc.", 235000, 50),
    ("MSFT", "Microsoft Corporation", 30000, 75),
    ("AMZN", "Amazon.com Inc.", 330000, 30),
    ("FB", "Meta Platforms Inc.", 33000, 80),
    ("TSLA", "Tesla Inc.", 70000, 60),
    ("NFLX", "Netflix Inc.", 52000, 45),
    ("NVDA", "NVIDIA Corporation", 70000, 55),
];

impl Catalog {
    /// An empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog seeded with the standard listing
    pub fn with_seed() -> Self {
        let mut catalog = Self::new();
        for &(symbol, name, cents, listed_qty) in SEED {
            let instrument = Instrument::new(symbol, name, Decimal::new(cents, 2), listed_qty)
                .expect("seed instruments are valid");
            catalog.add(instrument);
        }
        catalog
    }

    /// Insert or overwrite an instrument
    pub fn add(&mut self, instrument: Instrument) {
        self.instruments
            .insert(instrument.symbol.clone(), instrument);
    }

    /// Look up an instrument by symbol (case-sensitive)
    pub fn lookup(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.get(symbol)
    }

    /// All instruments, sorted by symbol for stable display
    pub fn list(&self) -> Vec<&Instrument> {
        let mut instruments: Vec<&Instrument> = self.instruments.values().collect();
        instruments.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        instruments
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_seed_listing() {
        let catalog = Catalog::with_seed();

        assert_eq!(catalog.len(), 8);

        let aapl = catalog.lookup("AAPL").unwrap();
        assert_eq!(aapl.name, "Apple Inc.");
        assert_eq!(aapl.price, dec!(135.00));
        assert_eq!(aapl.listed_qty, 100);

        let amzn = catalog.lookup("AMZN").unwrap();
        assert_eq!(amzn.price, dec!(3300.00));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = Catalog::with_seed();

        assert!(catalog.lookup("AAPL").is_some());
        assert!(catalog.lookup("aapl").is_none());
    }

    #[test]
    fn test_add_overwrites() {
        let mut catalog = Catalog::with_seed();
        let updated = Instrument::new("AAPL", "Apple Inc.", dec!(150.00), 10).unwrap();

        catalog.add(updated);

        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.lookup("AAPL").unwrap().price, dec!(150.00));
    }

    #[test]
    fn test_list_sorted_by_symbol() {
        let catalog = Catalog::with_seed();
        let symbols: Vec<&str> = catalog.list().iter().map(|i| i.symbol.as_str()).collect();

        assert_eq!(
            symbols,
            vec!["AAPL", "AMZN", "FB", "GOOGL", "MSFT", "NFLX", "NVDA", "TSLA"]
        );
    }

    #[test]
    fn test_instrument_validation() {
        assert_eq!(
            Instrument::new("", "Empty", dec!(1.00), 1),
            Err(InstrumentError::InvalidSymbol)
        );
        assert_eq!(
            Instrument::new("A B", "Spaced", dec!(1.00), 1),
            Err(InstrumentError::InvalidSymbol)
        );
        assert_eq!(
            Instrument::new("A;B", "Separator", dec!(1.00), 1),
            Err(InstrumentError::InvalidSymbol)
        );
        assert_eq!(
            Instrument::new("ABC", "Semi;colon", dec!(1.00), 1),
            Err(InstrumentError::InvalidName)
        );
        assert_eq!(
            Instrument::new("ABC", "Negative", dec!(-1.00), 1),
            Err(InstrumentError::NegativePrice)
        );
        assert!(Instrument::new("ABC", "Fine", dec!(0.00), 0).is_ok());
    }
}
