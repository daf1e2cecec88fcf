//! Portfolio type definitions

use rust_decimal::Decimal;

/// A holding in one instrument
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub name: String,
    /// Unit price fixed at first purchase
    pub unit_price: Decimal,
    /// Held quantity; a position never stays at 0 (it is removed instead)
    pub quantity: u32,
}

impl Position {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Nominal value of the holding
    pub fn value(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Sort key for portfolio ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Symbol,
    Price,
    Quantity,
}

/// Outcome of removing quantity from a holding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Quantity reduced; the position remains
    Reduced,
    /// The whole holding was sold and the position dropped
    Removed,
    /// No position with that symbol
    SymbolNotFound,
    /// Requested more than held; nothing changed
    InsufficientQty,
}

/// A line skipped while loading a portfolio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line_no: usize,
    pub reason: String,
}

/// What happened while loading a portfolio file
#[derive(Debug, Default)]
pub struct PortfolioLoadReport {
    /// Positions loaded successfully
    pub loaded: usize,
    /// Malformed lines that were skipped
    pub skipped: Vec<SkippedLine>,
    /// Set when the file existed but could not be read; the portfolio starts empty
    pub io_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_position_value() {
        let position = Position::new("AAPL", "Apple Inc.", dec!(135.00), 5);
        assert_eq!(position.value(), dec!(675.00));
    }

    #[test]
    fn test_zero_price_value() {
        let position = Position::new("FREE", "Free Shares", dec!(0.00), 100);
        assert_eq!(position.value(), dec!(0.00));
    }
}
