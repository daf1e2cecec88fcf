//! Buy/sell orchestration
//!
//! The engine is stateless: every call validates against the catalog and
//! portfolio it is handed, applies the mutation, and reports a receipt.
//! On a buy the holding is recorded before the gateway is charged, and a
//! declined payment never rolls the holding back.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::payment::{PaymentGateway, PaymentMethod, PaymentOutcome};
use crate::portfolio::store::{starting_cash, PortfolioError, PortfolioStore};
use crate::portfolio::types::RemoveOutcome;

/// Trade validation and persistence errors
#[derive(Debug, thiserror::Error)]
pub enum TradeError {
    #[error("stock {0} not found in the catalog")]
    UnknownSymbol(String),
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("insufficient funds: need ${needed:.2}, available ${available:.2}")]
    InsufficientFunds { needed: Decimal, available: Decimal },
    #[error("stock {0} not held in the portfolio")]
    NotHeld(String),
    #[error("insufficient quantity: requested {requested}, holding {held}")]
    InsufficientQuantity { requested: u32, held: u32 },
    #[error("payment gateway failure: {0}")]
    Gateway(String),
    #[error(transparent)]
    Persistence(#[from] PortfolioError),
}

/// What happened to the position after a sell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellDisposition {
    /// Part of the holding remains
    Reduced,
    /// The holding was sold out and removed
    Closed,
}

/// Completed buy
#[derive(Debug, Clone)]
pub struct BuyReceipt {
    pub symbol: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub total_cost: Decimal,
    pub payment: PaymentOutcome,
}

/// Completed sell
#[derive(Debug, Clone)]
pub struct SellReceipt {
    pub symbol: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub proceeds: Decimal,
    pub disposition: SellDisposition,
}

/// Stateless buy/sell orchestrator
#[derive(Debug, Clone, Copy)]
pub struct TradeEngine {
    strict_cash: bool,
}

impl TradeEngine {
    pub fn new(strict_cash: bool) -> Self {
        Self { strict_cash }
    }

    pub fn strict_cash(&self) -> bool {
        self.strict_cash
    }

    /// Funds a buy is checked against. By default this is the total
    /// portfolio value, which loosens as holdings grow. Strict mode
    /// spends down the starting cash instead (sells refund at purchase
    /// price, so remaining cash is starting cash minus the value of
    /// current holdings).
    pub fn available_funds(&self, portfolio: &PortfolioStore) -> Decimal {
        if self.strict_cash {
            starting_cash() - portfolio.holdings_value()
        } else {
            portfolio.total_value()
        }
    }

    /// Buy `quantity` shares of `symbol` at the listed price. The holding
    /// is recorded and persisted before the charge; the payment outcome
    /// is reported in the receipt.
    pub fn buy(
        &self,
        catalog: &Catalog,
        portfolio: &mut PortfolioStore,
        gateway: &mut dyn PaymentGateway,
        symbol: &str,
        quantity: u32,
        method: PaymentMethod,
    ) -> Result<BuyReceipt, TradeError> {
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity);
        }

        let instrument = catalog
            .lookup(symbol)
            .ok_or_else(|| TradeError::UnknownSymbol(symbol.to_string()))?;

        let total_cost = instrument.price * Decimal::from(quantity);
        let available = self.available_funds(portfolio);
        if total_cost > available {
            return Err(TradeError::InsufficientFunds {
                needed: total_cost,
                available,
            });
        }

        portfolio.add(&instrument.symbol, &instrument.name, instrument.price, quantity)?;
        info!(
            "Bought {} x {} at {} for {} (user {})",
            quantity,
            instrument.symbol,
            instrument.price,
            total_cost,
            portfolio.username()
        );

        let payment = gateway
            .charge(method, total_cost)
            .map_err(|e| TradeError::Gateway(e.to_string()))?;
        if payment == PaymentOutcome::Declined {
            // A declined payment does not undo the recorded holding
            warn!(
                "Payment declined for {} x {} (user {})",
                quantity,
                instrument.symbol,
                portfolio.username()
            );
        }

        Ok(BuyReceipt {
            symbol: instrument.symbol.clone(),
            name: instrument.name.clone(),
            unit_price: instrument.price,
            quantity,
            total_cost,
            payment,
        })
    }

    /// Sell `quantity` shares of a held symbol at its recorded unit
    /// price. No gateway is involved on the sell side.
    pub fn sell(
        &self,
        portfolio: &mut PortfolioStore,
        symbol: &str,
        quantity: u32,
    ) -> Result<SellReceipt, TradeError> {
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity);
        }

        let position = portfolio
            .position(symbol)
            .ok_or_else(|| TradeError::NotHeld(symbol.to_string()))?;
        if quantity > position.quantity {
            return Err(TradeError::InsufficientQuantity {
                requested: quantity,
                held: position.quantity,
            });
        }

        let name = position.name.clone();
        let unit_price = position.unit_price;
        let proceeds = unit_price * Decimal::from(quantity);

        let disposition = match portfolio.remove(symbol, quantity)? {
            RemoveOutcome::Removed => SellDisposition::Closed,
            RemoveOutcome::Reduced => SellDisposition::Reduced,
            // Both were ruled out above; single-threaded access means the
            // portfolio cannot change in between.
            RemoveOutcome::SymbolNotFound => {
                return Err(TradeError::NotHeld(symbol.to_string()))
            }
            RemoveOutcome::InsufficientQty => {
                return Err(TradeError::InsufficientQuantity {
                    requested: quantity,
                    held: 0,
                })
            }
        };

        info!(
            "Sold {} x {} at {} for {} (user {})",
            quantity,
            symbol,
            unit_price,
            proceeds,
            portfolio.username()
        );

        Ok(SellReceipt {
            symbol: symbol.to_string(),
            name,
            unit_price,
            quantity,
            proceeds,
            disposition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_paths::DataPaths;
    use anyhow::Result;
    use rust_decimal_macros::dec;

    /// Gateway that records every charge and answers with a fixed outcome
    struct RecordingGateway {
        charges: Vec<(PaymentMethod, Decimal)>,
        outcome: PaymentOutcome,
    }

    impl RecordingGateway {
        fn paying() -> Self {
            Self {
                charges: Vec::new(),
                outcome: PaymentOutcome::Paid,
            }
        }

        fn declining() -> Self {
            Self {
                charges: Vec::new(),
                outcome: PaymentOutcome::Declined,
            }
        }
    }

    impl PaymentGateway for RecordingGateway {
        fn charge(&mut self, method: PaymentMethod, amount: Decimal) -> Result<PaymentOutcome> {
            self.charges.push((method, amount));
            Ok(self.outcome)
        }
    }

    fn setup(dir: &tempfile::TempDir) -> (Catalog, PortfolioStore) {
        let catalog = Catalog::with_seed();
        let (portfolio, _) = PortfolioStore::load(&DataPaths::new(dir.path()), "alice");
        (catalog, portfolio)
    }

    #[test]
    fn test_buy_within_budget() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, mut portfolio) = setup(&dir);
        let mut gateway = RecordingGateway::paying();
        let engine = TradeEngine::new(false);

        let receipt = engine
            .buy(&catalog, &mut portfolio, &mut gateway, "AAPL", 5, PaymentMethod::Cash)
            .unwrap();

        assert_eq!(receipt.total_cost, dec!(675.00));
        assert_eq!(receipt.unit_price, dec!(135.00));
        assert_eq!(receipt.payment, PaymentOutcome::Paid);
        assert_eq!(gateway.charges, vec![(PaymentMethod::Cash, dec!(675.00))]);

        let position = portfolio.position("AAPL").unwrap();
        assert_eq!(position.name, "Apple Inc.");
        assert_eq!(position.quantity, 5);
        assert_eq!(portfolio.total_value(), dec!(10675.00));
    }

    #[test]
    fn test_buy_insufficient_funds() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, mut portfolio) = setup(&dir);
        let mut gateway = RecordingGateway::paying();
        let engine = TradeEngine::new(false);

        let err = engine
            .buy(&catalog, &mut portfolio, &mut gateway, "AMZN", 10, PaymentMethod::Cash)
            .unwrap_err();

        assert!(matches!(
            err,
            TradeError::InsufficientFunds { needed, available }
                if needed == dec!(33000.00) && available == dec!(10000)
        ));
        assert!(portfolio.is_empty());
        assert!(gateway.charges.is_empty());
    }

    #[test]
    fn test_buy_unknown_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, mut portfolio) = setup(&dir);
        let mut gateway = RecordingGateway::paying();
        let engine = TradeEngine::new(false);

        let err = engine
            .buy(&catalog, &mut portfolio, &mut gateway, "ZZZZ", 1, PaymentMethod::Cash)
            .unwrap_err();

        assert!(matches!(err, TradeError::UnknownSymbol(s) if s == "ZZZZ"));
        assert!(portfolio.is_empty());
    }

    #[test]
    fn test_buy_zero_quantity() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, mut portfolio) = setup(&dir);
        let mut gateway = RecordingGateway::paying();
        let engine = TradeEngine::new(false);

        let err = engine
            .buy(&catalog, &mut portfolio, &mut gateway, "AAPL", 0, PaymentMethod::Cash)
            .unwrap_err();

        assert!(matches!(err, TradeError::InvalidQuantity));
    }

    #[test]
    fn test_affordability_loosens_as_holdings_grow() {
        // Total value backs the funds check by default, so a purchase
        // that was unaffordable can become affordable after other buys
        // inflate the portfolio.
        let dir = tempfile::tempdir().unwrap();
        let (catalog, mut portfolio) = setup(&dir);
        let mut gateway = RecordingGateway::paying();
        let engine = TradeEngine::new(false);

        assert!(engine
            .buy(&catalog, &mut portfolio, &mut gateway, "AMZN", 4, PaymentMethod::Cash)
            .is_err()); // 13200 > 10000

        engine
            .buy(&catalog, &mut portfolio, &mut gateway, "GOOGL", 2, PaymentMethod::Cash)
            .unwrap(); // 4700, total value now 14700

        engine
            .buy(&catalog, &mut portfolio, &mut gateway, "AMZN", 4, PaymentMethod::Cash)
            .unwrap();
    }

    #[test]
    fn test_strict_cash_mode() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, mut portfolio) = setup(&dir);
        let mut gateway = RecordingGateway::paying();
        let engine = TradeEngine::new(true);

        assert_eq!(engine.available_funds(&portfolio), dec!(10000));

        engine
            .buy(&catalog, &mut portfolio, &mut gateway, "AAPL", 5, PaymentMethod::Cash)
            .unwrap(); // 675

        assert_eq!(engine.available_funds(&portfolio), dec!(9325.00));

        // 2 GOOGL = 4700 fits; a third would not
        engine
            .buy(&catalog, &mut portfolio, &mut gateway, "GOOGL", 2, PaymentMethod::Cash)
            .unwrap();
        let err = engine
            .buy(&catalog, &mut portfolio, &mut gateway, "GOOGL", 2, PaymentMethod::Cash)
            .unwrap_err();
        assert!(matches!(err, TradeError::InsufficientFunds { .. }));

        // Selling refunds at purchase price and restores strict funds
        engine.sell(&mut portfolio, "GOOGL", 2).unwrap();
        assert_eq!(engine.available_funds(&portfolio), dec!(9325.00));
    }

    #[test]
    fn test_declined_payment_keeps_holding() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, mut portfolio) = setup(&dir);
        let mut gateway = RecordingGateway::declining();
        let engine = TradeEngine::new(false);

        let receipt = engine
            .buy(&catalog, &mut portfolio, &mut gateway, "AAPL", 5, PaymentMethod::CreditCard)
            .unwrap();

        assert_eq!(receipt.payment, PaymentOutcome::Declined);
        // The holding is recorded before the charge and stays recorded
        assert_eq!(portfolio.position("AAPL").unwrap().quantity, 5);
    }

    #[test]
    fn test_partial_then_full_sell() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, mut portfolio) = setup(&dir);
        let mut gateway = RecordingGateway::paying();
        let engine = TradeEngine::new(false);

        engine
            .buy(&catalog, &mut portfolio, &mut gateway, "AAPL", 5, PaymentMethod::Cash)
            .unwrap();

        let receipt = engine.sell(&mut portfolio, "AAPL", 2).unwrap();
        assert_eq!(receipt.proceeds, dec!(270.00));
        assert_eq!(receipt.disposition, SellDisposition::Reduced);
        assert_eq!(portfolio.position("AAPL").unwrap().quantity, 3);

        let receipt = engine.sell(&mut portfolio, "AAPL", 3).unwrap();
        assert_eq!(receipt.proceeds, dec!(405.00));
        assert_eq!(receipt.disposition, SellDisposition::Closed);
        assert!(portfolio.is_empty());

        // Only the buy reached the gateway
        assert_eq!(gateway.charges.len(), 1);
    }

    #[test]
    fn test_sell_not_held() {
        let dir = tempfile::tempdir().unwrap();
        let (_, mut portfolio) = setup(&dir);
        let engine = TradeEngine::new(false);

        let err = engine.sell(&mut portfolio, "AAPL", 1).unwrap_err();
        assert!(matches!(err, TradeError::NotHeld(s) if s == "AAPL"));
    }

    #[test]
    fn test_sell_more_than_held() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, mut portfolio) = setup(&dir);
        let mut gateway = RecordingGateway::paying();
        let engine = TradeEngine::new(false);

        engine
            .buy(&catalog, &mut portfolio, &mut gateway, "AAPL", 5, PaymentMethod::Cash)
            .unwrap();

        let err = engine.sell(&mut portfolio, "AAPL", 6).unwrap_err();
        assert!(matches!(
            err,
            TradeError::InsufficientQuantity { requested: 6, held: 5 }
        ));
        assert_eq!(portfolio.position("AAPL").unwrap().quantity, 5);
    }

    #[test]
    fn test_sell_at_purchase_price_not_catalog_price() {
        let dir = tempfile::tempdir().unwrap();
        let (mut catalog, mut portfolio) = setup(&dir);
        let mut gateway = RecordingGateway::paying();
        let engine = TradeEngine::new(false);

        engine
            .buy(&catalog, &mut portfolio, &mut gateway, "AAPL", 4, PaymentMethod::Cash)
            .unwrap();

        // A later catalog re-listing does not change the recorded price
        catalog.add(
            crate::catalog::Instrument::new("AAPL", "Apple Inc.", dec!(500.00), 10).unwrap(),
        );

        let receipt = engine.sell(&mut portfolio, "AAPL", 4).unwrap();
        assert_eq!(receipt.proceeds, dec!(540.00));
    }
}
