//! Per-user portfolio store with durable persistence
//!
//! Each user owns one file at `portfolio_files/<username>.txt`, one
//! position per line: `symbol;name;price;quantity`. Every mutating
//! operation updates memory first and then rewrites the whole file, so
//! the on-disk view always reflects all prior successful mutations.

use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::data_paths::DataPaths;
use crate::portfolio::types::{
    PortfolioLoadReport, Position, RemoveOutcome, SkippedLine, SortKey,
};

/// Nominal starting cash every account begins with
pub const STARTING_CASH: u32 = 10_000;

/// Starting cash as a decimal amount
pub fn starting_cash() -> Decimal {
    Decimal::from(STARTING_CASH)
}

/// Portfolio store errors
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("failed to save portfolio for {username} to {path}: {source}")]
    Save {
        username: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Owns the positions of one signed-in user
pub struct PortfolioStore {
    username: String,
    path: PathBuf,
    positions: Vec<Position>,
}

impl PortfolioStore {
    /// Load the user's portfolio. The portfolio directory is created if
    /// missing; a missing file yields an empty portfolio (written on the
    /// first save). Malformed lines are skipped and reported.
    pub fn load(data_paths: &DataPaths, username: &str) -> (Self, PortfolioLoadReport) {
        let path = data_paths.portfolio_file(username);
        let mut store = Self {
            username: username.to_string(),
            path,
            positions: Vec::new(),
        };
        let mut report = PortfolioLoadReport::default();

        if let Some(parent) = store.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Error creating {}: {}", parent.display(), e);
                report.io_error = Some(e.to_string());
                return (store, report);
            }
        }

        if !store.path.exists() {
            debug!("No portfolio file for {}, starting empty", username);
            return (store, report);
        }

        let content = match std::fs::read_to_string(&store.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Error loading portfolio {}: {}", store.path.display(), e);
                report.io_error = Some(e.to_string());
                return (store, report);
            }
        };

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            match parse_position(line) {
                Ok(position) => {
                    store.positions.push(position);
                    report.loaded += 1;
                }
                Err(reason) => {
                    warn!(
                        "Invalid record in {} at line {}: {:?} ({}). Skipping.",
                        store.path.display(),
                        line_no,
                        line,
                        reason
                    );
                    report.skipped.push(SkippedLine { line_no, reason });
                }
            }
        }

        info!(
            "Loaded {} positions for {} from {}",
            report.loaded,
            username,
            store.path.display()
        );
        (store, report)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Positions in their current order
    pub fn list(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Find a holding by symbol
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.symbol == symbol)
    }

    /// Record a purchase. A repeat buy of a held symbol increases its
    /// quantity; the first purchase fixes the unit price and name.
    /// Callers pass `qty >= 1`.
    pub fn add(
        &mut self,
        symbol: &str,
        name: &str,
        unit_price: Decimal,
        qty: u32,
    ) -> Result<(), PortfolioError> {
        debug_assert!(qty >= 1);

        if let Some(position) = self.positions.iter_mut().find(|p| p.symbol == symbol) {
            position.quantity += qty;
        } else {
            self.positions
                .push(Position::new(symbol, name, unit_price, qty));
        }
        self.save()
    }

    /// Remove quantity from a holding. The file is rewritten only when
    /// the portfolio actually changed.
    pub fn remove(&mut self, symbol: &str, qty: u32) -> Result<RemoveOutcome, PortfolioError> {
        let Some(index) = self.positions.iter().position(|p| p.symbol == symbol) else {
            return Ok(RemoveOutcome::SymbolNotFound);
        };

        let held = self.positions[index].quantity;
        if qty > held {
            return Ok(RemoveOutcome::InsufficientQty);
        }

        let outcome = if qty == held {
            self.positions.remove(index);
            RemoveOutcome::Removed
        } else {
            self.positions[index].quantity = held - qty;
            RemoveOutcome::Reduced
        };
        self.save()?;
        Ok(outcome)
    }

    /// Combined value of all holdings
    pub fn holdings_value(&self) -> Decimal {
        self.positions.iter().map(Position::value).sum()
    }

    /// Starting cash plus the value of all holdings
    pub fn total_value(&self) -> Decimal {
        starting_cash() + self.holdings_value()
    }

    /// The holding with the highest nominal value; the earliest-inserted
    /// wins ties. None when the portfolio is empty.
    pub fn most_profitable(&self) -> Option<&Position> {
        let mut best: Option<&Position> = None;
        for position in &self.positions {
            match best {
                Some(current) if position.value() <= current.value() => {}
                _ => best = Some(position),
            }
        }
        best
    }

    /// Stable ascending sort; the new order is persisted immediately
    pub fn sort_by(&mut self, key: SortKey) -> Result<(), PortfolioError> {
        match key {
            SortKey::Symbol => self.positions.sort_by(|a, b| a.symbol.cmp(&b.symbol)),
            SortKey::Price => self.positions.sort_by(|a, b| a.unit_price.cmp(&b.unit_price)),
            SortKey::Quantity => self.positions.sort_by_key(|p| p.quantity),
        }
        self.save()
    }

    /// Rewrite the whole file from in-memory state
    fn save(&self) -> Result<(), PortfolioError> {
        let mut content = String::new();
        for position in &self.positions {
            content.push_str(&format!(
                "{};{};{};{}\n",
                position.symbol, position.name, position.unit_price, position.quantity
            ));
        }
        std::fs::write(&self.path, content).map_err(|source| PortfolioError::Save {
            username: self.username.clone(),
            path: self.path.clone(),
            source,
        })
    }
}

/// Parse one `symbol;name;price;quantity` record
fn parse_position(line: &str) -> Result<Position, String> {
    let fields: Vec<&str> = line.split(';').collect();
    if fields.len() != 4 {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    }

    let price = Decimal::from_str(fields[2])
        .map_err(|_| format!("invalid price {:?}", fields[2]))?;
    if price.is_sign_negative() {
        return Err(format!("negative price {:?}", fields[2]));
    }

    let quantity: u32 = fields[3]
        .parse()
        .map_err(|_| format!("invalid quantity {:?}", fields[3]))?;
    if quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }

    Ok(Position::new(fields[0], fields[1], price, quantity))
}
