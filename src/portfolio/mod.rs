//! Per-user portfolio: types, durable store, and rendering

pub mod display;
pub mod store;
pub mod types;

pub use store::{starting_cash, PortfolioError, PortfolioStore, STARTING_CASH};
pub use types::{PortfolioLoadReport, Position, RemoveOutcome, SkippedLine, SortKey};
