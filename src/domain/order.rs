//! Order instructions as recorded by the paper ledger.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::symbol::Symbol;

#[derive(Debug, Clone, PartialEq)]
pub enum OrderInstruction {
    Liquidate { symbol: Symbol },
    SetHoldings { symbol: Symbol, target: f64 },
}

impl OrderInstruction {
    pub fn symbol(&self) -> &Symbol {
        match self {
            OrderInstruction::Liquidate { symbol } | OrderInstruction::SetHoldings { symbol, .. } => {
                symbol
            }
        }
    }

    /// Target weight after the instruction executes.
    pub fn target(&self) -> f64 {
        match self {
            OrderInstruction::Liquidate { .. } => 0.0,
            OrderInstruction::SetHoldings { target, .. } => *target,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            OrderInstruction::Liquidate { .. } => "liquidate",
            OrderInstruction::SetHoldings { .. } => "set_holdings",
        }
    }
}

impl fmt::Display for OrderInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderInstruction::Liquidate { symbol } => write!(f, "liquidate {symbol}"),
            OrderInstruction::SetHoldings { symbol, target } => {
                write!(f, "set_holdings {symbol} {:.2}%", target * 100.0)
            }
        }
    }
}

/// An instruction stamped with the slice date it was issued on.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub date: Option<NaiveDate>,
    pub instruction: OrderInstruction,
}

/// Flat CSV row for the order log.
#[derive(Debug, Serialize)]
pub struct OrderRow<'a> {
    pub date: String,
    pub action: &'static str,
    pub symbol: &'a str,
    pub target: f64,
}

impl<'a> From<&'a OrderRecord> for OrderRow<'a> {
    fn from(record: &'a OrderRecord) -> Self {
        OrderRow {
            date: record
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            action: record.instruction.action(),
            symbol: record.instruction.symbol().as_str(),
            target: record.instruction.target(),
        }
    }
}
