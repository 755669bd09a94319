//! Paper order ledger.
//!
//! Accepts every instruction, tracks the resulting target weight per symbol
//! and keeps a dated log that can be written out as CSV. Nothing is filled,
//! priced or charged.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::domain::error::CoarseFineError;
use crate::domain::order::{OrderInstruction, OrderRecord, OrderRow};
use crate::domain::symbol::Symbol;
use crate::ports::order_port::OrderPort;

#[derive(Debug, Default)]
pub struct PaperOrderAdapter {
    weights: BTreeMap<Symbol, f64>,
    records: Vec<OrderRecord>,
    current_date: Option<NaiveDate>,
}

impl PaperOrderAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    /// Non-zero target weights, ordered by symbol.
    pub fn weights(&self) -> &BTreeMap<Symbol, f64> {
        &self.weights
    }

    pub fn gross_exposure(&self) -> f64 {
        self.weights.values().map(|w| w.abs()).sum()
    }

    fn record(&mut self, instruction: OrderInstruction) {
        debug!(date = ?self.current_date, "{instruction}");
        self.records.push(OrderRecord {
            date: self.current_date,
            instruction,
        });
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CoarseFineError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for record in &self.records {
            wtr.serialize(OrderRow::from(record))
                .map_err(|e| CoarseFineError::Io(std::io::Error::other(e)))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CoarseFineError> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

impl OrderPort for PaperOrderAdapter {
    fn liquidate(&mut self, symbol: &Symbol) -> Result<(), CoarseFineError> {
        self.weights.remove(symbol);
        self.record(OrderInstruction::Liquidate {
            symbol: symbol.clone(),
        });
        Ok(())
    }

    fn set_holdings(&mut self, symbol: &Symbol, target: f64) -> Result<(), CoarseFineError> {
        if !target.is_finite() {
            return Err(CoarseFineError::Order {
                symbol: symbol.clone(),
                reason: format!("target {target} is not a finite weight"),
            });
        }
        if target == 0.0 {
            self.weights.remove(symbol);
        } else {
            self.weights.insert(symbol.clone(), target);
        }
        self.record(OrderInstruction::SetHoldings {
            symbol: symbol.clone(),
            target,
        });
        Ok(())
    }

    /// The ledger tracks weights, so the target weight is the quantity.
    fn quantity(&self, symbol: &Symbol) -> f64 {
        self.weights.get(symbol).copied().unwrap_or(0.0)
    }

    fn begin_slice(&mut self, date: NaiveDate) {
        self.current_date = Some(date);
    }
}
