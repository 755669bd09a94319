//! Order placement port.
//!
//! Instructions are fire-and-forget from the strategy's point of view: an
//! adapter either accepts them or returns an error, which the strategy
//! propagates unchanged.

use chrono::NaiveDate;

use crate::domain::error::CoarseFineError;
use crate::domain::symbol::Symbol;

pub trait OrderPort {
    /// Close any position in `symbol`.
    fn liquidate(&mut self, symbol: &Symbol) -> Result<(), CoarseFineError>;

    /// Bring `symbol` to `target` (fraction of portfolio equity).
    fn set_holdings(&mut self, symbol: &Symbol, target: f64) -> Result<(), CoarseFineError>;

    /// Signed position size in `symbol`; zero when flat.
    fn quantity(&self, symbol: &Symbol) -> f64;

    /// Called by the host before each data slice is dispatched.
    fn begin_slice(&mut self, _date: NaiveDate) {}
}
