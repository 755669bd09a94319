//! Fundamental data port: the host side that feeds the selection stages.

use chrono::NaiveDate;

use crate::domain::error::CoarseFineError;
use crate::domain::fundamental::{CoarseRecord, FineRecord};
use crate::domain::symbol::Symbol;

pub trait FundamentalPort {
    /// Selection dates with coarse data available, ascending.
    fn dates(&self) -> Result<Vec<NaiveDate>, CoarseFineError>;

    /// Complete coarse universe for `date`.
    fn coarse(&self, date: NaiveDate) -> Result<Vec<CoarseRecord>, CoarseFineError>;

    /// Fine records for `date`, restricted to `symbols`. Symbols without fine
    /// data are simply absent from the result.
    fn fine(&self, date: NaiveDate, symbols: &[Symbol])
        -> Result<Vec<FineRecord>, CoarseFineError>;
}
