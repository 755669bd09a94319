//! Coarse and fine fundamental records supplied per selection date.

use chrono::NaiveDate;

use super::symbol::Symbol;

/// Broad daily per-asset summary used by the coarse stage.
#[derive(Debug, Clone, PartialEq)]
pub struct CoarseRecord {
    pub symbol: Symbol,
    pub date: NaiveDate,
    pub price: f64,
    pub volume: i64,
    pub dollar_volume: f64,
}

impl CoarseRecord {
    /// Builds a record whose dollar volume is derived as price * volume.
    pub fn from_price_volume(symbol: Symbol, date: NaiveDate, price: f64, volume: i64) -> Self {
        CoarseRecord {
            symbol,
            date,
            price,
            volume,
            dollar_volume: price * volume as f64,
        }
    }
}

/// Valuation sub-record of the fine fundamental data.
///
/// Only the ratios a selection rule is likely to rank on are kept; anything a
/// data source leaves out reads as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuationRatios {
    /// Price / diluted earnings per share.
    pub pe_ratio: f64,
    /// Price / book value per share.
    pub pb_ratio: f64,
    /// Price / sales per share.
    pub ps_ratio: f64,
    /// Price / cash flow per share.
    pub pcf_ratio: f64,
    /// Dividend per share / diluted earnings per share.
    pub payout_ratio: f64,
    /// Diluted EPS / price.
    pub earning_yield: f64,
    pub book_value_per_share: f64,
    pub sales_per_share: f64,
}

/// Detailed per-asset record delivered only for coarse survivors.
#[derive(Debug, Clone, PartialEq)]
pub struct FineRecord {
    pub symbol: Symbol,
    pub date: NaiveDate,
    pub valuation_ratios: ValuationRatios,
}

impl FineRecord {
    pub fn pe_ratio(&self) -> f64 {
        self.valuation_ratios.pe_ratio
    }
}
