#![allow(dead_code)]

use chrono::NaiveDate;
use coarsefine::domain::error::CoarseFineError;
use coarsefine::domain::fundamental::{CoarseRecord, FineRecord, ValuationRatios};
use coarsefine::domain::symbol::Symbol;
use coarsefine::ports::fundamental_port::FundamentalPort;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// In-memory fundamentals. Records every symbol list handed to `fine`.
pub struct MockFundamentalPort {
    pub coarse: BTreeMap<NaiveDate, Vec<CoarseRecord>>,
    pub fine: HashMap<NaiveDate, Vec<FineRecord>>,
    pub fine_requests: RefCell<Vec<(NaiveDate, Vec<Symbol>)>>,
    pub error: Option<String>,
}

impl MockFundamentalPort {
    pub fn new() -> Self {
        Self {
            coarse: BTreeMap::new(),
            fine: HashMap::new(),
            fine_requests: RefCell::new(Vec::new()),
            error: None,
        }
    }

    /// Adds a day of `(symbol, dollar_volume, pe_ratio)` rows.
    pub fn with_day(mut self, date: NaiveDate, rows: &[(&str, f64, f64)]) -> Self {
        for (symbol, dollar_volume, pe_ratio) in rows {
            self.coarse
                .entry(date)
                .or_default()
                .push(coarse(symbol, date, *dollar_volume));
            self.fine
                .entry(date)
                .or_default()
                .push(fine(symbol, date, *pe_ratio));
        }
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl FundamentalPort for MockFundamentalPort {
    fn dates(&self) -> Result<Vec<NaiveDate>, CoarseFineError> {
        Ok(self.coarse.keys().copied().collect())
    }

    fn coarse(&self, date: NaiveDate) -> Result<Vec<CoarseRecord>, CoarseFineError> {
        if let Some(reason) = &self.error {
            return Err(CoarseFineError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.coarse.get(&date).cloned().unwrap_or_default())
    }

    fn fine(
        &self,
        date: NaiveDate,
        symbols: &[Symbol],
    ) -> Result<Vec<FineRecord>, CoarseFineError> {
        self.fine_requests
            .borrow_mut()
            .push((date, symbols.to_vec()));
        Ok(self
            .fine
            .get(&date)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| symbols.contains(&r.symbol))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sym(s: &str) -> Symbol {
    Symbol::new(s)
}

pub fn symbols(names: &[&str]) -> Vec<Symbol> {
    names.iter().map(Symbol::new).collect()
}

pub fn coarse(symbol: &str, date: NaiveDate, dollar_volume: f64) -> CoarseRecord {
    CoarseRecord {
        symbol: Symbol::new(symbol),
        date,
        price: 10.0,
        volume: (dollar_volume / 10.0) as i64,
        dollar_volume,
    }
}

pub fn fine(symbol: &str, date: NaiveDate, pe_ratio: f64) -> FineRecord {
    FineRecord {
        symbol: Symbol::new(symbol),
        date,
        valuation_ratios: ValuationRatios {
            pe_ratio,
            ..ValuationRatios::default()
        },
    }
}

/// Writes `coarse.csv` and `fine.csv` into `dir`.
pub fn write_data_dir(dir: &Path, coarse_csv: &str, fine_csv: &str) {
    fs::write(dir.join("coarse.csv"), coarse_csv).unwrap();
    fs::write(dir.join("fine.csv"), fine_csv).unwrap();
}

pub const SAMPLE_COARSE: &str = "date,symbol,price,volume,dollar_volume\n\
    2014-01-02,SPY,184.0,100,18400\n\
    2014-01-02,AAPL,553.0,30,16590\n\
    2014-01-02,IBM,185.0,50,9250\n\
    2014-01-02,GOOG,1113.0,10,11130\n\
    2014-01-02,MSFT,37.0,200,7400\n\
    2014-01-02,BAC,15.6,300,4680\n\
    2014-01-03,SPY,182.9,100,18290\n\
    2014-01-03,AAPL,540.0,30,16200\n\
    2014-01-03,IBM,186.6,50,9330\n\
    2014-01-03,GOOG,1105.0,10,11050\n\
    2014-01-03,MSFT,36.7,200,7340\n\
    2014-01-03,BAC,16.1,600,9660\n\
    2014-01-06,SPY,182.4,100,18240\n\
    2014-01-06,AAPL,543.9,30,16317\n\
    2014-01-06,IBM,186.0,50,9300\n\
    2014-01-06,GOOG,1110.0,10,11100\n\
    2014-01-06,MSFT,36.1,200,7220\n\
    2014-01-06,BAC,16.4,600,9840\n";

pub const SAMPLE_FINE: &str = "date,symbol,pe_ratio\n\
    2014-01-02,SPY,17.0\n\
    2014-01-02,AAPL,13.4\n\
    2014-01-02,IBM,12.7\n\
    2014-01-02,GOOG,30.1\n\
    2014-01-02,MSFT,14.0\n\
    2014-01-02,BAC,25.0\n\
    2014-01-03,SPY,17.0\n\
    2014-01-03,AAPL,13.4\n\
    2014-01-03,IBM,12.7\n\
    2014-01-03,GOOG,30.1\n\
    2014-01-03,MSFT,14.0\n\
    2014-01-03,BAC,25.0\n\
    2014-01-06,SPY,17.0\n\
    2014-01-06,AAPL,13.4\n\
    2014-01-06,IBM,12.7\n\
    2014-01-06,GOOG,30.1\n\
    2014-01-06,MSFT,14.0\n\
    2014-01-06,BAC,25.0\n";
