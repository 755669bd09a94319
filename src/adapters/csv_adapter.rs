//! CSV fundamental data adapter.
//!
//! Reads two files from a data directory:
//!
//! - `coarse.csv`: `date,symbol,price,volume[,dollar_volume]`
//! - `fine.csv`: `date,symbol,pe_ratio[,pb_ratio,ps_ratio,pcf_ratio,payout_ratio,earning_yield,book_value_per_share,sales_per_share]`
//!
//! Both files are loaded eagerly and indexed by date. A symbol may appear at
//! most once per date in each file.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::error::CoarseFineError;
use crate::domain::fundamental::{CoarseRecord, FineRecord, ValuationRatios};
use crate::domain::symbol::Symbol;
use crate::ports::fundamental_port::FundamentalPort;

pub const COARSE_FILE: &str = "coarse.csv";
pub const FINE_FILE: &str = "fine.csv";

#[derive(Debug, Deserialize)]
struct CoarseRow {
    date: NaiveDate,
    symbol: String,
    price: f64,
    volume: i64,
    dollar_volume: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FineRow {
    date: NaiveDate,
    symbol: String,
    pe_ratio: Option<f64>,
    pb_ratio: Option<f64>,
    ps_ratio: Option<f64>,
    pcf_ratio: Option<f64>,
    payout_ratio: Option<f64>,
    earning_yield: Option<f64>,
    book_value_per_share: Option<f64>,
    sales_per_share: Option<f64>,
}

impl From<CoarseRow> for CoarseRecord {
    fn from(row: CoarseRow) -> Self {
        let symbol = Symbol::new(row.symbol);
        match row.dollar_volume {
            Some(dollar_volume) => CoarseRecord {
                symbol,
                date: row.date,
                price: row.price,
                volume: row.volume,
                dollar_volume,
            },
            None => CoarseRecord::from_price_volume(symbol, row.date, row.price, row.volume),
        }
    }
}

impl From<FineRow> for FineRecord {
    fn from(row: FineRow) -> Self {
        FineRecord {
            symbol: Symbol::new(row.symbol),
            date: row.date,
            valuation_ratios: ValuationRatios {
                pe_ratio: row.pe_ratio.unwrap_or_default(),
                pb_ratio: row.pb_ratio.unwrap_or_default(),
                ps_ratio: row.ps_ratio.unwrap_or_default(),
                pcf_ratio: row.pcf_ratio.unwrap_or_default(),
                payout_ratio: row.payout_ratio.unwrap_or_default(),
                earning_yield: row.earning_yield.unwrap_or_default(),
                book_value_per_share: row.book_value_per_share.unwrap_or_default(),
                sales_per_share: row.sales_per_share.unwrap_or_default(),
            },
        }
    }
}

pub struct CsvFundamentalAdapter {
    coarse: BTreeMap<NaiveDate, Vec<CoarseRecord>>,
    fine: HashMap<NaiveDate, HashMap<Symbol, FineRecord>>,
}

impl CsvFundamentalAdapter {
    /// Loads `coarse.csv` and `fine.csv` from `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, CoarseFineError> {
        let dir = dir.as_ref();
        let coarse = open_file(&dir.join(COARSE_FILE))?;
        let fine = open_file(&dir.join(FINE_FILE))?;
        Self::from_readers(coarse, fine)
    }

    pub fn from_readers<C: Read, F: Read>(coarse: C, fine: F) -> Result<Self, CoarseFineError> {
        let mut by_date: BTreeMap<NaiveDate, Vec<CoarseRecord>> = BTreeMap::new();
        let mut seen: HashSet<(NaiveDate, Symbol)> = HashSet::new();
        for row in csv::Reader::from_reader(coarse).deserialize::<CoarseRow>() {
            let row = row.map_err(|e| CoarseFineError::Data {
                reason: format!("{COARSE_FILE}: {e}"),
            })?;
            let record = CoarseRecord::from(row);
            if !seen.insert((record.date, record.symbol.clone())) {
                return Err(duplicate(COARSE_FILE, &record.symbol, record.date));
            }
            by_date.entry(record.date).or_default().push(record);
        }

        let mut fine_by_date: HashMap<NaiveDate, HashMap<Symbol, FineRecord>> = HashMap::new();
        for row in csv::Reader::from_reader(fine).deserialize::<FineRow>() {
            let row = row.map_err(|e| CoarseFineError::Data {
                reason: format!("{FINE_FILE}: {e}"),
            })?;
            let record = FineRecord::from(row);
            match fine_by_date.entry(record.date).or_default().entry(record.symbol.clone()) {
                Entry::Occupied(_) => {
                    return Err(duplicate(FINE_FILE, &record.symbol, record.date));
                }
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
            }
        }

        Ok(Self {
            coarse: by_date,
            fine: fine_by_date,
        })
    }
}

fn duplicate(file: &str, symbol: &Symbol, date: NaiveDate) -> CoarseFineError {
    CoarseFineError::Data {
        reason: format!("{file}: duplicate row for {symbol} on {date}"),
    }
}

fn open_file(path: &Path) -> Result<File, CoarseFineError> {
    File::open(path).map_err(|e| CoarseFineError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })
}

impl FundamentalPort for CsvFundamentalAdapter {
    fn dates(&self) -> Result<Vec<NaiveDate>, CoarseFineError> {
        Ok(self.coarse.keys().copied().collect())
    }

    fn coarse(&self, date: NaiveDate) -> Result<Vec<CoarseRecord>, CoarseFineError> {
        Ok(self.coarse.get(&date).cloned().unwrap_or_default())
    }

    fn fine(
        &self,
        date: NaiveDate,
        symbols: &[Symbol],
    ) -> Result<Vec<FineRecord>, CoarseFineError> {
        let Some(day) = self.fine.get(&date) else {
            return Ok(Vec::new());
        };
        Ok(symbols.iter().filter_map(|s| day.get(s).cloned()).collect())
    }
}
