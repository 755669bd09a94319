//! Two-stage universe selection: coarse dollar-volume ranking followed by a
//! fine price/earnings ranking over the coarse survivors.
//!
//! Both stages keep the top `count` records by a single numeric key,
//! descending. Equal keys keep their input order (the sort is stable) and NaN
//! keys rank below every number, so the output is deterministic for any input.

use std::cmp::Ordering;

use super::fundamental::{CoarseRecord, FineRecord};
use super::symbol::Symbol;

pub const NUMBER_OF_SYMBOLS: usize = 5;
pub const NUMBER_OF_SYMBOLS_FINE: usize = 2;

/// Number of survivors kept by each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCounts {
    pub coarse: usize,
    pub fine: usize,
}

impl Default for SelectionCounts {
    fn default() -> Self {
        SelectionCounts {
            coarse: NUMBER_OF_SYMBOLS,
            fine: NUMBER_OF_SYMBOLS_FINE,
        }
    }
}

/// Orders `a` before `b` when `a` is larger. NaN sorts last.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Returns references to the top `count` items ranked by `key`, descending.
pub fn top_by<T, F>(items: &[T], count: usize, key: F) -> Vec<&T>
where
    F: Fn(&T) -> f64,
{
    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| descending(key(a), key(b)));
    ranked.truncate(count);
    ranked
}

/// Top `count` coarse records by daily dollar volume.
pub fn select_coarse(coarse: &[CoarseRecord], count: usize) -> Vec<Symbol> {
    top_by(coarse, count, |r| r.dollar_volume)
        .into_iter()
        .map(|r| r.symbol.clone())
        .collect()
}

/// Top `count` fine records by P/E ratio.
pub fn select_fine(fine: &[FineRecord], count: usize) -> Vec<Symbol> {
    top_by(fine, count, FineRecord::pe_ratio)
        .into_iter()
        .map(|r| r.symbol.clone())
        .collect()
}
