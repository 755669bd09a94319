//! Replay driver: plays the host's event loop over recorded fundamentals.
//!
//! For every data date inside the settings window it runs the coarse and
//! fine stages, diffs the resolved universe against the previous one,
//! delivers the change notification and then the data slice.

use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::domain::changes::SecurityChanges;
use crate::domain::error::CoarseFineError;
use crate::domain::security::Security;
use crate::domain::strategy::UniverseStrategy;
use crate::domain::symbol::Symbol;
use crate::ports::fundamental_port::FundamentalPort;
use crate::ports::order_port::OrderPort;

/// What happened on one replayed date.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayStep {
    pub date: NaiveDate,
    pub coarse_selected: Vec<Symbol>,
    pub universe: Vec<Symbol>,
    pub changes: Option<SecurityChanges>,
}

#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
}

impl ReplayReport {
    pub fn change_count(&self) -> usize {
        self.steps.iter().filter(|s| s.changes.is_some()).count()
    }

    pub fn final_universe(&self) -> &[Symbol] {
        self.steps.last().map(|s| s.universe.as_slice()).unwrap_or(&[])
    }
}

/// Coarse then fine selection for a single date, with the host-side
/// guarantees applied: the coarse output is restricted to symbols present
/// in the coarse data, and the fine stage only sees coarse survivors. A
/// symbol appears at most once in each stage's output; repeats keep the
/// first occurrence.
pub fn select_universe(
    data: &dyn FundamentalPort,
    strategy: &dyn UniverseStrategy,
    date: NaiveDate,
) -> Result<(Vec<Symbol>, Vec<Symbol>), CoarseFineError> {
    let coarse = data.coarse(date)?;
    let known: HashSet<&Symbol> = coarse.iter().map(|r| &r.symbol).collect();

    let mut survivors = strategy.select_coarse(&coarse);
    let mut seen: HashSet<Symbol> = HashSet::new();
    survivors.retain(|s| {
        if !known.contains(s) {
            warn!(%date, symbol = %s, "coarse selection returned unknown symbol; dropped");
            false
        } else if !seen.insert(s.clone()) {
            warn!(%date, symbol = %s, "duplicate coarse survivor; dropped");
            false
        } else {
            true
        }
    });

    let allowed: HashSet<&Symbol> = survivors.iter().collect();
    let mut seen: HashSet<Symbol> = HashSet::new();
    let mut fine = data.fine(date, &survivors)?;
    fine.retain(|r| {
        if !allowed.contains(&r.symbol) {
            warn!(%date, symbol = %r.symbol, "fine record for non-survivor; dropped");
            false
        } else if !seen.insert(r.symbol.clone()) {
            warn!(%date, symbol = %r.symbol, "duplicate fine record; dropped");
            false
        } else {
            true
        }
    });

    let selected = strategy.select_fine(&fine);
    Ok((survivors, selected))
}

pub fn run_replay(
    data: &dyn FundamentalPort,
    strategy: &mut dyn UniverseStrategy,
    orders: &mut dyn OrderPort,
) -> Result<ReplayReport, CoarseFineError> {
    let settings = strategy.settings().clone();
    let dates: Vec<NaiveDate> = data
        .dates()?
        .into_iter()
        .filter(|d| settings.in_window(*d))
        .collect();

    info!(
        dates = dates.len(),
        start = %settings.start_date,
        end = %settings.end_date,
        "starting replay"
    );

    let mut universe: Vec<Symbol> = Vec::new();
    let mut report = ReplayReport::default();

    for date in dates {
        let (coarse_selected, selected) = select_universe(data, &*strategy, date)?;

        let changes = SecurityChanges::between(&universe, &selected, |s| {
            Security::new(s.clone(), orders.quantity(s))
        });

        let delivered = if changes.is_empty() {
            None
        } else {
            debug!(%date, "{changes}");
            strategy.on_securities_changed(changes.clone());
            universe = selected;
            Some(changes)
        };

        orders.begin_slice(date);
        strategy.on_data(date, orders)?;

        report.steps.push(ReplayStep {
            date,
            coarse_selected,
            universe: universe.clone(),
            changes: delivered,
        });
    }

    info!(
        steps = report.steps.len(),
        changes = report.change_count(),
        "replay finished"
    );
    Ok(report)
}
