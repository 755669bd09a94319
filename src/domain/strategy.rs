//! The coarse/fine universe rotation strategy and the callback interface a
//! host drives it through.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::changes::{PendingChanges, SecurityChanges};
use crate::domain::error::CoarseFineError;
use crate::domain::fundamental::{CoarseRecord, FineRecord};
use crate::domain::selection::{select_coarse, select_fine};
use crate::domain::settings::AlgorithmSettings;
use crate::domain::symbol::Symbol;
use crate::ports::order_port::OrderPort;

/// Callbacks a host invokes, one at a time, over the life of a run.
///
/// For a given date the host calls `select_coarse`, then `select_fine` with
/// records for the coarse survivors only, then `on_securities_changed` if the
/// resolved universe moved, and finally `on_data`.
pub trait UniverseStrategy {
    fn settings(&self) -> &AlgorithmSettings;

    fn select_coarse(&self, coarse: &[CoarseRecord]) -> Vec<Symbol>;

    fn select_fine(&self, fine: &[FineRecord]) -> Vec<Symbol>;

    fn on_securities_changed(&mut self, changes: SecurityChanges);

    fn on_data(&mut self, date: NaiveDate, orders: &mut dyn OrderPort)
        -> Result<(), CoarseFineError>;
}

#[derive(Debug, Clone)]
pub struct CoarseFineStrategy {
    settings: AlgorithmSettings,
    pending: PendingChanges,
}

impl CoarseFineStrategy {
    /// Fixes the run parameters and starts with no pending changes.
    pub fn initialize(settings: AlgorithmSettings) -> Self {
        info!(
            start = %settings.start_date,
            end = %settings.end_date,
            cash = settings.cash,
            resolution = %settings.resolution,
            coarse = settings.counts.coarse,
            fine = settings.counts.fine,
            "strategy initialised"
        );
        let pending = PendingChanges::new(settings.change_policy);
        CoarseFineStrategy { settings, pending }
    }

    pub fn pending(&self) -> Option<&SecurityChanges> {
        self.pending.peek()
    }
}

impl Default for CoarseFineStrategy {
    fn default() -> Self {
        CoarseFineStrategy::initialize(AlgorithmSettings::default())
    }
}

impl UniverseStrategy for CoarseFineStrategy {
    fn settings(&self) -> &AlgorithmSettings {
        &self.settings
    }

    fn select_coarse(&self, coarse: &[CoarseRecord]) -> Vec<Symbol> {
        let selected = select_coarse(coarse, self.settings.counts.coarse);
        debug!(candidates = coarse.len(), selected = ?selected, "coarse selection");
        selected
    }

    fn select_fine(&self, fine: &[FineRecord]) -> Vec<Symbol> {
        let selected = select_fine(fine, self.settings.counts.fine);
        debug!(candidates = fine.len(), selected = ?selected, "fine selection");
        selected
    }

    fn on_securities_changed(&mut self, changes: SecurityChanges) {
        debug!("universe changed: {changes}");
        self.pending.store(changes);
    }

    fn on_data(
        &mut self,
        date: NaiveDate,
        orders: &mut dyn OrderPort,
    ) -> Result<(), CoarseFineError> {
        let Some(changes) = self.pending.peek() else {
            return Ok(());
        };

        for security in changes.removed.iter().filter(|s| s.invested()) {
            info!(%date, symbol = %security.symbol, "liquidating removed security");
            orders.liquidate(&security.symbol)?;
        }

        for security in &changes.added {
            info!(
                %date,
                symbol = %security.symbol,
                target = self.settings.target_allocation,
                "allocating to added security"
            );
            orders.set_holdings(&security.symbol, self.settings.target_allocation)?;
        }

        self.pending.clear();
        Ok(())
    }
}
