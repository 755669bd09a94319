//! Per-asset holding snapshot handed to the strategy with universe changes.

use super::symbol::Symbol;

/// A tradable security and the position the host reports for it.
///
/// `quantity` is the signed position size in whatever unit the host keeps:
/// shares for a brokerage, target weight for the paper ledger. The strategy
/// only ever asks whether it is non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Security {
    pub symbol: Symbol,
    pub quantity: f64,
}

impl Security {
    pub fn new(symbol: Symbol, quantity: f64) -> Self {
        Security { symbol, quantity }
    }

    pub fn flat(symbol: Symbol) -> Self {
        Security::new(symbol, 0.0)
    }

    /// True when the host reports a non-zero position.
    pub fn invested(&self) -> bool {
        self.quantity != 0.0
    }
}
