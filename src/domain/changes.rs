//! Universe membership deltas and the pending-change mailbox.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use super::security::Security;
use super::symbol::Symbol;

/// Securities added to and removed from the universe between two resolutions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityChanges {
    pub added: Vec<Security>,
    pub removed: Vec<Security>,
}

impl SecurityChanges {
    pub fn new(added: Vec<Security>, removed: Vec<Security>) -> Self {
        SecurityChanges { added, removed }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Delta from `previous` to `current`.
    ///
    /// Added securities follow `current` order, removed ones follow
    /// `previous` order. `lookup` supplies the position snapshot for each.
    pub fn between<F>(previous: &[Symbol], current: &[Symbol], lookup: F) -> Self
    where
        F: Fn(&Symbol) -> Security,
    {
        let before: HashSet<&Symbol> = previous.iter().collect();
        let after: HashSet<&Symbol> = current.iter().collect();

        let added = current
            .iter()
            .filter(|s| !before.contains(s))
            .map(&lookup)
            .collect();
        let removed = previous
            .iter()
            .filter(|s| !after.contains(s))
            .map(&lookup)
            .collect();

        SecurityChanges { added, removed }
    }

    /// Folds a later delta into this one.
    ///
    /// A symbol added here and removed later (or the reverse) cancels out.
    /// Holdings snapshots from the later delta win.
    pub fn merge(mut self, later: SecurityChanges) -> Self {
        for security in later.removed {
            if let Some(idx) = self.added.iter().position(|s| s.symbol == security.symbol) {
                self.added.remove(idx);
            } else if let Some(existing) =
                self.removed.iter_mut().find(|s| s.symbol == security.symbol)
            {
                *existing = security;
            } else {
                self.removed.push(security);
            }
        }
        for security in later.added {
            if let Some(idx) = self.removed.iter().position(|s| s.symbol == security.symbol) {
                self.removed.remove(idx);
            } else if let Some(existing) =
                self.added.iter_mut().find(|s| s.symbol == security.symbol)
            {
                *existing = security;
            } else {
                self.added.push(security);
            }
        }
        self
    }
}

impl fmt::Display for SecurityChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |list: &[Security]| {
            list.iter()
                .map(|s| s.symbol.as_str())
                .collect::<Vec<_>>()
                .join(",")
        };
        write!(
            f,
            "added [{}] removed [{}]",
            join(self.added.as_slice()),
            join(self.removed.as_slice())
        )
    }
}

/// What happens when a change notification arrives before the previous one
/// has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangePolicy {
    /// Keep only the newest delta; the older one is dropped.
    #[default]
    Latest,
    /// Merge the newer delta into the pending one.
    Accumulate,
}

impl FromStr for ChangePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latest" => Ok(ChangePolicy::Latest),
            "accumulate" => Ok(ChangePolicy::Accumulate),
            other => Err(format!("unknown change policy '{other}' (expected latest or accumulate)")),
        }
    }
}

/// Single-slot mailbox holding the unconsumed universe delta, if any.
#[derive(Debug, Clone, Default)]
pub struct PendingChanges {
    slot: Option<SecurityChanges>,
    policy: ChangePolicy,
}

impl PendingChanges {
    pub fn new(policy: ChangePolicy) -> Self {
        PendingChanges { slot: None, policy }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn peek(&self) -> Option<&SecurityChanges> {
        self.slot.as_ref()
    }

    /// Stores `changes` according to the mailbox policy. An empty delta
    /// carries nothing to act on and leaves the slot untouched.
    pub fn store(&mut self, changes: SecurityChanges) {
        if changes.is_empty() {
            return;
        }

        self.slot = match (self.policy, self.slot.take()) {
            (ChangePolicy::Latest, Some(dropped)) => {
                warn!(
                    added = dropped.added.len(),
                    removed = dropped.removed.len(),
                    "unconsumed universe changes overwritten: {dropped}"
                );
                Some(changes)
            }
            (ChangePolicy::Accumulate, Some(pending)) => {
                Some(pending.merge(changes)).filter(|c| !c.is_empty())
            }
            (_, None) => Some(changes),
        };
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
