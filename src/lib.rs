//! coarsefine: coarse/fine fundamental universe rotation strategy.
//!
//! Hexagonal architecture: the strategy core lives in [`domain`], the host
//! boundary is expressed as port traits in [`ports`], and the concrete CSV,
//! INI and paper-ledger implementations live in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod logging;
