//! Port traits: the boundary between the strategy core and its host.

pub mod config_port;
pub mod fundamental_port;
pub mod order_port;
