//! Strategy core: plain data in, plain data and order instructions out.

pub mod symbol;
pub mod fundamental;
pub mod security;
pub mod selection;
pub mod changes;
pub mod order;
pub mod settings;
pub mod config_validation;
pub mod strategy;
pub mod replay;
pub mod error;
