//! Algorithm settings fixed at initialisation.
//!
//! Defaults reproduce the stock coarse/fine combo setup: a 2014 backtest
//! with 50 000 in cash, daily universe resolution, five coarse survivors,
//! two fine picks and a flat 20% allocation per added security.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::changes::ChangePolicy;
use super::error::CoarseFineError;
use super::selection::SelectionCounts;
use crate::ports::config_port::ConfigPort;

pub const ALGORITHM_SECTION: &str = "algorithm";
pub const DEFAULT_CASH: f64 = 50_000.0;
pub const DEFAULT_TARGET_ALLOCATION: f64 = 0.2;

/// Data resolution requested for universe subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    Tick,
    Second,
    Minute,
    Hour,
    #[default]
    Daily,
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tick" => Ok(Resolution::Tick),
            "second" => Ok(Resolution::Second),
            "minute" => Ok(Resolution::Minute),
            "hour" => Ok(Resolution::Hour),
            "daily" => Ok(Resolution::Daily),
            other => Err(format!("unknown resolution '{other}'")),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resolution::Tick => "tick",
            Resolution::Second => "second",
            Resolution::Minute => "minute",
            Resolution::Hour => "hour",
            Resolution::Daily => "daily",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmSettings {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cash: f64,
    pub resolution: Resolution,
    pub counts: SelectionCounts,
    /// Fraction of equity targeted for every added security. Not derived
    /// from the fine count.
    pub target_allocation: f64,
    pub change_policy: ChangePolicy,
}

impl Default for AlgorithmSettings {
    fn default() -> Self {
        AlgorithmSettings {
            start_date: NaiveDate::from_ymd_opt(2014, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
            cash: DEFAULT_CASH,
            resolution: Resolution::Daily,
            counts: SelectionCounts::default(),
            target_allocation: DEFAULT_TARGET_ALLOCATION,
            change_policy: ChangePolicy::Latest,
        }
    }
}

impl AlgorithmSettings {
    /// Reads the `[algorithm]` section, falling back to the defaults for any
    /// key that is absent. Present but malformed values are errors.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, CoarseFineError> {
        let defaults = AlgorithmSettings::default();
        let section = ALGORITHM_SECTION;

        let date = |key: &str, fallback: NaiveDate| match config.get_date(section, key) {
            None => Ok(fallback),
            Some(Ok(d)) => Ok(d),
            Some(Err(_)) => Err(CoarseFineError::invalid(
                section,
                key,
                "invalid date format (expected YYYY-MM-DD)",
            )),
        };

        Ok(AlgorithmSettings {
            start_date: date("start_date", defaults.start_date)?,
            end_date: date("end_date", defaults.end_date)?,
            cash: parse_key(config, "cash", defaults.cash)?,
            resolution: parse_key(config, "resolution", defaults.resolution)?,
            counts: SelectionCounts {
                coarse: parse_key(config, "coarse_count", defaults.counts.coarse)?,
                fine: parse_key(config, "fine_count", defaults.counts.fine)?,
            },
            target_allocation: parse_key(config, "target_allocation", defaults.target_allocation)?,
            change_policy: parse_key(config, "change_policy", defaults.change_policy)?,
        })
    }

    /// True when `date` falls inside the inclusive backtest window.
    pub fn in_window(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Parses an `[algorithm]` key as `T`, using `fallback` when it is absent.
fn parse_key<T>(config: &dyn ConfigPort, key: &str, fallback: T) -> Result<T, CoarseFineError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match config.get_string(ALGORITHM_SECTION, key) {
        None => Ok(fallback),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| {
            CoarseFineError::invalid(ALGORITHM_SECTION, key, format!("'{raw}': {e}"))
        }),
    }
}
