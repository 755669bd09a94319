//! Configuration validation.
//!
//! Validates the `[algorithm]` section before a run starts. Missing keys are
//! fine (defaults apply); present keys must hold sensible values.

use crate::domain::error::CoarseFineError;
use crate::domain::settings::{ALGORITHM_SECTION, AlgorithmSettings};
use crate::ports::config_port::ConfigPort;

pub fn validate_algorithm_config(config: &dyn ConfigPort) -> Result<AlgorithmSettings, CoarseFineError> {
    let settings = AlgorithmSettings::from_config(config)?;
    validate_dates(&settings)?;
    validate_cash(&settings)?;
    validate_counts(&settings)?;
    validate_allocation(&settings)?;
    Ok(settings)
}

fn validate_dates(settings: &AlgorithmSettings) -> Result<(), CoarseFineError> {
    if settings.start_date >= settings.end_date {
        return Err(CoarseFineError::invalid(
            ALGORITHM_SECTION,
            "start_date",
            "start_date must be before end_date",
        ));
    }
    Ok(())
}

fn validate_cash(settings: &AlgorithmSettings) -> Result<(), CoarseFineError> {
    if !(settings.cash.is_finite() && settings.cash > 0.0) {
        return Err(CoarseFineError::invalid(
            ALGORITHM_SECTION,
            "cash",
            "cash must be a positive finite amount",
        ));
    }
    Ok(())
}

fn validate_counts(settings: &AlgorithmSettings) -> Result<(), CoarseFineError> {
    if settings.counts.coarse == 0 {
        return Err(CoarseFineError::invalid(
            ALGORITHM_SECTION,
            "coarse_count",
            "coarse_count must be at least 1",
        ));
    }
    if settings.counts.fine == 0 {
        return Err(CoarseFineError::invalid(
            ALGORITHM_SECTION,
            "fine_count",
            "fine_count must be at least 1",
        ));
    }
    Ok(())
}

fn validate_allocation(settings: &AlgorithmSettings) -> Result<(), CoarseFineError> {
    let value = settings.target_allocation;
    if !(value > 0.0 && value <= 1.0) {
        return Err(CoarseFineError::invalid(
            ALGORITHM_SECTION,
            "target_allocation",
            "target_allocation must be in (0, 1]",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn validate(ini: &str) -> Result<AlgorithmSettings, CoarseFineError> {
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        validate_algorithm_config(&adapter)
    }

    fn invalid_key(result: Result<AlgorithmSettings, CoarseFineError>) -> String {
        match result {
            Err(CoarseFineError::ConfigInvalid { key, .. }) => key,
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate("[algorithm]\n").is_ok());
    }

    #[test]
    fn rejects_reversed_window() {
        let ini = "[algorithm]\nstart_date = 2015-01-01\nend_date = 2014-01-01\n";
        assert_eq!(invalid_key(validate(ini)), "start_date");
    }

    #[test]
    fn rejects_equal_dates() {
        let ini = "[algorithm]\nstart_date = 2014-01-01\nend_date = 2014-01-01\n";
        assert_eq!(invalid_key(validate(ini)), "start_date");
    }

    #[test]
    fn rejects_non_positive_cash() {
        assert_eq!(invalid_key(validate("[algorithm]\ncash = 0\n")), "cash");
        assert_eq!(invalid_key(validate("[algorithm]\ncash = -5\n")), "cash");
    }

    #[test]
    fn rejects_non_finite_cash() {
        assert_eq!(invalid_key(validate("[algorithm]\ncash = inf\n")), "cash");
        assert_eq!(invalid_key(validate("[algorithm]\ncash = NaN\n")), "cash");
    }

    #[test]
    fn rejects_zero_counts() {
        assert_eq!(
            invalid_key(validate("[algorithm]\ncoarse_count = 0\n")),
            "coarse_count"
        );
        assert_eq!(
            invalid_key(validate("[algorithm]\nfine_count = 0\n")),
            "fine_count"
        );
    }

    #[test]
    fn rejects_out_of_range_allocation() {
        assert_eq!(
            invalid_key(validate("[algorithm]\ntarget_allocation = 0\n")),
            "target_allocation"
        );
        assert_eq!(
            invalid_key(validate("[algorithm]\ntarget_allocation = 1.5\n")),
            "target_allocation"
        );
    }

    #[test]
    fn accepts_full_allocation() {
        let settings = validate("[algorithm]\ntarget_allocation = 1.0\n").unwrap();
        assert!((settings.target_allocation - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fine_count_may_exceed_coarse_count() {
        let settings = validate("[algorithm]\ncoarse_count = 2\nfine_count = 3\n").unwrap();
        assert_eq!(settings.counts.fine, 3);
    }
}
