//! INI file configuration adapter.

use crate::domain::error::CoarseFineError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

/// `configparser` lower-cases section and key names, so lookups are
/// case-insensitive.
#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CoarseFineError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| CoarseFineError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, CoarseFineError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| CoarseFineError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    /// True when the file declared `[section]` with at least one key.
    pub fn has_section(&self, section: &str) -> bool {
        self.config
            .get_map_ref()
            .get(&section.to_lowercase())
            .is_some_and(|keys| !keys.is_empty())
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .filter(|v| !v.trim().is_empty())
    }
}
