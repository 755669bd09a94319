//! Configuration access port trait.

use chrono::NaiveDate;

/// Raw INI lookups. Typed parsing happens in the domain so that a malformed
/// value surfaces as an error instead of a silent default.
pub trait ConfigPort {
    /// `None` when the key is absent or blank.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// `None` when the key is absent, `Some(Err(raw))` when it is not a
    /// `YYYY-MM-DD` date.
    fn get_date(&self, section: &str, key: &str) -> Option<Result<NaiveDate, String>> {
        self.get_string(section, key).map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| raw)
        })
    }
}
