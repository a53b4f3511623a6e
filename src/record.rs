use chrono::Local;

/// Description used when the directory returned nothing for a machine.
pub const UNKNOWN: &str = "Unknown";

/// Capture-time format written to the history log (e.g. `03/14 09:26`).
const TIMESTAMP_FORMAT: &str = "%m/%d %H:%M";

/// One directory entry found by a search.
///
/// The timestamp is taken when the search captures the entry, not when
/// the technician later selects it, and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    description: String,
    timestamp: String,
}

impl Record {
    /// Capture a record now. A missing description becomes [`UNKNOWN`].
    pub fn capture(name: impl Into<String>, description: Option<String>) -> Self {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::with_timestamp(name, description, timestamp)
    }

    /// Build a record with an explicit capture time.
    pub fn with_timestamp(
        name: impl Into<String>,
        description: Option<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.unwrap_or_else(|| UNKNOWN.to_string()),
            timestamp: timestamp.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_description_defaults_to_unknown() {
        let r = Record::capture("IT4201", None);
        assert_eq!(r.name(), "IT4201");
        assert_eq!(r.description(), UNKNOWN);
    }

    #[test]
    fn supplied_description_is_kept() {
        let r = Record::capture("FI0012", Some("JaneDoe|Clerk".to_string()));
        assert_eq!(r.description(), "JaneDoe|Clerk");
    }

    #[test]
    fn capture_timestamp_has_month_day_hour_minute_shape() {
        let r = Record::capture("IT4201", None);
        let re = regex::Regex::new(r"^\d{2}/\d{2} \d{2}:\d{2}$").unwrap();
        assert!(re.is_match(r.timestamp()), "got {:?}", r.timestamp());
    }

    #[test]
    fn clone_keeps_capture_time() {
        let r = Record::with_timestamp("IT4201", None, "01/02 03:04");
        let copy = r.clone();
        assert_eq!(copy.timestamp(), "01/02 03:04");
        assert_eq!(copy, r);
    }
}
