use serde::{Deserialize, Serialize};
use std::fmt;

/// A (given name, surname) pair recovered from a raw name field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameParts {
    pub given_name: String,
    pub surname: String,
}

impl NameParts {
    pub fn new(given_name: impl Into<String>, surname: impl Into<String>) -> Self {
        NameParts {
            given_name: given_name.into(),
            surname: surname.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.given_name.is_empty() && self.surname.is_empty()
    }
}

/// Normalized MRZ data. Missing pass-through fields stay `None` and
/// serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrzRecord {
    pub given_name: String,
    pub surname: String,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
    /// `YYYY-MM-DD`
    pub expiry_date: Option<String>,
    pub mrz_type: Option<String>,
    pub document_type_code: Option<String>,
    pub issuer_country_code: Option<String>,
    pub nationality_code: Option<String>,
    pub sex: Option<String>,
    pub document_number: Option<String>,
    pub optional_data: String,
    pub raw_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Success,
    Failure,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordStatus::Success => write!(f, "SUCCESS"),
            RecordStatus::Failure => write!(f, "FAILURE"),
        }
    }
}

/// Result of one normalization call, tagged by `status` on the wire:
///
/// ```json
/// {"status": "FAILURE", "error": "No MRZ found"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanonicalRecord {
    Success(MrzRecord),
    Failure { error: String },
}

impl CanonicalRecord {
    pub fn failure(error: impl Into<String>) -> Self {
        CanonicalRecord::Failure {
            error: error.into(),
        }
    }

    pub fn status(&self) -> RecordStatus {
        match self {
            CanonicalRecord::Success(_) => RecordStatus::Success,
            CanonicalRecord::Failure { .. } => RecordStatus::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == RecordStatus::Success
    }

    pub fn record(&self) -> Option<&MrzRecord> {
        match self {
            CanonicalRecord::Success(record) => Some(record),
            CanonicalRecord::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CanonicalRecord::Success(_) => None,
            CanonicalRecord::Failure { error } => Some(error.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_serializes_without_other_fields() {
        let record = CanonicalRecord::failure("No MRZ found");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"status": "FAILURE", "error": "No MRZ found"}));
    }

    #[test]
    fn test_success_serializes_missing_fields_as_null() {
        let record = CanonicalRecord::Success(MrzRecord {
            surname: "JOHN".to_string(),
            birth_date: Some("1990-05-12".to_string()),
            ..Default::default()
        });
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["status"], "SUCCESS");
        assert_eq!(value["surname"], "JOHN");
        assert_eq!(value["given_name"], "");
        assert_eq!(value["birth_date"], "1990-05-12");
        assert!(value["expiry_date"].is_null());
        assert!(value["document_number"].is_null());
        assert_eq!(value["optional_data"], "");
    }

    #[test]
    fn test_name_parts_emptiness() {
        assert!(NameParts::default().is_empty());
        assert!(!NameParts::new("", "JOHN").is_empty());
        assert!(!NameParts::new("ANNE", "").is_empty());
    }

    #[test]
    fn test_status_accessors() {
        let failure = CanonicalRecord::failure("boom");
        assert_eq!(failure.status(), RecordStatus::Failure);
        assert_eq!(failure.status().to_string(), "FAILURE");
        assert_eq!(failure.error(), Some("boom"));
        assert!(failure.record().is_none());

        let success = CanonicalRecord::Success(MrzRecord::default());
        assert!(success.is_success());
        assert_eq!(success.error(), None);
    }
}
