use crate::processing::date::{CenturyPivot, DEFAULT_CENTURY_PIVOT};
use crate::processing::name::FILLER_MARKER;
use crate::utils::MrzError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for the normalizer. Every key is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub century_pivot: u8,
    pub filler_marker: char,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            century_pivot: DEFAULT_CENTURY_PIVOT,
            filler_marker: FILLER_MARKER,
        }
    }
}

impl NormalizerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MrzError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| MrzError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: NormalizerConfig = serde_json::from_str(&text)
            .map_err(|e| MrzError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MrzError> {
        if CenturyPivot::new(self.century_pivot).is_none() {
            return Err(MrzError::Config(format!(
                "century_pivot must be between 0 and 100, got {}",
                self.century_pivot
            )));
        }
        if self.filler_marker == '<' || self.filler_marker.is_whitespace() {
            return Err(MrzError::Config(format!(
                "filler_marker {:?} collides with a name separator",
                self.filler_marker
            )));
        }
        Ok(())
    }

    pub fn pivot(&self) -> CenturyPivot {
        CenturyPivot::new(self.century_pivot).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = NormalizerConfig::default();
        assert_eq!(config.century_pivot, 69);
        assert_eq!(config.filler_marker, 'L');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(r#"{"century_pivot": 50}"#);
        let config = NormalizerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.century_pivot, 50);
        assert_eq!(config.filler_marker, 'L');
        assert_eq!(config.pivot().value(), 50);
    }

    #[test]
    fn test_out_of_range_pivot_rejected() {
        let file = write_config(r#"{"century_pivot": 150}"#);
        assert!(matches!(
            NormalizerConfig::from_file(file.path()),
            Err(MrzError::Config(_))
        ));
    }

    #[test]
    fn test_separator_marker_rejected() {
        let config = NormalizerConfig {
            filler_marker: '<',
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            NormalizerConfig::from_file("/nonexistent/mrzkit.json"),
            Err(MrzError::Config(_))
        ));
    }
}
