//! Manifest and event log parser.

use ghoststack::pallet::{Manifest, PlacementEvent};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading input files.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(#[from] ghoststack::Error),
}

/// Parser for manifest and event log JSON files.
#[derive(Debug, Default)]
pub struct InputParser;

impl InputParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a manifest from a JSON file.
    pub fn parse_manifest_file(&self, path: impl AsRef<Path>) -> Result<Manifest, ParseError> {
        let content = fs::read_to_string(path)?;
        self.parse_manifest_json(&content)
    }

    /// Parses a manifest from a JSON array of box records and validates it.
    pub fn parse_manifest_json(&self, json: &str) -> Result<Manifest, ParseError> {
        let manifest: Manifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parses placement events from a JSON file.
    pub fn parse_events_file(&self, path: impl AsRef<Path>) -> Result<Vec<PlacementEvent>, ParseError> {
        let content = fs::read_to_string(path)?;
        self.parse_events_json(&content)
    }

    /// Parses placement events from a JSON array.
    pub fn parse_events_json(&self, json: &str) -> Result<Vec<PlacementEvent>, ParseError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let json = r#"[
            {"width": 16, "height": 12, "depth": 12},
            {"width": 20, "height": 14, "depth": 10, "weight": 8.5, "maxLoad": 40, "uprightRequired": true}
        ]"#;

        let manifest = InputParser::new().parse_manifest_json(json).unwrap();

        assert_eq!(manifest.len(), 2);
        let second = &manifest.boxes()[1];
        assert_eq!(second.weight, Some(8.5));
        assert_eq!(second.max_load, Some(40.0));
        assert!(second.upright_required);
        assert!(!manifest.boxes()[0].upright_required);
    }

    #[test]
    fn test_invalid_box_is_reported() {
        let json = r#"[{"width": 16, "height": 0, "depth": 12}]"#;
        let err = InputParser::new().parse_manifest_json(json).unwrap_err();
        assert!(matches!(err, ParseError::InvalidManifest(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = InputParser::new().parse_manifest_json("{").unwrap_err();
        assert!(matches!(err, ParseError::JsonError(_)));
    }

    #[test]
    fn test_parse_events() {
        let json = r#"[
            {"type": "placed"},
            {"type": "sensedError", "dx": 2.0, "dz": -1.0}
        ]"#;

        let events = InputParser::new().parse_events_json(json).unwrap();

        assert_eq!(
            events,
            vec![
                PlacementEvent::Placed,
                PlacementEvent::SensedError { dx: 2.0, dz: -1.0 },
            ]
        );
    }
}
