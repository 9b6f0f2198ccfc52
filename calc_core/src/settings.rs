//! # Settings
//!
//! User defaults applied before a request reaches the solver. Every field is
//! optional in the JSON file; missing fields take their defaults.
//!
//! ```json
//! {
//!   "delta_vl_mode": false,
//!   "default_roping": "2:1",
//!   "output": "text"
//! }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::relations::{traction, RelationId};
use crate::solver::SolveRequest;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Persisted user defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Start divider requests in Delta VL mode
    pub delta_vl_mode: bool,
    /// Roping ratio pre-filled into traction requests; `None` leaves it empty
    pub default_roping: Option<String>,
    /// Output format for the CLI
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delta_vl_mode: false,
            default_roping: Some("2:1".to_string()),
            output: OutputFormat::Text,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let mut file = File::open(path)
            .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

        let settings: Settings =
            serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", path.display(), e),
            })?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }

    /// Fill defaults into a request without touching entered fields.
    ///
    /// The default roping ratio only applies when the user has not typed a
    /// roping ratio and at least one other traction field is blank; a form
    /// that is already one short of complete is left as entered.
    pub fn apply_defaults(&self, relation: RelationId, mut request: SolveRequest) -> SolveRequest {
        if self.delta_vl_mode {
            request.delta_vl_mode = true;
        }
        let is_entered = |name: &str| request.raw(name).map_or(false, |raw| !raw.trim().is_empty());
        if relation == RelationId::TractionSpeed && !is_entered(traction::ROPING_RATIO) {
            if let Some(roping) = &self.default_roping {
                let entered = traction::RELATION
                    .variables
                    .iter()
                    .filter(|v| is_entered(v.name))
                    .count();
                if entered < traction::RELATION.required_known {
                    request.set(traction::ROPING_RATIO, roping.clone());
                }
            }
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_roping.as_deref(), Some("2:1"));
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{"output": "json", "default_roping": null}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.output, OutputFormat::Json);
        assert_eq!(settings.default_roping, None);
        assert!(!settings.delta_vl_mode);
    }

    #[test]
    fn test_invalid_json() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_roping_default_fills_blank() {
        let request = SolveRequest::new()
            .with(traction::RPM, "1457")
            .with(traction::WHEEL_DIAMETER, "400")
            .with(traction::GEAR_RATIO, "43:2");
        let filled = Settings::default().apply_defaults(RelationId::TractionSpeed, request);
        assert_eq!(filled.raw(traction::ROPING_RATIO), Some("2:1"));
    }

    #[test]
    fn test_roping_default_keeps_complete_form() {
        let request = SolveRequest::new()
            .with(traction::SPEED, "60")
            .with(traction::RPM, "1457")
            .with(traction::WHEEL_DIAMETER, "400")
            .with(traction::GEAR_RATIO, "43:2");
        let filled = Settings::default().apply_defaults(RelationId::TractionSpeed, request.clone());
        assert_eq!(filled, request);
    }

    #[test]
    fn test_delta_vl_default() {
        let settings = Settings {
            delta_vl_mode: true,
            ..Settings::default()
        };
        let request = settings.apply_defaults(RelationId::FrequencyDivider, SolveRequest::new());
        assert!(request.delta_vl_mode);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/liftcalc.json")).unwrap_err();
        assert!(matches!(err, CalcError::FileError { ref operation, .. } if operation == "open"));
    }

    #[test]
    fn test_load_from_file() {
        let name = format!("liftcalc_settings_{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, r#"{"delta_vl_mode": true}"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(settings.delta_vl_mode);
        assert_eq!(settings.output, OutputFormat::Text);
    }

    #[test]
    fn test_round_trip_json() {
        let json = Settings::default().to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), Settings::default());
    }
}
