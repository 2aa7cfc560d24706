//! Combined `{ dossier, limits }` document used for import and export

use crate::error::{Result, ReviewError};
use serde::{Deserialize, Serialize};
use shared_types::{Dossier, ReferenceLimits};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub dossier: Dossier,
    pub limits: ReferenceLimits,
    /// RFC 3339 timestamp written on export, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

impl Bundle {
    pub fn new(dossier: Dossier, limits: ReferenceLimits) -> Self {
        Self {
            dossier,
            limits,
            exported_at: None,
        }
    }

    /// Serializes the bundle as pretty-printed JSON, stamping the export time
    pub fn export_json(&self) -> Result<String> {
        let stamped = Bundle {
            exported_at: Some(chrono::Utc::now().to_rfc3339()),
            ..self.clone()
        };
        let json = serde_json::to_string_pretty(&stamped)
            .map_err(|e| ReviewError::SerializationError(e.to_string()))?;
        tracing::info!(
            file_number = %self.dossier.metadata.file_number,
            "Exported dossier bundle"
        );
        Ok(json)
    }

    /// Parses an exported bundle; both `dossier` and `limits` must be present
    pub fn import_json(json: &str) -> Result<Self> {
        let bundle: Bundle = serde_json::from_str(json.trim_start_matches('\u{feff}'))
            .map_err(|e| ReviewError::InvalidBundle(e.to_string()))?;
        tracing::info!(
            file_number = %bundle.dossier.metadata.file_number,
            "Imported dossier bundle"
        );
        Ok(bundle)
    }
}
