//! Application state: the dossier and limits being edited, with explicit
//! update and save steps
//!
//! Every change goes through [`AppState::apply`], which consumes the current
//! state and returns the next one. Persisting is a separate [`AppState::save`]
//! call made by the front-end after each committed edit.

use crate::bundle::Bundle;
use crate::error::{Result, ReviewError};
use crate::extractors::registry::Registry;
use crate::store::{KeyValueStore, DOSSIER_KEY, LIMITS_KEY};
use crate::ReviewEngine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_types::{
    Bounds, DocumentKind, Dossier, FeeTier, Parameter, ReferenceLimits, ReviewReport,
    SignatureKind, TextRecord,
};

/// Dossier sections with free-text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Metadata,
    Applicant,
    Technical,
    Analysis,
}

/// A single user edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Edit {
    SetText {
        section: Section,
        field: String,
        value: String,
    },
    SetAnalysisValue {
        parameter: Parameter,
        value: String,
    },
    /// Values parsed from a bulk analysis import
    MergeAnalysis {
        values: Vec<(Parameter, String)>,
    },
    SetDocument {
        kind: DocumentKind,
        present: bool,
    },
    AddFile {
        name: String,
    },
    RemoveFile {
        index: usize,
    },
    SetSignature {
        kind: SignatureKind,
        signed: bool,
    },
    SetBounds {
        parameter: Parameter,
        bounds: Bounds,
    },
    SetTiers {
        tiers: Vec<FeeTier>,
    },
    ResetDossier,
    RestoreDefaultLimits,
    Import {
        bundle: Bundle,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub dossier: Dossier,
    pub limits: ReferenceLimits,
}

impl AppState {
    pub fn new(dossier: Dossier, limits: ReferenceLimits) -> Self {
        Self { dossier, limits }
    }

    /// Loads both records, falling back to defaults when a key is missing,
    /// unreadable or holds JSON that no longer parses
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            dossier: load_or_default(store, DOSSIER_KEY),
            limits: load_or_default(store, LIMITS_KEY),
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        let limits = serde_json::to_string(&self.limits)
            .map_err(|e| ReviewError::SerializationError(e.to_string()))?;
        let dossier = serde_json::to_string(&self.dossier)
            .map_err(|e| ReviewError::SerializationError(e.to_string()))?;
        store.set(LIMITS_KEY, &limits)?;
        store.set(DOSSIER_KEY, &dossier)?;
        Ok(())
    }

    pub fn apply(mut self, edit: Edit) -> Self {
        match edit {
            Edit::SetText {
                section,
                field,
                value,
            } => {
                let record: &mut dyn TextRecord = match section {
                    Section::Metadata => &mut self.dossier.metadata,
                    Section::Applicant => &mut self.dossier.applicant,
                    Section::Technical => &mut self.dossier.technical,
                    Section::Analysis => &mut self.dossier.analysis,
                };
                if !record.set_text_field(&field, value) {
                    tracing::warn!(?section, field = %field, "Ignoring edit of unknown field");
                }
            }
            Edit::SetAnalysisValue { parameter, value } => {
                self.dossier.analysis.set_value(parameter, value);
            }
            Edit::MergeAnalysis { values } => {
                for (parameter, value) in values {
                    self.dossier.analysis.set_value(parameter, value);
                }
            }
            Edit::SetDocument { kind, present } => {
                self.dossier.documents.set_present(kind, present);
            }
            Edit::AddFile { name } => {
                let name = name.trim().to_string();
                if !name.is_empty() {
                    self.dossier.documents.files.push(name);
                }
            }
            Edit::RemoveFile { index } => {
                if index < self.dossier.documents.files.len() {
                    self.dossier.documents.files.remove(index);
                }
            }
            Edit::SetSignature { kind, signed } => {
                self.dossier.signatures.set_signed(kind, signed);
            }
            Edit::SetBounds { parameter, bounds } => {
                self.limits.bounds.insert(parameter, bounds);
            }
            Edit::SetTiers { tiers } => {
                self.limits.tiers = tiers;
            }
            Edit::ResetDossier => {
                self.dossier = Dossier::default();
            }
            Edit::RestoreDefaultLimits => {
                self.limits = ReferenceLimits::default();
            }
            Edit::Import { bundle } => {
                self.dossier = bundle.dossier;
                self.limits = bundle.limits;
            }
        }
        self
    }

    pub fn review(&self, registry: Option<&Registry>) -> ReviewReport {
        ReviewEngine::new().review(&self.dossier, &self.limits, registry)
    }

    pub fn to_bundle(&self) -> Bundle {
        Bundle::new(self.dossier.clone(), self.limits.clone())
    }
}

fn load_or_default<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Stored state is unreadable, using defaults");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Could not read stored state, using defaults");
            T::default()
        }
    }
}
