use crate::dossier::{DocumentKind, SignatureKind};
use crate::parameter::Parameter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of checking one lab value against its reference bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Compliance {
    WithinBounds,
    OutOfBounds,
    /// Value missing or not a number
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisStatus {
    NoData,
    AllInRange,
    PartiallyOutOfRange,
}

impl AnalysisStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisStatus::NoData => "No data",
            AnalysisStatus::AllInRange => "All in range",
            AnalysisStatus::PartiallyOutOfRange => "Partially out of range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEvaluation {
    pub states: BTreeMap<Parameter, Compliance>,
    pub present: u32,
    pub ok: u32,
    pub bad: u32,
}

impl AnalysisEvaluation {
    pub fn state(&self, param: Parameter) -> Compliance {
        self.states.get(&param).copied().unwrap_or(Compliance::NoData)
    }

    pub fn status(&self) -> AnalysisStatus {
        if self.present == 0 {
            AnalysisStatus::NoData
        } else if self.bad == 0 {
            AnalysisStatus::AllInRange
        } else {
            AnalysisStatus::PartiallyOutOfRange
        }
    }

    /// Parameters whose value fell outside the reference bounds
    pub fn out_of_bounds(&self) -> Vec<Parameter> {
        self.states
            .iter()
            .filter(|(_, state)| **state == Compliance::OutOfBounds)
            .map(|(param, _)| *param)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionStatus {
    Complete,
    Incomplete,
    Empty,
}

impl SectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SectionStatus::Complete => "Complete",
            SectionStatus::Incomplete => "Incomplete",
            SectionStatus::Empty => "Empty",
        }
    }
}

/// How many required items of a section are filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completeness {
    pub filled: u32,
    pub required: u32,
    pub status: SectionStatus,
}

impl Completeness {
    pub fn from_counts(filled: u32, required: u32) -> Self {
        let status = if filled >= required {
            SectionStatus::Complete
        } else if filled == 0 {
            SectionStatus::Empty
        } else {
            SectionStatus::Incomplete
        };
        Self {
            filled,
            required,
            status,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == SectionStatus::Complete
    }
}

/// Fee tier resolved for a declared annual volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FeeAssessment {
    #[serde(rename_all = "camelCase")]
    Tier { category: String, amount: f64 },
    /// Volume invalid or outside every tier
    Unclassified,
}

impl FeeAssessment {
    pub fn category(&self) -> Option<&str> {
        match self {
            FeeAssessment::Tier { category, .. } => Some(category),
            FeeAssessment::Unclassified => None,
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            FeeAssessment::Tier { amount, .. } => *amount,
            FeeAssessment::Unclassified => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistryStatus {
    Registered,
    NotRegistered,
    /// Registration number left blank
    MissingNumber,
    /// No registry list loaded
    NotChecked,
}

/// A reason a dossier cannot go to the plenary as approved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Blocker {
    ApplicantIncomplete,
    TechnicalIncomplete,
    MissingDocuments { missing: Vec<DocumentKind> },
    NoAnalysisData,
    MissingSignatures { missing: Vec<SignatureKind> },
}

impl std::fmt::Display for Blocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Blocker::ApplicantIncomplete => f.write_str("Applicant data incomplete"),
            Blocker::TechnicalIncomplete => f.write_str("Technical parameters incomplete"),
            Blocker::MissingDocuments { missing } => {
                let labels: Vec<_> = missing.iter().map(|d| d.label()).collect();
                write!(f, "Missing documents: {}", labels.join(", "))
            }
            Blocker::NoAnalysisData => f.write_str("No lab analysis data"),
            Blocker::MissingSignatures { missing } => {
                let labels: Vec<_> = missing.iter().map(|s| s.label()).collect();
                write!(f, "Missing signatures: {}", labels.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub approved: bool,
    pub blockers: Vec<Blocker>,
}

impl Verdict {
    pub fn from_blockers(blockers: Vec<Blocker>) -> Self {
        Self {
            approved: blockers.is_empty(),
            blockers,
        }
    }
}

/// Everything derived from a dossier and its reference limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub file_number: String,
    pub applicant: Completeness,
    pub technical: Completeness,
    pub documents: Completeness,
    pub signatures: Completeness,
    pub analysis: AnalysisEvaluation,
    pub analysis_status: AnalysisStatus,
    pub fee: FeeAssessment,
    pub registry: RegistryStatus,
    pub verdict: Verdict,
}
