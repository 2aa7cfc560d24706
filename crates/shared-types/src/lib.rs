pub mod dossier;
pub mod limits;
pub mod parameter;
pub mod types;

pub use dossier::{
    Analysis, Applicant, DocumentKind, Documents, Dossier, Metadata, SignatureKind, Signatures,
    Technical, TextRecord,
};
pub use limits::{Bounds, FeeTier, ReferenceLimits};
pub use parameter::Parameter;
pub use types::{
    AnalysisEvaluation, AnalysisStatus, Blocker, Compliance, Completeness, FeeAssessment,
    RegistryStatus, ReviewReport, SectionStatus, Verdict,
};
