// Overall verdict for sending a dossier to the plenary
use shared_types::{
    AnalysisStatus, Blocker, Completeness, DocumentKind, Documents, SignatureKind, Signatures,
    Verdict,
};

/// Approves only when every section is in order
///
/// Out-of-range lab values do not block approval; only a complete absence of
/// analysis data does.
pub fn decide(
    applicant: &Completeness,
    technical: &Completeness,
    documents: &Documents,
    analysis_status: AnalysisStatus,
    signatures: &Signatures,
) -> Verdict {
    let mut blockers = Vec::new();

    if !applicant.is_complete() {
        blockers.push(Blocker::ApplicantIncomplete);
    }

    if !technical.is_complete() {
        blockers.push(Blocker::TechnicalIncomplete);
    }

    let missing_documents: Vec<DocumentKind> = DocumentKind::ALL
        .into_iter()
        .filter(|kind| !documents.is_present(*kind))
        .collect();
    if !missing_documents.is_empty() {
        blockers.push(Blocker::MissingDocuments {
            missing: missing_documents,
        });
    }

    if analysis_status == AnalysisStatus::NoData {
        blockers.push(Blocker::NoAnalysisData);
    }

    let missing_signatures: Vec<SignatureKind> = SignatureKind::ALL
        .into_iter()
        .filter(|kind| !signatures.is_signed(*kind))
        .collect();
    if !missing_signatures.is_empty() {
        blockers.push(Blocker::MissingSignatures {
            missing: missing_signatures,
        });
    }

    Verdict::from_blockers(blockers)
}
