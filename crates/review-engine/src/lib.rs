pub mod bundle;
pub mod error;
pub mod extractors;
pub mod patterns;
pub mod rules;
pub mod state;
pub mod store;

pub use bundle::Bundle;
pub use error::{Result, ReviewError};
pub use extractors::analysis_csv::{merge_analysis_csv, parse_analysis_csv};
pub use extractors::registry::Registry;
pub use rules::fees::{classify, classify_volume, validate_tiers, TierIssue};
pub use rules::limits::evaluate_analysis;
pub use state::{AppState, Edit, Section};
pub use store::{KeyValueStore, MemoryStore};

use shared_types::{Dossier, ReferenceLimits, ReviewReport};

/// ReviewEngine entry point
pub struct ReviewEngine;

impl ReviewEngine {
    pub fn new() -> Self {
        Self
    }

    /// Derives every section status, the fee tier and the verdict
    ///
    /// The registry check is informational and never affects the verdict.
    pub fn review(
        &self,
        dossier: &Dossier,
        limits: &ReferenceLimits,
        registry: Option<&Registry>,
    ) -> ReviewReport {
        let applicant = rules::completeness::applicant_completeness(&dossier.applicant);
        let technical = rules::completeness::technical_completeness(&dossier.technical);
        let documents = rules::completeness::documents_completeness(&dossier.documents);
        let signatures = rules::completeness::signatures_completeness(&dossier.signatures);

        let analysis = rules::limits::evaluate_analysis(limits, &dossier.analysis);
        let analysis_status = analysis.status();

        let fee = rules::fees::classify_volume(&limits.tiers, &dossier.technical.annual_volume);
        let registry = extractors::registry::registry_status(
            registry,
            &dossier.applicant.registration_number,
        );

        let verdict = rules::verdict::decide(
            &applicant,
            &technical,
            &dossier.documents,
            analysis_status,
            &dossier.signatures,
        );

        tracing::debug!(
            file_number = %dossier.metadata.file_number,
            approved = verdict.approved,
            blockers = verdict.blockers.len(),
            "Reviewed dossier"
        );

        ReviewReport {
            file_number: dossier.metadata.file_number.clone(),
            applicant,
            technical,
            documents,
            signatures,
            analysis,
            analysis_status,
            fee,
            registry,
            verdict,
        }
    }
}

impl Default for ReviewEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{
        AnalysisStatus, Blocker, DocumentKind, FeeAssessment, Parameter, RegistryStatus,
        SectionStatus, SignatureKind,
    };

    fn ready_dossier() -> Dossier {
        let mut dossier = Dossier::default();
        dossier.metadata.file_number = "EXP-0412/25".to_string();

        let applicant = &mut dossier.applicant;
        applicant.holder_name = "Cooperativa de Agua Potable Villa Ruiz".to_string();
        applicant.tax_id = "30-70845123-4".to_string();
        applicant.address = "Ruta 7 km 112".to_string();
        applicant.locality = "Villa Ruiz".to_string();
        applicant.registration_number = "PZ-10233".to_string();
        applicant.water_use = "Human consumption".to_string();

        let technical = &mut dossier.technical;
        technical.depth = "84".to_string();
        technical.diameter = "0.25".to_string();
        technical.static_level = "12.5".to_string();
        technical.flow_rate = "40".to_string();
        technical.annual_volume = "750000".to_string();
        technical.latitude = "-34.64".to_string();
        technical.longitude = "-59.39".to_string();

        for kind in DocumentKind::ALL {
            dossier.documents.set_present(kind, true);
        }
        for kind in SignatureKind::ALL {
            dossier.signatures.set_signed(kind, true);
        }

        dossier.analysis.set_value(Parameter::Ph, "7.0");
        dossier.analysis.set_value(Parameter::EColi, "0");
        dossier
    }

    #[test]
    fn test_complete_dossier_is_approved() {
        let engine = ReviewEngine::new();
        let report = engine.review(&ready_dossier(), &ReferenceLimits::default(), None);

        assert!(report.verdict.approved);
        assert_eq!(report.applicant.status, SectionStatus::Complete);
        assert_eq!(report.technical.status, SectionStatus::Complete);
        assert_eq!(report.documents.status, SectionStatus::Complete);
        assert_eq!(report.signatures.status, SectionStatus::Complete);
        assert_eq!(report.analysis_status, AnalysisStatus::AllInRange);
        assert_eq!(report.fee.category(), Some("II"));
        assert_eq!(report.registry, RegistryStatus::NotChecked);
        assert_eq!(report.file_number, "EXP-0412/25");
    }

    #[test]
    fn test_out_of_range_value_does_not_block() {
        let mut dossier = ready_dossier();
        dossier.analysis.set_value(Parameter::Arsenic, "0.02");
        let report = ReviewEngine::new().review(&dossier, &ReferenceLimits::default(), None);

        assert_eq!(report.analysis_status, AnalysisStatus::PartiallyOutOfRange);
        assert!(report.verdict.approved);
    }

    #[test]
    fn test_empty_dossier_lists_all_blockers() {
        let report =
            ReviewEngine::new().review(&Dossier::default(), &ReferenceLimits::default(), None);

        assert!(!report.verdict.approved);
        assert_eq!(report.verdict.blockers.len(), 5);
        assert!(report.verdict.blockers.contains(&Blocker::NoAnalysisData));
        assert_eq!(report.fee, FeeAssessment::Unclassified);
    }

    #[test]
    fn test_registry_does_not_affect_verdict() {
        let registry = Registry::parse("PZ-00001\nPZ-00002").unwrap();
        let report = ReviewEngine::new().review(
            &ready_dossier(),
            &ReferenceLimits::default(),
            Some(&registry),
        );
        assert_eq!(report.registry, RegistryStatus::NotRegistered);
        assert!(report.verdict.approved);
    }
}
